// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        DashboardRepository, MedicineRepository, PartyRepository, SaleRepository, UserRepository,
    },
    services::{
        auth::AuthService, dashboard_service::DashboardService,
        inventory_service::InventoryService, party_service::PartyService,
        receipt_service::ReceiptService, sale_service::SaleService,
    },
};

const DEFAULT_PHARMACY_NAME: &str = "Farmácia Central";

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub inventory_service: InventoryService,
    pub party_service: PartyService,
    pub sale_service: SaleService,
    pub dashboard_service: DashboardService,
    pub receipt_service: ReceiptService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")?;
        // Nome impresso no cabeçalho do recibo
        let pharmacy_name =
            env::var("PHARMACY_NAME").unwrap_or_else(|_| DEFAULT_PHARMACY_NAME.to_string());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let medicine_repo = MedicineRepository::new(db_pool.clone());
        let party_repo = PartyRepository::new(db_pool.clone());
        let sale_repo = SaleRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret.clone());
        let inventory_service = InventoryService::new(medicine_repo.clone(), party_repo.clone());
        let party_service = PartyService::new(party_repo.clone());
        let sale_service = SaleService::new(sale_repo.clone(), medicine_repo, party_repo);
        let dashboard_service = DashboardService::new(dashboard_repo, sale_repo);
        let receipt_service = ReceiptService::new(sale_service.clone(), pharmacy_name);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            inventory_service,
            party_service,
            sale_service,
            dashboard_service,
            receipt_service,
        })
    }
}
