// src/services/inventory_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{MedicineRepository, PartyRepository},
    models::inventory::{Medicine, MedicineCategory, MedicineDetails, MedicineFilter},
};

#[derive(Clone)]
pub struct InventoryService {
    medicine_repo: MedicineRepository,
    party_repo: PartyRepository,
}

impl InventoryService {
    pub fn new(medicine_repo: MedicineRepository, party_repo: PartyRepository) -> Self {
        Self {
            medicine_repo,
            party_repo,
        }
    }

    // --- ENTRADA DE CATÁLOGO ---
    #[allow(clippy::too_many_arguments)]
    pub async fn create_medicine<'e, E>(
        &self,
        executor: E,
        name: &str,
        generic_name: Option<&str>,
        category: MedicineCategory,
        manufacturer: &str,
        supplier_id: Uuid,
        batch_number: &str,
        expiry_date: NaiveDate,
        purchase_price: Decimal,
        selling_price: Decimal,
        stock_quantity: i32,
        minimum_stock: i32,
        description: Option<&str>,
    ) -> Result<Medicine, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // O fornecedor é obrigatório; valida antes de inserir para devolver
        // um 404 claro em vez de erro de chave estrangeira.
        self.party_repo
            .get_supplier(&mut *tx, supplier_id)
            .await?
            .ok_or(AppError::SupplierNotFound(supplier_id))?;

        let medicine = self
            .medicine_repo
            .create(
                &mut *tx,
                name,
                generic_name,
                category,
                manufacturer,
                supplier_id,
                batch_number,
                expiry_date,
                purchase_price,
                selling_price,
                stock_quantity,
                minimum_stock,
                description,
            )
            .await?;

        tx.commit().await?;
        Ok(medicine)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_medicine<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        generic_name: Option<&str>,
        category: MedicineCategory,
        manufacturer: &str,
        supplier_id: Uuid,
        batch_number: &str,
        expiry_date: NaiveDate,
        purchase_price: Decimal,
        selling_price: Decimal,
        minimum_stock: i32,
        description: Option<&str>,
    ) -> Result<Medicine, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.party_repo
            .get_supplier(&mut *tx, supplier_id)
            .await?
            .ok_or(AppError::SupplierNotFound(supplier_id))?;

        let medicine = self
            .medicine_repo
            .update(
                &mut *tx,
                id,
                name,
                generic_name,
                category,
                manufacturer,
                supplier_id,
                batch_number,
                expiry_date,
                purchase_price,
                selling_price,
                minimum_stock,
                description,
            )
            .await?
            .ok_or(AppError::MedicineNotFound(id))?;

        tx.commit().await?;
        Ok(medicine)
    }

    // --- CONSULTAS ---

    pub async fn get_medicine<'e, E>(&self, executor: E, id: Uuid) -> Result<Medicine, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.medicine_repo
            .get(executor, id)
            .await?
            .ok_or(AppError::MedicineNotFound(id))
    }

    pub async fn list_medicines<'e, E>(
        &self,
        executor: E,
        filter: &MedicineFilter,
    ) -> Result<Vec<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.medicine_repo.list(executor, filter).await
    }

    pub async fn medicine_details<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<MedicineDetails, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.medicine_repo
            .details(executor, id)
            .await?
            .ok_or(AppError::MedicineNotFound(id))
    }

    // --- ESTOQUE ---

    /// Ajuste manual de estoque (entrada de mercadoria ou correção).
    /// A baixa por venda NÃO passa por aqui: ela vive na transação do
    /// motor de vendas.
    pub async fn adjust_stock<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        delta: i32,
    ) -> Result<Medicine, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let adjusted = self.medicine_repo.adjust_stock(&mut *tx, id, delta).await?;

        let medicine = match adjusted {
            Some(medicine) => medicine,
            // Nenhuma linha: ou o id não existe, ou o ajuste furaria o piso
            // zero. Distingue para devolver o erro certo.
            None => match self.medicine_repo.get(&mut *tx, id).await? {
                Some(current) => {
                    return Err(AppError::InsufficientStock {
                        medicine_id: id,
                        requested: -delta,
                        available: current.stock_quantity,
                    });
                }
                None => return Err(AppError::MedicineNotFound(id)),
            },
        };

        tx.commit().await?;
        Ok(medicine)
    }

    /// Baixa lógica do catálogo (mantém histórico de vendas intacto).
    pub async fn deactivate_medicine<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Medicine, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.medicine_repo
            .deactivate(executor, id)
            .await?
            .ok_or(AppError::MedicineNotFound(id))
    }
}
