// src/services/dashboard_service.rs

use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::{DashboardRepository, SaleRepository},
    models::{dashboard::DashboardSummary, inventory::Medicine, sales::Sale},
};

/// Janela padrão de "vencendo em breve", em dias.
pub const DEFAULT_EXPIRING_WINDOW_DAYS: i32 = 30;

/// Quantas vendas recentes / itens críticos o painel mostra por padrão.
pub const DEFAULT_PANEL_LIMIT: i64 = 5;

// Fachada de leitura: agrega estoque e vendas, nunca escreve.
#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    sale_repo: SaleRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, sale_repo: SaleRepository) -> Self {
        Self { repo, sale_repo }
    }

    pub async fn summary<'e, E>(
        &self,
        executor: E,
        expiring_window_days: Option<i32>,
    ) -> Result<DashboardSummary, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let window = expiring_window_days.unwrap_or(DEFAULT_EXPIRING_WINDOW_DAYS);
        self.repo.get_summary(executor, window).await
    }

    pub async fn recent_sales<'e, E>(
        &self,
        executor: E,
        limit: Option<i64>,
    ) -> Result<Vec<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.sale_repo
            .list_recent(executor, limit.unwrap_or(DEFAULT_PANEL_LIMIT))
            .await
    }

    pub async fn low_stock<'e, E>(
        &self,
        executor: E,
        limit: Option<i64>,
    ) -> Result<Vec<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .low_stock_medicines(executor, limit.unwrap_or(DEFAULT_PANEL_LIMIT))
            .await
    }
}
