// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{dashboard::DashboardSummary, inventory::Medicine},
};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resumo geral do painel. Roda dentro de uma transação para que os
    /// contadores sejam um snapshot consistente entre si.
    pub async fn get_summary<'e, E>(
        &self,
        executor: E,
        expiring_window_days: i32,
    ) -> Result<DashboardSummary, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // A. Catálogo
        let total_medicines = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM medicines WHERE is_active = TRUE",
        )
        .fetch_one(&mut *tx)
        .await?;

        let inventory_value = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(selling_price * stock_quantity), 0)
            FROM medicines
            WHERE is_active = TRUE
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        // B. Alertas de estoque e validade
        let low_stock_count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM medicines
            WHERE is_active = TRUE AND stock_quantity <= minimum_stock
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let expired_count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM medicines
            WHERE is_active = TRUE AND expiry_date < CURRENT_DATE
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let expiring_soon_count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM medicines
            WHERE is_active = TRUE
              AND expiry_date >= CURRENT_DATE
              AND expiry_date <= CURRENT_DATE + $1
            "#,
        )
        .bind(expiring_window_days)
        .fetch_one(&mut *tx)
        .await?;

        // C. Vendas de hoje
        let today_sales = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sales WHERE created_at::date = CURRENT_DATE",
        )
        .fetch_one(&mut *tx)
        .await?;

        let today_revenue = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(final_amount), 0)
            FROM sales
            WHERE created_at::date = CURRENT_DATE
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardSummary {
            total_medicines,
            inventory_value,
            low_stock_count,
            expired_count,
            expiring_soon_count,
            expiring_window_days,
            today_sales,
            today_revenue,
        })
    }

    /// Top N medicamentos em estoque baixo, os mais críticos primeiro.
    pub async fn low_stock_medicines<'e, E>(
        &self,
        executor: E,
        limit: i64,
    ) -> Result<Vec<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let medicines = sqlx::query_as::<_, Medicine>(
            r#"
            SELECT * FROM medicines
            WHERE is_active = TRUE AND stock_quantity <= minimum_stock
            ORDER BY stock_quantity - minimum_stock ASC, name ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(executor)
        .await?;
        Ok(medicines)
    }
}
