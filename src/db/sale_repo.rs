// src/db/sale_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sales::{PaymentMethod, Sale, SaleItem},
};

#[derive(Clone)]
pub struct SaleRepository {
    pool: PgPool,
}

impl SaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Escritas (sempre dentro da transação do motor de vendas)
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn create_sale<'e, E>(
        &self,
        executor: E,
        customer_id: Option<Uuid>,
        cashier_id: Uuid,
        total_amount: Decimal,
        discount: Decimal,
        tax: Decimal,
        final_amount: Decimal,
        payment_method: PaymentMethod,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (
                customer_id, cashier_id, total_amount, discount, tax,
                final_amount, payment_method
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(cashier_id)
        .bind(total_amount)
        .bind(discount)
        .bind(tax)
        .bind(final_amount)
        .bind(payment_method)
        .fetch_one(executor)
        .await?;

        Ok(sale)
    }

    pub async fn add_sale_item<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
        medicine_id: Uuid,
        medicine_name: &str,
        quantity: i32,
        unit_price: Decimal,
        total_price: Decimal,
    ) -> Result<SaleItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, SaleItem>(
            r#"
            INSERT INTO sale_items (
                sale_id, medicine_id, medicine_name, quantity, unit_price, total_price
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(sale_id)
        .bind(medicine_id)
        .bind(medicine_name)
        .bind(quantity)
        .bind(unit_price)
        .bind(total_price)
        .fetch_one(executor)
        .await?;

        Ok(item)
    }

    // ---
    // Leituras (histórico e recibo)
    // ---

    pub async fn get_sale<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(sale)
    }

    pub async fn list_sale_items<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
    ) -> Result<Vec<SaleItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, SaleItem>(
            "SELECT * FROM sale_items WHERE sale_id = $1 ORDER BY created_at ASC",
        )
        .bind(sale_id)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn list_recent<'e, E>(
        &self,
        executor: E,
        limit: i64,
    ) -> Result<Vec<Sale>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sales =
            sqlx::query_as::<_, Sale>("SELECT * FROM sales ORDER BY created_at DESC LIMIT $1")
                .bind(limit)
                .fetch_all(executor)
                .await?;
        Ok(sales)
    }

    /// Nomes auxiliares do recibo (cliente e caixa) em uma única query.
    pub async fn sale_names<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
    ) -> Result<Option<(Option<String>, String)>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, (Option<String>, String)>(
            r#"
            SELECT c.name, u.email
            FROM sales s
            JOIN users u ON s.cashier_id = u.id
            LEFT JOIN customers c ON s.customer_id = c.id
            WHERE s.id = $1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(executor)
        .await?;
        Ok(row)
    }
}
