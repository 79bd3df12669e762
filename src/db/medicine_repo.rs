// src/db/medicine_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{Medicine, MedicineCategory, MedicineDetails, MedicineFilter},
};

#[derive(Clone)]
pub struct MedicineRepository {
    pool: PgPool,
}

impl MedicineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras
    // ---

    pub async fn get<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let medicine = sqlx::query_as::<_, Medicine>("SELECT * FROM medicines WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(medicine)
    }

    /// Busca travando a linha (FOR UPDATE). Usada pelo motor de vendas para
    /// que duas vendas concorrentes do mesmo medicamento serializem aqui.
    pub async fn get_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let medicine =
            sqlx::query_as::<_, Medicine>("SELECT * FROM medicines WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(medicine)
    }

    /// Listagem com filtros combináveis (texto, categoria, estoque baixo,
    /// validade). Montada dinamicamente com QueryBuilder.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        filter: &MedicineFilter,
    ) -> Result<Vec<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM medicines WHERE 1=1");

        if !filter.include_inactive.unwrap_or(false) {
            qb.push(" AND is_active = TRUE");
        }

        if let Some(query) = filter.query.as_deref() {
            let pattern = format!("%{}%", query);
            qb.push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR generic_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR manufacturer ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(category) = filter.category {
            qb.push(" AND category = ").push_bind(category);
        }

        if filter.low_stock.unwrap_or(false) {
            qb.push(" AND stock_quantity <= minimum_stock");
        }

        if filter.expired.unwrap_or(false) {
            qb.push(" AND expiry_date < CURRENT_DATE");
        }

        if let Some(days) = filter.expiring_within_days {
            qb.push(" AND expiry_date >= CURRENT_DATE AND expiry_date <= CURRENT_DATE + ")
                .push_bind(days);
        }

        qb.push(" ORDER BY name ASC");

        let medicines = qb
            .build_query_as::<Medicine>()
            .fetch_all(executor)
            .await?;
        Ok(medicines)
    }

    /// Consulta rápida do ponto de venda: { id, name, price, stock }
    pub async fn details<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<MedicineDetails>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let details = sqlx::query_as::<_, MedicineDetails>(
            r#"
            SELECT id, name, selling_price AS price, stock_quantity AS stock
            FROM medicines
            WHERE id = $1 AND is_active = TRUE
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(details)
    }

    // ---
    // Escritas
    // ---

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
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
        E: Executor<'e, Database = Postgres>,
    {
        let medicine = sqlx::query_as::<_, Medicine>(
            r#"
            INSERT INTO medicines (
                name, generic_name, category, manufacturer, supplier_id,
                batch_number, expiry_date, purchase_price, selling_price,
                stock_quantity, minimum_stock, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(generic_name)
        .bind(category)
        .bind(manufacturer)
        .bind(supplier_id)
        .bind(batch_number)
        .bind(expiry_date)
        .bind(purchase_price)
        .bind(selling_price)
        .bind(stock_quantity)
        .bind(minimum_stock)
        .bind(description)
        .fetch_one(executor)
        .await?;

        Ok(medicine)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
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
    ) -> Result<Option<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // stock_quantity fica de fora de propósito: estoque só muda por
        // entrada (restock) ou por venda.
        let medicine = sqlx::query_as::<_, Medicine>(
            r#"
            UPDATE medicines SET
                name = $2, generic_name = $3, category = $4, manufacturer = $5,
                supplier_id = $6, batch_number = $7, expiry_date = $8,
                purchase_price = $9, selling_price = $10, minimum_stock = $11,
                description = $12, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(generic_name)
        .bind(category)
        .bind(manufacturer)
        .bind(supplier_id)
        .bind(batch_number)
        .bind(expiry_date)
        .bind(purchase_price)
        .bind(selling_price)
        .bind(minimum_stock)
        .bind(description)
        .fetch_optional(executor)
        .await?;

        Ok(medicine)
    }

    /// Ajuste de estoque (entrada positiva, correção negativa). A cláusula
    /// `stock_quantity + $2 >= 0` garante o piso zero no próprio UPDATE:
    /// nenhuma linha retornada significa piso violado (ou id inexistente).
    pub async fn adjust_stock<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        delta: i32,
    ) -> Result<Option<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let medicine = sqlx::query_as::<_, Medicine>(
            r#"
            UPDATE medicines
            SET stock_quantity = stock_quantity + $2, updated_at = NOW()
            WHERE id = $1 AND stock_quantity + $2 >= 0
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(executor)
        .await?;

        Ok(medicine)
    }

    /// Baixa de estoque de uma venda. Condicional: só decrementa se houver
    /// saldo, devolvendo o estoque restante. Nenhuma linha = saldo
    /// insuficiente (o chamador já resolveu o id com FOR UPDATE).
    pub async fn decrement_stock<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        quantity: i32,
    ) -> Result<Option<i32>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let remaining = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE medicines
            SET stock_quantity = stock_quantity - $2, updated_at = NOW()
            WHERE id = $1 AND stock_quantity >= $2
            RETURNING stock_quantity
            "#,
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(executor)
        .await?;

        Ok(remaining)
    }

    /// Baixa lógica: tira do catálogo sem apagar o histórico de vendas.
    pub async fn deactivate<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Medicine>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let medicine = sqlx::query_as::<_, Medicine>(
            r#"
            UPDATE medicines
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(medicine)
    }
}
