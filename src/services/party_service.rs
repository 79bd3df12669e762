// src/services/party_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PartyRepository,
    models::parties::{Customer, Supplier},
};

#[derive(Clone)]
pub struct PartyService {
    repo: PartyRepository,
}

impl PartyService {
    pub fn new(repo: PartyRepository) -> Self {
        Self { repo }
    }

    // --- FORNECEDORES ---

    pub async fn create_supplier<'e, E>(
        &self,
        executor: E,
        name: &str,
        contact_person: &str,
        phone: &str,
        email: Option<&str>,
        address: &str,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .create_supplier(executor, name, contact_person, phone, email, address)
            .await
    }

    pub async fn get_supplier<'e, E>(&self, executor: E, id: Uuid) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .get_supplier(executor, id)
            .await?
            .ok_or(AppError::SupplierNotFound(id))
    }

    pub async fn list_suppliers<'e, E>(&self, executor: E) -> Result<Vec<Supplier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_suppliers(executor).await
    }

    pub async fn update_supplier<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        contact_person: &str,
        phone: &str,
        email: Option<&str>,
        address: &str,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_supplier(executor, id, name, contact_person, phone, email, address)
            .await?
            .ok_or(AppError::SupplierNotFound(id))
    }

    // --- CLIENTES ---

    pub async fn create_customer<'e, E>(
        &self,
        executor: E,
        name: &str,
        phone: &str,
        email: Option<&str>,
        address: Option<&str>,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .create_customer(executor, name, phone, email, address)
            .await
    }

    pub async fn get_customer<'e, E>(&self, executor: E, id: Uuid) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .get_customer(executor, id)
            .await?
            .ok_or(AppError::CustomerNotFound(id))
    }

    /// Busca de balcão: o cliente informa o telefone no caixa.
    pub async fn find_customer_by_phone<'e, E>(
        &self,
        executor: E,
        phone: &str,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.find_customer_by_phone(executor, phone).await
    }

    pub async fn list_customers<'e, E>(&self, executor: E) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_customers(executor).await
    }

    pub async fn update_customer<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        phone: &str,
        email: Option<&str>,
        address: Option<&str>,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_customer(executor, id, name, phone, email, address)
            .await?
            .ok_or(AppError::CustomerNotFound(id))
    }
}
