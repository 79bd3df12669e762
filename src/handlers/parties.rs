// src/handlers/parties.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::parties::{Customer, Supplier},
};

// =============================================================================
//  FORNECEDORES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Distribuidora Santa Cruz")]
    pub name: String,

    #[validate(length(min = 1, message = "O contato é obrigatório."))]
    pub contact_person: String,

    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    pub phone: String,

    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "O endereço é obrigatório."))]
    pub address: String,
}

// POST /api/parties/suppliers
#[utoipa::path(
    post,
    path = "/api/parties/suppliers",
    tag = "Parties",
    request_body = SupplierPayload,
    responses(
        (status = 201, description = "Fornecedor cadastrado", body = Supplier)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    Json(payload): Json<SupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let supplier = app_state
        .party_service
        .create_supplier(
            &app_state.db_pool,
            &payload.name,
            &payload.contact_person,
            &payload.phone,
            payload.email.as_deref(),
            &payload.address,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

// GET /api/parties/suppliers
#[utoipa::path(
    get,
    path = "/api/parties/suppliers",
    tag = "Parties",
    responses(
        (status = 200, description = "Lista de fornecedores", body = [Supplier])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    let suppliers = app_state
        .party_service
        .list_suppliers(&app_state.db_pool)
        .await?;

    Ok(Json(suppliers))
}

// GET /api/parties/suppliers/{id}
#[utoipa::path(
    get,
    path = "/api/parties/suppliers/{id}",
    tag = "Parties",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    responses(
        (status = 200, description = "Fornecedor", body = Supplier),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_supplier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Supplier>, AppError> {
    let supplier = app_state
        .party_service
        .get_supplier(&app_state.db_pool, id)
        .await?;

    Ok(Json(supplier))
}

// PUT /api/parties/suppliers/{id}
#[utoipa::path(
    put,
    path = "/api/parties/suppliers/{id}",
    tag = "Parties",
    params(("id" = Uuid, Path, description = "ID do fornecedor")),
    request_body = SupplierPayload,
    responses(
        (status = 200, description = "Fornecedor atualizado", body = Supplier),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SupplierPayload>,
) -> Result<Json<Supplier>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let supplier = app_state
        .party_service
        .update_supplier(
            &app_state.db_pool,
            id,
            &payload.name,
            &payload.contact_person,
            &payload.phone,
            payload.email.as_deref(),
            &payload.address,
        )
        .await?;

    Ok(Json(supplier))
}

// =============================================================================
//  CLIENTES
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    pub phone: String,

    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,

    pub address: Option<String>,
}

// POST /api/parties/customers
#[utoipa::path(
    post,
    path = "/api/parties/customers",
    tag = "Parties",
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Cliente cadastrado", body = Customer),
        (status = 409, description = "Telefone já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let customer = app_state
        .party_service
        .create_customer(
            &app_state.db_pool,
            &payload.name,
            &payload.phone,
            payload.email.as_deref(),
            payload.address.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

// GET /api/parties/customers
#[utoipa::path(
    get,
    path = "/api/parties/customers",
    tag = "Parties",
    responses(
        (status = 200, description = "Lista de clientes", body = [Customer])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = app_state
        .party_service
        .list_customers(&app_state.db_pool)
        .await?;

    Ok(Json(customers))
}

// GET /api/parties/customers/{id}
#[utoipa::path(
    get,
    path = "/api/parties/customers/{id}",
    tag = "Parties",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, AppError> {
    let customer = app_state
        .party_service
        .get_customer(&app_state.db_pool, id)
        .await?;

    Ok(Json(customer))
}

// GET /api/parties/customers/by-phone/{phone}
// Busca de balcão: o caixa digita o telefone que o cliente informou.
// Devolve 200 com null quando não há cadastro (ausência não é erro aqui).
#[utoipa::path(
    get,
    path = "/api/parties/customers/by-phone/{phone}",
    tag = "Parties",
    params(("phone" = String, Path, description = "Telefone do cliente")),
    responses(
        (status = 200, description = "Cliente ou null", body = Option<Customer>)
    ),
    security(("api_jwt" = []))
)]
pub async fn find_customer_by_phone(
    State(app_state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<Option<Customer>>, AppError> {
    let customer = app_state
        .party_service
        .find_customer_by_phone(&app_state.db_pool, &phone)
        .await?;

    Ok(Json(customer))
}

// PUT /api/parties/customers/{id}
#[utoipa::path(
    put,
    path = "/api/parties/customers/{id}",
    tag = "Parties",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = CustomerPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "Telefone já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CustomerPayload>,
) -> Result<Json<Customer>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let customer = app_state
        .party_service
        .update_customer(
            &app_state.db_pool,
            id,
            &payload.name,
            &payload.phone,
            payload.email.as_deref(),
            payload.address.as_deref(),
        )
        .await?;

    Ok(Json(customer))
}
