// src/handlers/inventory.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    models::inventory::{Medicine, MedicineCategory, MedicineDetails, MedicineFilter},
};

// ---
// Validação Customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreateMedicine
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMedicinePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Paracetamol 750mg")]
    pub name: String,

    pub generic_name: Option<String>,

    pub category: MedicineCategory,

    #[validate(length(min = 1, message = "O fabricante é obrigatório."))]
    pub manufacturer: String,

    pub supplier_id: Uuid,

    #[validate(length(min = 1, message = "O número do lote é obrigatório."))]
    pub batch_number: String,

    pub expiry_date: NaiveDate,

    #[validate(custom(function = "validate_not_negative"))]
    pub purchase_price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub selling_price: Decimal,

    #[validate(range(min = 0, message = "O estoque inicial não pode ser negativo."))]
    #[serde(default)]
    pub stock_quantity: i32,

    #[validate(range(min = 0, message = "O estoque mínimo não pode ser negativo."))]
    #[serde(default = "default_minimum_stock")]
    pub minimum_stock: i32,

    pub description: Option<String>,
}

fn default_minimum_stock() -> i32 {
    10
}

// ---
// Payload: UpdateMedicine (estoque NÃO entra aqui; ajuste é rota própria)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMedicinePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub generic_name: Option<String>,

    pub category: MedicineCategory,

    #[validate(length(min = 1, message = "O fabricante é obrigatório."))]
    pub manufacturer: String,

    pub supplier_id: Uuid,

    #[validate(length(min = 1, message = "O número do lote é obrigatório."))]
    pub batch_number: String,

    pub expiry_date: NaiveDate,

    #[validate(custom(function = "validate_not_negative"))]
    pub purchase_price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub selling_price: Decimal,

    #[validate(range(min = 0, message = "O estoque mínimo não pode ser negativo."))]
    pub minimum_stock: i32,

    pub description: Option<String>,
}

// ---
// Payload: AdjustStock (delta positivo = entrada, negativo = correção)
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockPayload {
    #[schema(example = 50)]
    pub delta: i32,
}

// POST /api/inventory/medicines
#[utoipa::path(
    post,
    path = "/api/inventory/medicines",
    tag = "Inventory",
    request_body = CreateMedicinePayload,
    responses(
        (status = 201, description = "Medicamento cadastrado", body = Medicine),
        (status = 404, description = "Fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_medicine(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateMedicinePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let medicine = app_state
        .inventory_service
        .create_medicine(
            &app_state.db_pool,
            &payload.name,
            payload.generic_name.as_deref(),
            payload.category,
            &payload.manufacturer,
            payload.supplier_id,
            &payload.batch_number,
            payload.expiry_date,
            payload.purchase_price,
            payload.selling_price,
            payload.stock_quantity,
            payload.minimum_stock,
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(medicine)))
}

// GET /api/inventory/medicines
#[utoipa::path(
    get,
    path = "/api/inventory/medicines",
    tag = "Inventory",
    params(MedicineFilter),
    responses(
        (status = 200, description = "Lista de medicamentos", body = [Medicine])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_medicines(
    State(app_state): State<AppState>,
    Query(filter): Query<MedicineFilter>,
) -> Result<Json<Vec<Medicine>>, AppError> {
    let medicines = app_state
        .inventory_service
        .list_medicines(&app_state.db_pool, &filter)
        .await?;

    Ok(Json(medicines))
}

// GET /api/inventory/medicines/{id}
#[utoipa::path(
    get,
    path = "/api/inventory/medicines/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do medicamento")),
    responses(
        (status = 200, description = "Medicamento", body = Medicine),
        (status = 404, description = "Medicamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_medicine(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Medicine>, AppError> {
    let medicine = app_state
        .inventory_service
        .get_medicine(&app_state.db_pool, id)
        .await?;

    Ok(Json(medicine))
}

// GET /api/inventory/medicines/{id}/details
// Resposta enxuta para o caixa montar a linha do carrinho.
#[utoipa::path(
    get,
    path = "/api/inventory/medicines/{id}/details",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do medicamento")),
    responses(
        (status = 200, description = "Resumo para o ponto de venda", body = MedicineDetails),
        (status = 404, description = "Medicamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn medicine_details(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MedicineDetails>, AppError> {
    let details = app_state
        .inventory_service
        .medicine_details(&app_state.db_pool, id)
        .await?;

    Ok(Json(details))
}

// PUT /api/inventory/medicines/{id}
#[utoipa::path(
    put,
    path = "/api/inventory/medicines/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do medicamento")),
    request_body = UpdateMedicinePayload,
    responses(
        (status = 200, description = "Medicamento atualizado", body = Medicine),
        (status = 404, description = "Medicamento ou fornecedor não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_medicine(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMedicinePayload>,
) -> Result<Json<Medicine>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let medicine = app_state
        .inventory_service
        .update_medicine(
            &app_state.db_pool,
            id,
            &payload.name,
            payload.generic_name.as_deref(),
            payload.category,
            &payload.manufacturer,
            payload.supplier_id,
            &payload.batch_number,
            payload.expiry_date,
            payload.purchase_price,
            payload.selling_price,
            payload.minimum_stock,
            payload.description.as_deref(),
        )
        .await?;

    Ok(Json(medicine))
}

// PATCH /api/inventory/medicines/{id}/stock
#[utoipa::path(
    patch,
    path = "/api/inventory/medicines/{id}/stock",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do medicamento")),
    request_body = AdjustStockPayload,
    responses(
        (status = 200, description = "Estoque ajustado", body = Medicine),
        (status = 404, description = "Medicamento não encontrado"),
        (status = 409, description = "Ajuste deixaria o estoque negativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn adjust_stock(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdjustStockPayload>,
) -> Result<Json<Medicine>, AppError> {
    let medicine = app_state
        .inventory_service
        .adjust_stock(&app_state.db_pool, id, payload.delta)
        .await?;

    Ok(Json(medicine))
}

// DELETE /api/inventory/medicines/{id}
// Baixa lógica: a venda histórica continua apontando para o registro.
#[utoipa::path(
    delete,
    path = "/api/inventory/medicines/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do medicamento")),
    responses(
        (status = 200, description = "Medicamento desativado", body = Medicine),
        (status = 404, description = "Medicamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_medicine(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Medicine>, AppError> {
    let medicine = app_state
        .inventory_service
        .deactivate_medicine(&app_state.db_pool, id)
        .await?;

    Ok(Json(medicine))
}
