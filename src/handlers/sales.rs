// src/handlers/sales.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::sales::{CreateSaleRequest, CreateSaleResponse, Sale, SaleDetail},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SaleHistoryParams {
    /// Quantidade máxima de vendas devolvidas (mais recentes primeiro).
    pub limit: Option<i64>,
}

const DEFAULT_HISTORY_LIMIT: i64 = 50;

// POST /api/sales
// O contrato de resposta segue o formato do caixa: sempre um envelope
// { success, sale_id?, message?, error? }, inclusive nas falhas de negócio.
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = CreateSaleRequest,
    responses(
        (status = 201, description = "Venda registrada", body = CreateSaleResponse),
        (status = 409, description = "Estoque insuficiente", body = CreateSaleResponse),
        (status = 404, description = "Medicamento ou cliente não encontrado", body = CreateSaleResponse),
        (status = 400, description = "Carrinho inválido", body = CreateSaleResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateSaleRequest>,
) -> impl IntoResponse {
    let result = app_state
        .sale_service
        .create_sale(
            &app_state.db_pool,
            user.id,
            &payload.items,
            payload.customer_id,
            payload.discount,
            payload.tax,
            payload.payment_method,
        )
        .await;

    match result {
        Ok(sale) => {
            tracing::info!("✅ Venda {} registrada (total {})", sale.id, sale.final_amount);
            (
                StatusCode::CREATED,
                Json(CreateSaleResponse {
                    success: true,
                    sale_id: Some(sale.id),
                    message: Some("Venda registrada com sucesso.".to_string()),
                    error: None,
                }),
            )
        }
        Err(err) => (
            err.status_code(),
            Json(CreateSaleResponse {
                success: false,
                sale_id: None,
                message: None,
                error: Some(err.public_message()),
            }),
        ),
    }
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    params(SaleHistoryParams),
    responses(
        (status = 200, description = "Histórico de vendas", body = [Sale])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
    Query(params): Query<SaleHistoryParams>,
) -> Result<Json<Vec<Sale>>, AppError> {
    let sales = app_state
        .sale_service
        .list_recent(
            &app_state.db_pool,
            params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
        )
        .await?;

    Ok(Json(sales))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda com itens", body = SaleDetail),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaleDetail>, AppError> {
    let detail = app_state
        .sale_service
        .get_sale_detail(&app_state.db_pool, id)
        .await?;

    Ok(Json(detail))
}

// GET /api/sales/{id}/receipt
#[utoipa::path(
    get,
    path = "/api/sales/{id}/receipt",
    tag = "Sales",
    params(("id" = Uuid, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Recibo em PDF", content_type = "application/pdf"),
        (status = 404, description = "Venda não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_receipt(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pdf_bytes = app_state
        .receipt_service
        .generate_receipt_pdf(&app_state.db_pool, id)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"recibo-{}.pdf\"", id),
        ),
    ];

    Ok((headers, pdf_bytes))
}
