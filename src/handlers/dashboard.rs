// src/handlers/dashboard.rs

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{dashboard::DashboardSummary, inventory::Medicine, sales::Sale},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SummaryParams {
    /// Janela (em dias) para o alerta de validade próxima. Padrão: 30.
    pub expiring_within_days: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PanelParams {
    /// Quantidade de linhas do painel. Padrão: 5.
    pub limit: Option<i64>,
}

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    params(SummaryParams),
    responses(
        (status = 200, description = "Resumo do dia", body = DashboardSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = app_state
        .dashboard_service
        .summary(&app_state.db_pool, params.expiring_within_days)
        .await?;

    Ok(Json(summary))
}

// GET /api/dashboard/recent-sales
#[utoipa::path(
    get,
    path = "/api/dashboard/recent-sales",
    tag = "Dashboard",
    params(PanelParams),
    responses(
        (status = 200, description = "Últimas vendas", body = [Sale])
    ),
    security(("api_jwt" = []))
)]
pub async fn get_recent_sales(
    State(app_state): State<AppState>,
    Query(params): Query<PanelParams>,
) -> Result<Json<Vec<Sale>>, AppError> {
    let sales = app_state
        .dashboard_service
        .recent_sales(&app_state.db_pool, params.limit)
        .await?;

    Ok(Json(sales))
}

// GET /api/dashboard/low-stock
#[utoipa::path(
    get,
    path = "/api/dashboard/low-stock",
    tag = "Dashboard",
    params(PanelParams),
    responses(
        (status = 200, description = "Medicamentos abaixo do estoque mínimo", body = [Medicine])
    ),
    security(("api_jwt" = []))
)]
pub async fn get_low_stock(
    State(app_state): State<AppState>,
    Query(params): Query<PanelParams>,
) -> Result<Json<Vec<Medicine>>, AppError> {
    let medicines = app_state
        .dashboard_service
        .low_stock(&app_state.db_pool, params.limit)
        .await?;

    Ok(Json(medicines))
}
