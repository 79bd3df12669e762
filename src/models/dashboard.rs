// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Resumo do painel (os cards do topo). Sempre recalculado na hora da
// chamada, sem cache.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_medicines: i64,
    /// Soma de selling_price * stock_quantity do catálogo ativo
    #[schema(example = "12480.50")]
    pub inventory_value: Decimal,
    pub low_stock_count: i64,
    pub expired_count: i64,
    pub expiring_soon_count: i64,
    /// Janela usada para "vencendo em breve", em dias
    pub expiring_window_days: i32,
    pub today_sales: i64,
    #[schema(example = "843.20")]
    pub today_revenue: Decimal,
}
