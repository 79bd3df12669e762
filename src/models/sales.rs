// src/models/sales.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Forma de Pagamento ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Digital,
}

// --- Venda (cabeçalho) ---
// Imutável depois da transação de criação: os valores são snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub customer_id: Option<Uuid>,
    pub cashier_id: Uuid,
    #[schema(example = "17.00")]
    pub total_amount: Decimal,
    #[schema(example = "10.00")]
    pub discount: Decimal,
    #[schema(example = "5.00")]
    pub tax: Decimal,
    #[schema(example = "16.07")]
    pub final_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

// --- Item da Venda ---
// unit_price e medicine_name são snapshots do momento da venda: o preço de
// catálogo pode mudar depois sem afetar o histórico.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub medicine_id: Uuid,
    pub medicine_name: String,
    pub quantity: i32,
    #[schema(example = "8.50")]
    pub unit_price: Decimal,
    #[schema(example = "17.00")]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

// Venda completa para histórico e recibo
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    #[serde(flatten)]
    pub header: Sale,
    pub customer_name: Option<String>,
    pub cashier_email: String,
    pub items: Vec<SaleItem>,
}

// --- Contrato do ponto de venda ---
// Os nomes de campo abaixo são o contrato com o frontend do caixa:
// { items: [{medicine_id, quantity, price, total}], customer_id?, discount,
//   tax, payment_method }

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CartLine {
    pub medicine_id: Uuid,
    pub quantity: i32,
    /// Preço unitário no momento da venda (não é recalculado do catálogo)
    #[schema(example = "8.50")]
    pub price: Decimal,
    /// Deve ser exatamente quantity * price
    #[schema(example = "17.00")]
    pub total: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSaleRequest {
    pub items: Vec<CartLine>,
    pub customer_id: Option<Uuid>,
    #[serde(default)]
    #[schema(example = "10.00")]
    pub discount: Decimal,
    #[serde(default)]
    #[schema(example = "5.00")]
    pub tax: Decimal,
    #[serde(default = "default_payment_method")]
    pub payment_method: PaymentMethod,
}

fn default_payment_method() -> PaymentMethod {
    PaymentMethod::Cash
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateSaleResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// Valores calculados de uma venda, já arredondados para 2 casas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleTotals {
    pub total_amount: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub final_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    // O payload do caixa usa snake_case; mudanças aqui quebram o frontend.
    #[test]
    fn cart_payload_wire_names() {
        let raw = r#"{
            "items": [{"medicine_id": "550e8400-e29b-41d4-a716-446655440000",
                       "quantity": 2, "price": 8.50, "total": 17.00}],
            "customer_id": null,
            "discount": 10,
            "tax": 5,
            "payment_method": "cash"
        }"#;

        let req: CreateSaleRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.items.len(), 1);
        assert_eq!(req.items[0].quantity, 2);
        assert_eq!(req.items[0].price, Decimal::new(850, 2));
        assert_eq!(req.items[0].total, Decimal::new(1700, 2));
        assert_eq!(req.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn discount_tax_and_payment_method_have_defaults() {
        let raw = r#"{"items": []}"#;
        let req: CreateSaleRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.discount, Decimal::ZERO);
        assert_eq!(req.tax, Decimal::ZERO);
        assert_eq!(req.payment_method, PaymentMethod::Cash);
    }
}
