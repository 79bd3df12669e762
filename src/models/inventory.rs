// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Categoria do Medicamento ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "medicine_category", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum MedicineCategory {
    Tablet,
    Syrup,
    Injection,
    Capsule,
    Cream,
    Drops,
    Other,
}

// --- Medicamento ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: Uuid,
    #[schema(example = "Paracetamol 750mg")]
    pub name: String,
    #[schema(example = "Paracetamol")]
    pub generic_name: Option<String>,
    pub category: MedicineCategory,
    pub manufacturer: String,
    pub supplier_id: Uuid,
    #[schema(example = "L2024-0193")]
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    #[schema(example = "5.20")]
    pub purchase_price: Decimal,
    #[schema(example = "8.50")]
    pub selling_price: Decimal,
    pub stock_quantity: i32,
    pub minimum_stock: i32,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Medicine {
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.minimum_stock
    }

    pub fn is_expired_at(&self, today: NaiveDate) -> bool {
        self.expiry_date < today
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().date_naive())
    }
}

// Filtros da listagem de medicamentos (query string)
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MedicineFilter {
    /// Busca por substring em nome, nome genérico ou fabricante
    pub query: Option<String>,
    pub category: Option<MedicineCategory>,
    /// Somente itens com stock_quantity <= minimum_stock
    pub low_stock: Option<bool>,
    /// Somente itens já vencidos
    pub expired: Option<bool>,
    /// Somente itens vencendo dentro de N dias
    pub expiring_within_days: Option<i32>,
    /// Inclui medicamentos desativados (padrão: não)
    pub include_inactive: Option<bool>,
}

// Resposta enxuta para o ponto de venda (consulta rápida de preço/estoque)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MedicineDetails {
    pub id: Uuid,
    pub name: String,
    #[schema(example = "8.50")]
    pub price: Decimal,
    pub stock: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medicine(stock_quantity: i32, minimum_stock: i32, expiry_date: NaiveDate) -> Medicine {
        Medicine {
            id: Uuid::new_v4(),
            name: "Dipirona 500mg".to_string(),
            generic_name: Some("Dipirona".to_string()),
            category: MedicineCategory::Tablet,
            manufacturer: "EMS".to_string(),
            supplier_id: Uuid::new_v4(),
            batch_number: "L01".to_string(),
            expiry_date,
            purchase_price: Decimal::new(320, 2),
            selling_price: Decimal::new(550, 2),
            stock_quantity,
            minimum_stock,
            description: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn stock_below_minimum_is_low() {
        let m = medicine(5, 10, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());
        assert!(m.is_low_stock());
    }

    #[test]
    fn stock_equal_to_minimum_is_low() {
        let m = medicine(10, 10, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());
        assert!(m.is_low_stock());
    }

    #[test]
    fn stock_above_minimum_is_not_low() {
        let m = medicine(11, 10, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());
        assert!(!m.is_low_stock());
    }

    #[test]
    fn expiry_is_strictly_before_today() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
        let expired = medicine(10, 10, NaiveDate::from_ymd_opt(2026, 8, 27).unwrap());
        let expiring_today = medicine(10, 10, today);
        assert!(expired.is_expired_at(today));
        assert!(!expiring_today.is_expired_at(today));
    }
}
