// src/docs.rs

use crate::handlers;
use crate::models;
use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Inventory ---
        handlers::inventory::create_medicine,
        handlers::inventory::list_medicines,
        handlers::inventory::get_medicine,
        handlers::inventory::medicine_details,
        handlers::inventory::update_medicine,
        handlers::inventory::adjust_stock,
        handlers::inventory::deactivate_medicine,

        // --- Parties ---
        handlers::parties::create_supplier,
        handlers::parties::list_suppliers,
        handlers::parties::get_supplier,
        handlers::parties::update_supplier,
        handlers::parties::create_customer,
        handlers::parties::list_customers,
        handlers::parties::get_customer,
        handlers::parties::find_customer_by_phone,
        handlers::parties::update_customer,

        // --- Sales ---
        handlers::sales::create_sale,
        handlers::sales::list_sales,
        handlers::sales::get_sale,
        handlers::sales::get_receipt,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_recent_sales,
        handlers::dashboard::get_low_stock,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Inventory ---
            models::inventory::MedicineCategory,
            models::inventory::Medicine,
            models::inventory::MedicineDetails,
            handlers::inventory::CreateMedicinePayload,
            handlers::inventory::UpdateMedicinePayload,
            handlers::inventory::AdjustStockPayload,

            // --- Parties ---
            models::parties::Supplier,
            models::parties::Customer,
            handlers::parties::SupplierPayload,
            handlers::parties::CustomerPayload,

            // --- Sales ---
            models::sales::PaymentMethod,
            models::sales::Sale,
            models::sales::SaleItem,
            models::sales::SaleDetail,
            models::sales::CartLine,
            models::sales::CreateSaleRequest,
            models::sales::CreateSaleResponse,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro de Operadores"),
        (name = "Inventory", description = "Catálogo e Estoque de Medicamentos"),
        (name = "Parties", description = "Fornecedores e Clientes"),
        (name = "Sales", description = "Ponto de Venda e Histórico"),
        (name = "Dashboard", description = "Indicadores do Dia")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme("api_jwt", SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)));
    }
}
