pub mod auth;
pub mod dashboard_service;
pub mod inventory_service;
pub mod party_service;
pub mod receipt_service;
pub mod sale_service;
