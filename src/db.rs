pub mod user_repo;
pub use user_repo::UserRepository;
pub mod medicine_repo;
pub use medicine_repo::MedicineRepository;
pub mod party_repo;
pub use party_repo::PartyRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
