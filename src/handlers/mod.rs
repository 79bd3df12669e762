// src/handlers/mod.rs

pub mod auth;
pub mod dashboard;
pub mod inventory;
pub mod parties;
pub mod sales;
