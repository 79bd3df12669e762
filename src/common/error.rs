// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// O núcleo da aplicação nunca imprime nem loga: devolve uma variante daqui
// e o IntoResponse traduz para o cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // --- Motor de vendas ---
    #[error("Carrinho vazio")]
    EmptyCart,

    #[error("Medicamento não encontrado: {0}")]
    MedicineNotFound(Uuid),

    #[error("Cliente não encontrado: {0}")]
    CustomerNotFound(Uuid),

    #[error(
        "Total da linha não confere para {medicine_id}: esperado {expected}, recebido {received}"
    )]
    LineTotalMismatch {
        medicine_id: Uuid,
        expected: Decimal,
        received: Decimal,
    },

    #[error(
        "Estoque insuficiente para {medicine_id}: pedido {requested}, disponível {available}"
    )]
    InsufficientStock {
        medicine_id: Uuid,
        requested: i32,
        available: i32,
    },

    #[error("Medicamento inativo: {0}")]
    MedicineInactive(Uuid),

    // --- Cadastros ---
    #[error("Fornecedor não encontrado: {0}")]
    SupplierNotFound(Uuid),

    #[error("Venda não encontrada: {0}")]
    SaleNotFound(Uuid),

    #[error("Telefone já cadastrado")]
    PhoneAlreadyExists,

    // --- Autenticação ---
    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    // --- Infraestrutura ---
    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::EmptyCart
            | AppError::LineTotalMismatch { .. } => StatusCode::BAD_REQUEST,

            AppError::MedicineNotFound(_)
            | AppError::CustomerNotFound(_)
            | AppError::SupplierNotFound(_)
            | AppError::SaleNotFound(_)
            | AppError::UserNotFound => StatusCode::NOT_FOUND,

            AppError::InsufficientStock { .. }
            | AppError::MedicineInactive(_)
            | AppError::PhoneAlreadyExists
            | AppError::EmailAlreadyExists => StatusCode::CONFLICT,

            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,

            AppError::FontNotFound(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mensagem voltada ao usuário final (sem detalhes internos).
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(_) => "Um ou mais campos são inválidos.".to_string(),
            AppError::EmptyCart => "O carrinho está vazio.".to_string(),
            AppError::MedicineNotFound(_) => "Medicamento não encontrado.".to_string(),
            AppError::CustomerNotFound(_) => "Cliente não encontrado.".to_string(),
            AppError::LineTotalMismatch { .. } => {
                "O total de um item não confere com quantidade x preço.".to_string()
            }
            AppError::InsufficientStock {
                requested,
                available,
                ..
            } => format!(
                "Estoque insuficiente: pedido {}, disponível {}.",
                requested, available
            ),
            AppError::MedicineInactive(_) => "Medicamento fora do catálogo.".to_string(),
            AppError::SupplierNotFound(_) => "Fornecedor não encontrado.".to_string(),
            AppError::SaleNotFound(_) => "Venda não encontrada.".to_string(),
            AppError::PhoneAlreadyExists => "Este telefone já está em uso.".to_string(),
            AppError::EmailAlreadyExists => "Este e-mail já está em uso.".to_string(),
            AppError::InvalidCredentials => "E-mail ou senha inválidos.".to_string(),
            AppError::InvalidToken => {
                "Token de autenticação inválido ou ausente.".to_string()
            }
            AppError::UserNotFound => "Usuário não encontrado.".to_string(),
            _ => "Ocorreu um erro inesperado.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                (status, body).into_response()
            }

            // Estoque insuficiente carrega os números para o frontend decidir
            AppError::InsufficientStock {
                medicine_id,
                requested,
                available,
            } => {
                let body = Json(json!({
                    "error": insufficient_stock_message(requested, available),
                    "details": {
                        "medicineId": medicine_id,
                        "requested": requested,
                        "available": available,
                    },
                }));
                (status, body).into_response()
            }

            // Erros de infraestrutura viram 500 genérico; o tracing guarda o
            // detalhe que o thiserror nos deu.
            ref e if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Erro interno do servidor: {}", e);
                let body = Json(json!({ "error": "Ocorreu um erro inesperado." }));
                (status, body).into_response()
            }

            ref e => {
                let body = Json(json!({ "error": e.public_message() }));
                (status, body).into_response()
            }
        }
    }
}

fn insufficient_stock_message(requested: i32, available: i32) -> String {
    format!(
        "Estoque insuficiente: pedido {}, disponível {}.",
        requested, available
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_engine_errors_map_to_expected_statuses() {
        let id = Uuid::new_v4();
        assert_eq!(AppError::EmptyCart.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::MedicineNotFound(id).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::LineTotalMismatch {
                medicine_id: id,
                expected: Decimal::new(1700, 2),
                received: Decimal::new(1600, 2),
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InsufficientStock {
                medicine_id: id,
                requested: 1000,
                available: 5,
            }
            .status_code(),
            StatusCode::CONFLICT
        );
    }
}
