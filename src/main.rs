//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let inventory_routes = Router::new()
        .route(
            "/medicines",
            post(handlers::inventory::create_medicine).get(handlers::inventory::list_medicines),
        )
        .route(
            "/medicines/{id}",
            get(handlers::inventory::get_medicine)
                .put(handlers::inventory::update_medicine)
                .delete(handlers::inventory::deactivate_medicine),
        )
        .route(
            "/medicines/{id}/details",
            get(handlers::inventory::medicine_details),
        )
        .route(
            "/medicines/{id}/stock",
            patch(handlers::inventory::adjust_stock),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let party_routes = Router::new()
        .route(
            "/suppliers",
            post(handlers::parties::create_supplier).get(handlers::parties::list_suppliers),
        )
        .route(
            "/suppliers/{id}",
            get(handlers::parties::get_supplier).put(handlers::parties::update_supplier),
        )
        .route(
            "/customers",
            post(handlers::parties::create_customer).get(handlers::parties::list_customers),
        )
        .route(
            "/customers/{id}",
            get(handlers::parties::get_customer).put(handlers::parties::update_customer),
        )
        .route(
            "/customers/by-phone/{phone}",
            get(handlers::parties::find_customer_by_phone),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let sale_routes = Router::new()
        .route(
            "/",
            post(handlers::sales::create_sale).get(handlers::sales::list_sales),
        )
        .route("/{id}", get(handlers::sales::get_sale))
        .route("/{id}/receipt", get(handlers::sales::get_receipt))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/recent-sales", get(handlers::dashboard::get_recent_sales))
        .route("/low-stock", get(handlers::dashboard::get_low_stock))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/inventory", inventory_routes)
        .nest("/api/parties", party_routes)
        .nest("/api/sales", sale_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
