// src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

/// Monta o router completo da API.
pub fn app(app_state: AppState) -> Router {
    // Rotas públicas
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas protegidas (Bearer obrigatório)
    let protected_routes = Router::new()
        .route("/users/me", get(handlers::auth::get_me))
        .route(
            "/properties",
            get(handlers::properties::list_properties).post(handlers::properties::create_property),
        )
        .route("/properties/{id}", get(handlers::properties::get_property))
        .route(
            "/properties/{id}/applications",
            post(handlers::properties::add_application),
        )
        .route(
            "/properties/{id}/applications.csv",
            get(handlers::documents::export_applications_csv),
        )
        .route(
            "/arts",
            get(handlers::arts::list_arts).post(handlers::arts::create_art),
        )
        .route("/rts/{name}", get(handlers::arts::get_rt_profile))
        .route(
            "/lots",
            get(handlers::lots::list_lots).post(handlers::lots::create_lot),
        )
        .route("/lots/search", get(handlers::lots::search_lot))
        .route("/lots/{id}/movements", post(handlers::lots::add_movement))
        .route("/lots/{id}/report.pdf", get(handlers::documents::lot_report_pdf))
        .route(
            "/professionals",
            get(handlers::professionals::list_professionals)
                .post(handlers::professionals::create_professional),
        )
        .route("/analysis/compliance", get(handlers::analysis::compliance))
        .route("/analysis/activity", get(handlers::analysis::activity))
        .route("/analysis/usage", get(handlers::analysis::usage))
        .route(
            "/notifications",
            get(handlers::notifications::list_notifications),
        )
        .route(
            "/notifications/{id}/read",
            post(handlers::notifications::mark_as_read),
        )
        .route(
            "/notifications/read-all",
            post(handlers::notifications::mark_all_as_read),
        )
        .route(
            "/nfe",
            get(handlers::nfe::list_invoices).post(handlers::nfe::import_invoice),
        )
        .route("/audit", get(handlers::audit::list_audit_logs))
        .route(
            "/settings/map-token",
            get(handlers::settings::get_map_token).put(handlers::settings::update_map_token),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let api_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/public/lots/{code}", get(handlers::lots::public_trace))
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    Router::new()
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
