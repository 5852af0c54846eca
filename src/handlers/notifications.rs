// src/handlers/notifications.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Local;

use crate::{
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::notification::NotificationFeed,
};

// GET /api/notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    responses((status = 200, description = "Alertas dos próximos 7 dias e contagem de não lidas", body = NotificationFeed)),
    security(("api_jwt" = []))
)]
pub async fn list_notifications(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> impl IntoResponse {
    let today = Local::now().date_naive();
    let feed = app_state.notification_service.feed(user.0.id, today).await;
    (StatusCode::OK, Json(feed))
}

// POST /api/notifications/{id}/read
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    params(("id" = String, Path, description = "ID da notificação (notif-{aplicação})")),
    responses((status = 200, description = "Feed atualizado", body = NotificationFeed)),
    security(("api_jwt" = []))
)]
pub async fn mark_as_read(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let today = Local::now().date_naive();
    app_state.notification_service.mark_as_read(user.0.id, &id).await;
    let feed = app_state.notification_service.feed(user.0.id, today).await;
    (StatusCode::OK, Json(feed))
}

// POST /api/notifications/read-all
#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    tag = "Notifications",
    responses((status = 200, description = "Todas marcadas como lidas", body = NotificationFeed)),
    security(("api_jwt" = []))
)]
pub async fn mark_all_as_read(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> impl IntoResponse {
    let today = Local::now().date_naive();
    let feed = app_state
        .notification_service
        .mark_all_as_read(user.0.id, today)
        .await;
    (StatusCode::OK, Json(feed))
}
