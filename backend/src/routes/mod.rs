//! Route definitions for the LabStock platform

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes. Protected sub-routers receive the state so the auth
/// layer can decode tokens against the configured JWT secret.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Materials: public catalog reads plus protected mutations
        .nest("/materiales", material_routes(state.clone()))
        // Protected routes - material requests
        .nest("/solicitudes", solicitud_routes(state.clone()))
        // Protected routes - stock and movement history
        .nest("/inventario", inventory_routes(state.clone()))
        // Protected routes - material debts
        .nest("/adeudos", adeudo_routes(state.clone()))
        // Protected routes - notifications
        .nest("/notificaciones", notificacion_routes(state.clone()))
        // Protected routes - staff chat
        .nest("/chat", chat_routes(state.clone()))
        // Protected routes - user administration
        .nest("/usuarios", usuario_routes(state))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
}

/// Material routes. Mutations are registered first and wrapped by the auth
/// layer; the catalog reads added afterwards stay public.
fn material_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_material))
        .route(
            "/:material_id",
            put(handlers::update_material).delete(handlers::delete_material),
        )
        .route("/:material_id/entrada", post(handlers::registrar_entrada))
        .route("/:material_id/salida", post(handlers::registrar_salida))
        .route("/:material_id/stock", patch(handlers::set_stock))
        .route("/ajuste-masivo", post(handlers::bulk_adjust))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        .route("/", get(handlers::list_materials))
        .route("/:material_id", get(handlers::get_material))
}

/// Solicitud lifecycle routes (protected)
fn solicitud_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_solicitudes).post(handlers::create_solicitud),
        )
        .route("/:solicitud_id", get(handlers::get_solicitud))
        .route("/:solicitud_id/aprobar", post(handlers::aprobar_solicitud))
        .route("/:solicitud_id/rechazar", post(handlers::rechazar_solicitud))
        .route("/:solicitud_id/cancelar", post(handlers::cancelar_solicitud))
        .route("/:solicitud_id/entregar", post(handlers::entregar_solicitud))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Movement history routes (protected)
fn inventory_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/movimientos", get(handlers::list_movements))
        .route("/movimientos/export", get(handlers::export_movements))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Material debt routes (protected)
fn adeudo_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_adeudos))
        .route("/mios", get(handlers::my_adeudos))
        .route(
            "/:adeudo_id/devolucion",
            post(handlers::registrar_devolucion),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Notification routes (protected)
fn notificacion_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_notificaciones).delete(handlers::delete_all),
        )
        .route("/unread", get(handlers::unread_count))
        .route("/read-all", post(handlers::mark_all_read))
        .route("/:notificacion_id", delete(handlers::delete_notificacion))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Staff chat routes (protected)
fn chat_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/mensajes",
            get(handlers::list_messages).post(handlers::send_message),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// User administration routes (protected)
fn usuario_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/:user_id/flags", patch(handlers::update_flags))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
