pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::auth;
use crate::auth::handlers as auth_handlers;
use crate::facts::handlers as fact_handlers;
use crate::generate::handlers as generate_handlers;
use crate::presets::handlers as preset_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Everything here sits behind the session gate.
    let protected = Router::new()
        .route("/api/generate", post(generate_handlers::handle_generate))
        .route(
            "/api/presets",
            get(preset_handlers::handle_list_presets).post(preset_handlers::handle_create_preset),
        )
        .route(
            "/api/presets/:id",
            get(preset_handlers::handle_get_preset)
                .put(preset_handlers::handle_update_preset)
                .delete(preset_handlers::handle_delete_preset),
        )
        .route(
            "/api/facts",
            get(fact_handlers::handle_list_facts).post(fact_handlers::handle_create_fact),
        )
        .route(
            "/api/facts/:id",
            get(fact_handlers::handle_get_fact)
                .put(fact_handlers::handle_update_fact)
                .delete(fact_handlers::handle_delete_fact),
        )
        .route("/api/facts/:id/use", post(fact_handlers::handle_use_fact))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/login", post(auth_handlers::handle_login))
        .route("/api/logout", post(auth_handlers::handle_logout))
        .route("/api/auth-status", get(auth_handlers::handle_auth_status))
        .merge(protected)
        .with_state(state)
}
