use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handles::*;
use crate::services::AccessoryService;

pub fn create_app(accessory_service: Arc<AccessoryService>) -> Router {
    let accessories = accessory_router(AccessoryState {
        accessory_service: accessory_service.clone(),
    });

    let sse = Router::new()
        .route("/", get(sse_handler))
        .with_state(SSEState {
            accessory_service: accessory_service.clone(),
        });

    Router::new()
        .merge(accessories)
        .nest("/events", sse)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
