use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Sse;
use axum::response::sse::{Event, KeepAlive};
use tokio_stream::StreamExt;
use tokio_stream::{Stream, wrappers};

use crate::services::AccessoryService;

#[derive(Clone)]
pub struct SSEState {
    pub accessory_service: Arc<AccessoryService>,
}

pub async fn sse_handler(
    State(state): State<SSEState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.accessory_service.subscribe();

    let stream = wrappers::BroadcastStream::new(receiver).filter_map(|result| match result {
        Ok(event) => Event::default()
            .event("characteristic")
            .json_data(&event)
            .ok()
            .map(Ok),
        // lagged receivers skip what they missed
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
