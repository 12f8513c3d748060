mod accessory_service;
mod discovery_service;
mod poll_scheduler;
mod tempstick_client;

pub use accessory_service::*;
pub use discovery_service::*;
pub use poll_scheduler::*;
pub use tempstick_client::*;
