pub mod settings;
pub mod storage;

pub use settings::{Logger, Persistence, Server, Settings, TempStick};
pub use storage::Storage;
