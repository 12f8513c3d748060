mod accessory_handle;
mod sse_handle;

pub use accessory_handle::*;
pub use sse_handle::*;
