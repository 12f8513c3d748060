mod display;
mod envelope;
mod sensor;

pub use display::*;
pub use envelope::*;
pub use sensor::*;
