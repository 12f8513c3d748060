mod accessory;
mod cached_accessory;
mod event;
mod surface;

pub use accessory::{Accessory, AccessoryInfo, AccessorySnapshot, MANUFACTURER};
pub use cached_accessory::CachedAccessory;
pub use event::CharacteristicEvent;
pub use surface::{CharacteristicKind, CharacteristicValue, Surface, SurfaceKind};
