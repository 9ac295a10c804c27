//! Static partitions of the frame: typing zones and the virtual keyboard

mod keyboard;
mod zone;

pub use keyboard::{KeyRect, KeySpec, KeyboardLayout};
pub use zone::{Zone, ZoneGrid};
