pub mod animation;
pub mod event_bus;
pub mod frame;

pub use animation::*;
pub use event_bus::*;
pub use frame::*;
