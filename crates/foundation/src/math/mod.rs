pub mod order;
pub mod vec;

pub use order::*;
pub use vec::*;
