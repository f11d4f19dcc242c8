pub mod geometry;
pub mod material;
pub mod pick_tag;
pub mod transform;

pub use geometry::*;
pub use material::*;
pub use pick_tag::*;
pub use transform::*;
