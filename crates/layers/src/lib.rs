pub mod assets;
pub mod builder;
pub mod building;
pub mod config;
pub mod detail;
pub mod error;
pub mod feature;
pub mod highway;
pub mod label_plate;
pub mod lod;
pub mod place;
pub mod plane;
pub mod registry;
pub mod sprite_panel;
pub mod text;
pub mod walls;

pub use assets::{AssetKind, AssetPayload, AssetQueue, AssetRequest, AssetResponse, LoadTicket};
pub use builder::{BuiltField, build_field, floor_extent};
pub use config::FieldConfig;
pub use error::LabelError;
pub use feature::{FeatureIdentity, FieldContext, FieldObject, FieldObjectBase, MapFeature};
pub use registry::FieldRegistry;
pub use text::{EstimatedTextRenderer, TextMetrics, TextRenderer};
