pub mod error;
pub mod field;
pub mod parser;
pub mod polygon;
pub mod record;
pub mod xml;

pub use error::DiagramError;
pub use field::{Converter, DataField, ParsedNumber, StyleMap};
pub use parser::{DiagramDocument, apply_building_offset, load_records, parse_document, records_from_tree};
pub use polygon::{PolygonCatalog, PolygonEntry};
pub use record::{FeatureKind, FeatureRecord};
