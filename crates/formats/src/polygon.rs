use std::collections::BTreeMap;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::DiagramError;

/// Detail asset for one `lod2` id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonEntry {
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Overrides the model's y position when present.
    #[serde(default)]
    pub y: Option<f64>,
    /// Degrees about Y.
    #[serde(default)]
    pub rotate: f64,
    /// Base64 binary model.
    pub glb: String,
}

fn default_scale() -> f64 {
    1.0
}

/// Companion document keyed by `lod2` id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolygonCatalog {
    entries: BTreeMap<String, PolygonEntry>,
}

impl PolygonCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(text: &str) -> Result<Self, DiagramError> {
        serde_json::from_str(text).map_err(|e| DiagramError::Json(e.to_string()))
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: PolygonEntry) {
        self.entries.insert(id.into(), entry);
    }

    pub fn get(&self, id: &str) -> Option<&PolygonEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn decode_asset(&self, id: &str) -> Result<Vec<u8>, DiagramError> {
        let entry = self
            .get(id)
            .ok_or_else(|| DiagramError::UnknownPolygon(id.to_string()))?;
        base64::engine::general_purpose::STANDARD
            .decode(entry.glb.as_bytes())
            .map_err(|e| DiagramError::Base64 {
                id: id.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::PolygonCatalog;
    use crate::error::DiagramError;
    use pretty_assertions::assert_eq;

    const CATALOG: &str = r#"{
        "bldg-1": { "scale": 0.5, "y": 0.02, "rotate": 90, "glb": "Z2xURgI=" },
        "bldg-2": { "glb": "not base64!" }
    }"#;

    #[test]
    fn reads_entries_with_defaults() {
        let catalog = PolygonCatalog::from_json_str(CATALOG).expect("catalog");
        assert_eq!(catalog.len(), 2);
        let first = catalog.get("bldg-1").expect("entry");
        assert_eq!(first.scale, 0.5);
        assert_eq!(first.y, Some(0.02));
        assert_eq!(first.rotate, 90.0);

        let second = catalog.get("bldg-2").expect("entry");
        assert_eq!(second.scale, 1.0);
        assert_eq!(second.y, None);
        assert_eq!(second.rotate, 0.0);
    }

    #[test]
    fn decodes_embedded_assets() {
        let catalog = PolygonCatalog::from_json_str(CATALOG).expect("catalog");
        assert_eq!(catalog.decode_asset("bldg-1").expect("bytes"), b"glTF\x02".to_vec());
        assert!(matches!(
            catalog.decode_asset("bldg-2"),
            Err(DiagramError::Base64 { .. })
        ));
        assert_eq!(
            catalog.decode_asset("missing"),
            Err(DiagramError::UnknownPolygon("missing".into()))
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            PolygonCatalog::from_json_str("[1, 2]"),
            Err(DiagramError::Json(_))
        ));
    }
}
