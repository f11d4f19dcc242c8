//! Feature records: one typed row per diagram `object`, every attribute
//! defaulted.

use serde::Serialize;
use serde_json::Value;

use crate::field::{Converter, DataField};

/// Discriminator parsed from a record's `type` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureKind {
    Floor,
    XStreet,
    YStreet,
    StreetLabel,
    XStreetStore,
    YStreetStore,
    Place,
    YPlace,
    XBuilding,
    YBuilding,
    Highway,
    Other(String),
}

impl FeatureKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "floor" => FeatureKind::Floor,
            "x-street" => FeatureKind::XStreet,
            "y-street" => FeatureKind::YStreet,
            "street-label" => FeatureKind::StreetLabel,
            "x-street-store" => FeatureKind::XStreetStore,
            "y-street-store" => FeatureKind::YStreetStore,
            "place" => FeatureKind::Place,
            "y-place" => FeatureKind::YPlace,
            "x-building" => FeatureKind::XBuilding,
            "y-building" => FeatureKind::YBuilding,
            "highway" => FeatureKind::Highway,
            other => FeatureKind::Other(other.to_string()),
        }
    }
}

/// One diagram node, typed and defaulted.
///
/// Coordinates are world units: `x` spans the node's diagram x range and `y`
/// its diagram y range, which maps onto world z.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub comment: String,
    pub label: String,
    pub yomi: String,
    pub hiragana: bool,
    #[serde(rename = "type")]
    pub feature_type: String,
    pub index: String,
    pub x: [f64; 2],
    pub y: [f64; 2],
    pub height: f64,
    pub scale: f64,
    pub font_size: f64,
    /// Degrees, from the style's `rotation` entry.
    pub rotate: f64,
    pub image: String,
    pub stands: [f64; 3],
    pub invisible: bool,
    pub doc_title: String,
    pub doc_text: String,
    pub iterator: String,
    pub offset: [f64; 4],
    pub lod2: String,
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self {
            comment: String::new(),
            label: String::new(),
            yomi: String::new(),
            hiragana: false,
            feature_type: String::new(),
            index: String::new(),
            x: [0.0, 0.0],
            y: [0.0, 0.0],
            height: 0.0,
            scale: 1.0,
            font_size: 17.0,
            rotate: 0.0,
            image: String::new(),
            stands: [0.1, 0.1, 0.1],
            invisible: false,
            doc_title: String::new(),
            doc_text: String::new(),
            iterator: String::new(),
            offset: [0.0; 4],
            lod2: String::new(),
        }
    }
}

impl FeatureRecord {
    /// Extracts a record from one `object` node of the diagram tree.
    ///
    /// Total: every missing attribute, including the whole `mxCell` or
    /// `mxGeometry` sub-object, falls back to its default.
    pub fn from_node(item: &Value) -> Self {
        let d = FeatureRecord::default();
        let cell = item.get("mxCell").unwrap_or(&Value::Null);
        let position = cell.get("mxGeometry").unwrap_or(&Value::Null);
        let style = DataField::from_node(cell, "@_style").as_style_map();

        let s = |key: &str, default: &str| DataField::from_node(item, key).as_string(default);
        let n = |key: &str, default: f64| DataField::from_node(item, key).as_number(default);
        let b = |key: &str, default: bool| DataField::from_node(item, key).as_bool(default);
        let g = |key: &str| {
            DataField::from_node(position, key)
                .with_converter(Converter::Geometry)
                .as_number(0.0)
        };

        let x = g("@_x");
        let z = g("@_y");
        Self {
            comment: s("@_comment", &d.comment),
            label: s("@_label", &d.label),
            yomi: s("@_yomi", &d.yomi),
            hiragana: b("@_hiragana", d.hiragana),
            feature_type: s("@_type", &d.feature_type),
            index: s("@_index", &d.index),
            x: [x, x + g("@_width")],
            y: [z, z + g("@_height")],
            height: n("@_height", d.height),
            scale: n("@_scale", d.scale),
            font_size: n("@_font_size", d.font_size),
            rotate: DataField::from_style(&style, "rotation").as_number(d.rotate),
            image: s("@_image", &d.image),
            stands: [
                n("@_stands_x", d.stands[0]),
                n("@_stands_y", d.stands[1]),
                n("@_stands_z", d.stands[2]),
            ],
            invisible: b("@_invisible", d.invisible),
            doc_title: s("@_doc_title", &d.doc_title),
            doc_text: s("@_doc_text", &d.doc_text),
            iterator: s("@_iterator", &d.iterator),
            offset: d.offset,
            lod2: s("@_lod2", &d.lod2),
        }
    }

    pub fn kind(&self) -> FeatureKind {
        FeatureKind::parse(&self.feature_type)
    }

    pub fn is_building(&self) -> bool {
        self.feature_type.contains("building")
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x[0] + self.x[1]) / 2.0, (self.y[0] + self.y[1]) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{FeatureKind, FeatureRecord};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn node_without_cell_gets_defaults() {
        let record = FeatureRecord::from_node(&json!({ "@_type": "place", "@_label": "Cafe" }));
        assert_eq!(
            record,
            FeatureRecord {
                feature_type: "place".into(),
                label: "Cafe".into(),
                ..FeatureRecord::default()
            }
        );
        assert_eq!(record.kind(), FeatureKind::Place);
    }

    #[test]
    fn extracts_geometry_style_and_scalars() {
        let item = json!({
            "@_type": "x-street",
            "@_label": "Main",
            "@_index": "A",
            "@_height": "0.02",
            "@_font_size": "25",
            "@_invisible": "True",
            "@_stands_y": "0.3",
            "@_lod2": "bldg-1",
            "mxCell": {
                "@_style": "rounded=0;rotation=45;",
                "mxGeometry": { "@_x": "40", "@_y": "80", "@_width": "400", "@_height": "20" }
            }
        });
        let record = FeatureRecord::from_node(&item);
        assert_eq!(record.kind(), FeatureKind::XStreet);
        assert_eq!(record.x, [0.1, 1.1]);
        assert_eq!(record.y, [0.2, 0.25]);
        assert_eq!(record.height, 0.02);
        assert_eq!(record.font_size, 25.0);
        assert_eq!(record.rotate, 45.0);
        assert!(record.invisible);
        assert_eq!(record.stands, [0.1, 0.3, 0.1]);
        assert_eq!(record.lod2, "bldg-1");
        assert_eq!(record.offset, [0.0; 4]);
    }

    #[test]
    fn unknown_types_are_kept() {
        let record = FeatureRecord::from_node(&json!({ "@_type": "fountain" }));
        assert_eq!(record.kind(), FeatureKind::Other("fountain".into()));
        assert!(!record.is_building());
        assert!(FeatureRecord::from_node(&json!({ "@_type": "y-building" })).is_building());
    }
}
