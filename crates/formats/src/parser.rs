//! draw.io document to feature records: root lookup, per-object extraction
//! and the building inset.

use serde_json::Value;
use tracing::{debug, error};

use crate::error::DiagramError;
use crate::record::FeatureRecord;
use crate::xml::parse_xml_str;

/// Inset applied to every building-typed record.
pub const BUILDING_OFFSET: [f64; 4] = [0.002, 0.002, 0.002, 0.002];

/// Raw draw.io document text.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramDocument {
    text: String,
}

impl DiagramDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// blake3 hex digest of the document text.
    pub fn content_hash(&self) -> String {
        blake3::hash(self.text.as_bytes()).to_hex().to_string()
    }

    pub fn records(&self) -> Result<Vec<FeatureRecord>, DiagramError> {
        parse_document(&self.text)
    }
}

/// Parses draw.io XML into feature records.
pub fn parse_document(text: &str) -> Result<Vec<FeatureRecord>, DiagramError> {
    let tree = parse_xml_str(text)?;
    records_from_tree(&tree)
}

/// Reads `mxfile.diagram.mxGraphModel.root.object` out of a parsed tree.
///
/// A single `object` element is accepted as a one-element list. Nodes that
/// are not objects are skipped.
pub fn records_from_tree(tree: &Value) -> Result<Vec<FeatureRecord>, DiagramError> {
    let mut node = tree;
    for key in ["mxfile", "diagram", "mxGraphModel", "root", "object"] {
        node = node.get(key).ok_or(DiagramError::MissingRoot(key))?;
    }
    let items: Vec<&Value> = match node {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };
    Ok(items
        .into_iter()
        .filter(|item| item.is_object())
        .map(|item| {
            let mut record = FeatureRecord::from_node(item);
            apply_building_offset(&mut record);
            record
        })
        .collect())
}

/// Total entry point: a malformed document yields no records and an error log.
pub fn load_records(text: &str) -> Vec<FeatureRecord> {
    let document = DiagramDocument::new(text);
    match document.records() {
        Ok(records) => {
            debug!(
                hash = %document.content_hash(),
                count = records.len(),
                "parsed diagram"
            );
            records
        }
        Err(e) => {
            error!("diagram parse error: {e}");
            Vec::new()
        }
    }
}

/// Insets building records so adjacent buildings show a gap.
///
/// The inset is applied as `x0 += o0`, `y0 += o1`, `x1 -= o2`, `x1 -= o3`;
/// the far y edge is left in place. A corner pair that would invert collapses
/// to its midpoint.
pub fn apply_building_offset(record: &mut FeatureRecord) {
    if record.is_building() {
        record.offset = BUILDING_OFFSET;
    }
    let o = record.offset;
    record.x[0] += o[0];
    record.y[0] += o[1];
    record.x[1] -= o[2];
    record.x[1] -= o[3];

    if record.x[0] > record.x[1] {
        let mid = (record.x[0] + record.x[1]) / 2.0;
        record.x = [mid, mid];
    }
    if record.y[0] > record.y[1] {
        let mid = (record.y[0] + record.y[1]) / 2.0;
        record.y = [mid, mid];
    }
}

#[cfg(test)]
mod tests {
    use super::{DiagramDocument, apply_building_offset, load_records, parse_document};
    use crate::error::DiagramError;
    use crate::record::FeatureRecord;
    use pretty_assertions::assert_eq;

    const DIAGRAM: &str = r#"<mxfile host="app.diagrams.net">
  <diagram id="d1" name="Page-1">
    <mxGraphModel dx="1000" dy="800">
      <root>
        <mxCell id="0" />
        <mxCell id="1" parent="0" />
        <object label="Hall" type="x-building" id="2">
          <mxCell style="rounded=0;" vertex="1" parent="1">
            <mxGeometry x="0" y="0" width="400" height="400" as="geometry" />
          </mxCell>
        </object>
        <object label="Plaza" type="place" index="A" id="3">
          <mxCell style="rotation=30;" vertex="1" parent="1">
            <mxGeometry x="40" y="40" width="80" height="40" as="geometry" />
          </mxCell>
        </object>
      </root>
    </mxGraphModel>
  </diagram>
</mxfile>"#;

    #[test]
    fn parses_objects_in_document_order() {
        let records = parse_document(DIAGRAM).expect("parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label, "Hall");
        assert_eq!(records[1].label, "Plaza");
        assert_eq!(records[1].index, "A");
        assert_eq!(records[1].rotate, 30.0);
    }

    #[test]
    fn buildings_get_asymmetric_inset() {
        let records = parse_document(DIAGRAM).expect("parse");
        let hall = &records[0];
        assert_eq!(hall.offset, [0.002; 4]);
        assert_eq!(hall.x, [0.002, 1.0 - 0.002 - 0.002]);
        assert_eq!(hall.y, [0.002, 1.0]);

        let plaza = &records[1];
        assert_eq!(plaza.offset, [0.0; 4]);
        assert_eq!(plaza.x, [0.1, 0.1 + 0.2]);
    }

    #[test]
    fn single_object_is_a_one_element_list() {
        let text = r#"<mxfile><diagram><mxGraphModel><root>
            <object label="Only" type="floor"><mxCell><mxGeometry x="0" y="0" width="40" height="40"/></mxCell></object>
        </root></mxGraphModel></diagram></mxfile>"#;
        let records = parse_document(text).expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].feature_type, "floor");
    }

    #[test]
    fn missing_root_is_reported_and_load_is_total() {
        let text = "<mxfile><diagram></diagram></mxfile>";
        assert_eq!(
            parse_document(text),
            Err(DiagramError::MissingRoot("mxGraphModel"))
        );
        assert!(load_records(text).is_empty());
        assert!(load_records("<not xml").is_empty());
        assert_eq!(load_records(DIAGRAM).len(), 2);
    }

    #[test]
    fn narrow_building_collapses_instead_of_inverting() {
        let mut record = FeatureRecord {
            feature_type: "y-building".into(),
            x: [1.0, 1.003],
            y: [2.0, 2.001],
            ..FeatureRecord::default()
        };
        apply_building_offset(&mut record);
        assert!(record.x[0] <= record.x[1]);
        assert!(record.y[0] <= record.y[1]);
        assert!((record.x[0] - 1.0005).abs() < 1e-9);
        assert!((record.y[1] - 2.0015).abs() < 1e-9);
    }

    #[test]
    fn content_hash_tracks_text() {
        let a = DiagramDocument::new(DIAGRAM);
        let b = DiagramDocument::new(DIAGRAM.replace("Hall", "Gym"));
        assert_eq!(a.content_hash(), DiagramDocument::new(DIAGRAM).content_hash());
        assert_ne!(a.content_hash(), b.content_hash());
        assert_eq!(a.content_hash().len(), 64);
    }
}
