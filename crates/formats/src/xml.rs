//! XML text to generic tree.
//!
//! Layout of the produced [`Value`]:
//! - attributes become `"@_<name>"` string entries,
//! - child elements are keyed by tag name; repeated tags collapse into an array,
//! - text content goes to `"#text"`; an element holding only text becomes a string.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use crate::error::DiagramError;

pub fn parse_xml_str(text: &str) -> Result<Value, DiagramError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    // Open elements; the bottom entry is the document itself.
    let mut stack: Vec<(String, Map<String, Value>)> = vec![(String::new(), Map::new())];

    loop {
        let event = reader
            .read_event()
            .map_err(|e| DiagramError::Xml(e.to_string()))?;
        match event {
            Event::Start(start) => {
                let name = tag_name(&start);
                let attrs = collect_attributes(&start)?;
                stack.push((name, attrs));
            }
            Event::Empty(start) => {
                let name = tag_name(&start);
                let attrs = collect_attributes(&start)?;
                let parent = current(&mut stack)?;
                insert_child(parent, name, finish(attrs));
            }
            Event::Text(t) => {
                let value = t.unescape().map_err(|e| DiagramError::Xml(e.to_string()))?;
                push_text(current(&mut stack)?, &value);
            }
            Event::CData(t) => {
                let value = String::from_utf8_lossy(t.as_ref()).to_string();
                push_text(current(&mut stack)?, &value);
            }
            Event::End(end) => {
                let closing = String::from_utf8_lossy(end.name().as_ref()).to_string();
                if stack.len() < 2 {
                    return Err(DiagramError::Xml(format!("unexpected closing tag </{closing}>")));
                }
                let Some((name, map)) = stack.pop() else {
                    return Err(DiagramError::Xml("element stack underflow".into()));
                };
                if name != closing {
                    return Err(DiagramError::Xml(format!(
                        "unexpected closing tag </{closing}> while parsing <{name}>"
                    )));
                }
                insert_child(current(&mut stack)?, name, finish(map));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() != 1 {
        let open = stack.last().map(|(n, _)| n.clone()).unwrap_or_default();
        return Err(DiagramError::Xml(format!(
            "unexpected end of document while parsing <{open}>"
        )));
    }
    let (_, root) = stack.remove(0);
    Ok(Value::Object(root))
}

fn tag_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).to_string()
}

fn collect_attributes(start: &BytesStart<'_>) -> Result<Map<String, Value>, DiagramError> {
    let mut map = Map::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DiagramError::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| DiagramError::Xml(e.to_string()))?;
        map.insert(format!("@_{key}"), Value::String(value.into_owned()));
    }
    Ok(map)
}

fn current(
    stack: &mut [(String, Map<String, Value>)],
) -> Result<&mut Map<String, Value>, DiagramError> {
    stack
        .last_mut()
        .map(|(_, map)| map)
        .ok_or_else(|| DiagramError::Xml("element stack underflow".into()))
}

fn push_text(map: &mut Map<String, Value>, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    match map.get_mut("#text") {
        Some(Value::String(existing)) => existing.push_str(text),
        _ => {
            map.insert("#text".into(), Value::String(text.to_string()));
        }
    }
}

fn finish(map: Map<String, Value>) -> Value {
    if map.is_empty() {
        return Value::String(String::new());
    }
    if map.len() == 1
        && let Some(Value::String(text)) = map.get("#text")
    {
        return Value::String(text.clone());
    }
    Value::Object(map)
}

fn insert_child(parent: &mut Map<String, Value>, name: String, child: Value) {
    match parent.get_mut(&name) {
        None => {
            parent.insert(name, child);
        }
        Some(Value::Array(items)) => items.push(child),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, child]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_xml_str;
    use crate::error::DiagramError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn attributes_children_and_repeats() {
        let tree = parse_xml_str(
            r#"<root a="1"><item k="x"/><item k="y"><sub>text</sub></item><one/></root>"#,
        )
        .expect("parse");
        assert_eq!(
            tree,
            json!({
                "root": {
                    "@_a": "1",
                    "item": [
                        { "@_k": "x" },
                        { "@_k": "y", "sub": "text" }
                    ],
                    "one": ""
                }
            })
        );
    }

    #[test]
    fn entities_are_unescaped() {
        let tree = parse_xml_str(r#"<o label="A &amp; B">x &lt; y</o>"#).expect("parse");
        assert_eq!(tree, json!({ "o": { "@_label": "A & B", "#text": "x < y" } }));
    }

    #[test]
    fn mismatched_tags_are_errors() {
        let err = parse_xml_str("<a><b></a>").expect_err("mismatch");
        assert!(matches!(err, DiagramError::Xml(_)));
        assert!(parse_xml_str("<a>").is_err());
    }
}
