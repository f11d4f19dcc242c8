//! Typed, defaulted access to untyped diagram attributes.

use std::collections::HashMap;

use serde_json::Value;

/// Diagram units to world units.
pub const GEOMETRY_SCALE: f64 = 0.0025;

/// `key=value` pairs read from a `;`-separated style descriptor.
pub type StyleMap = HashMap<String, String>;

/// Text transform applied to a present raw value before coercion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Converter {
    #[default]
    Identity,
    /// Parse as float and scale by [`GEOMETRY_SCALE`].
    Geometry,
}

impl Converter {
    pub fn apply(self, raw: &str) -> String {
        match self {
            Converter::Identity => raw.to_string(),
            Converter::Geometry => match parse_float_prefix(raw) {
                Some(v) => format_number(v * GEOMETRY_SCALE),
                None => String::from("NaN"),
            },
        }
    }
}

/// A coerced number, remembering which parser produced it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParsedNumber {
    Integer(i64),
    Float(f64),
    /// Field absent or unparseable.
    Default(f64),
}

impl ParsedNumber {
    pub fn value(self) -> f64 {
        match self {
            ParsedNumber::Integer(v) => v as f64,
            ParsedNumber::Float(v) | ParsedNumber::Default(v) => v,
        }
    }
}

/// One attribute of a diagram node.
///
/// Every accessor is total: a missing attribute yields the supplied default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataField {
    raw: Option<String>,
    converter: Converter,
}

impl DataField {
    /// Reads `key` from an object node. Non-scalar values count as missing.
    pub fn from_node(node: &Value, key: &str) -> Self {
        let raw = match node.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            _ => None,
        };
        Self {
            raw,
            converter: Converter::Identity,
        }
    }

    pub fn from_style(style: &StyleMap, key: &str) -> Self {
        Self {
            raw: style.get(key).cloned(),
            converter: Converter::Identity,
        }
    }

    pub fn with_converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    pub fn is_present(&self) -> bool {
        self.raw.is_some()
    }

    fn converted(&self) -> Option<String> {
        self.raw.as_deref().map(|r| self.converter.apply(r))
    }

    pub fn as_string(&self, default: &str) -> String {
        self.converted().unwrap_or_else(|| default.to_string())
    }

    /// Text containing `.` parses as float, anything else as integer.
    ///
    /// Both parsers accept a numeric prefix and ignore trailing garbage.
    pub fn as_parsed_number(&self, default: f64) -> ParsedNumber {
        let Some(text) = self.converted() else {
            return ParsedNumber::Default(default);
        };
        if text.contains('.') {
            parse_float_prefix(&text)
                .map(ParsedNumber::Float)
                .unwrap_or(ParsedNumber::Default(default))
        } else {
            parse_int_prefix(&text)
                .map(ParsedNumber::Integer)
                .unwrap_or(ParsedNumber::Default(default))
        }
    }

    pub fn as_number(&self, default: f64) -> f64 {
        self.as_parsed_number(default).value()
    }

    /// Only the exact token `True` is truthy.
    pub fn as_bool(&self, default: bool) -> bool {
        match self.converted() {
            Some(text) => text == "True",
            None => default,
        }
    }

    /// Segments that are not exactly one `key=value` pair are dropped.
    pub fn as_style_map(&self) -> StyleMap {
        let mut out = StyleMap::new();
        for item in self.as_string("").split(';') {
            let kv: Vec<&str> = item.trim().split('=').collect();
            if let [key, value] = kv.as_slice() {
                out.insert((*key).to_string(), (*value).to_string());
            }
        }
        out
    }
}

fn format_number(v: f64) -> String {
    if v.is_nan() {
        String::from("NaN")
    } else {
        format!("{v}")
    }
}

/// Longest numeric prefix as a float (`[+-]digits[.digits][e[+-]digits]`).
fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        let rest = &s[int_start..];
        if rest.starts_with("Infinity") {
            let negative = s.starts_with('-');
            return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
        }
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse::<f64>().ok()
}

/// Longest decimal integer prefix (`[+-]digits`).
fn parse_int_prefix(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse::<i64>().ok()
}
