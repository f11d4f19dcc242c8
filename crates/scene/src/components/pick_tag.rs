/// User data attached to hit-test proxies.
///
/// Picking only reports nodes whose tag is `clickable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickTag {
    pub clickable: bool,
    /// Feature type string from the diagram, e.g. `"place"` or `"street-label"`.
    pub kind: String,
    pub label: String,
}

impl PickTag {
    pub fn clickable(kind: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            clickable: true,
            kind: kind.into(),
            label: label.into(),
        }
    }
}
