#[derive(Debug, Clone, PartialEq)]
pub enum DiagramError {
    /// The document is not well-formed XML.
    Xml(String),
    /// A node on the `mxfile.diagram.mxGraphModel.root` path is absent.
    MissingRoot(&'static str),
    Json(String),
    Base64 { id: String, message: String },
    UnknownPolygon(String),
}

impl std::fmt::Display for DiagramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagramError::Xml(msg) => write!(f, "diagram xml error: {msg}"),
            DiagramError::MissingRoot(node) => write!(f, "diagram has no `{node}` node"),
            DiagramError::Json(msg) => write!(f, "polygon catalog json error: {msg}"),
            DiagramError::Base64 { id, message } => {
                write!(f, "polygon `{id}` has a corrupt asset: {message}")
            }
            DiagramError::UnknownPolygon(id) => write!(f, "polygon `{id}` not in catalog"),
        }
    }
}

impl std::error::Error for DiagramError {}
