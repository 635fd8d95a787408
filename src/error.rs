use thiserror::Error;

/// Errors that abort a lowering pass (or, under
/// [`MalformedPolicy::SkipSubtree`](crate::config::MalformedPolicy), the
/// offending subtree).
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum LowerError {
    #[error("XML parsing error: {0}")]
    Xml(String),

    #[error("malformed <{tag}>: attribute '{attribute}' {reason}")]
    MalformedGeometry {
        tag: String,
        attribute: &'static str,
        reason: String,
    },

    #[error("invalid path data in <{tag}>: {reason}")]
    InvalidPathData { tag: String, reason: String },

    #[error("reference cycle through '#{id}'")]
    ReferenceCycle { id: String },

    #[error("document height is missing or not an absolute length; set a page height explicitly")]
    MissingPageHeight,

    #[error("flatness tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),
}

impl LowerError {
    /// Errors tied to a single node, which the skip policy may absorb.
    pub fn is_node_error(&self) -> bool {
        matches!(
            self,
            LowerError::MalformedGeometry { .. }
                | LowerError::InvalidPathData { .. }
                | LowerError::ReferenceCycle { .. }
        )
    }
}
