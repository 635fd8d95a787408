use crate::types::QualifiedName;
use thiserror::Error;

/// Non-fatal findings of a lowering pass. They never enter the entity list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Warning {
    /// Element without a registered handler
    #[error("unable to draw <{}>, please convert it to a path first", .tag.local)]
    UnsupportedElement { tag: QualifiedName },

    /// Text must be converted to paths before plotting
    #[error("unable to draw text, please convert it to a path first")]
    TextNotSupported,

    /// Clone whose `href` names no element
    #[error("clone reference '{href}' does not resolve, skipped")]
    UnresolvedReference { href: String },

    /// A node error absorbed by the skip policy
    #[error("skipped: {message}")]
    SkippedNode { message: String },
}

/// Receiver for warnings raised during traversal
pub trait WarningSink {
    fn warn(&mut self, warning: Warning);
}

impl WarningSink for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl WarningSink for LogSink {
    fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
    }
}
