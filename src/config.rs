use crate::error::LowerError;
use crate::flatten::DEFAULT_TOLERANCE;

/// What to do when a node fails to lower (missing width, bad path data,
/// reference cycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Fail the whole pass; dropping geometry silently would produce an
    /// incomplete plot.
    #[default]
    Abort,
    /// Report the node as a warning and continue with its next sibling.
    SkipSubtree,
}

/// Options for a lowering pass
#[derive(Debug, Clone)]
pub struct LowerOptions {
    /// Maximum distance between a curve and the polyline replacing it,
    /// in output units (default: 0.2)
    pub tolerance: f64,
    /// Page height in millimeters for the vertical flip. When `None` the
    /// root element's `height` attribute is used.
    pub page_height: Option<f64>,
    pub on_malformed: MalformedPolicy,
    /// Drop leaves whose effective visibility is `hidden` or `collapse`.
    /// Off by default: visibility is resolved but not acted upon.
    pub prune_hidden: bool,
}

impl Default for LowerOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            page_height: None,
            on_malformed: MalformedPolicy::Abort,
            prune_hidden: false,
        }
    }
}

impl LowerOptions {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_page_height(mut self, height: f64) -> Self {
        self.page_height = Some(height);
        self
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    pub fn with_prune_hidden(mut self, prune: bool) -> Self {
        self.prune_hidden = prune;
        self
    }

    pub fn validate(&self) -> Result<(), LowerError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(LowerError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}
