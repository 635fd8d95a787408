//! # plotter-tools
//!
//! A Rust library for lowering SVG drawings to plotter-ready polylines.
//!
//! ## Features
//!
//! - **Shape lowering**: paths, rectangles, lines, polylines, polygons,
//!   circles and ellipses become cubic Bezier polycurves, then polylines
//!   within a flatness tolerance
//! - **Document traversal**: nested transforms, clones (`<use>`), Inkscape
//!   layers and visibility
//! - **Tool-pass classification**: red and blue strokes route to separate
//!   cut styles
//!
//! ## Example
//!
//! ```rust,ignore
//! use plotter_tools::{LowerOptions, lower_svg};
//!
//! let svg = std::fs::read_to_string("drawing.svg").unwrap();
//! let lowered = lower_svg(&svg, &LowerOptions::default()).unwrap();
//! for entity in &lowered.entities {
//!     println!("{}", entity);
//! }
//! ```

pub mod config;
pub mod diagnostics;
pub mod dom;
pub mod dump;
pub mod error;
pub mod flatten;
pub mod path;
pub mod registry;
pub mod shapes;
pub mod style;
pub mod transform;
pub mod types;
pub mod units;
pub mod walker;

// Re-export commonly used items
pub use config::{LowerOptions, MalformedPolicy};
pub use diagnostics::{LogSink, Warning, WarningSink};
pub use dom::Document;
pub use dump::entities_to_text;
pub use error::LowerError;
pub use flatten::{DEFAULT_TOLERANCE, flatten};
pub use transform::Transform;
pub use types::{CubicPolycurve, CutStyle, Entity, FlattenedPolyline, ShapeKind};
pub use walker::{Lowered, lower_document, lower_svg};
