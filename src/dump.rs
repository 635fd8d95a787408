//! Plain-text rendering of lowered entities
//!
//! ```text
//! layer Cut
//! polyline cut=2
//! 0.000000 297.000000
//! 10.000000 297.000000
//! ```

use crate::types::Entity;
use std::fmt::Write;

/// Format a coordinate with 6 decimal places, treating -0 as 0
fn f(n: f64) -> String {
    let n = if n == 0.0 { 0.0 } else { n };
    format!("{:.6}", n)
}

/// Render layer markers and drawable subpaths. Ignored and unsupported
/// entities produce no output.
pub fn entities_to_text(entities: &[Entity]) -> String {
    let mut out = String::new();

    for entity in entities {
        match entity {
            Entity::LayerMarker { name } => {
                let _ = writeln!(out, "layer {}", name);
            }
            Entity::Drawable {
                cut_style,
                polyline,
                ..
            } => {
                for subpath in &polyline.subpaths {
                    let _ = writeln!(out, "polyline cut={}", cut_style.code());
                    for p in subpath {
                        let _ = writeln!(out, "{} {}", f(p.x), f(p.y));
                    }
                }
            }
            Entity::Ignored { .. } | Entity::Unsupported { .. } => {}
        }
    }

    out
}
