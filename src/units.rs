//! Document length handling
//!
//! Only the units a plotter page is normally specified in are understood:
//! none (treated as px), `px`, `in`, `mm` and `%`. Everything else is
//! reported as unparsable.

use crate::dom::Node;
use svgtypes::Length;

/// Millimeters per CSS pixel at 96 dpi
pub const MM_PER_PX: f64 = 0.26458;
/// Millimeters per inch
pub const MM_PER_IN: f64 = 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Px,
    In,
    Mm,
    Percent,
}

/// Parse a length which may or may not have units attached.
pub fn parse_length_with_units(value: &str) -> Option<(f64, LengthUnit)> {
    let length: Length = value.trim().parse().ok()?;
    let unit = match length.unit {
        svgtypes::LengthUnit::None | svgtypes::LengthUnit::Px => LengthUnit::Px,
        svgtypes::LengthUnit::In => LengthUnit::In,
        svgtypes::LengthUnit::Mm => LengthUnit::Mm,
        svgtypes::LengthUnit::Percent => LengthUnit::Percent,
        _ => return None,
    };
    length.number.is_finite().then_some((length.number, unit))
}

/// Convert to millimeters. Percentages have no absolute size.
pub fn length_to_mm(value: f64, unit: LengthUnit) -> Option<f64> {
    match unit {
        LengthUnit::Px => Some(value * MM_PER_PX),
        LengthUnit::In => Some(value * MM_PER_IN),
        LengthUnit::Mm => Some(value),
        LengthUnit::Percent => None,
    }
}

/// Parse an attribute value straight to millimeters.
pub fn parse_length_mm(value: &str) -> Option<f64> {
    let (v, unit) = parse_length_with_units(value)?;
    length_to_mm(v, unit)
}

/// Height of a document in millimeters, from its root `height` attribute.
pub fn document_height_mm(root: Node<'_>) -> Option<f64> {
    root.attribute("height").and_then(parse_length_mm)
}
