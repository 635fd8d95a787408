use crate::types::CutStyle;
use svgtypes::Color;

/// Look up one declaration in an inline `style` attribute
/// (`"fill:none;stroke:#ff0000"`).
pub fn style_property<'a>(style: &'a str, name: &str) -> Option<&'a str> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
}

/// The stroke paint of a shape: the `style` declaration wins over the
/// `stroke` presentation attribute.
pub fn stroke_value<'a>(style: Option<&'a str>, stroke_attr: Option<&'a str>) -> Option<&'a str> {
    style
        .and_then(|s| style_property(s, "stroke"))
        .or(stroke_attr.map(str::trim))
}

/// Get the cut style for a stroke paint value
pub fn cut_style_for_stroke(stroke: Option<&str>) -> CutStyle {
    let color = match stroke.and_then(|s| s.parse::<Color>().ok()) {
        Some(c) if c.alpha == 255 => c,
        _ => return CutStyle::Default,
    };

    match (color.red, color.green, color.blue) {
        (255, 0, 0) => CutStyle::Red,
        (0, 0, 255) => CutStyle::Blue,
        _ => CutStyle::Default,
    }
}

/// Classify a shape from its `style` and `stroke` attributes
pub fn classify(style: Option<&str>, stroke_attr: Option<&str>) -> CutStyle {
    cut_style_for_stroke(stroke_value(style, stroke_attr))
}
