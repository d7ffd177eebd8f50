use glam::Vec4;

use crate::error::{plotting_error, PlotResult};

/// Parse a color given as a name (`"red"`), a single-letter token (`"r"`) or
/// `#rrggbb` hex.
pub fn parse_color(name: &str, spec: &str) -> PlotResult<Vec4> {
    let trimmed = spec.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex)
            .ok_or_else(|| plotting_error(name, format!("{name}: invalid hex color `{spec}`")));
    }
    let lowered = trimmed.to_ascii_lowercase();
    if let Some(color) = named_color(&lowered) {
        return Ok(color);
    }
    let mut chars = lowered.chars();
    if let (Some(token), None) = (chars.next(), chars.next()) {
        if let Some(color) = color_from_token(token) {
            return Ok(color);
        }
    }
    Err(plotting_error(
        name,
        format!("{name}: unsupported color specification `{spec}`"),
    ))
}

/// Parse every entry of a color list, stopping at the first bad one.
pub fn parse_colors<S: AsRef<str>>(name: &str, specs: &[S]) -> PlotResult<Vec<Vec4>> {
    specs
        .iter()
        .map(|spec| parse_color(name, spec.as_ref()))
        .collect()
}

fn color_from_token(token: char) -> Option<Vec4> {
    match token {
        'r' => Some(Vec4::new(1.0, 0.0, 0.0, 1.0)),
        'g' => Some(Vec4::new(0.0, 1.0, 0.0, 1.0)),
        'b' => Some(Vec4::new(0.0, 0.0, 1.0, 1.0)),
        'c' => Some(Vec4::new(0.0, 1.0, 1.0, 1.0)),
        'm' => Some(Vec4::new(1.0, 0.0, 1.0, 1.0)),
        'y' => Some(Vec4::new(1.0, 1.0, 0.0, 1.0)),
        'k' => Some(Vec4::new(0.0, 0.0, 0.0, 1.0)),
        'w' => Some(Vec4::new(1.0, 1.0, 1.0, 1.0)),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Vec4> {
    let rgb = match name {
        "red" => (1.0, 0.0, 0.0),
        "green" => (0.0, 0.5, 0.0),
        "blue" => (0.0, 0.0, 1.0),
        "cyan" => (0.0, 1.0, 1.0),
        "magenta" => (1.0, 0.0, 1.0),
        "yellow" => (1.0, 1.0, 0.0),
        "black" => (0.0, 0.0, 0.0),
        "white" => (1.0, 1.0, 1.0),
        "pink" => (1.0, 0.753, 0.796),
        "orange" => (1.0, 0.647, 0.0),
        "purple" => (0.502, 0.0, 0.502),
        "brown" => (0.647, 0.165, 0.165),
        "gray" | "grey" => (0.502, 0.502, 0.502),
        _ => return None,
    };
    Some(Vec4::new(rgb.0, rgb.1, rgb.2, 1.0))
}

fn parse_hex(hex: &str) -> Option<Vec4> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some(Vec4::new(channel(0)?, channel(2)?, channel(4)?, 1.0))
}
