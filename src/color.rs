//! Color utility functions for label colors.
//!
//! Labels arrive with hex colors from the label taxonomy. This module parses
//! those, picks readable foreground colors, and generates default colors for
//! labels created without one.

/// RGBA color with 8 bits per channel.
pub type Rgba = [u8; 4];

/// Parse a `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` hex color.
///
/// Returns `None` for empty or malformed input. Short forms expand each
/// nibble (`#f80` -> `#ff8800ff`); a missing alpha is opaque.
pub fn parse_hex_color(hex: &str) -> Option<Rgba> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|n| n * 17);

    match digits.len() {
        3 => Some([nibble(0)?, nibble(1)?, nibble(2)?, 255]),
        4 => Some([nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?]),
        6 => Some([byte(0)?, byte(2)?, byte(4)?, 255]),
        8 => Some([byte(0)?, byte(2)?, byte(4)?, byte(6)?]),
        _ => None,
    }
}

/// Format a color as `#rrggbbaa`.
pub fn to_hex(color: Rgba) -> String {
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        color[0], color[1], color[2], color[3]
    )
}

/// Pick the foreground to draw on top of `background`.
///
/// Uses the perceived brightness `(299 r + 587 g + 114 b) / 1000`: bright
/// backgrounds get the low-contrast choice, dark ones the high-contrast one.
pub fn foreground_color<T>(background: Rgba, low_contrast: T, high_contrast: T) -> T {
    let [r, g, b, _] = background;
    let sum = ((r as f32 * 299.0 + g as f32 * 587.0 + b as f32 * 114.0) / 1000.0).round();

    if sum > 128.0 { low_contrast } else { high_contrast }
}

/// Convert HSV to RGB.
///
/// # Arguments
/// * `h` - Hue in degrees (0-360)
/// * `s` - Saturation (0.0-1.0)
/// * `v` - Value/brightness (0.0-1.0)
///
/// # Returns
/// RGB tuple with values in range 0.0-1.0
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

/// Default color for the label at `index` in a taxonomy.
///
/// Steps the hue by the golden angle so neighbouring joints stay distinct.
pub fn default_label_color(index: usize) -> Rgba {
    let hue = (index as f32 * 137.5) % 360.0;
    let (r, g, b) = hsv_to_rgb(hue, 0.7, 0.9);
    [
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        255,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#000"), Some([0, 0, 0, 255]));
        assert_eq!(parse_hex_color("#f80"), Some([255, 136, 0, 255]));
        assert_eq!(parse_hex_color("#f808"), Some([255, 136, 0, 136]));
        assert_eq!(parse_hex_color("#00ff00"), Some([0, 255, 0, 255]));
        assert_eq!(parse_hex_color("#000000ff"), Some([0, 0, 0, 255]));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_hex_roundtrip() {
        let color = [18, 52, 86, 120];
        assert_eq!(parse_hex_color(&to_hex(color)), Some(color));
    }

    #[test]
    fn test_foreground_color() {
        assert_eq!(foreground_color([0, 0, 0, 0], "low", "high"), "high");
        assert_eq!(foreground_color([255, 255, 255, 255], "low", "high"), "low");
    }

    #[test]
    fn test_hsv_to_rgb_red() {
        let (r, g, b) = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((r - 1.0).abs() < 0.01);
        assert!(g.abs() < 0.01);
        assert!(b.abs() < 0.01);
    }

    #[test]
    fn test_hsv_to_rgb_blue() {
        let (r, g, b) = hsv_to_rgb(240.0, 1.0, 1.0);
        assert!(r.abs() < 0.01);
        assert!(g.abs() < 0.01);
        assert!((b - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_default_label_colors_distinct() {
        let colors: Vec<Rgba> = (0..8).map(default_label_color).collect();
        for (i, a) in colors.iter().enumerate() {
            assert_eq!(a[3], 255);
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
