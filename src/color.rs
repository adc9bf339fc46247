//! Parsing of computed CSS color values (`rgb()`/`rgba()`).

use palette::{LinSrgb, Srgb};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssColor {
    pub rgb: Srgb<u8>,
    pub alpha: f32,
}

impl CssColor {
    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn hex(&self) -> String {
        let (red, green, blue) = (self.rgb.red, self.rgb.green, self.rgb.blue);
        if self.alpha >= 1.0 {
            format!("#{red:02x}{green:02x}{blue:02x}")
        } else {
            let a = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!("#{red:02x}{green:02x}{blue:02x}{a:02x}")
        }
    }

    /// WCAG relative luminance of the opaque color (0 = black, 1 = white).
    pub fn luminance(&self) -> f32 {
        let linear: LinSrgb = self.rgb.into_format::<f32>().into_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }
}

/// Parses the forms browsers emit for computed colors: `rgb(r, g, b)`,
/// `rgba(r, g, b, a)` and the space-separated `rgb(r g b / a)`.
pub fn parse_css_color(value: &str) -> Option<CssColor> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("transparent") {
        return Some(CssColor {
            rgb: Srgb::new(0, 0, 0),
            alpha: 0.0,
        });
    }
    let inner = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))?
        .strip_suffix(')')?;

    let parts: Vec<&str> = inner
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let v: f32 = s.parse().ok()?;
        Some(v.clamp(0.0, 255.0).round() as u8)
    };
    let alpha = match parts.get(3) {
        Some(a) => match a.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().ok()? / 100.0,
            None => a.parse::<f32>().ok()?,
        },
        None => 1.0,
    };
    Some(CssColor {
        rgb: Srgb::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?),
        alpha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_and_space_forms() {
        let c = parse_css_color("rgb(255, 51, 0)").unwrap();
        assert_eq!(c.hex(), "#ff3300");
        assert_eq!(c.alpha, 1.0);

        let c = parse_css_color("rgba(0, 0, 0, 0.5)").unwrap();
        assert_eq!(c.hex(), "#00000080");

        let c = parse_css_color("rgb(16 32 48 / 25%)").unwrap();
        assert_eq!(c.rgb, Srgb::new(16, 32, 48));
        assert!((c.alpha - 0.25).abs() < 1e-6);
    }

    #[test]
    fn transparent_and_garbage() {
        assert_eq!(parse_css_color("transparent").unwrap().alpha, 0.0);
        assert_eq!(parse_css_color("rgba(0, 0, 0, 0)").unwrap().hex(), "#00000000");
        assert!(parse_css_color("linear-gradient(red, blue)").is_none());
        assert!(parse_css_color("rgb(1, 2)").is_none());
        assert!(parse_css_color("").is_none());
    }

    #[test]
    fn luminance_spans_black_to_white() {
        let black = parse_css_color("rgb(0, 0, 0)").unwrap();
        let white = parse_css_color("rgb(255, 255, 255)").unwrap();
        assert!(black.luminance() < 0.001);
        assert!((white.luminance() - 1.0).abs() < 0.001);
    }
}
