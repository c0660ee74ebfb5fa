use tracing::warn;

use crate::config::PaletteEntry;
use crate::models::EventColor;

/// Parse "#rrggbb" (leading '#' optional) into its channels
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() < 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn distance((r1, g1, b1): (u8, u8, u8), (r2, g2, b2): (u8, u8, u8)) -> f64 {
    let dr = f64::from(r1) - f64::from(r2);
    let dg = f64::from(g1) - f64::from(g2);
    let db = f64::from(b1) - f64::from(b2);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Palette colour nearest to `hex` by Euclidean RGB distance.
/// Earlier palette entries win ties; unreadable input yields `fallback`.
pub fn closest_color(hex: &str, palette: &[PaletteEntry], fallback: EventColor) -> EventColor {
    let Some(target) = parse_hex(hex) else {
        warn!(hex = %hex, "Unreadable module colour, using fallback");
        return fallback;
    };

    let mut closest = fallback;
    let mut min_distance = f64::INFINITY;
    for entry in palette {
        let Some(rgb) = parse_hex(&entry.hex) else {
            continue;
        };
        let d = distance(target, rgb);
        if d < min_distance {
            min_distance = d;
            closest = entry.color;
        }
    }
    closest
}
