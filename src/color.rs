use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Diverging colour map for correlation values
// ---------------------------------------------------------------------------

const COOL: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

/// Blue → light grey → red over `[-1, 1]`, centred at 0.
/// Values outside the range are clamped; `NaN` renders grey.
pub fn coolwarm(value: f64) -> Color32 {
    if value.is_nan() {
        return Color32::GRAY;
    }
    let v = value.clamp(-1.0, 1.0) as f32;
    let neutral = linear(NEUTRAL);
    let mixed = if v < 0.0 {
        neutral.mix(linear(COOL), -v)
    } else {
        neutral.mix(linear(WARM), v)
    };
    to_color32(Srgb::from_linear(mixed))
}

/// Black or white, whichever reads better on `background`.
pub fn text_color_for(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(2);
        assert_eq!(p.len(), 2);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn coolwarm_endpoints_and_centre() {
        assert_eq!(coolwarm(0.0), Color32::from_rgb(221, 221, 221));
        assert_eq!(coolwarm(-1.0), Color32::from_rgb(59, 76, 192));
        assert_eq!(coolwarm(1.0), Color32::from_rgb(180, 4, 38));
        assert_eq!(coolwarm(f64::NAN), Color32::GRAY);
        assert_eq!(coolwarm(3.0), coolwarm(1.0));
    }

    #[test]
    fn coolwarm_leans_towards_sign() {
        let pos = coolwarm(0.5);
        let neg = coolwarm(-0.5);
        assert!(pos.r() > pos.b());
        assert!(neg.b() > neg.r());
    }

    #[test]
    fn text_contrast() {
        assert_eq!(text_color_for(Color32::from_rgb(221, 221, 221)), Color32::BLACK);
        assert_eq!(text_color_for(Color32::from_rgb(59, 76, 192)), Color32::WHITE);
    }
}
