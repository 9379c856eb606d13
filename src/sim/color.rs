//! Random fill colors in the "light" luminosity band

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Saturation range (percent) used for light colors
const LIGHT_SATURATION: (f32, f32) = (55.0, 100.0);
/// Brightness range (percent) used for light colors
const LIGHT_VALUE: (f32, f32) = (80.0, 100.0);

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pick a random pastel-ish color: any hue, high saturation floor,
    /// brightness near the top of the range
    pub fn random_light<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let hue = rng.random_range(0.0..360.0);
        let sat = rng.random_range(LIGHT_SATURATION.0..=LIGHT_SATURATION.1);
        let val = rng.random_range(LIGHT_VALUE.0..=LIGHT_VALUE.1);
        Self::from_hsv(hue, sat / 100.0, val / 100.0)
    }

    /// HSV (hue in degrees, s/v in 0..=1) to RGB
    pub fn from_hsv(hue: f32, s: f32, v: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }

    /// CSS hex notation, e.g. `#a3f0c2`
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear RGBA for an sRGB render target
    pub fn to_linear_rgba(&self) -> [f32; 4] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            1.0,
        ]
    }

    /// HSV brightness (max channel), 0..=1
    #[cfg(test)]
    fn value(&self) -> f32 {
        self.r.max(self.g).max(self.b) as f32 / 255.0
    }
}

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color::new(255, 0, 0));
        assert_eq!(Color::from_hsv(120.0, 1.0, 1.0), Color::new(0, 255, 0));
        assert_eq!(Color::from_hsv(240.0, 1.0, 1.0), Color::new(0, 0, 255));
        assert_eq!(Color::from_hsv(360.0, 0.0, 1.0), Color::new(255, 255, 255));
    }

    #[test]
    fn test_random_light_is_bright() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let c = Color::random_light(&mut rng);
            assert!(c.value() >= 0.79, "{:?} too dark", c);
        }
    }

    #[test]
    fn test_css_hex() {
        assert_eq!(Color::new(255, 8, 171).to_css(), "#ff08ab");
    }

    #[test]
    fn test_linear_endpoints() {
        let rgba = Color::new(0, 255, 0).to_linear_rgba();
        assert_eq!(rgba[0], 0.0);
        assert!((rgba[1] - 1.0).abs() < 1e-6);
        assert_eq!(rgba[3], 1.0);
    }
}
