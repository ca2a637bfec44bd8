/*
 * Color Module
 *
 * Plain color values produced by the particle field. The field never talks to
 * a graphics API directly; whichever Surface receives the draw calls converts
 * these into its own color types.
 */

use serde::Deserialize;

// 8-bit RGB with a floating point alpha, as used for the trail overlay
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f32,
}

impl Rgba {
    pub const fn new(red: u8, green: u8, blue: u8, alpha: f32) -> Self {
        Self { red, green, blue, alpha }
    }

    // Same color with a different opacity
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

// Hue in degrees, saturation and lightness in `[0, 1]`, alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub const fn new(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self { hue, saturation, lightness, alpha }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_alpha_keeps_the_other_channels() {
        let base = Hsla::new(120.0, 0.8, 0.7, 0.8);
        let faded = base.with_alpha(0.1);

        assert_eq!(faded.hue, 120.0);
        assert_eq!(faded.saturation, 0.8);
        assert_eq!(faded.lightness, 0.7);
        assert_eq!(faded.alpha, 0.1);

        let trail = Rgba::new(10, 10, 20, 0.1).with_alpha(1.0);
        assert_eq!(trail, Rgba::new(10, 10, 20, 1.0));
    }
}
