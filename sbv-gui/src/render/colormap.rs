//! Colormap definitions and application logic.

use crate::util::f32_to_u8;

/// Available colormaps for slice display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Colormap {
    /// Grayscale - black to white.
    #[default]
    Grayscale,
    /// Hot (Thermal) - black to red to yellow to white.
    Hot,
    /// Viridis (approximate) - blue to teal to green to yellow.
    Viridis,
    /// Green - black to bright green.
    Green,
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colormap::Grayscale => write!(f, "Grayscale"),
            Colormap::Hot => write!(f, "Hot"),
            Colormap::Viridis => write!(f, "Viridis"),
            Colormap::Green => write!(f, "Green"),
        }
    }
}

impl Colormap {
    /// All colormaps in menu order.
    pub const ALL: [Colormap; 4] = [
        Colormap::Grayscale,
        Colormap::Hot,
        Colormap::Viridis,
        Colormap::Green,
    ];

    /// Apply the colormap to a normalized value [0, 1] and return RGBA bytes.
    #[must_use]
    pub fn apply(self, val: f32) -> [u8; 4] {
        let val = val.clamp(0.0, 1.0);
        match self {
            Colormap::Grayscale => {
                let v = f32_to_u8(val * 255.0);
                [v, v, v, 255]
            }
            Colormap::Green => {
                let v = f32_to_u8(val * 255.0);
                [0, v, 0, 255]
            }
            Colormap::Hot => {
                // black -> red -> yellow -> white in thirds
                let r = f32_to_u8(val * 3.0 * 255.0);
                let g = f32_to_u8((val * 3.0 - 1.0) * 255.0);
                let b = f32_to_u8((val * 3.0 - 2.0) * 255.0);
                [r, g, b, 255]
            }
            Colormap::Viridis => {
                let r = f32_to_u8(255.0 * val.powf(2.0));
                let g = f32_to_u8(255.0 * val);
                let b = f32_to_u8(255.0 * (1.0 - val));
                [r, g, b, 255]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(Colormap::Grayscale.apply(0.0), [0, 0, 0, 255]);
        assert_eq!(Colormap::Grayscale.apply(1.0), [255, 255, 255, 255]);
        assert_eq!(Colormap::Hot.apply(0.0), [0, 0, 0, 255]);
        assert_eq!(Colormap::Hot.apply(1.0), [255, 255, 255, 255]);
        assert_eq!(Colormap::Green.apply(1.0), [0, 255, 0, 255]);
        assert_eq!(Colormap::Viridis.apply(0.0), [0, 0, 255, 255]);
    }

    #[test]
    fn test_out_of_range_clamped() {
        assert_eq!(Colormap::Grayscale.apply(-1.0), [0, 0, 0, 255]);
        assert_eq!(Colormap::Grayscale.apply(7.0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_hot_midpoint_is_red() {
        assert_eq!(Colormap::Hot.apply(1.0 / 3.0), [255, 0, 0, 255]);
    }
}
