//! Color types and the default line color cycle.

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// Grid line gray (`#b0b0b0`).
    pub const GRID: Self = Self::rgb(0xb0, 0xb0, 0xb0);
    /// Legend frame edge gray.
    pub const LEGEND_EDGE: Self = Self::rgb(0xcc, 0xcc, 0xcc);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an opaque color from a `0xRRGGBB` value.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Composite this color over an opaque background, dropping alpha.
    #[must_use]
    pub fn flatten_over(self, background: Self) -> [u8; 3] {
        let a = f32::from(self.a) / 255.0;
        let mix = |fg: u8, bg: u8| (f32::from(fg) * a + f32::from(bg) * (1.0 - a)).round() as u8;
        [
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        ]
    }
}

/// Ten-color qualitative cycle used for successive lines within a panel.
///
/// Each panel restarts the cycle, so the first series of every panel gets
/// the same color.
pub const TAB10: [Rgba; 10] = [
    Rgba::from_hex(0x1f77b4),
    Rgba::from_hex(0xff7f0e),
    Rgba::from_hex(0x2ca02c),
    Rgba::from_hex(0xd62728),
    Rgba::from_hex(0x9467bd),
    Rgba::from_hex(0x8c564b),
    Rgba::from_hex(0xe377c2),
    Rgba::from_hex(0x7f7f7f),
    Rgba::from_hex(0xbcbd22),
    Rgba::from_hex(0x17becf),
];

/// Color for the `index`-th line of a panel.
#[must_use]
pub fn cycle_color(index: usize) -> Rgba {
    TAB10[index % TAB10.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex(0x1f77b4), Rgba::rgb(0x1f, 0x77, 0xb4));
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle_color(0), cycle_color(10));
        assert_ne!(cycle_color(0), cycle_color(1));
    }

    #[test]
    fn test_flatten_over() {
        let half_black = Rgba::BLACK.with_alpha(128);
        let [r, g, b] = half_black.flatten_over(Rgba::WHITE);
        assert!(r > 120 && r < 135);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(Rgba::RED.flatten_over(Rgba::WHITE), [255, 0, 0]);
    }
}
