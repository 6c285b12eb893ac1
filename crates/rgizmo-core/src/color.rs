//! 8-bit RGBA colors for handles.

/// An RGBA color with one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const RED: Self = Self::new(230, 41, 55, 255);
    pub const GREEN: Self = Self::new(0, 228, 48, 255);
    pub const BLUE: Self = Self::new(0, 121, 241, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Cleared picking pixels read back as this color.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Normalized `[r, g, b, a]` in `0.0..=1.0`.
    ///
    /// Writing the result into an 8-bit unorm target reproduces the original bytes exactly.
    #[must_use]
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unorm_roundtrip_is_exact() {
        for value in 0..=255u8 {
            let f = Color::new(value, 0, 0, 0).to_f32_array()[0];
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let back = (f * 255.0).round() as u8;
            assert_eq!(back, value);
        }
    }
}
