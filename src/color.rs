/// An RGBA color with floating-point components, nominally in the 0.0–1.0 range.
///
/// The engine never clamps channels; out-of-range values are passed through to the
/// renderer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Allows using hex values to build colors
    /// ```
    /// use boxlay::color::Color;
    /// assert_eq!(Color::rgb(1.0, 1.0, 1.0), Color::u_rgb(0xFF, 0xFF, 0xFF));
    /// ```
    pub const fn u_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::u_rgba(r, g, b, 0xFF)
    }
    /// Allows using hex values to build colors
    /// ```
    /// use boxlay::color::Color;
    /// assert_eq!(Color::rgba(1.0, 1.0, 1.0, 0.0), Color::u_rgba(0xFF, 0xFF, 0xFF, 0x00));
    /// ```
    pub const fn u_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// A color is skipped by the emitter only when its alpha is exactly zero.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }
}

impl From<(f32, f32, f32)> for Color {
    fn from(value: (f32, f32, f32)) -> Self {
        Self::rgb(value.0, value.1, value.2)
    }
}
impl From<(f32, f32, f32, f32)> for Color {
    fn from(value: (f32, f32, f32, f32)) -> Self {
        Self::rgba(value.0, value.1, value.2, value.3)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(value: (u8, u8, u8)) -> Self {
        Self::u_rgb(value.0, value.1, value.2)
    }
}
impl From<(u8, u8, u8, u8)> for Color {
    fn from(value: (u8, u8, u8, u8)) -> Self {
        Self::u_rgba(value.0, value.1, value.2, value.3)
    }
}

impl From<u32> for Color {
    /// Reads `0xRRGGBB`, fully opaque.
    fn from(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Color::u_rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_normalized() {
        let c = Color::from(0xFF8000u32);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 128.0 / 255.0);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn transparency_is_alpha_zero_only() {
        assert!(Color::TRANSPARENT.is_transparent());
        assert!(Color::rgba(1.0, 1.0, 1.0, 0.0).is_transparent());
        assert!(!Color::rgba(0.0, 0.0, 0.0, 0.001).is_transparent());
    }
}
