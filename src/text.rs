use crate::align::AlignX;
use crate::color::Color;
use crate::math::Dimensions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum WrapMode {
    /// Wraps on whitespaces not breaking words
    #[default]
    Words,
    /// Only wraps on new line characters
    Newline,
    /// Never wraps, can overflow of parent layout
    None,
}

/// Configuration settings for rendering text elements.
///
/// The layout engine does not wrap text itself; `wrap_mode` and `alignment`
/// are forwarded to the measurer and the renderer unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextConfig {
    /// Opaque value copied onto the text render command.
    pub user_data: usize,
    /// The color of the text.
    pub color: Color,
    /// The engine does not manage fonts. It is up to the user to assign a unique ID to each font
    /// and provide it via the [`font_id`](TextConfig::font_id) field.
    pub font_id: u16,
    /// The font size of the text.
    pub font_size: u16,
    /// The spacing between letters.
    pub letter_spacing: u16,
    /// The height of each line of text.
    pub line_height: u16,
    /// Defines the text wrapping behavior.
    pub wrap_mode: WrapMode,
    /// The alignment of the text.
    pub alignment: AlignX,
}

impl TextConfig {
    /// Creates a new `TextConfig` instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text color.
    #[inline]
    pub fn color(&mut self, color: impl Into<Color>) -> &mut Self {
        self.color = color.into();
        self
    }

    /// Sets the font ID. The user is responsible for assigning unique font IDs.
    #[inline]
    pub fn font_id(&mut self, id: u16) -> &mut Self {
        self.font_id = id;
        self
    }

    /// Sets the font size.
    #[inline]
    pub fn font_size(&mut self, size: u16) -> &mut Self {
        self.font_size = size;
        self
    }

    /// Sets the letter spacing.
    #[inline]
    pub fn letter_spacing(&mut self, spacing: u16) -> &mut Self {
        self.letter_spacing = spacing;
        self
    }

    /// Sets the line height.
    #[inline]
    pub fn line_height(&mut self, height: u16) -> &mut Self {
        self.line_height = height;
        self
    }

    /// Sets the text wrapping mode.
    #[inline]
    pub fn wrap_mode(&mut self, mode: WrapMode) -> &mut Self {
        self.wrap_mode = mode;
        self
    }

    /// Sets the text alignment.
    #[inline]
    pub fn alignment(&mut self, alignment: AlignX) -> &mut Self {
        self.alignment = alignment;
        self
    }

    /// Sets the opaque user data carried onto the render command.
    #[inline]
    pub fn user_data(&mut self, user_data: usize) -> &mut Self {
        self.user_data = user_data;
        self
    }

    /// Copies the configured values out of the builder.
    #[inline]
    pub fn end(&mut self) -> Self {
        *self
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            user_data: 0,
            color: Color::rgba(0., 0., 0., 1.),
            font_id: 0,
            font_size: 0,
            letter_spacing: 0,
            line_height: 0,
            wrap_mode: WrapMode::Words,
            alignment: AlignX::Left,
        }
    }
}

/// Source of intrinsic text size.
///
/// Implementations must be deterministic: the engine may call them many times
/// per frame for the same input and caches nothing itself.
pub trait TextMeasurer {
    fn measure(&self, text: &str, config: &TextConfig) -> Dimensions;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, &TextConfig) -> Dimensions,
{
    fn measure(&self, text: &str, config: &TextConfig) -> Dimensions {
        self(text, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_measurers() {
        let measurer = |text: &str, config: &TextConfig| {
            Dimensions::new(text.len() as f32 * config.font_size as f32, config.font_size as f32)
        };
        let config = TextConfig::new().font_size(10).end();
        assert_eq!(measurer.measure("abc", &config), Dimensions::new(30.0, 10.0));
    }

    #[test]
    fn builder_chains() {
        let config = TextConfig::new()
            .font_id(3)
            .letter_spacing(2)
            .line_height(18)
            .wrap_mode(WrapMode::None)
            .alignment(AlignX::Right)
            .end();
        assert_eq!(config.font_id, 3);
        assert_eq!(config.letter_spacing, 2);
        assert_eq!(config.line_height, 18);
        assert_eq!(config.wrap_mode, WrapMode::None);
        assert_eq!(config.alignment, AlignX::Right);
    }
}
