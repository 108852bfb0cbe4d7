use crate::color::Color;
use crate::math::Vector2;

/// Defines individual corner radii for an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CornerRadius {
    /// The radius for the top-left corner.
    pub top_left: f32,
    /// The radius for the top-right corner.
    pub top_right: f32,
    /// The radius for the bottom-left corner.
    pub bottom_left: f32,
    /// The radius for the bottom-right corner.
    pub bottom_right: f32,
}

impl CornerRadius {
    pub fn is_zero(&self) -> bool {
        self.top_left == 0.0
            && self.top_right == 0.0
            && self.bottom_left == 0.0
            && self.bottom_right == 0.0
    }
}

impl From<f32> for CornerRadius {
    /// Creates a corner radius with the same value for all corners.
    fn from(value: f32) -> Self {
        Self {
            top_left: value,
            top_right: value,
            bottom_left: value,
            bottom_right: value,
        }
    }
}

impl From<(f32, f32, f32, f32)> for CornerRadius {
    /// Creates corner radii from a tuple in CSS order: (top-left, top-right, bottom-right, bottom-left).
    fn from((tl, tr, br, bl): (f32, f32, f32, f32)) -> Self {
        Self {
            top_left: tl,
            top_right: tr,
            bottom_left: bl,
            bottom_right: br,
        }
    }
}

/// Defines the border width for each side of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderWidth {
    /// Border width on the left side.
    pub left: u16,
    /// Border width on the right side.
    pub right: u16,
    /// Border width on the top side.
    pub top: u16,
    /// Border width on the bottom side.
    pub bottom: u16,
}

impl BorderWidth {
    pub fn is_zero(&self) -> bool {
        self.left == 0 && self.right == 0 && self.top == 0 && self.bottom == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderConfig {
    pub color: Color,
    pub width: BorderWidth,
}

/// Clipping (scissoring) of an element's children.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClipConfig {
    pub horizontal: bool,
    pub vertical: bool,
    /// Offset applied to every descendant, typically a scroll position.
    pub child_offset: Vector2,
}

impl ClipConfig {
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.horizontal || self.vertical
    }
}

/// Opaque reference to backend-owned image data.
///
/// The engine only carries the handle through to [`RenderCommandConfig::Image`](crate::render_commands::RenderCommandConfig::Image);
/// what it points at is the renderer's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageHandle(pub u64);

/// Builder for configuring border properties using a closure.
pub struct BorderBuilder {
    pub(crate) config: BorderConfig,
}

impl BorderBuilder {
    /// Sets the border color.
    #[inline]
    pub fn color(&mut self, color: impl Into<Color>) -> &mut Self {
        self.config.color = color.into();
        self
    }

    /// Set the same border width for all sides.
    #[inline]
    pub fn all(&mut self, width: u16) -> &mut Self {
        self.config.width.left = width;
        self.config.width.right = width;
        self.config.width.top = width;
        self.config.width.bottom = width;
        self
    }

    /// Sets the left border width.
    #[inline]
    pub fn left(&mut self, width: u16) -> &mut Self {
        self.config.width.left = width;
        self
    }

    /// Sets the right border width.
    #[inline]
    pub fn right(&mut self, width: u16) -> &mut Self {
        self.config.width.right = width;
        self
    }

    /// Sets the top border width.
    #[inline]
    pub fn top(&mut self, width: u16) -> &mut Self {
        self.config.width.top = width;
        self
    }

    /// Sets the bottom border width.
    #[inline]
    pub fn bottom(&mut self, width: u16) -> &mut Self {
        self.config.width.bottom = width;
        self
    }
}

/// Builder for configuring clipping using a closure.
pub struct ClipBuilder {
    pub(crate) config: ClipConfig,
}

impl ClipBuilder {
    /// Clips children that overflow horizontally.
    #[inline]
    pub fn horizontal(&mut self) -> &mut Self {
        self.config.horizontal = true;
        self
    }

    /// Clips children that overflow vertically.
    #[inline]
    pub fn vertical(&mut self) -> &mut Self {
        self.config.vertical = true;
        self
    }

    /// Clips on both axes.
    #[inline]
    pub fn both(&mut self) -> &mut Self {
        self.horizontal().vertical()
    }

    /// Shifts all children, e.g. by a scroll position.
    #[inline]
    pub fn child_offset(&mut self, x: f32, y: f32) -> &mut Self {
        self.config.child_offset = Vector2::new(x, y);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_radius_tuple_is_css_order() {
        let radius = CornerRadius::from((1.0, 2.0, 3.0, 4.0));
        assert_eq!(radius.top_left, 1.0);
        assert_eq!(radius.top_right, 2.0);
        assert_eq!(radius.bottom_right, 3.0);
        assert_eq!(radius.bottom_left, 4.0);
        assert!(!radius.is_zero());
        assert!(CornerRadius::default().is_zero());
    }

    #[test]
    fn border_builder_sets_edges() {
        let mut builder = BorderBuilder {
            config: BorderConfig::default(),
        };
        builder.all(2).left(5);
        assert_eq!(
            builder.config.width,
            BorderWidth {
                left: 5,
                right: 2,
                top: 2,
                bottom: 2
            }
        );
        assert!(BorderWidth::default().is_zero());
    }

    #[test]
    fn clip_builder_flags() {
        let mut builder = ClipBuilder {
            config: ClipConfig::default(),
        };
        assert!(!builder.config.is_enabled());
        builder.vertical().child_offset(0.0, -20.0);
        assert!(builder.config.is_enabled());
        assert!(!builder.config.horizontal);
        assert_eq!(builder.config.child_offset, Vector2::new(0.0, -20.0));
    }
}
