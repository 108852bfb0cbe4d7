use crate::align::AlignX;
use crate::color::Color;
use crate::elements::{BorderWidth, CornerRadius, ImageHandle};
use crate::math::BoundingBox;
use crate::text::WrapMode;

/// Represents a rectangle with a specified color and corner radii.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    /// The fill color of the rectangle.
    pub color: Color,
    /// The corner radii for rounded edges.
    pub corner_radii: CornerRadius,
}

/// Represents a border with a specified color, width, and corner radii.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Border {
    /// The border color.
    pub color: Color,
    /// The corner radii for rounded border edges.
    pub corner_radii: CornerRadius,
    /// The width of the border on each side.
    pub width: BorderWidth,
}

/// Represents a text element with styling attributes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Text {
    /// The text content.
    pub text: String,
    /// The color of the text.
    pub color: Color,
    /// The ID of the font used.
    pub font_id: u16,
    /// The font size.
    pub font_size: u16,
    /// The spacing between letters.
    pub letter_spacing: u16,
    /// The line height.
    pub line_height: u16,
    /// Wrapping requested by the declaration; the engine does not apply it.
    pub wrap_mode: WrapMode,
    pub alignment: AlignX,
}

/// Represents an image drawn into the element's bounds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Image {
    pub handle: ImageHandle,
    /// Taken from the element's background color.
    pub tint: Color,
    pub corner_radii: CornerRadius,
}

/// Represents a custom element with a background color, corner radii, and associated data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Custom<CustomElementData> {
    /// The background color of the custom element.
    pub background_color: Color,
    /// The corner radii for rounded edges.
    pub corner_radii: CornerRadius,
    /// The custom element data.
    pub data: CustomElementData,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderCommandConfig<CustomElementData> {
    Rectangle(Rectangle),
    Border(Border),
    Text(Text),
    Image(Image),
    /// Start clipping to the command's bounding box until the matching [`RenderCommandConfig::ClipEnd`].
    ClipStart { horizontal: bool, vertical: bool },
    ClipEnd,
    Custom(Custom<CustomElementData>),
}

/// Represents a render command for drawing an element on the screen.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderCommand<CustomElementData> {
    /// The bounding box defining the area occupied by the element.
    pub bounding_box: BoundingBox,
    /// The specific configuration for rendering this command.
    pub config: RenderCommandConfig<CustomElementData>,
    /// Id of the element that produced this command.
    pub id: u32,
    /// The z-index determines the stacking order of elements.
    /// Higher values are drawn above lower values.
    pub z_index: i16,
    /// Opaque value copied from the declaration.
    pub user_data: usize,
}

impl<CustomElementData> RenderCommand<CustomElementData> {
    pub fn is_clip_start(&self) -> bool {
        matches!(self.config, RenderCommandConfig::ClipStart { .. })
    }

    pub fn is_clip_end(&self) -> bool {
        matches!(self.config, RenderCommandConfig::ClipEnd)
    }
}
