//! The boxlay prelude: a single import for declaring and laying out frames.
//!
//! ```rust
//! use boxlay::prelude::*;
//! ```

// Core types
pub use crate::Declaration;
pub use crate::Ui;
pub use crate::arena::DEFAULT_ARENA_CAPACITY;
pub use crate::color::Color;
pub use crate::config::EngineConfig;
pub use crate::engine::LayoutContext;
pub use crate::errors::LayoutError;
pub use crate::id::Id;
pub use crate::math::{BoundingBox, Dimensions, Vector2};

// Element configuration
pub use crate::elements::{CornerRadius, ImageHandle};
pub use crate::layout::{Padding, Sizing};
pub use crate::text::{TextConfig, TextMeasurer};

// Output
pub use crate::render_commands::{RenderCommand, RenderCommandConfig};
pub use crate::renderer::Renderer;

// Macros
pub use crate::{fit, fixed, grow, percent};

// Alignment, globbed
pub use crate::align::AlignX::{self, *};
pub use crate::align::AlignY::{self, *};

// LayoutDirection, globbed
pub use crate::layout::LayoutDirection::{self, *};

// WrapMode, type only, NOT globbed
pub use crate::text::WrapMode;
