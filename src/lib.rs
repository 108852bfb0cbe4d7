//! Immediate-mode box layout.
//!
//! Every frame the caller declares a tree of rectangular elements, the engine
//! sizes and positions them in two passes and hands back a flat list of render
//! commands for a backend to draw.
//!
//! ```rust
//! use boxlay::prelude::*;
//!
//! let mut ctx: LayoutContext = LayoutContext::initialize(
//!     DEFAULT_ARENA_CAPACITY,
//!     Dimensions::new(800.0, 600.0),
//!     |text: &str, config: &TextConfig| {
//!         Dimensions::new(text.len() as f32 * 8.0, config.font_size as f32)
//!     },
//! );
//!
//! let mut ui = ctx.begin();
//! ui.element(
//!     &Declaration::new()
//!         .id("sidebar")
//!         .width(fixed!(200.0))
//!         .height(grow!())
//!         .layout(|l| l.padding(Padding::all(8)).direction(TopToBottom))
//!         .background_color(Color::u_rgb(40, 40, 48)),
//!     |ui| {
//!         ui.text("Files", |t| t.font_size(16));
//!     },
//! );
//! let commands = ui.end().unwrap();
//! assert_eq!(commands.len(), 2);
//! ```

pub mod align;
pub mod arena;
pub mod color;
pub mod config;
pub mod elements;
pub mod engine;
pub mod errors;
pub mod id;
pub mod layout;
pub mod math;
pub mod prelude;
pub mod render_commands;
pub mod renderer;
pub mod text;

use std::fmt::Debug;

use color::Color;
use elements::{BorderBuilder, ClipBuilder, CornerRadius, ImageHandle};
use engine::{ElementDeclaration, LayoutContext};
use errors::LayoutError;
use id::Id;
use layout::{LayoutBuilder, Sizing};
use render_commands::RenderCommand;
use text::TextConfig;

/// Builder for one element: an optional id plus its [`ElementDeclaration`].
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration<CustomElementData: Clone + Default + Debug = ()> {
    id: Option<Id>,
    inner: ElementDeclaration<CustomElementData>,
}

impl<CustomElementData: Clone + Default + Debug> Declaration<CustomElementData> {
    #[inline]
    pub fn new() -> Self {
        Self {
            id: None,
            inner: ElementDeclaration::default(),
        }
    }

    #[inline]
    pub fn id(&mut self, id: impl Into<Id>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    #[inline]
    pub fn width(&mut self, width: Sizing) -> &mut Self {
        self.inner.layout.sizing.width = width.into();
        self
    }

    #[inline]
    pub fn height(&mut self, height: Sizing) -> &mut Self {
        self.inner.layout.sizing.height = height.into();
        self
    }

    /// Configures padding, gap, direction and alignment.
    #[inline]
    pub fn layout(&mut self, f: impl FnOnce(&mut LayoutBuilder) -> &mut LayoutBuilder) -> &mut Self {
        let mut builder = LayoutBuilder {
            config: self.inner.layout,
        };
        f(&mut builder);
        self.inner.layout = builder.config;
        self
    }

    #[inline]
    pub fn background_color(&mut self, color: impl Into<Color>) -> &mut Self {
        self.inner.background_color = color.into();
        self
    }

    #[inline]
    pub fn corner_radius(&mut self, radius: impl Into<CornerRadius>) -> &mut Self {
        self.inner.corner_radius = radius.into();
        self
    }

    #[inline]
    pub fn border(&mut self, f: impl FnOnce(&mut BorderBuilder) -> &mut BorderBuilder) -> &mut Self {
        let mut builder = BorderBuilder {
            config: self.inner.border,
        };
        f(&mut builder);
        self.inner.border = builder.config;
        self
    }

    #[inline]
    pub fn clip(&mut self, f: impl FnOnce(&mut ClipBuilder) -> &mut ClipBuilder) -> &mut Self {
        let mut builder = ClipBuilder {
            config: self.inner.clip,
        };
        f(&mut builder);
        self.inner.clip = builder.config;
        self
    }

    /// Draws the image instead of a plain rectangle; the background color becomes its tint.
    #[inline]
    pub fn image(&mut self, handle: ImageHandle) -> &mut Self {
        self.inner.image = Some(handle);
        self
    }

    #[inline]
    pub fn custom(&mut self, data: CustomElementData) -> &mut Self {
        self.inner.custom_data = Some(data);
        self
    }

    #[inline]
    pub fn user_data(&mut self, user_data: usize) -> &mut Self {
        self.inner.user_data = user_data;
        self
    }

    pub fn declaration(&self) -> &ElementDeclaration<CustomElementData> {
        &self.inner
    }
}

impl<CustomElementData: Clone + Default + Debug> Default for Declaration<CustomElementData> {
    fn default() -> Self {
        Self::new()
    }
}

/// Closure-nesting front end over [`LayoutContext`], alive for one frame.
///
/// Obtained from [`LayoutContext::begin`]; finish the frame with [`Ui::end`].
#[must_use = "the frame is only laid out by calling `Ui::end`"]
pub struct Ui<'ctx, CustomElementData: Clone + Default + Debug = ()> {
    ctx: &'ctx mut LayoutContext<CustomElementData>,
}

impl<'ctx, CustomElementData: Clone + Default + Debug> Ui<'ctx, CustomElementData> {
    /// Create an element, passing its config and a function to add children.
    pub fn element<F: FnOnce(&mut Self)>(
        &mut self,
        declaration: &Declaration<CustomElementData>,
        f: F,
    ) {
        match &declaration.id {
            Some(id) => self.ctx.open_element_with_id(id),
            None => self.ctx.open_element(),
        }
        self.ctx.configure_open_element(&declaration.inner);

        f(self);

        self.ctx.close_element();
    }

    /// Adds a text leaf to the current element.
    pub fn text(&mut self, text: &str, f: impl FnOnce(&mut TextConfig) -> &mut TextConfig) {
        let mut config = TextConfig::new();
        f(&mut config);
        self.ctx.text(text, config);
    }

    /// Declares `f`'s elements on a new layer above everything declared so far.
    pub fn layer<F: FnOnce(&mut Self)>(&mut self, f: F) {
        self.ctx.push_layer();
        f(self);
        self.ctx.pop_layer();
    }

    /// The underlying context, for mixing in imperative calls.
    pub fn context(&mut self) -> &mut LayoutContext<CustomElementData> {
        self.ctx
    }

    pub fn end(self) -> Result<&'ctx [RenderCommand<CustomElementData>], LayoutError> {
        let ctx = self.ctx;
        ctx.end_layout()
    }
}

impl<CustomElementData: Clone + Default + Debug> LayoutContext<CustomElementData> {
    /// Begins a frame and returns its declarative front end.
    pub fn begin(&mut self) -> Ui<'_, CustomElementData> {
        self.begin_layout();
        Ui { ctx: self }
    }
}
