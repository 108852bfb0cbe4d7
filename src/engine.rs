//! The layout engine.
//!
//! Declarations build a tree of pending elements frame by frame. Closing an
//! element measures it from its children (pass 1, bottom-up); `end_layout`
//! resolves grow and percent sizes from the root down (pass 2), positions every
//! element and emits the render commands.

use std::fmt::Debug;

use rustc_hash::FxHashMap;
use tracing::{debug, debug_span, error, trace, warn};

use crate::align::{AlignFactor, AlignX, AlignY};
use crate::arena::{Arena, ArenaStr};
use crate::color::Color;
use crate::config::EngineConfig;
use crate::elements::{BorderConfig, ClipConfig, CornerRadius, ImageHandle};
use crate::errors::LayoutError;
use crate::id::{self, Id};
use crate::layout::{LayoutDirection, Padding, Sizing};
use crate::math::{BoundingBox, Dimensions, Vector2};
use crate::render_commands::{
    Border, Custom, Image, Rectangle, RenderCommand, RenderCommandConfig, Text,
};
use crate::text::{TextConfig, TextMeasurer};

// ============================================================================
// Constants
// ============================================================================

const MAXFLOAT: f32 = f32::MAX;
const ROOT_INDEX: usize = 0;
const ROOT_LABEL: &str = "Boxlay__RootContainer";

// ============================================================================
// Config structs (public, used by Declaration in lib.rs)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SizingType {
    #[default]
    Fit,
    Grow,
    Percent,
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizingMinMax {
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizingAxis {
    pub type_: SizingType,
    pub min_max: SizingMinMax,
    pub percent: f32,
    /// Share of the remaining space claimed by a grow axis, relative to its siblings.
    pub weight: f32,
}

impl SizingAxis {
    /// `[min, max]` with a non-positive max read as unbounded.
    fn bounds(&self) -> (f32, f32) {
        let SizingMinMax { min, max } = self.min_max;
        match self.type_ {
            SizingType::Fixed => (min, max),
            _ if max <= 0.0 => (min, MAXFLOAT),
            _ => (min, max),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizingConfig {
    pub width: SizingAxis,
    pub height: SizingAxis,
}

impl SizingConfig {
    #[inline]
    fn along(&self, x_axis: bool) -> SizingAxis {
        if x_axis {
            self.width
        } else {
            self.height
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChildAlignmentConfig {
    pub x: AlignX,
    pub y: AlignY,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutConfig {
    pub sizing: SizingConfig,
    pub padding: Padding,
    pub child_gap: u16,
    pub child_alignment: ChildAlignmentConfig,
    pub layout_direction: LayoutDirection,
}

impl LayoutConfig {
    /// Padding on both edges of an axis.
    #[inline]
    fn padding_along(&self, x_axis: bool) -> f32 {
        if x_axis {
            (self.padding.left as u32 + self.padding.right as u32) as f32
        } else {
            (self.padding.top as u32 + self.padding.bottom as u32) as f32
        }
    }

    #[inline]
    fn padding_leading(&self, x_axis: bool) -> f32 {
        if x_axis {
            self.padding.left as f32
        } else {
            self.padding.top as f32
        }
    }

    #[inline]
    fn alignment_along(&self, x_axis: bool) -> f32 {
        if x_axis {
            self.child_alignment.x.factor()
        } else {
            self.child_alignment.y.factor()
        }
    }
}

/// The static description of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDeclaration<CustomElementData: Clone + Default + Debug = ()> {
    pub layout: LayoutConfig,
    pub background_color: Color,
    pub corner_radius: CornerRadius,
    pub image: Option<ImageHandle>,
    pub custom_data: Option<CustomElementData>,
    pub clip: ClipConfig,
    pub border: BorderConfig,
    pub user_data: usize,
}

impl<CustomElementData: Clone + Default + Debug> Default for ElementDeclaration<CustomElementData> {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            background_color: Color::TRANSPARENT,
            corner_radius: CornerRadius::default(),
            image: None,
            custom_data: None,
            clip: ClipConfig::default(),
            border: BorderConfig::default(),
            user_data: 0,
        }
    }
}

// ============================================================================
// Internal engine types
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct TextElementData {
    text: ArenaStr,
    config: TextConfig,
}

#[derive(Debug, Clone, Default)]
struct LayoutElement<CustomElementData: Clone + Default + Debug> {
    id: u32,
    label: ArenaStr,
    declaration: ElementDeclaration<CustomElementData>,
    // Children data (for non-text elements)
    children_start: usize,
    children_length: usize,
    // Text data (for text elements)
    text_data_index: Option<usize>,
    dimensions: Dimensions,
    bounding_box: BoundingBox,
    z_index: i16,
}

#[derive(Debug, Clone, Copy, Default)]
struct LayoutElementTreeNode {
    layout_element_index: usize,
    position: Vector2,
}

#[inline]
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    f32::min(f32::max(value, min), max)
}

// ============================================================================
// LayoutContext - the main layout engine context
// ============================================================================

/// One layout session: arena, element storage, command buffer and counters.
///
/// Instances are independent; run one per thread if frames must be laid out
/// concurrently.
pub struct LayoutContext<CustomElementData: Clone + Default + Debug = ()> {
    config: EngineConfig,
    layout_dimensions: Dimensions,
    measure_text_fn: Box<dyn TextMeasurer>,
    arena: Arena,

    layout_elements: Vec<LayoutElement<CustomElementData>>,
    layout_element_children: Vec<usize>,
    layout_element_children_buffer: Vec<usize>,
    open_layout_element_stack: Vec<usize>,
    text_element_data: Vec<TextElementData>,
    render_commands: Vec<RenderCommand<CustomElementData>>,

    // element id -> layout element index, for bounding box queries
    layout_element_map: FxHashMap<u32, usize>,

    layer_stack: Vec<i16>,
    z_counter: i16,
    current_z_index: i16,

    frame_open: bool,
    layout_complete: bool,
    error: Option<LayoutError>,
}

impl<CustomElementData: Clone + Default + Debug> LayoutContext<CustomElementData> {
    pub fn with_config(config: EngineConfig, measurer: impl TextMeasurer + 'static) -> Self {
        Self {
            config,
            layout_dimensions: config.viewport,
            measure_text_fn: Box::new(measurer),
            arena: Arena::with_capacity(config.arena_capacity),
            layout_elements: Vec::new(),
            layout_element_children: Vec::new(),
            layout_element_children_buffer: Vec::new(),
            open_layout_element_stack: Vec::new(),
            text_element_data: Vec::new(),
            render_commands: Vec::new(),
            layout_element_map: FxHashMap::default(),
            layer_stack: Vec::new(),
            z_counter: 0,
            current_z_index: 0,
            frame_open: false,
            layout_complete: false,
            error: None,
        }
    }

    pub fn initialize(
        arena_capacity: usize,
        viewport: Dimensions,
        measurer: impl TextMeasurer + 'static,
    ) -> Self {
        Self::with_config(
            EngineConfig::new(viewport).arena_capacity(arena_capacity),
            measurer,
        )
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn accepting(&self) -> bool {
        if !self.frame_open {
            warn!("declaration outside of begin_layout/end_layout ignored");
            return false;
        }
        self.error.is_none()
    }

    fn fail(&mut self, err: LayoutError) {
        if self.error.is_none() {
            error!(%err, "layout frame aborted");
            self.error = Some(err);
        }
    }

    fn reserve_element(&mut self) -> bool {
        if self.layout_elements.len() >= self.config.max_element_count {
            self.fail(LayoutError::ElementsCapacityExceeded {
                capacity: self.config.max_element_count,
            });
            return false;
        }
        true
    }

    fn push_element(&mut self, element_id: &Id) {
        if !self.reserve_element() {
            return;
        }
        let label = if element_id.string_id.is_empty() {
            ArenaStr::default()
        } else {
            match self.arena.alloc_str(element_id.string_id.as_str()) {
                Ok(label) => label,
                Err(err) => {
                    self.fail(err);
                    return;
                }
            }
        };

        let idx = self.layout_elements.len();
        self.layout_elements.push(LayoutElement {
            id: element_id.id,
            label,
            z_index: self.current_z_index,
            ..Default::default()
        });
        self.open_layout_element_stack.push(idx);

        if self.layout_element_map.insert(element_id.id, idx).is_some() {
            debug!(
                id = element_id.id,
                label = element_id.string_id.as_str(),
                "duplicate element id, later declaration wins"
            );
        }
    }

    // ========================================================================
    // Element open / close / configure
    // ========================================================================

    /// Opens an element whose id is derived from its parent and position.
    pub fn open_element(&mut self) {
        if !self.accepting() {
            return;
        }
        let Some(&parent_idx) = self.open_layout_element_stack.last() else {
            return;
        };
        let parent = &self.layout_elements[parent_idx];
        let element_id = Id::anonymous(parent.id, parent.children_length as u32);
        self.push_element(&element_id);
    }

    pub fn open_element_with_id(&mut self, element_id: &Id) {
        if !self.accepting() {
            return;
        }
        self.push_element(element_id);
    }

    /// Attaches the declaration to the most recently opened element.
    pub fn configure_open_element(&mut self, declaration: &ElementDeclaration<CustomElementData>) {
        if !self.accepting() {
            return;
        }
        if self.open_layout_element_stack.len() <= 1 {
            warn!("configure_open_element called with no open element");
            return;
        }
        if let Some(&open_idx) = self.open_layout_element_stack.last() {
            self.layout_elements[open_idx].declaration = declaration.clone();
        }
    }

    /// Closes the most recently opened element and measures it.
    ///
    /// Closing with nothing open is a no-op.
    pub fn close_element(&mut self) {
        if !self.accepting() {
            return;
        }
        if self.open_layout_element_stack.len() <= 1 {
            warn!("close_element called with no open element");
            return;
        }
        self.close_open_element();
    }

    /// Pass 1 for the element on top of the stack: size it from its children,
    /// then hand it to its parent.
    fn close_open_element(&mut self) {
        let Some(open_idx) = self.open_layout_element_stack.pop() else {
            return;
        };
        let layout_config = self.layout_elements[open_idx].declaration.layout;
        let children_length = self.layout_elements[open_idx].children_length;

        // Attach children to the current open element
        let children_start = self.layout_element_children.len();
        let buffer_start = self
            .layout_element_children_buffer
            .len()
            .saturating_sub(children_length);
        self.layout_element_children
            .extend_from_slice(&self.layout_element_children_buffer[buffer_start..]);
        self.layout_element_children_buffer.truncate(buffer_start);

        let row = layout_config.layout_direction.is_row();
        let mut along = layout_config.padding_along(row);
        let mut cross: f32 = 0.0;
        for &child_index in &self.layout_element_children[children_start..] {
            let child_dimensions = self.layout_elements[child_index].dimensions;
            along += child_dimensions.along(row);
            cross = f32::max(cross, child_dimensions.along(!row));
        }
        along += children_length.saturating_sub(1) as f32 * layout_config.child_gap as f32;
        cross += layout_config.padding_along(!row);

        let element = &mut self.layout_elements[open_idx];
        element.children_start = children_start;
        *element.dimensions.along_mut(row) = along;
        *element.dimensions.along_mut(!row) = cross;

        for x_axis in [true, false] {
            let sizing = layout_config.sizing.along(x_axis);
            let size = element.dimensions.along_mut(x_axis);
            if sizing.type_ == SizingType::Percent {
                *size = 0.0;
            } else {
                let (min, max) = sizing.bounds();
                *size = clamp_axis(*size, min, max);
            }
        }

        // Add to parent's children
        if let Some(&parent_idx) = self.open_layout_element_stack.last() {
            self.layout_elements[parent_idx].children_length += 1;
            self.layout_element_children_buffer.push(open_idx);
        }
    }

    // ========================================================================
    // Text elements
    // ========================================================================

    /// Adds a text leaf to the currently open element.
    pub fn text(&mut self, text: &str, config: TextConfig) {
        if !self.accepting() {
            return;
        }
        let Some(&parent_idx) = self.open_layout_element_stack.last() else {
            return;
        };
        if !self.reserve_element() {
            return;
        }
        let handle = match self.arena.alloc_str(text) {
            Ok(handle) => handle,
            Err(err) => {
                self.fail(err);
                return;
            }
        };
        let dimensions = self.measure_text_fn.measure(text, &config);

        let parent = &mut self.layout_elements[parent_idx];
        let element_id = id::hash_child(parent.id, parent.children_length as u32);
        parent.children_length += 1;

        self.text_element_data.push(TextElementData {
            text: handle,
            config,
        });
        let text_elem_idx = self.layout_elements.len();
        self.layout_elements.push(LayoutElement {
            id: element_id,
            text_data_index: Some(self.text_element_data.len() - 1),
            dimensions,
            z_index: self.current_z_index,
            ..Default::default()
        });
        self.layout_element_map.insert(element_id, text_elem_idx);
        self.layout_element_children_buffer.push(text_elem_idx);
    }

    // ========================================================================
    // Layers
    // ========================================================================

    /// Raises elements opened from now on above everything declared so far.
    pub fn push_layer(&mut self) {
        if !self.accepting() {
            return;
        }
        self.z_counter = self.z_counter.saturating_add(1);
        self.layer_stack.push(self.current_z_index);
        self.current_z_index = self.z_counter;
    }

    /// Returns to the layer that was current before the matching [`push_layer`](Self::push_layer).
    pub fn pop_layer(&mut self) {
        if !self.accepting() {
            return;
        }
        match self.layer_stack.pop() {
            Some(previous) => self.current_z_index = previous,
            None => warn!("pop_layer called without a matching push_layer"),
        }
    }

    // ========================================================================
    // Begin / End layout
    // ========================================================================

    pub fn begin_layout(&mut self) {
        self.initialize_ephemeral_memory();
        self.frame_open = true;
        trace!(
            width = self.layout_dimensions.width,
            height = self.layout_dimensions.height,
            "begin layout"
        );

        let root_id = Id {
            id: id::hash(ROOT_LABEL),
            ..Default::default()
        };
        self.push_element(&root_id);
        let viewport = self.layout_dimensions;
        if let Some(root) = self.layout_elements.get_mut(ROOT_INDEX) {
            root.declaration.layout.sizing = SizingConfig {
                width: Sizing::Fixed(viewport.width).into(),
                height: Sizing::Fixed(viewport.height).into(),
            };
        }
    }

    /// Finishes the frame and returns its render commands, sorted by z-index.
    ///
    /// Elements still open are closed first. If the frame ran out of arena or
    /// element capacity the error is returned instead and the frame has no
    /// usable output.
    pub fn end_layout(&mut self) -> Result<&[RenderCommand<CustomElementData>], LayoutError> {
        if !self.frame_open {
            warn!("end_layout called without begin_layout");
            return Ok(&self.render_commands);
        }
        if let Some(err) = self.error {
            self.frame_open = false;
            return Err(err);
        }

        let left_open = self.open_layout_element_stack.len().saturating_sub(1);
        if left_open > 0 {
            debug!(count = left_open, "auto-closing elements left open at end of layout");
        }
        while !self.open_layout_element_stack.is_empty() {
            self.close_open_element();
        }
        self.frame_open = false;

        self.calculate_final_layout();
        trace!(commands = self.render_commands.len(), "end layout");
        Ok(&self.render_commands)
    }

    fn initialize_ephemeral_memory(&mut self) {
        self.arena.reset();
        self.layout_elements.clear();
        self.layout_element_children.clear();
        self.layout_element_children_buffer.clear();
        self.open_layout_element_stack.clear();
        self.text_element_data.clear();
        self.render_commands.clear();
        self.layout_element_map.clear();
        self.layer_stack.clear();
        self.z_counter = 0;
        self.current_z_index = 0;
        self.layout_complete = false;
        self.error = None;
    }

    // ========================================================================
    // Layout algorithm
    // ========================================================================

    fn calculate_final_layout(&mut self) {
        let _span = debug_span!("layout", elements = self.layout_elements.len()).entered();
        self.size_containers_along_axis(true);
        self.size_containers_along_axis(false);
        self.generate_render_commands();
        // Stable: equal z keeps emission order.
        self.render_commands.sort_by_key(|command| command.z_index);
        self.layout_complete = true;
    }

    /// Pass 2 for one axis: resolve percent and grow children breadth-first
    /// from the root, each parent's size being final before its children.
    fn size_containers_along_axis(&mut self, x_axis: bool) {
        let mut bfs_buffer: Vec<usize> = vec![ROOT_INDEX];
        let mut grow_container_buffer: Vec<usize> = Vec::new();

        let mut i = 0;
        while i < bfs_buffer.len() {
            let parent_index = bfs_buffer[i];
            i += 1;

            let parent = &self.layout_elements[parent_index];
            let parent_config = parent.declaration.layout;
            let parent_size = parent.dimensions.along(x_axis);
            let children_start = parent.children_start;
            let children_length = parent.children_length;
            let sizing_along_axis = parent_config.layout_direction.is_row() == x_axis;

            let child_gaps = if sizing_along_axis {
                children_length.saturating_sub(1) as f32 * parent_config.child_gap as f32
            } else {
                0.0
            };
            let available = parent_size - parent_config.padding_along(x_axis) - child_gaps;

            let mut inner_content_size: f32 = 0.0;
            grow_container_buffer.clear();

            for child_offset in 0..children_length {
                let child_index = self.layout_element_children[children_start + child_offset];
                let child = &mut self.layout_elements[child_index];
                if child.text_data_index.is_none() && child.children_length > 0 {
                    bfs_buffer.push(child_index);
                }

                let child_sizing = child.declaration.layout.sizing.along(x_axis);
                match child_sizing.type_ {
                    SizingType::Percent => {
                        *child.dimensions.along_mut(x_axis) =
                            f32::max(available, 0.0) * child_sizing.percent;
                    }
                    SizingType::Grow if sizing_along_axis => {
                        grow_container_buffer.push(child_index);
                        continue;
                    }
                    SizingType::Grow => {
                        let (min, max) = child_sizing.bounds();
                        *child.dimensions.along_mut(x_axis) = clamp_axis(available, min, max);
                    }
                    SizingType::Fit | SizingType::Fixed => {}
                }
                if sizing_along_axis {
                    inner_content_size += child.dimensions.along(x_axis);
                }
            }

            if !grow_container_buffer.is_empty() {
                self.distribute_grow(
                    &mut grow_container_buffer,
                    available - inner_content_size,
                    x_axis,
                );
            }
        }
    }

    /// Splits `remaining` between grow siblings by weight. Siblings whose share
    /// falls outside their bounds are pinned to the bound and the rest is split
    /// again among the others.
    fn distribute_grow(&mut self, grow_containers: &mut Vec<usize>, remaining: f32, x_axis: bool) {
        let mut remaining = f32::max(remaining, 0.0);

        while !grow_containers.is_empty() {
            let total_weight: f32 = grow_containers
                .iter()
                .map(|&index| {
                    self.layout_elements[index]
                        .declaration
                        .layout
                        .sizing
                        .along(x_axis)
                        .weight
                })
                .sum();

            if total_weight <= 0.0 {
                for &index in grow_containers.iter() {
                    let element = &mut self.layout_elements[index];
                    let (min, max) = element.declaration.layout.sizing.along(x_axis).bounds();
                    *element.dimensions.along_mut(x_axis) = clamp_axis(0.0, min, max);
                }
                return;
            }


            let mut pinned_total: f32 = 0.0;
            let mut pinned_any = false;
            let mut j = 0;
            while j < grow_containers.len() {
                let element = &mut self.layout_elements[grow_containers[j]];
                let sizing = element.declaration.layout.sizing.along(x_axis);
                let (min, max) = sizing.bounds();
                let share = remaining * sizing.weight / total_weight;
                let clamped = clamp_axis(share, min, max);
                if clamped != share {
                    *element.dimensions.along_mut(x_axis) = clamped;
                    pinned_total += clamped;
                    pinned_any = true;
                    grow_containers.swap_remove(j);
                } else {
                    j += 1;
                }
            }

            if !pinned_any {
                for &index in grow_containers.iter() {
                    let element = &mut self.layout_elements[index];
                    let weight = element.declaration.layout.sizing.along(x_axis).weight;
                    *element.dimensions.along_mut(x_axis) = remaining * weight / total_weight;
                }
                return;
            }
            remaining = f32::max(remaining - pinned_total, 0.0);
        }
    }

    /// Depth-first walk from the root: position each element, emit its
    /// commands, then its children, closing clip regions on the way back up.
    fn generate_render_commands(&mut self) {
        self.render_commands.clear();
        if self.layout_elements.is_empty() {
            return;
        }

        let mut dfs_buffer: Vec<LayoutElementTreeNode> = vec![LayoutElementTreeNode {
            layout_element_index: ROOT_INDEX,
            position: Vector2::default(),
        }];
        let mut tree_node_visited: Vec<bool> = vec![false];

        while let Some(&current_element_tree_node) = dfs_buffer.last() {
            let buffer_index = dfs_buffer.len() - 1;
            let current_element_index = current_element_tree_node.layout_element_index;

            // Second visit: all children are done.
            if tree_node_visited[buffer_index] {
                let element = &self.layout_elements[current_element_index];
                if current_element_index != ROOT_INDEX && element.declaration.clip.is_enabled() {
                    self.render_commands.push(RenderCommand {
                        bounding_box: element.bounding_box,
                        config: RenderCommandConfig::ClipEnd,
                        id: element.id,
                        z_index: element.z_index,
                        user_data: element.declaration.user_data,
                    });
                }
                dfs_buffer.pop();
                tree_node_visited.pop();
                continue;
            }
            tree_node_visited[buffer_index] = true;

            let position = current_element_tree_node.position;
            let dimensions = self.layout_elements[current_element_index].dimensions;
            let current_bbox =
                BoundingBox::new(position.x, position.y, dimensions.width, dimensions.height);
            self.layout_elements[current_element_index].bounding_box = current_bbox;

            if current_element_index != ROOT_INDEX {
                self.emit_element_commands(current_element_index, current_bbox);
            }

            let element = &self.layout_elements[current_element_index];
            if element.text_data_index.is_some() || element.children_length == 0 {
                continue;
            }

            let layout_config = element.declaration.layout;
            let clip = element.declaration.clip;
            let children_start = element.children_start;
            let children_length = element.children_length;
            let row = layout_config.layout_direction.is_row();
            let child_gap = layout_config.child_gap as f32;
            let child_offset = if clip.is_enabled() {
                clip.child_offset
            } else {
                Vector2::default()
            };

            let children = &self.layout_element_children[children_start..children_start + children_length];
            let content_along: f32 = children
                .iter()
                .map(|&child| self.layout_elements[child].dimensions.along(row))
                .sum::<f32>()
                + children_length.saturating_sub(1) as f32 * child_gap;

            // Alignment along the stacking axis moves the whole run of children.
            let extra_space = dimensions.along(row) - layout_config.padding_along(row) - content_along;
            let mut next_child_offset = layout_config.padding_leading(row)
                + extra_space * layout_config.alignment_along(row);
            let inner_cross = dimensions.along(!row) - layout_config.padding_along(!row);

            let new_length = dfs_buffer.len() + children_length;
            dfs_buffer.resize(new_length, LayoutElementTreeNode::default());
            tree_node_visited.resize(new_length, false);

            for (i, &child_index) in children.iter().enumerate() {
                let child_dimensions = self.layout_elements[child_index].dimensions;
                // Cross-axis alignment is per child.
                let cross_offset = layout_config.padding_leading(!row)
                    + (inner_cross - child_dimensions.along(!row))
                        * layout_config.alignment_along(!row);
                let (offset_x, offset_y) = if row {
                    (next_child_offset, cross_offset)
                } else {
                    (cross_offset, next_child_offset)
                };

                // Pushed in reverse so the first child is visited first.
                dfs_buffer[new_length - 1 - i] = LayoutElementTreeNode {
                    layout_element_index: child_index,
                    position: Vector2::new(
                        position.x + offset_x + child_offset.x,
                        position.y + offset_y + child_offset.y,
                    ),
                };
                next_child_offset += child_dimensions.along(row) + child_gap;
            }
        }
    }

    fn emit_element_commands(&mut self, index: usize, bounding_box: BoundingBox) {
        let element = &self.layout_elements[index];
        let id = element.id;
        let z_index = element.z_index;

        if let Some(text_data_index) = element.text_data_index {
            let text_data = &self.text_element_data[text_data_index];
            let config = text_data.config;
            self.render_commands.push(RenderCommand {
                bounding_box,
                config: RenderCommandConfig::Text(Text {
                    text: self.arena.get(text_data.text).to_string(),
                    color: config.color,
                    font_id: config.font_id,
                    font_size: config.font_size,
                    letter_spacing: config.letter_spacing,
                    line_height: config.line_height,
                    wrap_mode: config.wrap_mode,
                    alignment: config.alignment,
                }),
                id,
                z_index,
                user_data: config.user_data,
            });
            return;
        }

        let declaration = &element.declaration;
        let user_data = declaration.user_data;
        let background = declaration.background_color;
        let corner_radii = declaration.corner_radius;

        let fill = if let Some(handle) = declaration.image {
            Some(RenderCommandConfig::Image(Image {
                handle,
                tint: background,
                corner_radii,
            }))
        } else if let Some(data) = &declaration.custom_data {
            Some(RenderCommandConfig::Custom(Custom {
                background_color: background,
                corner_radii,
                data: data.clone(),
            }))
        } else if !background.is_transparent() {
            Some(RenderCommandConfig::Rectangle(Rectangle {
                color: background,
                corner_radii,
            }))
        } else {
            None
        };
        if let Some(config) = fill {
            self.render_commands.push(RenderCommand {
                bounding_box,
                config,
                id,
                z_index,
                user_data,
            });
        }

        let border = declaration.border;
        if !border.width.is_zero() {
            self.render_commands.push(RenderCommand {
                bounding_box,
                config: RenderCommandConfig::Border(Border {
                    color: border.color,
                    corner_radii,
                    width: border.width,
                }),
                id: id::hash_child(id, u32::MAX),
                z_index,
                user_data,
            });
        }

        let clip = declaration.clip;
        if clip.is_enabled() {
            self.render_commands.push(RenderCommand {
                bounding_box,
                config: RenderCommandConfig::ClipStart {
                    horizontal: clip.horizontal,
                    vertical: clip.vertical,
                },
                id,
                z_index,
                user_data,
            });
        }
    }

    // ========================================================================
    // Queries and settings
    // ========================================================================

    /// Final bounding box of the element with `element_id` from the last
    /// completed layout. `None` for unknown ids or while a frame is being declared.
    pub fn bounding_box(&self, element_id: &Id) -> Option<BoundingBox> {
        self.bounding_box_by_hash(element_id.id)
    }

    pub fn bounding_box_by_hash(&self, id: u32) -> Option<BoundingBox> {
        if !self.layout_complete {
            return None;
        }
        self.layout_element_map
            .get(&id)
            .map(|&index| self.layout_elements[index].bounding_box)
    }

    /// Label the element was declared with, if any.
    pub fn element_label(&self, id: u32) -> Option<&str> {
        let &index = self.layout_element_map.get(&id)?;
        let label = self.layout_elements[index].label;
        (!label.is_empty()).then(|| self.arena.get(label))
    }

    /// Takes effect at the next [`begin_layout`](Self::begin_layout).
    pub fn set_viewport_dimensions(&mut self, dimensions: Dimensions) {
        self.layout_dimensions = dimensions;
    }

    pub fn viewport_dimensions(&self) -> Dimensions {
        self.layout_dimensions
    }

    pub fn set_text_measurer(&mut self, measurer: impl TextMeasurer + 'static) {
        self.measure_text_fn = Box::new(measurer);
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Elements declared this frame, the implicit root and text leaves included.
    pub fn element_count(&self) -> usize {
        self.layout_elements.len()
    }

    pub fn error(&self) -> Option<LayoutError> {
        self.error
    }
}
