use crate::arena::DEFAULT_ARENA_CAPACITY;
use crate::math::Dimensions;

/// Maximum number of elements (including text leaves) per frame by default.
pub const DEFAULT_MAX_ELEMENT_COUNT: usize = 8192;

/// Initialization settings for a [`LayoutContext`](crate::engine::LayoutContext).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Bytes available for per-frame text and label storage.
    pub arena_capacity: usize,
    pub max_element_count: usize,
    pub viewport: Dimensions,
}

impl EngineConfig {
    pub fn new(viewport: Dimensions) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    #[inline]
    pub fn arena_capacity(mut self, bytes: usize) -> Self {
        self.arena_capacity = bytes;
        self
    }

    #[inline]
    pub fn max_element_count(mut self, count: usize) -> Self {
        self.max_element_count = count;
        self
    }

    #[inline]
    pub fn viewport(mut self, viewport: Dimensions) -> Self {
        self.viewport = viewport;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            arena_capacity: DEFAULT_ARENA_CAPACITY,
            max_element_count: DEFAULT_MAX_ELEMENT_COUNT,
            viewport: Dimensions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_generous() {
        let config = EngineConfig::new(Dimensions::new(640.0, 480.0));
        assert_eq!(config.arena_capacity, 1024 * 1024);
        assert_eq!(config.max_element_count, 8192);
        assert_eq!(config.viewport, Dimensions::new(640.0, 480.0));
    }

    #[test]
    fn setters_override() {
        let config = EngineConfig::default()
            .arena_capacity(64)
            .max_element_count(3)
            .viewport(Dimensions::new(1.0, 2.0));
        assert_eq!(config.arena_capacity, 64);
        assert_eq!(config.max_element_count, 3);
        assert_eq!(config.viewport.height, 2.0);
    }
}
