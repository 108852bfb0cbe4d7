use thiserror::Error;

/// Conditions that make the rest of a layout pass meaningless.
///
/// The engine latches the first one it hits, ignores further declarations for
/// that frame and reports it from [`LayoutContext::end_layout`](crate::engine::LayoutContext::end_layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("arena capacity exceeded: requested {requested} bytes with {used} of {capacity} in use")]
    ArenaCapacityExceeded {
        requested: usize,
        used: usize,
        capacity: usize,
    },

    #[error("element capacity exceeded: at most {capacity} elements per frame")]
    ElementsCapacityExceeded { capacity: usize },
}

/// Clip-stack violations a renderer can detect in a command stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClipNestingError {
    #[error("clip end at command {index} has no matching clip start")]
    UnmatchedEnd { index: usize },

    #[error("{depth} clip region(s) left open at the end of the stream")]
    Unclosed { depth: usize },
}
