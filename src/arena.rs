//! Fixed-capacity linear byte arena for per-frame scratch data.
//!
//! Allocation only ever moves the offset forward; [`Arena::reset`] rewinds it
//! to zero while keeping the buffer, so a frame's storage is reused by the next.

use crate::errors::LayoutError;

/// Capacity used when none is configured.
pub const DEFAULT_ARENA_CAPACITY: usize = 1024 * 1024;

/// A string copied into an [`Arena`], resolved with [`Arena::get`].
///
/// Handles are only meaningful until the arena is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArenaStr {
    offset: usize,
    len: usize,
}

impl ArenaStr {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug)]
pub struct Arena {
    memory: Vec<u8>,
    used: usize,
}

impl Arena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            memory: vec![0; capacity],
            used: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.memory.len()
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn remaining(&self) -> usize {
        self.capacity() - self.used
    }

    fn bump(&mut self, n: usize) -> Result<usize, LayoutError> {
        let exceeded = LayoutError::ArenaCapacityExceeded {
            requested: n,
            used: self.used,
            capacity: self.capacity(),
        };
        let end = self.used.checked_add(n).ok_or(exceeded)?;
        if end > self.capacity() {
            return Err(exceeded);
        }
        let start = self.used;
        self.used = end;
        Ok(start)
    }

    /// Reserves `n` zeroed bytes.
    pub fn allocate(&mut self, n: usize) -> Result<&mut [u8], LayoutError> {
        let start = self.bump(n)?;
        let bytes = &mut self.memory[start..start + n];
        bytes.fill(0);
        Ok(bytes)
    }

    /// Copies `s` into the arena.
    pub fn alloc_str(&mut self, s: &str) -> Result<ArenaStr, LayoutError> {
        let start = self.bump(s.len())?;
        self.memory[start..start + s.len()].copy_from_slice(s.as_bytes());
        Ok(ArenaStr {
            offset: start,
            len: s.len(),
        })
    }

    /// Resolves a handle produced by [`Arena::alloc_str`] since the last reset.
    ///
    /// A stale handle yields an empty string rather than reading another
    /// allocation's bytes as text.
    pub fn get(&self, handle: ArenaStr) -> &str {
        let end = handle.offset + handle.len;
        if end > self.used {
            return "";
        }
        std::str::from_utf8(&self.memory[handle.offset..end]).unwrap_or("")
    }

    pub fn reset(&mut self) {
        self.used = 0;
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_ARENA_CAPACITY)
    }
}
