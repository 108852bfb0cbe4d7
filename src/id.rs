//! Stable element identity.
//!
//! Ids are 32-bit FNV-1a hashes of a caller-supplied label, optionally mixed with
//! a little-endian index. They are deterministic across calls and processes, so
//! the same declaration produces the same id every frame. Distinct labels may
//! still collide; keeping ids unique is up to the caller.

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

#[inline]
fn fnv1a(mut hash: u32, bytes: &[u8]) -> u32 {
    for &b in bytes {
        hash ^= b as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// FNV-1a over the UTF-8 bytes of `name`.
pub fn hash(name: &str) -> u32 {
    fnv1a(FNV_OFFSET_BASIS, name.as_bytes())
}

/// FNV-1a over `name` followed by the four little-endian bytes of `index`.
pub fn hash_indexed(name: &str, index: u32) -> u32 {
    fnv1a(hash(name), &index.to_le_bytes())
}

/// Id for the `ordinal`-th anonymous child of `parent`.
pub(crate) fn hash_child(parent: u32, ordinal: u32) -> u32 {
    let hash = fnv1a(FNV_OFFSET_BASIS, &parent.to_le_bytes());
    fnv1a(hash, &ordinal.to_le_bytes())
}

/// Owned string for debug/display purposes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringId {
    text: String,
}

impl StringId {
    pub fn from_str(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the string content.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns true if the string is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Id {
    pub id: u32,
    pub offset: u32,
    pub base_id: u32,
    pub string_id: StringId,
}

impl Id {
    /// Creates an id from `label`.
    #[inline]
    pub fn new(label: &str) -> Id {
        let id = hash(label);
        Id {
            id,
            offset: 0,
            base_id: id,
            string_id: StringId::from_str(label),
        }
    }

    /// Creates an id from `label` and `index`, for repeated or list items.
    #[inline]
    pub fn new_index(label: &str, index: u32) -> Id {
        Id {
            id: hash_indexed(label, index),
            offset: index,
            base_id: hash(label),
            string_id: StringId::from_str(label),
        }
    }

    /// Id synthesized for an element declared without one.
    pub(crate) fn anonymous(parent: u32, ordinal: u32) -> Id {
        Id {
            id: hash_child(parent, ordinal),
            offset: ordinal,
            base_id: parent,
            string_id: StringId::empty(),
        }
    }
}

impl From<&str> for Id {
    fn from(label: &str) -> Self {
        Id::new(label)
    }
}

impl From<(&str, u32)> for Id {
    fn from((label, index): (&str, u32)) -> Self {
        Id::new_index(label, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_reference_values() {
        assert_eq!(hash(""), 0x811C_9DC5);
        assert_eq!(hash("a"), 0xE40C_292C);
        assert_eq!(hash("foobar"), 0xBF9C_F968);
    }

    #[test]
    fn indexed_hash_extends_the_plain_hash() {
        let manual = fnv1a(hash("item"), &[7, 0, 0, 0]);
        assert_eq!(hash_indexed("item", 7), manual);
        assert_ne!(hash_indexed("item", 0), hash_indexed("item", 1));
        assert_ne!(hash_indexed("item", 0), hash("item"));
    }

    #[test]
    fn id_keeps_label_and_base() {
        let id = Id::new_index("row", 3);
        assert_eq!(id.offset, 3);
        assert_eq!(id.base_id, hash("row"));
        assert_eq!(id.string_id.as_str(), "row");
        assert_eq!(Id::from(("row", 3)), id);
    }

    #[test]
    fn child_ids_depend_on_parent_and_ordinal() {
        assert_eq!(hash_child(10, 0), hash_child(10, 0));
        assert_ne!(hash_child(10, 0), hash_child(10, 1));
        assert_ne!(hash_child(10, 0), hash_child(11, 0));
    }
}
