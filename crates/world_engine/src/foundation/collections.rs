//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Registry-scoped handle for a live entity
    ///
    /// A slot may be reused after its entity is removed, but the key carries a
    /// version so a stale handle never addresses the newcomer.
    pub struct Handle;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<Handle, T>;
