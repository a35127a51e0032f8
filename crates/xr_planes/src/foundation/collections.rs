//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a node in a [`Scene`](crate::scene::Scene)
    pub struct NodeHandle;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<NodeHandle, T>;
