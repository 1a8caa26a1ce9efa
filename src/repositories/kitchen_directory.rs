use std::collections::HashMap;

/// Read-only mapping from vendor id to kitchen reference.
///
/// Loaded once per session from already-deserialized entries supplied by an
/// external sync process, then injected wherever the "add more from this
/// vendor" affordance is resolved. Core logic never reads this from ambient
/// state. Absence of a vendor is a valid state, not an error: the
/// continuation affordance is simply omitted.
#[derive(Debug, Clone, Default)]
pub struct KitchenDirectory {
    entries: HashMap<String, String>,
}

impl KitchenDirectory {
    /// An empty directory; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a directory from `(vendor_id, kitchen_reference)` pairs.
    /// Duplicate vendor ids keep the last entry, matching the sync process's
    /// last-write-wins refresh.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Pure lookup of the kitchen reference for a vendor. Case-sensitive,
    /// exact match, consistent with cart grouping.
    pub fn kitchen_for(&self, vendor_id: &str) -> Option<&str> {
        self.entries.get(vendor_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
