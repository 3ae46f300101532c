use serde::{Deserialize, Serialize};

use super::ObjectPage;

/// Aggregate count and size of every object in the bucket, taken from one
/// complete enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub object_count: u64,
    pub total_bytes: u64,
    /// Number of listing pages the enumeration took.
    pub pages: usize,
}

impl InventorySummary {
    /// Fold one listing page into the running totals.
    pub fn absorb(&mut self, page: &ObjectPage) {
        self.object_count += page.objects.len() as u64;
        self.total_bytes = page
            .objects
            .iter()
            .fold(self.total_bytes, |acc, o| acc.saturating_add(o.size));
        self.pages += 1;
    }
}
