use serde::{Deserialize, Serialize};

/// One object in a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
}

/// One page of a paginated bucket listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectPage {
    pub objects: Vec<ObjectSummary>,
    /// Token for the next page; `None` when the listing is complete.
    pub next_token: Option<String>,
}

impl ObjectPage {
    pub fn is_last(&self) -> bool {
        self.next_token.is_none()
    }
}
