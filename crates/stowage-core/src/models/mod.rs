//! Plain data types shared between the service crates.

mod cycle_outcome;
mod inventory_summary;
mod object_page;
mod sample;
mod stress_launch;
mod upload_receipt;

pub use cycle_outcome::CycleOutcome;
pub use inventory_summary::InventorySummary;
pub use object_page::{ObjectPage, ObjectSummary};
pub use sample::{HostSnapshot, Sample};
pub use stress_launch::StressLaunch;
pub use upload_receipt::UploadReceipt;
