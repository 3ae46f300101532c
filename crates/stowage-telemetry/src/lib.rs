//! # stowage-telemetry
//!
//! The three long-running background loops and the supervisor that owns
//! them. Every loop runs on its own `tokio::time::interval`, handles its
//! own errors inside a cycle, and never terminates on failure.

pub mod inventory;
pub mod shipper;
pub mod supervisor;
pub mod system;

pub use inventory::{enumerate, InventorySampler};
pub use shipper::{shipment_key, LogShipper};
pub use supervisor::BackgroundTasks;
pub use system::{SysinfoSource, SystemSampler};

use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior};

/// Interval shared by every loop: first tick fires at once, missed ticks
/// are delayed rather than burst.
pub(crate) fn ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}
