use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An instantaneous reading destined for a gauge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub name: &'static str,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
}

/// One read of the host resource counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    /// Cumulative bytes read from disk.
    pub disk_read_bytes: u64,
    /// Cumulative bytes written to disk.
    pub disk_written_bytes: u64,
    /// Cumulative bytes received over all interfaces.
    pub net_received_bytes: u64,
    /// Cumulative bytes transmitted over all interfaces.
    pub net_transmitted_bytes: u64,
}

impl HostSnapshot {
    pub const CPU_PERCENT: &'static str = "system_cpu_usage_percent";
    pub const MEMORY_PERCENT: &'static str = "system_memory_usage_percent";
    pub const DISK_READ_BYTES: &'static str = "system_disk_read_bytes";
    pub const DISK_WRITTEN_BYTES: &'static str = "system_disk_written_bytes";
    pub const NET_RECEIVED_BYTES: &'static str = "system_network_received_bytes";
    pub const NET_TRANSMITTED_BYTES: &'static str = "system_network_transmitted_bytes";

    /// Every sample name this snapshot produces, in publish order.
    pub const SAMPLE_NAMES: [&'static str; 6] = [
        Self::CPU_PERCENT,
        Self::MEMORY_PERCENT,
        Self::DISK_READ_BYTES,
        Self::DISK_WRITTEN_BYTES,
        Self::NET_RECEIVED_BYTES,
        Self::NET_TRANSMITTED_BYTES,
    ];

    /// Split the snapshot into named samples stamped with `at`.
    pub fn samples(&self, at: DateTime<Utc>) -> Vec<Sample> {
        let values = [
            self.cpu_percent,
            self.memory_percent,
            self.disk_read_bytes as f64,
            self.disk_written_bytes as f64,
            self.net_received_bytes as f64,
            self.net_transmitted_bytes as f64,
        ];
        Self::SAMPLE_NAMES
            .into_iter()
            .zip(values)
            .map(|(name, value)| Sample {
                name,
                value,
                timestamp: at,
            })
            .collect()
    }
}
