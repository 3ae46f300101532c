use sysinfo::{Networks, System};

use stowage_core::errors::{TelemetryError, TelemetryResult};
use stowage_core::models::HostSnapshot;
use stowage_core::traits::ISampleSource;

/// `ISampleSource` backed by `sysinfo`.
///
/// Keeps its `System` and `Networks` between calls: CPU usage is computed
/// from the delta since the previous refresh, so the first reading after
/// construction reports 0%.
pub struct SysinfoSource {
    system: System,
    networks: Networks,
}

impl SysinfoSource {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu();
        Self {
            system,
            networks: Networks::new_with_refreshed_list(),
        }
    }

    /// Sum of cumulative per-process disk usage.
    fn disk_totals(&mut self) -> (u64, u64) {
        self.system.refresh_processes();
        self.system
            .processes()
            .values()
            .map(|p| p.disk_usage())
            .fold((0, 0), |(read, written), usage| {
                (
                    read + usage.total_read_bytes,
                    written + usage.total_written_bytes,
                )
            })
    }

    /// Sum of cumulative per-interface traffic.
    fn network_totals(&mut self) -> (u64, u64) {
        self.networks.refresh();
        self.networks
            .iter()
            .fold((0, 0), |(rx, tx), (_, data)| {
                (rx + data.total_received(), tx + data.total_transmitted())
            })
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ISampleSource for SysinfoSource {
    fn sample(&mut self) -> TelemetryResult<HostSnapshot> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(TelemetryError::SampleUnavailable {
                what: "host not supported by sysinfo".to_string(),
            });
        }

        self.system.refresh_cpu();
        self.system.refresh_memory();
        let total_memory = self.system.total_memory();
        if total_memory == 0 {
            return Err(TelemetryError::SampleUnavailable {
                what: "total memory reported as zero".to_string(),
            });
        }
        let memory_percent = self.system.used_memory() as f64 / total_memory as f64 * 100.0;

        let (disk_read_bytes, disk_written_bytes) = self.disk_totals();
        let (net_received_bytes, net_transmitted_bytes) = self.network_totals();

        Ok(HostSnapshot {
            cpu_percent: f64::from(self.system.global_cpu_info().cpu_usage()),
            memory_percent,
            disk_read_bytes,
            disk_written_bytes,
            net_received_bytes,
            net_transmitted_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_is_within_bounds_on_supported_hosts() {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return;
        }
        let mut source = SysinfoSource::new();
        let snapshot = source.sample().unwrap();
        assert!((0.0..=100.0).contains(&snapshot.memory_percent));
        assert!(snapshot.cpu_percent >= 0.0);
    }

    #[test]
    fn cumulative_counters_never_decrease() {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return;
        }
        let mut source = SysinfoSource::new();
        let first = source.sample().unwrap();
        let second = source.sample().unwrap();
        assert!(second.net_received_bytes >= first.net_received_bytes);
        assert!(second.net_transmitted_bytes >= first.net_transmitted_bytes);
    }
}
