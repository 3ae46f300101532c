//! Metric names and help strings published by the service.
//! Host sampler gauge names live on `HostSnapshot`.

pub const OUTCOME_LABEL: &str = "outcome";

pub const FILE_UPLOADS_TOTAL: &str = "file_uploads_total";
pub const FILE_UPLOADS_HELP: &str = "Total number of upload attempts by outcome";

pub const BUCKET_OBJECT_COUNT: &str = "bucket_object_count";
pub const BUCKET_OBJECT_COUNT_HELP: &str = "Objects in the bucket at the last complete enumeration";
pub const BUCKET_SIZE_BYTES: &str = "bucket_size_bytes";
pub const BUCKET_SIZE_BYTES_HELP: &str = "Total object bytes at the last complete enumeration";
pub const INVENTORY_SCANS_TOTAL: &str = "inventory_scans_total";
pub const INVENTORY_SCANS_HELP: &str = "Inventory enumerations by outcome";

pub const LOG_SHIPMENTS_TOTAL: &str = "log_shipments_total";
pub const LOG_SHIPMENTS_HELP: &str = "Log buffer shipments by outcome";
pub const LOG_BUFFER_PENDING_BYTES: &str = "log_buffer_pending_bytes";
pub const LOG_BUFFER_PENDING_HELP: &str = "Bytes waiting in the local log buffer";

pub const STRESS_JOBS_STARTED_TOTAL: &str = "stress_jobs_started_total";
pub const STRESS_JOBS_STARTED_HELP: &str = "Stress jobs launched";

pub const SYSTEM_GAUGE_HELP: &str = "Host resource counter from the system sampler";
