//! Structured log events for key service operations.
//!
//! Each function emits a `tracing` event with structured fields.

use std::fmt::Display;

/// Target of the shipper's own events. The buffer layer drops it, so a
/// shipment never refills the buffer it just drained.
pub const SHIPPER_TARGET: &str = "stowage::log_shipper";

/// Log a stored upload.
pub fn upload_stored(key: &str, bytes: usize) {
    tracing::info!(event = "upload_stored", key = %key, bytes = bytes, "uploaded file to object store");
}

/// Log a failed upload. The error detail stays in the log; callers see a
/// generic status.
pub fn upload_failed(key: &str, code: &str, error: &dyn Display) {
    tracing::error!(
        event = "upload_failed",
        key = %key,
        code = %code,
        error = %error,
        "failed to upload file"
    );
}

/// Log an upload rejected before any store call.
pub fn upload_rejected(code: &str, error: &dyn Display) {
    tracing::warn!(event = "upload_rejected", code = %code, error = %error, "upload rejected");
}

/// Log a published host sample.
pub fn sample_published(cpu_percent: f64, memory_percent: f64) {
    tracing::debug!(
        event = "sample_published",
        cpu_percent = cpu_percent,
        memory_percent = memory_percent,
        "host sample published"
    );
}

/// Log a skipped sampling cycle.
pub fn sample_skipped(code: &str, error: &dyn Display) {
    tracing::warn!(event = "sample_skipped", code = %code, error = %error, "host sample skipped");
}

/// Log a completed inventory enumeration.
pub fn inventory_published(object_count: u64, total_bytes: u64, pages: usize) {
    tracing::info!(
        event = "inventory_published",
        object_count = object_count,
        total_bytes = total_bytes,
        pages = pages,
        "bucket inventory published"
    );
}

/// Log an abandoned inventory enumeration; previous gauges stay visible.
pub fn inventory_aborted(code: &str, error: &dyn Display) {
    tracing::warn!(event = "inventory_aborted", code = %code, error = %error, "bucket inventory aborted");
}

/// Log a shipped log buffer prefix.
pub fn logs_shipped(key: &str, bytes: u64, remaining: u64) {
    tracing::info!(
        target: SHIPPER_TARGET,
        event = "logs_shipped",
        key = %key,
        bytes = bytes,
        remaining = remaining,
        "log buffer shipped"
    );
}

/// Log a failed shipment; the buffer is retained for the next cycle.
pub fn ship_failed(code: &str, error: &dyn Display) {
    tracing::warn!(target: SHIPPER_TARGET, event = "ship_failed", code = %code, error = %error, "log shipment failed");
}

/// Log a launched stress job.
pub fn stress_launched(job_id: &str, workers: usize, duration_secs: u64) {
    tracing::info!(
        event = "stress_launched",
        job_id = %job_id,
        workers = workers,
        duration_secs = duration_secs,
        "stress job launched"
    );
}

/// Log a stress worker that could not be started.
pub fn stress_worker_failed(job_id: &str, worker: usize, error: &dyn Display) {
    tracing::error!(
        event = "stress_worker_failed",
        job_id = %job_id,
        worker = worker,
        error = %error,
        "stress worker failed to start"
    );
}

/// Log a background task start.
pub fn task_started(task: &str, interval_secs: u64) {
    tracing::info!(event = "task_started", task = %task, interval_secs = interval_secs, "background task started");
}

/// Log a background task that ended, normally only at shutdown.
pub fn task_stopped(task: &str, cancelled: bool) {
    tracing::info!(event = "task_stopped", task = %task, cancelled = cancelled, "background task stopped");
}
