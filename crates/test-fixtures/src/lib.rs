//! In-memory doubles for the stowage traits, shared by every crate's tests.
//!
//! - [`FakeObjectStore`]: bucket contents in memory, fixed page size,
//!   failure injection, call counters.
//! - [`ScriptedSampleSource`]: replays a fixed list of host readings.
//! - [`RecordingWorker`]: a stress worker that records its invocations
//!   instead of burning CPU.

mod object_store;
mod sample_source;
mod stress_worker;

pub use object_store::FakeObjectStore;
pub use sample_source::ScriptedSampleSource;
pub use stress_worker::RecordingWorker;
