mod object_store;
mod sample_source;
mod stress_worker;

pub use object_store::IObjectStore;
pub use sample_source::ISampleSource;
pub use stress_worker::IStressWorker;
