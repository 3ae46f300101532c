//! Host resource sampling.

mod sampler;
mod source;

pub use sampler::{SystemGauges, SystemSampler};
pub use source::SysinfoSource;
