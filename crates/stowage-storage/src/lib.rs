//! # stowage-storage
//!
//! [`S3ObjectStore`] implements `IObjectStore` on top of `aws-sdk-s3`, for
//! AWS itself or any S3-compatible endpoint (LocalStack, MinIO).

pub mod s3;

pub use s3::S3ObjectStore;
