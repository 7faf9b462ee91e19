//! Blob storage for submitted source code

mod traits;

pub mod s3;

pub use s3::S3BlobStore;
pub use traits::BlobStore;
