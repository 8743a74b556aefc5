//! s3mgr-s3: aws-sdk-s3 adapter for s3mgr
//!
//! This crate provides the implementation of the ObjectStore trait
//! using the aws-sdk-s3 crate. It is the only crate that directly
//! depends on the AWS SDK.

pub mod client;
mod error;

pub use client::S3Client;
