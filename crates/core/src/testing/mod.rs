//! Testing utilities and mock implementations.
//!
//! This module provides a mock [`crate::resolver::MetadataService`] and
//! record fixtures, allowing resolver and server tests to run without the
//! real catalog.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tunedex_core::testing::{fixtures, MockMetadataService};
//! use tunedex_core::MetadataResolver;
//!
//! let service = Arc::new(MockMetadataService::new());
//! service.set_candidates(vec!["https://example.com/album/1".into()]).await;
//! let resolver = MetadataResolver::new(service);
//! ```

pub mod fixtures;
mod mock_service;

pub use mock_service::{MockMetadataService, RecordedCall};
