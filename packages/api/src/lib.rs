//! This crate contains the client side of the studio's two HTTP endpoints:
//! wire types, runtime configuration and the transport seam.

pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;


pub use client::{ApiClient, CreateMusicOutcome};
pub use error::ApiError;
pub use transport::{RawResponse, ReqwestTransport, Transport};
