//! Error types for SASL payload framing.
//!
//! This module defines the failures that can occur while reassembling
//! and decoding an inbound `AUTHENTICATE` payload.

use thiserror::Error;

/// Failures while reassembling or decoding an inbound payload.
///
/// Every framing failure is terminal for the exchange: the session aborts
/// with `AUTHENTICATE *` and reports a single failure to the embedder.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FramingError {
    /// Accumulated encoded payload grew past the allowed maximum.
    #[error("payload too large: {actual} bytes (limit: {limit})")]
    PayloadTooLarge {
        /// Accumulated encoded length.
        actual: usize,
        /// Maximum allowed encoded length.
        limit: usize,
    },

    /// The completed payload was not valid base64.
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}
