//! Fragmentation and reassembly of SASL payloads.
//!
//! SASL payloads are base64-encoded and carried one chunk per
//! `AUTHENTICATE` line to stay below IRC's 512-byte command length limit.
//! A chunk of exactly [`SASL_CHUNK_SIZE`] bytes announces a continuation;
//! a shorter chunk ends the payload, and a payload whose encoding is an
//! exact multiple of the chunk size is closed by a lone `+`.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::FramingError;

/// Maximum length of a single SASL message chunk (400 bytes).
///
/// Encoded payloads that exceed this length must be split into multiple
/// `AUTHENTICATE` commands.
pub const SASL_CHUNK_SIZE: usize = 400;

/// Maximum accumulated encoded payload length accepted from the server.
///
/// Reassembly is abandoned once the buffered encoded bytes grow past this
/// limit, before any decoding takes place.
pub const SASL_MAX_ENCODED: usize = 8192;

/// Outcome of feeding one fragment to a [`Reassembler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reassembly {
    /// The fragment was a full-size chunk; more fragments are expected.
    Partial,
    /// The payload is complete; contains the decoded bytes.
    Complete(Vec<u8>),
}

/// Accumulates fragmented `AUTHENTICATE` parameters into one decoded
/// payload.
///
/// The buffer holds encoded bytes between fragments and is dropped when a
/// payload completes, when a fragment is rejected, or on [`clear`].
///
/// [`clear`]: Reassembler::clear
///
/// # Example
///
/// ```
/// use slirc_sasl::{Reassembler, Reassembly};
///
/// let mut reassembler = Reassembler::new();
/// let result = reassembler.push("aHVudGVyMg==").unwrap();
/// assert_eq!(result, Reassembly::Complete(b"hunter2".to_vec()));
/// ```
#[derive(Debug, Default)]
pub struct Reassembler {
    buffer: Option<String>,
}

impl Reassembler {
    /// Create an empty reassembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one inbound fragment (the `AUTHENTICATE` parameter).
    ///
    /// A lone `+` closes the buffered payload when one exists, or stands
    /// for an empty initial challenge when none does. Returns
    /// [`Reassembly::Partial`] while a continuation is expected, and the
    /// decoded payload once the final fragment arrives.
    ///
    /// # Errors
    ///
    /// [`FramingError::PayloadTooLarge`] when the accumulated encoded
    /// bytes exceed [`SASL_MAX_ENCODED`], and
    /// [`FramingError::InvalidBase64`] when the completed payload fails to
    /// decode. Either way the buffer is discarded.
    pub fn push(&mut self, fragment: &str) -> Result<Reassembly, FramingError> {
        let buffer = match self.buffer.take() {
            Some(mut buffered) => {
                // A lone `+` is purely a terminator for the buffered bytes.
                if fragment != "+" {
                    buffered.push_str(fragment);
                }
                buffered
            }
            None => fragment.to_owned(),
        };

        if buffer.len() > SASL_MAX_ENCODED {
            return Err(FramingError::PayloadTooLarge {
                actual: buffer.len(),
                limit: SASL_MAX_ENCODED,
            });
        }

        // A full-size chunk always announces a continuation.
        if fragment.len() == SASL_CHUNK_SIZE {
            self.buffer = Some(buffer);
            return Ok(Reassembly::Partial);
        }

        let decoded = if buffer == "+" {
            Vec::new()
        } else {
            BASE64.decode(&buffer)?
        };

        Ok(Reassembly::Complete(decoded))
    }

    /// Drop any partially accumulated payload.
    pub fn clear(&mut self) {
        self.buffer = None;
    }

    /// Length of the encoded bytes buffered so far.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffer.as_ref().map_or(0, String::len)
    }
}

/// Encode an outbound response payload into `AUTHENTICATE` parameters.
///
/// With no payload the response is the single `+` parameter. Otherwise the
/// payload is base64-encoded and split into [`SASL_CHUNK_SIZE`]-byte
/// chunks; an encoding that is an exact multiple of the chunk size
/// (including the empty encoding) is closed with a trailing `+` so the
/// peer can tell the payload has ended.
///
/// # Example
///
/// ```
/// use slirc_sasl::encode_response;
///
/// assert_eq!(encode_response(None), vec!["+".to_string()]);
/// assert_eq!(
///     encode_response(Some(b"hunter2")),
///     vec!["aHVudGVyMg==".to_string()]
/// );
/// ```
#[must_use]
pub fn encode_response(payload: Option<&[u8]>) -> Vec<String> {
    let Some(payload) = payload else {
        return vec!["+".to_owned()];
    };

    let encoded = BASE64.encode(payload);
    let mut chunks: Vec<String> = encoded
        .as_bytes()
        .chunks(SASL_CHUNK_SIZE)
        .map(|chunk| {
            // Safe because base64 is always ASCII
            std::str::from_utf8(chunk).unwrap().to_owned()
        })
        .collect();

    if encoded.len() % SASL_CHUNK_SIZE == 0 {
        chunks.push("+".to_owned());
    }

    chunks
}
