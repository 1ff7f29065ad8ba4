//! # slirc-sasl
//!
//! Client-side SASL authentication for IRC connections, driving the IRCv3
//! `AUTHENTICATE` exchange inside CAP negotiation.
//!
//! ## Features
//!
//! - PLAIN (RFC 4616) and EXTERNAL mechanisms
//! - Base64 payload fragmentation and reassembly across IRC's 512-byte
//!   command length limit, with a hard cap on inbound payload growth
//! - Per-attempt timeout with handle-based schedule/cancel
//! - Sans-IO session: events in, collaborator-trait calls out; no network,
//!   no clock, no blocking
//! - Optional tokio-backed timer service (`tokio` feature, on by default)

#![deny(clippy::all)]
#![warn(missing_docs)]

//! ## Quick Start
//!
//! ### Encoding and reassembling payloads
//!
//! ```rust
//! use slirc_sasl::{encode_response, Reassembler, Reassembly};
//!
//! // Outbound: base64-encode and chunk a response payload.
//! let chunks = encode_response(Some(b"alice\0alice\0hunter2"));
//! assert_eq!(chunks, vec!["YWxpY2UAYWxpY2UAaHVudGVyMg==".to_string()]);
//!
//! // Inbound: reassemble fragments into a decoded challenge.
//! let mut reassembler = Reassembler::new();
//! match reassembler.push("+").unwrap() {
//!     Reassembly::Complete(challenge) => assert!(challenge.is_empty()),
//!     Reassembly::Partial => unreachable!(),
//! }
//! ```
//!
//! ### Driving a session
//!
//! The session talks to the connection through two small traits; the
//! embedder routes inbound `AUTHENTICATE` events and the SASL numerics to
//! the session's handlers.
//!
//! ```rust
//! use std::time::Duration;
//! use slirc_sasl::{
//!     Mechanism, SaslAdapter, SaslSession, TimerHandle, TimerService,
//!     RPL_SASLSUCCESS,
//! };
//!
//! struct Conn {
//!     sent: Vec<String>,
//!     cap_done: bool,
//! }
//!
//! impl SaslAdapter for Conn {
//!     fn send_line_immediate(&mut self, line: &str) {
//!         self.sent.push(line.to_string());
//!     }
//!     fn finish_cap(&mut self) {
//!         self.cap_done = true;
//!     }
//!     fn emit_success(&mut self) {}
//!     fn emit_failure(&mut self, _reason: &str) {}
//! }
//!
//! impl TimerService for Conn {
//!     fn schedule(&mut self, _delay: Duration) -> TimerHandle {
//!         TimerHandle::new(0)
//!     }
//!     fn cancel(&mut self, _handle: TimerHandle) {}
//! }
//!
//! let mut conn = Conn { sent: Vec::new(), cap_done: false };
//! let mut session = SaslSession::new(Mechanism::plain("alice", "hunter2"));
//!
//! // The server acknowledged the `sasl` capability.
//! session.start(&mut conn);
//! assert_eq!(conn.sent.last().unwrap(), "AUTHENTICATE PLAIN");
//!
//! // The server sent the empty challenge.
//! session.handle_authenticate("+", &mut conn);
//! assert_eq!(
//!     conn.sent.last().unwrap(),
//!     "AUTHENTICATE YWxpY2UAYWxpY2UAaHVudGVyMg=="
//! );
//!
//! // The server confirmed; the session concludes CAP negotiation.
//! session.handle_numeric(RPL_SASLSUCCESS, &["alice", "ok"], &mut conn);
//! assert!(conn.cap_done);
//! assert!(session.state().is_terminal());
//! ```

pub mod adapter;
pub mod chunk;
pub mod error;
pub mod mechanism;
pub mod session;
#[cfg(feature = "tokio")]
pub mod timer;

pub use self::adapter::{SaslAdapter, TimerHandle, TimerService};
pub use self::chunk::{
    encode_response, Reassembler, Reassembly, SASL_CHUNK_SIZE, SASL_MAX_ENCODED,
};
pub use self::error::FramingError;
pub use self::mechanism::{Mechanism, SecureString};
pub use self::session::{
    SaslSession, SaslState, ERR_NICKLOCKED, ERR_SASLABORTED, ERR_SASLALREADY, ERR_SASLFAIL,
    ERR_SASLTOOLONG, RPL_SASLSUCCESS, SASL_TIMEOUT,
};
#[cfg(feature = "tokio")]
pub use self::timer::TokioTimerService;
