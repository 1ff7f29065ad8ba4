//! Collaborator traits binding a session to its embedding connection.
//!
//! The session performs no I/O of its own. The embedder supplies the IRC
//! send path, CAP conclusion, outcome signals, and a timer service, then
//! delivers inbound events by calling the session's handlers. Everything
//! runs on one logical thread; no method here may block.

use std::time::Duration;

/// Opaque identifier for a scheduled timeout.
///
/// Minted by a [`TimerService`]. The session holds at most one live handle
/// at a time and passes it back to [`TimerService::cancel`] when the timer
/// is no longer wanted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Create a handle with the given identifier.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Connection-side operations a SASL session needs from its embedder.
///
/// The embedder should dispatch `AUTHENTICATE` events and the SASL
/// numerics to the session before any other observer, so the session sees
/// them with its state intact.
pub trait SaslAdapter {
    /// Write one IRC line on the immediate-send path.
    ///
    /// Bypasses any outbound queue so `AUTHENTICATE` traffic is never
    /// interleaved with commands the application has enqueued.
    fn send_line_immediate(&mut self, line: &str);

    /// Conclude the enclosing CAP negotiation.
    fn finish_cap(&mut self);

    /// Observable outcome signal: authentication succeeded.
    fn emit_success(&mut self);

    /// Observable outcome signal: authentication failed, with a
    /// human-readable reason.
    fn emit_failure(&mut self, reason: &str);
}

/// One-shot timeout scheduling.
///
/// A fired timer is delivered back to the session as an event by the
/// embedder (see [`SaslSession::handle_timeout`]); it never interrupts a
/// handler in progress. [`cancel`] is idempotent: cancelling a handle that
/// already fired or was already cancelled is a no-op, and no fire may be
/// observed after a cancel returns.
///
/// [`SaslSession::handle_timeout`]: crate::session::SaslSession::handle_timeout
/// [`cancel`]: TimerService::cancel
pub trait TimerService {
    /// Arm a one-shot timer that fires once `delay` has elapsed.
    fn schedule(&mut self, delay: Duration) -> TimerHandle;

    /// Disarm a previously scheduled timer.
    fn cancel(&mut self, handle: TimerHandle);
}
