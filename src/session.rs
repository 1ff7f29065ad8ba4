//! The client-side SASL session state machine.
//!
//! Drives the IRCv3 `AUTHENTICATE` exchange for one connection: announces
//! the mechanism once the server acknowledges the `sasl` capability,
//! reassembles fragmented challenges, answers them, and settles on the
//! outcome numerics, a timeout, or a framing violation. Every settling
//! path concludes CAP negotiation exactly once and reports exactly one
//! outcome; a disconnect releases resources silently.

use std::time::Duration;

use tracing::{debug, info, warn};
use zeroize::Zeroize;

use crate::adapter::{SaslAdapter, TimerHandle, TimerService};
use crate::chunk::{encode_response, Reassembler, Reassembly};
use crate::mechanism::Mechanism;

/// `ERR_NICKLOCKED` (902): authentication failed because the nick is
/// locked.
pub const ERR_NICKLOCKED: u16 = 902;
/// `RPL_SASLSUCCESS` (903): authentication succeeded.
pub const RPL_SASLSUCCESS: u16 = 903;
/// `ERR_SASLFAIL` (904): the server rejected the credentials.
pub const ERR_SASLFAIL: u16 = 904;
/// `ERR_SASLTOOLONG` (905): the response exceeded the server's limits.
pub const ERR_SASLTOOLONG: u16 = 905;
/// `ERR_SASLABORTED` (906): the exchange was aborted.
pub const ERR_SASLABORTED: u16 = 906;
/// `ERR_SASLALREADY` (907): the connection has already authenticated.
pub const ERR_SASLALREADY: u16 = 907;

/// Time allowed between an outbound step and the server's next reaction.
pub const SASL_TIMEOUT: Duration = Duration::from_millis(20_000);

const TIMEOUT_REASON: &str = "The authentication timed out";
const INVALID_PAYLOAD_REASON: &str = "The server sent an invalid payload";

/// Lifecycle of one SASL exchange.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaslState {
    /// Created; the `sasl` capability has not been acknowledged yet.
    #[default]
    Idle,
    /// Mechanism announced; exchanging `AUTHENTICATE` traffic.
    AwaitingChallenge,
    /// Settled; all further SASL events for this session are ignored.
    Terminated,
}

impl SaslState {
    /// Whether the exchange has settled.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Terminated)
    }
}

/// Per-connection state for one SASL exchange.
///
/// The session owns the reassembly buffer and the pending timer handle for
/// its whole lifetime; collaborators only see the events the embedder
/// routes in and the calls the session makes on its context. The context
/// type `C` is whatever the embedder uses to implement [`SaslAdapter`] and
/// [`TimerService`].
#[derive(Debug)]
pub struct SaslSession {
    mechanism: Mechanism,
    reassembler: Reassembler,
    timer: Option<TimerHandle>,
    state: SaslState,
}

impl SaslSession {
    /// Create a session for one connection, configured before the
    /// capability is acknowledged.
    #[must_use]
    pub fn new(mechanism: Mechanism) -> Self {
        Self {
            mechanism,
            reassembler: Reassembler::new(),
            timer: None,
            state: SaslState::Idle,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SaslState {
        self.state
    }

    /// The mechanism this session authenticates with.
    #[must_use]
    pub fn mechanism(&self) -> &Mechanism {
        &self.mechanism
    }

    /// The server acknowledged the `sasl` capability: announce the
    /// mechanism and start the response timer.
    pub fn start<C>(&mut self, ctx: &mut C)
    where
        C: SaslAdapter + TimerService,
    {
        if self.state != SaslState::Idle {
            debug!(state = ?self.state, "sasl start ignored");
            return;
        }

        ctx.send_line_immediate(&format!("AUTHENTICATE {}", self.mechanism.name()));
        self.arm_timer(ctx);
        self.state = SaslState::AwaitingChallenge;
        debug!(mechanism = %self.mechanism, "sasl exchange started");
    }

    /// Inbound `AUTHENTICATE` event; `fragment` is the command's
    /// parameter, possibly the lone `+`.
    pub fn handle_authenticate<C>(&mut self, fragment: &str, ctx: &mut C)
    where
        C: SaslAdapter + TimerService,
    {
        if self.state != SaslState::AwaitingChallenge {
            debug!(state = ?self.state, "sasl challenge ignored");
            return;
        }

        self.cancel_timer(ctx);

        match self.reassembler.push(fragment) {
            Ok(Reassembly::Partial) => {
                debug!(
                    chunk_len = fragment.len(),
                    total_len = self.reassembler.buffered_len(),
                    "sasl: accumulated chunk, waiting for more"
                );
            }
            Ok(Reassembly::Complete(challenge)) => {
                debug!(challenge_len = challenge.len(), "sasl: challenge complete");
                self.answer(&challenge, ctx);
            }
            Err(err) => {
                warn!(error = %err, "sasl: rejecting server payload");
                self.abort(INVALID_PAYLOAD_REASON, ctx);
                return;
            }
        }

        // The window restarts for the server's next move.
        self.arm_timer(ctx);
    }

    /// Inbound SASL outcome numeric (902 through 907).
    ///
    /// `args` are the numeric's parameters; the failure numerics carry the
    /// human-readable error as the parameter after the client target.
    pub fn handle_numeric<C>(&mut self, code: u16, args: &[&str], ctx: &mut C)
    where
        C: SaslAdapter + TimerService,
    {
        if self.state != SaslState::AwaitingChallenge {
            debug!(code, state = ?self.state, "sasl numeric ignored");
            return;
        }

        match code {
            RPL_SASLSUCCESS => {
                self.cancel_timer(ctx);
                self.settle();
                info!("sasl authentication successful");
                ctx.emit_success();
                ctx.finish_cap();
            }
            ERR_SASLALREADY => {
                self.cancel_timer(ctx);
                self.settle();
                debug!("sasl: connection was already authenticated");
                ctx.emit_success();
                ctx.finish_cap();
            }
            ERR_NICKLOCKED | ERR_SASLFAIL | ERR_SASLTOOLONG | ERR_SASLABORTED => {
                self.cancel_timer(ctx);
                self.settle();
                let reason = args.get(1).copied().unwrap_or("unknown error");
                warn!(code, reason = %reason, "sasl authentication failed");
                ctx.emit_failure(reason);
                ctx.finish_cap();
            }
            _ => {
                debug!(code, "sasl: unrelated numeric ignored");
            }
        }
    }

    /// The response timer fired: give up on the exchange.
    pub fn handle_timeout<C>(&mut self, ctx: &mut C)
    where
        C: SaslAdapter + TimerService,
    {
        if self.state != SaslState::AwaitingChallenge {
            debug!(state = ?self.state, "sasl timeout ignored");
            return;
        }

        // The timer has already fired; there is nothing left to cancel.
        self.timer = None;
        self.settle();
        warn!("sasl authentication timed out");
        ctx.send_line_immediate("AUTHENTICATE *");
        ctx.finish_cap();
        ctx.emit_failure(TIMEOUT_REASON);
    }

    /// The connection dropped: release the timer and any partial payload.
    ///
    /// No outcome is emitted and CAP is not concluded; the transport
    /// reports the loss on its own channel.
    pub fn handle_disconnect<C>(&mut self, ctx: &mut C)
    where
        C: TimerService,
    {
        self.cancel_timer(ctx);
        self.reassembler.clear();
        self.state = SaslState::Terminated;
        debug!("sasl session torn down on disconnect");
    }

    /// Answer a completed challenge with the mechanism's response.
    fn answer<C>(&mut self, challenge: &[u8], ctx: &mut C)
    where
        C: SaslAdapter,
    {
        let mut response = self.mechanism.respond(challenge);
        let mut chunks = encode_response(response.as_deref());
        for chunk in &chunks {
            ctx.send_line_immediate(&format!("AUTHENTICATE {chunk}"));
        }

        // The response and its encoding may carry credential material.
        if let Some(bytes) = response.as_mut() {
            bytes.zeroize();
        }
        for chunk in &mut chunks {
            chunk.zeroize();
        }
    }

    /// Terminate after a local failure: tell the server the exchange is
    /// over, unblock CAP, and report the reason.
    fn abort<C>(&mut self, reason: &str, ctx: &mut C)
    where
        C: SaslAdapter,
    {
        self.settle();
        ctx.send_line_immediate("AUTHENTICATE *");
        ctx.finish_cap();
        ctx.emit_failure(reason);
    }

    /// Enter the terminal state and drop any buffered payload.
    fn settle(&mut self) {
        self.reassembler.clear();
        self.state = SaslState::Terminated;
    }

    fn arm_timer<C: TimerService>(&mut self, ctx: &mut C) {
        self.timer = Some(ctx.schedule(SASL_TIMEOUT));
    }

    fn cancel_timer<C: TimerService>(&mut self, ctx: &mut C) {
        if let Some(handle) = self.timer.take() {
            ctx.cancel(handle);
        }
    }
}
