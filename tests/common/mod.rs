//! Shared harness: a recording connection implementing the session's
//! collaborator traits so tests can assert on observable traffic.

#![allow(dead_code)]

use std::time::Duration;

use slirc_sasl::{SaslAdapter, TimerHandle, TimerService};

/// One observable effect the session had on the connection, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    Line(String),
    FinishCap,
    Success,
    Failure(String),
}

/// Recording stand-in for the IRC connection and its timer wheel.
#[derive(Debug, Default)]
pub struct Harness {
    pub observed: Vec<Observed>,
    next_timer: u64,
    pub scheduled: Vec<TimerHandle>,
    pub cancelled: Vec<TimerHandle>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `AUTHENTICATE` (and other) lines written so far.
    pub fn lines(&self) -> Vec<&str> {
        self.observed
            .iter()
            .filter_map(|event| match event {
                Observed::Line(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Outcome signals, in emission order.
    pub fn outcomes(&self) -> Vec<&Observed> {
        self.observed
            .iter()
            .filter(|event| matches!(event, Observed::Success | Observed::Failure(_)))
            .collect()
    }

    pub fn finish_cap_count(&self) -> usize {
        self.observed
            .iter()
            .filter(|event| matches!(event, Observed::FinishCap))
            .count()
    }

    /// Timers scheduled and not (yet) cancelled.
    pub fn pending_timers(&self) -> usize {
        self.scheduled
            .iter()
            .filter(|handle| !self.cancelled.contains(handle))
            .count()
    }
}

impl SaslAdapter for Harness {
    fn send_line_immediate(&mut self, line: &str) {
        self.observed.push(Observed::Line(line.to_owned()));
    }

    fn finish_cap(&mut self) {
        self.observed.push(Observed::FinishCap);
    }

    fn emit_success(&mut self) {
        self.observed.push(Observed::Success);
    }

    fn emit_failure(&mut self, reason: &str) {
        self.observed.push(Observed::Failure(reason.to_owned()));
    }
}

impl TimerService for Harness {
    fn schedule(&mut self, _delay: Duration) -> TimerHandle {
        let handle = TimerHandle::new(self.next_timer);
        self.next_timer += 1;
        self.scheduled.push(handle);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.cancelled.push(handle);
    }
}
