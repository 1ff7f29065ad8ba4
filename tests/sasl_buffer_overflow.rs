//! Hostile-server behavior: oversized payloads, garbage payloads,
//! timeouts, and post-settlement quiescence.

mod common;

use common::{Harness, Observed};
use slirc_sasl::{
    Mechanism, SaslSession, RPL_SASLSUCCESS, SASL_CHUNK_SIZE, SASL_MAX_ENCODED,
};

#[test]
fn oversized_challenge_is_aborted() {
    let mut conn = Harness::new();
    let mut session = SaslSession::new(Mechanism::plain("overflow", "secret"));

    session.start(&mut conn);

    // 21 full-size chunks total 8400 encoded bytes, past the 8192 cap.
    let chunk = "A".repeat(SASL_CHUNK_SIZE);
    assert!(20 * SASL_CHUNK_SIZE <= SASL_MAX_ENCODED);
    assert!(21 * SASL_CHUNK_SIZE > SASL_MAX_ENCODED);

    for _ in 0..20 {
        session.handle_authenticate(&chunk, &mut conn);
        // Still accumulating; nothing has been sent or decided.
        assert_eq!(conn.lines(), ["AUTHENTICATE PLAIN"]);
        assert!(conn.outcomes().is_empty());
    }

    session.handle_authenticate(&chunk, &mut conn);

    assert_eq!(conn.lines(), ["AUTHENTICATE PLAIN", "AUTHENTICATE *"]);
    assert_eq!(
        conn.outcomes(),
        [&Observed::Failure(
            "The server sent an invalid payload".to_string()
        )]
    );
    assert_eq!(conn.finish_cap_count(), 1);
    assert_eq!(conn.pending_timers(), 0);
    assert!(session.state().is_terminal());
}

#[test]
fn garbage_challenge_is_aborted() {
    let mut conn = Harness::new();
    let mut session = SaslSession::new(Mechanism::plain("alice", "hunter2"));

    session.start(&mut conn);
    session.handle_authenticate("!!! definitely not base64 !!!", &mut conn);

    assert_eq!(conn.lines(), ["AUTHENTICATE PLAIN", "AUTHENTICATE *"]);
    assert_eq!(
        conn.outcomes(),
        [&Observed::Failure(
            "The server sent an invalid payload".to_string()
        )]
    );
    assert_eq!(conn.finish_cap_count(), 1);
}

#[test]
fn silent_server_times_out() {
    let mut conn = Harness::new();
    let mut session = SaslSession::new(Mechanism::plain("alice", "hunter2"));

    session.start(&mut conn);
    assert_eq!(conn.pending_timers(), 1);

    session.handle_timeout(&mut conn);

    assert_eq!(conn.lines(), ["AUTHENTICATE PLAIN", "AUTHENTICATE *"]);
    assert_eq!(
        conn.outcomes(),
        [&Observed::Failure("The authentication timed out".to_string())]
    );
    assert_eq!(conn.finish_cap_count(), 1);
    assert!(session.state().is_terminal());
}

#[test]
fn settled_session_ignores_further_events() {
    let mut conn = Harness::new();
    let mut session = SaslSession::new(Mechanism::plain("alice", "hunter2"));

    session.start(&mut conn);
    session.handle_timeout(&mut conn);
    let settled = conn.observed.clone();

    // A late success numeric, challenge, or timer fire changes nothing.
    session.handle_numeric(RPL_SASLSUCCESS, &["alice", "ok"], &mut conn);
    session.handle_authenticate("+", &mut conn);
    session.handle_timeout(&mut conn);

    assert_eq!(conn.observed, settled);
    assert_eq!(conn.finish_cap_count(), 1);
    assert_eq!(conn.outcomes().len(), 1);
}

#[test]
fn disconnect_releases_resources_silently() {
    let mut conn = Harness::new();
    let mut session = SaslSession::new(Mechanism::plain("alice", "hunter2"));

    session.start(&mut conn);
    // A partial challenge is in flight when the connection drops.
    session.handle_authenticate(&"A".repeat(SASL_CHUNK_SIZE), &mut conn);
    session.handle_disconnect(&mut conn);

    assert!(conn.outcomes().is_empty());
    assert_eq!(conn.finish_cap_count(), 0);
    assert_eq!(conn.pending_timers(), 0);
    assert!(session.state().is_terminal());
}
