use super::*;

fn client_with_session(session: Session) -> ApiClient {
    let config = ApiConfig::new("http://localhost:8080").expect("config");
    ApiClient::new(&config, session).expect("client")
}

// =============================================================================
// CliReload
// =============================================================================

#[test]
fn reload_notice_is_taken_once() {
    let reload = CliReload::default();
    assert!(reload.take_notice());
    assert!(!reload.take_notice());
    assert!(!reload.take_notice());
}

#[test]
fn repeated_reloads_latch_fired() {
    let reload = CliReload::default();
    reload.reload();
    reload.reload();
    assert!(reload.fired.load(Ordering::SeqCst));
    assert!(!reload.take_notice(), "notice already shown by the first reload");
}

// =============================================================================
// require_login
// =============================================================================

#[test]
fn require_login_refuses_empty_session() {
    let client = client_with_session(Session::in_memory());
    assert!(matches!(require_login(&client), Err(CliError::NotLoggedIn)));
}

#[test]
fn require_login_accepts_opaque_stored_token() {
    let session = Session::in_memory();
    session.store_tokens("a.b.c", "x").expect("seed");
    let client = client_with_session(session);
    assert!(require_login(&client).is_ok());
}

#[test]
fn require_login_refuses_after_logout() {
    let session = Session::in_memory();
    session.store_tokens("a.b.c", "x").expect("seed");
    let client = client_with_session(session);
    client.logout().expect("logout");
    assert!(matches!(require_login(&client), Err(CliError::NotLoggedIn)));
}

// =============================================================================
// Chat REPL error handling
// =============================================================================

#[test]
fn chat_stops_when_session_ended() {
    assert_eq!(after_chat_error(&ApiError::Unauthorized), ChatFlow::Stop);
    assert_eq!(after_chat_error(&ApiError::Forbidden), ChatFlow::Stop);
    assert_eq!(after_chat_error(&ApiError::Network("connection reset".to_owned())), ChatFlow::Stop);
}

#[test]
fn chat_continues_on_other_errors() {
    assert_eq!(after_chat_error(&ApiError::NotFound), ChatFlow::Continue);
    assert_eq!(after_chat_error(&ApiError::Server { status: 502 }), ChatFlow::Continue);
    assert_eq!(
        after_chat_error(&ApiError::Rejected { status: 400, message: "too long".to_owned() }),
        ChatFlow::Continue
    );
    assert_eq!(after_chat_error(&ApiError::InvalidRequest("bad header".to_owned())), ChatFlow::Continue);
}
