use super::*;

#[test]
fn transcript_starts_with_greeting() {
    let transcript = ChatTranscript::default();
    assert_eq!(transcript.messages().len(), 1);
    assert_eq!(transcript.messages()[0].sender, Sender::Bot);
    assert_eq!(transcript.messages()[0].text, GREETING);
    assert!(transcript.as_requests().is_empty());
}

#[test]
fn blank_user_input_is_ignored() {
    let mut transcript = ChatTranscript::default();
    assert!(!transcript.push_user("   "));
    assert_eq!(transcript.messages().len(), 1);
}

#[test]
fn as_requests_maps_senders_to_roles_and_trims() {
    let mut transcript = ChatTranscript::default();
    assert!(transcript.push_user("  where do batteries go?  "));
    transcript.push_bot("Drop them at a collection box.");

    let requests = transcript.as_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].role, ChatRole::User);
    assert_eq!(requests[0].content, "where do batteries go?");
    assert_eq!(requests[1].role, ChatRole::Assistant);
}
