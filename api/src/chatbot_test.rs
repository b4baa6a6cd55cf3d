use super::*;
use crate::client::test_helpers::{ScriptedTransport, client_with};
use crate::transport::RequestBody;
use crate::types::ChatRole;
use serde_json::json;

#[tokio::test]
async fn chat_posts_conversation_and_reads_reply() {
    let transport = ScriptedTransport::json(200, &json!({ "content": "Rinse the can first." }));
    let client = client_with(transport.clone());
    let conversation = vec![ChatRequest { role: ChatRole::User, content: "How do I recycle cans?".to_owned() }];

    let reply = client.chat(&conversation).await.expect("chat");
    assert_eq!(reply.content, "Rinse the can first.");

    let seen = transport.seen();
    assert_eq!(seen[0].url, "http://api.test/api/v1/chatbots");
    assert_eq!(
        seen[0].body,
        RequestBody::Json(json!([{ "role": "user", "content": "How do I recycle cans?" }]))
    );
}
