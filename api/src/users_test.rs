use super::*;
use crate::client::test_helpers::{ScriptedTransport, client_with};
use crate::transport::RequestBody;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::json;

fn identity_token() -> String {
    let body = URL_SAFE_NO_PAD.encode(
        json!({
            "email": "mina@greenmate.kr",
            "userId": "42",
            "nickname": "mina",
            "profileImageUrl": "https://cdn/p.png"
        })
        .to_string(),
    );
    format!("h.{body}.s")
}

#[tokio::test]
async fn login_success_stores_token_and_authenticates() {
    let transport = ScriptedTransport::json(200, &json!({ "accessToken": "a.b.c", "refreshToken": "x" }));
    let client = client_with(transport.clone());

    let claims = client.login("mina@greenmate.kr", "pw").await.expect("login");
    assert_eq!(claims, None, "a.b.c carries no decodable identity");
    assert_eq!(client.session().access_token().expect("read").as_deref(), Some("a.b.c"));
    assert_eq!(client.session().refresh_token().expect("read").as_deref(), Some("x"));
    assert!(client.session().is_authenticated().expect("read"));

    let seen = transport.seen();
    assert_eq!(seen[0].url, "http://api.test/api/v1/users/login");
    assert_eq!(seen[0].body, RequestBody::Json(json!({ "email": "mina@greenmate.kr", "password": "pw" })));
    assert_eq!(seen[0].header("Authorization"), None);
}

#[tokio::test]
async fn login_token_is_attached_to_next_authorized_call() {
    let token = identity_token();
    let transport = ScriptedTransport::new(vec![
        Ok(HttpResponse {
            status: 200,
            body: json!({ "accessToken": &token, "refreshToken": "r" }).to_string().into_bytes(),
        }),
        Ok(HttpResponse { status: 200, body: b"[]".to_vec() }),
    ]);
    let client = client_with(transport.clone());

    let claims = client.login("mina@greenmate.kr", "pw").await.expect("login").expect("claims");
    assert_eq!(claims.nickname, "mina");
    assert_eq!(client.current_user().expect("user"), Some(claims));

    client.team_list().await.expect("teams");
    let expected = format!("Bearer {token}");
    assert_eq!(transport.seen()[1].header("Authorization"), Some(expected.as_str()));
}

#[tokio::test]
async fn login_rejection_surfaces_error_message_and_stores_nothing() {
    let transport = ScriptedTransport::json(
        400,
        &json!({ "accessToken": "", "refreshToken": "", "errorMessage": "wrong password" }),
    );
    let client = client_with(transport);

    let err = client.login("a@b.c", "bad").await.expect_err("rejected");
    assert!(matches!(err, ApiError::Rejected { status: 400, ref message } if message == "wrong password"));
    assert!(!client.session().is_authenticated().expect("read"));
}

#[tokio::test]
async fn login_non_200_success_status_is_rejected() {
    let client = client_with(ScriptedTransport::json(201, &json!({ "accessToken": "a.b.c", "refreshToken": "x" })));
    let err = client.login("a@b.c", "pw").await.expect_err("only 200 is accepted");
    assert!(matches!(err, ApiError::Rejected { status: 201, .. }));
    assert!(!client.session().is_authenticated().expect("read"));
}

#[tokio::test]
async fn login_server_error_maps_to_server() {
    let client = client_with(ScriptedTransport::status(500));
    let err = client.login("a@b.c", "pw").await.expect_err("5xx");
    assert!(matches!(err, ApiError::Server { status: 500 }));
}

#[tokio::test]
async fn sign_up_created_sends_multipart_and_stores_tokens() {
    let transport = ScriptedTransport::json(201, &json!({ "accessToken": identity_token(), "refreshToken": "r" }));
    let client = client_with(transport.clone());
    let request = SignUpRequest {
        nickname: "mina".to_owned(),
        email: "mina@greenmate.kr".to_owned(),
        password: "pw".to_owned(),
    };
    let image = Upload { file_name: "me.png".to_owned(), content_type: "image/png".to_owned(), bytes: vec![1, 2] };

    let claims = client.sign_up(&request, Some(image.clone())).await.expect("sign up").expect("claims");
    assert_eq!(claims.user_id, "42");
    assert!(client.session().is_authenticated().expect("read"));
    assert_eq!(client.session().refresh_token().expect("read").as_deref(), Some("r"));

    let seen = transport.seen();
    assert_eq!(seen[0].url, "http://api.test/api/v1/users");
    let RequestBody::Multipart(parts) = &seen[0].body else {
        panic!("expected multipart body");
    };
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], Part::json("signUpRequest", &request).expect("part"));
    assert_eq!(parts[1], Part::file("profileImage", image));
}

#[tokio::test]
async fn sign_up_created_with_opaque_token_is_authenticated() {
    let client = client_with(ScriptedTransport::json(201, &json!({ "accessToken": "a.b.c", "refreshToken": "x" })));
    let request = SignUpRequest { nickname: "n".to_owned(), email: "e".to_owned(), password: "p".to_owned() };

    let claims = client.sign_up(&request, None).await.expect("201 is the sign-up success status");
    assert_eq!(claims, None);
    assert_eq!(client.session().access_token().expect("read").as_deref(), Some("a.b.c"));
    assert!(client.session().is_authenticated().expect("read"));
}

#[tokio::test]
async fn sign_up_ok_status_is_rejected() {
    let client = client_with(ScriptedTransport::json(200, &json!({ "accessToken": "a.b.c", "refreshToken": "x" })));
    let request = SignUpRequest { nickname: "n".to_owned(), email: "e".to_owned(), password: "p".to_owned() };

    let err = client.sign_up(&request, None).await.expect_err("sign-up expects 201");
    assert!(matches!(err, ApiError::Rejected { status: 200, .. }));
    assert!(!client.session().is_authenticated().expect("read"));
}

#[test]
fn sign_up_without_image_sends_single_part() {
    let request = SignUpRequest { nickname: "n".to_owned(), email: "e".to_owned(), password: "p".to_owned() };
    let parts = sign_up_parts(&request, None).expect("parts");
    assert_eq!(parts.len(), 1);
    let Part::Text { name, value } = &parts[0] else {
        panic!("expected text part");
    };
    assert_eq!(name, "signUpRequest");
    assert_eq!(serde_json::from_str::<serde_json::Value>(value).expect("json")["nickname"], "n");
}

#[tokio::test]
async fn nickname_check_sends_query_and_reads_flag() {
    let transport = ScriptedTransport::json(200, &json!({ "isDuplicate": true }));
    let client = client_with(transport.clone());
    assert!(client.check_nickname_duplicate("mina").await.expect("check"));
    let seen = transport.seen();
    assert_eq!(seen[0].url, "http://api.test/api/v1/users/nickname-duplicate");
    assert_eq!(seen[0].query, vec![("nickname".to_owned(), "mina".to_owned())]);
}

#[test]
fn logout_clears_both_tokens() {
    let client = client_with(ScriptedTransport::new(Vec::new()));
    client.session().store_tokens("a.b.c", "x").expect("seed");
    client.logout().expect("logout");
    assert_eq!(client.session().access_token().expect("read"), None);
    assert_eq!(client.session().refresh_token().expect("read"), None);
    assert_eq!(client.current_user().expect("user"), None);
}
