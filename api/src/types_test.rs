use super::*;
use serde_json::json;

#[test]
fn recruitment_detail_decodes_circle_area_and_comments() {
    let data: RecruitmentData = serde_json::from_value(json!({
        "id": 7,
        "title": "Beach cleanup",
        "description": "Saturday morning",
        "dueDate": "2024-05-15",
        "imageUrls": ["https://cdn/x.png"],
        "user": { "id": 3, "nickname": "mina", "profileImageUrl": null },
        "comments": [
            { "id": 1, "content": "count me in", "createdAt": "2024-05-01",
              "user": { "id": "4", "nickname": "jun" } }
        ],
        "joinCount": 5,
        "isJoined": true,
        "area": { "type": "CIRCLE", "center": { "latitude": 35.1, "longitude": 129.0 },
                  "radius": 250.0, "points": null }
    }))
    .expect("decode");

    assert_eq!(data.user.id, "3");
    assert_eq!(data.comments[0].user.id, "4");
    assert!(data.is_joined);
    let area = data.area.expect("area");
    assert_eq!(area.kind, Some(AreaType::Circle));
    assert_eq!(area.radius, Some(250.0));
    assert_eq!(area.points, None);
}

#[test]
fn recruitment_detail_tolerates_missing_optional_collections() {
    let data: RecruitmentData = serde_json::from_value(json!({
        "id": 1, "title": "t", "description": "d", "dueDate": "2024-06-01",
        "user": { "id": 1, "nickname": "n" }, "joinCount": 0
    }))
    .expect("decode");
    assert!(data.image_urls.is_empty());
    assert!(data.comments.is_empty());
    assert!(data.area.is_none());
}

#[test]
fn create_recruitment_request_serializes_null_area() {
    let request = CreateRecruitmentRequest {
        title: "t".to_owned(),
        description: "d".to_owned(),
        due_date: "2024-06-01".to_owned(),
        area: None,
    };
    let value = serde_json::to_value(&request).expect("encode");
    assert_eq!(value, json!({ "title": "t", "description": "d", "dueDate": "2024-06-01", "area": null }));
}

#[test]
fn polygon_area_serializes_with_type_tag() {
    let area = Area::polygon(vec![
        Point { latitude: 1.0, longitude: 2.0 },
        Point { latitude: 3.0, longitude: 4.0 },
    ]);
    let value = serde_json::to_value(&area).expect("encode");
    assert_eq!(value["type"], "POLYGON");
    assert_eq!(value["center"], serde_json::Value::Null);
    assert_eq!(value["points"][1]["longitude"], 4.0);
}

#[test]
fn community_post_list_item_decodes() {
    let post: CommunityPost = serde_json::from_value(json!({
        "id": 2, "createdAt": "2024-05-02", "title": "Plogging", "description": "went plogging",
        "imageUrls": [], "likeCount": 10, "commentCount": 3,
        "user": { "id": 9, "nickname": "eco" }, "isLiked": false
    }))
    .expect("decode");
    assert_eq!(post.like_count, 10);
    assert_eq!(post.user.nickname, "eco");
}

#[test]
fn access_token_response_reads_error_message() {
    let response: AccessTokenResponse = serde_json::from_value(json!({
        "accessToken": "", "refreshToken": "", "errorMessage": "wrong password"
    }))
    .expect("decode");
    assert_eq!(response.error_message.as_deref(), Some("wrong password"));
}

#[test]
fn chat_request_uses_lowercase_roles() {
    let value = serde_json::to_value(ChatRequest { role: ChatRole::Assistant, content: "hi".to_owned() })
        .expect("encode");
    assert_eq!(value, json!({ "role": "assistant", "content": "hi" }));
}
