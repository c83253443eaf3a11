use bookmark_core::{Bookmark, User};
use serde_json::json;

#[test]
fn user_serializes_with_plain_field_names() {
    let user = User {
        id: 1,
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    };

    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(
        value,
        json!({"id": 1, "name": "Ada", "email": "ada@example.com"})
    );
}

#[test]
fn bookmark_deserializes_from_json_snapshot() {
    let bookmark: Bookmark = serde_json::from_value(json!({
        "id": 3,
        "user_id": 1,
        "title": "Go Docs",
        "url": "https://go.dev",
        "created_at": 1_704_164_645_678_i64,
    }))
    .unwrap();

    assert_eq!(bookmark.title, "Go Docs");
    assert_eq!(bookmark.created_at_display(), "2024-01-02T03:04:05Z");
}
