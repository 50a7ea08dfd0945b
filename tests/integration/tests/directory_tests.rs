//! Room directory REST API tests

use anyhow::Result;
use integration_tests::{ada, lin, omar, TestApp};
use serde_json::{json, Value};

#[tokio::test]
async fn directory_requires_a_valid_bearer_token() -> Result<()> {
    let app = TestApp::spawn(&[ada()]).await?;

    let response = app.client.get(format!("{}/api/rooms", app.base_url())).send().await?;
    assert_eq!(response.status(), 401);

    let response = app.get_auth("/api/rooms", "garbage-token").await?;
    assert_eq!(response.status(), 401);
    Ok(())
}

#[tokio::test]
async fn health_needs_no_auth() -> Result<()> {
    let app = TestApp::spawn(&[]).await?;

    let response = app.client.get(format!("{}/health", app.base_url())).send().await?;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await?, "OK");
    Ok(())
}

#[tokio::test]
async fn create_room_always_includes_the_owner() -> Result<()> {
    let app = TestApp::spawn(&[ada(), lin()]).await?;
    let token = app.token_for(ada().id);

    let response = app
        .post_auth(
            "/api/rooms",
            &token,
            &json!({"name": "ops", "isPrivate": true, "participantIds": [lin().id.to_string()]}),
        )
        .await?;
    assert_eq!(response.status(), 201);

    let room: Value = response.json().await?;
    assert_eq!(room["isPrivate"], true);
    assert_eq!(room["ownerId"], ada().id.to_string());

    let participants = room["participantIds"].as_array().unwrap();
    assert_eq!(participants.len(), 2);
    assert!(participants.contains(&json!(ada().id.to_string())));
    assert!(participants.contains(&json!(lin().id.to_string())));
    Ok(())
}

#[tokio::test]
async fn create_room_rejects_blank_names() -> Result<()> {
    let app = TestApp::spawn(&[ada()]).await?;
    let token = app.token_for(ada().id);

    let response = app.post_auth("/api/rooms", &token, &json!({"name": "   "})).await?;
    assert_eq!(response.status(), 400);
    Ok(())
}

#[tokio::test]
async fn create_room_rejects_duplicate_names() -> Result<()> {
    let app = TestApp::spawn(&[ada()]).await?;
    let token = app.token_for(ada().id);

    let response = app.post_auth("/api/rooms", &token, &json!({"name": "ops"})).await?;
    assert_eq!(response.status(), 201);

    let response = app.post_auth("/api/rooms", &token, &json!({"name": "ops"})).await?;
    assert_eq!(response.status(), 409);
    Ok(())
}

#[tokio::test]
async fn room_listing_respects_visibility_and_orders_newest_first() -> Result<()> {
    let app = TestApp::spawn(&[ada(), lin()]).await?;
    let token_a = app.token_for(ada().id);
    let token_b = app.token_for(lin().id);

    app.post_auth("/api/rooms", &token_a, &json!({"name": "announcements"}))
        .await?;
    app.post_auth(
        "/api/rooms",
        &token_a,
        &json!({"name": "ops", "isPrivate": true}),
    )
    .await?;

    // The owner sees both, newest first
    let rooms: Vec<Value> = app.get_auth("/api/rooms", &token_a).await?.json().await?;
    let names: Vec<&str> = rooms.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["ops", "announcements"]);

    // A non-participant only sees the public room
    let rooms: Vec<Value> = app.get_auth("/api/rooms", &token_b).await?.json().await?;
    let names: Vec<&str> = rooms.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["announcements"]);
    Ok(())
}

#[tokio::test]
async fn identity_listing_returns_everyone() -> Result<()> {
    let app = TestApp::spawn(&[omar(), ada(), lin()]).await?;
    let token = app.token_for(ada().id);

    let identities: Vec<Value> = app
        .get_auth("/api/identities", &token)
        .await?
        .json()
        .await?;

    let names: Vec<&str> = identities
        .iter()
        .map(|i| i["displayName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["ada", "lin", "omar"]);

    // Colors surface when present
    assert_eq!(identities[0]["displayColor"], "#7c3aed");
    Ok(())
}
