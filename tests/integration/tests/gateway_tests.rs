//! End-to-end gateway tests over in-memory stores
//!
//! Each test spawns a real server, connects real WebSocket clients, and
//! observes the event protocol exactly as a browser client would.

use anyhow::{bail, Result};
use huddle_core::{MessageStore, Snowflake};
use integration_tests::{
    ada, bare_frame, join_frame, lin, omar, react_frame, send_frame, TestApp, WsClient,
};
use serde_json::{json, Value};

/// Collect frames up to and including the first with the given event name
async fn collect_until(client: &mut WsClient, event: &str) -> Result<Vec<Value>> {
    let mut frames = Vec::new();
    loop {
        match client.recv().await? {
            Some(frame) => {
                let done = frame["event"] == event;
                frames.push(frame);
                if done {
                    return Ok(frames);
                }
            }
            None => bail!("Connection closed while collecting until `{event}`"),
        }
    }
}

// ============================================================================
// Handshake / authentication
// ============================================================================

#[tokio::test]
async fn connect_without_token_closes_without_events() -> Result<()> {
    let app = TestApp::spawn(&[ada()]).await?;

    let mut client = WsClient::connect(&format!("ws://{}/gateway", app.addr)).await?;
    client.expect_closed_without_events().await
}

#[tokio::test]
async fn connect_with_invalid_token_closes_without_events() -> Result<()> {
    let app = TestApp::spawn(&[ada()]).await?;

    let mut client = app.connect_raw("definitely-not-a-jwt").await?;
    client.expect_closed_without_events().await
}

#[tokio::test]
async fn connect_with_unknown_identity_closes_without_events() -> Result<()> {
    let app = TestApp::spawn(&[ada()]).await?;

    // Valid token for an identity the store has never seen
    let mut client = app.connect(Snowflake::new(404)).await?;
    client.expect_closed_without_events().await
}

#[tokio::test]
async fn connect_joins_general_and_replays_empty_history() -> Result<()> {
    let app = TestApp::spawn(&[ada()]).await?;

    let mut client = app.connect(ada().id).await?;
    let joined = client.recv_until("joined").await?;
    assert_eq!(joined["name"], "general");
    assert_eq!(joined["isPrivate"], false);
    assert_eq!(joined["historyEnabled"], true);

    let history = client.recv_until("history").await?;
    assert_eq!(history, json!([]));
    Ok(())
}

#[tokio::test]
async fn join_is_announced_to_existing_members() -> Result<()> {
    let app = TestApp::spawn(&[ada(), lin()]).await?;

    let mut client_a = app.connect(ada().id).await?;
    client_a.recv_until("history").await?;

    let _client_b = app.connect(lin().id).await?;

    let presence = client_a.recv_until("user-joined").await?;
    assert_eq!(presence["displayName"], "lin");
    Ok(())
}

// ============================================================================
// Message pipeline
// ============================================================================

#[tokio::test]
async fn send_trims_persists_and_broadcasts_to_everyone() -> Result<()> {
    let app = TestApp::spawn(&[ada(), lin()]).await?;

    let mut client_a = app.connect(ada().id).await?;
    client_a.recv_until("history").await?;
    let mut client_b = app.connect(lin().id).await?;
    client_b.recv_until("history").await?;

    client_a.send(send_frame("  hello  ")).await?;

    // Sender included in the fan-out
    let to_a = client_a.recv_until("new-message").await?;
    let to_b = client_b.recv_until("new-message").await?;
    for message in [&to_a, &to_b] {
        assert_eq!(message["content"], "hello");
        assert_eq!(message["sender"]["displayName"], "ada");
        assert_eq!(message["sender"]["displayColor"], "#7c3aed");
        assert_eq!(message["reactions"], json!([]));
    }

    let general = app.state.default_room_id().await.unwrap();
    assert_eq!(app.stores.message_contents(general), vec!["hello"]);
    Ok(())
}

#[tokio::test]
async fn empty_send_produces_no_event_and_no_store_write() -> Result<()> {
    let app = TestApp::spawn(&[ada()]).await?;

    let mut client = app.connect(ada().id).await?;
    client.recv_until("history").await?;

    client.send(send_frame("")).await?;
    client.send(send_frame("   ")).await?;
    client.send(send_frame("marker")).await?;

    // The first message to arrive is the marker: nothing was emitted for
    // the empty sends
    let message = client.recv_until("new-message").await?;
    assert_eq!(message["content"], "marker");
    assert_eq!(app.stores.message_count(), 1);
    Ok(())
}

// ============================================================================
// Reactions
// ============================================================================

#[tokio::test]
async fn duplicate_reaction_stores_and_broadcasts_exactly_once() -> Result<()> {
    let app = TestApp::spawn(&[ada(), lin()]).await?;

    let mut client_a = app.connect(ada().id).await?;
    client_a.recv_until("history").await?;
    let mut client_b = app.connect(lin().id).await?;
    client_b.recv_until("history").await?;

    client_a.send(send_frame("react to this")).await?;
    let message = client_b.recv_until("new-message").await?;
    let message_id = message["id"].clone();

    client_b.send(react_frame(&message_id, "👍")).await?;
    client_b.send(react_frame(&message_id, "👍")).await?;
    client_b.send(send_frame("done")).await?;

    let frames = collect_until(&mut client_a, "new-message").await?;
    let reaction_events: Vec<&Value> = frames
        .iter()
        .filter(|f| f["event"] == "reaction-added")
        .collect();

    assert_eq!(reaction_events.len(), 1);
    assert_eq!(reaction_events[0]["data"]["messageId"], message_id);
    assert_eq!(reaction_events[0]["data"]["reaction"]["emoji"], "👍");
    assert_eq!(
        reaction_events[0]["data"]["reaction"]["user"]["displayName"],
        "lin"
    );
    assert_eq!(app.stores.reaction_count(), 1);
    Ok(())
}

#[tokio::test]
async fn reaction_to_unknown_message_broadcasts_nothing() -> Result<()> {
    let app = TestApp::spawn(&[ada()]).await?;

    let mut client = app.connect(ada().id).await?;
    client.recv_until("history").await?;

    client
        .send(react_frame(&json!("999999"), "🎉"))
        .await?;
    client.send(send_frame("marker")).await?;

    let frames = collect_until(&mut client, "new-message").await?;
    assert!(frames.iter().all(|f| f["event"] != "reaction-added"));
    // The row exists; only the broadcast was skipped
    assert_eq!(app.stores.reaction_count(), 1);
    Ok(())
}

// ============================================================================
// Typing presence
// ============================================================================

#[tokio::test]
async fn typing_start_stop_roundtrip() -> Result<()> {
    let app = TestApp::spawn(&[ada(), lin()]).await?;

    let mut client_a = app.connect(ada().id).await?;
    client_a.recv_until("history").await?;
    let mut client_b = app.connect(lin().id).await?;
    client_b.recv_until("history").await?;

    client_a.send(bare_frame("typing-start")).await?;
    assert_eq!(client_b.recv_until("typing").await?, json!(["ada"]));

    client_a.send(bare_frame("typing-stop")).await?;
    assert_eq!(client_b.recv_until("typing").await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn typing_stop_without_start_still_broadcasts() -> Result<()> {
    let app = TestApp::spawn(&[ada(), lin()]).await?;

    let mut client_a = app.connect(ada().id).await?;
    client_a.recv_until("history").await?;
    let mut client_b = app.connect(lin().id).await?;
    client_b.recv_until("history").await?;

    client_a.send(bare_frame("typing-stop")).await?;
    assert_eq!(client_b.recv_until("typing").await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn disconnect_emits_user_left_and_clears_typing() -> Result<()> {
    // Typing flags have no server-side expiry by design: disconnect
    // cleanup is the only collector, so a delayed disconnect leaves the
    // flag visible until the transport notices. This test exercises the
    // cleanup itself.
    let app = TestApp::spawn(&[ada(), lin()]).await?;

    let mut client_a = app.connect(ada().id).await?;
    client_a.recv_until("history").await?;
    let mut client_b = app.connect(lin().id).await?;
    client_b.recv_until("history").await?;

    client_a.send(bare_frame("typing-start")).await?;
    assert_eq!(client_b.recv_until("typing").await?, json!(["ada"]));

    client_a.close().await?;

    let left = client_b.recv_until("user-left").await?;
    assert_eq!(left["displayName"], "ada");
    assert_eq!(client_b.recv_until("typing").await?, json!([]));
    Ok(())
}

// ============================================================================
// Room switching and access policy
// ============================================================================

#[tokio::test]
async fn private_room_denies_non_participants_and_admits_participants() -> Result<()> {
    let app = TestApp::spawn(&[ada(), lin(), omar()]).await?;
    let token_a = app.token_for(ada().id);

    let response = app
        .post_auth(
            "/api/rooms",
            &token_a,
            &json!({"name": "ops", "isPrivate": true, "participantIds": [lin().id.to_string()]}),
        )
        .await?;
    assert_eq!(response.status(), 201);
    let room: Value = response.json().await?;
    let room_id = Snowflake::parse(room["id"].as_str().unwrap()).unwrap();

    // omar is not a participant
    let mut client_c = app.connect(omar().id).await?;
    client_c.recv_until("history").await?;
    client_c.send(join_frame(room_id)).await?;
    let error = client_c.recv_until("error").await?;
    assert_eq!(error["message"], "Access denied");

    // lin is
    let mut client_b = app.connect(lin().id).await?;
    client_b.recv_until("history").await?;
    client_b.send(join_frame(room_id)).await?;
    let joined = client_b.recv_until("joined").await?;
    assert_eq!(joined["name"], "ops");
    assert_eq!(client_b.recv_until("history").await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn joining_unknown_room_reports_room_not_found() -> Result<()> {
    let app = TestApp::spawn(&[ada()]).await?;

    let mut client = app.connect(ada().id).await?;
    client.recv_until("history").await?;

    client.send(join_frame(Snowflake::new(424_242))).await?;
    let error = client.recv_until("error").await?;
    assert_eq!(error["message"], "Room not found");
    Ok(())
}

#[tokio::test]
async fn room_switch_scopes_broadcasts_to_the_new_room() -> Result<()> {
    let app = TestApp::spawn(&[ada(), lin()]).await?;
    let token_a = app.token_for(ada().id);

    let response = app
        .post_auth("/api/rooms", &token_a, &json!({"name": "side-channel"}))
        .await?;
    let room: Value = response.json().await?;
    let room_id = Snowflake::parse(room["id"].as_str().unwrap()).unwrap();

    let mut client_a = app.connect(ada().id).await?;
    client_a.recv_until("history").await?;
    let mut client_b = app.connect(lin().id).await?;
    client_b.recv_until("history").await?;

    // ada moves out of general
    client_a.send(join_frame(room_id)).await?;
    client_a.recv_until("history").await?;

    // lin's message in general must not reach ada
    client_b.send(send_frame("general chatter")).await?;
    client_b.recv_until("new-message").await?;

    // ada only sees her own next message in the new room
    client_a.send(send_frame("side note")).await?;
    let message = client_a.recv_until("new-message").await?;
    assert_eq!(message["content"], "side note");
    Ok(())
}

// ============================================================================
// History replay
// ============================================================================

#[tokio::test]
async fn history_replays_latest_fifty_oldest_first() -> Result<()> {
    let app = TestApp::spawn(&[ada()]).await?;
    let token = app.token_for(ada().id);

    let response = app
        .post_auth("/api/rooms", &token, &json!({"name": "busy"}))
        .await?;
    let room: Value = response.json().await?;
    let room_id = Snowflake::parse(room["id"].as_str().unwrap()).unwrap();

    for i in 1..=55 {
        app.stores
            .append(room_id, ada().id, &format!("msg-{i}"))
            .await
            .unwrap();
    }

    let mut client = app.connect(ada().id).await?;
    client.recv_until("history").await?;
    client.send(join_frame(room_id)).await?;
    client.recv_until("joined").await?;

    let history = client.recv_until("history").await?;
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 50);
    // The 51st-oldest is excluded; order is ascending
    assert_eq!(entries.first().unwrap()["content"], "msg-6");
    assert_eq!(entries.last().unwrap()["content"], "msg-55");
    Ok(())
}

#[tokio::test]
async fn history_disabled_room_always_replays_empty() -> Result<()> {
    let app = TestApp::spawn(&[ada()]).await?;
    let token = app.token_for(ada().id);

    let response = app
        .post_auth(
            "/api/rooms",
            &token,
            &json!({"name": "ephemeral", "historyEnabled": false}),
        )
        .await?;
    let room: Value = response.json().await?;
    let room_id = Snowflake::parse(room["id"].as_str().unwrap()).unwrap();

    app.stores.append(room_id, ada().id, "already here").await.unwrap();

    let mut client = app.connect(ada().id).await?;
    client.recv_until("history").await?;
    client.send(join_frame(room_id)).await?;
    client.recv_until("joined").await?;
    assert_eq!(client.recv_until("history").await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn history_carries_reactions_with_actors() -> Result<()> {
    let app = TestApp::spawn(&[ada(), lin(), omar()]).await?;

    let mut client_a = app.connect(ada().id).await?;
    client_a.recv_until("history").await?;
    let mut client_b = app.connect(lin().id).await?;
    client_b.recv_until("history").await?;

    client_a.send(send_frame("classic")).await?;
    let message = client_b.recv_until("new-message").await?;
    client_b.send(react_frame(&message["id"], "🔥")).await?;
    client_a.recv_until("reaction-added").await?;

    // A later joiner sees the reaction in the replay
    let mut client_c = app.connect(omar().id).await?;
    let history = client_c.recv_until("history").await?;
    let entry = &history.as_array().unwrap()[0];
    assert_eq!(entry["content"], "classic");
    assert_eq!(entry["reactions"][0]["emoji"], "🔥");
    assert_eq!(entry["reactions"][0]["user"]["displayName"], "lin");
    Ok(())
}

// ============================================================================
// Identity refresh
// ============================================================================

#[tokio::test]
async fn profile_refresh_applies_to_subsequent_messages_only() -> Result<()> {
    let app = TestApp::spawn(&[ada(), lin()]).await?;

    let mut client_a = app.connect(ada().id).await?;
    client_a.recv_until("history").await?;
    let mut client_b = app.connect(lin().id).await?;
    client_b.recv_until("history").await?;

    client_a.send(send_frame("before")).await?;
    let before = client_b.recv_until("new-message").await?;
    assert_eq!(before["sender"]["displayName"], "ada");

    // Profile changes out of band, then the client signals a refresh
    app.stores
        .update_identity(huddle_core::Identity::new(ada().id, "countess").with_color("#16a34a"));
    client_a.send(bare_frame("profile-refresh")).await?;

    client_a.send(send_frame("after")).await?;
    let after = client_b.recv_until("new-message").await?;
    assert_eq!(after["sender"]["displayName"], "countess");
    assert_eq!(after["sender"]["displayColor"], "#16a34a");
    Ok(())
}
