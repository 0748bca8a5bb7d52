use std::cell::Cell;
use std::rc::Rc;

use serde_json::{json, Value};

use super::testing::{MemoryTokenStore, ScriptedTransport};
use super::*;
use crate::models::UserSummary;

fn client(
    transport: &ScriptedTransport,
    store: &MemoryTokenStore,
) -> ApiClient<ScriptedTransport, MemoryTokenStore> {
    ApiClient::new(
        ClientConfig::new("http://photos.test", "authToken"),
        transport.clone(),
        store.clone(),
    )
}

fn counting_hook() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
    let count = Rc::new(Cell::new(0));
    let seen = count.clone();
    (count, move || seen.set(seen.get() + 1))
}

// =============================================================================
// fetch_model
// =============================================================================

#[tokio::test]
async fn fetch_without_token_sends_no_authorization() {
    let transport = ScriptedTransport::new();
    transport.reply(200, "[]");
    let store = MemoryTokenStore::empty();

    let users: Vec<UserSummary> = client(&transport, &store).fetch_model("/users").await.unwrap();

    assert!(users.is_empty());
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].url, "http://photos.test/api/users");
    assert_eq!(sent[0].header("Content-Type"), Some("application/json"));
    assert_eq!(sent[0].header("Authorization"), None);
}

#[tokio::test]
async fn fetch_with_token_sends_bearer() {
    let transport = ScriptedTransport::new();
    transport.reply(200, r#"{"_id":"u1","first_name":"Ann","last_name":"Lee"}"#);
    let store = MemoryTokenStore::with_token("tok-1");

    let user: UserSummary = client(&transport, &store)
        .fetch_model("/user/u1")
        .await
        .unwrap();

    assert_eq!(user.full_name(), "Ann Lee");
    assert_eq!(transport.sent()[0].header("authorization"), Some("Bearer tok-1"));
}

#[tokio::test]
async fn fetch_401_clears_token_and_raises_hook() {
    let transport = ScriptedTransport::new();
    transport.reply(401, "<html>not json</html>");
    let store = MemoryTokenStore::with_token("stale");
    let (count, hook) = counting_hook();
    let client = client(&transport, &store).on_unauthorized(hook);

    let err = client.fetch_model::<Value>("/user/list").await.unwrap_err();

    assert_eq!(err, ApiError::Unauthorized);
    assert!(err.is_unauthorized());
    assert_eq!(store.get_token(), None);
    assert_eq!(count.get(), 1);
}

#[tokio::test]
async fn fetch_500_keeps_token() {
    let transport = ScriptedTransport::new();
    transport.reply(500, r#"{"error":"boom"}"#);
    let store = MemoryTokenStore::with_token("tok-1");
    let (count, hook) = counting_hook();
    let client = client(&transport, &store).on_unauthorized(hook);

    let err = client.fetch_model::<Value>("/user/list").await.unwrap_err();

    assert_eq!(err, ApiError::Http { status: 500 });
    assert_eq!(store.get_token().as_deref(), Some("tok-1"));
    assert_eq!(count.get(), 0);
}

#[tokio::test]
async fn fetch_transport_failure_is_returned() {
    let transport = ScriptedTransport::new();
    transport.fail(ApiError::Transport("offline".into()));
    let store = MemoryTokenStore::with_token("tok-1");

    let err = client(&transport, &store)
        .fetch_model::<Value>("/user/list")
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Transport("offline".into()));
    assert_eq!(store.get_token().as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn fetch_bad_json_is_decode_error() {
    let transport = ScriptedTransport::new();
    transport.reply(200, "not json");
    let store = MemoryTokenStore::empty();

    let err = client(&transport, &store)
        .fetch_model::<Vec<UserSummary>>("/user/list")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn concurrent_401s_each_raise_hook() {
    let transport = ScriptedTransport::new();
    transport.reply(401, "").reply(401, "");
    let store = MemoryTokenStore::with_token("stale");
    let (count, hook) = counting_hook();
    let client = client(&transport, &store).on_unauthorized(hook);

    let (a, b) = tokio::join!(
        client.fetch_model::<Value>("/user/list"),
        client.fetch_model::<Value>("/photosOfUser/u1"),
    );

    assert!(a.unwrap_err().is_unauthorized());
    assert!(b.unwrap_err().is_unauthorized());
    assert_eq!(count.get(), 2);
}

// =============================================================================
// session endpoints
// =============================================================================

#[tokio::test]
async fn current_user_does_not_touch_token() {
    let transport = ScriptedTransport::new();
    transport.reply(401, "");
    let store = MemoryTokenStore::with_token("stale");

    let err = client(&transport, &store).current_user("stale").await.unwrap_err();

    assert_eq!(err, ApiError::Unauthorized);
    assert_eq!(store.get_token().as_deref(), Some("stale"));
    assert_eq!(transport.sent()[0].url, "http://photos.test/admin/current");
}

#[tokio::test]
async fn notify_logout_posts_with_bearer() {
    let transport = ScriptedTransport::new();
    transport.reply(204, "");
    let store = MemoryTokenStore::with_token("tok-1");

    client(&transport, &store).notify_logout("tok-1").await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, "http://photos.test/admin/logout");
    assert_eq!(sent[0].header("Authorization"), Some("Bearer tok-1"));
}

#[tokio::test]
async fn login_returns_token_without_storing_it() {
    let transport = ScriptedTransport::new();
    transport.reply(200, r#"{"token":"fresh","user":{"_id":"u1","name":"Ann"}}"#);
    let store = MemoryTokenStore::empty();
    let req = LoginRequest {
        login_name: "ann".into(),
        password: "secret".into(),
    };

    let login = client(&transport, &store).login(&req).await.unwrap();

    assert_eq!(login.token, "fresh");
    assert_eq!(login.user.id, "u1");
    assert_eq!(store.get_token(), None);
    let sent = transport.sent();
    assert_eq!(sent[0].url, "http://photos.test/admin/login");
    assert_eq!(sent[0].header("Authorization"), None);
    let body: Value = serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"login_name": "ann", "password": "secret"}));
}

#[tokio::test]
async fn login_rejected_leaves_store_empty() {
    let transport = ScriptedTransport::new();
    transport.reply(401, "");
    let store = MemoryTokenStore::empty();
    let req = LoginRequest {
        login_name: "ann".into(),
        password: "wrong".into(),
    };

    let err = client(&transport, &store).login(&req).await.unwrap_err();

    assert_eq!(err, ApiError::Unauthorized);
    assert_eq!(store.get_token(), None);
}

#[tokio::test]
async fn register_posts_to_user_endpoint() {
    let transport = ScriptedTransport::new();
    transport.reply(
        200,
        r#"{"_id":"u9","first_name":"Cy","last_name":"Ng","location":"Oslo"}"#,
    );
    let store = MemoryTokenStore::empty();
    let req = RegisterRequest {
        login_name: "cy".into(),
        password: "pw".into(),
        first_name: "Cy".into(),
        last_name: "Ng".into(),
        location: "Oslo".into(),
        ..Default::default()
    };

    let created = client(&transport, &store).register(&req).await.unwrap();

    assert_eq!(created.id, "u9");
    assert_eq!(transport.sent()[0].url, "http://photos.test/api/user");
    assert_eq!(store.get_token(), None);
}

#[tokio::test]
async fn register_conflict_is_http_error() {
    let transport = ScriptedTransport::new();
    transport.reply(400, "login_name taken");
    let store = MemoryTokenStore::empty();

    let err = client(&transport, &store)
        .register(&RegisterRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Http { status: 400 });
}
