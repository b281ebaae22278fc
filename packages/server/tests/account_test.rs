//! Integration tests for the account HTTP API.

mod common;

use common::{TestServer, recv_types, send_event};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

#[tokio::test]
async fn test_health_check() {
    // テスト項目: ヘルスチェックが ok を返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let response = reqwest::get(server.url("/api/health")).await.unwrap();

    // then (期待する結果):
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_register_login_and_profile() {
    // テスト項目: 登録 → ログイン → プロフィール取得・更新の一連の流れ
    // given (前提条件):
    let server = TestServer::start().await;
    let client = Client::new();
    server
        .register("alice", "alice@example.com", "secret1")
        .await;

    // when (操作):
    let login: Value = client
        .post(server.url("/auth/login"))
        .json(&json!({ "email": "alice@example.com", "password": "secret1" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let token = login["token"].as_str().unwrap().to_string();
    let profile: Value = client
        .get(server.url("/auth/profile"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let updated = client
        .put(server.url("/auth/profile"))
        .bearer_auth(&token)
        .json(&json!({ "username": "alicia" }))
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(profile["success"], true);
    assert_eq!(profile["data"]["username"], "alice");
    assert_eq!(profile["data"]["email"], "alice@example.com");
    assert!(profile["data"]["createdAt"].is_string());
    assert!(profile["data"].get("password").is_none());
    assert_eq!(updated.status(), StatusCode::OK);
    let updated: Value = updated.json().await.unwrap();
    assert_eq!(updated["data"]["username"], "alicia");
}

#[tokio::test]
async fn test_register_errors() {
    // テスト項目: 必須項目の欠落と重複登録はどちらも 400 になる
    // given (前提条件):
    let server = TestServer::start().await;
    let client = Client::new();
    server
        .register("alice", "alice@example.com", "secret1")
        .await;

    // when (操作):
    let missing = client
        .post(server.url("/auth/register"))
        .json(&json!({ "username": "bob" }))
        .send()
        .await
        .unwrap();
    let duplicate = client
        .post(server.url("/auth/register"))
        .json(&json!({
            "username": "alice",
            "email": "other@example.com",
            "password": "secret1",
        }))
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 2);
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    let body: Value = duplicate.json().await.unwrap();
    assert_eq!(
        body["error"]["message"],
        "User with this email or username already exists"
    );
}

#[tokio::test]
async fn test_unreadable_requests_use_error_envelope() {
    // テスト項目: 型の合わない JSON、Content-Type なしのボディ、不正なクエリはいずれも 400 のエラー形式で返る
    // given (前提条件):
    let server = TestServer::start().await;
    let client = Client::new();
    let token = server
        .register("alice", "alice@example.com", "secret1")
        .await;

    // when (操作):
    let wrong_type = client
        .post(server.url("/auth/register"))
        .json(&json!({
            "username": 123,
            "email": "bob@example.com",
            "password": "secret1",
        }))
        .send()
        .await
        .unwrap();
    let no_content_type = client
        .post(server.url("/auth/login"))
        .send()
        .await
        .unwrap();
    let bad_query = client
        .get(server.url("/users/search?page=abc"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    for response in [wrong_type, no_content_type, bad_query] {
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert!(body["error"]["message"].is_string());
    }
}

#[tokio::test]
async fn test_authentication_failures() {
    // テスト項目: 誤ったパスワードでのログインとトークンなしのアクセスは 401
    // given (前提条件):
    let server = TestServer::start().await;
    let client = Client::new();
    server
        .register("alice", "alice@example.com", "secret1")
        .await;

    // when (操作):
    let wrong_password = client
        .post(server.url("/auth/login"))
        .json(&json!({ "email": "alice@example.com", "password": "nope-nope" }))
        .send()
        .await
        .unwrap();
    let no_token = client.get(server.url("/auth/profile")).send().await.unwrap();
    let bad_token = client
        .get(server.url("/users/search"))
        .bearer_auth("not-a-token")
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let body: Value = wrong_password.json().await.unwrap();
    assert_eq!(body["error"]["message"], "Invalid credentials");
    assert_eq!(no_token.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(bad_token.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_search_and_public_profile() {
    // テスト項目: ユーザー検索のページングと公開プロフィールの取得
    // given (前提条件):
    let server = TestServer::start().await;
    let client = Client::new();
    let token = server
        .register("alice", "alice@example.com", "secret1")
        .await;
    server.register("alfred", "alfred@example.com", "secret1").await;
    server.register("bob", "bob@example.com", "secret1").await;

    // when (操作):
    let search: Value = client
        .get(server.url("/users/search?query=AL&page=1&limit=1"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = search["data"][0]["id"].as_str().unwrap().to_string();
    let public = client
        .get(server.url(&format!("/users/{}", id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let missing = client
        .get(server.url("/users/00000000-0000-0000-0000-000000000000"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(search["data"][0]["username"], "alfred");
    assert_eq!(
        search["pagination"],
        json!({
            "currentPage": 1,
            "totalPages": 2,
            "totalItems": 2,
            "hasNextPage": true,
            "hasPrevPage": false,
        })
    );
    assert_eq!(public.status(), StatusCode::OK);
    let public: Value = public.json().await.unwrap();
    assert_eq!(public["data"]["username"], "alfred");
    assert!(public["data"].get("email").is_none());
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_account() {
    // テスト項目: 正しいパスワードでアカウントを削除でき、削除後のプロフィールは 404
    // given (前提条件):
    let server = TestServer::start().await;
    let client = Client::new();
    let token = server
        .register("alice", "alice@example.com", "secret1")
        .await;

    // when (操作):
    let wrong = client
        .delete(server.url("/auth/profile"))
        .bearer_auth(&token)
        .json(&json!({ "password": "nope-nope" }))
        .send()
        .await
        .unwrap();
    let deleted = client
        .delete(server.url("/auth/profile"))
        .bearer_auth(&token)
        .json(&json!({ "password": "secret1" }))
        .send()
        .await
        .unwrap();
    let profile = client
        .get(server.url("/auth/profile"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(deleted.status(), StatusCode::OK);
    let body: Value = deleted.json().await.unwrap();
    assert_eq!(body["message"], "Account deleted successfully");
    assert_eq!(profile.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_password_reset_endpoints() {
    // テスト項目: リセット要求は登録済みメールのみ受け付け、トークンは応答に含まれず、不正なトークンでの再設定は 400
    // given (前提条件):
    let server = TestServer::start().await;
    let client = Client::new();
    let access = server
        .register("alice", "alice@example.com", "secret1")
        .await;

    // when (操作):
    let requested = client
        .post(server.url("/auth/password-reset"))
        .json(&json!({ "email": "alice@example.com" }))
        .send()
        .await
        .unwrap();
    let unknown = client
        .post(server.url("/auth/password-reset"))
        .json(&json!({ "email": "nobody@example.com" }))
        .send()
        .await
        .unwrap();
    let with_access_token = client
        .post(server.url("/auth/password-reset/confirm"))
        .json(&json!({ "token": access, "newPassword": "brandnew" }))
        .send()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(requested.status(), StatusCode::OK);
    let body: Value = requested.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "success": true, "message": "Password reset requested" })
    );
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert_eq!(with_access_token.status(), StatusCode::BAD_REQUEST);
    let body: Value = with_access_token.json().await.unwrap();
    assert_eq!(body["error"]["message"], "Invalid reset token");
}

#[tokio::test]
async fn test_room_endpoints_reflect_relay_state() {
    // テスト項目: ルーム一覧・詳細 API がリレーの状態を反映する
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    send_event(&mut alice, "join", json!({ "username": "alice" })).await;
    recv_types(&mut alice, 3).await;
    send_event(
        &mut alice,
        "sendMessage",
        json!({ "message": "hi", "room": "general" }),
    )
    .await;
    recv_types(&mut alice, 1).await;

    // when (操作):
    let rooms: Value = reqwest::get(server.url("/api/rooms"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let detail: Value = reqwest::get(server.url("/api/rooms/general"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let unknown = reqwest::get(server.url("/api/rooms/nowhere")).await.unwrap();

    // then (期待する結果):
    assert_eq!(
        rooms,
        json!([{ "name": "general", "participants": 1, "messageCount": 1 }])
    );
    assert_eq!(detail["participants"][0]["username"], "alice");
    assert_eq!(detail["messages"][0]["message"], "hi");
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}
