//! End-to-end tests of the public API against a local mock of the IM REST API.
//!
//! Run with:
//! ```bash
//! RUST_LOG=tencent_im=debug cargo test --test mock_integration -- --nocapture
//! ```

use std::sync::Once;
use std::time::Duration;

use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use tencent_im::prelude::*;

const APP_ID: u64 = 1400000000;
const ADMIN: &str = "administrator";
const KEY: &str = "5bd2850fff3ecb11d7c805251c51ee463a25727bddc2385f3fa8bfee1bb93b5e";

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn client_for(server: &MockServer) -> ImClient {
    init_tracing();
    ImClient::new(ImConfig::hmac(APP_ID, ADMIN, KEY).with_host(&server.base_url())).unwrap()
}

#[tokio::test]
async fn test_admin_usersig_is_a_valid_hmac_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v4/im_open_login_svc/account_check")
                .query_param("contenttype", "json")
                .query_param("sdkappid", APP_ID.to_string())
                .query_param("identifier", ADMIN)
                .query_param_exists("usersig")
                .query_param_exists("random");
            then.status(200).json_body(json!({
                "ActionStatus": "OK", "ErrorCode": 0, "ErrorInfo": "",
                "ResultItem": [{"UserID": "u1", "ResultCode": 0, "AccountStatus": "Imported"}]
            }));
        })
        .await;

    let client = client_for(&server);
    let resp = client.accounts().check(&["u1"]).await.unwrap();
    mock.assert_calls_async(1).await;
    assert_eq!(resp.imported().collect::<Vec<_>>(), vec!["u1"]);

    let sig = client.user_sig(ADMIN).await.unwrap();
    HmacSigner::new(APP_ID, KEY)
        .verify_user_sig(ADMIN, &sig, chrono::Utc::now())
        .unwrap();
}

#[tokio::test]
async fn test_send_then_withdraw() {
    let server = MockServer::start_async().await;
    let send = server
        .mock_async(|when, then| {
            when.method(POST).path("/v4/openim/sendmsg");
            then.status(200).json_body(json!({
                "ActionStatus": "OK", "ErrorInfo": "", "ErrorCode": 0,
                "MsgTime": 1603700942, "MsgKey": "1335_219_1603700942"
            }));
        })
        .await;
    let withdraw = server
        .mock_async(|when, then| {
            when.method(POST).path("/v4/openim/admin_msgwithdraw").json_body(json!({
                "From_Account": "alice", "To_Account": "bob", "MsgKey": "1335_219_1603700942"
            }));
            then.status(200).json_body(json!({"ActionStatus": "OK", "ErrorCode": 0, "ErrorInfo": ""}));
        })
        .await;

    let client = client_for(&server);
    let options = SendOptions::default()
        .control(SendMsgControl::NoUnread)
        .cloud_custom_json(&json!({"orderId": 42}))
        .unwrap();
    let sent = client
        .messages()
        .send("alice", "bob", MsgContent::text("hello"), options)
        .await
        .unwrap();
    let key = sent.msg_key.unwrap();
    let withdrawn = client.messages().withdraw("alice", "bob", &key).await.unwrap();

    send.assert_calls_async(1).await;
    withdraw.assert_calls_async(1).await;
    assert!(withdrawn.is_ok());
}

#[tokio::test]
async fn test_platform_rejection_is_ok_with_code() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v4/profile/portrait_set");
            then.status(200).json_body(json!({
                "ActionStatus": "FAIL", "ErrorCode": 40001, "ErrorInfo": "invalid tag"
            }));
        })
        .await;

    let client = client_for(&server);
    let resp = client
        .profiles()
        .set("u1", &[ProfileItem::nick("Neo")])
        .await
        .unwrap();
    assert_eq!(resp.error_code(), 40001);
    assert_eq!(resp.raw()["ErrorInfo"], "invalid tag");
}

#[tokio::test]
async fn test_raw_dispatch_with_untyped_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v4/openim/importmsg");
            then.status(200).json_body(json!({"ActionStatus": "OK", "ErrorCode": 0, "Extra": 1}));
        })
        .await;

    let client = client_for(&server);
    let resp: serde_json::Value = client
        .http()
        .send("ImportMsg", &json!({"From_Account": "a", "To_Account": "b"}))
        .await
        .unwrap();
    assert!(resp.is_ok());
    assert_eq!(resp["Extra"], 1);
}

#[tokio::test]
async fn test_timeout_surfaces_as_transport_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST);
            then.status(200)
                .delay(Duration::from_millis(800))
                .json_body(json!({"ErrorCode": 0}));
        })
        .await;

    init_tracing();
    let client = ImClient::builder()
        .config(ImConfig::hmac(APP_ID, ADMIN, KEY).with_host(&server.base_url()))
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let mut container = QueryUserStatusResponse::default();
    let err = client
        .http()
        .send_into("AccountStatus", &json!({"To_Account": ["u1"]}), &mut container)
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Http(HttpError::Timeout)));
    assert!(container.query_result.is_empty());
}
