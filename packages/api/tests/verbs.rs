//! Public entry points of `courier` against an in-process server.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::Path;
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use courier::{Courier, HttpOperation, RequestOptions};
use serde::Deserialize;
use tokio_test::{assert_err, assert_ok};

#[derive(Debug, Deserialize)]
struct Echo {
    method: String,
    body: String,
    trace: Option<String>,
    auth: Option<String>,
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    serde_json::json!({
        "method": method.as_str(),
        "body": String::from_utf8_lossy(&body),
        "trace": header("x-trace"),
        "auth": header("authorization"),
    })
    .to_string()
}

async fn hop(Path(n): Path<u32>) -> Response {
    if n == 0 {
        return StatusCode::NO_CONTENT.into_response();
    }
    (StatusCode::FOUND, [(LOCATION, format!("/hop/{}", n - 1))]).into_response()
}

async fn start() -> String {
    env_logger::builder().is_test(true).try_init().ok();
    let app = Router::new()
        .route("/echo", any(echo))
        .route("/hop/:n", any(hop))
        .route("/redirect-to-echo", any(|| async {
            (StatusCode::TEMPORARY_REDIRECT, [(LOCATION, "/echo")])
        }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr: SocketAddr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn verb_functions_send_their_method() {
    let base = start().await;
    let url = format!("{base}/echo");

    let calls = [
        ("GET", courier::get(&url, None).await),
        ("PUT", courier::put(&url, None).await),
        ("PATCH", courier::patch(&url, None).await),
        ("DELETE", courier::delete(&url, None).await),
        ("POST", courier::post(&url, None).await),
        ("OPTIONS", courier::options(&url, None).await),
    ];
    for (expected, result) in calls {
        let mut response = assert_ok!(result);
        let echo: Echo = assert_ok!(response.json().await);
        assert_eq!(echo.method, expected);
    }

    let mut response = assert_ok!(courier::head(&url, None).await);
    assert!(response.ok());
    assert!(assert_ok!(response.bytes().await).is_empty());
}

#[tokio::test]
async fn redirected_post_keeps_its_body_but_not_its_credentials() {
    let base = start().await;
    let options = RequestOptions::new()
        .with_body("payload")
        .with_header("X-Trace", "abc")
        .with_basic_auth("user", "pass");

    let mut response = assert_ok!(courier::post(&format!("{base}/redirect-to-echo"), Some(options)).await);
    let echo: Echo = assert_ok!(response.json().await);
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, "payload");
    assert_eq!(echo.trace.as_deref(), Some("abc"));
    assert_eq!(echo.auth, None);
}

#[tokio::test]
async fn redirect_limit_is_enforced() {
    let base = start().await;

    let response = assert_ok!(
        courier::get(
            &format!("{base}/hop/1"),
            Some(RequestOptions::new().with_redirect_limit(2)),
        )
        .await
    );
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let err = assert_err!(
        courier::get(
            &format!("{base}/hop/2"),
            Some(RequestOptions::new().with_redirect_limit(2)),
        )
        .await
    );
    assert!(err.is_redirect_limit_exceeded());
}

#[tokio::test]
async fn fluent_entry_point() {
    let base = start().await;

    let mut response = assert_ok!(
        Courier::get(format!("{base}/echo"))
            .query_param("q", "1")
            .header("X-Trace", "fluent")
            .execute()
            .await
    );
    let echo: Echo = assert_ok!(response.json().await);
    assert_eq!(echo.trace.as_deref(), Some("fluent"));

    let post = assert_ok!(
        Courier::with_options(RequestOptions::new().with_request_timeout(Duration::from_secs(5)))
            .post(format!("{base}/echo"))
            .json(&serde_json::json!({"k": "v"}))
    );
    let mut response = assert_ok!(post.execute().await);
    let echo: Echo = assert_ok!(response.json().await);
    assert_eq!(echo.body, r#"{"k":"v"}"#);

    let dir = assert_ok!(tempfile::tempdir());
    let path = dir.path().join("echo.json");
    let written = assert_ok!(Courier::download(format!("{base}/echo"), &path).execute().await);
    assert!(written > 0);
}
