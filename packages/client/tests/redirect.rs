//! Redirect following against a live server: hop limits, header propagation,
//! method rewriting and policy installation on shared clients.

mod support;

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue, Method as AxMethod, StatusCode as AxStatus, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use courier_client::{
    HttpClient, HttpOperation, Method, RedirectDefaults, RequestOptions, StatusCode, get, post,
    send_request,
};
use support::{Recorder, init_logging, serve};

async fn chain(
    State(rec): State<Recorder>,
    Path(n): Path<u32>,
    method: AxMethod,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    rec.record(method, uri, headers, body.to_vec());
    if n == 0 {
        return (AxStatus::OK, "end").into_response();
    }
    (AxStatus::FOUND, [(LOCATION, format!("/chain/{}", n - 1))]).into_response()
}

async fn status_redirect(
    State(rec): State<Recorder>,
    Path(code): Path<u16>,
    method: AxMethod,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    rec.record(method, uri, headers, body.to_vec());
    let status = AxStatus::from_u16(code).expect("valid status code");
    (status, [(LOCATION, "/sink".to_string())]).into_response()
}

async fn sink(
    State(rec): State<Recorder>,
    method: AxMethod,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> String {
    let reply = format!("{method} {}", String::from_utf8_lossy(&body));
    rec.record(method, uri, headers, body.to_vec());
    reply
}

async fn no_location() -> AxStatus {
    AxStatus::FOUND
}

async fn app_callback() -> Response {
    (AxStatus::FOUND, [(LOCATION, "myapp://callback?code=xyz")]).into_response()
}

async fn non_ascii_location() -> Response {
    let location = HeaderValue::from_bytes(b"/caf\xc3\xa9").expect("obs-text is a valid header value");
    (AxStatus::FOUND, [(LOCATION, location)]).into_response()
}

async fn start() -> (String, Recorder) {
    init_logging();
    let rec = Recorder::default();
    let app = Router::new()
        .route("/chain/:n", any(chain))
        .route("/status/:code", any(status_redirect))
        .route("/sink", any(sink))
        .route("/no-location", any(no_location))
        .route("/app-callback", any(app_callback))
        .route("/non-ascii", any(non_ascii_location))
        .with_state(rec.clone());
    (serve(app).await, rec)
}

fn traced() -> RequestOptions {
    RequestOptions::new()
        .with_header("Authorization", "secret")
        .with_header("X-Trace", "abc")
}

#[tokio::test]
async fn limit_two_fails_when_the_third_hop_is_attempted() {
    let (base, rec) = start().await;

    let err = get(
        &format!("{base}/chain/2"),
        Some(traced().with_redirect_limit(2)),
    )
    .await
    .expect_err("third hop must be refused");

    assert!(err.is_redirect_limit_exceeded());
    assert_eq!(err.url().map(|u| u.path()), Some("/chain/0"));

    let seen = rec.seen();
    assert_eq!(seen.len(), 2, "the third hop is never sent");
    assert_eq!(seen[0].header("authorization"), Some("secret"));
    assert_eq!(seen[0].header("x-trace"), Some("abc"));
    assert_eq!(seen[1].header("x-trace"), Some("abc"));
    assert_eq!(seen[1].header("authorization"), None);
}

#[tokio::test]
async fn chain_of_exactly_the_limit_succeeds() {
    let (base, rec) = start().await;

    let mut response = get(
        &format!("{base}/chain/2"),
        Some(traced().with_redirect_limit(3)),
    )
    .await
    .expect("three requests fit a limit of three");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.url().path(), "/chain/0");
    assert_eq!(response.text().await.expect("body"), "end");

    let seen = rec.seen();
    assert_eq!(seen.len(), 3);
    for hop in &seen[1..] {
        assert_eq!(hop.header_values("x-trace"), vec!["abc".to_string()]);
        assert!(hop.header("authorization").is_none());
    }
}

#[tokio::test]
async fn negative_limit_returns_the_redirect_response() {
    let (base, rec) = start().await;

    let response = get(
        &format!("{base}/chain/5"),
        Some(traced().with_redirect_limit(-1)),
    )
    .await
    .expect("not following is not an error");

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.header("location"), Some("/chain/4"));
    assert_eq!(rec.seen().len(), 1);
}

#[tokio::test]
async fn negative_limit_returns_redirects_to_foreign_schemes() {
    let (base, _rec) = start().await;

    let response = get(
        &format!("{base}/app-callback"),
        Some(RequestOptions::new().with_redirect_limit(-1)),
    )
    .await
    .expect("the redirect response is the result");

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.header("location"), Some("myapp://callback?code=xyz"));
}

#[tokio::test]
async fn following_a_foreign_scheme_is_an_error() {
    let (base, _rec) = start().await;

    let err = get(&format!("{base}/app-callback"), None)
        .await
        .expect_err("myapp:// cannot be followed");

    assert!(err.is_builder());
    assert_eq!(err.url().map(|u| u.scheme()), Some("myapp"));
}

#[tokio::test]
async fn negative_limit_returns_non_ascii_locations_untouched() {
    let (base, _rec) = start().await;

    let response = get(
        &format!("{base}/non-ascii"),
        Some(RequestOptions::new().with_redirect_limit(-1)),
    )
    .await
    .expect("the redirect response is the result");

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get("location").map(|v| v.as_bytes()),
        Some(&b"/caf\xc3\xa9"[..])
    );
}

#[tokio::test]
async fn following_a_non_ascii_location_is_a_redirect_error() {
    let (base, _rec) = start().await;

    let err = get(&format!("{base}/non-ascii"), None)
        .await
        .expect_err("the location is not a valid URL string");

    assert!(err.is_redirect());
    assert!(!err.is_redirect_limit_exceeded());
}

#[tokio::test]
async fn zero_limit_behaves_like_the_default_limit() {
    let (base, _rec) = start().await;
    let client = || {
        HttpClient::builder()
            .redirect_defaults(RedirectDefaults::default().with_limit(2))
            .build()
            .expect("client should build")
    };

    for limit in [0, 2] {
        let ok = get(
            &format!("{base}/chain/1"),
            Some(RequestOptions::new().with_redirect_limit(limit).with_client(client())),
        )
        .await;
        assert!(ok.is_ok(), "limit {limit}: one redirect fits");

        let err = get(
            &format!("{base}/chain/2"),
            Some(RequestOptions::new().with_redirect_limit(limit).with_client(client())),
        )
        .await
        .expect_err("two redirects do not fit");
        assert!(err.is_redirect_limit_exceeded(), "limit {limit}");
    }
}

#[tokio::test]
async fn custom_sensitive_set_replaces_the_default_one() {
    let (base, rec) = start().await;

    get(
        &format!("{base}/chain/1"),
        Some(traced().with_sensitive_header("x-TRACE")),
    )
    .await
    .expect("redirect should be followed");

    let redirected = rec.last();
    assert_eq!(redirected.header("authorization"), Some("secret"));
    assert!(redirected.header("x-trace").is_none());
}

#[tokio::test]
async fn multi_valued_headers_arrive_with_every_value_in_order() {
    let (base, rec) = start().await;
    let options = RequestOptions::new().with_before_request(|request| {
        let headers = request.headers_mut();
        headers.append("x-multi", "first".parse()?);
        headers.append("x-multi", "second".parse()?);
        Ok(())
    });

    get(&format!("{base}/chain/2"), Some(options))
        .await
        .expect("redirects should be followed");

    for hop in rec.seen() {
        assert_eq!(hop.header_values("x-multi"), vec!["first", "second"]);
    }
}

#[tokio::test]
async fn referer_is_the_previous_hop() {
    let (base, rec) = start().await;

    get(&format!("{base}/chain/1"), None)
        .await
        .expect("redirect should be followed");

    let seen = rec.seen();
    assert!(seen[0].header("referer").is_none());
    assert_eq!(seen[1].header("referer"), Some(format!("{base}/chain/1").as_str()));
}

#[tokio::test]
async fn method_and_body_follow_the_redirect_status() {
    let (base, _rec) = start().await;

    let cases = [
        (Method::POST, 301, "GET "),
        (Method::POST, 302, "GET "),
        (Method::PUT, 302, "GET "),
        (Method::PATCH, 301, "GET "),
        (Method::PUT, 303, "GET "),
        (Method::POST, 307, "POST payload"),
        (Method::PUT, 308, "PUT payload"),
    ];

    for (method, code, expected) in cases {
        let mut response = send_request(
            method.clone(),
            &format!("{base}/status/{code}"),
            Some(RequestOptions::new().with_body("payload")),
        )
        .await
        .expect("redirect should be followed");
        assert_eq!(
            response.text().await.expect("body"),
            expected,
            "{method} answered with {code}"
        );
    }
}

#[tokio::test]
async fn form_content_type_is_dropped_with_the_body() {
    let (base, rec) = start().await;

    post(
        &format!("{base}/status/302"),
        Some(RequestOptions::new().with_data("k", "v")),
    )
    .await
    .expect("redirect should be followed");

    let redirected = rec.last();
    assert_eq!(redirected.method, AxMethod::GET);
    assert!(redirected.header("content-type").is_none());
}

#[tokio::test]
async fn redirect_without_location_is_final() {
    let (base, _rec) = start().await;

    let response = get(&format!("{base}/no-location"), None)
        .await
        .expect("response should be returned");
    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn shared_client_keeps_its_first_policy() {
    let (base, rec) = start().await;
    let client = HttpClient::new().expect("client should build");

    get(
        &format!("{base}/chain/2"),
        Some(traced().with_redirect_limit(3).with_client(client.clone())),
    )
    .await
    .expect("first call installs a limit of three");

    let mut second = courier_client::operations::GetOperation::new(
        format!("{base}/chain/2"),
        Some(traced().with_redirect_limit(1).with_client(client.clone())),
    )
    .execute()
    .await
    .expect("second call keeps the installed limit");
    assert_eq!(second.text().await.expect("body"), "end");

    for hop in rec.seen().iter().filter(|hop| hop.header("referer").is_some()) {
        assert_eq!(hop.header_values("x-trace").len(), 1, "headers are copied once");
        assert!(hop.header("authorization").is_none());
    }

    let stats = client.stats();
    assert_eq!(stats.requests_total, 2);
    assert_eq!(stats.redirects_followed, 4);
}
