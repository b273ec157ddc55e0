// Shared test helpers: a local redirect server and an unused port.

use std::time::Duration;

use axum::{
    extract::Path,
    http::{header::LOCATION, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect},
    routing::get,
    Router,
};
use tokio::net::TcpListener;

/// Starts a local server and returns its base URL (`http://127.0.0.1:port`).
///
/// Routes:
/// - `/chain/{n}`: redirects to `/chain/{n-1}`; `/chain/0` answers 200
/// - `/slow`: answers after five seconds
/// - `/not-modified`: 304 with a `Location` header, which must not be followed
/// - `/no-location`: 302 without a `Location` header
/// - `/unicode`: 302 to `/café`, sent as raw UTF-8 bytes
/// - `/to-slow`: 302 to `/slow`
#[allow(dead_code)] // Used by other test files
pub async fn start_redirect_server() -> String {
    let app = Router::new()
        .route(
            "/chain/{hops}",
            get(|Path(hops): Path<u32>| async move {
                if hops > 0 {
                    Redirect::temporary(&format!("/chain/{}", hops - 1)).into_response()
                } else {
                    "landed".into_response()
                }
            }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        )
        .route(
            "/not-modified",
            get(|| async { (StatusCode::NOT_MODIFIED, [(LOCATION, "/chain/0")]) }),
        )
        .route("/no-location", get(|| async { StatusCode::FOUND }))
        .route(
            "/unicode",
            get(|| async {
                let location = HeaderValue::from_bytes("/café".as_bytes()).expect("obs-text is allowed");
                (StatusCode::FOUND, [(LOCATION, location)])
            }),
        )
        .route("/to-slow", get(|| async { Redirect::temporary("/slow") }));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    format!("http://{}", addr)
}

/// Returns a loopback URL nothing is listening on.
#[allow(dead_code)] // Used by other test files
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{}/", addr)
}
