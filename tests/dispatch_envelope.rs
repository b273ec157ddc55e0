//! JSON envelope handling end to end.

mod helpers;

use serde_json::json;

use helpers::{refused_url, start_redirect_server};
use url_expander::dispatch::{handle_payload, ResponseEnvelope};
use url_expander::{ClientHandle, Config, RequestError, TransportCode};

fn handle() -> ClientHandle {
    ClientHandle::new(&Config::default()).expect("client should build")
}

#[tokio::test]
async fn test_payload_success_shape() {
    let base = start_redirect_server().await;
    let mut handle = handle();
    let config = Config::default();

    let response = handle_payload(
        &mut handle,
        &config,
        json!({ "url": format!("{}/chain/4", base), "max_time_ms": 5000, "max_redirects": 1 }),
    )
    .await
    .expect("well-formed payload");

    assert_eq!(response.error_code, 0);
    assert_eq!(response.expanded_url, Some(format!("{}/chain/2", base)));
    assert_eq!(response.reached_redirect_limit, Some(true));
    assert_eq!(response.error_message, None);

    let wire = serde_json::to_value(&response).unwrap();
    assert!(wire.get("duration_ms").is_some());
    assert!(wire.get("error_message").is_none());
}

#[tokio::test]
async fn test_payload_uses_config_defaults() {
    let base = start_redirect_server().await;
    let mut handle = handle();
    let config = Config {
        default_max_time_ms: 5000,
        default_max_redirects: 0,
        ..Default::default()
    };

    let response = handle_payload(&mut handle, &config, json!({ "url": format!("{}/chain/2", base) }))
        .await
        .unwrap();

    assert_eq!(response.expanded_url, Some(format!("{}/chain/1", base)));
    assert_eq!(response.reached_redirect_limit, Some(true));
}

#[tokio::test]
async fn test_payload_failure_shape() {
    let url = refused_url().await;
    let mut handle = handle();

    let response = handle_payload(&mut handle, &Config::default(), json!({ "url": url }))
        .await
        .unwrap();

    assert_eq!(
        TransportCode::from_code(response.error_code),
        Some(TransportCode::CouldntConnect)
    );
    assert_eq!(
        response,
        ResponseEnvelope {
            error_code: 7,
            duration_ms: response.duration_ms,
            expanded_url: None,
            reached_redirect_limit: None,
            error_message: Some("Could not connect to server".to_string()),
        }
    );
}

#[tokio::test]
async fn test_payload_rejections_skip_the_network() {
    let mut handle = handle();
    let config = Config::default();

    let missing = handle_payload(&mut handle, &config, json!({ "max_redirects": 2 })).await;
    assert_eq!(missing, Err(RequestError::MissingUrl));

    let negative = handle_payload(&mut handle, &config, json!({ "url": "a.co", "max_time_ms": -5 })).await;
    assert!(matches!(negative, Err(RequestError::InvalidJson(_))));

    let not_object = handle_payload(&mut handle, &config, json!("a.co")).await;
    assert!(matches!(not_object, Err(RequestError::InvalidJson(_))));

    assert_eq!(handle.settings(), handle.baseline());
}
