//! Integration tests for the EVPlus backend.
//!
//! The full router runs against a wiremock stand-in for the projections
//! API, so no test touches the real upstream.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use evplus_backend::api::{create_router, AppState};
use evplus_backend::config::Config;
use evplus_backend::props::PropsClient;

/// Router wired to a mock upstream.
fn app(server: &MockServer, timeout_ms: u64) -> Router {
    let config = Config {
        projections_url: format!("{}/projections", server.uri()),
        http_timeout_ms: timeout_ms,
        metrics_enabled: false,
        ..Config::default()
    };
    let client = PropsClient::new(&config).expect("client builds");
    create_router(AppState::new(client))
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn board() -> Value {
    json!({
        "included": [
            { "id": "1", "type": "new-player", "attributes": { "name": "John Doe" } },
            { "id": "2", "type": "new-player", "attributes": { "name": "Jane Roe" } },
            { "id": "LAL", "type": "team", "attributes": { "abbreviation": "LAL" } }
        ],
        "data": [
            { "id": "p1", "type": "projection", "attributes": {
                "new_player_id": "1", "stat_type": "Points", "line_score": 21.5, "team": "LAL"
            } },
            { "id": "p2", "type": "projection", "attributes": {
                "new_player_id": "2", "stat_type": "Rebounds", "line_score": 9
            } },
            { "id": "p3", "type": "projection", "attributes": {
                "new_player_id": "404", "stat_type": "Assists", "line_score": 4.5, "team": "BOS"
            } }
        ]
    })
}

#[tokio::test]
async fn props_route_returns_normalized_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projections"))
        .and(query_param("league_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(board()))
        .expect(1)
        .mount(&server)
        .await;

    let response = get(app(&server, 2_000), "/api/props?league=nba").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([
            { "player": "John Doe", "stat": "Points", "line": 21.5, "team": "LAL", "league": "NBA" },
            { "player": "Jane Roe", "stat": "Rebounds", "line": 9, "team": "", "league": "NBA" },
            { "player": "Unknown", "stat": "Assists", "line": 4.5, "team": "BOS", "league": "NBA" }
        ])
    );
}

#[tokio::test]
async fn odd_rows_are_served_as_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "included": [
                { "id": 1, "type": "new-player", "attributes": { "name": "John Doe" } },
                { "id": 2, "type": "new-player", "attributes": null }
            ],
            "data": [
                { "attributes": { "new_player_id": "1", "stat_type": "Points", "line_score": "21.5", "team": 7 } },
                { "attributes": null },
                { "attributes": { "new_player_id": 2, "stat_type": "Hitter Fantasy Score", "line_score": 9, "team": null } }
            ]
        })))
        .mount(&server)
        .await;

    let response = get(app(&server, 2_000), "/api/props?league=nba").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([
            { "player": "John Doe", "stat": "Points", "line": "21.5", "team": "7", "league": "NBA" },
            { "player": "Unknown", "team": "", "league": "NBA" },
            { "player": "Unknown", "stat": "Hitter Fantasy Score", "line": 9, "team": "", "league": "NBA" }
        ])
    );

    let response = get(app(&server, 2_000), "/api/generate-pdf?league=nba").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn props_route_defaults_to_nba() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("league_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let response = get(app(&server, 2_000), "/api/props").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn league_keys_resolve_case_insensitively() {
    for (key, id, label) in [
        ("NBA", "7", "NBA"),
        ("mlb", "10", "MLB"),
        ("Nfl", "9", "NFL"),
        ("nHl", "2", "NHL"),
        ("TENNIS", "14", "TENNIS"),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("league_id", id))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [ { "attributes": { "stat_type": "Aces", "line_score": 5.5 } } ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = get(app(&server, 2_000), &format!("/api/props?league={key}")).await;

        assert_eq!(response.status(), StatusCode::OK, "league {key}");
        assert_eq!(body_json(response).await[0]["league"], label);
    }
}

#[tokio::test]
async fn unsupported_league_never_reaches_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(board()))
        .expect(0)
        .mount(&server)
        .await;

    for uri in ["/api/props?league=wnba", "/api/generate-pdf?league=wnba"] {
        let response = get(app(&server, 2_000), uri).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Unsupported league: wnba" })
        );
    }
}

#[tokio::test]
async fn upstream_error_status_returns_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let response = get(app(&server, 2_000), "/api/props?league=nfl").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("failed to fetch projections"), "{error}");
}

#[tokio::test]
async fn upstream_timeout_returns_500_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(board())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    for uri in ["/api/props?league=nba", "/api/generate-pdf?league=nba"] {
        let response = get(app(&server, 100), uri).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(!body["error"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn malformed_upstream_body_returns_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Access denied"))
        .mount(&server)
        .await;

    let response = get(app(&server, 2_000), "/api/generate-pdf?league=mlb").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/json"));
}

#[tokio::test]
async fn generate_pdf_streams_attachment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("league_id", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(board()))
        .expect(1)
        .mount(&server)
        .await;

    let response = get(app(&server, 2_000), "/api/generate-pdf?league=mlb").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=prizepicks_mlb_"));
    assert!(disposition.ends_with(".pdf"));
    // attachment; filename=prizepicks_mlb_YYYY-MM-DD.pdf
    let date = &disposition["attachment; filename=prizepicks_mlb_".len()..disposition.len() - 4];
    assert_eq!(date.len(), 10);
    assert_eq!(date.as_bytes()[4], b'-');
    assert_eq!(date.as_bytes()[7], b'-');

    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF-"));

    let find = |needle: &[u8]| bytes.windows(needle.len()).position(|w| w == needle);
    let john = find(b"(John Doe)").unwrap();
    let jane = find(b"(Jane Roe)").unwrap();
    let unknown = find(b"(Unknown)").unwrap();
    assert!(john < jane && jane < unknown);
}

#[tokio::test]
async fn generate_pdf_with_empty_board_is_header_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [], "included": [] })))
        .mount(&server)
        .await;

    let response = get(app(&server, 2_000), "/api/generate-pdf?league=tennis").await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body_bytes(response).await;

    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);

    let contains = |needle: &[u8]| bytes.windows(needle.len()).any(|w| w == needle);
    assert!(contains(b" TENNIS)"));
    assert!(contains(b"(Player)"));
    assert!(contains(b"(Team)"));
}
