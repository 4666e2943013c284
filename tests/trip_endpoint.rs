//! End-to-end tests for the trip aggregation endpoint
//!
//! Drives the handler directly with in-memory stores (and failing fakes for
//! outage paths), asserting on status codes, headers, and exact JSON bodies.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bytes::Bytes;
use clap::Parser;
use http_body_util::{BodyExt, Full};
use hyper::{Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;

use waypoint::db::schemas::TripDoc;
use waypoint::db::{ExperienceStore, MemoryExperienceStore, MemoryTripStore, TripStore};
use waypoint::routes::handle_get_trip;
use waypoint::types::{Result, WaypointError};
use waypoint::{Args, AppState};

fn bearer_for(sub: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{}"}}"#, sub));
    format!("Bearer {}.{}.unchecked", header, payload)
}

fn trip(owner: &str, id: &str, refs: &[&str]) -> TripDoc {
    TripDoc {
        owner_id: owner.into(),
        id: id.into(),
        name: "Highlands".into(),
        description: "A week in the highlands".into(),
        start_date: "2024-09-01".into(),
        end_date: "2024-09-08".into(),
        experience_refs: refs.iter().map(|s| s.to_string()).collect(),
    }
}

fn state_with(
    trips: Vec<TripDoc>,
    experiences: Vec<Value>,
) -> Arc<AppState> {
    state_with_stores(
        Arc::new(MemoryTripStore::with_trips(trips)),
        Arc::new(MemoryExperienceStore::with_experiences(experiences)),
    )
}

fn state_with_stores(
    trip_store: Arc<dyn TripStore>,
    experience_store: Arc<dyn ExperienceStore>,
) -> Arc<AppState> {
    let args = Args::parse_from(["waypoint"]);
    Arc::new(AppState::new(args, trip_store, experience_store, None))
}

async fn body_json(resp: Response<Full<Bytes>>) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_string(resp: Response<Full<Bytes>>) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn aggregates_all_verified_experiences() {
    let state = state_with(
        vec![trip("user-1", "trip-1", &["exp-a", "exp-b"])],
        vec![
            serde_json::json!({"id": "exp-a", "status": "VERIFIED", "title": "Hike"}),
            serde_json::json!({"id": "exp-b", "status": "VERIFIED", "title": "Distillery"}),
        ],
    );

    let resp = handle_get_trip(state, Some(&bearer_for("user-1")), "trip-1").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["owner_id"], "user-1");
    assert_eq!(body["id"], "trip-1");
    assert_eq!(body["name"], "Highlands");
    assert_eq!(body["start_date"], "2024-09-01");
    assert_eq!(body["end_date"], "2024-09-08");
    assert_eq!(body["description"], "A week in the highlands");

    let experiences = body["experiences"].as_array().unwrap();
    assert_eq!(experiences.len(), 2);
    assert_eq!(experiences[0]["id"], "exp-a");
    assert_eq!(experiences[0]["title"], "Hike");
    assert_eq!(experiences[1]["id"], "exp-b");
}

#[tokio::test]
async fn unverified_reference_is_omitted_with_200() {
    let state = state_with(
        vec![trip("user-1", "trip-1", &["exp-a", "exp-b"])],
        vec![
            serde_json::json!({"id": "exp-a", "status": "VERIFIED"}),
            serde_json::json!({"id": "exp-b", "status": "PENDING"}),
        ],
    );

    let resp = handle_get_trip(state, Some(&bearer_for("user-1")), "trip-1").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let experiences = body["experiences"].as_array().unwrap();
    assert_eq!(experiences.len(), 1);
    assert_eq!(experiences[0]["id"], "exp-a");
}

#[tokio::test]
async fn missing_authorization_header() {
    let state = state_with(vec![], vec![]);
    let resp = handle_get_trip(state, None, "trip-1").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_string(resp).await,
        r#"{"error":"Authorization header missing"}"#
    );
}

#[tokio::test]
async fn wrong_scheme_is_invalid_format() {
    let state = state_with(vec![], vec![]);
    let resp = handle_get_trip(state, Some("Token abc.def.ghi"), "trip-1").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_string(resp).await,
        r#"{"error":"Invalid Authorization header format"}"#
    );
}

#[tokio::test]
async fn malformed_token_surfaces_decode_failure() {
    let state = state_with(vec![], vec![]);
    let resp = handle_get_trip(state, Some("Bearer nodotsatall"), "trip-1").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(resp).await;
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Error decoding token:"));
    assert!(message.contains("expected 3 token segments"));
}

#[tokio::test]
async fn credential_without_subject_is_rejected() {
    let state = state_with(vec![], vec![]);
    let payload = URL_SAFE_NO_PAD.encode(br#"{"role":"guest"}"#);
    let header = format!("Bearer h.{}.s", payload);

    let resp = handle_get_trip(state, Some(&header), "trip-1").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_string(resp).await.contains("missing sub claim"));
}

#[tokio::test]
async fn unknown_trip_is_not_found() {
    let state = state_with(vec![trip("user-1", "trip-1", &[])], vec![]);
    let resp = handle_get_trip(state, Some(&bearer_for("user-1")), "trip-2").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(resp).await, r#"{"error":"Trip not found"}"#);
}

#[tokio::test]
async fn foreign_trip_is_not_found() {
    // user-2's claim cannot reach user-1's trip: lookups pin the owner key
    let state = state_with(vec![trip("user-1", "trip-1", &[])], vec![]);
    let resp = handle_get_trip(state, Some(&bearer_for("user-2")), "trip-1").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

struct FailingTripStore;

#[async_trait]
impl TripStore for FailingTripStore {
    async fn get_trip(&self, _owner_id: &str, _trip_id: &str) -> Result<Option<TripDoc>> {
        Err(WaypointError::StoreUnavailable(
            "Failed to get trip: connection reset".into(),
        ))
    }
}

#[tokio::test]
async fn trip_store_failure_is_500() {
    let state = state_with_stores(
        Arc::new(FailingTripStore),
        Arc::new(MemoryExperienceStore::new()),
    );
    let resp = handle_get_trip(state, Some(&bearer_for("user-1")), "trip-1").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(resp).await.contains("Failed to get trip"));
}

struct FlakyExperienceStore {
    good: MemoryExperienceStore,
}

#[async_trait]
impl ExperienceStore for FlakyExperienceStore {
    async fn query_verified(&self, experience_id: &str) -> Result<Vec<Value>> {
        if experience_id == "exp-b" {
            return Err(WaypointError::StoreUnavailable(
                "Failed to get trip experience: index timeout".into(),
            ));
        }
        self.good.query_verified(experience_id).await
    }
}

#[tokio::test]
async fn experience_query_failure_discards_partial_results() {
    let state = state_with_stores(
        Arc::new(MemoryTripStore::with_trips(vec![trip(
            "user-1",
            "trip-1",
            &["exp-a", "exp-b"],
        )])),
        Arc::new(FlakyExperienceStore {
            good: MemoryExperienceStore::with_experiences(vec![serde_json::json!({
                "id": "exp-a", "status": "VERIFIED", "title": "Hike"
            })]),
        }),
    );

    let resp = handle_get_trip(state, Some(&bearer_for("user-1")), "trip-1").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // No experience data leaks into an error response, including the one that
    // resolved before the failure
    let body = body_string(resp).await;
    assert!(body.contains("Failed to get trip experience"));
    assert!(!body.contains("Hike"));
    assert!(!body.contains("exp-a"));
}

#[tokio::test]
async fn whole_valued_decimals_serialize_as_integers() {
    let state = state_with(
        vec![trip("user-1", "trip-1", &["exp-a", "exp-b"])],
        vec![
            serde_json::json!({"id": "exp-a", "status": "VERIFIED", "price": 5.0}),
            serde_json::json!({"id": "exp-b", "status": "VERIFIED", "price": 5.5}),
        ],
    );

    let resp = handle_get_trip(state, Some(&bearer_for("user-1")), "trip-1").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_string(resp).await;
    assert!(body.contains(r#""price":5,"#) || body.contains(r#""price":5}"#));
    assert!(body.contains(r#""price":5.5"#));
    assert!(!body.contains("5.0"));
}

#[tokio::test]
async fn repeated_requests_yield_identical_bytes() {
    let make_state = || {
        state_with(
            vec![trip("user-1", "trip-1", &["exp-b", "exp-a"])],
            vec![
                serde_json::json!({"id": "exp-a", "status": "VERIFIED"}),
                serde_json::json!({"id": "exp-b", "status": "VERIFIED"}),
            ],
        )
    };

    let first = body_string(
        handle_get_trip(make_state(), Some(&bearer_for("user-1")), "trip-1").await,
    )
    .await;
    let second = body_string(
        handle_get_trip(make_state(), Some(&bearer_for("user-1")), "trip-1").await,
    )
    .await;

    assert_eq!(first, second);

    // References iterate in sorted order regardless of insertion order
    let body: Value = serde_json::from_str(&first).unwrap();
    let ids: Vec<&str> = body["experiences"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["exp-a", "exp-b"]);
}

#[tokio::test]
async fn response_carries_cors_headers() {
    let state = state_with(vec![trip("user-1", "trip-1", &[])], vec![]);
    let resp = handle_get_trip(state, Some(&bearer_for("user-1")), "trip-1").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let headers = resp.headers();
    assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
    assert_eq!(
        headers.get("Access-Control-Allow-Methods").unwrap(),
        "OPTIONS, POST, GET"
    );
    assert_eq!(
        headers.get("Access-Control-Allow-Headers").unwrap(),
        "Content-Type"
    );
}
