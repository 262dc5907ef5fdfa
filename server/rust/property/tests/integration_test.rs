use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use rental_auth::{Role, TokenCodec, TokenConfig, TokenIssuer, TokenVerifier};
use rental_property_server::adapter::handler::{router, AppState};
use rental_property_server::adapter::repository::InMemoryPropertyStore;

const TEST_SECRET: &str = "property-integration-secret";

struct TestApp {
    app: Router,
    issuer: TokenIssuer,
}

impl TestApp {
    fn token(&self, id: i64, role: Role) -> String {
        self.issuer.issue(id, role).unwrap()
    }
}

fn codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::from_config(&TokenConfig::new(TEST_SECRET)).unwrap())
}

fn make_app() -> TestApp {
    let codec = codec();
    let store = Arc::new(InMemoryPropertyStore::new());
    let state = AppState::new(
        store.clone(),
        store,
        Arc::new(TokenVerifier::new(codec.clone())),
        None,
    );
    TestApp {
        app: router(state),
        issuer: TokenIssuer::new(codec, chrono::Duration::minutes(30)),
    }
}

async fn send_raw(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let www_auth = resp
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, www_auth, json)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    let body = match body {
        Some(v) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let (status, _, json) = send_raw(app, builder.body(body).unwrap()).await;
    (status, json)
}

async fn create_property(app: &Router, token: &str, name: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/properties",
        Some(token),
        Some(json!({"name": name, "address": "1 Main St", "property_type": "apartment"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn create_unit(app: &Router, token: &str, property_id: i64, number: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/v1/units",
        Some(token),
        Some(json!({"property_id": property_id, "unit_number": number, "monthly_rent": 1200.0})),
    )
    .await
}

#[tokio::test]
async fn test_owner_creates_property_with_token_subject() {
    let t = make_app();
    let alice = t.token(7, Role::Owner);

    let (status, body) = send(
        &t.app,
        "POST",
        "/api/v1/properties",
        Some(&alice),
        Some(json!({
            "name": "Sunrise",
            "address": "1 Main St",
            "property_type": "apartment",
            "owner_id": 99
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["owner_id"], 7);
    assert_eq!(body["property_type"], "APARTMENT");
}

#[tokio::test]
async fn test_tenant_cannot_create_property() {
    let t = make_app();
    let tenant = t.token(8, Role::Tenant);

    let (status, body) = send(
        &t.app,
        "POST",
        "/api/v1/properties",
        Some(&tenant),
        Some(json!({"name": "X", "address": "Y", "property_type": "HOUSE"})),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "RENTAL_AUTH_PERMISSION_DENIED");
}

#[tokio::test]
async fn test_admin_has_no_implicit_owner_rights() {
    let t = make_app();
    let admin = t.token(1, Role::Admin);

    let (status, _) = send(
        &t.app,
        "POST",
        "/api/v1/properties",
        Some(&admin),
        Some(json!({"name": "X", "address": "Y", "property_type": "HOUSE"})),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_missing_token_is_unauthenticated() {
    let t = make_app();
    let req = Request::builder()
        .uri("/api/v1/properties")
        .body(Body::empty())
        .unwrap();

    let (status, www_auth, body) = send_raw(&t.app, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(www_auth.as_deref(), Some("Bearer"));
    assert_eq!(body["error"]["code"], "RENTAL_AUTH_UNAUTHENTICATED");
}

#[tokio::test]
async fn test_unauthenticated_check_runs_before_role_check() {
    let t = make_app();
    let (status, _) = send(
        &t.app,
        "POST",
        "/api/v1/properties",
        None,
        Some(json!({"name": "X", "address": "Y", "property_type": "HOUSE"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_unauthenticated() {
    let t = make_app();
    let expired = TokenIssuer::new(codec(), chrono::Duration::zero())
        .issue(7, Role::Owner)
        .unwrap();

    let (status, body) = send(&t.app, "GET", "/api/v1/properties", Some(&expired), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Could not validate credentials");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthenticated() {
    let t = make_app();
    let foreign_codec =
        Arc::new(TokenCodec::from_config(&TokenConfig::new("some-other-secret")).unwrap());
    let forged = TokenIssuer::new(foreign_codec, chrono::Duration::minutes(30))
        .issue(7, Role::Owner)
        .unwrap();

    let (status, _) = send(&t.app, "GET", "/api/v1/properties", Some(&forged), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_other_owner_property_is_not_found_and_list_is_scoped() {
    let t = make_app();
    let alice = t.token(1, Role::Owner);
    let bob = t.token(2, Role::Owner);

    let property = create_property(&t.app, &alice, "Alice House").await;
    let id = property["id"].as_i64().unwrap();
    create_property(&t.app, &bob, "Bob House").await;

    let (status, body) = send(&t.app, "GET", &format!("/api/v1/properties/{id}"), Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RENTAL_PROPERTY_NOT_FOUND");

    let (status, _) = send(&t.app, "DELETE", &format!("/api/v1/properties/{id}"), Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&t.app, "GET", "/api/v1/properties", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bob House"]);
}

#[tokio::test]
async fn test_units_lifecycle_and_cascade_delete() {
    let t = make_app();
    let alice = t.token(1, Role::Owner);
    let property = create_property(&t.app, &alice, "Alice House").await;
    let property_id = property["id"].as_i64().unwrap();

    let (status, unit) = create_unit(&t.app, &alice, property_id, "101").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(unit["status"], "AVAILABLE");
    let unit_id = unit["id"].as_i64().unwrap();

    let (status, body) = send(
        &t.app,
        "PATCH",
        &format!("/api/v1/units/{unit_id}/status?status_value=occupied"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OCCUPIED");

    let (status, body) = send(
        &t.app,
        "GET",
        &format!("/api/v1/properties/{property_id}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["units"].as_array().unwrap().len(), 1);

    let (status, _) = send(
        &t.app,
        "DELETE",
        &format!("/api/v1/properties/{property_id}"),
        Some(&alice),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&t.app, "GET", &format!("/api/v1/units/{unit_id}"), Some(&alice), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unit_on_foreign_property_is_not_found() {
    let t = make_app();
    let alice = t.token(1, Role::Owner);
    let bob = t.token(2, Role::Owner);
    let property = create_property(&t.app, &alice, "Alice House").await;
    let property_id = property["id"].as_i64().unwrap();

    let (status, _) = create_unit(&t.app, &bob, property_id, "101").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, unit) = create_unit(&t.app, &alice, property_id, "102").await;
    let unit_id = unit["id"].as_i64().unwrap();
    let (status, body) = send(&t.app, "GET", &format!("/api/v1/units/{unit_id}"), Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RENTAL_PROPERTY_UNIT_NOT_FOUND");

    let (status, body) = send(
        &t.app,
        "GET",
        &format!("/api/v1/units?property_id={property_id}"),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_unit_rejects_negative_rent() {
    let t = make_app();
    let alice = t.token(1, Role::Owner);
    let property = create_property(&t.app, &alice, "Alice House").await;

    let (status, body) = send(
        &t.app,
        "POST",
        "/api/v1/units",
        Some(&alice),
        Some(json!({"property_id": property["id"], "unit_number": "1", "monthly_rent": -1.0})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"][0]["field"], "monthly_rent");
}

#[tokio::test]
async fn test_health_is_public() {
    let t = make_app();
    let (status, _) = send(&t.app, "GET", "/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_blank_required_fields_rejected() {
    let t = make_app();
    let alice = t.token(1, Role::Owner);

    let (status, body) = send(
        &t.app,
        "POST",
        "/api/v1/properties",
        Some(&alice),
        Some(json!({"name": "   ", "address": "  ", "property_type": " "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "RENTAL_PROPERTY_VALIDATION_FAILED");

    let (status, body) = send(&t.app, "GET", "/api/v1/properties", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let property = create_property(&t.app, &alice, "Alice House").await;
    let (status, _) = create_unit(&t.app, &alice, property["id"].as_i64().unwrap(), "   ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
