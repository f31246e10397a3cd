//! Router-level tests: status codes and envelope shape.

use alma_core::Registry;
use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn call(
  app: &Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(b) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(b.to_string())),
    None => builder.body(Body::empty()),
  }
  .unwrap();

  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  (status, serde_json::from_slice(&bytes).unwrap())
}

fn site_body() -> Value {
  json!({ "name": "Bello Principal", "address": "Calle 50", "status": "Active" })
}

fn participant_body(document: &str, site_id: i64) -> Value {
  json!({
    "first_names": "Juan",
    "last_names": "Pérez",
    "document_type": "TI",
    "document_number": document,
    "birth_date": "2010-05-15",
    "gender": "MALE",
    "enrollment_date": "2023-01-10",
    "status": "ACTIVE",
    "site_id": site_id
  })
}

fn guardian_body(document: &str, participant_id: i64) -> Value {
  json!({
    "first_names": "María",
    "last_names": "Gómez",
    "document_type": "CC",
    "document_number": document,
    "relationship": "Mother",
    "phone": "3001234567",
    "email": "a@b.com",
    "address": "Carrera 60",
    "participant_id": participant_id
  })
}

fn paid_fee_body() -> Value {
  json!({
    "participant_id": 1,
    "guardian_id": 1,
    "month": 3,
    "year": 2024,
    "amount": 50000,
    "status": "PAID",
    "payment_method": "TRANSFER",
    "payment_date": "2024-03-05"
  })
}

#[tokio::test]
async fn health_is_not_enveloped() {
  let app = api_router(Registry::new());
  let (status, body) = call(&app, "GET", "/health", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_returns_201_with_envelope() {
  let app = api_router(Registry::new());
  let (status, body) = call(&app, "POST", "/sedes", Some(site_body())).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(body["data"]["id"], 1);
  assert_eq!(body["data"]["name"], "Bello Principal");
  assert!(body["error"].is_null());
}

#[tokio::test]
async fn missing_record_is_404() {
  let app = api_router(Registry::new());
  let (status, body) = call(&app, "GET", "/participantes/9", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["data"].is_null());
  assert_eq!(body["error"]["message"], "participant 9 not found");
}

#[tokio::test]
async fn validation_failures_are_400() {
  let app = api_router(Registry::new());
  let (status, body) =
    call(&app, "POST", "/participantes", Some(participant_body("123", 1))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"]["message"], "site with id 1 does not exist");
}

#[tokio::test]
async fn malformed_body_is_an_enveloped_400() {
  let app = api_router(Registry::new());
  let (status, body) =
    call(&app, "POST", "/sedes", Some(json!({ "address": "no name" }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["data"].is_null());
  assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn dependency_conflict_is_409() {
  let app = api_router(Registry::new());
  call(&app, "POST", "/sedes", Some(site_body())).await;
  call(&app, "POST", "/participantes", Some(participant_body("123", 1))).await;

  let (status, body) = call(&app, "DELETE", "/sedes/1", None).await;
  assert_eq!(status, StatusCode::CONFLICT);
  let message = body["error"]["message"].as_str().unwrap();
  assert!(message.contains("1 participant(s)"), "{message}");
}

#[tokio::test]
async fn full_lifecycle_over_http() {
  let app = api_router(Registry::new());

  let (status, body) = call(&app, "POST", "/sedes", Some(site_body())).await;
  assert_eq!(status, StatusCode::CREATED);

  let (_, body_p) =
    call(&app, "POST", "/participantes", Some(participant_body("123", 1))).await;
  assert_eq!(body_p["data"]["site"]["id"], body["data"]["id"]);

  let (status, _) =
    call(&app, "POST", "/acudientes", Some(guardian_body("222", 1))).await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, fee) =
    call(&app, "POST", "/mensualidades", Some(paid_fee_body())).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(fee["data"]["guardian"]["id"], 1);
  assert_eq!(fee["data"]["site"]["name"], "Bello Principal");

  let (_, list) = call(&app, "GET", "/acudientes/participante/1", None).await;
  assert_eq!(list["data"].as_array().unwrap().len(), 1);
  let (_, list) = call(&app, "GET", "/mensualidades/participante/1", None).await;
  assert_eq!(list["data"].as_array().unwrap().len(), 1);

  let (_, stats) = call(&app, "GET", "/dashboard/stats", None).await;
  assert_eq!(stats["data"]["participant_count"], 1);
  assert_eq!(stats["data"]["guardian_count"], 1);
  assert_eq!(stats["data"]["monthly_fee_count"], 1);

  let (status, body) = call(&app, "DELETE", "/participantes/1", None).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert!(
    body["error"]["message"]
      .as_str()
      .unwrap()
      .contains("1 guardian(s) and 1 monthly fee(s)")
  );

  for uri in ["/mensualidades/1", "/acudientes/1", "/participantes/1"] {
    let (status, body) = call(&app, "DELETE", uri, None).await;
    assert_eq!(status, StatusCode::OK, "{uri}");
    assert_eq!(body["data"]["id"], 1);
  }
}

#[tokio::test]
async fn update_replaces_the_record() {
  let app = api_router(Registry::new());
  call(&app, "POST", "/sedes", Some(site_body())).await;

  let mut changed = site_body();
  changed["name"] = json!("Bello Norte");
  let (status, body) = call(&app, "PUT", "/sedes/1", Some(changed)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["name"], "Bello Norte");

  let (status, _) = call(&app, "PUT", "/sedes/2", Some(site_body())).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}
