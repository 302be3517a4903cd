use super::*;
use axum::{body, body::Body, http::Request};
use shared::protocol::{NoticeKind, OrderEvent};
use std::time::Duration;
use tower::ServiceExt;

fn test_app(submit_delay_ms: u64) -> (Router, Arc<AppState>) {
    let settings = config::Settings {
        submit_delay_ms,
        max_open_orders: 16,
        ..config::Settings::default()
    };
    let state = Arc::new(AppState::new(settings));
    (build_router(state.clone()), state)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

async fn create(app: &Router) -> OrderSnapshot {
    let request = Request::post("/api/orders")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    serde_json::from_str(&body_text(response).await).expect("json")
}

async fn act(
    app: &Router,
    order_id: OrderId,
    action: serde_json::Value,
) -> axum::response::Response {
    let request = Request::post(format!("/api/orders/{order_id}/actions"))
        .header("content-type", "application/json")
        .body(Body::from(action.to_string()))
        .expect("request");
    app.clone().oneshot(request).await.expect("response")
}

fn form_request(body: &str) -> Request<Body> {
    Request::post("/order")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (app, _state) = test_app(0);
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn landing_page_is_served() {
    let (app, _state) = test_app(0);
    let request = Request::get("/").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("application/ld+json"));
    assert!(html.contains("href=\"/order\""));
}

#[tokio::test]
async fn order_page_renders_empty_form() {
    let (app, _state) = test_app(0);
    let request = Request::get("/order").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("заказать проект"));
    assert!(html.contains("value=\"+7\""));
}

#[tokio::test]
async fn posted_form_without_agreement_keeps_values() {
    let (app, _state) = test_app(0);
    let response = app
        .oneshot(form_request(
            "name=%D0%98%D0%B2%D0%B0%D0%BD&phone=89161234567&service=2&contact=telegram",
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body_text(response).await;
    assert!(html.contains("Подтвердите соглашение"));
    assert!(html.contains("value=\"Иван\""));
    assert!(html.contains("value=\"+7 (916) 123-45-67\""));
    assert!(html.contains("name=\"service\" value=\"2\" checked"));
    assert!(html.contains("value=\"telegram\" checked"));
}

#[tokio::test]
async fn posted_form_with_agreement_reports_success() {
    let (app, _state) = test_app(1);
    let long_name = "a".repeat(40);
    let response = app
        .oneshot(form_request(&format!(
            "name={long_name}&phone=7&service=0&service=0&service=5&agree=on"
        )))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Заявка отправлена"));
    assert!(html.contains(&format!("value=\"{}\"", "a".repeat(25))));
    assert!(html.contains("name=\"service\" value=\"0\" checked"));
    assert!(html.contains("name=\"service\" value=\"5\" checked"));
    assert!(html.contains(">отправить</button>"));
}

#[tokio::test]
async fn posted_form_with_unknown_service_is_rejected() {
    let (app, _state) = test_app(0);
    let response = app
        .oneshot(form_request("service=9&agree=on"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_order_returns_not_found() {
    let (app, _state) = test_app(0);
    let request = Request::get(format!("/api/orders/{}", OrderId::new()))
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ApiError = serde_json::from_str(&body_text(response).await).expect("json");
    assert!(matches!(error.code, ErrorCode::NotFound));
}

#[tokio::test]
async fn actions_route_updates_snapshot() {
    let (app, _state) = test_app(0);
    let created = create(&app).await;
    assert_eq!(created.phone, "+7");

    let response = act(
        &app,
        created.order_id,
        serde_json::json!({ "type": "set_phone", "payload": { "raw": "71234567890" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let snapshot: OrderSnapshot = serde_json::from_str(&body_text(response).await).expect("json");
    assert_eq!(snapshot.phone, "+7 (123) 456-78-90");

    let response = act(
        &app,
        created.order_id,
        serde_json::json!({ "type": "toggle_service", "payload": { "index": 10 } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submit_route_requires_agreement() {
    let (app, _state) = test_app(0);
    let created = create(&app).await;

    let request = Request::post(format!("/api/orders/{}/submit", created.order_id))
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let request = Request::get(format!("/api/orders/{}", created.order_id))
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    let snapshot: OrderSnapshot = serde_json::from_str(&body_text(response).await).expect("json");
    assert!(!snapshot.submitting);
    assert_eq!(snapshot.notices[0].kind, NoticeKind::AgreementRequired);
}

#[tokio::test]
async fn submit_route_completes_after_delay() {
    let (app, state) = test_app(20);
    let mut events = state.events.subscribe();
    let created = create(&app).await;
    let response = act(
        &app,
        created.order_id,
        serde_json::json!({ "type": "set_agree", "payload": { "value": true } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::post(format!("/api/orders/{}/submit", created.order_id))
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let snapshot: OrderSnapshot = serde_json::from_str(&body_text(response).await).expect("json");
    assert!(snapshot.submitting);

    let request = Request::post(format!("/api/orders/{}/submit", created.order_id))
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let notice = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match events.recv().await.expect("event") {
                OrderEvent::Notice { notice, .. } => break notice,
                OrderEvent::SubmissionStarted { .. } => continue,
            }
        }
    })
    .await
    .expect("submission finished");
    assert_eq!(notice.kind, NoticeKind::Submitted);

    let snapshot = state.orders.snapshot(created.order_id).await.expect("snapshot");
    assert!(!snapshot.submitting);
    assert_eq!(snapshot.notices.len(), 1);
}

#[test]
fn form_fields_apply_input_rules() {
    let fields = vec![
        ("description".to_string(), "ж".repeat(400)),
        ("phone".to_string(), "".to_string()),
        ("contact".to_string(), "".to_string()),
    ];
    let form = form_from_fields(&fields).expect("form");
    assert_eq!(form.description().chars().count(), 300);
    assert_eq!(form.phone().digits(), "7");
    assert_eq!(form.contact(), None);

    let bad = vec![("contact".to_string(), "pigeon".to_string())];
    assert!(matches!(
        form_from_fields(&bad),
        Err(FormError::UnknownContactMethod(_))
    ));
}
