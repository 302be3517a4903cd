use std::{collections::BTreeSet, net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State, WebSocketUpgrade},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use shared::{
    domain::{ContactMethod, OrderId, PRIVACY_POLICY_PATH},
    error::{ApiError, ErrorCode, FormError},
    order::OrderForm,
    protocol::{FormAction, OrderSnapshot},
};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeFile, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod api;
mod app_state;
mod config;
mod pages;

use api::{next_order_event, spawn_submission, submit_detached};
use app_state::AppState;
use config::load_settings;
use pages::{landing::render_landing, order::render_order_page};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(
        submit_delay_ms = settings.submit_delay_ms,
        static_dir = %settings.static_dir.display(),
        "settings loaded"
    );

    let app = build_router(Arc::new(AppState::new(settings)));

    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let privacy_policy = ServeFile::new(state.settings.static_dir.join("privacy.pdf"));
    let body_limit = state.settings.max_body_bytes;

    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(landing_page))
        .route("/order", get(order_page).post(submit_order_form))
        .route_service(PRIVACY_POLICY_PATH, privacy_policy)
        .route("/api/orders", post(create_order))
        .route("/api/orders/:order_id", get(get_order))
        .route("/api/orders/:order_id/actions", post(apply_order_action))
        .route("/api/orders/:order_id/submit", post(submit_order))
        .route("/api/orders/:order_id/events", get(order_events))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::AgreementRequired => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Conflict => StatusCode::CONFLICT,
    }
}

fn api_error(error: impl Into<ApiError>) -> (StatusCode, Json<ApiError>) {
    let error = error.into();
    (status_for(error.code), Json(error))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn landing_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_landing(state.settings.public_url.as_ref()))
}

async fn order_page() -> Html<String> {
    Html(render_order_page(&OrderForm::new(), &[]))
}

/// Builds a form from urlencoded fields. Repeated `service` keys select
/// several chips; a duplicated index still selects its chip once.
fn form_from_fields(fields: &[(String, String)]) -> Result<OrderForm, FormError> {
    let mut form = OrderForm::new();
    let mut services = BTreeSet::new();

    for (key, value) in fields {
        match key.as_str() {
            "name" => form.set_name(value),
            "phone" => form.set_phone(value),
            "description" => form.set_description(value),
            "service" => {
                let index = value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| FormError::InvalidService(value.clone()))?;
                services.insert(index);
            }
            "contact" if !value.is_empty() => {
                form.select_contact(value.parse::<ContactMethod>()?);
            }
            "agree" => form.set_agree(matches!(value.as_str(), "on" | "true" | "1")),
            _ => {}
        }
    }
    for index in services {
        form.toggle_service(index)?;
    }
    Ok(form)
}

async fn submit_order_form(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<(StatusCode, Html<String>), (StatusCode, Json<ApiError>)> {
    let mut form = form_from_fields(&fields).map_err(api_error)?;

    match submit_detached(&mut form, state.submit_delay()).await {
        Ok(notice) => {
            info!(services = form.services().len(), "order form submitted");
            Ok((StatusCode::OK, Html(render_order_page(&form, &[notice]))))
        }
        Err(error) => {
            let Some(notice) = error.notice() else {
                return Err(api_error(error));
            };
            warn!(%error, "order form rejected");
            Ok((
                status_for(error.code()),
                Html(render_order_page(&form, &[notice])),
            ))
        }
    }
}

async fn create_order(State(state): State<Arc<AppState>>) -> (StatusCode, Json<OrderSnapshot>) {
    let snapshot = state.orders.create().await;
    (StatusCode::CREATED, Json(snapshot))
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderSnapshot>, (StatusCode, Json<ApiError>)> {
    let snapshot = state
        .orders
        .snapshot(OrderId(order_id))
        .await
        .map_err(api_error)?;
    Ok(Json(snapshot))
}

async fn apply_order_action(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<Uuid>,
    Json(action): Json<FormAction>,
) -> Result<Json<OrderSnapshot>, (StatusCode, Json<ApiError>)> {
    let snapshot = state
        .orders
        .apply(OrderId(order_id), action)
        .await
        .map_err(api_error)?;
    Ok(Json(snapshot))
}

async fn submit_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<Uuid>,
) -> Result<(StatusCode, Json<OrderSnapshot>), (StatusCode, Json<ApiError>)> {
    let order_id = OrderId(order_id);
    let snapshot = state
        .orders
        .begin_submit(order_id)
        .await
        .map_err(api_error)?;
    info!(%order_id, "order submission started");
    spawn_submission(
        state.orders.clone(),
        state.events.clone(),
        order_id,
        state.submit_delay(),
    );
    Ok((StatusCode::ACCEPTED, Json(snapshot)))
}

async fn order_events(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, Json<ApiError>)> {
    let order_id = OrderId(order_id);
    state
        .orders
        .snapshot(order_id)
        .await
        .map_err(api_error)?;
    Ok(ws.on_upgrade(move |socket| ws_connection(state, socket, order_id)))
}

async fn ws_connection(
    state: Arc<AppState>,
    socket: axum::extract::ws::WebSocket,
    order_id: OrderId,
) {
    use axum::extract::ws::Message;
    use futures::{SinkExt, StreamExt};

    let (mut sender, mut receiver) = socket.split();
    let mut events_rx = state.events.subscribe();

    let send_task = tokio::spawn(async move {
        while let Some(event) = next_order_event(&mut events_rx, order_id).await {
            let text = match serde_json::to_string(&event) {
                Ok(v) => v,
                Err(_) => continue,
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(_msg)) = receiver.next().await {}

    send_task.abort();
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
