use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use chrono::{SecondsFormat, Utc};
use utoipa::OpenApi;

use crate::{
    dto::{ContactRequest, ContactResponse, HealthResponse, StatusResponse},
    handlers::AppState,
    service::{ContactError, ValidationError},
};

const DELIVERY_FAILED: &str = "Une erreur est survenue lors de l'envoi. Veuillez réessayer.";
const ROUTE_NOT_FOUND: &str = "Route non trouvée";

#[derive(OpenApi)]
#[openapi(
    paths(root, health, submit_contact),
    components(schemas(ContactRequest, ContactResponse, StatusResponse, HealthResponse)),
    tags(
        (name = "contact", description = "Contact form API")
    )
)]
pub struct ApiDoc;

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn envelope(status: StatusCode, body: ContactResponse) -> Response {
    (status, Json(body)).into_response()
}

/// Contact form body, accepted as JSON or as an urlencoded form.
///
/// A body that cannot be read is answered like an empty submission.
pub struct ContactPayload(pub ContactRequest);

impl<S> FromRequest<S> for ContactPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let extracted = if is_form {
            Form::<ContactRequest>::from_request(req, state)
                .await
                .map(|Form(payload)| payload)
                .map_err(|e| e.body_text())
        } else {
            Json::<ContactRequest>::from_request(req, state)
                .await
                .map(|Json(payload)| payload)
                .map_err(|e| e.body_text())
        };

        extracted.map(Self).map_err(|reason| {
            tracing::warn!("Rejected unreadable contact body: {}", reason);
            envelope(
                StatusCode::BAD_REQUEST,
                ContactResponse::failure(ValidationError::MissingFields.to_string()),
            )
        })
    }
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API is online", body = StatusResponse)
    ),
    tag = "contact"
)]
#[debug_handler]
pub async fn root(State(state): State<AppState>) -> Response {
    let body = StatusResponse {
        message: format!(
            "API {} - Backend opérationnel ✅",
            state.service.brand_name()
        ),
        status: "online".to_string(),
        timestamp: now_timestamp(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "contact"
)]
#[debug_handler]
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "healthy".to_string(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        timestamp: now_timestamp(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Both emails were sent", body = ContactResponse),
        (status = 400, description = "Missing field or invalid email", body = ContactResponse),
        (status = 500, description = "Email delivery failed", body = ContactResponse)
    ),
    tag = "contact"
)]
#[debug_handler]
pub async fn submit_contact(
    State(state): State<AppState>,
    ContactPayload(payload): ContactPayload,
) -> Response {
    match state.service.submit_contact(payload).await {
        Ok(confirmation) => envelope(StatusCode::OK, ContactResponse::ok(confirmation.message)),
        Err(ContactError::Validation(e)) => {
            tracing::warn!("Rejected contact submission: {e}");
            envelope(StatusCode::BAD_REQUEST, ContactResponse::failure(e.to_string()))
        }
        Err(e) => {
            tracing::error!("Failed to send contact emails: {e}");
            envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                ContactResponse::failure(DELIVERY_FAILED),
            )
        }
    }
}

#[debug_handler]
pub async fn openapi() -> Response {
    (StatusCode::OK, Json(ApiDoc::openapi())).into_response()
}

pub async fn not_found() -> Response {
    envelope(
        StatusCode::NOT_FOUND,
        ContactResponse::failure(ROUTE_NOT_FOUND),
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::util::ServiceExt;

    use std::sync::Arc;

    use crate::{
        config::Config,
        handlers::{AppState, router},
        mailer::testing::RecordingMailer,
        service::{CONFIRMATION_MESSAGE, ContactService},
    };

    fn app(mailer: &Arc<RecordingMailer>) -> Router {
        let config: Config = serde_yaml::from_str(
            "email_user: owner@example.com\nemail_app_password: secret\n",
        )
        .unwrap();
        let service = ContactService::new(mailer.clone(), &config);
        router(AppState::new(Arc::new(service)))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(body: &Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "name": "Awa",
            "email": "awa@example.com",
            "budget": "vitrine",
            "message": "Bonjour"
        })
    }

    #[tokio::test]
    async fn root_reports_online() {
        let mailer = Arc::new(RecordingMailer::new());
        let (status, body) = send(
            app(&mailer),
            Request::get("/").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "online");
        assert_eq!(body["message"], "API MADU_TECH - Backend opérationnel ✅");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn health_reports_uptime() {
        let mailer = Arc::new(RecordingMailer::new());
        let (status, body) = send(
            app(&mailer),
            Request::get("/health").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["uptime"].as_f64().unwrap() >= 0.0);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn valid_json_submission_is_confirmed() {
        let mailer = Arc::new(RecordingMailer::new());
        let (status, body) = send(app(&mailer), post_json(&valid_body())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true, "message": CONFIRMATION_MESSAGE}));

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "owner@example.com");
        assert_eq!(sent[1].to, "awa@example.com");
    }

    #[tokio::test]
    async fn form_encoded_submission_is_accepted() {
        let mailer = Arc::new(RecordingMailer::new());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "name=Awa&email=awa%40example.com&budget=app&message=Bonjour%0Aencore",
            ))
            .unwrap();

        let (status, body) = send(app(&mailer), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].subject.contains("200k - 400k FCFA (Application web)"));
        assert!(sent[0].body_html.contains("Bonjour<br>encore"));
    }

    #[tokio::test]
    async fn missing_field_is_rejected_without_sending() {
        let mailer = Arc::new(RecordingMailer::new());
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("budget");

        let (status, body) = send(app(&mailer), post_json(&body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"success": false, "message": "Tous les champs sont requis"})
        );
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn numeric_budget_is_passed_through_as_text() {
        let mailer = Arc::new(RecordingMailer::new());
        let mut body = valid_body();
        body["budget"] = json!(5);

        let (status, body) = send(app(&mailer), post_json(&body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].subject.ends_with("Budget: 5"));
    }

    #[tokio::test]
    async fn unreadable_body_is_treated_as_missing_fields() {
        let mailer = Arc::new(RecordingMailer::new());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(app(&mailer), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Tous les champs sont requis");
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let mailer = Arc::new(RecordingMailer::new());
        let mut body = valid_body();
        body["email"] = json!("awa@example");

        let (status, body) = send(app(&mailer), post_json(&body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"success": false, "message": "Format d'email invalide"})
        );
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn delivery_failure_returns_generic_error() {
        let mailer = Arc::new(RecordingMailer::failing_on(2));
        let (status, body) = send(app(&mailer), post_json(&valid_body())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({
                "success": false,
                "message": "Une erreur est survenue lors de l'envoi. Veuillez réessayer."
            })
        );
        assert_eq!(mailer.sent().len(), 2);
    }

    #[tokio::test]
    async fn unknown_route_returns_not_found_envelope() {
        let mailer = Arc::new(RecordingMailer::new());
        let (status, body) = send(
            app(&mailer),
            Request::get("/api/unknown").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"success": false, "message": "Route non trouvée"}));
    }

    #[tokio::test]
    async fn wrong_method_returns_not_found_envelope() {
        let mailer = Arc::new(RecordingMailer::new());
        let (status, body) = send(
            app(&mailer),
            Request::get("/api/contact").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Route non trouvée");
    }

    #[tokio::test]
    async fn openapi_document_lists_contact_route() {
        let mailer = Arc::new(RecordingMailer::new());
        let (status, body) = send(
            app(&mailer),
            Request::get("/api-doc/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/contact"]["post"].is_object());
    }
}
