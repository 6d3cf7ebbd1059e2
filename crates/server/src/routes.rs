use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use onboarding_chat::attachments::OPEN_SIGNATURE_DIALOG;
use onboarding_chat::model::{
    PostActionIntegrationRequest, PostActionIntegrationResponse, SubmitDialogRequest,
    SubmitDialogResponse, User,
};
use onboarding_chat::{HostApi, HostError};
use onboarding_core::domain::onboarding::Step;
use onboarding_core::errors::{ApplicationError, DomainError, InterfaceError};
use onboarding_core::i18n::{Language, Translations};
use onboarding_core::signature::SignatureRenderer;
use onboarding_db::{OnboardingStateRepository, RepositoryError};

use crate::bot::BotIdentity;
use crate::onboarding::StartOutcome;
use crate::{onboarding, signature};

/// Everything a callback needs; cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub host: Arc<dyn HostApi>,
    pub states: Arc<dyn OnboardingStateRepository>,
    pub renderer: Arc<SignatureRenderer>,
    pub bot: BotIdentity,
    pub language: Language,
    /// `<site_url>/plugins/<plugin_id>`; `None` disables buttons and the dialog.
    pub callback_base_url: Option<String>,
    /// `/plugins/<plugin_id>`, the path component of `callback_base_url`.
    pub mount_path: String,
}

impl AppState {
    pub fn translations(&self) -> &'static Translations {
        self.language.translations()
    }
}

pub fn persistence(error: RepositoryError) -> ApplicationError {
    ApplicationError::Persistence(error.to_string())
}

pub fn integration(error: HostError) -> ApplicationError {
    ApplicationError::Integration(error.to_string())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub correlation_id: String,
}

#[derive(Debug)]
pub struct ApiError(InterfaceError);

impl ApiError {
    fn from_application(error: ApplicationError, correlation_id: &str) -> Self {
        if error.is_validation() {
            info!(
                event_name = "callback.rejected",
                correlation_id,
                error = %error,
                "callback rejected"
            );
        } else {
            error!(
                event_name = "callback.failed",
                correlation_id,
                error = %error,
                "callback failed"
            );
        }
        Self(error.into_interface(correlation_id))
    }

    fn malformed(correlation_id: &str, error: serde_json::Error) -> Self {
        debug!(
            event_name = "callback.malformed",
            correlation_id,
            error = %error,
            "callback body is not valid json"
        );
        Self(InterfaceError::BadRequest {
            message: error.to_string(),
            correlation_id: correlation_id.to_string(),
        })
    }

    fn status(&self) -> StatusCode {
        match self.0 {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::ServiceUnavailable { .. } | InterfaceError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.0.user_message(),
            correlation_id: self.0.correlation_id().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Callback routes, served at the root and again under the plugin mount path
/// that generated button and dialog URLs point at.
pub fn router(state: AppState) -> Router {
    let mount_path = state.mount_path.clone();
    let callbacks = Router::new()
        .route("/complete-step", post(complete_step))
        .route("/submit-signature", post(submit_signature))
        .route("/user-created", post(user_created))
        .with_state(state);

    Router::new().merge(callbacks.clone()).nest(&mount_path, callbacks)
}

fn correlation_id() -> String {
    Uuid::new_v4().to_string()
}

fn decode<T: DeserializeOwned>(body: &Bytes, correlation_id: &str) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|error| ApiError::malformed(correlation_id, error))
}

/// Button callback for the checklist: either completes a step or opens the signature form.
async fn complete_step(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<Json<PostActionIntegrationResponse>, ApiError> {
    let correlation_id = correlation_id();
    let request: PostActionIntegrationRequest = decode(&body, &correlation_id)?;

    let outcome = if request.context_str("action") == Some(OPEN_SIGNATURE_DIALOG) {
        signature::open_dialog(&app, &request, &correlation_id).await
    } else {
        match requested_step(&request) {
            Ok(step) => onboarding::complete_step(&app, &request, step, &correlation_id).await,
            Err(error) => Err(error.into()),
        }
    };

    outcome.map(Json).map_err(|error| ApiError::from_application(error, &correlation_id))
}

fn requested_step(request: &PostActionIntegrationRequest) -> Result<Step, DomainError> {
    match request.context.get("step") {
        None => Err(DomainError::UnknownStep(String::new())),
        Some(value) => match value.as_str() {
            Some(step) => step.parse(),
            None => Err(DomainError::UnknownStep(value.to_string())),
        },
    }
}

async fn submit_signature(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<Json<SubmitDialogResponse>, ApiError> {
    let correlation_id = correlation_id();
    let submission: SubmitDialogRequest = decode(&body, &correlation_id)?;
    Ok(Json(signature::submit(&app, &submission, &correlation_id).await))
}

/// Host hook for newly created accounts.
async fn user_created(State(app): State<AppState>, body: Bytes) -> Result<StatusCode, ApiError> {
    let correlation_id = correlation_id();
    let user: User = decode(&body, &correlation_id)?;

    let outcome = onboarding::start_for_user(&app, &user, &correlation_id)
        .await
        .map_err(|error| ApiError::from_application(error, &correlation_id))?;
    match &outcome {
        StartOutcome::Started { post_id } => {
            debug!(
                correlation_id = %correlation_id,
                user_id = %user.id,
                post_id = %post_id,
                "new user onboarded"
            );
        }
        StartOutcome::AlreadyStarted | StartOutcome::SkippedBot => {
            debug!(
                correlation_id = %correlation_id,
                user_id = %user.id,
                ?outcome,
                "new user needs no checklist"
            );
        }
    }
    Ok(StatusCode::NO_CONTENT)
}


#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use std::sync::Arc;

    use onboarding_chat::{render_checklist, signature_dialog};
    use onboarding_core::domain::onboarding::{OnboardingState, Step, UserId};

    use super::router;
    use super::test_support::{app_state, app_state_with_kv, new_user, FailingKvStore};

    async fn call(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("response");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Path and query of an absolute callback URL.
    fn path_of(url: &str) -> &str {
        let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
        after_scheme.find('/').map_or("/", |index| &after_scheme[index..])
    }

    fn step_click(step: Value) -> String {
        json!({
            "user_id": "u1",
            "channel_id": "dm-1",
            "post_id": "post-7",
            "context": { "step": step },
        })
        .to_string()
    }

    #[tokio::test]
    async fn completing_a_step_updates_the_post_and_persists() {
        let (state, host) = app_state().await;
        host.add_user(new_user("u1")).await;
        let app = router(state.clone());

        let (status, body) =
            call(app, Method::POST, "/complete-step", &step_click(json!("tools"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["update"]["id"], "post-7");
        assert_eq!(body["update"]["channel_id"], "dm-1");
        assert_eq!(body["update"]["props"]["attachments"].as_array().map(Vec::len), Some(6));
        assert!(body["update"]["props"]["attachments"][3]["text"]
            .as_str()
            .is_some_and(|text| text.starts_with("✅ ")));
        assert!(body["ephemeral_text"].as_str().is_some_and(|text| !text.is_empty()));

        let stored = state.states.find(&UserId("u1".into())).await.expect("find").expect("state");
        assert!(stored.is_complete(Step::Tools));
        assert_eq!(stored.completed_count(), 1);
    }

    #[tokio::test]
    async fn completing_the_same_step_twice_is_idempotent() {
        let (state, host) = app_state().await;
        host.add_user(new_user("u1")).await;

        call(router(state.clone()), Method::POST, "/complete-step", &step_click(json!("intro")))
            .await;
        let once = state.states.find(&UserId("u1".into())).await.expect("find").expect("state");
        call(router(state.clone()), Method::POST, "/complete-step", &step_click(json!("intro")))
            .await;
        let twice = state.states.find(&UserId("u1".into())).await.expect("find").expect("state");

        assert_eq!(once.completed_steps, twice.completed_steps);
    }

    #[tokio::test]
    async fn unknown_or_missing_step_is_rejected_without_state_change() {
        let (state, host) = app_state().await;
        host.add_user(new_user("u1")).await;

        for step in [json!("coffee"), json!(3), Value::Null] {
            let (status, body) =
                call(router(state.clone()), Method::POST, "/complete-step", &step_click(step))
                    .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["correlation_id"].as_str().is_some_and(|id| !id.is_empty()));
        }

        let missing = json!({ "user_id": "u1", "context": {} }).to_string();
        let (status, _) =
            call(router(state.clone()), Method::POST, "/complete-step", &missing).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(state.states.find(&UserId("u1".into())).await.expect("find"), None);
    }

    #[tokio::test]
    async fn user_lookup_failure_is_a_server_error() {
        let (state, host) = app_state().await;
        host.fail("get_user").await;

        let (status, body) =
            call(router(state), Method::POST, "/complete-step", &step_click(json!("accounts")))
                .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "The service is temporarily unavailable. Please retry shortly.");
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let (state, _) = app_state().await;

        for path in ["/complete-step", "/submit-signature", "/user-created"] {
            let (status, _) = call(router(state.clone()), Method::POST, path, "{not json").await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        }
    }

    #[tokio::test]
    async fn wrong_method_and_unknown_path() {
        let (state, _) = app_state().await;

        let (status, _) = call(router(state.clone()), Method::GET, "/complete-step", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        let (status, _) = call(router(state), Method::POST, "/nowhere", "{}").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn signature_button_opens_the_dialog() {
        let (state, host) = app_state().await;
        host.add_user(new_user("u1")).await;
        let click = json!({
            "user_id": "u1",
            "trigger_id": "trigger-1",
            "context": { "action": "open_signature_dialog" },
        })
        .to_string();

        let (status, body) =
            call(router(state.clone()), Method::POST, "/complete-step", &click).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.get("update").is_none());
        assert_eq!(host.dialogs().await.len(), 1);
        assert_eq!(state.states.find(&UserId("u1".into())).await.expect("find"), None);
    }

    #[tokio::test]
    async fn signature_submission_reports_field_errors() {
        let (state, host) = app_state().await;
        let submission = json!({
            "user_id": "u1",
            "channel_id": "town-square",
            "submission": {
                "full_name": "Max Mustermann",
                "position": "Projektleitung",
                "email": "",
                "project": "each-one",
            },
        })
        .to_string();

        let (status, body) =
            call(router(state), Method::POST, "/submit-signature", &submission).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["errors"]["email"].is_string());
        assert!(host.uploads().await.is_empty());
        assert!(host.posts().await.is_empty());
    }

    #[tokio::test]
    async fn signature_submission_uploads_and_answers_with_empty_object() {
        let (state, host) = app_state().await;
        let submission = json!({
            "user_id": "u1",
            "channel_id": "town-square",
            "submission": {
                "full_name": "Max Mustermann",
                "position": "Projektleitung",
                "email": "max@example.org",
                "project": "each-one",
            },
        })
        .to_string();

        let (status, body) =
            call(router(state), Method::POST, "/submit-signature", &submission).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));
        let uploads = host.uploads().await;
        assert_eq!(uploads[0].file_name, "Max_Mustermann_each-one_Signatur.html");
        assert_eq!(host.posts().await[0].channel_id, "bot-user__u1");
    }

    #[tokio::test]
    async fn user_created_starts_onboarding_once() {
        let (state, host) = app_state().await;
        let user = serde_json::to_string(&new_user("u1")).expect("user json");

        let (first, _) = call(router(state.clone()), Method::POST, "/user-created", &user).await;
        let (second, _) = call(router(state.clone()), Method::POST, "/user-created", &user).await;

        assert_eq!(first, StatusCode::NO_CONTENT);
        assert_eq!(second, StatusCode::NO_CONTENT);
        assert_eq!(host.posts().await.len(), 1);
    }

    #[tokio::test]
    async fn user_created_ignores_bots() {
        let (state, host) = app_state().await;
        let bot = json!({ "id": "b1", "username": "helper", "is_bot": true }).to_string();

        let (status, _) = call(router(state), Method::POST, "/user-created", &bot).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(host.posts().await.is_empty());
    }

    #[tokio::test]
    async fn user_created_store_or_host_failure_is_a_server_error() {
        let (state, host) = app_state().await;
        host.fail("get_direct_channel").await;
        let user = serde_json::to_string(&new_user("u1")).expect("user json");

        let (status, _) = call(router(state), Method::POST, "/user-created", &user).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn rendered_button_urls_reach_the_handlers() {
        let (state, host) = app_state().await;
        host.add_user(new_user("u1")).await;
        let attachments = render_checklist(
            &OnboardingState::new(UserId("u1".into())),
            state.translations(),
            state.callback_base_url.as_deref(),
        );

        let done = &attachments[0].actions[0];
        let click = json!({
            "user_id": "u1",
            "channel_id": "dm-1",
            "post_id": "post-7",
            "context": done.integration.context,
        })
        .to_string();
        let (status, body) =
            call(router(state.clone()), Method::POST, path_of(&done.integration.url), &click).await;
        assert_eq!(status, StatusCode::OK, "{}", done.integration.url);
        assert_eq!(body["update"]["id"], "post-7");

        let signature = &attachments[1].actions[0];
        let click = json!({
            "user_id": "u1",
            "trigger_id": "trigger-1",
            "context": signature.integration.context,
        })
        .to_string();
        let (status, _) =
            call(router(state.clone()), Method::POST, path_of(&signature.integration.url), &click)
                .await;
        assert_eq!(status, StatusCode::OK, "{}", signature.integration.url);
        assert_eq!(host.dialogs().await.len(), 1);
    }

    #[tokio::test]
    async fn dialog_submission_url_reaches_the_handler() {
        let (state, host) = app_state().await;
        let base_url = state.callback_base_url.clone().expect("callback base url");
        let dialog =
            signature_dialog(state.translations(), &new_user("u1"), "trigger-1", &base_url);
        let submission = json!({
            "user_id": "u1",
            "channel_id": "town-square",
            "submission": {
                "full_name": "Max Mustermann",
                "position": "Projektleitung",
                "email": "max@example.org",
                "project": "nar",
            },
        })
        .to_string();

        let (status, body) =
            call(router(state), Method::POST, path_of(&dialog.url), &submission).await;

        assert_eq!(status, StatusCode::OK, "{}", dialog.url);
        assert_eq!(body, json!({}));
        assert_eq!(host.uploads().await.len(), 1);
    }

    #[tokio::test]
    async fn store_read_failure_on_step_click_is_a_server_error_without_save() {
        let kv = Arc::new(FailingKvStore { fail_get: true, ..FailingKvStore::default() });
        let (state, host) = app_state_with_kv(kv.clone()).await;
        host.add_user(new_user("u1")).await;

        let (status, body) =
            call(router(state), Method::POST, "/complete-step", &step_click(json!("tools"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["correlation_id"].as_str().is_some_and(|id| !id.is_empty()));
        assert_eq!(kv.gets(), 1);
        assert_eq!(kv.sets(), 0);
        assert!(host.posts().await.is_empty());
    }

    #[tokio::test]
    async fn store_write_failure_on_step_click_is_a_server_error() {
        let kv = Arc::new(FailingKvStore { fail_set: true, ..FailingKvStore::default() });
        let (state, host) = app_state_with_kv(kv.clone()).await;
        host.add_user(new_user("u1")).await;

        let (status, _) =
            call(router(state), Method::POST, "/complete-step", &step_click(json!("tools"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(kv.sets(), 1);
        assert!(host.posts().await.is_empty());
    }

    #[tokio::test]
    async fn store_failure_on_user_created_is_a_server_error_without_post() {
        let user = serde_json::to_string(&new_user("u1")).expect("user json");

        let read_fails = Arc::new(FailingKvStore { fail_get: true, ..FailingKvStore::default() });
        let (state, host) = app_state_with_kv(read_fails.clone()).await;
        let (status, _) = call(router(state), Method::POST, "/user-created", &user).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_fails.sets(), 0);
        assert!(host.posts().await.is_empty());

        let write_fails = Arc::new(FailingKvStore { fail_set: true, ..FailingKvStore::default() });
        let (state, host) = app_state_with_kv(write_fails.clone()).await;
        let (status, _) = call(router(state), Method::POST, "/user-created", &user).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(write_fails.sets(), 1);
        assert!(host.posts().await.is_empty());
    }
}
