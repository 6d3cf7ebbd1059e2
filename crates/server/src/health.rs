use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use onboarding_db::DbPool;
use serde::Serialize;

/// Liveness of the process plus a `SELECT 1` against the KV database.
#[derive(Clone)]
pub struct HealthState {
    db_pool: DbPool,
    bot_user_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub store: HealthCheck,
    pub bot_user_id: String,
    pub checked_at: String,
}

pub fn router(db_pool: DbPool, bot_user_id: impl Into<String>) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(HealthState { db_pool, bot_user_id: bot_user_id.into() })
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let store = store_check(&state.db_pool).await;
    let ready = store.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "onboarding-server runtime initialized".to_string(),
        },
        store,
        bot_user_id: state.bot_user_id,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn store_check(pool: &DbPool) -> HealthCheck {
    match sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM plugin_kv").fetch_one(pool).await {
        Ok(records) => HealthCheck { status: "ready", detail: format!("{records} kv records") },
        Err(error) => {
            HealthCheck { status: "degraded", detail: format!("kv store query failed: {error}") }
        }
    }
}
