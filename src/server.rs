use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::{net::SocketAddr, sync::Arc};

use crate::api::{ChangesRequest, ChangesResponse, ScoreResponse, UgcRequest, UgcResponse};
use demand_radar::sources::SignalBundle;
use demand_radar::{ChangeDetector, RadarConfig, RadarError, ScoringEngine};

#[derive(Clone)]
struct AppState {
    engine: Arc<ScoringEngine>,
    detector: Arc<ChangeDetector>,
}

impl AppState {
    fn from_config(config: &RadarConfig) -> Self {
        Self {
            engine: Arc::new(ScoringEngine::from_config(config)),
            detector: Arc::new(ChangeDetector::new(config.changes.clone())),
        }
    }
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/scores", post(scores_handler))
        .route("/api/changes", post(changes_handler))
        .route("/api/ugc", post(ugc_handler))
        .with_state(state)
}

pub async fn serve(args: crate::ServeArgs, config: RadarConfig) -> Result<(), RadarError> {
    let app = router(AppState::from_config(&config));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| RadarError::Server(format!("invalid bind address: {}", err)))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| RadarError::Server(format!("failed to bind server: {}", err)))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .map_err(|err| RadarError::Server(err.to_string()))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn scores_handler(
    State(state): State<AppState>,
    payload: Result<Json<SignalBundle>, JsonRejection>,
) -> Result<Json<ScoreResponse>, (StatusCode, String)> {
    let Json(bundle) = payload.map_err(bad_request)?;
    let now = Utc::now();
    Ok(Json(ScoreResponse::compute(&state.engine, &bundle, now)))
}

async fn changes_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChangesRequest>, JsonRejection>,
) -> Result<Json<ChangesResponse>, (StatusCode, String)> {
    let Json(request) = payload.map_err(bad_request)?;
    let now = Utc::now();
    let events = state
        .detector
        .detect(&request.competitor, &request.previous, &request.current, now);
    Ok(Json(ChangesResponse {
        competitor_id: request.competitor.id,
        events,
    }))
}

async fn ugc_handler(
    State(state): State<AppState>,
    payload: Result<Json<UgcRequest>, JsonRejection>,
) -> Result<Json<UgcResponse>, (StatusCode, String)> {
    let Json(request) = payload.map_err(bad_request)?;
    request
        .validate()
        .map_err(|err| (StatusCode::BAD_REQUEST, err))?;
    let now = Utc::now();
    let scores = state.engine.ugc(
        &request.asset,
        &request.metrics,
        request.trend_factor.unwrap_or(0.0),
        now,
    );
    Ok(Json(UgcResponse {
        asset_id: request.asset.id,
        scores,
    }))
}

fn bad_request(rejection: JsonRejection) -> (StatusCode, String) {
    tracing::debug!(error = %rejection.body_text(), "rejected request body");
    (StatusCode::BAD_REQUEST, rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::from_config(&RadarConfig::default()))
    }

    fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_score_body_is_a_bad_request() {
        let response = app()
            .oneshot(post_json("/api/scores", "{\"ads\": ["))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app()
            .oneshot(post_json("/api/scores", json!({"ads": 3}).to_string()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_bundle_scores_zero() {
        let response = app()
            .oneshot(post_json("/api/scores", "{}"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["scores"]["opportunity"], 0.0);
        assert_eq!(body["scores"]["confidence"], 0.0);
        assert_eq!(body["intents"]["question"], 0);
    }

    #[tokio::test]
    async fn changes_endpoint_reports_spikes() {
        let payload = json!({
            "competitor": {"id": "comp_1"},
            "previous": {"competitor_id": "comp_1", "active_ads_count": 10},
            "current": {"competitor_id": "comp_1", "active_ads_count": 20}
        });
        let response = app()
            .oneshot(post_json("/api/changes", payload.to_string()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["competitor_id"], "comp_1");
        assert_eq!(body["events"][0]["type"], "ad_spike");
        assert_eq!(body["events"][0]["significance"], "high");
    }

    #[tokio::test]
    async fn ugc_endpoint_returns_all_three_scores() {
        let payload = json!({
            "asset": {"id": "clip_1", "platform": "tiktok"},
            "metrics": {"views": 1000, "likes": 50, "comments": 4, "shares": 12},
            "trend_factor": 0.5
        });
        let response = app()
            .oneshot(post_json("/api/ugc", payload.to_string()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["asset_id"], "clip_1");
        assert!(body["scores"]["connected"].as_f64().unwrap() > 0.0);
        assert!((body["scores"]["trend"].as_f64().unwrap() - 20.0).abs() < 1e-9);
    }
}
