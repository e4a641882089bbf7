//! Health endpoints: liveness and readiness probes for orchestrators.
//!
//! The server starts live but not ready; `main` flips readiness once the
//! directory adapters are wired and migrations have run.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Shared health state for readiness and liveness checks.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as unhealthy so liveness checks fail during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

fn probe_response(probe_ok: bool) -> HttpResponse {
    let mut response = if probe_ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe. 200 once search dependencies are wired; 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready())
}

/// Liveness probe. 200 while the process is alive; 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};
    use rstest::rstest;

    async fn probe(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Option<String>) {
        let app = test::init_service(App::new().app_data(state).service(ready).service(live)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let cache = res
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        (res.status(), cache)
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_follows_state() {
        let state = web::Data::new(HealthState::new());
        let (status, cache) = probe(state.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(cache.as_deref(), Some("no-store"));

        state.mark_ready();
        let (status, _) = probe(state, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_fails_after_drain() {
        let state = web::Data::new(HealthState::new());
        let (status, _) = probe(state.clone(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);

        state.mark_unhealthy();
        let (status, _) = probe(state, "/health/live").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
