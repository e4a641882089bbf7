//! Prometheus request metrics for the search server.
//!
//! The layer boxes the response body on both branches, so the app type stays
//! the same whether a registry was configured or not.

use std::sync::Arc;

use actix_service::{
    Service, ServiceExt as _, Transform,
    boxed::{self, BoxService},
};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

/// Metric name prefix for every exported series.
const NAMESPACE: &str = "social";
/// Scrape endpoint served by the middleware itself.
pub(crate) const METRICS_PATH: &str = "/metrics";
/// Probe endpoints are polled constantly and would drown the search series.
const UNMEASURED_PATHS: [&str; 2] = ["/health/ready", "/health/live"];

/// Build the request metrics registry, or `None` when registration fails.
pub(crate) fn prometheus_metrics() -> Option<PrometheusMetrics> {
    let builder = UNMEASURED_PATHS
        .into_iter()
        .fold(PrometheusMetricsBuilder::new(NAMESPACE), |builder, path| {
            builder.exclude(path)
        })
        .endpoint(METRICS_PATH);
    match builder.build() {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            warn!(%error, "failed to configure Prometheus metrics");
            None
        }
    }
}

/// Middleware recording request metrics when a registry is present.
#[derive(Clone)]
pub(crate) struct MetricsLayer(Option<Arc<PrometheusMetrics>>);

impl MetricsLayer {
    pub(crate) fn new(metrics: Option<PrometheusMetrics>) -> Self {
        Self(metrics.map(Arc::new))
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let Some(metrics) = self.0.clone() else {
            let unmeasured = service.map(ServiceResponse::map_into_boxed_body);
            return Box::pin(async move { Ok(boxed::service(unmeasured)) });
        };
        let measured = Compat::new(PrometheusMetrics::clone(&metrics)).new_transform(service);
        Box::pin(async move { Ok(boxed::service(measured.await?)) })
    }
}
