//! Request correlation middleware.
//!
//! Every request runs inside a [`TraceId`] scope and a `search_request` span.
//! An upstream `trace-id` header is honoured when it holds a UUID; otherwise a
//! fresh identifier is minted. The identifier is echoed on every response.

use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, debug, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware scoping each request to a [`TraceId`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use social_backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceService {
            inner: Rc::new(service),
        }))
    }
}

/// Service produced by [`Trace`]; not constructed directly.
pub struct TraceService<S> {
    inner: Rc<S>,
}

fn inbound_trace_id(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
}

impl<S, B> Service<ServiceRequest> for TraceService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let (trace_id, origin) = TraceId::adopt_or_generate(inbound_trace_id(&req));
        let span = info_span!(
            "search_request",
            trace_id = %trace_id,
            trace_origin = origin.as_str(),
            method = %req.method(),
            path = %req.path(),
        );
        let inner = Rc::clone(&self.inner);
        let started = Instant::now();

        let handled = async move {
            let mut res = inner.call(req).await?;
            // A hyphenated UUID is always a valid header value.
            if let Ok(value) = HeaderValue::from_str(&trace_id.to_string()) {
                res.headers_mut()
                    .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
            }
            debug!(
                status = res.status().as_u16(),
                elapsed_ms = started.elapsed().as_millis(),
                "request finished"
            );
            Ok(res)
        };
        Box::pin(TraceId::scope(trace_id, handled).instrument(span))
    }
}
