//! Compression gate middleware
//!
//! Runs inside `actix_web::middleware::Compress`. Responses whose content type
//! is not JSON, HTML or plain text are marked `Content-Encoding: identity`,
//! which makes the outer encoder pass them through untouched.

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{CONTENT_ENCODING, CONTENT_TYPE, HeaderMap, HeaderValue};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use tracing::trace;

const COMPRESSIBLE_TYPES: &[&str] = &["application/json", "text/html", "text/plain"];

/// Whether a response with these headers may be gzip-encoded
pub fn is_compressible(headers: &HeaderMap) -> bool {
    if headers.contains_key(CONTENT_ENCODING) {
        return false;
    }

    headers
        .get(CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(|ct| {
            let mime = ct.split(';').next().unwrap_or_default().trim();
            COMPRESSIBLE_TYPES
                .iter()
                .any(|allowed| mime.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// Compression gate middleware for Actix-web
pub struct CompressionGate;

impl<S, B> Transform<S, ServiceRequest> for CompressionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = CompressionGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CompressionGateService { service }))
    }
}

/// Service implementation for the compression gate
pub struct CompressionGateService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CompressionGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            if !res.headers().contains_key(CONTENT_ENCODING) && !is_compressible(res.headers()) {
                trace!("Skipping compression for {}", res.request().path());
                res.headers_mut()
                    .insert(CONTENT_ENCODING, HeaderValue::from_static("identity"));
            }
            Ok(res)
        })
    }
}
