//! Signed JSON request extraction
//!
//! Bodies arrive possibly gzip-encoded; actix decodes them before the bytes
//! reach this extractor, so the signature is checked against the plain JSON.

use crate::server::state::AppState;
use crate::utils::crypto::SIGNATURE_HEADER;
use crate::utils::error::TelemetryError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;
use tracing::debug;

/// JSON body whose `HashSHA256` header (when present) matched the shared key
#[derive(Debug)]
pub struct SignedJson<T>(pub T);

impl<T> SignedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for SignedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        let body = web::Bytes::from_request(&req, payload);

        Box::pin(async move {
            let body = body.await?;
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| TelemetryError::internal("application state missing"))?;

            let signature = req
                .headers()
                .get(SIGNATURE_HEADER)
                .and_then(|v| v.to_str().ok());
            state.signer.verify(&body, signature).inspect_err(|e| {
                debug!("Rejecting {}: {}", req.path(), e);
            })?;

            let value = serde_json::from_slice::<T>(&body)
                .map_err(|e| TelemetryError::validation(format!("malformed body: {}", e)))?;
            Ok(SignedJson(value))
        })
    }
}
