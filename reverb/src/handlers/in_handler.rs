use super::{Handler, PathParams};
use crate::{
    capture_store::CaptureStore,
    data::RequestData,
    error::Error,
    util,
};
use async_trait::async_trait;
use hyper::{Body, Request, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

/// Captures any request that no other route claims.
#[derive(Debug)]
pub struct InHandler {
    storage: Arc<CaptureStore>,
    max_body_size: Option<usize>,
}

#[derive(Serialize)]
struct Captured {
    id: u64,
}

impl InHandler {
    pub fn new(storage: Arc<CaptureStore>, max_body_size: Option<usize>) -> Self {
        Self {
            storage,
            max_body_size,
        }
    }

    async fn read_request_data(&self, request: Request<Body>) -> Result<RequestData, Error> {
        let (parts, body) = request.into_parts();
        let path = parts
            .uri
            .path_and_query()
            .map(|path_and_query| path_and_query.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        Ok(RequestData {
            method: parts.method.to_string(),
            path,
            headers: util::extract_headers(&parts.headers),
            body: util::read_body(body, self.max_body_size).await?,
        })
    }
}

#[async_trait]
impl Handler for InHandler {
    async fn handle(&self, request: Request<Body>, _: PathParams) -> Result<Response<Body>, Error> {
        let request_data = self.read_request_data(request).await?;
        let method = request_data.method.clone();
        let path = request_data.path.clone();
        let body_len = request_data.body.len();

        let id = self.storage.append(request_data)?;
        tracing::info!(id, %method, %path, body_len, "captured request");

        util::json_response(StatusCode::OK, &Captured { id })
    }
}
