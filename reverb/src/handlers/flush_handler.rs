use super::{Handler, PathParams};
use crate::{capture_store::CaptureStore, error::Error};
use async_trait::async_trait;
use hyper::{Body, Request, Response, StatusCode};
use std::sync::Arc;

#[derive(Debug)]
pub struct FlushHandler {
    storage: Arc<CaptureStore>,
}

impl FlushHandler {
    pub fn new(storage: Arc<CaptureStore>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl Handler for FlushHandler {
    async fn handle(&self, _: Request<Body>, _: PathParams) -> Result<Response<Body>, Error> {
        self.storage.clear()?;
        tracing::info!("flushed captured requests");

        Ok(Response::builder()
            .status(StatusCode::NO_CONTENT)
            .body(Body::empty())?)
    }
}
