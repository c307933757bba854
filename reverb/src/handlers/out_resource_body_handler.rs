use super::{Handler, PathParams};
use crate::{capture_store::CaptureStore, error::Error};
use async_trait::async_trait;
use hyper::{
    header::{HeaderValue, CONTENT_TYPE},
    Body, Request, Response,
};
use std::sync::Arc;

/// Serves the raw body of a captured request, with its original content type.
#[derive(Debug)]
pub struct OutResourceBodyHandler {
    storage: Arc<CaptureStore>,
}

impl OutResourceBodyHandler {
    pub fn new(storage: Arc<CaptureStore>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl Handler for OutResourceBodyHandler {
    async fn handle(&self, _: Request<Body>, params: PathParams) -> Result<Response<Body>, Error> {
        let request = self.storage.find(params.id()?)?;

        let content_type = request
            .content_type()
            .and_then(|content_type| HeaderValue::from_str(content_type).ok())
            .unwrap_or_else(|| HeaderValue::from_static("application/octet-stream"));

        Ok(Response::builder()
            .header(CONTENT_TYPE, content_type)
            .body(request.body.clone().into())?)
    }
}
