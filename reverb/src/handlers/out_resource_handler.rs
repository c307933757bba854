use super::{Handler, PathParams};
use crate::{capture_store::CaptureStore, error::Error, util};
use async_trait::async_trait;
use hyper::{Body, Request, Response, StatusCode};
use std::sync::Arc;

#[derive(Debug)]
pub struct OutResourceHandler {
    storage: Arc<CaptureStore>,
}

impl OutResourceHandler {
    pub fn new(storage: Arc<CaptureStore>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl Handler for OutResourceHandler {
    async fn handle(&self, _: Request<Body>, params: PathParams) -> Result<Response<Body>, Error> {
        let request = self.storage.find(params.id()?)?;

        util::json_response(StatusCode::OK, request.as_ref())
    }
}
