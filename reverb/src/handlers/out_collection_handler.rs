use super::{Handler, PathParams};
use crate::{capture_store::CaptureStore, data::CapturedRequest, error::Error, util};
use async_trait::async_trait;
use hyper::{Body, Request, Response, StatusCode};
use std::sync::Arc;

#[derive(Debug)]
pub struct OutCollectionHandler {
    storage: Arc<CaptureStore>,
}

impl OutCollectionHandler {
    pub fn new(storage: Arc<CaptureStore>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl Handler for OutCollectionHandler {
    async fn handle(&self, _: Request<Body>, _: PathParams) -> Result<Response<Body>, Error> {
        let requests = self.storage.list()?;
        let requests: Vec<&CapturedRequest> = requests.iter().map(AsRef::as_ref).collect();

        util::json_response(StatusCode::OK, &requests)
    }
}
