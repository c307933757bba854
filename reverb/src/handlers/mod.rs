mod flush_handler;
mod in_handler;
mod out_collection_handler;
mod out_resource_body_handler;
mod out_resource_handler;

pub use flush_handler::FlushHandler;
pub use in_handler::InHandler;
pub use out_collection_handler::OutCollectionHandler;
pub use out_resource_body_handler::OutResourceBodyHandler;
pub use out_resource_handler::OutResourceHandler;

use crate::error::Error;
use async_trait::async_trait;
use hyper::{Body, Request, Response};
use std::fmt::Debug;

#[async_trait]
pub trait Handler: Debug {
    async fn handle(
        &self,
        request: Request<Body>,
        params: PathParams,
    ) -> Result<Response<Body>, Error>;
}

/// Values captured from the request path by the matched route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    id: Option<String>,
}

impl PathParams {
    pub fn new() -> Self {
        Self { id: None }
    }

    pub fn with_id<S: Into<String>>(id: S) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    pub fn id(&self) -> Result<u64, Error> {
        let raw = self.id.as_deref().unwrap_or_default();

        raw.parse().map_err(|_| {
            // a well-formed id too large for u64 can never have been assigned
            if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
                Error::NotFound(raw.to_string())
            } else {
                Error::InvalidId(raw.to_string())
            }
        })
    }
}
