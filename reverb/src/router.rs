use crate::{
    capture_store::CaptureStore,
    handlers::{
        FlushHandler, Handler, InHandler, OutCollectionHandler, OutResourceBodyHandler,
        OutResourceHandler, PathParams,
    },
    reverb_configuration::ReverbConfiguration,
    util,
};
use hyper::{Body, Method, Request, Response};
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

lazy_static! {
    static ref COLLECTION_REGEX: Regex = Regex::new(r"^/requests/?$").unwrap();
    static ref RESOURCE_REGEX: Regex = Regex::new(r"^/requests/(?P<id>[^/]+)/?$").unwrap();
    static ref RESOURCE_BODY_REGEX: Regex =
        Regex::new(r"^/requests/(?P<id>[^/]+)/body/?$").unwrap();
}

#[derive(Debug)]
struct Route {
    method: Method,
    pattern: &'static Regex,
    handler: Arc<dyn Handler + Send + Sync>,
}

impl Route {
    fn new(
        method: Method,
        pattern: &'static Regex,
        handler: Arc<dyn Handler + Send + Sync>,
    ) -> Self {
        Self {
            method,
            pattern,
            handler,
        }
    }

    fn matches(&self, method: &Method, path: &str) -> Option<PathParams> {
        if self.method != *method {
            return None;
        }

        self.pattern.captures(path).map(|captures| {
            captures
                .name("id")
                .map(|id| PathParams::with_id(id.as_str()))
                .unwrap_or_default()
        })
    }
}

/// Dispatches the read and flush routes, capturing everything else.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
    fallback: Arc<dyn Handler + Send + Sync>,
}

impl Router {
    pub fn new(storage: Arc<CaptureStore>, configuration: &ReverbConfiguration) -> Self {
        let collection = Arc::new(OutCollectionHandler::new(storage.clone()));
        let resource = Arc::new(OutResourceHandler::new(storage.clone()));
        let resource_body = Arc::new(OutResourceBodyHandler::new(storage.clone()));
        let flush: Arc<dyn Handler + Send + Sync> = Arc::new(FlushHandler::new(storage.clone()));

        Self {
            routes: vec![
                Route::new(Method::GET, &COLLECTION_REGEX, collection),
                Route::new(Method::DELETE, &COLLECTION_REGEX, flush.clone()),
                Route::new(Method::POST, &COLLECTION_REGEX, flush),
                Route::new(Method::GET, &RESOURCE_BODY_REGEX, resource_body),
                Route::new(Method::GET, &RESOURCE_REGEX, resource),
            ],
            fallback: Arc::new(InHandler::new(storage, configuration.max_body_size())),
        }
    }

    pub async fn dispatch(&self, request: Request<Body>) -> Response<Body> {
        let (handler, params) = self.resolve(request.method(), request.uri().path());

        match handler.handle(request, params).await {
            Ok(response) => response,
            Err(error) => {
                if error.is_not_found() {
                    tracing::debug!(%error, "lookup missed");
                } else {
                    tracing::warn!(%error, "request failed");
                }
                util::error_response(&error)
            }
        }
    }

    fn resolve(&self, method: &Method, path: &str) -> (&(dyn Handler + Send + Sync), PathParams) {
        self.routes
            .iter()
            .find_map(|route| {
                route
                    .matches(method, path)
                    .map(|params| (route.handler.as_ref(), params))
            })
            .unwrap_or_else(|| (self.fallback.as_ref(), PathParams::new()))
    }
}
