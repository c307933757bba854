use crate::router::Router;
use futures::future::BoxFuture;
use hyper::{Body, Request, Response};
use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{Service, ServiceBuilder};
use tower_http::{
    add_extension::{AddExtension, AddExtensionLayer},
    classify::{ServerErrorsAsFailures, SharedClassifier},
    compression::{Compression, CompressionLayer},
    cors::{AllowHeaders, Any, Cors, CorsLayer},
    trace::{DefaultOnRequest, DefaultOnResponse, MakeSpan, Trace, TraceLayer},
    LatencyUnit,
};
use tracing::{Level, Span};

/// The router wrapped in compression, access logging and CORS, outermost first.
pub type ReverbService = Compression<
    AddExtension<
        Trace<
            Cors<RouterService>,
            SharedClassifier<ServerErrorsAsFailures>,
            RequestSpan,
            DefaultOnRequest,
            DefaultOnResponse,
        >,
        SocketAddr,
    >,
>;

pub fn stack(router: Arc<Router>, remote_addr: SocketAddr) -> ReverbService {
    ServiceBuilder::new()
        .layer(CompressionLayer::new())
        .layer(AddExtensionLayer::new(remote_addr))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(RequestSpan)
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(AllowHeaders::mirror_request()),
        )
        .service(RouterService::new(router))
}

/// Adapts `Router::dispatch` to a tower service.
#[derive(Debug, Clone)]
pub struct RouterService {
    router: Arc<Router>,
}

impl RouterService {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }
}

impl Service<Request<Body>> for RouterService {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response<Body>, Infallible>>;

    fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let router = self.router.clone();

        Box::pin(async move { Ok(router.dispatch(request).await) })
    }
}

/// Opens one `request` span per inbound request, tagged with the peer address.
#[derive(Debug, Clone, Copy)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let remote = request
            .extensions()
            .get::<SocketAddr>()
            .map(ToString::to_string)
            .unwrap_or_default();

        tracing::info_span!(
            "request",
            %remote,
            method = %request.method(),
            path = %request.uri(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        capture_store::CaptureStore, data::RequestData,
        reverb_configuration::ReverbConfiguration,
    };
    use flate2::read::GzDecoder;
    use hyper::{
        body,
        header::{
            ACCEPT_ENCODING, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, CONTENT_ENCODING,
            ORIGIN,
        },
        Method, StatusCode,
    };
    use std::io::Read;
    use tower::ServiceExt;

    fn service() -> (Arc<CaptureStore>, ReverbService) {
        let storage = Arc::new(CaptureStore::new());
        let router = Arc::new(Router::new(storage.clone(), &ReverbConfiguration::new()));
        let remote = SocketAddr::from(([127, 0, 0, 1], 40000));
        (storage, stack(router, remote))
    }

    fn capture(storage: &CaptureStore, body: &[u8]) {
        storage
            .append(RequestData {
                method: "POST".into(),
                path: "/".into(),
                headers: Default::default(),
                body: body.to_vec(),
            })
            .unwrap();
    }

    #[tokio::test]
    async fn compresses_responses_when_gzip_is_accepted() {
        let (storage, service) = service();
        let payload = "compress me, this body is long enough to be worth it".repeat(4);
        capture(&storage, payload.as_bytes());

        let request = Request::builder()
            .uri("/requests/1/body")
            .header(ACCEPT_ENCODING, "gzip")
            .body(Body::empty())
            .unwrap();
        let response = service.oneshot(request).await.unwrap();

        assert_eq!(response.headers()[CONTENT_ENCODING], "gzip");
        let bytes = body::to_bytes(response.into_body()).await.unwrap();
        let mut decoded = String::new();
        GzDecoder::new(&bytes[..])
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, payload);
    }

    #[tokio::test]
    async fn leaves_responses_alone_without_accept_encoding() {
        let (storage, service) = service();
        capture(&storage, b"plain");

        let request = Request::builder()
            .uri("/requests/1/body")
            .body(Body::empty())
            .unwrap();
        let response = service.oneshot(request).await.unwrap();

        assert!(response.headers().get(CONTENT_ENCODING).is_none());
        let bytes = body::to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&bytes[..], b"plain");
    }

    #[tokio::test]
    async fn empty_responses_are_not_encoded() {
        let (_, service) = service();

        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/requests")
            .header(ACCEPT_ENCODING, "gzip")
            .body(Body::empty())
            .unwrap();
        let response = service.oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        assert!(response.headers().get(CONTENT_ENCODING).is_none());
    }

    #[tokio::test]
    async fn preflight_is_answered_without_capturing() {
        let (storage, service) = service();

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/hook")
            .header(ORIGIN, "http://example.test")
            .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(ACCESS_CONTROL_REQUEST_HEADERS, "x-signature")
            .body(Body::empty())
            .unwrap();
        let response = service.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_HEADERS], "x-signature");
        assert!(storage.is_empty().unwrap());
    }

    #[tokio::test]
    async fn cross_origin_requests_are_captured_and_allowed() {
        let (storage, service) = service();

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/hook")
            .header(ORIGIN, "http://example.test")
            .body(Body::empty())
            .unwrap();
        let response = service.oneshot(request).await.unwrap();

        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(storage.find(1).unwrap().method, "OPTIONS");
    }
}
