use crate::{
    capture_store::CaptureStore, error::Error, middleware,
    reverb_configuration::ReverbConfiguration, router::Router,
};
use futures::future;
use hyper::{server::conn::AddrStream, service::make_service_fn, Server};
use std::{
    convert::Infallible,
    future::Future,
    net::{SocketAddr, TcpListener},
    sync::Arc,
    thread::{self, JoinHandle},
};
use tokio::runtime::Runtime;

/// A bound but not yet running request bin.
#[derive(Debug)]
pub struct ReverbServer {
    listener: TcpListener,
    router: Arc<Router>,
}

impl ReverbServer {
    pub fn bind(
        configuration: &ReverbConfiguration,
        storage: Arc<CaptureStore>,
    ) -> Result<Self, Error> {
        let listener = TcpListener::bind(configuration.socket_addr())?;
        listener.set_nonblocking(true)?;

        Ok(Self {
            listener,
            router: Arc::new(Router::new(storage, configuration)),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr()?)
    }

    pub async fn serve(self) -> Result<(), Error> {
        self.serve_with_shutdown(future::pending()).await
    }

    /// Serves until `signal` resolves, then lets in-flight requests finish.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        let router = self.router;
        let make_service = make_service_fn(move |connection: &AddrStream| {
            let remote_addr = connection.remote_addr();
            let router = router.clone();

            async move { Ok::<_, Infallible>(middleware::stack(router, remote_addr)) }
        });

        Server::from_tcp(self.listener)?
            .serve(make_service)
            .with_graceful_shutdown(signal)
            .await?;

        Ok(())
    }

    /// Runs the server on a dedicated thread with its own runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        thread::spawn(move || {
            let runtime = match Runtime::new() {
                Ok(runtime) => runtime,
                Err(error) => {
                    tracing::error!(%error, "failed to start the reverb runtime");
                    return;
                }
            };

            if let Err(error) = runtime.block_on(self.serve()) {
                tracing::error!(%error, "reverb server error");
            }
        })
    }
}
