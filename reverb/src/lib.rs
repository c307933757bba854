mod capture_store;
mod data;
mod error;
mod handlers;
mod middleware;
mod reverb_configuration;
mod router;
mod runner;
mod util;

pub use capture_store::{CaptureStore, DEFAULT_CAPACITY};
pub use data::{CapturedRequest, Headers, RequestData};
pub use error::Error;
pub use handlers::{
    FlushHandler, Handler, InHandler, OutCollectionHandler, OutResourceBodyHandler,
    OutResourceHandler, PathParams,
};
pub use reverb_configuration::{ReverbConfiguration, DEFAULT_PORT};
pub use router::Router;
pub use runner::ReverbServer;
