mod error;
mod reverb_client;

pub use error::Error;
pub use reverb::CapturedRequest;
pub use reverb_client::{ReverbClient, ReverbClientBuilder};
