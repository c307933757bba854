use crate::{data::Headers, error::Error};
use hyper::{
    body::HttpBody,
    header::{HeaderValue, CONTENT_TYPE},
    Body, HeaderMap, Response, StatusCode,
};
use serde::Serialize;

pub fn extract_headers(header_map: &HeaderMap) -> Headers {
    // opaque values are kept lossily rather than dropped
    let mut headers = Headers::new();
    for (name, value) in header_map {
        headers.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
    }
    headers
}

/// Collects `body`, failing as soon as it grows past `limit` bytes.
pub async fn read_body(mut body: Body, limit: Option<usize>) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();

    while let Some(chunk) = body.data().await {
        let chunk = chunk.map_err(|_| Error::InvalidBody)?;
        if let Some(limit) = limit {
            if bytes.len() + chunk.len() > limit {
                return Err(Error::PayloadTooLarge(limit));
            }
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

pub fn json_response<T: Serialize + ?Sized>(
    status: StatusCode,
    value: &T,
) -> Result<Response<Body>, Error> {
    let body = serde_json::to_vec(value)?;

    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .body(body.into())?)
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub fn error_response(error: &Error) -> Response<Body> {
    let status = error.status_code();
    let body = serde_json::to_vec(&ErrorBody {
        error: error.to_string(),
    })
    .unwrap_or_default();

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
