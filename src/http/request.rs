use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Method, StatusCode,
};
use serde::Serialize;

use crate::consts::consts::JSON_CONTENT_TYPE;

use super::error::ClientError;

/// Per call options for `HttpClient::request`. Headers given here are merged key by key
/// over the client defaults, see `merge_headers`.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    pub fn set_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn set_json_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        let bytes = serde_json::to_vec(body).map_err(ClientError::Encode)?;
        self.body = Some(bytes);
        Ok(self)
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

/// Headers every request starts from
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers
}

/// Merges `overrides` over `defaults` one header name at a time. A name present in `overrides`
/// replaces every default value for that name, names only present in `defaults` are kept.
pub fn merge_headers(defaults: &HeaderMap, overrides: &HeaderMap) -> HeaderMap {
    let mut merged = defaults.clone();

    for name in overrides.keys() {
        merged.remove(name);

        for value in overrides.get_all(name) {
            merged.append(name.clone(), value.clone());
        }
    }

    merged
}

/// Fully resolved request handed to a `Transport`
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn body_json(&self) -> Option<serde_json::Value> {
        self.body
            .as_ref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: StatusCode, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
