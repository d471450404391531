//! Executes `HttpRequest` values against the network.
//!
//! `Transport` is the seam between the pure build/parse core and real I/O.
//! Implementations return non-2xx responses as data; only failures to get a
//! response at all are errors.

use std::time::Duration;

use reqwest::blocking::{multipart, Client};

use crate::error::{ApiError, TransportError};
use crate::http::{HttpBody, HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// `timeout` of `None` disables the request timeout entirely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build().map_err(network)?;
        Ok(Self { http })
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.http.post(&request.url).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            HttpBody::Empty => builder,
            HttpBody::Json(json) => builder.body(json),
            HttpBody::Multipart(file) => {
                let part = multipart::Part::bytes(file.bytes).file_name(file.file_name);
                builder.multipart(multipart::Form::new().part(file.field_name, part))
            }
        };

        let response = builder.send().map_err(network)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.text().map_err(network)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn network(err: reqwest::Error) -> ApiError {
    ApiError::Transport(TransportError::Network(err.to_string()))
}
