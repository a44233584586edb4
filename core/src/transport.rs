//! The I/O seam between the client and whatever performs HTTP.
//!
//! A `Transport` turns an `HttpRequest` into an `HttpResponse`. Non-2xx
//! statuses must come back as data so `TasksApi` can interpret them; only a
//! missing response is an `Err`.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use super::Transport;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport backed by a `ureq` agent.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
            tracing::debug!(method = req.method.as_str(), url = %req.url, "sending request");

            let result = match (req.method, req.body) {
                (HttpMethod::Get, _) => self.agent.get(&req.url).call(),
                (HttpMethod::Delete, _) => self.agent.delete(&req.url).call(),
                (HttpMethod::Post, Some(body)) => self
                    .agent
                    .post(&req.url)
                    .content_type("application/json")
                    .send(body.as_bytes()),
                (HttpMethod::Post, None) => self.agent.post(&req.url).send_empty(),
                (HttpMethod::Put, Some(body)) => self
                    .agent
                    .put(&req.url)
                    .content_type("application/json")
                    .send(body.as_bytes()),
                (HttpMethod::Put, None) => self.agent.put(&req.url).send_empty(),
            };
            let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
