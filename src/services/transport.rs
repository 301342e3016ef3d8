// ============================================================================
// TRANSPORT - intercambio HTTP crudo debajo del pipeline del ApiClient
// ============================================================================
// Sin auth ni manejo de status: entra un request, sale status + body.
// ============================================================================

use async_trait::async_trait;

use super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Body JSON ya serializado
    pub body: Option<String>,
    pub timeout_ms: u32,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Hace el intercambio. Los errores son siempre `ApiError::Network`;
/// un timeout no se distingue de una conexión caída.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[cfg(target_arch = "wasm32")]
pub use gloo::GlooTransport;

#[cfg(target_arch = "wasm32")]
mod gloo {
    use async_trait::async_trait;
    use futures::future::{select, Either};
    use gloo_net::http::{Request, RequestBuilder};
    use gloo_timers::future::TimeoutFuture;

    use super::{HttpRequest, HttpResponse, Method, Transport};
    use crate::services::error::ApiError;

    /// fetch del navegador vía gloo-net
    #[derive(Debug, Default, Clone, Copy)]
    pub struct GlooTransport;

    impl GlooTransport {
        async fn exchange(request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let mut builder: RequestBuilder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let response = match request.body {
                Some(body) => builder
                    .body(body)
                    .map_err(|e| ApiError::Network(e.to_string()))?
                    .send()
                    .await,
                None => builder.send().await,
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;

            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Ok(HttpResponse { status, body })
        }
    }

    #[async_trait(?Send)]
    impl Transport for GlooTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let timeout_ms = request.timeout_ms;
            let exchange = Box::pin(Self::exchange(request));
            let timeout = TimeoutFuture::new(timeout_ms);

            match select(exchange, timeout).await {
                Either::Left((result, _)) => result,
                Either::Right(_) => {
                    log::warn!("⏱️ [TRANSPORT] Timeout tras {}ms", timeout_ms);
                    Err(ApiError::timeout(timeout_ms))
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{HttpRequest, HttpResponse, Method, Transport};
    use crate::services::error::ApiError;

    /// Transport con reqwest para hosts fuera del navegador
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait(?Send)]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Put => reqwest::Method::PUT,
                Method::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self
                .client
                .request(method, &request.url)
                .timeout(Duration::from_millis(u64::from(request.timeout_ms)));
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    ApiError::timeout(request.timeout_ms)
                } else {
                    ApiError::Network(e.to_string())
                }
            })?;

            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Ok(HttpResponse { status, body })
        }
    }

}
