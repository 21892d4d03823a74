use std::sync::Arc;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::consts::consts::API_FALLBACK_ERROR_MESSAGE;

use super::{
    error::ClientError,
    request::{default_headers, merge_headers, HttpRequest, HttpResponse, RequestOptions},
    transport::Transport,
};

/// Generic JSON request helper
///
/// Every call performs exactly one `Transport::send`. There are no retries and no caching,
/// a failure is always returned to the caller as is.
pub struct HttpClient<T: Transport> {
    transport: Arc<T>,
    default_headers: HeaderMap,
}

impl<T: Transport> Clone for HttpClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            default_headers: self.default_headers.clone(),
        }
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    pub fn from_shared(transport: Arc<T>) -> Self {
        Self {
            transport,
            default_headers: default_headers(),
        }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    #[tracing::instrument(skip(self, options), fields(method = %options.method))]
    pub async fn request<R: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<R, ClientError> {
        let request = HttpRequest {
            method: options.method,
            url: url.to_string(),
            headers: merge_headers(&self.default_headers, &options.headers),
            body: options.body,
        };

        log::debug!("Sending request: {} {}", request.method, request.url);

        let response = self.transport.send(request).await.map_err(|e| {
            log::warn!("Request to {} failed: {}", url, e);
            ClientError::Network(e)
        })?;

        parse_response(response)
    }
}

/// Converts a raw response into the caller's type, non 2xx statuses become `ClientError::Api`
pub fn parse_response<R: DeserializeOwned>(response: HttpResponse) -> Result<R, ClientError> {
    if !response.status.is_success() {
        let text = response.text();

        let message = if text.is_empty() {
            API_FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            text
        };

        log::warn!("API responded with {}: {}", response.status, message);

        return Err(ClientError::Api {
            status: response.status,
            message,
        });
    }

    serde_json::from_slice(&response.body).map_err(ClientError::Decode)
}

#[cfg(test)]
mod tests {
    use reqwest::{
        header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    };
    use serde::Deserialize;
    use serde_json::json;

    use crate::http::fake::FakeTransport;

    use super::*;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Greeting {
        message: String,
    }

    mod success {
        use super::*;

        #[tokio::test]
        async fn parses_json_body() {
            let client = HttpClient::new(FakeTransport::new());
            client.transport().push_response(HttpResponse::json(
                StatusCode::OK,
                &json!({ "message": "hello" }),
            ));

            let greeting: Greeting = client
                .request("http://api.test/greeting", RequestOptions::get())
                .await
                .unwrap();

            assert_eq!(
                greeting,
                Greeting {
                    message: "hello".to_string()
                }
            );
        }

        #[tokio::test]
        async fn any_2xx_is_a_success() {
            let client = HttpClient::new(FakeTransport::new());
            client
                .transport()
                .push_response(HttpResponse::new(StatusCode::CREATED, "[1,2,3]"));

            let numbers: Vec<u32> = client
                .request("http://api.test/numbers", RequestOptions::post())
                .await
                .unwrap();

            assert_eq!(numbers, vec![1, 2, 3]);
        }

        #[tokio::test]
        async fn exactly_one_request_is_sent() {
            let client = HttpClient::new(FakeTransport::new());
            client
                .transport()
                .push_response(HttpResponse::new(StatusCode::OK, "null"));

            let _: Option<Greeting> = client
                .request("http://api.test/greeting", RequestOptions::get())
                .await
                .unwrap();

            assert_eq!(client.transport().requests().len(), 1);
        }
    }

    mod headers {
        use super::*;

        #[tokio::test]
        async fn default_content_type_is_sent() {
            let client = HttpClient::new(FakeTransport::new());
            client
                .transport()
                .push_response(HttpResponse::new(StatusCode::OK, "null"));

            let _: Option<Greeting> = client
                .request("http://api.test", RequestOptions::get())
                .await
                .unwrap();

            let request = client.transport().last_request().unwrap();
            assert_eq!(request.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        }

        #[tokio::test]
        async fn caller_headers_merge_with_defaults() {
            let client = HttpClient::new(FakeTransport::new());
            client
                .transport()
                .push_response(HttpResponse::new(StatusCode::OK, "null"));

            let options = RequestOptions::new(Method::PUT)
                .set_header(AUTHORIZATION, HeaderValue::from_static("Bearer token"));

            let _: Option<Greeting> = client.request("http://api.test", options).await.unwrap();

            let request = client.transport().last_request().unwrap();
            assert_eq!(request.method, Method::PUT);
            assert_eq!(request.headers.get(AUTHORIZATION).unwrap(), "Bearer token");
            assert_eq!(request.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        }
    }

    mod failure {
        use super::*;

        #[test_log::test(tokio::test)]
        async fn api_error_carries_body_text() {
            let client = HttpClient::new(FakeTransport::new());
            client.transport().push_response(HttpResponse::new(
                StatusCode::CONFLICT,
                "Email already in use",
            ));

            let error = client
                .request::<Greeting>("http://api.test", RequestOptions::post())
                .await
                .unwrap_err();

            assert_eq!(error.to_string(), "Email already in use");
            assert_eq!(error.status(), Some(StatusCode::CONFLICT));
        }

        #[test_log::test(tokio::test)]
        async fn empty_api_error_uses_fallback_message() {
            let client = HttpClient::new(FakeTransport::new());
            client
                .transport()
                .push_response(HttpResponse::new(StatusCode::INTERNAL_SERVER_ERROR, ""));

            let error = client
                .request::<Greeting>("http://api.test", RequestOptions::get())
                .await
                .unwrap_err();

            assert_eq!(error.to_string(), "Erro ao comunicar com a API");
            assert!(matches!(error, ClientError::Api { .. }));
            assert_eq!(error.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        }

        #[tokio::test]
        async fn whitespace_body_is_not_empty() {
            let client = HttpClient::new(FakeTransport::new());
            client
                .transport()
                .push_response(HttpResponse::new(StatusCode::BAD_REQUEST, " "));

            let error = client
                .request::<Greeting>("http://api.test", RequestOptions::get())
                .await
                .unwrap_err();

            assert_eq!(error.to_string(), " ");
        }

        #[tokio::test]
        async fn malformed_json_is_a_decode_error() {
            let client = HttpClient::new(FakeTransport::new());
            client
                .transport()
                .push_response(HttpResponse::new(StatusCode::OK, "{ not json"));

            let error = client
                .request::<Greeting>("http://api.test", RequestOptions::get())
                .await
                .unwrap_err();

            assert!(matches!(error, ClientError::Decode(_)));
            assert_eq!(error.status(), None);
        }

        #[tokio::test]
        async fn empty_success_body_is_a_decode_error() {
            let client = HttpClient::new(FakeTransport::new());
            client
                .transport()
                .push_response(HttpResponse::new(StatusCode::NO_CONTENT, ""));

            let error = client
                .request::<Greeting>("http://api.test", RequestOptions::delete())
                .await
                .unwrap_err();

            assert!(matches!(error, ClientError::Decode(_)));
        }

        #[tokio::test]
        async fn transport_failure_propagates_as_network_error() {
            let client = HttpClient::new(FakeTransport::new());
            client.transport().push_failure("connection reset by peer");

            let error = client
                .request::<Greeting>("http://api.test", RequestOptions::get())
                .await
                .unwrap_err();

            assert!(matches!(error, ClientError::Network(_)));
            assert_eq!(error.to_string(), "Connection failed: connection reset by peer");
        }
    }
}
