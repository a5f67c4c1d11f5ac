use std::time::Duration;

use log::{debug, error, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::constants::{EDGE_DB_QUERY_PARAM, PKG_VERSION};
use crate::errors::ClientError;
use crate::errors::ErrorKind::*;

const JSON_CONTENT: &str = "application/json";

/// The error body returned by the DevCycle API on failed requests.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub message: serde_json::Value,
    #[serde(default)]
    pub status_code: Option<u16>,
}

impl ErrorResponse {
    fn describe(&self) -> String {
        match &self.message {
            serde_json::Value::String(msg) => msg.clone(),
            serde_json::Value::Null => match self.status_code {
                Some(code) => format!("Reported status code: {code}"),
                None => String::new(),
            },
            other => other.to_string(),
        }
    }
}

pub(crate) struct ApiClient {
    base_url: Url,
    enable_edge_db: bool,
    http_client: reqwest::Client,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        sdk_key: &str,
        timeout: Duration,
        enable_edge_db: bool,
    ) -> Result<Self, ClientError> {
        let base_url = match Url::parse(base_url) {
            Ok(url) if !url.cannot_be_a_base() => url,
            _ => {
                return Err(ClientError::new(
                    HttpClientInitFailure,
                    format!("Bucketing API URI '{base_url}' is not a valid base URL."),
                ))
            }
        };
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(sdk_key).map_err(|err| {
            ClientError::new(
                InvalidSdkKey,
                format!("SDK Key cannot be used as an HTTP header value. {err}"),
            )
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT));

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent())
            .default_headers(headers)
            .build()
            .map_err(|err| {
                ClientError::new(
                    HttpClientInitFailure,
                    format!("Failed to initialize the HTTP client. {err}"),
                )
            })?;

        Ok(Self {
            base_url,
            enable_edge_db,
            http_client,
        })
    }

    /// Appends each of `segments` to the base URL as a single, percent-encoded path segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Posts `body` to the endpoint of `segments` and decodes the response into `T`.
    ///
    /// `Ok(None)` means the API answered with a server error; the caller falls back to defaults.
    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<Option<T>, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        let path = url.path().to_owned();
        let Some(text) = self.send_to(url, body).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<T>(text.as_str()) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(parse_error) => {
                let msg = format!("Request to '{path}' was successful but the HTTP response content was invalid. JSON parsing failed. ({parse_error})");
                error!(event_id = InvalidHttpResponseContent.code(); "{}", msg);
                Err(ClientError::new(InvalidHttpResponseContent, msg))
            }
        }
    }

    /// Posts `body` to the endpoint of `segments` and returns the raw body of a successful response.
    pub async fn send<B>(&self, segments: &[&str], body: &B) -> Result<Option<String>, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send_to(self.endpoint(segments), body).await
    }

    async fn send_to<B>(&self, url: Url, body: &B) -> Result<Option<String>, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let path = url.path().to_owned();
        let mut builder = self.http_client.post(url).json(body);
        if self.enable_edge_db {
            builder = builder.query(&[(EDGE_DB_QUERY_PARAM, "true")]);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(error) => return Err(transport_error(&path, error)),
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(body_error) if status < 300 => {
                let msg = format!("Request to '{path}' was successful but the HTTP response content could not be read. {body_error}");
                error!(event_id = InvalidHttpResponseContent.code(); "{}", msg);
                return Err(ClientError::new(InvalidHttpResponseContent, msg));
            }
            Err(_) => String::new(),
        };

        match status {
            code if code < 300 => {
                debug!("Request to '{path}' was successful. Status code: {code}");
                Ok(Some(body))
            }
            code @ 401 | code @ 403 => {
                let reason = error_response(body.as_str()).describe();
                let msg = format!("Your SDK Key seems to be wrong, the DevCycle API rejected it. Status code: {code}. {reason}");
                error!(event_id = Unauthorized.code(); "{}", msg.trim_end());
                Err(ClientError::new(Unauthorized, msg.trim_end().to_owned()))
            }
            code if code >= 500 => {
                warn!(event_id = UnexpectedHttpResponse.code(); "The DevCycle API failed to serve the request to '{path}'. Status code: {code}");
                Ok(None)
            }
            code => {
                let reason = error_response(body.as_str()).describe();
                let msg = format!("Unexpected HTTP response was received from the DevCycle API. Status code: {code}. {reason}");
                error!(event_id = UnexpectedHttpResponse.code(); "{}", msg.trim_end());
                Err(ClientError::new(UnexpectedHttpResponse, msg.trim_end().to_owned()))
            }
        }
    }
}

pub(crate) fn user_agent() -> String {
    format!("DevCycle-Server-SDK/{PKG_VERSION}/rust")
}

fn error_response(body: &str) -> ErrorResponse {
    serde_json::from_str(body).unwrap_or_default()
}

fn transport_error(path: &str, error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        let msg = format!("Request to '{path}' timed out.");
        error!(event_id = HttpRequestTimeout.code(); "{}", msg);
        ClientError::new(HttpRequestTimeout, msg)
    } else {
        let msg = format!("Unexpected error occurred while sending a request to '{path}'. It is most likely due to a local network issue. Please make sure your application can reach the DevCycle API. {error}");
        error!(event_id = HttpRequestFailure.code(); "{}", msg);
        ClientError::new(HttpRequestFailure, msg)
    }
}

#[cfg(test)]
mod api_tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use mockito::Matcher;
    use serde_json::json;

    use crate::constants::test_constants::{MOCK_KEY, MOCK_VARIABLE_PATH, MOCK_VARIABLE_SEGMENTS};
    use crate::constants::EDGE_DB_QUERY_PARAM;
    use crate::errors::ErrorKind;
    use crate::fetch::api::{user_agent, ApiClient};

    fn api(url: &str, edge_db: bool) -> ApiClient {
        ApiClient::new(url, MOCK_KEY, Duration::from_secs(5), edge_db).unwrap()
    }

    #[tokio::test]
    async fn post_sends_headers_and_decodes() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", MOCK_VARIABLE_PATH)
            .match_header("authorization", MOCK_KEY)
            .match_header("content-type", "application/json")
            .match_header("accept", "application/json")
            .match_header("user-agent", user_agent().as_str())
            .match_body(Matcher::Json(json!({"user_id": "id"})))
            .with_status(200)
            .with_body(r#"{"value": true}"#)
            .create_async()
            .await;

        let result: Option<HashMap<String, bool>> = api(server.url().as_str(), false)
            .post(&MOCK_VARIABLE_SEGMENTS, &json!({"user_id": "id"}))
            .await
            .unwrap();

        assert_eq!(result.unwrap()["value"], true);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn post_with_edge_db() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", MOCK_VARIABLE_PATH)
            .match_query(Matcher::UrlEncoded(
                EDGE_DB_QUERY_PARAM.to_owned(),
                "true".to_owned(),
            ))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let result: Option<serde_json::Value> = api(server.url().as_str(), true)
            .post(&MOCK_VARIABLE_SEGMENTS, &json!({}))
            .await
            .unwrap();

        assert_eq!(result, Some(json!({})));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn post_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", MOCK_VARIABLE_PATH)
            .with_status(401)
            .with_body(r#"{"message": "Invalid SDK key", "statusCode": 401}"#)
            .create_async()
            .await;

        let err = api(server.url().as_str(), false)
            .post::<_, serde_json::Value>(&MOCK_VARIABLE_SEGMENTS, &json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(
            err.message,
            "Your SDK Key seems to be wrong, the DevCycle API rejected it. Status code: 401. Invalid SDK key"
        );
    }

    #[tokio::test]
    async fn post_client_error_carries_server_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", MOCK_VARIABLE_PATH)
            .with_status(400)
            .with_body(r#"{"message": ["user_id should not be empty"], "statusCode": 400}"#)
            .create_async()
            .await;

        let err = api(server.url().as_str(), false)
            .post::<_, serde_json::Value>(&MOCK_VARIABLE_SEGMENTS, &json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::UnexpectedHttpResponse);
        assert!(err.message.contains("Status code: 400"));
        assert!(err.message.contains("user_id should not be empty"));
    }

    #[tokio::test]
    async fn post_server_error_is_no_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", MOCK_VARIABLE_PATH)
            .with_status(502)
            .create_async()
            .await;

        let result = api(server.url().as_str(), false)
            .post::<_, serde_json::Value>(&MOCK_VARIABLE_SEGMENTS, &json!({}))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn post_invalid_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", MOCK_VARIABLE_PATH)
            .with_status(200)
            .with_body(r#"{"value": "#)
            .create_async()
            .await;

        let err = api(server.url().as_str(), false)
            .post::<_, serde_json::Value>(&MOCK_VARIABLE_SEGMENTS, &json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::InvalidHttpResponseContent);
    }

    #[tokio::test]
    async fn post_unreachable_host() {
        let err = api("http://127.0.0.1:1", false)
            .send(&MOCK_VARIABLE_SEGMENTS, &json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::HttpRequestFailure);
    }

    #[test]
    fn invalid_header_key() {
        let result = ApiClient::new(
            "http://localhost",
            "dvc_server\nkey",
            Duration::from_secs(5),
            false,
        );
        assert_eq!(result.err().unwrap().kind, ErrorKind::InvalidSdkKey);
    }

    #[test]
    fn endpoint_encodes_segments() {
        let client = api("http://localhost:8080", false);
        assert_eq!(
            client.endpoint(&["v1", "variables", "a/b?c#d e"]).as_str(),
            "http://localhost:8080/v1/variables/a%2Fb%3Fc%23d%20e"
        );

        let client = api("https://proxy.example.com/devcycle/", false);
        assert_eq!(
            client.endpoint(&["v1", "features"]).path(),
            "/devcycle/v1/features"
        );
    }

    #[tokio::test]
    async fn post_encodes_variable_key() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/v1/variables/flag%2Fv2%3Fdebug")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let result: Option<serde_json::Value> = api(server.url().as_str(), false)
            .post(&["v1", "variables", "flag/v2?debug"], &json!({}))
            .await
            .unwrap();

        assert_eq!(result, Some(json!({})));
        m.assert_async().await;
    }

    #[test]
    fn invalid_base_url() {
        let result = ApiClient::new("not a url", MOCK_KEY, Duration::from_secs(5), false);
        assert_eq!(result.err().unwrap().kind, ErrorKind::HttpClientInitFailure);
    }
}
