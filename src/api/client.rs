//
//  bbapi
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for Bitbucket API
//!
//! This module performs the actual HTTP call for an [`ApiRequest`].
//!
//! ## Behavior
//!
//! - Missing token: returns `{"message": "Error : token missing!"}` without
//!   touching the network
//! - Every request carries `Accept` and `Content-Type: application/json`
//! - POST sends the payload file (required), PUT sends it when given
//! - HTTP 204 yields `{}`; any other status yields the decoded body as-is,
//!   including Bitbucket error envelopes
//! - Transport failures are returned as [`ApiError::Transport`], never retried

use std::path::Path;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{ApiError, ApiRequest, Method};
use crate::auth::Credential;

/// Message returned in place of a response when no token was supplied.
pub const TOKEN_MISSING_MESSAGE: &str = "Error : token missing!";

const APPLICATION_JSON: &str = "application/json";

/// Returns the synthetic response used when the token is absent.
pub fn token_missing() -> Value {
    json!({ "message": TOKEN_MISSING_MESSAGE })
}

/// Executes one API request and returns the decoded JSON response.
///
/// The request is consumed; its credential is dropped (and zeroized) once the
/// call completes.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request is invalid, the payload file cannot
/// be read, the transport fails or the body is not JSON. A missing token is
/// not an error.
///
/// # Example
///
/// ```rust,no_run
/// use bbapi::api::{execute, ApiRequest, Method};
/// use bbapi::auth::Token;
///
/// # async fn example() -> Result<(), bbapi::api::ApiError> {
/// let request = ApiRequest::new("/repositories/acme", Method::Get)
///     .with_user("jdoe")
///     .with_token(Some(Token::new("app-password")));
///
/// let repos = execute(request).await?;
/// println!("{}", repos["size"]);
/// # Ok(())
/// # }
/// ```
pub async fn execute(mut request: ApiRequest) -> Result<Value, ApiError> {
    let Some(token) = request.take_token() else {
        debug!("no token supplied, skipping request");
        return Ok(token_missing());
    };

    request.validate()?;

    let credential = Credential::new(request.user(), token);
    let client = ApiClient::new(request.base_url(), credential)?;
    client
        .send(request.method(), request.api_path(), request.json_path())
        .await
}

/// Runs [`execute`] to completion on a current-thread runtime.
///
/// For synchronous callers. Must not be called from inside a tokio runtime.
pub fn execute_blocking(request: ApiRequest) -> Result<Value, ApiError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ApiError::Runtime)?;
    runtime.block_on(execute(request))
}

/// Authenticated HTTP client bound to one API root.
///
/// # Example
///
/// ```rust,no_run
/// use bbapi::api::{ApiClient, Method};
/// use bbapi::auth::{Credential, Token};
///
/// # async fn example() -> Result<(), bbapi::api::ApiError> {
/// let credential = Credential::new("jdoe", Token::new("app-password"));
/// let client = ApiClient::new("https://api.bitbucket.org/2.0", credential)?;
/// let user = client.send(Method::Get, "/user", None).await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    /// The underlying HTTP client
    http: Client,
    /// API root, without trailing slash
    base_url: String,
    credential: Credential,
}

impl ApiClient {
    /// Creates a client for the given API root.
    ///
    /// No timeout is configured: a call waits as long as the transport allows.
    pub fn new(base_url: &str, credential: Credential) -> Result<Self, ApiError> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends exactly one request and decodes the response.
    ///
    /// `json_path` is read in full right before dispatch and its handle closed
    /// before the request goes out. It is required for POST, optional for PUT
    /// and ignored for GET and DELETE.
    pub async fn send(
        &self,
        method: Method,
        api_path: &str,
        json_path: Option<&Path>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, api_path);

        let mut request = self
            .http
            .request(method.into(), &url)
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON);
        request = self.credential.apply_to_request(request);

        match json_path {
            Some(path) if method.accepts_payload() => {
                request = request.body(read_payload(path).await?);
            }
            Some(path) => {
                warn!(%method, path = %path.display(), "ignoring JSON file");
            }
            None if method.requires_payload() => {
                return Err(ApiError::MissingPayload(method.as_str()));
            }
            None => {}
        }

        debug!(%method, %url, user = self.credential.user(), "dispatching request");
        let response = request.send().await?;
        decode_response(response).await
    }
}

async fn read_payload(path: &Path) -> Result<Vec<u8>, ApiError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| ApiError::Payload {
            path: path.to_path_buf(),
            source,
        })
}

async fn decode_response(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    debug!(%status, "received response");

    if status == StatusCode::NO_CONTENT {
        return Ok(json!({}));
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| ApiError::Decode { status, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Token;
    use mockito::{Matcher, Server};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn request(server: &Server, path: &str, method: Method) -> ApiRequest {
        ApiRequest::new(path, method)
            .with_base_url(server.url())
            .with_user("user")
            .with_token(Some(Token::new("secret")))
    }

    fn payload(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_missing_token_makes_no_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let request = ApiRequest::new("/repositories", Method::Get)
            .with_base_url(server.url())
            .with_user("user");
        let result = execute(request).await.unwrap();

        assert_eq!(result, json!({"message": "Error : token missing!"}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_returns_decoded_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repositories/acme/foo")
            .match_header("accept", "application/json")
            .match_header("content-type", "application/json")
            .match_header("authorization", "Basic dXNlcjpzZWNyZXQ=")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"slug":"foo"}"#)
            .create_async()
            .await;

        let result = execute(request(&server, "/repositories/acme/foo", Method::Get))
            .await
            .unwrap();

        assert_eq!(result, json!({"slug": "foo"}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_content_yields_empty_object() {
        let file = payload(r#"{"name":"x"}"#);

        for method in Method::ALL {
            let mut server = Server::new_async().await;
            let mock = server
                .mock(method.as_str(), "/workspaces/acme/projects/KEY")
                .with_status(204)
                .create_async()
                .await;

            let request = request(&server, "/workspaces/acme/projects/KEY", method)
                .with_json_path(Some(file.path().to_path_buf()));
            let result = execute(request).await.unwrap();

            assert_eq!(result, json!({}), "method {method}");
            mock.assert_async().await;
        }
    }

    #[tokio::test]
    async fn test_post_sends_file_bytes() {
        let body = "{\n  \"name\": \"Website\",\n  \"key\": \"WEB\"\n}\n";
        let file = payload(body);

        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/workspaces/acme/projects")
            .match_body(body)
            .with_status(201)
            .with_body(r#"{"key":"WEB"}"#)
            .create_async()
            .await;

        let request = request(&server, "/workspaces/acme/projects", Method::Post)
            .with_json_path(Some(file.path().to_path_buf()));
        let result = execute(request).await.unwrap();

        assert_eq!(result["key"], "WEB");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_without_payload_makes_no_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let err = execute(request(&server, "/workspaces/acme/projects", Method::Post))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::MissingPayload("POST")));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_put_without_payload_has_empty_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/workspaces/acme/projects/KEY")
            .match_body("")
            .with_status(200)
            .with_body(r#"{"key":"KEY"}"#)
            .create_async()
            .await;

        let result = execute(request(&server, "/workspaces/acme/projects/KEY", Method::Put))
            .await
            .unwrap();

        assert_eq!(result, json!({"key": "KEY"}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_put_with_payload_sends_exact_bytes() {
        let file = payload(r#"{"a":1}"#);

        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/workspaces/acme/projects/KEY")
            .match_body(r#"{"a":1}"#)
            .with_status(200)
            .with_body(r#"{"a":1}"#)
            .create_async()
            .await;

        let request = request(&server, "/workspaces/acme/projects/KEY", Method::Put)
            .with_json_path(Some(file.path().to_path_buf()));
        let result = execute(request).await.unwrap();

        assert_eq!(result, json!({"a": 1}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_has_no_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/workspaces/acme/projects/KEY")
            .match_body("")
            .with_status(204)
            .create_async()
            .await;

        let result = execute(request(&server, "/workspaces/acme/projects/KEY", Method::Delete))
            .await
            .unwrap();

        assert_eq!(result, json!({}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_envelope_returned_verbatim() {
        let envelope = json!({
            "type": "error",
            "error": {"message": "Repository acme/nope not found"}
        });

        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repositories/acme/nope")
            .with_status(404)
            .with_body(envelope.to_string())
            .create_async()
            .await;

        let result = execute(request(&server, "/repositories/acme/nope", Method::Get))
            .await
            .unwrap();

        assert_eq!(result, envelope);
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repositories")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let err = execute(request(&server, "/repositories", Method::Get))
            .await
            .unwrap_err();

        match err {
            ApiError::Decode { status, .. } => assert_eq!(status, StatusCode::BAD_GATEWAY),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unreadable_payload_makes_no_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let missing = PathBuf::from("/nonexistent/bbapi/payload.json");
        let request = request(&server, "/workspaces/acme/projects/KEY", Method::Put)
            .with_json_path(Some(missing.clone()));
        let err = execute(request).await.unwrap_err();

        assert!(matches!(err, ApiError::Payload { ref path, .. } if *path == missing));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let request = ApiRequest::new("/repositories", Method::Get)
            .with_base_url("http://127.0.0.1:1")
            .with_token(Some(Token::new("secret")));

        let err = execute(request).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn test_execute_blocking() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/user")
            .with_status(200)
            .with_body(r#"{"username":"jdoe"}"#)
            .create();

        let result = execute_blocking(request(&server, "/user", Method::Get)).unwrap();

        assert_eq!(result["username"], "jdoe");
        mock.assert();
    }
}
