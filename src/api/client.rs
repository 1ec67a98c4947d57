//! API client for the Noroff Social API.
//!
//! This module provides the `ApiClient` struct: a thin executor that
//! attaches stored credentials to each request, classifies responses, and
//! unwraps the API's `{ data, errors? }` envelope so callers always receive
//! the inner payload shape.

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::{build_auth_headers, CredentialStore};
use crate::config::Endpoints;
use crate::models::{ApiKeyData, LoginData, Post, PostPayload, Profile, RegisterRequest};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Flags requested on every feed query so posts arrive with author,
/// comment, and reaction data.
const INCLUDE_FLAGS: [(&str, &str); 3] = [
    ("_author", "true"),
    ("_comments", "true"),
    ("_reactions", "true"),
];

/// How a feed listing is scoped.
#[derive(Debug, Clone)]
pub enum PostQuery {
    /// Every post, newest first
    All,
    /// A single post by id, returned as a one-element listing
    Id(i64),
    /// Posts carrying a tag
    Tag(String),
    /// Full-text search over title and body
    Search(String),
    /// Posts written by a profile
    Author(String),
}

/// API client for the Noroff Social API.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoints: Endpoints,
    store: CredentialStore,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints, store: CredentialStore) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoints,
            store,
        })
    }

    // ===== Core executor =====

    /// Issue an authenticated request. Short-circuits with
    /// `ApiError::Unauthenticated` before any network I/O when credentials
    /// are missing.
    async fn request(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let headers = build_auth_headers(&self.store)?;
        self.execute(method, url, query, body, headers).await
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        query: &[(&str, &str)],
        body: Option<&Value>,
        headers: HeaderMap,
    ) -> Result<Value, ApiError> {
        debug!(method = %method, url = %url, "Sending API request");

        let mut request = self.client.request(method, url).headers(headers);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = %status, "Response received");

        if !status.is_success() {
            return Err(ApiError::from_status(status, &text));
        }

        // 204 and friends carry no body
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let value: Value =
            serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        Ok(unwrap_envelope(value))
    }

    fn plain_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers
    }

    fn bearer_headers(token: &str) -> Result<HeaderMap, ApiError> {
        let mut headers = Self::plain_headers();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::Unauthenticated)?;
        headers.insert(header::AUTHORIZATION, bearer);
        Ok(headers)
    }

    // ===== Auth endpoints =====

    /// Authenticate and return the login payload. Does not use stored
    /// credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginData, ApiError> {
        let body = json!({ "email": email, "password": password });
        let value = self
            .execute(
                Method::POST,
                self.endpoints.login(),
                &[],
                Some(&body),
                Self::plain_headers(),
            )
            .await?;
        decode(value)
    }

    /// Mint an API key for a freshly-issued token. The key is required
    /// alongside the token on every social endpoint.
    pub async fn create_api_key(&self, token: &str) -> Result<ApiKeyData, ApiError> {
        let value = self
            .execute(
                Method::POST,
                self.endpoints.create_api_key(),
                &[],
                Some(&json!({})),
                Self::bearer_headers(token)?,
            )
            .await?;
        decode(value)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Profile, ApiError> {
        let body =
            serde_json::to_value(request).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        let value = self
            .execute(
                Method::POST,
                self.endpoints.register(),
                &[],
                Some(&body),
                Self::plain_headers(),
            )
            .await?;
        decode(value)
    }

    // ===== Posts =====

    /// Fetch a feed listing. Id- and author-scoped queries that return a
    /// single object come back as a one-element listing.
    pub async fn fetch_posts(&self, query: &PostQuery) -> Result<Vec<Post>, ApiError> {
        let mut params: Vec<(&str, &str)> = INCLUDE_FLAGS.to_vec();
        let url = match query {
            PostQuery::All => self.endpoints.posts(),
            PostQuery::Id(id) => self.endpoints.post(*id),
            PostQuery::Tag(tag) => {
                params.push(("_tag", tag.as_str()));
                self.endpoints.posts()
            }
            PostQuery::Search(q) => {
                params.push(("q", q.as_str()));
                self.endpoints.posts_search()
            }
            PostQuery::Author(name) => self.endpoints.profile_posts(name),
        };

        let value = self.request(Method::GET, url, &params, None).await?;
        decode_listing(value)
    }

    pub async fn get_post(&self, id: i64) -> Result<Post, ApiError> {
        let value = self
            .request(Method::GET, self.endpoints.post(id), &INCLUDE_FLAGS, None)
            .await?;
        decode(value)
    }

    pub async fn create_post(&self, payload: &PostPayload) -> Result<Post, ApiError> {
        let body =
            serde_json::to_value(payload).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        let value = self
            .request(Method::POST, self.endpoints.posts(), &[], Some(&body))
            .await?;
        decode(value)
    }

    pub async fn update_post(&self, id: i64, payload: &PostPayload) -> Result<Post, ApiError> {
        let body =
            serde_json::to_value(payload).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        let value = self
            .request(Method::PUT, self.endpoints.post(id), &[], Some(&body))
            .await?;
        decode(value)
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        self.request(Method::DELETE, self.endpoints.post(id), &[], None)
            .await?;
        Ok(())
    }

    // ===== Profiles =====

    pub async fn fetch_profile(&self, name: &str) -> Result<Profile, ApiError> {
        let params = [("_followers", "true"), ("_following", "true")];
        let value = self
            .request(Method::GET, self.endpoints.profile(name), &params, None)
            .await?;
        decode(value)
    }

    pub async fn follow(&self, name: &str) -> Result<(), ApiError> {
        self.request(Method::PUT, self.endpoints.follow(name), &[], None)
            .await?;
        Ok(())
    }

    pub async fn unfollow(&self, name: &str) -> Result<(), ApiError> {
        self.request(Method::PUT, self.endpoints.unfollow(name), &[], None)
            .await?;
        Ok(())
    }
}

/// Unwrap the `{ data: ... }` envelope. Some endpoints return the payload
/// bare; those pass through unchanged.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Decode a payload the caller expects as a listing. A single object is
/// wrapped into a one-element vec; null (empty body) becomes an empty vec.
fn decode_listing<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, ApiError> {
    match value {
        Value::Array(_) => decode(value),
        Value::Null => Ok(Vec::new()),
        single => Ok(vec![decode(single)?]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{API_KEY_KEY, TOKEN_KEY};
    use mockito::Matcher;
    use tempfile::TempDir;

    fn client_for(base: &str, authenticated: bool) -> (TempDir, ApiClient) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = CredentialStore::new(dir.path().to_path_buf()).expect("Failed to create store");
        if authenticated {
            store.save(TOKEN_KEY, "abc123").unwrap();
            store.save(API_KEY_KEY, "key-123").unwrap();
        }
        let endpoints = Endpoints::new(base).expect("Failed to build endpoints");
        let client = ApiClient::new(endpoints, store).expect("Failed to build client");
        (dir, client)
    }

    #[tokio::test]
    async fn test_unauthenticated_short_circuits_without_network_io() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/social/posts")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let (_dir, client) = client_for(&server.url(), false);
        let result = client.fetch_posts(&PostQuery::All).await;
        assert!(matches!(result, Err(ApiError::Unauthenticated)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_listing_with_auth_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/social/posts")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer abc123")
            .match_header("x-noroff-api-key", "key-123")
            .with_status(200)
            .with_body(r#"{ "data": [ { "id": 1, "title": "A" }, { "id": 2, "title": "B" } ] }"#)
            .create_async()
            .await;

        let (_dir, client) = client_for(&server.url(), true);
        let posts = client.fetch_posts(&PostQuery::All).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "A");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_envelope_is_unwrapped() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/social/posts/5")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{ "data": { "id": 5, "title": "T" } }"#)
            .create_async()
            .await;

        let (_dir, client) = client_for(&server.url(), true);
        let post = client.get_post(5).await.unwrap();
        assert_eq!(post.id, 5);
        assert_eq!(post.title, "T");
    }

    #[tokio::test]
    async fn test_bare_payload_becomes_single_element_listing() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/social/posts/5")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{ "id": 5, "title": "T" }"#)
            .create_async()
            .await;

        let (_dir, client) = client_for(&server.url(), true);
        let posts = client.fetch_posts(&PostQuery::Id(5)).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 5);
    }

    #[tokio::test]
    async fn test_search_query_is_encoded() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/social/posts/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "camp fire".into()),
                Matcher::UrlEncoded("_author".into(), "true".into()),
            ]))
            .with_status(200)
            .with_body(r#"{ "data": [] }"#)
            .create_async()
            .await;

        let (_dir, client) = client_for(&server.url(), true);
        let posts = client
            .fetch_posts(&PostQuery::Search("camp fire".to_string()))
            .await
            .unwrap();
        assert!(posts.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_api_error_carries_envelope_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/social/posts/99")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{ "errors": [ { "message": "Not found" } ] }"#)
            .create_async()
            .await;

        let (_dir, client) = client_for(&server.url(), true);
        match client.get_post(99).await {
            Err(ApiError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not found");
            }
            other => panic!("Expected ApiError::Api, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejected_token_maps_to_unauthenticated() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/social/posts")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{ "errors": [ { "message": "Invalid token" } ] }"#)
            .create_async()
            .await;

        let (_dir, client) = client_for(&server.url(), true);
        let result = client.fetch_posts(&PostQuery::All).await;
        assert!(matches!(result, Err(ApiError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_network_failure_is_classified() {
        // Nothing listens on port 1; the connection is refused locally.
        let (_dir, client) = client_for("http://127.0.0.1:1", true);
        let result = client.fetch_posts(&PostQuery::All).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/social/posts/7")
            .with_status(204)
            .create_async()
            .await;

        let (_dir, client) = client_for(&server.url(), true);
        client.delete_post(7).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_does_not_require_stored_credentials() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body(r#"{ "data": { "accessToken": "abc123", "name": "alice" } }"#)
            .create_async()
            .await;

        let (_dir, client) = client_for(&server.url(), false);
        let data = client.login("alice@stud.noroff.no", "hunter22").await.unwrap();
        assert_eq!(data.access_token, "abc123");
        assert_eq!(data.name, "alice");
    }

    #[tokio::test]
    async fn test_create_api_key_uses_bearer_only() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/create-api-key")
            .match_header("authorization", "Bearer abc123")
            .with_status(201)
            .with_body(r#"{ "data": { "key": "key-123", "status": "ACTIVE" } }"#)
            .create_async()
            .await;

        let (_dir, client) = client_for(&server.url(), false);
        let data = client.create_api_key("abc123").await.unwrap();
        assert_eq!(data.key, "key-123");
        mock.assert_async().await;
    }

    #[test]
    fn test_unwrap_envelope_shapes() {
        let wrapped = serde_json::json!({ "data": { "id": 1 }, "meta": {} });
        assert_eq!(unwrap_envelope(wrapped), serde_json::json!({ "id": 1 }));

        let bare = serde_json::json!({ "id": 1 });
        assert_eq!(unwrap_envelope(bare.clone()), bare);

        let listing = serde_json::json!([1, 2]);
        assert_eq!(unwrap_envelope(listing.clone()), listing);
    }
}
