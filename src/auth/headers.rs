use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::api::ApiError;

use super::CredentialStore;

/// Header carrying the API key, required alongside the bearer token
pub const API_KEY_HEADER: &str = "X-Noroff-API-Key";

/// Build the header set for an authenticated request.
///
/// Reads `token` and `apiKey` from the store and returns
/// [`ApiError::Unauthenticated`] when either is missing or cannot form a
/// valid header value. A partial header set is never produced; callers
/// abort the pending action and prompt the user to log in.
pub fn build_auth_headers(store: &CredentialStore) -> Result<HeaderMap, ApiError> {
    let token = store.token().ok_or(ApiError::Unauthenticated)?;
    let api_key = store.api_key().ok_or(ApiError::Unauthenticated)?;

    let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| ApiError::Unauthenticated)?;
    let api_key = HeaderValue::from_str(&api_key).map_err(|_| ApiError::Unauthenticated)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, bearer);
    headers.insert(API_KEY_HEADER, api_key);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::{API_KEY_KEY, TOKEN_KEY};
    use tempfile::TempDir;

    fn store() -> (TempDir, CredentialStore) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = CredentialStore::new(dir.path().to_path_buf()).expect("Failed to create store");
        (dir, store)
    }

    #[test]
    fn test_missing_token_is_unauthenticated() {
        let (_dir, store) = store();
        store.save(API_KEY_KEY, "key-123").unwrap();
        assert!(matches!(
            build_auth_headers(&store),
            Err(ApiError::Unauthenticated)
        ));
    }

    #[test]
    fn test_missing_api_key_is_unauthenticated() {
        let (_dir, store) = store();
        store.save(TOKEN_KEY, "abc123").unwrap();
        assert!(matches!(
            build_auth_headers(&store),
            Err(ApiError::Unauthenticated)
        ));
    }

    #[test]
    fn test_full_header_set() {
        let (_dir, store) = store();
        store.save(TOKEN_KEY, "abc123").unwrap();
        store.save(API_KEY_KEY, "key-123").unwrap();

        let headers = build_auth_headers(&store).unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer abc123");
        assert_eq!(headers[API_KEY_HEADER], "key-123");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_quoted_token_produces_clean_bearer_header() {
        let (_dir, store) = store();
        // File written by an older install that stringified twice
        std::fs::write(store.entry_path(TOKEN_KEY), r#""\"abc123\"""#).unwrap();
        store.save(API_KEY_KEY, "key-123").unwrap();

        let headers = build_auth_headers(&store).unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer abc123");
    }

    #[test]
    fn test_token_with_control_characters_is_rejected() {
        let (_dir, store) = store();
        store.save(TOKEN_KEY, "abc\ndef").unwrap();
        store.save(API_KEY_KEY, "key-123").unwrap();
        assert!(matches!(
            build_auth_headers(&store),
            Err(ApiError::Unauthenticated)
        ));
    }
}
