//! URL path API versioning
//!
//! Every catalog route is served under a versioned prefix:
//! - `/api/v2/...` is the current API
//! - `/api/v1/...` serves the same routes, marked deprecated
//!
//! Responses carry an `api-version` header. Deprecated versions also carry
//! `Deprecation` and `Link: rel="successor-version"` headers (RFC 8594).

use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue},
    middleware::{self, Next},
    response::Response,
    Router,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header naming the API version that served a response
pub const API_VERSION_HEADER: HeaderName = HeaderName::from_static("api-version");

/// API version identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApiVersion {
    /// First catalog API, kept for existing clients
    V1,
    /// Paginated catalog API
    V2,
}

impl ApiVersion {
    /// Every served version, oldest first
    pub const ALL: [ApiVersion; 2] = [Self::V1, Self::V2];

    /// The version new clients should use
    pub const LATEST: ApiVersion = Self::V2;

    /// Get the version as a path segment (e.g., "v1")
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }

    /// Route prefix for this version (e.g., "/api/v2")
    pub fn base_path(&self) -> &'static str {
        match self {
            Self::V1 => "/api/v1",
            Self::V2 => "/api/v2",
        }
    }

    /// Check if this version is deprecated
    pub fn is_deprecated(&self) -> bool {
        *self < Self::LATEST
    }

    /// Deprecation details for superseded versions
    pub fn deprecation(&self) -> Option<DeprecationInfo> {
        self.is_deprecated()
            .then(|| DeprecationInfo::new(*self, Self::LATEST))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path_segment())
    }
}

/// Deprecation information for an API version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeprecationInfo {
    /// The deprecated API version
    pub version: ApiVersion,
    /// The recommended replacement version
    pub replacement: ApiVersion,
}

impl DeprecationInfo {
    /// Create a new deprecation info
    pub fn new(version: ApiVersion, replacement: ApiVersion) -> Self {
        Self {
            version,
            replacement,
        }
    }

    fn deprecation_header(&self) -> String {
        format!("version=\"{}\"", self.version)
    }

    fn link_header(&self) -> String {
        format!("<{}/>; rel=\"successor-version\"", self.replacement.base_path())
    }
}

/// Mount `routes` once per API version under its base path
///
/// # Example
///
/// ```rust,ignore
/// let api = versioned_api(Router::new().route("/books", get(list_books)));
/// // serves /api/v1/books (deprecated) and /api/v2/books
/// ```
pub fn versioned_api<S>(routes: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    ApiVersion::ALL
        .into_iter()
        .fold(Router::new(), |api, version| {
            let mut versioned = routes
                .clone()
                .layer(middleware::from_fn(move |req: Request, next: Next| {
                    tag_version(version, req, next)
                }));

            if let Some(deprecation) = version.deprecation() {
                versioned = versioned.layer(middleware::from_fn(move |req: Request, next: Next| {
                    mark_deprecated(deprecation.clone(), req, next)
                }));
            }

            api.nest(version.base_path(), versioned)
        })
}

async fn tag_version(version: ApiVersion, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    response.headers_mut().insert(
        API_VERSION_HEADER,
        HeaderValue::from_static(version.as_path_segment()),
    );
    response
}

async fn mark_deprecated(deprecation: DeprecationInfo, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    if let Ok(value) = HeaderValue::from_str(&deprecation.deprecation_header()) {
        headers.insert("Deprecation", value);
    }

    if let Ok(value) = HeaderValue::from_str(&deprecation.link_header()) {
        headers.insert(header::LINK, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::get};
    use tower::ServiceExt;

    #[test]
    fn test_deprecation() {
        assert!(ApiVersion::V1.is_deprecated());
        assert!(!ApiVersion::V2.is_deprecated());
        assert!(ApiVersion::V2.deprecation().is_none());

        let info = ApiVersion::V1.deprecation().unwrap();
        assert_eq!(info.deprecation_header(), "version=\"v1\"");
        assert_eq!(info.link_header(), "</api/v2/>; rel=\"successor-version\"");
    }

    #[tokio::test]
    async fn test_versioned_api_headers() {
        let app = versioned_api(Router::new().route("/ping", get(|| async { "pong" })));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/v2/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[API_VERSION_HEADER], "v2");
        assert!(response.headers().get("Deprecation").is_none());

        let response = app
            .oneshot(Request::builder().uri("/api/v1/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[API_VERSION_HEADER], "v1");
        assert_eq!(response.headers()["Deprecation"], "version=\"v1\"");
        assert!(response.headers().contains_key(header::LINK));
    }
}
