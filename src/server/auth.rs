//! Bearer token authentication.
//!
//! Protected routes require a header of the exact form:
//!
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! The header is split on single spaces and must yield exactly two parts, the
//! first being literally `Bearer`. The token must equal the configured server
//! secret byte for byte. The comparison runs in constant time.
//!
//! If no secret is configured the protected routes cannot be reached at all;
//! every request is answered with a 500.
//!
//! # Example
//!
//! ```rust
//! use image_search_proxy::server::auth::{AuthError, BearerAuth};
//!
//! let auth = BearerAuth::new(Some("my-secret"));
//!
//! assert!(auth.verify(Some("Bearer my-secret")).is_ok());
//! assert!(matches!(auth.verify(Some("Bearer nope")), Err(AuthError::InvalidKey)));
//! assert!(matches!(auth.verify(None), Err(AuthError::MissingHeader)));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use tracing::{debug, error, warn};

// =============================================================================
// Types
// =============================================================================

/// Authentication error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No server secret is configured
    NotConfigured,

    /// Authorization header is absent or empty
    MissingHeader,

    /// Header is not `Bearer <token>`
    InvalidFormat,

    /// Token does not match the server secret
    InvalidKey,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::NotConfigured => write!(f, "API key not configured on server"),
            AuthError::MissingHeader => write!(f, "Authorization header required"),
            AuthError::InvalidFormat => write!(
                f,
                "Invalid authorization header format. Use: Bearer <token>"
            ),
            AuthError::InvalidKey => write!(f, "Invalid API key"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::MissingHeader | AuthError::InvalidFormat | AuthError::InvalidKey => {
                StatusCode::UNAUTHORIZED
            }
        };
        let message = self.to_string();

        // A wrong key may be someone guessing, so it is worth a warning
        match &self {
            AuthError::NotConfigured => {
                error!(status = status.as_u16(), "Authentication failed: {}", message);
            }
            AuthError::InvalidKey => {
                warn!(status = status.as_u16(), "Authentication failed: {}", message);
            }
            _ => {
                debug!(status = status.as_u16(), "Authentication failed: {}", message);
            }
        }

        (status, message).into_response()
    }
}

// =============================================================================
// Bearer Authentication
// =============================================================================

/// Static bearer token authenticator.
#[derive(Clone)]
pub struct BearerAuth {
    /// Expected token; `None` when the server has no secret configured
    secret: Option<Arc<str>>,
}

impl BearerAuth {
    /// Create an authenticator. An empty secret counts as not configured.
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()).map(Arc::from),
        }
    }

    /// Whether a secret is configured.
    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Check an `Authorization` header value.
    pub fn verify(&self, header: Option<&str>) -> Result<(), AuthError> {
        let secret = self.secret.as_deref().ok_or(AuthError::NotConfigured)?;

        let header = match header {
            Some(h) if !h.is_empty() => h,
            _ => return Err(AuthError::MissingHeader),
        };

        let token = parse_bearer(header).ok_or(AuthError::InvalidFormat)?;

        if token.as_bytes().ct_eq(secret.as_bytes()).into() {
            Ok(())
        } else {
            Err(AuthError::InvalidKey)
        }
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth")
            .field("configured", &self.is_configured())
            .finish()
    }
}

/// Extract the token from `Bearer <token>`.
///
/// Splits on every single space, so `Bearer  x` (two spaces) and
/// `Bearer a b` are both malformed. `Bearer ` yields an empty token.
fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    let scheme = parts.next()?;
    let token = parts.next()?;
    if scheme != "Bearer" || parts.next().is_some() {
        return None;
    }
    Some(token)
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware for bearer token authentication.
///
/// Rejected requests never reach the wrapped handler.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware, routing::any};
/// use image_search_proxy::server::auth::{BearerAuth, auth_middleware};
///
/// let auth = BearerAuth::new(Some("secret-key"));
/// let app = Router::new()
///     .route("/api/image", any(image_handler))
///     .route_layer(middleware::from_fn_with_state(auth, auth_middleware));
/// ```
pub async fn auth_middleware(
    State(auth): State<BearerAuth>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = match request.headers().get(AUTHORIZATION) {
        None => None,
        // Header values may carry UTF-8 tokens that `to_str` would refuse
        Some(value) => {
            Some(std::str::from_utf8(value.as_bytes()).map_err(|_| AuthError::InvalidFormat)?)
        }
    };

    auth.verify(header)?;

    Ok(next.run(request).await)
}

// =============================================================================
// Tests
// =============================================================================
