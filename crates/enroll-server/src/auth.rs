// ABOUTME: HTTP Basic authentication middleware guarding every editor route.
// ABOUTME: Credentials are compared in constant time; a disabled policy adds no layer at all.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{HeaderMap, HeaderValue, Request, Response, StatusCode};
use axum::response::IntoResponse;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use enroll_core::WebAuth;
use subtle::ConstantTimeEq;
use tower::{Layer, Service};

/// Challenge sent with every 401.
pub const CHALLENGE: &str = r#"Basic realm="enroll""#;

/// Apply the Basic auth gate to `router` when `policy` is enabled; otherwise return it untouched.
pub fn gate(router: Router, policy: &WebAuth) -> Router {
    match BasicAuthLayer::from_policy(policy) {
        Some(layer) => router.layer(layer),
        None => router,
    }
}

struct Credentials {
    username: Vec<u8>,
    password: Vec<u8>,
}

impl Credentials {
    fn matches(&self, username: &[u8], password: &[u8]) -> bool {
        // Both comparisons always run so timing does not reveal which one failed.
        let user_ok = username.ct_eq(self.username.as_slice());
        let pass_ok = password.ct_eq(self.password.as_slice());
        (user_ok & pass_ok).into()
    }
}

/// A tower Layer that requires HTTP Basic credentials on every request.
#[derive(Clone)]
pub struct BasicAuthLayer {
    credentials: Arc<Credentials>,
}

impl BasicAuthLayer {
    /// Build the layer for an enabled policy. Returns None when the policy is
    /// off or has an empty username or password.
    pub fn from_policy(policy: &WebAuth) -> Option<Self> {
        if !policy.is_enabled() {
            return None;
        }
        Some(Self {
            credentials: Arc::new(Credentials {
                username: policy.username.as_bytes().to_vec(),
                password: policy.password.as_bytes().to_vec(),
            }),
        })
    }
}

impl<S> Layer<S> for BasicAuthLayer {
    type Service = BasicAuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BasicAuthMiddleware {
            inner,
            credentials: Arc::clone(&self.credentials),
        }
    }
}

/// The middleware service produced by `BasicAuthLayer`.
#[derive(Clone)]
pub struct BasicAuthMiddleware<S> {
    inner: S,
    credentials: Arc<Credentials>,
}

impl<S> Service<Request<Body>> for BasicAuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let authorized = basic_credentials(req.headers())
            .is_some_and(|(user, pass)| self.credentials.matches(&user, &pass));

        if !authorized {
            tracing::warn!(path = %req.uri().path(), "rejected request without valid credentials");
            return Box::pin(async move { Ok(unauthorized()) });
        }

        // Hand the readied service to this request and keep a fresh clone.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move { inner.call(req).await })
    }
}

/// Extract `(username, password)` from an `Authorization: Basic ...` header.
fn basic_credentials(headers: &HeaderMap) -> Option<(Vec<u8>, Vec<u8>)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let mut decoded = STANDARD.decode(encoded.trim()).ok()?;
    let colon = decoded.iter().position(|&b| b == b':')?;
    let password = decoded[colon + 1..].to_vec();
    decoded.truncate(colon);
    Some((decoded, password))
}

fn unauthorized() -> Response<Body> {
    let mut resp = (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    resp.headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
    resp
}
