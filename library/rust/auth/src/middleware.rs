//! axum 用の認証ミドルウェアと IdentityContext エクストラクタ。

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use http::{header, request::Parts, HeaderValue, StatusCode};
use serde_json::json;

use crate::claims::IdentityContext;
use crate::rbac::{authorize, Requirement};
use crate::role::Role;
use crate::verifier::{AuthError, TokenVerifier};

/// ミドルウェアファクトリの戻り値型。
type AuthMiddlewareFuture = std::pin::Pin<
    Box<dyn std::future::Future<Output = Result<Response, AuthErrorResponse>> + Send>,
>;

/// AuthState はミドルウェアが使用する共有状態。
#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<TokenVerifier>,
}

impl AuthState {
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self { verifier }
    }
}

/// auth_middleware はトークン認証ミドルウェア。
/// Authorization ヘッダーから Bearer トークンを取得して検証し、
/// 成功時は IdentityContext をリクエストエクステンションに格納する。
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthErrorResponse> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let ctx = state.verifier.verify_header(header_value).map_err(|e| {
        tracing::debug!(error = %e, path = %req.uri().path(), "token verification failed");
        AuthErrorResponse::from_auth_error(&e)
    })?;

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// require_role は指定ロールのいずれかを必須とするミドルウェアファクトリ。
/// auth_middleware の後に使用すること。
pub fn require_role(
    roles: &'static [Role],
) -> impl Fn(Request<Body>, Next) -> AuthMiddlewareFuture + Clone {
    move |req: Request<Body>, next: Next| -> AuthMiddlewareFuture {
        Box::pin(async move {
            let ctx = req
                .extensions()
                .get::<IdentityContext>()
                .copied()
                .ok_or_else(AuthErrorResponse::unauthenticated)?;

            authorize(&ctx, &Requirement::AnyRole(roles))
                .map_err(|e| AuthErrorResponse::from_auth_error(&e))?;

            Ok(next.run(req).await)
        })
    }
}

/// ハンドラー引数で `IdentityContext` を直接受け取れるようにする。
/// auth_middleware を通っていないリクエストでは 401 を返す。
impl<S> FromRequestParts<S> for IdentityContext
where
    S: Send + Sync,
{
    type Rejection = AuthErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<IdentityContext>()
            .copied()
            .ok_or_else(AuthErrorResponse::unauthenticated)
    }
}

/// AuthErrorResponse は認証・認可エラーの HTTP レスポンス。
///
/// 未認証の理由（ヘッダーなし・署名不正・期限切れ等）はレスポンス上区別しない。
#[derive(Debug)]
pub struct AuthErrorResponse {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl AuthErrorResponse {
    pub fn from_auth_error(err: &AuthError) -> Self {
        if err.is_unauthenticated() {
            Self::unauthenticated()
        } else {
            Self::forbidden()
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "RENTAL_AUTH_UNAUTHENTICATED".into(),
            message: "Could not validate credentials".into(),
        }
    }

    pub fn forbidden() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            code: "RENTAL_AUTH_PERMISSION_DENIED".into(),
            message: "Insufficient permissions for the requested operation".into(),
        }
    }
}

impl IntoResponse for AuthErrorResponse {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "code": self.code,
                "message": self.message,
            }
        });

        let mut resp = (self.status, Json(body)).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            resp.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::Claims;
    use crate::codec::{CodecError, TokenCodec};
    use axum::{middleware, routing::get, Router};
    use jsonwebtoken::Algorithm;
    use tower::ServiceExt;

    const OWNER_ONLY: &[Role] = &[Role::Owner];

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(b"middleware-secret", Algorithm::HS256, 0).unwrap())
    }

    fn token_for(codec: &TokenCodec, id: i64, role: Role) -> String {
        let now = chrono::Utc::now().timestamp();
        codec.encode(&Claims::new(id, role, now, now + 600)).unwrap()
    }

    fn app(codec: Arc<TokenCodec>) -> Router {
        let state = AuthState::new(Arc::new(TokenVerifier::new(codec)));
        Router::new()
            .route(
                "/owner-only",
                get(|ctx: IdentityContext| async move { ctx.id.to_string() })
                    .route_layer(middleware::from_fn(require_role(OWNER_ONLY))),
            )
            .route(
                "/me",
                get(|ctx: IdentityContext| async move { Json(ctx) }),
            )
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn send(app: Router, auth: Option<&str>, uri: &str) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        app.oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn error_code(resp: Response) -> String {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        json["error"]["code"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn test_missing_token_returns_401() {
        let resp = send(app(codec()), None, "/me").await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        assert_eq!(error_code(resp).await, "RENTAL_AUTH_UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_invalid_token_returns_same_401() {
        let resp = send(app(codec()), Some("Bearer garbage"), "/me").await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(resp).await, "RENTAL_AUTH_UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_expired_token_returns_same_401() {
        let codec = codec();
        let now = chrono::Utc::now().timestamp();
        let token = codec
            .encode(&Claims::new(1, Role::Owner, now - 120, now - 60))
            .unwrap();
        assert_eq!(codec.decode(&token), Err(CodecError::Expired));

        let resp = send(app(codec), Some(&format!("Bearer {}", token)), "/me").await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_code(resp).await, "RENTAL_AUTH_UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_valid_token_passes_identity_context() {
        let codec = codec();
        let token = token_for(&codec, 42, Role::Tenant);

        let resp = send(app(codec), Some(&format!("Bearer {}", token)), "/me").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["id"], 42);
        assert_eq!(json["role"], "TENANT");
    }

    #[tokio::test]
    async fn test_require_role_forbidden() {
        let codec = codec();
        let token = token_for(&codec, 2, Role::Tenant);

        let resp = send(
            app(codec),
            Some(&format!("Bearer {}", token)),
            "/owner-only",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(error_code(resp).await, "RENTAL_AUTH_PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn test_require_role_allowed() {
        let codec = codec();
        let token = token_for(&codec, 3, Role::Owner);

        let resp = send(
            app(codec),
            Some(&format!("Bearer {}", token)),
            "/owner-only",
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_extractor_without_middleware_returns_401() {
        let app = Router::new().route("/me", get(|ctx: IdentityContext| async move { Json(ctx) }));
        let resp = send(app, None, "/me").await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
