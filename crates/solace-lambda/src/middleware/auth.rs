use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use lambda_http::RequestExt;
use lambda_http::aws_lambda_events::apigw::ApiGatewayRequestAuthorizer;
use lambda_http::request::RequestContext;
use serde::Deserialize;
use serde_json::Value;

use solace_core::user::UserId;

use crate::error::ApiError;

/// How the caller's identity is established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Behind API Gateway. The authorizer has verified the token; the
    /// subject is read from the claims it attached to the request context.
    Gateway,
    /// Local listener. A JWT-shaped bearer token contributes its `sub`
    /// claim without signature checks; any other token is the user id
    /// itself.
    Local,
}

/// Identity middleware.
///
/// Resolves the caller's subject according to the [`AuthMode`] and inserts
/// [`AuthUser`] into the request extensions. The subject is the user id
/// every document key is partitioned by. It is also copied onto the
/// response for the audit log.
pub async fn require_auth(State(mode): State<AuthMode>, mut req: Request, next: Next) -> Response {
    let sub = match resolve_subject(mode, &req) {
        Ok(sub) => sub,
        Err(e) => return e.into_response(),
    };

    let user = AuthUser { sub };
    req.extensions_mut().insert(user.clone());

    let mut response = next.run(req).await;
    response.extensions_mut().insert(user);
    response
}

fn resolve_subject(mode: AuthMode, req: &Request) -> Result<UserId, ApiError> {
    let sub = match mode {
        AuthMode::Gateway => authorizer_subject(req)
            .ok_or_else(|| ApiError::Unauthorized("no authorizer claims on request".to_string()))?,
        AuthMode::Local => {
            let token = bearer_token(req)?;
            if token.split('.').count() == 3 {
                jwt_subject(token)?
            } else {
                token.to_string()
            }
        }
    };
    Ok(UserId::parse(&sub)?)
}

/// The `sub` claim attached by an API Gateway authorizer: HTTP API JWT
/// authorizers, or REST API Cognito user pool authorizers.
fn authorizer_subject(req: &Request) -> Option<String> {
    match req.request_context_ref()? {
        RequestContext::ApiGatewayV2(ctx) => ctx.authorizer.as_ref().and_then(claims_subject),
        RequestContext::ApiGatewayV1(ctx) => claims_subject(&ctx.authorizer),
        _ => None,
    }
}

fn claims_subject(authorizer: &ApiGatewayRequestAuthorizer) -> Option<String> {
    if let Some(sub) = authorizer.jwt.as_ref().and_then(|jwt| jwt.claims.get("sub")) {
        return Some(sub.clone());
    }
    authorizer
        .fields
        .get("claims")
        .and_then(|claims| claims.get("sub"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn bearer_token(req: &Request) -> Result<&str, ApiError> {
    req.headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))
}

#[derive(Deserialize)]
struct Claims {
    sub: String,
}

fn jwt_subject(token: &str) -> Result<String, ApiError> {
    let invalid = || ApiError::Unauthorized("malformed bearer token".to_string());

    let payload = token.split('.').nth(1).ok_or_else(invalid)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| invalid())?;
    let claims: Claims = serde_json::from_slice(&bytes).map_err(|_| invalid())?;
    Ok(claims.sub)
}

/// Authenticated user extracted from the request.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub sub: UserId,
}
