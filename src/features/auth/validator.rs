use super::jwks::JwksClient;
use super::model::{AuthenticatedUser, IdTokenClaims};
use crate::core::error::AppError;
use crate::shared::messages;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use std::sync::Arc;
use std::time::Duration;

/// Verifies identity-provider ID tokens (RS256, issuer and audience bound to the project)
pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        leeway: Duration,
    ) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| reject(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(reject(format!(
                "Unsupported algorithm: {:?}. Only RS256 is allowed",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| reject("Missing kid in token header".to_string()))?;

        let decoding_key = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| reject(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iat", "iss", "aud", "sub"]);
        validation.leeway = self.leeway;

        let claims = decode::<IdTokenClaims>(token, &decoding_key, &validation)
            .map_err(|e| reject(e.to_string()))?
            .claims;

        if claims.sub.is_empty() {
            return Err(reject("Empty subject".to_string()));
        }

        Ok(AuthenticatedUser {
            uid: claims.sub,
            email: claims.email,
            email_verified: claims.email_verified,
            id_token: token.to_string(),
        })
    }
}

fn reject(reason: String) -> AppError {
    tracing::debug!("Rejected bearer token: {}", reason);
    AppError::Unauthorized(messages::INVALID_TOKEN.to_string())
}
