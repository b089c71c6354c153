//! Authentication service implementation
//!
//! Bearer tokens are JWTs issued by the identity provider. With an issuer configured
//! the RS256 signature is checked against the issuer's JWKS document, which is cached
//! for a configurable TTL. Without one the claims are trusted as-is (development only).

use std::time::{Duration, Instant};
use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};
use crate::config::AuthConfig;
use crate::utils::errors::{Result, VolunteerHubError};

const ORGANIZER_ROLE: &str = "organizer";

/// Verified caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: String,
    pub is_organizer: bool,
}

impl Identity {
    pub fn new(subject_id: impl Into<String>, is_organizer: bool) -> Self {
        Self {
            subject_id: subject_id.into(),
            is_organizer,
        }
    }

    pub fn require_organizer(&self) -> Result<()> {
        if !self.is_organizer {
            return Err(VolunteerHubError::Forbidden("Only organizers can do this".to_string()));
        }
        Ok(())
    }

    /// Fail unless the caller is `user_id`
    pub fn require_subject(&self, user_id: &str) -> Result<()> {
        if self.subject_id != user_id {
            return Err(VolunteerHubError::Forbidden("Cannot act on behalf of another user".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    unsafe_metadata: Option<UnsafeMetadata>,
}

#[derive(Debug, Deserialize)]
struct UnsafeMetadata {
    #[serde(default)]
    role: Option<String>,
}

impl Claims {
    fn into_identity(self) -> Identity {
        let is_organizer = match self.unsafe_metadata {
            Some(metadata) => metadata.role.as_deref() == Some(ORGANIZER_ROLE),
            None => {
                debug!(subject = %self.sub, "Token carries no unsafe_metadata, treating as volunteer");
                false
            }
        };
        Identity {
            subject_id: self.sub,
            is_organizer,
        }
    }
}

/// Turns a bearer token into an [`Identity`]
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity>;
}

struct CachedJwks {
    keys: JwkSet,
    fetched_at: Instant,
}

/// JWT verifier backed by the issuer's JWKS endpoint
pub struct JwtVerifier {
    issuer: Option<String>,
    cache_ttl: Duration,
    http: reqwest::Client,
    jwks: RwLock<Option<CachedJwks>>,
}

impl JwtVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            issuer: config
                .issuer
                .as_ref()
                .map(|issuer| issuer.trim_end_matches('/').to_string()),
            cache_ttl: Duration::from_secs(config.jwks_cache_ttl_seconds),
            http: reqwest::Client::new(),
            jwks: RwLock::new(None),
        }
    }

    pub fn verifies_signatures(&self) -> bool {
        self.issuer.is_some()
    }

    fn decode_unverified(&self, token: &str) -> Result<Identity> {
        warn!("No token issuer configured, accepting token without signature verification");

        let mut validation = Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
        Ok(data.claims.into_identity())
    }

    async fn decode_verified(&self, issuer: &str, token: &str) -> Result<Identity> {
        let header = decode_header(token)?;
        let kid = header
            .kid
            .ok_or_else(|| VolunteerHubError::Unauthorized("Token has no key id".to_string()))?;

        let key = match self.decoding_key(issuer, &kid, false).await? {
            Some(key) => key,
            // Unknown kid may mean the issuer rotated its keys
            None => self
                .decoding_key(issuer, &kid, true)
                .await?
                .ok_or_else(|| VolunteerHubError::Unauthorized("Unable to find appropriate key".to_string()))?,
        };

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        validation.validate_aud = false;

        let data = decode::<Claims>(token, &key, &validation)?;
        Ok(data.claims.into_identity())
    }

    async fn decoding_key(&self, issuer: &str, kid: &str, force_refresh: bool) -> Result<Option<DecodingKey>> {
        if !force_refresh {
            let cache = self.jwks.read().await;
            if let Some(cached) = cache.as_ref().filter(|c| c.fetched_at.elapsed() < self.cache_ttl) {
                return cached.keys.find(kid).map(DecodingKey::from_jwk).transpose().map_err(Into::into);
            }
        }

        let keys = self.fetch_jwks(issuer).await?;
        let key = keys.find(kid).map(DecodingKey::from_jwk).transpose()?;
        *self.jwks.write().await = Some(CachedJwks {
            keys,
            fetched_at: Instant::now(),
        });
        Ok(key)
    }

    async fn fetch_jwks(&self, issuer: &str) -> Result<JwkSet> {
        let url = format!("{}/.well-known/jwks.json", issuer);
        debug!(url = %url, "Fetching JWKS");

        self.request_jwks(&url).await.map_err(|e| {
            error!(url = %url, error = %e, "Failed to fetch JWKS");
            VolunteerHubError::Unauthorized("Unable to fetch signing keys".to_string())
        })
    }

    async fn request_jwks(&self, url: &str) -> reqwest::Result<JwkSet> {
        self.http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await
    }
}

#[async_trait]
impl IdentityVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<Identity> {
        let verified = match self.issuer.as_deref() {
            Some(issuer) => self.decode_verified(issuer, token).await,
            None => self.decode_unverified(token),
        };

        verified.map_err(|e| {
            warn!(error = %e, "Token rejected");
            match e {
                VolunteerHubError::Unauthorized(_) => e,
                other => VolunteerHubError::Unauthorized(other.to_string()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn dev_verifier() -> JwtVerifier {
        JwtVerifier::new(&AuthConfig {
            issuer: None,
            jwks_cache_ttl_seconds: 300,
        })
    }

    fn unsigned_token(claims: serde_json::Value) -> String {
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"whatever")).unwrap()
    }

    #[tokio::test]
    async fn test_dev_mode_reads_organizer_role() {
        let token = unsigned_token(json!({
            "sub": "user_org",
            "unsafe_metadata": { "role": "organizer" }
        }));
        let identity = dev_verifier().verify(&token).await.unwrap();
        assert_eq!(identity, Identity::new("user_org", true));
    }

    #[tokio::test]
    async fn test_dev_mode_without_metadata_is_volunteer() {
        let token = unsigned_token(json!({ "sub": "user_1", "aud": "frontend" }));
        let identity = dev_verifier().verify(&token).await.unwrap();
        assert_eq!(identity.subject_id, "user_1");
        assert!(!identity.is_organizer);
    }

    #[tokio::test]
    async fn test_dev_mode_other_role_is_volunteer() {
        let token = unsigned_token(json!({
            "sub": "user_2",
            "unsafe_metadata": { "role": "volunteer" }
        }));
        assert!(!dev_verifier().verify(&token).await.unwrap().is_organizer);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        assert_matches!(
            dev_verifier().verify("not-a-jwt").await,
            Err(VolunteerHubError::Unauthorized(_))
        );
    }

    #[tokio::test]
    async fn test_unreachable_issuer_is_unauthorized() {
        let verifier = JwtVerifier::new(&AuthConfig {
            issuer: Some("http://127.0.0.1:9".to_string()),
            jwks_cache_ttl_seconds: 300,
        });
        assert!(verifier.verifies_signatures());

        let mut header = Header::default();
        header.kid = Some("kid-1".to_string());
        let token = encode(&header, &json!({ "sub": "u" }), &EncodingKey::from_secret(b"x")).unwrap();

        assert_matches!(verifier.verify(&token).await, Err(VolunteerHubError::Unauthorized(_)));
    }

    #[test]
    fn test_identity_guards() {
        let volunteer = Identity::new("u1", false);
        assert_matches!(volunteer.require_organizer(), Err(VolunteerHubError::Forbidden(_)));
        assert!(volunteer.require_subject("u1").is_ok());
        assert_matches!(volunteer.require_subject("u2"), Err(VolunteerHubError::Forbidden(_)));
        assert!(Identity::new("o1", true).require_organizer().is_ok());
    }
}
