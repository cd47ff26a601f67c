use crate::config::Config;
use crate::domain::models::{auth::SessionClaims, tenant::SchemaName, user::Role};
use crate::error::AppError;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm as JwtAlgorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use tracing::{debug, error};

pub const SESSION_TTL_HOURS: i64 = 24;

/// Password hashing and stateless session tokens.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    hasher: Argon2<'static>,
}

impl AuthService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let params = Params::new(
            config.password_hash_memory_kib,
            config.password_hash_iterations,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| AppError::InternalWithMsg(format!("invalid password hash parameters: {}", e)))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.auth_issuer.clone(),
            hasher: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn hash_password(&self, plain: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.hasher
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::InternalWithMsg(format!("password hashing failed: {}", e)))
    }

    /// Cost parameters are read from the stored hash, so older hashes keep verifying
    /// after the configured cost changes.
    pub fn verify_password(&self, plain: &str, hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::InternalWithMsg(format!("stored password hash is malformed: {}", e)))?;

        match self.hasher.verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::InternalWithMsg(format!("password verification failed: {}", e))),
        }
    }

    pub fn issue_token(&self, user_id: &str, role: Role, tenant: Option<&SchemaName>) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            user_id: user_id.to_string(),
            role,
            tenant: tenant.cloned(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(SESSION_TTL_HOURS)).timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &SessionClaims) -> Result<String, AppError> {
        encode(&Header::new(JwtAlgorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            error!("JWT encoding failed: {}", e);
            AppError::Internal
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, AppError> {
        let mut validation = Validation::new(JwtAlgorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iat", "iss"]);

        decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Rejected session token: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::Unauthorized("Token expired".into()),
                    _ => AppError::Unauthorized("Invalid token".into()),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with_secret(secret: &str) -> AuthService {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("sqlite://unused.db".to_string()),
            "JWT_SECRET" => Some(secret.to_string()),
            "PASSWORD_HASH_ITERATIONS" => Some("1".to_string()),
            "PASSWORD_HASH_MEMORY_KIB" => Some("1024".to_string()),
            _ => None,
        })
        .unwrap();
        AuthService::new(&config).unwrap()
    }

    #[test]
    fn test_password_round_trip() {
        let auth = service_with_secret("s3cret");
        let hash = auth.hash_password("pw").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(auth.verify_password("pw", &hash).unwrap());
        assert!(!auth.verify_password("pw ", &hash).unwrap());
        assert!(!auth.verify_password("other", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let auth = service_with_secret("s3cret");
        assert_ne!(auth.hash_password("pw").unwrap(), auth.hash_password("pw").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let auth = service_with_secret("s3cret");
        assert!(auth.verify_password("pw", "not-a-hash").is_err());
    }

    #[test]
    fn test_token_carries_tenant_claim() {
        let auth = service_with_secret("s3cret");
        let schema = SchemaName::parse("joes_shop").unwrap();
        let token = auth.issue_token("user-1", Role::Customer, Some(&schema)).unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.user_id, "user-1");
        assert_eq!(claims.role, Role::Customer);
        assert_eq!(claims.tenant, Some(schema));
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_HOURS * 3600);
    }

    #[test]
    fn test_superadmin_token_has_no_tenant() {
        let auth = service_with_secret("s3cret");
        let token = auth.issue_token("admin-1", Role::SuperAdmin, None).unwrap();
        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.role, Role::SuperAdmin);
        assert!(claims.tenant.is_none());
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let issuer = service_with_secret("one");
        let verifier = service_with_secret("two");
        let token = issuer.issue_token("u", Role::Barber, None).unwrap();
        assert!(matches!(verifier.verify_token(&token), Err(AppError::Unauthorized(_))));
        assert!(matches!(verifier.verify_token("garbage"), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = service_with_secret("s3cret");
        let past = Utc::now() - Duration::hours(SESSION_TTL_HOURS + 1);
        let claims = SessionClaims {
            user_id: "u".into(),
            role: Role::Customer,
            tenant: None,
            iss: "barber-booking".into(),
            iat: past.timestamp(),
            exp: (past + Duration::minutes(5)).timestamp(),
        };
        let token = auth.sign(&claims).unwrap();

        match auth.verify_token(&token) {
            Err(AppError::Unauthorized(msg)) => assert_eq!(msg, "Token expired"),
            other => panic!("expected expiry rejection, got {:?}", other),
        }
    }
}
