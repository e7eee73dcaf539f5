use chrono::Duration;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::get_config;
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::user::User;
use crate::utils::{crypto, time, token, validation};

pub const ACCESS_TOKEN_TTL_SECS: i64 = 3600;
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(User, IssuedTokens)> {
        if !validation::password_meets_policy(password) {
            return Err(Error::InvalidInput(
                "Password must be at least 8 characters with an uppercase letter and a digit"
                    .to_string(),
            ));
        }
        let email = email.trim().to_lowercase();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&email)
        .bind(
            crypto::hash_password(password)
                .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?,
        )
        .bind(name.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Conflict("An account with this email already exists".to_string())
            }
            _ => Error::from(e),
        })?;

        let tokens = self.issue_tokens(&user).await?;
        Ok((user, tokens))
    }

    /// One generic rejection for both unknown email and wrong password.
    pub async fn signin(&self, email: &str, password: &str) -> Result<(User, IssuedTokens)> {
        let email = email.trim().to_lowercase();
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?;

        let Some(user) = user else {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        };
        let ok = crypto::verify_password(password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
        if !ok {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }

        let tokens = self.issue_tokens(&user).await?;
        Ok((user, tokens))
    }

    /// Rotate a refresh token. The revocation is the claim: the first
    /// caller flips `revoked_at`, a concurrent replay finds no live row
    /// and is rejected.
    pub async fn refresh(&self, refresh_token: &str) -> Result<(User, IssuedTokens)> {
        let token_hash = crypto::sha256_hex(refresh_token);
        let claimed: Option<(Uuid,)> = sqlx::query_as::<_, (Uuid,)>(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = NOW()
            WHERE token_hash = $1 AND revoked_at IS NULL AND expires_at > NOW()
            RETURNING user_id
            "#,
        )
        .bind(&token_hash)
        .fetch_optional(&self.pool)
        .await?;

        let Some((user_id,)) = claimed else {
            return Err(Error::Unauthorized("Invalid refresh token".to_string()));
        };

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let tokens = self.issue_tokens(&user).await?;
        Ok((user, tokens))
    }

    /// Revoking an already-revoked or unknown token is a no-op.
    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        let token_hash = crypto::sha256_hex(refresh_token);
        sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = NOW() WHERE token_hash = $1 AND revoked_at IS NULL",
        )
        .bind(&token_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn issue_tokens(&self, user: &User) -> Result<IssuedTokens> {
        let access_token = self.sign_access_token(user)?;
        let refresh_token = token::generate_token_hex(64);
        let expires_at = time::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);

        sqlx::query("INSERT INTO refresh_tokens (user_id, token_hash, expires_at) VALUES ($1, $2, $3)")
            .bind(user.id)
            .bind(crypto::sha256_hex(&refresh_token))
            .bind(expires_at)
            .execute(&self.pool)
            .await?;

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            access_expires_in: ACCESS_TOKEN_TTL_SECS,
        })
    }

    fn sign_access_token(&self, user: &User) -> Result<String> {
        let config = get_config();
        let claims = Claims {
            sub: user.id.to_string(),
            exp: (time::now() + Duration::seconds(ACCESS_TOKEN_TTL_SECS)).timestamp() as usize,
            role: Some("interviewer".to_string()),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| Error::Internal(format!("Token signing failed: {}", e)))
    }
}

#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_in: i64,
}
