//! Authentication service for user registration, login, and token management

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use shared::{validate_password, Role};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

/// Input for self-service registration. Storekeepers and admins are
/// provisioned by an admin, never through this path.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 2, max = 120))]
    pub nombre: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Response after successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub role: String,
    pub chat_access: bool,
    pub stock_access: bool,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication tokens
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// User info from database
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub nombre: String,
    pub role: String,
    pub chat_access: bool,
    pub stock_access: bool,
    pub is_active: bool,
}

/// Body of the admin flag update endpoint
#[derive(Debug, Deserialize)]
pub struct UpdateFlagsInput {
    pub chat_access: Option<bool>,
    pub stock_access: Option<bool>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
            refresh_token_expiry: config.jwt.refresh_token_expiry,
        }
    }

    /// Register a student or teacher account
    pub async fn register(&self, input: RegisterInput) -> AppResult<RegisterResponse> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        // Self-registration is limited to the requester roles
        if !input.role.can_request() {
            return Err(AppError::Validation {
                field: "role".to_string(),
                message: "Only student and teacher accounts can self-register".to_string(),
                message_es: "Solo alumnos y docentes pueden registrarse por su cuenta".to_string(),
            });
        }

        validate_password(&input.password)
            .map_err(|m| AppError::ValidationError(m.to_string()))?;

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM usuarios WHERE email = $1",
        )
        .bind(&input.email)
        .fetch_one(&self.db)
        .await?;

        if existing > 0 {
            return Err(AppError::Conflict {
                resource: "usuario".to_string(),
                message: "Email is already registered".to_string(),
                message_es: "El correo ya está registrado".to_string(),
            });
        }

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO usuarios (nombre, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&input.nombre)
        .bind(&input.email)
        .bind(&password_hash)
        .bind(input.role.as_str())
        .fetch_one(&self.db)
        .await?;

        let tokens = self.generate_tokens(user_id, input.role, false, false)?;
        self.store_refresh_token(user_id, &tokens.refresh_token).await?;

        Ok(RegisterResponse {
            user_id,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
        })
    }

    /// Authenticate user with email and password
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthTokens> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, nombre, role, chat_access, stock_access, is_active
            FROM usuarios
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        if !user.is_active {
            return Err(AppError::Unauthorized {
                message: "Account is disabled".to_string(),
                message_es: "La cuenta está deshabilitada".to_string(),
            });
        }

        let valid = verify(password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        sqlx::query("UPDATE usuarios SET last_login_at = NOW() WHERE id = $1")
            .bind(user.id)
            .execute(&self.db)
            .await?;

        let role = Role::parse(&user.role)
            .ok_or_else(|| AppError::Internal(format!("unknown role: {}", user.role)))?;

        let tokens =
            self.generate_tokens(user.id, role, user.chat_access, user.stock_access)?;
        self.store_refresh_token(user.id, &tokens.refresh_token).await?;

        Ok(tokens)
    }

    /// Refresh access token using refresh token. The old token is revoked;
    /// each refresh token works once.
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthTokens> {
        let token_hash = Self::hash_token(refresh_token);

        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.email, u.password_hash, u.nombre, u.role,
                   u.chat_access, u.stock_access, u.is_active
            FROM refresh_tokens rt
            JOIN usuarios u ON u.id = rt.user_id
            WHERE rt.token_hash = $1
              AND rt.expires_at > NOW()
              AND rt.revoked_at IS NULL
              AND u.is_active = true
            "#,
        )
        .bind(&token_hash)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidToken)?;

        sqlx::query("UPDATE refresh_tokens SET revoked_at = NOW() WHERE token_hash = $1")
            .bind(&token_hash)
            .execute(&self.db)
            .await?;

        let role = Role::parse(&user.role)
            .ok_or_else(|| AppError::Internal(format!("unknown role: {}", user.role)))?;

        let tokens =
            self.generate_tokens(user.id, role, user.chat_access, user.stock_access)?;
        self.store_refresh_token(user.id, &tokens.refresh_token).await?;

        Ok(tokens)
    }

    /// Admin-only: grant or revoke a storekeeper's chat and stock flags.
    /// Takes effect on the target's next login or refresh.
    pub async fn update_flags(
        &self,
        admin: &AuthUser,
        target_id: Uuid,
        input: UpdateFlagsInput,
    ) -> AppResult<()> {
        if admin.role != Role::Admin {
            return Err(AppError::Forbidden(
                "only administrators may change access flags".to_string(),
            ));
        }

        let target_role = sqlx::query_scalar::<_, String>(
            "SELECT role FROM usuarios WHERE id = $1",
        )
        .bind(target_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuario".to_string()))?;

        if Role::parse(&target_role) != Some(Role::Storekeeper) {
            return Err(AppError::ValidationError(
                "Access flags only apply to storekeeper accounts".to_string(),
            ));
        }

        sqlx::query(
            r#"
            UPDATE usuarios
            SET chat_access = COALESCE($2, chat_access),
                stock_access = COALESCE($3, stock_access)
            WHERE id = $1
            "#,
        )
        .bind(target_id)
        .bind(input.chat_access)
        .bind(input.stock_access)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Generate access and refresh tokens
    fn generate_tokens(
        &self,
        user_id: Uuid,
        role: Role,
        chat_access: bool,
        stock_access: bool,
    ) -> AppResult<AuthTokens> {
        let now = Utc::now();
        let access_exp = now + Duration::seconds(self.access_token_expiry);

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            chat_access,
            stock_access,
            exp: access_exp.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        // Refresh token (simple random token)
        let refresh_token = Uuid::new_v4().to_string();

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Store refresh token in database
    async fn store_refresh_token(&self, user_id: Uuid, token: &str) -> AppResult<()> {
        let token_hash = Self::hash_token(token);
        let expires_at = Utc::now() + Duration::seconds(self.refresh_token_expiry);

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(&token_hash)
        .bind(expires_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Hash a token for storage
    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hash_is_stable_and_opaque() {
        let a = AuthService::hash_token("some-refresh-token");
        let b = AuthService::hash_token("some-refresh-token");
        let c = AuthService::hash_token("other-token");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
        assert!(!a.contains("some-refresh-token"));
    }
}
