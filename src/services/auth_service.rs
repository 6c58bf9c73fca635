use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User, UserPublic};
use crate::store::Store;
use crate::utils::validators::sanitize_string;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub token_type: String,
}

pub struct AuthService {
    config: Config,
}

impl AuthService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn generate_access_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.jwt_access_expiry);

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type: "access".to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(AppError::from)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
    }

    pub fn verify_password(password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    pub async fn register(&self, store: &dyn Store, request: RegisterRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let username = sanitize_string(&request.username);
        let email = sanitize_string(&request.email).to_lowercase();

        if store.find_user_by_username(&username).await?.is_some() {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }
        if store.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username,
            email,
            full_name: request.full_name,
            password_hash: Self::hash_password(&request.password)?,
            created_at: Utc::now(),
        };
        store.insert_user(&user).await?;
        tracing::info!("Registered user {}", user.username);

        self.issue(user)
    }

    pub async fn login(&self, store: &dyn Store, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let user = store
            .find_user_by_username(&sanitize_string(&request.username))
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !Self::verify_password(&request.password, &user.password_hash) {
            tracing::warn!("Failed login for user {}", user.username);
            return Err(AppError::Unauthorized);
        }

        self.issue(user)
    }

    pub async fn get_user_by_id(store: &dyn Store, user_id: Uuid) -> AppResult<User> {
        store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    fn issue(&self, user: User) -> AppResult<AuthResponse> {
        let access_token = self.generate_access_token(&user)?;
        Ok(AuthResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.jwt_access_expiry,
            user: UserPublic::from(user),
        })
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        storage_backend: crate::config::StorageBackend::Memory,
        database_url: None,
        db_max_connections: 1,
        jwt_secret: "test-secret".to_string(),
        jwt_access_expiry: 3600,
    }
}
