//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        enums::Role,
        user::{CreateUser, UpdateUser, User, UserClaims, UserPublic},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by username/password and issue a JWT token
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !user.is_active {
            return Err(AppError::Authentication("Account is deactivated".to_string()));
        }

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let token = self.issue_token(&user)?;
        Ok((token, user))
    }

    /// Build and sign claims for a user
    pub fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            role: user.role,
            iat: now,
            exp: now + (self.config.jwt_expiration_hours as i64) * 3600,
        };
        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(&user.password)
            .map_err(|e| AppError::Internal(format!("Stored hash is invalid: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// List all users
    pub async fn list(&self) -> AppResult<Vec<UserPublic>> {
        let users = self.repository.users.list().await?;
        Ok(users.into_iter().map(UserPublic::from).collect())
    }

    /// Get one user
    pub async fn get(&self, id: i32) -> AppResult<UserPublic> {
        let user = self.repository.users.get_by_id(id).await?;
        Ok(user.into())
    }

    /// Create a user (password hashed here, stored as a PHC string)
    pub async fn create(&self, data: &CreateUser) -> AppResult<UserPublic> {
        if data.username.trim().is_empty() {
            return Err(AppError::Validation("username is required".to_string()));
        }
        if data.password.len() < 8 {
            return Err(AppError::Validation(
                "password must be at least 8 characters".to_string(),
            ));
        }

        let hash = self.hash_password(&data.password)?;
        let user = self
            .repository
            .users
            .create(
                data.username.trim(),
                &data.email,
                &hash,
                data.first_name.as_deref(),
                data.last_name.as_deref(),
                data.role.unwrap_or(Role::Requester),
            )
            .await?;
        Ok(user.into())
    }

    /// Update a user
    pub async fn update(&self, id: i32, data: &UpdateUser) -> AppResult<UserPublic> {
        let hash = match &data.password {
            Some(p) => {
                if p.len() < 8 {
                    return Err(AppError::Validation(
                        "password must be at least 8 characters".to_string(),
                    ));
                }
                Some(self.hash_password(p)?)
            }
            None => None,
        };
        let user = self.repository.users.update(id, data, hash.as_deref()).await?;
        Ok(user.into())
    }

    /// Delete a user
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await
    }
}
