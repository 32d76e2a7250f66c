//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, Role, UpdateUser, User, UserClaims, UserQuery},
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

    /// Authenticate by username and password, returning a bearer token and
    /// the user. Wrong username and wrong password are indistinguishable.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Create JWT token for a user
    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify user password against the stored argon2 hash
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Search users with pagination
    pub async fn search_users(&self, query: &UserQuery) -> AppResult<(Vec<User>, i64)> {
        self.repository.users.search(query).await
    }

    /// All technicians, for dropdowns
    pub async fn list_technicians(&self) -> AppResult<Vec<User>> {
        self.repository.users.list_technicians().await
    }

    /// Create a new user. This is the only path that can mint an
    /// administrator; role edits cannot (see `rules::validate_role_change`).
    pub async fn create_user(&self, user: CreateUser) -> AppResult<User> {
        if self
            .repository
            .users
            .username_exists(&user.username, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                user.username
            )));
        }

        let password = user.password.as_deref().filter(|p| !p.is_empty()).ok_or_else(|| {
            AppError::Validation("Password is mandatory for new user creation".to_string())
        })?;
        let password_hash = self.hash_password(password)?;

        let role = user.role.unwrap_or(Role::Technician);
        self.repository.users.create(&user, &password_hash, role).await
    }

    /// Update an existing user. Role-change invariants are enforced inside
    /// the repository transaction.
    pub async fn update_user(&self, id: i32, user: UpdateUser) -> AppResult<User> {
        self.repository.users.update(id, &user).await
    }

    /// Delete a user. The last-administrator invariant is enforced inside
    /// the repository transaction.
    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await
    }

    /// Create the configured administrator when the users table is empty.
    /// Once this has run, the last-admin invariant keeps the count >= 1.
    pub async fn ensure_initial_admin(&self) -> AppResult<()> {
        if self.repository.users.count().await? > 0 {
            return Ok(());
        }

        let admin = CreateUser {
            username: self.config.initial_admin_username.clone(),
            password: Some(self.config.initial_admin_password.clone()),
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            email: None,
            phone: None,
            role: Some(Role::Admin),
        };

        let created = self.create_user(admin).await?;
        tracing::info!("Created initial administrator '{}'", created.username);
        Ok(())
    }
}
