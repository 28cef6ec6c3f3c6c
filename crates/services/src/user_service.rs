use std::sync::Arc;

use tracing::info;

use backend::ProgressBackend;
use career_core::model::{User, UserId};

use crate::error::UserError;

/// Profile used when the app has to register a user on first launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    fn validate(&self) -> Result<(&str, &str), UserError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(UserError::EmptyName);
        }
        let email = self.email.trim();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(UserError::InvalidEmail(email.to_string()));
        }
        Ok((name, email))
    }
}

impl Default for NewUser {
    fn default() -> Self {
        Self::new("Explorer", "explorer@example.com")
    }
}

/// Creates and looks up users.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn ProgressBackend>,
}

impl UserService {
    #[must_use]
    pub fn new(users: Arc<dyn ProgressBackend>) -> Self {
        Self { users }
    }

    /// # Errors
    ///
    /// Returns `UserError` for an invalid profile or a backend failure.
    pub async fn create_user(&self, profile: &NewUser) -> Result<User, UserError> {
        let (name, email) = profile.validate()?;
        let user = self.users.create_user(name, email).await?;
        info!(user = %user.id, "registered user");
        Ok(user)
    }

    /// # Errors
    ///
    /// Returns `UserError::Backend` (including `NotFound`) if the lookup fails.
    pub async fn get_user(&self, user_id: &UserId) -> Result<User, UserError> {
        Ok(self.users.get_user(user_id).await?)
    }
}
