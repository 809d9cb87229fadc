//! User registry: idempotent registration, profile updates, role lookup.

use tourhub_core::error::{TourError, TourResult};
use tourhub_core::models::role::Role;
use tourhub_core::models::user::{CreateUser, Registration, RoleView, UpdateUser, User};
use tourhub_core::repository::UserRepository;
use tracing::info;
use uuid::Uuid;

pub struct UserService<U: UserRepository> {
    users: U,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Register a user by email.
    ///
    /// If the email is already known the stored record is returned
    /// unchanged together with a greeting, and `inserted_id` is `None`.
    pub async fn register(&self, mut input: CreateUser) -> TourResult<Registration> {
        input.email = input.email.trim().to_string();
        if input.email.is_empty() {
            return Err(TourError::validation("email is required"));
        }

        match self.users.get_by_email(&input.email).await {
            Ok(existing) => return Ok(returning(existing)),
            Err(TourError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        match self.users.create(input.clone()).await {
            Ok(user) => {
                info!(user_id = %user.id, email = %user.email, "User registered");
                Ok(Registration {
                    inserted_id: Some(user.id),
                    message: None,
                    user,
                })
            }
            // Lost a race against a concurrent registration of the same email.
            Err(TourError::AlreadyExists { .. }) => {
                let existing = self.users.get_by_email(&input.email).await?;
                Ok(returning(existing))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn get(&self, id: Uuid) -> TourResult<User> {
        self.users.get_by_id(id).await
    }

    pub async fn list(&self, role: Option<Role>) -> TourResult<Vec<User>> {
        self.users.list_by_role(role).await
    }

    pub async fn update(&self, id: Uuid, input: UpdateUser) -> TourResult<User> {
        if input.name.is_none() && input.photo_url.is_none() && input.role.is_none() {
            return Err(TourError::validation("no fields to update"));
        }

        let user = self.users.update(id, input).await?;
        info!(user_id = %user.id, role = ?user.role, "User updated");
        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> TourResult<()> {
        self.users.delete(id).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Stored role of `email`; `None` when the user or the role is absent.
    pub async fn role_of(&self, email: &str) -> TourResult<RoleView> {
        match self.users.get_by_email(email).await {
            Ok(user) => Ok(RoleView { role: user.role }),
            Err(TourError::NotFound { .. }) => Ok(RoleView { role: None }),
            Err(e) => Err(e),
        }
    }
}

fn returning(user: User) -> Registration {
    let message = match user.role {
        Some(role) => format!("Welcome back {} as {}", user.name, role),
        None => format!("Welcome back {}", user.name),
    };

    Registration {
        inserted_id: None,
        message: Some(message),
        user,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn user(role: Option<Role>) -> User {
        User {
            id: Uuid::new_v4(),
            email: "t@x.com".into(),
            name: "Tess".into(),
            photo_url: None,
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn greeting_mentions_role_when_stored() {
        let reg = returning(user(Some(Role::Guide)));
        assert_eq!(reg.message.as_deref(), Some("Welcome back Tess as guide"));
        assert!(reg.inserted_id.is_none());
    }

    #[test]
    fn greeting_without_role() {
        let reg = returning(user(None));
        assert_eq!(reg.message.as_deref(), Some("Welcome back Tess"));
    }
}
