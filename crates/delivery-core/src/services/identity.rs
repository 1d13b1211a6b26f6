//! Registration, login and profile management.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{LoginCredentials, NewUser, User, UserEdit, mask_email, normalize_email};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, TokenService, UserRepository};

/// Signed bearer token handed back to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDto {
    pub token: String,
}

/// Identity service - registers users and authenticates them.
pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
}

impl IdentityService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            users,
            tokens,
            passwords,
        }
    }

    /// Register a new user and log them in.
    ///
    /// Fails with `DuplicateIdentity` when the normalized email is already on
    /// file, whether the pre-check or the store's unique constraint catches it.
    pub async fn register_user(&self, registration: NewUser) -> Result<TokenDto, DomainError> {
        let email = normalize_email(&registration.email);
        self.ensure_unique_email(&email).await?;

        let password = registration.password.clone();
        let stored = self.passwords.store(&password)?;
        let user = User::new(registration, email.clone(), stored);

        let user = match self.users.insert(user).await {
            Ok(user) => user,
            Err(RepoError::Constraint(detail)) => {
                tracing::debug!(%detail, "Unique constraint rejected registration");
                return Err(DomainError::DuplicateIdentity { email });
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = %user.id, "User registered");

        self.login_user(LoginCredentials { email, password }).await
    }

    /// Authenticate with email and password and issue a token whose subject
    /// is the user's ID.
    ///
    /// An unknown email and a wrong password both yield `AuthenticationFailed`.
    pub async fn login_user(&self, credentials: LoginCredentials) -> Result<TokenDto, DomainError> {
        let email = normalize_email(&credentials.email);
        let user = self.authenticate(&email, &credentials.password).await?;

        let token = self.tokens.issue_token(user.id)?;
        tracing::debug!(user_id = %user.id, "Token issued");

        Ok(TokenDto { token })
    }

    /// Load the profile of an authenticated user.
    pub async fn profile(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "User",
                id: user_id,
            })
    }

    /// Replace the editable profile fields of an authenticated user.
    pub async fn edit_profile(&self, user_id: Uuid, edit: UserEdit) -> Result<User, DomainError> {
        let mut user = self.profile(user_id).await?;
        user.apply_edit(edit);

        let user = self.users.update(user).await?;
        tracing::info!(user_id = %user.id, "Profile updated");

        Ok(user)
    }

    async fn ensure_unique_email(&self, email: &str) -> Result<(), DomainError> {
        if self.users.find_by_email(email).await?.is_some() {
            tracing::debug!(user_email = %mask_email(email), "Email already registered");
            return Err(DomainError::DuplicateIdentity {
                email: email.to_string(),
            });
        }
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::debug!(user_email = %mask_email(email), "Login failed");
            return Err(DomainError::AuthenticationFailed);
        };

        if !self.passwords.verify(password, &user.password)? {
            tracing::debug!(user_email = %mask_email(email), "Login failed");
            return Err(DomainError::AuthenticationFailed);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::domain::Gender;
    use crate::ports::{AuthError, TokenClaims};

    /// Store that enforces email uniqueness on insert. With `blind_lookup`
    /// set, `find_by_email` misses so only the constraint can catch duplicates.
    #[derive(Default)]
    struct FakeUserRepository {
        users: Mutex<HashMap<Uuid, User>>,
        inserts: Mutex<usize>,
        blind_lookup: bool,
    }

    impl FakeUserRepository {
        fn blind() -> Self {
            Self {
                blind_lookup: true,
                ..Self::default()
            }
        }

        fn insert_count(&self) -> usize {
            *self.inserts.lock().unwrap()
        }

        fn only_user(&self) -> User {
            let users = self.users.lock().unwrap();
            assert_eq!(users.len(), 1);
            users.values().next().cloned().unwrap()
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
            if self.blind_lookup {
                return Ok(None);
            }
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn insert(&self, user: User) -> Result<User, RepoError> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == user.email) {
                return Err(RepoError::Constraint("users_email_key".to_string()));
            }
            *self.inserts.lock().unwrap() += 1;
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn update(&self, user: User) -> Result<User, RepoError> {
            let mut users = self.users.lock().unwrap();
            if !users.contains_key(&user.id) {
                return Err(RepoError::NotFound);
            }
            users.insert(user.id, user.clone());
            Ok(user)
        }
    }

    struct FakeTokenService;

    impl TokenService for FakeTokenService {
        fn issue_token_at(&self, subject: Uuid, _now: DateTime<Utc>) -> Result<String, AuthError> {
            Ok(format!("token:{}", subject))
        }

        fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
            let subject = token
                .strip_prefix("token:")
                .and_then(|s| Uuid::parse_str(s).ok())
                .ok_or_else(|| AuthError::InvalidToken(token.to_string()))?;
            Ok(TokenClaims {
                subject,
                issuer: "test".to_string(),
                audience: "test".to_string(),
                not_before: 0,
                expires_at: 0,
            })
        }

        fn lifetime_seconds(&self) -> i64 {
            60
        }
    }

    struct VerbatimPasswords;

    impl PasswordService for VerbatimPasswords {
        fn store(&self, password: &str) -> Result<String, AuthError> {
            Ok(password.to_string())
        }

        fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError> {
            Ok(password == stored)
        }
    }

    fn service(repo: Arc<FakeUserRepository>) -> IdentityService {
        IdentityService::new(repo, Arc::new(FakeTokenService), Arc::new(VerbatimPasswords))
    }

    fn registration(email: &str, password: &str) -> NewUser {
        NewUser {
            full_name: "Alice Liddell".to_string(),
            password: password.to_string(),
            email: email.to_string(),
            gender: Gender::Female,
            birth_date: Utc.with_ymd_and_hms(1990, 5, 4, 0, 0, 0).unwrap(),
            address: Some("1 Rabbit Hole".to_string()),
            phone_number: None,
        }
    }

    fn credentials(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_persists_normalized_user_and_returns_token() {
        let repo = Arc::new(FakeUserRepository::default());
        let identity = service(repo.clone());

        let token = identity
            .register_user(registration("Alice@Example.COM  ", "pw1"))
            .await
            .unwrap();

        let user = repo.only_user();
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.full_name, "Alice Liddell");
        assert_eq!(token.token, format!("token:{}", user.id));
        assert_eq!(repo.insert_count(), 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_fails_without_insert() {
        let repo = Arc::new(FakeUserRepository::default());
        let identity = service(repo.clone());
        identity
            .register_user(registration("bob@example.com", "pw1"))
            .await
            .unwrap();

        let err = identity
            .register_user(registration("BOB@example.com \t", "other"))
            .await
            .unwrap_err();

        match err {
            DomainError::DuplicateIdentity { email } => assert_eq!(email, "bob@example.com"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(repo.insert_count(), 1);
    }

    #[tokio::test]
    async fn test_register_duplicate_caught_by_constraint() {
        let repo = Arc::new(FakeUserRepository::blind());
        let existing = registration("carol@example.com", "pw1");
        repo.insert(User::new(existing, "carol@example.com".to_string(), "pw1".to_string()))
            .await
            .unwrap();
        let identity = service(repo.clone());

        let err = identity
            .register_user(registration("Carol@Example.com", "pw2"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::DuplicateIdentity { email } if email == "carol@example.com"));
        assert_eq!(repo.insert_count(), 1);
    }

    #[tokio::test]
    async fn test_login_returns_token_for_user_id() {
        let repo = Arc::new(FakeUserRepository::default());
        let identity = service(repo.clone());
        identity
            .register_user(registration("dave@example.com", "secret"))
            .await
            .unwrap();
        let user = repo.only_user();

        let token = identity
            .login_user(credentials("DAVE@EXAMPLE.COM ", "secret"))
            .await
            .unwrap();

        let claims = FakeTokenService.validate_token(&token.token).unwrap();
        assert_eq!(claims.subject, user.id);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let repo = Arc::new(FakeUserRepository::default());
        let identity = service(repo);
        identity
            .register_user(registration("erin@example.com", "right"))
            .await
            .unwrap();

        let wrong_password = identity
            .login_user(credentials("erin@example.com", "wrong"))
            .await
            .unwrap_err();
        let unknown_email = identity
            .login_user(credentials("nobody@example.com", "right"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, DomainError::AuthenticationFailed));
        assert!(matches!(unknown_email, DomainError::AuthenticationFailed));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_leading_whitespace_is_significant() {
        let repo = Arc::new(FakeUserRepository::default());
        let identity = service(repo.clone());
        identity
            .register_user(registration("  Alice@Example.com ", "pw1"))
            .await
            .unwrap();

        assert_eq!(repo.only_user().email, "  alice@example.com");

        let without_spaces = identity
            .login_user(credentials("Alice@Example.COM", "pw1"))
            .await;
        assert!(matches!(without_spaces, Err(DomainError::AuthenticationFailed)));

        let with_spaces = identity
            .login_user(credentials("  ALICE@example.com", "pw1"))
            .await;
        assert!(with_spaces.is_ok());
    }

    #[tokio::test]
    async fn test_edit_profile_updates_editable_fields() {
        let repo = Arc::new(FakeUserRepository::default());
        let identity = service(repo.clone());
        identity
            .register_user(registration("frank@example.com", "pw"))
            .await
            .unwrap();
        let user = repo.only_user();

        let edited = identity
            .edit_profile(
                user.id,
                UserEdit {
                    full_name: "Frank N. Stein".to_string(),
                    birth_date: user.birth_date,
                    gender: Gender::Male,
                    address: None,
                    phone_number: Some("+1 555 0100".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(edited.full_name, "Frank N. Stein");
        assert_eq!(edited.gender, Gender::Male);
        assert_eq!(edited.email, "frank@example.com");
        assert_eq!(identity.profile(user.id).await.unwrap().full_name, "Frank N. Stein");
    }

    #[tokio::test]
    async fn test_profile_of_unknown_user_is_not_found() {
        let identity = service(Arc::new(FakeUserRepository::default()));

        let err = identity.profile(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { entity_type: "User", .. }));
    }
}
