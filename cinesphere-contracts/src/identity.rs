use async_trait::async_trait;
use cinesphere_model::User;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("sign-in cancelled")]
    Cancelled,

    #[error("identity provider error: {0}")]
    Provider(String),
}

/// Who is looking at the galaxy. The core does not lay anything out for the
/// favorites view until `current_user` returns someone.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;

    async fn sign_in(&self) -> Result<User, IdentityError>;

    async fn sign_out(&self) -> Result<(), IdentityError>;
}
