use async_trait::async_trait;
use cinesphere_contracts::{IdentityError, IdentityProvider};
use cinesphere_model::User;
use parking_lot::RwLock;

/// Single local profile; signing in always succeeds.
#[derive(Debug)]
pub struct LocalIdentity {
    profile: User,
    current: RwLock<Option<User>>,
}

impl LocalIdentity {
    pub fn new(profile: User) -> Self {
        Self {
            profile,
            current: RwLock::new(None),
        }
    }

    pub fn signed_in(profile: User) -> Self {
        Self {
            current: RwLock::new(Some(profile.clone())),
            profile,
        }
    }

    pub fn profile(&self) -> &User {
        &self.profile
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentity {
    fn current_user(&self) -> Option<User> {
        self.current.read().clone()
    }

    async fn sign_in(&self) -> Result<User, IdentityError> {
        *self.current.write() = Some(self.profile.clone());
        Ok(self.profile.clone())
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.current.write().take();
        Ok(())
    }
}
