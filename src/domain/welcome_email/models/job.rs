use crate::domain::registration::models::{email::UserEmail, name::UserName};

/// A welcome email waiting in the queue. The message itself is composed by
/// the worker at delivery time.
#[derive(Debug, Clone, PartialEq)]
pub struct WelcomeEmailJob {
    pub recipient: UserEmail,
    pub user_name: UserName,
}

impl WelcomeEmailJob {
    pub fn new(recipient: UserEmail, user_name: UserName) -> Self {
        Self {
            recipient,
            user_name,
        }
    }
}
