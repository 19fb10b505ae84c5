use serde::{Deserialize, Serialize};
use tinyapp_core::UserRecord;

/// Form body for `/register` and `/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: String,
    pub email: String,
}

impl From<&UserRecord> for UserView {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
        }
    }
}

/// Pages that only need to know who is logged in.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub user: Option<UserView>,
}
