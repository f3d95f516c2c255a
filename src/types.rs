use serde::{Deserialize, Serialize};

/// Identity carried in the session cookie.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
}
