use crate::types::SessionUser;

/// A registered account. The password only ever exists here as an Argon2 PHC string.
#[derive(Clone)]
pub struct User {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        SessionUser {
            email: user.email,
            name: user.name,
        }
    }
}
