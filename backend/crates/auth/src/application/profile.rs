//! Public user profile returned by the auth workflows

use kernel::department::Department;
use kernel::id::UserId;
use kernel::role::Role;

use crate::domain::entity::user::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub departments: Vec<Department>,
    pub is_verified: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.user_id,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role,
            departments: user.departments.as_slice().to_vec(),
            is_verified: user.is_verified,
        }
    }
}
