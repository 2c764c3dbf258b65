use serde::{Deserialize, Serialize};

/// Role assigned at registration. The wire format carries a plain
/// `is_recruiter` boolean; the client types it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Role {
    Recruiter,
    #[default]
    Applicant,
}

impl Role {
    pub fn is_recruiter(&self) -> bool {
        matches!(self, Role::Recruiter)
    }
}

/// Profile snapshot taken at login time; not refreshed until the next login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(rename = "is_recruiter", with = "role_flag", default)]
    pub role: Role,
}

mod role_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Role;

    pub fn serialize<S: Serializer>(role: &Role, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(role.is_recruiter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Role, D::Error> {
        Ok(if bool::deserialize(deserializer)? {
            Role::Recruiter
        } else {
            Role::Applicant
        })
    }
}
