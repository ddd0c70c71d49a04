use serde::{Deserialize, Serialize};

use crate::ids::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Role names are matched with or without the `ROLE_` prefix.
    pub fn has_role(&self, role: &str) -> bool {
        let wanted = role.trim_start_matches("ROLE_");
        self.roles
            .iter()
            .any(|r| r.name.trim_start_matches("ROLE_").eq_ignore_ascii_case(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_prefix_is_optional() {
        let user = User {
            id: UserId(1),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: None,
            roles: vec![Role {
                name: "ROLE_ADMIN".into(),
            }],
        };
        assert!(user.has_role("ADMIN"));
        assert!(user.has_role("ROLE_ADMIN"));
        assert!(!user.has_role("SELLER"));
    }
}
