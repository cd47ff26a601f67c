use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    SuperAdmin,
    Barber,
    Customer,
}

impl Role {
    pub const TENANT_ROLES: [Role; 2] = [Role::Barber, Role::Customer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "superadmin",
            Role::Barber => "barber",
            Role::Customer => "customer",
        }
    }

    /// Roles a namespace user may hold. Super-admins only exist in the registry.
    pub fn is_tenant_role(&self) -> bool {
        Self::TENANT_ROLES.contains(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Role::SuperAdmin),
            "barber" => Ok(Role::Barber),
            "customer" => Ok(Role::Customer),
            other => Err(ParseEnumError { kind: "role", value: other.to_string() }),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A user row inside one tenant namespace.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password: password_hash,
            role,
            created_at: Utc::now(),
        }
    }
}

/// A platform operator stored in the shared registry, outside every tenant.
#[derive(Debug, FromRow, Clone)]
pub struct Admin {
    pub id: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password: password_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_text() {
        for role in [Role::SuperAdmin, Role::Barber, Role::Customer] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
            assert_eq!(serde_json::to_value(role).unwrap(), role.as_str());
        }
        assert!("admin".parse::<Role>().is_err());
        assert!("Barber".parse::<Role>().is_err());
    }

    #[test]
    fn test_only_barbers_and_customers_live_in_namespaces() {
        assert!(Role::Barber.is_tenant_role());
        assert!(Role::Customer.is_tenant_role());
        assert!(!Role::SuperAdmin.is_tenant_role());
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User::new("Al".into(), "al@x.com".into(), "$argon2id$secret".into(), Role::Customer);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "customer");
    }
}
