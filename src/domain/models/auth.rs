use serde::{Deserialize, Serialize};
use super::{tenant::SchemaName, user::Role};

/// Identity carried inside a signed session token.
///
/// `tenant` is absent for super-admin tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<SchemaName>,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Serialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}
