use serde::{Deserialize, Serialize};

/// Profile record of an authenticated user. The id is issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}
