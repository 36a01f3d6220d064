//! Profile of the configured user.

use super::wire;
use serde::{Deserialize, Serialize};

/// A `user_info` row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct UserInfo {
    #[serde(deserialize_with = "wire::string_or_number")]
    pub id: String,

    #[serde(deserialize_with = "wire::null_as_empty")]
    pub name: String,

    #[serde(deserialize_with = "wire::null_as_empty")]
    pub email: String,

    /// (API field: collegeName)
    #[serde(
        rename(deserialize = "collegeName"),
        alias = "college_name",
        deserialize_with = "wire::null_as_empty"
    )]
    pub college_name: String,

    /// Current semester of study
    #[serde(deserialize_with = "wire::string_or_number")]
    pub semester: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
