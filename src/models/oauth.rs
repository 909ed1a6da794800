use crate::providers::ProviderKind;
use serde::{Deserialize, Serialize};

/// Query values the provider sends back to the callback endpoint.
/// Absent values read as empty strings.
#[derive(Debug, Deserialize, Default)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub state: String,
}

/// Provider-agnostic profile handed downstream for session creation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub email: String,
    pub display_name: String,
    pub avatar: String,
    pub access_token: String,
    pub provider: ProviderKind,
}
