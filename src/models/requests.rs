use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find matches for a stored buyer preference
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "preference_id", rename = "preferenceId")]
    pub preference_id: String,
}
