//! Persisted user identity models.

use serde::{Deserialize, Serialize};

/// Birth place as submitted to (and echoed by) the personalization API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthCoordinates {
    /// Human-readable place name.
    pub display: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Server-assigned identity returned by a successful personalization
/// submission.
///
/// Treated as an opaque, immutable value once returned — this is the single
/// canonical record persisted by [`UserStore`](crate::user::UserStore).
/// All wire fields are snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_anonymous: bool,
    /// Birth date as submitted, `yyyy-MM-dd`.
    pub birthday: String,
    /// Birth time as submitted, `HH:mm:ss`.
    pub birthday_time: String,
    pub birthday_coordinates: BirthCoordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<String>,
}
