use serde::{Deserialize, Serialize};

/// Singleton user profile. The picture is stored as a data-URL string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub profile_picture: String,
}

impl Profile {
    /// A profile counts as complete once name, email, and phone are all
    /// filled in. The picture is optional.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.phone.is_empty()
    }
}
