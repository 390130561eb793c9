use serde::{Deserialize, Serialize};

use super::Membership;

/// A team as served by the platform's team API. Replaced wholesale on every
/// re-fetch; membership is never edited locally.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub topic_id: String,
    #[serde(default)]
    pub discussion_topic_id: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub membership: Vec<Membership>,
    /// Canonical resource URL, used for re-fetch after a mutation.
    pub url: String,
}

impl Team {
    pub fn member_count(&self) -> usize {
        self.membership.len()
    }
}
