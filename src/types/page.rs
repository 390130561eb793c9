use serde::Deserialize;

use super::Team;

/// One page of the team list as served by the platform's paginated endpoint.
/// `start` is the zero-based offset of the first result within the full set.
#[derive(Deserialize, Debug)]
pub struct TeamPage {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub num_pages: usize,
    #[serde(default)]
    pub current_page: usize,
    #[serde(default)]
    pub start: usize,
    pub results: Vec<Team>,
}
