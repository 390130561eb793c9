use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Membership {
    pub user: TeamUser,
    #[serde(default)]
    pub date_joined: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TeamUser {
    pub username: String,
    #[serde(default)]
    pub profile_image: ProfileImage,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ProfileImage {
    #[serde(default)]
    pub has_image: bool,
    #[serde(default)]
    pub image_url_medium: String,
}
