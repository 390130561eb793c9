use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::{CohortError, Result};

fn default_max_team_size() -> usize {
    3
}

fn default_page_size() -> usize {
    10
}

#[derive(Deserialize)]
pub struct Config {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub api_token: Option<String>,
    pub course_id: Option<String>,
    #[serde(default = "default_max_team_size")]
    pub max_team_size: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Opt back into the legacy modal-style confirmation before leaving a team.
    #[serde(default)]
    pub confirm_leave: bool,
    /// Country code/label pairs as configured for the course.
    #[serde(default)]
    pub countries: Vec<(String, String)>,
    /// Language code/label pairs as configured for the course.
    #[serde(default)]
    pub languages: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            username: None,
            api_token: None,
            course_id: None,
            max_team_size: default_max_team_size(),
            page_size: default_page_size(),
            confirm_leave: false,
            countries: Vec::new(),
            languages: Vec::new(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| CohortError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| CohortError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "cohort")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(CohortError::NoConfigDir)
    }

    /// Get API token with env var taking precedence over config file
    pub fn api_token(&self) -> Option<String> {
        std::env::var("COHORT_API_TOKEN")
            .ok()
            .or_else(|| self.api_token.clone())
    }

    /// Get the acting username with env var taking precedence over config file
    pub fn username(&self) -> Result<String> {
        if let Ok(name) = std::env::var("COHORT_USERNAME") {
            return Ok(name);
        }

        self.username.clone().ok_or(CohortError::MissingUsername)
    }

    pub fn base_url(&self) -> Result<Url> {
        let raw = self.base_url.clone().ok_or(CohortError::MissingBaseUrl)?;
        Url::parse(&raw).map_err(|_| CohortError::InvalidUrl(raw))
    }

    /// Get course, preferring explicit argument over default
    pub fn resolve_course(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .map(String::from)
            .or_else(|| self.course_id.clone())
            .ok_or(CohortError::NoCourse)
    }

    /// Membership-detail URL template. The literal `team_id` token is
    /// substituted with a concrete team id when a DELETE is issued.
    pub fn membership_detail_template(&self) -> Result<String> {
        let base = self.base_url()?;
        let username = self.username()?;
        Ok(format!(
            "{}/api/team/v0/team_membership/team_id,{}",
            base.as_str().trim_end_matches('/'),
            username
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.max_team_size, 3);
        assert_eq!(config.page_size, 10);
        assert!(!config.confirm_leave);
        assert!(config.countries.is_empty());
    }

    #[test]
    fn parses_label_pairs() {
        let config: Config = toml::from_str(
            r#"
base_url = "https://lms.example.com"
username = "bilbo"
countries = [["", ""], ["US", "United States"]]
"#,
        )
        .unwrap();
        assert_eq!(config.countries.len(), 2);
        assert_eq!(config.countries[1].1, "United States");
    }

    #[test]
    fn membership_template_keeps_placeholder_token() {
        let config: Config = toml::from_str(
            r#"
base_url = "https://lms.example.com"
username = "bilbo"
"#,
        )
        .unwrap();
        let template = config.membership_detail_template().unwrap();
        assert_eq!(
            template,
            "https://lms.example.com/api/team/v0/team_membership/team_id,bilbo"
        );
    }
}
