use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{CohortError, Result};
use crate::types::{Team, TeamPage};
use crate::workflow::{LeaveFailure, MembershipApi};

const TEAMS_PATH: &str = "/api/team/v0/teams/";

pub struct TeamsClient {
    http: Client,
    base: Url,
    token: Option<String>,
}

impl TeamsClient {
    pub fn new(base: Url, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base,
            token,
        }
    }

    /// Resolve a possibly-relative resource URL (the API hands back paths
    /// like `/api/team/v0/teams/<id>`) against the platform base.
    fn absolute(&self, url: &str) -> Result<Url> {
        self.base
            .join(url)
            .map_err(|_| CohortError::InvalidUrl(url.to_string()))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    async fn get_url<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.authorized(self.http.get(url)).send().await?;

        if !response.status().is_success() {
            return Err(CohortError::Api {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(response.json().await?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let url = self.absolute(url)?;
        self.get_url(url).await
    }

    pub async fn list_teams(
        &self,
        course_id: &str,
        topic_id: Option<&str>,
        page: usize,
        page_size: usize,
    ) -> Result<TeamPage> {
        let mut url = self.absolute(TEAMS_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("course_id", course_id);
            if let Some(topic) = topic_id {
                query.append_pair("topic_id", topic);
            }
            query.append_pair("page", &page.to_string());
            query.append_pair("page_size", &page_size.to_string());
        }

        self.get_url(url).await
    }

    pub async fn get_team(&self, team_id: &str) -> Result<Team> {
        self.get_json(&format!("{TEAMS_PATH}{team_id}")).await
    }

    /// First page of the inline discussion listing for a team's topic. This
    /// is a collaborator interface; the payload is passed through untouched.
    pub async fn discussion_threads(
        &self,
        course_id: &str,
        topic_id: &str,
    ) -> Result<serde_json::Value> {
        self.get_json(&format!(
            "/courses/{course_id}/discussion/forum/{topic_id}/inline?page=1&ajax=1"
        ))
        .await
    }
}

impl MembershipApi for TeamsClient {
    /// DELETE a membership record. Any non-success outcome, transport
    /// failures included, is reported as a `LeaveFailure` for the workflow's
    /// policy logic to interpret.
    async fn leave_team(&self, url: &str) -> std::result::Result<(), LeaveFailure> {
        let url = match self.absolute(url) {
            Ok(url) => url,
            Err(e) => {
                return Err(LeaveFailure {
                    status: None,
                    body: e.to_string(),
                })
            }
        };

        let response = match self.authorized(self.http.delete(url)).send().await {
            Ok(response) => response,
            Err(e) => {
                return Err(LeaveFailure {
                    status: None,
                    body: e.to_string(),
                })
            }
        };

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(LeaveFailure {
            status: Some(status.as_u16()),
            body: response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string()),
        })
    }

    async fn fetch_team(&self, url: &str) -> Result<Team> {
        self.get_json(url).await
    }
}
