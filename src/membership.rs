use std::collections::HashMap;

use crate::config::Config;
use crate::error::Result;
use crate::types::Team;

/// Code -> display-label lookup built from course-configured pairs. Always
/// carries a blank-code -> blank-label entry so an unset code resolves to
/// "no label" rather than a miss.
pub struct LabelMap(HashMap<String, String>);

impl LabelMap {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut map: HashMap<String, String> = pairs.iter().cloned().collect();
        map.entry(String::new()).or_default();
        LabelMap(map)
    }

    /// Display label for a code. Unknown codes and blank codes both come back
    /// as `None`, which suppresses the corresponding row entirely.
    pub fn label(&self, code: &str) -> Option<&str> {
        self.0
            .get(code)
            .map(String::as_str)
            .filter(|label| !label.is_empty())
    }
}

/// Immutable per-view configuration shared by the list and profile views.
pub struct ViewContext {
    pub max_team_size: usize,
    pub request_username: String,
    pub countries: LabelMap,
    pub languages: LabelMap,
    /// Membership-detail URL template with the literal `team_id` token.
    pub membership_detail_template: String,
}

impl ViewContext {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            max_team_size: config.max_team_size,
            request_username: config.username()?,
            countries: LabelMap::from_pairs(&config.countries),
            languages: LabelMap::from_pairs(&config.languages),
            membership_detail_template: config.membership_detail_template()?,
        })
    }
}

pub fn capacity_text(member_count: usize, max_team_size: usize) -> String {
    format!("{} / {} Members", member_count, max_team_size)
}

/// Presentation state derived from a team entity. Pure; recomputed from
/// scratch whenever the entity is re-fetched.
#[derive(Debug, PartialEq, Eq)]
pub struct TeamFacts {
    pub member_count: usize,
    pub capacity_text: String,
    pub is_member: bool,
    pub has_capacity: bool,
    pub invite_eligible: bool,
    pub country: Option<String>,
    pub language: Option<String>,
}

impl TeamFacts {
    pub fn derive(team: &Team, context: &ViewContext) -> Self {
        let member_count = team.member_count();
        let is_member = team
            .membership
            .iter()
            .any(|m| m.user.username == context.request_username);
        let has_capacity = member_count < context.max_team_size;
        Self {
            member_count,
            capacity_text: capacity_text(member_count, context.max_team_size),
            is_member,
            has_capacity,
            invite_eligible: is_member && has_capacity,
            country: context.countries.label(&team.country).map(String::from),
            language: context.languages.label(&team.language).map(String::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Membership, ProfileImage, TeamUser};

    fn member(username: &str) -> Membership {
        Membership {
            user: TeamUser {
                username: username.to_string(),
                profile_image: ProfileImage::default(),
            },
            date_joined: None,
        }
    }

    fn team(membership: Vec<Membership>, country: &str, language: &str) -> Team {
        Team {
            id: "test-team".to_string(),
            name: "Test Team".to_string(),
            description: String::new(),
            topic_id: String::new(),
            discussion_topic_id: "12345".to_string(),
            country: country.to_string(),
            language: language.to_string(),
            date_created: None,
            membership,
            url: "/api/team/v0/teams/test-team".to_string(),
        }
    }

    fn context() -> ViewContext {
        ViewContext {
            max_team_size: 3,
            request_username: "bilbo".to_string(),
            countries: LabelMap::from_pairs(&[
                (String::new(), String::new()),
                ("US".to_string(), "United States".to_string()),
                ("CA".to_string(), "Canada".to_string()),
            ]),
            languages: LabelMap::from_pairs(&[
                (String::new(), String::new()),
                ("en".to_string(), "English".to_string()),
                ("fr".to_string(), "French".to_string()),
            ]),
            membership_detail_template: "api/team/v0/team_membership/team_id,bilbo".to_string(),
        }
    }

    #[test]
    fn member_of_team_with_room_is_invite_eligible() {
        let facts = TeamFacts::derive(&team(vec![member("bilbo")], "US", "en"), &context());
        assert_eq!(facts.capacity_text, "1 / 3 Members");
        assert!(facts.is_member);
        assert!(facts.has_capacity);
        assert!(facts.invite_eligible);
        assert_eq!(facts.country.as_deref(), Some("United States"));
        assert_eq!(facts.language.as_deref(), Some("English"));
    }

    #[test]
    fn full_team_has_no_capacity_and_no_invite() {
        let membership = vec![member("bilbo"), member("frodo"), member("sam")];
        let facts = TeamFacts::derive(&team(membership, "", ""), &context());
        assert_eq!(facts.capacity_text, "3 / 3 Members");
        assert!(facts.is_member);
        assert!(!facts.has_capacity);
        assert!(!facts.invite_eligible);
    }

    #[test]
    fn non_member_is_never_invite_eligible() {
        let facts = TeamFacts::derive(&team(vec![member("frodo")], "", ""), &context());
        assert!(!facts.is_member);
        assert!(facts.has_capacity);
        assert!(!facts.invite_eligible);
    }

    #[test]
    fn username_match_is_case_sensitive() {
        let facts = TeamFacts::derive(&team(vec![member("Bilbo")], "", ""), &context());
        assert!(!facts.is_member);
    }

    #[test]
    fn blank_and_unknown_codes_suppress_labels() {
        let blank = TeamFacts::derive(&team(vec![], "", ""), &context());
        assert_eq!(blank.country, None);
        assert_eq!(blank.language, None);

        let unknown = TeamFacts::derive(&team(vec![], "ZZ", "xx"), &context());
        assert_eq!(unknown.country, None);
        assert_eq!(unknown.language, None);
    }

    #[test]
    fn empty_team_reads_zero_of_max() {
        let facts = TeamFacts::derive(&team(vec![], "", ""), &context());
        assert_eq!(facts.capacity_text, "0 / 3 Members");
        assert!(!facts.is_member);
    }
}
