//! Pure `state -> String` projections for the team list and team profile.
//! Commands print these; tests assert on them directly. Every render is a
//! full pass over the current state, never an incremental patch.

use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use crate::collection::PaginatedCollection;
use crate::membership::{TeamFacts, ViewContext};
use crate::paging::PagingHeader;
use crate::types::Team;

/// Shown below the list when the caller enables the action bar.
const ACTION_BAR: &str = "Are you having trouble finding a team to join?\n\
Create a new team if you can't find an existing team to join, \
or if you would like to learn with friends you know.";

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Members")]
    members: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Language")]
    language: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl TeamRow {
    fn new(team: &Team, context: &ViewContext) -> Self {
        let facts = TeamFacts::derive(team, context);
        Self {
            name: crate::output::truncate(&team.name, 40),
            members: facts.capacity_text,
            country: facts.country.unwrap_or_default(),
            language: facts.language.unwrap_or_default(),
            id: team.id.clone(),
        }
    }
}

/// One row per loaded item, in collection order, followed by the paging
/// header and, when requested, the action bar.
pub fn render_team_list(
    collection: &PaginatedCollection<Team>,
    context: &ViewContext,
    header: &PagingHeader,
    show_actions: bool,
) -> String {
    let rows: Vec<TeamRow> = collection
        .items()
        .iter()
        .map(|team| TeamRow::new(team, context))
        .collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();

    let mut rendered = table;
    rendered.push('\n');
    rendered.push_str(&header.render());
    if show_actions {
        rendered.push('\n');
        rendered.push_str(ACTION_BAR);
    }
    rendered
}

pub fn render_team_profile(
    team: &Team,
    context: &ViewContext,
    discussion_titles: Option<&[String]>,
) -> String {
    let facts = TeamFacts::derive(team, context);
    let mut lines: Vec<String> = Vec::new();

    lines.push(team.name.bold().to_string());
    if !team.description.is_empty() {
        lines.push(team.description.clone());
    }
    lines.push(String::new());
    lines.push("Team Details".to_string());
    if let Some(country) = &facts.country {
        lines.push(format!("  Country   {country}"));
    }
    if let Some(language) = &facts.language {
        lines.push(format!("  Language  {language}"));
    }
    lines.push(format!(
        "  Capacity  {}",
        crate::output::capacity_colored(&facts.capacity_text, facts.has_capacity)
    ));
    if let Some(created) = &team.date_created {
        lines.push(format!(
            "  Created   {}",
            crate::output::format_date_only(created)
        ));
    }

    if !team.membership.is_empty() {
        lines.push(String::new());
        lines.push("Members".to_string());
        for membership in &team.membership {
            let user = &membership.user;
            if user.profile_image.has_image {
                lines.push(format!(
                    "  {} <{}>",
                    user.username, user.profile_image.image_url_medium
                ));
            } else {
                lines.push(format!("  {}", user.username));
            }
        }
    }

    if facts.is_member {
        lines.push(String::new());
        lines.push("You are a member of this team.".to_string());
        lines.push(format!("Leave the team with: cohort team leave {}", team.id));
    }
    if facts.invite_eligible {
        lines.push(format!("Invite others with this link: {}", team.url));
    }

    if let Some(titles) = discussion_titles {
        lines.push(String::new());
        lines.push(format!("Discussion ({} threads)", titles.len()));
        for title in titles {
            lines.push(format!("  {title}"));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::LabelMap;
    use crate::paging::PagingHeader;
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

    fn team(name: &str, membership: Vec<Membership>) -> Team {
        Team {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            description: String::new(),
            topic_id: String::new(),
            discussion_topic_id: "12345".to_string(),
            country: "US".to_string(),
            language: String::new(),
            date_created: None,
            membership,
            url: format!("/api/team/v0/teams/{}", name.to_lowercase().replace(' ', "-")),
        }
    }

    fn context() -> ViewContext {
        ViewContext {
            max_team_size: 3,
            request_username: "bilbo".to_string(),
            countries: LabelMap::from_pairs(&[("US".to_string(), "United States".to_string())]),
            languages: LabelMap::from_pairs(&[]),
            membership_detail_template: "api/team/v0/team_membership/team_id,bilbo".to_string(),
        }
    }

    #[test]
    fn list_preserves_collection_order_and_appends_paging_line() {
        let mut collection = PaginatedCollection::new();
        let (header, _sub) = PagingHeader::new("").bind(&mut collection);
        collection.reset(
            vec![team("Alpha", vec![]), team("Beta", vec![member("frodo")])],
            0,
            12,
        );

        let rendered = render_team_list(&collection, &context(), &header, false);
        let alpha = rendered.find("Alpha").unwrap();
        let beta = rendered.find("Beta").unwrap();
        assert!(alpha < beta);
        assert!(rendered.contains("Showing 1-2 out of 12 total"));
        assert!(!rendered.contains("Create a new team"));
    }

    #[test]
    fn list_appends_action_bar_when_requested() {
        let mut collection = PaginatedCollection::new();
        let (header, _sub) = PagingHeader::new("").bind(&mut collection);
        collection.reset(vec![team("Alpha", vec![])], 0, 1);

        let rendered = render_team_list(&collection, &context(), &header, true);
        assert!(rendered.contains("Showing 1 out of 1 total"));
        assert!(rendered.contains("Create a new team"));
    }

    #[test]
    fn profile_shows_leave_control_and_invite_for_member_with_room() {
        let rendered =
            render_team_profile(&team("Test Team", vec![member("bilbo")]), &context(), None);
        assert!(rendered.contains("1 / 3 Members"));
        assert!(rendered.contains("You are a member of this team."));
        assert!(rendered.contains("cohort team leave test-team"));
        assert!(rendered.contains("Invite others with this link:"));
        assert!(rendered.contains("Country   United States"));
    }

    #[test]
    fn profile_after_leaving_drops_member_only_sections() {
        // The end state of a successful leave: re-fetched team, no members.
        let rendered = render_team_profile(&team("Test Team", vec![]), &context(), None);
        assert!(rendered.contains("0 / 3 Members"));
        assert!(!rendered.contains("You are a member"));
        assert!(!rendered.contains("cohort team leave"));
        assert!(!rendered.contains("Invite others"));
    }

    #[test]
    fn full_team_hides_invite_but_keeps_leave_control() {
        let membership = vec![member("bilbo"), member("frodo"), member("sam")];
        let rendered = render_team_profile(&team("Test Team", membership), &context(), None);
        assert!(rendered.contains("3 / 3 Members"));
        assert!(rendered.contains("cohort team leave test-team"));
        assert!(!rendered.contains("Invite others"));
    }

    #[test]
    fn suppressed_labels_drop_their_rows() {
        let mut no_country = team("Test Team", vec![]);
        no_country.country = String::new();
        let rendered = render_team_profile(&no_country, &context(), None);
        assert!(!rendered.contains("Country"));
        assert!(!rendered.contains("Language"));
    }

    #[test]
    fn discussion_preview_lists_thread_titles() {
        let titles = vec!["Welcome!".to_string(), "Study plan".to_string()];
        let rendered = render_team_profile(&team("Test Team", vec![]), &context(), Some(&titles));
        assert!(rendered.contains("Discussion (2 threads)"));
        assert!(rendered.contains("Welcome!"));
    }

    #[test]
    fn member_with_profile_image_shows_medium_url() {
        let mut m = member("bilbo");
        m.user.profile_image = ProfileImage {
            has_image: true,
            image_url_medium: "https://img.example.com/bilbo_50.jpg".to_string(),
        };
        let rendered = render_team_profile(&team("Test Team", vec![m]), &context(), None);
        assert!(rendered.contains("bilbo <https://img.example.com/bilbo_50.jpg>"));
    }
}
