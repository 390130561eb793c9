use std::io::{self, Write};

use colored::Colorize;

use crate::cache::{Cache, CachedTeam};
use crate::cli::LeaveArgs;
use crate::client::TeamsClient;
use crate::config::Config;
use crate::error::{CohortError, Result};
use crate::membership::ViewContext;
use crate::output;
use crate::types::Team;
use crate::views;
use crate::workflow::{Dialog, LeaveOutcome, LeavePolicy, LeaveTeamWorkflow, StatusRegion};

/// Resolve a team id-or-name to the team entity. Cache hit first, then a
/// direct fetch by id, then a name scan of the course listing.
async fn fetch_team_by_ref(client: &TeamsClient, config: &Config, team_ref: &str) -> Result<Team> {
    let cache = Cache::load();
    if let Some(id) = cache.get_team_id(team_ref) {
        return client.get_team(&id).await;
    }

    match client.get_team(team_ref).await {
        Ok(team) => return Ok(team),
        Err(CohortError::Api { status: 404, .. }) => {}
        Err(e) => return Err(e),
    }

    let course = config.resolve_course(None)?;
    let page = client.list_teams(&course, None, 1, 100).await?;
    let team = page
        .results
        .into_iter()
        .find(|team| team.name == team_ref)
        .ok_or_else(|| CohortError::TeamNotFound(team_ref.to_string()))?;

    let mut cache = Cache::load();
    cache.set_team(CachedTeam {
        id: team.id.clone(),
        name: team.name.clone(),
    });
    cache.save();

    Ok(team)
}

/// Thread titles from the inline discussion listing, best effort. The
/// discussion service is a collaborator; an unreachable forum never fails
/// the profile view.
async fn discussion_preview(
    client: &TeamsClient,
    config: &Config,
    topic_id: &str,
) -> Option<Vec<String>> {
    if topic_id.is_empty() {
        return None;
    }
    let course = config.resolve_course(None).ok()?;
    let listing = client.discussion_threads(&course, topic_id).await.ok()?;
    let threads = listing.get("discussion_data")?.as_array()?;
    Some(
        threads
            .iter()
            .filter_map(|thread| thread.get("title")?.as_str().map(String::from))
            .collect(),
    )
}

pub async fn show(
    client: &TeamsClient,
    config: &Config,
    team_ref: &str,
    with_discussion: bool,
) -> Result<()> {
    let team = fetch_team_by_ref(client, config, team_ref).await?;
    let context = ViewContext::from_config(config)?;

    let titles = if with_discussion {
        discussion_preview(client, config, &team.discussion_topic_id).await
    } else {
        None
    };

    output::print_item(&team, |team| {
        println!(
            "{}",
            views::render_team_profile(team, &context, titles.as_deref())
        );
    });

    Ok(())
}

struct TerminalDialog;

impl Dialog for TerminalDialog {
    fn confirm(&mut self, title: &str, message: &str, action_label: &str) -> bool {
        println!("{}", title.bold());
        println!("{message}");
        print!("Type '{action_label}' to continue, anything else to cancel: ");
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        answer.trim().eq_ignore_ascii_case(action_label)
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// The terminal analogue of an accessible message region: prominent, on
/// stderr, and not mixed into the rendered view.
struct TerminalStatus;

impl StatusRegion for TerminalStatus {
    fn announce(&mut self, message: &str) {
        eprintln!("{}", message.red().bold());
    }
}

pub async fn leave(client: &TeamsClient, config: &Config, args: LeaveArgs) -> Result<()> {
    let mut team = fetch_team_by_ref(client, config, &args.team).await?;
    let context = ViewContext::from_config(config)?;

    let policy = if args.confirm || (config.confirm_leave && !args.yes) {
        LeavePolicy::Confirming
    } else {
        LeavePolicy::Direct
    };

    let mut workflow = LeaveTeamWorkflow::new(policy);
    let mut dialog = TerminalDialog;
    let mut status = TerminalStatus;

    let outcome = workflow
        .trigger(
            client,
            &mut team,
            &context.membership_detail_template,
            &mut dialog,
            &mut status,
        )
        .await;

    report_outcome(outcome, &team, &context)
}

/// Map the workflow outcome onto process-level reporting: successes print,
/// failures become an `Err` so the binary exits nonzero and scripts can tell
/// the two apart.
fn report_outcome(outcome: LeaveOutcome, team: &Team, context: &ViewContext) -> Result<()> {
    match outcome {
        LeaveOutcome::Left { refreshed } => {
            output::print_message(&format!("You have left {}.", team.name));
            if refreshed && !output::is_json_output() {
                println!();
                println!("{}", views::render_team_profile(team, context, None));
            }
            Ok(())
        }
        LeaveOutcome::Cancelled => {
            output::print_message("Cancelled. You are still on the team.");
            Ok(())
        }
        // The dialog or status region already showed the message; this is
        // the machine-readable half of the failure report.
        LeaveOutcome::Failed(message) => {
            if output::is_json_output() {
                println!("{}", serde_json::json!({ "error": &message }));
            }
            Err(CohortError::LeaveFailed(message))
        }
        LeaveOutcome::AlreadyPending => {
            output::print_message("A leave request is already in progress.");
            Ok(())
        }
    }
}
