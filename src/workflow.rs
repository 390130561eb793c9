//! The leave-team workflow: an asynchronous state machine that removes the
//! acting user from a team and refreshes the entity on success.
//!
//! Two policies exist. `Direct` issues the DELETE immediately and recovers
//! from failures by extracting the server's `user_message` (falling back to a
//! fixed generic text) into the status region. `Confirming` is the legacy
//! variant: it gates the request behind a confirmation dialog and surfaces
//! raw failure payloads through a blocking alert.

use crate::error::Result;
use crate::types::Team;

pub const LEAVE_TITLE: &str = "Leave this team?";
pub const LEAVE_MESSAGE: &str = "Leaving a team means you can no longer post on this team, \
and your spot is opened for another learner.";
pub const LEAVE_ACTION: &str = "Leave";
pub const GENERIC_LEAVE_ERROR: &str = "An error occurred. Try again.";
pub const STALE_STATE_NOTICE: &str =
    "You have left the team, but the team could not be reloaded. Run 'cohort team show' \
to see its current state.";

/// Placeholder token in the membership-detail URL template.
const TEAM_ID_TOKEN: &str = "team_id";

/// Failure reported for the membership DELETE. Carries whatever the server
/// or transport produced; interpretation is policy-specific.
#[derive(Debug, Clone)]
pub struct LeaveFailure {
    pub status: Option<u16>,
    pub body: String,
}

/// Extract the server's `user_message` from a failure body, falling back to
/// the fixed generic text when the body is not JSON or lacks the field.
pub fn failure_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("user_message")
                .and_then(|message| message.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| GENERIC_LEAVE_ERROR.to_string())
}

/// Network seam for the workflow. Implemented by the real client and by
/// test doubles.
pub trait MembershipApi {
    async fn leave_team(&self, url: &str) -> std::result::Result<(), LeaveFailure>;
    async fn fetch_team(&self, url: &str) -> Result<Team>;
}

/// Confirmation/alert surface, kept independent of any particular widget.
pub trait Dialog {
    fn confirm(&mut self, title: &str, message: &str, action_label: &str) -> bool;
    fn alert(&mut self, message: &str);
}

/// Persistent, non-modal message region. Implementations should draw the
/// user's attention to the message (the terminal analogue of moving focus).
pub trait StatusRegion {
    fn announce(&mut self, message: &str);
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LeaveState {
    Idle,
    Confirming,
    InFlight,
    Failure,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LeavePolicy {
    /// Legacy: confirm first, surface raw failure payloads via alert.
    Confirming,
    /// Canonical: no confirmation step, structured failure recovery.
    #[default]
    Direct,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// The DELETE succeeded. `refreshed` is false when the follow-up fetch
    /// of the team entity failed and the local copy is stale.
    Left { refreshed: bool },
    Cancelled,
    Failed(String),
    /// A leave request is already in flight; this trigger was ignored.
    AlreadyPending,
}

pub struct LeaveTeamWorkflow {
    policy: LeavePolicy,
    state: LeaveState,
}

impl LeaveTeamWorkflow {
    pub fn new(policy: LeavePolicy) -> Self {
        Self {
            policy,
            state: LeaveState::Idle,
        }
    }

    pub fn state(&self) -> LeaveState {
        self.state
    }

    /// Drive one leave attempt to completion. On success the team entity is
    /// replaced wholesale with the re-fetched state; the caller re-renders
    /// from it. A failed attempt never mutates the entity.
    pub async fn trigger<A: MembershipApi>(
        &mut self,
        api: &A,
        team: &mut Team,
        detail_template: &str,
        dialog: &mut dyn Dialog,
        status: &mut dyn StatusRegion,
    ) -> LeaveOutcome {
        if self.state == LeaveState::InFlight {
            return LeaveOutcome::AlreadyPending;
        }

        if self.policy == LeavePolicy::Confirming {
            self.state = LeaveState::Confirming;
            if !dialog.confirm(LEAVE_TITLE, LEAVE_MESSAGE, LEAVE_ACTION) {
                self.state = LeaveState::Idle;
                return LeaveOutcome::Cancelled;
            }
        }

        self.state = LeaveState::InFlight;
        let url = detail_template.replace(TEAM_ID_TOKEN, &team.id);

        match api.leave_team(&url).await {
            Ok(()) => {
                // The re-fetch is issued only after the DELETE has succeeded,
                // so the two calls of one attempt are strictly sequenced.
                match api.fetch_team(&team.url).await {
                    Ok(fresh) => {
                        *team = fresh;
                        self.state = LeaveState::Idle;
                        LeaveOutcome::Left { refreshed: true }
                    }
                    Err(_) => {
                        status.announce(STALE_STATE_NOTICE);
                        self.state = LeaveState::Idle;
                        LeaveOutcome::Left { refreshed: false }
                    }
                }
            }
            Err(failure) => {
                self.state = LeaveState::Failure;
                match self.policy {
                    LeavePolicy::Confirming => {
                        dialog.alert(&failure.body);
                        LeaveOutcome::Failed(failure.body)
                    }
                    LeavePolicy::Direct => {
                        let message = failure_message(&failure.body);
                        status.announce(&message);
                        // Back to Idle so the user may retry.
                        self.state = LeaveState::Idle;
                        LeaveOutcome::Failed(message)
                    }
                }
            }
        }
    }
}
