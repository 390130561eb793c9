use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "cohort")]
#[command(about = "A CLI for course team membership", version)]
#[command(after_help = "EXAMPLES:
    cohort teams --topic animals       List teams for a topic
    cohort team show hobbits           Show a team's profile
    cohort team leave hobbits          Leave a team
    cohort team leave hobbits --confirm  Ask before leaving")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Show full error chains
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List teams in the course
    #[command(after_help = "EXAMPLES:
    cohort teams
    cohort teams --topic animals --page 2
    cohort teams --actions")]
    Teams(TeamListArgs),
    /// Show or leave a single team
    Team {
        #[command(subcommand)]
        action: TeamCommands,
    },
    /// Create the config file interactively
    Init,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    cohort completions bash > ~/.bash_completion.d/cohort
    cohort completions zsh > ~/.zfunc/_cohort
    cohort completions fish > ~/.config/fish/completions/cohort.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum TeamCommands {
    /// Show a team's profile
    Show {
        /// Team id or name
        team: String,
        /// Include a preview of the team's discussion threads
        #[arg(long)]
        discussion: bool,
    },
    /// Leave a team you belong to
    Leave(LeaveArgs),
}

#[derive(Args)]
pub struct TeamListArgs {
    /// Course to list teams for (defaults to course_id from config)
    #[arg(long)]
    pub course: Option<String>,

    /// Filter by topic id
    #[arg(long)]
    pub topic: Option<String>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Teams per page (defaults to page_size from config)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Append the team action bar below the list
    #[arg(long)]
    pub actions: bool,
}

#[derive(Args)]
pub struct LeaveArgs {
    /// Team id or name
    pub team: String,

    /// Ask for confirmation before leaving (legacy behavior)
    #[arg(long, conflicts_with = "yes")]
    pub confirm: bool,

    /// Never ask for confirmation, even when the config enables it
    #[arg(long, short = 'y')]
    pub yes: bool,
}
