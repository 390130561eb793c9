mod membership;
mod page;
mod team;

pub use membership::{Membership, ProfileImage, TeamUser};
pub use page::TeamPage;
pub use team::Team;
