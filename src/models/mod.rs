pub mod activities;
pub mod activity_participants;
pub mod activity_preferences;
pub mod scheduled_activities;

pub use activities::ActivityRow;
pub use activity_participants::{ActivityParticipant, InviteStatus};
pub use activity_preferences::ActivityPreferenceRow;
pub use scheduled_activities::ScheduledActivity;
