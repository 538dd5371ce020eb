use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// One concrete, dated occurrence of an activity. `activity_preference_id` is
// set only for occurrences generated from a recurring preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ScheduledActivity {
    pub id: String,
    pub activity_id: String,
    pub is_active: bool,
    pub scheduled_at: DateTime<Utc>,
    pub activity_preference_id: Option<String>,
}
