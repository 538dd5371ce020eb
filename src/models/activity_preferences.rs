use serde::{Deserialize, Serialize};

// Raw preference row. Frequency, period and weekday tokens are validated when
// the preference is turned into a `RecurrenceRule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityPreferenceRow {
    pub id: String,
    pub user_id: String,
    pub activity_id: String,
    pub frequency: i64,
    pub frequency_period: String, // week|month
    pub days_of_week: String,     // e.g. "1,3" (0 = Sunday) or "mon,wed"
}
