pub mod activity_participant_service;
pub mod availability_service;
pub mod lookups;
pub mod occurrence_writer;
pub mod recurrence;
pub mod scheduled_activity_service;
pub mod series_decline_service;
pub mod time_input;
