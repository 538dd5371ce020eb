#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityRow {
    pub id: String,
    pub name: String,
    pub estimated_duration_secs: i64,
    pub location_id: Option<String>,
}
