//! Events query.
//!
//! Workflow events for a patient, joined with the owning clinic.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use tand_core::{Cpr, Id};
use tand_queries::{ColumnRef, ListQuery};

use crate::connection::Database;
use crate::executor;
use crate::repository::{ListRepository, RepositoryResult};
use crate::sql::build_statement;

/// Base statement for the events query.
pub const BASE_QUERY: &str = r#"SELECT
    e.eventId,
    e.type,
    e.currentStateText,
    e.currentStateDate,
    e.timestamp,
    e.clinicId,
    c.name,
    e.entityId,
    e.eventTriggerDate,
    p.cpr,
    e.archived
FROM EVENT e
JOIN PATIENT p ON p.patientId = e.entityId
JOIN CLINIC c ON c.clinicId = e.clinicId
WHERE 1=1"#;

/// Filterable columns of the events query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColumn {
    EventId,
    Type,
    CurrentStateText,
    CurrentStateDate,
    Timestamp,
    ClinicId,
    ClinicName,
    PatientId,
    EventTriggerDate,
    Cpr,
    Archived,
}

impl ColumnRef for EventColumn {
    fn as_sql(&self) -> &'static str {
        match self {
            Self::EventId => "e.eventId",
            Self::Type => "e.type",
            Self::CurrentStateText => "e.currentStateText",
            Self::CurrentStateDate => "e.currentStateDate",
            Self::Timestamp => "e.timestamp",
            Self::ClinicId => "e.clinicId",
            Self::ClinicName => "c.name",
            Self::PatientId => "e.entityId",
            Self::EventTriggerDate => "e.eventTriggerDate",
            Self::Cpr => "p.cpr",
            Self::Archived => "e.archived",
        }
    }
}

/// One event row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventRow {
    #[sqlx(rename = "eventId")]
    pub event_id: Id,
    #[sqlx(rename = "type")]
    pub event_type: Option<String>,
    #[sqlx(rename = "currentStateText")]
    pub current_state_text: Option<String>,
    #[sqlx(rename = "currentStateDate")]
    pub current_state_date: Option<NaiveDateTime>,
    pub timestamp: NaiveDateTime,
    #[sqlx(rename = "clinicId")]
    pub clinic_id: Id,
    #[sqlx(rename = "name")]
    pub clinic_name: String,
    #[sqlx(rename = "entityId")]
    pub patient_id: Id,
    #[sqlx(rename = "eventTriggerDate")]
    pub event_trigger_date: Option<NaiveDateTime>,
    pub cpr: String,
    pub archived: bool,
}

/// Read-only repository for patient events.
#[derive(Debug, Clone)]
pub struct EventRepository {
    db: Database,
}

impl EventRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All events for one patient, newest first.
    pub async fn list_for_patient(&self, cpr: &Cpr) -> RepositoryResult<Vec<EventRow>> {
        let query = ListQuery::new()
            .equals(EventColumn::Cpr, cpr)
            .order_by_desc(EventColumn::Timestamp);
        self.list(&query).await
    }

    /// Unarchived events for one patient, newest first.
    pub async fn active_for_patient(&self, cpr: &Cpr) -> RepositoryResult<Vec<EventRow>> {
        let query = ListQuery::new()
            .equals(EventColumn::Cpr, cpr)
            .equals(EventColumn::Archived, false)
            .order_by_desc(EventColumn::Timestamp);
        self.list(&query).await
    }
}

#[async_trait]
impl ListRepository for EventRepository {
    type Column = EventColumn;
    type Row = EventRow;

    async fn list(&self, query: &ListQuery<EventColumn>) -> RepositoryResult<Vec<EventRow>> {
        let compiled = build_statement(BASE_QUERY, query);
        executor::fetch_all(&self.db, &compiled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tand_queries::{FilterValue, OrBranch, OrGroup};

    #[test]
    fn test_base_query_ends_with_tautology() {
        assert!(BASE_QUERY.ends_with("WHERE 1=1"));
    }

    #[test]
    fn test_columns_map_to_qualified_sql() {
        assert_eq!(EventColumn::Type.as_sql(), "e.type");
        assert_eq!(EventColumn::ClinicName.as_sql(), "c.name");
        assert_eq!(EventColumn::Archived.as_sql(), "e.archived");
    }

    #[test]
    fn test_active_events_query() {
        let query = ListQuery::new()
            .equals(EventColumn::Cpr, "0101901234")
            .equals(EventColumn::Archived, false)
            .order_by_desc(EventColumn::Timestamp);
        let compiled = build_statement(BASE_QUERY, &query);

        assert!(compiled
            .sql
            .ends_with("AND p.cpr = ? AND e.archived = ? ORDER BY e.timestamp DESC"));
        assert_eq!(
            compiled.params,
            vec![
                FilterValue::Text("0101901234".to_string()),
                FilterValue::Bool(false),
            ]
        );
    }

    #[test]
    fn test_event_type_alternatives() {
        let query = ListQuery::new()
            .equals(EventColumn::Cpr, "0101901234")
            .any_of(
                OrGroup::new()
                    .branch(OrBranch::new().equals(EventColumn::Type, "Recall"))
                    .branch(OrBranch::new().one_of(EventColumn::Type, ["Referral", "Transfer"])),
            );
        let compiled = build_statement(BASE_QUERY, &query);

        assert!(compiled
            .sql
            .ends_with("AND p.cpr = ? AND ((e.type = ?) OR (e.type IN (?, ?)))"));
        assert_eq!(compiled.params.len(), 4);
    }
}
