//! Primary dental clinics query.
//!
//! The preferred municipal clinic assignment for a patient, including whether
//! the assignment is locked against automatic reassignment.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::FromRow;
use tand_core::{Cpr, Id};
use tand_queries::{ColumnRef, ListQuery};

use crate::connection::Database;
use crate::executor;
use crate::repository::{ListRepository, RepositoryResult};
use crate::sql::build_statement;

/// Base statement for the primary dental clinics query.
pub const BASE_QUERY: &str = r#"SELECT
    p.cpr,
    p.patientId,
    p.firstName,
    p.lastName,
    p.preferredDentalClinicId,
    p.isPreferredDentalClinicLocked,
    c.name AS preferredDentalClinicName
FROM PATIENT p
JOIN CLINIC c ON c.clinicId = p.preferredDentalClinicId
WHERE 1=1"#;

/// Filterable columns of the primary dental clinics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClinicColumn {
    Cpr,
    PatientId,
    FirstName,
    LastName,
    PreferredClinicId,
    PreferredClinicLocked,
    PreferredClinicName,
}

impl ColumnRef for ClinicColumn {
    fn as_sql(&self) -> &'static str {
        match self {
            Self::Cpr => "p.cpr",
            Self::PatientId => "p.patientId",
            Self::FirstName => "p.firstName",
            Self::LastName => "p.lastName",
            Self::PreferredClinicId => "p.preferredDentalClinicId",
            Self::PreferredClinicLocked => "p.isPreferredDentalClinicLocked",
            Self::PreferredClinicName => "c.name",
        }
    }
}

/// One primary clinic assignment row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClinicRow {
    pub cpr: String,
    #[sqlx(rename = "patientId")]
    pub patient_id: Id,
    #[sqlx(rename = "firstName")]
    pub first_name: String,
    #[sqlx(rename = "lastName")]
    pub last_name: String,
    #[sqlx(rename = "preferredDentalClinicId")]
    pub preferred_clinic_id: Id,
    #[sqlx(rename = "isPreferredDentalClinicLocked")]
    pub preferred_clinic_locked: bool,
    #[sqlx(rename = "preferredDentalClinicName")]
    pub preferred_clinic_name: String,
}

/// Read-only repository for primary clinic assignments.
#[derive(Debug, Clone)]
pub struct ClinicRepository {
    db: Database,
}

impl ClinicRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// The primary clinic assignment for one patient.
    pub async fn for_patient(&self, cpr: &Cpr) -> RepositoryResult<Vec<ClinicRow>> {
        let query = ListQuery::new().equals(ClinicColumn::Cpr, cpr);
        self.list(&query).await
    }

    /// All patients assigned to one clinic.
    pub async fn patients_of_clinic(&self, clinic_id: Id) -> RepositoryResult<Vec<ClinicRow>> {
        let query = ListQuery::new()
            .equals(ClinicColumn::PreferredClinicId, clinic_id)
            .order_by_asc(ClinicColumn::LastName);
        self.list(&query).await
    }
}

#[async_trait]
impl ListRepository for ClinicRepository {
    type Column = ClinicColumn;
    type Row = ClinicRow;

    async fn list(&self, query: &ListQuery<ClinicColumn>) -> RepositoryResult<Vec<ClinicRow>> {
        let compiled = build_statement(BASE_QUERY, query);
        executor::fetch_all(&self.db, &compiled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tand_queries::FilterValue;

    #[test]
    fn test_base_query_ends_with_tautology() {
        assert!(BASE_QUERY.ends_with("WHERE 1=1"));
    }

    #[test]
    fn test_columns_map_to_qualified_sql() {
        assert_eq!(ClinicColumn::Cpr.as_sql(), "p.cpr");
        assert_eq!(
            ClinicColumn::PreferredClinicLocked.as_sql(),
            "p.isPreferredDentalClinicLocked"
        );
        assert_eq!(ClinicColumn::PreferredClinicName.as_sql(), "c.name");
    }

    #[test]
    fn test_patients_of_clinic_query() {
        let query = ListQuery::new()
            .equals(ClinicColumn::PreferredClinicId, 12)
            .order_by_asc(ClinicColumn::LastName);
        let compiled = build_statement(BASE_QUERY, &query);

        assert!(compiled
            .sql
            .ends_with("AND p.preferredDentalClinicId = ? ORDER BY p.lastName ASC"));
        assert_eq!(compiled.params, vec![FilterValue::Int(12)]);
    }
}
