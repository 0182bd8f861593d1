//! External dentists query.
//!
//! Private-practice dentists associated with a patient via the patient's
//! privateClinicId.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::FromRow;
use tand_core::{Cpr, Id};
use tand_queries::{ColumnRef, ListQuery};

use crate::connection::Database;
use crate::executor;
use crate::repository::{ListRepository, RepositoryResult};
use crate::sql::build_statement;

/// Base statement for the external dentists query.
pub const BASE_QUERY: &str = r#"SELECT
    p.patientId,
    p.cpr,
    p.privateClinicId,
    c.contractorId,
    c.isPrimary,
    c.name,
    c.streetAddress,
    c.zip,
    c.phoneNumber
FROM PATIENT p
JOIN CLINIC c ON c.clinicId = p.privateClinicId
WHERE 1=1"#;

/// Filterable columns of the external dentists query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DentistColumn {
    PatientId,
    Cpr,
    PrivateClinicId,
    ContractorId,
    IsPrimary,
    Name,
    Zip,
}

impl ColumnRef for DentistColumn {
    fn as_sql(&self) -> &'static str {
        match self {
            Self::PatientId => "p.patientId",
            Self::Cpr => "p.cpr",
            Self::PrivateClinicId => "p.privateClinicId",
            Self::ContractorId => "c.contractorId",
            Self::IsPrimary => "c.isPrimary",
            Self::Name => "c.name",
            Self::Zip => "c.zip",
        }
    }
}

/// One external dentist row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DentistRow {
    #[sqlx(rename = "patientId")]
    pub patient_id: Id,
    pub cpr: String,
    #[sqlx(rename = "privateClinicId")]
    pub private_clinic_id: Id,
    #[sqlx(rename = "contractorId")]
    pub contractor_id: Option<String>,
    #[sqlx(rename = "isPrimary")]
    pub is_primary: bool,
    pub name: String,
    #[sqlx(rename = "streetAddress")]
    pub street_address: Option<String>,
    pub zip: Option<String>,
    #[sqlx(rename = "phoneNumber")]
    pub phone_number: Option<String>,
}

/// Read-only repository for a patient's external dentists.
#[derive(Debug, Clone)]
pub struct DentistRepository {
    db: Database,
}

impl DentistRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All external dentists registered for one patient.
    pub async fn list_for_patient(&self, cpr: &Cpr) -> RepositoryResult<Vec<DentistRow>> {
        let query = ListQuery::new().equals(DentistColumn::Cpr, cpr);
        self.list(&query).await
    }

    /// The patient's primary external dentist, if any.
    pub async fn primary_for_patient(&self, cpr: &Cpr) -> RepositoryResult<Vec<DentistRow>> {
        let query = ListQuery::new()
            .equals(DentistColumn::Cpr, cpr)
            .equals(DentistColumn::IsPrimary, true);
        self.list(&query).await
    }
}

#[async_trait]
impl ListRepository for DentistRepository {
    type Column = DentistColumn;
    type Row = DentistRow;

    async fn list(&self, query: &ListQuery<DentistColumn>) -> RepositoryResult<Vec<DentistRow>> {
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
        assert_eq!(DentistColumn::Cpr.as_sql(), "p.cpr");
        assert_eq!(DentistColumn::IsPrimary.as_sql(), "c.isPrimary");
        assert_eq!(DentistColumn::ContractorId.as_sql(), "c.contractorId");
    }

    #[test]
    fn test_primary_dentist_query() {
        let query = ListQuery::new()
            .equals(DentistColumn::Cpr, "0101901234")
            .equals(DentistColumn::IsPrimary, true);
        let compiled = build_statement(BASE_QUERY, &query);

        assert!(compiled.sql.ends_with("AND p.cpr = ? AND c.isPrimary = ?"));
        assert_eq!(
            compiled.params,
            vec![
                FilterValue::Text("0101901234".to_string()),
                FilterValue::Bool(true),
            ]
        );
    }
}
