//! Journal notes query.
//!
//! Diagnostic notes from a patient's treatment courses, resolved through the
//! Forloeb / ForloebSymbolisering / DiagnoseStatus / DiagnostikNotat chain.
//! Column names on this part of the schema are Danish.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use tand_core::Cpr;
use tand_queries::{ColumnRef, ListQuery};

use crate::connection::Database;
use crate::executor;
use crate::repository::{ListRepository, RepositoryResult};
use crate::sql::build_statement;

/// Base statement for the journal notes query.
pub const BASE_QUERY: &str = r#"SELECT
    dn.Beskrivelse,
    ds.Dokumenteret,
    ds.Besluttet,
    ds.Art,
    ds.EjerArt
FROM Forloeb f
JOIN ForloebSymbolisering fs ON fs.ForloebID = f.ForloebID
JOIN DiagnoseStatus ds ON ds.GEpjID = fs.DiagnoseID
JOIN DiagnostikNotat dn ON dn.KontekstID = ds.KontekstID
JOIN PATIENT p ON p.patientId = f.patientId
WHERE 1=1"#;

/// Filterable columns of the journal notes query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalNoteColumn {
    Cpr,
    PatientId,
    Documented,
    Decided,
    Kind,
    OwnerKind,
}

impl ColumnRef for JournalNoteColumn {
    fn as_sql(&self) -> &'static str {
        match self {
            Self::Cpr => "p.cpr",
            Self::PatientId => "f.patientId",
            Self::Documented => "ds.Dokumenteret",
            Self::Decided => "ds.Besluttet",
            Self::Kind => "ds.Art",
            Self::OwnerKind => "ds.EjerArt",
        }
    }
}

/// One journal note row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JournalNoteRow {
    #[sqlx(rename = "Beskrivelse")]
    pub description: String,
    #[sqlx(rename = "Dokumenteret")]
    pub documented_at: Option<NaiveDateTime>,
    #[sqlx(rename = "Besluttet")]
    pub decided_at: Option<NaiveDateTime>,
    #[sqlx(rename = "Art")]
    pub kind: Option<String>,
    #[sqlx(rename = "EjerArt")]
    pub owner_kind: Option<String>,
}

/// Read-only repository for patient journal notes.
#[derive(Debug, Clone)]
pub struct JournalNoteRepository {
    db: Database,
}

impl JournalNoteRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All journal notes for one patient, newest first.
    pub async fn list_for_patient(&self, cpr: &Cpr) -> RepositoryResult<Vec<JournalNoteRow>> {
        let query = ListQuery::new()
            .equals(JournalNoteColumn::Cpr, cpr)
            .order_by_desc(JournalNoteColumn::Documented);
        self.list(&query).await
    }
}

#[async_trait]
impl ListRepository for JournalNoteRepository {
    type Column = JournalNoteColumn;
    type Row = JournalNoteRow;

    async fn list(
        &self,
        query: &ListQuery<JournalNoteColumn>,
    ) -> RepositoryResult<Vec<JournalNoteRow>> {
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
        assert_eq!(JournalNoteColumn::Cpr.as_sql(), "p.cpr");
        assert_eq!(JournalNoteColumn::Documented.as_sql(), "ds.Dokumenteret");
        assert_eq!(JournalNoteColumn::OwnerKind.as_sql(), "ds.EjerArt");
    }

    #[test]
    fn test_notes_for_patient_query() {
        let query = ListQuery::new()
            .equals(JournalNoteColumn::Cpr, "0101901234")
            .order_by_desc(JournalNoteColumn::Documented);
        let compiled = build_statement(BASE_QUERY, &query);

        assert!(compiled
            .sql
            .ends_with("AND p.cpr = ? ORDER BY ds.Dokumenteret DESC"));
        assert_eq!(
            compiled.params,
            vec![FilterValue::Text("0101901234".to_string())]
        );
    }
}
