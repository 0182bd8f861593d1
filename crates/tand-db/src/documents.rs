//! Documents query.
//!
//! Document revisions for a patient, resolved through a CTE over
//! DocumentStore and DocumentStoreStatus. `rn` numbers a document's status
//! revisions newest-first, so callers that only want current revisions filter
//! on `Revision = 1`.

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

/// Base statement for the documents query.
pub const BASE_QUERY: &str = r#"WITH LatestActiveDocuments AS (
    SELECT
        ds.DocumentId,
        ds.entityId,
        ds.OriginalFilename,
        ds.UniqueFilename,
        ds.DocumentType,
        ds.DocumentDescription,
        ds.Priviledged,
        ds.ContentType,
        dss.Document_HistoryId,
        dss.DocumentStoreStatusId,
        dss.SentToNemSMS,
        dss.Documented AS DocumentCreatedDate,
        dss.Decided AS DocumentLastEditedDate,
        ROW_NUMBER() OVER (
            PARTITION BY ds.DocumentId
            ORDER BY dss.Document_HistoryId DESC
        ) AS rn
    FROM DocumentStore ds
    JOIN DocumentStoreStatus dss ON ds.DocumentId = dss.DocumentId
)
SELECT
    ds.DocumentId,
    ds.entityId,
    ds.OriginalFilename,
    ds.UniqueFilename,
    ds.DocumentType,
    ds.DocumentDescription,
    ds.DocumentCreatedDate,
    ds.DocumentLastEditedDate,
    ds.SentToNemSMS,
    p.cpr
FROM PATIENT p
JOIN LatestActiveDocuments ds ON ds.entityId = p.patientId
WHERE 1=1"#;

/// Filterable columns of the documents query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentColumn {
    DocumentId,
    PatientId,
    OriginalFilename,
    UniqueFilename,
    DocumentType,
    DocumentDescription,
    DocumentCreatedDate,
    DocumentLastEditedDate,
    SentToNemSms,
    /// Status revision number, 1 = newest.
    Revision,
    Cpr,
}

impl ColumnRef for DocumentColumn {
    fn as_sql(&self) -> &'static str {
        match self {
            Self::DocumentId => "ds.DocumentId",
            Self::PatientId => "ds.entityId",
            Self::OriginalFilename => "ds.OriginalFilename",
            Self::UniqueFilename => "ds.UniqueFilename",
            Self::DocumentType => "ds.DocumentType",
            Self::DocumentDescription => "ds.DocumentDescription",
            Self::DocumentCreatedDate => "ds.DocumentCreatedDate",
            Self::DocumentLastEditedDate => "ds.DocumentLastEditedDate",
            Self::SentToNemSms => "ds.SentToNemSMS",
            Self::Revision => "ds.rn",
            Self::Cpr => "p.cpr",
        }
    }
}

/// One document row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DocumentRow {
    #[sqlx(rename = "DocumentId")]
    pub document_id: Id,
    #[sqlx(rename = "entityId")]
    pub patient_id: Id,
    #[sqlx(rename = "OriginalFilename")]
    pub original_filename: String,
    #[sqlx(rename = "UniqueFilename")]
    pub unique_filename: String,
    #[sqlx(rename = "DocumentType")]
    pub document_type: Option<String>,
    #[sqlx(rename = "DocumentDescription")]
    pub document_description: Option<String>,
    #[sqlx(rename = "DocumentCreatedDate")]
    pub created_at: Option<NaiveDateTime>,
    #[sqlx(rename = "DocumentLastEditedDate")]
    pub last_edited_at: Option<NaiveDateTime>,
    #[sqlx(rename = "SentToNemSMS")]
    pub sent_to_nem_sms: Option<bool>,
    pub cpr: String,
}

/// Read-only repository for patient documents.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: Database,
}

impl DocumentRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Latest document revisions for one patient, newest first.
    pub async fn list_for_patient(&self, cpr: &Cpr) -> RepositoryResult<Vec<DocumentRow>> {
        let query = ListQuery::new()
            .equals(DocumentColumn::Cpr, cpr)
            .equals(DocumentColumn::Revision, 1)
            .order_by_desc(DocumentColumn::DocumentCreatedDate);
        self.list(&query).await
    }
}

#[async_trait]
impl ListRepository for DocumentRepository {
    type Column = DocumentColumn;
    type Row = DocumentRow;

    async fn list(&self, query: &ListQuery<DocumentColumn>) -> RepositoryResult<Vec<DocumentRow>> {
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
        assert_eq!(DocumentColumn::Cpr.as_sql(), "p.cpr");
        assert_eq!(DocumentColumn::Revision.as_sql(), "ds.rn");
        assert_eq!(DocumentColumn::SentToNemSms.as_sql(), "ds.SentToNemSMS");
    }

    #[test]
    fn test_latest_revision_query_for_patient() {
        let query = ListQuery::new()
            .equals(DocumentColumn::Cpr, "0101901234")
            .equals(DocumentColumn::Revision, 1)
            .order_by_desc(DocumentColumn::DocumentCreatedDate);
        let compiled = build_statement(BASE_QUERY, &query);

        assert!(compiled.sql.ends_with(
            "AND p.cpr = ? AND ds.rn = ? ORDER BY ds.DocumentCreatedDate DESC"
        ));
        assert_eq!(
            compiled.params,
            vec![
                FilterValue::Text("0101901234".to_string()),
                FilterValue::Int(1),
            ]
        );
    }

    #[test]
    fn test_row_serializes_for_downstream_consumers() {
        let row = DocumentRow {
            document_id: 7,
            patient_id: 3,
            original_filename: "indkaldelse.pdf".to_string(),
            unique_filename: "a81f.pdf".to_string(),
            document_type: Some("Letter".to_string()),
            document_description: None,
            created_at: None,
            last_edited_at: None,
            sent_to_nem_sms: Some(true),
            cpr: "0101901234".to_string(),
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["document_id"], 7);
        assert_eq!(json["sent_to_nem_sms"], true);
        assert!(json["document_description"].is_null());
    }
}
