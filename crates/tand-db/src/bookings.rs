//! Bookings query.
//!
//! Appointments for a patient, joined with the booking type for its
//! human-readable description.

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

/// Base statement for the bookings query.
pub const BASE_QUERY: &str = r#"SELECT
    b.StartTime,
    b.EndTime,
    b.PatientNotified,
    b.PatientNotifiedVia,
    b.BookingText,
    b.Warnings,
    b.CreatedDateTime,
    b.LastModifiedDateTime,
    bt.Description,
    bt.PrinterFriendlyText
FROM BOOKING b
JOIN PATIENT p ON p.patientId = b.patientId
JOIN BOOKINGTYPE bt ON bt.BookingTypeID = b.BookingTypeID
WHERE 1=1"#;

/// Filterable columns of the bookings query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingColumn {
    Cpr,
    StartTime,
    EndTime,
    PatientNotified,
    BookingText,
    BookingTypeId,
    Description,
    CreatedDateTime,
    LastModifiedDateTime,
}

impl ColumnRef for BookingColumn {
    fn as_sql(&self) -> &'static str {
        match self {
            Self::Cpr => "p.cpr",
            Self::StartTime => "b.StartTime",
            Self::EndTime => "b.EndTime",
            Self::PatientNotified => "b.PatientNotified",
            Self::BookingText => "b.BookingText",
            Self::BookingTypeId => "b.BookingTypeID",
            Self::Description => "bt.Description",
            Self::CreatedDateTime => "b.CreatedDateTime",
            Self::LastModifiedDateTime => "b.LastModifiedDateTime",
        }
    }
}

/// One booking row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingRow {
    #[sqlx(rename = "StartTime")]
    pub start_time: NaiveDateTime,
    #[sqlx(rename = "EndTime")]
    pub end_time: NaiveDateTime,
    #[sqlx(rename = "PatientNotified")]
    pub patient_notified: Option<bool>,
    #[sqlx(rename = "PatientNotifiedVia")]
    pub patient_notified_via: Option<String>,
    #[sqlx(rename = "BookingText")]
    pub booking_text: Option<String>,
    #[sqlx(rename = "Warnings")]
    pub warnings: Option<String>,
    #[sqlx(rename = "CreatedDateTime")]
    pub created_at: NaiveDateTime,
    #[sqlx(rename = "LastModifiedDateTime")]
    pub last_modified_at: Option<NaiveDateTime>,
    #[sqlx(rename = "Description")]
    pub description: String,
    #[sqlx(rename = "PrinterFriendlyText")]
    pub printer_friendly_text: Option<String>,
}

/// Read-only repository for patient bookings.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    db: Database,
}

impl BookingRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All bookings for one patient, newest first.
    pub async fn list_for_patient(&self, cpr: &Cpr) -> RepositoryResult<Vec<BookingRow>> {
        let query = ListQuery::new()
            .equals(BookingColumn::Cpr, cpr)
            .order_by_desc(BookingColumn::StartTime);
        self.list(&query).await
    }

    /// Bookings for one patient starting inside the given window, earliest
    /// first.
    pub async fn in_window(
        &self,
        cpr: &Cpr,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> RepositoryResult<Vec<BookingRow>> {
        let query = ListQuery::new()
            .equals(BookingColumn::Cpr, cpr)
            .between(BookingColumn::StartTime, from, to)
            .order_by_asc(BookingColumn::StartTime);
        self.list(&query).await
    }
}

#[async_trait]
impl ListRepository for BookingRepository {
    type Column = BookingColumn;
    type Row = BookingRow;

    async fn list(&self, query: &ListQuery<BookingColumn>) -> RepositoryResult<Vec<BookingRow>> {
        let compiled = build_statement(BASE_QUERY, query);
        executor::fetch_all(&self.db, &compiled).await
    }
}
