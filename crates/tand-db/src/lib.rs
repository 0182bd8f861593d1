//! # tand-db
//!
//! SQL generation and execution for the Solteq Tand data-access layer.
//!
//! This crate turns the `tand-queries` model into SQL (`sql::build_statement`)
//! and runs the result over a per-call MySQL connection, including:
//!
//! - Compiled statements with positional `?` parameters
//! - One read-only repository per entity query
//! - Typed row structs per query
//!
//! ## Example
//!
//! ```ignore
//! use tand_core::Cpr;
//! use tand_db::{Database, DocumentRepository};
//!
//! let db = Database::from_env();
//! let repo = DocumentRepository::new(db);
//!
//! let cpr = Cpr::parse("010190-1234")?;
//! let documents = repo.list_for_patient(&cpr).await?;
//! ```

pub mod bookings;
pub mod clinics;
pub mod connection;
pub mod dentists;
pub mod documents;
pub mod events;
pub mod executor;
pub mod journal_notes;
pub mod repository;
pub mod sql;

// Re-exports
pub use bookings::{BookingColumn, BookingRepository, BookingRow};
pub use clinics::{ClinicColumn, ClinicRepository, ClinicRow};
pub use connection::Database;
pub use dentists::{DentistColumn, DentistRepository, DentistRow};
pub use documents::{DocumentColumn, DocumentRepository, DocumentRow};
pub use events::{EventColumn, EventRepository, EventRow};
pub use journal_notes::{JournalNoteColumn, JournalNoteRepository, JournalNoteRow};
pub use repository::{ListRepository, RepositoryError, RepositoryResult};
pub use sql::{build_statement, CompiledQuery};
