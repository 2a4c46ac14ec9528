//! Annuaire – a small CRUD backend managing "personne" records.
//!
//! The backend keeps people in a single relational table and exposes them
//! over a REST surface. The interesting part is not the plumbing but the
//! validation and normalization pipeline applied to every record before it
//! is persisted:
//! * names must be letters/accents/spaces only and are stored upper-cased
//!   (`nom`) or capitalized (`prenom`),
//! * phone numbers must be valid Senegalese numbers (9 digits starting
//!   with 7), are stored in the canonical grouped form `XX XXX XX XX`, and
//!   are unique across the table regardless of spacing,
//! * addresses are restricted to a safe character class and trimmed,
//! * birth dates must be in the past and yield an age between 1 and 120.
//!
//! ## Modules
//! * [`validate`] – pure predicate/format functions over strings.
//! * [`person`] – the [`person::Personne`] record and its input DTO.
//! * [`store`] – SQLite persistence via the [`store::PersonneStore`].
//! * [`service`] – the [`service::PersonneService`] business core running
//!   the validation pipeline and orchestrating the store.
//! * [`server`] – axum router mapping the service onto `/api/personnes`.
//! * [`error`] – the crate-wide error taxonomy.
//!
//! ## Quick Start
//! ```
//! use annuaire::store::PersonneStore;
//! use annuaire::service::PersonneService;
//! use annuaire::person::PersonneInput;
//! let store = PersonneStore::open_in_memory().unwrap();
//! let service = PersonneService::new(store);
//! let created = service.create(PersonneInput {
//!     nom: Some("dupont".into()),
//!     prenom: Some("marie".into()),
//!     ..Default::default()
//! }).unwrap();
//! assert_eq!(created.nom, "DUPONT");
//! assert_eq!(created.prenom, "Marie");
//! ```

pub mod error;
pub mod person;
pub mod server;
pub mod service;
pub mod store;
pub mod validate;

pub use error::{AnnuaireError, Result};
