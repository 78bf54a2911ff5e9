//! Parameterized queries over a borrowed connection.
//!
//! Functions accept `&Connection` so they run unchanged inside a
//! [`Transaction`](rusqlite::Transaction). Absence is reported as `None` (or a
//! zero row count); turning it into a typed error is the service's job.

pub mod classes;
pub mod sectors;
