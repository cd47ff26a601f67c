//! Materializes tenant namespaces.
//!
//! The `provision_in` functions run on a caller-supplied connection so the
//! registry insert and the DDL can share one transaction.

pub mod postgres;
pub mod sqlite;
