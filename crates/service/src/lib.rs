//! Service layer for student records.
//! - `students::repository` is the storage gateway over the relational store.
//! - `students::service` enforces the business rules on top of it.
//! - Errors are reported through `errors::ServiceError`.

pub mod errors;
pub mod students;
#[cfg(test)]
pub mod test_support;
