//! Student records: domain types, storage gateway and business service.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{NewStudent, Student};
pub use repository::StudentRepository;
pub use service::StudentService;
