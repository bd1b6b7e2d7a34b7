use async_trait::async_trait;

use super::domain::{NewStudent, Student};
use crate::errors::ServiceError;

/// Row-level persistence for students.
///
/// Implementations must enforce email uniqueness themselves: a `save` that
/// would duplicate an email fails with `ServiceError::EmailTaken`.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Student>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, ServiceError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError>;
    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError>;

    /// Insert when `id` is `None`, otherwise overwrite the row with that id.
    async fn save(&self, id: Option<i32>, student: NewStudent) -> Result<Student, ServiceError>;

    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryStudentRepository {
        rows: Mutex<BTreeMap<i32, Student>>, // key: id
        last_id: Mutex<i32>,
        stale_checks: AtomicBool,
        save_calls: AtomicUsize,
        delete_calls: AtomicUsize,
    }

    impl InMemoryStudentRepository {
        /// Make `exists_by_*` answer as if another writer raced the caller:
        /// emails look free and every id looks present.
        pub fn simulate_stale_checks(&self) {
            self.stale_checks.store(true, Ordering::SeqCst);
        }

        pub fn save_calls(&self) -> usize { self.save_calls.load(Ordering::SeqCst) }
        pub fn delete_calls(&self) -> usize { self.delete_calls.load(Ordering::SeqCst) }
        pub fn len(&self) -> usize { self.rows.lock().unwrap().len() }
        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl StudentRepository for InMemoryStudentRepository {
        async fn find_all(&self) -> Result<Vec<Student>, ServiceError> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Student>, ServiceError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
            if self.stale_checks.load(Ordering::SeqCst) { return Ok(false); }
            Ok(self.rows.lock().unwrap().values().any(|s| s.email == email))
        }

        async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
            if self.stale_checks.load(Ordering::SeqCst) { return Ok(true); }
            Ok(self.rows.lock().unwrap().contains_key(&id))
        }

        async fn save(&self, id: Option<i32>, student: NewStudent) -> Result<Student, ServiceError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows.lock().unwrap();
            if rows.values().any(|s| s.email == student.email && Some(s.id) != id) {
                return Err(ServiceError::EmailTaken(student.email));
            }
            let id = match id {
                Some(id) if rows.contains_key(&id) => id,
                Some(id) => return Err(ServiceError::StudentNotFound(id)),
                None => {
                    let mut last = self.last_id.lock().unwrap();
                    *last += 1;
                    *last
                }
            };
            let saved = student.into_student(id);
            rows.insert(id, saved.clone());
            Ok(saved)
        }

        async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }
    }
}
