use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::student;
use super::domain::{NewStudent, Student};
use super::repository::StudentRepository;
use crate::errors::ServiceError;

/// Business rules for student records, independent of the web framework.
///
/// Every call round-trips through the repository; nothing is cached here.
pub struct StudentService<R: StudentRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get_all_students(&self) -> Result<Vec<Student>, ServiceError> {
        self.repo.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_student(&self, id: i32) -> Result<Student, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or(ServiceError::StudentNotFound(id))
    }

    /// Persist a new student unless its email is already taken.
    ///
    /// # Examples
    /// ```
    /// use service::students::{NewStudent, StudentService, repository::mock::InMemoryStudentRepository};
    /// use service::students::domain::Gender;
    /// use std::sync::Arc;
    /// let repo = Arc::new(InMemoryStudentRepository::default());
    /// let svc = StudentService::new(repo.clone());
    /// let s = tokio_test::block_on(svc.add_student(NewStudent::new("Diego", "diego@gmail.com", Gender::Male))).unwrap();
    /// assert_eq!(s.id, 1);
    /// let dup = tokio_test::block_on(svc.add_student(NewStudent::new("Diego2", "diego@gmail.com", Gender::Female)));
    /// assert!(dup.is_err());
    /// assert_eq!(repo.len(), 1);
    /// ```
    #[instrument(skip(self, candidate), fields(email = %candidate.email))]
    pub async fn add_student(&self, candidate: NewStudent) -> Result<Student, ServiceError> {
        student::validate_name(&candidate.name)?;
        student::validate_email(&candidate.email)?;

        if self.repo.exists_by_email(&candidate.email).await? {
            debug!("email already taken");
            return Err(ServiceError::EmailTaken(candidate.email));
        }
        // a concurrent insert between the check and here still fails as EmailTaken
        let created = self.repo.save(None, candidate).await?;
        info!(student_id = created.id, email = %created.email, "student_added");
        Ok(created)
    }

    /// Delete a student by id. Only existence of the id is checked.
    #[instrument(skip(self))]
    pub async fn remove_student(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            debug!("student not found");
            return Err(ServiceError::StudentNotFound(id));
        }
        if !self.repo.delete_by_id(id).await? {
            debug!("student vanished before delete");
            return Err(ServiceError::StudentNotFound(id));
        }
        info!(student_id = id, "student_removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::students::domain::Gender;
    use crate::students::repo::SeaOrmStudentRepository;
    use crate::students::repository::mock::InMemoryStudentRepository;
    use crate::test_support::get_db;

    fn diego() -> NewStudent {
        NewStudent::new("Diego", "diego@gmail.com", Gender::Male)
    }

    fn mock_service() -> (Arc<InMemoryStudentRepository>, StudentService<InMemoryStudentRepository>) {
        let repo = Arc::new(InMemoryStudentRepository::default());
        (repo.clone(), StudentService::new(repo))
    }

    #[tokio::test]
    async fn can_get_all_students() {
        let (_, svc) = mock_service();
        assert!(svc.get_all_students().await.unwrap().is_empty());
        svc.add_student(diego()).await.unwrap();
        let all = svc.get_all_students().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn can_add_student() {
        let (repo, svc) = mock_service();
        let created = svc.add_student(diego()).await.unwrap();
        assert_eq!(created, diego().into_student(created.id));
        assert_eq!(repo.save_calls(), 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn will_fail_when_email_is_taken() {
        let (repo, svc) = mock_service();
        svc.add_student(diego()).await.unwrap();

        let err = svc
            .add_student(NewStudent::new("Diego2", "diego@gmail.com", Gender::Female))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::EmailTaken(ref e) if e == "diego@gmail.com"));
        assert!(err.to_string().contains("Email diego@gmail.com is already taken"));
        // the pre-check short-circuits before any write
        assert_eq!(repo.save_calls(), 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn raced_insert_still_reports_email_taken() {
        let (repo, svc) = mock_service();
        svc.add_student(diego()).await.unwrap();
        repo.simulate_stale_checks();

        let err = svc
            .add_student(NewStudent::new("Diego2", "diego@gmail.com", Gender::Female))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::EmailTaken(_)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn rejects_invalid_candidates_without_writing() {
        let (repo, svc) = mock_service();
        let blank = svc.add_student(NewStudent::new("  ", "a@b.c", Gender::Female)).await;
        assert!(matches!(blank, Err(ServiceError::Validation(ref m)) if m == "name required"));
        let bad_email = svc.add_student(NewStudent::new("Ana", "ana", Gender::Female)).await;
        assert!(matches!(bad_email, Err(ServiceError::Validation(ref m)) if m == "invalid email"));
        assert_eq!(repo.save_calls(), 0);
    }

    #[tokio::test]
    async fn can_delete_student() {
        let (repo, svc) = mock_service();
        let created = svc.add_student(diego()).await.unwrap();
        svc.remove_student(created.id).await.unwrap();
        assert_eq!(repo.delete_calls(), 1);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn will_fail_when_deleted_student_not_found() {
        let (repo, svc) = mock_service();
        let err = svc.remove_student(999).await.unwrap_err();
        assert!(matches!(err, ServiceError::StudentNotFound(999)));
        assert!(err.to_string().contains("Student with id 999 does not exist"));
        assert_eq!(repo.delete_calls(), 0);
    }

    #[tokio::test]
    async fn deleting_unknown_id_leaves_other_rows_alone() {
        let (repo, svc) = mock_service();
        let created = svc.add_student(diego()).await.unwrap();
        let missing = created.id + 1;

        let err = svc.remove_student(missing).await.unwrap_err();
        assert!(matches!(err, ServiceError::StudentNotFound(id) if id == missing));
        assert_eq!(repo.delete_calls(), 0);
        assert_eq!(repo.len(), 1);
        assert_eq!(svc.get_student(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn raced_delete_reports_not_found() {
        let (repo, svc) = mock_service();
        repo.simulate_stale_checks();
        let err = svc.remove_student(7).await.unwrap_err();
        assert!(matches!(err, ServiceError::StudentNotFound(7)));
        assert_eq!(repo.delete_calls(), 1);
    }

    #[tokio::test]
    async fn get_student_by_id() {
        let (_, svc) = mock_service();
        let created = svc.add_student(diego()).await.unwrap();
        assert_eq!(svc.get_student(created.id).await.unwrap(), created);
        assert!(matches!(svc.get_student(created.id + 1).await, Err(ServiceError::StudentNotFound(_))));
    }

    #[tokio::test]
    async fn store_backed_add_then_remove() -> anyhow::Result<()> {
        let repo = Arc::new(SeaOrmStudentRepository::new(get_db().await?));
        let svc = StudentService::new(repo.clone());

        let created = svc.add_student(diego()).await?;
        let all = svc.get_all_students().await?;
        assert_eq!(all.iter().filter(|s| **s == created).count(), 1);

        let dup = svc.add_student(NewStudent::new("Diego2", "diego@gmail.com", Gender::Female)).await;
        assert!(matches!(dup, Err(ServiceError::EmailTaken(_))));
        assert_eq!(svc.get_all_students().await?.len(), 1);

        svc.remove_student(created.id).await?;
        assert!(!repo.exists_by_id(created.id).await?);
        assert!(matches!(svc.remove_student(created.id).await, Err(ServiceError::StudentNotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_adds_with_same_email_persist_one_row() -> anyhow::Result<()> {
        let repo = Arc::new(SeaOrmStudentRepository::new(get_db().await?));
        let svc = Arc::new(StudentService::new(repo));

        let (a, b) = tokio::join!(
            svc.add_student(NewStudent::new("Diego", "diego@gmail.com", Gender::Male)),
            svc.add_student(NewStudent::new("Diego2", "diego@gmail.com", Gender::Female)),
        );
        let ok = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(ok, 1);
        for res in [a, b] {
            if let Err(e) = res {
                assert!(matches!(e, ServiceError::EmailTaken(_)));
            }
        }
        assert_eq!(svc.get_all_students().await?.len(), 1);
        Ok(())
    }
}
