use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use models::student;
use crate::errors::ServiceError;
use crate::students::domain::{NewStudent, Student};
use crate::students::repository::StudentRepository;

pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn db_err(e: DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

/// The unique index on `student.email` is the authoritative duplicate check.
fn write_err(e: DbErr, email: &str, id: Option<i32>) -> ServiceError {
    if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
        return ServiceError::EmailTaken(email.to_string());
    }
    match (e, id) {
        (DbErr::RecordNotUpdated, Some(id)) => ServiceError::StudentNotFound(id),
        (e, _) => db_err(e),
    }
}

#[async_trait::async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn find_all(&self) -> Result<Vec<Student>, ServiceError> {
        student::Entity::find()
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, ServiceError> {
        student::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        let n = student::Entity::find()
            .filter(student::Column::Email.eq(email))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(n > 0)
    }

    async fn exists_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let n = student::Entity::find_by_id(id).count(&self.db).await.map_err(db_err)?;
        Ok(n > 0)
    }

    async fn save(&self, id: Option<i32>, input: NewStudent) -> Result<Student, ServiceError> {
        let email = input.email.clone();
        let mut am = student::ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            gender: Set(input.gender),
            ..Default::default()
        };
        match id {
            None => am.insert(&self.db).await.map_err(|e| write_err(e, &email, None)),
            Some(id) => {
                am.id = Set(id);
                am.update(&self.db).await.map_err(|e| write_err(e, &email, Some(id)))
            }
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        let res = student::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }
}
