//! Migrator for the student records schema.
//! Indexes are applied after the tables they cover.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_student;
mod m20240101_000002_add_student_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_student::Migration),
            Box::new(m20240101_000002_add_student_indexes::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

    async fn memory_db() -> DatabaseConnection {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        Database::connect(opts).await.expect("connect sqlite")
    }

    #[tokio::test]
    async fn up_down_up_is_clean() {
        let db = memory_db().await;
        Migrator::up(&db, None).await.expect("up");
        Migrator::down(&db, None).await.expect("down");
        Migrator::up(&db, None).await.expect("up again");
    }

    #[tokio::test]
    async fn email_is_unique_in_store() {
        let db = memory_db().await;
        Migrator::up(&db, None).await.expect("up");

        db.execute_unprepared(
            "INSERT INTO student (name, email, gender) VALUES ('Diego', 'diego@gmail.com', 'MALE')",
        )
        .await
        .expect("first insert");
        let dup = db
            .execute_unprepared(
                "INSERT INTO student (name, email, gender) VALUES ('Diego2', 'diego@gmail.com', 'FEMALE')",
            )
            .await;
        assert!(dup.is_err());
    }
}
