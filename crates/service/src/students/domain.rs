use serde::{Deserialize, Serialize};

pub use models::student::Gender;

/// Persisted student row.
pub type Student = models::student::Model;

/// Candidate student, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub gender: Gender,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, email: impl Into<String>, gender: Gender) -> Self {
        Self { name: name.into(), email: email.into(), gender }
    }

    pub fn into_student(self, id: i32) -> Student {
        Student { id, name: self.name, email: self.email, gender: self.gender }
    }
}
