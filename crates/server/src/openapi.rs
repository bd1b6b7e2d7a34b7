use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum GenderDoc { Male, Female }

#[derive(ToSchema)]
pub struct StudentDoc { pub id: i32, pub name: String, pub email: String, pub gender: GenderDoc }

#[derive(ToSchema)]
pub struct NewStudentDoc { pub name: String, pub email: String, pub gender: GenderDoc }

#[derive(ToSchema)]
pub struct ErrorDoc { pub status: u16, pub error: String, pub message: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::list,
        crate::routes::students::get,
        crate::routes::students::create,
        crate::routes::students::delete,
    ),
    components(
        schemas(
            HealthResponse,
            GenderDoc,
            StudentDoc,
            NewStudentDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
