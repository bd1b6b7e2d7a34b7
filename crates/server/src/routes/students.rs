use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

use service::students::{NewStudent, Student};

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/v1/students", tag = "students", responses((status = 200, description = "All students", body = [crate::openapi::StudentDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Student>>, JsonApiError> {
    let all = state.students.get_all_students().await?;
    info!(count = all.len(), "list students");
    Ok(Json(all))
}

#[utoipa::path(get, path = "/api/v1/students/{id}", tag = "students", params(("id" = i32, Path, description = "Student id")), responses((status = 200, description = "Student", body = crate::openapi::StudentDoc), (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)))]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Student>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.students.get_student(id).await?))
}

#[utoipa::path(post, path = "/api/v1/students", tag = "students", request_body = crate::openapi::NewStudentDoc, responses((status = 200, description = "Created", body = crate::openapi::StudentDoc), (status = 400, description = "Email taken or invalid input", body = crate::openapi::ErrorDoc), (status = 422, description = "Malformed body or unknown gender", body = crate::openapi::ErrorDoc)))]
pub async fn create(
    State(state): State<ServerState>,
    input: Result<Json<NewStudent>, JsonRejection>,
) -> Result<Json<Student>, JsonApiError> {
    let Json(input) = input?;
    let created = state.students.add_student(input).await?;
    Ok(Json(created))
}

#[utoipa::path(delete, path = "/api/v1/students/{id}", tag = "students", params(("id" = i32, Path, description = "Student id")), responses((status = 204, description = "Deleted"), (status = 400, description = "Malformed id", body = crate::openapi::ErrorDoc), (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)))]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.students.remove_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
