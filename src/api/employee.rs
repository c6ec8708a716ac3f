use crate::{
    error::ApiError,
    model::employee::{Employee, NewEmployee},
    service::employee as directory,
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

/// Add Employee
#[utoipa::path(
    post,
    path = "/employees",
    request_body = NewEmployee,
    responses(
        (status = 200, description = "Employee added", body = Object, example = json!({
            "message": "Employee added successfully"
        })),
        (status = 409, description = "Employee ID or email already exists", body = Object, example = json!({
            "detail": "Employee ID already exists"
        })),
        (status = 422, description = "Invalid request body")
    ),
    tag = "Employee"
)]
pub async fn add_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<NewEmployee>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    directory::add_employee(pool.get_ref(), &payload).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee added successfully"
    })))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "All employees in insertion order", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> Result<HttpResponse, ApiError> {
    let employees = directory::list_employees(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Delete Employee and its attendance
#[utoipa::path(
    delete,
    path = "/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = Object, example = json!({
            "message": "Employee deleted successfully"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    directory::delete_employee(pool.get_ref(), &employee_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully"
    })))
}
