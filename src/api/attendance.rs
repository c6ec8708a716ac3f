use crate::{
    error::ApiError,
    model::attendance::{Attendance, NewAttendance},
    service::attendance as ledger,
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

/// Mark attendance endpoint
#[utoipa::path(
    post,
    path = "/attendance",
    request_body = NewAttendance,
    responses(
        (status = 200, description = "Attendance marked", body = Object, example = json!({
            "message": "Attendance marked successfully"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "detail": "Employee not found"
        })),
        (status = 409, description = "Already marked for this date", body = Object, example = json!({
            "detail": "Attendance already marked for this date"
        })),
        (status = 422, description = "Invalid request body")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<NewAttendance>,
) -> Result<HttpResponse, ApiError> {
    payload.validate()?;

    ledger::mark_attendance(pool.get_ref(), &payload).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance marked successfully"
    })))
}

/// Attendance history for one employee
#[utoipa::path(
    get,
    path = "/attendance/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Attendance records, empty when none exist", body = [Attendance])
    ),
    tag = "Attendance"
)]
pub async fn get_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    let records = ledger::attendance_for_employee(pool.get_ref(), &employee_id).await?;
    Ok(HttpResponse::Ok().json(records))
}
