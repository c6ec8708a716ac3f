use crate::{
    error::ApiError,
    model::attendance::{Attendance, NewAttendance},
    service::employee,
};
use sqlx::{SqlitePool, error::DatabaseError};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub const DUPLICATE_DATE: &str = "Attendance already marked for this date";

/// Records attendance for an existing employee, at most once per date.
#[instrument(
    name = "mark_attendance",
    skip(pool, new),
    fields(employee_id = %new.employee_id, date = %new.date)
)]
pub async fn mark_attendance(pool: &SqlitePool, new: &NewAttendance) -> Result<(), ApiError> {
    if !employee::exists(pool, &new.employee_id).await? {
        warn!("Attendance for unknown employee");
        return Err(ApiError::not_found(employee::NOT_FOUND));
    }

    let already_marked = sqlx::query_scalar::<_, i64>(
        "SELECT 1 FROM attendance WHERE employee_id = ? AND date = ? LIMIT 1",
    )
    .bind(&new.employee_id)
    .bind(new.date)
    .fetch_optional(pool)
    .await?
    .is_some();

    if already_marked {
        warn!("Rejected duplicate attendance");
        return Err(ApiError::conflict(DUPLICATE_DATE));
    }

    let id = Uuid::new_v4().to_string();

    let result = sqlx::query(
        r#"
        INSERT INTO attendance (id, employee_id, date, status)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&new.employee_id)
    .bind(new.date)
    .bind(&new.status)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {
            info!(attendance_id = %id, status = %new.status, "Attendance marked");
            Ok(())
        }
        Err(sqlx::Error::Database(db_err)) => match insert_rejection(db_err.as_ref()) {
            Some(rejection) => {
                warn!(error = %db_err, "Insert rejected by a constraint after the pre-checks");
                Err(rejection)
            }
            None => Err(sqlx::Error::Database(db_err).into()),
        },
        Err(e) => Err(e.into()),
    }
}

/// Maps constraint violations on an attendance insert: a second row for the
/// same date conflicts, and a missing employee (deleted between the check and
/// the insert) is not found.
fn insert_rejection(db_err: &dyn DatabaseError) -> Option<ApiError> {
    if db_err.is_unique_violation() {
        Some(ApiError::conflict(DUPLICATE_DATE))
    } else if db_err.is_foreign_key_violation() {
        Some(ApiError::not_found(employee::NOT_FOUND))
    } else {
        None
    }
}

/// Attendance rows for one employee in insertion order. An unknown id just
/// yields an empty list.
pub async fn attendance_for_employee(
    pool: &SqlitePool,
    employee_id: &str,
) -> Result<Vec<Attendance>, ApiError> {
    let sql = "SELECT id, employee_id, date, status FROM attendance \
               WHERE employee_id = ? ORDER BY rowid";
    debug!(sql, employee_id, "Fetching attendance");

    let records = sqlx::query_as::<_, Attendance>(sql)
        .bind(employee_id)
        .fetch_all(pool)
        .await?;
    Ok(records)
}
