use crate::{
    error::ApiError,
    model::employee::{Employee, NewEmployee},
};
use sqlx::{SqlitePool, error::DatabaseError};
use tracing::{debug, info, instrument, warn};

pub const DUPLICATE_ID: &str = "Employee ID already exists";
pub const DUPLICATE_EMAIL: &str = "Email already exists";
pub const NOT_FOUND: &str = "Employee not found";

pub(crate) async fn exists(pool: &SqlitePool, employee_id: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_scalar::<_, i64>("SELECT 1 FROM employees WHERE employee_id = ? LIMIT 1")
        .bind(employee_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

async fn email_taken(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_scalar::<_, i64>("SELECT 1 FROM employees WHERE email = ? LIMIT 1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Inserts a new employee after checking id and email uniqueness.
///
/// The pre-checks pick the error message; the table constraints are what
/// actually guarantee uniqueness when two requests race.
#[instrument(name = "add_employee", skip(pool, new), fields(employee_id = %new.employee_id))]
pub async fn add_employee(pool: &SqlitePool, new: &NewEmployee) -> Result<(), ApiError> {
    if exists(pool, &new.employee_id).await? {
        warn!("Rejected duplicate employee id");
        return Err(ApiError::conflict(DUPLICATE_ID));
    }

    let email = new.normalized_email();

    if email_taken(pool, &email).await? {
        warn!("Rejected duplicate email");
        return Err(ApiError::conflict(DUPLICATE_EMAIL));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO employees (employee_id, full_name, email, department)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&new.employee_id)
    .bind(&new.full_name)
    .bind(&email)
    .bind(&new.department)
    .execute(pool)
    .await;

    match result {
        Ok(_) => {
            info!("Employee added");
            Ok(())
        }
        Err(sqlx::Error::Database(db_err)) => match insert_conflict(db_err.as_ref()) {
            Some(conflict) => {
                warn!(error = %db_err, "Insert lost a uniqueness race");
                Err(conflict)
            }
            None => Err(sqlx::Error::Database(db_err).into()),
        },
        Err(e) => Err(e.into()),
    }
}

/// Maps a unique violation on `employees` to the matching conflict.
fn insert_conflict(db_err: &dyn DatabaseError) -> Option<ApiError> {
    if !db_err.is_unique_violation() {
        return None;
    }
    if db_err.message().contains("employees.email") {
        Some(ApiError::conflict(DUPLICATE_EMAIL))
    } else {
        Some(ApiError::conflict(DUPLICATE_ID))
    }
}

/// All employees in insertion order.
pub async fn list_employees(pool: &SqlitePool) -> Result<Vec<Employee>, ApiError> {
    let sql = "SELECT employee_id, full_name, email, department FROM employees ORDER BY rowid";
    debug!(sql, "Fetching employees");

    let employees = sqlx::query_as::<_, Employee>(sql).fetch_all(pool).await?;
    Ok(employees)
}

/// Deletes an employee together with every attendance row that references it.
///
/// Both deletes share one transaction and write before anything is read, so
/// the write lock is taken up front. An unknown id drops the transaction,
/// which rolls back.
#[instrument(name = "delete_employee", skip(pool))]
pub async fn delete_employee(pool: &SqlitePool, employee_id: &str) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
        .bind(employee_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let deleted = sqlx::query("DELETE FROM employees WHERE employee_id = ?")
        .bind(employee_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if deleted == 0 {
        warn!("Delete requested for unknown employee");
        return Err(ApiError::not_found(NOT_FOUND));
    }

    tx.commit().await?;
    info!(attendance_removed = removed, "Employee deleted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn pool() -> SqlitePool {
        db::init_db("sqlite::memory:", 1)
            .await
            .expect("in-memory database")
    }

    async fn raw_insert(pool: &SqlitePool, id: &str, email: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO employees VALUES (?, 'Ann', ?, 'Eng')")
            .bind(id)
            .bind(email)
            .execute(pool)
            .await?;
        Ok(())
    }

    async fn conflict_for(pool: &SqlitePool, id: &str, email: &str) -> Option<ApiError> {
        match raw_insert(pool, id, email).await {
            Err(sqlx::Error::Database(db_err)) => insert_conflict(db_err.as_ref()),
            other => panic!("expected a database error, got {other:?}"),
        }
    }

    fn new_employee(id: &str, email: &str) -> NewEmployee {
        NewEmployee {
            employee_id: id.into(),
            full_name: "Ann".into(),
            email: email.into(),
            department: "Eng".into(),
        }
    }

    #[actix_web::test]
    async fn duplicate_id_constraint_maps_to_id_conflict() {
        let pool = pool().await;
        raw_insert(&pool, "E1", "ann@x.com").await.unwrap();

        let err = conflict_for(&pool, "E1", "other@x.com").await;
        assert!(matches!(err, Some(ApiError::Conflict(ref msg)) if msg == DUPLICATE_ID));
    }

    #[actix_web::test]
    async fn duplicate_email_constraint_maps_to_email_conflict() {
        let pool = pool().await;
        raw_insert(&pool, "E1", "ann@x.com").await.unwrap();

        let err = conflict_for(&pool, "E2", "ann@x.com").await;
        assert!(matches!(err, Some(ApiError::Conflict(ref msg)) if msg == DUPLICATE_EMAIL));
    }

    #[actix_web::test]
    async fn other_constraint_errors_are_not_conflicts() {
        let pool = pool().await;
        let err = sqlx::query("INSERT INTO employees (employee_id) VALUES ('E1')")
            .execute(&pool)
            .await
            .unwrap_err();
        match err {
            sqlx::Error::Database(db_err) => assert!(insert_conflict(db_err.as_ref()).is_none()),
            other => panic!("expected a database error, got {other:?}"),
        }
    }

    #[actix_web::test]
    async fn email_domain_case_does_not_make_a_new_identity() {
        let pool = pool().await;
        add_employee(&pool, &new_employee("E1", "ann@x.com")).await.unwrap();

        let err = add_employee(&pool, &new_employee("E2", "ann@X.COM")).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(ref msg) if msg == DUPLICATE_EMAIL));

        let stored = list_employees(&pool).await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[actix_web::test]
    async fn stored_email_has_lowercase_domain() {
        let pool = pool().await;
        add_employee(&pool, &new_employee("E1", "Ann@Example.COM")).await.unwrap();

        let stored = list_employees(&pool).await.unwrap();
        assert_eq!(stored[0].email, "Ann@example.com");
    }

    #[actix_web::test]
    async fn delete_removes_attendance_and_reports_unknown_ids() {
        let pool = pool().await;
        add_employee(&pool, &new_employee("E1", "ann@x.com")).await.unwrap();
        add_employee(&pool, &new_employee("E2", "bob@x.com")).await.unwrap();
        for (id, emp) in [("a", "E1"), ("b", "E2")] {
            sqlx::query("INSERT INTO attendance VALUES (?, ?, '2024-01-01', 'Present')")
                .bind(id)
                .bind(emp)
                .execute(&pool)
                .await
                .unwrap();
        }

        delete_employee(&pool, "E1").await.unwrap();

        let left: Vec<String> = sqlx::query_scalar("SELECT employee_id FROM attendance")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(left, vec!["E2".to_string()]);

        let err = delete_employee(&pool, "E1").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref msg) if msg == NOT_FOUND));
    }
}
