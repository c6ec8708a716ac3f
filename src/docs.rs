use crate::model::attendance::{Attendance, NewAttendance};
use crate::model::employee::{Employee, NewEmployee};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A small human resource backend with two resources:

- **Employees**: add, list and delete. Employee IDs and emails are unique.
  Deleting an employee also deletes its attendance.
- **Attendance**: mark one record per employee per date and list an
  employee's history.

Errors are returned as `{"detail": "..."}` with 404, 409 or 422.
"#,
    ),
    paths(
        crate::api::index,

        crate::api::employee::add_employee,
        crate::api::employee::list_employees,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::get_attendance
    ),
    components(
        schemas(
            Employee,
            NewEmployee,
            Attendance,
            NewAttendance
        )
    ),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Attendance", description = "Attendance ledger APIs"),
    )
)]
pub struct ApiDoc;
