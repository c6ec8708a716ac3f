use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Attendance {
    #[schema(example = "6f1c2a9e-8d3b-4c57-9b0e-2d4f5a6b7c8d")]
    pub id: String,
    #[schema(example = "E1")]
    pub employee_id: String,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Present")]
    pub status: String,
}

/// Request body for marking attendance. `status` is free text; the UI sends
/// "Present" or "Absent".
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct NewAttendance {
    #[validate(length(min = 1, message = "employee_id must not be empty"))]
    #[schema(example = "E1")]
    pub employee_id: String,
    #[schema(example = "2024-01-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Present")]
    pub status: String,
}
