use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "employee_id": "E1",
        "full_name": "Ann Smith",
        "email": "ann@example.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    #[schema(example = "E1")]
    pub employee_id: String,

    #[schema(example = "Ann Smith")]
    pub full_name: String,

    #[schema(example = "ann@example.com", format = "email")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,
}

/// Request body for adding an employee.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct NewEmployee {
    #[validate(length(min = 1, message = "employee_id must not be empty"))]
    #[schema(example = "E1")]
    pub employee_id: String,
    #[schema(example = "Ann Smith")]
    pub full_name: String,
    #[validate(email(message = "value is not a valid email address"))]
    #[schema(example = "ann@example.com", format = "email")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
}

impl NewEmployee {
    /// The email with its domain lowercased; the local part is kept as sent.
    /// This is the form that is stored and checked for uniqueness.
    pub fn normalized_email(&self) -> String {
        let email = self.email.trim();
        match email.rsplit_once('@') {
            Some((local, domain)) => format!("{local}@{}", domain.to_ascii_lowercase()),
            None => email.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_email(email: &str) -> NewEmployee {
        NewEmployee {
            employee_id: "E1".into(),
            full_name: "Ann".into(),
            email: email.into(),
            department: "Eng".into(),
        }
    }

    #[test]
    fn domain_is_lowercased() {
        assert_eq!(with_email("ann@X.COM").normalized_email(), "ann@x.com");
        assert_eq!(with_email("ann@Mail.Example.org").normalized_email(), "ann@mail.example.org");
    }

    #[test]
    fn local_part_is_preserved() {
        assert_eq!(with_email("Ann.Smith@X.com").normalized_email(), "Ann.Smith@x.com");
    }
}
