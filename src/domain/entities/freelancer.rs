use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;

use crate::domain::validation::not_blank;
use crate::entities::null_as_default;

pub const ACCOUNT_STATUS_ACTIVE: &str = "ACTIVE";

/// Login identity shared by every kind of registered user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub account_status: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Freelancer {
    #[sqlx(flatten)]
    pub account: Account,
    pub specialization: String,
    pub years_of_experience: Option<i32>,
    pub hourly_rate: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct FreelancerInsert {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub specialization: String,
    pub years_of_experience: Option<i32>,
    pub hourly_rate: Option<f64>,
    pub account_status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub specialization: String,
    pub years_of_experience: Option<i32>,
    pub hourly_rate: Option<f64>,
}

impl From<Freelancer> for FreelancerResponse {
    fn from(freelancer: Freelancer) -> Self {
        FreelancerResponse {
            id: freelancer.account.id,
            name: freelancer.account.name,
            email: freelancer.account.email,
            specialization: freelancer.specialization,
            years_of_experience: freelancer.years_of_experience,
            hourly_rate: freelancer.hourly_rate,
        }
    }
}

// Missing or null strings deserialize as "" so they surface as field
// errors instead of a body parse failure.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterFreelancerRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(
        custom(function = "not_blank", message = "Email is required"),
        email(message = "Email should be valid")
    )]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(
        custom(function = "not_blank", message = "Password is required"),
        length(min = 6, message = "Password should be at least 6 characters")
    )]
    pub password: String,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "not_blank", message = "Specialization is required"))]
    pub specialization: String,

    #[serde(default)]
    pub years_of_experience: Option<i32>,

    #[serde(default)]
    pub hourly_rate: Option<f64>,
}

impl RegisterFreelancerRequest {
    pub fn prepare_for_insert(&self, password_hash: String) -> FreelancerInsert {
        FreelancerInsert {
            name: self.name.clone(),
            email: self.email.clone(),
            password_hash,
            specialization: self.specialization.clone(),
            years_of_experience: self.years_of_experience,
            hourly_rate: self.hourly_rate,
            account_status: ACCOUNT_STATUS_ACTIVE.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterFreelancerRequest {
        RegisterFreelancerRequest {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            password: "secret1".into(),
            specialization: "Backend".into(),
            years_of_experience: None,
            hourly_rate: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        let mut req = request();
        req.password = "12345".into();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn missing_fields_deserialize_to_validation_failures() {
        let req: RegisterFreelancerRequest =
            serde_json::from_str(r#"{"email":"not-an-email"}"#).unwrap();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("specialization"));
    }

    #[test]
    fn null_required_fields_report_field_errors() {
        let req: RegisterFreelancerRequest = serde_json::from_str(
            r#"{"name":null,"email":null,"password":null,"specialization":null}"#,
        )
        .unwrap();

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["name"][0].message.as_deref(), Some("Name is required"));
        assert_eq!(fields["specialization"][0].message.as_deref(), Some("Specialization is required"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn insert_keeps_submitted_text_as_is() {
        let mut req = request();
        req.name = " Ana Lima ".into();
        req.specialization = "Backend ".into();

        let insert = req.prepare_for_insert("hash".into());
        assert_eq!(insert.name, " Ana Lima ");
        assert_eq!(insert.specialization, "Backend ");
    }

    #[test]
    fn insert_is_active_and_keeps_optional_fields() {
        let mut req = request();
        req.years_of_experience = Some(4);
        req.hourly_rate = Some(55.5);

        let insert = req.prepare_for_insert("hash".into());
        assert_eq!(insert.account_status, ACCOUNT_STATUS_ACTIVE);
        assert_eq!(insert.password_hash, "hash");
        assert_eq!(insert.years_of_experience, Some(4));
        assert_eq!(insert.hourly_rate, Some(55.5));
    }

    #[test]
    fn response_serializes_camel_case_without_password() {
        let freelancer = Freelancer {
            account: Account {
                id: 1,
                name: "Ana".into(),
                email: "ana@x.com".into(),
                password_hash: "$argon2id$secret".into(),
                created_at: Utc::now(),
                last_login: None,
                account_status: ACCOUNT_STATUS_ACTIVE.into(),
            },
            specialization: "Backend".into(),
            years_of_experience: Some(3),
            hourly_rate: None,
        };

        let json = serde_json::to_value(FreelancerResponse::from(freelancer)).unwrap();
        assert_eq!(json["yearsOfExperience"], 3);
        assert!(json["hourlyRate"].is_null());
        assert!(json.get("password").is_none());
        assert!(!json.to_string().contains("argon2"));
    }
}
