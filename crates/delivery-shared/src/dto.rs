//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gender as sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenderDto {
    Male,
    Female,
}

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub full_name: String,
    pub password: String,
    pub email: String,
    pub address: Option<String>,
    pub birth_date: DateTime<Utc>,
    pub gender: GenderDto,
    pub phone_number: Option<String>,
}

/// Request to edit the caller's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditUserRequest {
    pub full_name: String,
    pub birth_date: DateTime<Utc>,
    pub gender: GenderDto,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response carrying a signed bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Response containing a user's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: String,
    pub full_name: String,
    pub birth_date: DateTime<Utc>,
    pub gender: GenderDto,
    pub address: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
}

/// Request to place an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRequest {
    pub delivery_time: DateTime<Utc>,
    pub address: String,
}

/// Order lifecycle as sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatusDto {
    InProcess,
    Delivered,
}

/// Response describing an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub delivery_time: DateTime<Utc>,
    pub order_time: DateTime<Utc>,
    pub address: String,
    pub status: OrderStatusDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_uses_camel_case() {
        let body = r#"{
            "fullName": "Alice",
            "password": "pw1",
            "email": "alice@example.com",
            "birthDate": "1990-05-04T00:00:00Z",
            "gender": "Female",
            "phoneNumber": "+7 900 000 00 00"
        }"#;

        let req: RegisterUserRequest = serde_json::from_str(body).unwrap();

        assert_eq!(req.full_name, "Alice");
        assert_eq!(req.gender, GenderDto::Female);
        assert!(req.address.is_none());
        assert_eq!(req.phone_number.as_deref(), Some("+7 900 000 00 00"));
    }

    #[test]
    fn test_unknown_gender_is_rejected() {
        let body = r#"{"fullName":"A","birthDate":"1990-05-04T00:00:00Z","gender":"Other"}"#;

        assert!(serde_json::from_str::<EditUserRequest>(body).is_err());
    }
}
