use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Identity record held by the principal store.
///
/// Created at registration and never mutated afterwards except by
/// deletion. The password hash is a PHC-formatted Argon2id string and is
/// never serialized out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
}

// Request/Response DTOs

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username or email.
    pub identifier: String,
    pub password: String,
}

/// Token pair returned by login and refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_valid_register_request() {
        let req = RegisterRequest {
            email: "user@example.com".to_string(),
            username: "valid_user".to_string(),
            password: "CorrectHorse9!".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_invalid_email_fails_validation() {
        for invalid in ["", "not-an-email", "@example.com", "user@"] {
            let req = RegisterRequest {
                email: invalid.to_string(),
                username: "valid_user".to_string(),
                password: "CorrectHorse9!".to_string(),
            };
            let errors = req.validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key("email"),
                "email '{}' should fail validation",
                invalid
            );
        }
    }

    #[test]
    fn test_short_username_fails_validation() {
        let req = RegisterRequest {
            email: "user@example.com".to_string(),
            username: "ab".to_string(),
            password: "CorrectHorse9!".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let principal = Principal {
            id: Uuid::new_v4(),
            username: "someone".to_string(),
            email: "someone@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$secret".to_string(),
            admin: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&principal).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }
}
