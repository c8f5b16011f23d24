use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{DogChanges, Gender, NewDog, Size};

/// Request to register a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request to obtain a bearer token
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Full dog payload, used for create and full update
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DogRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub image_filename: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub breed: String,
    pub age: i32,
    pub gender: Gender,
    pub size: Size,
    #[serde(default)]
    pub sterilized: bool,
}

impl From<DogRequest> for NewDog {
    fn from(req: DogRequest) -> Self {
        NewDog {
            name: req.name,
            image_filename: req.image_filename,
            breed: req.breed,
            age: req.age,
            gender: req.gender,
            size: req.size,
            sterilized: req.sterilized,
        }
    }
}

/// Partial dog payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DogPatchRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub image_filename: Option<String>,
    #[validate(length(max = 100))]
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub size: Option<Size>,
    pub sterilized: Option<bool>,
}

impl From<DogPatchRequest> for DogChanges {
    fn from(req: DogPatchRequest) -> Self {
        DogChanges {
            name: req.name,
            image_filename: req.image_filename,
            breed: req.breed,
            age: req.age,
            gender: req.gender,
            size: req.size,
            sterilized: req.sterilized,
        }
    }
}

/// Full replacement of a user's preferences, as comma-joined token lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesRequest {
    pub age: String,
    pub gender: String,
    pub size: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dog_request_defaults() {
        let req: DogRequest = serde_json::from_str(
            r#"{"name":"Muffin","image_filename":"3.jpg","age":24,"gender":"f","size":"xl"}"#,
        )
        .unwrap();

        assert_eq!(req.breed, "");
        assert!(!req.sterilized);
        assert_eq!(req.size, Size::ExtraLarge);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_dog_request_rejects_unknown_size() {
        let res: Result<DogRequest, _> = serde_json::from_str(
            r#"{"name":"Muffin","image_filename":"3.jpg","age":24,"gender":"f","size":"huge"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_dog_request_name_too_long() {
        let req = DogRequest {
            name: "x".repeat(101),
            image_filename: "1.jpg".to_string(),
            breed: String::new(),
            age: 3,
            gender: Gender::Male,
            size: Size::Small,
            sterilized: false,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_patch_request_partial() {
        let req: DogPatchRequest = serde_json::from_str(r#"{"name":"Bjorn"}"#).unwrap();
        assert!(req.validate().is_ok());

        let changes = DogChanges::from(req);
        assert_eq!(changes.name.as_deref(), Some("Bjorn"));
        assert!(changes.age.is_none());
    }

    #[test]
    fn test_register_request_empty_password() {
        let req = RegisterRequest {
            username: "username".to_string(),
            password: String::new(),
        };
        assert!(req.validate().is_err());
    }
}
