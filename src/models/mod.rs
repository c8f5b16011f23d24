// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    join_tokens, parse_tokens, AgeBucket, Dog, DogChanges, Gender, NewDog, Preferences, Size,
    SwipeFilter, SwipeStatus, Token, User,
};
pub use requests::{DogPatchRequest, DogRequest, LoginRequest, PreferencesRequest, RegisterRequest};
pub use responses::{ErrorResponse, HealthResponse, PreferencesResponse, SwipeResponse, TokenResponse};
