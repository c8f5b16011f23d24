//! Pup Match - dog adoption matching service
//!
//! Users swipe on dog profiles, keep coarse preferences (age bucket, gender,
//! size) and ask for the next unseen dog matching them.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, expand_age_ranges};
pub use error::ApiError;
pub use models::{Dog, Preferences, SwipeFilter, SwipeStatus};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let prefs = Preferences::defaults(1, 1);
        assert_eq!(expand_age_ranges(&prefs.age), vec![0..200]);
    }
}
