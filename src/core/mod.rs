// Core algorithm exports
pub mod age;
pub mod filters;
pub mod matcher;

pub use age::{age_in_ranges, expand_age_ranges};
pub use filters::{matches_preferences, matches_status};
pub use matcher::Matcher;
