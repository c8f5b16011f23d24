use crate::core::age::age_in_ranges;
use crate::models::{Dog, Preferences, SwipeFilter, SwipeStatus};
use std::collections::HashMap;
use std::ops::Range;

/// Check if a dog matches the user's gender, size and age preferences
///
/// `age_ranges` is the bucket expansion of `preferences.age`, computed once
/// per request by the caller.
#[inline]
pub fn matches_preferences(
    dog: &Dog,
    preferences: &Preferences,
    age_ranges: &[Range<i32>],
) -> bool {
    if !preferences.gender.contains(&dog.gender) {
        return false;
    }

    if !preferences.size.contains(&dog.size) {
        return false;
    }

    age_in_ranges(dog.age, age_ranges)
}

/// Check a dog against the user's swipe decisions.
///
/// Liked and disliked require a record with that exact status; undecided
/// requires no record at all.
#[inline]
pub fn matches_status(
    dog_id: i64,
    swipes: &HashMap<i64, SwipeStatus>,
    filter: SwipeFilter,
) -> bool {
    match filter.status() {
        Some(status) => swipes.get(&dog_id) == Some(&status),
        None => !swipes.contains_key(&dog_id),
    }
}
