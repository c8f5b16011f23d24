use crate::models::{Dog, Preferences, SwipeFilter, SwipeStatus};
use crate::core::{
    age::expand_age_ranges,
    filters::{matches_preferences, matches_status},
};
use std::collections::HashMap;

/// Next-dog selection over a user's preferences and swipe history
///
/// # Pipeline Stages
/// 1. Age bucket expansion
/// 2. Preference filtering (gender, size, age)
/// 3. Swipe status filtering
/// 4. Next-after selection with wraparound
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// Find the dog with the smallest id greater than `after_id` among the
    /// candidates passing the preference and status filters.
    ///
    /// When no such dog exists the smallest matching id is returned instead,
    /// so browsing wraps around to the first match. `None` means nothing
    /// matches at all.
    ///
    /// # Arguments
    /// * `preferences` - The user's preferences
    /// * `swipes` - The user's swipe records, keyed by dog id
    /// * `candidates` - Dogs to choose from, in any order
    /// * `after_id` - Id of the dog currently being viewed
    /// * `filter` - Which swipe status the result must have
    pub fn next_after<'a, I>(
        &self,
        preferences: &Preferences,
        swipes: &HashMap<i64, SwipeStatus>,
        candidates: I,
        after_id: i64,
        filter: SwipeFilter,
    ) -> Option<&'a Dog>
    where
        I: IntoIterator<Item = &'a Dog>,
    {
        let age_ranges = expand_age_ranges(&preferences.age);

        let mut first: Option<&Dog> = None;
        let mut next: Option<&Dog> = None;

        for dog in candidates
            .into_iter()
            .filter(|dog| matches_preferences(dog, preferences, &age_ranges))
            .filter(|dog| matches_status(dog.id, swipes, filter))
        {
            if first.map_or(true, |f| dog.id < f.id) {
                first = Some(dog);
            }
            if dog.id > after_id && next.map_or(true, |n| dog.id < n.id) {
                next = Some(dog);
            }
        }

        next.or(first)
    }
}
