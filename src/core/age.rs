use crate::models::AgeBucket;
use std::collections::BTreeSet;
use std::ops::Range;

impl AgeBucket {
    /// Half-open month interval covered by this bucket
    pub const fn months(self) -> Range<i32> {
        match self {
            AgeBucket::Baby => 0..10,
            AgeBucket::Young => 10..30,
            AgeBucket::Adult => 30..60,
            AgeBucket::Senior => 60..200,
        }
    }

    /// Bucket containing `age` months, if any
    #[cfg(test)]
    fn for_age(age: i32) -> Option<Self> {
        [AgeBucket::Baby, AgeBucket::Young, AgeBucket::Adult, AgeBucket::Senior]
            .into_iter()
            .find(|bucket| bucket.months().contains(&age))
    }
}

/// Expand selected buckets into a sorted union of month ranges.
///
/// Adjacent buckets are merged, so `{baby, young, senior}` becomes
/// `[0..30, 60..200]`. Ages outside `0..200` are never covered.
pub fn expand_age_ranges(buckets: &BTreeSet<AgeBucket>) -> Vec<Range<i32>> {
    let mut ranges: Vec<Range<i32>> = Vec::with_capacity(buckets.len());

    // BTreeSet iterates in bucket order, which is also ascending by month
    for bucket in buckets {
        let next = bucket.months();
        match ranges.last_mut() {
            Some(last) if last.end == next.start => last.end = next.end,
            _ => ranges.push(next),
        }
    }

    ranges
}

#[inline]
pub fn age_in_ranges(age: i32, ranges: &[Range<i32>]) -> bool {
    ranges.iter().any(|r| r.contains(&age))
}
