// Criterion benchmarks for Pup Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pup_match::core::{expand_age_ranges, Matcher};
use pup_match::models::{parse_tokens, Dog, Gender, Preferences, Size, SwipeFilter, SwipeStatus};
use std::collections::HashMap;

fn create_dog(id: i64) -> Dog {
    Dog {
        id,
        name: format!("Dog {}", id),
        image_filename: format!("{}.jpg", id),
        breed: "Mixed".to_string(),
        age: (id % 220) as i32,
        gender: if id % 2 == 0 { Gender::Female } else { Gender::Male },
        size: match id % 4 {
            0 => Size::Small,
            1 => Size::Medium,
            2 => Size::Large,
            _ => Size::ExtraLarge,
        },
        sterilized: id % 3 == 0,
    }
}

fn create_preferences() -> Preferences {
    Preferences {
        id: 1,
        user_id: 1,
        age: parse_tokens("b,y,s"),
        gender: parse_tokens("f"),
        size: parse_tokens("s,l,xl"),
    }
}

fn create_swipes(count: i64) -> HashMap<i64, SwipeStatus> {
    (0..count)
        .filter(|id| id % 5 == 0)
        .map(|id| {
            let status = if id % 10 == 0 { SwipeStatus::Liked } else { SwipeStatus::Disliked };
            (id, status)
        })
        .collect()
}

fn bench_expand_age_ranges(c: &mut Criterion) {
    let prefs = create_preferences();

    c.bench_function("expand_age_ranges", |b| {
        b.iter(|| expand_age_ranges(black_box(&prefs.age)));
    });
}

fn bench_next_after(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_after");
    let matcher = Matcher::new();
    let prefs = create_preferences();

    for size in [100i64, 1_000, 10_000] {
        let dogs: Vec<Dog> = (1..=size).map(create_dog).collect();
        let swipes = create_swipes(size);

        for filter in [SwipeFilter::Undecided, SwipeFilter::Liked] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", filter), size),
                &dogs,
                |b, dogs| {
                    b.iter(|| {
                        matcher.next_after(
                            black_box(&prefs),
                            black_box(&swipes),
                            dogs,
                            black_box(size / 2),
                            filter,
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_expand_age_ranges, bench_next_after);
criterion_main!(benches);
