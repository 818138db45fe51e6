//! Integration tests for the full derivation pipeline.
//!
//! Exercises the one-way data flow from raw repetitions through
//! checkmarks to streaks, scores, and chart buckets, including the
//! sliding-window and numeric-target scenarios habit views depend on.

use tally_core::{
    BucketAggregator, BucketSize, CheckmarkGenerator, DayIndex, Frequency, Habit, Repetition,
    ScoreCalculator, StreakFinder, Weekday,
};

fn day(value: i64) -> DayIndex {
    DayIndex::new(value)
}

fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_daily_habit_full_pipeline() {
    setup();
    // Daily habit checked on days 0..=2, then neglected through day 4.
    let habit = Habit::boolean("Meditate", Frequency::daily());
    let reps: Vec<Repetition> = (0..3).map(|d| Repetition::yes(day(d))).collect();

    let generator = CheckmarkGenerator::for_habit(&habit);
    let marks = generator.generate(&reps, day(0), day(4)).unwrap();
    let codes: Vec<u8> = marks.iter().map(|m| m.code().unwrap()).collect();
    assert_eq!(codes, vec![2, 2, 2, 0, 0]);

    let streaks = StreakFinder::for_habit(&habit).find(&marks);
    assert_eq!(streaks.len(), 1);
    let best = streaks.best(1)[0];
    assert_eq!((best.start, best.end, best.length()), (day(0), day(2), 3));

    let scores = ScoreCalculator::for_habit(&habit).compute(&marks);
    assert_eq!(scores.len(), 5);
    assert!(scores[1].value > scores[0].value);
    assert!(scores[2].value > scores[1].value);
    // Strictly decreasing once the habit is neglected.
    assert!(scores[3].value < scores[2].value);
    assert!(scores[4].value < scores[3].value);
}

#[test]
fn test_weekly_habit_block_satisfied() {
    setup();
    // Two completions against a 2-per-week target: the block is fully
    // satisfied and both days count. Day 0 is a Thursday, so anchoring
    // the week on Thursday makes [0, 6] one block.
    let habit = Habit::boolean("Gym", Frequency::weekly(2).unwrap())
        .with_first_weekday(Weekday::Thursday);
    let reps = vec![Repetition::yes(day(0)), Repetition::yes(day(3))];

    let marks = CheckmarkGenerator::for_habit(&habit)
        .generate(&reps, day(0), day(6))
        .unwrap();
    assert!(marks[0].value.is_counted_completion());
    assert!(marks[3].value.is_counted_completion());
}

#[test]
fn test_weekly_habit_surplus_is_uncounted() {
    setup();
    let habit = Habit::boolean("Gym", Frequency::weekly(3).unwrap())
        .with_first_weekday(Weekday::Thursday);
    let reps: Vec<Repetition> = (0..4).map(|d| Repetition::yes(day(d))).collect();

    let marks = CheckmarkGenerator::for_habit(&habit)
        .generate(&reps, day(0), day(6))
        .unwrap();
    assert!(marks[0].value.is_yes() && !marks[0].value.is_counted_completion());
    assert!(marks[1].value.is_counted_completion());
    assert!(marks[2].value.is_counted_completion());
    assert!(marks[3].value.is_counted_completion());

    // The surplus check still keeps the streak alive.
    let streaks = StreakFinder::for_habit(&habit).find(&marks);
    assert_eq!(streaks.best(1)[0].length(), 4);
}

#[test]
fn test_numeric_habit_pipeline() {
    setup();
    // Target of 10 units per day; day 0 falls short, days 1 and 2 meet
    // or exceed it.
    let habit = Habit::numeric("Read", 10.0, "pages");
    let reps = vec![
        Repetition::quantity(day(0), 5.0),
        Repetition::quantity(day(1), 10.0),
        Repetition::quantity(day(2), 15.0),
    ];

    let generator = CheckmarkGenerator::for_habit(&habit);
    let marks = generator.generate(&reps, day(0), day(2)).unwrap();
    let quantities: Vec<f64> = marks.iter().map(|m| m.value.quantity().unwrap()).collect();
    assert_eq!(quantities, vec![5.0, 10.0, 15.0]);

    // Only the at-target days form a streak.
    let streaks = StreakFinder::for_habit(&habit).find(&marks);
    assert_eq!(streaks.len(), 1);
    let best = streaks.best(1)[0];
    assert_eq!((best.start, best.end), (day(1), day(2)));

    // The over-target day contributes no more than a full completion:
    // day 2's gain equals day 1's gain under the same decay.
    let calculator = ScoreCalculator::for_habit(&habit);
    let scores = calculator.compute(&marks);
    let decay = calculator.decay_per_day();
    let gain1 = scores[1].value - scores[0].value * decay;
    let gain2 = scores[2].value - scores[1].value * decay;
    assert!((gain1 - gain2).abs() < 1e-12);
    assert!((gain1 - (1.0 - decay)).abs() < 1e-12);
}

#[test]
fn test_skip_bridges_but_never_completes() {
    setup();
    let habit = Habit::boolean("Stretch", Frequency::daily());
    let reps = vec![
        Repetition::yes(day(0)),
        Repetition::skip(day(1)),
        Repetition::yes(day(2)),
        Repetition::skip(day(4)),
        Repetition::skip(day(5)),
    ];

    let marks = CheckmarkGenerator::for_habit(&habit)
        .generate(&reps, day(0), day(5))
        .unwrap();
    let streaks = StreakFinder::for_habit(&habit).find(&marks);

    // Days 0-2 form one streak across the skip; the trailing skip-only
    // run after the day-3 break is discarded.
    assert_eq!(streaks.len(), 1);
    let best = streaks.best(1)[0];
    assert_eq!((best.start, best.end, best.length()), (day(0), day(2), 3));
}

#[test]
fn test_chart_buckets_preserve_totals() {
    setup();
    let habit = Habit::numeric("Pushups", 20.0, "reps");
    let reps: Vec<Repetition> = (0..365)
        .map(|d| Repetition::quantity(day(d), (d % 25) as f64))
        .collect();

    let generator = CheckmarkGenerator::for_habit(&habit);
    let marks = generator.generate(&reps, day(0), day(364)).unwrap();
    let daily_total: f64 = marks.iter().filter_map(|m| m.value.quantity()).sum();

    let aggregator = BucketAggregator::for_habit(&habit);
    for size in BucketSize::ALL {
        let buckets = aggregator.aggregate(&marks, size);
        let total: f64 = buckets.iter().filter_map(|m| m.value.quantity()).sum();
        assert!(
            (total - daily_total).abs() < 1e-9,
            "bucket size {:?} changed the total",
            size
        );
        assert!(buckets.len() <= marks.len());
    }

    // Weekly target projection: 20 per day -> 140 per week.
    assert_eq!(aggregator.scaled_target(BucketSize::Week), 140.0);
}

#[test]
fn test_derivation_is_deterministic() {
    setup();
    let habit = Habit::boolean("Journal", Frequency::weekly(4).unwrap());
    let reps: Vec<Repetition> = (0..60)
        .filter(|d| d % 3 != 0)
        .map(|d| Repetition::yes(day(d)))
        .collect();

    let generator = CheckmarkGenerator::for_habit(&habit);
    let first = generator.generate(&reps, day(0), day(59)).unwrap();
    let second = generator.generate(&reps, day(0), day(59)).unwrap();
    assert_eq!(first, second);

    let finder = StreakFinder::for_habit(&habit);
    assert_eq!(finder.find(&first).all(), finder.find(&second).all());
}

#[test]
fn test_disjoint_ranges_agree_on_block_boundaries() {
    setup();
    // Generating the same habit over two overlapping windows must put
    // every day in the same block, so the counted days agree wherever
    // the windows overlap.
    let habit = Habit::boolean("Swim", Frequency::weekly(2).unwrap())
        .with_first_weekday(Weekday::Monday);
    let reps: Vec<Repetition> = [3, 5, 9, 12, 13, 17].iter().map(|&d| Repetition::yes(day(d))).collect();

    let generator = CheckmarkGenerator::for_habit(&habit);
    let wide = generator.generate(&reps, day(0), day(20)).unwrap();
    let narrow = generator.generate(&reps, day(7), day(20)).unwrap();

    for mark in &narrow {
        let other = wide
            .iter()
            .find(|candidate| candidate.day == mark.day)
            .unwrap();
        assert_eq!(mark.value, other.value);
    }
}
