//! Multi-criteria fitness of a weekly schedule.
//!
//! Four criteria, each normalized to `[0, 1]`:
//!
//! | Criterion | Measures |
//! |-----------|----------|
//! | diversity | distinct training groups vs. a target band |
//! | rest spacing | consecutive training days use different groups |
//! | availability | zero-minute days are rest days |
//! | user prefs | weekly cardio minimum, legs bonus |
//!
//! The score is their weighted sum (higher is better). Evaluation is pure:
//! same genome and configuration, same score.

use serde::Serialize;

use crate::encoding::decode;
use crate::error::EncodingError;
use crate::models::{Availability, DecodedSchedule, DiversityTarget, Preferences};
use crate::settings::RoutineConfig;

/// Per-criterion scores of one schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitnessBreakdown {
    pub diversity: f64,
    pub rest_spacing: f64,
    pub availability: f64,
    pub user_prefs: f64,
    /// Weighted sum of the four criteria.
    pub total: f64,
}

/// Plateau score on the number of distinct training groups.
///
/// Ramps up to 1.0 at `low`, stays there through `high`, then ramps down,
/// floored at 0.0. An all-rest week scores 0.0.
pub fn diversity_score(schedule: &DecodedSchedule, rest: &str, target: DiversityTarget) -> f64 {
    let unique = schedule.distinct_training_groups(rest) as f64;
    let low = f64::from(target.low);
    let high = f64::from(target.high);

    if unique == 0.0 {
        0.0
    } else if unique < low {
        (unique / low.max(1.0)).max(0.0)
    } else if unique > high {
        (1.0 - (unique - high) / high.max(1.0)).max(0.0)
    } else {
        1.0
    }
}

/// Fraction of consecutive training-day pairs that change group.
///
/// Pairs touching a rest day are skipped; with no pair left the criterion
/// holds vacuously (1.0).
pub fn rest_spacing_score(schedule: &DecodedSchedule, rest: &str) -> f64 {
    let (considered, ok) = schedule
        .adjacent_pairs()
        .filter(|(a, b)| *a != rest && *b != rest)
        .fold((0usize, 0usize), |(total, ok), (a, b)| {
            (total + 1, ok + usize::from(a != b))
        });

    if considered == 0 {
        1.0
    } else {
        ok as f64 / considered as f64
    }
}

/// Fraction of zero-availability days assigned the rest group.
///
/// 1.0 when no day is blocked.
pub fn availability_score(schedule: &DecodedSchedule, rest: &str, availability: &Availability) -> f64 {
    let (blocked, rested) = availability
        .blocked_days()
        .fold((0usize, 0usize), |(total, ok), day| {
            (total + 1, ok + usize::from(schedule.get(day) == Some(rest)))
        });

    if blocked == 0 {
        1.0
    } else {
        rested as f64 / blocked as f64
    }
}

/// Cardio requirement plus legs bonus, capped at 1.0.
///
/// Without a cardio minimum the requirement contributes a flat 0.5. The
/// bonus is added as given; [`RoutineConfig::validate`] rejects negative
/// bonuses, so validated configurations stay within `[0, 1]`.
pub fn user_prefs_score(schedule: &DecodedSchedule, prefs: &Preferences) -> f64 {
    let mut score = match prefs.cardio_requirement() {
        None => 0.5,
        Some(required) => {
            let count = schedule.count(&prefs.cardio_group) as f64;
            let required = f64::from(required);
            if count >= required {
                1.0
            } else {
                (count / required).max(0.0)
            }
        }
    };

    if let Some(bonus) = prefs.legs_bonus() {
        if schedule.contains(&prefs.legs_group) {
            score += bonus;
        }
    }

    score.min(1.0)
}

/// Scores a decoded schedule criterion by criterion.
pub fn breakdown(schedule: &DecodedSchedule, config: &RoutineConfig) -> FitnessBreakdown {
    let rest = config.catalog.rest_group.as_str();
    let prefs = &config.preferences;
    let w = &config.weights;

    let diversity = diversity_score(schedule, rest, prefs.diversity_target);
    let rest_spacing = rest_spacing_score(schedule, rest);
    let availability = availability_score(schedule, rest, &config.availability);
    let user_prefs = user_prefs_score(schedule, prefs);

    FitnessBreakdown {
        diversity,
        rest_spacing,
        availability,
        user_prefs,
        total: w.diversity * diversity
            + w.rest_spacing * rest_spacing
            + w.availability * availability
            + w.user_prefs * user_prefs,
    }
}

/// Weighted score of a genome (higher is better).
///
/// Names are resolved through [`decode`], so out-of-catalog genes fail
/// with [`EncodingError`].
pub fn evaluate(genome: &[usize], config: &RoutineConfig) -> Result<f64, EncodingError> {
    Ok(evaluate_breakdown(genome, config)?.total)
}

/// [`evaluate`] with the per-criterion scores.
pub fn evaluate_breakdown(
    genome: &[usize],
    config: &RoutineConfig,
) -> Result<FitnessBreakdown, EncodingError> {
    let schedule = decode(genome, config)?;
    Ok(breakdown(&schedule, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::gene_space;
    use crate::models::{FitnessWeights, GroupCatalog, Weekday};

    const REST: &str = "Descanso";

    fn base_config() -> RoutineConfig {
        RoutineConfig::new(
            GroupCatalog::new(["Cardio", "Piernas", "Descanso"]),
            FitnessWeights::uniform(0.25),
        )
        .with_availability(Availability::new().with_minutes(Weekday::Sun, 0))
    }

    fn wide_config() -> RoutineConfig {
        RoutineConfig::new(
            GroupCatalog::new([
                "Pecho", "Espalda", "Piernas", "Hombros", "Brazos", "Cardio", "Core", "Descanso",
            ]),
            FitnessWeights::uniform(1.0),
        )
    }

    fn schedule(genome: &[usize], config: &RoutineConfig) -> DecodedSchedule {
        decode(genome, config).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    /// Genome with `unique` distinct training groups and rest elsewhere.
    fn genome_with_unique(unique: usize) -> [usize; 7] {
        let mut genome = [7usize; 7];
        for (i, gene) in genome.iter_mut().enumerate().take(unique) {
            *gene = i;
        }
        genome
    }

    // ---- diversity ----

    #[test]
    fn test_diversity_all_rest() {
        let config = wide_config();
        let s = schedule(&[7; 7], &config);
        assert_close(diversity_score(&s, REST, DiversityTarget::new(4, 5)), 0.0);
    }

    #[test]
    fn test_diversity_plateau() {
        let config = wide_config();
        let target = DiversityTarget::new(4, 5);
        let expected = [0.0, 0.25, 0.5, 0.75, 1.0, 1.0, 0.8, 0.6];
        for (unique, want) in expected.iter().enumerate() {
            let s = schedule(&genome_with_unique(unique), &config);
            assert_close(diversity_score(&s, REST, target), *want);
        }
    }

    #[test]
    fn test_diversity_unimodal() {
        let config = wide_config();
        for (low, high) in [(1, 1), (2, 3), (4, 5), (3, 7)] {
            let target = DiversityTarget::new(low, high);
            let scores: Vec<f64> = (1..=7)
                .map(|u| diversity_score(&schedule(&genome_with_unique(u), &config), REST, target))
                .collect();
            let peak = scores
                .iter()
                .position(|s| (*s - 1.0).abs() < 1e-12)
                .unwrap();
            for w in scores[..=peak].windows(2) {
                assert!(w[0] <= w[1]);
            }
            for w in scores[peak..].windows(2) {
                assert!(w[0] >= w[1]);
            }
            for (i, s) in scores.iter().enumerate() {
                let u = (i + 1) as u32;
                assert_eq!((*s - 1.0).abs() < 1e-12, (low..=high).contains(&u), "u={u}");
                assert!(*s >= 0.0);
            }
        }
    }

    #[test]
    fn test_diversity_zero_bounds_floor_at_one() {
        let config = wide_config();
        let s = schedule(&genome_with_unique(3), &config);
        // high == 0: 1 - (3 - 0) / 1, floored at 0
        assert_close(diversity_score(&s, REST, DiversityTarget::new(0, 0)), 0.0);
        let s = schedule(&genome_with_unique(1), &config);
        assert_close(diversity_score(&s, REST, DiversityTarget::new(0, 0)), 0.0);
        assert_close(diversity_score(&s, REST, DiversityTarget::new(0, 1)), 1.0);
    }

    // ---- rest spacing ----

    #[test]
    fn test_rest_spacing_alternating() {
        let config = base_config();
        let s = schedule(&[0, 1, 0, 1, 0, 1, 2], &config);
        assert_close(rest_spacing_score(&s, REST), 1.0);
    }

    #[test]
    fn test_rest_spacing_all_same() {
        let config = base_config();
        let s = schedule(&[1; 7], &config);
        assert_close(rest_spacing_score(&s, REST), 0.0);
    }

    #[test]
    fn test_rest_spacing_every_pair_has_rest() {
        let config = base_config();
        let s = schedule(&[0, 2, 0, 2, 1, 2, 1], &config);
        assert_close(rest_spacing_score(&s, REST), 1.0);
        let s = schedule(&[2; 7], &config);
        assert_close(rest_spacing_score(&s, REST), 1.0);
    }

    #[test]
    fn test_rest_spacing_partial() {
        let config = base_config();
        // Considered pairs: Mon-Tue (same), Tue-Wed (diff), Fri-Sat (diff)
        let s = schedule(&[0, 0, 1, 2, 0, 1, 2], &config);
        assert_close(rest_spacing_score(&s, REST), 2.0 / 3.0);
    }

    // ---- availability ----

    #[test]
    fn test_availability_no_blocked_days() {
        let config = wide_config();
        let s = schedule(&[0, 0, 0, 0, 0, 0, 0], &config);
        assert_close(availability_score(&s, REST, &config.availability), 1.0);
    }

    #[test]
    fn test_availability_violations() {
        let config = base_config().with_availability(
            Availability::new()
                .with_minutes(Weekday::Sat, 0)
                .with_minutes(Weekday::Sun, 0),
        );
        let s = schedule(&[0, 1, 0, 1, 0, 1, 2], &config);
        assert_close(availability_score(&s, REST, &config.availability), 0.5);
        let s = schedule(&[0; 7], &config);
        assert_close(availability_score(&s, REST, &config.availability), 0.0);
    }

    #[test]
    fn test_availability_is_one_inside_gene_space() {
        let config = base_config().with_availability(
            Availability::new()
                .with_minutes(Weekday::Mon, 0)
                .with_minutes(Weekday::Thu, 0)
                .with_minutes(Weekday::Sun, 0),
        );
        let space = gene_space(&config).unwrap();
        let options: Vec<&[usize]> = space.iter().map(|(_, c)| c).collect();
        let mut genome = [0usize; 7];
        for code in 0..space.size() {
            let mut rem = code as usize;
            for (gene, choices) in genome.iter_mut().zip(&options) {
                *gene = choices[rem % choices.len()];
                rem /= choices.len();
            }
            let s = schedule(&genome, &config);
            assert_close(availability_score(&s, REST, &config.availability), 1.0);
        }
    }

    // ---- user preferences ----

    #[test]
    fn test_user_prefs_unset() {
        let config = base_config();
        let s = schedule(&[0, 1, 0, 1, 0, 1, 2], &config);
        assert_close(user_prefs_score(&s, &Preferences::default()), 0.5);
    }

    #[test]
    fn test_user_prefs_cardio_ratio() {
        let config = base_config();
        let prefs = Preferences::default().with_cardio_per_week(4);
        let s = schedule(&[0, 1, 0, 1, 1, 1, 2], &config);
        assert_close(user_prefs_score(&s, &prefs), 0.5);
        let s = schedule(&[0, 0, 0, 0, 1, 1, 2], &config);
        assert_close(user_prefs_score(&s, &prefs), 1.0);
    }

    #[test]
    fn test_user_prefs_legs_bonus() {
        let config = base_config();
        let prefs = Preferences::default().with_legs_bonus(0.2);
        let with_legs = schedule(&[0, 1, 2, 2, 2, 2, 2], &config);
        let without_legs = schedule(&[0, 2, 2, 2, 2, 2, 2], &config);
        assert_close(user_prefs_score(&with_legs, &prefs), 0.7);
        assert_close(user_prefs_score(&without_legs, &prefs), 0.5);
    }

    #[test]
    fn test_user_prefs_capped() {
        let config = base_config();
        let prefs = Preferences::default()
            .with_cardio_per_week(2)
            .with_legs_bonus(0.5);
        let s = schedule(&[0, 1, 0, 1, 0, 1, 2], &config);
        assert_close(user_prefs_score(&s, &prefs), 1.0);
    }

    #[test]
    fn test_user_prefs_not_floored() {
        let config = base_config();
        let prefs = Preferences::default().with_legs_bonus(-0.8);
        let s = schedule(&[1; 7], &config);
        assert_close(user_prefs_score(&s, &prefs), -0.3);
    }

    #[test]
    fn test_user_prefs_custom_groups() {
        let config = RoutineConfig::new(
            GroupCatalog::new(["Off", "Run", "Legs"]).with_rest_group("Off"),
            FitnessWeights::uniform(1.0),
        );
        let mut prefs = Preferences::default()
            .with_cardio_per_week(2)
            .with_legs_bonus(0.1);
        prefs.cardio_group = "Run".to_string();
        prefs.legs_group = "Legs".to_string();
        let s = schedule(&[1, 0, 2, 0, 0, 0, 0], &config);
        assert_close(user_prefs_score(&s, &prefs), 0.6);
    }

    // ---- combined ----

    #[test]
    fn test_alternating_week_scenario() {
        let config = base_config()
            .with_preferences(Preferences::default().with_diversity_target(2, 2).with_cardio_per_week(0));
        let b = evaluate_breakdown(&[0, 1, 0, 1, 0, 1, 2], &config).unwrap();
        assert_close(b.diversity, 1.0);
        assert_close(b.rest_spacing, 1.0);
        assert_close(b.availability, 1.0);
        assert_close(b.user_prefs, 0.5);
        assert_close(b.total, 0.875);
    }

    #[test]
    fn test_monotone_week_scenario() {
        let config = base_config();
        let b = evaluate_breakdown(&[0; 7], &config).unwrap();
        assert_close(b.rest_spacing, 0.0);
        // u = 1 against the default [4, 5] band
        assert_close(b.diversity, 0.25);
        // Sunday is blocked but trains
        assert_close(b.availability, 0.0);
    }

    #[test]
    fn test_weights_not_normalized() {
        let mut config = base_config();
        config.weights = FitnessWeights::uniform(2.0);
        let b = evaluate_breakdown(&[0, 1, 0, 1, 0, 1, 2], &config).unwrap();
        assert!(b.total > 1.0);
        assert!(b.total <= config.weights.sum());
    }

    #[test]
    fn test_evaluate_matches_breakdown() {
        let config = base_config();
        let genome = [1, 0, 2, 1, 1, 0, 2];
        let score = evaluate(&genome, &config).unwrap();
        let b = evaluate_breakdown(&genome, &config).unwrap();
        assert_eq!(score, b.total);
        assert_eq!(score, evaluate(&genome, &config).unwrap());
    }

    #[test]
    fn test_evaluate_rejects_out_of_range() {
        let config = base_config();
        assert!(matches!(
            evaluate(&[0, 1, 9, 1, 0, 1, 2], &config),
            Err(EncodingError::GeneOutOfRange { value: 9, .. })
        ));
    }

    #[test]
    fn test_score_bounds_over_space() {
        let config = base_config().with_preferences(
            Preferences::default()
                .with_cardio_per_week(3)
                .with_legs_bonus(0.3),
        );
        let max = config.weights.sum();
        let mut genome = [0usize; 7];
        for code in 0..3usize.pow(7) {
            let mut rem = code;
            for gene in genome.iter_mut() {
                *gene = rem % 3;
                rem /= 3;
            }
            let b = evaluate_breakdown(&genome, &config).unwrap();
            for part in [b.diversity, b.rest_spacing, b.availability, b.user_prefs] {
                assert!((0.0..=1.0).contains(&part));
            }
            assert!(b.total >= 0.0 && b.total <= max + 1e-12);
        }
    }
}
