use std::collections::BTreeMap;

use crate::dto::evaluation::EvaluationRollup;
use crate::models::{EvaluationTheme, PlayerEvaluation};

use super::aggregation::round_to;

/// Fills in each theme's `average_score` and returns the overall average.
///
/// A theme without aspects scores 0. The overall average is taken over every
/// aspect of every theme, so themes weigh in proportion to their aspect count.
pub fn score_themes(themes: &mut [EvaluationTheme]) -> f64 {
    let mut total_score: i64 = 0;
    let mut total_aspects: usize = 0;

    for theme in themes.iter_mut() {
        if theme.aspects.is_empty() {
            theme.average_score = Some(0.0);
            continue;
        }

        let theme_total: i64 = theme.aspects.iter().map(|a| i64::from(a.score)).sum();
        theme.average_score = Some(round_to(
            theme_total as f64 / theme.aspects.len() as f64,
            2,
        ));

        total_score += theme_total;
        total_aspects += theme.aspects.len();
    }

    if total_aspects == 0 {
        return 0.0;
    }
    round_to(total_score as f64 / total_aspects as f64, 2)
}

/// Averages already-scored evaluations theme by theme.
///
/// Only non-zero theme averages count towards a theme's roll-up, and themes
/// that never had one are left out. The overall roll-up is the plain mean of
/// the theme roll-ups.
pub fn rollup<'a, I>(evaluations: I) -> EvaluationRollup
where
    I: IntoIterator<Item = &'a PlayerEvaluation>,
{
    let mut totals: BTreeMap<&str, (f64, u32)> = BTreeMap::new();

    for evaluation in evaluations {
        for theme in &evaluation.themes {
            let entry = totals.entry(theme.name.as_str()).or_insert((0.0, 0));
            if let Some(score) = theme.average_score.filter(|s| *s != 0.0) {
                entry.0 += score;
                entry.1 += 1;
            }
        }
    }

    let theme_averages: BTreeMap<String, f64> = totals
        .into_iter()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(name, (sum, count))| (name.to_string(), round_to(sum / count as f64, 2)))
        .collect();

    let overall_average = if theme_averages.is_empty() {
        0.0
    } else {
        round_to(
            theme_averages.values().sum::<f64>() / theme_averages.len() as f64,
            2,
        )
    };

    EvaluationRollup {
        theme_averages,
        overall_average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EvaluationAspect;
    use chrono::NaiveDateTime;

    fn theme(name: &str, scores: &[i32]) -> EvaluationTheme {
        EvaluationTheme {
            name: name.into(),
            aspects: scores
                .iter()
                .enumerate()
                .map(|(i, score)| EvaluationAspect {
                    name: format!("aspect {}", i),
                    score: *score,
                })
                .collect(),
            average_score: None,
        }
    }

    fn evaluation(id: &str, themes: Vec<EvaluationTheme>) -> PlayerEvaluation {
        let mut themes = themes;
        let overall = score_themes(&mut themes);
        PlayerEvaluation {
            id: id.into(),
            player_id: "p1".into(),
            evaluator_id: "u1".into(),
            evaluation_date: NaiveDateTime::default(),
            evaluation_type: "initial".into(),
            themes,
            overall_average: Some(overall),
            notes: None,
        }
    }

    #[test]
    fn test_theme_average() {
        let mut themes = vec![theme("ADRESSE", &[4, 3, 5, 4])];

        let overall = score_themes(&mut themes);

        assert_eq!(themes[0].average_score, Some(4.0));
        assert_eq!(overall, 4.0);
    }

    #[test]
    fn test_overall_weights_by_aspect_count() {
        let mut themes = vec![theme("ADRESSE", &[5, 5, 5]), theme("DEFENSE", &[2])];

        let overall = score_themes(&mut themes);

        assert_eq!(overall, 4.25);
        assert_eq!(themes[1].average_score, Some(2.0));
    }

    #[test]
    fn test_averages_round_to_two_decimals() {
        let mut themes = vec![theme("PASSE", &[4, 4, 5])];

        let overall = score_themes(&mut themes);

        assert_eq!(themes[0].average_score, Some(4.33));
        assert_eq!(overall, 4.33);
    }

    #[test]
    fn test_empty_evaluation_scores_zero() {
        let mut themes = vec![theme("ADRESSE", &[]), theme("DEFENSE", &[])];

        assert_eq!(score_themes(&mut themes), 0.0);
        assert_eq!(themes[0].average_score, Some(0.0));
        assert_eq!(score_themes(&mut []), 0.0);
    }

    #[test]
    fn test_rollup_is_mean_of_theme_means() {
        let evaluations = vec![
            evaluation("e1", vec![theme("ADRESSE", &[4, 4]), theme("DEFENSE", &[2, 2, 2, 2])]),
            evaluation("e2", vec![theme("ADRESSE", &[2, 2])]),
        ];

        let rollup = rollup(&evaluations);

        assert_eq!(rollup.theme_averages["ADRESSE"], 3.0);
        assert_eq!(rollup.theme_averages["DEFENSE"], 2.0);
        assert_eq!(rollup.overall_average, 2.5);
    }

    #[test]
    fn test_rollup_skips_zero_theme_averages() {
        let evaluations = vec![
            evaluation("e1", vec![theme("ADRESSE", &[4]), theme("MENTAL", &[])]),
            evaluation("e2", vec![theme("ADRESSE", &[])]),
        ];

        let rollup = rollup(&evaluations);

        assert_eq!(rollup.theme_averages.len(), 1);
        assert_eq!(rollup.theme_averages["ADRESSE"], 4.0);
        assert_eq!(rollup.overall_average, 4.0);
    }

    #[test]
    fn test_rollup_of_nothing_is_zero() {
        let rollup = rollup(&[]);

        assert!(rollup.theme_averages.is_empty());
        assert_eq!(rollup.overall_average, 0.0);
    }
}
