use shared::{
    domain::{PerformanceTier, Score},
    protocol::RoundReport,
};

/// Whether `candidate` replaces the stored best: no best yet, fewer errors,
/// or equal errors in strictly less time.
pub fn is_new_best(stored: Option<Score>, candidate: Score) -> bool {
    match stored {
        None => true,
        Some(best) => candidate < best,
    }
}

pub fn classify(errors: u32) -> PerformanceTier {
    if errors <= 5 {
        PerformanceTier::Excellent
    } else if errors <= 15 {
        PerformanceTier::Good
    } else {
        PerformanceTier::Poor
    }
}

pub fn format_time(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub fn errors_label(errors: u32) -> String {
    format!("Errors: {errors}")
}

pub fn time_label(seconds: u32) -> String {
    format!("Time: {}", format_time(seconds))
}

pub fn best_label(best: Option<Score>) -> String {
    match best {
        None => "Best: —".to_string(),
        Some(best) => format!("Best: {} errors {}", best.errors, format_time(best.seconds)),
    }
}

pub const RESULT_TITLE: &str = "Match Result";
pub const HIGH_SCORE_TITLE: &str = "High Score";

pub fn result_message(report: &RoundReport) -> String {
    let best = match report.best {
        None => "—".to_string(),
        Some(best) => format!("{} errors, {}", best.errors, format_time(best.seconds)),
    };
    format!(
        "Game Over!\nErrors: {}\nTime: {}\nResult: {}\n\nBest: {best}",
        report.score.errors,
        format_time(report.score.seconds),
        report.tier.label(),
    )
}

pub fn high_score_message(score: Score) -> String {
    format!(
        "New High Score!\nErrors: {}\nTime: {}",
        score.errors,
        format_time(score.seconds)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_errors_and_lower_time_replaces_best() {
        assert!(is_new_best(Some(Score::new(5, 120)), Score::new(5, 90)));
    }

    #[test]
    fn more_errors_never_replaces_best() {
        assert!(!is_new_best(Some(Score::new(5, 120)), Score::new(6, 10)));
    }

    #[test]
    fn ties_keep_the_stored_best() {
        assert!(!is_new_best(Some(Score::new(5, 120)), Score::new(5, 120)));
    }

    #[test]
    fn any_result_beats_no_best() {
        assert!(is_new_best(None, Score::new(99, 9999)));
    }

    #[test]
    fn fewer_errors_wins_even_when_slower() {
        assert!(is_new_best(Some(Score::new(5, 10)), Score::new(4, 600)));
    }

    #[test]
    fn classifies_tiers_at_their_boundaries() {
        assert_eq!(classify(0), PerformanceTier::Excellent);
        assert_eq!(classify(5), PerformanceTier::Excellent);
        assert_eq!(classify(6), PerformanceTier::Good);
        assert_eq!(classify(15), PerformanceTier::Good);
        assert_eq!(classify(16), PerformanceTier::Poor);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(3600), "60:00");
    }

    #[test]
    fn renders_labels() {
        assert_eq!(errors_label(3), "Errors: 3");
        assert_eq!(time_label(75), "Time: 01:15");
        assert_eq!(best_label(None), "Best: —");
        assert_eq!(best_label(Some(Score::new(2, 41))), "Best: 2 errors 00:41");
    }

    #[test]
    fn result_message_lists_score_tier_and_best() {
        let report = RoundReport {
            round: 1,
            score: Score::new(7, 95),
            tier: classify(7),
            new_best: false,
            best: Some(Score::new(3, 60)),
        };
        assert_eq!(
            result_message(&report),
            "Game Over!\nErrors: 7\nTime: 01:35\nResult: Good!\n\nBest: 3 errors, 01:00"
        );
    }
}
