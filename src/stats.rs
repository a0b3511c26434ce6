/// Result of polling every configured project, joined all-complete.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatsSummary {
    pub total_downloads: u64,
    pub failure_note: Option<String>,
}

/// Sums whatever succeeded and keeps the first failure for display, so one
/// broken project never hides the rest.
pub fn summarize(results: impl IntoIterator<Item = Result<u64, String>>) -> StatsSummary {
    let mut summary = StatsSummary::default();
    for result in results {
        match result {
            Ok(count) => summary.total_downloads += count,
            Err(note) if summary.failure_note.is_none() => summary.failure_note = Some(note),
            Err(_) => {}
        }
    }
    summary
}

/// Trims ids, drops empties, dedups keeping the first occurrence.
pub fn normalize_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut kept: Vec<String> = Vec::new();
    for id in ids {
        let id = id.as_ref().trim();
        if id.is_empty() || kept.iter().any(|seen| seen == id) {
            continue;
        }
        kept.push(id.to_string());
    }
    kept
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Value to render `elapsed_ms` into a count-up toward `target`, plus
/// whether the animation is done. Finishing always lands exactly on target.
pub fn count_up_frame(target: u64, elapsed_ms: f64, duration_ms: f64) -> (u64, bool) {
    if duration_ms <= 0.0 || elapsed_ms >= duration_ms {
        return (target, true);
    }
    let eased = ease_out_cubic(elapsed_ms / duration_ms);
    ((target as f64 * eased).floor() as u64, false)
}

/// Groups digits in threes, e.g. 1234567 -> "1,234,567".
pub fn group_digits(value: u64) -> String {
    let raw = value.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (offset, digit) in raw.chars().enumerate() {
        if offset > 0 && (raw.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_sums_successes_and_keeps_first_failure() {
        let summary = summarize(vec![
            Ok(10),
            Err("HTTP 500 for 1205377".to_string()),
            Ok(5),
            Err("second failure".to_string()),
        ]);
        assert_eq!(summary.total_downloads, 15);
        assert_eq!(summary.failure_note.as_deref(), Some("HTTP 500 for 1205377"));
    }

    #[test]
    fn test_summarize_empty_input_is_zero_with_no_note() {
        assert_eq!(summarize(vec![]), StatsSummary::default());
    }

    #[test]
    fn test_summarize_all_failures_keeps_zero_total() {
        let summary = summarize(vec![Err("down".to_string())]);
        assert_eq!(summary.total_downloads, 0);
        assert_eq!(summary.failure_note.as_deref(), Some("down"));
    }

    #[test]
    fn test_normalize_ids_trims_dedups_and_drops_empties() {
        let ids = normalize_ids([" 1180042 ", "", "1205377", "1180042"]);
        assert_eq!(ids, vec!["1180042", "1205377"]);
    }

    #[test]
    fn test_ease_out_cubic_endpoints_and_clamp() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(-2.0), 0.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-9);
    }

    #[test]
    fn test_count_up_lands_exactly_on_target() {
        assert_eq!(count_up_frame(1234, 1200.0, 1200.0), (1234, true));
        assert_eq!(count_up_frame(1234, 5000.0, 1200.0), (1234, true));
        assert_eq!(count_up_frame(1234, 0.0, 0.0), (1234, true));
    }

    #[test]
    fn test_count_up_mid_flight_floors_the_eased_value() {
        let (value, done) = count_up_frame(1000, 600.0, 1200.0);
        assert_eq!(value, 875);
        assert!(!done);
    }

    #[test]
    fn test_group_digits_inserts_separators_in_threes() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1_000), "1,000");
        assert_eq!(group_digits(1_234_567), "1,234,567");
    }
}
