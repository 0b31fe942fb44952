//! Read-only statistics projection over the meeting state.

use std::time::Instant;

use crate::meeting::Meeting;

/// One rendered statistics row. A transient projection; the registry
/// stays the single owner of the underlying data.
#[derive(Debug, Clone, PartialEq)]
pub struct StatLine {
    pub name: String,
    /// Share of total speech time, 0.0 when nobody has spoken yet.
    pub percentage: f64,
    pub speech_count: u32,
    /// Speech time in seconds as of the collection instant, including
    /// any in-progress interval.
    pub speech_time: f64,
}

impl StatLine {
    pub fn format(&self) -> String {
        format!(
            "{}: {:.2}% ({} speaks, {:.2}s)",
            self.name, self.percentage, self.speech_count, self.speech_time
        )
    }
}

/// Collect one `StatLine` per participant as of `now`, sorted by raw
/// speech time descending. The sort is stable, so ties keep registry
/// (insertion) order.
pub fn collect(meeting: &Meeting, now: Instant) -> Vec<StatLine> {
    let total: f64 = meeting
        .participants()
        .iter()
        .map(|p| meeting.speech_time(p, now))
        .sum();

    let mut lines: Vec<StatLine> = meeting
        .participants()
        .iter()
        .map(|p| {
            let time = meeting.speech_time(p, now);
            StatLine {
                name: p.name.clone(),
                percentage: if total > 0.0 { time / total * 100.0 } else { 0.0 },
                speech_count: p.speech_count,
                speech_time: time,
            }
        })
        .collect();

    lines.sort_by(|a, b| b.speech_time.total_cmp(&a.speech_time));
    lines
}

/// Render the statistics panel text, one formatted line per row.
pub fn render(lines: &[StatLine]) -> String {
    let rows: Vec<String> = lines.iter().map(StatLine::format).collect();
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn meeting_with(names: &[&str]) -> Meeting {
        let mut meeting = Meeting::new();
        for name in names {
            meeting.add_participant(name);
        }
        meeting
    }

    #[test]
    fn test_collect_empty_meeting() {
        let meeting = Meeting::new();
        assert!(collect(&meeting, Instant::now()).is_empty());
    }

    #[test]
    fn test_percentages_are_zero_when_nobody_spoke() {
        let meeting = meeting_with(&["A", "B"]);
        let lines = collect(&meeting, Instant::now());
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line.percentage, 0.0);
            assert_eq!(line.speech_time, 0.0);
        }
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let mut meeting = meeting_with(&["A", "B", "C"]);
        let t0 = Instant::now();
        meeting.toggle_speaker("A", t0);
        meeting.toggle_speaker("B", t0 + Duration::from_secs(3));
        meeting.toggle_speaker("C", t0 + Duration::from_secs(4));
        meeting.toggle_speaker("C", t0 + Duration::from_secs(10));

        let lines = collect(&meeting, t0 + Duration::from_secs(10));
        let sum: f64 = lines.iter().map(|l| l.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_sorted_descending_by_time() {
        let mut meeting = meeting_with(&["quiet", "loud", "medium"]);
        let t0 = Instant::now();
        meeting.toggle_speaker("quiet", t0);
        meeting.toggle_speaker("loud", t0 + Duration::from_secs(1)); // quiet: 1s
        meeting.toggle_speaker("medium", t0 + Duration::from_secs(6)); // loud: 5s
        meeting.toggle_speaker("medium", t0 + Duration::from_secs(9)); // medium: 3s

        let names: Vec<_> = collect(&meeting, t0 + Duration::from_secs(9))
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, ["loud", "medium", "quiet"]);
    }

    #[test]
    fn test_ties_keep_registry_order() {
        let meeting = meeting_with(&["C", "A", "B"]);
        let names: Vec<_> = collect(&meeting, Instant::now())
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn test_in_flight_time_counts_toward_percentage() {
        let mut meeting = meeting_with(&["A", "B"]);
        let t0 = Instant::now();
        meeting.toggle_speaker("A", t0);

        // A is still speaking; at t0+2s they own 100% of the total.
        let lines = collect(&meeting, t0 + Duration::from_secs(2));
        assert_eq!(lines[0].name, "A");
        assert!((lines[0].percentage - 100.0).abs() < 1e-9);
        assert!((lines[0].speech_time - 2.0).abs() < 1e-9);
        assert_eq!(lines[1].percentage, 0.0);
    }

    #[test]
    fn test_format_line() {
        let line = StatLine {
            name: "Аліса".to_string(),
            percentage: 66.666666,
            speech_count: 3,
            speech_time: 12.345,
        };
        assert_eq!(line.format(), "Аліса: 66.67% (3 speaks, 12.35s)");
    }

    #[test]
    fn test_format_zero_line() {
        let line = StatLine {
            name: "B".to_string(),
            percentage: 0.0,
            speech_count: 0,
            speech_time: 0.0,
        };
        assert_eq!(line.format(), "B: 0.00% (0 speaks, 0.00s)");
    }

    #[test]
    fn test_render_joins_lines() {
        let mut meeting = meeting_with(&["A", "B"]);
        let t0 = Instant::now();
        meeting.toggle_speaker("A", t0);
        meeting.toggle_speaker("A", t0 + Duration::from_secs(2));

        let text = render(&collect(&meeting, t0 + Duration::from_secs(2)));
        assert_eq!(text, "A: 100.00% (1 speaks, 2.00s)\nB: 0.00% (0 speaks, 0.00s)");
    }
}
