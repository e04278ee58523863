use chrono::{Datelike, NaiveDate};

use crate::calendar::Calendar;

/// A run of consecutive positive-count days.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Streak {
    pub length: u32,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Streak {
    /// Human-readable date range, or "No streak" for an empty run.
    pub fn range_label(&self) -> String {
        if self.length == 0 {
            return "No streak".to_string();
        }
        format_range(self.start, self.end)
    }
}

/// Aggregates derived from one calendar. Recomputed fully on every render.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct CalendarStats {
    pub total: u64,
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
    pub current: Streak,
    pub longest: Streak,
}

impl CalendarStats {
    pub fn total_range_label(&self) -> String {
        match self.first {
            Some(first) => format!("{} - Present", format_full(first)),
            None => "No data".to_string(),
        }
    }
}

/// Totals and streaks over the chronological sequence of real days.
/// Placeholders contribute 0 to the total and never participate in streaks.
pub fn compute_stats(calendar: &Calendar) -> CalendarStats {
    let total = calendar.counts().iter().map(|&c| u64::from(c)).sum();
    let days = calendar.real_days();

    let first = days.first().and_then(|d| d.date);
    let last = days.last().and_then(|d| d.date);

    let mut current = Streak::default();
    if let Some(last_day) = days.last() {
        if last_day.count > 0 {
            let run: Vec<_> = days.iter().rev().take_while(|d| d.count > 0).collect();
            current = Streak {
                length: run.len() as u32,
                start: run.last().and_then(|d| d.date),
                end: last_day.date,
            };
        }
    }

    let mut longest = Streak::default();
    let mut run_length = 0u32;
    let mut run_start: Option<NaiveDate> = None;
    for day in &days {
        if day.count > 0 {
            if run_length == 0 {
                run_start = day.date;
            }
            run_length += 1;
            // Ties keep the earliest maximal run.
            if run_length > longest.length {
                longest = Streak {
                    length: run_length,
                    start: run_start,
                    end: day.date,
                };
            }
        } else {
            run_length = 0;
            run_start = None;
        }
    }

    CalendarStats {
        total,
        first,
        last,
        current,
        longest,
    }
}

fn format_month_day(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

fn format_full(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// "Mon D - Mon D" within one year (month shown on both ends), full
/// "Mon D, YYYY - Mon D, YYYY" across years, "No data" when a bound is missing.
pub fn format_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let (Some(start), Some(end)) = (start, end) else {
        return "No data".to_string();
    };
    if start.year() == end.year() {
        format!("{} - {}", format_month_day(start), format_month_day(end))
    } else {
        format!("{} - {}", format_full(start), format_full(end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Day;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn week_from(start: &str, counts: &[u32]) -> Vec<Day> {
        let start = date(start);
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| Day::new(start + chrono::Days::new(i as u64), count))
            .collect()
    }

    #[test]
    fn totals_and_single_day_islands() {
        // d1=5, d2=0, d3=3, d4=0, d5=8, d6=0, d7=1 then an all-zero week.
        let calendar = Calendar::new(vec![
            week_from("2024-01-07", &[5, 0, 3, 0, 8, 0, 1]),
            week_from("2024-01-14", &[0, 0, 0, 0, 0, 0, 0]),
        ]);
        let stats = compute_stats(&calendar);
        assert_eq!(stats.total, 17);
        assert_eq!(stats.longest.length, 1);
        assert_eq!(stats.longest.start, Some(date("2024-01-07")));
        assert_eq!(stats.longest.end, Some(date("2024-01-07")));
        assert_eq!(stats.current.length, 0);
    }

    #[test]
    fn current_streak_tracks_trailing_run() {
        let calendar = Calendar::new(vec![week_from("2024-01-07", &[0, 2, 0, 1, 3, 4, 2])]);
        let stats = compute_stats(&calendar);
        assert_eq!(stats.current.length, 4);
        assert_eq!(stats.current.start, Some(date("2024-01-10")));
        assert_eq!(stats.current.end, Some(date("2024-01-13")));
        assert_eq!(stats.longest.length, 4);
    }

    #[test]
    fn current_streak_is_zero_when_last_day_is_zero() {
        let calendar = Calendar::new(vec![week_from("2024-01-07", &[1, 2, 3, 0])]);
        let stats = compute_stats(&calendar);
        assert_eq!(stats.current.length, 0);
        assert!(stats.longest.length >= stats.current.length);
        assert_eq!(stats.current.range_label(), "No streak");
    }

    #[test]
    fn longest_keeps_the_earliest_maximal_run() {
        let calendar = Calendar::new(vec![week_from("2024-01-07", &[1, 1, 0, 2, 2, 0, 0])]);
        let stats = compute_stats(&calendar);
        assert_eq!(stats.longest.length, 2);
        assert_eq!(stats.longest.start, Some(date("2024-01-07")));
    }

    #[test]
    fn all_zero_calendar_degrades_gracefully() {
        let calendar = Calendar::new(vec![
            week_from("2024-01-07", &[0; 7]),
            week_from("2024-01-14", &[0; 7]),
        ]);
        let stats = compute_stats(&calendar);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.current.length, 0);
        assert_eq!(stats.longest.length, 0);
        assert_eq!(stats.longest.range_label(), "No streak");
    }

    #[test]
    fn empty_calendar_has_no_data() {
        let stats = compute_stats(&Calendar::default());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.total_range_label(), "No data");
        assert_eq!(format_range(None, None), "No data");
    }

    #[test]
    fn range_formatting_by_year() {
        assert_eq!(
            format_range(Some(date("2024-03-02")), Some(date("2024-03-09"))),
            "Mar 2 - Mar 9"
        );
        assert_eq!(
            format_range(Some(date("2024-03-28")), Some(date("2024-04-02"))),
            "Mar 28 - Apr 2"
        );
        assert_eq!(
            format_range(Some(date("2023-12-28")), Some(date("2024-01-02"))),
            "Dec 28, 2023 - Jan 2, 2024"
        );
    }
}
