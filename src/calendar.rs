use chrono::{Datelike, NaiveDate};

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One day of activity. `date == None` marks a placeholder slot inserted by
/// normalization; placeholders render like real zero-count days but are excluded
/// from date-sensitive statistics.
pub struct Day {
    pub date: Option<NaiveDate>,
    pub count: u32,
}

impl Day {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            date: Some(date),
            count,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            date: None,
            count: 0,
        }
    }

    pub fn is_real(&self) -> bool {
        self.date.is_some()
    }
}

/// An activity calendar as fetched: weeks oldest-first, each week 0-7 days in
/// arbitrary order. [`Calendar::normalized`] produces the fixed 7-slot grid rows.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Calendar {
    pub weeks: Vec<Vec<Day>>,
}

impl Calendar {
    pub fn new(weeks: Vec<Vec<Day>>) -> Self {
        Self { weeks }
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// Every day count in the calendar, week-major, placeholders included.
    pub fn counts(&self) -> Vec<u32> {
        self.weeks
            .iter()
            .flat_map(|week| week.iter().map(|day| day.count))
            .collect()
    }

    /// The dated days in input order. Input order is chronological for any
    /// well-formed calendar, so this is the sequence streak scans run over.
    pub fn real_days(&self) -> Vec<Day> {
        self.weeks
            .iter()
            .flat_map(|week| week.iter().filter(|day| day.is_real()).cloned())
            .collect()
    }

    /// Fixed 7-slot rows for at least `min_weeks` columns. Weeks beyond the
    /// calendar's width are synthesized entirely from placeholders.
    pub fn normalized(&self, min_weeks: usize) -> Vec<[Day; DAYS_PER_WEEK]> {
        let total = self.weeks.len().max(min_weeks);
        (0..total)
            .map(|index| match self.weeks.get(index) {
                Some(week) => normalize_week(week),
                None => std::array::from_fn(|_| Day::placeholder()),
            })
            .collect()
    }
}

/// Weekday slot for a date: 0 = Sunday .. 6 = Saturday, ISO calendar, independent
/// of host locale and timezone.
pub fn weekday_slot(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// Align an arbitrary run of days onto the fixed Sunday-Saturday row. Slot `i`
/// holds the input day whose date falls on weekday `i`; all other slots hold
/// placeholders. Dateless entries are skipped, never fatal.
pub fn normalize_week(week: &[Day]) -> [Day; DAYS_PER_WEEK] {
    let mut normalized: [Day; DAYS_PER_WEEK] = std::array::from_fn(|_| Day::placeholder());
    for day in week {
        let Some(date) = day.date else {
            continue;
        };
        normalized[weekday_slot(date)] = day.clone();
    }
    normalized
}
