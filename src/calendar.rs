use chrono::{Datelike, Duration, Months, NaiveDate};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

pub const MIN_YEAR: i64 = -9999;
pub const MAX_YEAR: i64 = 9999;

pub const DAYS_PER_WEEK: usize = 7;

pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MonthRefError {
    #[error("year {0} is outside the supported range -9999..=9999")]
    YearOutOfRange(i64),
    #[error("invalid month: {0} (must be 01..=12)")]
    InvalidMonth(String),
    #[error("invalid month reference (use YYYY-MM): {0}")]
    Parse(String),
}

/// A calendar month, independent of any particular day.
///
/// Always holds a normalized month index in `0..=11`; values outside that
/// range roll over into the neighbouring years at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthRef {
    first: NaiveDate,
}

impl MonthRef {
    /// Builds a month from a year and a zero-based month index, rolling the
    /// index over into adjacent years (`(2024, 12)` is January 2025).
    pub fn new(year: i32, month0: i32) -> Result<Self, MonthRefError> {
        Self::from_parts(i64::from(year), i64::from(month0))
    }

    pub fn containing(date: NaiveDate) -> Result<Self, MonthRefError> {
        Self::new(date.year(), date.month0() as i32)
    }

    fn from_parts(year: i64, month0: i64) -> Result<Self, MonthRefError> {
        let year = year + month0.div_euclid(12);
        let month0 = month0.rem_euclid(12);
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(MonthRefError::YearOutOfRange(year));
        }
        let first = NaiveDate::from_ymd_opt(year as i32, month0 as u32 + 1, 1)
            .ok_or(MonthRefError::YearOutOfRange(year))?;
        Ok(MonthRef { first })
    }

    /// Returns the month `delta` months away from this one.
    pub fn shifted(self, delta: i32) -> Result<Self, MonthRefError> {
        Self::from_parts(
            i64::from(self.year()),
            i64::from(self.month0()) + i64::from(delta),
        )
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month0(&self) -> u32 {
        self.first.month0()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first + Duration::days(i64::from(self.days_in_month()) - 1)
    }

    pub fn days_in_month(&self) -> u32 {
        self.first
            .checked_add_months(Months::new(1))
            .map_or(31, |next| next.signed_duration_since(self.first).num_days() as u32)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month0() == self.month0()
    }

    /// Human readable label such as `February 2024`.
    pub fn label(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month0() + 1)
    }
}

impl FromStr for MonthRef {
    type Err = MonthRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (year, month) = raw
            .rsplit_once('-')
            .ok_or_else(|| MonthRefError::Parse(raw.to_string()))?;
        let year: i64 = year
            .parse()
            .map_err(|_| MonthRefError::Parse(raw.to_string()))?;
        let month: i64 = month
            .parse()
            .map_err(|_| MonthRefError::InvalidMonth(month.to_string()))?;
        if !(1..=12).contains(&month) {
            return Err(MonthRefError::InvalidMonth(month.to_string()));
        }
        MonthRef::from_parts(year, month - 1)
    }
}

/// Per-day content annotation supplied by a notes collaborator.
pub trait ContentLookup {
    fn content_count(&self, date: NaiveDate) -> usize;
}

/// Lookup used when no collaborator is attached: every day is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ContentLookup for NoContent {
    fn content_count(&self, _date: NaiveDate) -> usize {
        0
    }
}

impl ContentLookup for HashMap<NaiveDate, usize> {
    fn content_count(&self, date: NaiveDate) -> usize {
        self.get(&date).copied().unwrap_or(0)
    }
}

impl ContentLookup for BTreeMap<NaiveDate, usize> {
    fn content_count(&self, date: NaiveDate) -> usize {
        self.get(&date).copied().unwrap_or(0)
    }
}

impl<T: ContentLookup + ?Sized> ContentLookup for &T {
    fn content_count(&self, date: NaiveDate) -> usize {
        (**self).content_count(date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day_of_month: u32,
    pub in_displayed_month: bool,
    pub is_today: bool,
    pub content_count: usize,
}

impl DayCell {
    pub fn has_content(&self) -> bool {
        self.content_count > 0
    }
}

/// One Sunday-to-Saturday row. Slot 0 is Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeekRow {
    slots: [Option<DayCell>; DAYS_PER_WEEK],
}

impl WeekRow {
    pub fn new(slots: [Option<DayCell>; DAYS_PER_WEEK]) -> Self {
        WeekRow { slots }
    }

    /// Cell for weekday `0..=6`; `None` for an empty slot or an index past
    /// Saturday.
    pub fn get(&self, weekday: usize) -> Option<&DayCell> {
        self.slots.get(weekday).and_then(Option::as_ref)
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.slots.iter().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    month: MonthRef,
    weeks: Vec<WeekRow>,
}

impl CalendarGrid {
    pub fn month(&self) -> MonthRef {
        self.month
    }

    pub fn weeks(&self) -> &[WeekRow] {
        &self.weeks
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }

    /// All present cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> + '_ {
        self.weeks.iter().flat_map(WeekRow::days)
    }

    pub fn first_cell(&self) -> Option<&DayCell> {
        self.cells().next()
    }

    pub fn last_cell(&self) -> Option<&DayCell> {
        self.weeks.last().and_then(|w| w.days().last())
    }

    pub fn cell_for(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells().find(|c| c.date == date)
    }

    /// Cell at a (week, weekday) position, as addressed by a renderer that
    /// draws weeks as columns.
    pub fn cell_at(&self, week: usize, weekday: usize) -> Option<&DayCell> {
        self.weeks.get(week).and_then(|w| w.get(weekday))
    }
}

/// Builds the grid for `month` with no content annotation.
pub fn build_grid(month: MonthRef, today: NaiveDate) -> CalendarGrid {
    build_grid_with(month, today, &NoContent)
}

/// Builds the grid for `month`, annotating each cell through `lookup`.
///
/// `today` is supplied by the caller so the result is deterministic.
pub fn build_grid_with<L>(month: MonthRef, today: NaiveDate, lookup: &L) -> CalendarGrid
where
    L: ContentLookup + ?Sized,
{
    let first = month.first_day();
    let last = month.last_day();
    let grid_start = first - Duration::days(i64::from(first.weekday().num_days_from_sunday()));
    let grid_end = last + Duration::days(6 - i64::from(last.weekday().num_days_from_sunday()));

    let total_days = grid_end.signed_duration_since(grid_start).num_days() + 1;
    let total_weeks = (total_days + DAYS_PER_WEEK as i64 - 1) / DAYS_PER_WEEK as i64;

    let weeks = (0..total_weeks)
        .map(|week| {
            let mut slots = [None; DAYS_PER_WEEK];
            for (weekday, slot) in slots.iter_mut().enumerate() {
                let date = grid_start + Duration::days(week * 7 + weekday as i64);
                *slot = Some(DayCell {
                    date,
                    day_of_month: date.day(),
                    in_displayed_month: month.contains(date),
                    is_today: date == today,
                    content_count: lookup.content_count(date),
                });
            }
            WeekRow::new(slots)
        })
        .collect::<Vec<_>>();

    tracing::trace!(%month, weeks = weeks.len(), %grid_start, %grid_end, "built calendar grid");
    CalendarGrid { month, weeks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m1: i32) -> MonthRef {
        MonthRef::new(y, m1 - 1).unwrap()
    }

    #[test]
    fn month_index_rolls_over_years() {
        assert_eq!(MonthRef::new(2024, 12).unwrap(), month(2025, 1));
        assert_eq!(MonthRef::new(2024, 13).unwrap(), month(2025, 2));
        assert_eq!(MonthRef::new(2024, -1).unwrap(), month(2023, 12));
        assert_eq!(MonthRef::new(2024, -13).unwrap(), month(2022, 12));
        assert_eq!(MonthRef::new(2024, 24).unwrap(), month(2026, 1));
    }

    #[test]
    fn shifted_crosses_year_boundaries() {
        assert_eq!(month(2024, 1).shifted(-1).unwrap(), month(2023, 12));
        assert_eq!(month(2024, 12).shifted(1).unwrap(), month(2025, 1));
        assert_eq!(month(2024, 6).shifted(0).unwrap(), month(2024, 6));
    }

    #[test]
    fn out_of_range_year_rejected() {
        assert_eq!(
            MonthRef::new(10_000, 0),
            Err(MonthRefError::YearOutOfRange(10_000))
        );
        assert_eq!(
            month(9999, 12).shifted(1),
            Err(MonthRefError::YearOutOfRange(10_000))
        );
        assert!(MonthRef::new(i32::MIN, i32::MIN).is_err());
    }

    #[test]
    fn parses_and_displays_year_month() {
        let m: MonthRef = "2024-02".parse().unwrap();
        assert_eq!(m, month(2024, 2));
        assert_eq!(m.to_string(), "2024-02");
        assert_eq!(
            "2024-13".parse::<MonthRef>(),
            Err(MonthRefError::InvalidMonth("13".into()))
        );
        assert!(matches!(
            "feb".parse::<MonthRef>(),
            Err(MonthRefError::Parse(_))
        ));
    }

    #[test]
    fn month_bounds_and_lengths() {
        assert_eq!(month(2024, 2).last_day(), date(2024, 2, 29));
        assert_eq!(month(2023, 2).last_day(), date(2023, 2, 28));
        assert_eq!(month(1900, 2).days_in_month(), 28);
        assert_eq!(month(2000, 2).days_in_month(), 29);
        assert_eq!(month(2100, 2).days_in_month(), 28);
        assert_eq!(month(-4, 2).days_in_month(), 29);
        assert_eq!(month(9999, 12).days_in_month(), 31);
        assert_eq!(month(2026, 9).days_in_month(), 30);
        assert_eq!(month(2024, 12).last_day(), date(2024, 12, 31));
        assert_eq!(month(2024, 4).label(), "April 2024");
    }

    #[test]
    fn february_2024_spans_five_weeks() {
        let grid = build_grid(month(2024, 2), date(2024, 2, 14));
        assert_eq!(grid.week_count(), 5);
        assert_eq!(grid.first_cell().unwrap().date, date(2024, 1, 28));
        assert_eq!(grid.last_cell().unwrap().date, date(2024, 3, 2));
        let today = grid.cell_for(date(2024, 2, 14)).unwrap();
        assert!(today.is_today);
        assert_eq!(grid.cells().filter(|c| c.is_today).count(), 1);
    }

    #[test]
    fn february_2026_spans_four_weeks() {
        let grid = build_grid(month(2026, 2), date(2026, 10, 16));
        assert_eq!(grid.week_count(), 4);
        assert_eq!(grid.first_cell().unwrap().date, date(2026, 2, 1));
        assert_eq!(grid.last_cell().unwrap().date, date(2026, 2, 28));
        assert!(grid.cells().all(|c| c.in_displayed_month));
        assert!(grid.cells().all(|c| !c.is_today));
    }

    #[test]
    fn six_week_month() {
        // August 2026 starts on a Saturday and has 31 days.
        let grid = build_grid(month(2026, 8), date(2026, 8, 1));
        assert_eq!(grid.week_count(), 6);
        assert_eq!(grid.first_cell().unwrap().date, date(2026, 7, 26));
        assert_eq!(grid.last_cell().unwrap().date, date(2026, 9, 5));
    }

    #[test]
    fn leading_cells_belong_to_previous_month() {
        let grid = build_grid(month(2024, 2), date(2024, 2, 1));
        let first_week = &grid.weeks()[0];
        let leading = first_week.days().take(4).collect::<Vec<_>>();
        assert!(leading.iter().all(|c| !c.in_displayed_month));
        assert_eq!(leading[0].day_of_month, 28);
        let thursday = first_week.get(4).unwrap();
        assert_eq!(thursday.date, date(2024, 2, 1));
        assert!(thursday.in_displayed_month);
        assert_eq!(thursday.date.weekday(), Weekday::Thu);
    }

    #[test]
    fn content_is_taken_from_lookup() {
        let mut counts = HashMap::new();
        counts.insert(date(2024, 2, 10), 3);
        counts.insert(date(2024, 3, 1), 1);
        let grid = build_grid_with(month(2024, 2), date(2024, 2, 1), &counts);
        let busy = grid.cell_for(date(2024, 2, 10)).unwrap();
        assert!(busy.has_content());
        assert_eq!(busy.content_count, 3);
        assert_eq!(grid.cell_for(date(2024, 3, 1)).unwrap().content_count, 1);
        assert!(!grid.cell_for(date(2024, 2, 11)).unwrap().has_content());
    }

    #[test]
    fn empty_slots_are_skipped() {
        let mut slots = [None; DAYS_PER_WEEK];
        slots[3] = Some(DayCell {
            date: date(2024, 1, 3),
            day_of_month: 3,
            in_displayed_month: true,
            is_today: false,
            content_count: 0,
        });
        let row = WeekRow::new(slots);
        assert!(row.get(0).is_none());
        assert!(row.get(7).is_none());
        assert_eq!(row.days().count(), 1);
    }

    #[test]
    fn extreme_supported_months_build() {
        let low = build_grid(month(-9999, 1), date(2026, 1, 1));
        let high = build_grid(month(9999, 12), date(2026, 1, 1));
        assert!(low.week_count() >= 4);
        assert!(high.week_count() >= 4);
    }
}
