use crate::calendar::{MonthRef, MonthRefError};
use chrono::{Datelike, NaiveDate};

pub const DEFAULT_YEAR_SPAN: i32 = 10;

/// Staged month/year selection. Nothing changes for the caller until
/// [`MonthYearPicker::apply`] hands back the chosen month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthYearPicker {
    origin: MonthRef,
    year: i32,
    month0: u32,
    min_year: i32,
    max_year: i32,
}

impl MonthYearPicker {
    /// Opens on `current`, with years limited to `today.year() ± span`.
    pub fn open(current: MonthRef, today: NaiveDate, span: i32) -> Self {
        let span = span.max(0);
        let min_year = today.year().saturating_sub(span);
        let max_year = today.year().saturating_add(span);
        MonthYearPicker {
            origin: current,
            year: current.year().clamp(min_year, max_year),
            month0: current.month0(),
            min_year,
            max_year,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month0(&self) -> u32 {
        self.month0
    }

    pub fn year_range(&self) -> (i32, i32) {
        (self.min_year, self.max_year)
    }

    pub fn can_prev_year(&self) -> bool {
        self.year > self.min_year
    }

    pub fn can_next_year(&self) -> bool {
        self.year < self.max_year
    }

    pub fn prev_year(&mut self) {
        self.year = (self.year - 1).max(self.min_year);
    }

    pub fn next_year(&mut self) {
        self.year = (self.year + 1).min(self.max_year);
    }

    /// Selects a zero-based month; indices past December are ignored.
    pub fn select_month(&mut self, month0: u32) {
        if month0 < 12 {
            self.month0 = month0;
        }
    }

    pub fn prev_month(&mut self) {
        self.month0 = (self.month0 + 11) % 12;
    }

    pub fn next_month(&mut self) {
        self.month0 = (self.month0 + 1) % 12;
    }

    pub fn apply(&self) -> Result<MonthRef, MonthRefError> {
        MonthRef::new(self.year, self.month0 as i32)
    }

    pub fn cancel(&mut self) {
        self.year = self.origin.year().clamp(self.min_year, self.max_year);
        self.month0 = self.origin.month0();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn opens_on_current_month() {
        let current = "2025-03".parse().unwrap();
        let picker = MonthYearPicker::open(current, today(), DEFAULT_YEAR_SPAN);
        assert_eq!((picker.year(), picker.month0()), (2025, 2));
        assert_eq!(picker.year_range(), (2016, 2036));
    }

    #[test]
    fn years_clamp_to_window() {
        let current = "2035-01".parse().unwrap();
        let mut picker = MonthYearPicker::open(current, today(), DEFAULT_YEAR_SPAN);
        picker.next_year();
        picker.next_year();
        picker.next_year();
        assert_eq!(picker.year(), 2036);
        assert!(!picker.can_next_year());

        let mut low = MonthYearPicker::open("2016-05".parse().unwrap(), today(), DEFAULT_YEAR_SPAN);
        low.prev_year();
        assert_eq!(low.year(), 2016);
        assert!(!low.can_prev_year());
    }

    #[test]
    fn apply_returns_staged_month() {
        let mut picker = MonthYearPicker::open("2026-10".parse().unwrap(), today(), 10);
        picker.prev_year();
        picker.select_month(1);
        picker.select_month(12);
        assert_eq!(picker.apply().unwrap().to_string(), "2025-02");
    }

    #[test]
    fn cancel_restores_origin() {
        let mut picker = MonthYearPicker::open("2026-10".parse().unwrap(), today(), 10);
        picker.next_year();
        picker.next_month();
        picker.next_month();
        picker.next_month();
        assert_eq!(picker.apply().unwrap().to_string(), "2027-01");
        picker.cancel();
        assert_eq!(picker.apply().unwrap().to_string(), "2026-10");
    }

    #[test]
    fn month_cycles_wrap() {
        let mut picker = MonthYearPicker::open("2026-01".parse().unwrap(), today(), 10);
        picker.prev_month();
        assert_eq!(picker.month0(), 11);
        picker.next_month();
        assert_eq!(picker.month0(), 0);
    }
}
