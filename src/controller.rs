use crate::calendar::{build_grid_with, CalendarGrid, ContentLookup, DayCell, MonthRef, NoContent};
use crate::clock::{Clock, SystemClock};
use crate::navigation::{Navigator, PageId, PageParams};
use crate::width::{WidthConfig, WidthHints};

#[derive(Debug, Clone)]
pub struct CalendarController<C = SystemClock> {
    month: MonthRef,
    clock: C,
    widths: WidthConfig,
}

/// Everything the presentation layer needs to draw one month.
#[derive(Debug, Clone)]
pub struct CalendarView {
    pub grid: CalendarGrid,
    pub widths: WidthHints,
}

impl<C: Clock> CalendarController<C> {
    /// Starts on the month containing the clock's current date.
    pub fn new(clock: C, widths: WidthConfig) -> Result<Self, crate::calendar::MonthRefError> {
        let month = MonthRef::containing(clock.today())?;
        Ok(Self::starting_at(month, clock, widths))
    }

    pub fn starting_at(month: MonthRef, clock: C, widths: WidthConfig) -> Self {
        CalendarController {
            month,
            clock,
            widths,
        }
    }

    pub fn month(&self) -> MonthRef {
        self.month
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    pub fn grid(&self) -> CalendarGrid {
        self.grid_with(&NoContent)
    }

    pub fn grid_with<L: ContentLookup + ?Sized>(&self, lookup: &L) -> CalendarGrid {
        build_grid_with(self.month, self.clock.today(), lookup)
    }

    pub fn width_hints(&self) -> WidthHints {
        self.widths.hints(self.grid().week_count())
    }

    pub fn view<L: ContentLookup + ?Sized>(&self, lookup: &L) -> CalendarView {
        let grid = self.grid_with(lookup);
        let widths = self.widths.hints(grid.week_count());
        CalendarView { grid, widths }
    }

    pub fn on_prev_month(&mut self) -> MonthRef {
        self.shift(-1)
    }

    pub fn on_next_month(&mut self) -> MonthRef {
        self.shift(1)
    }

    pub fn on_today(&mut self) -> MonthRef {
        let today = self.clock.today();
        match MonthRef::containing(today) {
            Ok(month) => self.month = month,
            Err(err) => tracing::warn!(%today, %err, "clock date outside supported range"),
        }
        self.month
    }

    pub fn on_pick_month_year(&mut self, month: MonthRef) -> MonthRef {
        tracing::debug!(from = %self.month, to = %month, "month picked");
        self.month = month;
        self.month
    }

    /// Opens the day-detail page for an in-month cell. Cells that belong to a
    /// neighbouring month are ignored; returns whether navigation happened.
    pub fn on_day_cell_click(&self, cell: &DayCell, nav: &mut Navigator) -> bool {
        if !cell.in_displayed_month {
            return false;
        }
        nav.navigate_to(PageId::DayDetail, PageParams::date(cell.date));
        true
    }

    fn shift(&mut self, delta: i32) -> MonthRef {
        match self.month.shifted(delta) {
            Ok(month) => {
                tracing::debug!(from = %self.month, to = %month, "month changed");
                self.month = month;
            }
            Err(err) => tracing::warn!(month = %self.month, delta, %err, "month shift rejected"),
        }
        self.month
    }
}
