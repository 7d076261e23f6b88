pub mod calendar;
pub mod clock;
pub mod controller;
pub mod dock;
pub mod navigation;
pub mod notebook;
pub mod picker;
pub mod settings;
pub mod width;

pub use calendar::{
    build_grid, build_grid_with, CalendarGrid, ContentLookup, DayCell, MonthRef, MonthRefError,
    NoContent, WeekRow,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{CalendarController, CalendarView};
pub use dock::DockAction;
pub use navigation::{NavEntry, NavigationError, Navigator, PageId, PageParams};
pub use notebook::{DateRange, Note, NoteDraft, Notebook, NotebookError, SearchQuery};
pub use picker::MonthYearPicker;
pub use settings::Settings;
pub use width::{width_hints, Breakpoint, FluidWidth, WidthConfig, WidthHints};
