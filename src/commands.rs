use crate::cli::WidthsArgs;
use crate::storage::{init_settings, load_settings, SettingsLocation, SettingsScope};
use crate::ui;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use thoughtgrid::calendar::WEEKDAY_NAMES;
use thoughtgrid::{
    CalendarController, CalendarGrid, Clock, FixedClock, MonthRef, SystemClock, WidthHints,
};

pub fn tui(month: Option<String>, location: SettingsLocation) -> Result<()> {
    let settings = load_settings(&location)?;
    let start = match parse_month(month.as_deref())? {
        Some(m) => m,
        None => MonthRef::containing(SystemClock.today())?,
    };
    ui::run(settings, location, start)
}

pub fn grid(month: Option<String>, today: Option<String>, location: &SettingsLocation) -> Result<()> {
    let settings = load_settings(location)?;
    let today = match today.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => SystemClock.today(),
    };
    let month = match parse_month(month.as_deref())? {
        Some(m) => m,
        None => MonthRef::containing(today)?,
    };
    let controller = CalendarController::starting_at(month, FixedClock(today), settings.widths);
    let grid = controller.grid();
    print!("{}", render_grid_text(&grid));
    println!();
    println!("weeks: {}", grid.week_count());
    print!("{}", render_widths(&controller.width_hints()));
    Ok(())
}

pub fn widths(args: WidthsArgs, location: &SettingsLocation) -> Result<()> {
    let settings = load_settings(location)?;
    let weeks = match (args.weeks, parse_month(args.month.as_deref())?) {
        (Some(weeks), _) => weeks,
        (None, Some(month)) => {
            CalendarController::starting_at(month, SystemClock, settings.widths)
                .grid()
                .week_count()
        }
        (None, None) => return Err(anyhow!("either --weeks or --month is required")),
    };
    println!("weeks: {}", weeks);
    print!("{}", render_widths(&settings.widths.hints(weeks)));
    Ok(())
}

pub fn config(init: bool, location: &SettingsLocation) -> Result<()> {
    if init {
        if init_settings(location)? {
            println!("Wrote default settings to {}", location.path.display());
        } else {
            println!("Settings already exist at {}", location.path.display());
        }
    }
    let settings = load_settings(location)?;
    let scope = match location.scope {
        SettingsScope::Explicit => "explicit",
        SettingsScope::User => "user",
    };
    let exists = if location.path.exists() { "" } else { " (not created, defaults shown)" };
    println!("# {} ({}){}", location.path.display(), scope, exists);
    print!(
        "{}",
        serde_yaml::to_string(&settings).context("serializing settings")?
    );
    Ok(())
}

fn parse_month(input: Option<&str>) -> Result<Option<MonthRef>> {
    let raw = match input {
        Some(r) => r.trim(),
        None => return Ok(None),
    };
    if raw.is_empty() {
        return Ok(None);
    }
    let month = raw
        .parse::<MonthRef>()
        .with_context(|| format!("invalid month (use YYYY-MM): {}", raw))?;
    Ok(Some(month))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date format (use YYYY-MM-DD): {}", raw))
}

/// Weekday rows by week columns. Today is bracketed, neighbouring-month days
/// are parenthesized and days with content carry a `*`.
fn render_grid_text(grid: &CalendarGrid) -> String {
    let mut out = String::new();
    out.push_str(&grid.month().label());
    out.push('\n');
    out.push_str("    ");
    for week in 1..=grid.week_count() {
        out.push_str(&format!("{:>6}", format!("W{}", week)));
    }
    out.push('\n');
    for (weekday, name) in WEEKDAY_NAMES.iter().enumerate() {
        out.push_str(&name[..3]);
        out.push(' ');
        for week in 0..grid.week_count() {
            let text = match grid.cell_at(week, weekday) {
                None => String::new(),
                Some(cell) if !cell.in_displayed_month => format!("({})", cell.day_of_month),
                Some(cell) if cell.is_today => format!("[{}]", cell.day_of_month),
                Some(cell) if cell.has_content() => format!("{}*", cell.day_of_month),
                Some(cell) => cell.day_of_month.to_string(),
            };
            out.push_str(&format!("{:>6}", text));
        }
        out.push('\n');
    }
    out
}

fn render_widths(hints: &WidthHints) -> String {
    format!(
        "mobile: {}px\ntablet: {}px\ndesktop: {}px\nlarge desktop: {}px\nfluid: {}\n",
        hints.mobile, hints.tablet, hints.desktop, hints.large_desktop, hints.fluid
    )
}
