use crate::storage::{load_settings, SettingsLocation};
use anyhow::Result;
use chrono::{Duration as ChronoDuration, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::Duration;
use thoughtgrid::calendar::WEEKDAY_NAMES;
use thoughtgrid::notebook::{parse_tags, NoteId};
use thoughtgrid::{
    Breakpoint, CalendarController, DateRange, DayCell, DockAction, MonthRef, MonthYearPicker,
    Navigator, Note, NoteDraft, Notebook, PageId, PageParams, SearchQuery, Settings, SystemClock,
};

/// Pixels assumed per terminal column when resolving the fluid width clamp.
const PX_PER_CELL: u32 = 8;
const LABEL_WIDTH: u16 = 5;

pub fn run(settings: Settings, location: SettingsLocation, start: MonthRef) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(settings, location, start);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App {
    settings: Settings,
    location: SettingsLocation,
    nav: Navigator,
    calendar: CalendarController<SystemClock>,
    notebook: Notebook,
    cursor: NaiveDate,
    picker: Option<MonthYearPicker>,
    mode: Mode,
    page: PageState,
    seen_revision: u64,
    status: String,
}

enum Mode {
    Normal,
    ConfirmDelete { note_id: NoteId },
}

/// Page-local state, rebuilt from the active navigation entry whenever the
/// navigator reports a new revision.
enum PageState {
    Calendar,
    DayDetail {
        date: NaiveDate,
        selected: usize,
    },
    Search {
        input: FieldValue,
        query: SearchQuery,
        selected: usize,
        tag_cursor: usize,
    },
    NoteEdit(NoteForm),
    NoteView {
        note_id: Option<NoteId>,
    },
    Chat {
        input: FieldValue,
        transcript: Vec<ChatLine>,
    },
    Settings,
}

enum ChatLine {
    User(String),
    Notice(String),
}

struct NoteForm {
    editing: Option<NoteId>,
    date: NaiveDate,
    title: FieldValue,
    content: FieldValue,
    tags: FieldValue,
    location: FieldValue,
    field: FormField,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum FormField {
    Title,
    Content,
    Tags,
    Location,
}

#[derive(Clone, Default)]
struct FieldValue {
    value: String,
    cursor: usize,
}

impl FieldValue {
    fn new(value: &str) -> Self {
        FieldValue {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    fn move_left(&mut self) {
        self.cursor = prev_char_boundary(self.cursor, &self.value);
    }

    fn move_right(&mut self) {
        self.cursor = next_char_boundary(self.cursor, &self.value);
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char_boundary(self.cursor, &self.value);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert_str(self.cursor, "▌");
        text
    }

    /// Applies a plain editing key. Returns false for keys it does not handle.
    fn edit(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(c)
            }
            _ => return false,
        }
        true
    }
}

impl NoteForm {
    fn new(date: NaiveDate) -> Self {
        NoteForm {
            editing: None,
            date,
            title: FieldValue::default(),
            content: FieldValue::default(),
            tags: FieldValue::default(),
            location: FieldValue::default(),
            field: FormField::Title,
        }
    }

    fn from_note(note: &Note) -> Self {
        NoteForm {
            editing: Some(note.id.clone()),
            date: note.date,
            title: FieldValue::new(&note.title),
            content: FieldValue::new(&note.content),
            tags: FieldValue::new(&note.tags.join(" ")),
            location: FieldValue::new(note.location.as_deref().unwrap_or_default()),
            field: FormField::Title,
        }
    }

    fn next_field(&mut self) {
        self.field = match self.field {
            FormField::Title => FormField::Content,
            FormField::Content => FormField::Tags,
            FormField::Tags => FormField::Location,
            FormField::Location => FormField::Title,
        };
    }

    fn prev_field(&mut self) {
        self.field = match self.field {
            FormField::Title => FormField::Location,
            FormField::Content => FormField::Title,
            FormField::Tags => FormField::Content,
            FormField::Location => FormField::Tags,
        };
    }

    fn active_field_mut(&mut self) -> &mut FieldValue {
        match self.field {
            FormField::Title => &mut self.title,
            FormField::Content => &mut self.content,
            FormField::Tags => &mut self.tags,
            FormField::Location => &mut self.location,
        }
    }

    fn draft(&self) -> NoteDraft {
        NoteDraft {
            date: Some(self.date),
            title: self.title.value.clone(),
            content: self.content.value.clone(),
            tags: parse_tags(&self.tags.value),
            location: Some(self.location.value.trim().to_string()),
        }
    }
}

impl PageState {
    fn enter(nav: &Navigator, notebook: &Notebook, today: NaiveDate) -> Self {
        let params = nav.params();
        match nav.page() {
            PageId::Calendar => PageState::Calendar,
            PageId::DayDetail => PageState::DayDetail {
                date: params.selected_date.unwrap_or(today),
                selected: 0,
            },
            PageId::Search => {
                let text = params.search_query.clone().unwrap_or_default();
                PageState::Search {
                    input: FieldValue::new(&text),
                    query: SearchQuery::text(text),
                    selected: 0,
                    tag_cursor: 0,
                }
            }
            PageId::NoteEdit => {
                let existing = params
                    .selected_note_id
                    .as_deref()
                    .and_then(|id| notebook.get(id));
                match existing {
                    Some(note) => PageState::NoteEdit(NoteForm::from_note(note)),
                    None => PageState::NoteEdit(NoteForm::new(
                        params.selected_date.unwrap_or(today),
                    )),
                }
            }
            PageId::NoteView => PageState::NoteView {
                note_id: params.selected_note_id.clone(),
            },
            PageId::Chat => PageState::Chat {
                input: FieldValue::default(),
                transcript: vec![ChatLine::Notice(
                    "No assistant is connected. Messages stay in this session.".into(),
                )],
            },
            PageId::Settings => PageState::Settings,
        }
    }
}

impl App {
    fn new(settings: Settings, location: SettingsLocation, start: MonthRef) -> Self {
        let status = format!("Settings from {}", location.path.display());
        let nav = Navigator::with_history_limit(settings.history_limit);
        let calendar = CalendarController::starting_at(start, SystemClock, settings.widths);
        let notebook = Notebook::new();
        let page = PageState::enter(&nav, &notebook, calendar.today());
        let mut app = App {
            settings,
            location,
            seen_revision: nav.revision(),
            nav,
            calendar,
            notebook,
            cursor: start.first_day(),
            picker: None,
            mode: Mode::Normal,
            page,
            status,
        };
        app.reset_cursor();
        app
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key)? {
                        break;
                    }
                    self.sync_page();
                }
            }
        }
        Ok(())
    }

    fn sync_page(&mut self) {
        if self.nav.revision() == self.seen_revision {
            return;
        }
        self.seen_revision = self.nav.revision();
        self.page = PageState::enter(&self.nav, &self.notebook, self.calendar.today());
        tracing::trace!(page = %self.nav.page(), depth = self.nav.depth(), "page entered");
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }
        if let Mode::ConfirmDelete { .. } = self.mode {
            self.handle_confirm_key(key);
            return Ok(false);
        }
        if self.picker.is_some() {
            self.handle_picker_key(key);
            return Ok(false);
        }
        match self.nav.page() {
            PageId::Search => self.handle_search_key(key),
            PageId::NoteEdit => self.handle_form_key(key),
            PageId::Chat => self.handle_chat_key(key),
            PageId::Calendar => self.handle_calendar_key(key),
            PageId::DayDetail => self.handle_day_key(key),
            PageId::NoteView => self.handle_note_view_key(key),
            PageId::Settings => self.handle_settings_key(key),
        }
    }

    /// Keys shared by every page that does not take text input.
    fn handle_dock_key(&mut self, key: KeyEvent) -> Option<bool> {
        let action = match key.code {
            KeyCode::Char('q') => return Some(true),
            KeyCode::Esc | KeyCode::Backspace => {
                self.go_back();
                return Some(false);
            }
            KeyCode::Char('a') => DockAction::AddThought,
            KeyCode::Char('c') => DockAction::Chat,
            KeyCode::Char('g') => DockAction::Calendar,
            KeyCode::Char('/') => DockAction::Search,
            KeyCode::Char('s') => DockAction::Settings,
            _ => return None,
        };
        action.apply(&mut self.nav, self.calendar.today());
        self.status = action.label().to_string();
        Some(false)
    }

    fn go_back(&mut self) {
        let at_root = !self.nav.can_go_back();
        let entry = self.nav.go_back();
        self.status = if at_root {
            "Home".into()
        } else {
            format!("Back to {}", entry.page.title())
        };
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) -> Result<bool> {
        if let Some(quit) = self.handle_dock_key(key) {
            return Ok(quit);
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-7),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(7),
            KeyCode::Char('p') | KeyCode::Char('[') => {
                self.calendar.on_prev_month();
                self.reset_cursor();
            }
            KeyCode::Char('n') | KeyCode::Char(']') => {
                self.calendar.on_next_month();
                self.reset_cursor();
            }
            KeyCode::Char('t') => {
                self.calendar.on_today();
                self.reset_cursor();
            }
            KeyCode::Char('m') => {
                self.picker = Some(MonthYearPicker::open(
                    self.calendar.month(),
                    self.calendar.today(),
                    self.settings.picker_year_span,
                ));
                self.status = "Choose a month and year".into();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(cell) = self.cursor_cell() {
                    if !self.calendar.on_day_cell_click(&cell, &mut self.nav) {
                        self.status = format!(
                            "{} belongs to another month",
                            cell.date.format("%b %-d")
                        );
                    }
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => picker.prev_year(),
            KeyCode::Right | KeyCode::Char('l') => picker.next_year(),
            KeyCode::Up | KeyCode::Char('k') => picker.prev_month(),
            KeyCode::Down | KeyCode::Char('j') => picker.next_month(),
            KeyCode::Enter => {
                match picker.apply() {
                    Ok(month) => {
                        self.calendar.on_pick_month_year(month);
                        self.status = format!("Showing {}", month.label());
                    }
                    Err(err) => self.status = format!("Could not pick month: {}", err),
                }
                self.picker = None;
                self.reset_cursor();
            }
            KeyCode::Esc => {
                picker.cancel();
                self.picker = None;
                self.status = "Canceled".into();
            }
            _ => {}
        }
    }

    fn handle_day_key(&mut self, key: KeyEvent) -> Result<bool> {
        let (date, selected) = match &self.page {
            PageState::DayDetail { date, selected } => (*date, *selected),
            _ => return Ok(false),
        };
        let notes = self
            .notebook
            .on_date(date)
            .into_iter()
            .map(|n| n.id.clone())
            .collect::<Vec<_>>();
        match key.code {
            KeyCode::Char('a') | KeyCode::Char('+') => {
                self.nav
                    .navigate_to(PageId::NoteEdit, PageParams::date(date));
                return Ok(false);
            }
            KeyCode::Up | KeyCode::Char('k') => self.set_day_selection(selected.saturating_sub(1)),
            KeyCode::Down | KeyCode::Char('j') => {
                self.set_day_selection((selected + 1).min(notes.len().saturating_sub(1)))
            }
            KeyCode::Enter => {
                if let Some(id) = notes.get(selected) {
                    self.nav.navigate_to(PageId::NoteView, PageParams::note(id.clone()));
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = notes.get(selected) {
                    self.nav.navigate_to(PageId::NoteEdit, PageParams::note(id.clone()));
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = notes.get(selected) {
                    self.confirm_delete(id.clone());
                }
            }
            _ => {
                if let Some(quit) = self.handle_dock_key(key) {
                    return Ok(quit);
                }
            }
        }
        Ok(false)
    }

    fn set_day_selection(&mut self, index: usize) {
        if let PageState::DayDetail { selected, .. } = &mut self.page {
            *selected = index;
        }
    }

    fn handle_note_view_key(&mut self, key: KeyEvent) -> Result<bool> {
        let note_id = match &self.page {
            PageState::NoteView { note_id } => note_id.clone(),
            _ => None,
        };
        let exists = note_id
            .as_deref()
            .map(|id| self.notebook.get(id).is_some())
            .unwrap_or(false);
        match (key.code, note_id) {
            (KeyCode::Char('e'), Some(id)) if exists => {
                self.nav.navigate_to(PageId::NoteEdit, PageParams::note(id));
            }
            (KeyCode::Char('d'), Some(id)) if exists => self.confirm_delete(id),
            _ => {
                if let Some(quit) = self.handle_dock_key(key) {
                    return Ok(quit);
                }
            }
        }
        Ok(false)
    }

    fn handle_settings_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('r') {
            match load_settings(&self.location) {
                Ok(settings) => {
                    self.calendar = CalendarController::starting_at(
                        self.calendar.month(),
                        SystemClock,
                        settings.widths,
                    );
                    self.settings = settings;
                    self.status = "Settings reloaded (history limit applies next launch)".into();
                }
                Err(err) => self.status = format!("Reload failed: {:#}", err),
            }
            return Ok(false);
        }
        Ok(self.handle_dock_key(key).unwrap_or(false))
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Result<bool> {
        let today = self.calendar.today();
        let tags = self.notebook.tags();
        let PageState::Search {
            input,
            query,
            selected,
            tag_cursor,
        } = &mut self.page
        else {
            return Ok(false);
        };
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.go_back();
                return Ok(false);
            }
            KeyCode::Tab => {
                query.range = query.range.next();
                *selected = 0;
            }
            KeyCode::Up => *selected = selected.saturating_sub(1),
            KeyCode::Down => *selected += 1,
            KeyCode::Char('t') if control => {
                if let Some(tag) = tags.get(*tag_cursor) {
                    query.toggle_tag(tag);
                    *selected = 0;
                }
            }
            KeyCode::Char('n') if control => {
                *tag_cursor = (*tag_cursor + 1).min(tags.len().saturating_sub(1));
            }
            KeyCode::Char('p') if control => *tag_cursor = tag_cursor.saturating_sub(1),
            KeyCode::Enter => {
                let hit = self
                    .notebook
                    .search(query, today)
                    .get(*selected)
                    .map(|n| n.id.clone());
                if let Some(id) = hit {
                    self.nav.navigate_to(PageId::NoteView, PageParams::note(id));
                }
                return Ok(false);
            }
            _ => {
                if input.edit(key) {
                    query.text = input.value.clone();
                    *selected = 0;
                }
            }
        }
        let hits = self.notebook.search(query, today).len();
        *selected = (*selected).min(hits.saturating_sub(1));
        Ok(false)
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<bool> {
        let PageState::NoteEdit(form) = &mut self.page else {
            return Ok(false);
        };
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.go_back();
                self.status = "Discarded changes".into();
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Char('s') if control => self.save_form(),
            KeyCode::Enter if control => self.save_form(),
            KeyCode::Enter => {
                if form.field == FormField::Content {
                    form.active_field_mut().insert_char('\n');
                } else {
                    form.next_field();
                }
            }
            _ => {
                form.active_field_mut().edit(key);
            }
        }
        Ok(false)
    }

    fn save_form(&mut self) {
        let PageState::NoteEdit(form) = &self.page else {
            return;
        };
        let draft = form.draft();
        let result = match form.editing.clone() {
            Some(id) => self.notebook.update(&id, draft).map(|_| id),
            None => self.notebook.add(draft),
        };
        match result {
            Ok(id) => {
                self.go_back();
                self.status = format!("Saved {}", id);
            }
            Err(err) => {
                tracing::info!(%err, "note not saved");
                self.status = format!("Could not save: {}", err);
            }
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) -> Result<bool> {
        let PageState::Chat { input, transcript } = &mut self.page else {
            return Ok(false);
        };
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Char('l') if control => {
                transcript.clear();
                self.status = "Chat cleared".into();
            }
            KeyCode::Enter => {
                let message = input.value.trim().to_string();
                if !message.is_empty() {
                    transcript.push(ChatLine::User(message));
                    transcript.push(ChatLine::Notice("(no assistant connected)".into()));
                    input.clear();
                }
            }
            _ => {
                input.edit(key);
            }
        }
        Ok(false)
    }

    fn confirm_delete(&mut self, note_id: NoteId) {
        self.status = format!("Delete {}? (y to confirm, n/Esc to cancel)", note_id);
        self.mode = Mode::ConfirmDelete { note_id };
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let note_id = match &self.mode {
            Mode::ConfirmDelete { note_id } => note_id.clone(),
            Mode::Normal => return,
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                match self.notebook.remove(&note_id) {
                    Ok(note) => {
                        if self.nav.page() == PageId::NoteView {
                            self.go_back();
                        } else {
                            self.set_day_selection(0);
                        }
                        self.status = format!("Deleted \"{}\"", note.title);
                    }
                    Err(err) => self.status = format!("Delete failed: {}", err),
                }
                self.mode = Mode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.status = "Delete canceled".into();
                self.mode = Mode::Normal;
            }
            _ => {}
        }
    }

    fn reset_cursor(&mut self) {
        let month = self.calendar.month();
        let today = self.calendar.today();
        self.cursor = if month.contains(today) {
            today
        } else {
            month.first_day()
        };
    }

    fn move_cursor(&mut self, days: i64) {
        let target = self.cursor + ChronoDuration::days(days);
        let grid = self.calendar.grid();
        if grid.cell_for(target).is_some() {
            self.cursor = target;
            return;
        }
        let before = self.calendar.month();
        if grid.first_cell().map_or(false, |c| target < c.date) {
            self.calendar.on_prev_month();
        } else {
            self.calendar.on_next_month();
        }
        if self.calendar.month() == before {
            return;
        }
        self.cursor = if self.calendar.grid().cell_for(target).is_some() {
            target
        } else {
            self.calendar.month().first_day()
        };
    }

    fn cursor_cell(&self) -> Option<DayCell> {
        self.calendar
            .grid_with(&self.notebook)
            .cell_for(self.cursor)
            .copied()
    }

    fn draw(&self, f: &mut ratatui::Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);
        match &self.page {
            PageState::Calendar => self.draw_calendar(f, layout[1]),
            PageState::DayDetail { date, selected } => {
                self.draw_day(f, layout[1], *date, *selected)
            }
            PageState::Search {
                input,
                query,
                selected,
                tag_cursor,
            } => self.draw_search(f, layout[1], input, query, *selected, *tag_cursor),
            PageState::NoteEdit(form) => self.draw_form(f, layout[1], form),
            PageState::NoteView { note_id } => self.draw_note(f, layout[1], note_id.as_deref()),
            PageState::Chat { input, transcript } => {
                self.draw_chat(f, layout[1], input, transcript)
            }
            PageState::Settings => self.draw_settings(f, layout[1]),
        }
        self.draw_footer(f, layout[2]);

        if let Some(picker) = &self.picker {
            draw_picker(f, picker);
        }
        if let Mode::ConfirmDelete { note_id } = &self.mode {
            self.draw_confirm(f, note_id);
        }
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                "thoughtgrid ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                self.nav.page().title(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  "),
            Span::styled(
                self.calendar.month().label(),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("{} thoughts", self.notebook.len()),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  •  "),
            Span::styled(
                format!("history {}", self.nav.depth()),
                Style::default().fg(Color::Magenta),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_calendar(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let view = self.calendar.view(&self.notebook);
        let viewport_px = u32::from(area.width) * PX_PER_CELL;
        let pane = (view.widths.fluid.resolve(viewport_px) / PX_PER_CELL) as u16;
        let pane = pane.min(area.width);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(pane),
                Constraint::Min(0),
            ])
            .split(area);

        let weeks = view.grid.week_count().max(1) as u16;
        let col = (pane.saturating_sub(2 + LABEL_WIDTH) / weeks).max(4) as usize;
        let mut lines = vec![
            Line::from(Span::styled(
                view.grid.month().label(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        let mut header = vec![Span::styled(
            format!("{:<w$}", "Day", w = LABEL_WIDTH as usize),
            Style::default().fg(Color::Cyan),
        )];
        for week in 1..=view.grid.week_count() {
            let label = if col >= 7 {
                format!("Week {}", week)
            } else {
                format!("W{}", week)
            };
            header.push(Span::styled(
                format!("{:^col$}", label),
                Style::default().fg(Color::Gray),
            ));
        }
        lines.push(Line::from(header));

        for (weekday, name) in WEEKDAY_NAMES.iter().enumerate() {
            let mut spans = vec![Span::styled(
                format!("{:<w$}", &name[..3], w = LABEL_WIDTH as usize),
                Style::default().fg(Color::White),
            )];
            for week in 0..view.grid.week_count() {
                spans.push(match view.grid.cell_at(week, weekday) {
                    Some(cell) => self.day_span(cell, col),
                    None => Span::raw(" ".repeat(col)),
                });
            }
            lines.push(Line::from(spans));
        }

        let block = Block::default()
            .title(Span::styled(
                "Calendar",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        f.render_widget(Paragraph::new(lines).block(block), columns[1]);
    }

    fn day_span(&self, cell: &DayCell, width: usize) -> Span<'static> {
        let marker = if cell.has_content() && cell.in_displayed_month {
            "•"
        } else {
            " "
        };
        let text = format!("{:^width$}", format!("{:>2}{}", cell.day_of_month, marker));
        let mut style = Style::default().fg(if cell.in_displayed_month {
            Color::White
        } else {
            Color::DarkGray
        });
        if cell.is_today {
            style = style
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if cell.date == self.cursor {
            style = style
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD);
        }
        Span::styled(text, style)
    }

    fn draw_day(&self, f: &mut ratatui::Frame<'_>, area: Rect, date: NaiveDate, selected: usize) {
        let notes = self.notebook.on_date(date);
        let noun = if notes.len() == 1 { "note" } else { "notes" };
        let items = if notes.is_empty() {
            vec![ListItem::new("Nothing recorded yet. Press a to add a thought.")]
        } else {
            notes.iter().map(|n| note_item(n, false)).collect()
        };
        let mut state = ListState::default();
        if !notes.is_empty() {
            state.select(Some(selected.min(notes.len() - 1)));
        }
        let block = Block::default()
            .title(Span::styled(
                format!(
                    "{} · {} {} recorded",
                    format_long_date(date),
                    notes.len(),
                    noun
                ),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::LightCyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_search(
        &self,
        f: &mut ratatui::Frame<'_>,
        area: Rect,
        input: &FieldValue,
        query: &SearchQuery,
        selected: usize,
        tag_cursor: usize,
    ) {
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2), Constraint::Min(3)])
            .split(area);

        let search_box = Paragraph::new(input.with_caret()).block(
            Block::default()
                .title("Search your thoughts")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(search_box, sections[0]);

        let mut filters = vec![Span::styled("range ", Style::default().fg(Color::Gray))];
        for range in DateRange::ALL {
            let style = if range == query.range {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            filters.push(Span::styled(format!(" {} ", range.label()), style));
        }
        filters.push(Span::styled("   tags ", Style::default().fg(Color::Gray)));
        for (idx, tag) in self.notebook.tags().iter().enumerate() {
            let mut style = if query.tags.contains(tag) {
                Style::default().fg(Color::LightMagenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if idx == tag_cursor {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            filters.push(Span::styled(format!("#{} ", tag), style));
        }
        f.render_widget(
            Paragraph::new(Line::from(filters)).wrap(Wrap { trim: true }),
            sections[1],
        );

        let hits = self.notebook.search(query, self.calendar.today());
        let items = if hits.is_empty() {
            vec![ListItem::new("No matching thoughts")]
        } else {
            hits.iter().map(|n| note_item(n, true)).collect()
        };
        let mut state = ListState::default();
        if !hits.is_empty() {
            state.select(Some(selected.min(hits.len() - 1)));
        }
        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!("Results ({})", hits.len()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::LightCyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_stateful_widget(list, sections[2], &mut state);
    }

    fn draw_form(&self, f: &mut ratatui::Frame<'_>, area: Rect, form: &NoteForm) {
        let title = match &form.editing {
            Some(id) => format!("Edit thought {}", id),
            None => format!("New thought for {}", form.date.format("%a, %b %-d %Y")),
        };
        let mut fields = Vec::new();
        fields.extend(field_lines("Title", &form.title, form.field == FormField::Title));
        fields.extend(field_lines(
            "Content",
            &form.content,
            form.field == FormField::Content,
        ));
        fields.extend(field_lines("Tags", &form.tags, form.field == FormField::Tags));
        fields.extend(field_lines(
            "Location",
            &form.location,
            form.field == FormField::Location,
        ));
        fields.push(Line::from(""));
        fields.push(Line::from(Span::styled(
            "Ctrl+S to save • Esc to discard • Tab/Shift-Tab to move • Enter adds newline in Content",
            Style::default().fg(Color::Gray),
        )));
        let form_view = Paragraph::new(fields)
            .block(
                Block::default()
                    .title(Span::styled(
                        title,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(form_view, area);
    }

    fn draw_note(&self, f: &mut ratatui::Frame<'_>, area: Rect, note_id: Option<&str>) {
        let block = Block::default()
            .title(Span::styled(
                "Thought",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let Some(note) = note_id.and_then(|id| self.notebook.get(id)) else {
            let msg = Paragraph::new("Note not found")
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(msg, area);
            return;
        };
        let mut lines = vec![
            Line::from(Span::styled(
                note.title.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format_long_date(note.date),
                Style::default().fg(Color::Gray),
            )),
        ];
        if !note.tags.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("#{}", note.tags.join(" #")),
                Style::default().fg(Color::LightMagenta),
            )));
        }
        if let Some(location) = &note.location {
            lines.push(Line::from(Span::styled(
                format!("@ {}", location),
                Style::default().fg(Color::LightBlue),
            )));
        }
        lines.push(Line::from(""));
        lines.extend(note.content.lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "created {} · updated {}",
                note.created_at.format("%Y-%m-%d %H:%M"),
                note.updated_at.format("%Y-%m-%d %H:%M")
            ),
            Style::default().fg(Color::DarkGray),
        )));
        f.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }

    fn draw_chat(
        &self,
        f: &mut ratatui::Frame<'_>,
        area: Rect,
        input: &FieldValue,
        transcript: &[ChatLine],
    ) {
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(area);
        let lines = transcript
            .iter()
            .map(|line| match line {
                ChatLine::User(text) => Line::from(vec![
                    Span::styled("you  ", Style::default().fg(Color::LightCyan)),
                    Span::raw(text.clone()),
                ]),
                ChatLine::Notice(text) => Line::from(Span::styled(
                    text.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
            })
            .collect::<Vec<_>>();
        let scroll = lines
            .len()
            .saturating_sub(sections[0].height.saturating_sub(2) as usize) as u16;
        let history = Paragraph::new(lines)
            .block(
                Block::default()
                    .title("Chat")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0));
        f.render_widget(history, sections[0]);
        let prompt = Paragraph::new(input.with_caret()).block(
            Block::default()
                .title("Message")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(prompt, sections[1]);
    }

    fn draw_settings(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let w = &self.settings.widths;
        let hints = self.calendar.width_hints();
        let bp = |name: &str, b: &Breakpoint, now: u32| {
            Line::from(format!(
                "  {:<14} base {:>4}px  +{:>4}px/week  → {}px",
                name, b.base, b.unit, now
            ))
        };
        let lines = vec![
            Line::from(Span::styled(
                format!("{}", self.location.path.display()),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Width breakpoints",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            bp("mobile", &w.mobile, hints.mobile),
            bp("tablet", &w.tablet, hints.tablet),
            bp("desktop", &w.desktop, hints.desktop),
            bp("large desktop", &w.large_desktop, hints.large_desktop),
            Line::from(format!("  fluid          {}", hints.fluid)),
            Line::from(""),
            Line::from(format!(
                "History limit: {}",
                self.settings
                    .history_limit
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "unbounded".into())
            )),
            Line::from(format!(
                "Month picker range: ±{} years",
                self.settings.picker_year_span
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press r to reload from disk",
                Style::default().fg(Color::Gray),
            )),
        ];
        let block = Block::default()
            .title(Span::styled(
                "Settings",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);

        let help_bar = Paragraph::new(self.footer_help_line())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(help_bar, rows[0]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        let status = Paragraph::new(self.status.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(status, bottom[0]);

        let detail = Paragraph::new(self.detail_line())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title("Selected"),
            );
        f.render_widget(detail, bottom[1]);
    }

    fn detail_line(&self) -> Line<'static> {
        match &self.page {
            PageState::Calendar => {
                let count = self
                    .cursor_cell()
                    .map(|c| c.content_count)
                    .unwrap_or_default();
                Line::from(vec![
                    Span::styled(
                        self.cursor.format("%a, %b %-d %Y").to_string(),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(format!("  {} thought(s)", count)),
                ])
            }
            PageState::DayDetail { date, selected } => self
                .notebook
                .on_date(*date)
                .get(*selected)
                .copied()
                .map(selected_note_detail)
                .unwrap_or_else(|| Line::from("No note selected")),
            _ => {
                let trail = self
                    .nav
                    .history()
                    .chain(std::iter::once(self.nav.current()))
                    .map(|entry| entry.page.title())
                    .collect::<Vec<_>>();
                Line::from(Span::styled(
                    trail.join(" › "),
                    Style::default().fg(Color::Gray),
                ))
            }
        }
    }

    fn footer_help_line(&self) -> Line<'static> {
        let key = |k: &'static str, color: Color| Span::styled(k, Style::default().fg(color));
        let mut spans = Vec::new();
        if self.picker.is_some() {
            spans.extend([
                key("←→", Color::LightCyan),
                Span::raw(" year  "),
                key("↑↓", Color::LightCyan),
                Span::raw(" month  "),
                key("Enter", Color::LightGreen),
                Span::raw(" apply  "),
                key("Esc", Color::LightRed),
                Span::raw(" cancel"),
            ]);
            return Line::from(spans);
        }
        match self.nav.page() {
            PageId::Calendar => spans.extend([
                key("↑↓ / j k", Color::LightCyan),
                Span::raw(" day  "),
                key("←→ / h l", Color::LightCyan),
                Span::raw(" week  "),
                key("p/n", Color::LightGreen),
                Span::raw(" month  "),
                key("t", Color::LightGreen),
                Span::raw(" today  "),
                key("m", Color::LightYellow),
                Span::raw(" pick  "),
                key("Enter", Color::LightYellow),
                Span::raw(" open day  "),
            ]),
            PageId::DayDetail => spans.extend([
                key("↑↓", Color::LightCyan),
                Span::raw(" browse  "),
                key("Enter", Color::LightYellow),
                Span::raw(" view  "),
                key("a", Color::LightMagenta),
                Span::raw(" add  "),
                key("e", Color::LightYellow),
                Span::raw(" edit  "),
                key("d", Color::LightRed),
                Span::raw(" delete  "),
            ]),
            PageId::NoteView => spans.extend([
                key("e", Color::LightYellow),
                Span::raw(" edit  "),
                key("d", Color::LightRed),
                Span::raw(" delete  "),
            ]),
            PageId::Search => {
                spans.extend([
                    Span::raw("type to search  "),
                    key("Tab", Color::LightCyan),
                    Span::raw(" range  "),
                    key("Ctrl+N/P", Color::LightCyan),
                    Span::raw(" tag  "),
                    key("Ctrl+T", Color::LightMagenta),
                    Span::raw(" toggle tag  "),
                    key("Enter", Color::LightYellow),
                    Span::raw(" open  "),
                    key("Esc", Color::LightRed),
                    Span::raw(" back"),
                ]);
                return Line::from(spans);
            }
            PageId::NoteEdit => {
                spans.extend([
                    key("Ctrl+S", Color::LightGreen),
                    Span::raw(" save  "),
                    key("Tab", Color::LightCyan),
                    Span::raw(" field  "),
                    key("Esc", Color::LightRed),
                    Span::raw(" discard"),
                ]);
                return Line::from(spans);
            }
            PageId::Chat => {
                spans.extend([
                    key("Enter", Color::LightGreen),
                    Span::raw(" send  "),
                    key("Ctrl+L", Color::LightYellow),
                    Span::raw(" clear  "),
                    key("Esc", Color::LightRed),
                    Span::raw(" back"),
                ]);
                return Line::from(spans);
            }
            PageId::Settings => spans.extend([
                key("r", Color::LightYellow),
                Span::raw(" reload  "),
            ]),
        }
        spans.extend([
            key("a", Color::LightMagenta),
            Span::raw(" thought  "),
            key("c", Color::LightCyan),
            Span::raw(" chat  "),
            key("g", Color::LightCyan),
            Span::raw(" calendar  "),
            key("/", Color::LightCyan),
            Span::raw(" search  "),
            key("s", Color::LightCyan),
            Span::raw(" settings  "),
            key("Esc", Color::LightRed),
            Span::raw(" back  "),
            key("q", Color::LightRed),
            Span::raw(" quit"),
        ]);
        Line::from(spans)
    }

    fn draw_confirm(&self, f: &mut ratatui::Frame<'_>, note_id: &str) {
        let area = centered_rect(50, 30, f.size());
        let title = self
            .notebook
            .get(note_id)
            .map(|n| n.title.clone())
            .unwrap_or_else(|| note_id.to_string());
        let body = vec![
            Line::from(Span::styled(
                format!("Delete \"{}\"?", title),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press y to confirm, n or Esc to cancel"),
        ];
        let dialog = Paragraph::new(body).alignment(Alignment::Center).block(
            Block::default()
                .title(Span::styled(
                    "Confirm Delete",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightRed)),
        );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}

fn draw_picker(f: &mut ratatui::Frame<'_>, picker: &MonthYearPicker) {
    let area = centered_rect(40, 50, f.size());
    let arrow = |enabled: bool, glyph: &'static str| {
        Span::styled(
            glyph,
            Style::default().fg(if enabled { Color::White } else { Color::DarkGray }),
        )
    };
    let mut lines = vec![
        Line::from(Span::styled("Year", Style::default().fg(Color::Cyan))),
        Line::from(vec![
            arrow(picker.can_prev_year(), "◀ "),
            Span::styled(
                format!("{}", picker.year()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            arrow(picker.can_next_year(), " ▶"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Month", Style::default().fg(Color::Cyan))),
    ];
    for row in 0..4u32 {
        let spans = (0..3u32)
            .map(|c| {
                let month0 = row * 3 + c;
                let name = MonthRef::new(2000, month0 as i32)
                    .map(|m| m.first_day().format("%b").to_string())
                    .unwrap_or_default();
                let style = if month0 == picker.month0() {
                    Style::default()
                        .bg(Color::Cyan)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Span::styled(format!(" {:^5} ", name), style)
            })
            .collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }
    let dialog = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(Span::styled(
                "Choose month and year",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

fn prev_char_boundary(cursor: usize, text: &str) -> usize {
    text[..cursor]
        .char_indices()
        .next_back()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn next_char_boundary(cursor: usize, text: &str) -> usize {
    text[cursor..]
        .chars()
        .next()
        .map(|ch| cursor + ch.len_utf8())
        .unwrap_or(text.len())
}

fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out = text.chars().take(max.saturating_sub(3)).collect::<String>();
    out.push_str("...");
    out
}

fn note_item(note: &Note, show_date: bool) -> ListItem<'static> {
    let mut spans = Vec::new();
    if show_date {
        spans.push(Span::styled(
            note.date.format("%b %-d, %Y  ").to_string(),
            Style::default().fg(Color::Gray),
        ));
    }
    spans.push(Span::styled(
        note.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    if !note.tags.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("#{}", note.tags.join(" #")),
            Style::default().fg(Color::LightMagenta),
        ));
    }
    let mut lines = vec![Line::from(spans)];
    let preview = note.content.lines().next().unwrap_or_default();
    if !preview.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", truncate_text(preview, 80)),
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        )));
    }
    ListItem::new(lines)
}

fn field_lines(label: &str, field: &FieldValue, active: bool) -> Vec<Line<'static>> {
    let label_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::BOLD | Modifier::DIM);
    let value_style = Style::default().fg(if active { Color::Cyan } else { Color::White });
    let prefix = format!("{}: ", label);
    let spacer = " ".repeat(prefix.chars().count());
    let text = if active {
        field.with_caret()
    } else {
        field.value.clone()
    };
    text.split('\n')
        .enumerate()
        .map(|(idx, line)| {
            Line::from(vec![
                Span::styled(
                    if idx == 0 {
                        prefix.clone()
                    } else {
                        spacer.clone()
                    },
                    label_style,
                ),
                Span::styled(line.to_string(), value_style),
            ])
        })
        .collect()
}

fn selected_note_detail(note: &Note) -> Line<'static> {
    let mut spans = vec![Span::styled(
        note.title.clone(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(location) = &note.location {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("@ {}", location),
            Style::default().fg(Color::LightBlue),
        ));
    }
    if !note.tags.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("#{}", note.tags.join(" #")),
            Style::default().fg(Color::LightMagenta),
        ));
    }
    Line::from(spans)
}
