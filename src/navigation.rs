use chrono::NaiveDate;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("unknown page: {0}")]
    UnknownPage(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Calendar,
    DayDetail,
    Search,
    NoteEdit,
    NoteView,
    Chat,
    Settings,
}

impl PageId {
    pub const ALL: [PageId; 7] = [
        PageId::Calendar,
        PageId::DayDetail,
        PageId::Search,
        PageId::NoteEdit,
        PageId::NoteView,
        PageId::Chat,
        PageId::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Calendar => "calendar",
            PageId::DayDetail => "day-detail",
            PageId::Search => "search",
            PageId::NoteEdit => "note-edit",
            PageId::NoteView => "note-view",
            PageId::Chat => "chat",
            PageId::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PageId::Calendar => "Calendar",
            PageId::DayDetail => "Day",
            PageId::Search => "Search",
            PageId::NoteEdit => "Edit Thought",
            PageId::NoteView => "Thought",
            PageId::Chat => "Chat",
            PageId::Settings => "Settings",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageId {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageId::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| NavigationError::UnknownPage(s.to_string()))
    }
}

/// Parameters handed to the target page. Only the keys a page recognizes are
/// read; `extra` is passed through untouched for other collaborators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    pub selected_date: Option<NaiveDate>,
    pub selected_note_id: Option<String>,
    pub search_query: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl PageParams {
    pub fn date(date: NaiveDate) -> Self {
        PageParams {
            selected_date: Some(date),
            ..PageParams::default()
        }
    }

    pub fn note(note_id: impl Into<String>) -> Self {
        PageParams {
            selected_note_id: Some(note_id.into()),
            ..PageParams::default()
        }
    }

    pub fn query(query: impl Into<String>) -> Self {
        PageParams {
            search_query: Some(query.into()),
            ..PageParams::default()
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub page: PageId,
    pub params: PageParams,
}

impl NavEntry {
    pub fn new(page: PageId, params: PageParams) -> Self {
        NavEntry { page, params }
    }

    pub fn root() -> Self {
        NavEntry::new(PageId::Calendar, PageParams::default())
    }
}

impl Default for NavEntry {
    fn default() -> Self {
        NavEntry::root()
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: NavEntry,
    history: VecDeque<NavEntry>,
    history_limit: Option<usize>,
    revision: u64,
}

impl Default for Navigator {
    fn default() -> Self {
        Navigator::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Navigator {
            current: NavEntry::root(),
            history: VecDeque::new(),
            history_limit: None,
            revision: 0,
        }
    }

    /// Caps the back-history at `limit` entries; the oldest entries are
    /// dropped first once the cap is reached.
    pub fn with_history_limit(limit: Option<usize>) -> Self {
        Navigator {
            history_limit: limit,
            ..Navigator::new()
        }
    }

    pub fn current(&self) -> &NavEntry {
        &self.current
    }

    pub fn page(&self) -> PageId {
        self.current.page
    }

    pub fn params(&self) -> &PageParams {
        &self.current.params
    }

    /// Back-history, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &NavEntry> + '_ {
        self.history.iter()
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Increases on every transition, so a renderer can tell whether the
    /// active entry changed since it last looked.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn navigate_to(&mut self, page: PageId, params: PageParams) -> &NavEntry {
        let next = NavEntry::new(page, params);
        let previous = std::mem::replace(&mut self.current, next);
        tracing::debug!(from = %previous.page, to = %page, depth = self.history.len() + 1, "navigate");
        self.history.push_back(previous);
        if let Some(limit) = self.history_limit {
            while self.history.len() > limit {
                if let Some(dropped) = self.history.pop_front() {
                    tracing::trace!(page = %dropped.page, "history limit reached, dropping oldest entry");
                }
            }
        }
        self.revision += 1;
        &self.current
    }

    pub fn go_back(&mut self) -> &NavEntry {
        match self.history.pop_back() {
            Some(previous) => {
                tracing::debug!(from = %self.current.page, to = %previous.page, depth = self.history.len(), "back");
                self.current = previous;
            }
            None => {
                tracing::debug!(from = %self.current.page, "back with empty history, resetting to calendar");
                self.current = NavEntry::root();
            }
        }
        self.revision += 1;
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn starts_at_calendar_root() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), &NavEntry::root());
        assert_eq!(nav.depth(), 0);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn day_detail_then_back_returns_to_root() {
        let mut nav = Navigator::new();
        let day = date(2024, 2, 14);
        nav.navigate_to(PageId::DayDetail, PageParams::date(day));
        assert_eq!(nav.page(), PageId::DayDetail);
        assert_eq!(nav.params().selected_date, Some(day));
        assert_eq!(nav.depth(), 1);

        nav.go_back();
        assert_eq!(nav.current(), &NavEntry::root());
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn params_replace_instead_of_merging() {
        let mut nav = Navigator::new();
        nav.navigate_to(PageId::NoteEdit, PageParams::date(date(2024, 1, 1)));
        nav.navigate_to(PageId::NoteView, PageParams::note("abc123"));
        assert_eq!(nav.params().selected_date, None);
        assert_eq!(nav.params().selected_note_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn navigate_then_back_restores_previous_entry() {
        let mut nav = Navigator::new();
        nav.navigate_to(PageId::Search, PageParams::query("plan"));
        nav.navigate_to(PageId::NoteView, PageParams::note("n1").with_extra("from", "search"));
        let before = nav.current().clone();
        let depth = nav.depth();

        nav.navigate_to(PageId::Chat, PageParams::default());
        nav.go_back();
        assert_eq!(nav.current(), &before);
        assert_eq!(nav.depth(), depth);
        assert_eq!(nav.params().extra.get("from").map(String::as_str), Some("search"));
    }

    #[test]
    fn back_is_idempotent_at_root() {
        let mut nav = Navigator::new();
        for page in [PageId::Search, PageId::Chat, PageId::Settings] {
            nav.navigate_to(page, PageParams::default());
        }
        for _ in 0..3 {
            nav.go_back();
        }
        assert_eq!(nav.current(), &NavEntry::root());
        assert_eq!(nav.depth(), 0);
        nav.go_back();
        nav.go_back();
        assert_eq!(nav.current(), &NavEntry::root());
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn back_from_non_root_page_with_empty_history_resets() {
        let mut nav = Navigator::with_history_limit(Some(0));
        nav.navigate_to(PageId::Settings, PageParams::default());
        assert_eq!(nav.depth(), 0);
        nav.go_back();
        assert_eq!(nav.current(), &NavEntry::root());
    }

    #[test]
    fn history_limit_drops_oldest() {
        let mut nav = Navigator::with_history_limit(Some(2));
        nav.navigate_to(PageId::Search, PageParams::default());
        nav.navigate_to(PageId::Chat, PageParams::default());
        nav.navigate_to(PageId::Settings, PageParams::default());
        let kept = nav.history().map(|e| e.page).collect::<Vec<_>>();
        assert_eq!(kept, vec![PageId::Search, PageId::Chat]);
    }

    #[test]
    fn revision_tracks_every_transition() {
        let mut nav = Navigator::new();
        nav.navigate_to(PageId::Chat, PageParams::default());
        nav.go_back();
        nav.go_back();
        assert_eq!(nav.revision(), 3);
    }

    #[test]
    fn page_ids_parse_from_kebab_case() {
        for page in PageId::ALL {
            assert_eq!(page.as_str().parse::<PageId>().unwrap(), page);
        }
        assert_eq!(
            "inbox".parse::<PageId>(),
            Err(NavigationError::UnknownPage("inbox".into()))
        );
    }
}
