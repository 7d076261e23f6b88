use crate::navigation::{NavEntry, Navigator, PageId, PageParams};
use chrono::NaiveDate;

/// Global shortcuts available from every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DockAction {
    AddThought,
    Chat,
    Calendar,
    Search,
    Settings,
}

impl DockAction {
    pub const ALL: [DockAction; 5] = [
        DockAction::AddThought,
        DockAction::Chat,
        DockAction::Calendar,
        DockAction::Search,
        DockAction::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DockAction::AddThought => "Add New Thought",
            DockAction::Chat => "Chat with AI",
            DockAction::Calendar => "Calendar View",
            DockAction::Search => "Advanced Search",
            DockAction::Settings => "Settings",
        }
    }

    pub fn target(&self, today: NaiveDate) -> NavEntry {
        match self {
            DockAction::AddThought => NavEntry::new(PageId::NoteEdit, PageParams::date(today)),
            DockAction::Chat => NavEntry::new(PageId::Chat, PageParams::default()),
            DockAction::Calendar => NavEntry::new(PageId::Calendar, PageParams::default()),
            DockAction::Search => NavEntry::new(PageId::Search, PageParams::default()),
            DockAction::Settings => NavEntry::new(PageId::Settings, PageParams::default()),
        }
    }

    /// Navigates to the action's page. Always pushes history, even when the
    /// target is the page already shown.
    pub fn apply<'a>(&self, nav: &'a mut Navigator, today: NaiveDate) -> &'a NavEntry {
        let NavEntry { page, params } = self.target(today);
        nav.navigate_to(page, params)
    }
}
