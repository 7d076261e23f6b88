use crate::calendar::ContentLookup;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use rand::{distributions::Alphanumeric, Rng};
use std::collections::BTreeMap;

pub type NoteId = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for creating or replacing a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub date: Option<NaiveDate>,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub location: Option<String>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NotebookError {
    #[error("note not found: {0}")]
    NoteNotFound(String),
    #[error("title is required")]
    EmptyTitle,
    #[error("a date is required for new notes")]
    MissingDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    /// The seven days ending today.
    Week,
    /// The calendar month containing today.
    Month,
}

impl DateRange {
    pub const ALL: [DateRange; 4] = [
        DateRange::All,
        DateRange::Today,
        DateRange::Week,
        DateRange::Month,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::All => "all",
            DateRange::Today => "today",
            DateRange::Week => "week",
            DateRange::Month => "month",
        }
    }

    pub fn next(self) -> Self {
        match self {
            DateRange::All => DateRange::Today,
            DateRange::Today => DateRange::Week,
            DateRange::Week => DateRange::Month,
            DateRange::Month => DateRange::All,
        }
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateRange::All => true,
            DateRange::Today => date == today,
            DateRange::Week => date <= today && date > today - Duration::days(7),
            DateRange::Month => date.year() == today.year() && date.month() == today.month(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    /// Matches notes carrying any of these tags; empty matches everything.
    pub tags: Vec<String>,
    pub range: DateRange,
}

impl SearchQuery {
    pub fn text(text: impl Into<String>) -> Self {
        SearchQuery {
            text: text.into(),
            ..SearchQuery::default()
        }
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        let tag = tag.trim().to_lowercase();
        if let Some(pos) = self.tags.iter().position(|t| *t == tag) {
            self.tags.remove(pos);
        } else if !tag.is_empty() {
            self.tags.push(tag);
        }
    }

    fn matches(&self, note: &Note, today: NaiveDate) -> bool {
        let needle = self.text.trim().to_lowercase();
        let text_match = needle.is_empty()
            || note.title.to_lowercase().contains(&needle)
            || note.content.to_lowercase().contains(&needle)
            || note.tags.iter().any(|t| t.to_lowercase().contains(&needle));
        let tag_match = self.tags.is_empty()
            || self
                .tags
                .iter()
                .any(|t| note.tags.iter().any(|n| n.eq_ignore_ascii_case(t)));
        text_match && tag_match && self.range.contains(note.date, today)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notebook {
    notes: BTreeMap<NoteId, Note>,
}

impl Notebook {
    pub fn new() -> Self {
        Notebook::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn add(&mut self, draft: NoteDraft) -> Result<NoteId, NotebookError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(NotebookError::EmptyTitle);
        }
        let date = draft.date.ok_or(NotebookError::MissingDate)?;
        let id = self.unused_id();
        let now = Utc::now();
        let note = Note {
            id: id.clone(),
            date,
            title: title.to_string(),
            content: draft.content,
            tags: normalize_tags(draft.tags),
            location: draft.location.filter(|l| !l.trim().is_empty()),
            created_at: now,
            updated_at: now,
        };
        tracing::debug!(note = %id, %date, "note added");
        self.notes.insert(id.clone(), note);
        Ok(id)
    }

    /// Replaces a note's fields. A draft without a date keeps the existing one.
    pub fn update(&mut self, id: &str, draft: NoteDraft) -> Result<(), NotebookError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(NotebookError::EmptyTitle);
        }
        let note = self
            .notes
            .get_mut(id)
            .ok_or_else(|| NotebookError::NoteNotFound(id.to_string()))?;
        note.title = title;
        note.content = draft.content;
        note.tags = normalize_tags(draft.tags);
        note.location = draft.location.filter(|l| !l.trim().is_empty());
        if let Some(date) = draft.date {
            note.date = date;
        }
        note.updated_at = Utc::now();
        tracing::debug!(note = %id, "note updated");
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Note, NotebookError> {
        self.notes
            .remove(id)
            .ok_or_else(|| NotebookError::NoteNotFound(id.to_string()))
    }

    /// Notes recorded on `date`, oldest first.
    pub fn on_date(&self, date: NaiveDate) -> Vec<&Note> {
        let mut notes = self
            .notes
            .values()
            .filter(|n| n.date == date)
            .collect::<Vec<_>>();
        notes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        notes
    }

    /// Matching notes, most recent date first.
    pub fn search(&self, query: &SearchQuery, today: NaiveDate) -> Vec<&Note> {
        let mut notes = self
            .notes
            .values()
            .filter(|n| query.matches(n, today))
            .collect::<Vec<_>>();
        notes.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.created_at.cmp(&a.created_at))
                .then(a.id.cmp(&b.id))
        });
        notes
    }

    /// Every tag in use, sorted.
    pub fn tags(&self) -> Vec<String> {
        let mut tags = self
            .notes
            .values()
            .flat_map(|n| n.tags.iter().cloned())
            .collect::<Vec<_>>();
        tags.sort();
        tags.dedup();
        tags
    }

    fn unused_id(&self) -> NoteId {
        loop {
            let id = generate_id();
            if !self.notes.contains_key(&id) {
                return id;
            }
        }
    }
}

impl ContentLookup for Notebook {
    fn content_count(&self, date: NaiveDate) -> usize {
        self.notes.values().filter(|n| n.date == date).count()
    }
}

/// Splits free text on whitespace and commas into tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().to_string())
        .collect()
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

fn generate_id() -> NoteId {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(day: NaiveDate, title: &str, content: &str, tags: &[&str]) -> NoteDraft {
        NoteDraft {
            date: Some(day),
            title: title.into(),
            content: content.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            location: None,
        }
    }

    fn sample() -> Notebook {
        let mut book = Notebook::new();
        book.add(draft(
            date(2026, 10, 16),
            "Project Planning Session",
            "Calendar integration and timeline",
            &["work", "planning"],
        ))
        .unwrap();
        book.add(draft(
            date(2026, 10, 12),
            "Design System Updates",
            "New accent colors",
            &["design", "UI", "ui"],
        ))
        .unwrap();
        book.add(draft(
            date(2026, 9, 30),
            "AI Integration Ideas",
            "Smart categorization",
            &["ai", "planning"],
        ))
        .unwrap();
        book
    }

    #[test]
    fn add_validates_and_normalizes() {
        let mut book = Notebook::new();
        assert_eq!(
            book.add(draft(date(2026, 1, 1), "  ", "", &[])),
            Err(NotebookError::EmptyTitle)
        );
        let missing = NoteDraft {
            title: "x".into(),
            ..NoteDraft::default()
        };
        assert_eq!(book.add(missing), Err(NotebookError::MissingDate));

        let id = book
            .add(draft(date(2026, 1, 1), " Idea ", "", &["Work", "work", " "]))
            .unwrap();
        let note = book.get(&id).unwrap();
        assert_eq!(id.len(), 6);
        assert_eq!(note.title, "Idea");
        assert_eq!(note.tags, vec!["work".to_string()]);
    }

    #[test]
    fn counts_feed_the_calendar() {
        let book = sample();
        assert_eq!(book.content_count(date(2026, 10, 16)), 1);
        assert_eq!(book.content_count(date(2026, 10, 17)), 0);
        assert_eq!(book.on_date(date(2026, 10, 12)).len(), 1);
    }

    #[test]
    fn search_matches_text_case_insensitively() {
        let book = sample();
        let today = date(2026, 10, 16);
        let hits = book.search(&SearchQuery::text("INTEGRATION"), today);
        let titles = hits.iter().map(|n| n.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["Project Planning Session", "AI Integration Ideas"]);
        assert_eq!(book.search(&SearchQuery::text("ui"), today).len(), 1);
    }

    #[test]
    fn search_filters_by_tag_and_range() {
        let book = sample();
        let today = date(2026, 10, 16);
        let mut query = SearchQuery::default();
        query.toggle_tag("planning");
        assert_eq!(book.search(&query, today).len(), 2);
        query.range = DateRange::Month;
        assert_eq!(book.search(&query, today).len(), 1);
        query.range = DateRange::Today;
        assert_eq!(book.search(&query, today).len(), 1);
        query.toggle_tag("planning");
        query.range = DateRange::Week;
        assert_eq!(book.search(&query, today).len(), 2);
    }

    #[test]
    fn tag_filter_ignores_case() {
        let mut book = Notebook::new();
        book.add(draft(date(2026, 10, 16), "Standup", "", &["Work"]))
            .unwrap();
        let today = date(2026, 10, 16);
        let mut query = SearchQuery::default();
        query.toggle_tag("Work");
        assert_eq!(query.tags, vec!["work"]);
        assert_eq!(book.search(&query, today).len(), 1);
        query.toggle_tag("WORK");
        assert!(query.tags.is_empty());
        query.tags.push("WoRk".into());
        assert_eq!(book.search(&query, today).len(), 1);
    }

    #[test]
    fn update_and_remove() {
        let mut book = sample();
        let id = book.on_date(date(2026, 10, 12))[0].id.clone();
        book.update(
            &id,
            NoteDraft {
                title: "Design review".into(),
                ..NoteDraft::default()
            },
        )
        .unwrap();
        let note = book.get(&id).unwrap();
        assert_eq!(note.title, "Design review");
        assert_eq!(note.date, date(2026, 10, 12));
        assert!(note.tags.is_empty());

        assert_eq!(
            book.update("nope", draft(date(2026, 1, 1), "x", "", &[])),
            Err(NotebookError::NoteNotFound("nope".into()))
        );
        book.remove(&id).unwrap();
        assert!(book.get(&id).is_none());
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn tags_are_sorted_and_unique() {
        assert_eq!(sample().tags(), vec!["ai", "design", "planning", "ui", "work"]);
        assert_eq!(parse_tags("a, b  c,,"), vec!["a", "b", "c"]);
    }
}
