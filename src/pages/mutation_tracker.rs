use super::{Page, PageContext};
use crate::observer::{EventSource, Subscription};
use crate::routing::PageId;
use crate::themes::ColorPalette;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Most recent changes kept in the log
pub const MAX_CHANGES: usize = 5;

const INITIAL_TEXT: &str = "Press 'e' to enable editing and modify this text.";

/// A change observed inside the tracked subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CharacterData { text: String },
    Attributes { name: String },
    ChildList { added: usize, removed: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Blue,
    Green,
}

impl Background {
    fn toggled(self) -> Self {
        match self {
            Background::Blue => Background::Green,
            Background::Green => Background::Blue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildNode {
    pub id: i64,
    pub text: String,
}

/// The observable subtree: an editable paragraph, a background attribute and
/// a list of child rows. Every change is published to observers.
pub struct ObservedSubtree {
    text: String,
    editable: bool,
    background: Background,
    children: Vec<ChildNode>,
    last_child_id: i64,
    mutations: EventSource<Mutation>,
}

impl ObservedSubtree {
    pub fn new() -> Self {
        Self {
            text: INITIAL_TEXT.to_string(),
            editable: false,
            background: Background::Blue,
            children: Vec::new(),
            last_child_id: 0,
            mutations: EventSource::new(),
        }
    }

    /// Subscribe to every mutation in the subtree
    pub fn observe(&self, callback: impl FnMut(&[Mutation]) + 'static) -> Subscription {
        self.mutations.subscribe(callback)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn children(&self) -> &[ChildNode] {
        &self.children
    }

    pub fn toggle_editable(&mut self) {
        self.editable = !self.editable;
        self.emit_attribute("contenteditable");
    }

    pub fn toggle_background(&mut self) {
        self.background = self.background.toggled();
        self.emit_attribute("class");
    }

    /// Replace the paragraph text. Unchanged text is not a mutation.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.text {
            return;
        }
        self.text = text.clone();
        self.mutations.emit_one(Mutation::CharacterData { text });
    }

    /// Append a child keyed by `timestamp_ms`, bumped if needed to stay unique.
    pub fn add_child(&mut self, timestamp_ms: i64) -> i64 {
        let id = timestamp_ms.max(self.last_child_id + 1);
        self.last_child_id = id;
        self.children.push(ChildNode {
            id,
            text: format!("Child with ID: {id}"),
        });
        self.mutations.emit_one(Mutation::ChildList {
            added: 1,
            removed: 0,
        });
        id
    }

    pub fn remove_child(&mut self, id: i64) -> bool {
        let before = self.children.len();
        self.children.retain(|c| c.id != id);
        let removed = before - self.children.len();
        if removed > 0 {
            self.mutations.emit_one(Mutation::ChildList { added: 0, removed });
        }
        removed > 0
    }

    pub fn remove_all_children(&mut self) {
        let removed = self.children.len();
        self.children.clear();
        self.mutations.emit_one(Mutation::ChildList { added: 0, removed });
    }

    fn emit_attribute(&self, name: &str) {
        self.mutations.emit_one(Mutation::Attributes {
            name: name.to_string(),
        });
    }
}

impl Default for ObservedSubtree {
    fn default() -> Self {
        Self::new()
    }
}

/// One line of the change log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub kind: &'static str,
    pub time: String,
    pub detail: String,
}

impl ChangeEntry {
    /// Describe a mutation. Child-list records that add and remove nothing
    /// are not worth logging.
    pub fn from_mutation(mutation: &Mutation, time: impl Into<String>) -> Option<Self> {
        let (kind, detail) = match mutation {
            Mutation::CharacterData { text } => ("Text Change", format!("Text changed to: {text}")),
            Mutation::Attributes { name } => ("Attribute Change", format!("{name} was modified")),
            Mutation::ChildList { added: 0, removed: 0 } => return None,
            Mutation::ChildList { added, removed } => (
                "Structure Change",
                format!("Added: {added}, Removed: {removed} nodes"),
            ),
        };
        Some(Self {
            kind,
            time: time.into(),
            detail,
        })
    }
}

/// Newest-first log holding at most `capacity` entries
#[derive(Debug, Clone)]
pub struct ChangeLog {
    entries: VecDeque<ChangeEntry>,
    capacity: usize,
}

impl ChangeLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn record(&mut self, mutation: &Mutation, time: impl Into<String>) {
        if let Some(entry) = ChangeEntry::from_mutation(mutation, time) {
            self.entries.push_front(entry);
            self.entries.truncate(self.capacity);
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &ChangeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct MutationTrackerPage {
    subtree: ObservedSubtree,
    log: Rc<RefCell<ChangeLog>>,
    _observer: Subscription,
    /// Paragraph text being typed while editing is enabled
    draft: String,
    selected_child: ListState,
}

impl MutationTrackerPage {
    pub fn new() -> Self {
        let subtree = ObservedSubtree::new();
        let log = Rc::new(RefCell::new(ChangeLog::new(MAX_CHANGES)));

        let sink = Rc::clone(&log);
        let observer = subtree.observe(move |mutations| {
            let time = chrono::Local::now().format("%H:%M:%S").to_string();
            let mut log = sink.borrow_mut();
            for mutation in mutations {
                log.record(mutation, time.clone());
            }
        });

        Self {
            subtree,
            log,
            _observer: observer,
            draft: String::new(),
            selected_child: ListState::default(),
        }
    }

    pub fn subtree(&self) -> &ObservedSubtree {
        &self.subtree
    }

    pub fn log(&self) -> std::cell::Ref<'_, ChangeLog> {
        self.log.borrow()
    }

    fn toggle_editing(&mut self) {
        if self.subtree.is_editable() {
            // Leaving the field commits what was typed
            let draft = std::mem::take(&mut self.draft);
            self.subtree.set_text(draft);
        } else {
            self.draft = self.subtree.text().to_string();
        }
        self.subtree.toggle_editable();
    }

    fn add_child(&mut self) {
        self.subtree.add_child(chrono::Local::now().timestamp_millis());
        self.selected_child.select(Some(self.subtree.children().len() - 1));
    }

    fn remove_selected_child(&mut self) {
        let Some(index) = self.selected_child.selected() else {
            return;
        };
        let Some(id) = self.subtree.children().get(index).map(|c| c.id) else {
            return;
        };
        self.subtree.remove_child(id);
        let remaining = self.subtree.children().len();
        self.selected_child
            .select(if remaining == 0 { None } else { Some(index.min(remaining - 1)) });
    }

    fn remove_all_children(&mut self) {
        if self.subtree.children().is_empty() {
            return;
        }
        self.subtree.remove_all_children();
        self.selected_child.select(None);
    }

    fn select_child(&mut self, delta: isize) {
        let count = self.subtree.children().len();
        if count == 0 {
            return;
        }
        let current = self.selected_child.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(count - 1);
        self.selected_child.select(Some(next));
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.toggle_editing(),
            KeyCode::Backspace => {
                self.draft.pop();
            }
            KeyCode::Char(c) => self.draft.push(c),
            _ => {}
        }
    }
}

impl Default for MutationTrackerPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for MutationTrackerPage {
    fn id(&self) -> PageId {
        PageId::MutationTracker
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &PageContext) {
        if self.subtree.is_editable() {
            self.handle_edit_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('e') => self.toggle_editing(),
            KeyCode::Char('b') => self.subtree.toggle_background(),
            KeyCode::Char('a') => self.add_child(),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected_child(),
            KeyCode::Char('X') => self.remove_all_children(),
            KeyCode::Down | KeyCode::Char('j') => self.select_child(1),
            KeyCode::Up | KeyCode::Char('k') => self.select_child(-1),
            _ => {}
        }
    }

    fn captures_input(&self) -> bool {
        self.subtree.is_editable()
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &ColorPalette) {
        let fg = theme.fg.to_ratatui();
        let comment = theme.comment.to_ratatui();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        // Observed subtree
        let tint = match self.subtree.background() {
            Background::Blue => theme.blue,
            Background::Green => theme.green,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" DOM Change Tracker using a Mutation Observer ")
            .border_style(Style::default().fg(tint.to_ratatui()));
        let inner = block.inner(chunks[0]);
        f.render_widget(block, chunks[0]);

        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(inner);

        let (text, text_style, title) = if self.subtree.is_editable() {
            (
                format!("{}▏", self.draft),
                Style::default().fg(fg).bg(theme.bg_highlight.to_ratatui()),
                " editing · enter/esc to finish ",
            )
        } else {
            (self.subtree.text().to_string(), Style::default().fg(fg), "")
        };
        let paragraph = Paragraph::new(text)
            .style(text_style)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(comment)),
            );
        f.render_widget(paragraph, parts[0]);

        let children: Vec<ListItem> = self
            .subtree
            .children()
            .iter()
            .map(|c| ListItem::new(c.text.clone()))
            .collect();
        let list = List::new(children)
            .style(Style::default().fg(fg))
            .highlight_style(
                Style::default()
                    .bg(tint.to_ratatui())
                    .fg(theme.bg.to_ratatui())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("› ");
        f.render_stateful_widget(list, parts[1], &mut self.selected_child);

        // Change log
        let log = self.log.borrow();
        let mut lines: Vec<Line> = Vec::new();
        if log.is_empty() {
            lines.push(Line::styled("No changes detected yet", Style::default().fg(comment)));
        }
        for entry in log.entries() {
            lines.push(Line::from(vec![
                Span::styled("⚠ ", Style::default().fg(theme.blue.to_ratatui())),
                Span::styled(entry.kind, Style::default().fg(fg).add_modifier(Modifier::BOLD)),
                Span::styled(format!(" at {}", entry.time), Style::default().fg(comment)),
            ]));
            lines.push(Line::styled(
                format!("  {}", entry.detail),
                Style::default().fg(comment),
            ));
        }
        let changes = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Recent Changes ")
                .border_style(Style::default().fg(theme.border.to_ratatui())),
        );
        f.render_widget(changes, chunks[1]);
    }

    fn hints(&self) -> &'static str {
        if self.subtree.is_editable() {
            "type to edit · enter/esc finish editing"
        } else {
            "e edit · b background · a add child · d remove · X remove all · j/k select"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorded(subtree: &ObservedSubtree) -> (Rc<RefCell<ChangeLog>>, Subscription) {
        let log = Rc::new(RefCell::new(ChangeLog::new(MAX_CHANGES)));
        let sink = Rc::clone(&log);
        let sub = subtree.observe(move |mutations| {
            for m in mutations {
                sink.borrow_mut().record(m, "12:00:00");
            }
        });
        (log, sub)
    }

    #[test]
    fn test_log_is_bounded_newest_first() {
        let mut subtree = ObservedSubtree::new();
        let (log, _sub) = recorded(&subtree);

        for i in 0..12 {
            subtree.add_child(i);
        }
        subtree.toggle_background();

        let log = log.borrow();
        assert_eq!(log.len(), MAX_CHANGES);
        let first = log.entries().next().unwrap();
        assert_eq!(first.kind, "Attribute Change");
        assert_eq!(first.detail, "class was modified");
    }

    #[test]
    fn test_oldest_entries_evicted_first() {
        let mut log = ChangeLog::new(MAX_CHANGES);
        for i in 0..7 {
            log.record(&Mutation::CharacterData { text: i.to_string() }, "t");
        }
        let details: Vec<&str> = log.entries().map(|e| e.detail.as_str()).collect();
        assert_eq!(
            details,
            vec![
                "Text changed to: 6",
                "Text changed to: 5",
                "Text changed to: 4",
                "Text changed to: 3",
                "Text changed to: 2",
            ]
        );
    }

    #[test]
    fn test_empty_child_list_mutation_ignored() {
        let mut subtree = ObservedSubtree::new();
        let (log, _sub) = recorded(&subtree);

        subtree.remove_all_children();
        assert!(log.borrow().is_empty());

        subtree.add_child(1);
        subtree.add_child(2);
        subtree.remove_all_children();
        let log = log.borrow();
        assert_eq!(
            log.entries().next().unwrap().detail,
            "Added: 0, Removed: 2 nodes"
        );
    }

    #[test]
    fn test_child_ids_are_unique() {
        let mut subtree = ObservedSubtree::new();
        let a = subtree.add_child(1000);
        let b = subtree.add_child(1000);
        assert_ne!(a, b);
        assert!(subtree.remove_child(a));
        assert!(!subtree.remove_child(a));
        assert_eq!(subtree.children().len(), 1);
        assert_eq!(subtree.children()[0].text, format!("Child with ID: {b}"));
    }

    #[test]
    fn test_unchanged_text_is_not_a_mutation() {
        let mut subtree = ObservedSubtree::new();
        let (log, _sub) = recorded(&subtree);

        subtree.set_text(INITIAL_TEXT);
        assert!(log.borrow().is_empty());
        subtree.set_text("hello");
        assert_eq!(
            log.borrow().entries().next().unwrap().detail,
            "Text changed to: hello"
        );
    }

    #[test]
    fn test_editing_commits_on_leave() {
        let notifier = crate::toast::Notifier::new();
        let ctx = PageContext {
            notifier: &notifier,
            now: std::time::Instant::now(),
        };
        let mut page = MutationTrackerPage::new();
        let key = |code| KeyEvent::from(code);

        page.handle_key(key(KeyCode::Char('e')), &ctx);
        assert!(page.captures_input());
        for _ in 0..INITIAL_TEXT.len() {
            page.handle_key(key(KeyCode::Backspace), &ctx);
        }
        for c in "hi".chars() {
            page.handle_key(key(KeyCode::Char(c)), &ctx);
        }
        page.handle_key(key(KeyCode::Enter), &ctx);

        assert!(!page.captures_input());
        assert_eq!(page.subtree().text(), "hi");
        let kinds: Vec<&str> = page.log().entries().map(|e| e.kind).collect();
        assert_eq!(kinds, vec!["Attribute Change", "Text Change", "Attribute Change"]);
    }

    #[test]
    fn test_dropping_page_stops_observation() {
        let page = MutationTrackerPage::new();
        assert_eq!(page.subtree.mutations.subscriber_count(), 1);
        let MutationTrackerPage {
            subtree, _observer, ..
        } = page;
        drop(_observer);
        assert_eq!(subtree.mutations.subscriber_count(), 0);
    }
}
