use super::{Page, PageContext, centered};
use crate::routing::PageId;
use crate::themes::ColorPalette;
use crate::toast::{Notifier, ToastKind};
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use std::time::Duration;

/// Slack in rows when deciding whether a boundary was reached
const TOLERANCE: usize = 1;
const BOUNDARY_TOAST_DURATION: Duration = Duration::from_millis(5000);

pub const BOTTOM_MESSAGE: &str = "You have reached the bottom of the container!";
pub const TOP_MESSAGE: &str = "You have reached the top of the container!";

const GO_BOTTOM_LABEL: &str = "[ Go To Bottom ]";
const GO_TOP_LABEL: &str = "[ Go To Top ]";

const BODY: [&str; 3] = [
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Donec nec venenatis elit. \
     Quisque vitae neque quis velit facilisis tincidunt. Pellentesque habitant morbi tristique \
     senectus et netus et malesuada fames ac turpis egestas. Ut volutpat, nunc id egestas \
     dapibus, odio est placerat purus, ut blandit purus arcu sed turpis. Etiam faucibus \
     ultrices justo sit amet congue. Suspendisse potenti. Donec mollis velit et justo posuere, \
     non euismod magna volutpat.",
    "Integer convallis elit at tincidunt iaculis. Proin tincidunt dapibus arcu. Sed vestibulum \
     purus sed felis convallis fermentum. Phasellus laoreet, arcu sed convallis gravida, felis \
     orci auctor lectus, a fringilla tortor turpis a lectus. Nullam aliquam interdum arcu, in \
     eleifend urna hendrerit vel. Donec euismod metus sed purus pharetra, id dictum elit pretium.",
    "Mauris eleifend ipsum a neque ultricies, sit amet congue risus mattis. Suspendisse a \
     viverra eros, id varius mi. Integer quis lectus vitae augue tincidunt laoreet. Sed feugiat \
     dui id arcu eleifend fringilla. Integer in mi elit. Donec molestie at metus quis tristique. \
     Sed volutpat tincidunt tortor, at cursus mauris ultrices vel. Nulla facilisi.",
];

/// Scroll position of a bounded container, in rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub offset: usize,
    pub content_height: usize,
    pub viewport_height: usize,
}

impl ScrollState {
    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn at_bottom(&self) -> bool {
        self.offset + self.viewport_height + TOLERANCE >= self.content_height
    }

    pub fn at_top(&self) -> bool {
        self.offset <= TOLERANCE
    }

    /// Move to `offset` (clamped). Returns true if the position changed.
    pub fn scroll_to(&mut self, offset: usize) -> bool {
        let clamped = offset.min(self.max_offset());
        if clamped == self.offset {
            return false;
        }
        self.offset = clamped;
        true
    }

    pub fn scroll_by(&mut self, delta: isize) -> bool {
        self.scroll_to(self.offset.saturating_add_signed(delta))
    }
}

/// Word-wrap `text` to `width` columns
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub struct ScrollNotifierPage {
    scroll: ScrollState,
    container: Rect,
    wrapped_width: usize,
    lines: Vec<String>,
}

impl ScrollNotifierPage {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::default(),
            container: Rect::default(),
            wrapped_width: 0,
            lines: Vec::new(),
        }
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    /// Set content and viewport heights, keeping the offset in range
    pub fn set_metrics(&mut self, content_height: usize, viewport_height: usize) {
        self.scroll.content_height = content_height;
        self.scroll.viewport_height = viewport_height;
        self.scroll.offset = self.scroll.offset.min(self.scroll.max_offset());
    }

    /// Apply a scroll and announce any boundary that was reached
    pub fn scroll_to(&mut self, offset: usize, notifier: &Notifier) {
        if !self.scroll.scroll_to(offset) {
            return;
        }
        tracing::trace!(offset = self.scroll.offset, "scroll container moved");
        if self.scroll.at_bottom() {
            notifier.show_toast(BOTTOM_MESSAGE, ToastKind::Info, BOUNDARY_TOAST_DURATION);
        }
        if self.scroll.at_top() {
            notifier.show_toast(TOP_MESSAGE, ToastKind::Info, BOUNDARY_TOAST_DURATION);
        }
    }

    pub fn scroll_by(&mut self, delta: isize, notifier: &Notifier) {
        let target = self.scroll.offset.saturating_add_signed(delta);
        self.scroll_to(target, notifier);
    }

    /// Stop just short of the end; the scroll itself triggers the notice
    pub fn go_to_bottom(&mut self, notifier: &Notifier) {
        let target = self.scroll.max_offset().saturating_sub(TOLERANCE);
        self.scroll_to(target, notifier);
    }

    pub fn go_to_top(&mut self, notifier: &Notifier) {
        self.scroll_to(0, notifier);
    }

    fn rewrap(&mut self, width: usize) {
        if width == self.wrapped_width && !self.lines.is_empty() {
            return;
        }
        self.wrapped_width = width;
        self.lines.clear();
        self.lines.push(GO_BOTTOM_LABEL.to_string());
        for paragraph in BODY {
            self.lines.push(String::new());
            self.lines.extend(wrap_text(paragraph, width));
        }
        self.lines.push(String::new());
        self.lines.push(GO_TOP_LABEL.to_string());
    }

    fn button_at(&self, column: u16, row: u16) -> Option<&'static str> {
        if !self.container.contains(Position::new(column, row)) {
            return None;
        }
        let line = self.scroll.offset + usize::from(row - self.container.y);
        let col = usize::from(column - self.container.x);
        match self.lines.get(line).map(String::as_str) {
            Some(GO_BOTTOM_LABEL) if col < GO_BOTTOM_LABEL.len() => Some(GO_BOTTOM_LABEL),
            Some(GO_TOP_LABEL) if col < GO_TOP_LABEL.len() => Some(GO_TOP_LABEL),
            _ => None,
        }
    }
}

impl Default for ScrollNotifierPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for ScrollNotifierPage {
    fn id(&self) -> PageId {
        PageId::ScrollNotifier
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &PageContext) {
        let page = self.scroll.viewport_height.max(1) as isize;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1, ctx.notifier),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1, ctx.notifier),
            KeyCode::PageDown => self.scroll_by(page, ctx.notifier),
            KeyCode::PageUp => self.scroll_by(-page, ctx.notifier),
            KeyCode::End | KeyCode::Char('b') => self.go_to_bottom(ctx.notifier),
            KeyCode::Home | KeyCode::Char('g') => self.go_to_top(ctx.notifier),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, ctx: &PageContext) {
        let inside = self.container.contains(Position::new(mouse.column, mouse.row));
        match mouse.kind {
            MouseEventKind::ScrollDown if inside => self.scroll_by(1, ctx.notifier),
            MouseEventKind::ScrollUp if inside => self.scroll_by(-1, ctx.notifier),
            MouseEventKind::Down(_) => match self.button_at(mouse.column, mouse.row) {
                Some(GO_BOTTOM_LABEL) => self.go_to_bottom(ctx.notifier),
                Some(GO_TOP_LABEL) => self.go_to_top(ctx.notifier),
                _ => {}
            },
            _ => {}
        }
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &ColorPalette) {
        let outer = centered(area, 52, 20);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Scroll Notifier ")
            .border_style(Style::default().fg(theme.border.to_ratatui()));
        let inner = block.inner(outer);
        f.render_widget(block, outer);

        self.container = inner;
        self.rewrap(usize::from(inner.width));
        self.set_metrics(self.lines.len(), usize::from(inner.height));

        let fg = theme.fg.to_ratatui();
        let button = Style::default()
            .fg(theme.bg.to_ratatui())
            .bg(theme.comment.to_ratatui())
            .add_modifier(Modifier::BOLD);
        let visible: Vec<Line> = self
            .lines
            .iter()
            .skip(self.scroll.offset)
            .take(usize::from(inner.height))
            .map(|l| {
                if l == GO_BOTTOM_LABEL || l == GO_TOP_LABEL {
                    Line::styled(l.as_str(), button)
                } else {
                    Line::styled(l.as_str(), Style::default().fg(fg))
                }
            })
            .collect();
        f.render_widget(Paragraph::new(visible), inner);
    }

    fn hints(&self) -> &'static str {
        "j/k scroll · pgup/pgdn · b bottom · g top · wheel"
    }
}
