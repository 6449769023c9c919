use super::{Page, PageContext};
use crate::config::InfiniteScrollConfig;
use crate::observer::{EventSource, Subscription};
use crate::routing::PageId;
use crate::themes::ColorPalette;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const CARD_HEIGHT: u16 = 4;
const COLUMNS: usize = 3;
/// Rows of slack below the viewport in which the sentinel already counts as visible
const SENTINEL_MARGIN: usize = 1;
const PLACEHOLDER_IMAGE: &str = "https://placehold.co/300x200";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub id: u32,
    pub title: String,
    pub image_url: String,
}

/// One observation of the sentinel row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentinelEntry {
    pub is_intersecting: bool,
    pub at: Instant,
}

/// Items loaded so far plus the simulated fetch in flight
#[derive(Debug)]
pub struct InfiniteFeed {
    items: Vec<FeedItem>,
    page: u32,
    /// Completion time of the pending fetch
    pending: Option<Instant>,
    batch_size: usize,
    page_ceiling: u32,
    fetch_delay: Duration,
}

impl InfiniteFeed {
    pub fn new(batch_size: usize, page_ceiling: u32, fetch_delay: Duration) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            pending: None,
            batch_size: batch_size.max(1),
            page_ceiling,
            fetch_delay,
        }
    }

    pub fn from_config(config: &InfiniteScrollConfig) -> Self {
        Self::new(config.batch_size, config.page_ceiling, config.fetch_delay())
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn has_more(&self) -> bool {
        self.page < self.page_ceiling
    }

    /// React to the sentinel coming into view. Starts a fetch unless one is
    /// already running or the ceiling was reached. Returns true if started.
    pub fn sentinel_visible(&mut self, now: Instant) -> bool {
        if self.is_loading() || !self.has_more() {
            return false;
        }
        tracing::debug!(page = self.page, "fetching more feed items");
        self.pending = Some(now + self.fetch_delay);
        true
    }

    /// Finish the pending fetch once its delay elapsed. Returns true if items
    /// were appended.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(ready_at) if now >= ready_at => {
                let start = self.items.len() as u32;
                self.items.extend((1..=self.batch_size as u32).map(|i| FeedItem {
                    id: start + i,
                    title: format!("Item {}", start + i),
                    image_url: PLACEHOLDER_IMAGE.to_string(),
                }));
                self.page += 1;
                self.pending = None;
                tracing::debug!(page = self.page, items = self.items.len(), "feed fetch finished");
                if !self.has_more() {
                    tracing::info!("infinite feed reached its page ceiling");
                }
                true
            }
            _ => false,
        }
    }

    pub fn grid_rows(&self) -> usize {
        self.items.len().div_ceil(COLUMNS)
    }
}

/// Whether the sentinel line under `total_rows` card rows is within
/// `viewport_lines` (plus margin) when scrolled `offset_rows` card rows down.
pub(crate) fn sentinel_in_view(total_rows: usize, offset_rows: usize, viewport_lines: usize) -> bool {
    let lines_above = total_rows.saturating_sub(offset_rows) * usize::from(CARD_HEIGHT);
    lines_above < viewport_lines + SENTINEL_MARGIN
}

pub struct InfiniteScrollPage {
    feed: Rc<RefCell<InfiniteFeed>>,
    visibility: EventSource<SentinelEntry>,
    _subscription: Subscription,
    offset_rows: usize,
    viewport_lines: usize,
    container: Rect,
    /// Last visibility delivered, with the page count it was observed at
    last_report: Option<(bool, u32)>,
}

impl InfiniteScrollPage {
    pub fn new(config: &InfiniteScrollConfig) -> Self {
        let feed = Rc::new(RefCell::new(InfiniteFeed::from_config(config)));
        let visibility = EventSource::new();

        let observed = Rc::clone(&feed);
        let subscription = visibility.subscribe(move |entries: &[SentinelEntry]| {
            if let Some(entry) = entries.last() {
                if entry.is_intersecting {
                    observed.borrow_mut().sentinel_visible(entry.at);
                }
            }
        });

        Self {
            feed,
            visibility,
            _subscription: subscription,
            offset_rows: 0,
            // Before the first draw assume an empty screen, so loading starts at once
            viewport_lines: usize::from(CARD_HEIGHT),
            container: Rect::default(),
            last_report: None,
        }
    }

    pub fn feed(&self) -> std::cell::Ref<'_, InfiniteFeed> {
        self.feed.borrow()
    }

    pub fn set_viewport_lines(&mut self, lines: usize) {
        self.viewport_lines = lines;
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.feed.borrow().grid_rows().saturating_sub(1);
        self.offset_rows = self.offset_rows.saturating_add_signed(delta).min(max);
    }

    /// Report the sentinel's visibility when it changes, and again after each
    /// completed fetch, the way a re-armed intersection observer would.
    fn observe_sentinel(&mut self, now: Instant) {
        let (rows, page) = {
            let feed = self.feed.borrow();
            (feed.grid_rows(), feed.page())
        };
        let visible = sentinel_in_view(rows, self.offset_rows, self.viewport_lines);
        if self.last_report == Some((visible, page)) {
            return;
        }
        self.last_report = Some((visible, page));
        self.visibility.emit_one(SentinelEntry {
            is_intersecting: visible,
            at: now,
        });
    }

    fn draw_card(&self, f: &mut Frame, area: Rect, item: &FeedItem, theme: &ColorPalette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border.to_ratatui()));
        let body = Paragraph::new(vec![
            Line::styled(
                item.title.clone(),
                Style::default()
                    .fg(theme.fg.to_ratatui())
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                item.image_url.clone(),
                Style::default().fg(theme.comment.to_ratatui()),
            ),
        ])
        .block(block);
        f.render_widget(body, area);
    }
}

impl Page for InfiniteScrollPage {
    fn id(&self) -> PageId {
        PageId::InfiniteScroll
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &PageContext) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::PageDown => self.scroll_by(3),
            KeyCode::PageUp => self.scroll_by(-3),
            KeyCode::Home | KeyCode::Char('g') => self.offset_rows = 0,
            KeyCode::End | KeyCode::Char('G') => self.scroll_by(isize::MAX),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, _ctx: &PageContext) {
        if !self.container.contains(Position::new(mouse.column, mouse.row)) {
            return;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(1),
            MouseEventKind::ScrollUp => self.scroll_by(-1),
            _ => {}
        }
    }

    fn tick(&mut self, ctx: &PageContext) {
        self.feed.borrow_mut().poll(ctx.now);
        self.observe_sentinel(ctx.now);
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &ColorPalette) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(area);

        let title = Paragraph::new("Infinite Scrolling Using an Intersection Observer")
            .style(
                Style::default()
                    .fg(theme.fg.to_ratatui())
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(title, chunks[0]);

        let list = chunks[1];
        self.container = list;
        self.viewport_lines = usize::from(list.height);

        let feed = self.feed.borrow();
        let column_width = list.width / COLUMNS as u16;
        let mut y = list.y;
        for row in feed.items().chunks(COLUMNS).skip(self.offset_rows) {
            if y + CARD_HEIGHT > list.y + list.height {
                break;
            }
            for (col, item) in row.iter().enumerate() {
                let card = Rect::new(
                    list.x + col as u16 * column_width,
                    y,
                    column_width.saturating_sub(1),
                    CARD_HEIGHT,
                );
                self.draw_card(f, card, item, theme);
            }
            y += CARD_HEIGHT;
        }

        if y < list.y + list.height {
            let status = if feed.is_loading() {
                Line::styled(
                    "⟳ Loading more items...",
                    Style::default().fg(theme.orange.to_ratatui()),
                )
            } else if feed.has_more() {
                Line::styled(
                    "Scroll for more",
                    Style::default().fg(theme.comment.to_ratatui()),
                )
            } else {
                Line::raw("")
            };
            let sentinel = Rect::new(list.x, y, list.width, 1);
            f.render_widget(Paragraph::new(status).alignment(Alignment::Center), sentinel);
        }
    }

    fn hints(&self) -> &'static str {
        "j/k scroll · pgup/pgdn · g/G top/bottom · wheel"
    }
}
