use super::{Page, PageContext, centered};
use crate::routing::PageId;
use crate::themes::ColorPalette;
use crossterm::event::{KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders},
};

/// Tracks the pointer relative to a bounded container
#[derive(Debug, Default, Clone)]
pub struct PointerTracker {
    container: Rect,
    /// Offset from the container's top-left, present while the pointer is inside
    position: Option<(u16, u16)>,
}

impl PointerTracker {
    pub fn set_container(&mut self, container: Rect) {
        if self.container != container {
            self.container = container;
            self.position = None;
        }
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    /// Feed an absolute pointer position. Leaving the container clears tracking.
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        self.position = if self.container.contains(Position::new(column, row)) {
            Some((column - self.container.x, row - self.container.y))
        } else {
            None
        };
    }

    pub fn is_inside(&self) -> bool {
        self.position.is_some()
    }

    pub fn position(&self) -> Option<(u16, u16)> {
        self.position
    }
}

/// Cells of the follower glyph centered on `(cx, cy)`, clipped to `bounds`.
/// Roughly round in a terminal: five wide, three tall, corners cut.
pub(crate) fn circle_cells(cx: u16, cy: u16, bounds: Rect) -> Vec<(u16, u16)> {
    let mut cells = Vec::new();
    for dy in -1i32..=1 {
        for dx in -2i32..=2 {
            if dx.abs() == 2 && dy != 0 {
                continue;
            }
            let x = i32::from(cx) + dx;
            let y = i32::from(cy) + dy;
            if x < 0 || y < 0 {
                continue;
            }
            let (x, y) = (x as u16, y as u16);
            if bounds.contains(Position::new(x, y)) {
                cells.push((x, y));
            }
        }
    }
    cells
}

pub struct MouseFollowPage {
    tracker: PointerTracker,
}

impl MouseFollowPage {
    pub fn new() -> Self {
        Self {
            tracker: PointerTracker::default(),
        }
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }
}

impl Default for MouseFollowPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for MouseFollowPage {
    fn id(&self) -> PageId {
        PageId::MouseFollow
    }

    fn handle_key(&mut self, _key: KeyEvent, _ctx: &PageContext) {}

    fn handle_mouse(&mut self, mouse: MouseEvent, _ctx: &PageContext) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                self.tracker.pointer_moved(mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &ColorPalette) {
        let outer = centered(area, 48, 18);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Mouse Following Circle ")
            .border_style(Style::default().fg(theme.border.to_ratatui()))
            .style(Style::default().bg(theme.bg_dark.to_ratatui()));
        let inner = block.inner(outer);
        f.render_widget(block, outer);
        self.tracker.set_container(inner);

        if let Some((x, y)) = self.tracker.position() {
            let color = theme.comment.to_ratatui();
            let buf = f.buffer_mut();
            for (cx, cy) in circle_cells(inner.x + x, inner.y + y, inner) {
                if let Some(cell) = buf.cell_mut(Position::new(cx, cy)) {
                    cell.set_symbol("█").set_fg(color);
                }
            }
        }
    }

    fn hints(&self) -> &'static str {
        "move the mouse inside the box"
    }
}
