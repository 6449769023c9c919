use super::{Page, PageContext, centered};
use crate::routing::PageId;
use crate::themes::ColorPalette;
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Wrap},
};

/// Index page
pub struct DashboardPage;

impl Page for DashboardPage {
    fn id(&self) -> PageId {
        PageId::Dashboard
    }

    fn handle_key(&mut self, _key: KeyEvent, _ctx: &PageContext) {}

    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &ColorPalette) {
        let fg = theme.fg.to_ratatui();
        let lines = vec![
            Line::styled(
                "Welcome to the Dashboard!",
                Style::default().fg(fg).add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::styled(
                "This page showcases a collection of interactive components.",
                Style::default().fg(fg),
            ),
            Line::styled(
                "Explore the features, functionality, and design of each component \
                 using the navigation bar above.",
                Style::default().fg(fg),
            ),
        ];
        let body = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(body, centered(area, 72, 6));
    }

    fn hints(&self) -> &'static str {
        "1-5 or click a nav entry to open a challenge"
    }
}
