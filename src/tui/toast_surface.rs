//! Bottom-right overlay showing the active toast

use crate::themes::ColorPalette;
use crate::toast::Notification;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const TOAST_WIDTH: u16 = 52;
const TOAST_HEIGHT: u16 = 5;
const MARGIN: u16 = 1;

/// Where the toast goes inside `area`
pub fn toast_area(area: Rect) -> Rect {
    let width = TOAST_WIDTH.min(area.width.saturating_sub(MARGIN * 2));
    let height = TOAST_HEIGHT.min(area.height.saturating_sub(MARGIN * 2));
    Rect::new(
        area.x + area.width.saturating_sub(width + MARGIN),
        area.y + area.height.saturating_sub(height + MARGIN),
        width,
        height,
    )
}

/// Draw `toast` with a bar showing `remaining` (1.0 = just shown)
pub fn render_toast(
    f: &mut Frame,
    area: Rect,
    toast: &Notification,
    remaining: f32,
    colors: &ColorPalette,
) {
    let popup = toast_area(area);
    if popup.width < 4 || popup.height < 3 {
        return;
    }
    let color = toast.kind.color(colors);

    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Line::from(" x ").right_aligned())
        .style(Style::default().bg(colors.bg_dark.to_ratatui()));
    let inner = block.inner(popup);

    let bar_width = (f32::from(inner.width) * remaining.clamp(0.0, 1.0)).round() as usize;
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", toast.kind.icon()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(toast.message.clone(), Style::default().fg(colors.fg.to_ratatui())),
        ]),
        Line::raw(""),
        Line::styled("━".repeat(bar_width), Style::default().fg(color)),
    ];
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        popup,
    );
}
