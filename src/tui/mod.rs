//! Navigation shell: route table, nav bar, active page and toast overlay

mod event;
mod terminal;
mod toast_surface;

pub use event::{Event, EventHandler};
pub use terminal::Tui;
pub use toast_surface::{render_toast, toast_area};

use crate::config::Config;
use crate::employees::Employee;
use crate::pages::{Page, PageContext, build_page};
use crate::routing::{RouteDescriptor, Router};
use crate::themes::{ColorPalette, ThemeVariant};
use crate::toast::Notifier;
use crate::ChallengeResult;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::time::{Duration, Instant};

const APP_TITLE: &str = "Challenges";
const FRAME_BUDGET: Duration = Duration::from_millis(33);

/// Main TUI application state
pub struct App {
    /// Running flag
    pub running: bool,
    router: Router,
    /// Index into the route table of the mounted page
    active: usize,
    notifier: Notifier,
    /// One page per route, in route-table order
    pages: Vec<Box<dyn Page>>,
    current_theme: ThemeVariant,
    theme: ColorPalette,
    show_help: bool,
    tick_rate: Duration,
    /// Screen areas of the nav entries from the last draw
    nav_hitboxes: Vec<(Rect, usize)>,
    title_area: Rect,
    toast_hitbox: Option<Rect>,
}

impl App {
    pub fn new(config: &Config, employees: &[Employee]) -> Self {
        let router = Router::new();
        let current_theme =
            ThemeVariant::from_config_key(&config.theme).unwrap_or(ThemeVariant::Ember);
        let pages = router
            .routes()
            .iter()
            .map(|route| build_page(route.page, config, employees))
            .collect();

        Self {
            running: true,
            router,
            active: 0,
            notifier: Notifier::with_default_duration(config.toast_duration()),
            pages,
            current_theme,
            theme: ColorPalette::from_variant(current_theme),
            show_help: false,
            tick_rate: config.tick_rate(),
            nav_hitboxes: Vec::new(),
            title_area: Rect::default(),
            toast_hitbox: None,
        }
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn active_route(&self) -> &'static RouteDescriptor {
        &self.router.routes()[self.active]
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn theme_variant(&self) -> ThemeVariant {
        self.current_theme
    }

    /// Navigate by path. Unknown paths fall back to the index page with a warning.
    pub fn navigate(&mut self, path: &str) -> bool {
        match self.router.position(path) {
            Some(index) => {
                self.navigate_to(index);
                true
            }
            None => {
                tracing::warn!("no route matches {path:?}, showing the index page");
                self.navigate_to(0);
                self.notifier
                    .warning(format!("No page at \"{path}\", showing the dashboard"));
                false
            }
        }
    }

    fn navigate_to(&mut self, index: usize) {
        if index >= self.pages.len() || index == self.active {
            return;
        }
        self.active = index;
        tracing::info!(path = self.active_route().path, "navigated");
    }

    fn next_route(&mut self) {
        self.navigate_to((self.active + 1) % self.pages.len());
    }

    fn prev_route(&mut self) {
        let count = self.pages.len();
        self.navigate_to((self.active + count - 1) % count);
    }

    fn cycle_theme(&mut self) {
        self.current_theme = self.current_theme.next();
        self.theme = ColorPalette::from_variant(self.current_theme);
        self.notifier
            .info(format!("Theme: {}", self.current_theme.name()));
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Tick => self.tick(now),
            Event::Resize(_, _) => {}
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        // A page collecting text gets every key
        if self.pages[self.active].captures_input() {
            let ctx = PageContext {
                notifier: &self.notifier,
                now,
            };
            self.pages[self.active].handle_key(key, &ctx);
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::F(1)) {
                self.show_help = false;
            } else if key.code == KeyCode::Char('q') {
                self.running = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') | KeyCode::F(1) => self.show_help = true,
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('x') => self.notifier.dismiss(),
            KeyCode::Char('h') => self.navigate_to(0),
            KeyCode::Tab => self.next_route(),
            KeyCode::BackTab => self.prev_route(),
            KeyCode::Char(c @ '0'..='9') => {
                let index = c as usize - '0' as usize;
                self.navigate_to(index);
            }
            _ => {
                let ctx = PageContext {
                    notifier: &self.notifier,
                    now,
                };
                self.pages[self.active].handle_key(key, &ctx);
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let pos = Position::new(mouse.column, mouse.row);
            // Clicking the toast closes it
            if self.toast_hitbox.is_some_and(|area| area.contains(pos))
                && self.notifier.current().is_some()
            {
                self.notifier.dismiss();
                self.toast_hitbox = None;
                return;
            }
            if self.title_area.contains(pos) {
                self.navigate_to(0);
                return;
            }
            let hit = self
                .nav_hitboxes
                .iter()
                .find(|(area, _)| area.contains(pos))
                .map(|&(_, index)| index);
            if let Some(index) = hit {
                self.navigate_to(index);
                return;
            }
        }
        let ctx = PageContext {
            notifier: &self.notifier,
            now,
        };
        self.pages[self.active].handle_mouse(mouse, &ctx);
    }

    /// Advance deadlines. The toast expires on any route; only the mounted
    /// page gets its own tick.
    pub fn tick(&mut self, now: Instant) {
        self.notifier.tick(now);
        let ctx = PageContext {
            notifier: &self.notifier,
            now,
        };
        self.pages[self.active].tick(&ctx);
    }

    /// Draw, then wait for input or the next tick, until quit
    pub fn run(&mut self) -> ChallengeResult<()> {
        let mut tui = Tui::init()?;
        let events = EventHandler::new(self.tick_rate);
        tracing::info!(path = self.active_route().path, "showcase started");

        while self.running {
            tui.terminal().draw(|f| self.draw(f))?;

            // The toast bar animates, so redraw at least once per frame
            let Some(first) = events.next_timeout(FRAME_BUDGET) else {
                continue;
            };
            self.handle_event(first, Instant::now());
            while self.running {
                let Some(event) = events.try_next() else {
                    break;
                };
                self.handle_event(event, Instant::now());
            }
        }

        tui.exit()?;
        tracing::info!("showcase closed");
        Ok(())
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        let bg = self.theme.bg.to_ratatui();
        f.render_widget(Block::default().style(Style::default().bg(bg)), area);

        let nav_height = self.nav_height(area.width);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(nav_height),
                Constraint::Min(5),    // Page
                Constraint::Length(1), // Footer
            ])
            .split(area);

        self.draw_title(f, chunks[0]);
        self.draw_nav(f, chunks[1]);
        self.pages[self.active].draw(f, chunks[2], &self.theme);
        self.draw_footer(f, chunks[3]);

        self.toast_hitbox = self.notifier.current().map(|toast| {
            let remaining = self.notifier.remaining_fraction(Instant::now());
            render_toast(f, area, &toast, remaining, &self.theme);
            toast_area(area)
        });

        if self.show_help {
            self.draw_help(f);
        }
    }

    fn draw_title(&mut self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new(APP_TITLE)
            .style(
                Style::default()
                    .fg(self.theme.teal.to_ratatui())
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, area);

        let width = APP_TITLE.len() as u16;
        self.title_area = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y,
            width.min(area.width),
            area.height,
        );
    }

    /// Nav entries wrapped into `width` columns: (row, column, label, route index)
    fn nav_layout(&self, width: u16) -> Vec<(u16, u16, String, usize)> {
        let mut entries = Vec::new();
        let (mut row, mut col) = (0u16, 0u16);
        for (index, route) in self.router.routes().iter().enumerate() {
            let label = format!(" {} {} ", index, route.label);
            let label_width = label.chars().count() as u16;
            if col > 0 && col + label_width > width {
                row += 1;
                col = 0;
            }
            entries.push((row, col, label, index));
            col = col.saturating_add(label_width + 1);
        }
        entries
    }

    fn nav_height(&self, width: u16) -> u16 {
        let rows = self
            .nav_layout(width.saturating_sub(2))
            .last()
            .map_or(1, |&(row, ..)| row + 1);
        rows + 2
    }

    fn draw_nav(&mut self, f: &mut Frame, area: Rect) {
        let accent = self.theme.teal.to_ratatui();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border.to_ratatui()));
        let inner = block.inner(area);
        f.render_widget(block, area);

        self.nav_hitboxes.clear();
        let mut lines: Vec<Vec<Span>> = Vec::new();
        for (row, col, label, index) in self.nav_layout(inner.width) {
            let width = label.chars().count() as u16;
            let style = if index == self.active {
                Style::default()
                    .fg(accent)
                    .bg(self.theme.bg.to_ratatui())
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(self.theme.fg.to_ratatui())
            };
            if row < inner.height {
                let visible = width.min(inner.width.saturating_sub(col));
                self.nav_hitboxes
                    .push((Rect::new(inner.x + col, inner.y + row, visible, 1), index));
            }
            if lines.len() <= usize::from(row) {
                lines.push(Vec::new());
            } else {
                lines[usize::from(row)].push(Span::raw(" "));
            }
            lines[usize::from(row)].push(Span::styled(label, style));
        }
        let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
        f.render_widget(Paragraph::new(text), inner);
    }

    fn draw_footer(&self, f: &mut Frame, area: Rect) {
        let hints = self.pages[self.active].hints();
        let text = if hints.is_empty() {
            " tab/0-5 navigate · h home · t theme · x dismiss · ? help · q quit ".to_string()
        } else {
            format!(" {hints} · tab/0-5 navigate · ? help · q quit ")
        };
        let footer = Paragraph::new(text).style(Style::default().fg(self.theme.comment.to_ratatui()));
        f.render_widget(footer, area);
    }

    fn draw_help(&self, f: &mut Frame) {
        let area = f.area();
        let accent = self.theme.teal.to_ratatui();
        let fg = self.theme.fg.to_ratatui();

        let popup_width = 56.min(area.width.saturating_sub(4));
        let popup_height = 20.min(area.height.saturating_sub(4));
        let popup_area = Rect::new(
            (area.width - popup_width) / 2,
            (area.height - popup_height) / 2,
            popup_width,
            popup_height,
        );

        f.render_widget(Clear, popup_area);

        let help_text = r#"
 Keyboard Shortcuts

 Global:
   q, Ctrl+C    Quit
   ?/F1         Toggle help
   t            Cycle theme
   x            Dismiss notification

 Navigation:
   Tab          Next page
   Shift+Tab    Previous page
   0-5          Jump to page (0 = dashboard)
   h            Dashboard
   Click        Nav entry or title

 Each page lists its own keys in the footer.
"#;

        let help = Paragraph::new(help_text)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(accent)),
            )
            .style(Style::default().fg(fg).bg(self.theme.bg_dark.to_ratatui()));

        f.render_widget(help, popup_area);
    }
}

/// Launch the showcase at `route`
pub fn launch(config: &Config, employees: &[Employee], route: &str) -> ChallengeResult<()> {
    let mut app = App::new(config, employees);
    app.navigate(route);
    app.run()
}
