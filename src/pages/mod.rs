//! Demo pages mounted by the shell, one per route.

mod dashboard;
mod employee_list;
mod infinite_scroll;
mod mouse_follow;
mod mutation_tracker;
mod scroll_notifier;

pub use dashboard::DashboardPage;
pub use employee_list::{EmployeeListPage, ListInputMode};
pub use infinite_scroll::{FeedItem, InfiniteFeed, InfiniteScrollPage, SentinelEntry};
pub use mouse_follow::{MouseFollowPage, PointerTracker};
pub use mutation_tracker::{
    Background, ChangeEntry, ChangeLog, ChildNode, MAX_CHANGES, Mutation, MutationTrackerPage,
    ObservedSubtree,
};
pub use scroll_notifier::{ScrollNotifierPage, ScrollState};

use crate::config::Config;
use crate::employees::Employee;
use crate::routing::PageId;
use crate::themes::ColorPalette;
use crate::toast::Notifier;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};
use std::time::Instant;

/// Services a page may use while handling an event
pub struct PageContext<'a> {
    pub notifier: &'a Notifier,
    pub now: Instant,
}

/// A demo page. The shell owns one of each for its whole lifetime.
pub trait Page {
    fn id(&self) -> PageId;

    /// Handle a key the shell did not consume
    fn handle_key(&mut self, key: KeyEvent, ctx: &PageContext);

    fn handle_mouse(&mut self, _mouse: MouseEvent, _ctx: &PageContext) {}

    /// Called on every event-loop tick while the page is mounted
    fn tick(&mut self, _ctx: &PageContext) {}

    /// Render into `area`. Pages record their layout here for hit-testing.
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &ColorPalette);

    /// True while the page is collecting text and wants every key
    fn captures_input(&self) -> bool {
        false
    }

    /// Key hints for the footer
    fn hints(&self) -> &'static str {
        ""
    }
}

/// Build the page for `id`
pub fn build_page(id: PageId, config: &Config, employees: &[Employee]) -> Box<dyn Page> {
    match id {
        PageId::Dashboard => Box::new(DashboardPage),
        PageId::MouseFollow => Box::new(MouseFollowPage::new()),
        PageId::ScrollNotifier => Box::new(ScrollNotifierPage::new()),
        PageId::InfiniteScroll => Box::new(InfiniteScrollPage::new(&config.infinite_scroll)),
        PageId::MutationTracker => Box::new(MutationTrackerPage::new()),
        PageId::EmployeeList => Box::new(EmployeeListPage::new(
            employees.to_vec(),
            config.records_per_page,
        )),
    }
}

/// Centered rectangle of at most `width` x `height` inside `area`
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
