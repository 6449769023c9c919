use super::{Page, PageContext};
use crate::employees::{
    Employee, EmployeeDirectory, PageMarker, SortDirection, SortKey, format_salary,
};
use crate::routing::PageId;
use crate::themes::ColorPalette;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

/// Which text field keystrokes go to
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ListInputMode {
    Normal,
    Search,
    MinSalary,
    MaxSalary,
}

pub struct EmployeeListPage {
    directory: EmployeeDirectory,
    input_mode: ListInputMode,
}

impl EmployeeListPage {
    pub fn new(employees: Vec<Employee>, records_per_page: usize) -> Self {
        Self {
            directory: EmployeeDirectory::new(employees, records_per_page),
            input_mode: ListInputMode::Normal,
        }
    }

    pub fn directory(&self) -> &EmployeeDirectory {
        &self.directory
    }

    pub fn input_mode(&self) -> ListInputMode {
        self.input_mode
    }

    /// Current contents of the field being edited
    fn field_value(&self, mode: ListInputMode) -> String {
        let query = self.directory.query();
        match mode {
            ListInputMode::Search => query.search.clone(),
            ListInputMode::MinSalary => query.salary.min.clone(),
            ListInputMode::MaxSalary => query.salary.max.clone(),
            ListInputMode::Normal => String::new(),
        }
    }

    fn set_field_value(&mut self, mode: ListInputMode, value: String) {
        match mode {
            ListInputMode::Search => self.directory.set_search(value),
            ListInputMode::MinSalary => self.directory.set_salary_min(value),
            ListInputMode::MaxSalary => self.directory.set_salary_max(value),
            ListInputMode::Normal => {}
        }
    }

    fn handle_input_key(&mut self, code: KeyCode) {
        let mode = self.input_mode;
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => {
                self.input_mode = ListInputMode::Normal;
            }
            KeyCode::Backspace => {
                let mut value = self.field_value(mode);
                if value.pop().is_some() {
                    self.set_field_value(mode, value);
                }
            }
            KeyCode::Char(c) => {
                let mut value = self.field_value(mode);
                value.push(c);
                self.set_field_value(mode, value);
            }
            _ => {}
        }
    }

    fn clear_filters(&mut self) {
        self.directory.set_search("");
        self.directory.set_salary_min("");
        self.directory.set_salary_max("");
        self.directory.set_sort(None);
    }

    fn field_span(&self, label: &str, mode: ListInputMode, theme: &ColorPalette) -> Vec<Span<'static>> {
        let value = self.field_value(mode);
        let active = self.input_mode == mode;
        let style = if active {
            Style::default()
                .fg(theme.fg.to_ratatui())
                .bg(theme.bg_highlight.to_ratatui())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg.to_ratatui())
        };
        let shown = if value.is_empty() && !active {
            "—".to_string()
        } else if active {
            format!("{value}▏")
        } else {
            value
        };
        vec![
            Span::styled(format!("{label}: "), Style::default().fg(theme.comment.to_ratatui())),
            Span::styled(format!(" {shown} "), style),
            Span::raw("  "),
        ]
    }

    fn sort_span(&self, key: SortKey, theme: &ColorPalette) -> Span<'static> {
        let arrow = match self.directory.query().sort {
            Some(sort) if sort.key == key => match sort.direction {
                SortDirection::Asc => " ↑",
                SortDirection::Desc => " ↓",
            },
            _ => " ↕",
        };
        let active = matches!(self.directory.query().sort, Some(s) if s.key == key);
        let style = if active {
            Style::default()
                .fg(theme.bg.to_ratatui())
                .bg(theme.blue.to_ratatui())
        } else {
            Style::default().fg(theme.fg.to_ratatui())
        };
        Span::styled(format!("[{}{}]", key.label(), arrow), style)
    }

    fn draw_controls(&self, f: &mut Frame, area: Rect, theme: &ColorPalette) {
        let header = Line::from(vec![
            Span::styled(
                "Employee Directory",
                Style::default()
                    .fg(theme.fg.to_ratatui())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "    Employees per page: {}",
                    self.directory.paginator().records_per_page()
                ),
                Style::default().fg(theme.comment.to_ratatui()),
            ),
        ]);

        let mut filters = Vec::new();
        filters.extend(self.field_span("Search", ListInputMode::Search, theme));
        filters.extend(self.field_span("Min salary", ListInputMode::MinSalary, theme));
        filters.extend(self.field_span("Max salary", ListInputMode::MaxSalary, theme));
        filters.push(self.sort_span(SortKey::Name, theme));
        filters.push(Span::raw(" "));
        filters.push(self.sort_span(SortKey::Salary, theme));

        f.render_widget(Paragraph::new(vec![header, Line::from(filters)]), area);
    }

    fn draw_table(&self, f: &mut Frame, area: Rect, theme: &ColorPalette) {
        let records = self.directory.current_records();
        if records.is_empty() {
            let empty = Paragraph::new("No employees found matching your criteria")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.comment.to_ratatui()));
            f.render_widget(empty, area);
            return;
        }

        let fg = theme.fg.to_ratatui();
        let rows: Vec<Row> = records
            .iter()
            .map(|e| {
                Row::new(vec![
                    Cell::from(e.name.clone()),
                    Cell::from(e.job_title.clone()),
                    Cell::from(e.email.clone()),
                    Cell::from(e.phone.clone()),
                    Cell::from(e.address.clone()),
                    Cell::from(format_salary(e.salary))
                        .style(Style::default().fg(theme.green.to_ratatui())),
                ])
                .style(Style::default().fg(fg))
            })
            .collect();

        let header = Row::new(vec!["Name", "Job Title", "Email", "Phone", "Address", "Salary"])
            .style(
                Style::default()
                    .fg(theme.teal.to_ratatui())
                    .add_modifier(Modifier::BOLD),
            );

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(16),
                Constraint::Percentage(18),
                Constraint::Percentage(22),
                Constraint::Percentage(13),
                Constraint::Percentage(19),
                Constraint::Percentage(12),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border.to_ratatui())),
        );
        f.render_widget(table, area);
    }

    fn draw_pagination(&self, f: &mut Frame, area: Rect, theme: &ColorPalette) {
        let total = self.directory.total();
        let Some(summary) = self.directory.paginator().summary(total) else {
            return;
        };
        let current = self.directory.paginator().current_page();
        let comment = Style::default().fg(theme.comment.to_ratatui());

        let mut spans = vec![Span::styled("‹ ", comment)];
        for marker in self.directory.paginator().page_numbers(total) {
            match marker {
                PageMarker::Page(n) if n == current => spans.push(Span::styled(
                    format!(" {n} "),
                    Style::default()
                        .fg(theme.bg.to_ratatui())
                        .bg(theme.blue.to_ratatui())
                        .add_modifier(Modifier::BOLD),
                )),
                PageMarker::Page(n) => spans.push(Span::styled(
                    format!(" {n} "),
                    Style::default().fg(theme.fg.to_ratatui()),
                )),
                PageMarker::Ellipsis => spans.push(Span::styled(" ... ", comment)),
            }
        }
        spans.push(Span::styled(" ›", comment));

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        f.render_widget(Paragraph::new(summary).style(comment), chunks[0]);
        f.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
            chunks[1],
        );
    }
}

impl Page for EmployeeListPage {
    fn id(&self) -> PageId {
        PageId::EmployeeList
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &PageContext) {
        if self.input_mode != ListInputMode::Normal {
            self.handle_input_key(key.code);
            return;
        }
        match key.code {
            KeyCode::Char('/') | KeyCode::Char('f') => self.input_mode = ListInputMode::Search,
            KeyCode::Char('m') => self.input_mode = ListInputMode::MinSalary,
            KeyCode::Char('M') => self.input_mode = ListInputMode::MaxSalary,
            KeyCode::Char('n') => self.directory.toggle_sort(SortKey::Name),
            KeyCode::Char('s') => self.directory.toggle_sort(SortKey::Salary),
            KeyCode::Char('p') => self.directory.cycle_records_per_page(),
            KeyCode::Char('c') => self.clear_filters(),
            KeyCode::Right | KeyCode::Char('l') => {
                self.directory.next_page();
            }
            KeyCode::Left => {
                self.directory.prev_page();
            }
            KeyCode::Home => {
                self.directory.go_to_page(1);
            }
            KeyCode::End => {
                let last = self.directory.page_count();
                self.directory.go_to_page(last);
            }
            _ => {}
        }
    }

    fn captures_input(&self) -> bool {
        self.input_mode != ListInputMode::Normal
    }

    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &ColorPalette) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Controls
                Constraint::Min(5),    // Table
                Constraint::Length(1), // Pagination
            ])
            .split(area);

        self.draw_controls(f, chunks[0], theme);
        self.draw_table(f, chunks[1], theme);
        self.draw_pagination(f, chunks[2], theme);
    }

    fn hints(&self) -> &'static str {
        match self.input_mode {
            ListInputMode::Normal => {
                "/ search · m/M min/max salary · n/s sort · p per page · ←/→ page · c clear"
            }
            _ => "type to filter · enter/esc done",
        }
    }
}
