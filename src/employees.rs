//! Employee directory: dataset loading plus the search → salary range → sort
//! → paginate pipeline behind the paginated list page and `challenges employees`.

use serde::Deserialize;
use std::cmp::Ordering;
use std::fs;
use std::ops::Range;
use std::path::Path;

use crate::{ChallengeError, ChallengeResult};

const BUNDLED_EMPLOYEES: &str = include_str!("../data/employees.json");

/// Page sizes offered by the list
pub const RECORDS_PER_PAGE_CHOICES: [usize; 4] = [5, 10, 20, 50];

/// Past this many pages the number strip collapses with ellipses
const MAX_UNCOLLAPSED_PAGES: usize = 7;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub salary: f64,
    pub profile_picture: String,
}

/// Parse the dataset bundled with the binary
pub fn load_bundled() -> ChallengeResult<Vec<Employee>> {
    parse_employees(BUNDLED_EMPLOYEES)
}

pub fn load_from_path(path: &Path) -> ChallengeResult<Vec<Employee>> {
    let content = fs::read_to_string(path).map_err(|e| {
        ChallengeError::DatasetError(format!("cannot read {}: {e}", path.display()))
    })?;
    let employees = parse_employees(&content)?;
    tracing::info!("loaded {} employees from {}", employees.len(), path.display());
    Ok(employees)
}

pub fn parse_employees(json: &str) -> ChallengeResult<Vec<Employee>> {
    serde_json::from_str(json).map_err(|e| ChallengeError::DatasetError(e.to_string()))
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SortKey {
    Name,
    Salary,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Salary => "Salary",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "salary" => Some(SortKey::Salary),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Salary bounds as typed by the user. Empty or non-numeric bounds are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SalaryRange {
    pub min: String,
    pub max: String,
}

impl SalaryRange {
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn min_bound(&self) -> Option<f64> {
        parse_bound(&self.min)
    }

    pub fn max_bound(&self) -> Option<f64> {
        parse_bound(&self.max)
    }

    /// Inclusive on both ends
    pub fn contains(&self, salary: f64) -> bool {
        self.min_bound().is_none_or(|min| salary >= min)
            && self.max_bound().is_none_or(|max| salary <= max)
    }
}

fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Search, salary filter and sort settings
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmployeeQuery {
    pub search: String,
    pub salary: SalaryRange,
    pub sort: Option<SortConfig>,
}

impl EmployeeQuery {
    fn matches_search(&self, employee: &Employee) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        employee.name.to_lowercase().contains(&needle)
            || employee.job_title.to_lowercase().contains(&needle)
    }

    /// Run the pipeline. Sorting is stable, so ties keep dataset order.
    pub fn apply<'a>(&self, data: &'a [Employee]) -> Vec<&'a Employee> {
        let mut rows: Vec<&Employee> = data
            .iter()
            .filter(|e| self.matches_search(e))
            .filter(|e| self.salary.contains(e.salary))
            .collect();

        if let Some(sort) = self.sort {
            rows.sort_by(|a, b| {
                let ord = match sort.key {
                    SortKey::Name => a.name.cmp(&b.name),
                    SortKey::Salary => a.salary.partial_cmp(&b.salary).unwrap_or(Ordering::Equal),
                };
                match sort.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        rows
    }

    /// Same key flips asc → desc; anything else starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        let direction = match self.sort {
            Some(SortConfig {
                key: current,
                direction: SortDirection::Asc,
            }) if current == key => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        self.sort = Some(SortConfig { key, direction });
    }
}

/// Entry in the page-number strip
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// 1-based page cursor over a filtered list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    records_per_page: usize,
}

impl Paginator {
    pub fn new(records_per_page: usize) -> Self {
        Self {
            current_page: 1,
            records_per_page: records_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn records_per_page(&self) -> usize {
        self.records_per_page
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.records_per_page)
    }

    /// Index range of the current page, clipped to `total`
    pub fn range(&self, total: usize) -> Range<usize> {
        let last = self.current_page * self.records_per_page;
        let first = last.saturating_sub(self.records_per_page);
        first.min(total)..last.min(total)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    /// Move to `page` if it exists. Out-of-range targets are ignored.
    pub fn go_to(&mut self, page: usize, total: usize) -> bool {
        if page >= 1 && page <= self.page_count(total) {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self, total: usize) -> bool {
        self.go_to(self.current_page + 1, total)
    }

    pub fn prev(&mut self, total: usize) -> bool {
        self.current_page > 1 && self.go_to(self.current_page - 1, total)
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn set_records_per_page(&mut self, records_per_page: usize) {
        self.records_per_page = records_per_page.max(1);
        self.reset();
    }

    /// Page strip: every page up to seven, otherwise first, last, a window
    /// around the current page and ellipses for the gaps.
    pub fn page_numbers(&self, total: usize) -> Vec<PageMarker> {
        let pages = self.page_count(total);
        if pages <= MAX_UNCOLLAPSED_PAGES {
            return (1..=pages).map(PageMarker::Page).collect();
        }

        let current = self.current_page;
        let mut markers = vec![PageMarker::Page(1)];
        if current > 3 {
            markers.push(PageMarker::Ellipsis);
        }
        let mut start = 2.max(current.saturating_sub(1));
        let mut end = (pages - 1).min(current + 1);
        if current <= 3 {
            end = 4;
        }
        if current >= pages - 2 {
            start = pages - 3;
        }
        markers.extend((start..=end).map(PageMarker::Page));
        if current < pages - 2 {
            markers.push(PageMarker::Ellipsis);
        }
        markers.push(PageMarker::Page(pages));
        markers
    }

    /// "Showing A to B of N employees", or None when nothing matched
    pub fn summary(&self, total: usize) -> Option<String> {
        if total == 0 {
            return None;
        }
        let range = self.range(total);
        Some(format!(
            "Showing {} to {} of {} employees",
            range.start + 1,
            range.end,
            total
        ))
    }
}

/// Query plus cursor. Every filter, sort or page-size change returns to page 1.
#[derive(Clone, Debug)]
pub struct EmployeeDirectory {
    employees: Vec<Employee>,
    query: EmployeeQuery,
    paginator: Paginator,
}

impl EmployeeDirectory {
    pub fn new(employees: Vec<Employee>, records_per_page: usize) -> Self {
        Self {
            employees,
            query: EmployeeQuery::default(),
            paginator: Paginator::new(records_per_page),
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn query(&self) -> &EmployeeQuery {
        &self.query
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn filtered(&self) -> Vec<&Employee> {
        self.query.apply(&self.employees)
    }

    pub fn current_records(&self) -> Vec<&Employee> {
        let filtered = self.filtered();
        self.paginator.slice(&filtered).to_vec()
    }

    pub fn total(&self) -> usize {
        self.filtered().len()
    }

    pub fn page_count(&self) -> usize {
        self.paginator.page_count(self.total())
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.paginator.reset();
    }

    pub fn set_salary_min(&mut self, min: impl Into<String>) {
        self.query.salary.min = min.into();
        self.paginator.reset();
    }

    pub fn set_salary_max(&mut self, max: impl Into<String>) {
        self.query.salary.max = max.into();
        self.paginator.reset();
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.query.toggle_sort(key);
        self.paginator.reset();
    }

    pub fn set_sort(&mut self, sort: Option<SortConfig>) {
        self.query.sort = sort;
        self.paginator.reset();
    }

    pub fn set_records_per_page(&mut self, records_per_page: usize) {
        self.paginator.set_records_per_page(records_per_page);
    }

    /// Step to the next offered page size, wrapping around
    pub fn cycle_records_per_page(&mut self) {
        let current = self.paginator.records_per_page;
        let next = RECORDS_PER_PAGE_CHOICES
            .iter()
            .copied()
            .find(|&n| n > current)
            .unwrap_or(RECORDS_PER_PAGE_CHOICES[0]);
        self.set_records_per_page(next);
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let total = self.total();
        self.paginator.go_to(page, total)
    }

    pub fn next_page(&mut self) -> bool {
        let total = self.total();
        self.paginator.next(total)
    }

    pub fn prev_page(&mut self) -> bool {
        let total = self.total();
        self.paginator.prev(total)
    }
}

/// Format as US dollars, e.g. `$85,000.00`
pub fn format_salary(salary: f64) -> String {
    let cents = (salary.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if salary < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: u32, name: &str, title: &str, salary: f64) -> Employee {
        Employee {
            id,
            name: name.to_string(),
            job_title: title.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "+1-555-000-0000".to_string(),
            address: "1 Main St".to_string(),
            salary,
            profile_picture: format!("employee_{id:02}.jpg"),
        }
    }

    fn ids(rows: &[&Employee]) -> Vec<u32> {
        rows.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_salary_bounds_inclusive() {
        let data = vec![
            employee(1, "A", "Dev", 40000.0),
            employee(2, "B", "Dev", 60000.0),
            employee(3, "C", "Dev", 90000.0),
            employee(4, "D", "Dev", 120000.0),
        ];
        let query = EmployeeQuery {
            salary: SalaryRange::new("50000", "90000"),
            ..Default::default()
        };
        let salaries: Vec<f64> = query.apply(&data).iter().map(|e| e.salary).collect();
        assert_eq!(salaries, vec![60000.0, 90000.0]);
    }

    #[test]
    fn test_non_numeric_bounds_are_ignored() {
        let data = vec![employee(1, "A", "Dev", 40000.0), employee(2, "B", "Dev", 60000.0)];
        let query = EmployeeQuery {
            salary: SalaryRange::new("lots", ""),
            ..Default::default()
        };
        assert_eq!(query.apply(&data).len(), 2);

        let query = EmployeeQuery {
            salary: SalaryRange::new(" ", "50000"),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&data)), vec![1]);
    }

    #[test]
    fn test_search_matches_name_or_title_case_insensitive() {
        let data = vec![
            employee(1, "Grace Hopper", "Admiral", 1.0),
            employee(2, "Alan Turing", "Mathematician", 1.0),
            employee(3, "Ada Lovelace", "Analyst", 1.0),
        ];
        let mut query = EmployeeQuery {
            search: "HOPPER".into(),
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&data)), vec![1]);

        query.search = "an".into();
        // "Alan" and "Analyst" both contain it; "Admiral" does not
        assert_eq!(ids(&query.apply(&data)), vec![2, 3]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let data = vec![
            employee(1, "Zed", "Dev", 50000.0),
            employee(2, "Amy", "Dev", 70000.0),
            employee(3, "Bob", "Dev", 50000.0),
            employee(4, "Cal", "Dev", 70000.0),
        ];
        let mut query = EmployeeQuery::default();

        query.toggle_sort(SortKey::Salary);
        assert_eq!(ids(&query.apply(&data)), vec![1, 3, 2, 4]);

        // Name asc, then desc twice; salary sort afterwards keeps tie order
        query.toggle_sort(SortKey::Name);
        assert_eq!(ids(&query.apply(&data)), vec![2, 3, 4, 1]);
        query.toggle_sort(SortKey::Name);
        assert_eq!(query.sort.unwrap().direction, SortDirection::Desc);
        query.toggle_sort(SortKey::Name);
        assert_eq!(query.sort.unwrap().direction, SortDirection::Asc);

        query.toggle_sort(SortKey::Salary);
        assert_eq!(ids(&query.apply(&data)), vec![1, 3, 2, 4]);
        query.toggle_sort(SortKey::Salary);
        assert_eq!(ids(&query.apply(&data)), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_name_ties_keep_dataset_order_across_directions() {
        let data = vec![
            employee(1, "Kim", "Dev", 50000.0),
            employee(2, "Ann", "Ops", 60000.0),
            employee(3, "Kim", "QA", 70000.0),
            employee(4, "Ann", "Dev", 80000.0),
            employee(5, "Kim", "Ops", 90000.0),
        ];
        let mut dir = EmployeeDirectory::new(data, 10);
        let by_name = |direction| {
            Some(SortConfig {
                key: SortKey::Name,
                direction,
            })
        };

        dir.set_sort(by_name(SortDirection::Asc));
        assert_eq!(ids(&dir.filtered()), vec![2, 4, 1, 3, 5]);
        dir.set_sort(by_name(SortDirection::Desc));
        assert_eq!(ids(&dir.filtered()), vec![1, 3, 5, 2, 4]);
        dir.set_sort(by_name(SortDirection::Desc));
        assert_eq!(ids(&dir.filtered()), vec![1, 3, 5, 2, 4]);

        // Same sequence through the toggle
        dir.set_sort(None);
        dir.toggle_sort(SortKey::Name);
        assert_eq!(ids(&dir.filtered()), vec![2, 4, 1, 3, 5]);
        dir.toggle_sort(SortKey::Name);
        assert_eq!(ids(&dir.filtered()), vec![1, 3, 5, 2, 4]);
        dir.toggle_sort(SortKey::Name);
        assert_eq!(ids(&dir.filtered()), vec![2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_pagination_sizes() {
        let data: Vec<u32> = (0..25).collect();
        let mut pager = Paginator::new(10);
        assert_eq!(pager.page_count(data.len()), 3);

        let mut sizes = Vec::new();
        for page in 1..=3 {
            assert!(pager.go_to(page, data.len()));
            sizes.push(pager.slice(&data).len());
        }
        assert_eq!(sizes, vec![10, 10, 5]);
        assert_eq!(pager.summary(data.len()).unwrap(), "Showing 21 to 25 of 25 employees");
    }

    #[test]
    fn test_out_of_range_navigation_ignored() {
        let mut pager = Paginator::new(10);
        assert!(!pager.go_to(0, 25));
        assert!(!pager.go_to(4, 25));
        assert!(!pager.prev(25));
        assert_eq!(pager.current_page, 1);
        assert!(pager.next(25));
        assert!(pager.next(25));
        assert!(!pager.next(25));
        assert_eq!(pager.current_page, 3);
    }

    #[test]
    fn test_empty_result() {
        let pager = Paginator::new(10);
        assert_eq!(pager.page_count(0), 0);
        assert!(pager.summary(0).is_none());
        assert!(pager.page_numbers(0).is_empty());
        let empty: [u8; 0] = [];
        assert!(pager.slice(&empty).is_empty());
    }

    #[test]
    fn test_page_numbers_collapse() {
        use PageMarker::{Ellipsis as E, Page as P};

        let mut pager = Paginator::new(1);
        assert_eq!(pager.page_numbers(5), vec![P(1), P(2), P(3), P(4), P(5)]);

        assert_eq!(pager.page_numbers(10), vec![P(1), P(2), P(3), P(4), E, P(10)]);

        pager.current_page = 5;
        assert_eq!(pager.page_numbers(10), vec![P(1), E, P(4), P(5), P(6), E, P(10)]);

        pager.current_page = 9;
        assert_eq!(pager.page_numbers(10), vec![P(1), E, P(7), P(8), P(9), P(10)]);
    }

    #[test]
    fn test_directory_resets_page_on_changes() {
        let data: Vec<Employee> = (1..=25)
            .map(|i| employee(i, &format!("Emp{i:02}"), "Dev", 1000.0 * i as f64))
            .collect();
        let mut dir = EmployeeDirectory::new(data, 10);

        assert!(dir.go_to_page(3));
        dir.set_search("emp");
        assert_eq!(dir.paginator().current_page(), 1);

        assert!(dir.go_to_page(2));
        dir.toggle_sort(SortKey::Salary);
        assert_eq!(dir.paginator().current_page(), 1);

        assert!(dir.go_to_page(2));
        dir.set_salary_min("5000");
        assert_eq!(dir.paginator().current_page(), 1);
        assert_eq!(dir.total(), 21);

        assert!(dir.go_to_page(3));
        dir.cycle_records_per_page();
        assert_eq!(dir.paginator().records_per_page(), 20);
        assert_eq!(dir.paginator().current_page(), 1);
    }

    #[test]
    fn test_records_per_page_cycle_wraps() {
        let mut dir = EmployeeDirectory::new(Vec::new(), 50);
        dir.cycle_records_per_page();
        assert_eq!(dir.paginator().records_per_page(), 5);
    }

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(85000.0), "$85,000.00");
        assert_eq!(format_salary(1234567.891), "$1,234,567.89");
        assert_eq!(format_salary(999.5), "$999.50");
        assert_eq!(format_salary(0.0), "$0.00");
    }

    #[test]
    fn test_bundled_dataset_parses() {
        let employees = load_bundled().unwrap();
        assert!(employees.len() >= 25);
        assert!(employees.iter().all(|e| e.salary > 0.0 && !e.name.is_empty()));
    }

    #[test]
    fn test_malformed_dataset_is_an_error() {
        let err = parse_employees("[{\"id\": 1}]").unwrap_err();
        assert!(matches!(err, ChallengeError::DatasetError(_)));
    }
}
