use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use ui_challenges::employees::{
    self, Employee, EmployeeDirectory, PageMarker, SortConfig, SortDirection, SortKey,
    format_salary,
};
use ui_challenges::{Config, ROUTES, logging, tui};

#[derive(Parser)]
#[command(
    name = "challenges",
    version,
    about = "Interactive UI challenge showcase for the terminal",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Route to open when no subcommand is given
    #[arg(long, default_value = "/")]
    route: String,

    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Employee dataset in JSON (defaults to the bundled records)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Log file (defaults to the per-user cache directory)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive showcase
    Run {
        /// Route to open, e.g. /scrollNotifier
        #[arg(long, default_value = "/")]
        route: String,
    },
    /// List the registered routes
    Routes,
    /// Query the employee dataset without the TUI
    Employees {
        /// Case-insensitive match on name or job title
        #[arg(long, default_value = "")]
        search: String,
        /// Minimum salary (inclusive)
        #[arg(long, default_value = "")]
        min: String,
        /// Maximum salary (inclusive)
        #[arg(long, default_value = "")]
        max: String,
        /// Sort column
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Page to print (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Records per page (defaults to the configured value)
        #[arg(long)]
        per_page: Option<usize>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Name,
    Salary,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortKey::Name,
            SortArg::Salary => SortKey::Salary,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(Config::default_log_path);
    if let Err(e) = logging::init(&log_path) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };

    match &cli.command {
        None => run_showcase(&cli, &config, &cli.route),
        Some(Command::Run { route }) => run_showcase(&cli, &config, route),
        Some(Command::Routes) => {
            print_routes();
            Ok(())
        }
        Some(Command::Employees {
            search,
            min,
            max,
            sort,
            desc,
            page,
            per_page,
        }) => {
            let records = load_dataset(&cli, &config)?;
            let mut directory =
                EmployeeDirectory::new(records, per_page.unwrap_or(config.records_per_page));
            directory.set_search(search.as_str());
            directory.set_salary_min(min.as_str());
            directory.set_salary_max(max.as_str());
            directory.set_sort(sort.map(|arg| SortConfig {
                key: arg.into(),
                direction: if *desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                },
            }));
            let page = *page;
            if page != 1 && !directory.go_to_page(page) {
                bail!(
                    "Page {page} is out of range (1-{})",
                    directory.page_count().max(1)
                );
            }
            print_employees(&directory);
            Ok(())
        }
    }
}

fn run_showcase(cli: &Cli, config: &Config, route: &str) -> Result<()> {
    let records = load_dataset(cli, config)?;
    tracing::info!(route, employees = records.len(), "launching showcase");
    tui::launch(config, &records, route).context("Showcase exited with an error")
}

fn load_dataset(cli: &Cli, config: &Config) -> Result<Vec<Employee>> {
    match cli.data.as_ref().or(config.employees_path.as_ref()) {
        Some(path) => employees::load_from_path(path)
            .with_context(|| format!("Failed to load employees from {}", path.display())),
        None => employees::load_bundled().context("Bundled employee data is invalid"),
    }
}

fn print_routes() {
    println!("Routes:");
    for (index, route) in ROUTES.iter().enumerate() {
        println!("  {index}  {:<22} {}", route.path, route.label);
    }
}

fn print_employees(directory: &EmployeeDirectory) {
    let records = directory.current_records();
    if records.is_empty() {
        println!("No employees found matching your criteria");
        return;
    }

    println!(
        "{:<4} {:<24} {:<28} {:>14}  {}",
        "ID", "Name", "Job Title", "Salary", "Email"
    );
    for employee in records {
        println!(
            "{:<4} {:<24} {:<28} {:>14}  {}",
            employee.id,
            employee.name,
            employee.job_title,
            format_salary(employee.salary),
            employee.email
        );
    }

    let total = directory.total();
    if let Some(summary) = directory.paginator().summary(total) {
        println!();
        println!("{summary}");
    }
    let strip: Vec<String> = directory
        .paginator()
        .page_numbers(total)
        .into_iter()
        .map(|marker| match marker {
            PageMarker::Page(n) if n == directory.paginator().current_page() => format!("[{n}]"),
            PageMarker::Page(n) => n.to_string(),
            PageMarker::Ellipsis => "...".to_string(),
        })
        .collect();
    println!("Pages: {}", strip.join(" "));
}
