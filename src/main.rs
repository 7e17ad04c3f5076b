use anyhow::{bail, Context, Result};
use crossterm::style::Stylize;
use std::path::PathBuf;
use tracing::debug;

use clinic_cli::config::Config;
use clinic_cli::data::loaders;
use clinic_cli::data::query::{run_query, QuerySpec, SortSpec};
use clinic_cli::domain::appointment::{sample_appointments, Appointment};
use clinic_cli::domain::patient::{sample_patients, Patient};
use clinic_cli::stats;
use clinic_cli::table_display;
use clinic_cli::utils::logging::init_logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Appointments,
    Patients,
}

#[derive(Debug)]
struct CliArgs {
    screen: Screen,
    data: Option<PathBuf>,
    search: Option<String>,
    filters: Vec<(String, String)>,
    sort: Option<String>,
    page: usize,
    page_size: Option<usize>,
    show_stats: bool,
    verbose: bool,
}

fn print_help() {
    println!("{}", "clinic-cli - clinic record console".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  clinic-cli [OPTIONS] [appointments|patients]");
    println!();
    println!("{}", "Options:".yellow());
    println!(
        "  {}       - Record file (.json, or .csv for appointments)",
        "--data FILE".green()
    );
    println!("  {}     - Case-insensitive search", "--search TERM".green());
    println!(
        "  {} - Equality filter, repeatable (e.g. status=confirmed)",
        "--filter F=V".green()
    );
    println!(
        "  {} - Sort key, optional direction (e.g. date:desc)",
        "--sort KEY[:DIR]".green()
    );
    println!("  {}          - 1-based page number", "--page N".green());
    println!("  {}     - Records per page", "--page-size N".green());
    println!("  {}           - Show dashboard counts", "--stats".green());
    println!(
        "  {} - Write default config file",
        "--generate-config".green()
    );
    println!("  {}                - Verbose logging", "-v".green());
    println!();
    println!("{}", "Examples:".yellow());
    println!("  clinic-cli appointments --filter status=confirmed --sort time");
    println!("  clinic-cli patients --search john --filter age_range=senior");
    println!("  clinic-cli appointments --data book.csv --page 2");
    println!();
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs {
        screen: Screen::Appointments,
        data: None,
        search: None,
        filters: Vec::new(),
        sort: None,
        page: 1,
        page_size: None,
        show_stats: false,
        verbose: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "appointments" => parsed.screen = Screen::Appointments,
            "patients" => parsed.screen = Screen::Patients,
            "--data" => {
                let value = iter.next().context("--data needs a file path")?;
                parsed.data = Some(PathBuf::from(value));
            }
            "--search" => {
                parsed.search = Some(iter.next().context("--search needs a term")?.clone());
            }
            "--filter" => {
                let value = iter.next().context("--filter needs FIELD=VALUE")?;
                let (field, value) = value
                    .split_once('=')
                    .context("--filter needs FIELD=VALUE")?;
                parsed.filters.push((field.to_string(), value.to_string()));
            }
            "--sort" => {
                parsed.sort = Some(iter.next().context("--sort needs a key")?.clone());
            }
            "--page" => {
                let value = iter.next().context("--page needs a number")?;
                parsed.page = value.parse().context("--page needs a number")?;
            }
            "--page-size" => {
                let value = iter.next().context("--page-size needs a number")?;
                parsed.page_size = Some(value.parse().context("--page-size needs a number")?);
            }
            "--stats" => parsed.show_stats = true,
            "-v" | "--verbose" => parsed.verbose = true,
            other => bail!("Unknown argument '{}' (try --help)", other),
        }
    }

    Ok(parsed)
}

/// Turn `"date"` / `"date:desc"` into a SortSpec. Directions other than
/// asc/desc are rejected.
fn parse_sort(raw: &str) -> Result<SortSpec> {
    match raw.split_once(':') {
        None => Ok(SortSpec::ascending(raw)),
        Some((key, "asc")) => Ok(SortSpec::ascending(key)),
        Some((key, "desc")) => Ok(SortSpec::descending(key)),
        Some((_, dir)) => bail!("Unknown sort direction '{}' (use asc or desc)", dir),
    }
}

fn build_spec(args: &CliArgs, config: &Config) -> Result<QuerySpec> {
    let mut spec = QuerySpec::new(args.page_size.unwrap_or(config.display.page_size))
        .with_page(args.page);

    if let Some(term) = &args.search {
        spec = spec.with_search(term.clone());
    }
    for (field, value) in &args.filters {
        spec = spec.with_filter(field.clone(), value.clone());
    }

    let sort_arg = args
        .sort
        .clone()
        .or_else(|| config.behavior.default_sort.clone());
    if let Some(raw) = sort_arg {
        spec = spec.with_sort(parse_sort(&raw)?);
    }

    Ok(spec)
}

/// Resolve a bare file name against the configured data directory.
fn resolve_data_path(path: PathBuf, config: &Config) -> PathBuf {
    if path.is_relative() && !path.exists() {
        if let Some(data_dir) = &config.behavior.data_dir {
            return data_dir.join(path);
        }
    }
    path
}

fn load_appointment_records(args: &CliArgs, config: &Config) -> Result<Vec<Appointment>> {
    match &args.data {
        None => Ok(sample_appointments()),
        Some(path) => {
            let path = resolve_data_path(path.clone(), config);
            if path.extension().is_some_and(|e| e == "csv") {
                loaders::load_appointments_csv(&path)
            } else {
                loaders::load_appointments_json(&path)
            }
        }
    }
}

fn load_patient_records(args: &CliArgs, config: &Config) -> Result<Vec<Patient>> {
    match &args.data {
        None => Ok(sample_patients()),
        Some(path) => {
            let path = resolve_data_path(path.clone(), config);
            if path.extension().is_some_and(|e| e == "csv") {
                bail!("Patient records load from JSON only");
            }
            loaders::load_patients_json(&path)
        }
    }
}

/// The pipeline does not auto-correct an out-of-range page, so clamp
/// before display the way a screen would.
fn clamp_page(spec: &mut QuerySpec, total_pages: usize) {
    let max_page = total_pages.max(1);
    if spec.page > max_page {
        debug!("Clamping page {} to {}", spec.page, max_page);
        spec.page = max_page;
    }
}

fn run_appointments(args: &CliArgs, config: &Config) -> Result<()> {
    let appointments = load_appointment_records(args, config)?;

    if args.show_stats {
        let totals = stats::appointment_stats(&appointments);
        let types = stats::visit_type_distribution(&appointments);
        let priorities = stats::priority_distribution(&appointments);
        let queue = stats::queue_stats(&appointments);

        println!("{}", "Appointments".blue().bold());
        println!("  Total      {}", totals.total);
        println!("  Confirmed  {}", totals.confirmed);
        println!("  Pending    {}", totals.pending);
        println!("  Completed  {}", totals.completed);
        println!("{}", "Visit types".blue().bold());
        println!("  New        {}", types.new);
        println!("  Follow-up  {}", types.follow_up);
        println!("  Review     {}", types.review);
        println!("{}", "Priority".blue().bold());
        println!("  High       {}", priorities.high);
        println!("  Medium     {}", priorities.medium);
        println!("  Low        {}", priorities.low);
        println!("{}", "Queue".blue().bold());
        println!("  Waiting    {}", queue.waiting);
        println!("  Completed  {}", queue.completed);
        return Ok(());
    }

    let mut spec = build_spec(args, config)?;
    let probe = run_query(&appointments, &spec);
    clamp_page(&mut spec, probe.total_pages);
    let result = run_query(&appointments, &spec);
    table_display::display_appointments(&result, &spec);
    Ok(())
}

fn run_patients(args: &CliArgs, config: &Config) -> Result<()> {
    let patients = load_patient_records(args, config)?;

    if args.show_stats {
        let totals = stats::patient_stats(&patients);
        println!("{}", "Patients".blue().bold());
        println!("  Total    {}", totals.total);
        println!("  Active   {}", totals.active);
        println!("  Regular  {}", totals.regular);
        return Ok(());
    }

    let mut spec = build_spec(args, config)?;
    let probe = run_query(&patients, &spec);
    clamp_page(&mut spec, probe.total_pages);
    let result = run_query(&patients, &spec);
    table_display::display_patients(&result, &spec);
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--generate-config") {
        let config = Config::default();
        config.save()?;
        println!("Wrote {}", Config::get_config_path()?.display());
        return Ok(());
    }

    let parsed = parse_args(&args)?;
    init_logging(parsed.verbose);

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("{}", format!("Config error, using defaults: {}", e).red());
        Config::default()
    });

    match parsed.screen {
        Screen::Appointments => run_appointments(&parsed, &config),
        Screen::Patients => run_patients(&parsed, &config),
    }
}
