use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use covid_tracker::config::{Config, DEFAULT_BASE_URL, DEFAULT_DAYS, MAX_DAYS, clamp_days};
use covid_tracker::report::{SnapshotScope, map_locale, render_snapshot};
use covid_tracker::series::{chart_points, chart_title};
use covid_tracker::{Client, Tracker, menu, viz};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "covid-tracker",
    version,
    about = "Fetch, print & chart COVID-19 statistics from disease.sh"
)]
struct Cli {
    #[command(flatten)]
    opts: GlobalOpts,
    /// Defaults to the interactive menu.
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Args, Debug)]
struct GlobalOpts {
    /// API base URL.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,
    /// Directory for charts (default: current directory).
    #[arg(long, global = true, default_value = ".")]
    out_dir: PathBuf,
    /// Width of the chart (default 1200).
    #[arg(long, global = true, default_value_t = 1200)]
    width: u32,
    /// Height of the chart (default 600).
    #[arg(long, global = true, default_value_t = 600)]
    height: u32,
    /// Number format locale for reports and axis labels (en, de, fr, ...).
    #[arg(long, global = true, default_value = "en")]
    locale: String,
    /// TrueType font for chart text (system fonts are searched otherwise).
    #[arg(long, global = true)]
    font: Option<PathBuf>,
    /// Open each written chart in the default viewer.
    #[arg(long, global = true, default_value_t = false)]
    open: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive menu (default).
    Menu,
    /// Print worldwide statistics.
    Global {
        /// Print the raw snapshot as JSON instead of the report.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print statistics for one country.
    Country {
        /// Country name or ISO code (case-insensitive).
        name: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Chart cumulative cases for a trailing window of days.
    History(HistoryArgs),
}

#[derive(Args, Debug)]
struct HistoryArgs {
    /// Country name or ISO code, or "all" for worldwide.
    name: String,
    /// Number of days (clamped to 1..=30).
    #[arg(short, long, default_value_t = DEFAULT_DAYS)]
    days: u32,
    /// Chart path (.svg or .png). Defaults to <out-dir>/covid_<name>_<days>d.svg
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also print the date/count table.
    #[arg(long, default_value_t = false)]
    table: bool,
    /// Print the series (sorted by date) as JSON instead of drawing a chart.
    #[arg(long, default_value_t = false, conflicts_with_all = ["out", "table"])]
    json: bool,
}

impl GlobalOpts {
    fn config(&self) -> Config {
        Config {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            out_dir: self.out_dir.clone(),
            chart_width: self.width,
            chart_height: self.height,
            locale: self.locale.clone(),
            font: self.font.clone(),
            open_charts: self.open,
            ..Config::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.opts.config();
    match cli.cmd.unwrap_or(Command::Menu) {
        Command::Menu => cmd_menu(config),
        Command::Global { json } => cmd_snapshot(config, None, json),
        Command::Country { name, json } => cmd_snapshot(config, Some(name), json),
        Command::History(args) => cmd_history(config, args),
    }
}

fn cmd_menu(config: Config) -> Result<()> {
    let tracker = Tracker::new(config).context("start tracker")?;
    let stdin = io::stdin();
    menu::run(&tracker, stdin.lock(), io::stdout().lock())?;
    Ok(())
}

fn cmd_snapshot(config: Config, country: Option<String>, json: bool) -> Result<()> {
    let client = Client::new(&config)?;
    let (snapshot, scope) = match country {
        None => (
            client.global_stats().context("fetch global data")?,
            SnapshotScope::Global,
        ),
        Some(name) => (
            client
                .country_stats(&name)
                .with_context(|| format!("fetch data for {name}"))?,
            SnapshotScope::Country(name),
        ),
    };

    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&snapshot)?)?;
    } else {
        render_snapshot(&mut out, Some(&snapshot), &scope, map_locale(&config.locale))?;
    }
    Ok(())
}

fn cmd_history(config: Config, args: HistoryArgs) -> Result<()> {
    let days = clamp_days(args.days);
    if days != args.days {
        eprintln!("Using {days} days (allowed range 1..={MAX_DAYS})");
    }
    let client = Client::new(&config)?;
    let series = client
        .historical_stats(&args.name, Some(days))
        .with_context(|| format!("fetch historical data for {}", args.name))?;
    if args.json {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", serde_json::to_string_pretty(&series.sorted_by_date())?)?;
        return Ok(());
    }

    let points = chart_points(&series);
    if points.is_empty() {
        bail!("no historical cases returned for {}", args.name);
    }

    if args.table {
        let locale = map_locale(&config.locale);
        let mut out = io::stdout().lock();
        for (date, cases) in &points {
            writeln!(
                out,
                "{}  {}",
                date.format("%Y-%m-%d"),
                covid_tracker::report::format_count(*cases as f64, locale)
            )?;
        }
    }

    let path = args
        .out
        .unwrap_or_else(|| config.chart_path(&args.name, days));
    viz::plot_series_with_font(
        &points,
        &chart_title(&args.name, days),
        &path,
        config.chart_width,
        config.chart_height,
        &config.locale,
        config.font.as_deref(),
    )?;
    eprintln!("Wrote chart to {}", path.display());
    if config.open_charts {
        viz::open_in_viewer(&path)?;
    }
    Ok(())
}
