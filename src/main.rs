use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, error, info, warn};
use schedule_scraper::core::runner;
use schedule_scraper::core::schedule::{FileFetcher, PageFetcher, SavingFetcher, ScheduleClient};
use schedule_scraper::core::writer::JsonLinesWriter;
use schedule_scraper::error::ScrapeError;
use schedule_scraper::model::{Department, Level, RunSummary, ScrapeConfig, Session, WriteMode};

#[derive(Parser)]
#[command(name = "schedule_scraper", about = "Scrape course offerings from the class schedule site")]
struct Cli {
    /// JSON config file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Academic year, e.g. 2014
    #[arg(short, long)]
    year: Option<String>,
    #[arg(short, long, value_enum)]
    session: Option<Session>,
    #[arg(short, long, value_enum)]
    level: Option<Level>,
    /// Department to scrape (repeatable, default: all)
    #[arg(short, long = "dept", value_enum)]
    departments: Vec<Department>,
    /// Output file (JSON lines)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Append to the output file instead of overwriting it
    #[arg(long)]
    append: bool,
    /// Ignore rows too short to classify instead of skipping the course
    #[arg(long)]
    lenient: bool,
    /// Departments fetched at once
    #[arg(long)]
    concurrency: Option<usize>,
    /// Parse a saved schedule page instead of fetching (first department only)
    #[arg(long)]
    from_file: Option<PathBuf>,
    /// Also save each fetched page to <DIR>/<department>.html
    #[arg(long, value_name = "DIR")]
    save_html: Option<PathBuf>,
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<(ScrapeConfig, Option<PathBuf>), ScrapeError> {
        let mut config = match &self.config {
            Some(path) => ScrapeConfig::from_file(path)?,
            None => ScrapeConfig::default(),
        };

        if let Some(year) = self.year {
            config.year = year;
        }
        if let Some(session) = self.session {
            config.session = session;
        }
        if let Some(level) = self.level {
            config.level = level;
        }
        if !self.departments.is_empty() {
            config.departments = self.departments;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.append {
            config.write_mode = WriteMode::Append;
        }
        if self.lenient {
            config.lenient = true;
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(dir) = self.save_html {
            config.save_html = Some(dir);
        }
        if self.from_file.is_some() && config.departments.len() > 1 {
            warn!("--from-file reads one page, only department {} is used", config.departments[0]);
            config.departments.truncate(1);
        }

        Ok((config, self.from_file))
    }
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_timed_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) if verbose => builder.filter_level(LevelFilter::Debug),
        Err(_) => builder.filter_level(LevelFilter::Info),
    };
    builder.init();
}

fn print_summary(summary: &RunSummary) {
    for dept in &summary.departments {
        match &dept.error {
            Some(err) => println!("{:<5} failed: {}", dept.department.key(), err),
            None => println!(
                "{:<5} {} courses, {} skipped",
                dept.department.key(),
                dept.parsed,
                dept.skipped.len()
            ),
        }
        for skipped in &dept.skipped {
            println!(
                "      #{} {} (row {}): {}",
                skipped.position,
                skipped.code.as_deref().unwrap_or("?"),
                skipped.row,
                skipped.reason
            );
        }
    }
}

async fn scrape(cli: Cli) -> Result<RunSummary, ScrapeError> {
    let (config, from_file) = cli.into_config()?;
    let fetcher: Box<dyn PageFetcher> = match from_file {
        Some(path) => Box::new(FileFetcher { path }),
        None => Box::new(ScheduleClient::new(&config)?),
    };
    let fetcher: Box<dyn PageFetcher> = match &config.save_html {
        Some(dir) => Box::new(SavingFetcher::new(fetcher, dir.clone())),
        None => fetcher,
    };

    let mut writer = JsonLinesWriter::create(&config.output, config.write_mode)?;
    let summary = runner::run(&config, fetcher.as_ref(), &mut writer).await?;
    info!("{} courses written to {}", writer.written(), config.output.display());
    Ok(summary)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match scrape(cli).await {
        Ok(summary) => {
            print_summary(&summary);
            if summary.all_failed() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
