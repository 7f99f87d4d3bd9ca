use futures::stream::{self, StreamExt};
use log::{error, info, warn};

use crate::core::html_parser::parse_department;
use crate::core::schedule::PageFetcher;
use crate::core::writer::CourseWriter;
use crate::error::scrape::ScrapeError;
use crate::model::department::DepartmentQuery;
use crate::model::report::{DepartmentReport, DepartmentSummary, RunSummary};
use crate::model::scrape_config::{ParseOptions, ScrapeConfig};

/// Fetches and parses every configured department, then hands results to `writer`
/// in configuration order.
///
/// Up to `concurrency` departments are in flight at once; parsing happens on the
/// blocking pool. A department that cannot be fetched is reported in the summary
/// and does not stop the others. Writer failures abort the run.
pub async fn run<F, W>(
    config: &ScrapeConfig,
    fetcher: &F,
    writer: &mut W,
) -> Result<RunSummary, ScrapeError>
where
    F: PageFetcher + ?Sized,
    W: CourseWriter + ?Sized,
{
    let options = config.parse_options();
    let mut results = stream::iter(config.queries())
        .map(|query| async move {
            let report = scrape_department(fetcher, &query, options).await;
            (query.department, report)
        })
        .buffered(config.concurrency.max(1));

    let mut summary = RunSummary::default();
    while let Some((department, report)) = results.next().await {
        match report {
            Ok(report) => {
                writer.write_department(department, &report.courses)?;
                if !report.skipped.is_empty() {
                    warn!("department {}: {} courses skipped", department, report.skipped.len());
                }
                summary.departments.push(DepartmentSummary {
                    department,
                    parsed: report.courses.len(),
                    skipped: report.skipped,
                    error: None,
                });
            }
            Err(err) => {
                error!("department {} failed: {}", department, err.message);
                summary.departments.push(DepartmentSummary {
                    department,
                    parsed: 0,
                    skipped: Vec::new(),
                    error: Some(err.message),
                });
            }
        }
    }
    writer.finish()?;

    info!(
        "{} courses parsed, {} skipped, {} departments",
        summary.total_parsed(),
        summary.total_skipped(),
        summary.departments.len()
    );
    Ok(summary)
}

async fn scrape_department<F>(
    fetcher: &F,
    query: &DepartmentQuery,
    options: ParseOptions,
) -> Result<DepartmentReport, ScrapeError>
where
    F: PageFetcher + ?Sized,
{
    let html = fetcher.fetch_department(query).await?;
    let department = query.department;
    let report = tokio::task::spawn_blocking(move || {
        info!("parsing department {}", department);
        parse_department(&html, &options)
    })
    .await?;
    Ok(report)
}
