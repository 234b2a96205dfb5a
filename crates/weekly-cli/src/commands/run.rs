/// Run command: fetch, classify, publish once.
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use weekly_core::{aggregate, fetch_window, normalize, Config, Report};
use weekly_integrations::{AsanaClient, DocumentSink, PublishedDocument, QuipClient, TaskSource};

pub async fn handle_run(date: Option<String>, dry_run: bool) -> Result<()> {
    let config = Config::load()?;
    let reference_date = resolve_reference_date(date.as_deref())?;

    let source = AsanaClient::new(
        config.asana.access_token.clone(),
        config.asana.base_url.clone(),
    )?;

    if dry_run {
        let report = build_report(&source, &config.asana.project_ids, reference_date).await?;
        println!("{}", report.body());
        println!("(dry run: nothing published)");
        return Ok(());
    }

    let sink = QuipClient::new(config.quip.access_token.clone(), config.quip.base_url.clone())?;

    let document = run_digest(&source, &sink, &config.asana.project_ids, reference_date).await?;

    println!("Report published: {}", document.id);
    if let Some(link) = document.link {
        println!("  {link}");
    }
    Ok(())
}

/// One full invocation: aggregate every configured project, then hand
/// the finished report to the sink exactly once.
///
/// Any failure while fetching or normalizing any task aborts the run
/// before anything is published; there is no partial report.
pub async fn run_digest(
    source: &dyn TaskSource,
    sink: &dyn DocumentSink,
    project_ids: &[String],
    reference_date: NaiveDate,
) -> Result<PublishedDocument> {
    let report = build_report(source, project_ids, reference_date).await?;

    if report.is_empty() {
        log::warn!("Report for {reference_date} has no entries");
    }

    let document = sink
        .publish(&report.title, &report.body())
        .await
        .with_context(|| format!("Failed to publish report to {}", sink.sink_name()))?;

    log::info!(
        "Published \"{}\" to {} as {}",
        report.title,
        sink.sink_name(),
        document.id
    );

    Ok(document)
}

/// Fetch and normalize every configured project, in configured order,
/// and aggregate the results into one report.
async fn build_report(
    source: &dyn TaskSource,
    project_ids: &[String],
    reference_date: NaiveDate,
) -> Result<Report> {
    let (window_start, window_end) = fetch_window(reference_date);

    let mut projects = Vec::with_capacity(project_ids.len());
    for project_id in project_ids {
        let raw = source
            .fetch_tasks(project_id, window_start, window_end)
            .await
            .with_context(|| format!("Failed to fetch tasks for project {project_id}"))?;

        let tasks = raw
            .into_iter()
            .map(normalize)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to normalize tasks for project {project_id}"))?;

        projects.push(tasks);
    }

    Ok(aggregate(&projects, reference_date))
}

fn resolve_reference_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .with_context(|| format!("Invalid date {value:?} (expected YYYY-MM-DD)")),
        None => Ok(Local::now().date_naive()),
    }
}
