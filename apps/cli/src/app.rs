//! One invocation of the collector: keys, collection, output.

use crate::args::Cli;
use anyhow::Context;
use chrono::Local;
use clap::CommandFactory;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::info;
use urlc::domain::config::AppConfig;
use urlc::domain::{DomainReport, SearchMode};
use urlc::kernel::credentials::{ApiKeyKind, CredentialStore};
use urlc::kernel::export::{RenderOptions, render, write_combined, write_per_domain};
use urlc::{Collector, display_score};

/// Runs the command described by `cli` with an already loaded `config`.
pub async fn run(cli: &Cli, config: AppConfig) -> anyhow::Result<ExitCode> {
    let store = CredentialStore::from_home_dir().context("Failed to locate the home directory")?;

    if cli.sets_keys() {
        save_keys(&store, cli)?;
        return Ok(ExitCode::SUCCESS);
    }

    if cli.domains.is_empty() {
        eprintln!("{}", Cli::command().render_help());
        return Ok(ExitCode::FAILURE);
    }

    let Some(serper_key) = store.resolve(ApiKeyKind::Serper)? else {
        eprintln!("[ERR] Serper API key required: use --set-key or set SERPER_API_KEY");
        return Ok(ExitCode::FAILURE);
    };
    let groq_key = store.resolve(ApiKeyKind::Groq)?;

    let mode = cli.mode(&config);
    let options = cli.options(&config);
    let collector = Collector::new(config, serper_key, groq_key).context("Failed to create API clients")?;

    if mode == SearchMode::Seo && options.use_ai && !options.no_filter && !collector.has_classifier() {
        info!("No Groq key; SEO results are filtered by brand score");
    }

    let reports = collector.collect_all(&cli.domains, mode, &options).await;
    report_progress(&reports);

    let rendered = render(
        &reports,
        cli.format,
        RenderOptions { scores: cli.scores, decode: cli.decode },
        |report, hit| display_score(report.mode, hit),
    )?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()?;

    if let Some(path) = &cli.output {
        write_combined(path, &reports)?;
        eprintln!("\n[OK] Saved: {}", path.display());
    }

    if let Some(dir) = &cli.save_dir {
        for path in write_per_domain(dir, &reports, &Local::now())? {
            eprintln!("[OK] Saved: {}", path.display());
        }
    }

    let total: usize = reports.iter().map(DomainReport::total).sum();
    eprintln!("\nTotal: {total} URLs");

    if reports.iter().all(|report| !report.is_ok()) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn save_keys(store: &CredentialStore, cli: &Cli) -> anyhow::Result<()> {
    let keys = [(ApiKeyKind::Serper, &cli.set_key), (ApiKeyKind::Groq, &cli.set_groq_key)];
    for (kind, key) in keys {
        if let Some(key) = key {
            let path = store.save(kind, key)?;
            eprintln!("[OK] API key saved: {}", path.display());
        }
    }
    Ok(())
}

fn report_progress(reports: &[DomainReport]) {
    for report in reports {
        match &report.error {
            None => eprintln!("[OK] {}: {}", report.domain, report.total()),
            Some(error) => eprintln!("[ERR] {}: {error}", report.domain),
        }
    }
}
