pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod errors;
pub mod http;
pub mod normalizer;
pub mod output;
pub mod pagination;
pub mod rate_limiter;
pub mod rating;
pub mod resolver;
pub mod services;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::config::{RegionConfig, get_default_regions};
use crate::services::{PipelineService, RunMode};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_discover(
    start_date: Option<&str>,
    end_date: Option<&str>,
    coords: &[String],
    min_entrants: i64,
    out: &Path,
) -> Result<()> {
    let (after, before) = cli::parse_window(start_date, end_date)?;
    let regions = resolve_regions(coords)?;

    let mut config = AppConfig::new();
    config.filter.min_entrants = min_entrants;

    let mode = RunMode::Discovery {
        regions,
        after,
        before,
    };
    run_pipeline(config, mode, out)
}

pub fn handle_direct(
    url: Option<&str>,
    tournament_slug: Option<&str>,
    event_slug: Option<&str>,
    out: &Path,
) -> Result<()> {
    let event_slugs = cli::direct_event_slugs(url, tournament_slug, event_slug)?;
    let config = AppConfig::new();
    run_pipeline(config, RunMode::Direct { event_slugs }, out)
}

fn resolve_regions(coords: &[String]) -> Result<Vec<RegionConfig>> {
    if coords.is_empty() {
        Ok(get_default_regions())
    } else {
        cli::parse_regions(coords)
    }
}

fn run_pipeline(config: AppConfig, mode: RunMode, out: &Path) -> Result<()> {
    let api_token = resolve_api_token()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut service = PipelineService::new(&api_token, config)?;
        let bundle = service.run(mode).await?;
        let path = output::write_bundle(out, output::DEFAULT_BUNDLE_NAME, &bundle)?;
        println!("Wrote bundle to {}", path.display());
        Ok(())
    })
}

fn resolve_api_token() -> Result<String> {
    std::env::var("STARTGG_API_KEY").context("Missing STARTGG_API_KEY")
}
