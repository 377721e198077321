use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use regex::Regex;

use crate::config::RegionConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "norcal-smash-ranking pipeline")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Discover tournaments by region and date window, then rank players
    Discover {
        /// Window start, YYYY-MM-DD (inclusive)
        #[arg(long)]
        start_date: Option<String>,
        /// Window end, YYYY-MM-DD (inclusive)
        #[arg(long)]
        end_date: Option<String>,
        /// Region as "LAT,LON:RADIUS" (repeatable; defaults to NorCal)
        #[arg(long = "coords")]
        coords: Vec<String>,
        /// Minimum entrant count for an event to qualify
        #[arg(long, default_value_t = 16)]
        min_entrants: i64,
        /// Output directory
        #[arg(short, long, default_value = "data/outputs")]
        out: PathBuf,
    },
    /// Rank players for explicitly named events (discovery off)
    Direct {
        /// start.gg event URL, e.g. start.gg/tournament/<t>/event/<e>
        #[arg(long)]
        url: Option<String>,
        /// Tournament slug (paired with --event-slug)
        #[arg(long)]
        tournament_slug: Option<String>,
        /// Event slug within the tournament
        #[arg(long)]
        event_slug: Option<String>,
        /// Output directory
        #[arg(short, long, default_value = "data/outputs")]
        out: PathBuf,
    },
}

// --- Input parsing helpers ---

/// Parse "YYYY-MM-DD" into unix seconds at UTC midnight
pub fn parse_date(value: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| anyhow!("invalid date '{}': {}", value, e))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("invalid date '{}'", value))?;
    Ok(midnight.and_utc().timestamp())
}

/// Validate an inclusive window, returning (after, before) timestamps
pub fn parse_window(start: Option<&str>, end: Option<&str>) -> Result<(Option<i64>, Option<i64>)> {
    let after = start.map(parse_date).transpose()?;
    let before = end.map(parse_date).transpose()?;

    if let (Some(after), Some(before)) = (after, before) {
        if after > before {
            bail!("start date is after end date");
        }
    }
    Ok((after, before))
}

/// Parse repeated "LAT,LON:RADIUS" arguments into regions
pub fn parse_regions(values: &[String]) -> Result<Vec<RegionConfig>> {
    values.iter().map(|value| parse_region(value)).collect()
}

/// Build the composite slug list for direct mode
pub fn direct_event_slugs(
    url: Option<&str>,
    tournament_slug: Option<&str>,
    event_slug: Option<&str>,
) -> Result<Vec<String>> {
    if let Some(url) = url {
        let (tournament, event) = parse_event_url(url)?;
        return Ok(vec![composite_slug(&tournament, &event)]);
    }

    match (tournament_slug, event_slug) {
        (Some(tournament), Some(event)) => Ok(vec![composite_slug(tournament, event)]),
        _ => bail!("provide --url or both --tournament-slug and --event-slug"),
    }
}

/// Extract tournament and event slugs from a start.gg event URL
pub fn parse_event_url(url: &str) -> Result<(String, String)> {
    let pattern = Regex::new(r"start\.gg/tournament/(?P<t_slug>[^/]+)/event/(?P<e_slug>[^/?#]+)")
        .context("Failed to compile event URL regex")?;
    let captures = pattern
        .captures(url)
        .ok_or_else(|| anyhow!("unrecognized start.gg event URL: {}", url))?;
    Ok((captures["t_slug"].to_string(), captures["e_slug"].to_string()))
}

fn parse_region(value: &str) -> Result<RegionConfig> {
    let (latlon, radius) = value
        .split_once(':')
        .ok_or_else(|| anyhow!("invalid --coords '{}': expected LAT,LON:RADIUS", value))?;
    let (lat, lon) = latlon
        .split_once(',')
        .ok_or_else(|| anyhow!("invalid --coords '{}': expected LAT,LON:RADIUS", value))?;

    Ok(RegionConfig::new(
        &format!("{}, {}", lat.trim(), lon.trim()),
        radius.trim(),
        value,
    ))
}

fn composite_slug(tournament: &str, event: &str) -> String {
    format!("tournament/{}/event/{}", tournament, event)
}
