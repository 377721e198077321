use anyhow::Result;
use log::{info, warn};

use crate::api::StartGgClient;
use crate::cache::MatchCache;
use crate::config::RegionConfig;
use crate::config::settings::AppConfig;
use crate::discovery;
use crate::domain::{EventRow, MatchResult, ResultBundle, RunMetadata, ts_to_iso};
use crate::normalizer;
use crate::rating;
use crate::resolver;

/// How one run selects its events
pub enum RunMode {
    /// Search by geography and date window
    Discovery {
        regions: Vec<RegionConfig>,
        after: Option<i64>,
        before: Option<i64>,
    },
    /// Explicit composite event slugs, discovery off
    Direct { event_slugs: Vec<String> },
}

impl RunMode {
    fn label(&self) -> &'static str {
        match self {
            RunMode::Discovery { .. } => "discovery",
            RunMode::Direct { .. } => "direct",
        }
    }

    fn window(&self) -> (Option<i64>, Option<i64>) {
        match self {
            RunMode::Discovery { after, before, .. } => (*after, *before),
            RunMode::Direct { .. } => (None, None),
        }
    }
}

/// Runs the whole aggregation pipeline: discovery, normalization, match
/// resolution and the rating engine. Owns the single rate-limited client and
/// the set cache for the run.
pub struct PipelineService {
    config: AppConfig,
    client: StartGgClient,
    cache: MatchCache,
}

impl PipelineService {
    pub fn new(api_token: &str, config: AppConfig) -> Result<Self> {
        let client = StartGgClient::new(api_token, &config.api)?;
        Ok(Self {
            config,
            client,
            cache: MatchCache::new(),
        })
    }

    pub async fn run(&mut self, mode: RunMode) -> Result<ResultBundle> {
        info!("=== Starting {} run ===\n", mode.label());
        self.log_window(&mode);

        // Step 1: Build event rows
        let rows = self.build_event_rows(&mode).await?;
        info!("  → {} event rows to resolve\n", rows.len());

        // Step 2: Resolve event ids, set ids and set details
        let rows = self.resolve_events(rows).await;
        info!("  → {} events resolved\n", rows.len());

        // Step 3: Ratings, statistics and the bundle
        let bundle = self.assemble_bundle(rows, &mode);
        info!(
            "=== Run complete: {} events, {} sets ===",
            bundle.metadata.event_count, bundle.metadata.set_count
        );
        Ok(bundle)
    }

    fn log_window(&self, mode: &RunMode) {
        match mode {
            RunMode::Discovery { after, before, .. } => info!(
                "Window: after={:?} ({})  before={:?} ({})",
                after,
                ts_to_iso(*after),
                before,
                ts_to_iso(*before)
            ),
            RunMode::Direct { .. } => info!("Discovery disabled in this run"),
        }
    }

    async fn build_event_rows(&mut self, mode: &RunMode) -> Result<Vec<EventRow>> {
        match mode {
            RunMode::Direct { event_slugs } => {
                info!("Direct mode with {} event slugs", event_slugs.len());
                Ok(event_slugs
                    .iter()
                    .map(|slug| EventRow::from_composite_slug(slug))
                    .collect())
            }
            RunMode::Discovery {
                regions,
                after,
                before,
            } => self.discover_rows(regions, *after, *before).await,
        }
    }

    async fn discover_rows(
        &mut self,
        regions: &[RegionConfig],
        after: Option<i64>,
        before: Option<i64>,
    ) -> Result<Vec<EventRow>> {
        let records =
            discovery::discover_tournaments(&mut self.client, regions, after, before, &self.config.api)
                .await?;

        let flattened = normalizer::normalize_events(&records);
        info!("  → normalized to {} event rows", flattened.len());

        let mut rows = normalizer::filter_rows(flattened, &self.config.filter);
        info!(
            "  → filter kept {} rows (game '{}', min entrants {})",
            rows.len(),
            self.config.filter.game_title,
            self.config.filter.min_entrants
        );

        normalizer::derive_fields(&mut rows);
        let rows = normalizer::dedupe_rows(rows);
        info!("  → {} rows after dedup", rows.len());
        Ok(rows)
    }

    async fn resolve_events(&mut self, rows: Vec<EventRow>) -> Vec<EventRow> {
        let total = rows.len();
        let mut resolved = Vec::new();
        let mut dropped = 0usize;

        for (idx, mut row) in rows.into_iter().enumerate() {
            info!("({}/{}) resolving {}", idx + 1, total, row.composite_slug);
            let kept = resolver::resolve_event(
                &mut self.client,
                &mut self.cache,
                &mut row,
                self.config.api.sets_per_page,
            )
            .await;

            if kept {
                resolved.push(row);
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            warn!("dropped {} events that failed id resolution", dropped);
        }
        resolved
    }

    fn assemble_bundle(&self, rows: Vec<EventRow>, mode: &RunMode) -> ResultBundle {
        let attendance = rating::attendance_counts(&rows);

        let all_sets: Vec<MatchResult> = rows.iter().flat_map(|row| row.sets.clone()).collect();
        let all_players = rows
            .iter()
            .flat_map(|row| row.players.iter().cloned())
            .collect::<Vec<String>>();

        let table = rating::build_rating_table(all_players, &all_sets);
        info!("Rated {} players from {} sets", table.len(), all_sets.len());

        let players = rating::build_summaries(&all_sets, &attendance, &table);
        let ratings = rating::sorted_ratings(&table);
        let metadata = self.build_metadata(&rows, mode);

        ResultBundle {
            tournaments: rows,
            players,
            ratings,
            metadata,
        }
    }

    fn build_metadata(&self, rows: &[EventRow], mode: &RunMode) -> RunMetadata {
        let (after, before) = mode.window();
        RunMetadata {
            mode: mode.label().to_string(),
            event_count: rows.len(),
            set_count: rows.iter().map(|row| row.set_ids.len()).sum(),
            ts_after: after,
            ts_before: before,
            ts_after_iso: ts_to_iso(after),
            ts_before_iso: ts_to_iso(before),
        }
    }
}
