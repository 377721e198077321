use anyhow::{Context, Result};
use log::info;
use serde_json::{Value, json};

use crate::api::{StartGgClient, queries};
use crate::config::RegionConfig;
use crate::config::settings::ApiSettings;
use crate::pagination::PageIterator;

/// Discover tournaments across the configured regions and date window.
///
/// Pages each region until an empty page or the safety cap, concatenating the
/// raw tournament records of every page. Duplicates across regions are
/// expected here and left for the normalizer. A failed page fetch is fatal
/// for the run.
pub async fn discover_tournaments(
    client: &mut StartGgClient,
    regions: &[RegionConfig],
    after: Option<i64>,
    before: Option<i64>,
    settings: &ApiSettings,
) -> Result<Vec<Value>> {
    let mut records = Vec::new();

    for (idx, region) in regions.iter().enumerate() {
        info!(
            "Region {} ({}): coords={} radius={}",
            idx + 1,
            region.name,
            region.coordinates,
            region.radius
        );

        let mut pages = PageIterator::new(Some(settings.discovery_max_pages));

        loop {
            if pages.has_reached_max() {
                break;
            }

            let page_nodes = fetch_page(
                client,
                region,
                after,
                before,
                pages.current_page(),
                settings.discovery_per_page,
            )
            .await?;
            info!(
                "  → page {}: {} tournaments",
                pages.current_page(),
                page_nodes.len()
            );

            if page_nodes.is_empty() {
                break;
            }

            records.extend(page_nodes);
            pages.advance();
        }
    }

    info!("Discovery total tournaments: {}", records.len());
    Ok(records)
}

async fn fetch_page(
    client: &mut StartGgClient,
    region: &RegionConfig,
    after: Option<i64>,
    before: Option<i64>,
    page: usize,
    per_page: usize,
) -> Result<Vec<Value>> {
    let variables = json!({
        "page": page,
        "perPage": per_page,
        "coordinates": region.coordinates,
        "radius": region.radius,
        "after": after,
        "before": before,
    });

    let data = client
        .execute(queries::DISCOVER_TOURNAMENTS, variables)
        .await
        .with_context(|| format!("discovery page {} failed for region {}", page, region.name))?;

    Ok(extract_nodes(&data))
}

fn extract_nodes(data: &Value) -> Vec<Value> {
    data.get("tournaments")
        .and_then(|tournaments| tournaments.get("nodes"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
