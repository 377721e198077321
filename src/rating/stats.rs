use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::domain::{EventRow, MatchResult};

use super::types::{HeadToHead, PlayerSummary, RatingTable};

#[derive(Default)]
struct PlayerAccumulator {
    wins: u32,
    losses: u32,
    h2h: BTreeMap<String, (u32, u32)>,
    won_against: Vec<String>,
    lost_against: Vec<String>,
}

/// Count distinct events each player appeared in
pub fn attendance_counts(rows: &[EventRow]) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for row in rows {
        for player in &row.players {
            *counts.entry(player.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Build the per-player summary table from all sets in encounter order.
/// Sorted by rating, then total sets, then name.
pub fn build_summaries(
    sets: &[MatchResult],
    attendance: &HashMap<String, u32>,
    ratings: &RatingTable,
) -> Vec<PlayerSummary> {
    let stats = accumulate(sets);

    let mut summaries: Vec<PlayerSummary> = stats
        .into_iter()
        .map(|(player, acc)| finalize(player, acc, attendance, ratings))
        .collect();

    summaries.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| b.total_sets.cmp(&a.total_sets))
            .then_with(|| a.player.cmp(&b.player))
    });
    summaries
}

fn accumulate(sets: &[MatchResult]) -> HashMap<String, PlayerAccumulator> {
    let mut stats: HashMap<String, PlayerAccumulator> = HashMap::new();
    let mut undecided = 0usize;

    for set in sets {
        let Some((winner, loser)) = set.decided() else {
            undecided += 1;
            continue;
        };
        record_win(stats.entry(winner.to_string()).or_default(), loser);
        record_loss(stats.entry(loser.to_string()).or_default(), winner);
    }

    if undecided > 0 {
        debug!("{} sets without a decided score left out of aggregation", undecided);
    }
    stats
}

fn record_win(acc: &mut PlayerAccumulator, opponent: &str) {
    acc.wins += 1;
    acc.h2h.entry(opponent.to_string()).or_default().0 += 1;
    acc.won_against.push(opponent.to_string());
}

fn record_loss(acc: &mut PlayerAccumulator, opponent: &str) {
    acc.losses += 1;
    acc.h2h.entry(opponent.to_string()).or_default().1 += 1;
    acc.lost_against.push(opponent.to_string());
}

fn finalize(
    player: String,
    acc: PlayerAccumulator,
    attendance: &HashMap<String, u32>,
    ratings: &RatingTable,
) -> PlayerSummary {
    let (positive, even, negative) = bucket_head_to_head(&acc.h2h);
    let attended = attendance.get(&player).copied().unwrap_or(0);

    PlayerSummary {
        wins: acc.wins,
        losses: acc.losses,
        total_sets: acc.wins + acc.losses,
        positive_h2h: positive,
        even_h2h: even,
        negative_h2h: negative,
        won_against: acc.won_against,
        lost_against: acc.lost_against,
        tournaments_attended: attended,
        loss_to_attendance_ratio: loss_ratio(acc.losses, attended),
        rating: ratings.get(&player).copied().unwrap_or(0.0),
        player,
    }
}

fn bucket_head_to_head(
    h2h: &BTreeMap<String, (u32, u32)>,
) -> (Vec<HeadToHead>, Vec<HeadToHead>, Vec<HeadToHead>) {
    let mut positive = Vec::new();
    let mut even = Vec::new();
    let mut negative = Vec::new();

    for (opponent, &(wins, losses)) in h2h {
        let entry = HeadToHead {
            opponent: opponent.clone(),
            record: format!("{}-{}", wins, losses),
        };
        if wins > losses {
            positive.push(entry);
        } else if wins == losses && wins > 0 {
            even.push(entry);
        } else {
            negative.push(entry);
        }
    }

    (positive, even, negative)
}

fn loss_ratio(losses: u32, attended: u32) -> Option<f64> {
    (attended > 0).then(|| f64::from(losses) / f64::from(attended))
}
