use crate::domain::MatchResult;

use super::types::{RatingEntry, RatingTable};

pub const INITIAL_RATING: f64 = 1500.0;
pub const K_FACTOR: f64 = 30.0;

/// Seed every known player at the initial rating, then replay all sets in
/// encounter order. Replaying the same ordered sequence from fresh defaults
/// always reproduces the same table.
pub fn build_rating_table<I>(players: I, sets: &[MatchResult]) -> RatingTable
where
    I: IntoIterator<Item = String>,
{
    let mut table: RatingTable = players
        .into_iter()
        .map(|player| (player, INITIAL_RATING))
        .collect();
    for set in sets {
        apply_set(&mut table, set);
    }
    table
}

/// Apply one set to the table. Undecided sets (unknown or equal scores) leave
/// the table untouched.
pub fn apply_set(table: &mut RatingTable, set: &MatchResult) {
    let Some((winner, loser)) = set.decided() else {
        return;
    };

    let winner_rating = *table.get(winner).unwrap_or(&INITIAL_RATING);
    let loser_rating = *table.get(loser).unwrap_or(&INITIAL_RATING);
    let expected = expected_score(winner_rating, loser_rating);

    table.insert(winner.to_string(), winner_rating + K_FACTOR * (1.0 - expected));
    table.insert(loser.to_string(), loser_rating - K_FACTOR * (1.0 - expected));
}

/// Rating entries sorted best-first, ties broken by name
pub fn sorted_ratings(table: &RatingTable) -> Vec<RatingEntry> {
    let mut entries: Vec<RatingEntry> = table
        .iter()
        .map(|(player, &rating)| RatingEntry {
            player: player.clone(),
            rating,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| a.player.cmp(&b.player))
    });
    entries
}

/// Logistic expectation that `rating` beats `opponent`
fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / 400.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decided(winner: &str, loser: &str) -> MatchResult {
        MatchResult {
            player_one: winner.to_string(),
            player_two: loser.to_string(),
            score_one: Some(3),
            score_two: Some(0),
        }
    }

    #[test]
    fn test_single_upset_from_defaults_is_exact() {
        let mut table = RatingTable::new();
        apply_set(&mut table, &decided("A", "B"));

        assert_eq!(table["A"], 1515.0);
        assert_eq!(table["B"], 1485.0);
    }

    #[test]
    fn test_update_is_symmetric() {
        let mut table = RatingTable::new();
        apply_set(&mut table, &decided("A", "B"));
        apply_set(&mut table, &decided("B", "C"));

        let total: f64 = table.values().sum();
        assert!((total - 3.0 * INITIAL_RATING).abs() < 1e-9);
    }

    #[test]
    fn test_incomplete_set_leaves_table_untouched() {
        let mut table = RatingTable::new();
        apply_set(
            &mut table,
            &MatchResult {
                player_one: "A".to_string(),
                player_two: "B".to_string(),
                score_one: None,
                score_two: Some(2),
            },
        );

        assert!(table.is_empty());
    }

    #[test]
    fn test_equal_scores_leave_table_untouched() {
        let mut table = RatingTable::new();
        apply_set(
            &mut table,
            &MatchResult {
                player_one: "A".to_string(),
                player_two: "B".to_string(),
                score_one: Some(1),
                score_two: Some(1),
            },
        );

        assert!(table.is_empty());
    }

    #[test]
    fn test_replay_is_deterministic() {
        let sets = vec![
            decided("A", "B"),
            decided("B", "C"),
            decided("A", "C"),
            decided("C", "A"),
        ];
        let players = ["A", "B", "C"].map(String::from);

        let first = build_rating_table(players.clone(), &sets);
        let second = build_rating_table(players, &sets);
        assert_eq!(first, second);
    }

    #[test]
    fn test_order_affects_final_ratings() {
        let forward = vec![decided("A", "B"), decided("B", "A")];
        let reverse = vec![decided("B", "A"), decided("A", "B")];
        let players = ["A", "B"].map(String::from);

        let table_forward = build_rating_table(players.clone(), &forward);
        let table_reverse = build_rating_table(players, &reverse);

        // Whoever won last comes out ahead; the sequences are not equivalent.
        assert!(table_forward["B"] > table_forward["A"]);
        assert!(table_reverse["A"] > table_reverse["B"]);
    }

    #[test]
    fn test_unseeded_players_start_at_default() {
        let table = build_rating_table(Vec::new(), &[decided("A", "B")]);
        assert_eq!(table["A"], 1515.0);
        assert_eq!(table["B"], 1485.0);
    }

    #[test]
    fn test_sorted_ratings_best_first() {
        let table = build_rating_table(
            ["A", "B", "C"].map(String::from),
            &[decided("B", "A"), decided("B", "C")],
        );

        let entries = sorted_ratings(&table);
        assert_eq!(entries[0].player, "B");
        assert_eq!(entries.len(), 3);
        assert!(entries[0].rating >= entries[1].rating);
        assert!(entries[1].rating >= entries[2].rating);
    }
}
