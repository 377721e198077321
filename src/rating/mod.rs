pub mod elo;
pub mod stats;
pub mod types;

pub use elo::{INITIAL_RATING, K_FACTOR, apply_set, build_rating_table, sorted_ratings};
pub use stats::{attendance_counts, build_summaries};
pub use types::{HeadToHead, PlayerSummary, RatingEntry, RatingTable};
