use std::collections::HashMap;

use serde::Serialize;

/// Player display name → current rating
pub type RatingTable = HashMap<String, f64>;

/// One row of the sorted rating output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingEntry {
    pub player: String,
    pub rating: f64,
}

/// Win-loss record against one opponent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHead {
    pub opponent: String,
    pub record: String,
}

/// Per-player aggregate over all decided sets
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub player: String,
    pub wins: u32,
    pub losses: u32,
    pub total_sets: u32,
    pub positive_h2h: Vec<HeadToHead>,
    pub even_h2h: Vec<HeadToHead>,
    pub negative_h2h: Vec<HeadToHead>,
    pub won_against: Vec<String>,
    pub lost_against: Vec<String>,
    pub tournaments_attended: u32,
    pub loss_to_attendance_ratio: Option<f64>,
    pub rating: f64,
}
