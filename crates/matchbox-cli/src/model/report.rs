use std::path::PathBuf;

use chrono::{DateTime, Utc};
use matchbox_engine::{Board, BoardIndex};
use matchbox_training::{WeightStore, learning::LearningSummary, weights::WeightVector};
use serde::Serialize;

/// JSON summary written by `matchbox train --report`.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub trained_at: DateTime<Utc>,
    pub sources: Vec<PathBuf>,
    pub initial_weight: u32,
    pub summary: LearningSummary,
    pub matchboxes: Vec<MatchboxRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchboxRecord {
    pub index: BoardIndex,
    pub board: Board,
    pub weights: WeightVector,
}

impl TrainingReport {
    pub fn new(sources: Vec<PathBuf>, store: &WeightStore, summary: LearningSummary) -> Self {
        let matchboxes = store
            .iter()
            .map(|(index, weights)| MatchboxRecord {
                index,
                board: Board::from_index(index),
                weights: *weights,
            })
            .collect();
        Self {
            trained_at: Utc::now(),
            sources,
            initial_weight: store.initial_weight(),
            summary,
            matchboxes,
        }
    }
}
