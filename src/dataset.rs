use anyhow::Result;
use tracing::info;

use crate::provider::{OffBallRunQuery, StatsProvider};
use crate::records::AggregatedRecord;

/// Acquired rows across every competition requested so far.
///
/// Fetches append; nothing is deduplicated, so requesting the same
/// competition twice yields its rows twice. Call [`RunDataset::reset`] to
/// start over.
#[derive(Debug, Clone, Default)]
pub struct RunDataset {
    rows: Vec<AggregatedRecord>,
}

impl RunDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request each competition in order and append the results.
    ///
    /// Returns the number of rows appended by this call. The first provider
    /// error aborts the loop; rows from competitions already requested stay.
    pub fn fetch<P: StatsProvider + ?Sized>(
        &mut self,
        provider: &P,
        season_id: u32,
        competition_ids: &[u32],
        min_minutes: u32,
        min_matches: u32,
    ) -> Result<usize> {
        let mut appended = 0usize;
        for &competition_id in competition_ids {
            info!(competition_id, season_id, "requesting off-ball run data");
            let query = OffBallRunQuery {
                season_id,
                competition_id,
                min_minutes,
                min_matches,
            };
            let rows = provider.off_ball_runs(&query)?;
            info!(competition_id, players = rows.len(), "players returned");
            appended += rows.len();
            self.rows.extend(rows);
        }
        Ok(appended)
    }

    pub fn reset(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[AggregatedRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
