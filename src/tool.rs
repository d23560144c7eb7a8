use anyhow::Result;
use tracing::{info, warn};

use crate::dataset::RunDataset;
use crate::provider::StatsProvider;
use crate::radar::{RadarChart, radar_chart};
use crate::ranking::{PlayerLookup, Ranking};
use crate::records::AggregatedRecord;
use crate::theme::Theme;

/// Fetches off-ball run data through a provider, ranks a position group and
/// draws player radars.
pub struct RadarTool<P> {
    provider: P,
    dataset: RunDataset,
    ranking: Ranking,
}

impl<P: StatsProvider> RadarTool<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            dataset: RunDataset::new(),
            ranking: Ranking::default(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Append each competition's rows to the acquired table. Repeated calls
    /// accumulate; see [`RadarTool::reset`].
    pub fn fetch(
        &mut self,
        season_id: u32,
        competition_ids: &[u32],
        min_minutes: u32,
        min_matches: u32,
    ) -> Result<usize> {
        self.dataset
            .fetch(&self.provider, season_id, competition_ids, min_minutes, min_matches)
    }

    /// Drop acquired rows and the current ranking.
    pub fn reset(&mut self) {
        self.dataset.reset();
        self.ranking = Ranking::default();
    }

    pub fn runs(&self) -> &[AggregatedRecord] {
        self.dataset.rows()
    }

    pub fn ranking(&self) -> &Ranking {
        &self.ranking
    }

    /// Replace the ranking with one computed over `positions`.
    pub fn build_ranking<S: AsRef<str>>(&mut self, positions: &[S]) -> &Ranking {
        self.ranking = Ranking::build(self.dataset.rows(), positions);
        &self.ranking
    }

    /// Radar for one player of the current ranking, `None` when the player is
    /// missing or not unique.
    pub fn render_radar(
        &self,
        player_name: &str,
        team_name: &str,
        position: &str,
        theme: Theme,
    ) -> Option<RadarChart> {
        match self.ranking.find_player(player_name, team_name, position) {
            PlayerLookup::Found(row) => Some(radar_chart(row, &self.ranking, theme)),
            PlayerLookup::NotFound => {
                warn!(
                    "{player_name} ({team_name} - {position}) could not be found. \
                     Check your inputs & if the player meets the minutes/match \
                     requirements of the initial data request."
                );
                None
            }
            PlayerLookup::Ambiguous(count) => {
                warn!(
                    "{player_name} ({team_name} - {position}) matches {count} rows; \
                     narrow the data request so the player appears once."
                );
                None
            }
        }
    }

    pub fn rank_and_render<S: AsRef<str>>(
        &mut self,
        player_name: &str,
        team_name: &str,
        player_position: &str,
        comparison_positions: &[S],
        theme: Theme,
    ) -> Option<RadarChart> {
        let ranking = self.build_ranking(comparison_positions);
        info!(
            "{} players in position selection: {}",
            ranking.len(),
            ranking.positions().join(",")
        );
        self.render_radar(player_name, team_name, player_position, theme)
    }
}
