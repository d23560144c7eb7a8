use std::cmp::Ordering;

use crate::records::AggregatedRecord;
use crate::run_types::RunType;

/// Derived metrics for one run type of one player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunMetric {
    /// `None` when minutes played or the count is missing or zero-minute.
    pub per_90: Option<f64>,
    /// 0–100 within the ranked population; `None` when `per_90` is undefined.
    pub percentile: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedRecord {
    pub record: AggregatedRecord,
    pub metrics: [RunMetric; RunType::COUNT],
}

impl RankedRecord {
    pub fn metric(&self, run_type: RunType) -> RunMetric {
        self.metrics[run_type.index()]
    }
}

#[derive(Debug)]
pub enum PlayerLookup<'a> {
    Found(&'a RankedRecord),
    NotFound,
    Ambiguous(usize),
}

/// Players from a position subset with per-90 rates and percentile ranks.
///
/// Always rebuilt from scratch: percentiles only make sense relative to the
/// subset they were computed over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    positions: Vec<String>,
    rows: Vec<RankedRecord>,
    medians: [Option<f64>; RunType::COUNT],
}

impl Ranking {
    pub fn build<S: AsRef<str>>(records: &[AggregatedRecord], positions: &[S]) -> Self {
        let positions: Vec<String> = positions.iter().map(|p| p.as_ref().to_string()).collect();
        let mut rows: Vec<RankedRecord> = records
            .iter()
            .filter(|r| positions.iter().any(|p| *p == r.position))
            .map(|r| RankedRecord {
                record: r.clone(),
                metrics: [RunMetric::default(); RunType::COUNT],
            })
            .collect();

        let mut medians = [None; RunType::COUNT];
        for run_type in RunType::ALL {
            let idx = run_type.index();
            let rates: Vec<Option<f64>> = rows
                .iter()
                .map(|row| {
                    let count = row.record.count_per_match(run_type);
                    per_90(count, row.record.minutes_played_per_match)
                })
                .collect();
            let pcts = percentile_ranks(&rates);
            for (row, (rate, pct)) in rows.iter_mut().zip(rates.iter().zip(pcts)) {
                row.metrics[idx] = RunMetric {
                    per_90: *rate,
                    percentile: pct,
                };
            }
            let defined: Vec<f64> = rates.iter().flatten().copied().collect();
            medians[idx] = median_f64(&defined);
        }

        Self {
            positions,
            rows,
            medians,
        }
    }

    pub fn positions(&self) -> &[String] {
        &self.positions
    }

    pub fn rows(&self) -> &[RankedRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Median per-90 rate of the population, ignoring undefined rates.
    pub fn median_per_90(&self, run_type: RunType) -> Option<f64> {
        self.medians[run_type.index()]
    }

    /// Exact, case-sensitive match on all three fields.
    pub fn find_player(
        &self,
        player_name: &str,
        team_name: &str,
        position: &str,
    ) -> PlayerLookup<'_> {
        let mut hits = self
            .rows
            .iter()
            .filter(|row| row.record.matches(player_name, team_name, position));
        let Some(first) = hits.next() else {
            return PlayerLookup::NotFound;
        };
        let extra = hits.count();
        if extra == 0 {
            PlayerLookup::Found(first)
        } else {
            PlayerLookup::Ambiguous(extra + 1)
        }
    }
}

/// `count * 90 / minutes`, undefined for missing counts and non-positive minutes.
pub fn per_90(count_per_match: Option<f64>, minutes_played_per_match: f64) -> Option<f64> {
    let count = count_per_match?;
    let minutes = minutes_played_per_match;
    if !count.is_finite() || !minutes.is_finite() || minutes <= 0.0 {
        return None;
    }
    Some(count / (minutes / 90.0))
}

/// Ascending percentile ranks (0–100) with ties sharing their average rank.
/// Undefined values are skipped and do not count towards the population size.
pub fn percentile_ranks(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut order: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    order.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let n = order.len();
    let mut out = vec![None; values.len()];
    let mut start = 0usize;
    while start < n {
        let mut end = start + 1;
        while end < n && order[end].1 == order[start].1 {
            end += 1;
        }
        // 1-based ranks start+1..=end share their mean.
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        let pct = avg_rank / n as f64 * 100.0;
        for (idx, _) in &order[start..end] {
            out[*idx] = Some(pct);
        }
        start = end;
    }
    out
}

pub fn median_f64(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_share_average_rank() {
        let pcts = percentile_ranks(&[Some(1.0), Some(3.0), Some(3.0), Some(5.0)]);
        assert_eq!(pcts, vec![Some(25.0), Some(62.5), Some(62.5), Some(100.0)]);
    }

    #[test]
    fn undefined_values_are_not_ranked() {
        let pcts = percentile_ranks(&[Some(2.0), None, Some(1.0)]);
        assert_eq!(pcts, vec![Some(100.0), None, Some(50.0)]);
    }

    #[test]
    fn per_90_rejects_zero_minutes() {
        assert_eq!(per_90(Some(3.0), 0.0), None);
        assert_eq!(per_90(None, 90.0), None);
        assert_eq!(per_90(Some(3.0), 45.0), Some(6.0));
    }

    #[test]
    fn median_handles_even_and_odd() {
        assert_eq!(median_f64(&[]), None);
        assert_eq!(median_f64(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median_f64(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
    }
}
