/// Off-ball run categories tracked by the provider, in chart order
/// (clockwise from 12 o'clock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RunType {
    CrossReceiver,
    InBehind,
    AheadOfTheBall,
    Support,
    ComingShort,
    DroppingOff,
    PullingHalfSpace,
    PullingWide,
    Overlap,
    Underlap,
}

impl RunType {
    pub const COUNT: usize = 10;

    pub const ALL: [RunType; RunType::COUNT] = [
        RunType::CrossReceiver,
        RunType::InBehind,
        RunType::AheadOfTheBall,
        RunType::Support,
        RunType::ComingShort,
        RunType::DroppingOff,
        RunType::PullingHalfSpace,
        RunType::PullingWide,
        RunType::Overlap,
        RunType::Underlap,
    ];

    /// Order the provider expects in the `run_type` filter.
    pub const REQUEST_ORDER: [RunType; RunType::COUNT] = [
        RunType::InBehind,
        RunType::AheadOfTheBall,
        RunType::Support,
        RunType::PullingWide,
        RunType::ComingShort,
        RunType::Underlap,
        RunType::Overlap,
        RunType::DroppingOff,
        RunType::PullingHalfSpace,
        RunType::CrossReceiver,
    ];

    /// Position of this run type in [`RunType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column stem used in provider responses.
    pub fn response_name(self) -> &'static str {
        match self {
            RunType::CrossReceiver => "cross_receiver_runs",
            RunType::InBehind => "runs_in_behind",
            RunType::AheadOfTheBall => "runs_ahead_of_the_ball",
            RunType::Support => "support_runs",
            RunType::ComingShort => "coming_short_runs",
            RunType::DroppingOff => "dropping_off_runs",
            RunType::PullingHalfSpace => "pulling_half_space_runs",
            RunType::PullingWide => "pulling_wide_runs",
            RunType::Overlap => "overlap_runs",
            RunType::Underlap => "underlap_runs",
        }
    }

    /// Value accepted by the provider's `run_type` filter.
    pub fn request_name(self) -> &'static str {
        match self {
            RunType::CrossReceiver => "cross_receiver_run",
            RunType::InBehind => "run_in_behind",
            RunType::AheadOfTheBall => "run_ahead_of_the_ball",
            RunType::Support => "support_run",
            RunType::ComingShort => "coming_short_run",
            RunType::DroppingOff => "dropping_off_run",
            RunType::PullingHalfSpace => "pulling_half_space_run",
            RunType::PullingWide => "pulling_wide_run",
            RunType::Overlap => "overlap_run",
            RunType::Underlap => "underlap_run",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RunType::CrossReceiver => "Cross receiver run",
            RunType::InBehind => "Runs in behind",
            RunType::AheadOfTheBall => "Run ahead of the ball",
            RunType::Support => "Support",
            RunType::ComingShort => "Coming short",
            RunType::DroppingOff => "Dropping off",
            RunType::PullingHalfSpace => "Pulling half space",
            RunType::PullingWide => "Pulling wide",
            RunType::Overlap => "Overlap",
            RunType::Underlap => "Underlap",
        }
    }

    /// Response column holding the per-match count, e.g. `count_runs_in_behind_per_match`.
    pub fn per_match_column(self) -> String {
        format!("count_{}_per_match", self.response_name())
    }
}

/// Comma-joined `run_type` filter value in provider order.
pub fn request_run_types() -> String {
    RunType::REQUEST_ORDER
        .iter()
        .map(|rt| rt.request_name())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_chart_order() {
        for (idx, rt) in RunType::ALL.iter().enumerate() {
            assert_eq!(rt.index(), idx);
        }
    }

    #[test]
    fn request_order_covers_every_run_type_once() {
        let mut seen = RunType::REQUEST_ORDER.to_vec();
        seen.sort();
        assert_eq!(seen, RunType::ALL.to_vec());
    }

    #[test]
    fn response_columns_are_distinct() {
        let mut columns: Vec<String> =
            RunType::ALL.iter().map(|rt| rt.per_match_column()).collect();
        assert_eq!(columns[1], "count_runs_in_behind_per_match");
        columns.sort();
        columns.dedup();
        assert_eq!(columns.len(), RunType::COUNT);
    }

    #[test]
    fn request_filter_starts_with_in_behind() {
        let joined = request_run_types();
        assert!(joined.starts_with("run_in_behind,run_ahead_of_the_ball,"));
        assert!(joined.ends_with(",cross_receiver_run"));
        assert_eq!(joined.split(',').count(), RunType::COUNT);
    }
}
