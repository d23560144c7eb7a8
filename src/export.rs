use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::radar::HIGHLIGHT_MEDIAN;
use crate::ranking::{RankedRecord, Ranking};
use crate::run_types::RunType;

pub struct ExportReport {
    pub players: usize,
    pub run_types: usize,
}

/// Write the ranked table to an `.xlsx` workbook with Ranking, Medians and
/// Info sheets.
pub fn export_ranking_xlsx(path: &Path, ranking: &Ranking) -> Result<ExportReport> {
    let mut header = vec![
        "Player ID".to_string(),
        "Player".to_string(),
        "Team".to_string(),
        "Competition".to_string(),
        "Season".to_string(),
        "Position".to_string(),
        "Matches".to_string(),
        "Minutes / Match".to_string(),
    ];
    for run_type in RunType::ALL {
        header.push(format!("{} P90", run_type.label()));
        header.push(format!("{} Pct", run_type.label()));
    }

    let mut ranking_rows = vec![header];
    ranking_rows.extend(ranking.rows().iter().map(ranking_row));

    let mut median_rows = vec![vec![
        "Run Type".to_string(),
        "Median P90".to_string(),
        "Typical".to_string(),
    ]];
    median_rows.extend(RunType::ALL.iter().map(|rt| {
        let median = ranking.median_per_90(*rt);
        let typical = median.is_some_and(|m| m >= HIGHLIGHT_MEDIAN);
        vec![
            rt.label().to_string(),
            opt_number(median),
            if typical { "yes" } else { "no" }.to_string(),
        ]
    }));

    let info_rows = vec![
        vec!["Positions".to_string(), ranking.positions().join(",")],
        vec!["Players".to_string(), ranking.len().to_string()],
        vec![
            "Generated".to_string(),
            Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    ];

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Ranking")?;
        write_rows(sheet, &ranking_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Medians")?;
        write_rows(sheet, &median_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Info")?;
        write_rows(sheet, &info_rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;

    Ok(ExportReport {
        players: ranking.len(),
        run_types: RunType::COUNT,
    })
}

fn ranking_row(row: &RankedRecord) -> Vec<String> {
    let record = &row.record;
    let mut out = vec![
        opt_to_string(record.player_id),
        record.player_name.clone(),
        record.team_name.clone(),
        record.competition_name.clone(),
        record.season_name.clone(),
        record.position.clone(),
        opt_to_string(record.count_match),
        format!("{:.2}", record.minutes_played_per_match),
    ];
    for run_type in RunType::ALL {
        let metric = row.metric(run_type);
        out.push(opt_number(metric.per_90));
        out.push(opt_number(metric.percentile));
    }
    out
}

fn opt_number(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

fn opt_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
