use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use offball_radar::config::ProviderConfig;
use offball_radar::export::export_ranking_xlsx;
use offball_radar::provider::SkillcornerClient;
use offball_radar::theme::Theme;
use offball_radar::tool::RadarTool;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Off-ball run percentile radar for one player",
    long_about = None
)]
struct Cli {
    /// Season id
    #[arg(long)]
    season: u32,

    /// Competition id, repeat for several
    #[arg(long = "competition", required = true)]
    competitions: Vec<u32>,

    /// Minimum minutes played per match
    #[arg(long, default_value_t = 60)]
    min_minutes: u32,

    /// Minimum number of matches played
    #[arg(long, default_value_t = 5)]
    min_matches: u32,

    #[arg(long)]
    player: String,

    #[arg(long)]
    team: String,

    /// Position of the player's row
    #[arg(long)]
    position: String,

    /// Positions forming the comparison group (defaults to --position)
    #[arg(long = "compare")]
    compare: Vec<String>,

    /// dark or light
    #[arg(long, default_value = "dark")]
    theme: Theme,

    /// Output image, `.svg` for vector output, anything else is PNG
    #[arg(short, long, default_value = "radar.png")]
    out: PathBuf,

    /// Image side in pixels
    #[arg(long, default_value_t = 1000)]
    size: u32,

    /// Also write the ranked table to this .xlsx file
    #[arg(long)]
    xlsx: Option<PathBuf>,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let cfg = ProviderConfig::from_env();
    let client = SkillcornerClient::new(&cfg).context("unable to create SkillCorner client")?;
    let mut tool = RadarTool::new(client);

    tool.fetch(cli.season, &cli.competitions, cli.min_minutes, cli.min_matches)?;

    let compare = if cli.compare.is_empty() {
        vec![cli.position.clone()]
    } else {
        cli.compare.clone()
    };
    let chart = tool.rank_and_render(
        &cli.player,
        &cli.team,
        &cli.position,
        compare.as_slice(),
        cli.theme,
    );

    if let Some(path) = cli.xlsx.as_ref() {
        let report = export_ranking_xlsx(path, tool.ranking())?;
        info!(
            path = %path.display(),
            players = report.players,
            run_types = report.run_types,
            "ranking exported"
        );
    }

    let Some(chart) = chart else {
        warn!("no radar written");
        return Ok(());
    };

    let is_svg = cli
        .out
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        chart.save_svg(&cli.out, cli.size)?;
    } else {
        chart.save_png(&cli.out, cli.size)?;
    }
    info!(path = %cli.out.display(), "radar saved");
    Ok(())
}
