use std::cmp::Ordering;
use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use serde::Serialize;

use crate::analysis::metrics::{centrality, summarize, top_central, CentralityEntry};
use crate::analysis::recommend::{recommendations, Recommendation};
use crate::analysis::resilience::{simulate_removal, RemovalImpact};
use crate::config::{resolve_config, AppConfig};
use crate::error::{CollabnetError, Result};
use crate::graph::Snapshot;
use crate::model::seed::demo_network;
use crate::model::{Network, PersonId};
use crate::render::dot::{render_dot, Overlay};
use crate::render::{tables, ViewMode};
use crate::util::output;

pub mod shell;

#[derive(Parser, Debug)]
#[command(name = "collabnet")]
#[command(about = "Academic collaboration network workbench", long_about = None)]
pub struct Cli {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive session: menus on a TTY, line commands on piped input
    Shell(ShellArgs),
    /// One-shot analyses over the built-in demo network
    Demo(DemoArgs),
    /// Print shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Start from the built-in demo network instead of an empty one
    #[arg(long)]
    pub demo: bool,
}

#[derive(Args, Debug)]
pub struct DemoArgs {
    #[command(subcommand)]
    pub command: DemoCommand,
}

#[derive(Subcommand, Debug)]
pub enum DemoCommand {
    Summary(JsonArgs),
    Recommendations(JsonArgs),
    Resilience(ResilienceArgs),
    Gaps(JsonArgs),
    Dot(DotArgs),
}

#[derive(Args, Debug)]
pub struct JsonArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ResilienceArgs {
    pub person: String,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DotArgs {
    #[arg(long, default_value = "normal")]
    pub mode: String,
    /// Person to remove in resilience mode
    #[arg(long)]
    pub person: Option<String>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    pub shell: CompletionShell,
}

pub fn run() {
    let cli = Cli::parse();
    if cli.no_color {
        console::set_colors_enabled(false);
    }
    if let Err(err) = dispatch(cli) {
        output::error(&err.to_string());
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config)?;
    match cli
        .command
        .unwrap_or(Commands::Shell(ShellArgs { demo: false }))
    {
        Commands::Shell(args) => shell::run_shell(config, args.demo),
        Commands::Demo(args) => handle_demo(args, &config),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            clap_complete::generate(
                args.shell,
                &mut command,
                "collabnet",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

fn handle_demo(args: DemoArgs, config: &AppConfig) -> Result<()> {
    let network = demo_network();
    match args.command {
        DemoCommand::Summary(json) => print_summary(&network, json.json),
        DemoCommand::Recommendations(json) => print_recommendations(&network, json.json),
        DemoCommand::Resilience(args) => {
            let impact = simulate_removal(&network, &PersonId::new(args.person.trim()))?;
            print_resilience(&impact, args.json)
        }
        DemoCommand::Gaps(json) => print_gaps(&network, config, json.json),
        DemoCommand::Dot(args) => {
            let mode: ViewMode = args
                .mode
                .parse()
                .map_err(|msg: String| CollabnetError::Other(anyhow::anyhow!(msg)))?;
            print_dot(&network, mode, args.person.as_deref(), config)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GapReportJson {
    pub ranking: Vec<CentralityEntry>,
    pub top_central: Vec<PersonId>,
}

pub(crate) fn gaps_data(network: &Network, config: &AppConfig) -> GapReportJson {
    let entries = centrality(&Snapshot::of(network), &config.relevance);
    let top = top_central(&entries, config.limits.top_central);
    let mut ranking = entries;
    ranking.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
    });
    GapReportJson {
        ranking,
        top_central: top,
    }
}

pub(crate) fn print_summary(network: &Network, json: bool) -> Result<()> {
    let summary = summarize(&Snapshot::of(network));
    if json {
        println!("{}", serde_json::to_string_pretty(&summary).map_err(to_other)?);
    } else {
        println!("{}", tables::summary_line(&summary));
    }
    Ok(())
}

pub(crate) fn print_recommendations(network: &Network, json: bool) -> Result<()> {
    let recs: Vec<Recommendation> = recommendations(network);
    if json {
        println!("{}", serde_json::to_string_pretty(&recs).map_err(to_other)?);
    } else {
        print!("{}", tables::recommendations_report(&recs));
    }
    Ok(())
}

pub(crate) fn print_resilience(impact: &RemovalImpact, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(impact).map_err(to_other)?);
    } else {
        print!("{}", tables::resilience_report(impact));
    }
    Ok(())
}

pub(crate) fn print_gaps(network: &Network, config: &AppConfig, json: bool) -> Result<()> {
    let data = gaps_data(network, config);
    if json {
        println!("{}", serde_json::to_string_pretty(&data).map_err(to_other)?);
    } else {
        print!(
            "{}",
            tables::gap_report(&data.ranking, &data.top_central, config.limits.gap_report)
        );
    }
    Ok(())
}

pub(crate) fn print_dot(
    network: &Network,
    mode: ViewMode,
    focus: Option<&str>,
    config: &AppConfig,
) -> Result<()> {
    match mode {
        ViewMode::Normal => {
            print!("{}", render_dot(network, &Overlay::None, &config.colors));
        }
        ViewMode::Recommendations => {
            let recs = recommendations(network);
            print!(
                "{}",
                render_dot(network, &Overlay::Recommendations(&recs), &config.colors)
            );
        }
        ViewMode::Resilience => {
            let focus = focus.ok_or_else(|| {
                CollabnetError::Other(anyhow::anyhow!(
                    "resilience view needs a person to remove"
                ))
            })?;
            let impact = simulate_removal(network, &PersonId::new(focus.trim()))?;
            print!(
                "{}",
                render_dot(network, &Overlay::Removal(&impact), &config.colors)
            );
        }
        ViewMode::Gaps => {
            let entries = centrality(&Snapshot::of(network), &config.relevance);
            let top = top_central(&entries, config.limits.top_central);
            print!(
                "{}",
                render_dot(network, &Overlay::TopCentral(&top), &config.colors)
            );
        }
    }
    Ok(())
}

fn to_other(err: serde_json::Error) -> CollabnetError {
    CollabnetError::Other(anyhow::Error::new(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_demo_resilience() {
        let cli = Cli::parse_from(["collabnet", "demo", "resilience", "maria", "--json"]);
        match cli.command {
            Some(Commands::Demo(demo)) => match demo.command {
                DemoCommand::Resilience(args) => {
                    assert_eq!(args.person, "maria");
                    assert!(args.json);
                }
                other => panic!("unexpected demo command: {other:?}"),
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_defaults_to_the_shell() {
        let cli = Cli::parse_from(["collabnet"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn gaps_ranking_is_sorted_by_relevance() {
        let network = demo_network();
        let data = gaps_data(&network, &AppConfig::default());
        for pair in data.ranking.windows(2) {
            assert!(pair[0].relevance >= pair[1].relevance);
        }
        assert_eq!(data.top_central.len(), 3);
        assert_eq!(data.top_central[0], PersonId::new("maria"));
    }
}
