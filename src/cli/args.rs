//! コマンドライン解析（clap builder → domain::Command）

use crate::domain::command::Command;
use crate::domain::focus::FOCUS_SESSION_SECS;
use crate::domain::thought::{Mood, ThoughtCategory};
use crate::error::Error;
use clap::builder::ArgAction;
use clap::value_parser;

fn build_clap_command() -> clap::Command {
    clap::Command::new("mindglow")
        .about("Capture stray thoughts, classify them, and keep a focus log")
        .disable_help_flag(true)
        .disable_help_subcommand(true)
        .subcommand_required(false)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            clap::Command::new("capture")
                .about("Classify a thought and record it")
                .arg(
                    clap::Arg::new("text")
                        .num_args(1..)
                        .required(true)
                        .value_name("text"),
                )
                .arg(
                    clap::Arg::new("mood")
                        .short('m')
                        .long("mood")
                        .value_name("mood")
                        .help("Emotional weather at capture time (sunny, rainy, cloudy, windy, stormy, misty)")
                        .num_args(1),
                ),
        )
        .subcommand(
            clap::Command::new("list")
                .about("List recorded thoughts, newest first")
                .arg(
                    clap::Arg::new("category")
                        .short('c')
                        .long("category")
                        .value_name("category")
                        .help("Only show one category (TRAUMA, TODO, CREATIVE, OTHER, UNCATEGORIZED)")
                        .num_args(1),
                )
                .arg(
                    clap::Arg::new("mood-only")
                        .long("mood-only")
                        .help("Only show thoughts that carry a mood")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            clap::Command::new("toggle")
                .about("Toggle completion of a TODO thought")
                .arg(clap::Arg::new("id").required(true).value_name("id")),
        )
        .subcommand(
            clap::Command::new("delete")
                .about("Delete a thought by id")
                .arg(clap::Arg::new("id").required(true).value_name("id")),
        )
        .subcommand(clap::Command::new("stats").about("Show per-category and mood counts"))
        .subcommand(
            clap::Command::new("focus")
                .about("Focus timer (countdown and cumulative total)")
                .subcommand_required(true)
                .subcommand(
                    clap::Command::new("run")
                        .about("Run a countdown and accumulate focus time")
                        .arg(
                            clap::Arg::new("minutes")
                                .long("minutes")
                                .value_name("minutes")
                                .value_parser(value_parser!(u32).range(1..))
                                .num_args(1),
                        ),
                )
                .subcommand(clap::Command::new("total").about("Show cumulative focus time")),
        )
        .subcommand(clap::Command::new("help").about("Display this help message"))
}

fn matches_to_command(matches: &clap::ArgMatches) -> Result<Command, Error> {
    if matches.get_flag("help") {
        return Ok(Command::Help);
    }
    match matches.subcommand() {
        None | Some(("help", _)) => Ok(Command::Help),
        Some(("capture", m)) => {
            let text = m
                .get_many::<String>("text")
                .map(|v| v.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            let mood = m
                .get_one::<String>("mood")
                .map(|s| s.parse::<Mood>())
                .transpose()?;
            Ok(Command::Capture { text, mood })
        }
        Some(("list", m)) => {
            let category = m
                .get_one::<String>("category")
                .map(|s| s.parse::<ThoughtCategory>())
                .transpose()?;
            Ok(Command::List {
                category,
                mood_only: m.get_flag("mood-only"),
            })
        }
        Some(("toggle", m)) => Ok(Command::Toggle {
            id: m.get_one::<String>("id").cloned().unwrap_or_default(),
        }),
        Some(("delete", m)) => Ok(Command::Delete {
            id: m.get_one::<String>("id").cloned().unwrap_or_default(),
        }),
        Some(("stats", _)) => Ok(Command::Stats),
        Some(("focus", m)) => match m.subcommand() {
            Some(("run", rm)) => Ok(Command::FocusRun {
                minutes: rm
                    .get_one::<u32>("minutes")
                    .copied()
                    .unwrap_or(FOCUS_SESSION_SECS / 60),
            }),
            Some(("total", _)) => Ok(Command::FocusTotal),
            _ => Err(Error::validation("focus requires 'run' or 'total'")),
        },
        Some((name, _)) => Err(Error::validation(format!("Unknown command: {}", name))),
    }
}

/// コマンドラインを解析して Command に落とす
pub fn parse_args() -> Result<Command, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::validation(e.to_string()))?;
    matches_to_command(&matches)
}
