mod adapter;
mod cli;
mod domain;
mod error;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::io::Write;
use std::process;

use cli::parse_args;
use domain::command::Command;
use domain::focus::{format_duration, FocusTimer, Tick};
use domain::thought::{Thought, ThoughtDetail, ThoughtId};
use error::Error;
use ports::outbound::{now_iso8601, LogLevel, LogRecord};
use wiring::{wire_app, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    fn run(&self, cmd: Command) -> Result<i32, Error> {
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: "command started".to_string(),
            layer: Some("cli".to_string()),
            kind: Some("lifecycle".to_string()),
            fields: {
                let mut m = BTreeMap::new();
                m.insert("command".to_string(), serde_json::json!(command_name));
                Some(m)
            },
        });

        let result = match cmd {
            Command::Help => {
                print_help();
                Ok(0)
            }
            Command::Capture { text, mood } => {
                let thought = self.app.journal.submit(&text, mood)?;
                print_thought(&thought);
                Ok(0)
            }
            Command::List {
                category,
                mood_only,
            } => {
                for thought in self.app.journal.list(category, mood_only) {
                    print_thought(&thought);
                }
                Ok(0)
            }
            Command::Toggle { id } => {
                let completed = self.app.journal.toggle_completed(&ThoughtId::new(id))?;
                println!("{}", if completed { "completed" } else { "reopened" });
                Ok(0)
            }
            Command::Delete { id } => {
                // 無い id の削除は何もしない（冪等）。報告だけ変える
                if self.app.journal.delete(&ThoughtId::new(id.clone()))? {
                    println!("deleted {}", id);
                } else {
                    println!("no thought with id {}", id);
                }
                Ok(0)
            }
            Command::Stats => {
                let c = self.app.journal.stats();
                println!("healing        {}", c.healing);
                println!("todo           {}", c.todo);
                println!("creative       {}", c.creative);
                println!("other          {}", c.other);
                if c.uncategorized > 0 {
                    println!("uncategorized  {}", c.uncategorized);
                }
                println!("with mood      {}", c.moods);
                println!(
                    "focus total    {}",
                    format_duration(self.app.focus.total_secs())
                );
                Ok(0)
            }
            Command::FocusRun { minutes } => self.run_focus(minutes),
            Command::FocusTotal => {
                println!("{}", format_duration(self.app.focus.total_secs()));
                Ok(0)
            }
        };

        let code = result.as_ref().copied().unwrap_or(0);
        let _ = self.app.logger.log(&LogRecord {
            ts: now_iso8601(),
            level: LogLevel::Info,
            message: "command finished".to_string(),
            layer: Some("cli".to_string()),
            kind: Some("lifecycle".to_string()),
            fields: {
                let mut m = BTreeMap::new();
                m.insert("command".to_string(), serde_json::json!(command_name));
                m.insert("exit_code".to_string(), serde_json::json!(code));
                Some(m)
            },
        });
        if let Err(ref e) = result {
            let _ = self.app.logger.log(&LogRecord {
                ts: now_iso8601(),
                level: LogLevel::Error,
                message: e.to_string(),
                layer: Some("cli".to_string()),
                kind: Some("error".to_string()),
                fields: None,
            });
        }
        result
    }

    /// カウントダウンを実行し、経過 1 秒ごとに累計へ積算する
    fn run_focus(&self, minutes: u32) -> Result<i32, Error> {
        let mut timer = FocusTimer::new(minutes * 60);
        timer.start();
        loop {
            std::thread::sleep(std::time::Duration::from_secs(1));
            match timer.tick() {
                Tick::Idle => break,
                Tick::Ticked { remaining } => {
                    self.app.focus.record_seconds(1)?;
                    print!("\r{:02}:{:02} ", remaining / 60, remaining % 60);
                    let _ = std::io::stdout().flush();
                }
                Tick::Finished => {
                    self.app.focus.record_seconds(1)?;
                    println!(
                        "\rFocus session complete. Total focus time: {}",
                        format_duration(self.app.focus.total_secs())
                    );
                    break;
                }
            }
        }
        Ok(0)
    }
}

fn cmd_name_for_log(cmd: &Command) -> &'static str {
    match cmd {
        Command::Help => "help",
        Command::Capture { .. } => "capture",
        Command::List { .. } => "list",
        Command::Toggle { .. } => "toggle",
        Command::Delete { .. } => "delete",
        Command::Stats => "stats",
        Command::FocusRun { .. } => "focus run",
        Command::FocusTotal => "focus total",
    }
}

fn print_thought(t: &Thought) {
    let mood = t
        .mood
        .map(|m| format!(" ({})", m))
        .unwrap_or_default();
    match &t.detail {
        ThoughtDetail::Trauma { ai_advice, books } => {
            println!("{}  [TRAUMA] {}{}", t.id, t.content, mood);
            if let Some(advice) = ai_advice {
                println!("    advice: {}", advice);
            }
            for book in books.iter().flatten() {
                println!("    book: {} ({}): {}", book.title, book.author, book.reason);
            }
        }
        ThoughtDetail::Todo { is_completed } => {
            let mark = if *is_completed { "x" } else { " " };
            println!("{}  [TODO] [{}] {}{}", t.id, mark, t.content, mood);
        }
        ThoughtDetail::Creative { tags, ai_advice } => {
            println!("{}  [CREATIVE] {}{}", t.id, t.content, mood);
            if let Some(tags) = tags {
                println!("    tags: {}", tags.join(", "));
            }
            if let Some(advice) = ai_advice {
                println!("    advice: {}", advice);
            }
        }
        ThoughtDetail::Other { sentiment } => {
            println!("{}  [OTHER] {}{}", t.id, t.content, mood);
            if let Some(sentiment) = sentiment {
                println!("    sentiment: {}", sentiment);
            }
        }
        ThoughtDetail::Uncategorized => {
            println!("{}  [UNCATEGORIZED] {}{}", t.id, t.content, mood);
        }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if matches!(e, Error::Validation(_)) {
                print_usage();
            }
            eprintln!("mindglow: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let cmd = parse_args()?;
    let app = wire_app()?;
    let runner = Runner { app };
    runner.run(cmd)
}

fn print_usage() {
    eprintln!("Usage: mindglow <command> [options]");
}

fn print_help() {
    println!("Usage: mindglow <command> [options]");
    println!("Commands:");
    println!("  capture <text> [-m/--mood <mood>]   Classify a thought and record it");
    println!("  list [-c/--category <c>] [--mood-only]");
    println!("                                      List recorded thoughts, newest first");
    println!("  toggle <id>                         Toggle completion of a TODO thought");
    println!("  delete <id>                         Delete a thought by id");
    println!("  stats                               Show per-category and mood counts");
    println!("  focus run [--minutes <n>]           Run a countdown and accumulate focus time");
    println!("  focus total                         Show cumulative focus time");
    println!("  help                                Display this help message");
    println!();
    println!("Moods: sunny, rainy, cloudy, windy, stormy, misty");
    println!("Categories: TRAUMA, TODO, CREATIVE, OTHER, UNCATEGORIZED");
    println!();
    println!("Environment:");
    println!("  GEMINI_API_KEY   Credential for AI classification (API_KEY also accepted).");
    println!("                   When unset, thoughts are categorized by an offline keyword rule.");
    println!("  MINDGLOW_MODEL   Override the classification model (default: gemini-3-flash-preview).");
    println!("  MINDGLOW_HOME    Data directory. If unset, $XDG_DATA_HOME/mindglow");
    println!("                   (e.g. ~/.local/share/mindglow) is used.");
    println!();
    println!("Examples:");
    println!("  mindglow capture \"下周三写完伦理报告初稿\" --mood cloudy");
    println!("  mindglow list --category todo");
    println!("  mindglow focus run --minutes 25");
}
