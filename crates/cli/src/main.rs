use rouilleux_core::StrategyKind;
use rouilleux_replay::{
    clear_replays, default_replay_dir, list_replays, load_replay, Scoreboard,
};
use rouilleux_sim::{BotSpec, SimConfig, Simulator};
use std::path::{Path, PathBuf};

const USAGE: &str = "\
rouilleux - the Pouilleux card game

usage:
  rouilleux play [--seed N] [--name NAME] [--bots N] [--no-replay]
  rouilleux simulate [--seed N] [--games N] [--bots spec,spec,...]
                     [--max-turns N] [--json PATH]
  rouilleux replays
  rouilleux replay <FILE>
  rouilleux clear-replays
  rouilleux standings
  rouilleux clear-scores

bot specs for `simulate` are strategy keywords, optionally `name=keyword`:
  draw-then-purge purge-then-draw random-draw random-draw-purge
  mixed color-aware purge-red";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let code = match args.first().map(String::as_str) {
        Some("play") => cmd_play(&args[1..]),
        Some("simulate") => cmd_simulate(&args[1..]),
        Some("replays") => cmd_replays(),
        Some("replay") => cmd_replay(&args[1..]),
        Some("clear-replays") => cmd_clear_replays(),
        Some("standings") => cmd_standings(),
        Some("clear-scores") => cmd_clear_scores(),
        Some("--help") | Some("-h") | Some("help") | None => {
            println!("{USAGE}");
            0
        }
        Some(other) => {
            eprintln!("unknown command: {other}");
            eprintln!("{USAGE}");
            2
        }
    };
    std::process::exit(code);
}

fn cmd_play(args: &[String]) -> i32 {
    match rouilleux_cui::run_with_args(args) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("play error: {err:#}");
            1
        }
    }
}

fn cmd_simulate(args: &[String]) -> i32 {
    let mut config = SimConfig::default();
    let mut json_path: Option<PathBuf> = None;

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => match parse_value(args, &mut idx) {
                Some(value) => config.seed = value,
                None => return usage_error("--seed expects a number"),
            },
            "--games" => match parse_value(args, &mut idx) {
                Some(value) => config.games = value,
                None => return usage_error("--games expects a number"),
            },
            "--max-turns" => match parse_value(args, &mut idx) {
                Some(value) => config.max_turns = value,
                None => return usage_error("--max-turns expects a number"),
            },
            "--bots" => {
                let Some(spec) = next_arg(args, &mut idx) else {
                    return usage_error("--bots expects a comma-separated list");
                };
                match parse_bots(spec) {
                    Ok(bots) => config.bots = bots,
                    Err(msg) => return usage_error(&msg),
                }
            }
            "--json" => {
                let Some(path) = next_arg(args, &mut idx) else {
                    return usage_error("--json expects a path");
                };
                json_path = Some(PathBuf::from(path));
            }
            other => return usage_error(&format!("unknown option: {other}")),
        }
        idx += 1;
    }

    let simulator = match Simulator::new(config) {
        Ok(simulator) => simulator,
        Err(err) => {
            eprintln!("simulate error: {err}");
            return 1;
        }
    };
    let result = match simulator.run() {
        Ok(result) => result,
        Err(err) => {
            eprintln!("simulate error: {err}");
            return 1;
        }
    };

    println!("{}", result.to_text_report());
    if let Some(path) = json_path {
        if let Err(err) = result.write_json(&path) {
            eprintln!("could not write {}: {err}", path.display());
            return 1;
        }
        println!("\nwrote {}", path.display());
    }
    0
}

fn cmd_replays() -> i32 {
    let dir = default_replay_dir();
    match list_replays(&dir) {
        Ok(paths) if paths.is_empty() => {
            println!("no replays in {}", dir.display());
            0
        }
        Ok(paths) => {
            for path in paths {
                println!("{}", path.display());
            }
            0
        }
        Err(err) => {
            eprintln!("replays error: {err:#}");
            1
        }
    }
}

fn cmd_replay(args: &[String]) -> i32 {
    let Some(file) = args.first() else {
        return usage_error("replay expects a file path");
    };
    let states = match load_replay(Path::new(file)) {
        Ok(states) => states,
        Err(err) => {
            eprintln!("replay error: {err:#}");
            return 1;
        }
    };
    for state in &states {
        println!("step {:>3}  {}", state.step, state.description);
        for player in &state.players {
            println!("    {:<12} {} cards", player.name, player.hand.len());
        }
    }
    println!("\n{} snapshots", states.len());
    0
}

fn cmd_clear_replays() -> i32 {
    let dir = default_replay_dir();
    match clear_replays(&dir) {
        Ok(()) => {
            println!("cleared {}", dir.display());
            0
        }
        Err(err) => {
            eprintln!("clear-replays error: {err:#}");
            1
        }
    }
}

fn cmd_standings() -> i32 {
    let board = match Scoreboard::open(Scoreboard::default_path()) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("standings error: {err:#}");
            return 1;
        }
    };
    let standings = board.standings();
    if standings.is_empty() {
        println!("no recorded games yet");
        return 0;
    }
    for entry in standings {
        println!("{:<16} {} losses", entry.name, entry.losses);
    }
    0
}

fn cmd_clear_scores() -> i32 {
    let mut board = match Scoreboard::open(Scoreboard::default_path()) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("clear-scores error: {err:#}");
            return 1;
        }
    };
    match board.clear() {
        Ok(()) => {
            println!("scoreboard cleared");
            0
        }
        Err(err) => {
            eprintln!("clear-scores error: {err:#}");
            1
        }
    }
}

/// `name=keyword` or bare `keyword`; bare bots get seat names in order.
fn parse_bots(spec: &str) -> Result<Vec<BotSpec>, String> {
    let mut bots = Vec::new();
    for (idx, part) in spec.split(',').filter(|p| !p.trim().is_empty()).enumerate() {
        let part = part.trim();
        let (name, keyword) = match part.split_once('=') {
            Some((name, keyword)) => (name.trim().to_string(), keyword.trim()),
            None => (format!("bot {}", idx + 1), part),
        };
        let Some(strategy) = StrategyKind::from_keyword(keyword) else {
            return Err(format!("unknown strategy keyword: {keyword}"));
        };
        if strategy.is_human() {
            return Err("simulate runs bots only; use `play` for a human seat".to_string());
        }
        bots.push(BotSpec::new(name, strategy));
    }
    if bots.len() < 2 {
        return Err("need at least two bot specs".to_string());
    }
    Ok(bots)
}

fn next_arg<'a>(args: &'a [String], idx: &mut usize) -> Option<&'a str> {
    *idx += 1;
    args.get(*idx).map(String::as_str)
}

fn parse_value<T: std::str::FromStr>(args: &[String], idx: &mut usize) -> Option<T> {
    next_arg(args, idx)?.parse().ok()
}

fn usage_error(msg: &str) -> i32 {
    eprintln!("{msg}");
    eprintln!("{USAGE}");
    2
}
