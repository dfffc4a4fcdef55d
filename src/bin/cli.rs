use chrono::NaiveDate;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use workout_schedule::{
    AppConfig, FixedClock, ResolvedSchedule, Settings, SettingsUpdate, Target, WorkoutService,
    config::SourceKind, observability,
};

/// Interactive workout schedule shell.
#[derive(Parser)]
#[command(name = "cli")]
struct Args {
    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Settings file (overrides storage.path)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Program CSV file (switches the program source to csv)
    #[arg(long)]
    program: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{s}' (YYYY-MM-DD)"))
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  today                              Show today's workout\n  tomorrow                           Show tomorrow's workout\n  on <YYYY-MM-DD>                    Show the workout for a date\n  day <name> [week]                  List exercises for a day label (any case)\n  labels                             Show the day rotation order\n  settings show                      Show stored settings\n  settings week <n>                  Pin the current week (n >= 1)\n  settings start <YYYY-MM-DD>        Set the cycle start date\n  settings auto <on|off>             Derive the week from the start date\n  settings key <key|clear>           Set or clear the API key\n  motivate                           Print a motivational line\n  quit|exit                          Exit"
    );
}

fn print_settings(settings: &Settings) {
    let start = settings
        .start_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "(invalid)".to_string());
    println!("Current week : {}", settings.current_week);
    println!("Start date   : {}", start);
    println!("Auto week    : {}", settings.auto_week);
    println!(
        "API key      : {}",
        if settings.api_key().is_some() { "set" } else { "not set" }
    );
}

fn print_schedule(schedule: &ResolvedSchedule) {
    println!("{}", schedule.to_cli_summary());
}

fn apply_update(service: &WorkoutService, update: SettingsUpdate) {
    match service.update_settings(&update) {
        Ok(settings) => {
            println!("Settings saved.");
            print_settings(&settings);
        }
        Err(e) => println!("Error: {}", e),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(path) = args.settings {
        config.storage.path = path;
    }
    if let Some(path) = args.program {
        config.program.source = SourceKind::Csv;
        config.program.csv_path = path;
    }
    observability::init_tracing(&config.logging);

    let mut service = WorkoutService::from_config(&config)?;
    if let Some(today) = args.today {
        service = service.with_clock(Arc::new(FixedClock(today)));
    }
    let runtime = Runtime::new()?;

    println!("Workout Schedule (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "today" | "tomorrow" => match cmd.parse::<Target>() {
                Ok(target) => print_schedule(&runtime.block_on(service.resolve(target))),
                Err(e) => println!("{}", e),
            },
            "on" => match parts.next().map(parse_date) {
                Some(Ok(date)) => print_schedule(&runtime.block_on(service.resolve_on(date))),
                Some(Err(e)) => println!("{}", e),
                None => println!("Usage: on <YYYY-MM-DD>"),
            },
            "day" => {
                let Some(name) = parts.next() else {
                    println!("Usage: day <name> [week]");
                    continue;
                };
                let week = match parts.next().map(str::parse::<u32>) {
                    Some(Ok(week)) => Some(week),
                    Some(Err(_)) => {
                        println!("Invalid week");
                        continue;
                    }
                    None => None,
                };
                let exercises = runtime.block_on(service.exercises_named(name, week));
                if exercises.is_empty() {
                    println!("No exercises for {}.", name);
                }
                for exercise in exercises {
                    println!("  - {}", exercise);
                }
            }
            "labels" => {
                let labels = runtime.block_on(service.rotation_labels());
                if labels.is_empty() {
                    println!("Program has no day labels.");
                } else {
                    println!("Rotation: {}", labels.join(" -> "));
                }
            }
            "settings" => match parts.next() {
                Some("show") | None => print_settings(&service.settings()),
                Some("week") => match parts.next().map(str::parse::<i64>) {
                    Some(Ok(week)) => apply_update(
                        &service,
                        SettingsUpdate {
                            current_week: Some(week),
                            ..Default::default()
                        },
                    ),
                    Some(Err(_)) => println!("Invalid week"),
                    None => println!("Usage: settings week <n>"),
                },
                Some("start") => match parts.next() {
                    Some(date) => apply_update(
                        &service,
                        SettingsUpdate {
                            start_date: Some(date.to_string()),
                            ..Default::default()
                        },
                    ),
                    None => println!("Usage: settings start <YYYY-MM-DD>"),
                },
                Some("auto") => {
                    let auto_week = match parts.next().map(str::to_ascii_lowercase).as_deref() {
                        Some("on" | "true") => true,
                        Some("off" | "false") => false,
                        _ => {
                            println!("Usage: settings auto <on|off>");
                            continue;
                        }
                    };
                    apply_update(
                        &service,
                        SettingsUpdate {
                            auto_week: Some(auto_week),
                            ..Default::default()
                        },
                    );
                }
                Some("key") => match parts.next() {
                    Some(key) => {
                        let key = if key == "clear" { "" } else { key };
                        apply_update(
                            &service,
                            SettingsUpdate {
                                api_key: Some(key.to_string()),
                                ..Default::default()
                            },
                        );
                    }
                    None => println!("Usage: settings key <key|clear>"),
                },
                Some(other) => {
                    println!("Unknown settings command '{}'.", other);
                    println!("Usage: settings show|week|start|auto|key ...");
                }
            },
            "motivate" => {
                let motivation = runtime.block_on(service.motivation());
                println!("{} (cost ${:.6})", motivation.sentence, motivation.cost);
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }
    Ok(())
}
