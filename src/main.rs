use crossterm::style::{Color, Stylize};
use mastermind_hd::constants::{color_from_letter, color_name, PROGRESS_FILE, STATS_FILE};
use mastermind_hd::utils::persistence::save_path;
use mastermind_hd::utils::version_line;
use mastermind_hd::{
    Feedback, GameRecord, JsonFileStore, LevelCatalog, ProgressStore, PuzzleEngine, StatsStore,
};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::time::Instant;

type CliResult = Result<(), Box<dyn Error>>;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let result = match args.get(1).map(String::as_str) {
        None | Some("--help") | Some("-h") => {
            print_help();
            Ok(())
        }
        Some("--version") | Some("-v") => {
            println!("{}", version_line());
            Ok(())
        }
        Some("levels") => list_levels(),
        Some("play") => match args.get(2).and_then(|n| n.parse::<u32>().ok()) {
            Some(level) => play(level),
            None => Err("Usage: mastermind play <level>".into()),
        },
        Some("progress") => show_progress(),
        Some("stats") => show_stats(),
        Some("reset") => reset(),
        Some(other) => Err(format!(
            "Unknown command: {}\nRun 'mastermind --help' for usage.",
            other
        )
        .into()),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn print_help() {
    println!("Mastermind HD - crack the hidden color code\n");
    println!("Usage: mastermind [command]\n");
    println!("Commands:");
    println!("  levels       List all levels with lock and star state");
    println!("  play <n>     Play level n");
    println!("  progress     Show level progress");
    println!("  stats        Show play statistics");
    println!("  reset        Reset level progress and statistics");
    println!("  --version    Show version information");
    println!("  --help       Show this help message");
    println!("\nWhile playing, enter colors by letter (r b g p y o k w) or digit,");
    println!("'hint' for a hint, or 'quit' to give up (recorded as a loss).");
}

fn open_progress() -> Result<ProgressStore<JsonFileStore>, Box<dyn Error>> {
    Ok(ProgressStore::new(JsonFileStore::open(save_path(
        PROGRESS_FILE,
    )?))?)
}

fn open_stats() -> Result<StatsStore<JsonFileStore>, Box<dyn Error>> {
    Ok(StatsStore::new(JsonFileStore::open(save_path(STATS_FILE)?)))
}

fn peg_color(color: usize) -> Color {
    match color {
        0 => Color::Red,
        1 => Color::Blue,
        2 => Color::Green,
        3 => Color::Rgb { r: 160, g: 32, b: 240 },
        4 => Color::Yellow,
        5 => Color::Rgb { r: 255, g: 140, b: 0 },
        6 => Color::DarkGrey,
        _ => Color::White,
    }
}

fn pegs(colors: &[usize]) -> String {
    colors
        .iter()
        .map(|&c| format!("{} ", "●".with(peg_color(c))))
        .collect()
}

fn stars(count: u8) -> String {
    (0..3)
        .map(|i| if i < count { '★' } else { '☆' })
        .collect()
}

fn list_levels() -> CliResult {
    let catalog = LevelCatalog::new();
    let progress = open_progress()?;
    for level in catalog.all_levels() {
        let n = level.level_number();
        let lock = if progress.is_level_unlocked(n) { " " } else { "🔒" };
        let timer = if level.is_timed() {
            format!("{}s", level.time_limit_seconds())
        } else {
            "-".to_string()
        };
        println!(
            "{:>3} {} {:<22} {:<8} {} colors, {} pegs, {:>2} turns, dup {:<3}, hints {}, timer {:<4} {}",
            n,
            lock,
            level.name(),
            level.difficulty().name(),
            level.num_colors(),
            level.code_length(),
            level.max_turns(),
            if level.allows_duplicates() { "yes" } else { "no" },
            level.hints_available(),
            timer,
            stars(progress.level_stars(n)),
        );
    }
    Ok(())
}

fn show_progress() -> CliResult {
    let progress = open_progress()?;
    println!("Highest unlocked level: {}", progress.highest_unlocked_level());
    println!(
        "Levels completed: {} ({}%)",
        progress.total_levels_completed(),
        progress.completion_percentage()
    );
    println!("Stars earned: {} / 300", progress.total_stars());
    if progress.is_perfect_completion() {
        println!("{}", "Perfect completion!".with(Color::Yellow));
    }
    Ok(())
}

fn show_stats() -> CliResult {
    let stats = open_stats()?;
    println!("{}", stats.summary());
    println!(
        "Perfect games: {} | Hints used: {} | Best streak: {}",
        stats.perfect_games(),
        stats.hints_used(),
        stats.best_streak()
    );
    if stats.best_time() > 0.0 {
        println!("Best time: {:.1}s", stats.best_time());
    }
    for milestone in stats.milestones() {
        println!("  {} {}", "✔".with(Color::Green), milestone.name());
    }
    Ok(())
}

fn reset() -> CliResult {
    open_progress()?.reset_all_progress()?;
    open_stats()?.reset()?;
    println!("Progress and statistics reset.");
    Ok(())
}

/// Parse one input line into color indices. Whitespace and commas are ignored.
fn parse_colors(line: &str, num_colors: usize) -> Result<Vec<usize>, String> {
    line.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| {
            let color = c
                .to_digit(10)
                .map(|d| d as usize)
                .or_else(|| color_from_letter(c))
                .ok_or_else(|| format!("Unknown color '{c}'"))?;
            if color >= num_colors {
                return Err(format!(
                    "{} is not in play on this level (0..{})",
                    color_name(color),
                    num_colors
                ));
            }
            Ok(color)
        })
        .collect()
}

fn print_feedback(turn: usize, guess: &[usize], feedback: Feedback) {
    println!(
        "{:>2}. {}  {} {}",
        turn + 1,
        pegs(guess),
        format!("●{}", feedback.black_pegs).with(Color::White),
        format!("○{}", feedback.white_pegs).with(Color::Grey),
    );
}

fn play(level_number: u32) -> CliResult {
    let catalog = LevelCatalog::new();
    let level = catalog.get_level(level_number)?;
    let mut progress = open_progress()?;
    if !progress.is_level_unlocked(level_number) {
        return Err(format!(
            "Level {} is locked. Highest unlocked level is {}.",
            level_number,
            progress.highest_unlocked_level()
        )
        .into());
    }

    let mut engine = PuzzleEngine::new(level.clone());
    println!(
        "{} - {} ({})",
        level_number,
        level.name().bold(),
        level.difficulty().name()
    );
    let palette: Vec<String> = (0..level.num_colors())
        .map(|c| format!("{}={}", c, color_name(c).with(peg_color(c))))
        .collect();
    println!("Colors: {}", palette.join(" "));
    println!(
        "{} pegs, {} turns, duplicates {}, {} hints{}",
        level.code_length(),
        level.max_turns(),
        if level.allows_duplicates() { "allowed" } else { "not allowed" },
        level.hints_available(),
        if level.is_timed() {
            format!(", {}s on the clock", level.time_limit_seconds())
        } else {
            String::new()
        }
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut last_tick = Instant::now();

    while !engine.is_game_over() {
        print!(
            "Turn {}/{} > ",
            engine.current_turn() + 1,
            engine.max_turns()
        );
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let now = Instant::now();
        if engine.update_time(now.duration_since(last_tick).as_secs_f64()) {
            println!("{}", "Time's up!".with(Color::Red));
            break;
        }
        last_tick = now;

        match line.trim() {
            "" => continue,
            "quit" => break,
            "hint" => {
                match engine.use_hint() {
                    Some(hint) => println!(
                        "Slot {} is {} ({} hints left)",
                        hint.position + 1,
                        color_name(hint.color).with(peg_color(hint.color)),
                        engine.hints_remaining()
                    ),
                    None => println!("No hints available."),
                }
                continue;
            }
            input => match parse_colors(input, level.num_colors()) {
                Ok(colors) => {
                    for color in colors {
                        if let Some(feedback) = engine.make_move(color)? {
                            let turn = engine.current_turn() - 1;
                            if let Some(guess) = engine.guess(turn) {
                                print_feedback(turn, guess, feedback);
                            }
                        }
                        if engine.is_game_over() {
                            break;
                        }
                    }
                }
                Err(msg) => println!("{msg}"),
            },
        }

        if level.is_timed() && !engine.is_game_over() {
            println!("{:.0}s left", engine.remaining_time());
        }
    }

    if !engine.is_game_over() {
        println!("Game abandoned. Recorded as a loss.");
        open_stats()?.record_game(GameRecord::forfeit(&engine))?;
        return Ok(());
    }

    if let Some(secret) = engine.secret_code() {
        println!("Secret code: {}", pegs(secret));
    }
    if engine.player_won() {
        let earned = engine.star_rating();
        println!(
            "{} Solved in {} turns  {}",
            "You cracked it!".with(Color::Green).bold(),
            engine.current_turn(),
            stars(earned)
        );
        progress.complete_level(level_number, earned)?;
    } else {
        println!("{}", "The code remains a mystery.".with(Color::Red));
    }

    if let Some(record) = GameRecord::from_engine(&engine) {
        open_stats()?.record_game(record)?;
    }
    Ok(())
}
