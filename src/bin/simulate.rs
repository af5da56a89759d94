//! Headless progression simulator.
//!
//! Drives a game session through foreground play and a background/resume
//! cycle without any UI, for eyeballing the reward tuning.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # 60 min play, 120 min away
//!   cargo run --bin simulate -- -m 10 -a 480          # 10 min play, 8 hours away
//!   cargo run --bin simulate -- --seed 42             # Reproducible run

use petsoft::constants::FIXED_STEP_MS;
use petsoft::economy::format_number_short;
use petsoft::game_state::GameState;
use petsoft::session::GameSession;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::env;

struct SimConfig {
    play_minutes: u64,
    away_minutes: i64,
    seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            play_minutes: 60,
            away_minutes: 120,
            seed: 1,
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("PetSoft progression simulator (build {})", petsoft::build_info::BUILD_COMMIT);
    println!("  Foreground play: {} min", config.play_minutes);
    println!("  Time away:       {} min", config.away_minutes);
    println!("  Seed:            {}", config.seed);
    println!();

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut session = GameSession::new(GameState::new(0));
    session.start();

    // Drive the loop with a steady 60 fps frame cadence.
    let frames = (config.play_minutes as f64 * 60_000.0 / FIXED_STEP_MS) as u64;
    let mut kills = 0u64;
    let mut level_ups = 0u32;
    for _ in 0..frames {
        let result = session.frame(FIXED_STEP_MS, &mut rng);
        kills += result.enemies_defeated;
        level_ups += result.level_ups;
    }
    session.stop();

    println!("After {} min of play:", config.play_minutes);
    println!("  Enemies defeated: {}", format_number_short(kills));
    println!("  Level:            {} (+{})", session.state().player.level, level_ups);
    println!(
        "  Pyreal:           {}",
        format_number_short(session.state().player.pyreal)
    );
    println!();

    match session.resume(config.away_minutes, &mut rng) {
        Some(rewards) if rewards.is_meaningful() => {
            println!(
                "Welcome back! While you were away ({} min counted):",
                rewards.time_offline_minutes
            );
            println!(
                "  Enemies defeated: {}",
                format_number_short(rewards.enemies_defeated)
            );
            println!("  XP gained:        {}", format_number_short(rewards.xp_gained));
            println!(
                "  Pyreal gained:    {}",
                format_number_short(rewards.pyreal_gained)
            );
        }
        _ => println!("Nothing happened while you were away."),
    }

    println!();
    println!(
        "Final: level {}, {} pyreal, {} lifetime kills, {} s play time",
        session.state().player.level,
        format_number_short(session.state().player.pyreal),
        format_number_short(session.state().lifetime_enemies_defeated),
        session.state().play_time_seconds
    );
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-m" | "--minutes" => {
                if i + 1 < args.len() {
                    config.play_minutes = args[i + 1].parse().unwrap_or(config.play_minutes);
                    i += 1;
                }
            }
            "-a" | "--away" => {
                if i + 1 < args.len() {
                    config.away_minutes = args[i + 1].parse().unwrap_or(config.away_minutes);
                    i += 1;
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().unwrap_or(config.seed);
                    i += 1;
                }
            }
            "-h" | "--help" => {
                println!("Usage: simulate [-m MINUTES] [-a AWAY_MINUTES] [--seed SEED]");
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}
