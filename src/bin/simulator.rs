//! Bossfight Headless Battle Simulator
//!
//! Runs seeded battles against the sample boss with a simple auto-pilot,
//! using the same `BattleSession` command surface a real front end would.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --runs N         Number of battles with incrementing seeds (default: 100)
//!   --seed N         First RNG seed (default: 42)
//!   --levels SPEC    Ability levels, e.g. combat=3,toughness=2
//!   --gear IDS       Equipment ids, e.g. iron_sword,leather_vest
//!   --max-rounds N   Give up after this many rounds (default: 200)
//!   --config FILE    Load a BattleConfig from JSON
//!   --json           Print the summary as JSON
//!   --verbose        Print every battle message
//!   --version        Print build information

use bossfight::actor::{PlayerActor, PlayerLoadout};
use bossfight::battle::{BattleOutcome, BattleSession, PlayerCommand};
use bossfight::boss::mire_serpent;
use bossfight::build_info;
use bossfight::catalog::Catalogs;
use bossfight::core::BattleConfig;
use bossfight::items::ItemId;
use bossfight::progression::{AbilityType, ProgressionLedger};
use bossfight::skills::SkillId;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    runs: u32,
    seed: u64,
    levels: Vec<(AbilityType, u32)>,
    gear: Vec<String>,
    max_rounds: u32,
    config_path: Option<PathBuf>,
    json: bool,
    verbose: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            runs: 100,
            seed: 42,
            levels: Vec::new(),
            gear: Vec::new(),
            max_rounds: 200,
            config_path: None,
            json: false,
            verbose: false,
        }
    }
}

fn parse_args() -> SimConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                config.runs = parse_value(&args, i, "--runs");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_value(&args, i, "--seed");
            }
            "--max-rounds" => {
                i += 1;
                config.max_rounds = parse_value(&args, i, "--max-rounds");
            }
            "--levels" => {
                i += 1;
                config.levels = parse_levels(&value(&args, i, "--levels"));
            }
            "--gear" => {
                i += 1;
                config.gear = value(&args, i, "--gear")
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "--config" => {
                i += 1;
                config.config_path = Some(PathBuf::from(value(&args, i, "--config")));
            }
            "--json" => config.json = true,
            "--verbose" => config.verbose = true,
            "--version" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    config
}

fn value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => fail(&format!("{flag} requires a value")),
    }
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    value(args, i, flag)
        .parse()
        .unwrap_or_else(|_| fail(&format!("{flag} requires a number")))
}

fn parse_levels(spec: &str) -> Vec<(AbilityType, u32)> {
    spec.split(',')
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (id, level) = pair
                .split_once('=')
                .unwrap_or_else(|| fail(&format!("Bad level entry '{pair}', expected ability=N")));
            let ability = AbilityType::from_id(id.trim())
                .unwrap_or_else(|| fail(&format!("Unknown ability '{id}'")));
            let level = level
                .trim()
                .parse()
                .unwrap_or_else(|_| fail(&format!("Bad level '{level}' for {id}")));
            (ability, level)
        })
        .collect()
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn print_usage() {
    eprintln!(
        "Bossfight Headless Battle Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N         Number of battles with incrementing seeds (default: 100)\n\
         \x20 --seed N         First RNG seed (default: 42)\n\
         \x20 --levels SPEC    Ability levels, e.g. combat=3,toughness=2\n\
         \x20 --gear IDS       Equipment ids, e.g. iron_sword,leather_vest\n\
         \x20 --max-rounds N   Give up after this many rounds (default: 200)\n\
         \x20 --config FILE    Load a BattleConfig from JSON\n\
         \x20 --json           Print the summary as JSON\n\
         \x20 --verbose        Print every battle message\n\
         \x20 --version        Print build information\n\
         \x20 --help, -h       Show this help"
    );
}

// ── Simulation Statistics ────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
struct Summary {
    runs: u32,
    victories: u32,
    deaths: u32,
    abandoned: u32,
    win_rate: f64,
    average_rounds: f64,
    player_crits: u32,
    player_misses: u32,
    boss_crits: u32,
    boss_misses: u32,
    total_experience: u64,
}

enum RunResult {
    Victory,
    Death,
    Abandoned,
}

// ── Auto-pilot ───────────────────────────────────────────────────────

/// Picks a command from what the session currently offers.
fn choose_command(battle: &BattleSession, commands: &[PlayerCommand]) -> PlayerCommand {
    let offers = |c: PlayerCommand| commands.contains(&c);
    let state = battle.player().state();

    if offers(PlayerCommand::Skill(SkillId::EscapeArtist)) {
        return PlayerCommand::Skill(SkillId::EscapeArtist);
    }
    if offers(PlayerCommand::Struggle) {
        return PlayerCommand::Struggle;
    }
    if state.hp() * 3 < state.max_hp() {
        if offers(PlayerCommand::Item(ItemId::HealingDraught)) {
            return PlayerCommand::Item(ItemId::HealingDraught);
        }
        if offers(PlayerCommand::Skill(SkillId::SecondWind)) {
            return PlayerCommand::Skill(SkillId::SecondWind);
        }
    }
    if state.effects().debuff_level() >= 2 && offers(PlayerCommand::Item(ItemId::PurifyingSalts)) {
        return PlayerCommand::Item(ItemId::PurifyingSalts);
    }
    if offers(PlayerCommand::Skill(SkillId::PowerStrike)) {
        return PlayerCommand::Skill(SkillId::PowerStrike);
    }
    if offers(PlayerCommand::Attack) {
        return PlayerCommand::Attack;
    }
    PlayerCommand::StayStill
}

fn print_messages(verbose: bool, messages: &[String]) {
    if verbose {
        for message in messages {
            println!("  {message}");
        }
    }
}

fn run_battle(
    sim: &SimConfig,
    seed: u64,
    catalogs: &Arc<Catalogs>,
    battle_config: &BattleConfig,
    summary: &mut Summary,
) -> RunResult {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut loadout = PlayerLoadout::new(ProgressionLedger::with_levels(&sim.levels));
    for id in &sim.gear {
        let ledger = loadout.ledger.clone();
        if let Err(e) = loadout.gear.equip(id, &catalogs.equipment, &ledger) {
            fail(&e.to_string());
        }
    }

    let player = PlayerActor::new("Hero", loadout, Arc::clone(&catalogs.status));
    let mut battle = BattleSession::new(
        player,
        Arc::new(mire_serpent::definition()),
        Box::new(mire_serpent::selector()),
        Arc::clone(catalogs),
        battle_config.clone(),
    );

    if sim.verbose {
        println!("== Battle (seed {seed}) ==");
    }
    match battle.start() {
        Ok(report) => print_messages(sim.verbose, &report.messages),
        Err(e) => fail(&e.to_string()),
    }

    let result = loop {
        if battle.player_defeated() {
            break RunResult::Death;
        }
        if battle.round() > sim.max_rounds {
            let _ = battle.give_up();
            break RunResult::Abandoned;
        }

        let commands = battle.available_commands();
        let command = choose_command(&battle, &commands);
        match battle.dispatch(command, &mut rng) {
            Ok(report) => print_messages(sim.verbose, &report.messages),
            Err(e) => fail(&format!("Auto-pilot chose a rejected command: {e}")),
        }
        if battle.outcome() == Some(BattleOutcome::Victory) {
            break RunResult::Victory;
        }

        match battle.boss_turn(&mut rng) {
            Ok(report) => print_messages(sim.verbose, &report.messages),
            Err(e) => fail(&e.to_string()),
        }
        if battle.outcome() == Some(BattleOutcome::Victory) {
            break RunResult::Victory;
        }
    };

    let stats = *battle.stats();
    summary.player_crits += stats.player_crits;
    summary.player_misses += stats.player_misses;
    summary.boss_crits += stats.boss_crits;
    summary.boss_misses += stats.boss_misses;
    summary.average_rounds += battle.round() as f64;

    let before: u64 = AbilityType::all()
        .into_iter()
        .map(|a| battle.player().ledger().experience(a))
        .sum();
    let progress = battle.collect_experience();
    print_messages(sim.verbose, &progress);
    let after: u64 = AbilityType::all()
        .into_iter()
        .map(|a| battle.player().ledger().experience(a))
        .sum();
    summary.total_experience += after - before;

    result
}

fn main() {
    let sim = parse_args();
    let battle_config = match &sim.config_path {
        Some(path) => BattleConfig::load(path)
            .unwrap_or_else(|e| fail(&format!("Failed to load {}: {e}", path.display()))),
        None => BattleConfig::default(),
    };
    let catalogs = Arc::new(Catalogs::standard());

    let mut summary = Summary {
        runs: sim.runs,
        ..Summary::default()
    };
    for run in 0..sim.runs {
        let seed = sim.seed + run as u64;
        match run_battle(&sim, seed, &catalogs, &battle_config, &mut summary) {
            RunResult::Victory => summary.victories += 1,
            RunResult::Death => summary.deaths += 1,
            RunResult::Abandoned => summary.abandoned += 1,
        }
    }
    if sim.runs > 0 {
        summary.win_rate = summary.victories as f64 / sim.runs as f64;
        summary.average_rounds /= sim.runs as f64;
    }

    if sim.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(&e.to_string()),
        }
        return;
    }

    println!("══ Mire Serpent: {} battles (seed {}) ══", summary.runs, sim.seed);
    println!(
        "Victories: {}  Deaths: {}  Abandoned: {}",
        summary.victories, summary.deaths, summary.abandoned
    );
    println!("Win rate: {:.1}%", summary.win_rate * 100.0);
    println!("Average rounds: {:.1}", summary.average_rounds);
    println!(
        "Player crits/misses: {}/{}  Boss crits/misses: {}/{}",
        summary.player_crits, summary.player_misses, summary.boss_crits, summary.boss_misses
    );
    println!("Experience earned: {}", summary.total_experience);
}
