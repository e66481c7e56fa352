//! Play one duel in the terminal.
//!
//! ```text
//! cargo run -p duel-session --example cli_duel -- [starter-id]
//! ```
//!
//! Type a move id to attack, `pass` to skip the turn, `surrender` to give up
//! or `quit` to leave. Set `RUST_LOG=debug` to see engine logs.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use duel_battle::{Battle, BattleConfig, MoveCatalog};
use duel_records::default_catalog;
use duel_session::{
    BattleEvent, BattleReport, BattleState, Rejection, Session, SessionConfig, SessionHandle,
    SessionHandler,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

struct Terminal;

#[async_trait]
impl SessionHandler for Terminal {
    async fn on_event(&mut self, event: &BattleEvent) {
        println!("  {}", event);
    }

    async fn on_player_turn(&mut self, state: &BattleState) {
        let (me, them) = (&state.player, &state.opponent);
        println!();
        println!(
            "{} {}/{} hp {}/{} en  vs  {} {}/{} hp",
            me.name,
            me.stats.health,
            me.stats.max_health,
            me.stats.energy,
            me.stats.max_energy,
            them.name,
            them.stats.health,
            them.stats.max_health,
        );
        for mv in &me.moves {
            let marker = if me.can_afford(mv) { ' ' } else { 'x' };
            println!(
                "  {} {:<14} {:<9} power {:>3}  cost {:>3}",
                marker,
                mv.id,
                mv.category.as_str(),
                mv.power,
                mv.energy_cost
            );
        }
        println!("Your move (id, pass, surrender, quit):");
    }

    async fn on_rejected(&mut self, rejection: &Rejection) {
        println!("  {}", rejection);
    }

    async fn on_opponent_thinking(&mut self, _delay: Duration) {
        println!("  The opponent is thinking...");
    }

    async fn on_timeout(&mut self, choice: Option<&str>) {
        match choice {
            Some(id) => println!("  Out of time, playing {}", id),
            None => println!("  Out of time, passing"),
        }
    }

    async fn on_battle_over(&mut self, report: &BattleReport) {
        let verdict = if report.player_won() { "Victory" } else { "Defeat" };
        println!();
        println!(
            "{}! +{} money, +{} experience",
            verdict, report.rewards.money, report.rewards.experience
        );
    }
}

/// Forward stdin lines to the session
async fn read_commands(handle: SessionHandle) {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let sent = match line.trim() {
            "" => continue,
            "pass" => handle.pass(),
            "surrender" => handle.surrender(),
            "quit" => handle.quit(),
            id => handle.choose_move(id),
        };
        if sent.is_err() {
            return;
        }
    }

    // Input closed
    let _ = handle.quit();
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let document = default_catalog()?;
    let catalog = MoveCatalog::from_document(&document)?;

    let starter_id = std::env::args().nth(1).unwrap_or_else(|| "ignis".to_string());
    let starter = document
        .find_starter(&starter_id)
        .ok_or_else(|| anyhow!("Unknown starter: {}", starter_id))?;
    let player = catalog
        .build_combatant(starter)
        .with_context(|| format!("Failed to build starter {}", starter_id))?;

    let rival = document
        .opponent_for_level(player.level)
        .ok_or_else(|| anyhow!("Catalog has no opponents"))?;
    let opponent = catalog.build_combatant(rival)?;

    println!(
        "{} (level {}) challenges {} (level {})",
        player.name, player.level, opponent.name, opponent.level
    );

    let battle = Battle::new(player, opponent, BattleConfig::default()).with_reward_sink(
        |report: &BattleReport| {
            tracing::info!(
                money = report.rewards.money,
                experience = report.rewards.experience,
                "Rewards delivered"
            );
        },
    );

    let config = SessionConfig::default().with_turn_timeout(Duration::from_secs(60));
    let (mut session, handle) = Session::new(battle, config);
    tokio::spawn(read_commands(handle));

    if session.run(&mut Terminal).await?.is_none() {
        println!("Battle abandoned");
    }

    // The input task may still be blocked on stdin
    std::process::exit(0);
}
