//! Draw Walkthrough Example
//!
//! Demonstrates a qualification draw feeding a 48-pair main draw, then
//! resolves the qualifiers and shows who took each reserved slot.

use anyhow::{Context, Result};
use tournament_draw::{DrawStrategy, Stage, TeamSide, Tournament, TournamentConfig};

fn print_round(tournament: &Tournament, stage: Stage) -> Result<()> {
    let round = tournament
        .round(stage)
        .with_context(|| format!("no {stage} round"))?;
    let name = |slot: Option<tournament_draw::EntrantId>| {
        slot.and_then(|id| tournament.entrant(id))
            .map_or_else(|| "-".to_string(), |e| e.to_string())
    };

    println!("{stage} ({} games)", round.games.len());
    for game in &round.games {
        println!("  {}: {} vs {}", game.id, name(game.team_a), name(game.team_b));
    }
    println!();
    Ok(())
}

fn decide(tournament: &mut Tournament, stage: Stage) -> Result<()> {
    let games: Vec<_> = tournament
        .round(stage)
        .with_context(|| format!("no {stage} round"))?
        .games
        .iter()
        .map(|g| g.id)
        .collect();
    for id in games {
        tournament.record_winner(id, Some(TeamSide::A))?;
    }
    tournament.propagate_winners()?;
    Ok(())
}

fn main() -> Result<()> {
    println!("=== Tournament Draw Example ===\n");

    // Example 1: Configure and build the structure
    let config = TournamentConfig::qualif_knockout(48, 16, 16, 4, 4);
    let mut tournament = Tournament::new("City Open");
    tournament.initialize_structure(config.clone())?;

    let stages: Vec<String> = tournament.rounds().iter().map(|r| r.stage.to_string()).collect();
    println!("Rounds: {}\n", stages.join(" -> "));

    // Example 2: Register 60 pairs and draw with a fixed shuffle
    let pairs: Vec<_> = (1..=60)
        .map(|seed| tournament.register_entrant(format!("Pair {seed}"), Some(seed)))
        .collect();
    let mut strategy = DrawStrategy::for_config_seeded(&config, 2024);
    tournament.place_entrants(&pairs, &mut strategy)?;
    let walkovers = tournament.propagate_winners()?;
    println!("{walkovers} seeds advanced on byes\n");

    print_round(&tournament, Stage::Q1)?;

    // Example 3: Play the qualification rounds
    decide(&mut tournament, Stage::Q1)?;
    decide(&mut tournament, Stage::Q2)?;

    let main = tournament.round(Stage::R64).context("no main draw")?;
    println!("Qualifier slots after qualification:");
    for (index, game) in main.games.iter().enumerate() {
        for side in [TeamSide::A, TeamSide::B] {
            if let Some(q) = game.reserved_for(side) {
                let occupant = game
                    .slot(side)
                    .and_then(|id| tournament.entrant(id))
                    .context("reserved slot is empty")?;
                println!("  Q{q} (game {}, side {side}): {occupant}", index + 1);
            }
        }
    }
    println!();

    print_round(&tournament, Stage::R32)?;

    Ok(())
}
