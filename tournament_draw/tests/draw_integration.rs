//! Integration tests for draw generation
//!
//! These tests run complete draws through the public API for every format
//! and both draw modes.

#[cfg(test)]
mod draw_tests {
    use std::collections::HashSet;
    use tournament_draw::{
        DrawError, DrawMode, DrawStrategy, EntrantId, Stage, Tournament, TournamentConfig,
    };

    fn register(tournament: &mut Tournament, count: u32) -> Vec<EntrantId> {
        (1..=count)
            .map(|seed| tournament.register_entrant(format!("P{seed}"), Some(seed)))
            .collect()
    }

    fn seeded_draw(tournament: &mut Tournament, config: &TournamentConfig, pairs: &[EntrantId]) {
        let mut strategy = DrawStrategy::for_config_seeded(config, 99);
        tournament
            .place_entrants(pairs, &mut strategy)
            .expect("draw succeeds");
    }

    fn occupants(tournament: &Tournament, stage: Stage) -> Vec<EntrantId> {
        tournament
            .round(stage)
            .expect("round exists")
            .games
            .iter()
            .flat_map(|g| [g.team_a, g.team_b])
            .flatten()
            .collect()
    }

    #[test]
    fn test_manual_draw_preserves_supplied_order() {
        let config = TournamentConfig::knockout(4, 0).with_draw_mode(DrawMode::Manual);
        let mut tournament = Tournament::new("Manual");
        tournament.initialize_structure(config.clone()).unwrap();
        let pairs = register(&mut tournament, 4);

        let mut strategy = DrawStrategy::for_config(&config);
        tournament.place_entrants(&pairs, &mut strategy).unwrap();

        let semis = tournament.round(Stage::Semis).unwrap();
        assert_eq!(semis.games.len(), 2);
        assert_eq!(semis.games[0].team_a, Some(pairs[0]));
        assert_eq!(semis.games[0].team_b, Some(pairs[1]));
        assert_eq!(semis.games[1].team_a, Some(pairs[2]));
        assert_eq!(semis.games[1].team_b, Some(pairs[3]));
    }

    #[test]
    fn test_entrants_capped_to_draw_size() {
        let config = TournamentConfig::knockout(32, 8);
        let mut tournament = Tournament::new("Capped");
        tournament.initialize_structure(config.clone()).unwrap();
        let pairs = register(&mut tournament, 36);

        seeded_draw(&mut tournament, &config, &pairs);

        let placed: HashSet<EntrantId> = occupants(&tournament, Stage::R32).into_iter().collect();
        assert_eq!(placed.len(), 32);
        assert!(pairs[..32].iter().all(|p| placed.contains(p)));
        assert!(pairs[32..].iter().all(|p| !placed.contains(p)));
        let bye = tournament.bye().unwrap();
        assert!(!placed.contains(&bye), "a full draw needs no byes");
    }

    #[test]
    fn test_seeds_get_byes_in_short_draw() {
        let config = TournamentConfig::knockout(8, 2);
        let mut tournament = Tournament::new("Short");
        tournament.initialize_structure(config.clone()).unwrap();
        let pairs = register(&mut tournament, 5);

        seeded_draw(&mut tournament, &config, &pairs);

        let quarters = tournament.round(Stage::Quarters).unwrap();
        let bye = tournament.bye().unwrap();
        assert_eq!(quarters.slot(0), Some(pairs[0]));
        assert_eq!(quarters.slot(7), Some(pairs[1]));
        assert_eq!(quarters.slot(1), Some(bye));
        assert_eq!(quarters.slot(6), Some(bye));
        assert_eq!(quarters.slot(2), Some(bye));
        assert_eq!(quarters.count_occupied_by(bye), 3);
        assert!(quarters.empty_slots().is_empty());
    }

    #[test]
    fn test_same_seed_same_draw() {
        let config = TournamentConfig::knockout(16, 4);
        let build = |seed: u64| {
            let mut tournament = Tournament::new("Repeat");
            tournament.initialize_structure(config.clone()).unwrap();
            let pairs = register(&mut tournament, 13);
            let mut strategy = DrawStrategy::for_config_seeded(&config, seed);
            tournament.place_entrants(&pairs, &mut strategy).unwrap();
            tournament
        };

        assert_eq!(build(5), build(5));
    }

    #[test]
    fn test_qualification_draw_layout() {
        let config = TournamentConfig::qualif_knockout(48, 16, 16, 4, 4);
        let mut tournament = Tournament::new("Qualifying");
        tournament.initialize_structure(config.clone()).unwrap();
        let pairs = register(&mut tournament, 60);

        seeded_draw(&mut tournament, &config, &pairs);

        // direct entries are the best 44, the next 16 play qualifying
        let q1: HashSet<EntrantId> = occupants(&tournament, Stage::Q1).into_iter().collect();
        assert_eq!(q1.len(), 16);
        assert!(pairs[44..].iter().all(|p| q1.contains(p)));

        let main = tournament.round(Stage::R64).unwrap();
        let bye = tournament.bye().unwrap();
        assert_eq!(main.count_occupied_by(bye), 16);
        assert!(main.empty_slots().is_empty());
        for p in &pairs[..44] {
            assert_eq!(main.count_occupied_by(*p), 1);
        }
        for index in 1..=4 {
            let placeholder = tournament.qualifier_placeholder(index).unwrap();
            assert_eq!(main.count_occupied_by(placeholder), 1);
        }

        // every reserved slot still holds its placeholder, never a bye
        for game in &main.games {
            for side in [tournament_draw::TeamSide::A, tournament_draw::TeamSide::B] {
                if let Some(index) = game.reserved_for(side) {
                    assert_eq!(game.slot(side), tournament.qualifier_placeholder(index));
                }
            }
        }
    }

    #[test]
    fn test_group_stage_draw() {
        let config = TournamentConfig::groups_knockout(4, 4, 2);
        let mut tournament = Tournament::new("Groups");
        tournament.initialize_structure(config.clone()).unwrap();
        let pairs = register(&mut tournament, 16);

        seeded_draw(&mut tournament, &config, &pairs);

        let groups = tournament.round(Stage::Groups).unwrap();
        assert_eq!(groups.pools.len(), 4);
        assert_eq!(groups.games.len(), 24);
        // best four seeds head separate pools
        for (index, pool) in groups.pools.iter().enumerate() {
            assert_eq!(pool.entrants.len(), 4);
            assert_eq!(pool.entrants[0], pairs[index]);
        }
        assert!(!tournament.round(Stage::Quarters).unwrap().has_entrants());
    }

    #[test]
    fn test_manual_group_stage_fills_pools_in_order() {
        let config = TournamentConfig::groups_knockout(2, 3, 1).with_draw_mode(DrawMode::Manual);
        let mut tournament = Tournament::new("Manual groups");
        tournament.initialize_structure(config.clone()).unwrap();
        let pairs = register(&mut tournament, 6);

        tournament
            .place_entrants(&pairs, &mut DrawStrategy::for_config(&config))
            .unwrap();

        let groups = tournament.round(Stage::Groups).unwrap();
        assert_eq!(groups.pools[0].entrants, pairs[..3].to_vec());
        assert_eq!(groups.pools[1].entrants, pairs[3..].to_vec());
        assert_eq!(groups.games.len(), 6);
    }

    #[test]
    fn test_manual_group_draw_leaves_knockout_to_pools() {
        let config = TournamentConfig::groups_knockout(2, 3, 1).with_draw_mode(DrawMode::Manual);
        let mut tournament = Tournament::new("Manual groups overflow");
        tournament.initialize_structure(config.clone()).unwrap();
        let pairs = register(&mut tournament, 8);

        tournament
            .place_entrants(&pairs, &mut DrawStrategy::for_config(&config))
            .unwrap();

        // the two extra pairs stay out of the final
        assert!(!tournament.round(Stage::Final).unwrap().has_entrants());

        let games: Vec<_> = tournament
            .round(Stage::Groups)
            .unwrap()
            .games
            .iter()
            .map(|g| g.id)
            .collect();
        for id in games {
            tournament
                .record_winner(id, Some(tournament_draw::TeamSide::A))
                .unwrap();
        }
        assert_eq!(tournament.propagate_winners().unwrap(), 2);
        assert_eq!(
            occupants(&tournament, Stage::Final),
            vec![pairs[0], pairs[3]]
        );
    }

    #[test]
    fn test_manual_qualification_consumes_rounds_in_order() {
        let config =
            TournamentConfig::qualif_knockout(4, 0, 4, 2, 0).with_draw_mode(DrawMode::Manual);
        let mut tournament = Tournament::new("Manual qualifying");
        tournament.initialize_structure(config.clone()).unwrap();
        let pairs = register(&mut tournament, 6);
        let q1 = tournament.qualifier_placeholder(1).unwrap();
        let q2 = tournament.qualifier_placeholder(2).unwrap();

        let mut order = pairs[2..].to_vec();
        order.extend([pairs[0], q1, pairs[1], q2]);
        tournament
            .place_entrants(&order, &mut DrawStrategy::for_config(&config))
            .unwrap();

        assert_eq!(occupants(&tournament, Stage::Q1), pairs[2..].to_vec());
        assert_eq!(
            occupants(&tournament, Stage::Semis),
            vec![pairs[0], q1, pairs[1], q2]
        );
    }

    #[test]
    fn test_invalid_config_reports_every_problem() {
        // seeds over main size, pre-qual not a power of two, seeds over
        // direct entries, qualifying seeds over the qualifying draw
        let config = TournamentConfig::qualif_knockout(8, 10, 12, 3, 20);
        let errors = config.validate();
        assert!(errors.len() >= 4, "got {errors:?}");

        let mut tournament = Tournament::new("Invalid");
        assert!(matches!(
            tournament.initialize_structure(config),
            Err(DrawError::InvalidConfig(_))
        ));
    }
}
