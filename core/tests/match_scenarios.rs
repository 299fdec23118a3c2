use lightcycle_core::{
    Cell, ConfigError, Difficulty, DirectionalIntent, GameMode, Heading, Match, MatchConfig,
    MatchStatus, TickOutcome,
};

fn new_match(mode: &str, difficulty: Option<&str>) -> Match {
    let config = MatchConfig::parse::<&str>(mode, difficulty, &[])
        .unwrap_or_else(|err| panic!("config {mode}: {err}"));
    Match::new(config)
}

fn xorshift(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

#[test]
fn head_on_two_player_meets_at_tick_thirty_and_ends_at_thirty_one() {
    let mut game = new_match("two_player", None);

    for tick in 1..=30 {
        assert_eq!(game.tick(), TickOutcome::Advanced, "tick {tick}");
    }
    // Both heads share the centre cell; heads never block each other.
    assert_eq!(game.agents()[0].position(), Cell::new(400, 300));
    assert_eq!(game.agents()[1].position(), Cell::new(400, 300));
    game.validate().expect("shared head cell is a valid running state");

    let outcome = game.tick();
    assert_eq!(outcome, TickOutcome::Finished { winners: vec![] });

    let snapshot = game.snapshot();
    assert_eq!(snapshot.tick, 31);
    assert_eq!(snapshot.status, MatchStatus::Over);
    assert_eq!(snapshot.agents[0].position, Cell::new(410, 300));
    assert_eq!(snapshot.agents[1].position, Cell::new(390, 300));
    for agent in &snapshot.agents {
        assert_eq!(agent.trail.len(), 32);
        assert!(!agent.alive);
    }
    assert_eq!(snapshot.outcome_text().as_deref(), Some("No one wins!"));
    game.validate().expect("finished match is consistent");
}

#[test]
fn trail_length_tracks_ticks() {
    let mut game = new_match("dual_ai", Some("hard"));
    let mut ticks = 0;
    while game.tick() != TickOutcome::Idle {
        ticks += 1;
        for agent in game.agents() {
            assert_eq!(agent.trail().len(), 1 + ticks, "agent {}", agent.index());
        }
    }
    assert!(game.is_over());
}

#[test]
fn random_intents_never_reverse() {
    for seed in [0x1234_5678u32, 0xDEAD_BEEF, 0x0BAD_F00D, 7] {
        let mut rng = seed;
        let mut game = new_match("two_player", None);
        game.toggle_god_mode();

        for _ in 0..400 {
            for agent_index in 0..2 {
                let heading = Heading::ALL[(xorshift(&mut rng) % 4) as usize];
                game.submit_intent(DirectionalIntent::new(agent_index, heading));
            }
            let previous: Vec<Heading> = game.agents().iter().map(|a| a.moved_heading()).collect();
            if game.tick() == TickOutcome::Idle {
                break;
            }
            for (agent, before) in game.agents().iter().zip(previous) {
                assert!(
                    !agent.moved_heading().is_reverse_of(before),
                    "seed {seed:#x}: agent {} reversed at tick {}",
                    agent.index(),
                    game.tick_count()
                );
            }
            game.validate()
                .unwrap_or_else(|violation| panic!("seed {seed:#x}: {violation}"));
        }
    }
}

#[test]
fn reset_restores_spawns_for_every_mode() {
    for mode in GameMode::ALL {
        let config = MatchConfig::new::<&str>(mode, Some(Difficulty::Medium), &[]).unwrap();
        let mut game = Match::new(config);
        let fresh = game.snapshot();

        for _ in 0..12 {
            game.tick();
        }
        game.apply_command("GOD");
        game.reset();
        assert_eq!(game.snapshot(), fresh, "mode {mode}");

        game.reset();
        assert_eq!(game.snapshot(), fresh, "mode {mode}");
        assert_eq!(fresh.agents.len(), mode.agent_count());
        assert_eq!(fresh.agents[0].trail, vec![Cell::new(100, 300)]);
        assert_eq!(fresh.agents[1].trail, vec![Cell::new(700, 300)]);
    }
}

#[test]
fn both_leaving_board_same_tick_has_no_winner() {
    let mut game = new_match("two_player", None);
    assert!(game.submit_intent(DirectionalIntent::new(0, Heading::Up)));
    assert!(game.submit_intent(DirectionalIntent::new(1, Heading::Up)));

    let mut last = TickOutcome::Advanced;
    for _ in 0..31 {
        last = game.tick();
    }
    assert_eq!(last, TickOutcome::Finished { winners: vec![] });
    assert_eq!(game.tick_count(), 31);
    assert_eq!(game.agents()[0].position(), Cell::new(100, -10));
    assert_eq!(game.agents()[1].position(), Cell::new(700, -10));
}

#[test]
fn god_mode_survives_the_wall() {
    let mut game = new_match("two_player", None);
    assert_eq!(
        game.apply_command("  God "),
        Some(lightcycle_core::DebugCommand::GodMode)
    );
    assert!(game.god_mode());
    game.submit_intent(DirectionalIntent::new(0, Heading::Up));

    // Agent 1 rides left along y=300 and hits agent 0's spawn cell at tick 60.
    let mut finished_at = None;
    for _ in 0..100 {
        if let TickOutcome::Finished { winners } = game.tick() {
            assert_eq!(winners, vec![0]);
            finished_at = Some(game.tick_count());
            break;
        }
    }
    assert_eq!(finished_at, Some(60));
    let snapshot = game.snapshot();
    assert!(snapshot.agents[0].alive);
    assert!(!snapshot.agents[0].position.in_bounds());
    assert_eq!(snapshot.outcome_text().as_deref(), Some("Player 1 wins!"));
}

#[test]
fn without_god_mode_the_wall_wins() {
    let mut game = new_match("two_player", None);
    game.submit_intent(DirectionalIntent::new(0, Heading::Up));
    let mut outcome = TickOutcome::Advanced;
    while outcome == TickOutcome::Advanced {
        outcome = game.tick();
    }
    assert_eq!(outcome, TickOutcome::Finished { winners: vec![1] });
    assert_eq!(game.tick_count(), 31);
}

#[test]
fn commands_toggle_and_unknown_are_ignored() {
    let mut game = new_match("single_ai", Some("hard"));
    assert!(game.ai_targets_player());
    assert!(game.apply_command("aiNoTarget").is_some());
    assert!(!game.ai_targets_player());
    assert!(game.apply_command("AINOTARGET").is_some());
    assert!(game.ai_targets_player());

    let before = game.snapshot();
    assert_eq!(game.apply_command("noclip"), None);
    assert_eq!(game.snapshot(), before);
}

#[test]
fn configure_rejects_bad_input_and_keeps_match() {
    let mut game = new_match("single_ai", Some("easy"));
    game.tick();
    let before = game.snapshot();

    assert_eq!(
        game.configure::<&str>("dual_ai", None, &[]),
        Err(ConfigError::MissingDifficulty(GameMode::DualAi))
    );
    assert!(matches!(
        game.configure::<&str>("squash", Some("easy"), &[]),
        Err(ConfigError::UnknownMode(_))
    ));
    assert!(matches!(
        game.configure::<&str>("dual_ai", Some("insane"), &[]),
        Err(ConfigError::UnknownDifficulty(_))
    ));
    assert_eq!(game.snapshot(), before);

    game.configure("dual_ai", Some("Extreme"), &["Flynn"]).unwrap();
    let snapshot = game.snapshot();
    assert_eq!(snapshot.tick, 0);
    assert_eq!(snapshot.difficulty, Some(Difficulty::Extreme));
    assert_eq!(snapshot.agents.len(), 3);
    assert_eq!(snapshot.agents[0].name, "Flynn");
}

#[test]
fn snapshot_is_detached_from_live_state() {
    let mut game = new_match("two_player", None);
    let snapshot = game.snapshot();
    game.tick();
    assert_eq!(snapshot.tick, 0);
    assert_eq!(snapshot.agents[0].trail.len(), 1);
    assert_eq!(game.snapshot().agents[0].trail.len(), 2);
}

#[test]
fn snapshot_serializes_to_json() {
    let game = new_match("dual_ai", Some("medium"));
    let value = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(value["mode"], "dual_ai");
    assert_eq!(value["difficulty"], "medium");
    assert_eq!(value["status"], "running");
    assert_eq!(value["agents"][1]["controller"]["kind"], "ai");
    assert_eq!(value["agents"][1]["controller"]["role"], "primary");
    assert_eq!(value["agents"][2]["heading"], "down");
    assert_eq!(value["agents"][0]["position"]["x"], 100);
}

#[test]
fn ai_only_matches_terminate() {
    for mode in ["single_ai", "dual_ai"] {
        for difficulty in Difficulty::ALL {
            let mut game = new_match(mode, Some(difficulty.as_str()));
            // Keep the human alive so the AIs have to die on their own.
            game.toggle_god_mode();
            let mut ticks = 0;
            while !game.is_over() && ticks < 10_000 {
                game.tick();
                game.validate()
                    .unwrap_or_else(|violation| panic!("{mode}/{difficulty}: {violation}"));
                ticks += 1;
            }
            assert!(game.is_over(), "{mode}/{difficulty} did not finish");
        }
    }
}
