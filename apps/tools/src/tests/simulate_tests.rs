use shared::domain::PerformanceTier;

use super::*;

fn options(seed: u64, peek: bool) -> SimulationOptions {
    SimulationOptions {
        seed,
        think: Duration::from_millis(500),
        peek,
        best: None,
    }
}

#[test]
fn peeking_bot_never_misses() {
    let run = simulate(GameConfig::default(), &options(3, true)).expect("simulate");
    assert_eq!(run.report.score.errors, 0);
    assert_eq!(run.clicks, 20);
    assert!((9..=10).contains(&run.report.score.seconds));
    assert_eq!(run.report.tier, PerformanceTier::Excellent);
}

#[test]
fn forgetful_bot_still_clears_the_board() {
    let run = simulate(GameConfig::default(), &options(42, false)).expect("simulate");
    assert!(run.report.score.errors <= 10);
    assert_eq!(run.clicks % 2, 0);
    assert_eq!(run.clicks, 20 + 2 * run.report.score.errors);
}

#[test]
fn same_seed_plays_the_same_round() {
    let first = simulate(GameConfig::default(), &options(7, false)).expect("first");
    let second = simulate(GameConfig::default(), &options(7, false)).expect("second");
    assert_eq!(first.report, second.report);
    assert_eq!(first.clicks, second.clicks);
}

#[test]
fn first_finished_round_becomes_the_best() {
    let run = simulate(GameConfig::default(), &options(5, true)).expect("simulate");
    assert!(run.report.new_best);
    assert_eq!(run.persisted, vec![run.report.score]);
    assert_eq!(run.messages.len(), 2);
    assert!(run.messages[0].starts_with("Match Result\nGame Over!"));
    assert!(run.messages[1].starts_with("High Score\nNew High Score!"));
}

#[test]
fn unbeaten_stored_best_is_not_replaced() {
    let mut opts = options(5, false);
    opts.best = Some(Score::new(0, 1));
    let run = simulate(GameConfig::default(), &opts).expect("simulate");
    assert!(!run.report.new_best);
    assert!(run.persisted.is_empty());
    assert_eq!(run.report.best, Some(Score::new(0, 1)));
    assert_eq!(run.messages.len(), 1);
}

#[test]
fn single_pair_board_is_solved_in_two_clicks() {
    let config = GameConfig {
        rows: 1,
        columns: 2,
        kinds: vec![CardKind::Fire],
        ..GameConfig::default()
    };
    let run = simulate(config, &options(1, false)).expect("simulate");
    assert_eq!(run.clicks, 2);
    assert_eq!(run.report.score.errors, 0);
}

#[test]
fn memory_prefers_known_pairs() {
    let faces = vec![TileFace::Back; 4];
    let mut memory = Memory::default();
    memory.observe(1, CardKind::Water);
    memory.observe(3, CardKind::Water);
    assert_eq!(memory.first_pick(&faces), Some(1));

    let mut faces = faces;
    faces[1] = TileFace::Front(CardKind::Water);
    assert_eq!(memory.second_pick(&faces, 1, CardKind::Water), Some(3));
}
