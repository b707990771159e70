//! Episode mechanics between arbitrary agents

use qtictactoe::{
    Game, GameOutcome, PlayerId, Rewards,
    adapters::{OptimalAgent, RandomAgent},
    engine::PLAYER_MARKS,
    pipeline::{MetricsObserver, Observer, evaluate},
    tictactoe::Mark,
};
use rand::{SeedableRng, rngs::StdRng};

mod common;
use common::ScriptedAgent;

#[test]
fn test_marks_are_fixed_per_seat() {
    assert_eq!(PLAYER_MARKS, [Mark::O, Mark::X]);

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let mut p1 = RandomAgent::with_seed("p1", 1);
        let mut p2 = RandomAgent::with_seed("p2", 2);
        let record = Game::new(&mut p1, &mut p2, Rewards::default(), &mut rng)
            .play()
            .unwrap();
        for mv in &record.moves {
            assert_eq!(mv.mark, PLAYER_MARKS[mv.player.index()]);
        }
        assert_eq!(record.moves[0].player, record.starting_player);
    }
}

#[test]
fn test_moves_alternate_and_match_final_board() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut p1 = RandomAgent::with_seed("p1", 10);
    let mut p2 = RandomAgent::with_seed("p2", 20);
    for _ in 0..100 {
        let record = Game::new(&mut p1, &mut p2, Rewards::default(), &mut rng)
            .play()
            .unwrap();
        assert!(record.moves.windows(2).all(|w| w[0].player != w[1].player));
        assert_eq!(record.moves.len(), record.final_board.occupied_count());
        for mv in &record.moves {
            assert_eq!(record.final_board.get(mv.position), mv.mark.to_cell());
        }
        if let GameOutcome::Win(winner) = record.outcome {
            assert!(record.final_board.has_won(PLAYER_MARKS[winner.index()]));
            assert_eq!(record.moves.last().unwrap().player, winner);
        } else {
            assert!(record.final_board.is_full());
        }
    }
}

#[test]
fn test_each_agent_gets_exactly_one_reward_per_episode() {
    let mut p1 = ScriptedAgent::new("p1", &[0, 1, 2]);
    let mut p2 = ScriptedAgent::new("p2", &[3, 4, 5]);
    let rewards = Rewards {
        win: 2.0,
        lose: -3.0,
        tie: 0.25,
    };

    for starter in [PlayerId::Player1, PlayerId::Player2] {
        Game::with_starting_player(&mut p1, &mut p2, rewards, starter)
            .play()
            .unwrap();
    }

    assert_eq!(p1.episodes, 2);
    assert_eq!(p1.rewards, vec![2.0, -3.0]);
    assert_eq!(p2.rewards, vec![-3.0, 2.0]);
}

#[test]
fn test_optimal_agent_never_loses_to_random() {
    let mut optimal = OptimalAgent::new("Optimal").with_seed(3);
    let mut random = RandomAgent::with_seed("Random", 4);
    let mut rng = StdRng::seed_from_u64(8);

    let result = evaluate(&mut optimal, &mut random, 300, Rewards::default(), &mut rng).unwrap();

    assert_eq!(result.games, 300);
    assert_eq!(result.losses, 0);
    assert!(result.wins > result.draws);
}

#[test]
fn test_metrics_observer_tracks_games() {
    let mut observer = MetricsObserver::new();
    let mut rng = StdRng::seed_from_u64(12);
    let mut p1 = RandomAgent::with_seed("p1", 1);
    let mut p2 = RandomAgent::with_seed("p2", 2);

    for game_num in 0..40 {
        let record = Game::new(&mut p1, &mut p2, Rewards::default(), &mut rng)
            .play()
            .unwrap();
        observer.on_game_end(game_num, &record).unwrap();
    }

    assert_eq!(observer.total_games(), 40);
    assert_eq!(
        observer.wins(PlayerId::Player1) + observer.wins(PlayerId::Player2) + observer.draws(),
        40
    );
    let length = observer.average_game_length();
    assert!((5.0..=9.0).contains(&length), "{length}");
}
