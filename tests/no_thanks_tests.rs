//! Rules engine integration tests: scripted games and reachable-state
//! invariants.

use nothanks_mcts::games::no_thanks::{group_runs, GameConfig, NoThanksAction, NoThanksState};
use nothanks_mcts::{ActionError, GameState, PlayerId};
use proptest::prelude::*;

use NoThanksAction::{Pass, Take};

fn check_invariants(state: &NoThanksState) {
    let config = *state.config();
    let players: Vec<PlayerId> = PlayerId::all(config.player_count).collect();

    // Coins are conserved.
    let held: u32 = players.iter().map(|&p| state.player_coins(p)).sum();
    assert_eq!(held + state.coins_in_play(), config.total_coins());

    // Unseen flags are the undealt cards plus the omitted ones.
    assert_eq!(
        state.unseen_cards(),
        (state.cards_in_deck() + config.omitted_cards) as usize
    );

    // Every dealt card is in play or owned by exactly one player.
    for card in config.min_card..=config.max_card {
        let owners = players
            .iter()
            .filter(|&&p| state.player_cards(p).contains(&card))
            .count();
        let in_play = state.card_in_play() == Some(card);

        if state.is_undealt(card) {
            assert_eq!(owners, 0);
            assert!(!in_play);
        } else {
            assert_eq!(owners + in_play as usize, 1, "card {} misplaced", card);
        }
    }

    // Runs always match the owned cards.
    for &p in &players {
        let expected = group_runs(state.player_cards(p).iter().copied());
        assert_eq!(state.player_runs(p), expected.as_slice());
    }

    // Legal actions follow the acting player's purse.
    if state.is_terminal() {
        assert!(state.legal_actions().is_empty());
        assert_eq!(state.card_in_play(), None);
    } else if state.player_coins(state.acting_player()) == 0 {
        assert_eq!(state.legal_actions(), vec![Take]);
    } else {
        assert_eq!(state.legal_actions(), vec![Take, Pass]);
    }
}

// =============================================================================
// Scripted Games
// =============================================================================

#[test]
fn test_scripted_game_scores() {
    let config = GameConfig::new(3, 7, 2, 3, 0).unwrap();
    let mut state = NoThanksState::new(config, 2024).unwrap();
    let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));

    // Four passes build a pool of 4 coins, then player 0 takes every card:
    // the pool on the first and nothing on the rest.
    let script = [Pass, Pass, Pass, Pass, Take, Take, Take, Take, Take];
    for action in script {
        state.apply(action).unwrap();
        check_invariants(&state);
    }

    assert!(state.is_terminal());
    assert_eq!(state.player_cards(p0).len(), 5);
    assert_eq!(state.player_runs(p0), &[vec![3, 4, 5, 6, 7]]);
    assert_eq!(state.player_coins(p0), 5);
    assert_eq!(state.player_coins(p1), 1);

    // 3 - 5 against 0 - 1
    assert_eq!(state.scores().as_slice(), &[-2, -1]);
    assert_eq!(state.winner(), Some(p0));
    assert_eq!(state.terminal_values().as_slice(), &[1.0, -1.0]);
}

#[test]
fn test_pass_then_take_changes_hands() {
    let config = GameConfig::new(3, 7, 3, 2, 0).unwrap();
    let mut state = NoThanksState::with_first_card(config, 6, 1).unwrap();

    state.apply(Pass).unwrap();
    state.apply(Pass).unwrap();
    assert_eq!(state.acting_player(), PlayerId::new(2));
    assert_eq!(state.coins_in_play(), 2);

    state.apply(Take).unwrap();
    check_invariants(&state);

    let p2 = PlayerId::new(2);
    assert!(state.player_cards(p2).contains(&6));
    assert_eq!(state.player_coins(p2), 4);
    assert_eq!(state.acting_player(), p2);
    assert_eq!(state.scores()[p2], 6 - 4);
}

#[test]
fn test_illegal_action_is_an_error() {
    let config = GameConfig::new(3, 7, 2, 1, 0).unwrap();
    let mut state = NoThanksState::new(config, 8).unwrap();

    state.apply(Pass).unwrap();
    state.apply(Pass).unwrap();

    // Player 0 is out of coins now.
    let err = state.apply(Pass).unwrap_err();
    assert_eq!(
        err,
        ActionError::Illegal {
            action: "Pass".to_string(),
            player: PlayerId::new(0),
        }
    );
    check_invariants(&state);
}

#[test]
fn test_large_purses_conserve_coins() {
    let config = GameConfig::new(3, 7, 2, u32::MAX / 2, 0).unwrap();
    let mut state = NoThanksState::new(config, 6).unwrap();

    state.apply(Pass).unwrap();
    state.apply(Take).unwrap();
    check_invariants(&state);

    assert_eq!(state.player_coins(PlayerId::new(1)), u32::MAX / 2 + 1);
    assert!(GameConfig::new(3, 7, 2, u32::MAX, 0).is_err());
}

#[test]
fn test_first_card_is_uniform() {
    let config = GameConfig::new(3, 7, 2, 3, 2).unwrap();
    let mut counts = [0u32; 5];

    for seed in 0..5000 {
        let state = NoThanksState::new(config, seed).unwrap();
        let card = state.card_in_play().unwrap();
        counts[(card - 3) as usize] += 1;
    }

    for &count in &counts {
        assert!((850..=1150).contains(&count), "skewed draw: {:?}", counts);
    }
}

#[test]
fn test_random_games_always_finish() {
    let mut rng = nothanks_mcts::GameRng::new(77);

    for seed in 0..50 {
        let mut state = NoThanksState::new(GameConfig::default(), seed).unwrap();
        let mut moves = 0;
        while !state.is_terminal() {
            let actions = state.legal_actions();
            let action = *rng.choose(&actions).unwrap();
            state.apply(action).unwrap();
            moves += 1;
            assert!(moves < 10_000);
        }

        check_invariants(&state);
        let dealt: usize = PlayerId::all(3).map(|p| state.player_cards(p).len()).sum();
        assert_eq!(dealt, 24);

        let scores = state.scores();
        let winner = state.winner().unwrap();
        let best = scores.values().min().copied().unwrap();
        assert_eq!(scores[winner], best);
    }
}

#[test]
fn test_clone_state_survives_divergence() {
    let mut original = NoThanksState::new(GameConfig::default(), 5).unwrap();
    original.apply(Pass).unwrap();
    original.apply(Take).unwrap();
    let snapshot = original.clone();

    let mut copy = original.clone_state();
    while !copy.is_terminal() {
        copy.apply(Take).unwrap();
    }

    let p1 = PlayerId::new(1);
    assert_eq!(original.player_cards(p1), snapshot.player_cards(p1));
    assert_eq!(original.player_runs(p1), snapshot.player_runs(p1));
    assert_eq!(original.player_coins(p1), snapshot.player_coins(p1));
    assert_eq!(original.cards_in_deck(), snapshot.cards_in_deck());
    assert_eq!(original.unseen_cards(), snapshot.unseen_cards());
    assert!(!original.is_terminal());
}

// =============================================================================
// Property Tests
// =============================================================================

fn config_strategy() -> impl Strategy<Value = GameConfig> {
    (2usize..=5, 1u32..10, 2u32..20, 0u32..5)
        .prop_flat_map(|(players, min, size, coins)| {
            (Just(players), Just(min), Just(size), Just(coins), 0..size - 1)
        })
        .prop_map(|(players, min, size, coins, omitted)| {
            GameConfig::new(min, min + size - 1, players, coins, omitted).unwrap()
        })
}

proptest! {
    #[test]
    fn prop_invariants_hold_for_any_play(
        config in config_strategy(),
        seed in any::<u64>(),
        script in proptest::collection::vec(any::<bool>(), 0..120),
    ) {
        let mut state = NoThanksState::new(config, seed).unwrap();
        check_invariants(&state);

        let mut choices = script.into_iter();
        while !state.is_terminal() {
            let wants_pass = choices.next().unwrap_or(false);
            let action = if wants_pass && state.is_legal(Pass) { Pass } else { Take };
            state.apply(action).unwrap();
            check_invariants(&state);
        }

        let owned: u32 = PlayerId::all(config.player_count)
            .map(|p| state.player_cards(p).len() as u32)
            .sum();
        prop_assert_eq!(owned, config.dealt_cards());
        prop_assert!(state.winner().is_some());
    }
}
