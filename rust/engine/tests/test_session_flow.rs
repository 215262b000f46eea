use quickdraw_engine::cards::Card;
use quickdraw_engine::errors::{GateError, SessionError};
use quickdraw_engine::gate::SelectionGate;
use quickdraw_engine::hand::HandCategory;
use quickdraw_engine::rules::{calculate_leftover_penalty, Phase, ScoringRules};
use quickdraw_engine::session::{GameMode, PowerUp, PowerUpOutcome, SessionState};

fn pick(gate: &SelectionGate, cards: &[Card]) {
    for card in cards {
        assert!(gate.select(*card).is_accepted(), "{} rejected", card);
    }
}

fn parse(text: &str) -> Vec<Card> {
    text.split_whitespace().map(|t| t.parse().unwrap()).collect()
}

#[test]
fn classic_hand_scores_and_stays_out_of_the_deck() {
    let gate = SelectionGate::new(SessionState::new(GameMode::Classic, 10));
    let royal = parse("10h Jh Qh Kh Ah");
    pick(&gate, &royal);

    let preview = gate.current_hand().expect("five cards held");
    assert_eq!(preview.category, HandCategory::RoyalFlush);

    let result = gate.submit_hand().unwrap();
    assert_eq!(result.total_points, 2500 + 60);

    let snap = gate.snapshot();
    assert_eq!(snap.score, 2560);
    assert_eq!(snap.level_score, 2560);
    assert_eq!(snap.hands_played, 1);
    assert!(snap.selected_cards.is_empty());
    assert_eq!(snap.deck.len(), 47);
    assert_eq!(snap.used_cards.len(), 5);
    assert!(royal.iter().all(|c| !snap.deck.contains(c)));
    assert!(gate.with_session(|s| s.check_invariants()).unwrap().is_ok());
}

#[test]
fn recycling_modes_return_played_cards() {
    for mode in [GameMode::BlitzFallingCards, GameMode::BlitzConveyorBelt, GameMode::Ssc] {
        let gate = SelectionGate::new(SessionState::new(mode, 10));
        let hand = parse("As Ad Ac 7s 7h");
        pick(&gate, &hand);
        assert_eq!(gate.snapshot().deck.len(), 47);

        let result = gate.submit_hand().unwrap();
        assert_eq!(result.category, HandCategory::FullHouse);
        assert_eq!(result.value_bonus, 56);

        let snap = gate.snapshot();
        assert_eq!(snap.deck.len(), 52, "{mode}");
        assert!(snap.used_cards.is_empty());
        assert!(gate.with_session(|s| s.check_invariants()).unwrap().is_ok());
    }
}

#[test]
fn fresh_deals_are_reproducible_per_seed() {
    let a = SessionState::new(GameMode::Classic, 31).snapshot();
    let b = SessionState::new(GameMode::Classic, 31).snapshot();
    let c = SessionState::new(GameMode::Classic, 32).snapshot();
    assert_eq!(a.deck, b.deck);
    assert_ne!(a.deck, c.deck);
}

#[test]
fn completing_a_level_applies_bonus_and_penalty() {
    let mut s = SessionState::new(GameMode::Classic, 1);
    let deck = s.deck().to_vec();
    let gate = SelectionGate::new(s);
    pick(&gate, &deck[..5]);
    gate.submit_hand().unwrap();
    let score = gate.snapshot().score;

    pick(&gate, &gate.snapshot().deck[..2]);
    let held = gate.snapshot().selected_cards;
    let summary = gate.complete_level(45).unwrap();
    assert_eq!(summary.time_bonus, 200);
    assert_eq!(summary.leftover_penalty, calculate_leftover_penalty(&held));
    assert_eq!(summary.goal, 1000);
    assert_eq!(summary.cleared, summary.level_score >= 1000);
    assert_eq!(
        gate.snapshot().score,
        (score + 200 - summary.leftover_penalty as i64).max(0)
    );

    s = gate.into_session();
    assert_eq!(s.advance_level(), 2);
    assert_eq!(s.level_score(), 0);
    assert_eq!(s.deck().len(), 52);
    assert!(s.used_cards().is_empty());
    assert!(s.check_invariants().is_ok());
}

#[test]
fn score_never_drops_below_zero() {
    let gate = SelectionGate::new(SessionState::new(GameMode::Classic, 2));
    let deck = gate.snapshot().deck;
    pick(&gate, &deck[..4]);
    let summary = gate.complete_level(500).unwrap();
    assert_eq!(summary.time_bonus, 0);
    assert_eq!(summary.leftover_penalty, calculate_leftover_penalty(&deck[..4]));
    assert!(summary.leftover_penalty > 0);
    assert_eq!(gate.snapshot().score, 0);
}

#[test]
fn only_held_cards_count_toward_the_leftover_penalty() {
    let gate = SelectionGate::new(SessionState::new(GameMode::Ssc, 2));
    assert_eq!(gate.complete_level(200).unwrap().leftover_penalty, 0);
    gate.advance_level().unwrap();

    let held = parse("Kh Kd 2c");
    pick(&gate, &held);
    let summary = gate.complete_level(200).unwrap();
    assert_eq!(summary.leftover_penalty, 10 * (13 + 13 + 2));
}

#[test]
fn ssc_reports_phase_and_speed() {
    let mut s = SessionState::new(GameMode::Ssc, 5);
    assert_eq!(s.current_phase(), Some(Phase::Static));
    for _ in 0..5 {
        s.advance_level();
    }
    assert_eq!(s.level(), 6);
    assert_eq!(s.current_phase(), Some(Phase::Conveyor));
    assert!((s.current_speed().unwrap() - 0.4).abs() < 1e-9);

    let classic = SessionState::new(GameMode::Classic, 5);
    assert_eq!(classic.current_speed(), None);
}

#[test]
fn end_game_rates_the_final_score() {
    let gate = SelectionGate::new(SessionState::new(GameMode::BlitzFallingCards, 1));
    pick(&gate, &parse("10s Js Qs Ks As"));
    gate.submit_hand().unwrap();
    let summary = gate.end_game().unwrap();
    assert_eq!(summary.score, 2560);
    assert_eq!(summary.hands_played, 1);
    assert_eq!(summary.stars, 3);
    assert!(!gate.snapshot().is_playing);
    assert_eq!(
        gate.submit_hand(),
        Err(GateError::Session(SessionError::NotPlaying))
    );
}

#[test]
fn reshuffle_and_add_time_power_ups() {
    let gate = SelectionGate::new(SessionState::new(GameMode::Classic, 77));
    let before = gate.snapshot().deck;
    assert_eq!(
        gate.apply_power_up(PowerUp::Reshuffle).unwrap(),
        PowerUpOutcome::Reshuffled
    );
    let after = gate.snapshot().deck;
    assert_ne!(before, after);
    let mut a = before.clone();
    let mut b = after.clone();
    a.sort();
    b.sort();
    assert_eq!(a, b);

    assert_eq!(
        gate.apply_power_up(PowerUp::AddTime).unwrap(),
        PowerUpOutcome::TimeAdded(15)
    );
}

#[test]
fn guaranteed_hand_replaces_the_held_cards() {
    for mode in GameMode::ALL {
        let gate = SelectionGate::new(SessionState::new(mode, 40));
        let deck = gate.snapshot().deck;
        pick(&gate, &deck[..2]);

        let outcome = gate
            .apply_power_up(PowerUp::GuaranteedHand(HandCategory::FourOfAKind))
            .unwrap();
        let PowerUpOutcome::HandDealt(hand) = outcome else {
            panic!("expected a dealt hand, got {:?}", outcome);
        };
        let snap = gate.snapshot();
        assert_eq!(snap.selected_cards, hand);
        assert_eq!(snap.deck.len(), 47, "{mode}");
        assert_eq!(
            gate.current_hand().unwrap().category,
            HandCategory::FourOfAKind
        );
        assert!(gate.with_session(|s| s.check_invariants()).unwrap().is_ok());

        gate.submit_hand().unwrap();
        assert!(gate.with_session(|s| s.check_invariants()).unwrap().is_ok());
    }
}

#[test]
fn unavailable_guaranteed_hand_leaves_state_alone() {
    let gate = SelectionGate::new(SessionState::new(GameMode::Classic, 8));
    // Strip every ten so no royal flush remains
    let tens = parse("10h 10d 10c 10s");
    let filler: Vec<Card> = gate
        .snapshot()
        .deck
        .into_iter()
        .filter(|c| !tens.contains(c))
        .take(1)
        .collect();
    pick(&gate, &tens);
    pick(&gate, &filler);
    gate.submit_hand().unwrap();

    let before = gate.snapshot();
    assert_eq!(
        gate.apply_power_up(PowerUp::GuaranteedHand(HandCategory::RoyalFlush)),
        Err(GateError::Session(SessionError::PowerUpUnavailable {
            category: HandCategory::RoyalFlush
        }))
    );
    assert_eq!(gate.snapshot(), before);
}

#[test]
fn custom_rules_flow_into_the_session() {
    let rules = ScoringRules {
        add_time_seconds: 30,
        flat_goals: vec![10],
        ..ScoringRules::default()
    };
    let gate = SelectionGate::new(SessionState::with_rules(GameMode::Classic, 3, rules));
    assert_eq!(
        gate.apply_power_up(PowerUp::AddTime).unwrap(),
        PowerUpOutcome::TimeAdded(30)
    );
    assert_eq!(gate.complete_level(0).unwrap().goal, 10);
}

#[test]
fn a_level_is_scored_only_once() {
    let gate = SelectionGate::new(SessionState::new(GameMode::Classic, 6));
    let first = gate.complete_level(30).unwrap();
    assert_eq!(first.time_bonus, 200);
    assert_eq!(gate.snapshot().score, 200);
    assert!(gate.snapshot().level_closed);

    assert_eq!(
        gate.complete_level(30),
        Err(GateError::Session(SessionError::LevelClosed { level: 1 }))
    );
    let card = gate.snapshot().deck[0];
    assert!(!gate.select(card).is_accepted());
    assert_eq!(
        gate.apply_power_up(PowerUp::Reshuffle),
        Err(GateError::Session(SessionError::LevelClosed { level: 1 }))
    );

    gate.advance_level().unwrap();
    gate.end_game().unwrap();
    assert_eq!(
        gate.complete_level(30),
        Err(GateError::Session(SessionError::NotPlaying))
    );
    assert_eq!(gate.snapshot().score, 200);
}

#[test]
fn paused_sessions_cannot_submit_or_spend_power_ups() {
    let gate = SelectionGate::new(SessionState::new(GameMode::BlitzFallingCards, 14));
    let deck = gate.snapshot().deck;
    pick(&gate, &deck[..5]);
    gate.set_paused(true).unwrap();

    let before = gate.snapshot();
    assert_eq!(
        gate.submit_hand(),
        Err(GateError::Session(SessionError::NotPlaying))
    );
    assert_eq!(
        gate.apply_power_up(PowerUp::GuaranteedHand(HandCategory::OnePair)),
        Err(GateError::Session(SessionError::NotPlaying))
    );
    assert_eq!(gate.snapshot(), before);

    gate.set_paused(false).unwrap();
    assert!(gate.submit_hand().is_ok());
}

#[test]
fn classic_used_list_includes_held_cards() {
    let gate = SelectionGate::new(SessionState::new(GameMode::Classic, 21));
    let deck = gate.snapshot().deck;
    pick(&gate, &deck[..3]);
    let snap = gate.snapshot();
    assert_eq!(snap.used_cards, snap.selected_cards);

    let recycling = SelectionGate::new(SessionState::new(GameMode::Ssc, 21));
    pick(&recycling, &deck[..3]);
    assert!(recycling.snapshot().used_cards.is_empty());
}
