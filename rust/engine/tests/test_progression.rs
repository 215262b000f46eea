use quickdraw_engine::cards::full_deck;
use quickdraw_engine::rules::{
    calculate_leftover_penalty, calculate_level_goal, calculate_time_bonus, cycle_phase,
    phase_speed, star_rating, Phase, ScoringRules,
};

#[test]
fn time_bonus_steps_down_at_each_boundary() {
    assert_eq!(calculate_time_bonus(0), 200);
    assert_eq!(calculate_time_bonus(59), 200);
    assert_eq!(calculate_time_bonus(60), 100);
    assert_eq!(calculate_time_bonus(89), 100);
    assert_eq!(calculate_time_bonus(90), 50);
    assert_eq!(calculate_time_bonus(119), 50);
    assert_eq!(calculate_time_bonus(120), 0);
    assert_eq!(calculate_time_bonus(u32::MAX), 0);
}

#[test]
fn time_bonus_is_non_increasing() {
    let mut last = u32::MAX;
    for s in 0..300 {
        let b = calculate_time_bonus(s);
        assert!(b <= last, "bonus grew at {}s", s);
        last = b;
    }
}

#[test]
fn leftover_penalty_is_ten_per_value() {
    assert_eq!(calculate_leftover_penalty(&[]), 0);
    let cards: Vec<_> = ["2h", "Kd", "As"].iter().map(|s| s.parse().unwrap()).collect();
    assert_eq!(calculate_leftover_penalty(&cards), 10 * (2 + 13 + 14));
    // (2+..+14) * 4 suits * 10
    assert_eq!(calculate_leftover_penalty(&full_deck()), 4160);
}

#[test]
fn level_goals_follow_the_ladder() {
    assert_eq!(calculate_level_goal(1), 1000);
    assert_eq!(calculate_level_goal(2), 1500);
    assert_eq!(calculate_level_goal(3), 2000);
    assert_eq!(calculate_level_goal(4), 2300);
    assert_eq!(calculate_level_goal(15), 5600);
    assert_eq!(calculate_level_goal(16), 5800);
    assert_eq!(calculate_level_goal(20), 6600);
    assert_eq!(calculate_level_goal(0), calculate_level_goal(1));
}

#[test]
fn level_goal_never_decreases() {
    for level in 1..200 {
        assert!(calculate_level_goal(level + 1) >= calculate_level_goal(level));
    }
}

#[test]
fn level_goal_saturates_for_deep_levels() {
    assert_eq!(calculate_level_goal(30_000_000), u32::MAX);
    assert_eq!(calculate_level_goal(u32::MAX), u32::MAX);

    let mut last = 0;
    for level in (21_000_000..22_000_000).step_by(10_007).chain([u32::MAX - 1, u32::MAX]) {
        let goal = calculate_level_goal(level);
        assert!(goal >= last, "goal dropped at level {}", level);
        last = goal;
    }

    let steep = ScoringRules {
        goal_step: u32::MAX,
        ..ScoringRules::default()
    };
    assert_eq!(steep.level_goal(5), u32::MAX);
    assert_eq!(steep.level_goal(40), u32::MAX);
}

#[test]
fn phases_cycle_every_fifteen_levels() {
    let expected = |level: u32| match (level - 1) % 15 {
        0..=4 => Phase::Static,
        5..=9 => Phase::Conveyor,
        _ => Phase::Falling,
    };
    for level in 1..=60 {
        assert_eq!(cycle_phase(level), expected(level), "level {}", level);
    }
}

#[test]
fn speeds_restart_with_each_phase() {
    assert_eq!(phase_speed(1), 0.0);
    assert!((phase_speed(6) - 0.4).abs() < 1e-9);
    assert!((phase_speed(10) - 0.8).abs() < 1e-9);
    assert!((phase_speed(11) - 0.6).abs() < 1e-9);
    assert!((phase_speed(15) - 1.2).abs() < 1e-9);
    assert_eq!(phase_speed(16), 0.0);
    assert!((phase_speed(21) - 0.4).abs() < 1e-9);
}

#[test]
fn star_rating_thresholds() {
    assert_eq!(star_rating(0), 1);
    assert_eq!(star_rating(499), 1);
    assert_eq!(star_rating(500), 2);
    assert_eq!(star_rating(1500), 3);
    assert_eq!(star_rating(3000), 4);
    assert_eq!(star_rating(5000), 5);
    assert_eq!(star_rating(i64::MAX), 5);
}

#[test]
fn custom_rules_override_defaults() {
    let rules = ScoringRules {
        flat_goals: vec![500],
        goal_step: 100,
        goal_breakpoint: 3,
        late_goal_step: 50,
        leftover_multiplier: 1,
        ..ScoringRules::default()
    };
    assert!(rules.validate().is_ok());
    assert_eq!(rules.level_goal(1), 500);
    assert_eq!(rules.level_goal(3), 700);
    assert_eq!(rules.level_goal(5), 800);
    assert_eq!(rules.leftover_penalty(&full_deck()), 416);
}

#[test]
fn invalid_rules_are_rejected() {
    let unordered = ScoringRules {
        time_bonus_steps: vec![(90, 100), (60, 200)],
        ..ScoringRules::default()
    };
    assert!(unordered.validate().is_err());

    let cramped = ScoringRules {
        cycle_length: 10,
        phase_length: 5,
        ..ScoringRules::default()
    };
    assert!(cramped.validate().is_err());

    let no_goals = ScoringRules {
        flat_goals: vec![],
        ..ScoringRules::default()
    };
    assert!(no_goals.validate().is_err());
}
