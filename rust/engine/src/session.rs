use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};
use crate::deck::Deck;
use crate::errors::SessionError;
use crate::gate::RejectReason;
use crate::hand::{evaluate_hand, HandCategory, HandResult};
use crate::rules::{Phase, ScoringRules};
use crate::synth;

/// Session-wide rule switch, fixed when the game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Picked cards are discarded for the rest of the level
    #[serde(rename = "classic")]
    Classic,
    /// Timed mode with falling cards; picked cards recycle
    #[serde(rename = "blitz_fc")]
    BlitzFallingCards,
    /// Timed mode with a conveyor belt; picked cards recycle
    #[serde(rename = "blitz_cb")]
    BlitzConveyorBelt,
    /// Level ladder cycling through static, conveyor and falling phases
    #[serde(rename = "ssc")]
    Ssc,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Classic,
        GameMode::BlitzFallingCards,
        GameMode::BlitzConveyorBelt,
        GameMode::Ssc,
    ];

    pub fn id(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::BlitzFallingCards => "blitz_fc",
            GameMode::BlitzConveyorBelt => "blitz_cb",
            GameMode::Ssc => "ssc",
        }
    }

    /// Recycling modes put played cards back into the deck and never fill the used list.
    pub fn recycles_cards(self) -> bool {
        !matches!(self, GameMode::Classic)
    }

    pub fn has_phase_schedule(self) -> bool {
        matches!(self, GameMode::Ssc)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameMode::ALL
            .iter()
            .copied()
            .find(|m| m.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown game mode: {}", s))
    }
}

/// One-shot helpers the player can spend during a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUp {
    Reshuffle,
    AddTime,
    GuaranteedHand(HandCategory),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PowerUpOutcome {
    Reshuffled,
    TimeAdded(u32),
    HandDealt(Vec<Card>),
}

/// End-of-level accounting returned by [`SessionState::complete_level`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    pub level: u32,
    pub goal: u32,
    pub level_score: i64,
    pub time_bonus: u32,
    pub leftover_penalty: u32,
    pub cleared: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub score: i64,
    pub hands_played: u32,
    pub level: u32,
    pub stars: u8,
}

/// Read-only projection handed to collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub mode: GameMode,
    pub deck: Vec<Card>,
    pub selected_cards: Vec<Card>,
    /// Cards taken out of play this level. In classic mode this includes the
    /// cards currently held; recycling modes leave it empty.
    pub used_cards: Vec<Card>,
    pub is_playing: bool,
    pub is_paused: bool,
    /// Level summary already applied; cleared by `advance_level`
    pub level_closed: bool,
    pub level: u32,
    pub score: i64,
    pub level_score: i64,
    pub hands_played: u32,
    pub cards_selected: u32,
}

/// Mutable state of one game. Only the selection gate and the routines in
/// this module write to it.
#[derive(Debug, Clone)]
pub struct SessionState {
    mode: GameMode,
    rules: ScoringRules,
    deck: Deck,
    selected: Vec<Card>,
    used: Vec<Card>,
    is_playing: bool,
    is_paused: bool,
    level_closed: bool,
    level: u32,
    score: i64,
    level_score: i64,
    hands_played: u32,
    cards_selected: u32,
}

impl SessionState {
    pub fn new(mode: GameMode, seed: u64) -> Self {
        Self::with_rules(mode, seed, ScoringRules::default())
    }

    pub fn with_rules(mode: GameMode, seed: u64, rules: ScoringRules) -> Self {
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        Self {
            mode,
            rules,
            deck,
            selected: Vec::with_capacity(5),
            used: Vec::new(),
            is_playing: true,
            is_paused: false,
            level_closed: false,
            level: 1,
            score: 0,
            level_score: 0,
            hands_played: 0,
            cards_selected: 0,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }
    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }
    pub fn deck(&self) -> &[Card] {
        self.deck.cards()
    }
    pub fn selected_cards(&self) -> &[Card] {
        &self.selected
    }
    /// In classic mode the held cards are on this list too.
    pub fn used_cards(&self) -> &[Card] {
        &self.used
    }
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }
    pub fn is_level_closed(&self) -> bool {
        self.level_closed
    }
    pub fn level(&self) -> u32 {
        self.level
    }
    pub fn score(&self) -> i64 {
        self.score
    }
    pub fn level_score(&self) -> i64 {
        self.level_score
    }
    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }
    pub fn cards_selected(&self) -> u32 {
        self.cards_selected
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            deck: self.deck.cards().to_vec(),
            selected_cards: self.selected.clone(),
            used_cards: self.used.clone(),
            is_playing: self.is_playing,
            is_paused: self.is_paused,
            level_closed: self.level_closed,
            level: self.level,
            score: self.score,
            level_score: self.level_score,
            hands_played: self.hands_played,
            cards_selected: self.cards_selected,
        }
    }

    /// The evaluated hand whenever exactly five cards are held.
    pub fn current_hand(&self) -> Option<HandResult> {
        (self.selected.len() == 5).then(|| evaluate_hand(&self.selected))
    }

    /// Checks a selection intent without touching state.
    pub fn validate_selection(&self, card: &Card) -> Result<(), RejectReason> {
        if self.selected.len() >= 5 {
            return Err(RejectReason::HandFull);
        }
        if !self.is_playing || self.is_paused || self.level_closed {
            return Err(RejectReason::NotPlaying);
        }
        if self.selected.contains(card) {
            return Err(RejectReason::AlreadySelected);
        }
        if !self.deck.contains(card) {
            return Err(RejectReason::NotInDeck);
        }
        Ok(())
    }

    // Single transition for an accepted pick. Callers validate first.
    pub(crate) fn apply_selection(&mut self, card: Card) {
        self.selected.push(card);
        self.deck.remove(&card);
        if !self.mode.recycles_cards() {
            self.used.push(card);
        }
        self.cards_selected += 1;
    }

    // Hands and power-ups need a running, unpaused, open level.
    fn ensure_active(&self) -> Result<(), SessionError> {
        if !self.is_playing || self.is_paused {
            return Err(SessionError::NotPlaying);
        }
        if self.level_closed {
            return Err(SessionError::LevelClosed { level: self.level });
        }
        Ok(())
    }

    /// Scores the five held cards and clears the hand.
    pub fn submit_hand(&mut self) -> Result<HandResult, SessionError> {
        self.ensure_active()?;
        if self.selected.len() != 5 {
            return Err(SessionError::HandIncomplete {
                held: self.selected.len(),
            });
        }
        let result = evaluate_hand(&self.selected);
        self.score += result.total_points as i64;
        self.level_score += result.total_points as i64;
        self.hands_played += 1;
        let played = std::mem::take(&mut self.selected);
        if self.mode.recycles_cards() {
            self.deck.return_cards(&played);
        }
        tracing::info!(
            mode = %self.mode,
            level = self.level,
            category = %result.category,
            points = result.total_points,
            score = self.score,
            "hand submitted"
        );
        Ok(result)
    }

    /// Applies the time bonus and leftover penalty for the current level.
    /// A level closes once; until `advance_level` further calls are refused.
    pub fn complete_level(&mut self, elapsed_secs: u32) -> Result<LevelSummary, SessionError> {
        if !self.is_playing {
            return Err(SessionError::NotPlaying);
        }
        if self.level_closed {
            return Err(SessionError::LevelClosed { level: self.level });
        }
        let time_bonus = self.rules.time_bonus(elapsed_secs);
        // Held cards that never made it into a submitted hand
        let leftover_penalty = self.rules.leftover_penalty(&self.selected);
        let goal = self.rules.level_goal(self.level);
        let cleared = self.level_score >= goal as i64;
        self.score = (self.score + time_bonus as i64 - leftover_penalty as i64).max(0);
        self.level_closed = true;
        tracing::info!(
            level = self.level,
            goal,
            level_score = self.level_score,
            time_bonus,
            leftover_penalty,
            cleared,
            "level complete"
        );
        Ok(LevelSummary {
            level: self.level,
            goal,
            level_score: self.level_score,
            time_bonus,
            leftover_penalty,
            cleared,
        })
    }

    /// Moves to the next level with a fresh shuffled deck.
    pub fn advance_level(&mut self) -> u32 {
        self.level += 1;
        self.level_score = 0;
        self.level_closed = false;
        self.selected.clear();
        self.used.clear();
        self.deck.reset();
        self.deck.shuffle();
        tracing::debug!(level = self.level, "advanced level");
        self.level
    }

    pub fn current_phase(&self) -> Option<Phase> {
        self.mode
            .has_phase_schedule()
            .then(|| self.rules.phase(self.level))
    }

    pub fn current_speed(&self) -> Option<f64> {
        self.mode
            .has_phase_schedule()
            .then(|| self.rules.speed(self.level))
    }

    pub fn end_game(&mut self) -> GameSummary {
        self.is_playing = false;
        GameSummary {
            score: self.score,
            hands_played: self.hands_played,
            level: self.level,
            stars: self.rules.star_rating(self.score),
        }
    }

    pub fn apply_power_up(&mut self, power_up: PowerUp) -> Result<PowerUpOutcome, SessionError> {
        self.ensure_active()?;
        match power_up {
            PowerUp::Reshuffle => {
                self.deck.shuffle();
                Ok(PowerUpOutcome::Reshuffled)
            }
            PowerUp::AddTime => Ok(PowerUpOutcome::TimeAdded(self.rules.add_time_seconds)),
            PowerUp::GuaranteedHand(category) => {
                let hand = self.deal_guaranteed(category)?;
                Ok(PowerUpOutcome::HandDealt(hand))
            }
        }
    }

    // Held cards go back into the pool first; on failure nothing moves.
    fn deal_guaranteed(&mut self, category: HandCategory) -> Result<Vec<Card>, SessionError> {
        let mut pool = self.deck.cards().to_vec();
        pool.extend_from_slice(&self.selected);
        let hand = synth::synthesize(category, &pool, self.deck.rng_mut())
            .map_err(|_| SessionError::PowerUpUnavailable { category })?;

        let held = std::mem::take(&mut self.selected);
        if !self.mode.recycles_cards() {
            self.used.retain(|c| !held.contains(c));
        }
        let returned: Vec<Card> = held.into_iter().filter(|c| !hand.contains(c)).collect();
        if !returned.is_empty() {
            self.deck.return_cards(&returned);
        }
        for card in &hand {
            self.deck.remove(card);
        }
        if !self.mode.recycles_cards() {
            self.used.extend_from_slice(&hand);
        }
        self.selected = hand.clone();
        self.cards_selected += hand.len() as u32;
        tracing::debug!(category = %category, hand = ?hand, "power-up dealt hand");
        Ok(hand)
    }

    /// Deck is disjoint from the held and used cards, nothing repeats, and
    /// together they cover the full universe. Held cards are also on the used
    /// list in modes that discard.
    pub fn check_invariants(&self) -> Result<(), String> {
        let deck = self.deck.cards();
        for (name, cards) in [("deck", deck), ("selected", &self.selected[..]), ("used", &self.used[..])] {
            for (i, c) in cards.iter().enumerate() {
                if cards[i + 1..].contains(c) {
                    return Err(format!("{} repeats {}", name, c.id()));
                }
            }
        }
        if let Some(c) = deck.iter().find(|c| self.selected.contains(c) || self.used.contains(c)) {
            return Err(format!("{} is both undealt and dealt", c.id()));
        }
        if self.selected.len() > 5 {
            return Err(format!("{} cards held", self.selected.len()));
        }
        if self.mode.recycles_cards() {
            if !self.used.is_empty() {
                return Err("recycling mode recorded used cards".into());
            }
        } else if let Some(c) = self.selected.iter().find(|c| !self.used.contains(c)) {
            return Err(format!("held card {} missing from used list", c.id()));
        }
        let universe = full_deck();
        let missing = universe
            .iter()
            .find(|c| !deck.contains(c) && !self.selected.contains(c) && !self.used.contains(c));
        if let Some(c) = missing {
            return Err(format!("{} left circulation", c.id()));
        }
        Ok(())
    }
}
