//! Battle orchestrator: the single owner of a battle's mutable state

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::BattleConfig;
use crate::error::Rejection;
use crate::types::{Combatant, Move, Side};

use super::damage::compute_damage;
use super::effects;
use super::events::{BattleEvent, Resolution, SkipReason, TurnReport};
use super::policy::{OpponentPolicy, RandomAffordable};
use super::rewards::{BattleReport, EndReason, LevelScaledRewards, RewardPolicy, RewardSink};
use super::turn::BattleState;

/// What happened when a side's turn began
enum TurnStart {
    Ready,
    Stunned,
    /// A start-of-turn tick ended the battle
    Finished,
}

/// One battle between the player and a scripted opponent
///
/// Every mutation goes through `&mut self`, so callers never observe a
/// partially applied move. Rejected requests leave the state untouched.
///
/// ```ignore
/// let mut battle = Battle::new(player, opponent, BattleConfig::default());
///
/// let report = battle.submit_player_move("quick-strike")?;
/// for event in &report.events {
///     println!("{}", event);
/// }
/// ```
pub struct Battle<R: RngCore = StdRng> {
    state: BattleState,
    config: BattleConfig,
    rng: R,
    policy: Box<dyn OpponentPolicy>,
    rewards: Box<dyn RewardPolicy>,
    sink: Option<Box<dyn RewardSink>>,
    report: Option<BattleReport>,

    /// Start-of-turn effects already ran for the player's current turn
    player_turn_begun: bool,
}

impl Battle<StdRng> {
    /// Start a battle seeded from system entropy
    pub fn new(player: Combatant, opponent: Combatant, config: BattleConfig) -> Self {
        Self::with_rng(player, opponent, config, StdRng::from_entropy())
    }

    /// Start a battle with a fixed seed
    pub fn seeded(player: Combatant, opponent: Combatant, config: BattleConfig, seed: u64) -> Self {
        Self::with_rng(player, opponent, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Battle<R> {
    pub fn with_rng(player: Combatant, opponent: Combatant, config: BattleConfig, rng: R) -> Self {
        tracing::info!(
            player = %player.id,
            opponent = %opponent.id,
            deferred = config.yield_between_turns,
            "Battle started"
        );

        Self {
            state: BattleState::new(player, opponent),
            config,
            rng,
            policy: Box::new(RandomAffordable),
            rewards: Box::new(LevelScaledRewards::default()),
            sink: None,
            report: None,
            player_turn_begun: true,
        }
    }

    /// Replace the opponent's move selection
    pub fn with_policy(mut self, policy: impl OpponentPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn with_reward_policy(mut self, rewards: impl RewardPolicy + 'static) -> Self {
        self.rewards = Box::new(rewards);
        self
    }

    /// Attach the collaborator that receives the final report
    pub fn with_reward_sink(mut self, sink: impl RewardSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Switch between immediate and deferred opponent replies
    pub fn set_yield_between_turns(&mut self, enabled: bool) {
        self.config.yield_between_turns = enabled;
    }

    // === Queries ===

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> BattleState {
        self.state.clone()
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Final report once the battle is over
    pub fn report(&self) -> Option<&BattleReport> {
        self.report.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    // === Player actions ===

    /// Resolve the player's move and, unless deferred, the opponent's reply.
    ///
    /// Returns once it is the player's turn again or the battle is over.
    pub fn submit_player_move(&mut self, move_id: &str) -> Result<TurnReport, Rejection> {
        self.state.check_turn(Side::Player)?;

        let mv = self
            .state
            .player
            .find_move(move_id)
            .cloned()
            .ok_or_else(|| Rejection::UnknownMove(move_id.to_string()))?;

        if !self.state.player.can_afford(&mv) {
            return Err(Rejection::InsufficientEnergy {
                have: self.state.player.stats.energy,
                need: mv.energy_cost,
            });
        }

        let mut events = Vec::new();
        self.resolve(Side::Player, mv, &mut events);
        self.advance(&mut events);
        Ok(TurnReport { events })
    }

    /// Give up the player's turn without acting
    pub fn pass_turn(&mut self) -> Result<TurnReport, Rejection> {
        self.state.check_turn(Side::Player)?;

        let mut events = Vec::new();
        self.skip(Side::Player, SkipReason::Passed, &mut events);
        self.advance(&mut events);
        Ok(TurnReport { events })
    }

    /// Resolve the opponent's pending turn in deferred mode
    pub fn resolve_opponent_turn(&mut self) -> Result<TurnReport, Rejection> {
        self.state.check_turn(Side::Opponent)?;

        let mut events = Vec::new();
        self.opponent_turn(&mut events);
        self.advance(&mut events);
        Ok(TurnReport { events })
    }

    /// Forfeit the battle. Allowed on either side's turn.
    pub fn surrender(&mut self) -> Result<BattleReport, Rejection> {
        if self.state.is_over() {
            return Err(Rejection::BattleOver);
        }

        let mut events = Vec::new();
        Ok(self.finish(Side::Opponent, EndReason::Surrender, &mut events))
    }

    // === Turn flow ===

    /// Run turns until the player must act, the opponent is deferred, or the
    /// battle ends
    fn advance(&mut self, events: &mut Vec<BattleEvent>) {
        while !self.state.is_over() {
            match self.state.turn {
                Side::Opponent => {
                    if self.config.yield_between_turns {
                        break;
                    }
                    self.opponent_turn(events);
                }
                Side::Player => {
                    if self.player_turn_begun {
                        break;
                    }
                    self.player_turn_begun = true;
                    if let TurnStart::Stunned = self.begin_turn(Side::Player, events) {
                        self.skip(Side::Player, SkipReason::Stunned, events);
                    }
                }
            }
        }
    }

    fn begin_turn(&mut self, side: Side, events: &mut Vec<BattleEvent>) -> TurnStart {
        events.push(BattleEvent::TurnStarted {
            side,
            round: self.state.round,
        });

        let stunned = effects::start_of_turn(&mut self.state, side, events);

        if let Some(winner) = self.state.knockout_winner() {
            self.finish(winner, EndReason::Knockout, events);
            return TurnStart::Finished;
        }

        if stunned {
            TurnStart::Stunned
        } else {
            TurnStart::Ready
        }
    }

    fn opponent_turn(&mut self, events: &mut Vec<BattleEvent>) {
        match self.begin_turn(Side::Opponent, events) {
            TurnStart::Ready => {}
            TurnStart::Stunned => {
                self.skip(Side::Opponent, SkipReason::Stunned, events);
                return;
            }
            TurnStart::Finished => return,
        }

        match self.policy.select_move(&self.state.opponent, &mut self.rng) {
            Some(mv) if self.state.opponent.can_afford(&mv) => {
                self.resolve(Side::Opponent, mv, events);
            }
            Some(mv) => {
                tracing::warn!(move_id = %mv.id, "Opponent policy picked an unaffordable move");
                self.skip(Side::Opponent, SkipReason::NoAffordableMove, events);
            }
            None => self.skip(Side::Opponent, SkipReason::NoAffordableMove, events),
        }
    }

    /// Apply a validated, affordable move
    fn resolve(&mut self, actor: Side, mv: Arc<Move>, events: &mut Vec<BattleEvent>) {
        self.state.begin_resolution();

        let (attacker, defender) = self.state.pair(actor);
        let roll = compute_damage(&mv, attacker, defender, &mut self.rng, &self.config);

        let (attacker, defender) = self.state.pair_mut(actor);
        let spent = attacker.stats.spend_energy(mv.energy_cost);
        debug_assert!(spent, "move resolved without enough energy");
        defender.stats.take_damage(roll.damage);
        let target_health = defender.stats.health;

        let effect = effects::apply_move_effect(&mut self.state, actor, &mv, &mut self.rng);

        tracing::debug!(
            side = ?actor,
            move_id = %mv.id,
            damage = roll.damage,
            critical = roll.critical,
            target_health,
            "Move resolved"
        );

        let resolution = Resolution {
            actor,
            move_used: mv,
            damage: roll.damage,
            critical: roll.critical,
            effect,
            target_health,
        };
        self.state.last_resolution = Some(resolution.clone());
        events.push(BattleEvent::MoveResolved(resolution));
        if let Some(applied) = effect {
            events.push(BattleEvent::EffectApplied(applied));
        }

        self.end_turn(actor, events);
    }

    fn skip(&mut self, side: Side, reason: SkipReason, events: &mut Vec<BattleEvent>) {
        tracing::debug!(side = ?side, reason = reason.as_str(), "Turn skipped");
        events.push(BattleEvent::TurnSkipped { side, reason });
        self.end_turn(side, events);
    }

    /// Knockout check, effect decay, then hand the turn over
    fn end_turn(&mut self, side: Side, events: &mut Vec<BattleEvent>) {
        if let Some(winner) = self.state.knockout_winner() {
            self.finish(winner, EndReason::Knockout, events);
            return;
        }

        for kind in self.state.combatant_mut(side).decay_effects() {
            events.push(BattleEvent::EffectExpired { side, kind });
        }

        if side == Side::Opponent {
            self.player_turn_begun = false;
        }
        self.state.hand_over();
    }

    fn finish(
        &mut self,
        winner: Side,
        reason: EndReason,
        events: &mut Vec<BattleEvent>,
    ) -> BattleReport {
        self.state.end(winner);

        let rewards = self
            .rewards
            .rewards(winner, reason, &self.state.player, &self.state.opponent);
        let report = BattleReport {
            winner,
            reason,
            rounds: self.state.round,
            rewards,
        };

        tracing::info!(
            winner = ?winner,
            reason = ?reason,
            rounds = report.rounds,
            money = rewards.money,
            experience = rewards.experience,
            "Battle over"
        );

        if let Some(sink) = self.sink.as_mut() {
            sink.deliver(&report);
        }
        self.report = Some(report.clone());
        events.push(BattleEvent::BattleOver(report.clone()));
        report
    }
}

impl<R: RngCore> std::fmt::Debug for Battle<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Battle")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use duel_records::default_catalog;

    use super::*;
    use crate::engine::turn::Phase;
    use crate::types::{EffectKind, MoveCatalog, MoveCategory, Stats, StatusEffect};

    fn slash() -> Move {
        Move::new("slash", "Slash", MoveCategory::Attack, 25, 20)
    }

    fn focus() -> Move {
        Move::new("focus", "Focus", MoveCategory::Defense, 0, 0)
    }

    fn effect_move(id: &str, kind: EffectKind, duration: u32, magnitude: u32) -> Move {
        Move::new(id, id, MoveCategory::Special, 0, 0)
            .with_effect(StatusEffect::new(kind, 1.0, duration, magnitude))
    }

    fn fighter(id: &str, health: u32, energy: u32, moves: Vec<Move>) -> Combatant {
        let mut stats = Stats::new(100, 100, 15, 10);
        stats.health = health;
        stats.energy = energy;
        let moves = moves.into_iter().map(Arc::new).collect();
        Combatant::new(id, id, 1, stats, moves).unwrap()
    }

    fn battle(player: Combatant, opponent: Combatant, config: BattleConfig) -> Battle {
        Battle::seeded(player, opponent, config, 7)
    }

    fn deferred(player: Combatant, opponent: Combatant) -> Battle {
        battle(player, opponent, BattleConfig::deterministic().deferred())
    }

    fn immediate(player: Combatant, opponent: Combatant) -> Battle {
        battle(player, opponent, BattleConfig::deterministic())
    }

    #[test]
    fn test_player_move_resolution() {
        let mut battle = deferred(
            fighter("player", 100, 100, vec![slash()]),
            fighter("opponent", 100, 100, vec![slash()]),
        );

        let report = battle.submit_player_move("slash").unwrap();

        let resolution = report.resolutions().next().unwrap();
        assert_eq!(resolution.actor, Side::Player);
        assert_eq!(resolution.damage, 37);
        assert!(!resolution.critical);
        assert_eq!(resolution.target_health, 63);

        let state = battle.state();
        assert_eq!(state.opponent.stats.health, 63);
        assert_eq!(state.player.stats.energy, 80);
        assert_eq!(state.turn, Side::Opponent);
        assert_eq!(state.phase, Phase::AwaitingMove);
        assert_eq!(report.events.len(), 1);
    }

    #[test]
    fn test_immediate_mode_resolves_reply() {
        let mut battle = immediate(
            fighter("player", 100, 100, vec![slash()]),
            fighter("opponent", 100, 100, vec![slash()]),
        );

        let report = battle.submit_player_move("slash").unwrap();

        assert_eq!(report.resolutions().count(), 2);
        assert_eq!(
            report.events[1],
            BattleEvent::TurnStarted {
                side: Side::Opponent,
                round: 1
            }
        );

        let state = battle.state();
        assert_eq!(state.turn, Side::Player);
        assert_eq!(state.round, 2);
        assert_eq!(state.player.stats.health, 63);
        assert_eq!(state.opponent.stats.energy, 80);
        assert_eq!(
            state.last_resolution.as_ref().map(|r| r.actor),
            Some(Side::Opponent)
        );
    }

    #[test]
    fn test_not_your_turn_leaves_state() {
        let mut battle = deferred(
            fighter("player", 100, 100, vec![slash()]),
            fighter("opponent", 100, 100, vec![slash()]),
        );
        battle.submit_player_move("slash").unwrap();
        let before = battle.snapshot();

        assert_eq!(battle.submit_player_move("slash"), Err(Rejection::NotYourTurn));
        assert_eq!(battle.submit_player_move("nope"), Err(Rejection::NotYourTurn));
        assert_eq!(battle.pass_turn(), Err(Rejection::NotYourTurn));
        assert_eq!(battle.snapshot(), before);
    }

    #[test]
    fn test_resolve_opponent_on_player_turn() {
        let mut battle = deferred(
            fighter("player", 100, 100, vec![slash()]),
            fighter("opponent", 100, 100, vec![slash()]),
        );

        assert_eq!(battle.resolve_opponent_turn(), Err(Rejection::NotYourTurn));

        battle.submit_player_move("slash").unwrap();
        let report = battle.resolve_opponent_turn().unwrap();
        assert_eq!(report.resolutions().count(), 1);
        assert_eq!(battle.state().turn, Side::Player);
        assert_eq!(battle.state().round, 2);
    }

    #[test]
    fn test_move_rejections() {
        let mut battle = immediate(
            fighter("player", 100, 10, vec![slash()]),
            fighter("opponent", 100, 100, vec![slash()]),
        );
        let before = battle.snapshot();

        assert_eq!(
            battle.submit_player_move("nope"),
            Err(Rejection::UnknownMove("nope".to_string()))
        );
        assert_eq!(
            battle.submit_player_move("slash"),
            Err(Rejection::InsufficientEnergy { have: 10, need: 20 })
        );
        assert_eq!(battle.snapshot(), before);
    }

    #[test]
    fn test_opponent_without_energy_is_skipped() {
        let heavy = Move::new("heavy", "Heavy", MoveCategory::Attack, 40, 35);
        let mut battle = immediate(
            fighter("player", 100, 100, vec![slash()]),
            fighter("opponent", 100, 5, vec![slash(), heavy]),
        );

        let report = battle.submit_player_move("slash").unwrap();

        assert!(report.events.contains(&BattleEvent::TurnSkipped {
            side: Side::Opponent,
            reason: SkipReason::NoAffordableMove,
        }));

        let state = battle.state();
        assert_eq!(state.opponent.stats.energy, 5);
        assert_eq!(state.opponent.stats.health, 63);
        assert_eq!(state.player.stats.health, 100);
        assert_eq!(state.player.stats.energy, 80);
        assert_eq!(state.turn, Side::Player);
    }

    struct Reckless;

    impl OpponentPolicy for Reckless {
        fn select_move(&self, combatant: &Combatant, _: &mut dyn RngCore) -> Option<Arc<Move>> {
            combatant.moves.first().cloned()
        }
    }

    #[test]
    fn test_unaffordable_policy_choice_is_skipped() {
        let mut battle = immediate(
            fighter("player", 100, 100, vec![slash()]),
            fighter("opponent", 100, 5, vec![slash()]),
        )
        .with_policy(Reckless);

        let report = battle.submit_player_move("slash").unwrap();

        assert_eq!(report.resolutions().count(), 1);
        assert_eq!(battle.state().opponent.stats.energy, 5);
        assert_eq!(battle.state().player.stats.health, 100);
    }

    #[test]
    fn test_knockout_ends_battle() {
        let mut battle = immediate(
            fighter("player", 100, 100, vec![slash()]),
            fighter("opponent", 10, 100, vec![slash()]),
        );

        let report = battle.submit_player_move("slash").unwrap();

        let state = battle.state();
        assert_eq!(state.opponent.stats.health, 0);
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.winner, Some(Side::Player));

        let outcome = report.outcome().unwrap();
        assert!(outcome.player_won());
        assert_eq!(outcome.reason, EndReason::Knockout);
        assert_eq!(outcome.rewards.money, 50);
        assert_eq!(outcome.rewards.experience, 20);
        assert!(matches!(report.events.last(), Some(BattleEvent::BattleOver(_))));
        assert_eq!(battle.report(), Some(outcome));
    }

    #[test]
    fn test_no_actions_after_game_over() {
        let mut battle = immediate(
            fighter("player", 100, 100, vec![slash()]),
            fighter("opponent", 10, 100, vec![slash()]),
        );
        battle.submit_player_move("slash").unwrap();
        let before = battle.snapshot();

        assert_eq!(battle.submit_player_move("slash"), Err(Rejection::BattleOver));
        assert_eq!(battle.submit_player_move("nope"), Err(Rejection::BattleOver));
        assert_eq!(battle.pass_turn(), Err(Rejection::BattleOver));
        assert_eq!(battle.resolve_opponent_turn(), Err(Rejection::BattleOver));
        assert_eq!(battle.surrender(), Err(Rejection::BattleOver));
        assert_eq!(battle.snapshot(), before);
    }

    #[test]
    fn test_loss_pays_no_money() {
        let mut battle = immediate(
            fighter("player", 10, 100, vec![slash()]),
            fighter("opponent", 100, 100, vec![slash()]),
        );

        let report = battle.pass_turn().unwrap();

        assert_eq!(
            report.events[0],
            BattleEvent::TurnSkipped {
                side: Side::Player,
                reason: SkipReason::Passed,
            }
        );

        let outcome = report.outcome().unwrap();
        assert_eq!(outcome.winner, Side::Opponent);
        assert_eq!(outcome.loser(), Side::Player);
        assert_eq!(outcome.rewards.money, 0);
        assert_eq!(outcome.rewards.experience, 5);
        assert_eq!(battle.state().player.stats.health, 0);
    }

    #[test]
    fn test_surrender_delivers_once() {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&delivered);

        let mut battle = deferred(
            fighter("player", 100, 100, vec![slash()]),
            fighter("opponent", 100, 100, vec![slash()]),
        )
        .with_reward_sink(move |report: &BattleReport| {
            sink.lock().unwrap().push(report.clone());
        });

        battle.submit_player_move("slash").unwrap();
        let report = battle.surrender().unwrap();

        assert_eq!(report.winner, Side::Opponent);
        assert_eq!(report.reason, EndReason::Surrender);
        assert!(report.rewards.is_empty());
        assert!(battle.is_over());
        assert_eq!(battle.state().winner, Some(Side::Opponent));

        assert_eq!(battle.surrender(), Err(Rejection::BattleOver));
        assert_eq!(delivered.lock().unwrap().as_slice(), &[report]);
    }

    #[test]
    fn test_stun_skips_turn() {
        let mut battle = deferred(
            fighter("player", 100, 100, vec![effect_move("zap", EffectKind::Stun, 1, 0)]),
            fighter("opponent", 100, 100, vec![slash()]),
        );

        let report = battle.submit_player_move("zap").unwrap();
        assert!(matches!(report.events[1], BattleEvent::EffectApplied(_)));

        let report = battle.resolve_opponent_turn().unwrap();
        assert_eq!(
            report.events,
            vec![
                BattleEvent::TurnStarted {
                    side: Side::Opponent,
                    round: 1
                },
                BattleEvent::TurnSkipped {
                    side: Side::Opponent,
                    reason: SkipReason::Stunned,
                },
                BattleEvent::EffectExpired {
                    side: Side::Opponent,
                    kind: EffectKind::Stun,
                },
                BattleEvent::TurnStarted {
                    side: Side::Player,
                    round: 2
                },
            ]
        );

        let state = battle.state();
        assert_eq!(state.player.stats.health, 100);
        assert_eq!(state.opponent.stats.energy, 100);
        assert!(state.opponent.effects().is_empty());
        assert_eq!(state.turn, Side::Player);
    }

    #[test]
    fn test_stunned_player_is_skipped_without_request() {
        let mut battle = immediate(
            fighter("player", 100, 100, vec![slash()]),
            fighter("opponent", 100, 100, vec![effect_move("zap", EffectKind::Stun, 1, 0)]),
        );

        let report = battle.submit_player_move("slash").unwrap();

        assert_eq!(report.events.len(), 10);
        assert!(matches!(
            &report.events[3],
            BattleEvent::EffectApplied(applied) if applied.target == Side::Player
        ));
        assert_eq!(
            report.events[4..8],
            [
                BattleEvent::TurnStarted {
                    side: Side::Player,
                    round: 2
                },
                BattleEvent::TurnSkipped {
                    side: Side::Player,
                    reason: SkipReason::Stunned,
                },
                BattleEvent::EffectExpired {
                    side: Side::Player,
                    kind: EffectKind::Stun,
                },
                BattleEvent::TurnStarted {
                    side: Side::Opponent,
                    round: 2
                },
            ]
        );
        match &report.events[8] {
            BattleEvent::MoveResolved(resolution) => {
                assert_eq!(resolution.actor, Side::Opponent);
                assert!(resolution.effect.is_none());
            }
            other => panic!("expected the opponent's second move, got {:?}", other),
        }
        assert_eq!(
            report.events[9],
            BattleEvent::TurnStarted {
                side: Side::Player,
                round: 3
            }
        );

        let state = battle.state();
        assert_eq!(state.turn, Side::Player);
        assert_eq!(state.round, 3);
        assert!(!state.player.has_effect(EffectKind::Stun));
        assert_eq!(battle.submit_player_move("slash").map(|_| ()), Ok(()));
    }

    #[test]
    fn test_debuff_weakens_next_hit() {
        let mut battle = deferred(
            fighter("player", 100, 100, vec![effect_move("hex", EffectKind::Debuff, 2, 5)]),
            fighter("opponent", 100, 100, vec![slash()]),
        );

        battle.submit_player_move("hex").unwrap();
        assert!(battle.state().opponent.has_effect(EffectKind::Debuff));

        let report = battle.resolve_opponent_turn().unwrap();

        let resolution = report.resolutions().next().unwrap();
        assert_eq!(resolution.actor, Side::Opponent);
        assert_eq!(resolution.damage, 25);
        assert_eq!(battle.state().player.stats.health, 75);
    }

    #[test]
    fn test_burn_ticks_then_expires() {
        let mut battle = deferred(
            fighter(
                "player",
                100,
                100,
                vec![effect_move("ember", EffectKind::Burn, 2, 5), focus()],
            ),
            fighter("opponent", 100, 100, vec![focus()]),
        );

        battle.submit_player_move("ember").unwrap();
        let report = battle.resolve_opponent_turn().unwrap();

        assert!(report.events.contains(&BattleEvent::EffectTicked {
            side: Side::Opponent,
            kind: EffectKind::Burn,
            amount: 5,
        }));
        assert_eq!(battle.state().opponent.stats.health, 95);
        assert_eq!(
            battle.state().opponent.effect(EffectKind::Burn).map(|e| e.remaining),
            Some(1)
        );

        battle.submit_player_move("focus").unwrap();
        let report = battle.resolve_opponent_turn().unwrap();

        assert!(report.events.contains(&BattleEvent::EffectExpired {
            side: Side::Opponent,
            kind: EffectKind::Burn,
        }));
        assert_eq!(battle.state().opponent.stats.health, 90);
        assert!(!battle.state().opponent.has_effect(EffectKind::Burn));
    }

    #[test]
    fn test_burn_can_end_battle() {
        let mut battle = deferred(
            fighter("player", 100, 100, vec![effect_move("ember", EffectKind::Burn, 2, 5)]),
            fighter("opponent", 3, 100, vec![slash()]),
        );

        battle.submit_player_move("ember").unwrap();
        let report = battle.resolve_opponent_turn().unwrap();

        assert_eq!(report.resolutions().count(), 0);
        let outcome = report.outcome().unwrap();
        assert_eq!(outcome.winner, Side::Player);
        assert_eq!(outcome.reason, EndReason::Knockout);
        assert_eq!(battle.state().player.stats.health, 100);
    }

    #[test]
    fn test_heal_ticks_at_players_turn() {
        let mut battle = deferred(
            fighter("player", 50, 100, vec![effect_move("mend", EffectKind::Heal, 2, 8)]),
            fighter("opponent", 100, 100, vec![focus()]),
        );

        battle.submit_player_move("mend").unwrap();
        assert_eq!(battle.state().player.stats.health, 50);

        let report = battle.resolve_opponent_turn().unwrap();

        assert!(report.events.contains(&BattleEvent::EffectTicked {
            side: Side::Player,
            kind: EffectKind::Heal,
            amount: 8,
        }));
        assert_eq!(battle.state().player.stats.health, 58);
    }

    #[test]
    fn test_switch_to_immediate_mode() {
        let mut battle = deferred(
            fighter("player", 100, 100, vec![slash()]),
            fighter("opponent", 100, 100, vec![slash()]),
        );
        battle.set_yield_between_turns(false);

        battle.submit_player_move("slash").unwrap();
        assert_eq!(battle.state().turn, Side::Player);
        assert!(!battle.config().yield_between_turns);
    }

    #[test]
    fn test_random_battles_keep_invariants() {
        let document = default_catalog().unwrap();
        let catalog = MoveCatalog::from_document(&document).unwrap();

        for seed in 0..24usize {
            let player = &document.starters[seed % document.starters.len()];
            let opponent = &document.opponents[seed % document.opponents.len()];
            let mut battle = Battle::seeded(
                catalog.build_combatant(player).unwrap(),
                catalog.build_combatant(opponent).unwrap(),
                BattleConfig::default(),
                seed as u64,
            );

            let mut acted = Vec::new();
            for _ in 0..200 {
                if battle.is_over() {
                    break;
                }

                let choice = battle
                    .state()
                    .player
                    .affordable_moves()
                    .next()
                    .map(|mv| mv.id.clone());
                let report = match choice {
                    Some(id) => battle.submit_player_move(&id),
                    None => battle.pass_turn(),
                }
                .unwrap();

                for event in &report.events {
                    match event {
                        BattleEvent::MoveResolved(resolution) => acted.push(resolution.actor),
                        BattleEvent::TurnSkipped { side, .. } => acted.push(*side),
                        _ => {}
                    }
                }

                let state = battle.state();
                assert!(state.player.stats.is_consistent());
                assert!(state.opponent.stats.is_consistent());
                assert_eq!(state.is_over(), state.knockout_winner().is_some());
            }

            assert_eq!(acted.first(), Some(&Side::Player));
            for pair in acted.windows(2) {
                assert_ne!(pair[0], pair[1], "turns must alternate");
            }

            if let Some(report) = battle.report() {
                let loser = battle.state().combatant(report.loser());
                assert_eq!(loser.stats.health, 0);
                let paid = report.rewards.money > 0;
                assert_eq!(report.player_won(), paid);
            }
        }
    }
}
