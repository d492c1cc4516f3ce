//! Battle engine - the per-battle state machine.
//!
//! The engine owns the three provider collaborators (card catalog, deck
//! provider, randomness provider) plus the requirement registry, and applies
//! operations to `Battle` values in a fixed order:
//!
//! `create_battle -> {go_for_new_turn -> resolve_attacker -> fight ->
//! resolve_halves}* -> Ended`
//!
//! Every operation validates the battle's phase first and mutates nothing on
//! failure: provider errors surface before any write. Randomness is consumed
//! only for shuffle seeding at creation and for exact speed ties.

use log::{debug, trace};

use crate::battle::state::{
    Battle, BattleId, BattleSide, Phase, PlayerHand, PlayerSlot, TurnHalf, TurnSnapshot,
};
use crate::cards::{BattleCardType, CardCatalog};
use crate::core::{PlayerAddr, RandomnessProvider};
use crate::deck::{DeckId, DeckProvider};
use crate::effects::{
    resolve_power_boost, ReqContext, ReqOutcome, RequirementCode, RequirementRegistry,
};
use crate::error::BattleError;

/// Engine policy knobs.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Only this address may create battles.
    pub admin: PlayerAddr,
    /// `go_for_battle` aborts past this turn count (stalemate guard).
    pub max_turns: u32,
}

impl EngineConfig {
    /// Config with the default turn limit.
    #[must_use]
    pub fn new(admin: PlayerAddr) -> Self {
        Self {
            admin,
            max_turns: 1000,
        }
    }
}

/// The battle resolution engine.
///
/// Holds no battle state itself: each `Battle` is an independent value and
/// the engine may drive any number of them. The caller guarantees at most
/// one mutating call at a time per battle.
pub struct BattleEngine<C, D, R>
where
    C: CardCatalog,
    D: DeckProvider,
    R: RandomnessProvider,
{
    catalog: C,
    decks: D,
    rng: R,
    requirements: RequirementRegistry,
    config: EngineConfig,
    next_battle_id: u64,
}

impl<C, D, R> BattleEngine<C, D, R>
where
    C: CardCatalog,
    D: DeckProvider,
    R: RandomnessProvider,
{
    /// Create an engine with the standard requirement registry.
    #[must_use]
    pub fn new(catalog: C, decks: D, rng: R, config: EngineConfig) -> Self {
        Self {
            catalog,
            decks,
            rng,
            requirements: RequirementRegistry::standard(),
            config,
            next_battle_id: 1,
        }
    }

    /// Replace the requirement registry (builder pattern).
    #[must_use]
    pub fn with_requirements(mut self, requirements: RequirementRegistry) -> Self {
        self.requirements = requirements;
        self
    }

    /// The card catalog this engine reads from.
    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The requirement registry in use.
    #[must_use]
    pub fn requirements(&self) -> &RequirementRegistry {
        &self.requirements
    }

    // === Operations ===

    /// Create a battle between two players.
    ///
    /// Fails with `Unauthorized` unless `caller` is the configured admin and
    /// with `InvalidParticipants` if a player battles themselves. Resolves
    /// both decks through the providers; any lookup failure aborts creation.
    pub fn create_battle(
        &mut self,
        caller: PlayerAddr,
        p1: PlayerAddr,
        deck1: DeckId,
        p2: PlayerAddr,
        deck2: DeckId,
    ) -> Result<Battle, BattleError> {
        if caller != self.config.admin {
            return Err(BattleError::Unauthorized(caller));
        }
        if p1 == p2 {
            return Err(BattleError::InvalidParticipants);
        }

        let side1 = self.resolve_side(p1, deck1)?;
        let side2 = self.resolve_side(p2, deck2)?;

        let id = BattleId::new(self.next_battle_id);
        self.next_battle_id += 1;

        debug!(
            "battle {} created: {} ({} cards) vs {} ({} cards)",
            id,
            p1,
            side1.hand.sequence.len(),
            p2,
            side2.hand.sequence.len()
        );

        Ok(Battle {
            id,
            player1: side1,
            player2: side2,
            current_turn: 1,
            attacker: None,
            half: TurnHalf::First,
            phase: Phase::Created,
            winner: None,
            history: im::Vector::new(),
        })
    }

    fn resolve_side(&mut self, addr: PlayerAddr, deck_id: DeckId) -> Result<BattleSide, BattleError> {
        let info = self.decks.deck(deck_id)?;
        let card = self.catalog.battle_card(info.battle_card)?;
        let (card_id, card_type, hp, stats) = (card.id, card.card_type, card.hp, card.stats);

        let seed = self.rng.next_random();
        let sequence = self.decks.shuffle_deck(deck_id, seed)?;

        Ok(BattleSide {
            addr,
            deck_id,
            hand: PlayerHand::new(card_id, card_type, hp, stats, sequence),
        })
    }

    /// Enter a new turn: expire and count down active effects, re-derive
    /// effective stats. No role is assigned yet.
    pub fn go_for_new_turn(&self, battle: &mut Battle) -> Result<(), BattleError> {
        self.ensure_not_ended(battle)?;
        if !matches!(battle.phase, Phase::Created | Phase::HalfResolved) {
            return Err(invalid_state("go_for_new_turn", battle.phase));
        }

        battle.player1.hand.tick_effects();
        battle.player2.hand.tick_effects();
        battle.attacker = None;
        battle.phase = Phase::NewTurn;

        trace!("battle {} turn {} started", battle.id, battle.current_turn);
        Ok(())
    }

    /// Assign attacker/defender for the current half and draw both hands.
    ///
    /// The strictly faster side attacks. On an exact tie the randomness
    /// provider is consulted exactly once and the value's parity picks the
    /// attacker (even = player one).
    pub fn resolve_attacker(&mut self, battle: &mut Battle) -> Result<(), BattleError> {
        self.ensure_not_ended(battle)?;
        if battle.phase != Phase::NewTurn {
            return Err(invalid_state("resolve_attacker", battle.phase));
        }

        self.assign_roles_and_draw(battle);
        battle.phase = Phase::AttackerResolved;
        Ok(())
    }

    fn assign_roles_and_draw(&mut self, battle: &mut Battle) {
        let speed1 = battle.player1.hand.effective_stats.speed;
        let speed2 = battle.player2.hand.effective_stats.speed;

        let attacker = if speed1 > speed2 {
            PlayerSlot::One
        } else if speed2 > speed1 {
            PlayerSlot::Two
        } else {
            let n = self.rng.next_random();
            if n % 2 == 0 {
                PlayerSlot::One
            } else {
                PlayerSlot::Two
            }
        };
        battle.attacker = Some(attacker);

        let drawn1 = battle.player1.hand.draw_hand();
        let drawn2 = battle.player2.hand.draw_hand();

        trace!(
            "battle {} turn {} {:?} half: attacker {:?} (spd {} vs {}), drew {}/{}",
            battle.id,
            battle.current_turn,
            battle.half,
            attacker,
            speed1,
            speed2,
            drawn1,
            drawn2
        );
    }

    /// Compute the boosted hands for one combat without touching the battle.
    ///
    /// Exposed for callers that want to preview the boost; `fight` performs
    /// the same resolution internally.
    pub fn cal_power_boost(
        &self,
        attacker: &PlayerHand,
        defender: &PlayerHand,
    ) -> Result<(PlayerHand, PlayerHand), BattleError> {
        resolve_power_boost(attacker, defender, &self.catalog, &self.requirements)
    }

    /// Evaluate a requirement code for the designated side.
    #[must_use]
    pub fn check_req_code(
        &self,
        attacker: &PlayerHand,
        defender: &PlayerHand,
        code: RequirementCode,
        is_attacker_side: bool,
    ) -> ReqOutcome {
        let (own, enemy) = if is_attacker_side {
            (attacker, defender)
        } else {
            (defender, attacker)
        };
        self.requirements.evaluate(
            code,
            &ReqContext {
                own,
                enemy,
                catalog: &self.catalog,
            },
        )
    }

    /// Resolve one combat: boost both hands, deal damage to the defender.
    ///
    /// Damage = attacker's offensive stat minus the defender's corresponding
    /// defensive stat (category-selected), floored at zero. Instant boosts
    /// are discarded afterwards; duration effects registered during the
    /// resolution persist. Returns the damage dealt.
    pub fn fight(&mut self, battle: &mut Battle) -> Result<i64, BattleError> {
        self.ensure_not_ended(battle)?;
        if battle.phase != Phase::AttackerResolved {
            return Err(invalid_state("fight", battle.phase));
        }
        let attacker_slot = battle
            .attacker
            .ok_or_else(|| invalid_state("fight", battle.phase))?;
        let defender_slot = attacker_slot.other();

        // Resolve on copies first so a provider failure mutates nothing.
        let (boosted_attacker, boosted_defender) = self.cal_power_boost(
            &battle.side(attacker_slot).hand,
            &battle.side(defender_slot).hand,
        )?;

        let damage = match boosted_attacker.battle_card_type {
            BattleCardType::Normal => {
                boosted_attacker.effective_stats.attack - boosted_defender.effective_stats.defense
            }
            BattleCardType::Special => {
                boosted_attacker.effective_stats.special_attack
                    - boosted_defender.effective_stats.special_defense
            }
        }
        .max(0);

        battle.side_mut(attacker_slot).hand = boosted_attacker;
        battle.side_mut(defender_slot).hand = boosted_defender;

        // Instant boosts were combat-local; what survives is re-derived
        // from base stats plus active duration effects.
        battle.player1.hand.recompute_effective();
        battle.player2.hand.recompute_effective();

        battle.side_mut(defender_slot).hand.take_damage(damage);

        battle.history.push_back(TurnSnapshot {
            turn: battle.current_turn,
            half: battle.half,
            attacker: attacker_slot,
            damage,
            p1_health: battle.player1.hand.health,
            p2_health: battle.player2.hand.health,
            p1_stats: battle.player1.hand.effective_stats,
            p2_stats: battle.player2.hand.effective_stats,
        });

        debug!(
            "battle {} turn {} {:?} half: {:?} dealt {} ({} / {} hp left)",
            battle.id,
            battle.current_turn,
            battle.half,
            attacker_slot,
            damage,
            battle.player1.hand.health,
            battle.player2.hand.health
        );

        if battle.side(defender_slot).hand.is_defeated() {
            battle.winner = Some(battle.side(attacker_slot).addr);
            battle.phase = Phase::Ended;
            debug!(
                "battle {} ended: winner {}",
                battle.id,
                battle.side(attacker_slot).addr
            );
        } else {
            battle.phase = Phase::Fought;
        }

        Ok(damage)
    }

    /// Whether the battle has ended, and the winner if so.
    ///
    /// Pure read. Should both healths ever reach zero in the same
    /// resolution, the current attacker wins.
    #[must_use]
    pub fn check_if_battle_ended(&self, battle: &Battle) -> (bool, Option<PlayerAddr>) {
        let p1_down = battle.player1.hand.is_defeated();
        let p2_down = battle.player2.hand.is_defeated();

        match (p1_down, p2_down) {
            (false, false) => (false, None),
            (true, false) => (true, Some(battle.player2.addr)),
            (false, true) => (true, Some(battle.player1.addr)),
            (true, true) => (true, battle.attacker.map(|slot| battle.side(slot).addr)),
        }
    }

    /// Advance past a resolved combat.
    ///
    /// After the first half: move to the second half and re-resolve roles
    /// against current effective stats (the previous defender may now be
    /// attacker). After the second half: roll the turn counter and hand
    /// control back for a new `go_for_new_turn`.
    pub fn resolve_halves(&mut self, battle: &mut Battle) -> Result<(), BattleError> {
        self.ensure_not_ended(battle)?;
        if battle.phase != Phase::Fought {
            return Err(invalid_state("resolve_halves", battle.phase));
        }

        match battle.half {
            TurnHalf::First => {
                battle.half = TurnHalf::Second;
                self.assign_roles_and_draw(battle);
                battle.phase = Phase::AttackerResolved;
            }
            TurnHalf::Second => {
                battle.current_turn += 1;
                battle.half = TurnHalf::First;
                battle.attacker = None;
                battle.phase = Phase::HalfResolved;
            }
        }
        Ok(())
    }

    /// Drive a battle to completion and return the winner.
    ///
    /// Performs exactly the manual step sequence, so intermediate states
    /// (and snapshots) are identical to stepping by hand.
    pub fn go_for_battle(&mut self, battle: &mut Battle) -> Result<PlayerAddr, BattleError> {
        loop {
            match battle.phase {
                Phase::Created | Phase::HalfResolved => self.go_for_new_turn(battle)?,
                Phase::NewTurn => self.resolve_attacker(battle)?,
                Phase::AttackerResolved => {
                    self.fight(battle)?;
                }
                Phase::Fought => self.resolve_halves(battle)?,
                Phase::Ended => break,
            }

            if battle.current_turn > self.config.max_turns {
                return Err(invalid_state("go_for_battle", battle.phase));
            }
        }

        battle
            .winner
            .ok_or_else(|| invalid_state("go_for_battle", battle.phase))
    }

    fn ensure_not_ended(&self, battle: &Battle) -> Result<(), BattleError> {
        if battle.is_ended() {
            Err(BattleError::Terminal(battle.id))
        } else {
            Ok(())
        }
    }
}

fn invalid_state(operation: &'static str, phase: Phase) -> BattleError {
    BattleError::InvalidState {
        operation,
        found: phase.name(),
    }
}
