//! Effect resolution - computing the net stat boost for one combat.
//!
//! `resolve_power_boost` is a pure function of (attacker hand, defender
//! hand): it never touches randomness, so replaying it on equal inputs
//! yields equal outputs. The battle engine invokes it exactly once per
//! combat resolution; it is also exposed directly for callers that want to
//! preview a boost.
//!
//! ## Ordering
//!
//! The attacker's drawn cards are processed first, then the defender's,
//! each in hand-draw order. Instant effects compose additively on top of
//! earlier ones within the same resolution.

use crate::battle::PlayerHand;
use crate::cards::{CardCatalog, SupportCardDef, SupportCardId};
use crate::effects::effect::{ActiveEffect, DurationEffect, Side};
use crate::effects::requirement::{ReqContext, RequirementRegistry};
use crate::error::BattleError;

/// Index of the acting hand within the working pair.
const ATTACKER: usize = 0;
const DEFENDER: usize = 1;

/// Apply both hands' drawn support cards and return the boosted hands.
///
/// Instant effects modify the target hand's effective stats for this
/// resolution only; duration effects register `ActiveEffect`s that persist.
/// Fails without partial output if a drawn card cannot be resolved.
pub fn resolve_power_boost(
    attacker: &PlayerHand,
    defender: &PlayerHand,
    catalog: &dyn CardCatalog,
    requirements: &RequirementRegistry,
) -> Result<(PlayerHand, PlayerHand), BattleError> {
    let mut hands = [attacker.clone(), defender.clone()];

    for acting in [ATTACKER, DEFENDER] {
        let drawn: Vec<SupportCardId> = hands[acting].current_hand.to_vec();

        for card_id in drawn {
            let def = catalog.support_card(card_id)?;
            apply_card(&mut hands, acting, card_id, def, catalog, requirements);
        }
    }

    let [attacker, defender] = hands;
    Ok((attacker, defender))
}

/// Apply one drawn card's effects to the working hands.
fn apply_card(
    hands: &mut [PlayerHand; 2],
    acting: usize,
    card_id: SupportCardId,
    def: &SupportCardDef,
    catalog: &dyn CardCatalog,
    requirements: &RequirementRegistry,
) {
    for instant in &def.instant_effects {
        let outcome = requirements.evaluate(
            instant.req,
            &ReqContext {
                own: &hands[acting],
                enemy: &hands[1 - acting],
                catalog,
            },
        );
        if !outcome.triggered {
            continue;
        }

        let power = requirements.scaled_power(instant.power, outcome.count);
        let target = target_index(acting, instant.side);
        hands[target].effective_stats.apply(instant.stat, power);
    }

    if let Some(duration) = def.duration_effect {
        let outcome = requirements.evaluate(
            duration.req,
            &ReqContext {
                own: &hands[acting],
                enemy: &hands[1 - acting],
                catalog,
            },
        );
        if outcome.triggered {
            let power = requirements.scaled_power(duration.power, outcome.count);
            let target = target_index(acting, duration.side);
            register_duration(&mut hands[target], card_id, def, duration, power);
        }
    }
}

fn target_index(acting: usize, side: Side) -> usize {
    match side {
        Side::Own => acting,
        Side::Enemy => 1 - acting,
    }
}

/// Register a duration effect on the target hand.
///
/// Merge rules:
/// - source not yet active: append a new `ActiveEffect` and apply its delta
///   to the current combat stats
/// - source active and the card is `unstackable`: keep the single entry;
///   refresh its countdown unless the card is `unresettable`
/// - source active and stackable: append another independent instance
fn register_duration(
    hand: &mut PlayerHand,
    source: SupportCardId,
    def: &SupportCardDef,
    duration: DurationEffect,
    power: i64,
) {
    let existing = hand
        .active_effects
        .iter_mut()
        .find(|e| e.source == source);

    match existing {
        Some(entry) if def.unstackable => {
            if !def.unresettable {
                entry.remaining_turns = duration.num_turns;
            }
        }
        _ => {
            hand.active_effects.push(ActiveEffect {
                source,
                remaining_turns: duration.num_turns,
                power,
                stat: duration.stat,
                side: duration.side,
            });
            hand.effective_stats.apply(duration.stat, power);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{
        BattleCardId, BattleCardType, CardRoster, SupportCardDef, SupportCardType,
    };
    use crate::core::{StatKind, StatSet};
    use crate::effects::{InstantEffect, RequirementCode};

    fn hand(sequence: Vec<SupportCardId>) -> PlayerHand {
        PlayerHand::new(
            BattleCardId::new(1),
            BattleCardType::Normal,
            450,
            StatSet::new(10, 20, 10, 20, 10, 5),
            sequence,
        )
    }

    fn instant(power: i64, stat: StatKind, side: Side) -> InstantEffect {
        InstantEffect {
            power,
            stat,
            side,
            req: RequirementCode::NONE,
        }
    }

    fn roster() -> CardRoster {
        let mut roster = CardRoster::new();

        // +2 attack for the playing side.
        roster.add_support_card(
            SupportCardDef::new(SupportCardId::new(1), SupportCardType::new(0), "Fast Attack")
                .with_instant(instant(2, StatKind::Attack, Side::Own)),
        );
        // -3 defense against the enemy.
        roster.add_support_card(
            SupportCardDef::new(SupportCardId::new(2), SupportCardType::new(0), "Armor Break")
                .with_instant(instant(-3, StatKind::Defense, Side::Enemy)),
        );
        // +4 speed for 2 turns, unstackable.
        roster.add_support_card(
            SupportCardDef::new(SupportCardId::new(3), SupportCardType::new(1), "Quicken")
                .with_duration(DurationEffect {
                    power: 4,
                    num_turns: 2,
                    stat: StatKind::Speed,
                    side: Side::Own,
                    req: RequirementCode::NONE,
                })
                .unstackable(),
        );
        // +1 intelligence for 3 turns, unstackable and unresettable.
        roster.add_support_card(
            SupportCardDef::new(SupportCardId::new(4), SupportCardType::new(1), "Focus")
                .with_duration(DurationEffect {
                    power: 1,
                    num_turns: 3,
                    stat: StatKind::Intelligence,
                    side: Side::Own,
                    req: RequirementCode::NONE,
                })
                .unstackable()
                .unresettable(),
        );
        // +2 attack for 2 turns, stackable.
        roster.add_support_card(
            SupportCardDef::new(SupportCardId::new(5), SupportCardType::new(0), "Rally")
                .with_duration(DurationEffect {
                    power: 2,
                    num_turns: 2,
                    stat: StatKind::Attack,
                    side: Side::Own,
                    req: RequirementCode::NONE,
                }),
        );

        roster
    }

    fn draw(h: &mut PlayerHand, n: usize) {
        h.effective_stats.intelligence = n as i64;
        h.draw_hand();
    }

    #[test]
    fn test_instant_effects_compose_additively() {
        let roster = roster();
        let requirements = RequirementRegistry::standard();

        let mut attacker = hand(vec![SupportCardId::new(1), SupportCardId::new(1)]);
        draw(&mut attacker, 2);
        let defender = hand(vec![]);

        let (boosted, _) =
            resolve_power_boost(&attacker, &defender, &roster, &requirements).unwrap();

        // Two +2 attack boosts on top of base 10.
        assert_eq!(boosted.effective_stats.attack, 14);
    }

    #[test]
    fn test_enemy_side_targets_opponent() {
        let roster = roster();
        let requirements = RequirementRegistry::standard();

        let mut attacker = hand(vec![SupportCardId::new(2)]);
        draw(&mut attacker, 1);
        let defender = hand(vec![]);

        let (boosted_attacker, boosted_defender) =
            resolve_power_boost(&attacker, &defender, &roster, &requirements).unwrap();

        assert_eq!(boosted_attacker.effective_stats.defense, 10);
        assert_eq!(boosted_defender.effective_stats.defense, 7);
    }

    #[test]
    fn test_defender_cards_apply_after_attacker() {
        let roster = roster();
        let requirements = RequirementRegistry::standard();

        let mut attacker = hand(vec![SupportCardId::new(2)]);
        draw(&mut attacker, 1);
        let mut defender = hand(vec![SupportCardId::new(1)]);
        draw(&mut defender, 1);

        let (_, boosted_defender) =
            resolve_power_boost(&attacker, &defender, &roster, &requirements).unwrap();

        // Defender lost 3 defense to the attacker's card and gained its own
        // +2 attack.
        assert_eq!(boosted_defender.effective_stats.defense, 7);
        assert_eq!(boosted_defender.effective_stats.attack, 12);
    }

    #[test]
    fn test_duration_effect_registers_and_applies() {
        let roster = roster();
        let requirements = RequirementRegistry::standard();

        let mut attacker = hand(vec![SupportCardId::new(3)]);
        draw(&mut attacker, 1);
        let defender = hand(vec![]);

        let (boosted, _) =
            resolve_power_boost(&attacker, &defender, &roster, &requirements).unwrap();

        assert_eq!(boosted.active_effects.len(), 1);
        assert_eq!(boosted.active_effects[0].remaining_turns, 2);
        // Delta also counts for the current combat.
        assert_eq!(boosted.effective_stats.speed, 14);
    }

    #[test]
    fn test_unstackable_keeps_single_entry() {
        let roster = roster();
        let requirements = RequirementRegistry::standard();

        let mut attacker = hand(vec![SupportCardId::new(3), SupportCardId::new(3)]);
        draw(&mut attacker, 2);
        let defender = hand(vec![]);

        let (boosted, _) =
            resolve_power_boost(&attacker, &defender, &roster, &requirements).unwrap();

        assert_eq!(boosted.active_effects.len(), 1);
        // Delta applied once, not twice.
        assert_eq!(boosted.effective_stats.speed, 14);
    }

    #[test]
    fn test_unstackable_refreshes_countdown() {
        let roster = roster();
        let requirements = RequirementRegistry::standard();

        // Already active with 1 turn left.
        let mut attacker = hand(vec![SupportCardId::new(3)]);
        attacker.active_effects.push(ActiveEffect {
            source: SupportCardId::new(3),
            remaining_turns: 1,
            power: 4,
            stat: StatKind::Speed,
            side: Side::Own,
        });
        attacker.recompute_effective();
        draw(&mut attacker, 1);
        let defender = hand(vec![]);

        let (boosted, _) =
            resolve_power_boost(&attacker, &defender, &roster, &requirements).unwrap();

        assert_eq!(boosted.active_effects.len(), 1);
        assert_eq!(boosted.active_effects[0].remaining_turns, 2); // refreshed
    }

    #[test]
    fn test_unresettable_ignores_refresh() {
        let roster = roster();
        let requirements = RequirementRegistry::standard();

        let mut attacker = hand(vec![SupportCardId::new(4)]);
        attacker.active_effects.push(ActiveEffect {
            source: SupportCardId::new(4),
            remaining_turns: 1,
            power: 1,
            stat: StatKind::Intelligence,
            side: Side::Own,
        });
        attacker.recompute_effective();
        draw(&mut attacker, 1);
        let defender = hand(vec![]);

        let (boosted, _) =
            resolve_power_boost(&attacker, &defender, &roster, &requirements).unwrap();

        assert_eq!(boosted.active_effects.len(), 1);
        assert_eq!(boosted.active_effects[0].remaining_turns, 1); // untouched
    }

    #[test]
    fn test_stackable_appends_instances() {
        let roster = roster();
        let requirements = RequirementRegistry::standard();

        let mut attacker = hand(vec![SupportCardId::new(5), SupportCardId::new(5)]);
        draw(&mut attacker, 2);
        let defender = hand(vec![]);

        let (boosted, _) =
            resolve_power_boost(&attacker, &defender, &roster, &requirements).unwrap();

        assert_eq!(boosted.active_effects.len(), 2);
        assert_eq!(boosted.effective_stats.attack, 14); // both deltas
    }

    #[test]
    fn test_idempotent_for_equal_inputs() {
        let roster = roster();
        let requirements = RequirementRegistry::standard();

        let mut attacker = hand(vec![SupportCardId::new(1), SupportCardId::new(3)]);
        draw(&mut attacker, 2);
        let mut defender = hand(vec![SupportCardId::new(2)]);
        draw(&mut defender, 1);

        let first = resolve_power_boost(&attacker, &defender, &roster, &requirements).unwrap();
        let second = resolve_power_boost(&attacker, &defender, &roster, &requirements).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_card_fails_whole_resolution() {
        let roster = roster();
        let requirements = RequirementRegistry::standard();

        let mut attacker = hand(vec![SupportCardId::new(99)]);
        draw(&mut attacker, 1);
        let defender = hand(vec![]);

        let err = resolve_power_boost(&attacker, &defender, &roster, &requirements).unwrap_err();
        assert!(err.is_not_found());
    }
}
