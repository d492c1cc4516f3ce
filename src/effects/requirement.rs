//! Requirement codes.
//!
//! A requirement code names a condition that gates or scales a support
//! card's effect: deck-composition or play-history predicates evaluated
//! against the two hands at resolution time. Codes are opaque numbers in the
//! catalog; the registry maps each code to an evaluator.
//!
//! The exact formula tying the outcome's count to an effect's power is a
//! pluggable strategy on the registry. The default multiplies the base power
//! by the count.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::battle::PlayerHand;
use crate::cards::{CardCatalog, SupportCardType};

/// Identifier naming a requirement condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequirementCode(pub u8);

impl RequirementCode {
    /// No requirement: always triggered, count 1.
    pub const NONE: RequirementCode = RequirementCode(0);

    /// Create a new requirement code.
    #[must_use]
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    /// Get the raw code value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for RequirementCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReqCode({})", self.0)
    }
}

/// Result of evaluating a requirement code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReqOutcome {
    /// Whether the condition holds.
    pub triggered: bool,
    /// Number of qualifying occurrences; count-based boosts scale by this.
    pub count: u32,
}

impl ReqOutcome {
    /// A failed requirement.
    pub const MISS: ReqOutcome = ReqOutcome {
        triggered: false,
        count: 0,
    };

    /// A plain hit with a single occurrence.
    pub const HIT: ReqOutcome = ReqOutcome {
        triggered: true,
        count: 1,
    };
}

/// Everything an evaluator may inspect.
///
/// `own` is the hand playing the card; `enemy` is the opposing hand.
pub struct ReqContext<'a> {
    pub own: &'a PlayerHand,
    pub enemy: &'a PlayerHand,
    pub catalog: &'a dyn CardCatalog,
}

type ReqEvaluator = Box<dyn Fn(&ReqContext<'_>) -> ReqOutcome + Send + Sync>;

/// Registry of requirement evaluators plus the power-scaling strategy.
pub struct RequirementRegistry {
    evaluators: FxHashMap<RequirementCode, ReqEvaluator>,
    scale: Box<dyn Fn(i64, u32) -> i64 + Send + Sync>,
}

impl RequirementRegistry {
    /// Create an empty registry with the default scaling (power x count).
    ///
    /// Unknown codes evaluate to a miss, so an effect gated on an
    /// unregistered code simply never fires.
    #[must_use]
    pub fn new() -> Self {
        Self {
            evaluators: FxHashMap::default(),
            scale: Box::new(|power, count| power * i64::from(count)),
        }
    }

    /// Registry with the standard codes installed.
    ///
    /// - 0: unconditional, count 1
    /// - 1: own effective intelligence is at most 5
    /// - 2: own side has active duration effects (count = how many)
    /// - 3: number of category-0 support cards the own side has played
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();

        registry.register(RequirementCode::NONE, |_| ReqOutcome::HIT);

        registry.register(RequirementCode::new(1), |ctx| {
            if ctx.own.effective_stats.intelligence <= 5 {
                ReqOutcome::HIT
            } else {
                ReqOutcome::MISS
            }
        });

        registry.register(RequirementCode::new(2), |ctx| {
            let count = ctx.own.active_effects.len() as u32;
            ReqOutcome {
                triggered: count > 0,
                count,
            }
        });

        registry.register(RequirementCode::new(3), |ctx| {
            let count = played_of_type(ctx, SupportCardType::new(0));
            ReqOutcome {
                triggered: count > 0,
                count,
            }
        });

        registry
    }

    /// Register (or replace) an evaluator for a code.
    pub fn register(
        &mut self,
        code: RequirementCode,
        evaluator: impl Fn(&ReqContext<'_>) -> ReqOutcome + Send + Sync + 'static,
    ) {
        self.evaluators.insert(code, Box::new(evaluator));
    }

    /// Replace the power-scaling strategy.
    #[must_use]
    pub fn with_scaling(
        mut self,
        scale: impl Fn(i64, u32) -> i64 + Send + Sync + 'static,
    ) -> Self {
        self.scale = Box::new(scale);
        self
    }

    /// Evaluate a code against the given hands.
    #[must_use]
    pub fn evaluate(&self, code: RequirementCode, ctx: &ReqContext<'_>) -> ReqOutcome {
        match self.evaluators.get(&code) {
            Some(evaluator) => evaluator(ctx),
            None => ReqOutcome::MISS,
        }
    }

    /// Scale a base power by a requirement outcome's count.
    #[must_use]
    pub fn scaled_power(&self, power: i64, count: u32) -> i64 {
        (self.scale)(power, count)
    }
}

impl Default for RequirementRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Count cards of a category the own side has played so far this battle.
fn played_of_type(ctx: &ReqContext<'_>, card_type: SupportCardType) -> u32 {
    ctx.own
        .played_so_far()
        .iter()
        .filter(|id| {
            ctx.catalog
                .support_card(**id)
                .map(|def| def.card_type == card_type)
                .unwrap_or(false)
        })
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::PlayerHand;
    use crate::cards::{BattleCardId, BattleCardType, CardRoster, SupportCardDef, SupportCardId};
    use crate::core::{StatKind, StatSet};
    use crate::effects::{ActiveEffect, Side};

    fn hand_with_intelligence(inte: i64) -> PlayerHand {
        let stats = StatSet::new(10, 20, 10, 20, 10, inte);
        PlayerHand::new(BattleCardId::new(1), BattleCardType::Normal, 450, stats, vec![])
    }

    fn roster_with_types() -> CardRoster {
        let mut roster = CardRoster::new();
        roster.add_support_card(SupportCardDef::new(
            SupportCardId::new(1),
            SupportCardType::new(0),
            "Fast Attack",
        ));
        roster.add_support_card(SupportCardDef::new(
            SupportCardId::new(2),
            SupportCardType::new(1),
            "Block",
        ));
        roster
    }

    #[test]
    fn test_code_zero_always_hits() {
        let registry = RequirementRegistry::standard();
        let roster = CardRoster::new();
        let own = hand_with_intelligence(5);
        let enemy = hand_with_intelligence(6);
        let ctx = ReqContext {
            own: &own,
            enemy: &enemy,
            catalog: &roster,
        };

        let outcome = registry.evaluate(RequirementCode::NONE, &ctx);
        assert!(outcome.triggered);
        assert_eq!(outcome.count, 1);
    }

    #[test]
    fn test_intelligence_threshold() {
        let registry = RequirementRegistry::standard();
        let roster = CardRoster::new();
        let low = hand_with_intelligence(5);
        let high = hand_with_intelligence(6);

        let ctx = ReqContext {
            own: &low,
            enemy: &high,
            catalog: &roster,
        };
        assert!(registry.evaluate(RequirementCode::new(1), &ctx).triggered);

        let ctx = ReqContext {
            own: &high,
            enemy: &low,
            catalog: &roster,
        };
        assert!(!registry.evaluate(RequirementCode::new(1), &ctx).triggered);
    }

    #[test]
    fn test_active_effect_count() {
        let registry = RequirementRegistry::standard();
        let roster = CardRoster::new();
        let mut own = hand_with_intelligence(5);
        let enemy = hand_with_intelligence(6);

        own.active_effects.push(ActiveEffect {
            source: SupportCardId::new(9),
            remaining_turns: 2,
            power: 1,
            stat: StatKind::Speed,
            side: Side::Own,
        });
        own.active_effects.push(ActiveEffect {
            source: SupportCardId::new(10),
            remaining_turns: 1,
            power: -1,
            stat: StatKind::Defense,
            side: Side::Own,
        });

        let ctx = ReqContext {
            own: &own,
            enemy: &enemy,
            catalog: &roster,
        };
        let outcome = registry.evaluate(RequirementCode::new(2), &ctx);
        assert!(outcome.triggered);
        assert_eq!(outcome.count, 2);
    }

    #[test]
    fn test_played_type_count() {
        let registry = RequirementRegistry::standard();
        let roster = roster_with_types();

        let sequence = vec![
            SupportCardId::new(1),
            SupportCardId::new(2),
            SupportCardId::new(1),
            SupportCardId::new(1),
        ];
        let stats = StatSet::new(10, 20, 10, 20, 10, 5);
        let mut own =
            PlayerHand::new(BattleCardId::new(1), BattleCardType::Normal, 450, stats, sequence);
        let enemy = hand_with_intelligence(6);

        // Nothing played yet.
        let ctx = ReqContext {
            own: &own,
            enemy: &enemy,
            catalog: &roster,
        };
        assert!(!registry.evaluate(RequirementCode::new(3), &ctx).triggered);

        // Three cards played: two of category 0.
        own.played_card_count = 3;
        let ctx = ReqContext {
            own: &own,
            enemy: &enemy,
            catalog: &roster,
        };
        let outcome = registry.evaluate(RequirementCode::new(3), &ctx);
        assert!(outcome.triggered);
        assert_eq!(outcome.count, 2);
    }

    #[test]
    fn test_unknown_code_misses() {
        let registry = RequirementRegistry::standard();
        let roster = CardRoster::new();
        let own = hand_with_intelligence(5);
        let enemy = hand_with_intelligence(6);
        let ctx = ReqContext {
            own: &own,
            enemy: &enemy,
            catalog: &roster,
        };

        let outcome = registry.evaluate(RequirementCode::new(200), &ctx);
        assert!(!outcome.triggered);
    }

    #[test]
    fn test_custom_scaling() {
        let registry = RequirementRegistry::standard().with_scaling(|power, count| {
            power + i64::from(count)
        });

        assert_eq!(registry.scaled_power(3, 4), 7);
    }

    #[test]
    fn test_default_scaling_multiplies() {
        let registry = RequirementRegistry::standard();
        assert_eq!(registry.scaled_power(3, 4), 12);
        assert_eq!(registry.scaled_power(-2, 3), -6);
    }
}
