//! Effect system: instant/duration effects, requirement codes, resolution.
//!
//! Effect stacking is a tagged-record list with explicit merge rules, not an
//! inheritance hierarchy: each `ActiveEffect` is a plain record and merging
//! is a pure function over the list.

pub mod effect;
pub mod requirement;
pub mod resolver;

pub use effect::{ActiveEffect, DurationEffect, InstantEffect, Side};
pub use requirement::{ReqContext, ReqOutcome, RequirementCode, RequirementRegistry};
pub use resolver::resolve_power_boost;
