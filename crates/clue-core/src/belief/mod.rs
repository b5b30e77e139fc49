//! Agent belief tracking for the hidden envelope.
//!
//! - `knowledge`: candidate sets, per-seat hand beliefs, and the deduction
//!   pass that runs after every recorded observation.

mod knowledge;

pub use knowledge::{AgentKnowledge, BeliefError, BeliefSubject, HandBeliefs};
