//! Current actor with a fixed ID.

use formsteps_core::CurrentActor;

/// Actor that always reports the same user ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedActor(pub u64);

impl CurrentActor for FixedActor {
    fn id(&self) -> u64 {
        self.0
    }
}
