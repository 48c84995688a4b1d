//! View state.
//!
//! Each screen owns its data, its filter state, and a load lifecycle. The
//! async work itself runs wherever the host runtime puts it; the view only
//! records outcomes, and the [`LoadGate`] makes sure an outcome from a
//! superseded load can never overwrite a newer one.

pub mod admin;
pub mod audit;
pub mod consents;
pub mod dashboard;
pub mod patients;
pub mod records;
pub mod reports;

/// Where a view is in its load lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Load failed. The view still renders, with empty collections and an
    /// error banner.
    Failed,
}

/// Proof of which load attempt a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Generation counter guarding against stale load results. Starting a new
/// load bumps the generation; a result is only applied if it carries the
/// current generation's ticket. A rapid navigate-away-and-back therefore
/// cannot end with old data overwriting new.
#[derive(Debug, Default)]
pub struct LoadGate {
    generation: u64,
}

impl LoadGate {
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket(self.generation)
    }

    pub fn admits(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Discard all in-flight loads without starting a new one.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_admits_only_the_latest_ticket() {
        let mut gate = LoadGate::default();
        let first = gate.begin();
        let second = gate.begin();
        assert!(!gate.admits(first));
        assert!(gate.admits(second));
    }

    #[test]
    fn invalidate_discards_everything_in_flight() {
        let mut gate = LoadGate::default();
        let ticket = gate.begin();
        gate.invalidate();
        assert!(!gate.admits(ticket));
    }

    #[test]
    fn phase_starts_idle() {
        assert_eq!(ViewPhase::default(), ViewPhase::Idle);
    }
}
