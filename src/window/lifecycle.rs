//! Per-instance show/hide state machine
//!
//! `Hidden → Showing → Shown → Hiding → Hidden`. The two animated phases
//! lock the instance: no other transition may start until the animator
//! reports completion. Each transition carries a ticket, and only the
//! completion that presents the current ticket advances the phase, so a
//! late completion for a transition that was cut short by a direct hide is
//! ignored.

use serde::Serialize;

/// Visibility phase of a window instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Hidden,
    Showing,
    Shown,
    Hiding,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Hidden
    }
}

/// Ticket identifying one animated transition.
pub type Ticket = u64;

#[derive(Debug, Default, Clone)]
pub struct Lifecycle {
    phase: Phase,
    ticket: Option<Ticket>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Mid-transition instances reject new transitions.
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, Phase::Showing | Phase::Hiding)
    }

    #[cfg(test)]
    fn pending_ticket(&self) -> Option<Ticket> {
        self.ticket
    }

    /// `Hidden → Showing`. Returns the current phase on rejection.
    pub fn begin_show(&mut self, ticket: Ticket) -> Result<(), Phase> {
        if self.phase != Phase::Hidden {
            return Err(self.phase);
        }
        self.phase = Phase::Showing;
        self.ticket = Some(ticket);
        Ok(())
    }

    /// `Shown → Hiding`. Returns the current phase on rejection.
    pub fn begin_hide(&mut self, ticket: Ticket) -> Result<(), Phase> {
        if self.phase != Phase::Shown {
            return Err(self.phase);
        }
        self.phase = Phase::Hiding;
        self.ticket = Some(ticket);
        Ok(())
    }

    /// Completes the pending transition if `ticket` is current.
    ///
    /// Returns the phase that was entered, or `None` for a stale ticket.
    pub fn finish(&mut self, ticket: Ticket) -> Option<Phase> {
        if self.ticket != Some(ticket) {
            return None;
        }
        self.ticket = None;
        self.phase = match self.phase {
            Phase::Showing => Phase::Shown,
            Phase::Hiding => Phase::Hidden,
            settled => settled,
        };
        Some(self.phase)
    }

    /// Instantaneous `* → Hidden`, abandoning any pending transition.
    pub fn force_hidden(&mut self) -> Phase {
        let previous = self.phase;
        self.phase = Phase::Hidden;
        self.ticket = None;
        previous
    }
}
