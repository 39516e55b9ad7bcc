//! Ordering guard for overlapping catalog fetches.

/// Monotonic id handed to every fetch the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Decides whether a fetch result may still be applied.
///
/// A response is stale when its ticket is not newer than the last resolved
/// one, or when a wholesale reload was started after it was issued.
#[derive(Debug, Default, Clone)]
pub struct FetchSequencer {
    issued: u64,
    last_resolved: u64,
    floor: u64,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for a fetch whose result extends the current list.
    pub fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Ticket for a fetch whose result replaces the list. Everything issued
    /// before it becomes stale.
    pub fn issue_replacing(&mut self) -> FetchTicket {
        let ticket = self.issue();
        self.floor = ticket.0;
        ticket
    }

    /// Invalidate every outstanding ticket without issuing a new one.
    pub fn supersede(&mut self) {
        self.floor = self.issued + 1;
    }

    pub fn accepts(&self, ticket: FetchTicket) -> bool {
        ticket.0 > self.last_resolved && ticket.0 >= self.floor
    }

    pub fn resolve(&mut self, ticket: FetchTicket) {
        self.last_resolved = self.last_resolved.max(ticket.0);
    }

    pub fn latest(&self) -> Option<FetchTicket> {
        (self.issued > 0).then_some(FetchTicket(self.issued))
    }
}

#[cfg(test)]
mod tests {
    use super::FetchSequencer;

    #[test]
    fn older_response_is_rejected_after_newer_one_lands() {
        let mut seq = FetchSequencer::new();
        let first = seq.issue();
        let second = seq.issue();

        assert!(seq.accepts(second));
        seq.resolve(second);
        assert!(!seq.accepts(first));
    }

    #[test]
    fn replacing_fetch_invalidates_everything_before_it() {
        let mut seq = FetchSequencer::new();
        let append = seq.issue();
        let search = seq.issue_replacing();
        assert!(!seq.accepts(append));
        assert!(seq.accepts(search));

        let newer_search = seq.issue_replacing();
        assert!(!seq.accepts(search));
        assert!(seq.accepts(newer_search));
    }

    #[test]
    fn supersede_drops_all_outstanding_tickets() {
        let mut seq = FetchSequencer::new();
        let pending = seq.issue_replacing();
        seq.supersede();
        assert!(!seq.accepts(pending));
        let next = seq.issue();
        assert!(seq.accepts(next));
    }
}
