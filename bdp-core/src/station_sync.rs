//! Reconciliation semantics of a station sync.

/// How the writer reconciles the stations of a scope against a submitted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationSyncMode {
    /// Insert or update the given stations; never deactivate anything.
    Upsert,
    /// Insert or activate all given stations; existing stations stay as they are.
    ActivateOnly,
    /// Activate all given stations and deactivate every other station of the scope.
    Reconcile,
}

impl StationSyncMode {
    /// Map the two wire flags to a mode.
    ///
    /// `only_activate` is only meaningful together with `sync_state`; the
    /// combination `(false, true)` resolves to `Upsert`.
    #[must_use]
    pub const fn from_flags(sync_state: bool, only_activate: bool) -> Self {
        match (sync_state, only_activate) {
            (false, _) => Self::Upsert,
            (true, true) => Self::ActivateOnly,
            (true, false) => Self::Reconcile,
        }
    }

    /// True for the flag combination that carries no defined remote meaning.
    #[must_use]
    pub const fn is_ignored_combination(sync_state: bool, only_activate: bool) -> bool {
        !sync_state && only_activate
    }

    /// Value of the `syncState` query flag.
    #[must_use]
    pub const fn sync_state(self) -> bool {
        !matches!(self, Self::Upsert)
    }

    /// Value of the `onlyActivation` query flag.
    #[must_use]
    pub const fn only_activation(self) -> bool {
        matches!(self, Self::ActivateOnly)
    }

    /// True if stations missing from the submitted list get deactivated.
    #[must_use]
    pub const fn deactivates_missing(self) -> bool {
        matches!(self, Self::Reconcile)
    }
}
