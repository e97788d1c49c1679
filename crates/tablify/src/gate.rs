use crate::sort::SortDirection;

/// Adapter state for the grid widget's first layout pass.
///
/// The widget reports its current sort direction inverted, and fires a
/// spurious sort request, until the view has finished its first mount. While
/// the gate is disabled the reported direction is flipped back and outgoing
/// sort requests are dropped. Re-validate this when the grid widget changes.
///
/// The gate opens at most once. After teardown it stays shut, so a mount
/// callback that arrives late cannot revive a dead view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortGate {
    #[default]
    Disabled,
    Enabled,
    TornDown,
}

impl SortGate {
    pub fn mount(&mut self) {
        if *self == Self::Disabled {
            *self = Self::Enabled;
        }
    }

    pub fn unmount(&mut self) {
        *self = Self::TornDown;
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }

    /// The "ascending" flag handed to the grid for the current sort.
    pub fn reported_ascending(self, direction: SortDirection) -> bool {
        match self {
            Self::Enabled => direction.is_ascending(),
            Self::Disabled | Self::TornDown => !direction.is_ascending(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disabled_and_follows_mount_lifecycle() {
        let mut gate = SortGate::default();
        assert!(!gate.is_enabled());

        gate.mount();
        assert!(gate.is_enabled());

        gate.unmount();
        assert!(!gate.is_enabled());
    }

    #[test]
    fn stays_shut_once_torn_down() {
        let mut gate = SortGate::default();
        gate.mount();
        gate.unmount();
        gate.mount();
        assert!(!gate.is_enabled());
        assert_eq!(gate, SortGate::TornDown);
    }

    #[test]
    fn repeated_mount_is_harmless() {
        let mut gate = SortGate::default();
        gate.mount();
        gate.mount();
        assert!(gate.is_enabled());
    }

    #[test]
    fn inverts_reported_direction_until_mounted() {
        let mut gate = SortGate::default();
        assert!(!gate.reported_ascending(SortDirection::Asc));
        assert!(gate.reported_ascending(SortDirection::Desc));

        gate.mount();
        assert!(gate.reported_ascending(SortDirection::Asc));
        assert!(!gate.reported_ascending(SortDirection::Desc));
    }
}
