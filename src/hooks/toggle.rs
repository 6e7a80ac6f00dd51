//! Boolean on/off state.

/// A boolean with intent-revealing setters.
///
/// # Example
///
/// ```rust
/// use hooklab::hooks::Toggle;
///
/// let mut modal = Toggle::default();
/// modal.toggle();
/// assert!(modal.get());
/// modal.set_off();
/// assert!(!modal.get());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggle {
    value: bool,
}

impl Toggle {
    /// Creates a toggle starting at `initial`.
    #[must_use]
    pub const fn new(initial: bool) -> Self {
        Self { value: initial }
    }

    /// Current state.
    #[must_use]
    pub const fn get(self) -> bool {
        self.value
    }

    /// Flips the value and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.value = !self.value;
        self.value
    }

    /// Forces the toggle on.
    pub fn set_on(&mut self) {
        self.value = true;
    }

    /// Forces the toggle off.
    pub fn set_off(&mut self) {
        self.value = false;
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_from_initial() {
        let mut switch = Toggle::new(true);
        assert!(!switch.toggle());
        assert!(switch.toggle());
    }

    #[test]
    fn setters_are_idempotent() {
        let mut switch = Toggle::from(false);
        switch.set_on();
        switch.set_on();
        assert!(switch.get());
        switch.set_off();
        switch.set_off();
        assert!(!switch.get());
    }
}
