//! Session-ephemeral gate in front of the authoring surface.
//!
//! The flag lives in process memory only, scoped to one run, and is never
//! persisted. The grading core has no dependency on it. Credentials are the
//! hardcoded pair from the seeded deployment; a mismatch is informational,
//! not an error.

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "password";

/// Gate state for the administrative editing surface.
#[derive(Debug, Default)]
pub struct AdminGate {
    unlocked: bool,
}

impl AdminGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to unlock with a username/password pair. Returns whether the
    /// gate is now open.
    pub fn unlock(&mut self, username: &str, password: &str) -> bool {
        if username == ADMIN_USERNAME && password == ADMIN_PASSWORD {
            self.unlocked = true;
        }
        self.unlocked
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Log out of the authoring surface.
    pub fn lock(&mut self) {
        self.unlocked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_locked() {
        assert!(!AdminGate::new().is_unlocked());
    }

    #[test]
    fn unlocks_only_with_matching_credentials() {
        let mut gate = AdminGate::new();
        assert!(!gate.unlock("admin", "wrong"));
        assert!(!gate.unlock("root", "password"));
        assert!(!gate.is_unlocked());

        assert!(gate.unlock("admin", "password"));
        assert!(gate.is_unlocked());
    }

    #[test]
    fn lock_resets_the_flag() {
        let mut gate = AdminGate::new();
        gate.unlock("admin", "password");
        gate.lock();
        assert!(!gate.is_unlocked());

        // A failed attempt after lock does not reopen it.
        assert!(!gate.unlock("admin", "nope"));
    }
}
