//! Player health pool

/// Clamped health pool.
///
/// Values never leave `[0, max]`; reaching zero is logged once. Display is
/// an external concern.
#[derive(Debug, Clone, Copy)]
pub struct Health {
    current: f32,
    max: f32,
    death_reported: bool,
}

impl Health {
    /// Create a full pool
    #[must_use]
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            max,
            death_reported: false,
        }
    }

    /// Current health
    #[must_use]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Maximum health
    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Current health as a fraction of the maximum
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    /// Whether the pool is above zero
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Subtract damage, clamped at zero
    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount).clamp(0.0, self.max);
        if !self.is_alive() && !self.death_reported {
            self.death_reported = true;
            log::info!("player died");
        }
    }

    /// Restore health, clamped at the maximum
    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).clamp(0.0, self.max);
        if self.is_alive() {
            self.death_reported = false;
        }
    }
}
