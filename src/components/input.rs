use serde::{Deserialize, Serialize};

/// Air-roll selector held alongside the stick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RollMode {
    #[default]
    None,
    RollLeft,
    RollRight,
    /// Horizontal stick drives roll instead of yaw.
    FreeRoll,
}

impl RollMode {
    /// Roll direction for directional air roll: -1 left, +1 right, 0 otherwise.
    pub fn direction(self) -> f64 {
        match self {
            RollMode::RollLeft => -1.0,
            RollMode::RollRight => 1.0,
            RollMode::None | RollMode::FreeRoll => 0.0,
        }
    }

    pub fn is_directional(self) -> bool {
        matches!(self, RollMode::RollLeft | RollMode::RollRight)
    }
}

/// Control input for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    /// Horizontal stick deflection, nominally in [-1, 1]
    pub horizontal: f64,
    /// Vertical stick deflection, nominally in [-1, 1]
    pub vertical: f64,
    pub roll_mode: RollMode,
    pub dar_active: bool,
}

impl InputSample {
    pub fn new(horizontal: f64, vertical: f64, roll_mode: RollMode, dar_active: bool) -> Self {
        Self {
            horizontal,
            vertical,
            roll_mode,
            dar_active,
        }
    }

    /// Stick centred, no roll, DAR off.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Build an input from raw controller state.
    ///
    /// Directional air roll engages while the handbrake is held, except in
    /// free-roll mode where the stick already owns the roll axis.
    pub fn from_controller(
        horizontal: f64,
        vertical: f64,
        roll_mode: RollMode,
        handbrake: bool,
    ) -> Self {
        let dar_active = handbrake && roll_mode != RollMode::FreeRoll;
        Self::new(horizontal, vertical, roll_mode, dar_active)
    }

    pub fn with_dar(mut self, dar_active: bool) -> Self {
        self.dar_active = dar_active;
        self
    }

    pub fn with_roll_mode(mut self, roll_mode: RollMode) -> Self {
        self.roll_mode = roll_mode;
        self
    }

    /// Roll column value used in telemetry rows.
    pub fn roll_input(&self) -> f64 {
        self.roll_mode.direction()
    }
}
