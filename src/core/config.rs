//! Simulation configuration
//!
//! Tuning values for the player rig and the enemy agent, loadable from RON
//! or JSON files.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How the crouch weight tracks the crouch input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CrouchTransitionMode {
    /// Exponentially blend the weight for both transitions
    Continuous,
    /// Hard binary switch; releasing crouch flips the flag only after the delay
    DelayedUncrouch {
        /// Seconds between releasing crouch and standing up
        delay: f32,
    },
}

/// First-person arm pose offsets keyed by locomotion state
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArmsConfig {
    /// Arm root position in actor-local space, captured at spawn
    pub base_position: Vec3,
    /// Arm root scale, captured at spawn
    pub base_scale: Vec3,
    /// Offset while standing still
    pub offset_idle: Vec3,
    /// Offset while walking
    pub offset_walk: Vec3,
    /// Offset while running
    pub offset_run: Vec3,
    /// Offset while crouched and still
    pub offset_crouch_idle: Vec3,
    /// Offset while crouched and moving
    pub offset_crouch_walk: Vec3,
    /// Scale at full crouch weight
    pub crouch_scale: Vec3,
}

impl Default for ArmsConfig {
    fn default() -> Self {
        Self {
            base_position: Vec3::new(0.0, -0.25, 0.45),
            base_scale: Vec3::ONE,
            offset_idle: Vec3::ZERO,
            offset_walk: Vec3::new(0.0, -0.1, 0.05),
            offset_run: Vec3::new(0.0, -0.15, 0.1),
            offset_crouch_idle: Vec3::new(0.0, -0.4, 0.0),
            offset_crouch_walk: Vec3::new(0.0, -0.3, 0.1),
            crouch_scale: Vec3::splat(0.9),
        }
    }
}

/// Head bob tuning for the camera rig
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeadBobConfig {
    /// Bob cycles per second while walking
    pub frequency: f32,
    /// Sideways amplitude in meters
    pub horizontal_amplitude: f32,
    /// Vertical amplitude in meters
    pub vertical_amplitude: f32,
}

impl Default for HeadBobConfig {
    fn default() -> Self {
        Self {
            frequency: 1.5,
            horizontal_amplitude: 0.05,
            vertical_amplitude: 0.05,
        }
    }
}

/// Tuning for the player locomotion rig
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Walk speed in m/s
    pub walk_speed: f32,
    /// Run speed in m/s
    pub run_speed: f32,
    /// Crouched movement speed in m/s
    pub crouch_speed: f32,
    /// Upward velocity applied on jump
    pub jump_force: f32,
    /// Downward acceleration in m/s^2
    pub gravity: f32,
    /// Radians of rotation per look-axis count
    pub look_sensitivity: f32,
    /// Pitch clamp in radians
    pub pitch_limit: f32,
    /// Capsule height while standing
    pub standing_height: f32,
    /// Capsule height at full crouch
    pub crouch_height: f32,
    /// Capsule radius (unchanged by crouching)
    pub capsule_radius: f32,
    /// Blend rate used while mostly crouched
    pub transition_down_rate: f32,
    /// Blend rate used while mostly standing
    pub transition_up_rate: f32,
    /// Camera offset at full crouch weight
    pub crouch_camera_offset: Vec3,
    /// Camera position in actor-local space while standing
    pub eye_offset: Vec3,
    /// Animator layer carrying the crouch pose
    pub crouch_layer: usize,
    /// Crouch weight transition mode
    pub crouch_transition: CrouchTransitionMode,
    /// Whether the rig carries first-person arms
    pub has_arms: bool,
    /// Whether the rig drives a full-body animator
    pub has_body_animator: bool,
    /// Arm pose table
    pub arms: ArmsConfig,
    /// Head bob tuning
    pub head_bob: HeadBobConfig,
    /// Maximum health pool
    pub max_health: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            run_speed: 10.0,
            crouch_speed: 2.0,
            jump_force: 8.0,
            gravity: 20.0,
            look_sensitivity: 0.0025,
            pitch_limit: 45.0_f32.to_radians(),
            standing_height: 2.0,
            crouch_height: 1.0,
            capsule_radius: 0.3,
            transition_down_rate: 6.0,
            transition_up_rate: 10.0,
            crouch_camera_offset: Vec3::new(0.0, -0.5, 0.0),
            eye_offset: Vec3::new(0.0, 0.8, 0.0),
            crouch_layer: 1,
            crouch_transition: CrouchTransitionMode::Continuous,
            has_arms: true,
            has_body_animator: true,
            arms: ArmsConfig::default(),
            head_bob: HeadBobConfig::default(),
            max_health: 100.0,
        }
    }
}

impl PlayerConfig {
    /// Check the tuning values for internal consistency
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crouch_height >= self.standing_height {
            return Err(ConfigError::Invalid(
                "crouch_height must be below standing_height".to_string(),
            ));
        }
        if self.crouch_height < self.capsule_radius * 2.0 {
            return Err(ConfigError::Invalid(
                "crouch_height must fit the capsule radius".to_string(),
            ));
        }
        if self.pitch_limit <= 0.0 {
            return Err(ConfigError::Invalid(
                "pitch_limit must be positive".to_string(),
            ));
        }
        if self.transition_down_rate <= 0.0 || self.transition_up_rate <= 0.0 {
            return Err(ConfigError::Invalid(
                "crouch transition rates must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Tuning for the enemy behavior machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Wander speed in m/s
    pub walk_speed: f32,
    /// Chase speed in m/s
    pub run_speed: f32,
    /// Radius around the agent for wander destinations
    pub wander_radius: f32,
    /// Seconds between wander destination picks
    pub wander_interval: f32,
    /// Distance at which the agent starts chasing
    pub detection_range: f32,
    /// Distance at which the agent attacks
    pub attack_range: f32,
    /// Approach distance in front of the target when entering Attack
    pub safe_distance: f32,
    /// Seconds between attack windup and strike
    pub windup_duration: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            walk_speed: 2.0,
            run_speed: 6.0,
            wander_radius: 10.0,
            wander_interval: 5.0,
            detection_range: 10.0,
            attack_range: 3.0,
            safe_distance: 1.5,
            windup_duration: 0.75,
        }
    }
}

impl AgentConfig {
    /// Check the tuning values for internal consistency
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attack_range >= self.detection_range {
            return Err(ConfigError::Invalid(
                "attack_range must be below detection_range".to_string(),
            ));
        }
        if self.wander_interval <= 0.0 {
            return Err(ConfigError::Invalid(
                "wander_interval must be positive".to_string(),
            ));
        }
        if self.wander_radius <= 0.0 {
            return Err(ConfigError::Invalid(
                "wander_radius must be positive".to_string(),
            ));
        }
        if self.windup_duration < 0.0 {
            return Err(ConfigError::Invalid(
                "windup_duration must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimConfig {
    /// Player rig tuning
    pub player: PlayerConfig,
    /// Enemy agent tuning
    pub agent: AgentConfig,
}

impl SimConfig {
    /// Validate both actor configurations
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::Invalid` found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.player.validate()?;
        self.agent.validate()?;
        Ok(())
    }

    /// Save the configuration to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load and validate a configuration from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, deserialization fails,
    /// or validation rejects the values
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: Self =
            ron::from_str(&content).map_err(|e| ConfigError::DeserializeError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, deserialization fails,
    /// or validation rejects the values
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ConfigError::DeserializeError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Errors that can occur loading or validating configuration
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
    /// A tuning value failed validation
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
            Self::Invalid(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
