//! Core module
//!
//! Contains simulation time tracking and configuration

mod config;
mod time;

pub use config::{
    AgentConfig, ArmsConfig, ConfigError, CrouchTransitionMode, HeadBobConfig, PlayerConfig,
    SimConfig,
};
pub use time::Time;
