//! Animation parameter synchronization
//!
//! Stateless projections from actor state into the sink. Writes are
//! idempotent and a missing sink is skipped silently.

use super::sink::AnimationSink;

/// Parameter names consumed by the external animator
pub mod param {
    /// Player is moving past the input deadzone
    pub const IS_WALKING: &str = "isWalking";
    /// Player or agent is in the running state
    pub const IS_RUNNING: &str = "isRunning";
    /// Player crouch flag
    pub const IS_CROUCHING: &str = "isCrouching";
    /// Agent has the target in detection range
    pub const IS_DETECTED: &str = "isDetected";
    /// Agent is in the Attack behavior
    pub const IS_ATTACKING: &str = "isAttacking";
    /// Attack sub-state as an integer (0 none, 1 windup, 2 strike)
    pub const ATTACK_STAGE: &str = "attackStage";
    /// Locomotion speed in m/s
    pub const SPEED: &str = "speed";
}

/// Player-side values projected into the sink each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerChannels {
    /// Movement input past the deadzone
    pub walking: bool,
    /// Sprinting (implies walking, excludes crouching)
    pub running: bool,
    /// Effective crouch flag
    pub crouching: bool,
    /// Smoothed crouch weight in [0, 1]
    pub crouch_weight: f32,
    /// Animator layer carrying the crouch pose
    pub crouch_layer: usize,
}

/// Write the player parameters; a missing sink skips the update
pub fn sync_player(sink: Option<&mut dyn AnimationSink>, channels: &PlayerChannels) {
    let Some(sink) = sink else {
        return;
    };
    sink.set_bool(param::IS_WALKING, channels.walking);
    sink.set_bool(param::IS_RUNNING, channels.running);
    sink.set_bool(param::IS_CROUCHING, channels.crouching);
    sink.set_layer_weight(channels.crouch_layer, channels.crouch_weight);
}

/// Agent-side values projected into the sink each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentChannels {
    /// Target within detection range
    pub detected: bool,
    /// Chasing at run speed
    pub running: bool,
    /// In the Attack behavior
    pub attacking: bool,
    /// Attack sub-state code
    pub attack_stage: i32,
    /// Current locomotion speed in m/s
    pub speed: f32,
}

/// Write the agent parameters; a missing sink skips the update
pub fn sync_agent(sink: Option<&mut dyn AnimationSink>, channels: &AgentChannels) {
    let Some(sink) = sink else {
        return;
    };
    sink.set_bool(param::IS_DETECTED, channels.detected);
    sink.set_bool(param::IS_RUNNING, channels.running);
    sink.set_bool(param::IS_ATTACKING, channels.attacking);
    sink.set_int(param::ATTACK_STAGE, channels.attack_stage);
    sink.set_float(param::SPEED, channels.speed);
}

#[cfg(test)]
mod tests {
    use super::super::sink::ParameterBuffer;
    use super::*;

    #[test]
    fn test_player_sync_writes_all_channels() {
        let mut buffer = ParameterBuffer::new();
        let channels = PlayerChannels {
            walking: true,
            running: false,
            crouching: true,
            crouch_weight: 0.6,
            crouch_layer: 1,
        };

        sync_player(Some(&mut buffer), &channels);

        assert_eq!(buffer.bool_param(param::IS_WALKING), Some(true));
        assert_eq!(buffer.bool_param(param::IS_RUNNING), Some(false));
        assert_eq!(buffer.bool_param(param::IS_CROUCHING), Some(true));
        assert_eq!(buffer.layer_weight(1), 0.6);
    }

    #[test]
    fn test_agent_sync_writes_all_channels() {
        let mut buffer = ParameterBuffer::new();
        let channels = AgentChannels {
            detected: true,
            running: true,
            attacking: false,
            attack_stage: 0,
            speed: 6.0,
        };

        sync_agent(Some(&mut buffer), &channels);

        assert_eq!(buffer.bool_param(param::IS_DETECTED), Some(true));
        assert_eq!(buffer.bool_param(param::IS_RUNNING), Some(true));
        assert_eq!(buffer.bool_param(param::IS_ATTACKING), Some(false));
        assert_eq!(buffer.int_param(param::ATTACK_STAGE), Some(0));
        assert_eq!(buffer.float_param(param::SPEED), Some(6.0));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut buffer = ParameterBuffer::new();
        let channels = AgentChannels {
            detected: false,
            running: false,
            attacking: true,
            attack_stage: 2,
            speed: 0.0,
        };

        sync_agent(Some(&mut buffer), &channels);
        let first = buffer.clone();
        sync_agent(Some(&mut buffer), &channels);

        assert_eq!(first.bool_param(param::IS_ATTACKING), buffer.bool_param(param::IS_ATTACKING));
        assert_eq!(first.int_param(param::ATTACK_STAGE), buffer.int_param(param::ATTACK_STAGE));
        assert_eq!(first.float_param(param::SPEED), buffer.float_param(param::SPEED));
        assert_eq!(first.len(), buffer.len());
    }

    #[test]
    fn test_missing_sink_is_skipped() {
        // Must not panic or write anywhere
        sync_player(
            None,
            &PlayerChannels {
                walking: false,
                running: false,
                crouching: false,
                crouch_weight: 0.0,
                crouch_layer: 0,
            },
        );
    }
}
