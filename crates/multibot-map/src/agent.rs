//! Agent descriptors.

use std::fmt;

use multibot_geometry::Pose;

/// A robot taking part in path finding: its footprint, drive limits and poses.
///
/// Lengths are in meters, velocities in m/s or rad/s and accelerations in
/// m/s² or rad/s².
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Agent {
    /// Unique agent name.
    pub name: String,
    /// Robot model.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
    /// Footprint size; a natural inflation radius for this agent.
    pub size: f64,
    /// Drive wheel radius.
    pub wheel_radius: f64,
    /// Distance between the drive wheels.
    pub wheel_separation: f64,
    /// Maximum linear velocity.
    pub max_lin_vel: f64,
    /// Maximum linear acceleration.
    pub max_lin_acc: f64,
    /// Maximum angular velocity.
    pub max_ang_vel: f64,
    /// Maximum angular acceleration.
    pub max_ang_acc: f64,
    /// Pose the agent starts from.
    pub start: Pose,
    /// Pose the agent has to reach.
    pub goal: Pose,
    /// Current pose.
    pub pose: Pose,
}

impl Agent {
    /// Creates an agent at its start pose.
    pub fn new(name: impl Into<String>, kind: impl Into<String>, size: f64, start: Pose, goal: Pose) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            size,
            start,
            goal,
            pose: start,
            ..Self::default()
        }
    }

    /// Straight-line distance left between the current pose and the goal.
    pub fn distance_to_goal(&self) -> f64 {
        self.pose.distance_to(&self.goal)
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Agent Info")?;
        writeln!(f, "- Name: {}", self.name)?;
        writeln!(f, "- Type: {}", self.kind)?;
        writeln!(f, "- Size: {}m", self.size)?;
        writeln!(f, "- Wheel Radius: {}m", self.wheel_radius)?;
        writeln!(f, "- Wheel Separation: {}m", self.wheel_separation)?;
        writeln!(f, "- Start: {}", self.start)?;
        writeln!(f, "- Goal : {}", self.goal)?;
        writeln!(f, "- Current Pose: {}", self.pose)?;
        writeln!(f, "- Maximum linear velocity     : {}m/s", self.max_lin_vel)?;
        writeln!(f, "- Maximum linear acceleration : {}m/s^2", self.max_lin_acc)?;
        writeln!(f, "- Maximum angular velocity    : {}rad/s", self.max_ang_vel)?;
        write!(f, "- Maximum angular acceleration: {}rad/s^2", self.max_ang_acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_agent_starts_at_start() {
        let start = Pose::new(1.0, 2.0, 0.0);
        let goal = Pose::new(4.0, 6.0, 1.57);
        let agent = Agent::new("tb3_0", "turtlebot3", 0.2, start, goal);

        assert_eq!(agent.pose, start);
        assert_eq!(agent.kind, "turtlebot3");
        assert_eq!(agent.max_lin_vel, 0.0);
        assert!((agent.distance_to_goal() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let mut agent = Agent::new("tb3_0", "turtlebot3", 0.2, Pose::default(), Pose::new(1.0, 0.0, 0.0));
        agent.max_ang_vel = 2.5;
        let text = format!("{}", agent);

        assert!(text.starts_with("Agent Info\n- Name: tb3_0\n"));
        assert!(text.contains("- Size: 0.2m"));
        assert!(text.contains("- Goal : (1m, 0m, 0rad)"));
        assert!(text.contains("- Maximum angular velocity    : 2.5rad/s"));
    }
}
