//! Timed paths produced by a planner, one per agent.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use multibot_geometry::Pose;

/// A pose visited along a path, with the time the agent arrives and leaves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Where the agent is.
    pub pose: Pose,
    /// When the agent gets there.
    pub arrival_time: Duration,
    /// When the agent leaves.
    pub departure_time: Duration,
}

impl Node {
    /// Creates a node.
    pub const fn new(pose: Pose, arrival_time: Duration, departure_time: Duration) -> Self {
        Self {
            pose,
            arrival_time,
            departure_time,
        }
    }

    /// How long the agent waits at this node.
    pub fn dwell(&self) -> Duration {
        self.departure_time.saturating_sub(self.arrival_time)
    }
}

/// The path of one agent as a sequence of legs `(from, to)`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SinglePath {
    /// Name of the agent following the path.
    pub agent_name: String,
    /// Legs in travel order.
    pub nodes: Vec<(Node, Node)>,
    /// Path cost in seconds.
    pub cost: f64,
}

impl SinglePath {
    /// Creates an empty path with zero cost.
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            ..Self::default()
        }
    }

    /// Appends a leg and adds its travel time to the cost.
    pub fn push_leg(&mut self, from: Node, to: Node) {
        self.cost += to.arrival_time.saturating_sub(from.departure_time).as_secs_f64();
        self.nodes.push((from, to));
    }

    /// Pose at the start of the first leg.
    pub fn start(&self) -> Option<Pose> {
        self.nodes.first().map(|(from, _)| from.pose)
    }

    /// Pose at the end of the last leg.
    pub fn goal(&self) -> Option<Pose> {
        self.nodes.last().map(|(_, to)| to.pose)
    }

    /// Sum of straight-line leg lengths in meters.
    pub fn length(&self) -> f64 {
        self.nodes.iter().map(|(from, to)| from.pose.distance_to(&to.pose)).sum()
    }
}

impl fmt::Display for SinglePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]Cost: {:.4}s", self.agent_name, self.cost)?;
        for (from, to) in &self.nodes {
            writeln!(
                f,
                "[{}][{:.4}s, {:.4}s): {} -> {}",
                self.agent_name,
                from.departure_time.as_secs_f64(),
                to.arrival_time.as_secs_f64(),
                from.pose,
                to.pose
            )?;
        }
        Ok(())
    }
}

/// Paths keyed by agent name, iterated in name order.
pub type PathSet = BTreeMap<String, SinglePath>;

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: f64, y: f64, arrival: u64, departure: u64) -> Node {
        Node::new(
            Pose::new(x, y, 0.0),
            Duration::from_millis(arrival),
            Duration::from_millis(departure),
        )
    }

    fn sample_path() -> SinglePath {
        let mut path = SinglePath::new("tb3_0");
        path.push_leg(node(0.0, 0.0, 0, 500), node(3.0, 4.0, 2500, 2500));
        path.push_leg(node(3.0, 4.0, 2500, 3000), node(3.0, 5.0, 4000, 4000));
        path
    }

    #[test]
    fn test_push_leg_accumulates_cost() {
        let path = sample_path();
        assert_eq!(path.nodes.len(), 2);
        assert!((path.cost - 3.0).abs() < 1e-12);
        assert_eq!(path.start(), Some(Pose::new(0.0, 0.0, 0.0)));
        assert_eq!(path.goal(), Some(Pose::new(3.0, 5.0, 0.0)));
        assert!((path.length() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_path() {
        let path = SinglePath::new("idle");
        assert_eq!(path.start(), None);
        assert_eq!(path.goal(), None);
        assert_eq!(path.length(), 0.0);
    }

    #[test]
    fn test_dwell() {
        assert_eq!(node(0.0, 0.0, 500, 1500).dwell(), Duration::from_secs(1));
        assert_eq!(node(0.0, 0.0, 1500, 500).dwell(), Duration::ZERO);
    }

    #[test]
    fn test_path_set_is_name_ordered() {
        let mut paths = PathSet::new();
        paths.insert("tb3_2".into(), SinglePath::new("tb3_2"));
        paths.insert("tb3_0".into(), sample_path());
        paths.insert("tb3_1".into(), SinglePath::new("tb3_1"));

        let names: Vec<&str> = paths.keys().map(String::as_str).collect();
        assert_eq!(names, ["tb3_0", "tb3_1", "tb3_2"]);
    }

    #[test]
    fn test_display() {
        let text = format!("{}", sample_path());
        assert!(text.starts_with("[tb3_0]Cost: 3.0000s\n"));
        assert!(text.contains("[tb3_0][0.5000s, 2.5000s): (0m, 0m, 0rad) -> (3m, 4m, 0rad)\n"));
    }
}
