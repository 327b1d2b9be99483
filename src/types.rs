use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Canonical task title type used throughout the tree.
pub type TaskName = String;

/// Disposition of a command, task or group.
///
/// Ordering follows the dominance rule used when a group rolls up the
/// statuses of its children, from weakest to strongest:
///
/// `Disabled < Enabled < Done < Running < Error`
///
/// - any failed child makes the group `Error`;
/// - otherwise any running child makes it `Running`;
/// - otherwise a finished child shows as `Done` rather than hiding behind
///   children that never ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Disabled,
    Enabled,
    Running,
    Done,
    Error,
}

impl Status {
    /// Explicit dominance rank; higher wins in [`Status::dominant`].
    pub fn rank(self) -> u8 {
        match self {
            Status::Disabled => 0,
            Status::Enabled => 1,
            Status::Done => 2,
            Status::Running => 3,
            Status::Error => 4,
        }
    }

    /// Returns true once a run has finished, successfully or not.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Done | Status::Error)
    }

    /// Dominant status among `statuses`.
    ///
    /// An empty input is a vacuous aggregate and yields `Enabled`.
    pub fn dominant<I>(statuses: I) -> Status
    where
        I: IntoIterator<Item = Status>,
    {
        statuses.into_iter().max().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Disabled => "disabled",
            Status::Enabled => "enabled",
            Status::Running => "running",
            Status::Done => "done",
            Status::Error => "error",
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Enabled
    }
}

impl PartialOrd for Status {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Status {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disabled" => Ok(Status::Disabled),
            "enabled" => Ok(Status::Enabled),
            "running" => Ok(Status::Running),
            "done" => Ok(Status::Done),
            "error" => Ok(Status::Error),
            other => Err(format!(
                "invalid status: {other} (expected disabled, enabled, running, done or error)"
            )),
        }
    }
}
