use crate::dataset::Record;

/// Column holding the at-bat outcome (single, strikeout, home_run, ...).
pub const EVENTS: &str = "events";
/// Batted-ball measurement columns; all three must be present for a row to
/// count as a measured batted ball.
pub const HIT_DISTANCE: &str = "hit_distance_sc";
pub const LAUNCH_SPEED: &str = "launch_speed";
pub const LAUNCH_ANGLE: &str = "launch_angle";

/// A named subset of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Every record, unfiltered.
    All,
    /// Records that ended an at-bat: `events` is non-blank.
    AtBatOutcomes,
    /// Records with all three batted-ball measurements non-blank.
    BattedBall,
}

impl Category {
    /// Strict token parsing; unknown tokens are rejected rather than
    /// silently treated as `all`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "all" => Some(Self::All),
            "at-bat" => Some(Self::AtBatOutcomes),
            "batted-ball" => Some(Self::BattedBall),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::AtBatOutcomes => "at-bat",
            Self::BattedBall => "batted-ball",
        }
    }

    pub fn matches(self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::AtBatOutcomes => non_blank(record, EVENTS),
            Self::BattedBall => {
                non_blank(record, HIT_DISTANCE)
                    && non_blank(record, LAUNCH_SPEED)
                    && non_blank(record, LAUNCH_ANGLE)
            }
        }
    }
}

fn non_blank(record: &Record, key: &str) -> bool {
    record.get(key).is_some_and(|v| !v.trim().is_empty())
}

/// Records matching `category`, in their original relative order.
pub fn apply<'a>(category: Category, records: &'a [Record]) -> Vec<&'a Record> {
    records.iter().filter(|r| category.matches(r)).collect()
}
