use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four Eisenhower quadrants a task can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    Do,
    Schedule,
    Delegate,
    Delete,
}

impl Quadrant {
    /// Display order of the matrix, top-left to bottom-right.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Do,
        Quadrant::Schedule,
        Quadrant::Delegate,
        Quadrant::Delete,
    ];

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Do => "do",
            Self::Schedule => "schedule",
            Self::Delegate => "delegate",
            Self::Delete => "delete",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "do" => Some(Self::Do),
            "schedule" => Some(Self::Schedule),
            "delegate" => Some(Self::Delegate),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Do => "Important & Urgent",
            Self::Schedule => "Important & Not Urgent",
            Self::Delegate => "Not Important & Urgent",
            Self::Delete => "Not Important & Not Urgent",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Self::Do => "Do it now",
            Self::Schedule => "Plan a slot for it",
            Self::Delegate => "Hand it off",
            Self::Delete => "Drop it",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub quadrant: Quadrant,
    pub completed: bool,
    /// Hour of day in half-hour steps within the calendar window, or `None`
    /// while the task sits only in the matrix.
    pub scheduled_time: Option<f64>,
    /// Duration in hours, half-hour steps, at least 0.5. Kept even while the
    /// task is unscheduled so re-dropping it on the calendar restores it.
    pub duration: f64,
}

impl Task {
    /// A freshly captured task: lands in the Schedule quadrant, unscheduled,
    /// one hour long.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            quadrant: Quadrant::Schedule,
            completed: false,
            scheduled_time: None,
            duration: 1.0,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled_time.is_some()
    }

    /// End of the calendar block, meaningful only while scheduled.
    pub fn end_time(&self) -> Option<f64> {
        self.scheduled_time.map(|start| start + self.duration)
    }
}
