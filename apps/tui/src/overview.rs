//! Overview page model: fixed headline metrics and the recent tag activity table.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverviewMetrics {
    pub sharks_target: u32,
    pub active_tags: u32,
    pub warning_count: u32,
    pub danger_count: u32,
    pub average_depth: f64,
    pub depth_change: f64,
    pub pacific_coast_sharks: u32,
}

impl Default for OverviewMetrics {
    fn default() -> Self {
        Self {
            sharks_target: 300,
            active_tags: 13,
            warning_count: 2,
            danger_count: 4,
            average_depth: 45.2,
            depth_change: -2.1,
            pacific_coast_sharks: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagBreakdown {
    pub active: u64,
    pub last_active: u64,
    pub inactive: u64,
    pub total: u64,
}

impl Default for TagBreakdown {
    fn default() -> Self {
        Self {
            active: 200,
            last_active: 150,
            inactive: 50,
            total: 400,
        }
    }
}

impl TagBreakdown {
    pub fn bars(&self) -> [(&'static str, u64); 3] {
        [
            ("Active", self.active),
            ("Last active", self.last_active),
            ("Inactive", self.inactive),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharkTag {
    pub id: &'static str,
    pub shark_name: &'static str,
    pub location: &'static str,
    pub feeding_activity: &'static str,
    pub depth: &'static str,
    pub battery: &'static str,
    pub time: &'static str,
    pub status: &'static str,
}

const fn tag(
    id: &'static str,
    shark_name: &'static str,
    location: &'static str,
    feeding_activity: &'static str,
    depth: &'static str,
    battery: &'static str,
    time: &'static str,
    status: &'static str,
) -> SharkTag {
    SharkTag {
        id,
        shark_name,
        location,
        feeding_activity,
        depth,
        battery,
        time,
        status,
    }
}

pub fn latest_tags() -> Vec<SharkTag> {
    vec![
        tag("SFS-001", "Jaws", "Pacific Ocean", "Active", "67m", "87%", "5 min ago", "Active"),
        tag("SFS-001", "Chomper", "Gulf Stream", "Likely", "23m", "15%", "12 min ago", "Low Battery"),
        tag("SFS-001", "Jaws", "Pacific Ocean", "Unknown", "67m", "87%", "5 min ago", "Active"),
        tag("SFS-003", "Nemo", "Caribbean Sea", "Unknown", "34m", "87%", "5 min ago", "Signal Lost"),
        tag("SFS-001", "Chomper", "Gulf Stream", "Likely", "23m", "15%", "12 min ago", "Low Battery"),
        tag("SFS-001", "Chomper", "Gulf Stream", "Likely", "23m", "15%", "12 min ago", "Low Battery"),
        tag("SFS-001", "Jaws", "Pacific Ocean", "Unknown", "67m", "87%", "5 min ago", "Active"),
    ]
}

/// Display class for a tag status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Active,
    LowBattery,
    SignalLost,
}

impl StatusClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "badge-active",
            Self::LowBattery => "badge-low-battery",
            Self::SignalLost => "badge-signal-lost",
        }
    }
}

/// Unrecognized statuses render as active.
pub fn status_class(status: &str) -> StatusClass {
    match status {
        "Low Battery" => StatusClass::LowBattery,
        "Signal Lost" => StatusClass::SignalLost,
        _ => StatusClass::Active,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityClass {
    Success,
    Warning,
    Danger,
    Plain,
}

impl ActivityClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "text-success",
            Self::Warning => "text-warning",
            Self::Danger => "text-danger",
            Self::Plain => "",
        }
    }
}

pub fn feeding_activity_class(activity: &str) -> ActivityClass {
    match activity {
        "Active" => ActivityClass::Success,
        "Likely" => ActivityClass::Warning,
        "Unknown" => ActivityClass::Danger,
        _ => ActivityClass::Plain,
    }
}
