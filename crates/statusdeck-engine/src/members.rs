//! Active team member resolution
//!
//! The canonical strategy scopes "active" to the reporting window: an
//! assignment counts when the task it names overlaps the window, and every
//! person named on such an assignment is looked up on the roster. Names are
//! matched trimmed and case-insensitively.
//!
//! The allocated-hours strategy (anyone with hours > 0 and a role) is kept
//! as an explicit alternative; the two are never combined.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use statusdeck_core::{normalize_name, ActiveMember, ProjectData, ReportingWindow, ResourceMember};
use tracing::{debug, trace};

/// How active members are selected
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberStrategy {
    /// People assigned to tasks overlapping the reporting window
    #[default]
    Assignments,
    /// Anyone with allocated/used hours above zero
    AllocatedHours,
}

impl MemberStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStrategy::Assignments => "assignments",
            MemberStrategy::AllocatedHours => "allocated-hours",
        }
    }
}

impl std::fmt::Display for MemberStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MemberStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "assignments" => Ok(MemberStrategy::Assignments),
            "allocated-hours" | "hours" => Ok(MemberStrategy::AllocatedHours),
            other => Err(format!("unknown member strategy: {other}")),
        }
    }
}

fn to_member(resource: &ResourceMember) -> ActiveMember {
    ActiveMember {
        name: resource.name.clone(),
        role: resource.role.clone(),
    }
}

/// Normalized names of everyone assigned to a task active in the window
pub fn assigned_names(data: &ProjectData, window: &ReportingWindow) -> HashSet<String> {
    data.assignments
        .iter()
        .filter(|a| !a.activity.trim().is_empty())
        .filter(|a| {
            let active = data.tasks_named(&a.activity).any(|t| t.overlaps(window));
            if !active {
                trace!(activity = %a.activity, "assignment outside window or unmatched");
            }
            active
        })
        .flat_map(|a| a.assignees())
        .map(normalize_name)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Roster entries assigned to work in the window, in roster order
pub fn resolve_by_assignments(data: &ProjectData, window: &ReportingWindow) -> Vec<ActiveMember> {
    let names = assigned_names(data, window);
    data.resources
        .iter()
        .filter(|r| names.contains(&normalize_name(&r.name)))
        .map(to_member)
        .collect()
}

/// Roster entries with positive allocated/used hours.
///
/// Entries without a role are skipped.
pub fn resolve_by_hours(data: &ProjectData) -> Vec<ActiveMember> {
    data.resources
        .iter()
        .filter(|r| r.hours > 0.0 && !r.role.trim().is_empty())
        .map(to_member)
        .collect()
}

/// Resolve active members with the chosen strategy
pub fn resolve(
    data: &ProjectData,
    window: &ReportingWindow,
    strategy: MemberStrategy,
) -> Vec<ActiveMember> {
    let members = match strategy {
        MemberStrategy::Assignments => resolve_by_assignments(data, window),
        MemberStrategy::AllocatedHours => resolve_by_hours(data),
    };
    debug!(%strategy, members = members.len(), "active members resolved");
    members
}
