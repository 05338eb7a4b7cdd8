//! Unified filter enums for CLI list commands
//!
//! Each enum maps a `--something` flag onto a grid [`Filter`], so every list
//! command funnels through the same filtering pipeline instead of growing its
//! own ad-hoc predicates. `All` variants translate to no filter at all.

use clap::ValueEnum;

use crate::grid::{Filter, Value};

fn equals(s: &str) -> Filter {
    Filter::Equals(Value::from(s))
}

fn one_of(values: &[&str]) -> Filter {
    Filter::OneOf(values.iter().map(|s| Value::from(*s)).collect())
}

/// Customer stage filter
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum StageFilter {
    /// Lead stage only
    Lead,
    /// Prospect stage only
    Prospect,
    /// Active stage only
    Active,
    /// Churned accounts only
    Churned,
    /// Any stage except churned
    Current,
    /// All stages - default
    #[default]
    All,
}

impl StageFilter {
    /// The grid filter for the `stage` field, if this constrains anything
    pub fn to_filter(self) -> Option<Filter> {
        match self {
            StageFilter::Lead => Some(equals("lead")),
            StageFilter::Prospect => Some(equals("prospect")),
            StageFilter::Active => Some(equals("active")),
            StageFilter::Churned => Some(equals("churned")),
            StageFilter::Current => Some(one_of(&["lead", "prospect", "active"])),
            StageFilter::All => None,
        }
    }
}

/// Proposal stage filter
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ProposalStageFilter {
    Draft,
    Sent,
    Accepted,
    Declined,
    Expired,
    /// Draft and sent (still in play)
    Open,
    #[default]
    All,
}

impl ProposalStageFilter {
    pub fn to_filter(self) -> Option<Filter> {
        match self {
            ProposalStageFilter::Draft => Some(equals("draft")),
            ProposalStageFilter::Sent => Some(equals("sent")),
            ProposalStageFilter::Accepted => Some(equals("accepted")),
            ProposalStageFilter::Declined => Some(equals("declined")),
            ProposalStageFilter::Expired => Some(equals("expired")),
            ProposalStageFilter::Open => Some(one_of(&["draft", "sent"])),
            ProposalStageFilter::All => None,
        }
    }
}

/// Engagement status filter
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum EngagementStatusFilter {
    Planned,
    Active,
    Paused,
    Completed,
    Cancelled,
    /// Planned, active or paused
    Ongoing,
    #[default]
    All,
}

impl EngagementStatusFilter {
    pub fn to_filter(self) -> Option<Filter> {
        match self {
            EngagementStatusFilter::Planned => Some(equals("planned")),
            EngagementStatusFilter::Active => Some(equals("active")),
            EngagementStatusFilter::Paused => Some(equals("paused")),
            EngagementStatusFilter::Completed => Some(equals("completed")),
            EngagementStatusFilter::Cancelled => Some(equals("cancelled")),
            EngagementStatusFilter::Ongoing => {
                Some(one_of(&["planned", "active", "paused"]))
            }
            EngagementStatusFilter::All => None,
        }
    }
}

/// Task status filter
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum TaskStatusFilter {
    Open,
    InProgress,
    Done,
    Cancelled,
    /// Open or in progress
    Pending,
    #[default]
    All,
}

impl TaskStatusFilter {
    pub fn to_filter(self) -> Option<Filter> {
        match self {
            TaskStatusFilter::Open => Some(equals("open")),
            TaskStatusFilter::InProgress => Some(equals("in_progress")),
            TaskStatusFilter::Done => Some(equals("done")),
            TaskStatusFilter::Cancelled => Some(equals("cancelled")),
            TaskStatusFilter::Pending => Some(one_of(&["open", "in_progress"])),
            TaskStatusFilter::All => None,
        }
    }
}

/// Priority filter for task lists
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    Low,
    Medium,
    High,
    Critical,
    /// High and critical only
    Urgent,
    #[default]
    All,
}

impl PriorityFilter {
    pub fn to_filter(self) -> Option<Filter> {
        match self {
            PriorityFilter::Low => Some(equals("low")),
            PriorityFilter::Medium => Some(equals("medium")),
            PriorityFilter::High => Some(equals("high")),
            PriorityFilter::Critical => Some(equals("critical")),
            PriorityFilter::Urgent => Some(one_of(&["high", "critical"])),
            PriorityFilter::All => None,
        }
    }
}

/// Active/inactive filter for partners and employees
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ActiveFilter {
    Active,
    Inactive,
    #[default]
    All,
}

impl ActiveFilter {
    /// The grid filter for the boolean `active` field
    pub fn to_filter(self) -> Option<Filter> {
        match self {
            ActiveFilter::Active => Some(Filter::Flag(true)),
            ActiveFilter::Inactive => Some(Filter::Flag(false)),
            ActiveFilter::All => None,
        }
    }
}
