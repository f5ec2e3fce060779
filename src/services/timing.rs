//! Production time estimates
//!
//! Turns minutes of footage into machine-days on one or more accounts, given
//! the plan's concurrency caps and the platform's one-off setup time.

use crate::models::{ApiAccess, GenerationOption, Plan, Platform, SkillLevel};
use crate::services::units::clips_needed;

/// Productive hours per working day
pub const WORK_HOURS_PER_DAY: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeEstimate {
    /// Days on a single account, setup included
    pub single_account_days: f64,
    /// Days once the workload is split across `accounts_needed`
    pub actual_days: f64,
    pub accounts_needed: u32,
    /// Concurrent jobs per account used for the estimate
    pub parallelism: u32,
}

impl TimeEstimate {
    fn idle(parallelism: u32) -> Self {
        Self {
            single_account_days: 0.0,
            actual_days: 0.0,
            accounts_needed: 1,
            parallelism,
        }
    }

    /// Whether one account alone misses the deadline
    pub fn needs_extra_accounts(&self) -> bool {
        self.accounts_needed > 1
    }
}

/// Concurrent jobs available to this user on this plan
///
/// The API channel is used when the platform exposes one at all, the plan
/// defines an API cap, and the user is past beginner level.
pub fn effective_parallelism(plan: &Plan, platform: &Platform, expertise: SkillLevel) -> u32 {
    let api_usable = platform.api_access != ApiAccess::None && expertise != SkillLevel::Beginner;

    match plan.api_parallel {
        Some(api_cap) if api_usable => api_cap,
        _ => plan.gui_parallel,
    }
}

/// Estimates machine time for `target_minutes` of footage
pub fn estimate(
    target_minutes: f64,
    option: &GenerationOption,
    plan: &Plan,
    platform: &Platform,
    deadline_days: f64,
    expertise: SkillLevel,
) -> TimeEstimate {
    let parallelism = effective_parallelism(plan, platform, expertise);

    if target_minutes <= 0.0 {
        return TimeEstimate::idle(parallelism);
    }

    let clips = clips_needed(target_minutes, option);
    let workload_hours = clips * plan.avg_time_per_clip_min / 60.0;
    let single_account_days =
        workload_hours / parallelism.max(1) as f64 / WORK_HOURS_PER_DAY + platform.setup_days;

    let accounts_needed = if single_account_days > deadline_days {
        (single_account_days / deadline_days).ceil() as u32
    } else {
        1
    };

    TimeEstimate {
        single_account_days,
        actual_days: single_account_days / accounts_needed as f64,
        accounts_needed,
        parallelism,
    }
}
