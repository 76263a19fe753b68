use crate::model::{
    BugReport, Company, Id, Role, RoleBucket, Task, TestCaseStatus, User, all_tasks,
};
use crate::utils::time::{days_between, round_to_tenth};
use serde::Serialize;
use std::fmt;

const RELIABLE_RATIO: f64 = 0.8;
const COMPLETION_BONUS: f64 = 50.0;
const SPEED_DEMON_MAX_DAYS: f64 = 2.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum Badge {
    #[serde(rename = "Bug Hunter")]
    BugHunter,
    #[serde(rename = "Critical Eye")]
    CriticalEye,
    #[serde(rename = "Test Master")]
    TestMaster,
    #[serde(rename = "Speed Demon")]
    SpeedDemon,
    #[serde(rename = "Bug Crusher")]
    BugCrusher,
    #[serde(rename = "Crisis Handler")]
    CrisisHandler,
    #[serde(rename = "Ship It!")]
    ShipIt,
    #[serde(rename = "Team Leader")]
    TeamLeader,
    #[serde(rename = "Reliable")]
    Reliable,
}

impl Badge {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BugHunter => "Bug Hunter",
            Self::CriticalEye => "Critical Eye",
            Self::TestMaster => "Test Master",
            Self::SpeedDemon => "Speed Demon",
            Self::BugCrusher => "Bug Crusher",
            Self::CrisisHandler => "Crisis Handler",
            Self::ShipIt => "Ship It!",
            Self::TeamLeader => "Team Leader",
            Self::Reliable => "Reliable",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Static threshold on the current score; no previous period is consulted.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Stable,
    Down,
}

impl Trend {
    pub fn from_score(score: u32) -> Self {
        if score > 100 {
            Self::Up
        } else if score < 30 {
            Self::Down
        } else {
            Self::Stable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberStats {
    pub user_id: Id,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub bugs_reported: u32,
    pub bugs_resolved: u32,
    pub critical_bugs_fixed: u32,
    pub tasks_assigned: u32,
    pub tasks_completed: u32,
    /// Mean days from report to resolution, rounded to one decimal.
    pub avg_resolution_time: f64,
    pub test_cases_approved: u32,
    pub score: u32,
    pub rank: usize,
    pub badges: Vec<Badge>,
    pub trend: Trend,
}

/// Ranks every user by role-weighted activity across all companies.
///
/// Ordering is a stable descending sort on score, so users with equal scores keep
/// their input order and still receive distinct consecutive ranks.
pub fn calculate_team_rankings(companies: &[Company], users: &[User]) -> Vec<TeamMemberStats> {
    let tasks: Vec<&Task> = all_tasks(companies).collect();
    let bugs: Vec<&BugReport> = tasks
        .iter()
        .flat_map(|task| task.bug_reports.iter())
        .collect();

    let mut rankings: Vec<TeamMemberStats> = users
        .iter()
        .map(|user| member_stats(user, &tasks, &bugs))
        .collect();

    rankings.sort_by(|a, b| b.score.cmp(&a.score));
    for (idx, stats) in rankings.iter_mut().enumerate() {
        stats.rank = idx + 1;
    }

    rankings
}

fn member_stats(user: &User, tasks: &[&Task], bugs: &[&BugReport]) -> TeamMemberStats {
    let reported: Vec<&BugReport> = bugs
        .iter()
        .copied()
        .filter(|bug| bug.reported_by.is(user.id))
        .collect();
    let resolved: Vec<&BugReport> = bugs
        .iter()
        .copied()
        .filter(|bug| resolved_by_user(bug, user.id))
        .collect();
    let assigned: Vec<&Task> = tasks
        .iter()
        .copied()
        .filter(|task| task.is_assigned_to(user.id))
        .collect();

    let bugs_reported = reported.len() as u32;
    let bugs_resolved = resolved.len() as u32;
    let critical_bugs_fixed = count(resolved.iter().filter(|bug| bug.is_critical()));
    let tasks_assigned = assigned.len() as u32;
    let tasks_completed = count(assigned.iter().filter(|task| task.status.is_completed()));
    let test_cases_approved = count(
        tasks
            .iter()
            .flat_map(|task| task.test_case_documents.iter())
            .filter(|doc| doc.submitted_by.is(user.id) && doc.status == TestCaseStatus::Approved),
    );
    let avg_resolution_days = average_resolution_days(&resolved);

    let mut score = 0_u32;
    let mut badges = Vec::new();

    match user.role.bucket() {
        RoleBucket::Qa => {
            let critical_bugs_found = count(reported.iter().filter(|bug| bug.is_critical()));
            score += bugs_reported * 10 + test_cases_approved * 15 + critical_bugs_found * 20;

            if bugs_reported >= 10 {
                badges.push(Badge::BugHunter);
            }
            if critical_bugs_found >= 3 {
                badges.push(Badge::CriticalEye);
            }
            if test_cases_approved >= 5 {
                badges.push(Badge::TestMaster);
            }
        }
        RoleBucket::Developer => {
            score += bugs_resolved * 15 + critical_bugs_fixed * 25 + tasks_completed * 20;

            if avg_resolution_days > 0.0 && avg_resolution_days < SPEED_DEMON_MAX_DAYS {
                score += 30;
                badges.push(Badge::SpeedDemon);
            }
            if bugs_resolved >= 10 {
                badges.push(Badge::BugCrusher);
            }
            if critical_bugs_fixed >= 3 {
                badges.push(Badge::CrisisHandler);
            }
            if tasks_completed >= 5 {
                badges.push(Badge::ShipIt);
            }
        }
        RoleBucket::Lead => {
            score += tasks_completed * 25 + bugs_resolved * 10;

            if tasks_completed >= 10 {
                badges.push(Badge::TeamLeader);
            }
        }
        RoleBucket::Unbucketed => {}
    }

    if tasks_assigned > 0 {
        let ratio = f64::from(tasks_completed) / f64::from(tasks_assigned);
        score += (ratio * COMPLETION_BONUS).round() as u32;
        if ratio >= RELIABLE_RATIO {
            badges.push(Badge::Reliable);
        }
    }

    TeamMemberStats {
        user_id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        avatar: user.avatar.clone(),
        bugs_reported,
        bugs_resolved,
        critical_bugs_fixed,
        tasks_assigned,
        tasks_completed,
        avg_resolution_time: round_to_tenth(avg_resolution_days),
        test_cases_approved,
        score,
        rank: 0,
        badges,
        trend: Trend::from_score(score),
    }
}

fn resolved_by_user(bug: &BugReport, user_id: Id) -> bool {
    let resolver = bug
        .resolved_by
        .as_ref()
        .is_some_and(|resolver| resolver.is(user_id));
    let closed_assignee = bug.status.is_closed()
        && bug
            .assigned_to
            .as_ref()
            .is_some_and(|assignee| assignee.is(user_id));
    resolver || closed_assignee
}

// Bugs without a resolution timestamp are left out of the mean.
fn average_resolution_days(resolved: &[&BugReport]) -> f64 {
    let durations: Vec<f64> = resolved
        .iter()
        .filter_map(|bug| {
            bug.resolved_at
                .map(|resolved_at| days_between(bug.created_at, resolved_at))
        })
        .collect();

    if durations.is_empty() {
        0.0
    } else {
        durations.iter().sum::<f64>() / durations.len() as f64
    }
}

fn count<T>(items: impl Iterator<Item = T>) -> u32 {
    items.count() as u32
}
