use crate::model::{BugStatus, Task};
use serde::Serialize;

const OPEN_BUG_PENALTY: i64 = 15;
const CRITICAL_BUG_PENALTY: i64 = 25;
const EXTRA_CYCLE_PENALTY: i64 = 10;
const BUG_VOLUME_PENALTY: i64 = 5;
const CLOSED_BUG_CREDIT: i64 = 3;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    Critical,
    Warning,
    Good,
    Excellent,
}

impl HealthLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Warning,
            _ => Self::Critical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Healthy",
            Self::Good => "Good",
            Self::Warning => "Needs Attention",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskHealthInfo {
    pub level: HealthLevel,
    pub score: u8,
    pub testing_cycles: u32,
    pub total_bugs: u32,
    pub open_bugs: u32,
    pub closed_bugs: u32,
    pub critical_bugs: u32,
    pub label: &'static str,
}

pub fn calculate_task_health(task: &Task) -> TaskHealthInfo {
    let mut open_bugs = 0_u32;
    let mut closed_bugs = 0_u32;
    let mut critical_bugs = 0_u32;
    let mut reopened = 0_u32;

    for bug in &task.bug_reports {
        if bug.status.is_open() {
            open_bugs += 1;
            if bug.is_critical() {
                critical_bugs += 1;
            }
        }
        if bug.status.is_closed() {
            closed_bugs += 1;
        }
        if bug.status == BugStatus::Reopened {
            reopened += 1;
        }
    }
    let total_bugs = task.bug_reports.len() as u32;

    let mut testing_cycles = 1_u32;
    if task.status.is_in_testing() {
        testing_cycles += 1;
    }
    testing_cycles += reopened;
    testing_cycles += total_bugs / 3;

    let mut score = 100_i64;
    score -= i64::from(open_bugs) * OPEN_BUG_PENALTY;
    score -= i64::from(critical_bugs) * CRITICAL_BUG_PENALTY;
    score -= i64::from(testing_cycles.saturating_sub(1)) * EXTRA_CYCLE_PENALTY;
    score -= i64::from(total_bugs) * BUG_VOLUME_PENALTY;
    score += i64::from(closed_bugs) * CLOSED_BUG_CREDIT;
    let score = score.clamp(0, 100) as u8;

    let level = HealthLevel::from_score(score);
    TaskHealthInfo {
        level,
        score,
        testing_cycles,
        total_bugs,
        open_bugs,
        closed_bugs,
        critical_bugs,
        label: level.label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{bug, task};
    use crate::model::{BugSeverity, TaskStatus};
    use proptest::prelude::*;

    #[test]
    fn task_without_bugs_is_healthy() {
        let health = calculate_task_health(&task(1, TaskStatus::Draft, vec![]));
        assert_eq!(health.score, 100);
        assert_eq!(health.level, HealthLevel::Excellent);
        assert_eq!(health.label, "Healthy");
        assert_eq!(health.testing_cycles, 1);
    }

    #[test]
    fn failed_testing_task_with_mixed_bugs() {
        let bugs = vec![
            bug(1, BugSeverity::Critical, BugStatus::Open),
            bug(2, BugSeverity::Low, BugStatus::Open),
            bug(3, BugSeverity::High, BugStatus::Closed),
        ];
        let health = calculate_task_health(&task(1, TaskStatus::TestingFailed, bugs));

        assert_eq!(health.open_bugs, 2);
        assert_eq!(health.critical_bugs, 1);
        assert_eq!(health.closed_bugs, 1);
        assert_eq!(health.total_bugs, 3);
        assert_eq!(health.testing_cycles, 3);
        assert_eq!(health.score, 13);
        assert_eq!(health.level, HealthLevel::Critical);
        assert_eq!(health.label, "Critical");
    }

    #[test]
    fn resolved_critical_bug_is_not_counted_as_critical() {
        let bugs = vec![bug(1, BugSeverity::Critical, BugStatus::Resolved)];
        let health = calculate_task_health(&task(1, TaskStatus::Live, bugs));

        assert_eq!(health.critical_bugs, 0);
        assert_eq!(health.closed_bugs, 1);
        // 100 - 5 + 3
        assert_eq!(health.score, 98);
    }

    #[test]
    fn reopened_bugs_add_testing_cycles() {
        let bugs = vec![
            bug(1, BugSeverity::Medium, BugStatus::Reopened),
            bug(2, BugSeverity::Medium, BugStatus::InProgress),
        ];
        let health = calculate_task_health(&task(1, TaskStatus::TestingInProgress, bugs));

        assert_eq!(health.testing_cycles, 3);
        assert_eq!(health.open_bugs, 1);
        assert_eq!(health.closed_bugs, 0);
        // 100 - 15 - 20 - 10
        assert_eq!(health.score, 55);
        assert_eq!(health.level, HealthLevel::Warning);
        assert_eq!(health.label, "Needs Attention");
    }

    #[test]
    fn level_thresholds_are_inclusive_lower_bounds() {
        assert_eq!(HealthLevel::from_score(100), HealthLevel::Excellent);
        assert_eq!(HealthLevel::from_score(80), HealthLevel::Excellent);
        assert_eq!(HealthLevel::from_score(79), HealthLevel::Good);
        assert_eq!(HealthLevel::from_score(60), HealthLevel::Good);
        assert_eq!(HealthLevel::from_score(59), HealthLevel::Warning);
        assert_eq!(HealthLevel::from_score(40), HealthLevel::Warning);
        assert_eq!(HealthLevel::from_score(39), HealthLevel::Critical);
        assert_eq!(HealthLevel::from_score(0), HealthLevel::Critical);
    }

    #[test]
    fn fifty_open_criticals_clamp_to_zero() {
        let bugs = (0..50)
            .map(|id| bug(id, BugSeverity::Critical, BugStatus::Open))
            .collect();
        let health = calculate_task_health(&task(1, TaskStatus::TestingFailed, bugs));
        assert_eq!(health.score, 0);
        assert_eq!(health.level, HealthLevel::Critical);
    }

    #[test]
    fn repeated_evaluation_is_identical() {
        let bugs = vec![
            bug(1, BugSeverity::High, BugStatus::Open),
            bug(2, BugSeverity::Low, BugStatus::Closed),
        ];
        let task = task(1, TaskStatus::ReviewPending, bugs);
        assert_eq!(calculate_task_health(&task), calculate_task_health(&task));
    }

    fn any_status() -> impl Strategy<Value = BugStatus> {
        prop_oneof![
            Just(BugStatus::Open),
            Just(BugStatus::InProgress),
            Just(BugStatus::Resolved),
            Just(BugStatus::Closed),
            Just(BugStatus::Reopened),
        ]
    }

    fn any_severity() -> impl Strategy<Value = BugSeverity> {
        prop_oneof![
            Just(BugSeverity::Low),
            Just(BugSeverity::Medium),
            Just(BugSeverity::High),
            Just(BugSeverity::Critical),
        ]
    }

    proptest! {
        #[test]
        fn score_stays_within_bounds(
            bugs in prop::collection::vec((any_severity(), any_status()), 0..80),
            testing in any::<bool>()
        ) {
            let status = if testing { TaskStatus::TestingFailed } else { TaskStatus::InProgress };
            let reports = bugs
                .into_iter()
                .enumerate()
                .map(|(idx, (severity, status))| bug(idx as u64, severity, status))
                .collect();
            let health = calculate_task_health(&task(1, status, reports));
            prop_assert!(health.score <= 100);
            prop_assert_eq!(health.level, HealthLevel::from_score(health.score));
        }

        #[test]
        fn another_open_bug_never_raises_the_score(
            bugs in prop::collection::vec((any_severity(), any_status()), 0..40)
        ) {
            let mut reports: Vec<_> = bugs
                .into_iter()
                .enumerate()
                .map(|(idx, (severity, status))| bug(idx as u64, severity, status))
                .collect();
            let before = calculate_task_health(&task(1, TaskStatus::InProgress, reports.clone()));

            reports.push(bug(10_000, BugSeverity::Medium, BugStatus::Open));
            let after = calculate_task_health(&task(1, TaskStatus::InProgress, reports));
            prop_assert!(after.score <= before.score);
        }
    }
}
