#[cfg(test)]
pub mod fixtures;
pub mod health;
pub mod ranking;
pub mod report;
pub mod summary;

use crate::config::Config;
use crate::core::health::{TaskHealthInfo, calculate_task_health};
use crate::core::report::{ConfigSummary, ExitStatus, FinalReport, LevelCounts};
use crate::model::{Id, Snapshot, TaskPriority, TaskStatus};
use anyhow::{Result, bail};
use serde::Serialize;

/// A task's health together with where the task lives.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskHealthEntry {
    pub company_id: Id,
    pub company: String,
    pub project_id: Id,
    pub project: String,
    pub task_id: Id,
    pub task: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub health: TaskHealthInfo,
}

#[derive(Debug, Clone, Copy)]
pub enum RunProfile {
    Full,
    HealthOnly { task: Option<Id> },
    RankingOnly { top: Option<usize> },
}

impl RunProfile {
    pub fn includes_health(self) -> bool {
        matches!(self, Self::Full | Self::HealthOnly { .. })
    }

    pub fn includes_rankings(self) -> bool {
        matches!(self, Self::Full | Self::RankingOnly { .. })
    }
}

pub fn evaluate_tasks(snapshot: &Snapshot) -> Vec<TaskHealthEntry> {
    let mut entries = Vec::new();

    for company in &snapshot.companies {
        for project in &company.projects {
            for task in &project.tasks {
                entries.push(TaskHealthEntry {
                    company_id: company.id,
                    company: company.name.clone(),
                    project_id: project.id,
                    project: project.name.clone(),
                    task_id: task.id,
                    task: task.title.clone(),
                    status: task.status,
                    priority: task.priority,
                    health: calculate_task_health(task),
                });
            }
        }
    }

    entries
}

pub fn run_report(snapshot: &Snapshot, cfg: &Config, profile: RunProfile) -> Result<FinalReport> {
    let mut tasks = Vec::new();
    let mut projects = Vec::new();
    let mut rankings = Vec::new();

    if profile.includes_health() {
        tasks = evaluate_tasks(snapshot);

        if let RunProfile::HealthOnly { task: Some(task_id) } = profile {
            if snapshot.find_task(task_id).is_none() {
                bail!("task {} not found in snapshot", task_id);
            }
            tasks.retain(|entry| entry.task_id == task_id);
        } else {
            projects = summary::summarize_projects(&snapshot.companies, &tasks);
        }

        tracing::debug!(
            tasks = tasks.len(),
            projects = projects.len(),
            "evaluated task health"
        );
    }

    if profile.includes_rankings() {
        rankings = ranking::calculate_team_rankings(&snapshot.companies, &snapshot.users);
        tracing::debug!(members = rankings.len(), "ranked team members");

        let top = match profile {
            RunProfile::RankingOnly { top: Some(top) } => top,
            _ => cfg.ranking.top,
        };
        if top > 0 {
            rankings.truncate(top);
        }
    }

    let counts = LevelCounts::from_levels(tasks.iter().map(|entry| entry.health.level));
    let average_score = summary::average_score(tasks.iter().map(|entry| entry.health.score));
    let exit = if profile.includes_health() {
        report::evaluate_exit(average_score, &tasks, cfg)
    } else {
        ExitStatus::passed()
    };

    if !exit.ok {
        tracing::info!(reasons = %exit.reason_line(), "health gate failed");
    }

    Ok(FinalReport {
        profile,
        tasks,
        projects,
        counts,
        average_score,
        rankings,
        config: ConfigSummary {
            fail_on: cfg.general.fail_on,
            min_average: cfg.general.min_average,
        },
        exit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{bug, company, project, task, user, user_ref};
    use crate::model::{BugSeverity, BugStatus, Role, Task};

    fn snapshot() -> Snapshot {
        let shipped = Task {
            assignees: vec![user_ref(1)],
            ..task(1, TaskStatus::Live, vec![])
        };
        let failing = task(
            2,
            TaskStatus::TestingFailed,
            vec![
                bug(1, BugSeverity::Critical, BugStatus::Open),
                bug(2, BugSeverity::Low, BugStatus::Open),
                bug(3, BugSeverity::Low, BugStatus::Closed),
            ],
        );
        Snapshot {
            companies: vec![
                company(1, vec![project(1, vec![shipped])]),
                company(2, vec![project(2, vec![failing])]),
            ],
            users: vec![
                user(1, Role::TeamLead),
                user(2, Role::Admin),
                user(3, Role::TestingTeam),
            ],
        }
    }

    #[test]
    fn evaluates_every_task_with_location() {
        let entries = evaluate_tasks(&snapshot());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].company, "company-1");
        assert_eq!(entries[1].project_id, 2);
        assert_eq!(entries[1].health.score, 13);
    }

    #[test]
    fn full_report_gates_on_critical_tasks() {
        let report = run_report(&snapshot(), &Config::default(), RunProfile::Full).unwrap();

        assert_eq!(report.tasks.len(), 2);
        assert_eq!(report.projects.len(), 2);
        assert_eq!(report.counts.critical, 1);
        assert_eq!(report.average_score, Some(56.5));
        assert_eq!(report.rankings.len(), 3);
        assert_eq!(report.rankings[0].user_id, 1);
        assert!(!report.exit.ok);
    }

    #[test]
    fn single_task_health() {
        let profile = RunProfile::HealthOnly { task: Some(1) };
        let report = run_report(&snapshot(), &Config::default(), profile).unwrap();

        assert_eq!(report.tasks.len(), 1);
        assert!(report.projects.is_empty());
        assert!(report.rankings.is_empty());
        assert!(report.exit.ok);
    }

    #[test]
    fn unknown_task_is_an_error() {
        let profile = RunProfile::HealthOnly { task: Some(99) };
        let err = run_report(&snapshot(), &Config::default(), profile).unwrap_err();
        assert!(err.to_string().contains("task 99 not found"));
    }

    #[test]
    fn ranking_profile_truncates_and_never_gates() {
        let profile = RunProfile::RankingOnly { top: Some(2) };
        let report = run_report(&snapshot(), &Config::default(), profile).unwrap();

        assert!(report.tasks.is_empty());
        assert_eq!(report.rankings.len(), 2);
        assert_eq!(report.rankings[1].rank, 2);
        assert!(report.exit.ok);
    }

    #[test]
    fn json_report_includes_requested_sections() {
        let report = run_report(
            &snapshot(),
            &Config::default(),
            RunProfile::RankingOnly { top: None },
        )
        .unwrap();
        let json = serde_json::to_value(report::JsonReport::from(&report)).unwrap();

        assert!(json.get("health").is_none());
        assert_eq!(json["rankings"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["rankings"][0]["trend"], "stable");
        assert_eq!(json["config"]["failOn"], "critical");
    }
}
