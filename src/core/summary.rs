use crate::core::TaskHealthEntry;
use crate::core::health::HealthLevel;
use crate::core::report::LevelCounts;
use crate::model::{Company, Id};
use crate::utils::time::round_to_tenth;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub company_id: Id,
    pub company: String,
    pub project_id: Id,
    pub project: String,
    pub task_count: usize,
    /// 100.0 for a project without tasks.
    pub average_score: f64,
    pub counts: LevelCounts,
    pub critical_tasks: Vec<Id>,
}

/// One summary per project, in snapshot order, built from already-evaluated task health.
pub fn summarize_projects(
    companies: &[Company],
    entries: &[TaskHealthEntry],
) -> Vec<ProjectSummary> {
    let mut summaries = Vec::new();

    for company in companies {
        for project in &company.projects {
            let project_entries: Vec<&TaskHealthEntry> = entries
                .iter()
                .filter(|entry| entry.company_id == company.id && entry.project_id == project.id)
                .collect();

            let average =
                average_score(project_entries.iter().map(|entry| entry.health.score))
                    .unwrap_or(100.0);
            let counts =
                LevelCounts::from_levels(project_entries.iter().map(|entry| entry.health.level));
            let critical_tasks = project_entries
                .iter()
                .filter(|entry| entry.health.level == HealthLevel::Critical)
                .map(|entry| entry.task_id)
                .collect();

            summaries.push(ProjectSummary {
                company_id: company.id,
                company: company.name.clone(),
                project_id: project.id,
                project: project.name.clone(),
                task_count: project_entries.len(),
                average_score: average,
                counts,
                critical_tasks,
            });
        }
    }

    summaries
}

/// Mean of the scores rounded to one decimal, or `None` when there are no scores.
pub fn average_score(scores: impl Iterator<Item = u8>) -> Option<f64> {
    let (sum, len) = scores.fold((0_u64, 0_u64), |(sum, len), score| {
        (sum + u64::from(score), len + 1)
    });
    if len == 0 {
        None
    } else {
        Some(round_to_tenth(sum as f64 / len as f64))
    }
}
