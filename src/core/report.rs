use crate::config::{Config, FailOn};
use crate::core::{RunProfile, TaskHealthEntry};
use crate::core::health::HealthLevel;
use crate::core::ranking::{TeamMemberStats, Trend};
use crate::core::summary::ProjectSummary;
use colored::Colorize;
use serde::Serialize;

impl HealthLevel {
    pub fn meets_fail_on(self, fail_on: FailOn) -> bool {
        match fail_on {
            FailOn::None => false,
            FailOn::Critical => matches!(self, Self::Critical),
            FailOn::Warning => matches!(self, Self::Critical | Self::Warning),
        }
    }

    fn colored(self) -> String {
        let text = self.as_str().to_uppercase();
        match self {
            Self::Excellent => text.green().bold().to_string(),
            Self::Good => text.cyan().bold().to_string(),
            Self::Warning => text.yellow().bold().to_string(),
            Self::Critical => text.red().bold().to_string(),
        }
    }
}

impl Trend {
    fn arrow(self) -> String {
        match self {
            Self::Up => "↑".green().to_string(),
            Self::Stable => "→".normal().to_string(),
            Self::Down => "↓".red().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct LevelCounts {
    pub excellent: usize,
    pub good: usize,
    pub warning: usize,
    pub critical: usize,
    pub total: usize,
}

impl LevelCounts {
    pub fn from_levels(levels: impl Iterator<Item = HealthLevel>) -> Self {
        let mut counts = Self::default();
        for level in levels {
            match level {
                HealthLevel::Excellent => counts.excellent += 1,
                HealthLevel::Good => counts.good += 1,
                HealthLevel::Warning => counts.warning += 1,
                HealthLevel::Critical => counts.critical += 1,
            }
            counts.total += 1;
        }
        counts
    }
}

#[derive(Debug, Clone)]
pub struct ExitStatus {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl ExitStatus {
    pub fn passed() -> Self {
        Self {
            ok: true,
            reasons: Vec::new(),
        }
    }

    pub fn reason_line(&self) -> String {
        self.reasons.join("; ")
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub fail_on: FailOn,
    pub min_average: u8,
}

#[derive(Debug, Clone)]
pub struct FinalReport {
    pub profile: RunProfile,
    pub tasks: Vec<TaskHealthEntry>,
    pub projects: Vec<ProjectSummary>,
    pub counts: LevelCounts,
    pub average_score: Option<f64>,
    pub rankings: Vec<TeamMemberStats>,
    pub config: ConfigSummary,
    pub exit: ExitStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<JsonHealth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rankings: Option<Vec<TeamMemberStats>>,
    pub config: ConfigSummary,
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonHealth {
    pub average_score: Option<f64>,
    pub counts: LevelCounts,
    pub tasks: Vec<TaskHealthEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectSummary>,
}

impl From<&FinalReport> for JsonReport {
    fn from(report: &FinalReport) -> Self {
        let health = report.profile.includes_health().then(|| JsonHealth {
            average_score: report.average_score,
            counts: report.counts.clone(),
            tasks: report.tasks.clone(),
            projects: report.projects.clone(),
        });
        let rankings = report
            .profile
            .includes_rankings()
            .then(|| report.rankings.clone());

        Self {
            health,
            rankings,
            config: report.config.clone(),
            ok: report.exit.ok,
        }
    }
}

pub fn evaluate_exit(
    average_score: Option<f64>,
    entries: &[TaskHealthEntry],
    cfg: &Config,
) -> ExitStatus {
    let mut reasons = Vec::new();

    if let Some(average) =
        average_score.filter(|average| *average < f64::from(cfg.general.min_average))
    {
        reasons.push(format!(
            "average health {:.1} is below min_average {}",
            average, cfg.general.min_average
        ));
    }

    let failing = entries
        .iter()
        .filter(|entry| entry.health.level.meets_fail_on(cfg.general.fail_on))
        .count();
    if failing > 0 {
        reasons.push(match cfg.general.fail_on {
            FailOn::Warning => format!("{failing} task(s) at warning level or worse"),
            FailOn::Critical => format!("{failing} task(s) at critical level"),
            FailOn::None => String::new(),
        });
    }

    ExitStatus {
        ok: reasons.is_empty(),
        reasons,
    }
}

pub fn print_human(report: &FinalReport) {
    if report.profile.includes_health() {
        print_health(report);
    }
    if report.profile.includes_rankings() {
        if report.profile.includes_health() {
            println!();
        }
        print_leaderboard(&report.rankings);
    }

    println!();
    if report.exit.ok {
        println!("exit: OK");
    } else {
        println!("exit: FAILED ({})", report.exit.reason_line());
    }
}

fn print_health(report: &FinalReport) {
    match report.average_score {
        Some(average) => println!(
            "Task Health: {:.1}/100 average across {} task(s)",
            average, report.counts.total
        ),
        None => println!("Task Health: no tasks in snapshot"),
    }

    for level in [
        HealthLevel::Critical,
        HealthLevel::Warning,
        HealthLevel::Good,
        HealthLevel::Excellent,
    ] {
        let grouped: Vec<&TaskHealthEntry> = report
            .tasks
            .iter()
            .filter(|entry| entry.health.level == level)
            .collect();

        if grouped.is_empty() {
            continue;
        }

        println!();
        println!("{} ({})", level.colored(), grouped.len());

        for entry in grouped {
            let health = &entry.health;
            println!(
                "[{:>3}] #{} {} ({} / {}) - {}",
                health.score, entry.task_id, entry.task, entry.company, entry.project, health.label
            );
            println!(
                "-> bugs: {} total, {} open, {} closed, {} critical; testing cycles: {}",
                health.total_bugs,
                health.open_bugs,
                health.closed_bugs,
                health.critical_bugs,
                health.testing_cycles
            );
        }
    }

    if !report.projects.is_empty() {
        println!();
        println!("{}", "Projects".bold());
        for project in &report.projects {
            println!(
                "{} / {}: {:.1} avg over {} task(s), {} critical",
                project.company,
                project.project,
                project.average_score,
                project.task_count,
                project.counts.critical
            );
        }
    }
}

fn print_leaderboard(rankings: &[TeamMemberStats]) {
    println!("{}", "Team Leaderboard".bold());

    for stats in rankings {
        let badges = if stats.badges.is_empty() {
            String::new()
        } else {
            let names: Vec<&str> = stats.badges.iter().map(|badge| badge.as_str()).collect();
            format!(" [{}]", names.join(", "))
        };

        println!(
            "#{:<3} {:<24} {:<20} {:>5} {}{}",
            stats.rank,
            stats.name,
            stats.role,
            stats.score,
            stats.trend.arrow(),
            badges
        );
    }
}
