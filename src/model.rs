use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type Id = u64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    BackendDeveloper,
    FrontendDeveloper,
    MobileDeveloper,
    TestingTeam,
    TeamLead,
    Manager,
}

/// Scoring branch a role falls into. Admins have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleBucket {
    Qa,
    Developer,
    Lead,
    Unbucketed,
}

impl Role {
    pub fn bucket(self) -> RoleBucket {
        match self {
            Self::TestingTeam => RoleBucket::Qa,
            Self::BackendDeveloper | Self::FrontendDeveloper | Self::MobileDeveloper => {
                RoleBucket::Developer
            }
            Self::TeamLead | Self::Manager => RoleBucket::Lead,
            Self::Admin => RoleBucket::Unbucketed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::BackendDeveloper => "backend_developer",
            Self::FrontendDeveloper => "frontend_developer",
            Self::MobileDeveloper => "mobile_developer",
            Self::TestingTeam => "testing_team",
            Self::TeamLead => "team_lead",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A user as embedded in bugs, assignee lists and test-case documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRef {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserRef {
    pub fn is(&self, user_id: Id) -> bool {
        self.id == user_id
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BugSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BugStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
    Reopened,
}

impl BugStatus {
    /// Open or reopened; `in_progress` is neither open nor closed for scoring.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open | Self::Reopened)
    }

    pub fn is_closed(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugReport {
    pub id: Id,
    pub bug_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub severity: BugSeverity,
    pub status: BugStatus,
    pub task_id: Id,
    pub reported_by: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<UserRef>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl BugReport {
    pub fn is_critical(&self) -> bool {
        self.severity == BugSeverity::Critical
    }
}

/// Task lifecycle, declared in workflow order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Draft,
    Backlog,
    InProgress,
    DevelopmentInProgress,
    ReviewPending,
    TestingInProgress,
    TestingFailed,
    UiCompleted,
    UatApproved,
    Live,
}

impl TaskStatus {
    pub fn is_in_testing(self) -> bool {
        matches!(self, Self::TestingInProgress | Self::TestingFailed)
    }

    pub fn is_completed(self) -> bool {
        matches!(self, Self::UatApproved | Self::Live)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TestCaseStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseDocument {
    #[serde(default)]
    pub id: Id,
    pub submitted_by: UserRef,
    pub status: TestCaseStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Id,
    #[serde(default)]
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub assignees: Vec<UserRef>,
    #[serde(default)]
    pub bug_reports: Vec<BugReport>,
    #[serde(default)]
    pub test_case_documents: Vec<TestCaseDocument>,
}

impl Task {
    pub fn is_assigned_to(&self, user_id: Id) -> bool {
        self.assignees.iter().any(|assignee| assignee.is(user_id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub members: Vec<UserRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Everything the evaluators need for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub companies: Vec<Company>,
    pub users: Vec<User>,
}

impl Snapshot {
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        all_tasks(&self.companies)
    }

    pub fn find_task(&self, task_id: Id) -> Option<&Task> {
        self.tasks().find(|task| task.id == task_id)
    }
}

pub fn all_tasks(companies: &[Company]) -> impl Iterator<Item = &Task> {
    companies
        .iter()
        .flat_map(|company| company.projects.iter())
        .flat_map(|project| project.tasks.iter())
}
