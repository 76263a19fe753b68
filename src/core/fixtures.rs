//! Builders shared by the scoring tests.

use crate::model::{
    BugReport, BugSeverity, BugStatus, Company, Id, Project, Role, Task, TaskPriority, TaskStatus,
    TestCaseDocument, TestCaseStatus, User, UserRef,
};
use chrono::{DateTime, TimeZone, Utc};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub fn user_ref(id: Id) -> UserRef {
    UserRef {
        id,
        name: None,
        email: None,
    }
}

pub fn user(id: Id, role: Role) -> User {
    User {
        id,
        name: format!("user-{id}"),
        email: format!("user-{id}@example.com"),
        role,
        designation: None,
        avatar: None,
    }
}

pub fn bug(id: Id, severity: BugSeverity, status: BugStatus) -> BugReport {
    BugReport {
        id,
        bug_id: format!("BUG-{id}"),
        title: None,
        severity,
        status,
        task_id: 0,
        reported_by: user_ref(0),
        assigned_to: None,
        resolved_by: None,
        created_at: base_time(),
        resolved_at: None,
    }
}

pub fn task(id: Id, status: TaskStatus, bug_reports: Vec<BugReport>) -> Task {
    let bug_reports = bug_reports
        .into_iter()
        .map(|bug| BugReport { task_id: id, ..bug })
        .collect();
    Task {
        id,
        title: format!("task-{id}"),
        status,
        priority: TaskPriority::Medium,
        assignees: Vec::new(),
        bug_reports,
        test_case_documents: Vec::new(),
    }
}

pub fn test_case(id: Id, submitted_by: Id, status: TestCaseStatus) -> TestCaseDocument {
    TestCaseDocument {
        id,
        submitted_by: user_ref(submitted_by),
        status,
    }
}

pub fn company(id: Id, projects: Vec<Project>) -> Company {
    Company {
        id,
        name: format!("company-{id}"),
        projects,
    }
}

pub fn project(id: Id, tasks: Vec<Task>) -> Project {
    Project {
        id,
        name: format!("project-{id}"),
        tasks,
        members: Vec::new(),
    }
}
