//! In-memory Repository
//!
//! Process-local reports and members for tests and database-less runs.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::department::Department;
use kernel::id::{ReportId, UserId};
use tokio::sync::RwLock;

use crate::domain::entities::{Member, ReportWithSubmitter, Submitter, WorkerReport};
use crate::domain::repository::{MemberDirectory, ReportRepository};
use crate::error::{ReportError, ReportResult};

#[derive(Default)]
struct Store {
    members: HashMap<UserId, Member>,
    reports: HashMap<ReportId, WorkerReport>,
}

#[derive(Clone, Default)]
pub struct InMemoryReportRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an account
    pub async fn insert_member(&self, member: Member) {
        self.store
            .write()
            .await
            .members
            .insert(member.user_id, member);
    }

    pub async fn remove_member(&self, user_id: &UserId) {
        self.store.write().await.members.remove(user_id);
    }

    pub async fn report_count(&self) -> usize {
        self.store.read().await.reports.len()
    }
}

impl ReportRepository for InMemoryReportRepository {
    async fn create(&self, report: &WorkerReport) -> ReportResult<()> {
        self.store
            .write()
            .await
            .reports
            .insert(report.report_id, report.clone());
        Ok(())
    }

    async fn find_by_id(&self, report_id: &ReportId) -> ReportResult<Option<WorkerReport>> {
        Ok(self.store.read().await.reports.get(report_id).cloned())
    }

    async fn list_by_department(
        &self,
        department: Department,
    ) -> ReportResult<Vec<ReportWithSubmitter>> {
        let store = self.store.read().await;

        // Reports whose submitter is gone are dropped, as with an inner join
        let mut reports: Vec<ReportWithSubmitter> = store
            .reports
            .values()
            .filter(|r| r.department == department)
            .filter_map(|r| {
                let member = store.members.get(&r.user_id)?;
                Some(ReportWithSubmitter {
                    report: r.clone(),
                    submitter: Submitter {
                        name: member.name.clone(),
                        email: member.email.clone(),
                    },
                })
            })
            .collect();

        reports.sort_by(|a, b| b.report.created_at.cmp(&a.report.created_at));
        Ok(reports)
    }

    async fn save_rating(&self, report: &WorkerReport) -> ReportResult<()> {
        let mut store = self.store.write().await;
        let stored = store
            .reports
            .get_mut(&report.report_id)
            .ok_or(ReportError::ReportNotFound)?;
        stored.rating = report.rating;
        stored.leader_comment = report.leader_comment.clone();
        stored.updated_at = report.updated_at;
        Ok(())
    }
}

impl MemberDirectory for InMemoryReportRepository {
    async fn find_member(&self, user_id: &UserId) -> ReportResult<Option<Member>> {
        Ok(self.store.read().await.members.get(user_id).cloned())
    }
}
