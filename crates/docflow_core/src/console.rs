//! Console facade: the one object the presentation layer talks to.
//!
//! # Responsibility
//! - Own the session and the three collection engines for one console.
//! - Resolve the active role and hand it to each engine explicitly.
//! - Serve role-scoped lists, search and stats from fresh snapshots.
//!
//! # Invariants
//! - Every role-scoped call fails with `NoActiveSession` after logout.
//! - Stats are recomputed per call and never cached.
//! - No call holds more than one collection lock at a time.

use std::future::Future;
use std::sync::Arc;

use log::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::ConsoleConfig;
use crate::error::{Collection, ConsoleError, ConsoleResult, CoreError};
use crate::model::document::{Document, DocumentId, NewDocument};
use crate::model::filter::TaskFilter;
use crate::model::notification::{NewNotification, Notification, NotificationId, ViewMode};
use crate::model::role::{Role, Section};
use crate::model::task::{NewTask, Task, TaskId, TaskStatus};
use crate::repo::InMemoryRepository;
use crate::search::{search, SearchCoordinator, SearchFilters, SearchOutcome};
use crate::service::{DocumentService, NotificationService, TaskService};
use crate::session::{Session, SessionContext};
use crate::stats::{
    count_by_status, notification_counts, processing_rate, DocumentStats, NotificationCounts,
    TaskCounts,
};
use crate::visibility::is_visible;

pub type ConsoleDocuments = DocumentService<InMemoryRepository<Document>>;
pub type ConsoleTasks = TaskService<InMemoryRepository<Task>>;
pub type ConsoleNotifications = NotificationService<InMemoryRepository<Notification>>;

/// Application state for one console: session plus collections.
pub struct Console {
    session: SessionContext,
    default_role: Role,
    pub(crate) documents: ConsoleDocuments,
    pub(crate) tasks: ConsoleTasks,
    pub(crate) notifications: ConsoleNotifications,
    searches: SearchCoordinator,
    pub(crate) clock: Arc<dyn Clock>,
}

impl Console {
    /// Creates an empty console with no active session.
    pub fn new(config: &ConsoleConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            session: SessionContext::new(),
            default_role: config.session.default_role,
            documents: DocumentService::new(InMemoryRepository::new(), Arc::clone(&clock)),
            tasks: TaskService::new(InMemoryRepository::new(), Arc::clone(&clock)),
            notifications: NotificationService::new(InMemoryRepository::new(), Arc::clone(&clock)),
            searches: SearchCoordinator::new(config.search.latency()),
            clock,
        }
    }

    pub fn with_system_clock(config: &ConsoleConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    // --- session -------------------------------------------------------

    /// Opens a session for `role`, replacing any active one.
    pub fn set_role(&self, role: Role) -> ConsoleResult<Session> {
        self.session.login(role, self.clock.now())
    }

    /// Opens a session for the configured default role.
    pub fn login_default(&self) -> ConsoleResult<Session> {
        self.set_role(self.default_role)
    }

    pub fn logout(&self) -> ConsoleResult<Option<Session>> {
        self.session.logout()
    }

    pub fn current_role(&self) -> ConsoleResult<Role> {
        self.session.current_role()
    }

    pub fn session(&self) -> ConsoleResult<Option<Session>> {
        self.session.current()
    }

    pub fn default_role(&self) -> Role {
        self.default_role
    }

    pub fn can_access(&self, section: Section) -> ConsoleResult<bool> {
        Ok(self.current_role()?.can_access(section))
    }

    /// Returns the active role when it may open `section`.
    pub fn require_section(&self, section: Section) -> ConsoleResult<Role> {
        let role = self.current_role()?;
        if role.can_access(section) {
            return Ok(role);
        }
        info!(
            "event=section_denied module=console status=error role={} section={}",
            role, section
        );
        Err(ConsoleError::Forbidden { role, section })
    }

    // --- documents -----------------------------------------------------

    /// Documents in insertion order.
    ///
    /// `role_scoped = false` returns the unscoped collection and is reserved
    /// for roles that may open the analytics section.
    pub fn list_documents(&self, role_scoped: bool) -> ConsoleResult<Vec<Document>> {
        if role_scoped {
            let role = self.current_role()?;
            return Ok(self.documents.list_visible(role)?);
        }
        self.require_section(Section::Analytics)?;
        Ok(self.documents.list_all()?)
    }

    /// Intake from the upload pipeline. Needs no session.
    pub fn register_document(&self, new: NewDocument) -> ConsoleResult<Document> {
        Ok(self.documents.register(new)?)
    }

    pub fn complete_document_processing(&self, id: DocumentId) -> ConsoleResult<Document> {
        Ok(self.documents.complete_processing(id)?)
    }

    pub fn fail_document_processing(&self, id: DocumentId) -> ConsoleResult<Document> {
        Ok(self.documents.fail_processing(id)?)
    }

    pub fn retry_document_processing(&self, id: DocumentId) -> ConsoleResult<Document> {
        Ok(self.documents.retry_processing(id)?)
    }

    // --- tasks ---------------------------------------------------------

    pub fn list_tasks(&self, filter: &TaskFilter) -> ConsoleResult<Vec<Task>> {
        let role = self.current_role()?;
        Ok(self.tasks.list_tasks(role, filter)?)
    }

    pub fn get_task(&self, id: TaskId) -> ConsoleResult<Task> {
        let role = self.current_role()?;
        Ok(self.tasks.get_task(role, id)?)
    }

    /// Creates a task on behalf of the active role.
    ///
    /// A blank `assigned_by` is filled with the role label.
    pub fn create_task(&self, mut new: NewTask) -> ConsoleResult<Task> {
        let role = self.current_role()?;
        if new.assigned_by.trim().is_empty() {
            new.assigned_by = role.label().to_string();
        }
        Ok(self.tasks.create_task(new)?)
    }

    pub fn start_task(&self, id: TaskId) -> ConsoleResult<Task> {
        let role = self.current_role()?;
        Ok(self.tasks.start_task(role, id)?)
    }

    pub fn complete_task(&self, id: TaskId) -> ConsoleResult<Task> {
        let role = self.current_role()?;
        Ok(self.tasks.complete_task(role, id)?)
    }

    pub fn update_task_status(&self, id: TaskId, status: TaskStatus) -> ConsoleResult<Task> {
        let role = self.current_role()?;
        Ok(self.tasks.update_status(role, id, status)?)
    }

    pub fn add_task_comment(&self, id: TaskId) -> ConsoleResult<Task> {
        let role = self.current_role()?;
        Ok(self.tasks.add_comment(role, id)?)
    }

    /// Resolves the task's weak document link.
    ///
    /// An absent link, a missing document or a document the role cannot see
    /// all yield `None`.
    pub fn linked_document(&self, task_id: TaskId) -> ConsoleResult<Option<Document>> {
        let role = self.current_role()?;
        let task = self.tasks.get_task(role, task_id)?;
        let Some(document_id) = task.document_id else {
            return Ok(None);
        };
        match self.documents.get(document_id) {
            Ok(document) if is_visible(role, Some(&document.department)) => Ok(Some(document)),
            Ok(_) => Ok(None),
            Err(CoreError::NotFound {
                collection: Collection::Documents,
                ..
            }) => {
                debug!(
                    "event=task_link_dangling module=console status=noop task_id={} document_id={}",
                    task_id, document_id
                );
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    // --- notifications -------------------------------------------------

    pub fn list_notifications(&self, mode: ViewMode) -> ConsoleResult<Vec<Notification>> {
        let role = self.current_role()?;
        Ok(self.notifications.list(role, mode)?)
    }

    /// Intake from the event source. Needs no session.
    pub fn push_notification(&self, new: NewNotification) -> ConsoleResult<Notification> {
        Ok(self.notifications.push(new)?)
    }

    pub fn mark_read(&self, id: NotificationId) -> ConsoleResult<Notification> {
        let role = self.current_role()?;
        Ok(self.notifications.mark_read(role, id)?)
    }

    /// Marks every notification the active role can see; returns how many changed.
    pub fn mark_all_read(&self) -> ConsoleResult<usize> {
        let role = self.current_role()?;
        Ok(self.notifications.mark_all_read(role)?)
    }

    pub fn delete_notification(&self, id: NotificationId) -> ConsoleResult<Notification> {
        let role = self.current_role()?;
        Ok(self.notifications.delete(role, id)?)
    }

    // --- search --------------------------------------------------------

    pub fn search_documents(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> ConsoleResult<Vec<Document>> {
        let role = self.current_role()?;
        let snapshot = self.documents.list_all()?;
        let results = search(role, &snapshot, query, filters, self.clock.today());
        log_search("document", role, query, results.len());
        Ok(results)
    }

    /// Searches tasks by title and description, using observable status.
    pub fn search_tasks(&self, query: &str, filters: &SearchFilters) -> ConsoleResult<Vec<Task>> {
        let role = self.current_role()?;
        let snapshot = self.tasks.visible_tasks(role)?;
        let results = search(role, &snapshot, query, filters, self.clock.today());
        log_search("task", role, query, results.len());
        Ok(results)
    }

    /// Latest-wins document search.
    ///
    /// Role, snapshot and ticket are all taken when this is called, before the
    /// returned future is awaited. If another search is issued before this one
    /// finishes, this one resolves to `Superseded`.
    pub fn search_documents_async(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> ConsoleResult<impl Future<Output = SearchOutcome<Document>> + '_> {
        let role = self.current_role()?;
        let snapshot = self.documents.list_all()?;
        let today = self.clock.today();
        let query = query.to_string();
        let filters = filters.clone();
        debug!(
            "event=search_issue module=console status=ok collection=document role={} query_len={} snapshot={}",
            role,
            query.len(),
            snapshot.len()
        );
        Ok(self
            .searches
            .run(move || search(role, &snapshot, &query, &filters, today)))
    }

    // --- stats ---------------------------------------------------------

    /// Status counts over exactly the set `list_tasks(filter)` shows.
    pub fn task_stats(&self, filter: &TaskFilter) -> ConsoleResult<TaskCounts> {
        Ok(count_by_status(&self.list_tasks(filter)?))
    }

    pub fn notification_stats(&self, mode: ViewMode) -> ConsoleResult<NotificationCounts> {
        Ok(notification_counts(&self.list_notifications(mode)?))
    }

    pub fn document_stats(&self, role_scoped: bool) -> ConsoleResult<DocumentStats> {
        Ok(DocumentStats::from_documents(
            &self.list_documents(role_scoped)?,
        ))
    }

    /// Processed share of documents as a whole percentage; 0 when empty.
    pub fn processing_rate(&self, role_scoped: bool) -> ConsoleResult<u32> {
        Ok(processing_rate(&self.document_stats(role_scoped)?))
    }
}

fn log_search(collection: &str, role: Role, query: &str, hits: usize) {
    debug!(
        "event=search module=console status=ok collection={} role={} query_len={} hits={}",
        collection,
        role,
        query.trim().chars().count(),
        hits
    );
}

#[cfg(test)]
mod tests {
    use super::Console;
    use crate::clock::FixedClock;
    use crate::config::ConsoleConfig;
    use crate::error::{ConsoleError, CoreError};
    use crate::model::document::NewDocument;
    use crate::model::priority::Priority;
    use crate::model::role::{Role, Section};
    use crate::model::task::NewTask;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::sync::Arc;

    fn console() -> Console {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap());
        Console::new(&ConsoleConfig::default(), Arc::new(clock))
    }

    fn new_document(title: &str, department: &str) -> NewDocument {
        NewDocument {
            title: title.to_string(),
            summary: String::new(),
            department: department.to_string(),
            language: "English".to_string(),
            priority: Priority::Medium,
            deadline: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            keywords: Vec::new(),
            assigned_to: "Sarah Johnson".to_string(),
            score: None,
        }
    }

    #[test]
    fn role_scoped_calls_need_a_session() {
        let console = console();
        assert_eq!(
            console.list_tasks(&Default::default()).unwrap_err(),
            ConsoleError::NoActiveSession
        );
        console.login_default().unwrap();
        assert_eq!(console.current_role().unwrap(), Role::Engineer);
        console.logout().unwrap();
        assert_eq!(
            console.mark_all_read().unwrap_err(),
            ConsoleError::NoActiveSession
        );
    }

    #[test]
    fn unscoped_documents_are_admin_only() {
        let console = console();
        console.register_document(new_document("Budget", "Finance")).unwrap();
        console.set_role(Role::Hr).unwrap();
        assert_eq!(
            console.list_documents(false).unwrap_err(),
            ConsoleError::Forbidden {
                role: Role::Hr,
                section: Section::Analytics
            }
        );
        assert!(console.list_documents(true).unwrap().is_empty());

        console.set_role(Role::Admin).unwrap();
        assert_eq!(console.list_documents(false).unwrap().len(), 1);
    }

    #[test]
    fn create_task_fills_assigned_by_from_role() {
        let console = console();
        console.set_role(Role::Finance).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let mut new = NewTask::new("Close ledger", "Robert Wilson", due);
        new.department = "Finance".to_string();
        let task = console.create_task(new).unwrap();
        assert_eq!(task.assigned_by, "Finance");
    }

    #[test]
    fn linked_document_tolerates_missing_and_hidden_targets() {
        let console = console();
        let hr_doc = console.register_document(new_document("Policy", "HR")).unwrap();
        console.set_role(Role::Admin).unwrap();

        let due = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let mut linked = NewTask::new("Review policy", "Emily Davis", due);
        linked.department = "Finance".to_string();
        linked.document_id = Some(hr_doc.id);
        let linked = console.create_task(linked).unwrap();

        let mut dangling = NewTask::new("Review ghost", "Emily Davis", due);
        dangling.department = "Finance".to_string();
        dangling.document_id = Some(999);
        let dangling = console.create_task(dangling).unwrap();

        assert_eq!(console.linked_document(linked.id).unwrap(), Some(hr_doc));
        assert_eq!(console.linked_document(dangling.id).unwrap(), None);

        console.set_role(Role::Finance).unwrap();
        assert_eq!(console.linked_document(linked.id).unwrap(), None);
        assert!(matches!(
            console.linked_document(12).unwrap_err(),
            ConsoleError::Core(CoreError::NotFound { .. })
        ));
    }
}
