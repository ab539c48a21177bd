//! Notification lifecycle engine.
//!
//! # Responsibility
//! - Accept notifications from the event source.
//! - Own read state (`unread -> read`, one-way) and hard deletion.
//!
//! # Invariants
//! - `timestamp` is set once when the notification is pushed.
//! - Bulk operations only touch notifications visible to the acting role.

use std::sync::Arc;

use log::{info, warn};

use crate::clock::Clock;
use crate::error::{Collection, CoreError, CoreResult};
use crate::model::notification::{NewNotification, Notification, NotificationId, ViewMode};
use crate::model::role::Role;
use crate::repo::RecordRepository;
use crate::visibility::is_visible;

pub struct NotificationService<R: RecordRepository<Item = Notification>> {
    repo: R,
    clock: Arc<dyn Clock>,
}

impl<R: RecordRepository<Item = Notification>> NotificationService<R> {
    pub fn new(repo: R, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Stores an event-source notification as unread.
    pub fn push(&self, new: NewNotification) -> CoreResult<Notification> {
        let now = self.clock.now();
        let result = self
            .repo
            .insert_with(|id| Notification::create(id, new, now).map_err(CoreError::from));
        match &result {
            Ok(notification) => info!(
                "event=notification_push module=notification status=ok notification_id={} kind={} priority={}",
                notification.id, notification.kind, notification.priority
            ),
            Err(err) => warn!("event=notification_push module=notification status=error error={err}"),
        }
        result
    }

    /// Visible notifications narrowed by the active view mode.
    pub fn list(&self, role: Role, mode: ViewMode) -> CoreResult<Vec<Notification>> {
        Ok(self
            .repo
            .list()?
            .into_iter()
            .filter(|notification| {
                is_visible(role, notification.department.as_deref())
                    && notification.matches_view(mode)
            })
            .collect())
    }

    /// Marks one notification read; a no-op when it already is.
    ///
    /// # Errors
    /// - `NotFound` when the id is unknown or not visible to `role`.
    pub fn mark_read(&self, role: Role, id: NotificationId) -> CoreResult<Notification> {
        self.repo.update_with(id, |notification| {
            if !is_visible(role, notification.department.as_deref()) {
                return Err(CoreError::not_found(Collection::Notifications, id));
            }
            let changed = notification.mark_read();
            info!(
                "event=notification_read module=notification status={} notification_id={id}",
                if changed { "ok" } else { "noop" }
            );
            Ok(notification.clone())
        })
    }

    /// Marks every notification visible to `role` read.
    ///
    /// Returns how many notifications changed. Notifications the role cannot
    /// see keep their read flag.
    pub fn mark_all_read(&self, role: Role) -> CoreResult<usize> {
        let changed = self.repo.update_where(
            |notification| is_visible(role, notification.department.as_deref()),
            Notification::mark_read,
        )?;
        info!("event=notification_read_all module=notification status=ok role={role} changed={changed}");
        Ok(changed)
    }

    /// Permanently removes a notification.
    pub fn delete(&self, role: Role, id: NotificationId) -> CoreResult<Notification> {
        let result = self.repo.remove_with(id, |notification| {
            if is_visible(role, notification.department.as_deref()) {
                Ok(())
            } else {
                Err(CoreError::not_found(Collection::Notifications, id))
            }
        });
        match &result {
            Ok(_) => info!("event=notification_delete module=notification status=ok notification_id={id}"),
            Err(err) => warn!("event=notification_delete module=notification status=error notification_id={id} error={err}"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::NotificationService;
    use crate::clock::FixedClock;
    use crate::error::CoreError;
    use crate::model::notification::{NewNotification, Notification, NotificationKind, ViewMode};
    use crate::model::priority::Priority;
    use crate::model::role::Role;
    use crate::model::ValidationError;
    use crate::repo::InMemoryRepository;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn service() -> NotificationService<InMemoryRepository<Notification>> {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap(),
        ));
        NotificationService::new(InMemoryRepository::new(), clock)
    }

    fn event(department: Option<&str>, priority: Priority) -> NewNotification {
        NewNotification {
            kind: NotificationKind::Document,
            title: "New Document Processed".to_string(),
            message: "Ready for review.".to_string(),
            priority,
            action_required: false,
            department: department.map(str::to_string),
            related_id: None,
        }
    }

    #[test]
    fn mark_all_read_only_touches_visible_notifications() {
        let service = service();
        let hr = service.push(event(Some("HR"), Priority::Low)).unwrap();
        let eng = service.push(event(Some("Engineering"), Priority::Low)).unwrap();
        let system = service.push(event(None, Priority::Low)).unwrap();

        assert_eq!(service.mark_all_read(Role::Hr).unwrap(), 2);

        let all = service.list(Role::Admin, ViewMode::All).unwrap();
        let read_of = |id: u64| all.iter().find(|n| n.id == id).unwrap().read;
        assert!(read_of(hr.id));
        assert!(read_of(system.id));
        assert!(!read_of(eng.id));
        assert!(service.list(Role::Hr, ViewMode::Unread).unwrap().is_empty());
    }

    #[test]
    fn delete_is_permanent_and_second_delete_fails() {
        let service = service();
        let stored = service.push(event(None, Priority::Urgent)).unwrap();
        service.delete(Role::Finance, stored.id).unwrap();
        assert!(matches!(
            service.delete(Role::Finance, stored.id).unwrap_err(),
            CoreError::NotFound { .. }
        ));
        assert!(service.list(Role::Admin, ViewMode::All).unwrap().is_empty());
    }

    #[test]
    fn mark_read_rejects_unknown_and_invisible_ids() {
        let service = service();
        let eng = service.push(event(Some("Engineering"), Priority::Low)).unwrap();
        assert!(service.mark_read(Role::Admin, 99).is_err());
        assert!(service.mark_read(Role::Hr, eng.id).is_err());
        assert!(service.mark_read(Role::Engineer, eng.id).unwrap().read);
        assert!(service.mark_read(Role::Engineer, eng.id).unwrap().read);
    }

    #[test]
    fn switching_view_mode_does_not_mutate() {
        let service = service();
        service.push(event(None, Priority::High)).unwrap();
        service.push(event(None, Priority::Medium)).unwrap();
        assert_eq!(service.list(Role::Hr, ViewMode::Urgent).unwrap().len(), 1);
        assert_eq!(service.list(Role::Hr, ViewMode::Unread).unwrap().len(), 2);
        assert_eq!(service.list(Role::Hr, ViewMode::All).unwrap().len(), 2);
    }

    #[test]
    fn rejected_push_stores_nothing() {
        let service = service();
        let mut blank = event(None, Priority::High);
        blank.message = "   ".to_string();
        let err = service.push(blank).unwrap_err();
        assert_eq!(err, CoreError::Validation(ValidationError::EmptyMessage));
        assert!(service.list(Role::Admin, ViewMode::All).unwrap().is_empty());

        let stored = service.push(event(None, Priority::High)).unwrap();
        assert_eq!(service.list(Role::Admin, ViewMode::All).unwrap(), vec![stored]);
    }
}
