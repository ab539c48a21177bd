//! Role-based record visibility.
//!
//! # Invariants
//! - This is the only place the role-to-department rule lives; every list,
//!   search and bulk mutation goes through [`is_visible`].
//! - Visibility is a pure function of `(role, department)` and is never
//!   cached.

use crate::model::document::Document;
use crate::model::notification::Notification;
use crate::model::role::Role;
use crate::model::task::Task;

/// A record tagged with the department that owns it.
pub trait Scoped {
    /// `None` for records with no department (system-origin events).
    fn department(&self) -> Option<&str>;
}

/// Decides whether `role` may see a record owned by `department`.
///
/// - `admin` sees everything.
/// - `engineer` also sees every department. This mirrors the console's
///   observed behavior and is pending product clarification.
/// - `hr` and `finance` see records whose department, lowercased, equals the
///   role name.
/// - Records without a department are visible to every role.
pub fn is_visible(role: Role, department: Option<&str>) -> bool {
    let Some(department) = department else {
        return true;
    };
    match role {
        Role::Admin | Role::Engineer => true,
        Role::Hr | Role::Finance => department.to_lowercase() == role.as_str(),
    }
}

/// Stable filter: keeps visible records in their original relative order.
pub fn filter_visible<T, I>(role: Role, records: I) -> Vec<T>
where
    T: Scoped,
    I: IntoIterator<Item = T>,
{
    records
        .into_iter()
        .filter(|record| is_visible(role, record.department()))
        .collect()
}

impl Scoped for Document {
    fn department(&self) -> Option<&str> {
        Some(self.department.as_str())
    }
}

impl Scoped for Task {
    /// The task form does not require a department; a blank one is unscoped.
    fn department(&self) -> Option<&str> {
        let department = self.department.trim();
        (!department.is_empty()).then_some(department)
    }
}

impl Scoped for Notification {
    fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_visible, is_visible, Scoped};
    use crate::model::role::Role;
    use crate::model::task::{NewTask, Task};
    use chrono::{NaiveDate, TimeZone, Utc};

    struct Tagged(&'static str, Option<&'static str>);

    impl Scoped for Tagged {
        fn department(&self) -> Option<&str> {
            self.1
        }
    }

    const DEPARTMENTS: [&str; 7] = [
        "Engineering",
        "HR",
        "Finance",
        "Operations",
        "Safety",
        "Procurement",
        "Legal",
    ];

    #[test]
    fn admin_and_engineer_see_every_department() {
        for department in DEPARTMENTS {
            assert!(is_visible(Role::Admin, Some(department)));
            assert!(is_visible(Role::Engineer, Some(department)));
        }
    }

    #[test]
    fn scoped_roles_see_only_their_department() {
        for department in DEPARTMENTS {
            assert_eq!(
                is_visible(Role::Hr, Some(department)),
                department.to_lowercase() == "hr"
            );
            assert_eq!(
                is_visible(Role::Finance, Some(department)),
                department.to_lowercase() == "finance"
            );
        }
        assert!(is_visible(Role::Hr, Some("hR")));
    }

    #[test]
    fn records_without_department_are_visible_to_all() {
        for role in Role::ALL {
            assert!(is_visible(*role, None));
        }
    }

    #[test]
    fn filter_preserves_relative_order() {
        let records = vec![
            Tagged("a", Some("HR")),
            Tagged("b", Some("Engineering")),
            Tagged("c", None),
            Tagged("d", Some("hr")),
        ];
        let names: Vec<_> = filter_visible(Role::Hr, records)
            .into_iter()
            .map(|record| record.0)
            .collect();
        assert_eq!(names, vec!["a", "c", "d"]);
    }

    #[test]
    fn task_without_department_is_unscoped() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        let mut task = Task::create(1, NewTask::new("Review", "A", due), now).unwrap();
        assert_eq!(task.department(), None);
        for role in Role::ALL {
            assert!(is_visible(*role, task.department()));
        }

        task.department = "  ".to_string();
        assert_eq!(task.department(), None);
    }
}
