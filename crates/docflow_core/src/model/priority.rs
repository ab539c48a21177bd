//! Priority shared by documents, tasks and notifications.

str_enum!(
    /// Urgency tag attached to every workflow record.
    Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
);

impl Priority {
    /// Whether a record with this priority belongs in the urgent view.
    ///
    /// Both the urgent filter and the urgent counter use this predicate.
    pub fn is_urgent_or_high(self) -> bool {
        matches!(self, Self::High | Self::Urgent)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::Priority;
    use std::str::FromStr;

    #[test]
    fn only_high_and_urgent_count_as_urgent() {
        let urgent: Vec<_> = Priority::ALL
            .iter()
            .copied()
            .filter(|priority| priority.is_urgent_or_high())
            .collect();
        assert_eq!(urgent, vec![Priority::High, Priority::Urgent]);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Priority::from_str(" URGENT ").unwrap(), Priority::Urgent);
        let err = Priority::from_str("critical").unwrap_err();
        assert_eq!(err.field, "Priority");
        assert_eq!(err.value, "critical");
    }
}
