//! Recurring-event expansion.
//!
//! [`RecurrenceExpander::expand`] turns one [`EventTemplate`] into the
//! ordered list of concrete [`EventInstance`]s it describes. Expansion is
//! pure: nothing is persisted here, and invalid input is rejected before
//! the first instance is produced.
//!
//! Monthly recurrences are anchored on the start date. Step `n` lands on
//! `start + n months`; when the anchor day does not exist in the target
//! month the date is clamped to that month's last day, so a series started
//! on Jan 31 runs Jan 31, Feb 29 (or 28), Mar 31, Apr 30.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::{StewardError, StewardResult};
use crate::models::event::{EventInstance, EventTemplate, RecurringPattern};

/// Bounds applied to a single expansion.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionLimits {
    /// Maximum number of instances one template may expand to
    /// (default: 1000).
    pub max_instances: usize,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            max_instances: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecurrenceExpander {
    limits: ExpansionLimits,
}

impl RecurrenceExpander {
    pub fn new(limits: ExpansionLimits) -> Self {
        Self { limits }
    }

    /// Check the recurrence controls of `template`. Non-recurring templates
    /// always pass; their recurrence fields are ignored.
    pub fn validate(&self, template: &EventTemplate) -> StewardResult<()> {
        if !template.is_recurring {
            return Ok(());
        }
        if template.recurring_end_date.is_none() {
            return Err(StewardError::validation(
                "recurringEndDate",
                "a recurring event needs an end date",
            ));
        }
        weekday_set(&template.recurring_days).map(|_| ())
    }

    /// Expand `template` into its dated instances, in non-decreasing date
    /// order. An end date before the start date yields no instances.
    pub fn expand(&self, template: &EventTemplate) -> StewardResult<Vec<EventInstance>> {
        if !template.is_recurring {
            return Ok(vec![template.instance_on(template.start_date)]);
        }
        self.validate(template)?;

        let Some(end) = template.recurring_end_date else {
            return Ok(Vec::new());
        };
        let days = weekday_set(&template.recurring_days)?;
        let pattern = template.recurring_pattern;

        let mut instances = Vec::new();
        let mut cursor = template.start_date;
        let mut step: u32 = 0;

        while cursor <= end {
            let emit = match pattern {
                RecurringPattern::Weekly if !days.is_empty() => {
                    days.contains(&cursor.weekday().num_days_from_sunday())
                }
                _ => true,
            };
            if emit {
                if instances.len() == self.limits.max_instances {
                    return Err(StewardError::validation(
                        "recurringEndDate",
                        format!(
                            "recurrence would create more than {} events",
                            self.limits.max_instances
                        ),
                    ));
                }
                instances.push(template.instance_on(cursor));
            }

            step += 1;
            let next = match pattern {
                RecurringPattern::Daily => cursor.succ_opt(),
                RecurringPattern::Weekly if days.is_empty() => cursor.checked_add_days(Days::new(7)),
                RecurringPattern::Weekly => cursor.succ_opt(),
                RecurringPattern::Monthly => monthly_step(template.start_date, step),
            };
            match next {
                Some(date) => cursor = date,
                None => break,
            }
        }

        Ok(instances)
    }
}

/// Expand with default limits.
pub fn expand(template: &EventTemplate) -> StewardResult<Vec<EventInstance>> {
    RecurrenceExpander::default().expand(template)
}

fn monthly_step(anchor: NaiveDate, step: u32) -> Option<NaiveDate> {
    anchor.checked_add_months(Months::new(step))
}

/// Validate weekday indices (0 = Sunday .. 6 = Saturday). Duplicates and
/// out-of-range values are rejected rather than silently dropped.
fn weekday_set(days: &[i64]) -> StewardResult<BTreeSet<u32>> {
    let mut set = BTreeSet::new();
    for &day in days {
        let index = u32::try_from(day)
            .ok()
            .filter(|d| *d <= 6)
            .ok_or_else(|| {
                StewardError::validation(
                    "recurringDays",
                    format!("weekday index {day} is outside 0 (Sunday) ..= 6 (Saturday)"),
                )
            })?;
        if !set.insert(index) {
            return Err(StewardError::validation(
                "recurringDays",
                format!("weekday index {day} is listed more than once"),
            ));
        }
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn template(pattern: RecurringPattern, start: NaiveDate, end: NaiveDate) -> EventTemplate {
        EventTemplate {
            title: "Bible Study".into(),
            description: "Weeknight study group".into(),
            start_date: start,
            time: "19:00".into(),
            location: "Fellowship Hall".into(),
            event_type: EventType::Special,
            zoom_link: Some("https://zoom.example/j/1".into()),
            is_recurring: true,
            recurring_pattern: pattern,
            recurring_end_date: Some(end),
            recurring_days: Vec::new(),
        }
    }

    fn dates(instances: &[EventInstance]) -> Vec<NaiveDate> {
        instances.iter().map(|i| i.date).collect()
    }

    #[test]
    fn non_recurring_is_identity() {
        let mut t = template(RecurringPattern::Daily, date(2024, 3, 1), date(2024, 3, 9));
        t.is_recurring = false;
        let out = expand(&t).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0], t.instance_on(date(2024, 3, 1)));
        assert_eq!(out[0].title, t.title);
        assert_eq!(out[0].zoom_link, t.zoom_link);
    }

    #[test]
    fn non_recurring_ignores_bad_recurrence_fields() {
        let mut t = template(RecurringPattern::Weekly, date(2024, 3, 1), date(2024, 3, 9));
        t.is_recurring = false;
        t.recurring_days = vec![9, 9];
        t.recurring_end_date = None;
        assert_eq!(expand(&t).unwrap().len(), 1);
    }

    #[test]
    fn daily_includes_both_ends() {
        let t = template(RecurringPattern::Daily, date(2024, 1, 1), date(2024, 1, 3));
        let out = expand(&t).unwrap();
        assert_eq!(
            dates(&out),
            [date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)]
        );
        assert!(out.iter().all(|i| i.time == "19:00"));
    }

    #[test]
    fn weekly_on_selected_days() {
        let mut t = template(RecurringPattern::Weekly, date(2024, 1, 1), date(2024, 1, 14));
        t.recurring_days = vec![1, 3];
        let out = expand(&t).unwrap();
        assert_eq!(
            dates(&out),
            [
                date(2024, 1, 1),
                date(2024, 1, 3),
                date(2024, 1, 8),
                date(2024, 1, 10)
            ]
        );
    }

    #[test]
    fn weekly_without_days_repeats_start_weekday() {
        let t = template(RecurringPattern::Weekly, date(2024, 1, 7), date(2024, 1, 28));
        let out = expand(&t).unwrap();
        assert_eq!(
            dates(&out),
            [
                date(2024, 1, 7),
                date(2024, 1, 14),
                date(2024, 1, 21),
                date(2024, 1, 28)
            ]
        );
    }

    #[test]
    fn end_before_start_yields_nothing() {
        let t = template(RecurringPattern::Daily, date(2024, 5, 10), date(2024, 5, 9));
        assert!(expand(&t).unwrap().is_empty());
    }

    #[test]
    fn monthly_clamps_to_month_end_and_keeps_anchor() {
        let t = template(RecurringPattern::Monthly, date(2024, 1, 31), date(2024, 4, 30));
        let out = expand(&t).unwrap();
        assert_eq!(
            dates(&out),
            [
                date(2024, 1, 31),
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30)
            ]
        );
    }

    #[test]
    fn monthly_clamps_in_non_leap_year() {
        let t = template(RecurringPattern::Monthly, date(2023, 1, 30), date(2023, 3, 31));
        let out = expand(&t).unwrap();
        assert_eq!(
            dates(&out),
            [date(2023, 1, 30), date(2023, 2, 28), date(2023, 3, 30)]
        );
    }

    #[test]
    fn instances_are_ordered() {
        for pattern in [
            RecurringPattern::Daily,
            RecurringPattern::Weekly,
            RecurringPattern::Monthly,
        ] {
            let mut t = template(pattern, date(2024, 1, 15), date(2024, 9, 1));
            if pattern == RecurringPattern::Weekly {
                t.recurring_days = vec![6, 0, 3];
            }
            let out = expand(&t).unwrap();
            assert!(!out.is_empty());
            assert!(out.windows(2).all(|w| w[0].date <= w[1].date));
        }
    }

    #[test]
    fn out_of_range_weekday_is_rejected() {
        for bad in [vec![7], vec![-1], vec![1, 2, 12]] {
            let mut t = template(RecurringPattern::Weekly, date(2024, 1, 1), date(2024, 1, 14));
            t.recurring_days = bad;
            match expand(&t).unwrap_err() {
                StewardError::Validation { field, .. } => assert_eq!(field, "recurringDays"),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn duplicate_weekday_is_rejected() {
        let mut t = template(RecurringPattern::Weekly, date(2024, 1, 1), date(2024, 1, 14));
        t.recurring_days = vec![1, 3, 1];
        assert!(matches!(
            expand(&t),
            Err(StewardError::Validation { field, .. }) if field == "recurringDays"
        ));
    }

    #[test]
    fn recurring_without_end_date_is_rejected() {
        let mut t = template(RecurringPattern::Daily, date(2024, 1, 1), date(2024, 1, 2));
        t.recurring_end_date = None;
        assert!(matches!(
            expand(&t),
            Err(StewardError::Validation { field, .. }) if field == "recurringEndDate"
        ));
    }

    #[test]
    fn limit_is_enforced() {
        let expander = RecurrenceExpander::new(ExpansionLimits { max_instances: 5 });
        let t = template(RecurringPattern::Daily, date(2024, 1, 1), date(2024, 1, 5));
        assert_eq!(expander.expand(&t).unwrap().len(), 5);

        let t = template(RecurringPattern::Daily, date(2024, 1, 1), date(2024, 1, 6));
        assert!(expander.expand(&t).is_err());
    }
}
