//! Dashboard aggregates: monthly donation totals, member growth and the
//! headline stats cards.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::models::donation::Donation;
use crate::models::member::Member;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u32,
    pub label: &'static str,
    /// Minor currency units.
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrowthPoint {
    pub year: i32,
    pub month: u32,
    pub label: &'static str,
    /// Members who joined during this month.
    pub joined: usize,
    /// Members who had joined by the end of this month.
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DonationSummary {
    pub total: i64,
    pub count: usize,
    pub this_month: i64,
    /// Integer mean in minor units; 0 when there are no donations.
    pub average: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub total: usize,
    pub active: usize,
}

/// First day of each of the `months` calendar months ending with the month
/// of `today`, oldest first.
fn month_starts(today: NaiveDate, months: u32) -> Vec<NaiveDate> {
    let current = today.with_day(1).unwrap_or(today);
    (0..months)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .collect()
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn label(start: NaiveDate) -> &'static str {
    MONTH_LABELS[start.month0() as usize]
}

pub fn monthly_donation_totals(
    donations: &[Donation],
    today: NaiveDate,
    months: u32,
) -> Vec<MonthlyTotal> {
    month_starts(today, months)
        .into_iter()
        .map(|start| MonthlyTotal {
            year: start.year(),
            month: start.month(),
            label: label(start),
            total: donations
                .iter()
                .filter(|d| same_month(d.date, start))
                .map(|d| d.amount)
                .sum(),
        })
        .collect()
}

pub fn member_growth(members: &[Member], today: NaiveDate, months: u32) -> Vec<GrowthPoint> {
    month_starts(today, months)
        .into_iter()
        .map(|start| {
            let next = start.checked_add_months(Months::new(1));
            GrowthPoint {
                year: start.year(),
                month: start.month(),
                label: label(start),
                joined: members
                    .iter()
                    .filter(|m| same_month(m.joined_on, start))
                    .count(),
                total: members
                    .iter()
                    .filter(|m| next.is_none_or(|n| m.joined_on < n))
                    .count(),
            }
        })
        .collect()
}

pub fn donation_summary(donations: &[Donation], today: NaiveDate) -> DonationSummary {
    let total: i64 = donations.iter().map(|d| d.amount).sum();
    let count = donations.len();
    let this_month = donations
        .iter()
        .filter(|d| same_month(d.date, today))
        .map(|d| d.amount)
        .sum();
    let average = if count == 0 { 0 } else { total / count as i64 };
    DonationSummary {
        total,
        count,
        this_month,
        average,
    }
}

pub fn member_summary(members: &[Member]) -> MemberSummary {
    MemberSummary {
        total: members.len(),
        active: members.iter().filter(|m| m.active).count(),
    }
}
