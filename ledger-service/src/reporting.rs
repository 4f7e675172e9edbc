//! Derived reporting over ledger records.
//!
//! Pure functions: callers pass the already group-filtered records (from
//! [`crate::store::LedgerStore::group_savings`] and friends) and get plain
//! numeric values back. Currency and date formatting belong to the
//! presentation layer, not here.

use crate::models::{LoanRecord, LoanStatus, SavingsRecord};
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

/// Leaderboards are truncated to this many entries.
pub const RANKING_LIMIT: usize = 5;

/// Sum of all savings amounts. Zero for an empty slice.
pub fn total_savings(records: &[SavingsRecord]) -> Decimal {
    records.iter().map(|r| r.amount).sum()
}

/// Sum of the amounts of loans still `Active`. Repaid loans are excluded.
pub fn outstanding_loans(loans: &[LoanRecord]) -> Decimal {
    loans
        .iter()
        .filter(|l| l.status == LoanStatus::Active)
        .map(|l| l.amount)
        .sum()
}

/// Funds the group still holds: total savings minus outstanding loans.
pub fn available_funds(total_savings: Decimal, outstanding_loans: Decimal) -> Decimal {
    total_savings - outstanding_loans
}

/// Savings amounts summed per calendar month of their record date.
pub fn monthly_savings(records: &[SavingsRecord]) -> Vec<(String, Decimal)> {
    bucket_by_month(records.iter().map(|r| (r.created_at, r.amount)))
}

/// Loan amounts summed per calendar month of their record date.
pub fn monthly_loans(loans: &[LoanRecord]) -> Vec<(String, Decimal)> {
    bucket_by_month(loans.iter().map(|l| (l.created_at, l.amount)))
}

/// Per-member totals, largest first, truncated to [`RANKING_LIMIT`].
///
/// Ties keep the order in which the names were first encountered. The input
/// is any `(name, amount)` stream, so callers decide what counts toward the
/// ranking (for example, zero contributions for repaid loans).
pub fn rank_by_member<'a, I>(entries: I) -> Vec<(String, Decimal)>
where
    I: IntoIterator<Item = (&'a str, Decimal)>,
{
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (name, amount) in entries {
        match positions.get(name) {
            Some(&pos) => {
                if let Some((_, total)) = totals.get_mut(pos) {
                    *total += amount;
                }
            }
            None => {
                positions.insert(name.to_string(), totals.len());
                totals.push((name.to_string(), amount));
            }
        }
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals.truncate(RANKING_LIMIT);
    totals
}

/// Members ranked by total savings.
pub fn top_savers(records: &[SavingsRecord]) -> Vec<(String, Decimal)> {
    rank_by_member(records.iter().map(|r| (r.member_name.as_str(), r.amount)))
}

/// Members ranked by outstanding loan amounts.
///
/// Every borrower appears in the input; repaid loans contribute zero, so a
/// member whose loans are all repaid ranks with a zero total rather than
/// disappearing from the board.
pub fn top_borrowers(loans: &[LoanRecord]) -> Vec<(String, Decimal)> {
    rank_by_member(loans.iter().map(|l| {
        let amount = match l.status {
            LoanStatus::Active => l.amount,
            LoanStatus::Repaid => Decimal::ZERO,
        };
        (l.member_name.as_str(), amount)
    }))
}

/// Bucket key for one record date: `"YYYY-M"`, month not zero-padded.
///
/// The non-padded month is a display convention carried over from the
/// stored report layout; keep it in sync with anything that parses these
/// keys back.
fn month_key(at: DateTime<Utc>) -> String {
    format!("{}-{}", at.year(), at.month())
}

/// Buckets ordered descending by key string. With non-padded months this is
/// the string order of the keys, not strict chronology within a year.
fn bucket_by_month<I>(entries: I) -> Vec<(String, Decimal)>
where
    I: IntoIterator<Item = (DateTime<Utc>, Decimal)>,
{
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    for (at, amount) in entries {
        *buckets.entry(month_key(at)).or_insert(Decimal::ZERO) += amount;
    }
    buckets.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn saving(member: &str, amount: i64, at: DateTime<Utc>) -> SavingsRecord {
        SavingsRecord {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            member_name: member.to_string(),
            amount: Decimal::from(amount),
            notes: None,
            created_at: at,
        }
    }

    fn loan(member: &str, amount: i64, status: LoanStatus) -> LoanRecord {
        LoanRecord {
            id: Uuid::new_v4(),
            group_id: Uuid::new_v4(),
            member_name: member.to_string(),
            amount: Decimal::from(amount),
            interest_rate: None,
            due_date: None,
            notes: None,
            status,
            created_at: Utc::now(),
        }
    }

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_total_savings_empty_is_zero() {
        assert_eq!(total_savings(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_total_savings_sums_amounts() {
        let records = vec![
            saving("Amina", 100, at(2025, 4, 3)),
            saving("Brian", 50, at(2025, 4, 20)),
        ];
        assert_eq!(total_savings(&records), Decimal::from(150));
    }

    #[test]
    fn test_outstanding_loans_excludes_repaid() {
        let loans = vec![
            loan("Amina", 200, LoanStatus::Active),
            loan("Brian", 300, LoanStatus::Repaid),
            loan("Cynthia", 100, LoanStatus::Active),
        ];
        assert_eq!(outstanding_loans(&loans), Decimal::from(300));
    }

    #[test]
    fn test_available_funds_is_savings_minus_outstanding() {
        assert_eq!(
            available_funds(Decimal::from(500), Decimal::from(120)),
            Decimal::from(380)
        );
    }

    #[test]
    fn test_monthly_savings_sums_within_month() {
        let records = vec![
            saving("Amina", 100, at(2025, 4, 3)),
            saving("Brian", 50, at(2025, 4, 20)),
        ];
        assert_eq!(
            monthly_savings(&records),
            vec![("2025-4".to_string(), Decimal::from(150))]
        );
    }

    #[test]
    fn test_monthly_bucket_keys_are_not_zero_padded() {
        let records = vec![saving("Amina", 10, at(2025, 4, 1))];
        let buckets = monthly_savings(&records);
        assert_eq!(buckets[0].0, "2025-4");
    }

    #[test]
    fn test_monthly_buckets_order_descending_by_key_string() {
        let records = vec![
            saving("Amina", 10, at(2025, 9, 1)),
            saving("Amina", 20, at(2025, 10, 1)),
            saving("Amina", 30, at(2024, 12, 1)),
        ];
        let buckets = monthly_savings(&records);
        let keys: Vec<&str> = buckets
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        // String order, not chronology: "2025-9" sorts above "2025-10".
        assert_eq!(keys, vec!["2025-9", "2025-10", "2024-12"]);
    }

    #[test]
    fn test_rank_by_member_merges_and_sorts() {
        let entries = vec![
            ("A", Decimal::from(100)),
            ("B", Decimal::from(50)),
            ("A", Decimal::from(30)),
        ];
        assert_eq!(
            rank_by_member(entries),
            vec![
                ("A".to_string(), Decimal::from(130)),
                ("B".to_string(), Decimal::from(50)),
            ]
        );
    }

    #[test]
    fn test_rank_by_member_ties_keep_first_encounter_order() {
        let entries = vec![
            ("B", Decimal::from(50)),
            ("A", Decimal::from(50)),
        ];
        let ranked = rank_by_member(entries);
        assert_eq!(ranked[0].0, "B");
        assert_eq!(ranked[1].0, "A");
    }

    #[test]
    fn test_rank_by_member_truncates_to_limit() {
        let entries: Vec<(String, Decimal)> = (0..10)
            .map(|i| (format!("member-{}", i), Decimal::from(100 - i)))
            .collect();
        let ranked = rank_by_member(entries.iter().map(|(n, a)| (n.as_str(), *a)));
        assert_eq!(ranked.len(), RANKING_LIMIT);
        assert_eq!(ranked[0].0, "member-0");
    }

    #[test]
    fn test_top_borrowers_counts_only_active_loans() {
        let loans = vec![
            loan("Amina", 200, LoanStatus::Active),
            loan("Amina", 500, LoanStatus::Repaid),
            loan("Brian", 300, LoanStatus::Active),
        ];
        assert_eq!(
            top_borrowers(&loans),
            vec![
                ("Brian".to_string(), Decimal::from(300)),
                ("Amina".to_string(), Decimal::from(200)),
            ]
        );
    }

    #[test]
    fn test_top_borrowers_keeps_fully_repaid_members_at_zero() {
        let loans = vec![loan("Amina", 500, LoanStatus::Repaid)];
        assert_eq!(
            top_borrowers(&loans),
            vec![("Amina".to_string(), Decimal::ZERO)]
        );
    }

    #[test]
    fn test_top_savers_ranks_by_total() {
        let records = vec![
            saving("Amina", 100, at(2025, 1, 1)),
            saving("Brian", 50, at(2025, 1, 2)),
            saving("Amina", 30, at(2025, 1, 3)),
        ];
        assert_eq!(
            top_savers(&records),
            vec![
                ("Amina".to_string(), Decimal::from(130)),
                ("Brian".to_string(), Decimal::from(50)),
            ]
        );
    }
}
