use crate::error::{LedgerError, LedgerResult};
use crate::models::{Group, LoanRecord, LoanStatus, NewLoan, NewSaving, SavingsRecord};
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use storage_layer::{StorageBackend, StorageExt, StorageKey};
use tracing::info;
use uuid::Uuid;

/// Authoritative owner of groups, the active-group selection, savings
/// records, and loan records.
///
/// Collections load from the backend at construction. Every mutating
/// operation appends or updates in memory and then writes the full affected
/// collection back through the backend before returning. The store is the
/// single writer for its four storage keys.
pub struct LedgerStore {
    backend: Arc<dyn StorageBackend>,
    groups: Vec<Group>,
    active_group: Option<Group>,
    savings: Vec<SavingsRecord>,
    loans: Vec<LoanRecord>,
}

impl LedgerStore {
    /// Open the ledger over `backend`, loading all persisted collections.
    ///
    /// A persisted active-group selection that no longer matches a known
    /// group is discarded, keeping the selection invariant intact.
    pub fn open(backend: Arc<dyn StorageBackend>) -> LedgerResult<Self> {
        let groups: Vec<Group> = backend.load(&StorageKey::Groups)?;
        let mut active_group: Option<Group> = backend.load(&StorageKey::ActiveGroup)?;
        let savings = backend.load(&StorageKey::Savings)?;
        let loans = backend.load(&StorageKey::Loans)?;

        if let Some(active) = &active_group {
            if !groups.iter().any(|g| g.id == active.id) {
                active_group = None;
            }
        }

        Ok(Self {
            backend,
            groups,
            active_group,
            savings,
            loans,
        })
    }

    /// All groups, in creation order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The currently selected group, if any.
    pub fn active_group(&self) -> Option<&Group> {
        self.active_group.as_ref()
    }

    /// Create a new savings group and make no change to the selection.
    pub fn create_group(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> LedgerResult<Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("group name must not be empty".to_string()));
        }

        let group = Group {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description,
            created_at: Utc::now(),
        };
        self.groups.push(group.clone());
        self.backend.store(&StorageKey::Groups, &self.groups)?;

        info!(group_id = %group.id, name = %group.name, "created savings group");
        Ok(group)
    }

    /// Select the group with `group_id` as the active group.
    ///
    /// An unknown id leaves the current selection unchanged and reports
    /// [`LedgerError::GroupNotFound`].
    pub fn select_group(&mut self, group_id: Uuid) -> LedgerResult<Group> {
        let group = self
            .groups
            .iter()
            .find(|g| g.id == group_id)
            .cloned()
            .ok_or(LedgerError::GroupNotFound(group_id))?;

        self.active_group = Some(group.clone());
        self.persist_active_group()?;

        info!(group_id = %group.id, name = %group.name, "selected active group");
        Ok(group)
    }

    /// Clear the active-group selection.
    pub fn clear_active_group(&mut self) -> LedgerResult<()> {
        self.active_group = None;
        self.persist_active_group()
    }

    /// Record a savings deposit against the active group.
    pub fn record_saving(&mut self, new: NewSaving) -> LedgerResult<SavingsRecord> {
        let group_id = self.require_active_group()?;
        validate_member_name(&new.member_name)?;
        validate_amount(new.amount)?;

        let record = SavingsRecord {
            id: Uuid::new_v4(),
            group_id,
            member_name: new.member_name,
            amount: new.amount,
            notes: new.notes,
            created_at: Utc::now(),
        };
        self.savings.push(record.clone());
        self.backend.store(&StorageKey::Savings, &self.savings)?;

        info!(
            record_id = %record.id,
            group_id = %group_id,
            member = %record.member_name,
            amount = %record.amount,
            "recorded savings deposit"
        );
        Ok(record)
    }

    /// Record a loan against the active group. Status starts as `Active`.
    pub fn record_loan(&mut self, new: NewLoan) -> LedgerResult<LoanRecord> {
        let group_id = self.require_active_group()?;
        validate_member_name(&new.member_name)?;
        validate_amount(new.amount)?;
        if let Some(rate) = new.interest_rate {
            if rate < Decimal::ZERO {
                return Err(LedgerError::Validation(
                    "interest rate must not be negative".to_string(),
                ));
            }
        }

        let record = LoanRecord {
            id: Uuid::new_v4(),
            group_id,
            member_name: new.member_name,
            amount: new.amount,
            interest_rate: new.interest_rate,
            due_date: new.due_date,
            notes: new.notes,
            status: LoanStatus::Active,
            created_at: Utc::now(),
        };
        self.loans.push(record.clone());
        self.backend.store(&StorageKey::Loans, &self.loans)?;

        info!(
            record_id = %record.id,
            group_id = %group_id,
            member = %record.member_name,
            amount = %record.amount,
            "recorded loan"
        );
        Ok(record)
    }

    /// Set the status of the loan with `loan_id`.
    ///
    /// An unknown id reports [`LedgerError::LoanNotFound`] without touching
    /// the collection.
    pub fn set_loan_status(&mut self, loan_id: Uuid, status: LoanStatus) -> LedgerResult<()> {
        let loan = self
            .loans
            .iter_mut()
            .find(|l| l.id == loan_id)
            .ok_or(LedgerError::LoanNotFound(loan_id))?;

        loan.status = status;
        self.backend.store(&StorageKey::Loans, &self.loans)?;

        info!(loan_id = %loan_id, status = status.as_str(), "updated loan status");
        Ok(())
    }

    /// Savings records of the active group, in insertion order. Empty when
    /// no group is selected.
    pub fn group_savings(&self) -> Vec<SavingsRecord> {
        match &self.active_group {
            Some(group) => self
                .savings
                .iter()
                .filter(|s| s.group_id == group.id)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Loan records of the active group, in insertion order. Empty when no
    /// group is selected.
    pub fn group_loans(&self) -> Vec<LoanRecord> {
        match &self.active_group {
            Some(group) => self
                .loans
                .iter()
                .filter(|l| l.group_id == group.id)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// The first `limit` savings records of the active group.
    pub fn recent_savings(&self, limit: usize) -> Vec<SavingsRecord> {
        let mut records = self.group_savings();
        records.truncate(limit);
        records
    }

    /// The first `limit` loan records of the active group.
    pub fn recent_loans(&self, limit: usize) -> Vec<LoanRecord> {
        let mut records = self.group_loans();
        records.truncate(limit);
        records
    }

    fn require_active_group(&self) -> LedgerResult<Uuid> {
        self.active_group
            .as_ref()
            .map(|g| g.id)
            .ok_or(LedgerError::NoActiveGroup)
    }

    fn persist_active_group(&self) -> LedgerResult<()> {
        self.backend
            .store(&StorageKey::ActiveGroup, &self.active_group)?;
        Ok(())
    }
}

fn validate_member_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation("member name must not be empty".to_string()));
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> LedgerResult<()> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::Validation("amount must be positive".to_string()));
    }
    Ok(())
}
