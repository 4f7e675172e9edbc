use std::fmt;
use uuid::Uuid;

/// Composite key identifying one persisted collection.
///
/// The rendered names are the stable on-disk names of the persisted layout
/// (`savingsGroups`, `activeGroup`, `savings`, `loans`, `members_<groupId>`),
/// so existing data directories remain readable across versions. Member
/// collections are keyed per group rather than by ad hoc string
/// concatenation at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// All savings groups, in creation order.
    Groups,
    /// The currently selected group (denormalized full copy), if any.
    ActiveGroup,
    /// All savings records across groups, in creation order.
    Savings,
    /// All loan records across groups, in creation order.
    Loans,
    /// The member roster of one group.
    Members(Uuid),
}

impl StorageKey {
    /// Stable string name used as the persistence key.
    pub fn name(&self) -> String {
        match self {
            StorageKey::Groups => "savingsGroups".to_string(),
            StorageKey::ActiveGroup => "activeGroup".to_string(),
            StorageKey::Savings => "savings".to_string(),
            StorageKey::Loans => "loans".to_string(),
            StorageKey::Members(group_id) => format!("members_{}", group_id),
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_key_names_are_stable() {
        assert_eq!(StorageKey::Groups.name(), "savingsGroups");
        assert_eq!(StorageKey::ActiveGroup.name(), "activeGroup");
        assert_eq!(StorageKey::Savings.name(), "savings");
        assert_eq!(StorageKey::Loans.name(), "loans");
    }

    #[test]
    fn test_member_keys_are_scoped_per_group() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(StorageKey::Members(a).name(), format!("members_{}", a));
        assert_ne!(StorageKey::Members(a).name(), StorageKey::Members(b).name());
    }
}
