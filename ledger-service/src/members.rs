use crate::error::{LedgerError, LedgerResult};
use crate::models::{Member, NewMember};
use chrono::Local;
use std::sync::Arc;
use storage_layer::{StorageBackend, StorageExt, StorageKey};
use tracing::info;
use uuid::Uuid;

/// Per-group member roster with its own persistence lifecycle.
///
/// Each group's roster lives under its own storage key and is loaded lazily
/// on first access for that group. Switching to another group swaps in that
/// group's collection; the previously loaded roster is already persisted, so
/// nothing is lost by evicting it.
pub struct MemberRegistry {
    backend: Arc<dyn StorageBackend>,
    loaded: Option<(Uuid, Vec<Member>)>,
}

impl MemberRegistry {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            loaded: None,
        }
    }

    /// Add a member to `group_id`'s roster. `join_date` defaults to today.
    pub fn add_member(&mut self, group_id: Uuid, new: NewMember) -> LedgerResult<Member> {
        if new.name.trim().is_empty() {
            return Err(LedgerError::Validation("member name must not be empty".to_string()));
        }

        let member = Member {
            id: Uuid::new_v4(),
            group_id,
            name: new.name.trim().to_string(),
            phone: new.phone,
            email: new.email,
            join_date: new.join_date.unwrap_or_else(|| Local::now().date_naive()),
        };

        let members = self.collection_mut(group_id)?;
        members.push(member.clone());
        self.persist(group_id)?;

        info!(member_id = %member.id, group_id = %group_id, name = %member.name, "added member");
        Ok(member)
    }

    /// Remove the member with `member_id` from `group_id`'s roster.
    pub fn remove_member(&mut self, group_id: Uuid, member_id: Uuid) -> LedgerResult<()> {
        let members = self.collection_mut(group_id)?;
        let before = members.len();
        members.retain(|m| m.id != member_id);
        if members.len() == before {
            return Err(LedgerError::MemberNotFound(member_id));
        }
        self.persist(group_id)?;

        info!(member_id = %member_id, group_id = %group_id, "removed member");
        Ok(())
    }

    /// The roster of `group_id`, in insertion order.
    pub fn members(&mut self, group_id: Uuid) -> LedgerResult<&[Member]> {
        Ok(self.collection_mut(group_id)?.as_slice())
    }

    /// Returns the cached roster for `group_id`, loading it from storage on
    /// first access or after a group switch.
    fn collection_mut(&mut self, group_id: Uuid) -> LedgerResult<&mut Vec<Member>> {
        match &self.loaded {
            Some((loaded_id, _)) if *loaded_id == group_id => {}
            _ => {
                let members: Vec<Member> = self.backend.load(&StorageKey::Members(group_id))?;
                self.loaded = Some((group_id, members));
            }
        }
        let (_, members) = self.loaded.get_or_insert_with(|| (group_id, Vec::new()));
        Ok(members)
    }

    fn persist(&self, group_id: Uuid) -> LedgerResult<()> {
        match &self.loaded {
            Some((loaded_id, members)) if *loaded_id == group_id => {
                self.backend
                    .store(&StorageKey::Members(group_id), members)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
