//! In-memory adapters for every driven port.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. State lives behind `tokio::sync::RwLock`s and is lost on restart.
//! The adapters honour the same contracts as the Diesel ones: duplicate
//! identities are rejected on insert, partition registration is idempotent,
//! and listings keep insertion order.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use pagination::PageRequest;
use tokio::sync::RwLock;

use crate::domain::ports::{
    PartitionRepository, PartitionRepositoryError, RegistrantRepository,
    RegistrantRepositoryError, VoterRepository, VoterRepositoryError,
};
use crate::domain::{
    ApprovalStatus, Constituency, Identity, PartitionName, Registrant, Role, VoterFields, VoterId,
    VoterRecord,
};

/// Registrants keyed by identity.
#[derive(Debug, Default)]
pub struct MemoryRegistrantRepository {
    registrants: RwLock<BTreeMap<Identity, Registrant>>,
}

#[async_trait]
impl RegistrantRepository for MemoryRegistrantRepository {
    async fn insert(&self, registrant: &Registrant) -> Result<(), RegistrantRepositoryError> {
        let mut registrants = self.registrants.write().await;
        if registrants.contains_key(registrant.identity()) {
            return Err(RegistrantRepositoryError::duplicate(
                registrant.identity().as_ref(),
            ));
        }
        registrants.insert(registrant.identity().clone(), registrant.clone());
        Ok(())
    }

    async fn find(
        &self,
        identity: &Identity,
    ) -> Result<Option<Registrant>, RegistrantRepositoryError> {
        Ok(self.registrants.read().await.get(identity).cloned())
    }

    async fn set_status(
        &self,
        identity: &Identity,
        status: ApprovalStatus,
    ) -> Result<Option<Registrant>, RegistrantRepositoryError> {
        let mut registrants = self.registrants.write().await;
        let Some(current) = registrants
            .get_mut(identity)
            .filter(|r| r.role() != Role::Admin)
        else {
            return Ok(None);
        };
        *current = current.clone().with_status(status);
        Ok(Some(current.clone()))
    }

    async fn list_by_constituency_and_status(
        &self,
        constituency: &Constituency,
        status: ApprovalStatus,
    ) -> Result<Vec<Registrant>, RegistrantRepositoryError> {
        Ok(self
            .registrants
            .read()
            .await
            .values()
            .filter(|r| {
                r.role() != Role::Admin && r.status() == status && r.constituency() == constituency
            })
            .cloned()
            .collect())
    }
}

/// Partition registry: name to owning identity.
#[derive(Debug, Default)]
pub struct MemoryPartitionRepository {
    partitions: RwLock<HashMap<PartitionName, Identity>>,
}

#[async_trait]
impl PartitionRepository for MemoryPartitionRepository {
    async fn register(
        &self,
        name: &PartitionName,
        owner: &Identity,
    ) -> Result<(), PartitionRepositoryError> {
        self.partitions
            .write()
            .await
            .entry(name.clone())
            .or_insert_with(|| owner.clone());
        Ok(())
    }

    async fn exists(&self, name: &PartitionName) -> Result<bool, PartitionRepositoryError> {
        Ok(self.partitions.read().await.contains_key(name))
    }
}

/// Voter records grouped by partition in insertion order.
#[derive(Debug, Default)]
pub struct MemoryVoterRepository {
    partitions: RwLock<HashMap<PartitionName, Vec<VoterRecord>>>,
}

#[async_trait]
impl VoterRepository for MemoryVoterRepository {
    async fn insert(
        &self,
        partition: &PartitionName,
        record: &VoterRecord,
    ) -> Result<(), VoterRepositoryError> {
        self.partitions
            .write()
            .await
            .entry(partition.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn list(&self, partition: &PartitionName) -> Result<Vec<VoterRecord>, VoterRepositoryError> {
        Ok(self
            .partitions
            .read()
            .await
            .get(partition)
            .cloned()
            .unwrap_or_default())
    }

    async fn page(
        &self,
        partition: &PartitionName,
        page: PageRequest,
    ) -> Result<Vec<VoterRecord>, VoterRepositoryError> {
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(self
            .partitions
            .read()
            .await
            .get(partition)
            .map(|records| records.iter().skip(skip).take(take).cloned().collect())
            .unwrap_or_default())
    }

    async fn count(&self, partition: &PartitionName) -> Result<u64, VoterRepositoryError> {
        let len = self.partitions.read().await.get(partition).map_or(0, Vec::len);
        u64::try_from(len).map_err(|_| VoterRepositoryError::query("record count overflow"))
    }

    async fn find(
        &self,
        partition: &PartitionName,
        id: VoterId,
    ) -> Result<Option<VoterRecord>, VoterRepositoryError> {
        Ok(self
            .partitions
            .read()
            .await
            .get(partition)
            .and_then(|records| records.iter().find(|r| r.id() == id).cloned()))
    }

    async fn update(
        &self,
        partition: &PartitionName,
        id: VoterId,
        patch: &VoterFields,
    ) -> Result<Option<VoterRecord>, VoterRepositoryError> {
        let mut partitions = self.partitions.write().await;
        let Some(record) = partitions
            .get_mut(partition)
            .and_then(|records| records.iter_mut().find(|r| r.id() == id))
        else {
            return Ok(None);
        };
        record.apply(patch.clone());
        Ok(Some(record.clone()))
    }

    async fn delete(&self, partition: &PartitionName, id: VoterId) -> Result<bool, VoterRepositoryError> {
        let mut partitions = self.partitions.write().await;
        let Some(records) = partitions.get_mut(partition) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Constituency, SecretHash};
    use rstest::{fixture, rstest};

    fn registrant(name: &str, role: Role, constituency: &str) -> Registrant {
        Registrant::signup(
            Identity::new(name).expect("identity"),
            SecretHash::from_phc("x"),
            role,
            Constituency::new(constituency).expect("constituency"),
        )
    }

    #[fixture]
    fn partition() -> PartitionName {
        PartitionName::for_identity(&Identity::new("adminA").expect("identity"))
    }

    fn voter(name: &str) -> VoterRecord {
        VoterRecord::new(
            VoterId::random(),
            VoterFields {
                name: Some(name.to_owned()),
                ..VoterFields::default()
            },
        )
    }

    #[rstest]
    #[tokio::test]
    async fn second_insert_of_an_identity_is_duplicate() {
        let repo = MemoryRegistrantRepository::default();
        repo.insert(&registrant("u1", Role::User, "C1")).await.expect("first");
        let err = repo
            .insert(&registrant("u1", Role::Admin, "C2"))
            .await
            .expect_err("second");
        assert_eq!(err, RegistrantRepositoryError::duplicate("u1"));
    }

    #[rstest]
    #[tokio::test]
    async fn status_changes_skip_admins() {
        let repo = MemoryRegistrantRepository::default();
        repo.insert(&registrant("adminA", Role::Admin, "C1")).await.expect("insert");
        let admin = Identity::new("adminA").expect("identity");
        assert!(
            repo.set_status(&admin, ApprovalStatus::Refused)
                .await
                .expect("update")
                .is_none()
        );
        let stored = repo.find(&admin).await.expect("find").expect("present");
        assert_eq!(stored.status(), ApprovalStatus::Accepted);
    }

    #[rstest]
    #[tokio::test]
    async fn dashboard_filter_excludes_other_constituencies_and_admins() {
        let repo = MemoryRegistrantRepository::default();
        for r in [
            registrant("adminA", Role::Admin, "C1"),
            registrant("u1", Role::User, "C1"),
            registrant("u2", Role::Authority, "C1"),
            registrant("u3", Role::User, "C2"),
        ] {
            repo.insert(&r).await.expect("insert");
        }
        let pending = repo
            .list_by_constituency_and_status(
                &Constituency::new("C1").expect("constituency"),
                ApprovalStatus::Pending,
            )
            .await
            .expect("list");
        let names: Vec<_> = pending.iter().map(|r| r.identity().as_ref()).collect();
        assert_eq!(names, ["u1", "u2"]);
    }

    #[rstest]
    #[tokio::test]
    async fn registering_twice_keeps_records(partition: PartitionName) {
        let partitions = MemoryPartitionRepository::default();
        let voters = MemoryVoterRepository::default();
        let owner = Identity::new("adminA").expect("identity");

        partitions.register(&partition, &owner).await.expect("first");
        voters.insert(&partition, &voter("X")).await.expect("insert");
        partitions.register(&partition, &owner).await.expect("second");

        assert!(partitions.exists(&partition).await.expect("exists"));
        assert_eq!(voters.count(&partition).await.expect("count"), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn pages_follow_insertion_order(partition: PartitionName) {
        let voters = MemoryVoterRepository::default();
        for n in 0..25 {
            voters
                .insert(&partition, &voter(&format!("v{n:02}")))
                .await
                .expect("insert");
        }
        let third = voters
            .page(&partition, PageRequest::new(3, 10).expect("page"))
            .await
            .expect("page");
        let names: Vec<_> = third
            .iter()
            .filter_map(|r| r.fields().name.as_deref())
            .collect();
        assert_eq!(names, ["v20", "v21", "v22", "v23", "v24"]);
    }

    #[rstest]
    #[tokio::test]
    async fn partitions_are_isolated(partition: PartitionName) {
        let other = PartitionName::for_identity(&Identity::new("adminB").expect("identity"));
        let voters = MemoryVoterRepository::default();
        let record = voter("X");
        voters.insert(&partition, &record).await.expect("insert");

        assert!(voters.find(&other, record.id()).await.expect("find").is_none());
        assert!(!voters.delete(&other, record.id()).await.expect("delete"));
        assert!(voters.find(&partition, record.id()).await.expect("find").is_some());
    }
}
