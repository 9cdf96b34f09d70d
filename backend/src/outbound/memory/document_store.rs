//! In-memory [`DocumentStore`] adapter.
//!
//! All documents sit behind one `RwLock`. A batch is applied to a staged copy
//! while the write lock is held and only replaces the live documents once
//! every write has succeeded. Dropping the transaction discards the copy.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::domain::ports::{DocumentStore, DocumentStoreError};
use crate::domain::{DocumentWrite, Place, PlaceId, UserAccount, UserId, WriteBatch};

use super::fixtures::{fixture_place, fixture_user};

const NO_FAULT: usize = usize::MAX;

#[derive(Debug, Clone, Default)]
struct Documents {
    places: HashMap<PlaceId, Place>,
    /// Users in signup order.
    users: Vec<UserAccount>,
}

impl Documents {
    fn user_mut(&mut self, id: &UserId) -> Result<&mut UserAccount, DocumentStoreError> {
        self.users
            .iter_mut()
            .find(|user| user.id == *id)
            .ok_or_else(|| DocumentStoreError::missing_document(format!("user {id}")))
    }

    fn apply(&mut self, write: DocumentWrite) -> Result<(), DocumentStoreError> {
        match write {
            DocumentWrite::InsertPlace(place) => {
                if self.places.contains_key(&place.id) {
                    return Err(DocumentStoreError::duplicate_key(format!(
                        "place {}",
                        place.id
                    )));
                }
                self.places.insert(place.id, place);
            }
            DocumentWrite::RemovePlace(id) => {
                if self.places.remove(&id).is_none() {
                    return Err(DocumentStoreError::missing_document(format!("place {id}")));
                }
            }
            DocumentWrite::AttachPlace { owner, place } => {
                self.user_mut(&owner)?.attach_place(place);
            }
            DocumentWrite::DetachPlace { owner, place } => {
                self.user_mut(&owner)?.detach_place(&place);
            }
        }
        Ok(())
    }
}

/// Staged writes over a held write lock. Nothing is visible until
/// [`Transaction::commit`].
struct Transaction<'a> {
    live: RwLockWriteGuard<'a, Documents>,
    staged: Documents,
}

impl<'a> Transaction<'a> {
    fn begin(live: RwLockWriteGuard<'a, Documents>) -> Self {
        let staged = live.clone();
        Self { live, staged }
    }

    fn apply(&mut self, write: DocumentWrite) -> Result<(), DocumentStoreError> {
        self.staged.apply(write)
    }

    fn commit(mut self) {
        *self.live = self.staged;
    }
}

/// Document store held entirely in process memory.
///
/// # Examples
/// ```
/// use places_backend::outbound::memory::MemoryDocumentStore;
///
/// let store = MemoryDocumentStore::with_fixtures();
/// # let _ = store;
/// ```
#[derive(Debug)]
pub struct MemoryDocumentStore {
    documents: RwLock<Documents>,
    fail_after: AtomicUsize,
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::from_documents(Documents::default())
    }
}

impl MemoryDocumentStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the fixture user and place.
    pub fn with_fixtures() -> Self {
        let place = fixture_place();
        let mut places = HashMap::new();
        places.insert(place.id, place);
        Self::from_documents(Documents {
            places,
            users: vec![fixture_user()],
        })
    }

    fn from_documents(documents: Documents) -> Self {
        Self {
            documents: RwLock::new(documents),
            fail_after: AtomicUsize::new(NO_FAULT),
        }
    }

    /// Make the next batch abort after `writes` of its writes were staged.
    #[cfg(any(test, feature = "test-support"))]
    pub fn fail_next_commit_after(&self, writes: usize) {
        self.fail_after.store(writes, Ordering::SeqCst);
    }

    fn take_fault(&self) -> Option<usize> {
        match self.fail_after.swap(NO_FAULT, Ordering::SeqCst) {
            NO_FAULT => None,
            writes => Some(writes),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_place(&self, id: &PlaceId) -> Result<Option<Place>, DocumentStoreError> {
        Ok(self.documents.read().await.places.get(id).cloned())
    }

    async fn find_places(&self, ids: &[PlaceId]) -> Result<Vec<Place>, DocumentStoreError> {
        let documents = self.documents.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| documents.places.get(id).cloned())
            .collect())
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<UserAccount>, DocumentStoreError> {
        let documents = self.documents.read().await;
        Ok(documents.users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, DocumentStoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .users
            .iter()
            .find(|user| user.email.as_ref() == email)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>, DocumentStoreError> {
        Ok(self.documents.read().await.users.clone())
    }

    async fn save_place(&self, place: &Place) -> Result<(), DocumentStoreError> {
        let mut documents = self.documents.write().await;
        match documents.places.get_mut(&place.id) {
            Some(existing) => {
                *existing = place.clone();
                Ok(())
            }
            None => Err(DocumentStoreError::missing_document(format!(
                "place {}",
                place.id
            ))),
        }
    }

    async fn insert_user(&self, user: &UserAccount) -> Result<(), DocumentStoreError> {
        let mut documents = self.documents.write().await;
        if documents.users.iter().any(|existing| existing.email == user.email) {
            return Err(DocumentStoreError::duplicate_key(format!(
                "email {}",
                user.email
            )));
        }
        if documents.users.iter().any(|existing| existing.id == user.id) {
            return Err(DocumentStoreError::duplicate_key(format!("user {}", user.id)));
        }
        documents.users.push(user.clone());
        Ok(())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), DocumentStoreError> {
        let fault = self.take_fault();
        let mut tx = Transaction::begin(self.documents.write().await);
        for (staged, write) in batch.into_iter().enumerate() {
            if fault == Some(staged) {
                return Err(DocumentStoreError::aborted(format!(
                    "injected fault after {staged} writes"
                )));
            }
            tx.apply(write)?;
        }
        tx.commit();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for staging, ordering and uniqueness.
    use super::*;
    use crate::domain::{ImageRef, SignupDetails};
    use crate::outbound::memory::{FIXTURE_PLACE_ID, FIXTURE_USER_ID};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> MemoryDocumentStore {
        MemoryDocumentStore::with_fixtures()
    }

    fn owner() -> UserId {
        UserId::from_uuid(FIXTURE_USER_ID)
    }

    fn new_place() -> Place {
        Place {
            id: PlaceId::random(),
            image: ImageRef::new("uploads/images/new.png"),
            ..fixture_place()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_store_links_user_and_place(store: MemoryDocumentStore) {
        let user = store.find_user(&owner()).await.expect("read").expect("user");
        assert_eq!(user.places, vec![PlaceId::from_uuid(FIXTURE_PLACE_ID)]);
        let place = store
            .find_place(&PlaceId::from_uuid(FIXTURE_PLACE_ID))
            .await
            .expect("read")
            .expect("place");
        assert_eq!(place.creator, owner());
    }

    #[rstest]
    #[tokio::test]
    async fn commit_applies_creation_batch(store: MemoryDocumentStore) {
        let place = new_place();
        store
            .commit(WriteBatch::place_creation(place.clone()))
            .await
            .expect("commit");

        let user = store.find_user(&owner()).await.expect("read").expect("user");
        assert_eq!(user.places.last(), Some(&place.id));
        assert_eq!(
            store.find_place(&place.id).await.expect("read"),
            Some(place)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn failed_write_rolls_back_whole_batch(store: MemoryDocumentStore) {
        let place = new_place();
        let batch = WriteBatch::new()
            .push(DocumentWrite::InsertPlace(place.clone()))
            .push(DocumentWrite::AttachPlace {
                owner: UserId::random(),
                place: place.id,
            });

        let err = store.commit(batch).await.expect_err("missing owner");
        assert!(matches!(err, DocumentStoreError::MissingDocument { .. }));
        assert!(store.find_place(&place.id).await.expect("read").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn injected_fault_leaves_documents_untouched(store: MemoryDocumentStore) {
        let target = PlaceId::from_uuid(FIXTURE_PLACE_ID);
        store.fail_next_commit_after(1);

        let err = store
            .commit(WriteBatch::place_removal(target, owner()))
            .await
            .expect_err("injected fault");
        assert!(matches!(err, DocumentStoreError::Aborted { .. }));
        assert!(store.find_place(&target).await.expect("read").is_some());
        let user = store.find_user(&owner()).await.expect("read").expect("user");
        assert_eq!(user.places, vec![target]);

        store
            .commit(WriteBatch::place_removal(target, owner()))
            .await
            .expect("fault is one-shot");
        assert!(store.find_place(&target).await.expect("read").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn find_places_preserves_requested_order(store: MemoryDocumentStore) {
        let place = new_place();
        store
            .commit(WriteBatch::place_creation(place.clone()))
            .await
            .expect("commit");
        let seeded = PlaceId::from_uuid(FIXTURE_PLACE_ID);

        let found = store
            .find_places(&[place.id, PlaceId::random(), seeded])
            .await
            .expect("read");
        let ids: Vec<_> = found.iter().map(|place| place.id).collect();
        assert_eq!(ids, vec![place.id, seeded]);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_user_rejects_taken_email(store: MemoryDocumentStore) {
        let duplicate = SignupDetails::try_from_parts("Other", "test@test.com", "secret", None)
            .expect("valid")
            .into_account(UserId::random());
        let err = store.insert_user(&duplicate).await.expect_err("duplicate");
        assert!(matches!(err, DocumentStoreError::DuplicateKey { .. }));

        let other_case = SignupDetails::try_from_parts("Other", "Test@test.com", "secret", None)
            .expect("valid")
            .into_account(UserId::random());
        store.insert_user(&other_case).await.expect("case-sensitive emails");
        assert_eq!(store.list_users().await.expect("read").len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn save_place_requires_existing_document(store: MemoryDocumentStore) {
        let err = store.save_place(&new_place()).await.expect_err("missing");
        assert!(matches!(err, DocumentStoreError::MissingDocument { .. }));
    }
}
