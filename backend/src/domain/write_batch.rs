//! Multi-document writes committed as one unit.
//!
//! A [`WriteBatch`] lists the writes a service wants applied together. The
//! store commits all of them or none; a batch never leaves a place without
//! its owner's back-reference, or the reverse.

use super::{Place, PlaceId, UserId};

/// A single write inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentWrite {
    /// Insert a new place document.
    InsertPlace(Place),
    /// Remove an existing place document. Fails the batch if it is absent.
    RemovePlace(PlaceId),
    /// Append `place` to the owner's list. Fails the batch if the owner is
    /// absent.
    AttachPlace { owner: UserId, place: PlaceId },
    /// Pull `place` out of the owner's list. Fails the batch if the owner is
    /// absent.
    DetachPlace { owner: UserId, place: PlaceId },
}

/// Ordered set of writes applied atomically by a document store.
///
/// # Examples
/// ```
/// use places_backend::domain::{PlaceId, UserId, WriteBatch};
///
/// let batch = WriteBatch::place_removal(PlaceId::random(), UserId::random());
/// assert_eq!(batch.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WriteBatch {
    writes: Vec<DocumentWrite>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue another write.
    pub fn push(mut self, write: DocumentWrite) -> Self {
        self.writes.push(write);
        self
    }

    /// Insert `place` and attach it to its creator.
    pub fn place_creation(place: Place) -> Self {
        let owner = place.creator;
        let id = place.id;
        Self::new()
            .push(DocumentWrite::InsertPlace(place))
            .push(DocumentWrite::AttachPlace { owner, place: id })
    }

    /// Remove `place` and detach it from `owner`.
    pub fn place_removal(place: PlaceId, owner: UserId) -> Self {
        Self::new()
            .push(DocumentWrite::RemovePlace(place))
            .push(DocumentWrite::DetachPlace { owner, place })
    }

    pub fn writes(&self) -> &[DocumentWrite] {
        &self.writes
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

impl IntoIterator for WriteBatch {
    type Item = DocumentWrite;
    type IntoIter = std::vec::IntoIter<DocumentWrite>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}
