//! Live link state.

use std::fmt;

use serde::Serialize;

use crate::store::LinkRecord;

use super::engine::{points_to, LinkEngine};

/// The logical state of a managed path. Always derived from the filesystem,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    /// No record exists.
    Unmanaged,
    /// The artifact is valid and resolves to the synced path.
    Linked,
    /// A record exists but its artifact is missing, dangling or redirects
    /// elsewhere.
    Broken,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmanaged => write!(f, "unmanaged"),
            Self::Linked => write!(f, "linked"),
            Self::Broken => write!(f, "broken"),
        }
    }
}

/// A record paired with its live state.
#[derive(Debug, Clone)]
pub struct LinkStatus {
    /// The queried name.
    pub name: String,
    /// The record, if the name is managed.
    pub record: Option<LinkRecord>,
    /// The live state.
    pub state: LinkState,
}

impl LinkEngine<'_> {
    /// The live state of the link named `name`.
    #[must_use]
    pub fn status(&self, name: &str) -> LinkStatus {
        let record = self.store.get(name);
        let state = record
            .as_ref()
            .map_or(LinkState::Unmanaged, |record| self.probe(record));
        LinkStatus {
            name: name.to_string(),
            record,
            state,
        }
    }

    /// Every link with its live state, sorted by name.
    #[must_use]
    pub fn list(&self) -> Vec<LinkStatus> {
        self.store
            .get_all()
            .into_iter()
            .map(|record| {
                let state = self.probe(&record);
                LinkStatus {
                    name: record.name().to_string(),
                    record: Some(record),
                    state,
                }
            })
            .collect()
    }

    /// [`LinkState::Linked`] when the record's artifact is valid and resolves
    /// to its synced path, [`LinkState::Broken`] otherwise.
    pub(crate) fn probe(&self, record: &LinkRecord) -> LinkState {
        let Ok(artifact) = self.artifacts.get(record.artifact_kind()) else {
            return LinkState::Broken;
        };
        let location = artifact.location(record.original_path());
        if !artifact.is_valid(&location) {
            return LinkState::Broken;
        }
        match artifact.resolve(&location) {
            Ok(target) if points_to(&location, &target, record.synced_path()) => LinkState::Linked,
            _ => LinkState::Broken,
        }
    }
}
