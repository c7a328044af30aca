//! Run-wide deduplication of observed users.
//!
//! Sellers and bidders recur across items and across input files.  The
//! Users relation keys on the user id, so each id must reach the output
//! exactly once per run, no matter how often it was seen.

use std::collections::BTreeMap;

use aucload_types::UserRow;

/// Attributes recorded for one user id.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserProfile {
    pub rating: i64,
    pub location: Option<String>,
    pub country: Option<String>,
}

/// What to do when a user id is observed again with a fresh snapshot.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MergePolicy {
    /// The newest snapshot replaces the stored one.
    #[default]
    LastWriteWins,
    /// The first snapshot sticks; later sightings are ignored.
    FirstWriteWins,
}

/// Deduplicating map from user id to that user's representative attributes.
///
/// One registry spans one run: create it before the first file, feed it
/// every committed item's snapshots, and consume it with
/// [`into_rows`](UserRegistry::into_rows) once after the last file.
#[derive(Debug, Default)]
pub struct UserRegistry {
    policy: MergePolicy,
    users: BTreeMap<String, UserProfile>,
}

impl UserRegistry {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            policy,
            users: BTreeMap::new(),
        }
    }

    /// Records `profile` as the attributes of `user_id`, merging with any
    /// earlier sighting according to the policy.
    pub fn upsert(&mut self, user_id: String, profile: UserProfile) {
        match self.policy {
            MergePolicy::LastWriteWins => {
                self.users.insert(user_id, profile);
            }
            MergePolicy::FirstWriteWins => {
                self.users.entry(user_id).or_insert(profile);
            }
        }
    }

    /// Number of distinct user ids seen so far.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Consumes the registry into one Users row per distinct id, in id
    /// order.  Taking `self` by value keeps the flush a one-time event.
    pub fn into_rows(self) -> impl Iterator<Item = UserRow> {
        self.users.into_iter().map(|(user_id, profile)| UserRow {
            user_id,
            rating: profile.rating,
            location: profile.location,
            country: profile.country,
        })
    }
}
