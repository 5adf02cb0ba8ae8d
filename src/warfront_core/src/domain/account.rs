use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{email::Email, faction::Faction, username::Username};

/// Resource name to starting amount. Keys that were never set are absent.
pub type StartingResources = BTreeMap<String, i64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AccountId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered player.
///
/// Two accounts are the same account when their ids match, whatever their
/// other fields say. `created_at` is assigned by the store on `create`.
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    username: Username,
    email: Email,
    credential_hash: Secret<String>,
    faction: Faction,
    starting_resources: StartingResources,
    created_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn new(
        username: Username,
        email: Email,
        credential_hash: Secret<String>,
        faction: Faction,
        starting_resources: StartingResources,
    ) -> Self {
        Self {
            id: AccountId::new(),
            username,
            email,
            credential_hash,
            faction,
            starting_resources,
            created_at: None,
        }
    }

    /// Replace the generated id, used when rehydrating a stored account.
    pub fn with_id(mut self, id: AccountId) -> Self {
        self.id = id;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn credential_hash(&self) -> &Secret<String> {
        &self.credential_hash
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn starting_resources(&self) -> &StartingResources {
        &self.starting_resources
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
