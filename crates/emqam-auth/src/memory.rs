//! In-memory store backing every store trait.
//!
//! Used by the server binary when no external backend is wired in, and by
//! the tests. Passwords are kept as bcrypt hashes; access tokens are random
//! v4 UUIDs.

use emqam_models::{AclRequest, Credentials, RoleFlags, TopicDirection, UserId, UserRecord};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use crate::identity::SessionToken;
use crate::stores::{
    AclStore, CredentialVerifier, RoleEvaluator, SessionIssuer, SessionValidator, StoreError,
};

struct StoredUser {
    record: UserRecord,
    password_hash: String,
}

pub struct MemoryStore {
    users: RwLock<HashMap<UserId, StoredUser>>,
    sessions: RwLock<HashSet<SessionToken>>,
    grants: RwLock<Vec<AclRequest>>,
    hash_cost: u32,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_hash_cost(bcrypt::DEFAULT_COST)
    }

    /// Store hashing passwords at `cost` (tests use the bcrypt minimum).
    pub fn with_hash_cost(hash_cost: u32) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashSet::new()),
            grants: RwLock::new(Vec::new()),
            hash_cost,
        }
    }

    /// Register a user. Usernames are unique.
    pub fn add_user(
        &self,
        username: &str,
        password: &str,
        roles: RoleFlags,
    ) -> Result<UserRecord, StoreError> {
        let password_hash = bcrypt::hash(password, self.hash_cost)
            .map_err(|e| StoreError::Unavailable(format!("password hashing failed: {e}")))?;

        let mut users = self.users.write();
        if users.values().any(|u| u.record.username == username) {
            return Err(StoreError::Conflict(format!("username {username} is taken")));
        }

        let record = UserRecord {
            id: UserId::generate(),
            username: username.to_string(),
            roles,
        };
        users.insert(
            record.id,
            StoredUser {
                record: record.clone(),
                password_hash,
            },
        );
        info!(user_id = %record.id, username, "user registered");
        Ok(record)
    }
}

impl SessionValidator for MemoryStore {
    fn find_session(&self, token: &SessionToken) -> Result<bool, StoreError> {
        Ok(self.sessions.read().contains(token))
    }
}

impl SessionIssuer for MemoryStore {
    fn open_session(&self, user_id: &UserId) -> Result<String, StoreError> {
        let access_token = uuid::Uuid::new_v4().simple().to_string();
        self.sessions.write().insert(SessionToken {
            user_id: *user_id,
            access_token: access_token.clone(),
        });
        debug!(user_id = %user_id, "session opened");
        Ok(access_token)
    }

    fn close_session(&self, token: &SessionToken) -> Result<bool, StoreError> {
        let existed = self.sessions.write().remove(token);
        debug!(user_id = %token.user_id, existed, "session closed");
        Ok(existed)
    }
}

impl RoleEvaluator for MemoryStore {
    fn find_user(&self, user_id: &UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().get(user_id).map(|u| u.record.clone()))
    }
}

impl CredentialVerifier for MemoryStore {
    fn verify(&self, credentials: &Credentials) -> Result<Option<UserRecord>, StoreError> {
        let candidate = self
            .users
            .read()
            .values()
            .find(|u| u.record.username == credentials.username)
            .map(|u| (u.record.clone(), u.password_hash.clone()));

        let Some((record, hash)) = candidate else {
            return Ok(None);
        };

        let matches = bcrypt::verify(&credentials.password, &hash)
            .map_err(|e| StoreError::Unavailable(format!("password verification failed: {e}")))?;
        Ok(matches.then_some(record))
    }
}

impl AclStore for MemoryStore {
    fn grant(&self, request: &AclRequest) -> Result<(), StoreError> {
        let mut grants = self.grants.write();
        grants.retain(|g| !(g.user_id == request.user_id && g.topic == request.topic));
        grants.push(request.clone());
        Ok(())
    }

    fn is_permitted(
        &self,
        user: &str,
        topic: &str,
        direction: TopicDirection,
    ) -> Result<bool, StoreError> {
        Ok(self
            .grants
            .read()
            .iter()
            .any(|g| g.user_id == user && g.permits(topic, direction)))
    }

    fn grants_for(&self, user: &str) -> Result<Vec<AclRequest>, StoreError> {
        Ok(self
            .grants
            .read()
            .iter()
            .filter(|g| g.user_id == user)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::with_hash_cost(4)
    }

    #[test]
    fn test_add_user_and_find() {
        let store = store();
        let user = store.add_user("alice", "pw", RoleFlags::MEMBER).unwrap();

        assert_eq!(store.find_user(&user.id).unwrap(), Some(user.clone()));
        assert_eq!(store.find_user(&UserId::generate()).unwrap(), None);
    }

    #[test]
    fn test_duplicate_username_conflicts() {
        let store = store();
        store.add_user("alice", "pw", RoleFlags::MEMBER).unwrap();
        assert!(matches!(
            store.add_user("alice", "other", RoleFlags::ADMIN),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn test_verify_credentials() {
        let store = store();
        let user = store.add_user("alice", "s3cret", RoleFlags::MEMBER).unwrap();

        assert_eq!(
            store.verify(&Credentials::new("alice", "s3cret")).unwrap(),
            Some(user)
        );
        assert_eq!(store.verify(&Credentials::new("alice", "wrong")).unwrap(), None);
        assert_eq!(store.verify(&Credentials::new("bob", "s3cret")).unwrap(), None);
    }

    #[test]
    fn test_sessions_open_and_close() {
        let store = store();
        let user = store.add_user("alice", "pw", RoleFlags::MEMBER).unwrap();
        let access_token = store.open_session(&user.id).unwrap();
        let token = SessionToken {
            user_id: user.id,
            access_token,
        };

        assert!(store.find_session(&token).unwrap());
        assert!(!store
            .find_session(&SessionToken {
                user_id: user.id,
                access_token: "forged".to_string(),
            })
            .unwrap());

        assert!(store.close_session(&token).unwrap());
        assert!(!store.find_session(&token).unwrap());
        assert!(!store.close_session(&token).unwrap());
    }

    #[test]
    fn test_grants() {
        let store = store();
        store
            .grant(&AclRequest::new("alice", "sensors/#", TopicDirection::Publish))
            .unwrap();
        store
            .grant(&AclRequest::new("bob", "sensors/temp", TopicDirection::Subscribe))
            .unwrap();

        assert!(store
            .is_permitted("alice", "sensors/temp", TopicDirection::Publish)
            .unwrap());
        assert!(!store
            .is_permitted("alice", "sensors/temp", TopicDirection::Subscribe)
            .unwrap());
        assert!(!store
            .is_permitted("bob", "sensors/temp", TopicDirection::Publish)
            .unwrap());
        assert_eq!(store.grants_for("alice").unwrap().len(), 1);
    }

    #[test]
    fn test_regrant_replaces_direction() {
        let store = store();
        store
            .grant(&AclRequest::new("alice", "a/b", TopicDirection::Publish))
            .unwrap();
        store
            .grant(&AclRequest::new("alice", "a/b", TopicDirection::PubSub))
            .unwrap();

        assert_eq!(
            store.grants_for("alice").unwrap(),
            vec![AclRequest::new("alice", "a/b", TopicDirection::PubSub)]
        );
    }
}
