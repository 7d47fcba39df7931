//! In-memory collaborator implementations for service-level tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use membergate_auth::jwt::{Claims, JwtEncoder};
use membergate_auth::password::hasher::PasswordHasher;
use membergate_auth::password::legacy::legacy_digest;
use membergate_auth::SessionService;
use membergate_core::config::auth::AuthConfig;
use membergate_core::result::AppResult;
use membergate_core::traits::{CredentialStore, MemberDirectory, TokenIssuer};
use membergate_entity::member::Member;
use membergate_entity::security::{HashAlgorithm, PasswordChangeSet, SecurityRecord};

/// Member directory backed by a mutex-guarded map.
#[derive(Default)]
pub struct InMemoryMemberDirectory {
    members: Mutex<HashMap<i64, Member>>,
}

impl InMemoryMemberDirectory {
    pub fn insert(&self, member: Member) {
        self.members.lock().unwrap().insert(member.id, member);
    }

    pub fn remove(&self, id: i64) {
        self.members.lock().unwrap().remove(&id);
    }
}

#[async_trait]
impl MemberDirectory for InMemoryMemberDirectory {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Member>> {
        Ok(self.members.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Member>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .values()
            .find(|m| m.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Member>> {
        Ok(self
            .members
            .lock()
            .unwrap()
            .values()
            .find(|m| m.email == email)
            .cloned())
    }
}

/// Credential store backed by a mutex-guarded map. Joins against the
/// shared member directory the same way the SQL implementation joins
/// the two tables.
pub struct InMemoryCredentialStore {
    records: Mutex<HashMap<i64, SecurityRecord>>,
    members: Arc<InMemoryMemberDirectory>,
}

impl InMemoryCredentialStore {
    pub fn new(members: Arc<InMemoryMemberDirectory>) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            members,
        }
    }

    pub fn insert(&self, record: SecurityRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.member_id, record);
    }

    /// Clone of the member's record, for assertions.
    pub fn record(&self, member_id: i64) -> SecurityRecord {
        self.records
            .lock()
            .unwrap()
            .get(&member_id)
            .cloned()
            .expect("record should exist")
    }

    /// Snapshot of the full store, for no-mutation assertions.
    pub fn snapshot(&self) -> HashMap<i64, (String, Option<String>, Option<DateTime<Utc>>)> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(id, r)| {
                (
                    *id,
                    (
                        r.password_hash.clone(),
                        r.reset_token.clone(),
                        r.token_created_at,
                    ),
                )
            })
            .collect()
    }

    /// Shift an outstanding token's creation time into the past.
    pub fn backdate_token(&self, member_id: i64, by: Duration) {
        let mut records = self.records.lock().unwrap();
        let record = records.get_mut(&member_id).expect("record should exist");
        let created_at = record
            .token_created_at
            .expect("token should be outstanding");
        record.token_created_at = Some(created_at - by);
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_member_id(&self, member_id: i64) -> AppResult<Option<SecurityRecord>> {
        Ok(self.records.lock().unwrap().get(&member_id).cloned())
    }

    async fn find_by_reset_token(&self, token: &str) -> AppResult<Option<SecurityRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .find(|r| r.reset_token.as_deref() == Some(token))
            .cloned())
    }

    async fn find_by_member_and_email(
        &self,
        member_id: i64,
        email: &str,
    ) -> AppResult<Option<SecurityRecord>> {
        let member = self.members.find_by_id(member_id).await?;
        match member {
            Some(m) if m.email == email => {
                Ok(self.records.lock().unwrap().get(&member_id).cloned())
            }
            _ => Ok(None),
        }
    }

    async fn find_legacy_member(
        &self,
        identifier: &str,
        password_digest: &str,
    ) -> AppResult<Option<Member>> {
        let records = self.records.lock().unwrap();
        let members = self.members.members.lock().unwrap();

        Ok(members
            .values()
            .find(|m| {
                (m.username == identifier || m.email == identifier)
                    && records.get(&m.id).is_some_and(|r| {
                        r.algorithm == HashAlgorithm::LegacyMd5
                            && r.password_hash == password_digest
                    })
            })
            .cloned())
    }

    async fn store_reset_token(
        &self,
        member_id: i64,
        token: &str,
        created_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&member_id) {
            Some(record) => {
                record.reset_token = Some(token.to_string());
                record.token_created_at = Some(created_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn commit_password_change(
        &self,
        member_id: i64,
        change: &PasswordChangeSet,
        expected_token: Option<&str>,
    ) -> AppResult<bool> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(&member_id) {
            Some(record) => {
                if let Some(token) = expected_token {
                    if record.reset_token.as_deref() != Some(token) {
                        return Ok(false);
                    }
                }
                record.password_hash = change.password_hash.clone();
                record.algorithm = change.algorithm;
                record.reset_token = change.reset_token.clone();
                record.token_created_at = change.token_created_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Everything a service-level test needs, wired together.
pub struct TestHarness {
    pub members: Arc<InMemoryMemberDirectory>,
    pub store: Arc<InMemoryCredentialStore>,
    pub config: AuthConfig,
    pub service: SessionService,
}

impl TestHarness {
    pub fn new() -> Self {
        let config = AuthConfig::default();
        let members = Arc::new(InMemoryMemberDirectory::default());
        let store = Arc::new(InMemoryCredentialStore::new(Arc::clone(&members)));
        let issuer: Arc<dyn TokenIssuer> = Arc::new(JwtEncoder::new(&config));
        let service = SessionService::new(
            Arc::clone(&store) as Arc<dyn CredentialStore>,
            Arc::clone(&members) as Arc<dyn MemberDirectory>,
            issuer,
            &config,
        );

        Self {
            members,
            store,
            config,
            service,
        }
    }

    /// Seed a pre-migration member with an MD5-hashed password.
    pub fn seed_legacy_member(&self, id: i64, username: &str, email: &str, password: &str) {
        self.members.insert(Member {
            id,
            username: username.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        });
        self.store.insert(SecurityRecord {
            member_id: id,
            password_hash: legacy_digest(password),
            algorithm: HashAlgorithm::LegacyMd5,
            reset_token: None,
            token_created_at: None,
        });
    }

    /// Seed a migrated member with an argon2id-hashed password.
    pub fn seed_modern_member(&self, id: i64, username: &str, email: &str, password: &str) {
        self.members.insert(Member {
            id,
            username: username.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        });
        self.store.insert(SecurityRecord {
            member_id: id,
            password_hash: PasswordHasher::new().hash_password(password).unwrap(),
            algorithm: HashAlgorithm::Modern,
            reset_token: None,
            token_created_at: None,
        });
    }

    /// Decode a session credential issued by the harness encoder.
    pub fn decode(&self, token: &str) -> Claims {
        let key = jsonwebtoken::DecodingKey::from_secret(self.config.jwt_secret.as_bytes());
        jsonwebtoken::decode::<Claims>(token, &key, &jsonwebtoken::Validation::default())
            .expect("credential should decode")
            .claims
    }
}
