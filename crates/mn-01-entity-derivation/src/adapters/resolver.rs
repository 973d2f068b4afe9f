//! # Cached Entity Id Resolver
//!
//! [`EntityIdService`] adapter fronting an [`AliasStore`] with a bounded
//! LRU cache. Numeric ids and long-zero EVM addresses decode without a
//! lookup; aliases and other EVM addresses go cache first, then store.
//!
//! Newly created entities are pushed into the cache through
//! [`EntityIdService::notify`], so transactions later in the same stream
//! resolve them before the sink has persisted anything.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use shared_types::{
    AccountId, AccountRef, ContractId, ContractRef, Entity, EntityId, EVM_ADDRESS_LENGTH,
};
use tracing::trace;

use crate::domain::ResolutionError;
use crate::ports::{AliasStore, EntityIdService};

/// Cached entries when no capacity is configured.
pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100_000) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum KeyKind {
    Alias,
    EvmAddress,
}

type CacheKey = (KeyKind, i64, i64, Vec<u8>);

pub struct CachedEntityIdService<S> {
    store: S,
    cache: Mutex<LruCache<CacheKey, EntityId>>,
}

impl<S: AliasStore> CachedEntityIdService<S> {
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(store: S, capacity: NonZeroUsize) -> Self {
        Self {
            store,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().len()
    }

    fn resolve_alias(&self, shard: i64, realm: i64, alias: &[u8]) -> Result<EntityId, ResolutionError> {
        let key = (KeyKind::Alias, shard, realm, alias.to_vec());
        if let Some(entity_id) = self.cache.lock().get(&key) {
            return Ok(*entity_id);
        }

        match self.store.find_by_alias(shard, realm, alias)? {
            Some(entity_id) => {
                self.cache.lock().put(key, entity_id);
                Ok(entity_id)
            }
            None => Err(ResolutionError::not_found("alias", alias)),
        }
    }

    fn resolve_evm_address(
        &self,
        shard: i64,
        realm: i64,
        address: &[u8],
    ) -> Result<EntityId, ResolutionError> {
        if let Some(entity_id) = EntityId::from_long_zero_address(shard, realm, address) {
            return Ok(entity_id);
        }

        let key = (KeyKind::EvmAddress, shard, realm, address.to_vec());
        if let Some(entity_id) = self.cache.lock().get(&key) {
            return Ok(*entity_id);
        }

        match self.store.find_by_evm_address(shard, realm, address)? {
            Some(entity_id) => {
                self.cache.lock().put(key, entity_id);
                Ok(entity_id)
            }
            None => Err(ResolutionError::not_found("evm address", address)),
        }
    }
}

impl<S: AliasStore> EntityIdService for CachedEntityIdService<S> {
    fn lookup_account(&self, account_id: &AccountId) -> Result<EntityId, ResolutionError> {
        match &account_id.account {
            AccountRef::Num(num) => Ok(EntityId::of(account_id.shard, account_id.realm, *num)?),
            AccountRef::Alias(alias) if alias.len() == EVM_ADDRESS_LENGTH => {
                self.resolve_evm_address(account_id.shard, account_id.realm, alias)
            }
            AccountRef::Alias(alias) => self.resolve_alias(account_id.shard, account_id.realm, alias),
        }
    }

    fn lookup_contract(&self, contract_id: &ContractId) -> Result<EntityId, ResolutionError> {
        match &contract_id.contract {
            ContractRef::Num(num) => Ok(EntityId::of(contract_id.shard, contract_id.realm, *num)?),
            ContractRef::EvmAddress(address) => {
                self.resolve_evm_address(contract_id.shard, contract_id.realm, address)
            }
        }
    }

    fn notify(&self, entity: &Entity) {
        let id = entity.id;
        let mut cache = self.cache.lock();
        if let Some(alias) = entity.alias.as_ref().filter(|alias| !alias.is_empty()) {
            cache.put((KeyKind::Alias, id.shard, id.realm, alias.clone()), id);
        }
        if let Some(address) = entity.evm_address.as_ref().filter(|address| !address.is_empty()) {
            cache.put((KeyKind::EvmAddress, id.shard, id.realm, address.clone()), id);
        }
        trace!(entity_id = %id, "Cached entity aliases");
    }
}

/// Alias index held in memory; for tests and for replays that start from
/// an empty database.
#[derive(Debug, Default)]
pub struct InMemoryAliasStore {
    aliases: RwLock<HashMap<(i64, i64, Vec<u8>), EntityId>>,
    evm_addresses: RwLock<HashMap<(i64, i64, Vec<u8>), EntityId>>,
}

impl InMemoryAliasStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_alias(&self, alias: &[u8], entity_id: EntityId) {
        self.aliases
            .write()
            .insert((entity_id.shard, entity_id.realm, alias.to_vec()), entity_id);
    }

    pub fn insert_evm_address(&self, address: &[u8], entity_id: EntityId) {
        self.evm_addresses
            .write()
            .insert((entity_id.shard, entity_id.realm, address.to_vec()), entity_id);
    }
}

impl AliasStore for InMemoryAliasStore {
    fn find_by_alias(
        &self,
        shard: i64,
        realm: i64,
        alias: &[u8],
    ) -> Result<Option<EntityId>, ResolutionError> {
        Ok(self.aliases.read().get(&(shard, realm, alias.to_vec())).copied())
    }

    fn find_by_evm_address(
        &self,
        shard: i64,
        realm: i64,
        evm_address: &[u8],
    ) -> Result<Option<EntityId>, ResolutionError> {
        Ok(self
            .evm_addresses
            .read()
            .get(&(shard, realm, evm_address.to_vec()))
            .copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store wrapper counting backend hits.
    #[derive(Default)]
    struct CountingStore {
        inner: InMemoryAliasStore,
        hits: AtomicUsize,
    }

    impl AliasStore for CountingStore {
        fn find_by_alias(
            &self,
            shard: i64,
            realm: i64,
            alias: &[u8],
        ) -> Result<Option<EntityId>, ResolutionError> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_alias(shard, realm, alias)
        }

        fn find_by_evm_address(
            &self,
            shard: i64,
            realm: i64,
            evm_address: &[u8],
        ) -> Result<Option<EntityId>, ResolutionError> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_evm_address(shard, realm, evm_address)
        }
    }

    struct FailingStore;

    impl AliasStore for FailingStore {
        fn find_by_alias(&self, _: i64, _: i64, _: &[u8]) -> Result<Option<EntityId>, ResolutionError> {
            Err(ResolutionError::Backend("connection reset".into()))
        }

        fn find_by_evm_address(&self, _: i64, _: i64, _: &[u8]) -> Result<Option<EntityId>, ResolutionError> {
            Err(ResolutionError::Backend("connection reset".into()))
        }
    }

    const ALIAS: [u8; 35] = [7u8; 35];

    #[test]
    fn test_numeric_ids_need_no_store() {
        let service = CachedEntityIdService::new(FailingStore);
        assert_eq!(service.lookup_account(&AccountId::num(98)).unwrap(), EntityId::num(98));
        assert_eq!(service.lookup_account(&AccountId::num(0)).unwrap(), EntityId::EMPTY);
        assert_eq!(service.lookup_contract(&ContractId::num(1001)).unwrap(), EntityId::num(1001));
    }

    #[test]
    fn test_long_zero_address_decodes() {
        let service = CachedEntityIdService::new(FailingStore);
        let address = EntityId::num(1234).to_long_zero_address();
        assert_eq!(
            service.lookup_contract(&ContractId::evm_address(address.to_vec())).unwrap(),
            EntityId::num(1234)
        );
        assert_eq!(
            service.lookup_account(&AccountId::alias(address.to_vec())).unwrap(),
            EntityId::num(1234)
        );
    }

    #[test]
    fn test_store_hit_is_cached() {
        let store = CountingStore::default();
        store.inner.insert_alias(&ALIAS, EntityId::num(500));
        let service = CachedEntityIdService::new(store);

        for _ in 0..3 {
            assert_eq!(service.lookup_account(&AccountId::alias(ALIAS)).unwrap(), EntityId::num(500));
        }
        assert_eq!(service.store().hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_alias_is_not_found() {
        let service = CachedEntityIdService::new(InMemoryAliasStore::new());
        let err = service.lookup_account(&AccountId::alias(ALIAS)).unwrap_err();
        assert!(matches!(err, ResolutionError::NotFound { kind: "alias", .. }));

        let err = service
            .lookup_contract(&ContractId::evm_address(vec![0xab; 20]))
            .unwrap_err();
        assert!(matches!(err, ResolutionError::NotFound { kind: "evm address", .. }));
    }

    #[test]
    fn test_backend_failure_propagates() {
        let service = CachedEntityIdService::new(FailingStore);
        let err = service.lookup_account(&AccountId::alias(ALIAS)).unwrap_err();
        assert_eq!(err, ResolutionError::Backend("connection reset".into()));
    }

    #[test]
    fn test_notify_makes_new_entity_resolvable() {
        let service = CachedEntityIdService::new(FailingStore);
        let mut entity = Entity::new(EntityId::num(900), 1);
        entity.alias = Some(ALIAS.to_vec());
        entity.evm_address = Some(vec![0xcd; 20]);
        service.notify(&entity);

        assert_eq!(service.lookup_account(&AccountId::alias(ALIAS)).unwrap(), EntityId::num(900));
        assert_eq!(
            service.lookup_contract(&ContractId::evm_address(vec![0xcd; 20])).unwrap(),
            EntityId::num(900)
        );
        assert_eq!(
            service.lookup_account(&AccountId::alias(vec![0xcd; 20])).unwrap(),
            EntityId::num(900)
        );
    }

    #[test]
    fn test_cache_is_bounded() {
        let capacity = NonZeroUsize::new(2).unwrap();
        let service = CachedEntityIdService::with_capacity(InMemoryAliasStore::new(), capacity);
        for num in 1..=5u8 {
            let mut entity = Entity::new(EntityId::num(i64::from(num)), 1);
            entity.alias = Some(vec![num; 33]);
            service.notify(&entity);
        }
        assert_eq!(service.cached_len(), 2);
        assert!(service.lookup_account(&AccountId::alias(vec![1u8; 33])).is_err());
        assert_eq!(
            service.lookup_account(&AccountId::alias(vec![5u8; 33])).unwrap(),
            EntityId::num(5)
        );
    }
}
