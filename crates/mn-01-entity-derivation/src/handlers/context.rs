//! # Handler Context
//!
//! Per-transaction state shared by the handler steps: configuration, the
//! resolver, the sink, and the referenced entity ids collected so far.

use std::collections::HashSet;

use shared_types::{AccountId, ContractId, Entity, EntityId, StakedId};
use tracing::warn;

use crate::config::{ParserConfig, PartialDataAction, PersistProperties};
use crate::domain::{ParserError, ResolutionError, Result, StakingElection};
use crate::ports::{EntityIdService, EntityListener};
use crate::recoverable_error;

pub struct HandlerContext<'a> {
    pub config: &'a ParserConfig,
    pub listener: &'a mut dyn EntityListener,
    entity_id_service: &'a dyn EntityIdService,
    consensus_timestamp: i64,
    entity_ids: Vec<EntityId>,
    seen: HashSet<EntityId>,
}

impl<'a> HandlerContext<'a> {
    pub fn new(
        config: &'a ParserConfig,
        entity_id_service: &'a dyn EntityIdService,
        listener: &'a mut dyn EntityListener,
        consensus_timestamp: i64,
    ) -> Self {
        Self {
            config,
            listener,
            entity_id_service,
            consensus_timestamp,
            entity_ids: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn persist(&self) -> &PersistProperties {
        &self.config.persist
    }

    pub fn consensus_timestamp(&self) -> i64 {
        self.consensus_timestamp
    }

    /// Resolve an account id under the configured `PartialDataAction`.
    ///
    /// With `Skip`, an unknown alias yields [`EntityId::EMPTY`].
    pub fn resolve_account(&self, account_id: &AccountId) -> Result<EntityId> {
        self.apply_policy(self.entity_id_service.lookup_account(account_id))
    }

    /// Resolve a contract id under the configured `PartialDataAction`.
    pub fn resolve_contract(&self, contract_id: &ContractId) -> Result<EntityId> {
        self.apply_policy(self.entity_id_service.lookup_contract(contract_id))
    }

    pub fn resolve_contract_preferring_receipt(
        &self,
        receipt_id: Option<&ContractId>,
        body_id: &ContractId,
    ) -> Result<EntityId> {
        self.apply_policy(
            self.entity_id_service
                .lookup_contract_preferring_receipt(receipt_id, body_id),
        )
    }

    /// Resolve an account whose absence only degrades the derived data.
    ///
    /// Unknown aliases and empty ids are logged as recoverable errors
    /// regardless of policy; store failures remain fatal.
    pub fn lookup_account_or_log(
        &self,
        account_id: &AccountId,
        field: &'static str,
    ) -> Result<Option<EntityId>> {
        let lookup = self.entity_id_service.lookup_account(account_id);
        self.recoverable(lookup, field)
    }

    pub fn lookup_contract_or_log(
        &self,
        contract_id: &ContractId,
        field: &'static str,
    ) -> Result<Option<EntityId>> {
        let lookup = self.entity_id_service.lookup_contract(contract_id);
        self.recoverable(lookup, field)
    }

    /// Set the auto-renew account of `entity`; an unresolvable account is
    /// a recoverable error and leaves the field untouched.
    pub fn set_auto_renew_account(
        &mut self,
        entity: &mut Entity,
        account_id: Option<&AccountId>,
    ) -> Result<()> {
        let Some(account_id) = account_id else {
            return Ok(());
        };
        if let Some(resolved) = self.lookup_account_or_log(account_id, "auto_renew_account")? {
            entity.auto_renew_account_id = Some(resolved);
            self.add_entity_id(resolved);
        }
        Ok(())
    }

    /// Resolve a staking election; the staked account follows the
    /// configured `PartialDataAction`.
    pub fn resolve_staking(&mut self, staked_id: Option<&StakedId>) -> Result<Option<StakingElection>> {
        let election = match staked_id {
            Some(StakedId::Account(account_id)) => {
                let resolved = self.resolve_account(account_id)?;
                self.add_entity_id(resolved);
                Some(StakingElection::Account(resolved))
            }
            Some(StakedId::Node(node_id)) => Some(StakingElection::Node(*node_id)),
            None => None,
        };
        Ok(election)
    }

    /// Set the proxy account of `entity` when the body names one.
    pub fn set_proxy_account(&mut self, entity: &mut Entity, account_id: Option<&AccountId>) -> Result<()> {
        let Some(account_id) = account_id else {
            return Ok(());
        };
        if let Some(resolved) = self.lookup_account_or_log(account_id, "proxy_account")? {
            entity.proxy_account_id = Some(resolved);
        }
        Ok(())
    }

    /// Make a new entity's alias and EVM address resolvable.
    pub fn notify(&self, entity: &Entity) {
        self.entity_id_service.notify(entity);
    }

    /// Record a referenced entity; empty and repeated ids are ignored.
    pub fn add_entity_id(&mut self, entity_id: EntityId) {
        if !entity_id.is_empty() && self.seen.insert(entity_id) {
            self.entity_ids.push(entity_id);
        }
    }

    pub fn into_entity_ids(self) -> Vec<EntityId> {
        self.entity_ids
    }

    fn apply_policy(&self, lookup: std::result::Result<EntityId, ResolutionError>) -> Result<EntityId> {
        match lookup {
            Ok(entity_id) => Ok(entity_id),
            Err(ResolutionError::NotFound { kind, value }) => match self.config.partial_data_action {
                PartialDataAction::Skip => {
                    warn!(
                        consensus_timestamp = self.consensus_timestamp,
                        kind,
                        %value,
                        "Unable to resolve entity id, skipping"
                    );
                    Ok(EntityId::EMPTY)
                }
                PartialDataAction::Throw => Err(ParserError::AliasNotFound { kind, value }),
            },
            Err(error) => Err(error.into()),
        }
    }

    fn recoverable(
        &self,
        lookup: std::result::Result<EntityId, ResolutionError>,
        field: &'static str,
    ) -> Result<Option<EntityId>> {
        match lookup {
            Ok(entity_id) if !entity_id.is_empty() => Ok(Some(entity_id)),
            Ok(_) => {
                recoverable_error!(consensus_timestamp = self.consensus_timestamp, field, "Empty id");
                Ok(None)
            }
            Err(ResolutionError::NotFound { kind, value }) => {
                recoverable_error!(
                    consensus_timestamp = self.consensus_timestamp,
                    field,
                    kind,
                    %value,
                    "Unable to resolve id"
                );
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }
}
