//! # Smart Contract Service Handlers
//!
//! Contract lifecycle, calls and Ethereum transactions.
//!
//! EVM outcomes (contract results, contract nonces, sender nonces) are tied
//! to execution rather than to overall status and are recorded whenever the
//! record carries a function result.

use shared_types::{
    Contract, ContractId, ContractResult, Entity, EntityId, EntityType, EthereumTransaction,
    HapiVersion, InitcodeSource, Obtainer, RecordItem, SidecarKind, Transaction, TransactionBody,
    TransactionType,
};

use super::{HandlerContext, TransactionHandler};
use crate::domain::{apply_staking, Result};
use crate::recoverable_error;

/// Emit the contract result and contract nonce updates of `item`.
fn record_function_result(
    ctx: &mut HandlerContext<'_>,
    item: &RecordItem,
    contract_id: EntityId,
) -> Result<()> {
    let Some(result) = item.record.function_result() else {
        return Ok(());
    };

    if ctx.persist().contract_results {
        let contract_id = match (&result.contract_id, contract_id.is_empty()) {
            (Some(result_id), true) => ctx
                .lookup_contract_or_log(result_id, "contract_result.contract_id")?
                .unwrap_or(EntityId::EMPTY),
            _ => contract_id,
        };
        let sender_id = match &result.sender_id {
            Some(sender) => ctx.lookup_account_or_log(sender, "contract_result.sender_id")?,
            None => None,
        };
        let mut created_contract_ids = Vec::with_capacity(result.created_contract_ids.len());
        for created in &result.created_contract_ids {
            if let Some(resolved) = ctx.lookup_contract_or_log(created, "created_contract_id")? {
                created_contract_ids.push(resolved);
            }
        }

        ctx.listener.on_contract_result(ContractResult {
            consensus_timestamp: item.consensus_timestamp,
            contract_id,
            payer_account_id: item.payer_account_id,
            sender_id,
            amount: result.amount,
            bloom: result.bloom.clone(),
            call_result: result.call_result.clone(),
            created_contract_ids,
            error_message: (!result.error_message.is_empty()).then(|| result.error_message.clone()),
            function_parameters: result.function_parameters.clone(),
            gas_limit: result.gas_limit,
            gas_used: result.gas_used,
            transaction_hash: item.record.transaction_hash.clone(),
            transaction_result: item.record.receipt.status,
        })?;
    }

    if ctx.persist().contracts {
        for nonce_info in &result.contract_nonces {
            let Some(resolved) = ctx.lookup_contract_or_log(&nonce_info.contract_id, "contract_nonce")?
            else {
                continue;
            };
            let mut entity = Entity::new(resolved, item.consensus_timestamp);
            entity.ethereum_nonce = Some(nonce_info.nonce);
            ctx.listener.on_entity(entity)?;
        }
    }
    Ok(())
}

pub struct ContractCallHandler;

impl TransactionHandler for ContractCallHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ContractCall
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, ContractCall, self.transaction_type());
        ctx.resolve_contract_preferring_receipt(
            item.record.receipt.contract_id.as_ref(),
            &body.contract_id,
        )
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        let contract_id = transaction.entity_id.unwrap_or(EntityId::EMPTY);
        record_function_result(ctx, item, contract_id)?;

        // Later versions externalize child creations as child records.
        if !item.is_successful()
            || !ctx.persist().contracts
            || !item.hapi_version.is_less_than(HapiVersion::V0_23_0)
        {
            return Ok(());
        }
        let Some(result) = &item.record.contract_call_result else {
            return Ok(());
        };

        for created in &result.created_contract_ids {
            let Some(created_id) = ctx.lookup_contract_or_log(created, "created_contract_id")? else {
                continue;
            };
            if created_id == contract_id {
                continue;
            }
            let mut entity = Entity::new(created_id, item.consensus_timestamp);
            entity.created_timestamp = Some(item.consensus_timestamp);
            entity.deleted = Some(false);
            entity.entity_type = Some(EntityType::Contract);
            ctx.add_entity_id(created_id);
            ctx.listener.on_entity(entity)?;
        }
        Ok(())
    }
}

pub struct ContractCreateHandler;

impl ContractCreateHandler {
    /// Initcode source precedence: the body, then the parent transaction
    /// for child creations, then a non-migration bytecode sidecar.
    fn build_contract(
        &self,
        ctx: &HandlerContext<'_>,
        contract_id: EntityId,
        source: Option<&InitcodeSource>,
        item: &RecordItem,
    ) -> Result<Contract> {
        let mut contract = Contract {
            id: contract_id,
            ..Default::default()
        };

        match source {
            Some(source) => apply_initcode_source(&mut contract, source),
            None => {
                if let Some(parent) = item.parent.as_deref() {
                    inherit_from_parent(&mut contract, parent);
                }
            }
        }

        for sidecar in &item.sidecar_records {
            let SidecarKind::Bytecode {
                contract_id: sidecar_contract,
                initcode,
                runtime_bytecode,
            } = &sidecar.sidecar
            else {
                continue;
            };
            if ctx.lookup_contract_or_log(sidecar_contract, "sidecar.contract_id")? != Some(contract_id) {
                continue;
            }
            if !runtime_bytecode.is_empty() {
                contract.runtime_bytecode = Some(runtime_bytecode.clone());
            }
            if !sidecar.migration
                && contract.initcode.is_none()
                && contract.file_id.is_none()
                && !initcode.is_empty()
            {
                contract.initcode = Some(initcode.clone());
            }
        }

        Ok(contract)
    }
}

fn apply_initcode_source(contract: &mut Contract, source: &InitcodeSource) {
    match source {
        InitcodeSource::FileId(file_id) => contract.file_id = Some(*file_id),
        InitcodeSource::Initcode(initcode) => contract.initcode = Some(initcode.clone()),
    }
}

fn inherit_from_parent(contract: &mut Contract, parent: &RecordItem) {
    match &parent.body {
        TransactionBody::ContractCreateInstance(parent_body) => {
            if let Some(source) = &parent_body.initcode_source {
                apply_initcode_source(contract, source);
            }
        }
        TransactionBody::EthereumTransaction(parent_body) => match parent_body.call_data_file {
            Some(file_id) => contract.file_id = Some(file_id),
            None if !parent_body.decoded.call_data.is_empty() => {
                contract.initcode = Some(parent_body.decoded.call_data.clone());
            }
            None => {}
        },
        _ => {}
    }
}

impl TransactionHandler for ContractCreateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ContractCreateInstance
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        match &item.record.receipt.contract_id {
            Some(contract_id) => ctx.resolve_contract(contract_id),
            None => Ok(EntityId::EMPTY),
        }
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, ContractCreateInstance, self.transaction_type());
        transaction.initial_balance = Some(body.initial_balance);
        record_function_result(ctx, item, transaction.entity_id.unwrap_or(EntityId::EMPTY))
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        entity.evm_address = item
            .record
            .contract_create_result
            .as_ref()
            .and_then(|result| result.evm_address.clone())
            .filter(|address| !address.is_empty());
        // Resolvable by address even when contracts are not persisted.
        ctx.notify(&entity);
        if !ctx.persist().contracts {
            return Ok(());
        }
        let body = expect_body!(item, ContractCreateInstance, self.transaction_type());

        ctx.set_auto_renew_account(&mut entity, body.auto_renew_account.as_ref())?;
        ctx.set_proxy_account(&mut entity, body.proxy_account.as_ref())?;
        entity.auto_renew_period = body.auto_renew_period;
        entity.entity_type = Some(EntityType::Contract);
        entity.key = body.admin_key.clone();
        entity.max_automatic_token_associations = Some(body.max_automatic_token_associations);
        entity.memo = Some(body.memo.clone());

        let election = ctx.resolve_staking(body.staked_id.as_ref())?;
        apply_staking(&mut entity, election, Some(body.decline_reward), item.consensus_timestamp);

        let contract = self.build_contract(ctx, entity.id, body.initcode_source.as_ref(), item)?;
        if let Some(file_id) = contract.file_id {
            ctx.add_entity_id(file_id);
        }

        ctx.listener.on_entity(entity)?;
        ctx.listener.on_contract(contract)?;
        Ok(())
    }
}

pub struct ContractUpdateHandler;

impl TransactionHandler for ContractUpdateHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ContractUpdateInstance
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, ContractUpdateInstance, self.transaction_type());
        ctx.resolve_contract(&body.contract_id)
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        if !ctx.persist().contracts {
            return Ok(());
        }
        let body = expect_body!(item, ContractUpdateInstance, self.transaction_type());

        ctx.set_auto_renew_account(&mut entity, body.auto_renew_account.as_ref())?;
        ctx.set_proxy_account(&mut entity, body.proxy_account.as_ref())?;
        entity.auto_renew_period = body.auto_renew_period;
        entity.entity_type = Some(EntityType::Contract);
        entity.expiration_timestamp = body.expiration_time;
        entity.key = body.admin_key.clone();
        entity.max_automatic_token_associations = body.max_automatic_token_associations;
        entity.memo = body.memo.clone();

        let election = ctx.resolve_staking(body.staked_id.as_ref())?;
        apply_staking(&mut entity, election, body.decline_reward, item.consensus_timestamp);

        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

pub struct ContractDeleteHandler;

impl TransactionHandler for ContractDeleteHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ContractDeleteInstance
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let body = expect_body!(item, ContractDeleteInstance, self.transaction_type());
        ctx.resolve_contract_preferring_receipt(
            item.record.receipt.contract_id.as_ref(),
            &body.contract_id,
        )
    }

    fn update_entity(
        &self,
        ctx: &mut HandlerContext<'_>,
        mut entity: Entity,
        item: &RecordItem,
    ) -> Result<()> {
        if !ctx.persist().contracts {
            return Ok(());
        }
        let body = expect_body!(item, ContractDeleteInstance, self.transaction_type());

        let obtainer = match &body.obtainer {
            Some(Obtainer::Account(account_id)) => ctx.lookup_account_or_log(account_id, "obtainer")?,
            Some(Obtainer::Contract(contract_id)) => {
                ctx.lookup_contract_or_log(contract_id, "obtainer")?
            }
            None => {
                recoverable_error!(
                    consensus_timestamp = item.consensus_timestamp,
                    contract_id = %entity.id,
                    "Contract delete without obtainer"
                );
                None
            }
        };
        if let Some(obtainer_id) = obtainer {
            entity.obtainer_id = Some(obtainer_id);
            ctx.add_entity_id(obtainer_id);
        }
        entity.entity_type = Some(EntityType::Contract);
        entity.permanent_removal = Some(body.permanent_removal);

        ctx.listener.on_entity(entity)?;
        Ok(())
    }
}

pub struct EthereumTransactionHandler;

impl TransactionHandler for EthereumTransactionHandler {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::EthereumTransaction
    }

    fn entity_id(&self, ctx: &HandlerContext<'_>, item: &RecordItem) -> Result<EntityId> {
        let contract_id: Option<&ContractId> = item
            .record
            .function_result()
            .and_then(|result| result.contract_id.as_ref());
        match contract_id {
            Some(contract_id) => ctx.resolve_contract(contract_id),
            None => Ok(EntityId::EMPTY),
        }
    }

    fn update_transaction(
        &self,
        ctx: &mut HandlerContext<'_>,
        transaction: &mut Transaction,
        item: &RecordItem,
    ) -> Result<()> {
        let body = expect_body!(item, EthereumTransaction, self.transaction_type());
        let data = &body.decoded;

        if ctx.persist().ethereum_transactions {
            if let Some(file_id) = body.call_data_file {
                ctx.add_entity_id(file_id);
            }
            ctx.listener.on_ethereum_transaction(EthereumTransaction {
                consensus_timestamp: item.consensus_timestamp,
                hash: item.record.ethereum_hash.clone(),
                payer_account_id: item.payer_account_id,
                call_data_id: body.call_data_file,
                call_data: body.call_data_file.is_none().then(|| data.call_data.clone()),
                chain_id: data.chain_id.clone(),
                data: body.ethereum_data.clone(),
                gas_limit: data.gas_limit,
                gas_price: data.gas_price.clone(),
                max_fee_per_gas: data.max_fee_per_gas.clone(),
                max_gas_allowance: body.max_gas_allowance,
                max_priority_fee_per_gas: data.max_priority_fee_per_gas.clone(),
                nonce: data.nonce,
                recovery_id: data.recovery_id,
                signature_r: data.signature_r.clone(),
                signature_s: data.signature_s.clone(),
                signature_v: data.signature_v.clone(),
                to_address: data.to_address.clone(),
                transaction_type: data.transaction_type,
                value: data.value.clone(),
            })?;
        }

        record_function_result(ctx, item, transaction.entity_id.unwrap_or(EntityId::EMPTY))?;

        // The sender's nonce advances once the transaction reached the EVM.
        let sender = item
            .record
            .function_result()
            .and_then(|result| result.sender_id.as_ref());
        if let (true, Some(sender)) = (ctx.persist().ethereum_transactions, sender) {
            if let Some(sender_id) = ctx.lookup_account_or_log(sender, "ethereum_sender")? {
                ctx.add_entity_id(sender_id);
                match data.nonce.checked_add(1) {
                    Some(nonce) => {
                        let mut entity = Entity::new(sender_id, item.consensus_timestamp);
                        entity.ethereum_nonce = Some(nonce);
                        ctx.listener.on_entity(entity)?;
                    }
                    None => recoverable_error!(
                        consensus_timestamp = item.consensus_timestamp,
                        sender = %sender_id,
                        nonce = data.nonce,
                        "Ethereum sender nonce cannot advance"
                    ),
                }
            }
        }
        Ok(())
    }
}
