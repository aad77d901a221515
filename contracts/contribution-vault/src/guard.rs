use cosmwasm_std::{Addr, Api, DepsMut, Event, MessageInfo, Response, Storage, Uint128};

use crate::error::{new_generic_error, ContractError};
use crate::state::{load_config, Config, GuardedOperation, ReentrancyLock, CONFIG, REENTRANCY_LOCK};

/// Validates an address given by a caller. Blank strings and strings that the
/// address codec rejects are both reported as `InvalidIdentity`.
pub fn validate_identity(api: &dyn Api, value: &str) -> Result<Addr, ContractError> {
    let invalid = || ContractError::InvalidIdentity {
        value: value.to_string(),
    };

    if value.trim().is_empty() {
        return Err(invalid());
    }

    api.addr_validate(value).map_err(|_| invalid())
}

pub fn validate_amount(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount);
    }

    Ok(())
}

pub fn validate_not_paused(config: &Config) -> Result<(), ContractError> {
    if config.paused {
        return Err(ContractError::Paused);
    }

    Ok(())
}

pub fn validate_sender_is_owner(config: &Config, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }

    Ok(())
}

pub fn validate_sender_is_withdrawal_manager(
    config: &Config,
    info: &MessageInfo,
) -> Result<(), ContractError> {
    if info.sender != config.withdrawal_manager {
        return Err(ContractError::Unauthorized);
    }

    Ok(())
}

pub fn validate_not_entered(storage: &dyn Storage) -> Result<(), ContractError> {
    if REENTRANCY_LOCK.exists(storage) {
        return Err(ContractError::Reentrant);
    }

    Ok(())
}

// Held until the reply of the last outstanding transfer.
pub fn acquire_lock(
    storage: &mut dyn Storage,
    operation: GuardedOperation,
    outstanding_transfers: u32,
) -> Result<(), ContractError> {
    validate_not_entered(storage)?;

    REENTRANCY_LOCK.save(
        storage,
        &ReentrancyLock {
            operation,
            outstanding_transfers,
        },
    )?;

    Ok(())
}

/// Accounts for one completed transfer of one of the `expected` operations and drops
/// the lock once none are outstanding. Returns true if the lock was released.
pub fn complete_transfer(
    storage: &mut dyn Storage,
    expected: &[GuardedOperation],
) -> Result<bool, ContractError> {
    let mut lock = REENTRANCY_LOCK
        .may_load(storage)?
        .ok_or_else(|| new_generic_error("No guarded operation in flight"))?;

    if !expected.contains(&lock.operation) {
        return Err(new_generic_error(format!(
            "Transfer reply does not belong to the guarded operation in flight: {:?}",
            lock.operation
        )));
    }

    lock.outstanding_transfers = lock.outstanding_transfers.saturating_sub(1);
    if lock.outstanding_transfers == 0 {
        REENTRANCY_LOCK.remove(storage);
        return Ok(true);
    }

    REENTRANCY_LOCK.save(storage, &lock)?;
    Ok(false)
}

// TransferOwnership:
//     Validate sender is the owner
//     Validate the candidate address
//     Stage the candidate as pending owner, the current owner stays in charge
pub fn transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let mut config = load_config(deps.storage)?;
    validate_sender_is_owner(&config, &info)?;

    let candidate = validate_identity(deps.api, &new_owner)?;
    config.pending_owner = Some(candidate.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_ownership")
        .add_attribute("sender", info.sender)
        .add_event(
            Event::new("ownership_transfer_started")
                .add_attribute("owner", config.owner)
                .add_attribute("pending_owner", candidate),
        ))
}

// AcceptOwnership:
//     Validate there is a pending owner
//     Validate sender is the pending owner
//     Make the pending owner the owner and clear the pending slot
pub fn accept_ownership(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = load_config(deps.storage)?;

    let pending_owner = config
        .pending_owner
        .clone()
        .ok_or(ContractError::NoPendingOwner)?;

    if info.sender != pending_owner {
        return Err(ContractError::Unauthorized);
    }

    let previous_owner = std::mem::replace(&mut config.owner, pending_owner);
    config.pending_owner = None;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "accept_ownership")
        .add_attribute("sender", info.sender)
        .add_event(
            Event::new("ownership_transferred")
                .add_attribute("previous_owner", previous_owner)
                .add_attribute("new_owner", config.owner),
        ))
}

pub fn cancel_ownership_transfer(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let mut config = load_config(deps.storage)?;
    validate_sender_is_owner(&config, &info)?;

    if config.pending_owner.take().is_none() {
        return Err(ContractError::NoPendingOwner);
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "cancel_ownership_transfer")
        .add_attribute("sender", info.sender))
}

// SetWithdrawalManager:
//     Validate sender is the owner
//     Validate the new manager address
//     Validate the new manager differs from the current one
//     Save the new manager
pub fn set_withdrawal_manager(
    deps: DepsMut,
    info: MessageInfo,
    manager: String,
) -> Result<Response, ContractError> {
    let mut config = load_config(deps.storage)?;
    validate_sender_is_owner(&config, &info)?;

    let new_manager = validate_identity(deps.api, &manager)?;
    if new_manager == config.withdrawal_manager {
        return Err(ContractError::Unchanged);
    }

    let previous_manager = std::mem::replace(&mut config.withdrawal_manager, new_manager);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_withdrawal_manager")
        .add_attribute("sender", info.sender)
        .add_event(
            Event::new("withdrawal_manager_updated")
                .add_attribute("previous_manager", previous_manager)
                .add_attribute("new_manager", config.withdrawal_manager),
        ))
}

pub fn pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = load_config(deps.storage)?;
    validate_sender_is_owner(&config, &info)?;
    validate_not_paused(&config)?;

    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "pause")
        .add_attribute("sender", info.sender)
        .add_attribute("paused", "true"))
}

pub fn unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = load_config(deps.storage)?;
    validate_sender_is_owner(&config, &info)?;

    if !config.paused {
        return Err(ContractError::NotPaused);
    }

    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "unpause")
        .add_attribute("sender", info.sender)
        .add_attribute("paused", "false"))
}
