use cosmwasm_std::{
    to_json_vec, Addr, DepsMut, Env, Event, MessageInfo, Response, SubMsg, Uint128,
};

use crate::contract::WITHDRAW_REPLY_ID;
use crate::cw20;
use crate::error::ContractError;
use crate::guard::{
    acquire_lock, complete_transfer, validate_amount, validate_identity, validate_not_entered,
    validate_not_paused, validate_sender_is_withdrawal_manager,
};
use crate::msg::ReplyPayload;
use crate::state::{load_allowed_tokens, load_config, GuardedOperation};

fn build_withdrawal_submsg(
    token: &Addr,
    recipient: &Addr,
    amount: Uint128,
    custody_before: Uint128,
) -> Result<SubMsg, ContractError> {
    Ok(SubMsg::reply_on_success(
        cw20::transfer_msg(token, recipient, amount)?,
        WITHDRAW_REPLY_ID,
    )
    .with_payload(to_json_vec(&ReplyPayload::Withdrawal {
        token: token.clone(),
        recipient: recipient.clone(),
        amount,
        custody_before,
    })?))
}

// Withdraw:
//     Validate no guarded operation is in flight
//     Validate that the contract isn't paused
//     Validate sender is the withdrawal manager
//     Validate the token address and the amount
//     Validate the live custody covers the amount
//     Take the lock and transfer the tokens to the withdrawal manager
// The token doesn't have to be allowed, so balances of removed tokens can still be recovered.
pub fn withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    validate_not_entered(deps.storage)?;

    let config = load_config(deps.storage)?;
    validate_not_paused(&config)?;
    validate_sender_is_withdrawal_manager(&config, &info)?;

    let token = validate_identity(deps.api, &token)?;
    validate_amount(amount)?;

    let custody = cw20::query_balance(&deps.querier, &token, &env.contract.address)?;
    if custody < amount {
        return Err(ContractError::InsufficientCustody {
            token: token.to_string(),
            available: custody,
            required: amount,
        });
    }

    acquire_lock(deps.storage, GuardedOperation::Withdraw, 1)?;

    let submsg = build_withdrawal_submsg(&token, &config.withdrawal_manager, amount, custody)?;

    Ok(Response::new()
        .add_submessage(submsg)
        .add_attribute("action", "withdraw")
        .add_attribute("sender", info.sender)
        .add_attribute("token", token)
        .add_attribute("amount", amount))
}

// WithdrawAll:
//     Validate no guarded operation is in flight
//     Validate that the contract isn't paused
//     Validate sender is the withdrawal manager
//     For each allowed token, transfer its whole live custody to the withdrawal manager
// Tokens with zero custody are skipped. If any transfer fails the whole sweep is reverted.
pub fn withdraw_all(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    validate_not_entered(deps.storage)?;

    let config = load_config(deps.storage)?;
    validate_not_paused(&config)?;
    validate_sender_is_withdrawal_manager(&config, &info)?;

    let tokens = load_allowed_tokens(deps.storage)?;

    let mut submsgs = vec![];
    for token in tokens.iter() {
        let custody = cw20::query_balance(&deps.querier, token, &env.contract.address)?;
        if custody.is_zero() {
            deps.api.debug(&format!(
                "contribution-vault: skipping {token} in withdraw_all, nothing in custody"
            ));
            continue;
        }

        submsgs.push(build_withdrawal_submsg(
            token,
            &config.withdrawal_manager,
            custody,
            custody,
        )?);
    }

    if !submsgs.is_empty() {
        acquire_lock(
            deps.storage,
            GuardedOperation::WithdrawAll,
            submsgs.len() as u32,
        )?;
    }

    Ok(Response::new()
        .add_attribute("action", "withdraw_all")
        .add_attribute("sender", info.sender)
        .add_attribute("transfers", submsgs.len().to_string())
        .add_submessages(submsgs))
}

/// Runs after the token contract reported a successful `Transfer` out of custody.
pub fn handle_withdrawal_reply(
    deps: DepsMut,
    env: Env,
    token: Addr,
    recipient: Addr,
    amount: Uint128,
    custody_before: Uint128,
) -> Result<Response, ContractError> {
    let custody_after = cw20::query_balance(&deps.querier, &token, &env.contract.address)?;

    if custody_before.checked_sub(amount)? != custody_after {
        return Err(ContractError::TransferFailed {
            reason: format!(
                "custody of {token} went from {custody_before} to {custody_after} on a withdrawal of {amount}"
            ),
        });
    }

    if complete_transfer(
        deps.storage,
        &[GuardedOperation::Withdraw, GuardedOperation::WithdrawAll],
    )? {
        deps.api.debug("contribution-vault: reentrancy lock released");
    }

    Ok(Response::new()
        .add_attribute("action", "withdrawal_reply")
        .add_event(
            Event::new("withdrawn")
                .add_attribute("token", token)
                .add_attribute("amount", amount)
                .add_attribute("recipient", recipient),
        ))
}
