use cosmwasm_std::{
    to_json_vec, Addr, DepsMut, Env, Event, MessageInfo, Response, Storage, SubMsg, Uint128,
};

use crate::contract::CONTRIBUTE_REPLY_ID;
use crate::cw20;
use crate::error::ContractError;
use crate::guard::{
    acquire_lock, complete_transfer, validate_amount, validate_identity, validate_not_entered,
    validate_not_paused,
};
use crate::msg::ReplyPayload;
use crate::state::{
    is_allowed_token, load_config, GuardedOperation, TOTAL_CONTRIBUTIONS, USER_CONTRIBUTIONS,
};

// Contribute:
//     Validate no guarded operation is in flight
//     Validate that the contract isn't paused
//     Validate the token address, the amount and that the token is allowed
//     Take the lock and pull the tokens from the sender
// Nothing is credited here. The ledger is updated in the reply, once the token
// contract has actually moved the tokens into custody.
pub fn contribute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    validate_not_entered(deps.storage)?;

    let config = load_config(deps.storage)?;
    validate_not_paused(&config)?;

    let token = validate_identity(deps.api, &token)?;
    validate_amount(amount)?;

    if !is_allowed_token(deps.storage, &token) {
        return Err(ContractError::NotAllowed {
            token: token.to_string(),
        });
    }

    let custody_before = cw20::query_balance(&deps.querier, &token, &env.contract.address)?;

    acquire_lock(deps.storage, GuardedOperation::Contribute, 1)?;

    let transfer = SubMsg::reply_on_success(
        cw20::transfer_from_msg(&token, &info.sender, &env.contract.address, amount)?,
        CONTRIBUTE_REPLY_ID,
    )
    .with_payload(to_json_vec(&ReplyPayload::Contribution {
        depositor: info.sender.clone(),
        token: token.clone(),
        amount,
        custody_before,
    })?);

    Ok(Response::new()
        .add_submessage(transfer)
        .add_attribute("action", "contribute")
        .add_attribute("sender", info.sender)
        .add_attribute("token", token)
        .add_attribute("amount", amount))
}

/// Runs after the token contract reported a successful `TransferFrom`. Verifies that custody grew
/// by exactly the contributed amount, then credits the depositor and releases the lock.
pub fn handle_contribution_reply(
    deps: DepsMut,
    env: Env,
    depositor: Addr,
    token: Addr,
    amount: Uint128,
    custody_before: Uint128,
) -> Result<Response, ContractError> {
    let custody_after = cw20::query_balance(&deps.querier, &token, &env.contract.address)?;

    let received = custody_after
        .checked_sub(custody_before)
        .map_err(|_| ContractError::TransferFailed {
            reason: format!(
                "custody of {token} decreased from {custody_before} to {custody_after} during contribution"
            ),
        })?;

    if received != amount {
        return Err(ContractError::TransferFailed {
            reason: format!("expected to receive {amount} of {token}, received {received}"),
        });
    }

    record_contribution(deps.storage, &depositor, &token, amount)?;

    if complete_transfer(deps.storage, &[GuardedOperation::Contribute])? {
        deps.api.debug("contribution-vault: reentrancy lock released");
    }

    Ok(Response::new()
        .add_attribute("action", "contribution_reply")
        .add_event(
            Event::new("contributed")
                .add_attribute("depositor", depositor)
                .add_attribute("token", token)
                .add_attribute("amount", amount),
        ))
}

/// Credits `amount` to both the depositor's record and the token total. The two
/// writes always go together, which keeps every total equal to the sum of its user records.
pub fn record_contribution(
    storage: &mut dyn Storage,
    depositor: &Addr,
    token: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let user_total = USER_CONTRIBUTIONS
        .may_load(storage, (depositor, token))?
        .unwrap_or_default()
        .checked_add(amount)?;

    let token_total = TOTAL_CONTRIBUTIONS
        .may_load(storage, token)?
        .unwrap_or_default()
        .checked_add(amount)?;

    USER_CONTRIBUTIONS.save(storage, (depositor, token), &user_total)?;
    TOTAL_CONTRIBUTIONS.save(storage, token, &token_total)?;

    Ok(())
}
