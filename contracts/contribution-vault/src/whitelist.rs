use cosmwasm_std::{Addr, DepsMut, Event, MessageInfo, Response, Storage};

use crate::error::ContractError;
use crate::guard::{validate_identity, validate_sender_is_owner};
use crate::state::{load_allowed_tokens, load_config, ALLOWED_TOKENS, ALLOWED_TOKEN_INDEX};

/// Upper bound on the number of allowed tokens. Keeps `WithdrawAll` bounded.
pub const MAX_ALLOWED_TOKENS: usize = 20;

/// Appends the token to the allowed tokens list and indexes its position.
pub fn insert_allowed_token(storage: &mut dyn Storage, token: &Addr) -> Result<(), ContractError> {
    if ALLOWED_TOKEN_INDEX.has(storage, token) {
        return Err(ContractError::AlreadyAllowed {
            token: token.to_string(),
        });
    }

    let mut tokens = load_allowed_tokens(storage)?;
    if tokens.len() >= MAX_ALLOWED_TOKENS {
        return Err(ContractError::CapacityExceeded {
            max: MAX_ALLOWED_TOKENS,
        });
    }

    ALLOWED_TOKEN_INDEX.save(storage, token, &(tokens.len() as u32))?;
    tokens.push(token.clone());
    ALLOWED_TOKENS.save(storage, &tokens)?;

    Ok(())
}

/// Removes the token in O(1): the last token of the list takes over the freed
/// position, so the order of the remaining tokens is not preserved.
pub fn swap_remove_allowed_token(
    storage: &mut dyn Storage,
    token: &Addr,
) -> Result<(), ContractError> {
    let position = ALLOWED_TOKEN_INDEX
        .may_load(storage, token)?
        .ok_or_else(|| ContractError::NotFound {
            token: token.to_string(),
        })? as usize;

    let mut tokens = load_allowed_tokens(storage)?;
    tokens.swap_remove(position);

    if let Some(moved) = tokens.get(position) {
        ALLOWED_TOKEN_INDEX.save(storage, moved, &(position as u32))?;
    }
    ALLOWED_TOKEN_INDEX.remove(storage, token);
    ALLOWED_TOKENS.save(storage, &tokens)?;

    Ok(())
}

// AddAllowedToken:
//     Validate sender is the owner
//     Validate the token address
//     Validate the token isn't allowed already and there is room for it
//     Append the token to the allowed tokens list
pub fn add_allowed_token(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;
    validate_sender_is_owner(&config, &info)?;

    let token = validate_identity(deps.api, &token)?;
    insert_allowed_token(deps.storage, &token)?;

    Ok(Response::new()
        .add_attribute("action", "add_allowed_token")
        .add_attribute("sender", info.sender)
        .add_event(Event::new("token_added").add_attribute("token", token)))
}

// RemoveAllowedToken:
//     Validate sender is the owner
//     Validate the token is currently allowed
//     Swap-remove the token from the allowed tokens list
// Custodied balance and contribution records of the token are left as they are.
pub fn remove_allowed_token(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
) -> Result<Response, ContractError> {
    let config = load_config(deps.storage)?;
    validate_sender_is_owner(&config, &info)?;

    let token = validate_identity(deps.api, &token)?;
    swap_remove_allowed_token(deps.storage, &token)?;

    Ok(Response::new()
        .add_attribute("action", "remove_allowed_token")
        .add_attribute("sender", info.sender)
        .add_event(Event::new("token_removed").add_attribute("token", token)))
}
