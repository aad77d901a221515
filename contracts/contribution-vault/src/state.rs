use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Governs the allowed tokens list, the pause switch and the role assignments.
    pub owner: Addr,
    /// Candidate staged by the owner; becomes the owner once it accepts.
    pub pending_owner: Option<Addr>,
    /// The only address allowed to move custodied tokens out of the contract.
    pub withdrawal_manager: Addr,
    pub paused: bool,
}

#[cw_serde]
pub enum GuardedOperation {
    Contribute,
    Withdraw,
    WithdrawAll,
}

/// Present while a guarded operation is waiting for the replies of its token transfers.
#[cw_serde]
pub struct ReentrancyLock {
    pub operation: GuardedOperation,
    pub outstanding_transfers: u32,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Allowed tokens in insertion order, modulo swap-removals.
pub const ALLOWED_TOKENS: Item<Vec<Addr>> = Item::new("allowed_tokens");

/// Position of each allowed token inside ALLOWED_TOKENS. A token is allowed iff it has an entry here.
/// ALLOWED_TOKEN_INDEX: key(token_address) -> position
pub const ALLOWED_TOKEN_INDEX: Map<&Addr, u32> = Map::new("allowed_token_index");

/// Amount of each token contributed by each depositor. Never decremented.
/// USER_CONTRIBUTIONS: key(depositor_address, token_address) -> amount
pub const USER_CONTRIBUTIONS: Map<(&Addr, &Addr), Uint128> = Map::new("user_contributions");

/// Sum of USER_CONTRIBUTIONS over all depositors of a token.
/// TOTAL_CONTRIBUTIONS: key(token_address) -> amount
pub const TOTAL_CONTRIBUTIONS: Map<&Addr, Uint128> = Map::new("total_contributions");

pub const REENTRANCY_LOCK: Item<ReentrancyLock> = Item::new("reentrancy_lock");

pub fn load_config(storage: &dyn Storage) -> StdResult<Config> {
    CONFIG.load(storage)
}

pub fn load_allowed_tokens(storage: &dyn Storage) -> StdResult<Vec<Addr>> {
    Ok(ALLOWED_TOKENS.may_load(storage)?.unwrap_or_default())
}

pub fn is_allowed_token(storage: &dyn Storage, token: &Addr) -> bool {
    ALLOWED_TOKEN_INDEX.has(storage, token)
}

pub fn get_user_contribution(
    storage: &dyn Storage,
    depositor: &Addr,
    token: &Addr,
) -> StdResult<Uint128> {
    Ok(USER_CONTRIBUTIONS
        .may_load(storage, (depositor, token))?
        .unwrap_or_default())
}

pub fn get_total_contribution(storage: &dyn Storage, token: &Addr) -> StdResult<Uint128> {
    Ok(TOTAL_CONTRIBUTIONS
        .may_load(storage, token)?
        .unwrap_or_default())
}

/// Every (token, amount) pair the depositor ever contributed, ordered by token address.
pub fn get_user_contributions(
    storage: &dyn Storage,
    depositor: &Addr,
) -> StdResult<Vec<(Addr, Uint128)>> {
    USER_CONTRIBUTIONS
        .prefix(depositor)
        .range(storage, None, None, Order::Ascending)
        .collect()
}
