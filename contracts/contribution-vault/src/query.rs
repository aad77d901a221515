use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use crate::state::Config;

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(Addr)]
    WithdrawalManager {},

    /// Allowed tokens in their current list order.
    #[returns(AllowedTokensResponse)]
    AllowedTokens {},

    #[returns(bool)]
    IsAllowed { token: String },

    #[returns(Uint128)]
    UserContribution { depositor: String, token: String },

    /// Every token the depositor ever contributed, including tokens that are no longer allowed.
    #[returns(UserContributionsResponse)]
    UserContributions { depositor: String },

    #[returns(Uint128)]
    TotalContribution { token: String },

    /// Balance of the token currently held by the contract, as reported by the token contract.
    #[returns(Uint128)]
    CustodyBalance { token: String },

    /// Live custody of every allowed token, in list order.
    #[returns(CustodyBalancesResponse)]
    CustodyBalances {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub config: Config,
}

#[cw_serde]
pub struct AllowedTokensResponse {
    pub tokens: Vec<Addr>,
}

#[cw_serde]
pub struct TokenAmount {
    pub token: Addr,
    pub amount: Uint128,
}

#[cw_serde]
pub struct UserContributionsResponse {
    pub contributions: Vec<TokenAmount>,
}

#[cw_serde]
pub struct CustodyBalancesResponse {
    pub balances: Vec<TokenAmount>,
}
