use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
    pub withdrawal_manager: String,
    /// cw20 token contracts that can be contributed from the start.
    pub allowed_tokens: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Pulls `amount` of `token` from the sender (requires a prior cw20 allowance)
    /// and credits it to the sender's contribution record.
    Contribute {
        token: String,
        amount: Uint128,
    },

    // Owner-only
    AddAllowedToken {
        token: String,
    },
    RemoveAllowedToken {
        token: String,
    },
    SetWithdrawalManager {
        manager: String,
    },
    TransferOwnership {
        new_owner: String,
    },
    CancelOwnershipTransfer {},
    Pause {},
    Unpause {},

    // Pending owner only
    AcceptOwnership {},

    // Withdrawal manager only
    Withdraw {
        token: String,
        amount: Uint128,
    },
    WithdrawAll {},
}

/// Carried on each token transfer SubMsg and handed back to the contract in the Reply.
#[cw_serde]
pub enum ReplyPayload {
    Contribution {
        depositor: Addr,
        token: Addr,
        amount: Uint128,
        custody_before: Uint128,
    },
    Withdrawal {
        token: Addr,
        recipient: Addr,
        amount: Uint128,
        custody_before: Uint128,
    },
}
