// entry_point is being used but for some reason clippy doesn't see that, hence the allow attribute here
#[allow(unused_imports)]
use cosmwasm_std::{
    entry_point, from_json, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply,
    Response, StdResult, SubMsgResult,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use crate::cw20;
use crate::error::{new_generic_error, ContractError};
use crate::guard::{self, validate_identity};
use crate::ledger::{contribute, handle_contribution_reply};
use crate::msg::{ExecuteMsg, InstantiateMsg, ReplyPayload};
use crate::query::{
    AllowedTokensResponse, ConfigResponse, CustodyBalancesResponse, QueryMsg, TokenAmount,
    UserContributionsResponse,
};
use crate::state::{
    get_total_contribution, get_user_contribution, get_user_contributions, is_allowed_token,
    load_allowed_tokens, load_config, Config, CONFIG,
};
use crate::whitelist::{add_allowed_token, insert_allowed_token, remove_allowed_token};
use crate::withdrawal::{handle_withdrawal_reply, withdraw, withdraw_all};

/// Contract name that is used for migration.
pub const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
/// Contract version that is used for migration.
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const CONTRIBUTE_REPLY_ID: u64 = 1;
pub const WITHDRAW_REPLY_ID: u64 = 2;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = validate_identity(deps.api, &msg.owner)?;
    let withdrawal_manager = validate_identity(deps.api, &msg.withdrawal_manager)?;

    CONFIG.save(
        deps.storage,
        &Config {
            owner: owner.clone(),
            pending_owner: None,
            withdrawal_manager: withdrawal_manager.clone(),
            paused: false,
        },
    )?;

    // insert_allowed_token() rejects duplicates and anything above the capacity
    for token in msg.allowed_tokens.iter() {
        let token = validate_identity(deps.api, token)?;
        insert_allowed_token(deps.storage, &token)?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("sender", info.sender)
        .add_attribute("owner", owner)
        .add_attribute("withdrawal_manager", withdrawal_manager)
        .add_attribute("allowed_tokens", msg.allowed_tokens.len().to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    // Only cw20 tokens are custodied, native funds sent along would be stuck.
    nonpayable(&info)?;

    match msg {
        ExecuteMsg::Contribute { token, amount } => contribute(deps, env, info, token, amount),
        ExecuteMsg::AddAllowedToken { token } => add_allowed_token(deps, info, token),
        ExecuteMsg::RemoveAllowedToken { token } => remove_allowed_token(deps, info, token),
        ExecuteMsg::SetWithdrawalManager { manager } => {
            guard::set_withdrawal_manager(deps, info, manager)
        }
        ExecuteMsg::TransferOwnership { new_owner } => {
            guard::transfer_ownership(deps, info, new_owner)
        }
        ExecuteMsg::CancelOwnershipTransfer {} => guard::cancel_ownership_transfer(deps, info),
        ExecuteMsg::AcceptOwnership {} => guard::accept_ownership(deps, info),
        ExecuteMsg::Pause {} => guard::pause(deps, info),
        ExecuteMsg::Unpause {} => guard::unpause(deps, info),
        ExecuteMsg::Withdraw { token, amount } => withdraw(deps, env, info, token, amount),
        ExecuteMsg::WithdrawAll {} => withdraw_all(deps, env, info),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    // Transfers are dispatched with reply_on_success, so an error here means the SubMsg was misconfigured.
    if let SubMsgResult::Err(err) = msg.result {
        return Err(ContractError::TransferFailed { reason: err });
    }

    let payload = from_json::<ReplyPayload>(&msg.payload)?;
    match (msg.id, payload) {
        (
            CONTRIBUTE_REPLY_ID,
            ReplyPayload::Contribution {
                depositor,
                token,
                amount,
                custody_before,
            },
        ) => handle_contribution_reply(deps, env, depositor, token, amount, custody_before),
        (
            WITHDRAW_REPLY_ID,
            ReplyPayload::Withdrawal {
                token,
                recipient,
                amount,
                custody_before,
            },
        ) => handle_withdrawal_reply(deps, env, token, recipient, amount, custody_before),
        (id, _) => Err(new_generic_error(format!(
            "unexpected reply id {id} or payload"
        ))),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::WithdrawalManager {} => {
            to_json_binary(&load_config(deps.storage)?.withdrawal_manager)
        }
        QueryMsg::AllowedTokens {} => to_json_binary(&AllowedTokensResponse {
            tokens: load_allowed_tokens(deps.storage)?,
        }),
        QueryMsg::IsAllowed { token } => {
            let token = deps.api.addr_validate(&token)?;
            to_json_binary(&is_allowed_token(deps.storage, &token))
        }
        QueryMsg::UserContribution { depositor, token } => {
            let depositor = deps.api.addr_validate(&depositor)?;
            let token = deps.api.addr_validate(&token)?;
            to_json_binary(&get_user_contribution(deps.storage, &depositor, &token)?)
        }
        QueryMsg::UserContributions { depositor } => {
            to_json_binary(&query_user_contributions(deps, depositor)?)
        }
        QueryMsg::TotalContribution { token } => {
            let token = deps.api.addr_validate(&token)?;
            to_json_binary(&get_total_contribution(deps.storage, &token)?)
        }
        QueryMsg::CustodyBalance { token } => {
            let token = deps.api.addr_validate(&token)?;
            to_json_binary(&cw20::query_balance(
                &deps.querier,
                &token,
                &env.contract.address,
            )?)
        }
        QueryMsg::CustodyBalances {} => to_json_binary(&query_custody_balances(deps, &env)?),
    }
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    Ok(ConfigResponse {
        config: load_config(deps.storage)?,
    })
}

pub fn query_user_contributions(
    deps: Deps,
    depositor: String,
) -> StdResult<UserContributionsResponse> {
    let depositor = deps.api.addr_validate(&depositor)?;

    let contributions = get_user_contributions(deps.storage, &depositor)?
        .into_iter()
        .map(|(token, amount)| TokenAmount { token, amount })
        .collect();

    Ok(UserContributionsResponse { contributions })
}

pub fn query_custody_balances(deps: Deps, env: &Env) -> StdResult<CustodyBalancesResponse> {
    let balances = load_allowed_tokens(deps.storage)?
        .into_iter()
        .map(|token| {
            cw20::query_balance(&deps.querier, &token, &env.contract.address)
                .map(|amount| TokenAmount { token, amount })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(CustodyBalancesResponse { balances })
}
