use cosmwasm_schema::cw_serde;
use cosmwasm_std::{DepsMut, Env, Response, Storage};
use cw2::{get_contract_version, set_contract_version};
// entry_point is being used but for some reason clippy doesn't see that, hence the allow attribute here
#[allow(unused_imports)]
use cosmwasm_std::entry_point;

use crate::contract::{CONTRACT_NAME, CONTRACT_VERSION};
use crate::error::{new_generic_error, ContractError};

#[cw_serde]
pub struct MigrateMsg {}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let previous_version = check_contract_version(deps.storage)?;

    // No state migrations needed yet. Fields added to stored structs later on
    // must either get their own Item/Map or be marked #[serde(default)].

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("previous_version", previous_version)
        .add_attribute("new_version", CONTRACT_VERSION))
}

fn check_contract_version(storage: &dyn Storage) -> Result<String, ContractError> {
    let contract_version = get_contract_version(storage)?;

    if contract_version.contract != CONTRACT_NAME {
        return Err(new_generic_error(format!(
            "Cannot migrate from a different contract: {}",
            contract_version.contract
        )));
    }

    if contract_version.version == CONTRACT_VERSION {
        return Err(new_generic_error(
            "Contract is already migrated to the newest version.",
        ));
    }

    Ok(contract_version.version)
}
