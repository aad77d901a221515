use contribution_vault::{
    migration::migrate::MigrateMsg,
    msg::{ExecuteMsg, InstantiateMsg},
    query::QueryMsg,
};
use cosmwasm_schema::write_api;

fn main() {
    write_api! {
        instantiate: InstantiateMsg,
        execute: ExecuteMsg,
        query: QueryMsg,
        migrate: MigrateMsg,
    };
}
