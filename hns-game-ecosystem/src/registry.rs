//! Asset Registry: catalog of game classes and their locked collateral.

use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response, StdResult,
    Storage, Uint128,
};
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::governor::{assert_not_paused, assert_role};
use crate::helpers::{
    clamp_limit, initial_supply_for, nonzero, reject_funds, validate_name, validate_symbol,
    MAX_CLASS_DECIMALS,
};
use crate::ledger::{self, ensure_balance};
use crate::msg::{ClassIdsResponse, TokenUriResponse};
use crate::state::{
    GameClass, Role, BASE_CLASS_ID, CLASSES, CLASS_COUNT, CLASS_NAMES, CONFIG, TOTAL_COLLATERAL,
};

pub fn load_class(storage: &dyn Storage, class_id: u64) -> Result<GameClass, ContractError> {
    CLASSES
        .may_load(storage, class_id)?
        .ok_or(ContractError::UnknownClass { class_id })
}

pub fn load_active_class(storage: &dyn Storage, class_id: u64) -> Result<GameClass, ContractError> {
    let class = load_class(storage, class_id)?;
    if !class.active {
        return Err(ContractError::ClassInactive { class_id });
    }
    Ok(class)
}

pub fn total_collateral(storage: &dyn Storage) -> StdResult<Uint128> {
    Ok(TOTAL_COLLATERAL.may_load(storage)?.unwrap_or_default())
}

// ─── Execute ────────────────────────────────────────────────────────────────

pub fn execute_create_asset_class(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    collateral: Uint128,
    name: String,
    symbol: String,
    decimals: u8,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_role(deps.as_ref(), Role::AssetCreator, &info.sender)?;
    if CLASS_NAMES.has(deps.storage, &name) {
        return Err(ContractError::DuplicateName { name });
    }
    nonzero(collateral)?;
    validate_name(&name)?;
    validate_symbol(&symbol)?;
    if decimals > MAX_CLASS_DECIMALS {
        return Err(ContractError::InvalidDecimals {
            decimals,
            max: MAX_CLASS_DECIMALS,
        });
    }

    let config = CONFIG.load(deps.storage)?;
    let initial_supply = initial_supply_for(collateral, config.base_decimals, decimals)?;
    ensure_balance(deps.storage, &info.sender, BASE_CLASS_ID, collateral)?;
    let locked = total_collateral(deps.storage)?
        .checked_add(collateral)
        .map_err(|_| ContractError::Overflow)?;

    let class_id = CLASS_COUNT.may_load(deps.storage)?.unwrap_or(0) + 1;
    let class = GameClass {
        id: class_id,
        name: name.clone(),
        symbol: symbol.clone(),
        decimals,
        creator: info.sender.clone(),
        collateral_locked: collateral,
        initial_supply,
        current_supply: initial_supply,
        minted_via_deposits: Uint128::zero(),
        minted_via_points: Uint128::zero(),
        burned: Uint128::zero(),
        active: true,
        created_at: env.block.time,
    };

    ledger::transfer(
        deps.storage,
        BASE_CLASS_ID,
        &info.sender,
        &env.contract.address,
        collateral,
    )?;
    ledger::credit(deps.storage, &info.sender, class_id, initial_supply)?;
    CLASSES.save(deps.storage, class_id, &class)?;
    CLASS_NAMES.save(deps.storage, &name, &class_id)?;
    CLASS_COUNT.save(deps.storage, &class_id)?;
    TOTAL_COLLATERAL.save(deps.storage, &locked)?;

    Ok(Response::new()
        .add_attribute("action", "create_asset_class")
        .add_attribute("class_id", class_id.to_string())
        .add_attribute("creator", info.sender.as_str())
        .add_attribute("name", name)
        .add_attribute("symbol", symbol)
        .add_attribute("decimals", decimals.to_string())
        .add_attribute("collateral_locked", collateral.to_string())
        .add_attribute("initial_supply", initial_supply.to_string()))
}

pub fn execute_set_asset_class_active(
    deps: DepsMut,
    info: MessageInfo,
    class_id: u64,
    active: bool,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_role(deps.as_ref(), Role::Admin, &info.sender)?;

    let mut class = load_class(deps.storage, class_id)?;
    class.active = active;
    CLASSES.save(deps.storage, class_id, &class)?;

    Ok(Response::new()
        .add_attribute("action", "set_asset_class_active")
        .add_attribute("class_id", class_id.to_string())
        .add_attribute("active", active.to_string()))
}

pub fn execute_set_metadata_uri(
    deps: DepsMut,
    info: MessageInfo,
    uri: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_role(deps.as_ref(), Role::Admin, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.metadata_uri = uri.clone();
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_metadata_uri")
        .add_attribute("uri", uri))
}

// ─── Queries ────────────────────────────────────────────────────────────────

pub fn query_asset_class(deps: Deps, class_id: u64) -> StdResult<Binary> {
    let class = load_class(deps.storage, class_id)
        .map_err(|e| cosmwasm_std::StdError::generic_err(e.to_string()))?;
    to_json_binary(&class)
}

/// Ids in creation order. Each call is an independent page; resume with the
/// last id seen as `start_after`.
pub fn query_all_class_ids(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = clamp_limit(limit);
    let ids = CLASSES
        .keys(
            deps.storage,
            start_after.map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&ClassIdsResponse { ids })
}

pub fn query_class_id_by_name(deps: Deps, name: String) -> StdResult<Binary> {
    to_json_binary(&CLASS_NAMES.may_load(deps.storage, &name)?)
}

pub fn query_token_uri(deps: Deps, class_id: u64) -> StdResult<Binary> {
    load_class(deps.storage, class_id)
        .map_err(|e| cosmwasm_std::StdError::generic_err(e.to_string()))?;
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&TokenUriResponse {
        uri: format!("{}{}.json", config.metadata_uri, class_id),
    })
}
