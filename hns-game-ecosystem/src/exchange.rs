//! Exchange Engine: mint-on-deposit and burn-on-redeem between the base asset
//! and a game class, always at the class's fixed creation-time rate.
//!
//! Base asset received by the engine sits in the contract's own ledger account
//! (the vault) alongside every class's locked collateral. `RESERVE` tracks the
//! deposited share; anything above collateral + reserve is surplus, the only
//! part the emergency path may move.

use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
    Storage, Uint128,
};

use crate::error::ContractError;
use crate::governor::{assert_not_paused, assert_role};
use crate::helpers::{base_return_for_burn, class_tokens_for_deposit, nonzero, reject_funds};
use crate::ledger::{self, ensure_balance, vault_balance};
use crate::msg::{ConversionResponse, ReservesResponse};
use crate::registry::{load_active_class, load_class, total_collateral};
use crate::state::{Role, BASE_CLASS_ID, CLASSES, RESERVE};

pub fn reserve(storage: &dyn Storage) -> StdResult<Uint128> {
    Ok(RESERVE.may_load(storage)?.unwrap_or_default())
}

/// Base asset a burn may draw on: the reserve counter, capped by what the vault
/// actually holds beyond locked collateral.
fn available_backing(deps: Deps, env: &Env) -> StdResult<Uint128> {
    let unlocked = vault_balance(deps, env)?.saturating_sub(total_collateral(deps.storage)?);
    Ok(unlocked.min(reserve(deps.storage)?))
}

/// vault - collateral - reserve, floored at zero.
fn withdrawable_surplus(deps: Deps, env: &Env) -> StdResult<Uint128> {
    Ok(vault_balance(deps, env)?
        .saturating_sub(total_collateral(deps.storage)?)
        .saturating_sub(reserve(deps.storage)?))
}

pub fn calculate_return(
    storage: &dyn Storage,
    class_id: u64,
    burn_amount: Uint128,
) -> Result<Uint128, ContractError> {
    let class = load_class(storage, class_id)?;
    base_return_for_burn(burn_amount, &class)
}

// ─── Execute ────────────────────────────────────────────────────────────────

pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    class_id: u64,
    base_amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    nonzero(base_amount)?;

    let mut class = load_active_class(deps.storage, class_id)?;
    let minted = class_tokens_for_deposit(base_amount, &class)?;
    if minted.is_zero() {
        return Err(ContractError::ZeroMintAmount);
    }
    ensure_balance(deps.storage, &info.sender, BASE_CLASS_ID, base_amount)?;

    let new_reserve = reserve(deps.storage)?
        .checked_add(base_amount)
        .map_err(|_| ContractError::Overflow)?;
    class.current_supply = class
        .current_supply
        .checked_add(minted)
        .map_err(|_| ContractError::Overflow)?;
    class.minted_via_deposits = class
        .minted_via_deposits
        .checked_add(minted)
        .map_err(|_| ContractError::Overflow)?;

    ledger::transfer(
        deps.storage,
        BASE_CLASS_ID,
        &info.sender,
        &env.contract.address,
        base_amount,
    )?;
    let class_balance = ledger::credit(deps.storage, &info.sender, class_id, minted)?;
    CLASSES.save(deps.storage, class_id, &class)?;
    RESERVE.save(deps.storage, &new_reserve)?;

    Ok(Response::new()
        .add_attribute("action", "deposit_for_class_tokens")
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("class_id", class_id.to_string())
        .add_attribute("base_amount", base_amount.to_string())
        .add_attribute("minted", minted.to_string())
        .add_attribute("class_balance", class_balance.to_string())
        .add_attribute("current_supply", class.current_supply.to_string())
        .add_attribute("reserve", new_reserve.to_string()))
}

pub fn execute_burn(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    class_id: u64,
    burn_amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    nonzero(burn_amount)?;

    // Inactive classes still honour burns so holders can exit.
    let mut class = load_class(deps.storage, class_id)?;
    ensure_balance(deps.storage, &info.sender, class_id, burn_amount)?;
    let returned = base_return_for_burn(burn_amount, &class)?;
    if returned.is_zero() {
        return Err(ContractError::ZeroReturnAmount);
    }

    let backing = available_backing(deps.as_ref(), &env)?;
    if returned > backing {
        return Err(ContractError::InsufficientBacking {
            needed: returned.to_string(),
            available: backing.to_string(),
        });
    }

    let new_reserve = reserve(deps.storage)? - returned;
    class.current_supply = class
        .current_supply
        .checked_sub(burn_amount)
        .map_err(|_| ContractError::Overflow)?;
    class.burned = class
        .burned
        .checked_add(burn_amount)
        .map_err(|_| ContractError::Overflow)?;

    let class_balance = ledger::debit(deps.storage, &info.sender, class_id, burn_amount)?;
    ledger::transfer(
        deps.storage,
        BASE_CLASS_ID,
        &env.contract.address,
        &info.sender,
        returned,
    )?;
    CLASSES.save(deps.storage, class_id, &class)?;
    RESERVE.save(deps.storage, &new_reserve)?;

    Ok(Response::new()
        .add_attribute("action", "burn_for_base")
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("class_id", class_id.to_string())
        .add_attribute("burned", burn_amount.to_string())
        .add_attribute("base_returned", returned.to_string())
        .add_attribute("class_balance", class_balance.to_string())
        .add_attribute("current_supply", class.current_supply.to_string())
        .add_attribute("reserve", new_reserve.to_string()))
}

pub fn execute_emergency_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    // Not pause-gated: this is the path operators use while paused.
    assert_role(deps.as_ref(), Role::Emergency, &info.sender)?;
    nonzero(amount)?;

    let recipient = deps.api.addr_validate(&recipient)?;
    let surplus = withdrawable_surplus(deps.as_ref(), &env)?;
    if amount > surplus {
        return Err(ContractError::SurplusExceeded {
            available: surplus.to_string(),
        });
    }
    ledger::transfer(
        deps.storage,
        BASE_CLASS_ID,
        &env.contract.address,
        &recipient,
        amount,
    )?;

    Ok(Response::new()
        .add_attribute("action", "emergency_withdraw")
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("recipient", recipient.as_str())
        .add_attribute("amount", amount.to_string())
        .add_attribute("remaining_surplus", (surplus - amount).to_string()))
}

// ─── Queries ────────────────────────────────────────────────────────────────

pub fn query_calculate_return(
    deps: Deps,
    class_id: u64,
    burn_amount: Uint128,
) -> StdResult<Binary> {
    let base_amount = calculate_return(deps.storage, class_id, burn_amount)
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&ConversionResponse {
        class_id,
        base_amount,
        class_amount: burn_amount,
    })
}

pub fn query_preview_deposit(
    deps: Deps,
    class_id: u64,
    base_amount: Uint128,
) -> StdResult<Binary> {
    let class_amount = load_class(deps.storage, class_id)
        .and_then(|class| class_tokens_for_deposit(base_amount, &class))
        .map_err(|e| StdError::generic_err(e.to_string()))?;
    to_json_binary(&ConversionResponse {
        class_id,
        base_amount,
        class_amount,
    })
}

pub fn query_reserves(deps: Deps, env: Env) -> StdResult<Binary> {
    to_json_binary(&ReservesResponse {
        reserve: reserve(deps.storage)?,
        total_collateral: total_collateral(deps.storage)?,
        vault_balance: vault_balance(deps, &env)?,
        surplus: withdrawable_surplus(deps, &env)?,
    })
}
