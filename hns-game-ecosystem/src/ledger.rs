//! Balance book for the base asset and every game class, plus the one-shot
//! onboarding grants paid out of a dedicated pool.
//!
//! Other components move funds only through [`transfer`], [`credit`] and
//! [`debit`]; none of them touch `BALANCES` directly.

use std::collections::BTreeSet;

use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response, StdResult,
    Storage, Uint128,
};

use crate::error::ContractError;
use crate::governor::{assert_not_paused, assert_role};
use crate::helpers::{nonzero, reject_funds, validate_batch_len};
use crate::msg::{BalanceResponse, BalancesResponse, GrantStatsResponse, HasReceivedGrantResponse};
use crate::registry::load_class;
use crate::state::{
    Role, BALANCES, BASE_CLASS_ID, BASE_SUPPLY, CONFIG, GRANTED, GRANT_COUNT, ONBOARDING_POOL,
    TOTAL_GRANTED,
};

pub fn balance_of(storage: &dyn Storage, holder: &Addr, class_id: u64) -> StdResult<Uint128> {
    Ok(BALANCES
        .may_load(storage, (holder, class_id))?
        .unwrap_or_default())
}

/// Fails with `InsufficientBalance` unless `holder` owns at least `amount`.
pub fn ensure_balance(
    storage: &dyn Storage,
    holder: &Addr,
    class_id: u64,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let balance = balance_of(storage, holder, class_id)?;
    if balance < amount {
        return Err(ContractError::InsufficientBalance {
            class_id,
            balance: balance.to_string(),
            required: amount.to_string(),
        });
    }
    Ok(balance)
}

pub fn credit(
    storage: &mut dyn Storage,
    holder: &Addr,
    class_id: u64,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let balance = balance_of(storage, holder, class_id)?
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow)?;
    BALANCES.save(storage, (holder, class_id), &balance)?;
    Ok(balance)
}

pub fn debit(
    storage: &mut dyn Storage,
    holder: &Addr,
    class_id: u64,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let balance = ensure_balance(storage, holder, class_id, amount)? - amount;
    BALANCES.save(storage, (holder, class_id), &balance)?;
    Ok(balance)
}

/// Moves `amount` of `class_id` between holders. Both new balances are computed
/// before either is written, so a failure leaves storage untouched.
pub fn transfer(
    storage: &mut dyn Storage,
    class_id: u64,
    from: &Addr,
    to: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let from_balance = ensure_balance(storage, from, class_id, amount)?;
    if from == to {
        return Ok(());
    }
    let to_balance = balance_of(storage, to, class_id)?
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow)?;
    BALANCES.save(storage, (from, class_id), &(from_balance - amount))?;
    BALANCES.save(storage, (to, class_id), &to_balance)?;
    Ok(())
}

/// Unconditional base-asset issuance.
pub fn mint_base(storage: &mut dyn Storage, to: &Addr, amount: Uint128) -> Result<(), ContractError> {
    let supply = BASE_SUPPLY
        .may_load(storage)?
        .unwrap_or_default()
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow)?;
    credit(storage, to, BASE_CLASS_ID, amount)?;
    BASE_SUPPLY.save(storage, &supply)?;
    Ok(())
}

/// Base-asset issuance straight into the onboarding pool.
pub fn mint_to_pool(storage: &mut dyn Storage, amount: Uint128) -> Result<(), ContractError> {
    let supply = BASE_SUPPLY
        .may_load(storage)?
        .unwrap_or_default()
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow)?;
    let pool = ONBOARDING_POOL
        .may_load(storage)?
        .unwrap_or_default()
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow)?;
    ONBOARDING_POOL.save(storage, &pool)?;
    BASE_SUPPLY.save(storage, &supply)?;
    Ok(())
}

// ─── Execute: Transfers & Mint ──────────────────────────────────────────────

pub fn execute_transfer(
    deps: DepsMut,
    info: MessageInfo,
    class_id: u64,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    nonzero(amount)?;

    if class_id != BASE_CLASS_ID {
        load_class(deps.storage, class_id)?;
    }
    let recipient = deps.api.addr_validate(&recipient)?;
    transfer(deps.storage, class_id, &info.sender, &recipient, amount)?;

    Ok(Response::new()
        .add_attribute("action", "transfer")
        .add_attribute("class_id", class_id.to_string())
        .add_attribute("from", info.sender.as_str())
        .add_attribute("to", recipient.as_str())
        .add_attribute("amount", amount.to_string()))
}

pub fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    // Privileged path: still role-gated, but not blocked by pause.
    assert_role(deps.as_ref(), Role::Minter, &info.sender)?;
    nonzero(amount)?;

    let recipient = deps.api.addr_validate(&recipient)?;
    mint_base(deps.storage, &recipient, amount)?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("to", recipient.as_str())
        .add_attribute("amount", amount.to_string())
        .add_attribute("base_supply", BASE_SUPPLY.load(deps.storage)?.to_string()))
}

// ─── Execute: Onboarding Grants ─────────────────────────────────────────────

pub fn execute_grant_onboarding(
    deps: DepsMut,
    info: MessageInfo,
    holder: Option<String>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let holder = match holder {
        Some(h) => deps.api.addr_validate(&h)?,
        None => info.sender.clone(),
    };
    let amount = CONFIG.load(deps.storage)?.onboarding_amount;
    pay_grants(deps.storage, &[holder.clone()], amount)?;

    Ok(Response::new()
        .add_attribute("action", "grant_onboarding")
        .add_attribute("holder", holder.as_str())
        .add_attribute("amount", amount.to_string())
        .add_attribute("sender", info.sender.as_str()))
}

pub fn execute_batch_grant_onboarding(
    deps: DepsMut,
    info: MessageInfo,
    holders: Vec<String>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_role(deps.as_ref(), Role::Distributor, &info.sender)?;
    validate_batch_len(holders.len())?;

    let holders = holders
        .iter()
        .map(|h| deps.api.addr_validate(h))
        .collect::<StdResult<Vec<_>>>()?;
    let amount = CONFIG.load(deps.storage)?.onboarding_amount;
    pay_grants(deps.storage, &holders, amount)?;

    let credited = holders
        .iter()
        .map(Addr::as_str)
        .collect::<Vec<_>>()
        .join(",");

    Ok(Response::new()
        .add_attribute("action", "batch_grant_onboarding")
        .add_attribute("count", holders.len().to_string())
        .add_attribute("holders", credited)
        .add_attribute("amount_each", amount.to_string())
        .add_attribute("sender", info.sender.as_str()))
}

/// Validates every holder and the pool first, then pays all of them.
fn pay_grants(
    storage: &mut dyn Storage,
    holders: &[Addr],
    amount: Uint128,
) -> Result<(), ContractError> {
    let mut seen = BTreeSet::new();
    for holder in holders {
        if !seen.insert(holder) {
            return Err(ContractError::DuplicateInBatch {
                holder: holder.to_string(),
            });
        }
        if GRANTED.has(storage, holder) {
            return Err(ContractError::AlreadyGranted {
                holder: holder.to_string(),
            });
        }
    }

    let required = amount
        .checked_mul(Uint128::from(holders.len() as u128))
        .map_err(|_| ContractError::Overflow)?;
    let pool = ONBOARDING_POOL.may_load(storage)?.unwrap_or_default();
    if pool < required {
        return Err(ContractError::InsufficientPool {
            available: pool.to_string(),
            required: required.to_string(),
        });
    }
    let total = TOTAL_GRANTED
        .may_load(storage)?
        .unwrap_or_default()
        .checked_add(required)
        .map_err(|_| ContractError::Overflow)?;
    let count = GRANT_COUNT.may_load(storage)?.unwrap_or(0) + holders.len() as u64;
    let credited = holders
        .iter()
        .map(|holder| {
            balance_of(storage, holder, BASE_CLASS_ID)?
                .checked_add(amount)
                .map_err(|_| ContractError::Overflow)
        })
        .collect::<Result<Vec<_>, ContractError>>()?;

    for (holder, balance) in holders.iter().zip(credited) {
        BALANCES.save(storage, (holder, BASE_CLASS_ID), &balance)?;
        GRANTED.save(storage, holder, &true)?;
    }
    ONBOARDING_POOL.save(storage, &(pool - required))?;
    TOTAL_GRANTED.save(storage, &total)?;
    GRANT_COUNT.save(storage, &count)?;
    Ok(())
}

pub fn execute_fund_onboarding_pool(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    nonzero(amount)?;

    let pool = ONBOARDING_POOL
        .may_load(deps.storage)?
        .unwrap_or_default()
        .checked_add(amount)
        .map_err(|_| ContractError::Overflow)?;
    debit(deps.storage, &info.sender, BASE_CLASS_ID, amount)?;
    ONBOARDING_POOL.save(deps.storage, &pool)?;

    Ok(Response::new()
        .add_attribute("action", "fund_onboarding_pool")
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("amount", amount.to_string())
        .add_attribute("pool_balance", pool.to_string()))
}

// ─── Queries ────────────────────────────────────────────────────────────────

pub fn query_balance(deps: Deps, holder: String, class_id: u64) -> StdResult<Binary> {
    let holder = deps.api.addr_validate(&holder)?;
    to_json_binary(&BalanceResponse {
        class_id,
        balance: balance_of(deps.storage, &holder, class_id)?,
    })
}

pub fn query_balances(deps: Deps, holder: String) -> StdResult<Binary> {
    let holder = deps.api.addr_validate(&holder)?;
    let mut base_balance = Uint128::zero();
    let mut classes = vec![];
    for item in BALANCES
        .prefix(&holder)
        .range(deps.storage, None, None, Order::Ascending)
    {
        let (class_id, balance) = item?;
        if class_id == BASE_CLASS_ID {
            base_balance = balance;
        } else if !balance.is_zero() {
            classes.push(BalanceResponse { class_id, balance });
        }
    }

    to_json_binary(&BalancesResponse {
        base_balance,
        classes,
    })
}

pub fn query_grant_stats(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&GrantStatsResponse {
        grant_amount: CONFIG.load(deps.storage)?.onboarding_amount,
        grants: GRANT_COUNT.may_load(deps.storage)?.unwrap_or(0),
        total_granted: TOTAL_GRANTED.may_load(deps.storage)?.unwrap_or_default(),
        remaining_pool: ONBOARDING_POOL.may_load(deps.storage)?.unwrap_or_default(),
    })
}

pub fn query_has_received_grant(deps: Deps, holder: String) -> StdResult<Binary> {
    let holder = deps.api.addr_validate(&holder)?;
    to_json_binary(&HasReceivedGrantResponse {
        received: GRANTED.has(deps.storage, &holder),
    })
}

/// Base asset held by the contract itself (collateral + reserve + surplus).
pub fn vault_balance(deps: Deps, env: &Env) -> StdResult<Uint128> {
    balance_of(deps.storage, &env.contract.address, BASE_CLASS_ID)
}
