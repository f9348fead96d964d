//! Access Governor: flat role table plus the global pause flag.
//!
//! Every mutating handler elsewhere starts with [`assert_not_paused`] and
//! [`assert_role`] before touching any other state.

use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, MessageInfo, Order, Response, StdResult,
    Storage,
};
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::helpers::{clamp_limit, reject_funds};
use crate::msg::{HasRoleResponse, IsPausedResponse, RoleMembersResponse};
use crate::state::{Role, PAUSED, ROLE_MEMBERS};

/// Pure capability check: does `holder` carry `role`?
pub fn authorize(storage: &dyn Storage, role: Role, holder: &Addr) -> StdResult<bool> {
    Ok(ROLE_MEMBERS
        .may_load(storage, (role.as_str(), holder))?
        .unwrap_or(false))
}

pub fn assert_role(deps: Deps, role: Role, sender: &Addr) -> Result<(), ContractError> {
    if !authorize(deps.storage, role, sender)? {
        return Err(ContractError::Unauthorized {
            role: role.as_str().to_string(),
        });
    }
    Ok(())
}

pub fn is_paused(storage: &dyn Storage) -> StdResult<bool> {
    Ok(PAUSED.may_load(storage)?.unwrap_or(false))
}

pub fn assert_not_paused(deps: Deps) -> Result<(), ContractError> {
    if is_paused(deps.storage)? {
        return Err(ContractError::Paused);
    }
    Ok(())
}

/// Bootstrap: the admin starts with every role and the system starts Active.
pub fn initialize(storage: &mut dyn Storage, admin: &Addr) -> StdResult<()> {
    for role in Role::all() {
        ROLE_MEMBERS.save(storage, (role.as_str(), admin), &true)?;
    }
    PAUSED.save(storage, &false)
}

// ─── Execute ────────────────────────────────────────────────────────────────

pub fn execute_grant_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    holder: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_role(deps.as_ref(), Role::Admin, &info.sender)?;

    let holder = deps.api.addr_validate(&holder)?;
    ROLE_MEMBERS.save(deps.storage, (role.as_str(), &holder), &true)?;

    Ok(Response::new()
        .add_attribute("action", "grant_role")
        .add_attribute("role", role.as_str())
        .add_attribute("holder", holder.as_str())
        .add_attribute("sender", info.sender.as_str()))
}

pub fn execute_revoke_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    holder: String,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_role(deps.as_ref(), Role::Admin, &info.sender)?;

    let holder = deps.api.addr_validate(&holder)?;
    ROLE_MEMBERS.remove(deps.storage, (role.as_str(), &holder));

    Ok(Response::new()
        .add_attribute("action", "revoke_role")
        .add_attribute("role", role.as_str())
        .add_attribute("holder", holder.as_str())
        .add_attribute("sender", info.sender.as_str()))
}

pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_role(deps.as_ref(), Role::Pauser, &info.sender)?;

    if is_paused(deps.storage)? {
        return Err(ContractError::AlreadyPaused);
    }
    PAUSED.save(deps.storage, &true)?;

    Ok(Response::new()
        .add_attribute("action", "pause")
        .add_attribute("sender", info.sender.as_str()))
}

pub fn execute_resume(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_role(deps.as_ref(), Role::Pauser, &info.sender)?;

    if !is_paused(deps.storage)? {
        return Err(ContractError::NotPaused);
    }
    PAUSED.save(deps.storage, &false)?;

    Ok(Response::new()
        .add_attribute("action", "resume")
        .add_attribute("sender", info.sender.as_str()))
}

// ─── Queries ────────────────────────────────────────────────────────────────

pub fn query_has_role(deps: Deps, role: Role, holder: String) -> StdResult<Binary> {
    let holder = deps.api.addr_validate(&holder)?;
    to_json_binary(&HasRoleResponse {
        has_role: authorize(deps.storage, role, &holder)?,
    })
}

pub fn query_role_members(
    deps: Deps,
    role: Role,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = clamp_limit(limit);
    let start = start_after
        .map(|s| deps.api.addr_validate(&s))
        .transpose()?;
    let members = ROLE_MEMBERS
        .prefix(role.as_str())
        .keys(deps.storage, start.as_ref().map(Bound::exclusive), None, Order::Ascending)
        .take(limit)
        .map(|k| k.map(|addr| addr.to_string()))
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&RoleMembersResponse { role, members })
}

pub fn query_is_paused(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&IsPausedResponse {
        paused: is_paused(deps.storage)?,
    })
}
