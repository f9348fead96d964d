//! Points Ledger: per-class activity point schedule, per-holder accrual,
//! an append-only activity log and 1:1 points-to-class-token redemption.

use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response, StdResult,
    Storage, Uint128,
};
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::governor::{assert_not_paused, assert_role};
use crate::helpers::{clamp_limit, nonzero, reject_funds, validate_action, validate_batch_len};
use crate::ledger::{self, balance_of};
use crate::msg::{
    ActivityLogEntry, ActivityLogResponse, PointValueResponse, PointsRecordResponse,
    PointsSummaryEntry, PointsSummaryResponse,
};
use crate::registry::{load_active_class, load_class};
use crate::state::{
    ActivityEntry, PointsRecord, Role, ACTIVITY_INDEX, ACTIVITY_LOG, ACTIVITY_SEQ, CLASSES,
    POINTS, POINT_VALUES,
};

pub fn point_value(storage: &dyn Storage, class_id: u64, action: &str) -> StdResult<Uint128> {
    Ok(POINT_VALUES
        .may_load(storage, (class_id, action))?
        .unwrap_or_default())
}

pub fn points_record(storage: &dyn Storage, holder: &Addr, class_id: u64) -> StdResult<PointsRecord> {
    Ok(POINTS
        .may_load(storage, (holder, class_id))?
        .unwrap_or_default())
}

// ─── Execute: Point Schedule ────────────────────────────────────────────────

pub fn execute_set_point_value(
    deps: DepsMut,
    info: MessageInfo,
    class_id: u64,
    action: String,
    points: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_role(deps.as_ref(), Role::ActivityManager, &info.sender)?;
    load_class(deps.storage, class_id)?;
    validate_action(&action)?;

    POINT_VALUES.save(deps.storage, (class_id, action.as_str()), &points)?;

    Ok(Response::new()
        .add_attribute("action", "set_point_value")
        .add_attribute("class_id", class_id.to_string())
        .add_attribute("activity", action)
        .add_attribute("points", points.to_string()))
}

pub fn execute_set_point_values_batch(
    deps: DepsMut,
    info: MessageInfo,
    class_id: u64,
    actions: Vec<String>,
    points: Vec<Uint128>,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_role(deps.as_ref(), Role::ActivityManager, &info.sender)?;
    if actions.len() != points.len() {
        return Err(ContractError::LengthMismatch {
            actions: actions.len(),
            points: points.len(),
        });
    }
    validate_batch_len(actions.len())?;
    load_class(deps.storage, class_id)?;
    for action in &actions {
        validate_action(action)?;
    }

    for (action, value) in actions.iter().zip(points.iter()) {
        POINT_VALUES.save(deps.storage, (class_id, action.as_str()), value)?;
    }
    let values = actions
        .iter()
        .zip(points.iter())
        .map(|(action, value)| format!("{action}={value}"))
        .collect::<Vec<_>>()
        .join(",");

    Ok(Response::new()
        .add_attribute("action", "set_point_values_batch")
        .add_attribute("class_id", class_id.to_string())
        .add_attribute("count", actions.len().to_string())
        .add_attribute("values", values))
}

// ─── Execute: Activity Recording ────────────────────────────────────────────

pub fn execute_record_activity(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    class_id: u64,
    holder: String,
    action: String,
) -> Result<Response, ContractError> {
    record_activities(deps, env, info, class_id, holder, vec![action], "record_activity")
}

pub fn execute_record_activity_batch(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    class_id: u64,
    holder: String,
    actions: Vec<String>,
) -> Result<Response, ContractError> {
    record_activities(deps, env, info, class_id, holder, actions, "record_activity_batch")
}

/// Shared path for single and batch recording. Every action is priced and
/// validated before the first log entry is written.
fn record_activities(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    class_id: u64,
    holder: String,
    actions: Vec<String>,
    event: &str,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;
    assert_role(deps.as_ref(), Role::ActivityManager, &info.sender)?;
    validate_batch_len(actions.len())?;
    load_active_class(deps.storage, class_id)?;
    let holder = deps.api.addr_validate(&holder)?;

    let mut awarded = Uint128::zero();
    let mut priced = Vec::with_capacity(actions.len());
    for action in actions {
        validate_action(&action)?;
        // Unconfigured actions are logged with zero points.
        let value = point_value(deps.storage, class_id, &action)?;
        awarded = awarded
            .checked_add(value)
            .map_err(|_| ContractError::Overflow)?;
        priced.push((action, value));
    }

    let mut record = points_record(deps.storage, &holder, class_id)?;
    record.earned = record
        .earned
        .checked_add(awarded)
        .map_err(|_| ContractError::Overflow)?;

    let mut seq = ACTIVITY_SEQ.may_load(deps.storage)?.unwrap_or(0);
    let entries = priced.len();
    for (action, points) in priced {
        seq += 1;
        let entry = ActivityEntry {
            holder: holder.clone(),
            class_id,
            action,
            points,
            timestamp: env.block.time,
        };
        ACTIVITY_LOG.save(deps.storage, seq, &entry)?;
        ACTIVITY_INDEX.save(deps.storage, (&holder, class_id, seq), &())?;
    }
    ACTIVITY_SEQ.save(deps.storage, &seq)?;
    POINTS.save(deps.storage, (&holder, class_id), &record)?;

    Ok(Response::new()
        .add_attribute("action", event)
        .add_attribute("class_id", class_id.to_string())
        .add_attribute("holder", holder.as_str())
        .add_attribute("entries", entries.to_string())
        .add_attribute("points_awarded", awarded.to_string())
        .add_attribute("earned", record.earned.to_string()))
}

// ─── Execute: Redemption ────────────────────────────────────────────────────

pub fn execute_redeem_points(
    deps: DepsMut,
    info: MessageInfo,
    class_id: u64,
    holder: Option<String>,
    points: Uint128,
) -> Result<Response, ContractError> {
    reject_funds(&info)?;
    assert_not_paused(deps.as_ref())?;

    let holder = match holder {
        Some(h) => deps.api.addr_validate(&h)?,
        None => info.sender.clone(),
    };
    if holder != info.sender {
        assert_role(deps.as_ref(), Role::ActivityManager, &info.sender)?;
    }
    nonzero(points)?;

    let mut class = load_active_class(deps.storage, class_id)?;
    let mut record = points_record(deps.storage, &holder, class_id)?;
    let available = record.available();
    if points > available {
        return Err(ContractError::InsufficientPoints {
            available: available.to_string(),
            requested: points.to_string(),
        });
    }

    record.redeemed += points;
    class.current_supply = class
        .current_supply
        .checked_add(points)
        .map_err(|_| ContractError::Overflow)?;
    class.minted_via_points = class
        .minted_via_points
        .checked_add(points)
        .map_err(|_| ContractError::Overflow)?;

    // 1 point mints 1 smallest unit, independent of the exchange rate.
    let class_balance = ledger::credit(deps.storage, &holder, class_id, points)?;
    POINTS.save(deps.storage, (&holder, class_id), &record)?;
    CLASSES.save(deps.storage, class_id, &class)?;

    Ok(Response::new()
        .add_attribute("action", "redeem_points")
        .add_attribute("class_id", class_id.to_string())
        .add_attribute("holder", holder.as_str())
        .add_attribute("points", points.to_string())
        .add_attribute("minted", points.to_string())
        .add_attribute("redeemed", record.redeemed.to_string())
        .add_attribute("available", record.available().to_string())
        .add_attribute("class_balance", class_balance.to_string()))
}

// ─── Queries ────────────────────────────────────────────────────────────────

pub fn query_point_value(deps: Deps, class_id: u64, action: String) -> StdResult<Binary> {
    to_json_binary(&PointValueResponse {
        points: point_value(deps.storage, class_id, &action)?,
    })
}

pub fn query_points_summary(deps: Deps, holder: String) -> StdResult<Binary> {
    let holder = deps.api.addr_validate(&holder)?;
    let entries = POINTS
        .prefix(&holder)
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            item.map(|(class_id, record)| PointsSummaryEntry {
                class_id,
                earned: record.earned,
                redeemed: record.redeemed,
                available: record.available(),
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&PointsSummaryResponse { entries })
}

pub fn query_points_record(deps: Deps, holder: String, class_id: u64) -> StdResult<Binary> {
    let holder = deps.api.addr_validate(&holder)?;
    let record = points_record(deps.storage, &holder, class_id)?;
    to_json_binary(&PointsRecordResponse {
        class_id,
        class_balance: balance_of(deps.storage, &holder, class_id)?,
        earned: record.earned,
        redeemed: record.redeemed,
        available: record.available(),
    })
}

/// Log entries for (holder, class) in insertion order. Pages are independent
/// reads; pass the last `seq` seen as `start_after` to continue.
pub fn query_activity_log(
    deps: Deps,
    holder: String,
    class_id: u64,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let holder = deps.api.addr_validate(&holder)?;
    let limit = clamp_limit(limit);
    let entries = ACTIVITY_INDEX
        .prefix((&holder, class_id))
        .keys(
            deps.storage,
            start_after.map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit)
        .map(|seq| {
            let seq = seq?;
            let entry = ACTIVITY_LOG.load(deps.storage, seq)?;
            Ok(ActivityLogEntry {
                seq,
                action: entry.action,
                points: entry.points,
                timestamp: entry.timestamp,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&ActivityLogResponse { entries })
}
