use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
    Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::helpers::{nonzero, reject_funds, validate_symbol, MAX_CLASS_DECIMALS};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{
    Config, ACTIVITY_SEQ, BASE_SUPPLY, CLASS_COUNT, CONFIG, GRANT_COUNT, ONBOARDING_POOL, RESERVE,
    TOTAL_COLLATERAL, TOTAL_GRANTED,
};
use crate::{exchange, governor, ledger, points, registry};

const CONTRACT_NAME: &str = "crates.io:hns-game-ecosystem";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ─── Instantiate ────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    reject_funds(&info)?;
    validate_symbol(&msg.base_symbol)?;
    if msg.base_decimals > MAX_CLASS_DECIMALS {
        return Err(ContractError::InvalidDecimals {
            decimals: msg.base_decimals,
            max: MAX_CLASS_DECIMALS,
        });
    }
    nonzero(msg.onboarding_amount)?;

    let admin = match msg.admin {
        Some(admin) => deps.api.addr_validate(&admin)?,
        None => info.sender,
    };

    let config = Config {
        base_symbol: msg.base_symbol,
        base_decimals: msg.base_decimals,
        onboarding_amount: msg.onboarding_amount,
        metadata_uri: msg.metadata_uri,
    };
    CONFIG.save(deps.storage, &config)?;
    governor::initialize(deps.storage, &admin)?;

    BASE_SUPPLY.save(deps.storage, &Uint128::zero())?;
    ONBOARDING_POOL.save(deps.storage, &Uint128::zero())?;
    TOTAL_GRANTED.save(deps.storage, &Uint128::zero())?;
    GRANT_COUNT.save(deps.storage, &0u64)?;
    CLASS_COUNT.save(deps.storage, &0u64)?;
    TOTAL_COLLATERAL.save(deps.storage, &Uint128::zero())?;
    RESERVE.save(deps.storage, &Uint128::zero())?;
    ACTIVITY_SEQ.save(deps.storage, &0u64)?;

    if !msg.initial_base_supply.is_zero() {
        ledger::mint_base(deps.storage, &admin, msg.initial_base_supply)?;
    }
    if !msg.onboarding_pool.is_zero() {
        ledger::mint_to_pool(deps.storage, msg.onboarding_pool)?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("contract", CONTRACT_NAME)
        .add_attribute("admin", admin.as_str())
        .add_attribute("base_symbol", config.base_symbol)
        .add_attribute("initial_base_supply", msg.initial_base_supply.to_string())
        .add_attribute("onboarding_pool", msg.onboarding_pool.to_string()))
}

// ─── Execute ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::GrantRole { role, holder } => {
            governor::execute_grant_role(deps, info, role, holder)
        }
        ExecuteMsg::RevokeRole { role, holder } => {
            governor::execute_revoke_role(deps, info, role, holder)
        }
        ExecuteMsg::Pause {} => governor::execute_pause(deps, info),
        ExecuteMsg::Resume {} => governor::execute_resume(deps, info),

        ExecuteMsg::GrantOnboarding { holder } => {
            ledger::execute_grant_onboarding(deps, info, holder)
        }
        ExecuteMsg::BatchGrantOnboarding { holders } => {
            ledger::execute_batch_grant_onboarding(deps, info, holders)
        }
        ExecuteMsg::FundOnboardingPool { amount } => {
            ledger::execute_fund_onboarding_pool(deps, info, amount)
        }
        ExecuteMsg::Transfer {
            class_id,
            recipient,
            amount,
        } => ledger::execute_transfer(deps, info, class_id, recipient, amount),
        ExecuteMsg::Mint { recipient, amount } => {
            ledger::execute_mint(deps, info, recipient, amount)
        }

        ExecuteMsg::CreateAssetClass {
            collateral,
            name,
            symbol,
            decimals,
        } => registry::execute_create_asset_class(
            deps, env, info, collateral, name, symbol, decimals,
        ),
        ExecuteMsg::SetAssetClassActive { class_id, active } => {
            registry::execute_set_asset_class_active(deps, info, class_id, active)
        }
        ExecuteMsg::SetMetadataUri { uri } => registry::execute_set_metadata_uri(deps, info, uri),

        ExecuteMsg::DepositForClassTokens {
            class_id,
            base_amount,
        } => exchange::execute_deposit(deps, env, info, class_id, base_amount),
        ExecuteMsg::BurnForBase {
            class_id,
            burn_amount,
        } => exchange::execute_burn(deps, env, info, class_id, burn_amount),
        ExecuteMsg::EmergencyWithdraw { recipient, amount } => {
            exchange::execute_emergency_withdraw(deps, env, info, recipient, amount)
        }

        ExecuteMsg::SetPointValue {
            class_id,
            action,
            points,
        } => points::execute_set_point_value(deps, info, class_id, action, points),
        ExecuteMsg::SetPointValuesBatch {
            class_id,
            actions,
            points,
        } => points::execute_set_point_values_batch(deps, info, class_id, actions, points),
        ExecuteMsg::RecordActivity {
            class_id,
            holder,
            action,
        } => points::execute_record_activity(deps, env, info, class_id, holder, action),
        ExecuteMsg::RecordActivityBatch {
            class_id,
            holder,
            actions,
        } => points::execute_record_activity_batch(deps, env, info, class_id, holder, actions),
        ExecuteMsg::RedeemPoints {
            class_id,
            holder,
            points,
        } => points::execute_redeem_points(deps, info, class_id, holder, points),
    }
}

// ─── Queries ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query_config(deps),

        QueryMsg::HasRole { role, holder } => governor::query_has_role(deps, role, holder),
        QueryMsg::RoleMembers {
            role,
            start_after,
            limit,
        } => governor::query_role_members(deps, role, start_after, limit),
        QueryMsg::IsPaused {} => governor::query_is_paused(deps),

        QueryMsg::Balance { holder, class_id } => ledger::query_balance(deps, holder, class_id),
        QueryMsg::Balances { holder } => ledger::query_balances(deps, holder),
        QueryMsg::GrantStats {} => ledger::query_grant_stats(deps),
        QueryMsg::HasReceivedGrant { holder } => ledger::query_has_received_grant(deps, holder),

        QueryMsg::AssetClass { class_id } => registry::query_asset_class(deps, class_id),
        QueryMsg::AllClassIds { start_after, limit } => {
            registry::query_all_class_ids(deps, start_after, limit)
        }
        QueryMsg::ClassIdByName { name } => registry::query_class_id_by_name(deps, name),
        QueryMsg::TokenUri { class_id } => registry::query_token_uri(deps, class_id),

        QueryMsg::CalculateReturn {
            class_id,
            burn_amount,
        } => exchange::query_calculate_return(deps, class_id, burn_amount),
        QueryMsg::PreviewDeposit {
            class_id,
            base_amount,
        } => exchange::query_preview_deposit(deps, class_id, base_amount),
        QueryMsg::Reserves {} => exchange::query_reserves(deps, env),

        QueryMsg::PointValue { class_id, action } => {
            points::query_point_value(deps, class_id, action)
        }
        QueryMsg::PointsSummary { holder } => points::query_points_summary(deps, holder),
        QueryMsg::PointsRecord { holder, class_id } => {
            points::query_points_record(deps, holder, class_id)
        }
        QueryMsg::ActivityLog {
            holder,
            class_id,
            start_after,
            limit,
        } => points::query_activity_log(deps, holder, class_id, start_after, limit),
    }
}

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    to_json_binary(&CONFIG.load(deps.storage)?)
}

// ─── Migrate ────────────────────────────────────────────────────────────────

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
