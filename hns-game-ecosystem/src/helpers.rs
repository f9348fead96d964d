use cosmwasm_std::{MessageInfo, Uint128};

use crate::error::ContractError;
use crate::state::GameClass;

pub const MAX_CLASS_DECIMALS: u8 = 18;
pub const MAX_NAME_LEN: usize = 64;
pub const MAX_SYMBOL_LEN: usize = 16;
pub const MAX_ACTION_LEN: usize = 64;
pub const MAX_BATCH_SIZE: usize = 50;
pub const DEFAULT_QUERY_LIMIT: u32 = 30;
pub const MAX_QUERY_LIMIT: u32 = 100;

/// Balances are bookkept internally; native coins attached to a message are a mistake.
pub fn reject_funds(info: &MessageInfo) -> Result<(), ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds);
    }
    Ok(())
}

pub fn nonzero(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    Ok(())
}

pub fn clamp_limit(limit: Option<u32>) -> usize {
    limit.unwrap_or(DEFAULT_QUERY_LIMIT).min(MAX_QUERY_LIMIT) as usize
}

pub fn validate_name(name: &str) -> Result<(), ContractError> {
    if name.trim().is_empty() || name.len() > MAX_NAME_LEN {
        return Err(ContractError::InvalidName { max: MAX_NAME_LEN });
    }
    Ok(())
}

pub fn validate_symbol(symbol: &str) -> Result<(), ContractError> {
    if symbol.trim().is_empty() || symbol.len() > MAX_SYMBOL_LEN {
        return Err(ContractError::InvalidSymbol {
            max: MAX_SYMBOL_LEN,
        });
    }
    Ok(())
}

pub fn validate_action(action: &str) -> Result<(), ContractError> {
    if action.is_empty() || action.len() > MAX_ACTION_LEN {
        return Err(ContractError::InvalidAction {
            max: MAX_ACTION_LEN,
        });
    }
    Ok(())
}

pub fn validate_batch_len(len: usize) -> Result<(), ContractError> {
    if len == 0 {
        return Err(ContractError::EmptyBatch);
    }
    if len > MAX_BATCH_SIZE {
        return Err(ContractError::BatchTooLarge {
            max: MAX_BATCH_SIZE,
        });
    }
    Ok(())
}

/// Initial supply minted for a new class: the collateral re-expressed in the
/// class's decimal precision. Equal decimals give a rate of exactly 1.
pub fn initial_supply_for(
    collateral: Uint128,
    base_decimals: u8,
    class_decimals: u8,
) -> Result<Uint128, ContractError> {
    let supply = if class_decimals >= base_decimals {
        let scale = Uint128::new(10)
            .checked_pow(u32::from(class_decimals - base_decimals))
            .map_err(|_| ContractError::Overflow)?;
        collateral
            .checked_mul(scale)
            .map_err(|_| ContractError::Overflow)?
    } else {
        let scale = Uint128::new(10)
            .checked_pow(u32::from(base_decimals - class_decimals))
            .map_err(|_| ContractError::Overflow)?;
        collateral
            .checked_div(scale)
            .map_err(|_| ContractError::Overflow)?
    };
    if supply.is_zero() {
        return Err(ContractError::ZeroInitialSupply);
    }
    Ok(supply)
}

/// Class tokens minted for a base deposit:
/// floor(base_amount * initial_supply / collateral_locked).
/// The product is taken at 256-bit width before dividing.
pub fn class_tokens_for_deposit(
    base_amount: Uint128,
    class: &GameClass,
) -> Result<Uint128, ContractError> {
    base_amount
        .checked_multiply_ratio(class.initial_supply, class.collateral_locked)
        .map_err(|_| ContractError::Overflow)
}

/// Base asset returned for burning class tokens:
/// floor(burn_amount * collateral_locked / initial_supply).
pub fn base_return_for_burn(
    burn_amount: Uint128,
    class: &GameClass,
) -> Result<Uint128, ContractError> {
    burn_amount
        .checked_multiply_ratio(class.collateral_locked, class.initial_supply)
        .map_err(|_| ContractError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::{Addr, Timestamp};

    fn class(collateral: u128, supply: u128) -> GameClass {
        GameClass {
            id: 1,
            name: "Shooter Game".to_string(),
            symbol: "ST".to_string(),
            decimals: 18,
            creator: Addr::unchecked("creator"),
            collateral_locked: Uint128::new(collateral),
            initial_supply: Uint128::new(supply),
            current_supply: Uint128::new(supply),
            minted_via_deposits: Uint128::zero(),
            minted_via_points: Uint128::zero(),
            burned: Uint128::zero(),
            active: true,
            created_at: Timestamp::from_seconds(0),
        }
    }

    #[test]
    fn initial_supply_scales_with_decimals() {
        let c = Uint128::new(100);
        assert_eq!(initial_supply_for(c, 18, 18).unwrap(), Uint128::new(100));
        assert_eq!(initial_supply_for(c, 6, 8).unwrap(), Uint128::new(10_000));
        assert_eq!(initial_supply_for(c, 8, 6).unwrap(), Uint128::new(1));
        assert_eq!(
            initial_supply_for(c, 18, 0).unwrap_err(),
            ContractError::ZeroInitialSupply
        );
    }

    #[test]
    fn deposit_rounds_down() {
        // rate 3/2: 1.5 base per class token
        let c = class(3, 2);
        assert_eq!(
            class_tokens_for_deposit(Uint128::new(4), &c).unwrap(),
            Uint128::new(2)
        );
        assert_eq!(
            class_tokens_for_deposit(Uint128::new(1), &c).unwrap(),
            Uint128::zero()
        );
        assert_eq!(
            base_return_for_burn(Uint128::new(3), &c).unwrap(),
            Uint128::new(4)
        );
    }

    #[test]
    fn large_amounts_do_not_overflow_intermediate_product() {
        let big = u128::MAX / 4;
        let c = class(big, big);
        assert_eq!(
            class_tokens_for_deposit(Uint128::new(big), &c).unwrap(),
            Uint128::new(big)
        );
    }
}
