use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

/// Asset class id reserved for the base asset.
pub const BASE_CLASS_ID: u64 = 0;

#[cw_serde]
pub struct Config {
    /// Ticker of the base asset (e.g. "HNS")
    pub base_symbol: String,
    pub base_decimals: u8,
    /// Fixed amount credited by each onboarding grant
    pub onboarding_amount: Uint128,
    /// Prefix for per-class metadata documents
    pub metadata_uri: String,
}

#[cw_serde]
#[derive(Copy, Eq, PartialOrd, Ord)]
pub enum Role {
    /// Root role; administers every role including itself
    Admin,
    AssetCreator,
    ActivityManager,
    Pauser,
    Emergency,
    Minter,
    Distributor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::AssetCreator => "asset_creator",
            Role::ActivityManager => "activity_manager",
            Role::Pauser => "pauser",
            Role::Emergency => "emergency",
            Role::Minter => "minter",
            Role::Distributor => "distributor",
        }
    }

    pub fn all() -> [Role; 7] {
        [
            Role::Admin,
            Role::AssetCreator,
            Role::ActivityManager,
            Role::Pauser,
            Role::Emergency,
            Role::Minter,
            Role::Distributor,
        ]
    }
}

/// A per-game fungible asset class backed by locked base-asset collateral.
///
/// The exchange rate is `collateral_locked / initial_supply`; both sides are
/// fixed at creation so the rate never moves.
#[cw_serde]
pub struct GameClass {
    pub id: u64,
    /// Unique across every class ever created, case-sensitive
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub creator: Addr,
    pub collateral_locked: Uint128,
    pub initial_supply: Uint128,
    pub current_supply: Uint128,
    pub minted_via_deposits: Uint128,
    pub minted_via_points: Uint128,
    pub burned: Uint128,
    pub active: bool,
    pub created_at: Timestamp,
}

#[cw_serde]
#[derive(Default)]
pub struct PointsRecord {
    /// Never decreases
    pub earned: Uint128,
    /// Never decreases, never exceeds `earned`
    pub redeemed: Uint128,
}

impl PointsRecord {
    pub fn available(&self) -> Uint128 {
        self.earned.saturating_sub(self.redeemed)
    }
}

#[cw_serde]
pub struct ActivityEntry {
    pub holder: Addr,
    pub class_id: u64,
    pub action: String,
    pub points: Uint128,
    pub timestamp: Timestamp,
}

pub const CONFIG: Item<Config> = Item::new("config");

// ─── Access Governor ────────────────────────────────────────────────────────

pub const PAUSED: Item<bool> = Item::new("paused");

/// (role, holder) -> true
pub const ROLE_MEMBERS: Map<(&str, &Addr), bool> = Map::new("role_members");

// ─── Base Asset Ledger ──────────────────────────────────────────────────────

/// (holder, class_id) -> balance. Class 0 is the base asset.
pub const BALANCES: Map<(&Addr, u64), Uint128> = Map::new("balances");

/// Total base asset in existence, including the onboarding pool
pub const BASE_SUPPLY: Item<Uint128> = Item::new("base_supply");

/// Base asset set aside to fund onboarding grants
pub const ONBOARDING_POOL: Item<Uint128> = Item::new("onboarding_pool");

/// holder -> true once granted. Never removed.
pub const GRANTED: Map<&Addr, bool> = Map::new("granted");

pub const TOTAL_GRANTED: Item<Uint128> = Item::new("total_granted");

pub const GRANT_COUNT: Item<u64> = Item::new("grant_count");

// ─── Asset Registry ─────────────────────────────────────────────────────────

pub const CLASS_COUNT: Item<u64> = Item::new("class_count");

/// class_id -> GameClass
pub const CLASSES: Map<u64, GameClass> = Map::new("classes");

/// Name reservation index: name -> class_id. Survives deactivation.
pub const CLASS_NAMES: Map<&str, u64> = Map::new("class_names");

/// Sum of every class's collateral_locked
pub const TOTAL_COLLATERAL: Item<Uint128> = Item::new("total_collateral");

// ─── Exchange Engine ────────────────────────────────────────────────────────

/// Base asset deposited through exchange operations, net of burns
pub const RESERVE: Item<Uint128> = Item::new("reserve");

// ─── Points Ledger ──────────────────────────────────────────────────────────

/// (class_id, action) -> points awarded. Missing entries award 0.
pub const POINT_VALUES: Map<(u64, &str), Uint128> = Map::new("point_values");

/// (holder, class_id) -> PointsRecord
pub const POINTS: Map<(&Addr, u64), PointsRecord> = Map::new("points");

/// Append-only arena of activity entries: seq -> entry
pub const ACTIVITY_LOG: Map<u64, ActivityEntry> = Map::new("activity_log");

pub const ACTIVITY_SEQ: Item<u64> = Item::new("activity_seq");

/// Per-(holder, class) offsets into ACTIVITY_LOG, in insertion order
pub const ACTIVITY_INDEX: Map<(&Addr, u64, u64), ()> = Map::new("activity_idx");
