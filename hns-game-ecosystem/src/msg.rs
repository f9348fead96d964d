use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Timestamp, Uint128};

use crate::state::Role;

#[cw_serde]
pub struct InstantiateMsg {
    /// Receives every role and the initial base supply. Defaults to the sender.
    pub admin: Option<String>,
    pub base_symbol: String,
    pub base_decimals: u8,
    /// Base asset minted to the admin at instantiation
    pub initial_base_supply: Uint128,
    /// Base asset minted straight into the onboarding pool
    pub onboarding_pool: Uint128,
    /// Fixed amount of each onboarding grant
    pub onboarding_amount: Uint128,
    /// Prefix for per-class metadata, e.g. "https://api.example.com/metadata/"
    pub metadata_uri: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ── Access Governor ──
    GrantRole { role: Role, holder: String },
    RevokeRole { role: Role, holder: String },
    /// Pauser only
    Pause {},
    /// Pauser only
    Resume {},

    // ── Base Asset Ledger ──
    /// Credit the one-time onboarding grant. Defaults to the sender.
    GrantOnboarding { holder: Option<String> },
    /// Distributor only. All-or-nothing.
    BatchGrantOnboarding { holders: Vec<String> },
    /// Move base asset from the sender into the onboarding pool
    FundOnboardingPool { amount: Uint128 },
    /// Transfer base asset (class 0) or game class tokens to another holder
    Transfer {
        class_id: u64,
        recipient: String,
        amount: Uint128,
    },
    /// Minter only. Increases base supply.
    Mint { recipient: String, amount: Uint128 },

    // ── Asset Registry ──
    /// Asset creator only. Locks `collateral` and mints the initial supply to the sender.
    CreateAssetClass {
        collateral: Uint128,
        name: String,
        symbol: String,
        decimals: u8,
    },
    /// Admin only
    SetAssetClassActive { class_id: u64, active: bool },
    /// Admin only
    SetMetadataUri { uri: String },

    // ── Exchange Engine ──
    /// Swap base asset for class tokens at the class's fixed rate
    DepositForClassTokens { class_id: u64, base_amount: Uint128 },
    /// Burn class tokens for base asset at the class's fixed rate
    BurnForBase { class_id: u64, burn_amount: Uint128 },
    /// Emergency only. Limited to the unlocked surplus.
    EmergencyWithdraw { recipient: String, amount: Uint128 },

    // ── Points Ledger ──
    /// Activity manager only
    SetPointValue {
        class_id: u64,
        action: String,
        points: Uint128,
    },
    /// Activity manager only. `actions` and `points` must have equal length.
    SetPointValuesBatch {
        class_id: u64,
        actions: Vec<String>,
        points: Vec<Uint128>,
    },
    /// Activity manager only
    RecordActivity {
        class_id: u64,
        holder: String,
        action: String,
    },
    /// Activity manager only
    RecordActivityBatch {
        class_id: u64,
        holder: String,
        actions: Vec<String>,
    },
    /// Redeem points 1:1 for class tokens. Holder defaults to the sender;
    /// an activity manager may redeem on a holder's behalf.
    RedeemPoints {
        class_id: u64,
        holder: Option<String>,
        points: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},

    // ── Access Governor ──
    #[returns(HasRoleResponse)]
    HasRole { role: Role, holder: String },

    #[returns(RoleMembersResponse)]
    RoleMembers {
        role: Role,
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(IsPausedResponse)]
    IsPaused {},

    // ── Base Asset Ledger ──
    #[returns(BalanceResponse)]
    Balance { holder: String, class_id: u64 },

    #[returns(BalancesResponse)]
    Balances { holder: String },

    #[returns(GrantStatsResponse)]
    GrantStats {},

    #[returns(HasReceivedGrantResponse)]
    HasReceivedGrant { holder: String },

    // ── Asset Registry ──
    #[returns(crate::state::GameClass)]
    AssetClass { class_id: u64 },

    #[returns(ClassIdsResponse)]
    AllClassIds {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(Option<u64>)]
    ClassIdByName { name: String },

    #[returns(TokenUriResponse)]
    TokenUri { class_id: u64 },

    // ── Exchange Engine ──
    #[returns(ConversionResponse)]
    CalculateReturn { class_id: u64, burn_amount: Uint128 },

    #[returns(ConversionResponse)]
    PreviewDeposit { class_id: u64, base_amount: Uint128 },

    #[returns(ReservesResponse)]
    Reserves {},

    // ── Points Ledger ──
    #[returns(PointValueResponse)]
    PointValue { class_id: u64, action: String },

    #[returns(PointsSummaryResponse)]
    PointsSummary { holder: String },

    #[returns(PointsRecordResponse)]
    PointsRecord { holder: String, class_id: u64 },

    #[returns(ActivityLogResponse)]
    ActivityLog {
        holder: String,
        class_id: u64,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct HasRoleResponse {
    pub has_role: bool,
}

#[cw_serde]
pub struct RoleMembersResponse {
    pub role: Role,
    pub members: Vec<String>,
}

#[cw_serde]
pub struct IsPausedResponse {
    pub paused: bool,
}

#[cw_serde]
pub struct BalanceResponse {
    pub class_id: u64,
    pub balance: Uint128,
}

#[cw_serde]
pub struct BalancesResponse {
    pub base_balance: Uint128,
    /// Non-zero game class balances, ordered by class id
    pub classes: Vec<BalanceResponse>,
}

#[cw_serde]
pub struct GrantStatsResponse {
    pub grant_amount: Uint128,
    pub grants: u64,
    pub total_granted: Uint128,
    /// Base asset left in the onboarding pool
    pub remaining_pool: Uint128,
}

#[cw_serde]
pub struct HasReceivedGrantResponse {
    pub received: bool,
}

#[cw_serde]
pub struct ClassIdsResponse {
    pub ids: Vec<u64>,
}

#[cw_serde]
pub struct TokenUriResponse {
    pub uri: String,
}

#[cw_serde]
pub struct ConversionResponse {
    pub class_id: u64,
    pub base_amount: Uint128,
    pub class_amount: Uint128,
}

#[cw_serde]
pub struct ReservesResponse {
    /// Base asset deposited through exchange operations, net of burns
    pub reserve: Uint128,
    pub total_collateral: Uint128,
    /// Base asset actually held by the contract
    pub vault_balance: Uint128,
    /// vault_balance - total_collateral - reserve
    pub surplus: Uint128,
}

#[cw_serde]
pub struct PointValueResponse {
    pub points: Uint128,
}

#[cw_serde]
pub struct PointsSummaryEntry {
    pub class_id: u64,
    pub earned: Uint128,
    pub redeemed: Uint128,
    pub available: Uint128,
}

#[cw_serde]
pub struct PointsSummaryResponse {
    pub entries: Vec<PointsSummaryEntry>,
}

#[cw_serde]
pub struct PointsRecordResponse {
    pub class_id: u64,
    pub class_balance: Uint128,
    pub earned: Uint128,
    pub redeemed: Uint128,
    pub available: Uint128,
}

#[cw_serde]
pub struct ActivityLogEntry {
    pub seq: u64,
    pub action: String,
    pub points: Uint128,
    pub timestamp: Timestamp,
}

#[cw_serde]
pub struct ActivityLogResponse {
    pub entries: Vec<ActivityLogEntry>,
}

#[cw_serde]
pub struct MigrateMsg {}
