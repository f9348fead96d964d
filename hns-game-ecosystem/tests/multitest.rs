use cosmwasm_std::{Addr, Empty, Uint128};
use cw_multi_test::error::AnyResult;
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use hns_game_ecosystem::contract::{execute, instantiate, migrate, query};
use hns_game_ecosystem::error::ContractError;
use hns_game_ecosystem::msg::*;
use hns_game_ecosystem::state::{GameClass, BASE_CLASS_ID};

fn ecosystem() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query).with_migrate(migrate))
}

struct Suite {
    app: App,
    code_id: u64,
    contract: Addr,
    admin: Addr,
}

impl Suite {
    fn new() -> Self {
        let mut app = App::default();
        let admin = app.api().addr_make("admin");
        let code_id = app.store_code(ecosystem());
        let contract = app
            .instantiate_contract(
                code_id,
                admin.clone(),
                &InstantiateMsg {
                    admin: None,
                    base_symbol: "HNS".to_string(),
                    base_decimals: 18,
                    initial_base_supply: Uint128::new(1_000_000),
                    onboarding_pool: Uint128::new(5_000),
                    onboarding_amount: Uint128::new(1_000),
                    metadata_uri: "ipfs://classes/".to_string(),
                },
                &[],
                "hns-game-ecosystem",
                Some(admin.to_string()),
            )
            .unwrap();
        Suite {
            app,
            code_id,
            contract,
            admin,
        }
    }

    fn addr(&self, name: &str) -> Addr {
        self.app.api().addr_make(name)
    }

    fn exec(&mut self, sender: &Addr, msg: &ExecuteMsg) -> AnyResult<AppResponse> {
        self.app
            .execute_contract(sender.clone(), self.contract.clone(), msg, &[])
    }

    fn balance(&self, holder: &Addr, class_id: u64) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.contract,
                &QueryMsg::Balance {
                    holder: holder.to_string(),
                    class_id,
                },
            )
            .unwrap();
        res.balance
    }

    fn reserves(&self) -> ReservesResponse {
        self.app
            .wrap()
            .query_wasm_smart(&self.contract, &QueryMsg::Reserves {})
            .unwrap()
    }
}

fn has_action(res: &AppResponse, action: &str) -> bool {
    res.events.iter().any(|ev| {
        ev.ty == "wasm"
            && ev
                .attributes
                .iter()
                .any(|attr| attr.key == "action" && attr.value == action)
    })
}

#[test]
fn test_player_lifecycle() {
    let mut suite = Suite::new();
    let admin = suite.admin.clone();
    let player = suite.addr("player");

    let res = suite
        .exec(&player, &ExecuteMsg::GrantOnboarding { holder: None })
        .unwrap();
    assert!(has_action(&res, "grant_onboarding"));
    assert_eq!(suite.balance(&player, BASE_CLASS_ID), Uint128::new(1_000));

    let res = suite
        .exec(
            &admin,
            &ExecuteMsg::CreateAssetClass {
                collateral: Uint128::new(10_000),
                name: "Shooter Game".to_string(),
                symbol: "ST".to_string(),
                decimals: 18,
            },
        )
        .unwrap();
    assert!(has_action(&res, "create_asset_class"));
    let class_id = 1;

    // Collateral sits in the contract's own ledger account
    assert_eq!(suite.balance(&suite.contract.clone(), BASE_CLASS_ID), Uint128::new(10_000));

    suite
        .exec(
            &player,
            &ExecuteMsg::DepositForClassTokens {
                class_id,
                base_amount: Uint128::new(400),
            },
        )
        .unwrap();
    assert_eq!(suite.balance(&player, class_id), Uint128::new(400));

    suite
        .exec(
            &admin,
            &ExecuteMsg::SetPointValue {
                class_id,
                action: "shoot_enemy".to_string(),
                points: Uint128::new(25),
            },
        )
        .unwrap();
    suite
        .exec(
            &admin,
            &ExecuteMsg::RecordActivityBatch {
                class_id,
                holder: player.to_string(),
                actions: vec!["shoot_enemy".to_string(); 4],
            },
        )
        .unwrap();
    let res = suite
        .exec(
            &player,
            &ExecuteMsg::RedeemPoints {
                class_id,
                holder: None,
                points: Uint128::new(100),
            },
        )
        .unwrap();
    assert!(has_action(&res, "redeem_points"));
    assert_eq!(suite.balance(&player, class_id), Uint128::new(500));

    suite
        .exec(
            &player,
            &ExecuteMsg::BurnForBase {
                class_id,
                burn_amount: Uint128::new(400),
            },
        )
        .unwrap();
    assert_eq!(suite.balance(&player, BASE_CLASS_ID), Uint128::new(1_000));
    assert_eq!(suite.balance(&player, class_id), Uint128::new(100));

    let reserves = suite.reserves();
    assert_eq!(reserves.reserve, Uint128::zero());
    assert_eq!(reserves.total_collateral, Uint128::new(10_000));

    let class: GameClass = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.contract, &QueryMsg::AssetClass { class_id })
        .unwrap();
    assert_eq!(class.current_supply, Uint128::new(10_100));
    assert_eq!(class.minted_via_points, Uint128::new(100));
}

#[test]
fn test_points_backed_tokens_cannot_drain_collateral() {
    let mut suite = Suite::new();
    let admin = suite.admin.clone();
    let player = suite.addr("player");

    suite
        .exec(
            &admin,
            &ExecuteMsg::CreateAssetClass {
                collateral: Uint128::new(10_000),
                name: "Shooter Game".to_string(),
                symbol: "ST".to_string(),
                decimals: 18,
            },
        )
        .unwrap();
    suite
        .exec(
            &admin,
            &ExecuteMsg::SetPointValue {
                class_id: 1,
                action: "win_match".to_string(),
                points: Uint128::new(500),
            },
        )
        .unwrap();
    suite
        .exec(
            &admin,
            &ExecuteMsg::RecordActivity {
                class_id: 1,
                holder: player.to_string(),
                action: "win_match".to_string(),
            },
        )
        .unwrap();
    suite
        .exec(
            &player,
            &ExecuteMsg::RedeemPoints {
                class_id: 1,
                holder: None,
                points: Uint128::new(500),
            },
        )
        .unwrap();

    let err = suite
        .exec(
            &player,
            &ExecuteMsg::BurnForBase {
                class_id: 1,
                burn_amount: Uint128::new(500),
            },
        )
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        ContractError::InsufficientBacking {
            needed: "500".to_string(),
            available: "0".to_string(),
        }
        .to_string()
    );
    assert_eq!(suite.reserves().vault_balance, Uint128::new(10_000));
}

#[test]
fn test_failed_batch_grant_is_rolled_back() {
    let mut suite = Suite::new();
    let admin = suite.admin.clone();
    let holders: Vec<String> = (0..6)
        .map(|i| suite.addr(&format!("player{i}")).to_string())
        .collect();

    // Pool covers five grants
    let err = suite
        .exec(&admin, &ExecuteMsg::BatchGrantOnboarding { holders: holders.clone() })
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        ContractError::InsufficientPool {
            available: "5000".to_string(),
            required: "6000".to_string(),
        }
        .to_string()
    );

    let stats: GrantStatsResponse = suite
        .app
        .wrap()
        .query_wasm_smart(&suite.contract, &QueryMsg::GrantStats {})
        .unwrap();
    assert_eq!(stats.grants, 0);
    assert_eq!(stats.remaining_pool, Uint128::new(5_000));

    suite
        .exec(
            &admin,
            &ExecuteMsg::BatchGrantOnboarding {
                holders: holders[..5].to_vec(),
            },
        )
        .unwrap();
    let received: HasReceivedGrantResponse = suite
        .app
        .wrap()
        .query_wasm_smart(
            &suite.contract,
            &QueryMsg::HasReceivedGrant {
                holder: holders[4].clone(),
            },
        )
        .unwrap();
    assert!(received.received);
}

#[test]
fn test_pause_blocks_players_until_resumed() {
    let mut suite = Suite::new();
    let admin = suite.admin.clone();
    let player = suite.addr("player");
    let newcomer = suite.addr("newcomer");

    suite
        .exec(&player, &ExecuteMsg::GrantOnboarding { holder: None })
        .unwrap();
    suite
        .exec(
            &admin,
            &ExecuteMsg::CreateAssetClass {
                collateral: Uint128::new(1_000),
                name: "Shooter Game".to_string(),
                symbol: "ST".to_string(),
                decimals: 18,
            },
        )
        .unwrap();
    suite
        .exec(
            &player,
            &ExecuteMsg::DepositForClassTokens {
                class_id: 1,
                base_amount: Uint128::new(300),
            },
        )
        .unwrap();
    suite
        .exec(
            &admin,
            &ExecuteMsg::SetPointValue {
                class_id: 1,
                action: "shoot_enemy".to_string(),
                points: Uint128::new(40),
            },
        )
        .unwrap();

    let commands = vec![
        (
            player.clone(),
            ExecuteMsg::BurnForBase {
                class_id: 1,
                burn_amount: Uint128::new(100),
            },
        ),
        (
            admin.clone(),
            ExecuteMsg::RecordActivityBatch {
                class_id: 1,
                holder: player.to_string(),
                actions: vec!["shoot_enemy".to_string(); 2],
            },
        ),
        (
            player.clone(),
            ExecuteMsg::RedeemPoints {
                class_id: 1,
                holder: None,
                points: Uint128::new(80),
            },
        ),
        (
            admin.clone(),
            ExecuteMsg::BatchGrantOnboarding {
                holders: vec![newcomer.to_string()],
            },
        ),
        (
            player.clone(),
            ExecuteMsg::Transfer {
                class_id: 1,
                recipient: newcomer.to_string(),
                amount: Uint128::new(30),
            },
        ),
    ];

    suite.exec(&admin, &ExecuteMsg::Pause {}).unwrap();
    for (sender, msg) in &commands {
        let err = suite.exec(sender, msg).unwrap_err();
        assert_eq!(
            err.root_cause().to_string(),
            ContractError::Paused.to_string()
        );
    }
    assert_eq!(suite.balance(&player, BASE_CLASS_ID), Uint128::new(700));
    assert_eq!(suite.balance(&player, 1), Uint128::new(300));
    assert_eq!(suite.balance(&newcomer, BASE_CLASS_ID), Uint128::zero());
    assert_eq!(suite.reserves().reserve, Uint128::new(300));

    suite.exec(&admin, &ExecuteMsg::Resume {}).unwrap();
    for (sender, msg) in &commands {
        suite.exec(sender, msg).unwrap();
    }
    assert_eq!(suite.balance(&player, BASE_CLASS_ID), Uint128::new(800));
    assert_eq!(suite.balance(&player, 1), Uint128::new(250));
    assert_eq!(suite.balance(&newcomer, 1), Uint128::new(30));
    assert_eq!(suite.balance(&newcomer, BASE_CLASS_ID), Uint128::new(1_000));
    assert_eq!(suite.reserves().reserve, Uint128::new(200));
}

#[test]
fn test_migrate_updates_version() {
    let mut suite = Suite::new();
    let admin = suite.admin.clone();
    let contract = suite.contract.clone();
    let code_id = suite.code_id;

    suite
        .app
        .migrate_contract(admin, contract.clone(), &MigrateMsg {}, code_id)
        .unwrap();

    let version = cw2::query_contract_info(&suite.app.wrap(), contract.to_string()).unwrap();
    assert_eq!(version.contract, "crates.io:hns-game-ecosystem");
    assert_eq!(version.version, env!("CARGO_PKG_VERSION"));
}
