//! Integration tests for contract deployment and execution through the
//! manager.

use rootchain::contracts::{
    CallOutcome, ContractCall, ContractError, ContractManager, ContractState, DeployParams,
    SaleAction, TokenAction,
};
use rootchain::transaction::Amount;

fn amt(n: i64) -> Amount {
    Amount::from_num(n)
}

fn token_balance(manager: &ContractManager, address: &str, holder: &str) -> Amount {
    match &manager.contract(address).expect("contract exists").state {
        ContractState::Token(token) => token.balance_of(holder),
        ContractState::Sale(_) => panic!("expected a token contract"),
    }
}

#[test]
fn test_token_lifecycle_through_manager() -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = ContractManager::new("rtc");
    let address = manager.deploy("c1", DeployParams::Token { total_supply: amt(500) })?;

    let outcome = manager.execute(
        &address,
        "c1",
        ContractCall::Token(TokenAction::Transfer { to: "c2".into(), amount: amt(200) }),
    )?;
    assert_eq!(
        outcome,
        CallOutcome::Transfer { from: "c1".into(), to: "c2".into(), amount: amt(200), spender: None }
    );
    assert_eq!(token_balance(&manager, &address, "c1"), amt(300));
    assert_eq!(token_balance(&manager, &address, "c2"), amt(200));

    // Delegated spend without a prior approval fails on the allowance.
    let result = manager.execute(
        &address,
        "c2",
        ContractCall::Token(TokenAction::TransferFrom {
            from: "c1".into(),
            to: "c3".into(),
            amount: amt(50),
        }),
    );
    assert_eq!(
        result,
        Err(ContractError::InsufficientAllowance { have: Amount::ZERO, need: amt(50) })
    );
    assert_eq!(token_balance(&manager, &address, "c3"), Amount::ZERO);

    Ok(())
}

#[test]
fn test_allowance_grant_spend_and_exhaustion() -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = ContractManager::new("rtc");
    let address = manager.deploy("c1", DeployParams::Token { total_supply: amt(500) })?;

    manager.execute(
        &address,
        "c1",
        ContractCall::Token(TokenAction::Approve { spender: "c2".into(), amount: amt(100) }),
    )?;

    manager.execute(
        &address,
        "c2",
        ContractCall::Token(TokenAction::TransferFrom {
            from: "c1".into(),
            to: "c3".into(),
            amount: amt(70),
        }),
    )?;
    assert_eq!(token_balance(&manager, &address, "c3"), amt(70));

    // Only 30 remains delegated.
    let result = manager.execute(
        &address,
        "c2",
        ContractCall::Token(TokenAction::TransferFrom {
            from: "c1".into(),
            to: "c3".into(),
            amount: amt(40),
        }),
    );
    assert_eq!(
        result,
        Err(ContractError::InsufficientAllowance { have: amt(30), need: amt(40) })
    );

    Ok(())
}

#[test]
fn test_timed_sale_through_manager() -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = ContractManager::new("rtc");
    let address = manager.deploy(
        "rtc_creator",
        DeployParams::TimedSale {
            unit_price: amt(5),
            total_units: amt(20),
            start_time: 10_000,
            end_time: 20_000,
        },
    )?;

    let purchase = |amount: i64| ContractCall::Sale(SaleAction::Purchase { amount: amt(amount) });

    let outcome = manager.execute_at(10_000, &address, "rtc_buyer", purchase(50))?;
    assert_eq!(
        outcome,
        CallOutcome::Purchase { buyer: "rtc_buyer".into(), units: amt(10), amount_paid: amt(50) }
    );

    // Past the window end.
    assert_eq!(
        manager.execute_at(20_001, &address, "rtc_buyer", purchase(5)),
        Err(ContractError::SaleEnded)
    );

    // 11 more units would exceed the 20-unit inventory.
    assert_eq!(
        manager.execute_at(15_000, &address, "rtc_buyer", purchase(55)),
        Err(ContractError::NotEnoughUnits)
    );

    // The remaining 10 units exactly drain the sale.
    manager.execute_at(15_000, &address, "rtc_buyer", purchase(50))?;
    match &manager.contract(&address).expect("contract exists").state {
        ContractState::Sale(sale) => {
            assert_eq!(sale.units_sold, amt(20));
            assert_eq!(sale.units_bought_by("rtc_buyer"), amt(20));
        }
        ContractState::Token(_) => panic!("expected a sale contract"),
    }

    Ok(())
}

#[test]
fn test_mixed_deployments_route_independently() -> Result<(), Box<dyn std::error::Error>> {
    let mut manager = ContractManager::new("rtc");
    let token = manager.deploy("c1", DeployParams::Token { total_supply: amt(100) })?;
    let sale = manager.deploy(
        "c1",
        DeployParams::TimedSale {
            unit_price: amt(1),
            total_units: amt(10),
            start_time: 0,
            end_time: u64::MAX,
        },
    )?;

    assert_eq!(token, "rtc_contract_0");
    assert_eq!(sale, "rtc_contract_1");

    // Sending a sale action to the token address is a distinct rejection.
    assert_eq!(
        manager.execute(&token, "c1", ContractCall::Sale(SaleAction::Purchase { amount: amt(1) })),
        Err(ContractError::InvalidAction(token.clone()))
    );

    // The sale contract is untouched by token activity.
    manager.execute(
        &token,
        "c1",
        ContractCall::Token(TokenAction::Transfer { to: "c2".into(), amount: amt(10) }),
    )?;
    match &manager.contract(&sale).expect("contract exists").state {
        ContractState::Sale(state) => assert_eq!(state.units_sold, Amount::ZERO),
        ContractState::Token(_) => panic!("expected a sale contract"),
    }

    Ok(())
}
