use crate::common::{
    mock_server::INSUFFICIENT_FUNDS_CODE,
    test_context::{account_number, TestContext},
};
use chrono::{Duration, Utc};
use embedly_rust::{
    apis::wallets::{
        DebitCredit, TransferStatus, WalletHistoryRequest, WalletToWalletTransferRequestBuilder,
    },
    pollable::PollOptions,
    Error, PollableUntilTerminalState,
};
use rust_decimal_macros::dec;
use std::time::Duration as StdDuration;

#[tokio::test]
async fn lookup_by_id_account_and_customer() {
    let ctx = TestContext::start().await;
    let wallet = ctx.funded_wallet(dec!(0)).await;
    let customer_id = wallet.customer_id.clone().unwrap();

    assert!(wallet.is_default);
    assert_eq!(wallet.available_balance, dec!(0));

    let by_account = ctx
        .client
        .wallets
        .get_by_account_number(&account_number(&wallet))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_account.id, wallet.id);

    let owned = ctx
        .client
        .wallets
        .list_by_customer(&customer_id)
        .await
        .unwrap();
    assert_eq!(owned, vec![wallet]);

    assert!(ctx
        .client
        .wallets
        .get_by_id("non-existent-wallet")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn transfer_moves_funds_and_settles() {
    let ctx = TestContext::start().await;
    let source = ctx.funded_wallet(dec!(10000)).await;
    let destination = ctx.funded_wallet(dec!(0)).await;

    let request = WalletToWalletTransferRequestBuilder::default()
        .from_account(account_number(&source))
        .to_account(account_number(&destination))
        .amount(dec!(2500.50))
        .remarks("Rent share")
        .build()
        .unwrap();

    let res = ctx.client.wallets.transfer(&request).await.unwrap();
    // The server omits the reference, so the one from the request is kept
    assert_eq!(res.transaction_reference, request.transaction_reference);

    let status = res
        .poll_until_terminal_state(
            &ctx.client,
            PollOptions::default().with_min_interval(StdDuration::from_millis(50)),
        )
        .await
        .unwrap();
    assert_eq!(status.status, TransferStatus::Successful);
    assert_eq!(status.amount, dec!(2500.50));

    let source = ctx.client.wallets.get_by_id(&source.id).await.unwrap().unwrap();
    let destination = ctx
        .client
        .wallets
        .get_by_id(&destination.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(source.available_balance, dec!(7499.50));
    assert_eq!(destination.available_balance, dec!(2500.50));
}

#[tokio::test]
async fn replayed_transfer_is_applied_once() {
    let ctx = TestContext::start().await;
    let source = ctx.funded_wallet(dec!(1000)).await;
    let destination = ctx.funded_wallet(dec!(0)).await;

    let request = WalletToWalletTransferRequestBuilder::default()
        .from_account(account_number(&source))
        .to_account(account_number(&destination))
        .amount(dec!(400))
        .build()
        .unwrap();

    let first = ctx.client.wallets.transfer(&request).await.unwrap();
    let second = ctx.client.wallets.transfer(&request).await.unwrap();
    assert_eq!(first.transaction_id, second.transaction_id);

    let source = ctx.client.wallets.get_by_id(&source.id).await.unwrap().unwrap();
    assert_eq!(source.available_balance, dec!(600));
}

#[tokio::test]
async fn transfer_with_insufficient_funds() {
    let ctx = TestContext::start().await;
    let source = ctx.funded_wallet(dec!(100)).await;
    let destination = ctx.funded_wallet(dec!(0)).await;

    let request = WalletToWalletTransferRequestBuilder::default()
        .from_account(account_number(&source))
        .to_account(account_number(&destination))
        .amount(dec!(100.01))
        .build()
        .unwrap();

    match ctx.client.wallets.transfer(&request).await {
        Err(Error::ApiError(api_error)) => {
            assert_eq!(api_error.status, 200);
            assert_eq!(api_error.code.as_deref(), Some(INSUFFICIENT_FUNDS_CODE));
            assert_eq!(api_error.message, "Insufficient funds");
        }
        res => panic!("Unexpected result: {:?}", res),
    }
}

#[tokio::test]
async fn history_lists_both_legs() {
    let ctx = TestContext::start().await;
    let source = ctx.funded_wallet(dec!(500)).await;
    let destination = ctx.funded_wallet(dec!(0)).await;

    let request = WalletToWalletTransferRequestBuilder::default()
        .from_account(account_number(&source))
        .to_account(account_number(&destination))
        .amount(dec!(125))
        .build()
        .unwrap();
    ctx.client.wallets.transfer(&request).await.unwrap();

    let window = |wallet_id: &str| WalletHistoryRequest {
        wallet_id: wallet_id.to_string(),
        from: Utc::now() - Duration::hours(1),
        to: Utc::now() + Duration::hours(1),
        page: None,
        page_size: None,
    };

    let debits = ctx.client.wallets.history(&window(&source.id)).await.unwrap();
    assert_eq!(debits.len(), 1);
    assert_eq!(debits[0].debit_credit, DebitCredit::Debit);
    assert_eq!(debits[0].balance, Some(dec!(375)));

    let credits = ctx
        .client
        .wallets
        .history(&window(&destination.id))
        .await
        .unwrap();
    assert_eq!(credits.len(), 1);
    assert_eq!(credits[0].debit_credit, DebitCredit::Credit);
    assert_eq!(
        credits[0].transaction_reference.as_deref(),
        Some(request.transaction_reference.as_str())
    );
}
