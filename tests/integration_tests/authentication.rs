use crate::common::test_context::TestContext;
use embedly_rust::{EmbedlyClient, Error};

#[tokio::test]
async fn wrong_api_key_is_rejected() {
    let ctx = TestContext::start().await;

    let client = EmbedlyClient::builder("not-the-right-key")
        .with_retry_policy(None)
        .with_environment(ctx.embedly_environment())
        .build();

    match client.customers.list().await {
        Err(Error::ApiError(api_error)) => {
            assert_eq!(api_error.status, 401);
            assert_eq!(api_error.message, "Invalid API key");
        }
        res => panic!("Unexpected result: {:?}", res),
    }
}

#[tokio::test]
async fn empty_identifiers_fail_without_calling_the_server() {
    let ctx = TestContext::start().await;

    let res = ctx.client.wallets.get_by_id("").await;
    assert!(matches!(
        res,
        Err(Error::InvalidArgument {
            name: "wallet_id",
            ..
        })
    ));

    let res = ctx.client.payouts.get_status("  ").await;
    assert!(matches!(
        res,
        Err(Error::InvalidArgument {
            name: "payment_reference",
            ..
        })
    ));

    let res = ctx.client.wallet_groups.remove_wallet("group-id", "..").await;
    assert!(matches!(
        res,
        Err(Error::InvalidArgument {
            name: "wallet_id",
            ..
        })
    ));

    assert_eq!(ctx.mock_server().requests_received(), 0);
}
