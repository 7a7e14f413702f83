use crate::common::test_context::{account_number, TestContext};
use embedly_rust::{
    apis::cards::{
        ActivateCardRequest, CardActionRequest, CardStatus, CardType, ChangePinRequest,
        IssueCardRequestBuilder,
    },
    Error,
};
use rust_decimal_macros::dec;

#[tokio::test]
async fn card_lifecycle() {
    let ctx = TestContext::start().await;
    let wallet = ctx.funded_wallet(dec!(0)).await;
    let account_number = account_number(&wallet);

    let card = ctx
        .client
        .cards
        .issue(
            &IssueCardRequestBuilder::default()
                .customer_id(wallet.customer_id.clone().unwrap())
                .wallet_account_number(account_number.clone())
                .name_on_card("CHIDI EZE")
                .card_type(CardType::Virtual)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(card.status, CardStatus::Inactive);
    assert!(card.masked_pan.ends_with(&account_number[account_number.len() - 4..]));

    // Activate with a first PIN, which the server can decrypt
    ctx.client
        .cards
        .activate(&ActivateCardRequest {
            account_number: account_number.clone(),
            pin: "1234".to_string().into(),
        })
        .await
        .unwrap();
    assert_eq!(ctx.mock_server().card_pin(&account_number).as_deref(), Some("1234"));

    // Change it
    ctx.client
        .cards
        .change_pin(&ChangePinRequest {
            account_number: account_number.clone(),
            old_pin: "1234".to_string().into(),
            new_pin: "908172".to_string().into(),
        })
        .await
        .unwrap();
    assert_eq!(
        ctx.mock_server().card_pin(&account_number).as_deref(),
        Some("908172")
    );

    // Block and unblock
    let action = CardActionRequest {
        account_number: account_number.clone(),
        reason: Some("Misplaced".to_string()),
    };
    ctx.client.cards.block(&action).await.unwrap();
    let card = ctx
        .client
        .cards
        .get_by_account_number(&account_number)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(card.status, CardStatus::Blocked);

    ctx.client.cards.unblock(&action).await.unwrap();
    let card = ctx
        .client
        .cards
        .get_by_account_number(&account_number)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(card.status, CardStatus::Active);
}

#[tokio::test]
async fn change_pin_with_wrong_old_pin() {
    let ctx = TestContext::start().await;
    let wallet = ctx.funded_wallet(dec!(0)).await;
    let account_number = account_number(&wallet);

    ctx.client
        .cards
        .issue(
            &IssueCardRequestBuilder::default()
                .customer_id(wallet.customer_id.clone().unwrap())
                .wallet_account_number(account_number.clone())
                .name_on_card("CHIDI EZE")
                .build()
                .unwrap(),
        )
        .await
        .unwrap();
    ctx.client
        .cards
        .activate(&ActivateCardRequest {
            account_number: account_number.clone(),
            pin: "1234".to_string().into(),
        })
        .await
        .unwrap();

    let res = ctx
        .client
        .cards
        .change_pin(&ChangePinRequest {
            account_number: account_number.clone(),
            old_pin: "4321".to_string().into(),
            new_pin: "5555".to_string().into(),
        })
        .await;

    match res {
        Err(Error::ApiError(api_error)) => {
            assert_eq!(api_error.status, 400);
            assert_eq!(api_error.message, "Incorrect PIN");
        }
        res => panic!("Unexpected result: {:?}", res),
    }
    assert_eq!(ctx.mock_server().card_pin(&account_number).as_deref(), Some("1234"));
}

#[tokio::test]
async fn unknown_card_is_none() {
    let ctx = TestContext::start().await;

    let res = ctx
        .client
        .cards
        .get_by_account_number("0000000001")
        .await
        .unwrap();

    assert!(res.is_none());
}
