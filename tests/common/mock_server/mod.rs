
use actix_web::{
    dev::Service, http::StatusCode, web, App, HttpResponse, HttpServer, ResponseError,
};
use embedly_rust::apis::{
    cards::Card,
    customers::Customer,
    payouts::PayoutTransaction,
    wallets::{Wallet, WalletTransaction, WalletTransferStatus},
};
use openssl::{pkey::Private, rsa::Rsa};
use reqwest::Url;
use rust_decimal::Decimal;
use serde_json::json;
use std::{
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, RwLock,
    },
};
use tokio::sync::oneshot;

/// Destination account for which every payout ends up failing.
pub static FAILING_PAYOUT_ACCOUNT: &str = "0000000000";
/// Bank account known to the name enquiry endpoint.
pub static KNOWN_BANK_CODE: &str = "058";
pub static KNOWN_ACCOUNT_NUMBER: &str = "0123456789";
pub static KNOWN_ACCOUNT_NAME: &str = "ADA OBI";
/// Response code of transfers rejected for lack of funds.
pub static INSUFFICIENT_FUNDS_CODE: &str = "51";

/// Number of status queries after which a pending transaction settles.
const POLLS_BEFORE_SETTLEMENT: u32 = 2;

#[derive(Clone)]
struct MockServerConfiguration {
    api_key: String,
    pin_private_key: Rsa<Private>,
}

struct StoredTransfer {
    response_transaction_id: String,
    status: WalletTransferStatus,
    polls: u32,
}

struct StoredPayout {
    transaction: PayoutTransaction,
    source_wallet_id: String,
    polls: u32,
}

struct StoredCard {
    card: Card,
    pin: Option<String>,
}

#[derive(Default)]
struct MockServerStorageInner {
    customers: HashMap<String, Customer>,
    wallets: HashMap<String, Wallet>,
    history: Vec<WalletTransaction>,
    transfers: HashMap<String, StoredTransfer>,
    payouts: HashMap<String, StoredPayout>,
    cards: HashMap<String, StoredCard>,
    next_account_number: u64,
}

impl MockServerStorageInner {
    fn wallet_by_account_number(&mut self, account_number: &str) -> Option<&mut Wallet> {
        self.wallets.values_mut().find(|w| {
            w.virtual_account
                .as_ref()
                .map(|a| a.account_number == account_number)
                .unwrap_or(false)
        })
    }
}

/// In-memory state of the fake Embedly backend.
type MockServerStorage = Arc<RwLock<MockServerStorageInner>>;

/// Rejection raised before a request reaches the routes.
#[derive(Debug)]
struct Rejection {
    status: StatusCode,
    message: &'static str,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl ResponseError for Rejection {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(json!({
            "code": self.status.as_u16().to_string(),
            "success": false,
            "message": self.message
        }))
    }
}

/// Stateful fake of the Embedly APIs used in local integration tests.
pub struct EmbedlyMockServer {
    url: Url,
    shutdown: Option<oneshot::Sender<()>>,
    storage: MockServerStorage,
    requests: Arc<AtomicUsize>,
}

impl EmbedlyMockServer {
    pub async fn start(api_key: &str, pin_private_key: Rsa<Private>) -> Self {
        let configuration = MockServerConfiguration {
            api_key: api_key.to_string(),
            pin_private_key,
        };

        let storage = MockServerStorage::default();
        storage.write().unwrap().next_account_number = 9_710_000_000;
        let storage_clone = storage.clone();
        let requests = Arc::new(AtomicUsize::new(0));
        let requests_clone = requests.clone();

        let http_server_factory = HttpServer::new(move || {
            let api_key = configuration.api_key.clone();
            let requests = requests.clone();

            App::new()
                .app_data(web::Data::new(configuration.clone()))
                .app_data(web::Data::new(storage.clone()))
                // Every request must be authenticated and identify the SDK
                .wrap_fn(move |req, srv| {
                    requests.fetch_add(1, Ordering::SeqCst);

                    let rejection = if req
                        .headers()
                        .get("x-api-key")
                        .and_then(|v| v.to_str().ok())
                        != Some(api_key.as_str())
                    {
                        Some(Rejection {
                            status: StatusCode::UNAUTHORIZED,
                            message: "Invalid API key",
                        })
                    } else if !req
                        .headers()
                        .get("user-agent")
                        .and_then(|v| v.to_str().ok())
                        .map(|v| v.starts_with("embedly-rust/"))
                        .unwrap_or(false)
                    {
                        Some(Rejection {
                            status: StatusCode::BAD_REQUEST,
                            message: "Missing user agent",
                        })
                    } else {
                        None
                    };

                    let fut = srv.call(req);
                    async move {
                        match rejection {
                            Some(rejection) => Err(rejection.into()),
                            None => fut.await,
                        }
                    }
                })
                // Customers
                .route("/api/v1/customers/add", web::post().to(routes::create_customer))
                .route("/api/v1/customers/get/all", web::get().to(routes::list_customers))
                .route(
                    "/api/v1/customers/get/id/{id}",
                    web::get().to(routes::get_customer_by_id),
                )
                .route(
                    "/api/v1/customers/customer/{id}/updatename",
                    web::patch().to(routes::update_customer_name),
                )
                .route(
                    "/api/v1/customers/kyc/customer/nin",
                    web::post().to(routes::upgrade_kyc_nin),
                )
                // Wallets
                .route("/api/v1/wallets/add", web::post().to(routes::create_wallet))
                .route(
                    "/api/v1/wallets/get/wallet/account/{account_number}",
                    web::get().to(routes::get_wallet_by_account_number),
                )
                .route(
                    "/api/v1/wallets/get/wallet/{id}",
                    web::get().to(routes::get_wallet_by_id),
                )
                .route(
                    "/api/v1/wallets/get/customer/{id}",
                    web::get().to(routes::list_customer_wallets),
                )
                .route(
                    "/api/v1/wallets/wallet/transaction/v2/wallet-to-wallet",
                    web::post().to(routes::wallet_to_wallet_transfer),
                )
                .route(
                    "/api/v1/wallets/wallet/transaction/wallet-to-wallet/status/{reference}",
                    web::get().to(routes::get_transfer_status),
                )
                .route("/api/v1/wallets/history", web::get().to(routes::wallet_history))
                // Payouts
                .route("/api/Payout/banks", web::get().to(routes::list_banks))
                .route("/api/Payout/name-enquiry", web::post().to(routes::name_enquiry))
                .route(
                    "/api/Payout/inter-bank-transfer",
                    web::post().to(routes::inter_bank_transfer),
                )
                .route(
                    "/api/Payout/status/{reference}",
                    web::get().to(routes::get_payout_status),
                )
                // Cards
                .service(
                    web::scope("/api/v1/operations/cards/afrigo")
                        .route("/create", web::post().to(routes::issue_card))
                        .route("/get/{account_number}", web::get().to(routes::get_card))
                        .route("/activate", web::put().to(routes::activate_card))
                        .route("/block", web::put().to(routes::block_card))
                        .route("/unblock", web::put().to(routes::unblock_card))
                        .route("/pin/change", web::put().to(routes::change_card_pin)),
                )
        })
        .workers(1)
        .bind("127.0.0.1:0")
        .unwrap();

        let addr = http_server_factory.addrs().first().cloned().unwrap();

        // Kill the HTTP server when this struct is dropped
        let (shutdown_sender, shutdown_recv) = oneshot::channel();

        let http_server = http_server_factory.run();
        tokio::spawn(async move {
            tokio::select! {
                _ = http_server => panic!("HTTP server crashed"),
                _ = shutdown_recv => {}
            }
        });

        Self {
            url: Url::parse(&format!("http://{}", addr)).unwrap(),
            shutdown: Some(shutdown_sender),
            storage: storage_clone,
            requests: requests_clone,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Number of HTTP requests received so far, rejected ones included.
    pub fn requests_received(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Credits a wallet out of band, as an inbound bank transfer would.
    pub fn fund_wallet(&self, wallet_id: &str, amount: Decimal) {
        let mut storage = self.storage.write().unwrap();
        let wallet = storage.wallets.get_mut(wallet_id).expect("Unknown wallet");
        wallet.available_balance += amount;
        wallet.ledger_balance += amount;
    }

    /// Returns the PIN last set on a card, in clear.
    pub fn card_pin(&self, account_number: &str) -> Option<String> {
        self.storage
            .read()
            .unwrap()
            .cards
            .get(account_number)
            .and_then(|c| c.pin.clone())
    }
}

impl Drop for EmbedlyMockServer {
    fn drop(&mut self) {
        let _ = self.shutdown.take().unwrap().send(());
    }
}
