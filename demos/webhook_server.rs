use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use anyhow::Context;
use async_trait::async_trait;
use embedly_rust::{
    config::EmbedlyConfig,
    webhook::{
        NipNotification, PayoutNotification, WebhookError, WebhookHandler, WebhookProcessor,
        WEBHOOK_SIGNATURE_HEADER, WEBHOOK_TIMESTAMP_HEADER,
    },
};

/// Logs every notification it receives.
#[derive(Debug, Clone)]
struct LoggingHandler;

#[async_trait]
impl WebhookHandler for LoggingHandler {
    async fn on_nip(&self, notification: NipNotification) -> anyhow::Result<()> {
        tracing::info!(
            account_number = %notification.account_number,
            reference = %notification.reference,
            "Received {} from {}",
            notification.amount,
            notification.sender_name.as_deref().unwrap_or("unknown sender")
        );
        Ok(())
    }

    async fn on_payout(&self, notification: PayoutNotification) -> anyhow::Result<()> {
        tracing::info!(
            payment_reference = %notification.payment_reference,
            "Payout of {} is now {}",
            notification.amount,
            notification.status
        );
        Ok(())
    }
}

fn read_config() -> anyhow::Result<EmbedlyConfig> {
    config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("EMBEDLY"))
        .build()?
        .try_deserialize()
        .context("Failed to assemble the required configuration")
}

fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// POST /webhooks/embedly
async fn receive_webhook(
    req: HttpRequest,
    body: web::Bytes,
    processor: web::Data<WebhookProcessor<LoggingHandler>>,
) -> HttpResponse {
    let payload = match std::str::from_utf8(&body) {
        Ok(payload) => payload,
        Err(_) => return HttpResponse::BadRequest().body("payload is not valid UTF-8"),
    };
    let signature = header(&req, WEBHOOK_SIGNATURE_HEADER).unwrap_or_default();

    match processor
        .process(payload, signature, header(&req, WEBHOOK_TIMESTAMP_HEADER))
        .await
    {
        Ok(event) => {
            tracing::debug!(event = %event.event, "Webhook processed");
            HttpResponse::Ok().finish()
        }
        Err(
            e @ (WebhookError::MissingSignature
            | WebhookError::InvalidSignature
            | WebhookError::MissingTimestamp
            | WebhookError::TimestampOutOfTolerance(_)),
        ) => {
            tracing::warn!("Rejected webhook: {}", e);
            HttpResponse::Unauthorized().finish()
        }
        Err(e @ WebhookError::Handler(_)) => {
            tracing::error!("Failed to handle webhook: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
        Err(e) => {
            tracing::warn!("Malformed webhook: {}", e);
            HttpResponse::BadRequest().body(e.to_string())
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = read_config()?;
    let processor = web::Data::new(WebhookProcessor::new(
        config.webhook_validator(),
        LoggingHandler,
    ));

    let bind_address = ("0.0.0.0", 3000);
    tracing::info!("Listening for Embedly webhooks on {:?}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(processor.clone())
            .route("/webhooks/embedly", web::post().to(receive_webhook))
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}

#[actix_web::main]
async fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}
