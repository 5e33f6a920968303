//! Demo driver: connects to a camera, subscribes to its pull point and
//! prints notifications until Ctrl-C.
//!
//! Usage: `onvif-client-rs <host> [port] [username password]`

use std::env;

use anyhow::{bail, Context, Result};
use log::{info, warn};

use onvif_client_rs::messages::event::CreatePullPointSubscription;
use onvif_client_rs::params::event::sentinel_time;
use onvif_client_rs::services::EventService;
use onvif_client_rs::session::DeviceSession;
use onvif_client_rs::soap::Credentials;

const PULL_TIMEOUT: &str = "PT1M";
const MESSAGE_LIMIT: u32 = 10;
/// Renew once the subscription has less than this left to live.
const RENEW_MARGIN_SECS: i64 = 90;
const RENEW_TERM: &str = "PT10M";

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (host, port, credentials) = match args.len() {
        1 => (args[0].clone(), 80, None),
        2 => (args[0].clone(), args[1].parse().context("bad port")?, None),
        3 => (
            args[0].clone(),
            80,
            Some(Credentials::new(&args[1], &args[2])),
        ),
        4 => (
            args[0].clone(),
            args[1].parse().context("bad port")?,
            Some(Credentials::new(&args[2], &args[3])),
        ),
        _ => bail!("usage: onvif-client-rs <host> [port] [username password]"),
    };

    let mut session = DeviceSession::new(host, port, credentials);
    session.connect().await.context("device connect failed")?;

    let events = EventService::new(&session);
    let subscription = events
        .create_pull_point_subscription(CreatePullPointSubscription::default())
        .await
        .context("could not create pull point subscription")?;
    info!("Subscribed at {}", subscription.address);

    loop {
        let batch = tokio::select! {
            batch = events.pull_messages(&subscription.address, PULL_TIMEOUT, MESSAGE_LIMIT) => batch,
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C, shutting down");
                break;
            }
        };

        let batch = match batch {
            Ok(batch) => batch,
            Err(e) => {
                warn!("PullMessages failed: {e}");
                continue;
            }
        };

        for message in &batch.notification_messages {
            println!(
                "{} [{}] {}={} / {}={}",
                message
                    .message
                    .get("UtcTime")
                    .map(String::as_str)
                    .unwrap_or("-"),
                message.topic,
                message.source.name,
                message.source.value,
                message.data.name,
                message.data.value,
            );
        }

        if batch.termination_time != sentinel_time() {
            let remaining = (batch.termination_time - batch.current_time).num_seconds();
            if remaining < RENEW_MARGIN_SECS {
                match events.renew(&subscription.address, RENEW_TERM).await {
                    Ok(renewed) => info!("Renewed until {:?}", renewed.termination_time),
                    Err(e) => warn!("Renew failed: {e}"),
                }
            }
        }
    }

    events
        .unsubscribe(&subscription.address)
        .await
        .context("unsubscribe failed")?;
    info!("Unsubscribed");

    Ok(())
}
