//! ONVIF IP camera client.
//!
//! A [`session::DeviceSession`] connects to the device management endpoint,
//! probes the clock, and caches capabilities, media profiles and the service
//! listing. Per-service facades in [`services`] are then built from the
//! session; calls to sub-services the device does not advertise fail with
//! [`error::Error::Unsupported`] instead of going out on the wire.
//!
//! The eventing workflow this crate is built around:
//!
//! ```no_run
//! use onvif_client_rs::messages::event::CreatePullPointSubscription;
//! use onvif_client_rs::services::EventService;
//! use onvif_client_rs::session::DeviceSession;
//! use onvif_client_rs::soap::Credentials;
//!
//! # async fn run() -> onvif_client_rs::error::Result<()> {
//! let mut session = DeviceSession::new(
//!     "192.168.1.168",
//!     80,
//!     Some(Credentials::new("admin", "password")),
//! );
//! session.connect().await?;
//!
//! let events = EventService::new(&session);
//! let subscription = events
//!     .create_pull_point_subscription(CreatePullPointSubscription::default())
//!     .await?;
//!
//! loop {
//!     let batch = events
//!         .pull_messages(&subscription.address, "PT1M", 10)
//!         .await?;
//!     for message in &batch.notification_messages {
//!         println!("{}: {} = {}", message.topic, message.data.name, message.data.value);
//!     }
//! }
//! # }
//! ```

pub mod device;
pub mod error;
pub mod messages;
pub mod params;
pub mod services;
pub mod session;
pub mod soap;
pub mod utils;

pub use error::{Error, Result};
pub use session::DeviceSession;
pub use soap::Credentials;
