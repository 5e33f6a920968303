//! Request message builders. Each struct gathers the parameters of one write
//! operation and renders the operation element for the SOAP body with
//! `to_body()`. Read-style operations with fixed bodies are built inline by
//! the service facades.

pub mod analytics;
pub mod device;
pub mod event;
pub mod imaging;
pub mod media;
pub mod ptz;
