use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything a remote ONVIF call can fail with. Callers can tell apart
/// "couldn't reach the device", "device rejected the call" and "device
/// answered garbage" instead of getting an empty default back.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP-level failure reaching the device.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The device answered with a SOAP fault envelope.
    #[error("SOAP fault {code}: {reason}")]
    Fault { code: String, reason: String },

    /// No response within the per-try timeout after all retries.
    #[error("no response from {endpoint} after {tries} tries")]
    Timeout { endpoint: String, tries: u32 },

    /// The device does not advertise the sub-service this call belongs to.
    #[error("{0} service not supported by this device")]
    Unsupported(&'static str),

    /// Pull/Renew/Unsubscribe/Seek called without an active subscription
    /// address.
    #[error("no active pull-point subscription")]
    NotSubscribed,

    /// The session has not completed `connect` yet.
    #[error("device session is not connected")]
    NotConnected,

    /// Local file write failed (snapshot download).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// An operation needs a profile or video source token and none was
    /// passed in or cached.
    #[error("no {0} token available")]
    MissingToken(&'static str),

    /// A response was missing an element the operation requires.
    #[error("malformed response: {0}")]
    Parse(String),

    #[error("invalid endpoint address: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}
