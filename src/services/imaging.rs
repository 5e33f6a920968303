//! Imaging facade: focus moves and picture settings for one video source.
//!
//! Imaging operations address a video source token, not a media profile. The
//! facade caches one with [`set_video_source_token`](ImagingService::set_video_source_token)
//! (typically the first token from
//! [`MediaService::get_video_sources`](crate::services::MediaService::get_video_sources));
//! every operation also accepts an explicit override.

use log::error;
use url::Url;

use crate::device::Preset;
use crate::error::{Error, Result};
use crate::messages::imaging::{MoveFocus, SetImagingSettings};
use crate::params::imaging::FocusMove;
use crate::services::parse_presets;
use crate::session::DeviceSession;
use crate::soap::SoapClient;
use crate::utils::xml_escape;

pub struct ImagingService {
    client: SoapClient,
    endpoint: Option<Url>,
    video_source_token: Option<String>,
}

impl ImagingService {
    pub fn new(session: &DeviceSession) -> Self {
        let endpoint = if session.connection_status() {
            session.capabilities().url_imaging.clone()
        } else {
            None
        };
        if endpoint.is_none() {
            error!(
                "Imaging service not available on {}",
                session.connection_address()
            );
        }

        ImagingService {
            client: session.client().clone(),
            endpoint,
            video_source_token: None,
        }
    }

    pub fn set_video_source_token(&mut self, token: impl Into<String>) {
        self.video_source_token = Some(token.into());
    }

    fn endpoint(&self) -> Result<&Url> {
        self.endpoint.as_ref().ok_or(Error::Unsupported("imaging"))
    }

    fn source_token<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        explicit
            .or(self.video_source_token.as_deref())
            .ok_or(Error::MissingToken("video source"))
    }

    async fn call(&self, body: &str) -> Result<String> {
        self.client.call(self.endpoint()?, body).await
    }

    /// One-element body of the shape `<timg:Op><timg:VideoSourceToken>..`.
    async fn call_for_source(&self, operation: &str, token: Option<&str>) -> Result<String> {
        let token = self.source_token(token)?;
        let body = format!(
            "<timg:{operation}><timg:VideoSourceToken>{}</timg:VideoSourceToken></timg:{operation}>",
            xml_escape(token)
        );
        self.call(&body).await
    }

    pub async fn get_service_capabilities(&self) -> Result<String> {
        self.call("<timg:GetServiceCapabilities/>").await
    }

    pub async fn get_imaging_settings(&self, token: Option<&str>) -> Result<String> {
        self.call_for_source("GetImagingSettings", token).await
    }

    pub async fn set_imaging_settings(&self, message: SetImagingSettings) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn get_options(&self, token: Option<&str>) -> Result<String> {
        self.call_for_source("GetOptions", token).await
    }

    pub async fn get_status(&self, token: Option<&str>) -> Result<String> {
        self.call_for_source("GetStatus", token).await
    }

    pub async fn get_move_options(&self, token: Option<&str>) -> Result<String> {
        self.call_for_source("GetMoveOptions", token).await
    }

    pub async fn move_focus(&self, token: Option<&str>, focus: FocusMove) -> Result<()> {
        let token = self.source_token(token)?;
        self.call(&MoveFocus::new(token, focus).to_body()).await?;
        Ok(())
    }

    pub async fn stop(&self, token: Option<&str>) -> Result<()> {
        self.call_for_source("Stop", token).await?;
        Ok(())
    }

    pub async fn get_presets(&self, token: Option<&str>) -> Result<Vec<Preset>> {
        let response = self.call_for_source("GetPresets", token).await?;
        Ok(parse_presets(response.as_bytes()))
    }

    pub async fn get_current_preset(&self, token: Option<&str>) -> Result<String> {
        self.call_for_source("GetCurrentPreset", token).await
    }

    pub async fn set_current_preset(&self, token: Option<&str>, preset_token: &str) -> Result<()> {
        let token = self.source_token(token)?;
        let body = format!(
            "<timg:SetCurrentPreset><timg:VideoSourceToken>{}</timg:VideoSourceToken><timg:PresetToken>{}</timg:PresetToken></timg:SetCurrentPreset>",
            xml_escape(token),
            xml_escape(preset_token)
        );
        self.call(&body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_token_is_detected_before_sending() {
        let session = DeviceSession::new("192.168.1.168", 80, None);
        let mut service = ImagingService::new(&session);

        assert!(matches!(
            service.source_token(None),
            Err(Error::MissingToken("video source"))
        ));

        service.set_video_source_token("vs_0");
        assert_eq!(service.source_token(None).unwrap(), "vs_0");
        assert_eq!(service.source_token(Some("vs_1")).unwrap(), "vs_1");
    }
}
