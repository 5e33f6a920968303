//! Media facade: profiles, stream/snapshot URIs, sources and OSD management.

use std::path::Path;

use log::error;
use url::Url;

use crate::device::{Profile, StreamUri};
use crate::error::{Error, Result};
use crate::messages::media::{CreateOsd, GetStreamUri};
use crate::session::DeviceSession;
use crate::soap::SoapClient;
use crate::utils::{parse_soap, parse_soap_attr, xml_escape};

pub struct MediaService {
    client: SoapClient,
    endpoint: Option<Url>,
}

impl MediaService {
    pub fn new(session: &DeviceSession) -> Self {
        let endpoint = if session.connection_status() {
            session.capabilities().url_media.clone()
        } else {
            None
        };
        if endpoint.is_none() {
            error!(
                "Media service not available on {}",
                session.connection_address()
            );
        }

        MediaService {
            client: session.client().clone(),
            endpoint,
        }
    }

    fn endpoint(&self) -> Result<&Url> {
        self.endpoint.as_ref().ok_or(Error::Unsupported("media"))
    }

    async fn call(&self, body: &str) -> Result<String> {
        self.client.call(self.endpoint()?, body).await
    }

    pub async fn get_profiles(&self) -> Result<Vec<Profile>> {
        let response = self.call("<trt:GetProfiles/>").await?;
        let response = response.as_bytes();

        let tokens = parse_soap_attr(response, "Profiles", "token");
        Ok(tokens
            .into_iter()
            .map(|token| Profile { token, name: None })
            .collect())
    }

    #[rustfmt::skip]
    pub async fn get_stream_uri(&self, message: GetStreamUri) -> Result<StreamUri> {
        let response = self.call(&message.to_body()).await?;
        let response = response.as_bytes();

        let mut uri = StreamUri::default();
        uri.uri                   = parse_soap(response, "Uri",                 None, true).pop();
        uri.invalid_after_connect = parse_soap(response, "InvalidAfterConnect", None, true).pop();
        uri.timeout               = parse_soap(response, "Timeout",             None, true).pop();

        if uri.uri.is_none() {
            return Err(Error::Parse("GetStreamUriResponse carries no Uri".into()));
        }
        Ok(uri)
    }

    /// Fetches a snapshot URI (from
    /// [`get_snapshot_uri`](Self::get_snapshot_uri)) over plain HTTP GET and
    /// writes the JPEG to `path`.
    pub async fn download_snapshot(&self, uri: &str, path: impl AsRef<Path>) -> Result<()> {
        self.endpoint()?;

        let body = reqwest::get(uri).await?.error_for_status()?.bytes().await?;
        std::fs::write(path, &body)?;
        Ok(())
    }

    pub async fn get_snapshot_uri(&self, profile_token: &str) -> Result<String> {
        let body = format!(
            "<trt:GetSnapshotUri><trt:ProfileToken>{}</trt:ProfileToken></trt:GetSnapshotUri>",
            xml_escape(profile_token)
        );
        let response = self.call(&body).await?;
        parse_soap(response.as_bytes(), "Uri", None, true)
            .pop()
            .ok_or_else(|| Error::Parse("GetSnapshotUriResponse carries no Uri".into()))
    }

    /// Tokens of the physical video inputs, needed by the imaging facade.
    pub async fn get_video_sources(&self) -> Result<Vec<String>> {
        let response = self.call("<trt:GetVideoSources/>").await?;
        Ok(parse_soap_attr(response.as_bytes(), "VideoSources", "token"))
    }

    pub async fn get_video_source_configurations(&self) -> Result<String> {
        self.call("<trt:GetVideoSourceConfigurations/>").await
    }

    pub async fn get_video_encoder_configurations(&self) -> Result<String> {
        self.call("<trt:GetVideoEncoderConfigurations/>").await
    }

    pub async fn get_audio_sources(&self) -> Result<String> {
        self.call("<trt:GetAudioSources/>").await
    }

    pub async fn get_compatible_video_analytics_configurations(
        &self,
        profile_token: &str,
    ) -> Result<String> {
        let body = format!(
            "<trt:GetCompatibleVideoAnalyticsConfigurations><trt:ProfileToken>{}</trt:ProfileToken></trt:GetCompatibleVideoAnalyticsConfigurations>",
            xml_escape(profile_token)
        );
        self.call(&body).await
    }

    pub async fn get_metadata_configurations(&self) -> Result<String> {
        self.call("<trt:GetMetadataConfigurations/>").await
    }

    pub async fn get_service_capabilities(&self) -> Result<String> {
        self.call("<trt:GetServiceCapabilities/>").await
    }

    pub async fn get_osds(&self, configuration_token: Option<&str>) -> Result<String> {
        let mut body = String::from("<trt:GetOSDs>");
        if let Some(token) = configuration_token {
            body.push_str(&format!(
                "<trt:ConfigurationToken>{}</trt:ConfigurationToken>",
                xml_escape(token)
            ));
        }
        body.push_str("</trt:GetOSDs>");
        self.call(&body).await
    }

    pub async fn get_osd(&self, osd_token: &str) -> Result<String> {
        let body = format!(
            "<trt:GetOSD><trt:OSDToken>{}</trt:OSDToken></trt:GetOSD>",
            xml_escape(osd_token)
        );
        self.call(&body).await
    }

    pub async fn get_osd_options(&self, configuration_token: &str) -> Result<String> {
        let body = format!(
            "<trt:GetOSDOptions><trt:ConfigurationToken>{}</trt:ConfigurationToken></trt:GetOSDOptions>",
            xml_escape(configuration_token)
        );
        self.call(&body).await
    }

    /// Returns the token the device assigned to the new overlay.
    pub async fn create_osd(&self, message: CreateOsd) -> Result<String> {
        let response = self.call(&message.to_body()).await?;
        parse_soap(response.as_bytes(), "OSDToken", None, true)
            .pop()
            .ok_or_else(|| Error::Parse("CreateOSDResponse carries no OSDToken".into()))
    }

    pub async fn delete_osd(&self, osd_token: &str) -> Result<()> {
        let body = format!(
            "<trt:DeleteOSD><trt:OSDToken>{}</trt:OSDToken></trt:DeleteOSD>",
            xml_escape(osd_token)
        );
        self.call(&body).await?;
        Ok(())
    }
}
