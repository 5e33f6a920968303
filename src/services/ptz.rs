//! PTZ facade: moves, presets, home position, preset tours and node or
//! configuration queries. Operations default to the session's first media
//! profile; every one accepts an explicit profile token too.

use log::error;
use url::Url;

use crate::device::Preset;
use crate::error::{Error, Result};
use crate::messages::ptz::{
    AbsoluteMove, ContinuousMove, GeoMove, ModifyPresetTour, MoveAndStartTracking, RelativeMove,
    SetConfiguration,
};
use crate::params::ptz::PresetTourOperation;
use crate::services::parse_presets;
use crate::session::DeviceSession;
use crate::soap::SoapClient;
use crate::utils::{parse_soap, xml_escape};

pub struct PtzService {
    client: SoapClient,
    endpoint: Option<Url>,
    default_profile: Option<String>,
}

impl PtzService {
    pub fn new(session: &DeviceSession) -> Self {
        let endpoint = if session.connection_status() {
            session.capabilities().url_ptz.clone()
        } else {
            None
        };
        if endpoint.is_none() {
            error!(
                "PTZ service not available on {}",
                session.connection_address()
            );
        }

        PtzService {
            client: session.client().clone(),
            endpoint,
            default_profile: session.first_profile().map(|p| p.token.clone()),
        }
    }

    fn endpoint(&self) -> Result<&Url> {
        self.endpoint.as_ref().ok_or(Error::Unsupported("PTZ"))
    }

    fn profile<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        explicit
            .or(self.default_profile.as_deref())
            .ok_or(Error::MissingToken("profile"))
    }

    async fn call(&self, body: &str) -> Result<String> {
        self.client.call(self.endpoint()?, body).await
    }

    /// One-element body of the shape `<tptz:Op><tptz:ProfileToken>..`.
    async fn call_for_profile(&self, operation: &str, profile: Option<&str>) -> Result<String> {
        let token = self.profile(profile)?;
        let body = format!(
            "<tptz:{operation}><tptz:ProfileToken>{}</tptz:ProfileToken></tptz:{operation}>",
            xml_escape(token)
        );
        self.call(&body).await
    }

    pub async fn get_service_capabilities(&self) -> Result<String> {
        self.call("<tptz:GetServiceCapabilities/>").await
    }

    pub async fn get_nodes(&self) -> Result<String> {
        self.call("<tptz:GetNodes/>").await
    }

    pub async fn get_node(&self, node_token: &str) -> Result<String> {
        let body = format!(
            "<tptz:GetNode><tptz:NodeToken>{}</tptz:NodeToken></tptz:GetNode>",
            xml_escape(node_token)
        );
        self.call(&body).await
    }

    pub async fn get_configurations(&self) -> Result<String> {
        self.call("<tptz:GetConfigurations/>").await
    }

    pub async fn get_configuration(&self, configuration_token: &str) -> Result<String> {
        let body = format!(
            "<tptz:GetConfiguration><tptz:PTZConfigurationToken>{}</tptz:PTZConfigurationToken></tptz:GetConfiguration>",
            xml_escape(configuration_token)
        );
        self.call(&body).await
    }

    pub async fn get_configuration_options(&self, configuration_token: &str) -> Result<String> {
        let body = format!(
            "<tptz:GetConfigurationOptions><tptz:ConfigurationToken>{}</tptz:ConfigurationToken></tptz:GetConfigurationOptions>",
            xml_escape(configuration_token)
        );
        self.call(&body).await
    }

    pub async fn get_compatible_configurations(&self, profile: Option<&str>) -> Result<String> {
        self.call_for_profile("GetCompatibleConfigurations", profile)
            .await
    }

    pub async fn set_configuration(&self, message: SetConfiguration) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn get_status(&self, profile: Option<&str>) -> Result<String> {
        self.call_for_profile("GetStatus", profile).await
    }

    pub async fn absolute_move(&self, message: AbsoluteMove) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn relative_move(&self, message: RelativeMove) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn continuous_move(&self, message: ContinuousMove) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn geo_move(&self, message: GeoMove) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn stop(&self, profile: Option<&str>, pan_tilt: bool, zoom: bool) -> Result<()> {
        let token = self.profile(profile)?;
        let body = format!(
            "<tptz:Stop><tptz:ProfileToken>{}</tptz:ProfileToken><tptz:PanTilt>{pan_tilt}</tptz:PanTilt><tptz:Zoom>{zoom}</tptz:Zoom></tptz:Stop>",
            xml_escape(token)
        );
        self.call(&body).await?;
        Ok(())
    }

    pub async fn get_presets(&self, profile: Option<&str>) -> Result<Vec<Preset>> {
        let response = self.call_for_profile("GetPresets", profile).await?;
        Ok(parse_presets(response.as_bytes()))
    }

    /// Returns the token of the stored preset. Passing an existing preset
    /// token updates that preset in place.
    pub async fn set_preset(
        &self,
        profile: Option<&str>,
        preset_name: Option<&str>,
        preset_token: Option<&str>,
    ) -> Result<String> {
        let token = self.profile(profile)?;
        let mut body = format!(
            "<tptz:SetPreset><tptz:ProfileToken>{}</tptz:ProfileToken>",
            xml_escape(token)
        );
        if let Some(name) = preset_name {
            body.push_str(&format!(
                "<tptz:PresetName>{}</tptz:PresetName>",
                xml_escape(name)
            ));
        }
        if let Some(preset) = preset_token {
            body.push_str(&format!(
                "<tptz:PresetToken>{}</tptz:PresetToken>",
                xml_escape(preset)
            ));
        }
        body.push_str("</tptz:SetPreset>");

        let response = self.call(&body).await?;
        parse_soap(response.as_bytes(), "PresetToken", None, true)
            .pop()
            .ok_or_else(|| Error::Parse("SetPresetResponse carries no PresetToken".into()))
    }

    pub async fn goto_preset(&self, profile: Option<&str>, preset_token: &str) -> Result<()> {
        let token = self.profile(profile)?;
        let body = format!(
            "<tptz:GotoPreset><tptz:ProfileToken>{}</tptz:ProfileToken><tptz:PresetToken>{}</tptz:PresetToken></tptz:GotoPreset>",
            xml_escape(token),
            xml_escape(preset_token)
        );
        self.call(&body).await?;
        Ok(())
    }

    pub async fn remove_preset(&self, profile: Option<&str>, preset_token: &str) -> Result<()> {
        let token = self.profile(profile)?;
        let body = format!(
            "<tptz:RemovePreset><tptz:ProfileToken>{}</tptz:ProfileToken><tptz:PresetToken>{}</tptz:PresetToken></tptz:RemovePreset>",
            xml_escape(token),
            xml_escape(preset_token)
        );
        self.call(&body).await?;
        Ok(())
    }

    pub async fn goto_home_position(&self, profile: Option<&str>) -> Result<()> {
        self.call_for_profile("GotoHomePosition", profile).await?;
        Ok(())
    }

    pub async fn set_home_position(&self, profile: Option<&str>) -> Result<()> {
        self.call_for_profile("SetHomePosition", profile).await?;
        Ok(())
    }

    pub async fn get_preset_tours(&self, profile: Option<&str>) -> Result<String> {
        self.call_for_profile("GetPresetTours", profile).await
    }

    pub async fn get_preset_tour(&self, profile: Option<&str>, tour_token: &str) -> Result<String> {
        let token = self.profile(profile)?;
        let body = format!(
            "<tptz:GetPresetTour><tptz:ProfileToken>{}</tptz:ProfileToken><tptz:PresetTourToken>{}</tptz:PresetTourToken></tptz:GetPresetTour>",
            xml_escape(token),
            xml_escape(tour_token)
        );
        self.call(&body).await
    }

    pub async fn get_preset_tour_options(&self, profile: Option<&str>) -> Result<String> {
        self.call_for_profile("GetPresetTourOptions", profile).await
    }

    /// Returns the token of the newly created (empty) tour; fill it in with
    /// [`modify_preset_tour`](Self::modify_preset_tour).
    pub async fn create_preset_tour(&self, profile: Option<&str>) -> Result<String> {
        let response = self.call_for_profile("CreatePresetTour", profile).await?;
        parse_soap(response.as_bytes(), "PresetTourToken", None, true)
            .pop()
            .ok_or_else(|| Error::Parse("CreatePresetTourResponse carries no PresetTourToken".into()))
    }

    pub async fn modify_preset_tour(&self, message: ModifyPresetTour) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn operate_preset_tour(
        &self,
        profile: Option<&str>,
        tour_token: &str,
        operation: PresetTourOperation,
    ) -> Result<()> {
        let token = self.profile(profile)?;
        let body = format!(
            "<tptz:OperatePresetTour><tptz:ProfileToken>{}</tptz:ProfileToken><tptz:PresetTourToken>{}</tptz:PresetTourToken><tptz:Operation>{}</tptz:Operation></tptz:OperatePresetTour>",
            xml_escape(token),
            xml_escape(tour_token),
            operation.as_str()
        );
        self.call(&body).await?;
        Ok(())
    }

    pub async fn remove_preset_tour(&self, profile: Option<&str>, tour_token: &str) -> Result<()> {
        let token = self.profile(profile)?;
        let body = format!(
            "<tptz:RemovePresetTour><tptz:ProfileToken>{}</tptz:ProfileToken><tptz:PresetTourToken>{}</tptz:PresetTourToken></tptz:RemovePresetTour>",
            xml_escape(token),
            xml_escape(tour_token)
        );
        self.call(&body).await?;
        Ok(())
    }

    pub async fn send_auxiliary_command(
        &self,
        profile: Option<&str>,
        command: &str,
    ) -> Result<Option<String>> {
        let token = self.profile(profile)?;
        let body = format!(
            "<tptz:SendAuxiliaryCommand><tptz:ProfileToken>{}</tptz:ProfileToken><tptz:AuxiliaryData>{}</tptz:AuxiliaryData></tptz:SendAuxiliaryCommand>",
            xml_escape(token),
            xml_escape(command)
        );
        let response = self.call(&body).await?;
        Ok(parse_soap(response.as_bytes(), "AuxiliaryResponse", None, true).pop())
    }

    pub async fn move_and_start_tracking(&self, message: MoveAndStartTracking) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }
}
