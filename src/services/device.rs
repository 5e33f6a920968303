//! Device management facade: accounts, clock, network settings, reboot.

use log::{error, info};
use url::Url;

use crate::device::{DeviceInfo, SystemDateTime, User};
use crate::error::{Error, Result};
use crate::messages::device::{CreateUsers, SetNtp, SetSystemDateAndTime};
use crate::params::device::DiscoveryMode;
use crate::session::{parse_utc_date_time, DeviceSession};
use crate::soap::SoapClient;
use crate::utils::{parse_soap, xml_escape};

pub struct DeviceService {
    client: SoapClient,
    endpoint: Option<Url>,
}

impl DeviceService {
    pub fn new(session: &DeviceSession) -> Self {
        let endpoint = if session.connection_status() {
            session.connection_address().parse().ok()
        } else {
            error!(
                "Device service unavailable, session to {} is not connected",
                session.connection_address()
            );
            None
        };

        DeviceService {
            client: session.client().clone(),
            endpoint,
        }
    }

    fn endpoint(&self) -> Result<&Url> {
        self.endpoint.as_ref().ok_or(Error::NotConnected)
    }

    async fn call(&self, body: &str) -> Result<String> {
        self.client.call(self.endpoint()?, body).await
    }

    #[rustfmt::skip]
    pub async fn get_device_information(&self) -> Result<DeviceInfo> {
        let response = self.call("<tds:GetDeviceInformation/>").await?;
        let response = response.as_bytes();

        let mut info = DeviceInfo::default();
        info.manufacturer     = parse_soap(response, "Manufacturer",    None, true).pop();
        info.model            = parse_soap(response, "Model",           None, true).pop();
        info.firmware_version = parse_soap(response, "FirmwareVersion", None, true).pop();
        info.serial_number    = parse_soap(response, "SerialNumber",    None, true).pop();
        info.hardware_id      = parse_soap(response, "HardwareId",      None, true).pop();

        Ok(info)
    }

    /// `None` when the device answered but its `UTCDateTime` is absent or
    /// unreadable.
    pub async fn get_system_date_and_time(&self) -> Result<Option<SystemDateTime>> {
        let response = self.call("<tds:GetSystemDateAndTime/>").await?;
        Ok(parse_utc_date_time(response.as_bytes()).map(|utc| SystemDateTime { utc }))
    }

    pub async fn set_system_date_and_time(&self, message: SetSystemDateAndTime) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn get_hostname(&self) -> Result<Option<String>> {
        let response = self.call("<tds:GetHostname/>").await?;
        Ok(parse_soap(response.as_bytes(), "Name", Some("HostnameInformation"), true).pop())
    }

    pub async fn set_hostname(&self, name: &str) -> Result<()> {
        let body = format!("<tds:SetHostname><tds:Name>{}</tds:Name></tds:SetHostname>", xml_escape(name));
        self.call(&body).await?;
        Ok(())
    }

    pub async fn get_capabilities(&self) -> Result<String> {
        self.call("<tds:GetCapabilities><tds:Category>All</tds:Category></tds:GetCapabilities>")
            .await
    }

    pub async fn get_service_capabilities(&self) -> Result<String> {
        self.call("<tds:GetServiceCapabilities/>").await
    }

    pub async fn get_services(&self, include_capability: bool) -> Result<String> {
        let body = format!(
            "<tds:GetServices><tds:IncludeCapability>{include_capability}</tds:IncludeCapability></tds:GetServices>"
        );
        self.call(&body).await
    }

    pub async fn get_discovery_mode(&self) -> Result<Option<String>> {
        let response = self.call("<tds:GetDiscoveryMode/>").await?;
        Ok(parse_soap(response.as_bytes(), "DiscoveryMode", None, true).pop())
    }

    pub async fn set_discovery_mode(&self, mode: DiscoveryMode) -> Result<()> {
        let body = format!(
            "<tds:SetDiscoveryMode><tds:DiscoveryMode>{}</tds:DiscoveryMode></tds:SetDiscoveryMode>",
            mode.as_str()
        );
        self.call(&body).await?;
        Ok(())
    }

    pub async fn get_remote_discovery_mode(&self) -> Result<Option<String>> {
        let response = self.call("<tds:GetRemoteDiscoveryMode/>").await?;
        Ok(parse_soap(response.as_bytes(), "RemoteDiscoveryMode", None, true).pop())
    }

    pub async fn set_remote_discovery_mode(&self, mode: DiscoveryMode) -> Result<()> {
        let body = format!(
            "<tds:SetRemoteDiscoveryMode><tds:RemoteDiscoveryMode>{}</tds:RemoteDiscoveryMode></tds:SetRemoteDiscoveryMode>",
            mode.as_str()
        );
        self.call(&body).await?;
        Ok(())
    }

    pub async fn get_dns(&self) -> Result<String> {
        self.call("<tds:GetDNS/>").await
    }

    pub async fn get_ntp(&self) -> Result<String> {
        self.call("<tds:GetNTP/>").await
    }

    pub async fn set_ntp(&self, message: SetNtp) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn get_network_interfaces(&self) -> Result<String> {
        self.call("<tds:GetNetworkInterfaces/>").await
    }

    pub async fn get_network_protocols(&self) -> Result<String> {
        self.call("<tds:GetNetworkProtocols/>").await
    }

    pub async fn get_users(&self) -> Result<Vec<User>> {
        let response = self.call("<tds:GetUsers/>").await?;
        Ok(parse_users(response.as_bytes()))
    }

    pub async fn create_users(&self, message: CreateUsers) -> Result<()> {
        self.call(&message.to_body()).await?;
        Ok(())
    }

    pub async fn delete_users(&self, usernames: &[&str]) -> Result<()> {
        let mut body = String::from("<tds:DeleteUsers>");
        for username in usernames {
            body.push_str(&format!(
                "<tds:Username>{}</tds:Username>",
                xml_escape(username)
            ));
        }
        body.push_str("</tds:DeleteUsers>");
        self.call(&body).await?;
        Ok(())
    }

    /// Returns the device's parting message, if it sends one.
    pub async fn system_reboot(&self) -> Result<Option<String>> {
        info!("Rebooting device at {:?}", self.endpoint()?.as_str());
        let response = self.call("<tds:SystemReboot/>").await?;
        Ok(parse_soap(response.as_bytes(), "Message", None, true).pop())
    }
}

/// Pairs Username and UserLevel children of each User element.
fn parse_users(response: &[u8]) -> Vec<User> {
    let usernames = parse_soap(response, "Username", Some("User"), false);
    let levels = parse_soap(response, "UserLevel", Some("User"), false);

    usernames
        .into_iter()
        .zip(levels)
        .map(|(username, user_level)| User {
            username,
            user_level,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_pair_name_with_level() {
        let xml = r#"<Envelope><Body><GetUsersResponse>
            <User><Username>admin</Username><UserLevel>Administrator</UserLevel></User>
            <User><Username>viewer</Username><UserLevel>User</UserLevel></User>
        </GetUsersResponse></Body></Envelope>"#;

        let users = parse_users(xml.as_bytes());
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "admin");
        assert_eq!(users[0].user_level, "Administrator");
        assert_eq!(users[1].username, "viewer");
    }

    #[test]
    fn unconnected_session_yields_no_endpoint() {
        let session = DeviceSession::new("192.168.1.168", 80, None);
        let service = DeviceService::new(&session);
        assert!(matches!(service.endpoint(), Err(Error::NotConnected)));
    }
}
