//! Device-management request bodies.

use crate::params::device::{DateTime, NetworkHost, SetDateTimeType, TimeZone, User};
use crate::params::ToXml;

#[derive(Debug, Clone)]
pub struct CreateUsers {
    pub users: Vec<User>,
}

impl CreateUsers {
    pub fn new(users: Vec<User>) -> Self {
        CreateUsers { users }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<tds:CreateUsers>");
        for user in &self.users {
            body.push_str("<tds:User>");
            user.write_xml(&mut body);
            body.push_str("</tds:User>");
        }
        body.push_str("</tds:CreateUsers>");
        body
    }
}

#[derive(Debug, Clone)]
pub struct SetSystemDateAndTime {
    pub date_time_type: SetDateTimeType,
    pub daylight_savings: bool,
    pub time_zone: Option<TimeZone>,
    pub utc_date_time: Option<DateTime>,
}

impl SetSystemDateAndTime {
    pub fn ntp(daylight_savings: bool, time_zone: Option<TimeZone>) -> Self {
        SetSystemDateAndTime {
            date_time_type: SetDateTimeType::Ntp,
            daylight_savings,
            time_zone,
            utc_date_time: None,
        }
    }

    pub fn manual(daylight_savings: bool, time_zone: Option<TimeZone>, utc: DateTime) -> Self {
        SetSystemDateAndTime {
            date_time_type: SetDateTimeType::Manual,
            daylight_savings,
            time_zone,
            utc_date_time: Some(utc),
        }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<tds:SetSystemDateAndTime>");
        body.push_str(&format!(
            "<tds:DateTimeType>{}</tds:DateTimeType>",
            self.date_time_type.as_str()
        ));
        body.push_str(&format!(
            "<tds:DaylightSavings>{}</tds:DaylightSavings>",
            self.daylight_savings
        ));
        if let Some(tz) = &self.time_zone {
            body.push_str("<tds:TimeZone>");
            tz.write_xml(&mut body);
            body.push_str("</tds:TimeZone>");
        }
        if let Some(utc) = &self.utc_date_time {
            body.push_str("<tds:UTCDateTime>");
            utc.write_xml(&mut body);
            body.push_str("</tds:UTCDateTime>");
        }
        body.push_str("</tds:SetSystemDateAndTime>");
        body
    }
}

#[derive(Debug, Clone)]
pub struct SetNtp {
    pub from_dhcp: bool,
    pub ntp_manual: Option<NetworkHost>,
}

impl SetNtp {
    pub fn from_dhcp() -> Self {
        SetNtp { from_dhcp: true, ntp_manual: None }
    }

    pub fn manual(host: NetworkHost) -> Self {
        SetNtp { from_dhcp: false, ntp_manual: Some(host) }
    }

    pub fn to_body(&self) -> String {
        let mut body = String::from("<tds:SetNTP>");
        body.push_str(&format!("<tds:FromDHCP>{}</tds:FromDHCP>", self.from_dhcp));
        if let Some(host) = &self.ntp_manual {
            body.push_str("<tds:NTPManual>");
            host.write_xml(&mut body);
            body.push_str("</tds:NTPManual>");
        }
        body.push_str("</tds:SetNTP>");
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::device::UserLevel;

    #[test]
    fn create_users_wraps_each_user() {
        let message = CreateUsers::new(vec![
            User::new("op", Some("secret"), UserLevel::Operator),
            User::new("viewer", None, UserLevel::User),
        ]);
        let body = message.to_body();
        assert_eq!(body.matches("<tds:User>").count(), 2);
        assert!(body.contains("<tt:Password>secret</tt:Password>"));
        assert!(body.ends_with("</tds:CreateUsers>"));
    }

    #[test]
    fn ntp_mode_omits_manual_clock() {
        let body = SetSystemDateAndTime::ntp(false, None).to_body();
        assert!(body.contains("<tds:DateTimeType>NTP</tds:DateTimeType>"));
        assert!(!body.contains("UTCDateTime"));
    }

    #[test]
    fn set_ntp_manual_carries_host() {
        let body = SetNtp::manual(NetworkHost::ipv4("192.168.1.10")).to_body();
        assert!(body.contains("<tds:FromDHCP>false</tds:FromDHCP>"));
        assert!(body.contains("<tt:IPv4Address>192.168.1.10</tt:IPv4Address>"));
    }
}
