//! Device-management parameter types (user accounts, clock, NTP).

use super::{elem, ToXml};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLevel {
    Administrator,
    Operator,
    User,
    Anonymous,
    Extended,
}

impl UserLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserLevel::Administrator => "Administrator",
            UserLevel::Operator => "Operator",
            UserLevel::User => "User",
            UserLevel::Anonymous => "Anonymous",
            UserLevel::Extended => "Extended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMode {
    Discoverable,
    NonDiscoverable,
}

impl DiscoveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryMode::Discoverable => "Discoverable",
            DiscoveryMode::NonDiscoverable => "NonDiscoverable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetDateTimeType {
    Manual,
    Ntp,
}

impl SetDateTimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetDateTimeType::Manual => "Manual",
            SetDateTimeType::Ntp => "NTP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkHostType {
    IPv4,
    IPv6,
    Dns,
}

impl NetworkHostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkHostType::IPv4 => "IPv4",
            NetworkHostType::IPv6 => "IPv6",
            NetworkHostType::Dns => "DNS",
        }
    }
}

/// Account to create on the device. Writes its fields only; CreateUsers
/// supplies the `<tds:User>` wrapper.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub password: Option<String>,
    pub user_level: UserLevel,
}

impl User {
    pub fn new(username: &str, password: Option<&str>, user_level: UserLevel) -> Self {
        User {
            username: username.to_string(),
            password: password.map(str::to_string),
            user_level,
        }
    }
}

impl ToXml for User {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Username", &self.username);
        if let Some(password) = &self.password {
            elem(out, "tt:Password", password);
        }
        elem(out, "tt:UserLevel", self.user_level.as_str());
    }
}

/// POSIX TZ string, e.g. `CST-8` or `UTC0`.
#[derive(Debug, Clone)]
pub struct TimeZone {
    pub tz: String,
}

impl ToXml for TimeZone {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:TZ", &self.tz);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ToXml for Time {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Hour", &self.hour.to_string());
        elem(out, "tt:Minute", &self.minute.to_string());
        elem(out, "tt:Second", &self.second.to_string());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl ToXml for Date {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Year", &self.year.to_string());
        elem(out, "tt:Month", &self.month.to_string());
        elem(out, "tt:Day", &self.day.to_string());
    }
}

/// Schema order is Time before Date.
#[derive(Debug, Clone, Copy)]
pub struct DateTime {
    pub time: Time,
    pub date: Date,
}

impl ToXml for DateTime {
    fn write_xml(&self, out: &mut String) {
        super::wrap(out, "tt:Time", &self.time);
        super::wrap(out, "tt:Date", &self.date);
    }
}

/// NTP server entry for SetNTP.
#[derive(Debug, Clone)]
pub struct NetworkHost {
    pub host_type: NetworkHostType,
    pub ipv4_address: Option<String>,
    pub ipv6_address: Option<String>,
    pub dns_name: Option<String>,
}

impl NetworkHost {
    pub fn ipv4(address: &str) -> Self {
        NetworkHost {
            host_type: NetworkHostType::IPv4,
            ipv4_address: Some(address.to_string()),
            ipv6_address: None,
            dns_name: None,
        }
    }

    pub fn dns(name: &str) -> Self {
        NetworkHost {
            host_type: NetworkHostType::Dns,
            ipv4_address: None,
            ipv6_address: None,
            dns_name: Some(name.to_string()),
        }
    }
}

impl ToXml for NetworkHost {
    fn write_xml(&self, out: &mut String) {
        elem(out, "tt:Type", self.host_type.as_str());
        if let Some(addr) = &self.ipv4_address {
            elem(out, "tt:IPv4Address", addr);
        }
        if let Some(addr) = &self.ipv6_address {
            elem(out, "tt:IPv6Address", addr);
        }
        if let Some(name) = &self.dns_name {
            elem(out, "tt:DNSname", name);
        }
    }
}
