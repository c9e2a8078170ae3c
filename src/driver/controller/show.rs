use core::fmt;

/// The catalogue of diagnostic "show" commands a `Controller` knows how to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowCommand {
    /// `show version`
    Version,
    /// `show switch software`
    SwitchSoftware,
    /// `show license`
    License,
    /// `show wlan ssid-profile`
    WlanSsidProfile,
    /// `show switchinfo`
    SwitchInfo,
    /// `show rights`
    Rights,
    /// `show inventory`
    Inventory,
    /// `show vlan`
    Vlan,
    /// `show ap`
    Ap,
    /// `show arp`
    Arp,
    /// `show ap database`
    ApDatabase,
    /// `show port status`
    PortStatus,
    /// `show wlan virtual-ap <name>`
    WlanVirtualAp(String),
}

impl ShowCommand {
    /// Short description of what the command fetches, for logging.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Version => "software version",
            Self::SwitchSoftware => "switch software",
            Self::License => "license information",
            Self::WlanSsidProfile => "WLAN SSID profiles",
            Self::SwitchInfo => "switch information",
            Self::Rights => "controller rights",
            Self::Inventory => "inventory details",
            Self::Vlan => "VLAN details",
            Self::Ap => "access points",
            Self::Arp => "ARP table",
            Self::ApDatabase => "AP database",
            Self::PortStatus => "port status",
            Self::WlanVirtualAp(_) => "WLAN virtual AP",
        }
    }
}

impl fmt::Display for ShowCommand {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        match self {
            Self::Version => write!(f, "show version"),
            Self::SwitchSoftware => write!(f, "show switch software"),
            Self::License => write!(f, "show license"),
            Self::WlanSsidProfile => write!(f, "show wlan ssid-profile"),
            Self::SwitchInfo => write!(f, "show switchinfo"),
            Self::Rights => write!(f, "show rights"),
            Self::Inventory => write!(f, "show inventory"),
            Self::Vlan => write!(f, "show vlan"),
            Self::Ap => write!(f, "show ap"),
            Self::Arp => write!(f, "show arp"),
            Self::ApDatabase => write!(f, "show ap database"),
            Self::PortStatus => write!(f, "show port status"),
            Self::WlanVirtualAp(name) => write!(f, "show wlan virtual-ap {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_text() {
        assert_eq!(ShowCommand::SwitchInfo.to_string(), "show switchinfo");
        assert_eq!(ShowCommand::ApDatabase.to_string(), "show ap database");
        assert_eq!(
            ShowCommand::WlanVirtualAp(String::from("CMPE-295A-VAP")).to_string(),
            "show wlan virtual-ap CMPE-295A-VAP"
        );
    }
}
