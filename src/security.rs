use std::fmt;

/// WiFi security protocol offered by a network.
///
/// Tokens the scan output uses that we do not recognize are kept verbatim
/// in `Unknown` instead of being collapsed onto a default enumerator, so
/// the raw token survives for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Protocol {
    Wpa,
    Wep,
    Wpa2,
    /// An open network with no security at all.
    None,
    Unknown(String),
}

impl Protocol {
    pub fn from_token(token: &str) -> Self {
        match token {
            "WPA" => Protocol::Wpa,
            "WEP" => Protocol::Wep,
            "WPA2" => Protocol::Wpa2,
            "NONE" => Protocol::None,
            other => Protocol::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Wpa => write!(f, "WPA"),
            Protocol::Wep => write!(f, "WEP"),
            Protocol::Wpa2 => write!(f, "WPA2"),
            Protocol::None => write!(f, "NONE"),
            Protocol::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/// Authentication method for a secured network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    Psk,
    /// EAP/802.1x enterprise authentication.
    Eap,
    /// No method applies (open networks).
    Unset,
    Unknown(String),
}

impl AuthMethod {
    pub fn from_token(token: &str) -> Self {
        match token {
            "PSK" => AuthMethod::Psk,
            "802.1x" => AuthMethod::Eap,
            other => AuthMethod::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::Psk => write!(f, "PSK"),
            AuthMethod::Eap => write!(f, "802.1x"),
            AuthMethod::Unset => write!(f, ""),
            AuthMethod::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/// Integrity check cipher suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cipher {
    /// AES-based CCMP.
    Aes,
    Tkip,
    Unknown(String),
}

impl Cipher {
    pub fn from_token(token: &str) -> Self {
        match token {
            "AES" => Cipher::Aes,
            "TKIP" => Cipher::Tkip,
            other => Cipher::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cipher::Aes => write!(f, "AES"),
            Cipher::Tkip => write!(f, "TKIP"),
            Cipher::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

/// One protocol/method/cipher combination offered by a network.
///
/// A network broadcasting several schemes (e.g. WPA and WPA2 at once)
/// carries one descriptor per scheme, in the order the scan reported them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityDescriptor {
    pub protocol: Protocol,
    pub method: AuthMethod,
    /// Unicast cipher suites, at most two.
    pub unicast: Vec<Cipher>,
    pub group: Option<Cipher>,
}

impl SecurityDescriptor {
    /// The single descriptor an open network carries: protocol `NONE`,
    /// everything else unset.
    pub fn open() -> Self {
        SecurityDescriptor {
            protocol: Protocol::None,
            method: AuthMethod::Unset,
            unicast: Vec::new(),
            group: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.protocol == Protocol::None
    }
}

impl fmt::Display for SecurityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open() {
            return write!(f, "NONE");
        }
        let unicast = self
            .unicast
            .iter()
            .map(Cipher::to_string)
            .collect::<Vec<_>>()
            .join(",");
        write!(
            f,
            "{}({}/{}/{})",
            self.protocol,
            self.method,
            unicast,
            self.group.as_ref().map(Cipher::to_string).unwrap_or_default()
        )
    }
}
