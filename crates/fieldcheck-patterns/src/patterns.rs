//! Pattern sources for the built-in library.
//!
//! Every exported pattern is anchored at both ends, so `is_match` is a
//! full-string match. The URL sub-patterns are unanchored fragments.

use std::fmt;
use std::str::FromStr;

// Fragments shared between `IP` and `URL`. Kept as macros so the composite
// patterns can be assembled with `concat!` at compile time.
macro_rules! ipv4_body {
    () => {
        r"((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])\.){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])"
    };
}

macro_rules! ip_body {
    () => {
        concat!(
            r"([0-9a-fA-F]{1,4}:){7,7}[0-9a-fA-F]{1,4}",
            r"|([0-9a-fA-F]{1,4}:){1,7}:",
            r"|([0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4}",
            r"|([0-9a-fA-F]{1,4}:){1,5}(:[0-9a-fA-F]{1,4}){1,2}",
            r"|([0-9a-fA-F]{1,4}:){1,4}(:[0-9a-fA-F]{1,4}){1,3}",
            r"|([0-9a-fA-F]{1,4}:){1,3}(:[0-9a-fA-F]{1,4}){1,4}",
            r"|([0-9a-fA-F]{1,4}:){1,2}(:[0-9a-fA-F]{1,4}){1,5}",
            r"|[0-9a-fA-F]{1,4}:((:[0-9a-fA-F]{1,4}){1,6})",
            r"|:((:[0-9a-fA-F]{1,4}){1,7}|:)",
            r"|fe80:(:[0-9a-fA-F]{0,4}){0,4}%[0-9a-zA-Z]{1,}",
            r"|::(ffff(:0{1,4}){0,1}:){0,1}",
            ipv4_body!(),
            r"|([0-9a-fA-F]{1,4}:){1,4}:",
            ipv4_body!(),
            r"|",
            ipv4_body!()
        )
    };
}

macro_rules! url_schema {
    () => {
        r"((ftp|tcp|udp|wss?|https?)://)"
    };
}

macro_rules! url_username {
    () => {
        r"(\S+(:\S*)?@)"
    };
}

macro_rules! url_path {
    () => {
        r"((/|\?|#)[^\s]*)"
    };
}

macro_rules! url_port {
    () => {
        r"(:(\d{1,5}))"
    };
}

macro_rules! url_ip {
    () => {
        r"([1-9]\d?|1\d\d|2[01]\d|22[0-3])(\.(1?\d{1,2}|2[0-4]\d|25[0-5])){2}(?:\.([0-9]\d?|1\d\d|2[0-4]\d|25[0-4]))"
    };
}

macro_rules! url_subdomain {
    () => {
        r"((www\.)|([a-zA-Z0-9]+([-_.]?[a-zA-Z0-9])*[a-zA-Z0-9]\.[a-zA-Z0-9]+))"
    };
}

/// Printable user names, including the usual mailbox punctuation.
pub const USERNAME: &str = r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~.-]+$";
/// A host name with at least one dot.
pub const HOST: &str = r"^[^\s]+\.[^\s]+$";
/// RFC 5322 simplified mailbox.
pub const EMAIL: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";
/// Visa, MasterCard, Discover, Amex, Diners and JCB card numbers.
pub const CREDIT_CARD: &str = r"^(?:4[0-9]{12}(?:[0-9]{3})?|5[1-5][0-9]{14}|6(?:011|5[0-9][0-9])[0-9]{12}|3[47][0-9]{13}|3(?:0[0-5]|[68][0-9])[0-9]{11}|(?:2131|1800|35\d{3})\d{11})$";
/// ASCII letters.
pub const ALPHA: &str = r"^[a-zA-Z]+$";
/// ASCII letters and digits.
pub const ALPHA_NUMERIC: &str = r"^[a-zA-Z0-9]+$";
/// ASCII letters, digits, `-` and `_`.
pub const ALPHA_DASH: &str = r"^[a-zA-Z0-9_-]+$";
/// Unsigned decimal digits.
pub const NUMERIC: &str = r"^[0-9]+$";
/// Signed integer without leading zeros.
pub const INT: &str = r"^(?:[-+]?(?:0|[1-9][0-9]*))$";
/// Float literal with optional sign, fraction and exponent.
pub const FLOAT: &str = r"^(?:[-+]?(?:[0-9]+))?(?:\.[0-9]*)?(?:[eE][+-]?(?:[0-9]+))?$";
/// Currency amount with at most two decimals.
pub const MONEY: &str = r"^(0|[1-9][0-9]*)(\.[0-9]{1,2})?$";
/// `#rgb` or `#rrggbb`, hash optional.
pub const HEX_COLOR: &str = r"^#?([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$";
/// `rgb(r, g, b)` with components in 0..=255.
pub const RGB_COLOR: &str = r"^rgb\(\s*(0|[1-9]\d?|1\d\d?|2[0-4]\d|25[0-5])\s*,\s*(0|[1-9]\d?|1\d\d?|2[0-4]\d|25[0-5])\s*,\s*(0|[1-9]\d?|1\d\d?|2[0-4]\d|25[0-5])\s*\)$";
/// Seven-bit ASCII.
pub const ASCII: &str = r"^[\x00-\x7F]+$";
/// Padded standard base64.
pub const BASE64: &str = r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=|[A-Za-z0-9+/]{4})$";
/// DNS name, optionally with a trailing dot.
pub const DNS_NAME: &str = r"^([a-zA-Z0-9_]{1}[a-zA-Z0-9_-]{0,62}){1}(\.[a-zA-Z0-9_]{1}[a-zA-Z0-9_-]{0,62})*[._]?$";
/// IPv4, IPv6 and IPv4-mapped IPv6 addresses.
pub const IP: &str = concat!("^(?:", ip_body!(), ")$");

/// URL scheme fragment.
pub const URL_SCHEMA: &str = url_schema!();
/// URL userinfo fragment.
pub const URL_USERNAME: &str = url_username!();
/// URL path, query or fragment.
pub const URL_PATH: &str = url_path!();
/// URL port fragment.
pub const URL_PORT: &str = url_port!();
/// Dotted IPv4 host fragment.
pub const URL_IP: &str = url_ip!();
/// URL subdomain fragment.
pub const URL_SUBDOMAIN: &str = url_subdomain!();

/// Composite URL pattern assembled from the fragments above.
pub const URL: &str = concat!(
    "^",
    url_schema!(),
    "?",
    url_username!(),
    "?",
    "((",
    url_ip!(),
    r"|(\[(?:",
    ip_body!(),
    r")\])|(([a-zA-Z0-9]([a-zA-Z0-9_-]+)?[a-zA-Z0-9]([-.][a-zA-Z0-9]+)*)|(",
    url_subdomain!(),
    r"?))?(([a-zA-Z\x{00a1}-\x{ffff}0-9]+-?-?)*[a-zA-Z\x{00a1}-\x{ffff}0-9]+)(?:\.([a-zA-Z\x{00a1}-\x{ffff}]{1,}))?))\.?",
    url_port!(),
    "?",
    url_path!(),
    "?$"
);

/// Keys of the built-in patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternName {
    Username,
    Host,
    Email,
    CreditCard,
    Alpha,
    AlphaNumeric,
    AlphaDash,
    Numeric,
    Int,
    Float,
    Money,
    HexColor,
    RgbColor,
    Ascii,
    Base64,
    DnsName,
    Ip,
    Url,
}

impl PatternName {
    /// All built-in keys, in registration order.
    pub const ALL: [PatternName; 18] = [
        PatternName::Username,
        PatternName::Host,
        PatternName::Email,
        PatternName::CreditCard,
        PatternName::Alpha,
        PatternName::AlphaNumeric,
        PatternName::AlphaDash,
        PatternName::Numeric,
        PatternName::Int,
        PatternName::Float,
        PatternName::Money,
        PatternName::HexColor,
        PatternName::RgbColor,
        PatternName::Ascii,
        PatternName::Base64,
        PatternName::DnsName,
        PatternName::Ip,
        PatternName::Url,
    ];

    /// The lookup key used in a [`PatternLibrary`](crate::PatternLibrary).
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternName::Username => "username",
            PatternName::Host => "host",
            PatternName::Email => "email",
            PatternName::CreditCard => "creditCard",
            PatternName::Alpha => "alpha",
            PatternName::AlphaNumeric => "alphaNumeric",
            PatternName::AlphaDash => "alphaDash",
            PatternName::Numeric => "numeric",
            PatternName::Int => "int",
            PatternName::Float => "float",
            PatternName::Money => "money",
            PatternName::HexColor => "hexColor",
            PatternName::RgbColor => "rgbColor",
            PatternName::Ascii => "ascii",
            PatternName::Base64 => "base64",
            PatternName::DnsName => "dnsName",
            PatternName::Ip => "ip",
            PatternName::Url => "url",
        }
    }

    /// The source expression shipped for this key.
    pub fn source(&self) -> &'static str {
        match self {
            PatternName::Username => USERNAME,
            PatternName::Host => HOST,
            PatternName::Email => EMAIL,
            PatternName::CreditCard => CREDIT_CARD,
            PatternName::Alpha => ALPHA,
            PatternName::AlphaNumeric => ALPHA_NUMERIC,
            PatternName::AlphaDash => ALPHA_DASH,
            PatternName::Numeric => NUMERIC,
            PatternName::Int => INT,
            PatternName::Float => FLOAT,
            PatternName::Money => MONEY,
            PatternName::HexColor => HEX_COLOR,
            PatternName::RgbColor => RGB_COLOR,
            PatternName::Ascii => ASCII,
            PatternName::Base64 => BASE64,
            PatternName::DnsName => DNS_NAME,
            PatternName::Ip => IP,
            PatternName::Url => URL,
        }
    }
}

impl fmt::Display for PatternName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternName {
    type Err = crate::PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| crate::PatternError::Unknown(s.to_string()))
    }
}
