//! Closed field enumerations of the rule grammar

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error type for parsing a closed field or value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError {
    kind: &'static str,
    value: String,
}

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for ParseFieldError {}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseFieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ParseFieldError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum! {
    /// Field naming the traffic a rule matches; always the first assignment
    PrimaryField, "primary destination" {
        /// Hostname syntax
        DestDomain => "dest_domain",
        /// Hostname syntax
        DestHost => "dest_host",
        /// IPv4 or IPv6 literal
        DestIp => "dest_ip",
        /// Regular expression over the host
        HostRegex => "host_regex",
        /// Regular expression over the URL
        UrlRegex => "url_regex",
    }
}

closed_enum! {
    /// Field narrowing a match; anything between primary and action
    SecondaryField, "secondary specifier" {
        Port => "port",
        Scheme => "scheme",
        Prefix => "prefix",
        Suffix => "suffix",
        Method => "method",
        Time => "time",
        SrcIp => "src_ip",
        Internal => "internal",
    }
}

closed_enum! {
    /// Cache behavior to apply; always the last assignment
    ActionField, "action" {
        Action => "action",
        CacheResponsesToCookies => "cache-responses-to-cookies",
        PinInCache => "pin-in-cache",
        Revalidate => "revalidate",
        TtlInCache => "ttl-in-cache",
    }
}

closed_enum! {
    /// Values accepted by the `scheme` specifier
    Scheme, "scheme" {
        Http => "http",
        Https => "https",
    }
}

closed_enum! {
    /// Values accepted by the `method` specifier (lowercase only)
    Method, "method" {
        Get => "get",
        Head => "head",
        Post => "post",
        Put => "put",
        Delete => "delete",
        Connect => "connect",
        Options => "options",
        Trace => "trace",
        Patch => "patch",
        Push => "push",
    }
}
