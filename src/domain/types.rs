//! Typed behavioral settings
//!
//! Enumerated setting values. Symbols are parsed case sensitively, exactly as
//! they are written in the configuration document.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Error returned when a symbol does not name a variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSymbol {
    pub symbol: String,
    pub expected: &'static [&'static str],
}

impl fmt::Display for UnknownSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown symbol '{}', expected one of: {}",
            self.symbol,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for UnknownSymbol {}

/// Declares a symbol enum with `FromStr`, `Display` and `as_str`
macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $symbol:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $symbol)] $variant ),+
        }

        impl $name {
            /// Every symbol accepted by `from_str`
            pub const SYMBOLS: &'static [&'static str] = &[$($symbol),+];

            /// Document symbol for this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $symbol ),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownSymbol;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $symbol => Ok($name::$variant), )+
                    _ => Err(UnknownSymbol {
                        symbol: s.to_string(),
                        expected: Self::SYMBOLS,
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

pub(crate) use symbol_enum;

symbol_enum! {
    /// How columns are automatically mapped to fields
    pub enum AutoMappingBehavior {
        /// No auto-mapping
        None => "NONE",
        /// Auto-map results without nested result mappings
        Partial => "PARTIAL",
        /// Auto-map everything
        Full => "FULL",
    }
}

symbol_enum! {
    /// What to do when auto-mapping meets an unknown column
    pub enum AutoMappingUnknownColumnBehavior {
        None => "NONE",
        Warning => "WARNING",
        Failing => "FAILING",
    }
}

symbol_enum! {
    /// Default statement executor
    pub enum ExecutorType {
        Simple => "SIMPLE",
        Reuse => "REUSE",
        Batch => "BATCH",
    }
}

symbol_enum! {
    /// Scope of the local (first-level) cache
    pub enum LocalCacheScope {
        Session => "SESSION",
        Statement => "STATEMENT",
    }
}

symbol_enum! {
    /// Default scrolling strategy for result sets
    pub enum ResultSetType {
        Default => "DEFAULT",
        ForwardOnly => "FORWARD_ONLY",
        ScrollInsensitive => "SCROLL_INSENSITIVE",
        ScrollSensitive => "SCROLL_SENSITIVE",
    }
}

/// Logging implementation selected by the `logImpl` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogImpl {
    /// Route statement logs through `tracing`
    Tracing,
    /// Print statement logs to standard output
    Stdout,
    /// Discard statement logs
    NoLogging,
}
