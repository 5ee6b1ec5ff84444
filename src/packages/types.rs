// src/packages/types.rs

//! Enumerations carried by the native package records
//!
//! Each is a 4-byte integer on the wire. A value with no defined constant is
//! kept as `Unknown(raw)` so it survives a decode/encode cycle unchanged;
//! strict decoding rejects it with `Error::InvalidEnum` instead.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! native_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A native value with no defined constant
            Unknown(u32),
        }

        impl $name {
            /// Raw native value
            pub fn raw(self) -> u32 {
                match self {
                    $( $name::$variant => $value, )+
                    $name::Unknown(value) => value,
                }
            }

            /// Map a native value, keeping undefined values as `Unknown`
            pub fn from_raw(value: u32) -> Self {
                match value {
                    $( $value => $name::$variant, )+
                    other => $name::Unknown(other),
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                    $name::Unknown(_) => "unknown",
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Unknown(_))
            }

            pub(crate) fn decode(value: u32, strict: bool) -> Result<Self> {
                if strict {
                    Self::try_from(value)
                } else {
                    Ok(Self::from_raw(value))
                }
            }
        }

        impl TryFrom<u32> for $name {
            type Error = Error;

            fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
                match Self::from_raw(value) {
                    $name::Unknown(value) => Err(Error::InvalidEnum { kind: $kind, value }),
                    known => Ok(known),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $name::Unknown(value) => write!(f, "unknown ({})", value),
                    known => f.write_str(known.as_str()),
                }
            }
        }
    };
}

native_enum! {
    /// State of a package or feature (`DismPackageFeatureState`)
    PackageFeatureState, "package state" {
        #[default]
        NotPresent = 0 => "not present",
        UninstallPending = 1 => "uninstall pending",
        Staged = 2 => "staged",
        /// Also reported as "removed"
        Resolved = 3 => "resolved",
        Installed = 4 => "installed",
        InstallPending = 5 => "install pending",
        Superseded = 6 => "superseded",
        PartiallyInstalled = 7 => "partially installed",
    }
}

impl PackageFeatureState {
    /// The native API defines "removed" as an alias of resolved
    pub const REMOVED: PackageFeatureState = PackageFeatureState::Resolved;
}

native_enum! {
    /// Release type of a package (`DismReleaseType`)
    ReleaseType, "release type" {
        #[default]
        CriticalUpdate = 0 => "critical update",
        Driver = 1 => "driver",
        FeaturePack = 2 => "feature pack",
        Hotfix = 3 => "hotfix",
        SecurityUpdate = 4 => "security update",
        SoftwareUpdate = 5 => "software update",
        Update = 6 => "update",
        UpdateRollup = 7 => "update rollup",
        LanguagePack = 8 => "language pack",
        Foundation = 9 => "foundation",
        ServicePack = 10 => "service pack",
        Product = 11 => "product",
        LocalPack = 12 => "local pack",
        Other = 13 => "other",
        OnDemandPack = 14 => "on-demand pack",
    }
}

native_enum! {
    /// Whether a restart is needed after installing online (`DismRestartType`)
    RestartType, "restart type" {
        #[default]
        No = 0 => "no",
        Possible = 1 => "possible",
        Required = 2 => "required",
    }
}

native_enum! {
    /// Whether a package installs offline without booting the image
    /// (`DismFullyOfflineInstallableType`)
    FullyOfflineInstallableType, "fully offline installable type" {
        #[default]
        Installable = 0 => "installable",
        NotInstallable = 1 => "not installable",
        Undetermined = 2 => "undetermined",
    }
}
