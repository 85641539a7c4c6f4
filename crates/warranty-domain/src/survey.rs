//! Infrastructure-interest survey types.
//!
//! The survey is independent of the warranty domain; these enums only pin
//! down the accepted answers.

use std::fmt;
use std::str::FromStr;

use crate::UnknownVariant;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant::new($field, s, &[$($wire),+]))
            }
        }
    };
}

wire_enum! {
    /// Organisation category of the respondent.
    SurveyCategory, "category" {
        MsmeOrEducational => "MSME/Educational_Institutions",
        Datacentres => "Datacentres",
    }
}

wire_enum! {
    /// Parameter count of the base model the respondent runs.
    BaseModelSize, "baseModelSize" {
        AtLeast3B => ">=3B",
        B7 => "7B",
        B13 => "13B",
        B34 => "34B",
        B70 => "70B",
        B180 => "180B",
        B450 => "450B",
        B700 => "700B",
    }
}

wire_enum! {
    /// Kind of workload the respondent plans to run.
    Workload, "workloads" {
        Finetuning => "Finetuning",
        Inference => "Inference",
        Both => "Both",
    }
}

wire_enum! {
    /// Infrastructure the respondent currently operates.
    InfraType, "infraType" {
        OnPremise => "On-premise",
        PrivateCloud => "Private Cloud",
        NoExisting => "No Existing AI Infrastructure",
    }
}

wire_enum! {
    /// Stored form of the survey's yes/no answers.
    YesNo, "yes_no" {
        Yes => "Yes",
        No => "No",
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}
