//! Sync modes, field events and sync decisions
//!
//! The sync mode is a form-level setting that controls when a field event
//! resynchronizes displayed constraints and validation with the schema:
//! - onBlur: on leaving a field (default)
//! - onChange: on every value change
//! - onTouched: on blur, and on change once the field has been touched
//! - all: on both events
//! - disabled: never (configured as `false`)

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Schema sync mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SyncMode {
    #[default]
    OnBlur,
    OnChange,
    OnTouched,
    All,
    Disabled,
}

impl SyncMode {
    /// Every mode, in declaration order
    pub const ALL_MODES: [SyncMode; 5] = [
        SyncMode::OnBlur,
        SyncMode::OnChange,
        SyncMode::OnTouched,
        SyncMode::All,
        SyncMode::Disabled,
    ];

    /// Parse a configured mode name. `"false"` names the disabled mode.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "onBlur" => Some(SyncMode::OnBlur),
            "onChange" => Some(SyncMode::OnChange),
            "onTouched" => Some(SyncMode::OnTouched),
            "all" => Some(SyncMode::All),
            "false" | "disabled" => Some(SyncMode::Disabled),
            _ => None,
        }
    }

    /// Parse a configured mode name, degrading unknown names to `Disabled`
    pub fn parse_lenient(name: &str) -> Self {
        SyncMode::parse(name).unwrap_or_else(|| {
            tracing::warn!(mode = name, "unrecognized schema sync mode, sync disabled");
            SyncMode::Disabled
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SyncMode::OnBlur => "onBlur",
            SyncMode::OnChange => "onChange",
            SyncMode::OnTouched => "onTouched",
            SyncMode::All => "all",
            SyncMode::Disabled => "disabled",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SyncMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SyncMode::Disabled => serializer.serialize_bool(false),
            mode => serializer.serialize_str(mode.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for SyncMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ModeVisitor;

        impl<'de> Visitor<'de> for ModeVisitor {
            type Value = SyncMode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sync mode name or `false`")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SyncMode, E> {
                Ok(SyncMode::parse_lenient(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<SyncMode, E> {
                if v {
                    tracing::warn!("schema sync mode `true` is not a mode, sync disabled");
                }
                Ok(SyncMode::Disabled)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<SyncMode, E> {
                Ok(unrecognized(&v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<SyncMode, E> {
                Ok(unrecognized(&v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<SyncMode, E> {
                Ok(unrecognized(&v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<SyncMode, E> {
                Ok(unrecognized(&"null"))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<SyncMode, A::Error> {
                while seq.next_element::<de::IgnoredAny>()?.is_some() {}
                Ok(unrecognized(&"list"))
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<SyncMode, A::Error> {
                while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
                Ok(unrecognized(&"object"))
            }
        }

        fn unrecognized(value: &dyn fmt::Display) -> SyncMode {
            tracing::warn!(mode = %value, "unrecognized schema sync mode, sync disabled");
            SyncMode::Disabled
        }

        deserializer.deserialize_any(ModeVisitor)
    }
}

/// Field event kinds the coordinator reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyncEvent {
    /// Field value changed
    Change,
    /// Field lost focus
    Blur,
}

impl SyncEvent {
    pub const ALL_EVENTS: [SyncEvent; 2] = [SyncEvent::Change, SyncEvent::Blur];

    pub fn as_str(self) -> &'static str {
        match self {
            SyncEvent::Change => "change",
            SyncEvent::Blur => "blur",
        }
    }
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating the sync policy for one event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SyncDecision {
    /// Ask the constraint source to recompute the field's constraints
    pub refresh_constraints: bool,
    /// Select a revalidation set and hand it to the validator
    pub revalidate: bool,
}

impl SyncDecision {
    pub const NONE: SyncDecision = SyncDecision {
        refresh_constraints: false,
        revalidate: false,
    };

    pub const FULL: SyncDecision = SyncDecision {
        refresh_constraints: true,
        revalidate: true,
    };

    #[inline]
    pub fn new(refresh_constraints: bool, revalidate: bool) -> Self {
        SyncDecision {
            refresh_constraints,
            revalidate,
        }
    }

    #[inline]
    pub fn is_noop(self) -> bool {
        !self.refresh_constraints && !self.revalidate
    }

    /// Same decision with the validate call suppressed
    #[inline]
    pub fn without_revalidation(self) -> Self {
        SyncDecision {
            revalidate: false,
            ..self
        }
    }
}
