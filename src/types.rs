use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identity of a toast inside one provider.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ToastId(String);

impl ToastId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty id is what a detached handle hands back from `show`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ToastId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ToastId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Appearance {
    Themed,
    #[default]
    Neutral,
    Positive,
    Negative,
    ContrastStatic,
}

impl Appearance {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Themed => "themed",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::ContrastStatic => "contrast-static",
        }
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Negative)
    }
}

impl Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Appearance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "themed" => Ok(Self::Themed),
            "neutral" => Ok(Self::Neutral),
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "contrast-static" | "contrast_static" => Ok(Self::ContrastStatic),
            other => Err(format!("unknown appearance: {other}")),
        }
    }
}

/// Host platform whose visual conventions the presentation follows.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    #[default]
    Android,
}

impl Platform {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Appearance, Platform};
    use std::str::FromStr;

    #[test]
    fn appearance_from_str_accepts_variants() {
        assert_eq!(Appearance::from_str("positive"), Ok(Appearance::Positive));
        assert_eq!(
            Appearance::from_str("Contrast-Static"),
            Ok(Appearance::ContrastStatic)
        );
        assert!(Appearance::from_str("loud").is_err());
    }

    #[test]
    fn appearance_serde_uses_kebab_case() {
        let parsed: Appearance = match serde_json::from_str(r#""contrast-static""#) {
            Ok(value) => value,
            Err(err) => panic!("failed to parse appearance: {err}"),
        };
        assert_eq!(parsed, Appearance::ContrastStatic);
        assert_eq!(Appearance::default(), Appearance::Neutral);
    }

    #[test]
    fn platform_defaults_to_android() {
        assert_eq!(Platform::default(), Platform::Android);
        assert_eq!(Platform::from_str("IOS"), Ok(Platform::Ios));
        assert!(Platform::from_str("symbian").is_err());
    }
}
