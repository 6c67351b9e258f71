use crate::detect::Context;
use std::{env, fmt, str::FromStr};
use thiserror::Error;

pub const PLATFORM_ENV: &str = "VADER_PLATFORM";

/// Generation target. Each platform maps to exactly one emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Platform {
    #[default]
    Web,
    React,
    Vue,
    Node,
    Express,
    ReactNative,
    Flutter,
    Ios,
    Android,
    Blockchain,
    Iot,
    AiMl,
    Database,
    Electronics,
    Cloud,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown platform `{0}`")]
pub struct UnknownPlatform(pub String);

impl Platform {
    pub const ALL: [Platform; 15] = [
        Platform::Web,
        Platform::React,
        Platform::Vue,
        Platform::Node,
        Platform::Express,
        Platform::ReactNative,
        Platform::Flutter,
        Platform::Ios,
        Platform::Android,
        Platform::Blockchain,
        Platform::Iot,
        Platform::AiMl,
        Platform::Database,
        Platform::Electronics,
        Platform::Cloud,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::React => "react",
            Platform::Vue => "vue",
            Platform::Node => "node",
            Platform::Express => "express",
            Platform::ReactNative => "react-native",
            Platform::Flutter => "flutter",
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Blockchain => "blockchain",
            Platform::Iot => "iot",
            Platform::AiMl => "ai_ml",
            Platform::Database => "database",
            Platform::Electronics => "electronics",
            Platform::Cloud => "cloud",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Platform::Web => "html",
            Platform::React | Platform::ReactNative => "jsx",
            Platform::Vue => "vue",
            Platform::Node | Platform::Express | Platform::Cloud => "js",
            Platform::Flutter => "dart",
            Platform::Ios => "swift",
            Platform::Android => "kt",
            Platform::Blockchain => "sol",
            Platform::Iot => "ino",
            Platform::AiMl => "py",
            Platform::Database => "sql",
            Platform::Electronics => "c",
        }
    }

    /// Default platform for a detected context.
    pub fn for_context(context: Context) -> Self {
        match context {
            Context::Web => Platform::Web,
            Context::Mobile => Platform::ReactNative,
            Context::Database => Platform::Database,
            Context::Blockchain => Platform::Blockchain,
            Context::Iot => Platform::Iot,
            Context::Ai => Platform::AiMl,
            Context::Electronics => Platform::Electronics,
            Context::Cloud => Platform::Cloud,
        }
    }
}

/// Platform id asked for by the user: the flag, then `VADER_PLATFORM`,
/// then the configured value. `None` means the caller should use the
/// detected context. Ids are not validated here; the generator falls back
/// to web for any id it has no emitter for.
pub fn requested_platform(flag: Option<String>, configured: Option<&str>) -> Option<String> {
    first_requested(flag, env::var(PLATFORM_ENV).ok(), configured)
}

fn first_requested(
    flag: Option<String>,
    from_env: Option<String>,
    configured: Option<&str>,
) -> Option<String> {
    [flag, from_env, configured.map(str::to_string)]
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('_', "-");
        Platform::ALL
            .into_iter()
            .find(|platform| platform.id().replace('_', "-") == needle)
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}
