use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiProvider {
    #[default]
    MyMemory,
    Custom,
}

/// User settings as the options page stores them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub api_provider: ApiProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_api_key: Option<String>,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Settings from a raw storage value. Missing or unreadable values fall
    /// back to the defaults.
    pub fn from_storage(value: Option<&str>) -> Self {
        let Some(json) = value else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(target: "easywriter.net", "ignoring unreadable settings: {e}");
                Self::default()
            }
        }
    }
}
