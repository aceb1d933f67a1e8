use serde::{Deserialize, Serialize};
use std::fmt;

/// The known renderer settings, every field optional.
///
/// A field is `Some` only when the corresponding line was found during
/// decode (or should be written during encode). Absent fields are
/// omitted from JSON entirely; defaulting is a UI concern, not handled
/// here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ray_tracing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lumen: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nanite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_shadow_maps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anti_aliasing: Option<AntiAliasingMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vsync: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rhi: Option<GraphicsRhi>,
}

impl EngineSettings {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Value of `r.AntiAliasingMethod`. The engine accepts 0, 1, 2, and 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AntiAliasingMethod {
    None,
    Fxaa,
    Taa,
    Tsr,
}

impl AntiAliasingMethod {
    /// Map a raw config value to a method; values outside 0/1/2/4 have
    /// no representation and are treated as absent by the decoder.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::None),
            1 => Some(Self::Fxaa),
            2 => Some(Self::Taa),
            4 => Some(Self::Tsr),
            _ => None,
        }
    }

    pub fn as_raw(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Fxaa => 1,
            Self::Taa => 2,
            Self::Tsr => 4,
        }
    }
}

impl From<AntiAliasingMethod> for u8 {
    fn from(method: AntiAliasingMethod) -> u8 {
        method.as_raw()
    }
}

impl TryFrom<u8> for AntiAliasingMethod {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::from_raw(raw).ok_or_else(|| format!("invalid anti-aliasing method: {raw}"))
    }
}

impl fmt::Display for AntiAliasingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_raw())
    }
}

/// Value of `DefaultGraphicsRHI`, stored verbatim in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphicsRhi {
    #[serde(rename = "DefaultGraphicsRHI_DX11")]
    Dx11,
    #[serde(rename = "DefaultGraphicsRHI_DX12")]
    Dx12,
    #[serde(rename = "DefaultGraphicsRHI_Vulkan")]
    Vulkan,
}

impl GraphicsRhi {
    /// The exact string written to the config file.
    pub fn as_config_value(self) -> &'static str {
        match self {
            Self::Dx11 => "DefaultGraphicsRHI_DX11",
            Self::Dx12 => "DefaultGraphicsRHI_DX12",
            Self::Vulkan => "DefaultGraphicsRHI_Vulkan",
        }
    }

    /// Inverse of [`as_config_value`](Self::as_config_value); unknown
    /// strings have no representation and decode as absent.
    pub fn from_config_value(value: &str) -> Option<Self> {
        match value {
            "DefaultGraphicsRHI_DX11" => Some(Self::Dx11),
            "DefaultGraphicsRHI_DX12" => Some(Self::Dx12),
            "DefaultGraphicsRHI_Vulkan" => Some(Self::Vulkan),
            _ => None,
        }
    }
}

impl fmt::Display for GraphicsRhi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_config_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anti_aliasing_raw_round_trip() {
        for raw in [0u8, 1, 2, 4] {
            assert_eq!(AntiAliasingMethod::from_raw(raw).unwrap().as_raw(), raw);
        }
        assert!(AntiAliasingMethod::from_raw(3).is_none());
        assert!(AntiAliasingMethod::from_raw(5).is_none());
    }

    #[test]
    fn rhi_config_value_round_trip() {
        for rhi in [GraphicsRhi::Dx11, GraphicsRhi::Dx12, GraphicsRhi::Vulkan] {
            assert_eq!(GraphicsRhi::from_config_value(rhi.as_config_value()), Some(rhi));
        }
        assert!(GraphicsRhi::from_config_value("DefaultGraphicsRHI_Metal").is_none());
    }

    #[test]
    fn absent_fields_stay_out_of_json() {
        let settings = EngineSettings {
            nanite: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"nanite":true}"#);
    }

    #[test]
    fn json_field_names_are_camel_case() {
        let settings = EngineSettings {
            ray_tracing: Some(false),
            virtual_shadow_maps: Some(true),
            anti_aliasing: Some(AntiAliasingMethod::Tsr),
            rhi: Some(GraphicsRhi::Vulkan),
            ..Default::default()
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["rayTracing"], false);
        assert_eq!(json["virtualShadowMaps"], true);
        assert_eq!(json["antiAliasing"], 4);
        assert_eq!(json["rhi"], "DefaultGraphicsRHI_Vulkan");
    }

    #[test]
    fn anti_aliasing_rejects_invalid_json() {
        let parsed: Result<AntiAliasingMethod, _> = serde_json::from_str("3");
        assert!(parsed.is_err());
    }
}
