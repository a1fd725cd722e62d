//! Render pass flags and the per-engine pass sets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LibraryError;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum PassFlag {
    #[serde(rename = "use_pass_combined")]
    Combined,
    #[serde(rename = "use_pass_z")]
    Z,
    #[serde(rename = "use_pass_position")]
    Position,
    #[serde(rename = "use_pass_normal")]
    Normal,
    #[serde(rename = "use_pass_vector")]
    Vector,
    #[serde(rename = "use_pass_uv")]
    Uv,
    #[serde(rename = "use_pass_mist")]
    Mist,
    #[serde(rename = "use_pass_object_index")]
    ObjectIndex,
    #[serde(rename = "use_pass_material_index")]
    MaterialIndex,
    #[serde(rename = "use_pass_alpha")]
    Alpha,
    #[serde(rename = "use_pass_diffuse_direct")]
    DiffuseDirect,
    #[serde(rename = "use_pass_diffuse_indirect")]
    DiffuseIndirect,
    #[serde(rename = "use_pass_diffuse_color")]
    DiffuseColor,
    #[serde(rename = "use_pass_glossy_direct")]
    GlossyDirect,
    #[serde(rename = "use_pass_glossy_indirect")]
    GlossyIndirect,
    #[serde(rename = "use_pass_glossy_color")]
    GlossyColor,
    #[serde(rename = "use_pass_transmission_direct")]
    TransmissionDirect,
    #[serde(rename = "use_pass_transmission_indirect")]
    TransmissionIndirect,
    #[serde(rename = "use_pass_transmission_color")]
    TransmissionColor,
    #[serde(rename = "use_pass_volume_direct")]
    VolumeDirect,
    #[serde(rename = "use_pass_emit")]
    Emit,
    #[serde(rename = "use_pass_environment")]
    Environment,
    #[serde(rename = "use_pass_shadow")]
    Shadow,
    #[serde(rename = "use_pass_ambient_occlusion")]
    AmbientOcclusion,
    #[serde(rename = "use_pass_transparent")]
    Transparent,
    #[serde(rename = "use_pass_cryptomatte_object")]
    CryptomatteObject,
    #[serde(rename = "use_pass_cryptomatte_material")]
    CryptomatteMaterial,
    #[serde(rename = "use_pass_cryptomatte_asset")]
    CryptomatteAsset,
    #[serde(rename = "use_denoising_data")]
    DenoisingData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassCategory {
    Data,
    Light,
    Cryptomatte,
    Other,
}

impl fmt::Display for PassCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PassCategory::Data => "Data",
            PassCategory::Light => "Light",
            PassCategory::Cryptomatte => "Crypto Matte",
            PassCategory::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

const DATA_PASSES: &[PassFlag] = &[
    PassFlag::Combined,
    PassFlag::Z,
    PassFlag::Position,
    PassFlag::Normal,
    PassFlag::Vector,
    PassFlag::Uv,
    PassFlag::Mist,
    PassFlag::ObjectIndex,
    PassFlag::MaterialIndex,
    PassFlag::Alpha,
];

const CYCLES_PASSES: &[PassFlag] = PassFlag::ALL;

const EEVEE_PASSES: &[PassFlag] = &[
    PassFlag::Combined,
    PassFlag::Z,
    PassFlag::Position,
    PassFlag::Normal,
    PassFlag::Vector,
    PassFlag::Uv,
    PassFlag::Mist,
    PassFlag::ObjectIndex,
    PassFlag::MaterialIndex,
    PassFlag::Alpha,
    PassFlag::DiffuseDirect,
    PassFlag::DiffuseColor,
    PassFlag::GlossyDirect,
    PassFlag::GlossyColor,
    PassFlag::Emit,
    PassFlag::Environment,
    PassFlag::Shadow,
    PassFlag::AmbientOcclusion,
    PassFlag::VolumeDirect,
    PassFlag::Transparent,
    PassFlag::CryptomatteObject,
    PassFlag::CryptomatteMaterial,
    PassFlag::CryptomatteAsset,
];

/// Passes selected by the Default preset and by a reset.
pub const DEFAULT_PASSES: &[PassFlag] = &[PassFlag::Combined, PassFlag::Z];

impl PassFlag {
    pub const ALL: &'static [PassFlag] = &[
        PassFlag::Combined,
        PassFlag::Z,
        PassFlag::Position,
        PassFlag::Normal,
        PassFlag::Vector,
        PassFlag::Uv,
        PassFlag::Mist,
        PassFlag::ObjectIndex,
        PassFlag::MaterialIndex,
        PassFlag::Alpha,
        PassFlag::DiffuseDirect,
        PassFlag::DiffuseIndirect,
        PassFlag::DiffuseColor,
        PassFlag::GlossyDirect,
        PassFlag::GlossyIndirect,
        PassFlag::GlossyColor,
        PassFlag::TransmissionDirect,
        PassFlag::TransmissionIndirect,
        PassFlag::TransmissionColor,
        PassFlag::VolumeDirect,
        PassFlag::Emit,
        PassFlag::Environment,
        PassFlag::Shadow,
        PassFlag::AmbientOcclusion,
        PassFlag::Transparent,
        PassFlag::CryptomatteObject,
        PassFlag::CryptomatteMaterial,
        PassFlag::CryptomatteAsset,
        PassFlag::DenoisingData,
    ];

    /// Attribute name used in config files, e.g. `use_pass_z`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PassFlag::Combined => "use_pass_combined",
            PassFlag::Z => "use_pass_z",
            PassFlag::Position => "use_pass_position",
            PassFlag::Normal => "use_pass_normal",
            PassFlag::Vector => "use_pass_vector",
            PassFlag::Uv => "use_pass_uv",
            PassFlag::Mist => "use_pass_mist",
            PassFlag::ObjectIndex => "use_pass_object_index",
            PassFlag::MaterialIndex => "use_pass_material_index",
            PassFlag::Alpha => "use_pass_alpha",
            PassFlag::DiffuseDirect => "use_pass_diffuse_direct",
            PassFlag::DiffuseIndirect => "use_pass_diffuse_indirect",
            PassFlag::DiffuseColor => "use_pass_diffuse_color",
            PassFlag::GlossyDirect => "use_pass_glossy_direct",
            PassFlag::GlossyIndirect => "use_pass_glossy_indirect",
            PassFlag::GlossyColor => "use_pass_glossy_color",
            PassFlag::TransmissionDirect => "use_pass_transmission_direct",
            PassFlag::TransmissionIndirect => "use_pass_transmission_indirect",
            PassFlag::TransmissionColor => "use_pass_transmission_color",
            PassFlag::VolumeDirect => "use_pass_volume_direct",
            PassFlag::Emit => "use_pass_emit",
            PassFlag::Environment => "use_pass_environment",
            PassFlag::Shadow => "use_pass_shadow",
            PassFlag::AmbientOcclusion => "use_pass_ambient_occlusion",
            PassFlag::Transparent => "use_pass_transparent",
            PassFlag::CryptomatteObject => "use_pass_cryptomatte_object",
            PassFlag::CryptomatteMaterial => "use_pass_cryptomatte_material",
            PassFlag::CryptomatteAsset => "use_pass_cryptomatte_asset",
            PassFlag::DenoisingData => "use_denoising_data",
        }
    }

    pub fn category(&self) -> PassCategory {
        match self {
            PassFlag::CryptomatteObject
            | PassFlag::CryptomatteMaterial
            | PassFlag::CryptomatteAsset => PassCategory::Cryptomatte,
            PassFlag::DenoisingData => PassCategory::Other,
            flag if DATA_PASSES.contains(flag) => PassCategory::Data,
            _ => PassCategory::Light,
        }
    }

    /// Label shown next to the checkbox.
    pub fn label(&self) -> String {
        match self {
            PassFlag::Combined => "Combined".to_string(),
            PassFlag::Z => "Depth".to_string(),
            PassFlag::Position => "Position".to_string(),
            PassFlag::CryptomatteObject => "Cryptomatte Object".to_string(),
            PassFlag::CryptomatteMaterial => "Cryptomatte Material".to_string(),
            PassFlag::CryptomatteAsset => "Cryptomatte Asset".to_string(),
            other => {
                let raw = other.as_str();
                let trimmed = raw
                    .strip_prefix("use_pass_")
                    .or_else(|| raw.strip_prefix("use_"))
                    .unwrap_or(raw);
                title_case(trimmed)
            }
        }
    }
}

fn title_case(snake: &str) -> String {
    snake
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for PassFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PassFlag {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PassFlag::ALL
            .iter()
            .copied()
            .find(|flag| flag.as_str() == s)
            .ok_or_else(|| LibraryError::InvalidArgument(format!("Unknown pass flag '{}'", s)))
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum RenderEngine {
    #[default]
    #[serde(rename = "CYCLES")]
    Cycles,
    #[serde(rename = "BLENDER_EEVEE")]
    Eevee,
    #[serde(rename = "BLENDER_EEVEE_NEXT")]
    EeveeNext,
    #[serde(rename = "BLENDER_WORKBENCH")]
    Workbench,
    /// Any engine without a dedicated pass profile.
    #[serde(rename = "OTHER", other)]
    Other,
}

impl RenderEngine {
    pub const ALL: &'static [RenderEngine] = &[
        RenderEngine::Cycles,
        RenderEngine::Eevee,
        RenderEngine::EeveeNext,
        RenderEngine::Workbench,
    ];

    pub fn profile(&self) -> PassProfile {
        match self {
            RenderEngine::Cycles => PassProfile::Cycles,
            RenderEngine::Eevee | RenderEngine::EeveeNext => PassProfile::Eevee,
            RenderEngine::Workbench | RenderEngine::Other => PassProfile::Basic,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RenderEngine::Cycles => "Cycles",
            RenderEngine::Eevee => "Eevee",
            RenderEngine::EeveeNext => "Eevee Next",
            RenderEngine::Workbench => "Workbench",
            RenderEngine::Other => "Other",
        }
    }
}

/// The set of pass flags a family of render engines exposes.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[serde(rename_all = "lowercase")]
pub enum PassProfile {
    Cycles,
    Eevee,
    Basic,
}

impl PassProfile {
    pub const ALL: &'static [PassProfile] =
        &[PassProfile::Cycles, PassProfile::Eevee, PassProfile::Basic];

    pub fn passes(&self) -> &'static [PassFlag] {
        match self {
            PassProfile::Cycles => CYCLES_PASSES,
            PassProfile::Eevee => EEVEE_PASSES,
            PassProfile::Basic => DATA_PASSES,
        }
    }

    pub fn supports(&self, flag: PassFlag) -> bool {
        self.passes().contains(&flag)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PassProfile::Cycles => "Cycles",
            PassProfile::Eevee => "Eevee",
            PassProfile::Basic => "Basic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_attribute_names() {
        assert_eq!(PassFlag::Z.label(), "Depth");
        assert_eq!(PassFlag::DiffuseDirect.label(), "Diffuse Direct");
        assert_eq!(PassFlag::AmbientOcclusion.label(), "Ambient Occlusion");
        assert_eq!(PassFlag::DenoisingData.label(), "Denoising Data");
    }

    #[test]
    fn categories() {
        assert_eq!(PassFlag::Mist.category(), PassCategory::Data);
        assert_eq!(PassFlag::Shadow.category(), PassCategory::Light);
        assert_eq!(PassFlag::CryptomatteAsset.category(), PassCategory::Cryptomatte);
        assert_eq!(PassFlag::DenoisingData.category(), PassCategory::Other);
    }

    #[test]
    fn profiles_are_nested() {
        assert_eq!(PassProfile::Cycles.passes().len(), 29);
        for flag in PassProfile::Eevee.passes() {
            assert!(PassProfile::Cycles.supports(*flag));
        }
        for flag in PassProfile::Basic.passes() {
            assert!(PassProfile::Eevee.supports(*flag));
        }
        assert!(!PassProfile::Eevee.supports(PassFlag::DiffuseIndirect));
        assert_eq!(RenderEngine::EeveeNext.profile(), PassProfile::Eevee);
    }

    #[test]
    fn parse_pass_names() {
        assert_eq!("use_pass_z".parse::<PassFlag>().unwrap(), PassFlag::Z);
        assert!("use_pass_bogus".parse::<PassFlag>().is_err());
    }
}
