use crate::constants;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One output image: a square of `pixels` written as `<name>.png`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub pixels: u32,
    pub name: String,
}

impl IconSpec {
    pub fn new(pixels: u32, name: impl Into<String>) -> Self {
        IconSpec {
            pixels,
            name: name.into(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, constants::icons::ICON_EXTENSION)
    }
}

/// Device class a descriptor row targets
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Idiom {
    Iphone,
    Ipad,
    IosMarketing,
}

impl Idiom {
    pub fn as_str(&self) -> &'static str {
        match self {
            Idiom::Iphone => "iphone",
            Idiom::Ipad => "ipad",
            Idiom::IosMarketing => "ios-marketing",
        }
    }
}

impl fmt::Display for Idiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of `Contents.json`. Field order is the serialized key order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub size: String,
    pub idiom: Idiom,
    pub filename: String,
    pub scale: String,
}

impl ManifestEntry {
    pub fn new(points: &str, idiom: Idiom, filename: &str, scale: u32) -> Self {
        ManifestEntry {
            size: format!("{}x{}", points, points),
            idiom,
            filename: filename.to_string(),
            scale: format!("{}x", scale),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_author")]
    pub author: String,
}

fn default_version() -> u32 {
    constants::manifest::VERSION
}

fn default_author() -> String {
    constants::manifest::AUTHOR.to_string()
}

impl Default for ManifestInfo {
    fn default() -> Self {
        ManifestInfo {
            version: default_version(),
            author: default_author(),
        }
    }
}

// (pixels, name). iPhone and iPad share some names; those files are simply
// written twice with identical content.
const IOS_ICONS: &[(u32, &str)] = &[
    // iPhone notification
    (40, "Icon-20@2x"),
    (60, "Icon-20@3x"),
    // iPhone settings
    (58, "Icon-29@2x"),
    (87, "Icon-29@3x"),
    // iPhone spotlight
    (80, "Icon-40@2x"),
    (120, "Icon-40@3x"),
    // iPhone app
    (120, "Icon-60@2x"),
    (180, "Icon-60@3x"),
    // iPad notification
    (20, "Icon-20"),
    (40, "Icon-20@2x"),
    // iPad settings
    (29, "Icon-29"),
    (58, "Icon-29@2x"),
    // iPad spotlight
    (40, "Icon-40"),
    (80, "Icon-40@2x"),
    // iPad app
    (76, "Icon-76"),
    (152, "Icon-76@2x"),
    // iPad Pro app
    (167, "Icon-83.5@2x"),
    // App Store
    (1024, "Icon-1024"),
];

// (points, idiom, filename, scale)
const IOS_MANIFEST: &[(&str, Idiom, &str, u32)] = &[
    ("20", Idiom::Iphone, "Icon-20@2x.png", 2),
    ("20", Idiom::Iphone, "Icon-20@3x.png", 3),
    ("29", Idiom::Iphone, "Icon-29@2x.png", 2),
    ("29", Idiom::Iphone, "Icon-29@3x.png", 3),
    ("40", Idiom::Iphone, "Icon-40@2x.png", 2),
    ("40", Idiom::Iphone, "Icon-40@3x.png", 3),
    ("60", Idiom::Iphone, "Icon-60@2x.png", 2),
    ("60", Idiom::Iphone, "Icon-60@3x.png", 3),
    ("20", Idiom::Ipad, "Icon-20.png", 1),
    ("20", Idiom::Ipad, "Icon-20@2x.png", 2),
    ("29", Idiom::Ipad, "Icon-29.png", 1),
    ("29", Idiom::Ipad, "Icon-29@2x.png", 2),
    ("40", Idiom::Ipad, "Icon-40.png", 1),
    ("40", Idiom::Ipad, "Icon-40@2x.png", 2),
    ("76", Idiom::Ipad, "Icon-76.png", 1),
    ("76", Idiom::Ipad, "Icon-76@2x.png", 2),
    ("83.5", Idiom::Ipad, "Icon-83.5@2x.png", 2),
    ("1024", Idiom::IosMarketing, "Icon-1024.png", 1),
];

/// Icon table for an iOS app icon set, in generation order
pub fn ios_icons() -> Vec<IconSpec> {
    IOS_ICONS
        .iter()
        .map(|&(pixels, name)| IconSpec::new(pixels, name))
        .collect()
}

/// Descriptor rows for an iOS app icon set, in `Contents.json` order
pub fn ios_manifest_entries() -> Vec<ManifestEntry> {
    IOS_MANIFEST
        .iter()
        .map(|&(points, idiom, filename, scale)| ManifestEntry::new(points, idiom, filename, scale))
        .collect()
}

/// Largest requested edge length, used to warn about upscaling
pub fn largest_icon(icons: &[IconSpec]) -> Option<u32> {
    icons.iter().map(|icon| icon.pixels).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_descriptor_row_has_a_matching_icon() {
        let icons = ios_icons();
        for entry in ios_manifest_entries() {
            let icon = icons
                .iter()
                .find(|icon| icon.file_name() == entry.filename)
                .unwrap_or_else(|| panic!("no icon for {}", entry.filename));

            // pixels = points * scale
            let points: f32 = entry.size.split('x').next().unwrap().parse().unwrap();
            let scale: f32 = entry.scale.trim_end_matches('x').parse().unwrap();
            assert_eq!((points * scale) as u32, icon.pixels, "{}", entry.filename);
        }
    }

    #[test]
    fn idiom_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&Idiom::IosMarketing).unwrap(), "\"ios-marketing\"");
        assert_eq!(Idiom::Ipad.to_string(), "ipad");
    }

    #[test]
    fn largest_icon_is_app_store_size() {
        assert_eq!(largest_icon(&ios_icons()), Some(1024));
        assert_eq!(largest_icon(&[]), None);
    }
}
