/// Application-wide constants for icon generation and the asset catalog descriptor

pub mod paths {
    /// Source image used when neither the CLI nor a config file names one
    pub const DEFAULT_SOURCE_IMAGE: &str = "Resources/original_icon.png";

    /// Output directory used when neither the CLI nor a config file names one
    /// Xcode expects the `.appiconset` suffix inside `Assets.xcassets`
    pub const DEFAULT_OUTPUT_DIR: &str = "Resources/AppIcon.appiconset";
}

pub mod manifest {
    /// File name Xcode looks for inside every asset catalog folder
    pub const FILE_NAME: &str = "Contents.json";

    /// Descriptor format version understood by Xcode
    pub const VERSION: u32 = 1;

    /// Author tag written into the descriptor `info` block
    pub const AUTHOR: &str = "xcode";
}

pub mod icons {
    /// File extension of every generated icon
    pub const ICON_EXTENSION: &str = "png";
}
