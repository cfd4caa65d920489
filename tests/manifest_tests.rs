// Tests for the Contents.json descriptor
use appiconset::icon_set::{Idiom, ManifestEntry, ManifestInfo};
use appiconset::manifest::{self, Manifest};
use std::fs;

#[test]
fn built_in_manifest_has_eighteen_rows() {
    let manifest = Manifest::ios_app_icon();

    assert_eq!(manifest.images.len(), 18);
    assert_eq!(manifest.info, ManifestInfo { version: 1, author: "xcode".to_string() });

    let iphone = manifest.images.iter().filter(|e| e.idiom == Idiom::Iphone).count();
    let ipad = manifest.images.iter().filter(|e| e.idiom == Idiom::Ipad).count();
    assert_eq!((iphone, ipad), (8, 9));
}

#[test]
fn known_rows_are_present() {
    let manifest = Manifest::ios_app_icon();

    assert_eq!(
        manifest.images.last().unwrap(),
        &ManifestEntry {
            size: "1024x1024".to_string(),
            idiom: Idiom::IosMarketing,
            filename: "Icon-1024.png".to_string(),
            scale: "1x".to_string(),
        }
    );
    assert!(manifest.images.contains(&ManifestEntry::new("83.5", Idiom::Ipad, "Icon-83.5@2x.png", 2)));
    assert!(manifest.images.contains(&ManifestEntry::new("20", Idiom::Iphone, "Icon-20@3x.png", 3)));
}

#[test]
fn written_file_is_byte_identical_across_runs() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest = Manifest::ios_app_icon();

    let path = manifest::write_manifest(tmp.path(), &manifest).unwrap();
    let first = fs::read(&path).unwrap();
    let again = manifest::write_manifest(tmp.path(), &manifest).unwrap();
    let second = fs::read(&again).unwrap();

    assert_eq!(path, tmp.path().join("Contents.json"));
    assert_eq!(first, second);
}

#[test]
fn written_file_uses_the_xcode_schema() {
    let tmp = tempfile::tempdir().unwrap();
    let path = manifest::write_manifest(tmp.path(), &Manifest::ios_app_icon()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    let images = value["images"].as_array().unwrap();
    assert_eq!(images.len(), 18);
    assert_eq!(images[0]["size"], "20x20");
    assert_eq!(images[0]["idiom"], "iphone");
    assert_eq!(images[0]["filename"], "Icon-20@2x.png");
    assert_eq!(images[0]["scale"], "2x");
    assert_eq!(value["info"]["version"], 1);
    assert_eq!(value["info"]["author"], "xcode");
}

#[test]
fn write_into_missing_directory_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("does-not-exist");

    assert!(manifest::write_manifest(&missing, &Manifest::ios_app_icon()).is_err());
}
