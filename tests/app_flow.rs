// SPDX-License-Identifier: MPL-2.0
use style_lens::catalog::TemplateCatalog;
use style_lens::config::{self, Config};
use style_lens::media::image::{decode_and_resize, IMAGE_SIZE};
use tempfile::tempdir;

#[test]
fn config_round_trips_through_settings_file() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");

    let written = Config {
        templates_dir: Some("my_styles".into()),
        model_dir: Some("my_models".into()),
        camera_index: Some(2),
        page_size: Some(10),
    };
    config::save_to_path(&written, &config_path).expect("Failed to write config file");

    let loaded = config::load_from_path(&config_path).expect("Failed to load config from path");
    assert_eq!(loaded.templates_dir(), std::path::PathBuf::from("my_styles"));
    assert_eq!(loaded.camera_index(), 2);
    assert_eq!(loaded.page_size(), 10);

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn corrupt_config_falls_back_to_defaults() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");
    std::fs::write(&config_path, "this is not [valid toml").expect("Failed to write file");

    let loaded = config::load_from_path(&config_path).expect("Load should tolerate bad toml");
    assert_eq!(loaded.page_size(), config::DEFAULT_PAGE_SIZE);
    assert_eq!(loaded.camera_index(), config::DEFAULT_CAMERA_INDEX);
}

#[test]
fn templates_decode_into_paginated_catalog() {
    let dir = tempdir().expect("Failed to create temporary directory");

    for i in 0..9 {
        let level = (i * 20) as u8;
        image_rs::RgbImage::from_pixel(120, 90, image_rs::Rgb([level, level, level]))
            .save(dir.path().join(format!("template_{i:02}.png")))
            .expect("Failed to write template");
    }

    let catalog =
        TemplateCatalog::load(dir.path(), config::DEFAULT_PAGE_SIZE).expect("Catalog should load");

    assert_eq!(catalog.len(), 9);
    assert_eq!(catalog.max_page(), 2);

    // Second page holds the single overflow template.
    let second_page = catalog.page_slots(2);
    assert_eq!(second_page.iter().filter(|slot| slot.is_some()).count(), 1);
}

#[test]
fn chosen_image_is_normalized_to_canonical_size() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("photo.jpg");
    image_rs::RgbImage::from_pixel(1280, 720, image_rs::Rgb([180, 90, 45]))
        .save(&path)
        .expect("Failed to write photo");

    let normalized = decode_and_resize(&path).expect("Decode should succeed");
    let side = IMAGE_SIZE as usize;
    assert_eq!(normalized.pixels().len(), side * side * 3);
    assert!(normalized.pixels().iter().all(|v| (0.0..=1.0).contains(v)));
}
