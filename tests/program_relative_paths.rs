//! Assets are found next to the program whatever the working directory is.
//!
//! Lives in its own test binary because it changes the process working
//! directory.

use std::path::Path;

use pad_overlay::config::{locate, Config, DEFAULT_CONFIG_PATH};
use pad_overlay::ui::assets::load_controller_image;
use tempfile::TempDir;

#[test]
fn test_assets_resolve_against_program_dir_from_any_working_directory() {
    let program = TempDir::new().unwrap();
    let defaults = Config::default();

    let image_path = program.path().join(&defaults.window.image_path);
    std::fs::create_dir_all(image_path.parent().unwrap()).unwrap();
    image::RgbaImage::new(2, 2).save(&image_path).unwrap();

    let config_path = program.path().join(DEFAULT_CONFIG_PATH);
    std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    std::fs::write(&config_path, "[window]\nwidth = 320\n").unwrap();

    let elsewhere = TempDir::new().unwrap();
    std::env::set_current_dir(elsewhere.path()).unwrap();

    let found = locate(&defaults.window.image_path, Some(program.path()));
    assert_eq!(found, image_path);
    let image = load_controller_image(&found).unwrap();
    assert_eq!(image.size, [2, 2]);

    let found = locate(Path::new(DEFAULT_CONFIG_PATH), Some(program.path()));
    let config = Config::load(found).unwrap();
    assert_eq!(config.window.width, 320);

    // A file only present in the working directory is still found there
    std::fs::create_dir_all("assets").unwrap();
    image::RgbaImage::new(3, 1).save("assets/local.png").unwrap();
    let found = locate(Path::new("assets/local.png"), Some(program.path()));
    assert_eq!(load_controller_image(&found).unwrap().size, [3, 1]);
}
