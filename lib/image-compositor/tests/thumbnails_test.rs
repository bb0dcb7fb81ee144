// cargo test -p image-compositor --test thumbnails_test

use image::{ColorType, ImageReader};
use image_compositor::{Scene, ThumbnailScene, generate_all};
use rand::{SeedableRng, rngs::StdRng};
use std::path::Path;
use tempfile::tempdir;

const FILES: [&str; 3] = [
    "othello_thumbnail.png",
    "space_shooter_thumbnail.png",
    "tetris_thumbnail.png",
];

fn decode(path: &Path) -> anyhow::Result<image::DynamicImage> {
    Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
}

#[test]
fn test_generate_all_writes_three_pngs() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let out = temp_dir.path().join("images");
    let mut rng = StdRng::seed_from_u64(2024);

    let mut reported = vec![];
    let paths = generate_all(&out, &mut rng, |scene, _| reported.push(scene.name()))?;

    assert!(out.is_dir());
    assert_eq!(paths.len(), 3);
    assert_eq!(reported, vec!["Othello", "Shooter", "Tetris"]);

    for (path, name) in paths.iter().zip(FILES) {
        assert_eq!(path, &out.join(name));

        let image = decode(path)?;
        assert_eq!(image.color(), ColorType::Rgb8);
        assert_eq!((image.width(), image.height()), (600, 400));
    }

    Ok(())
}

#[test]
fn test_fixed_seed_is_reproducible() -> anyhow::Result<()> {
    let first = tempdir()?;
    let second = tempdir()?;

    generate_all(first.path(), &mut StdRng::seed_from_u64(9), |_, _| {})?;
    generate_all(second.path(), &mut StdRng::seed_from_u64(9), |_, _| {})?;

    for name in FILES {
        let a = decode(&first.path().join(name))?.into_rgb8();
        let b = decode(&second.path().join(name))?.into_rgb8();
        assert_eq!(a, b, "{name} differs between runs");
    }

    Ok(())
}

#[test]
fn test_rerun_overwrites_same_paths() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;

    let first = generate_all(temp_dir.path(), &mut StdRng::seed_from_u64(1), |_, _| {})?;
    let second = generate_all(temp_dir.path(), &mut StdRng::seed_from_u64(2), |_, _| {})?;

    assert_eq!(first, second);
    assert_eq!(std::fs::read_dir(temp_dir.path())?.count(), 3);

    // Only the othello board is free of random particles
    let othello = &first[0];
    let a = decode(othello)?.into_rgb8();
    let b = ThumbnailScene::all()[0].render(&mut StdRng::seed_from_u64(3))?;
    assert_eq!(a, b);

    Ok(())
}
