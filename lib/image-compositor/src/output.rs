use crate::{CompositorResult, Scene, ThumbnailScene};
use image::ImageFormat;
use rand::RngCore;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Create the output directory unless it already exists
pub fn ensure_output_dir(dir: impl AsRef<Path>) -> CompositorResult<()> {
    let dir = dir.as_ref();
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        log::info!("created output directory {}", dir.display());
    }

    Ok(())
}

/// Render one scene and write it to `dir`, replacing any previous file
pub fn write_thumbnail(
    scene: &dyn Scene,
    dir: impl AsRef<Path>,
    rng: &mut dyn RngCore,
) -> CompositorResult<PathBuf> {
    let path = dir.as_ref().join(scene.file_name());
    let image = scene.render(rng)?;

    image
        .save_with_format(&path, ImageFormat::Png)
        .inspect_err(|e| log::warn!("write {} failed: {e}", path.display()))?;
    log::info!(
        "wrote {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );

    Ok(path)
}

/// Write every thumbnail in order. `on_done` runs after each file is saved.
pub fn generate_all(
    dir: impl AsRef<Path>,
    rng: &mut dyn RngCore,
    mut on_done: impl FnMut(&ThumbnailScene, &Path),
) -> CompositorResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    ensure_output_dir(dir)?;

    let mut paths = vec![];
    for scene in ThumbnailScene::all() {
        let path = write_thumbnail(&scene, dir, rng)?;
        on_done(&scene, &path);
        paths.push(path);
    }

    Ok(paths)
}
