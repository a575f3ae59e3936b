use std::{ffi::OsStr, path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use argh::FromArgs;
use ezview::{ppm_try_pixmap, run_viewer, GlRenderer, ShaderError};
use log::{error, info};

/// View a P3/P6 pixel-map image and transform it with the keyboard.
///
/// Scale with =/- (or the numpad's +/-), move with the arrow keys, rotate a
/// quarter turn with Q/E, shear with W/A/S/D, and quit with Escape.
#[derive(FromArgs, Debug)]
struct Args {
  /// path of the image file to view
  #[argh(positional)]
  image: PathBuf,
}

fn main() -> ExitCode {
  env_logger::init();
  let args: Args = argh::from_env();
  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!("{e:#}");
      if e.downcast_ref::<ShaderError>().is_some() {
        ExitCode::from(2)
      } else {
        ExitCode::FAILURE
      }
    }
  }
}

fn run(args: &Args) -> anyhow::Result<()> {
  let bytes = std::fs::read(&args.image)
    .with_context(|| format!("couldn't read `{}`", args.image.display()))?;
  let pixmap = ppm_try_pixmap(&bytes)
    .with_context(|| format!("couldn't decode `{}`", args.image.display()))?;
  info!("decoded `{}`: {}x{}", args.image.display(), pixmap.width(), pixmap.height());
  let title = args.image.file_name().and_then(OsStr::to_str).unwrap_or("?");
  let mut renderer = GlRenderer::new(title, pixmap.width(), pixmap.height())?;
  run_viewer(&mut renderer, pixmap)
}
