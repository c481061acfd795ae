use argh::FromArgs;
use std::path::PathBuf;

use rasterwarp::imgproc::warp::{ResampleConfig, SampleBounds, Transform};
use rasterwarp::io::functional as F;

#[derive(FromArgs)]
/// Rotate, scale or shift an image and write the result
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path where the output image will be saved
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// also sample the first row and column of the source image
    #[argh(switch)]
    inclusive: bool,

    #[argh(subcommand)]
    op: Operation,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Operation {
    Rotate(RotateArgs),
    Scale(ScaleArgs),
    Shift(ShiftArgs),
}

#[derive(FromArgs)]
/// Rotate around the image center
#[argh(subcommand, name = "rotate")]
struct RotateArgs {
    /// rotation angle in degrees
    #[argh(option)]
    angle: f64,
}

#[derive(FromArgs)]
/// Scale from the top-left corner
#[argh(subcommand, name = "scale")]
struct ScaleArgs {
    /// positive scale factor
    #[argh(option)]
    factor: f64,
}

#[derive(FromArgs)]
/// Translate by whole pixels
#[argh(subcommand, name = "shift")]
struct ShiftArgs {
    /// offset along x in pixels
    #[argh(option, default = "0")]
    tx: i64,

    /// offset along y in pixels
    #[argh(option, default = "0")]
    ty: i64,
}

impl Operation {
    fn transform(&self) -> Transform {
        match self {
            Operation::Rotate(args) => Transform::Rotate {
                degrees: args.angle,
            },
            Operation::Scale(args) => Transform::Scale {
                factor: args.factor,
            },
            Operation::Shift(args) => Transform::Shift {
                tx: args.tx,
                ty: args.ty,
            },
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the image
    let image = F::load(&args.image_path)?;
    log::info!("Read {} ({})", args.image_path.display(), image.size());

    let bounds = if args.inclusive {
        SampleBounds::Inclusive
    } else {
        SampleBounds::Exclusive
    };
    let config = ResampleConfig::default().with_bounds(bounds);

    let transform = args.op.transform();
    log::info!("Applying {transform}");

    let output = transform.apply_with(&image, &config)?;

    F::save(&args.output_path, &output)?;
    log::info!("Wrote {} ({})", args.output_path.display(), output.size());

    Ok(())
}
