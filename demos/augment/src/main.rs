use argh::FromArgs;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

use affwarp::{
    image::{ImageBatch, ImageSize},
    imgproc::{
        interpolation::InterpolationMode,
        transform::{transform, AffineParams},
    },
};

#[derive(FromArgs)]
/// Apply random affine augmentations to a synthetic batch of images.
struct Args {
    /// number of images in the batch
    #[argh(option, short = 'b', default = "8")]
    batch_size: usize,

    /// width and height of the images
    #[argh(option, short = 's', default = "64")]
    size: usize,

    /// number of channels per image
    #[argh(option, short = 'c', default = "3")]
    channels: usize,

    /// maximum absolute rotation in degrees
    #[argh(option, default = "15.0")]
    max_rotation: f32,

    /// maximum absolute translation in pixels
    #[argh(option, default = "4.0")]
    max_translation: f32,

    /// interpolation mode: linear or gaussian
    #[argh(option, short = 'i', default = "InterpolationMode::Linear")]
    interpolation: InterpolationMode,

    /// seed of the random parameters
    #[argh(option)]
    seed: Option<u64>,
}

/// Checkerboard with 8 pixel cells, the phase shifts with the channel.
fn checkerboard(batch_size: usize, channels: usize, n: usize) -> Vec<u8> {
    (0..batch_size * channels * n * n)
        .map(|i| {
            let c = (i / (n * n)) % channels;
            let (y, x) = ((i % (n * n)) / n, i % n);
            if (x / 8 + y / 8 + c) % 2 == 0 {
                255
            } else {
                0
            }
        })
        .collect()
}

fn mean(values: &[u8]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let size = ImageSize {
        width: args.size,
        height: args.size,
    };
    let images = ImageBatch::new(
        args.batch_size,
        args.channels,
        size,
        checkerboard(args.batch_size, args.channels, args.size),
    )?;

    // one random draw per image
    let mut draw = |max: f32| {
        let max = max.abs();
        (0..args.batch_size)
            .map(|_| rng.random_range(-max..=max))
            .collect::<Vec<f32>>()
    };
    let rotation = draw(args.max_rotation);
    let translation_x = draw(args.max_translation);
    let translation_y = draw(args.max_translation);
    let compression = draw(0.1);

    let center = (args.size as f32 - 1.0) / 2.0;
    let params = AffineParams::default()
        .with_rotation(rotation.clone())
        .with_translation(translation_x.clone(), translation_y.clone())
        .with_compression(compression.clone())
        .with_center(center, center)
        .with_interpolation(args.interpolation);

    let start = Instant::now();
    let augmented = transform(&images, &params)?;
    log::info!(
        "augmented {} images of size {} in {:?}",
        augmented.batch_size(),
        augmented.size(),
        start.elapsed()
    );

    for b in 0..augmented.batch_size() {
        log::info!(
            "image {b}: rotation {:.2} translation ({:.2}, {:.2}) compression {:.3} mean {:.1} -> {:.1}",
            rotation[b],
            translation_x[b],
            translation_y[b],
            compression[b],
            mean(images.image(b)?),
            mean(augmented.image(b)?),
        );
    }

    Ok(())
}
