//! Trains a 64 → 32 → 10 sigmoid classifier on noisy 8×8 digit glyphs.
//!
//! Run with `RUST_LOG=info cargo run -p minigrad-data --example train_synthetic_digits`
//! to see the per-epoch losses.

use minigrad_core::model::Sequential;
use minigrad_core::nn::{Linear, LogSoftmax, Module, Sigmoid};
use minigrad_core::train::{evaluate, fit, TrainingConfig};
use minigrad_core::MinigradError;
use minigrad_data::{DataLoader, Dataset, LabeledDataset, SequentialSampler};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIDE: usize = 8;
const PIXELS: usize = SIDE * SIDE;
const DIGITS: usize = 10;

/// Seven-segment style strokes per digit: top, upper-left, upper-right,
/// middle, lower-left, lower-right, bottom.
const SEGMENTS: [[bool; 7]; DIGITS] = [
    [true, true, true, false, true, true, true],
    [false, false, true, false, false, true, false],
    [true, false, true, true, true, false, true],
    [true, false, true, true, false, true, true],
    [false, true, true, true, false, true, false],
    [true, true, false, true, false, true, true],
    [true, true, false, true, true, true, true],
    [true, false, true, false, false, true, false],
    [true, true, true, true, true, true, true],
    [true, true, true, true, false, true, true],
];

fn glyph(digit: usize) -> [f64; PIXELS] {
    let mut image = [0.0; PIXELS];
    let mut set = |row: usize, col: usize| image[row * SIDE + col] = 1.0;
    let seg = SEGMENTS[digit];
    for c in 2..6 {
        if seg[0] {
            set(1, c);
        }
        if seg[3] {
            set(4, c);
        }
        if seg[6] {
            set(7, c);
        }
    }
    for r in 1..5 {
        if seg[1] {
            set(r, 1);
        }
        if seg[2] {
            set(r, 6);
        }
    }
    for r in 4..8 {
        if seg[4] {
            set(r, 1);
        }
        if seg[5] {
            set(r, 6);
        }
    }
    image
}

/// `per_digit` noisy copies of every glyph: pixel jitter plus random flips.
fn synthetic_digits(per_digit: usize, rng: &mut StdRng) -> Result<LabeledDataset, MinigradError> {
    let glyphs: Vec<[f64; PIXELS]> = (0..DIGITS).map(glyph).collect();
    let mut features = Vec::with_capacity(per_digit * DIGITS * PIXELS);
    let mut labels = Vec::with_capacity(per_digit * DIGITS);
    for i in 0..per_digit * DIGITS {
        let digit = i % DIGITS;
        for &pixel in glyphs[digit].iter() {
            let flipped = if rng.gen_bool(0.08) { 1.0 - pixel } else { pixel };
            features.push((flipped + rng.gen_range(-0.2..0.2)).clamp(0.0, 1.0));
        }
        labels.push(digit);
    }
    LabeledDataset::new(features, labels, PIXELS, DIGITS)
}

fn main() -> Result<(), MinigradError> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let (train, test) = synthetic_digits(120, &mut rng)?.split_at(1000)?;
    println!("{} training and {} test images", train.len(), test.len());

    let model = Sequential::new()
        .with(Linear::with_rng(PIXELS, 32, &mut rng)?)
        .with(Sigmoid::new())
        .with(Linear::with_rng(32, DIGITS, &mut rng)?)
        .with(LogSoftmax::default());
    let parameter_count: usize = model.parameters().iter().map(|p| p.numel()).sum();
    println!("model has {} parameters", parameter_count);

    let config = TrainingConfig {
        learning_rate: 0.5,
        epochs: 15,
        batch_size: 32,
        shuffle: true,
        seed: Some(1),
    };
    let mut optimizer = config.sgd_for(&model)?;
    let loader = DataLoader::from_config(train, &config)?;

    let reports = fit(&model, &mut optimizer, &config, |_| loader.iter())?;
    for report in &reports {
        println!("epoch {:>2}: mean loss {:.4}", report.epoch + 1, report.mean_loss);
    }

    let test_loader = DataLoader::new(test, 100, SequentialSampler::new(), false)?;
    let eval = evaluate(&model, &test_loader)?;
    println!(
        "test loss {:.4}, accuracy {:.1}% over {} images",
        eval.mean_loss,
        eval.accuracy * 100.0,
        eval.examples
    );
    Ok(())
}
