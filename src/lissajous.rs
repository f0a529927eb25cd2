//! Draws Lissajous figures: the curve traced by a point whose x coordinate is
//! `sin t` and whose y coordinate is `sin(t * freq + phase)`. Each frame of the
//! animation advances `phase`, so the figure appears to rotate.
//!
//! Everything the drawing depends on is explicit: the fixed parameters live
//! in a `LissajousConfig`, and the random frequency comes from a caller-owned
//! generator.
use rand::Rng;
use std::borrow::Cow;
use std::f64::consts::PI;
use std::io;

/// Upper bound on `cycles`; each cycle costs `2π / resolution` points per frame
pub const MAX_CYCLES: f64 = 100.0;

/// Upper bound on `LissajousConfig::size`
pub const MAX_SIZE: u16 = 1000;

/// Lower bound on `LissajousConfig::resolution`
pub const MIN_RESOLUTION: f64 = 1e-5;

/// Ways drawing or encoding an animation can fail
#[derive(Debug, thiserror::Error)]
pub enum LissajousError {
    /// The color index is not in the palette
    #[error("color {index} is not in the palette (0 to {})", .palette_len.saturating_sub(1))]
    UnknownColor {
        /// The requested index
        index: i64,
        /// How many colors the palette has
        palette_len: usize,
    },
    /// `cycles` is not a positive number no larger than `MAX_CYCLES`
    #[error("cycles must be greater than 0 and at most {max}, not {0}", max = MAX_CYCLES)]
    InvalidCycles(f64),
    /// A `LissajousConfig` field is out of range
    #[error("invalid drawing config: {0}")]
    InvalidConfig(&'static str),
    /// The GIF encoder failed, usually because the output did
    #[error("can't encode GIF: {0}")]
    Encoding(#[from] gif::EncodingError),
}

/// An RGB color
pub type Rgb = [u8; 3];

/// The fixed parameters of an animation.
#[derive(Debug, Clone, PartialEq)]
pub struct LissajousConfig {
    /// Colors available to the curve; index 0 is the background
    pub palette: Vec<Rgb>,
    /// The canvas covers `-size..=size` in both directions
    pub size: u16,
    /// Number of frames in the animation
    pub frames: u16,
    /// Delay between frames, in hundredths of a second
    pub delay: u16,
    /// Angular step between plotted points
    pub resolution: f64,
    /// Phase added to the y oscillator from one frame to the next
    pub phase_step: f64,
    /// Revolutions of the x oscillator when the caller doesn't say
    pub cycles: f64,
    /// Palette index of the curve when the caller doesn't say
    pub color: u8,
}

/// Palette indices of the default palette
pub mod colors {
    /// Background
    pub const WHITE: u8 = 0;
    /// The default curve color
    pub const BLACK: u8 = 1;
    #[allow(missing_docs)]
    pub const GREEN: u8 = 2;
    #[allow(missing_docs)]
    pub const BLUE: u8 = 3;
    #[allow(missing_docs)]
    pub const RED: u8 = 4;
}

impl Default for LissajousConfig {
    fn default() -> Self {
        LissajousConfig {
            palette: vec![
                [0xff, 0xff, 0xff],
                [0x00, 0x00, 0x00],
                [0x00, 0x88, 0x00],
                [0x00, 0x00, 0x88],
                [0x88, 0x00, 0x00],
            ],
            size: 100,
            frames: 64,
            delay: 8,
            resolution: 0.001,
            phase_step: 0.1,
            cycles: 5.0,
            color: colors::BLACK,
        }
    }
}

/// One frame of the animation: a square of palette indices, row by row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Width and height in pixels
    pub side: u16,
    /// `side * side` palette indices
    pub pixels: Vec<u8>,
}

impl LissajousConfig {
    /// Width and height of each frame
    #[must_use]
    pub fn side(&self) -> u16 {
        self.size.saturating_mul(2).saturating_add(1)
    }

    /// Checks the configuration itself, then `color` and `cycles` against it
    pub fn validate(&self, color: u8, cycles: f64) -> Result<(), LissajousError> {
        if self.size > MAX_SIZE {
            return Err(LissajousError::InvalidConfig("size must be at most 1000"));
        }
        if self.resolution.is_nan() || self.resolution < MIN_RESOLUTION {
            return Err(LissajousError::InvalidConfig("resolution must be at least 1e-5"));
        }
        if !self.phase_step.is_finite() {
            return Err(LissajousError::InvalidConfig("phase_step must be finite"));
        }
        if usize::from(color) >= self.palette.len() {
            let palette_len = self.palette.len();
            return Err(LissajousError::UnknownColor { index: i64::from(color), palette_len });
        }
        if cycles.is_nan() || cycles <= 0.0 || cycles > MAX_CYCLES {
            return Err(LissajousError::InvalidCycles(cycles));
        }
        Ok(())
    }
}

/// A random relative frequency for the y oscillator, in `[0, 3)`
pub fn random_frequency(rng: &mut impl Rng) -> f64 {
    rng.gen::<f64>() * 3.0
}

/// Draws every frame of the animation
pub fn render(
    config: &LissajousConfig,
    color: u8,
    cycles: f64,
    freq: f64,
) -> Result<Vec<Frame>, LissajousError> {
    config.validate(color, cycles)?;
    let side = config.side();
    let size = f64::from(config.size);
    let center = i64::from(config.size);
    let end = cycles * 2.0 * PI;
    let mut frames = Vec::with_capacity(usize::from(config.frames));
    let mut phase = 0.0;
    for _ in 0..config.frames {
        let pixels = vec![colors::WHITE; usize::from(side) * usize::from(side)];
        let mut frame = Frame { side, pixels };
        let mut t = 0.0_f64;
        while t < end {
            let x = t.sin();
            let y = (t * freq + phase).sin();
            frame.plot(center + to_offset(x * size + 0.5), center + to_offset(y * size + 0.5), color);
            t += config.resolution;
        }
        frames.push(frame);
        phase += config.phase_step;
    }
    Ok(frames)
}

// Truncates toward zero, so negative offsets round toward the center
#[allow(clippy::cast_possible_truncation)]
fn to_offset(v: f64) -> i64 {
    v as i64
}

impl Frame {
    /// Sets the pixel at column `x`, row `y`; points off the canvas are ignored
    fn plot(&mut self, x: i64, y: i64, color: u8) {
        let side = i64::from(self.side);
        if (0..side).contains(&x) && (0..side).contains(&y) {
            if let Ok(i) = usize::try_from(y * side + x) {
                self.pixels[i] = color;
            }
        }
    }
}

/// Writes `frames` to `out` as an animated GIF with the config's palette and
/// delay. The animation loops `config.frames` times.
pub fn encode(
    config: &LissajousConfig,
    frames: &[Frame],
    out: impl io::Write,
) -> Result<(), LissajousError> {
    let palette: Vec<u8> = config.palette.iter().flatten().copied().collect();
    let side = config.side();
    let mut encoder = gif::Encoder::new(out, side, side, &palette)?;
    encoder.set_repeat(gif::Repeat::Finite(config.frames))?;
    for frame in frames {
        let gif_frame = gif::Frame {
            width: frame.side,
            height: frame.side,
            delay: config.delay,
            buffer: Cow::Borrowed(&frame.pixels[..]),
            ..gif::Frame::default()
        };
        encoder.write_frame(&gif_frame)?;
    }
    let mut out = encoder.into_inner().map_err(gif::EncodingError::from)?;
    out.flush().map_err(gif::EncodingError::from)?;
    Ok(())
}

/// Draws one animation with a random frequency from `rng` and writes it to `out`
pub fn generate(
    config: &LissajousConfig,
    color: u8,
    cycles: f64,
    rng: &mut impl Rng,
    out: impl io::Write,
) -> Result<(), LissajousError> {
    let freq = random_frequency(rng);
    tracing::debug!(color, cycles, freq, "drawing");
    let frames = render(config, color, cycles, freq)?;
    encode(config, &frames, out)
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn small() -> LissajousConfig {
        LissajousConfig { size: 20, frames: 3, ..LissajousConfig::default() }
    }

    #[test]
    fn frames_are_square_and_use_only_background_and_curve_colors() {
        let config = small();
        let frames = render(&config, colors::GREEN, 2.0, 1.5).unwrap();
        assert_eq!(frames.len(), 3);
        for frame in &frames {
            assert_eq!(frame.side, 41);
            assert_eq!(frame.pixels.len(), 41 * 41);
            assert!(frame.pixels.iter().all(|&p| p == colors::WHITE || p == colors::GREEN));
            assert!(frame.pixels.contains(&colors::GREEN));
        }
    }

    #[test]
    fn the_curve_starts_at_the_center_of_the_first_frame() {
        // t = 0 and phase = 0 put the first point at (0, 0) on the canvas
        let config = small();
        let frames = render(&config, colors::RED, 1.0, 2.0).unwrap();
        let center = usize::from(config.size);
        let side = usize::from(config.side());
        assert_eq!(frames[0].pixels[center * side + center], colors::RED);
    }

    #[test]
    fn a_frequency_of_one_with_no_phase_draws_the_diagonal() {
        let config = LissajousConfig { frames: 1, ..small() };
        let frames = render(&config, colors::BLACK, 1.0, 1.0).unwrap();
        let side = usize::from(config.side());
        for (i, &p) in frames[0].pixels.iter().enumerate() {
            if p == colors::BLACK {
                let (row, col) = (i / side, i % side);
                assert!(row.abs_diff(col) <= 1, "({col}, {row}) is off the diagonal");
            }
        }
    }

    #[test]
    fn frames_differ_as_the_phase_advances() {
        let frames = render(&small(), colors::BLACK, 1.0, 2.0).unwrap();
        assert_ne!(frames[0], frames[1]);
    }

    #[test]
    fn bad_colors_and_cycles_are_rejected() {
        let config = small();
        let unknown = render(&config, 5, 1.0, 1.0);
        assert!(matches!(unknown, Err(LissajousError::UnknownColor { index: 5, .. })));
        for cycles in [0.0, -1.0, f64::NAN, f64::INFINITY, MAX_CYCLES + 1.0] {
            let result = render(&config, 1, cycles, 1.0);
            assert!(matches!(result, Err(LissajousError::InvalidCycles(_))), "{cycles}");
        }
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = small().validate(9, 1.0).unwrap_err();
        assert_eq!(err.to_string(), "color 9 is not in the palette (0 to 4)");
    }

    #[test]
    fn output_is_a_gif_and_the_same_seed_gives_the_same_bytes() {
        let config = small();
        let draw = |seed| {
            let mut out = Vec::new();
            generate(&config, colors::BLUE, 1.0, &mut StdRng::seed_from_u64(seed), &mut out).unwrap();
            out
        };
        let first = draw(42);
        assert!(first.starts_with(b"GIF89a"));
        assert_eq!(first.last(), Some(&0x3b)); // GIF trailer
        assert_eq!(first, draw(42));
    }

    #[test]
    fn out_of_range_configs_are_rejected_before_drawing() {
        let configs = [
            LissajousConfig { size: 40_000, ..small() },
            LissajousConfig { resolution: 0.0, ..small() },
            LissajousConfig { resolution: -0.5, ..small() },
            LissajousConfig { resolution: f64::NAN, ..small() },
            LissajousConfig { phase_step: f64::INFINITY, ..small() },
        ];
        for config in configs {
            let result = render(&config, colors::BLACK, 1.0, 1.0);
            assert!(matches!(result, Err(LissajousError::InvalidConfig(_))), "{config:?}");
        }
        assert_eq!(LissajousConfig { size: u16::MAX, ..small() }.side(), u16::MAX);
    }

    #[test]
    fn decoding_gives_back_every_frame_with_its_size_delay_and_pixels() {
        let config = small();
        let frames = render(&config, colors::GREEN, 2.0, 1.5).unwrap();
        let mut gif = Vec::new();
        encode(&config, &frames, &mut gif).unwrap();

        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::Indexed);
        let mut decoder = options.read_info(&gif[..]).unwrap();
        assert_eq!((decoder.width(), decoder.height()), (41, 41));
        let mut decoded = 0;
        while let Some(frame) = decoder.read_next_frame().unwrap() {
            assert_eq!((frame.width, frame.height), (config.side(), config.side()));
            assert_eq!(frame.delay, config.delay);
            assert_eq!(&frame.buffer[..], &frames[decoded].pixels[..], "frame {decoded}");
            decoded += 1;
        }
        assert_eq!(decoded, usize::from(config.frames));
        assert_eq!(decoder.repeat(), gif::Repeat::Finite(config.frames));
    }

    #[test]
    fn random_frequencies_are_below_three() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let f = random_frequency(&mut rng);
            assert!((0.0..3.0).contains(&f));
        }
    }
}
