use egui::Color32;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SATURATION: f32 = 0.85;
const LIGHTNESS: f32 = 0.5;

/// Generates border colors whose hues stay apart from the previous one.
#[derive(Debug, Clone)]
pub struct Palette {
    rng: StdRng,
    last_hue: Option<f32>,
    min_distance: f32,
}

impl Palette {
    pub fn new(min_distance: f32) -> Self {
        Self::from_rng(StdRng::from_entropy(), min_distance)
    }

    /// Deterministic palette, for tests and reproducible sessions
    pub fn with_seed(min_distance: f32, seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), min_distance)
    }

    fn from_rng(rng: StdRng, min_distance: f32) -> Self {
        Self {
            rng,
            last_hue: None,
            // Distances of 180 and above are unreachable on the hue circle
            min_distance: min_distance.clamp(0.0, 179.0),
        }
    }

    pub fn last_hue(&self) -> Option<f32> {
        self.last_hue
    }

    pub fn set_min_distance(&mut self, min_distance: f32) {
        self.min_distance = min_distance.clamp(0.0, 179.0);
    }

    /// Pick a random hue at least `min_distance` degrees from the last one
    pub fn next_hue(&mut self) -> f32 {
        let hue = loop {
            let candidate: f32 = self.rng.gen_range(0.0..360.0);
            match self.last_hue {
                Some(last) if hue_distance(last, candidate) < self.min_distance => continue,
                _ => break candidate,
            }
        };
        self.last_hue = Some(hue);
        hue
    }

    pub fn next_color(&mut self) -> Color32 {
        let hue = self.next_hue();
        hsl_to_color(hue, SATURATION, LIGHTNESS)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MIN_HUE_DISTANCE)
    }
}

/// Angular distance between two hues on the color wheel, in [0, 180]
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % 360.0;
    d.min(360.0 - d)
}

/// Convert HSL (hue in degrees, saturation and lightness in [0, 1]) to an opaque color
pub fn hsl_to_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(channel(r), channel(g), channel(b))
}
