pub const WAVE_SAMPLES: usize = 200;
pub const WAVE_FREQUENCY: f64 = 0.1;
pub const WAVE_BASELINE: f64 = 25.0;

/// Sampled ocean surface, ordered by increasing x.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl WaveCurve {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// `n` evenly spaced samples over `[start, stop]`, endpoints exact.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// `y = amplitude * sin(0.1 x) + 25` over 200 points spanning `[0, 100]`.
pub fn generate_wave(amplitude: f64) -> WaveCurve {
    let x = linspace(0.0, 100.0, WAVE_SAMPLES);
    let y = x
        .iter()
        .map(|&x| amplitude * (WAVE_FREQUENCY * x).sin() + WAVE_BASELINE)
        .collect();
    WaveCurve { x, y }
}
