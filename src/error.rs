use thiserror::Error;

/// Rejected scene parameters. The dashboard controls can't produce these,
/// the JSON API can.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("num_stars must be in {min}..={max}, got {got}")]
    NumStars { got: usize, min: usize, max: usize },
    #[error("star_size must be in {min}..={max}, got {got}")]
    StarSize { got: u32, min: u32, max: u32 },
    #[error("wave_height must be in {min}..={max}, got {got}")]
    WaveHeight { got: f64, min: f64, max: f64 },
}

/// Failures in the drawing step, after the figure has been described.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid color {0:?}")]
    InvalidColor(String),
    #[error("canvas must be at least 1x1, got {w}x{h}")]
    EmptyCanvas { w: usize, h: usize },
    #[error("png encode failed: {0}")]
    Encode(#[from] image::ImageError),
}
