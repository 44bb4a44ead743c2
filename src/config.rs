use serde::{Deserialize, Serialize};

use crate::error::ParamError;

pub const NUM_STARS_MIN: usize = 50;
pub const NUM_STARS_MAX: usize = 500;
pub const STAR_SIZE_MIN: u32 = 1;
pub const STAR_SIZE_MAX: u32 = 10;
pub const WAVE_HEIGHT_MIN: f64 = 0.1;
pub const WAVE_HEIGHT_MAX: f64 = 2.0;
pub const WAVE_HEIGHT_STEP: f64 = 0.1;

/// All user-facing controls, exposed as sidebar sliders in the frontend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneParams {
    pub num_stars: usize,
    pub star_size: u32,
    /// Wave amplitude.
    pub wave_height: f64,
    /// Passed through to the figure untouched.
    pub ocean_color: String,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            num_stars: 200,
            star_size: 3,
            wave_height: 0.5,
            ocean_color: "#1e3a5f".to_string(),
        }
    }
}

impl SceneParams {
    /// Range check against the slider bounds. The color is not checked here.
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(NUM_STARS_MIN..=NUM_STARS_MAX).contains(&self.num_stars) {
            return Err(ParamError::NumStars {
                got: self.num_stars,
                min: NUM_STARS_MIN,
                max: NUM_STARS_MAX,
            });
        }
        if !(STAR_SIZE_MIN..=STAR_SIZE_MAX).contains(&self.star_size) {
            return Err(ParamError::StarSize {
                got: self.star_size,
                min: STAR_SIZE_MIN,
                max: STAR_SIZE_MAX,
            });
        }
        // NaN fails the contains check too
        if !(WAVE_HEIGHT_MIN..=WAVE_HEIGHT_MAX).contains(&self.wave_height) {
            return Err(ParamError::WaveHeight {
                got: self.wave_height,
                min: WAVE_HEIGHT_MIN,
                max: WAVE_HEIGHT_MAX,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLayout {
    #[default]
    Wide,
    Centered,
}

impl PageLayout {
    /// CSS class the page body gets.
    pub fn css_class(self) -> &'static str {
        match self {
            PageLayout::Wide => "layout-wide",
            PageLayout::Centered => "layout-centered",
        }
    }
}

/// Page-level display setup, handed to the page renderer explicitly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub title: String,
    pub icon: String,
    pub layout: PageLayout,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Celestial Ocean".to_string(),
            icon: "🌊".to_string(),
            layout: PageLayout::Wide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = SceneParams::default();
        assert_eq!(p.num_stars, 200);
        assert_eq!(p.star_size, 3);
        assert_eq!(p.wave_height, 0.5);
        assert_eq!(p.ocean_color, "#1e3a5f");
        assert_eq!(p.validate(), Ok(()));
    }

    #[test]
    fn slider_bounds_are_inclusive() {
        for n in [NUM_STARS_MIN, NUM_STARS_MAX] {
            let p = SceneParams { num_stars: n, ..Default::default() };
            assert!(p.validate().is_ok());
        }
        let p = SceneParams {
            wave_height: WAVE_HEIGHT_MAX,
            star_size: STAR_SIZE_MIN,
            ..Default::default()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn out_of_range_rejected() {
        let p = SceneParams { num_stars: 501, ..Default::default() };
        assert!(matches!(p.validate(), Err(ParamError::NumStars { got: 501, .. })));

        let p = SceneParams { star_size: 0, ..Default::default() };
        assert!(matches!(p.validate(), Err(ParamError::StarSize { got: 0, .. })));

        let p = SceneParams { wave_height: f64::NAN, ..Default::default() };
        assert!(matches!(p.validate(), Err(ParamError::WaveHeight { .. })));
    }

    #[test]
    fn page_layout_serializes_lowercase() {
        let json = serde_json::to_string(&PageConfig::default()).unwrap();
        assert!(json.contains("\"layout\":\"wide\""));
        assert_eq!(PageLayout::Centered.css_class(), "layout-centered");
    }
}
