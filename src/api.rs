//! JSON contract of `POST /api/scene`, kept out of the server binary so it
//! can be driven without a listener.

use std::sync::Mutex;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::config::SceneParams;
use crate::error::{ParamError, RenderError};
use crate::figure::Figure;
use crate::stars::StarCache;
use crate::{Info, Timing, raster};

pub const DEFAULT_WIDTH: usize = 900;
pub const MAX_WIDTH: usize = 4096;

/// Every field is optional, missing ones take the control defaults.
#[derive(Debug, Default, Deserialize)]
pub struct SceneRequest {
    pub num_stars: Option<usize>,
    pub star_size: Option<u32>,
    pub wave_height: Option<f64>,
    pub ocean_color: Option<String>,
}

impl SceneRequest {
    pub fn into_params(self) -> SceneParams {
        let defaults = SceneParams::default();
        SceneParams {
            num_stars: self.num_stars.unwrap_or(defaults.num_stars),
            star_size: self.star_size.unwrap_or(defaults.star_size),
            wave_height: self.wave_height.unwrap_or(defaults.wave_height),
            ocean_color: self.ocean_color.unwrap_or(defaults.ocean_color),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    pub width: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SceneResponse {
    pub figure: Figure,
    pub preview: String,
    pub info: Info,
    pub timings: Vec<Timing>,
    pub width: usize,
    pub height: usize,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ParamError> for ApiError {
    fn from(e: ParamError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::InvalidColor(_) => ApiError::BadRequest(e.to_string()),
            other => ApiError::Internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Internal(e) => {
                log::error!("scene request failed: {e:#}");
                "internal error".to_string()
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Validate, build, rasterize. The cache lock is released before drawing.
pub fn scene(
    req: SceneRequest,
    query: PreviewQuery,
    cache: &Mutex<StarCache>,
) -> Result<SceneResponse, ApiError> {
    let params = req.into_params();
    params.validate()?;
    let width = query.width.unwrap_or(DEFAULT_WIDTH).clamp(1, MAX_WIDTH);

    let (scene, timings) = {
        let mut cache = cache.lock().unwrap_or_else(|e| e.into_inner());
        crate::build_scene(&params, &mut cache)
    };

    let height = scene.figure.layout.height as usize;
    let rgba = raster::rasterize(&scene.figure, width)?;
    let preview = raster::png_data_url(&rgba, width, height)?;

    log::info!(
        "scene stars={} size={} wave={:.1} color={} width={}",
        params.num_stars,
        params.star_size,
        params.wave_height,
        params.ocean_color,
        width
    );

    Ok(SceneResponse {
        figure: scene.figure,
        preview,
        info: scene.info,
        timings,
        width,
        height,
    })
}
