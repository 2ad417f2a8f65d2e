//! Wire-format mirrors of the movie/show-availability API's JSON.
//!
//! Kept deliberately loose: everything the sync pipeline does not depend
//! on is optional, so schema drift on the remote side degrades to `None`
//! instead of a decode failure.

use std::collections::HashMap;

use nextup_model::ImageSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleDto {
    /// Canonical catalog id, e.g. `"82"`.
    pub id: String,
    /// Free-text show type, e.g. `"movie"` or `"series"`.
    #[serde(default)]
    pub show_type: Option<String>,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    /// 0..100 aggregate rating.
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub genres: Vec<GenreDto>,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub image_set: Option<ImageSet>,
    /// Country code -> streaming options in that country.
    #[serde(default)]
    pub streaming_options: HashMap<String, Vec<StreamingOptionDto>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingOptionDto {
    pub service: StreamingServiceDto,
    /// subscription | rent | buy | addon
    #[serde(rename = "type", default)]
    pub option_type: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub video_link: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub expires_soon: Option<bool>,
    #[serde(default)]
    pub expires_on: Option<i64>,
    #[serde(default)]
    pub available_since: Option<i64>,
    #[serde(default)]
    pub price: Option<PriceDto>,
    #[serde(default)]
    pub addon: Option<AddonDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingServiceDto {
    /// Wire id, e.g. `"netflix"`.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub home_page: Option<String>,
    #[serde(default)]
    pub theme_color_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceDto {
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub formatted: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonDto {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeDto {
    pub id: String,
    #[serde(default)]
    pub season_number: Option<i32>,
    #[serde(default)]
    pub episode_number: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub runtime_min: Option<i32>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub image_set: Option<ImageSet>,
    #[serde(default)]
    pub source_updated_at: Option<i64>,
}

/// One page of the paginated search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPageDto {
    #[serde(default)]
    pub shows: Vec<TitleDto>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}
