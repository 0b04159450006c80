//! On-demand sprite loading
//!
//! Sprites are downloaded, decoded and resized each time an entry is shown;
//! nothing is kept across records.

use image::imageops::FilterType;
use std::time::Duration;
use thiserror::Error;

/// Pixel box sprites are resized into (terminal cells are two pixels tall)
pub const SPRITE_MAX_WIDTH: u32 = 40;
pub const SPRITE_MAX_HEIGHT: u32 = 40;

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("entry has no sprite")]
    MissingRef,

    #[error("sprite download failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("sprite download returned HTTP {0}")]
    Status(u16),

    #[error("sprite decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decoded RGBA sprite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Sprite {
    /// Decode image bytes and resize to fit within `max_width` x `max_height`,
    /// keeping the aspect ratio.
    pub fn decode(bytes: &[u8], max_width: u32, max_height: u32) -> Result<Self, ImageLoadError> {
        let image = image::load_from_memory(bytes)?;
        let resized = image.resize(max_width, max_height, FilterType::Lanczos3);
        let rgba = resized.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            pixels: rgba.pixels().map(|p| p.0).collect(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA at (x, y); transparent outside the image
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Downloads and decodes sprites
#[derive(Clone)]
pub struct SpriteLoader {
    client: reqwest::Client,
    max_width: u32,
    max_height: u32,
}

impl SpriteLoader {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            max_width: SPRITE_MAX_WIDTH,
            max_height: SPRITE_MAX_HEIGHT,
        }
    }

    pub async fn load(&self, sprite_ref: Option<&str>) -> Result<Sprite, ImageLoadError> {
        let url = sprite_ref.ok_or(ImageLoadError::MissingRef)?;
        tracing::debug!("Loading sprite {}", url);

        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(10))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageLoadError::Status(status.as_u16()));
        }
        let bytes = response.bytes().await?;

        Sprite::decode(&bytes, self.max_width, self.max_height)
    }
}
