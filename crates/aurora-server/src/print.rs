//! Printable QR sheet generation.
//!
//! `GET /print-qr` renders one scannable SVG tile per QR code value,
//! with no visible code text, for printing and hiding around the room.
//! This is presentation only: it reads the current collection and never
//! mutates anything.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use qrcode::render::svg;
use qrcode::QrCode as QrImage;

use crate::error::ApiError;
use crate::state::AppState;

/// Pixel size of each rendered QR tile.
const TILE_DIMENSION: u32 = 200;

/// Serve a printable HTML sheet of QR images, one per scan code.
///
/// # Route
///
/// `GET /print-qr`
///
/// # Errors
///
/// Returns [`ApiError::QrRender`] (HTTP 500) if any code value cannot
/// be encoded, matching the reference behavior of failing the whole
/// sheet rather than printing an incomplete one.
pub async fn print_qr(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let codes = state.game.read().await.qr_codes();

    let mut tiles = String::new();
    for entry in &codes {
        let image = QrImage::new(entry.code.as_bytes())
            .map_err(|e| ApiError::QrRender(format!("{}: {e}", entry.code)))?;
        let svg = image
            .render::<svg::Color<'_>>()
            .min_dimensions(TILE_DIMENSION, TILE_DIMENSION)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();
        tiles.push_str(&format!("      <div class=\"qr\">{svg}</div>\n"));
    }

    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <title>Escape Room QR Codes</title>
    <style>
      body {{
        font-family: sans-serif;
        display: flex;
        flex-wrap: wrap;
        gap: 20px;
        padding: 20px;
        background: #f0f0f0;
      }}
      .qr {{
        text-align: center;
        border: 1px solid #ccc;
        padding: 10px;
        border-radius: 8px;
        background: #fff;
      }}
      .qr svg {{ width: {TILE_DIMENSION}px; height: {TILE_DIMENSION}px; }}
    </style>
  </head>
  <body>
{tiles}  </body>
</html>"#
    )))
}
