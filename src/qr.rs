// src/qr.rs
//! QR side artifact: a scannable code pointing at the person's profile link.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageOutputFormat, Luma};
use qrcode::{Color as Module, EcLevel, QrCode};
use tracing::info;

use crate::core::FsOps;
use crate::error::{ResumeError, ResumeResult};
use crate::types::profile::non_blank;
use crate::types::ResumeProfile;

pub const DEFAULT_QR_PX: u32 = 150;
/// Largest raster side accepted for the PNG
pub const MAX_QR_PX: u32 = 4096;
const QUIET_ZONE: u32 = 4;

/// What the code encodes: the LinkedIn URL, or a contact string built from the email.
pub fn payload_for(profile: &ResumeProfile) -> Option<String> {
    if let Some(url) = non_blank(&profile.linkedin_url) {
        return Some(url.to_string());
    }
    non_blank(&profile.email).map(|email| format!("Contact: {}", email))
}

/// Render `payload` as black-on-white modules with a 4-module quiet zone,
/// scaled by a whole factor so the side is at least `min_px`.
pub fn qr_image(payload: &str, min_px: u32) -> ResumeResult<GrayImage> {
    if min_px > MAX_QR_PX {
        return Err(ResumeError::Config(format!(
            "QR size {}px exceeds the {}px limit",
            min_px, MAX_QR_PX
        )));
    }

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)?;
    let modules = code.width() as u32;
    let colors = code.to_colors();

    let side_modules = modules + 2 * QUIET_ZONE;
    let scale = min_px.div_ceil(side_modules).max(1);
    let side = side_modules.checked_mul(scale).ok_or_else(|| {
        ResumeError::Config(format!("QR size {}px is too large", min_px))
    })?;

    let image = GrayImage::from_fn(side, side, |x, y| {
        let mx = (x / scale).checked_sub(QUIET_ZONE);
        let my = (y / scale).checked_sub(QUIET_ZONE);
        let dark = match (mx, my) {
            (Some(mx), Some(my)) if mx < modules && my < modules => {
                colors[(my * modules + mx) as usize] == Module::Dark
            }
            _ => false,
        };
        if dark {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });

    Ok(image)
}

pub fn encode_png(image: GrayImage) -> ResumeResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(image).write_to(&mut buf, ImageOutputFormat::Png)?;
    Ok(buf.into_inner())
}

/// Write the QR for `payload` as a PNG at `path`, creating the directory if needed.
pub fn generate_qr_png(payload: &str, path: &Path, min_px: u32) -> ResumeResult<()> {
    let png = encode_png(qr_image(payload, min_px)?)?;
    FsOps::write_atomic(path, &png)?;
    info!("QR code written to {} ({} bytes)", path.display(), png.len());
    Ok(())
}
