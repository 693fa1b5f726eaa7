//! Region capture via the platform screenshot backend

use super::CaptureError;
use crate::types::Region;
use image::ImageFormat;
use std::io::Cursor;
use xcap::Monitor;

/// Monitor placement in global screen coordinates
#[derive(Debug, Clone, Copy)]
struct MonitorBounds {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl MonitorBounds {
    fn overlap_area(&self, region: Region) -> u64 {
        let left = region.x.max(self.x);
        let top = region.y.max(self.y);
        let right = (region.x + region.width as i32).min(self.x + self.width as i32);
        let bottom = (region.y + region.height as i32).min(self.y + self.height as i32);

        if right > left && bottom > top {
            (right - left) as u64 * (bottom - top) as u64
        } else {
            0
        }
    }
}

/// Pick the monitor with the largest overlap with the region
fn best_monitor(bounds: &[MonitorBounds], region: Region) -> Option<usize> {
    bounds
        .iter()
        .enumerate()
        .map(|(i, b)| (i, b.overlap_area(region)))
        .filter(|(_, area)| *area > 0)
        .max_by_key(|(_, area)| *area)
        .map(|(i, _)| i)
}

/// Convert a global region to a crop rectangle local to the monitor
///
/// The rectangle is clamped to the captured image dimensions, which can
/// be smaller than the reported monitor bounds.
fn local_crop(
    region: Region,
    monitor: MonitorBounds,
    img_w: u32,
    img_h: u32,
) -> Option<(u32, u32, u32, u32)> {
    let left = region.x.max(monitor.x);
    let top = region.y.max(monitor.y);
    let right = (region.x + region.width as i32).min(monitor.x + monitor.width as i32);
    let bottom = (region.y + region.height as i32).min(monitor.y + monitor.height as i32);

    if right <= left || bottom <= top {
        return None;
    }

    let x = (left - monitor.x) as u32;
    let y = (top - monitor.y) as u32;
    if x >= img_w || y >= img_h {
        return None;
    }

    let w = ((right - left) as u32).min(img_w - x);
    let h = ((bottom - top) as u32).min(img_h - y);
    if w == 0 || h == 0 {
        return None;
    }

    Some((x, y, w, h))
}

fn capture_blocking(region: Region) -> Result<Vec<u8>, CaptureError> {
    if region.is_empty() {
        return Err(CaptureError::EmptyRegion);
    }

    let monitors = Monitor::all()?;
    if monitors.is_empty() {
        return Err(CaptureError::NoMonitor);
    }

    let mut bounds = Vec::with_capacity(monitors.len());
    for monitor in &monitors {
        bounds.push(MonitorBounds {
            x: monitor.x()?,
            y: monitor.y()?,
            width: monitor.width()?,
            height: monitor.height()?,
        });
    }

    let index = best_monitor(&bounds, region).ok_or(CaptureError::OutOfBounds)?;
    let image = monitors[index].capture_image()?;

    let (x, y, w, h) = local_crop(region, bounds[index], image.width(), image.height())
        .ok_or(CaptureError::OutOfBounds)?;
    let cropped = image::imageops::crop_imm(&image, x, y, w, h).to_image();

    let mut png = Vec::new();
    cropped.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    tracing::debug!("Captured {}x{} region as {} bytes of PNG", w, h, png.len());
    Ok(png)
}

/// Capture a screen region and return it as encoded PNG bytes
///
/// The region is in physical pixels in global screen coordinates. The
/// platform backend blocks (and may go through the desktop portal), so
/// the work runs on the blocking thread pool.
pub async fn capture_region_png(region: Region) -> Result<Vec<u8>, CaptureError> {
    tokio::task::spawn_blocking(move || capture_blocking(region)).await?
}
