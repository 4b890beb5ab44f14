// Image decoding, fit-to-viewport scaling and half-block rendering

use image::{DynamicImage, GenericImageView, ImageReader};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use std::path::Path;

use crate::error::Result;

/// Decodes an image, sniffing the format from its contents
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(img)
}

/// Scales `image_size` to fit inside `view_size`, preserving the aspect ratio.
///
/// The height is first set to the viewport height; if the resulting width is too
/// wide, the width is pinned to the viewport width instead. Both dimensions are
/// rounded to the nearest pixel. Small images are scaled up as well as down.
pub fn scale_to_fit(image_size: (u32, u32), view_size: (u32, u32)) -> (u32, u32) {
    let (width, height) = image_size;
    let (view_width, view_height) = view_size;

    if width == 0 || height == 0 {
        return (0, 0);
    }

    let aspect_ratio = width as f64 / height as f64;

    let mut fit_height = view_height;
    let mut fit_width = (fit_height as f64 * aspect_ratio).round() as u32;

    if fit_width > view_width {
        fit_width = view_width;
        fit_height = (fit_width as f64 / aspect_ratio).round() as u32;
    }

    (fit_width, fit_height)
}

/// Pixel size of a terminal area when each cell shows two stacked pixels
pub fn cell_viewport(columns: u16, rows: u16) -> (u32, u32) {
    (columns as u32, rows as u32 * 2)
}

/// Converts an image to styled lines using half-block characters for terminal display.
/// Uses the upper half block character (▀) with foreground color for the upper pixel
/// and background color for the lower pixel, effectively displaying 2 pixels per cell.
pub fn image_to_halfblock_lines(img: &DynamicImage, width: u32, height: u32) -> Vec<Line<'static>> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    // Odd heights get a duplicated last row
    let rows = height.div_ceil(2);

    let img = if img.dimensions() == (width, height) {
        img.to_rgb8()
    } else {
        img.resize_exact(width, height, image::imageops::FilterType::Triangle)
            .to_rgb8()
    };

    let mut lines = Vec::with_capacity(rows as usize);

    for row in 0..rows {
        let upper_y = row * 2;
        let lower_y = (upper_y + 1).min(height - 1);

        let spans: Vec<Span<'static>> = (0..width)
            .map(|x| {
                let upper = img.get_pixel(x, upper_y);
                let lower = img.get_pixel(x, lower_y);
                let style = Style::default()
                    .fg(Color::Rgb(upper[0], upper[1], upper[2]))
                    .bg(Color::Rgb(lower[0], lower[1], lower[2]));
                Span::styled("▀", style)
            })
            .collect();

        lines.push(Line::from(spans));
    }

    lines
}

/// A decoded image plus its rendering for the last viewport it was drawn into
#[derive(Debug)]
pub struct ImageView {
    image: DynamicImage,
    cached: Option<((u16, u16), Vec<Line<'static>>)>,
}

impl ImageView {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image,
            cached: None,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Returns half-block lines fitted to a `columns` x `rows` cell area.
    ///
    /// Rescaling only happens when the area changes size.
    pub fn lines_for(&mut self, columns: u16, rows: u16) -> &[Line<'static>] {
        let stale = !matches!(&self.cached, Some((size, _)) if *size == (columns, rows));
        if stale {
            let viewport = cell_viewport(columns, rows);
            let (mut width, mut height) = scale_to_fit(self.image.dimensions(), viewport);
            // Very thin images round down to nothing; keep a one pixel sliver
            if viewport.0 > 0 && viewport.1 > 0 && self.image.width() > 0 && self.image.height() > 0 {
                width = width.max(1);
                height = height.max(1);
            }
            let lines = image_to_halfblock_lines(&self.image, width, height);
            self.cached = Some(((columns, rows), lines));
        }

        match &self.cached {
            Some((_, lines)) => lines,
            None => &[],
        }
    }
}
