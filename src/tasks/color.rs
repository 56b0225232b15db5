use plotters::prelude::RGBColor;

pub static FONT_SIZE: i32 = 28;
pub static CAPTION_FONT_SIZE: i32 = 20;
pub static LABEL_FONT_SIZE: i32 = 16;
pub static STROKE_WIDTH: u32 = 2;
pub static MARKER_SIZE: i32 = 4;

/// Series colours, cycled by alphabet-size position: dark blue, orange,
/// green, red and yellow.
const SERIES_PALETTE: [RGBColor; 5] = [
    RGBColor(1, 6, 130),
    RGBColor(163, 99, 2),
    RGBColor(0, 97, 29),
    RGBColor(130, 1, 1),
    RGBColor(179, 176, 0),
];

pub fn get_color_for_series(color_idx: usize) -> RGBColor {
    SERIES_PALETTE[color_idx % SERIES_PALETTE.len()]
}
