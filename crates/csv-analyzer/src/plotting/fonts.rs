//! TrueType font discovery for chart text.

use plotters::style::{FontStyle, register_font};
use std::sync::OnceLock;
use tracing::{debug, warn};

const FONT_CANDIDATES: [&str; 9] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static TEXT_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Register the first readable system font as "sans-serif".
///
/// Returns whether chart text can be drawn. Resolved once per process.
pub(crate) fn text_available() -> bool {
    *TEXT_AVAILABLE.get_or_init(|| {
        for candidate in FONT_CANDIDATES {
            let Ok(bytes) = std::fs::read(candidate) else {
                continue;
            };
            // plotters keeps a 'static reference to registered font data
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            if register_font("sans-serif", FontStyle::Normal, bytes).is_ok() {
                debug!("Chart font: {}", candidate);
                return true;
            }
        }
        warn!("No TrueType font found; the plot will be drawn without text");
        false
    })
}
