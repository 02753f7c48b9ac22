use crate::error::{AnalyzerError, Result};
use crate::types::{ColumnStats, PlotArtifact, ReportArtifact, format_statistic};
use chrono::{DateTime, Local};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::path::Path;
use tracing::{debug, info};

// ============================================================================
// Page geometry (PDF points, 1 pt = 1/72 in)
// ============================================================================

const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MM_TO_PT: f64 = 72.0 / 25.4;
const LEFT_MARGIN_MM: f64 = 10.0;
const TOP_MARGIN: f64 = 56.0;
const BOTTOM_MARGIN: f64 = 28.0;

const TITLE_SIZE: i64 = 16;
const BODY_SIZE: i64 = 12;
const LINE_HEIGHT: f64 = 18.0;
/// Average Helvetica-Bold glyph advance as a fraction of the font size.
const BOLD_GLYPH_WIDTH: f64 = 0.6;

pub const REPORT_TITLE: &str = "CSV Data Analyzer Report";
pub const NO_STATS_LINE: &str = "No numeric stats available.";

// ============================================================================
// Report content
// ============================================================================

/// Everything that goes on the report page.
#[derive(Debug, Clone)]
pub struct ReportContent<'a> {
    /// Display name of the input file (no directories).
    pub file_name: String,
    pub column: &'a str,
    /// `None` when the column was not found.
    pub stats: Option<&'a ColumnStats>,
    pub score: f64,
    pub plot: Option<&'a PlotArtifact>,
    pub generated_at: DateTime<Local>,
}

/// Styling of a single text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Body,
}

/// One line of report text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub text: String,
    pub style: LineStyle,
}

impl ReportLine {
    fn title(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Title,
        }
    }

    fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Body,
        }
    }
}

impl ReportContent<'_> {
    /// Text lines in page order.
    pub fn lines(&self) -> Vec<ReportLine> {
        let mut lines = vec![
            ReportLine::title(REPORT_TITLE),
            ReportLine::body(format!(
                "Generated: {}",
                self.generated_at.format("%Y-%m-%d %H:%M:%S")
            )),
            ReportLine::body(format!("File: {}", self.file_name)),
            ReportLine::body(format!("Column: {}", self.column)),
        ];

        match self.stats.and_then(ColumnStats::numeric) {
            Some(summary) => lines.extend(summary.entries().iter().map(|(label, value)| {
                ReportLine::body(format!("{}: {}", label, format_statistic(*value)))
            })),
            None => lines.push(ReportLine::body(NO_STATS_LINE)),
        }

        lines.push(ReportLine::body(format!("Quality Score: {}%", self.score)));
        lines.push(ReportLine::body(if self.plot.is_some() {
            "Plot:"
        } else {
            "Plot: not available"
        }));
        lines
    }
}

// ============================================================================
// Assembler
// ============================================================================

/// Writes the single-page PDF report.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    image_width_mm: f64,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(180.0)
    }
}

impl ReportAssembler {
    pub fn new(image_width_mm: f64) -> Self {
        Self { image_width_mm }
    }

    /// Compose `content` into a PDF at `path`, overwriting any existing file.
    pub fn assemble(&self, content: &ReportContent<'_>, path: &Path) -> Result<ReportArtifact> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(type1_font("Helvetica"));
        let bold_id = doc.add_object(type1_font("Helvetica-Bold"));

        let lines = content.lines();
        let mut operations = Vec::new();
        let mut y = PAGE_HEIGHT - TOP_MARGIN;
        for line in &lines {
            operations.extend(text_operations(line, y));
            y -= LINE_HEIGHT;
        }

        let mut xobjects = lopdf::Dictionary::new();
        if let Some(plot) = content.plot {
            let (image_id, width_px, height_px) = embed_image(&mut doc, &plot.path)?;
            xobjects.set("Im1", image_id);

            let mut width = self.image_width_mm * MM_TO_PT;
            let mut height = width * height_px as f64 / width_px as f64;
            let available = y - BOTTOM_MARGIN;
            if height > available {
                width *= available / height;
                height = available;
            }
            let x = LEFT_MARGIN_MM * MM_TO_PT;
            let bottom = y - height;

            operations.extend([
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        real(width),
                        0.into(),
                        0.into(),
                        real(height),
                        real(x),
                        real(bottom),
                    ],
                ),
                Operation::new("Do", vec!["Im1".into()]),
                Operation::new("Q", vec![]),
            ]);
            debug!("Embedded plot {} ({}x{} px)", plot.path.display(), width_px, height_px);
        }

        let stream = Content { operations }
            .encode()
            .map_err(|e| AnalyzerError::ReportFailed(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, stream));

        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
            "XObject" => xobjects,
        });

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        doc.save(path)?;
        info!("PDF report saved as {}", path.display());

        Ok(ReportArtifact {
            path: path.to_path_buf(),
            includes_plot: content.plot.is_some(),
        })
    }
}

// ============================================================================
// PDF helpers
// ============================================================================

fn type1_font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// Encode text for a WinAnsi Type1 font. Characters outside Latin-1 become '?'.
pub(crate) fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn text_operations(line: &ReportLine, y: f64) -> Vec<Operation> {
    let bytes = latin1_bytes(&line.text);
    let (font, size, x) = match line.style {
        LineStyle::Title => {
            let text_width = bytes.len() as f64 * TITLE_SIZE as f64 * BOLD_GLYPH_WIDTH;
            ("F2", TITLE_SIZE, ((PAGE_WIDTH - text_width) / 2.0).max(0.0))
        }
        LineStyle::Body => ("F1", BODY_SIZE, LEFT_MARGIN_MM * MM_TO_PT),
    };

    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), size.into()]),
        Operation::new("Td", vec![real(x), real(y)]),
        Operation::new("Tj", vec![Object::String(bytes, StringFormat::Literal)]),
        Operation::new("ET", vec![]),
    ]
}

/// Add the PNG at `path` as an RGB image XObject.
fn embed_image(doc: &mut Document, path: &Path) -> Result<(ObjectId, u32, u32)> {
    let rgb = image::open(path)?.to_rgb8();
    let (width, height) = rgb.dimensions();

    let stream = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rgb.into_raw(),
    );
    Ok((doc.add_object(stream), width, height))
}
