// Preview generation for the front entry: text, images, PDFs, and fallbacks
use crate::domain::{Entry, FileKind};
use crate::error::{CullError, Result};
use image::{DynamicImage, GenericImageView, Pixel};
use pdfium_render::prelude::*;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::fs;
use std::path::Path;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;

/// Text previews stop after this many lines...
pub const MAX_PREVIEW_LINES: usize = 40;
/// ...or this many characters, whichever comes first.
pub const MAX_PREVIEW_CHARS: usize = 2000;
const TRUNCATION_MARKER: &str = "… [truncated]";

/// Images above this size are not previewed at all.
pub const IMAGE_PREVIEW_CEILING: u64 = 50 * 1024 * 1024;
/// Oversized originals are downscaled to this edge length before display.
pub const MAX_SOURCE_EDGE: u32 = 2000;

const MAX_CELL_WIDTH: u32 = 160;
/// Height is doubled in pixels because half-blocks pack 2 pixels per row.
const MAX_CELL_HEIGHT: u32 = 100;

/// Preview content: plain lines, or styled lines for pixel output.
#[derive(Debug, Clone)]
pub enum PreviewContent {
    Text(Vec<String>),
    Styled(Vec<Line<'static>>),
}

/// Truncates to the line and character budgets; the flag reports whether
/// anything was cut.
fn truncate_text(content: &str) -> (Vec<String>, bool) {
    let mut lines = Vec::new();
    let mut chars_used = 0usize;
    let mut cut = false;

    for (i, line) in content.lines().enumerate() {
        if i >= MAX_PREVIEW_LINES {
            cut = true;
            break;
        }
        let remaining = MAX_PREVIEW_CHARS.saturating_sub(chars_used);
        if remaining == 0 {
            cut = true;
            break;
        }
        let char_count = line.chars().count();
        if char_count > remaining {
            lines.push(line.chars().take(remaining).collect());
            cut = true;
            break;
        }
        chars_used += char_count;
        lines.push(line.to_string());
    }

    if !cut && content.lines().count() > lines.len() {
        cut = true;
    }

    (lines, cut)
}

/// Generates a syntax-highlighted text preview.
///
/// Non-UTF-8 content is unpreviewable; the result says so instead of
/// erroring.
pub fn generate_text_preview(entry: &Entry) -> Result<PreviewContent> {
    let bytes = match fs::read(&entry.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return Ok(PreviewContent::Text(vec![
                entry.name.clone(),
                String::new(),
                format!("[Could not read file: {}]", e),
            ]))
        }
    };

    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(_) => {
            return Ok(PreviewContent::Text(vec![
                entry.name.clone(),
                format!("Size: {} bytes", entry.size),
                String::new(),
                "[Not valid UTF-8; no text preview]".to_string(),
            ]))
        }
    };

    let (lines, cut) = truncate_text(&content);

    let extension = entry
        .path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    let syntax_set = SyntaxSet::load_defaults_newlines();
    let theme_set = ThemeSet::load_defaults();
    let syntax = syntax_set
        .find_syntax_by_extension(extension)
        .unwrap_or_else(|| syntax_set.find_syntax_plain_text());
    let mut highlighter = HighlightLines::new(syntax, &theme_set.themes["base16-ocean.dark"]);

    let mut highlighted = Vec::with_capacity(lines.len() + 1);
    for line in &lines {
        let line_with_newline = format!("{}\n", line);
        let ranges = highlighter
            .highlight_line(&line_with_newline, &syntax_set)
            .map_err(|e| CullError::Config(format!("syntax highlighting error: {}", e)))?;

        let mut line_str = String::new();
        for (_style, text) in ranges {
            line_str.push_str(text);
        }
        if line_str.ends_with('\n') {
            line_str.pop();
        }
        highlighted.push(line_str);
    }

    if cut {
        highlighted.push(TRUNCATION_MARKER.to_string());
    }

    Ok(PreviewContent::Text(highlighted))
}

/// Fits `(width, height)` inside the maxima, preserving aspect ratio and
/// never upscaling.
pub fn calculate_resize_dimensions(
    original_width: u32,
    original_height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if original_width == 0 || original_height == 0 {
        return (0, 0);
    }

    let width_ratio = max_width as f64 / original_width as f64;
    let height_ratio = max_height as f64 / original_height as f64;
    let ratio = width_ratio.min(height_ratio);

    if ratio >= 1.0 {
        (original_width, original_height)
    } else {
        (
            (original_width as f64 * ratio) as u32,
            (original_height as f64 * ratio) as u32,
        )
    }
}

/// Converts an image to half-block lines: the upper half block (▀) carries
/// the upper pixel as foreground and the lower pixel as background, packing
/// two pixel rows into one terminal row.
pub fn image_to_halfblock_lines(img: &DynamicImage, width: u32, height: u32) -> Vec<Line<'static>> {
    let height = if height % 2 == 0 { height } else { height + 1 };

    // Triangle is fast enough for wallpapers; Lanczos3 is not.
    let img = img.resize_exact(width, height, image::imageops::FilterType::Triangle);
    let img = img.to_rgb8();

    let term_height = height / 2;
    let mut lines = Vec::with_capacity(term_height as usize);

    for y in 0..term_height {
        let upper_y = y * 2;
        let lower_y = upper_y + 1;

        let mut spans = Vec::with_capacity(width as usize);
        for x in 0..width {
            let upper = img.get_pixel(x, upper_y).to_rgb();
            let lower = if lower_y < height {
                img.get_pixel(x, lower_y).to_rgb()
            } else {
                upper
            };

            let style = Style::default()
                .fg(Color::Rgb(upper[0], upper[1], upper[2]))
                .bg(Color::Rgb(lower[0], lower[1], lower[2]));
            spans.push(Span::styled("▀", style));
        }
        lines.push(Line::from(spans));
    }

    lines
}

/// Generates an image preview, honoring the size ceiling and the source
/// downscale cap.
pub fn generate_image_preview(entry: &Entry) -> Result<PreviewContent> {
    if entry.size > IMAGE_PREVIEW_CEILING {
        return Ok(PreviewContent::Text(vec![
            entry.name.clone(),
            format!("Size: {} bytes", entry.size),
            String::new(),
            "[Image too large to preview]".to_string(),
            String::new(),
            "Press 'o' to open in your default viewer.".to_string(),
        ]));
    }

    let img = image::open(&entry.path).map_err(|e| {
        CullError::Config(format!(
            "image loading error for {}: {}",
            entry.path.display(),
            e
        ))
    })?;
    let (original_width, original_height) = img.dimensions();

    // Cap the source before any further work, keeping aspect ratio.
    let (capped_width, capped_height) = calculate_resize_dimensions(
        original_width,
        original_height,
        MAX_SOURCE_EDGE,
        MAX_SOURCE_EDGE,
    );
    let img = if (capped_width, capped_height) != (original_width, original_height) {
        img.resize(
            capped_width,
            capped_height,
            image::imageops::FilterType::Triangle,
        )
    } else {
        img
    };

    let (cell_width, cell_height) =
        calculate_resize_dimensions(capped_width, capped_height, MAX_CELL_WIDTH, MAX_CELL_HEIGHT);

    let header_style = Style::default().add_modifier(Modifier::BOLD);
    let info_style = Style::default().fg(Color::Gray);

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(vec![
            Span::styled("Image: ", header_style),
            Span::styled(entry.name.clone(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("Dimensions: {}×{} px", original_width, original_height),
                info_style,
            ),
            Span::raw("  "),
            Span::styled(format!("Size: {} bytes", entry.size), info_style),
        ]),
        Line::from(""),
    ];

    lines.extend(image_to_halfblock_lines(&img, cell_width, cell_height));
    Ok(PreviewContent::Styled(lines))
}

/// Attempts to bind Pdfium from the usual locations, without panicking.
fn try_create_pdfium() -> Option<Pdfium> {
    if let Ok(bindings) = Pdfium::bind_to_system_library() {
        return Some(Pdfium::new(bindings));
    }

    if let Ok(lib_path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        if let Ok(bindings) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&lib_path))
        {
            return Some(Pdfium::new(bindings));
        }
    }

    if let Ok(bindings) =
        Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./lib/"))
    {
        return Some(Pdfium::new(bindings));
    }

    if let Ok(bindings) =
        Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
    {
        return Some(Pdfium::new(bindings));
    }

    None
}

/// True when a Pdfium library could be bound.
pub fn is_pdfium_available() -> bool {
    try_create_pdfium().is_some()
}

fn extract_pdf_text(path: &Path, max_lines: usize) -> Result<Vec<String>> {
    let pdfium = try_create_pdfium().ok_or_else(|| {
        CullError::Config(
            "Pdfium library not available; install libpdfium for PDF previews".to_string(),
        )
    })?;

    let document = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| CullError::Config(format!("PDF loading error: {}", e)))?;

    let mut all_text = String::new();
    let page_count = document.pages().len();

    for page_index in 0..page_count.min(5) {
        if let Ok(page) = document.pages().get(page_index) {
            if let Ok(text_page) = page.text() {
                let page_text = text_page.all();
                if !page_text.is_empty() {
                    if !all_text.is_empty() {
                        all_text.push_str("\n\n--- Page ");
                        all_text.push_str(&(page_index + 1).to_string());
                        all_text.push_str(" ---\n\n");
                    }
                    all_text.push_str(&page_text);
                }
            }
        }

        if all_text.lines().count() >= max_lines {
            break;
        }
    }

    Ok(all_text
        .lines()
        .take(max_lines)
        .map(|s| s.to_string())
        .collect())
}

/// Generates a PDF preview by extracting text from the leading pages.
pub fn generate_pdf_preview(entry: &Entry) -> Result<PreviewContent> {
    match extract_pdf_text(&entry.path, MAX_PREVIEW_LINES) {
        Ok(text_lines) => {
            let mut lines = vec![
                format!("PDF: {}", entry.name),
                format!("Size: {} bytes", entry.size),
                String::new(),
            ];

            if text_lines.is_empty() {
                lines.push("[No extractable text (may be scanned/image-based)]".to_string());
                lines.push(String::new());
                lines.push("Press 'o' to open in your default PDF viewer.".to_string());
            } else {
                lines.extend(text_lines);
            }

            Ok(PreviewContent::Text(lines))
        }
        Err(e) => {
            let error_msg = e.to_string();
            let help_msg = if error_msg.contains("Pdfium library not available") {
                "[PDF preview requires the Pdfium library]"
            } else {
                "[This PDF may be corrupted, password-protected, or unsupported]"
            };

            Ok(PreviewContent::Text(vec![
                format!("PDF: {}", entry.name),
                format!("Size: {} bytes", entry.size),
                String::new(),
                format!("Error: {}", error_msg),
                String::new(),
                help_msg.to_string(),
                String::new(),
                "Press 'o' to open in your default PDF viewer.".to_string(),
            ]))
        }
    }
}

fn generate_video_preview(entry: &Entry) -> PreviewContent {
    PreviewContent::Text(vec![
        format!("Video: {}", entry.name),
        format!("Size: {} bytes", entry.size),
        String::new(),
        "[Playback is delegated to your default player]".to_string(),
        String::new(),
        "Press 'o' to open in your default player.".to_string(),
    ])
}

fn generate_fallback_preview(entry: &Entry) -> PreviewContent {
    if entry.is_dir {
        PreviewContent::Text(vec![
            format!("Directory: {}", entry.name),
            String::new(),
            "[Discarding moves the whole directory to the trash]".to_string(),
        ])
    } else {
        PreviewContent::Text(vec![
            entry.name.clone(),
            format!("Size: {} bytes", entry.size),
            String::new(),
            "[No preview for this file type]".to_string(),
        ])
    }
}

/// Generates a preview for any entry, dispatching on its classification.
pub fn generate_preview(entry: &Entry) -> Result<PreviewContent> {
    match entry.kind {
        FileKind::Text => generate_text_preview(entry),
        FileKind::Image => generate_image_preview(entry),
        FileKind::Pdf => generate_pdf_preview(entry),
        FileKind::Video => Ok(generate_video_preview(entry)),
        FileKind::None => Ok(generate_fallback_preview(entry)),
    }
}
