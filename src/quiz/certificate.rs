use chrono::Local;
use genpdf::elements::{Break, FramedElement, LinearLayout, Paragraph, TableLayout};
use genpdf::style::{Color, LineStyle, Style};
use genpdf::{Alignment, Element, SimplePageDecorator, Size};
use thiserror::Error;
use uuid::Uuid;

/// Ink for the border and all text.
const DARK_BLUE: Color = Color::Rgb(0, 24, 88);

/// A5 landscape, in millimeters.
const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 148.0;
const PAGE_MARGIN_MM: i32 = 10;
const BORDER_THICKNESS_MM: f64 = 1.0;

/// Directories probed for a usable TrueType family; genpdf needs real font
/// files for text metrics.
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/TTF",
    "/System/Library/Fonts/Supplemental",
    "/Library/Fonts",
];
const FONT_NAMES: &[&str] = &["LiberationSans", "DejaVuSans", "Arial"];

/// Everything needed to issue one certificate.
#[derive(Debug)]
pub struct CertificateRequest {
    pub name: String,
    pub score: usize,
    pub total: usize,
    pub instructor: String,
}

/// A rendered certificate: the PDF bytes plus the unique filename the
/// caller should store them under. Persistence is the caller's decision.
#[derive(Debug)]
pub struct Certificate {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Error, Debug)]
pub enum CertificateError {
    #[error("no usable font family found, install Liberation or DejaVu fonts")]
    FontsUnavailable,

    #[error("failed to assemble certificate: {0}")]
    Pdf(#[from] genpdf::error::Error),
}

/// Draws the fixed single-page completion certificate.
///
/// Landscape A5, dark blue framed border, centered title/recipient/score
/// lines, instructor bottom left and issue date (render time) bottom right.
/// Long names are not wrapped or shrunk.
pub fn render_certificate(request: &CertificateRequest) -> Result<Certificate, CertificateError> {
    let font_family = load_font_family().ok_or(CertificateError::FontsUnavailable)?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title("Certificate of Completion");
    doc.set_paper_size(Size::new(PAGE_WIDTH_MM, PAGE_HEIGHT_MM));

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(PAGE_MARGIN_MM);
    doc.set_page_decorator(decorator);

    let title_style = Style::new().with_font_size(24).bold().with_color(DARK_BLUE);
    let body_style = Style::new().with_font_size(14).with_color(DARK_BLUE);
    let name_style = Style::new().with_font_size(18).bold().with_color(DARK_BLUE);
    let score_style = Style::new().with_font_size(12).with_color(DARK_BLUE);
    let footer_style = Style::new().with_font_size(10).with_color(DARK_BLUE);

    let mut content = LinearLayout::vertical();
    content.push(Break::new(1.0));
    content.push(
        Paragraph::new("Certificate of Completion")
            .aligned(Alignment::Center)
            .styled(title_style),
    );
    content.push(Break::new(1.5));
    content.push(
        Paragraph::new("This is awarded to")
            .aligned(Alignment::Center)
            .styled(body_style),
    );
    content.push(Break::new(0.5));
    content.push(
        Paragraph::new(request.name.as_str())
            .aligned(Alignment::Center)
            .styled(name_style),
    );
    content.push(Break::new(0.5));
    content.push(
        Paragraph::new("For successfully completing the quiz")
            .aligned(Alignment::Center)
            .styled(body_style),
    );
    content.push(Break::new(0.5));
    content.push(
        Paragraph::new(format!("Score: {} / {}", request.score, request.total))
            .aligned(Alignment::Center)
            .styled(score_style),
    );
    content.push(Break::new(2.0));

    let issued = Local::now().format("%d %B %Y");
    let mut footer = TableLayout::new(vec![1, 1]);
    footer
        .row()
        .element(
            Paragraph::new(format!("Instructor: {}", request.instructor))
                .styled(footer_style.italic()),
        )
        .element(
            Paragraph::new(format!("Issued on: {}", issued))
                .aligned(Alignment::Right)
                .styled(footer_style),
        )
        .push()?;
    content.push(footer);

    let border = LineStyle::new()
        .with_thickness(BORDER_THICKNESS_MM)
        .with_color(DARK_BLUE);
    doc.push(FramedElement::with_line_style(content.padded(6), border));

    let mut bytes = Vec::new();
    doc.render(&mut bytes)?;

    Ok(Certificate {
        filename: unique_filename(),
        bytes,
    })
}

fn load_font_family() -> Option<genpdf::fonts::FontFamily<genpdf::fonts::FontData>> {
    FONT_DIRS
        .iter()
        .filter(|dir| std::path::Path::new(dir).exists())
        .find_map(|dir| {
            FONT_NAMES
                .iter()
                .find_map(|name| genpdf::fonts::from_files(dir, name, None).ok())
        })
}

/// Filenames never repeat, so concurrent submissions cannot collide in a
/// shared artifact directory.
fn unique_filename() -> String {
    format!("cert_{}.pdf", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_carries_a_unique_token() {
        let first = unique_filename();
        let second = unique_filename();

        assert!(first.starts_with("cert_"));
        assert!(first.ends_with(".pdf"));
        // "cert_" + uuid (36 chars, hyphenated) + ".pdf"
        assert_eq!(first.len(), 5 + 36 + 4);
        assert_ne!(first, second);
    }
}
