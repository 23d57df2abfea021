use std::sync::Arc;

use lopdf::{
    Document, Object, ObjectId, Stream, StringFormat, dictionary,
    content::{Content, Operation},
};

use crate::{
    branding::Branding,
    error::RenderingUnavailableError,
    font::{FontProgram, ShapedFont},
    layout::{Page, ShoppingListDocument, paginate},
    line::AggregatedLine,
};

// A4 in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;
const HEADER_HEIGHT: f32 = 80.0;
const TABLE_GAP: f32 = 20.0;
const ROW_HEIGHT: f32 = 28.0;
const FOOTER_HEIGHT: f32 = 40.0;
const QUANTITY_COLUMN_X: f32 = 380.0;
const CELL_PADDING: f32 = 10.0;

/// Bottom edge of the caption row.
const TABLE_TOP: f32 = PAGE_HEIGHT - MARGIN - HEADER_HEIGHT - TABLE_GAP - ROW_HEIGHT;
/// Lowest y a data row may reach, the footer lives below.
const TABLE_BOTTOM: f32 = MARGIN + FOOTER_HEIGHT;

const TABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const INGREDIENT_WIDTH: f32 = QUANTITY_COLUMN_X - MARGIN - 2.0 * CELL_PADDING;
const QUANTITY_WIDTH: f32 = PAGE_WIDTH - MARGIN - QUANTITY_COLUMN_X - CELL_PADDING;

/// Most data rows a page holds between the caption row and the footer.
pub const MAX_PAGE_SIZE: usize = ((TABLE_TOP - TABLE_BOTTOM) / ROW_HEIGHT) as usize;
pub const MIN_FONT_SIZE: u16 = 6;
pub const MAX_FONT_SIZE: u16 = 14;
pub const MAX_TITLE_FONT_SIZE: u16 = 24;

const BAND_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
const BAND_TEXT_COLOR: [f32; 3] = [0.96, 0.96, 0.96];
const TABLE_HEADER_COLOR: [f32; 3] = [0.96, 0.96, 0.86];
const LINE_COLOR: [f32; 3] = [0.5, 0.5, 0.5];
const TEXT_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// Renders aggregated shopping lists as PDF documents.
///
/// Fonts are read once at construction and shared by every clone, so a
/// single renderer serves all requests.
#[derive(Debug, Clone)]
pub struct ShoppingListRenderer {
    branding: Branding,
    regular: Arc<FontProgram>,
    bold: Option<Arc<FontProgram>>,
}

struct Fonts<'a> {
    regular: ShapedFont<'a>,
    bold: Option<ShapedFont<'a>>,
}

impl<'a> Fonts<'a> {
    fn bold(&mut self) -> &mut ShapedFont<'a> {
        match &mut self.bold {
            Some(bold) => bold,
            None => &mut self.regular,
        }
    }
}

impl ShoppingListRenderer {
    pub fn new(branding: Branding) -> Result<Self, RenderingUnavailableError> {
        branding.check_layout()?;

        let regular = Arc::new(FontProgram::load(&branding.font_path)?);
        let bold = match &branding.bold_font_path {
            Some(path) => Some(Arc::new(FontProgram::load(path)?)),
            None => None,
        };

        Ok(Self {
            branding,
            regular,
            bold,
        })
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    pub fn layout(&self, lines: &[AggregatedLine], requester: &str) -> ShoppingListDocument {
        ShoppingListDocument {
            title: self.branding.title.to_owned(),
            header: self.branding.header_text.to_owned(),
            requester: requester.to_owned(),
            footer: self.branding.footer_text.to_owned(),
            pages: paginate(lines, self.branding.page_size),
        }
    }

    /// Produce the PDF bytes of the shopping list, fully in memory.
    pub fn render(
        &self,
        lines: &[AggregatedLine],
        requester: &str,
    ) -> Result<Vec<u8>, RenderingUnavailableError> {
        let document = self.layout(lines, requester);
        self.write_pdf(&document)
    }

    fn write_pdf(&self, document: &ShoppingListDocument) -> Result<Vec<u8>, RenderingUnavailableError> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Fonts {
            regular: self.regular.shape("F1")?,
            bold: match &self.bold {
                Some(bold) => Some(bold.shape("F2")?),
                None => None,
            },
        };

        let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
        for page in &document.pages {
            let content = Content {
                operations: self.page_operations(&mut fonts, document, page),
            };
            let encoded = content
                .encode()
                .map_err(|e| RenderingUnavailableError::new(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        // glyph usage is only known once every page is written
        let Fonts { regular, bold } = fonts;
        let mut font_resources = dictionary! {};
        font_resources.set(regular.resource(), regular.embed(&mut doc));
        if let Some(bold) = bold {
            font_resources.set(bold.resource(), bold.embed(&mut doc));
        }
        let resources_id = doc.add_object(dictionary! { "Font" => font_resources });

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.0f32.into(), 0.0f32.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => lopdf::text_string(&document.title),
            "Author" => lopdf::text_string(&document.requester),
            "Producer" => lopdf::text_string("foodgram"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| RenderingUnavailableError::new(e.to_string()))?;

        Ok(buffer)
    }

    fn page_operations(
        &self,
        fonts: &mut Fonts<'_>,
        document: &ShoppingListDocument,
        page: &Page,
    ) -> Vec<Operation> {
        let font_size = f32::from(self.branding.font_size);
        let title_size = f32::from(self.branding.title_font_size);
        let band_text_width = TABLE_WIDTH - 2.0 * CELL_PADDING;
        let mut ops = Vec::new();

        // header band
        let band_y = PAGE_HEIGHT - MARGIN - HEADER_HEIGHT;
        fill_rect(&mut ops, BAND_COLOR, MARGIN, band_y, TABLE_WIDTH, HEADER_HEIGHT);
        let text_x = MARGIN + CELL_PADDING;
        text(
            &mut ops,
            fonts.bold(),
            Style::new(title_size, BAND_TEXT_COLOR, band_text_width),
            (text_x, band_y + HEADER_HEIGHT - CELL_PADDING - title_size),
            &document.title,
        );
        let band_style = Style::new(font_size, BAND_TEXT_COLOR, band_text_width);
        text(
            &mut ops,
            &mut fonts.regular,
            band_style,
            (text_x, band_y + CELL_PADDING + font_size + 4.0),
            &document.header,
        );
        text(
            &mut ops,
            &mut fonts.regular,
            band_style,
            (text_x, band_y + CELL_PADDING),
            &format!("Prepared for {}", document.requester),
        );

        // caption row
        let mut row_y = TABLE_TOP;
        fill_rect(&mut ops, TABLE_HEADER_COLOR, MARGIN, row_y, TABLE_WIDTH, ROW_HEIGHT);
        self.row(
            &mut ops,
            fonts.bold(),
            row_y,
            &self.branding.ingredient_caption,
            &self.branding.quantity_caption,
        );
        line_below(&mut ops, row_y);

        if page.rows.is_empty() {
            row_y -= ROW_HEIGHT;
            text(
                &mut ops,
                &mut fonts.regular,
                Style::new(font_size, TEXT_COLOR, band_text_width),
                (text_x, row_y + (ROW_HEIGHT - font_size) / 2.0),
                &self.branding.empty_text,
            );
        }

        for row in &page.rows {
            row_y -= ROW_HEIGHT;
            self.row(&mut ops, &mut fonts.regular, row_y, &row.ingredient, &row.quantity);
            line_below(&mut ops, row_y);
        }

        // footer
        stroke_line(
            &mut ops,
            LINE_COLOR,
            MARGIN,
            TABLE_BOTTOM - 12.0,
            PAGE_WIDTH - MARGIN,
        );
        text(
            &mut ops,
            &mut fonts.regular,
            Style::new(font_size, TEXT_COLOR, QUANTITY_COLUMN_X - MARGIN - CELL_PADDING),
            (MARGIN, MARGIN),
            &document.footer,
        );
        text(
            &mut ops,
            &mut fonts.regular,
            Style::new(font_size, TEXT_COLOR, QUANTITY_WIDTH),
            (QUANTITY_COLUMN_X, MARGIN),
            &page.footer_label(),
        );

        ops
    }

    fn row(
        &self,
        ops: &mut Vec<Operation>,
        font: &mut ShapedFont<'_>,
        y: f32,
        ingredient: &str,
        quantity: &str,
    ) {
        let size = f32::from(self.branding.font_size);
        let baseline = y + (ROW_HEIGHT - size) / 2.0;
        text(
            ops,
            font,
            Style::new(size, TEXT_COLOR, INGREDIENT_WIDTH),
            (MARGIN + CELL_PADDING, baseline),
            ingredient,
        );
        text(
            ops,
            font,
            Style::new(size, TEXT_COLOR, QUANTITY_WIDTH),
            (QUANTITY_COLUMN_X, baseline),
            quantity,
        );
    }
}

#[derive(Debug, Clone, Copy)]
struct Style {
    size: f32,
    color: [f32; 3],
    max_width: f32,
}

impl Style {
    fn new(size: f32, color: [f32; 3], max_width: f32) -> Self {
        Self {
            size,
            color,
            max_width,
        }
    }
}

fn set_fill(ops: &mut Vec<Operation>, [r, g, b]: [f32; 3]) {
    ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
}

fn fill_rect(ops: &mut Vec<Operation>, color: [f32; 3], x: f32, y: f32, w: f32, h: f32) {
    set_fill(ops, color);
    ops.push(Operation::new(
        "re",
        vec![x.into(), y.into(), w.into(), h.into()],
    ));
    ops.push(Operation::new("f", vec![]));
}

fn stroke_line(ops: &mut Vec<Operation>, [r, g, b]: [f32; 3], x1: f32, y: f32, x2: f32) {
    ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
    ops.push(Operation::new("w", vec![1.0f32.into()]));
    ops.push(Operation::new("m", vec![x1.into(), y.into()]));
    ops.push(Operation::new("l", vec![x2.into(), y.into()]));
    ops.push(Operation::new("S", vec![]));
}

fn line_below(ops: &mut Vec<Operation>, y: f32) {
    stroke_line(ops, LINE_COLOR, MARGIN, y, MARGIN + TABLE_WIDTH);
}

/// One line of text, shortened with an ellipsis past `style.max_width`.
fn text(
    ops: &mut Vec<Operation>,
    font: &mut ShapedFont<'_>,
    style: Style,
    (x, y): (f32, f32),
    value: &str,
) {
    let value = font.fit(value, style.size, style.max_width);
    let glyphs = font.encode(&value);

    ops.push(Operation::new("BT", vec![]));
    set_fill(ops, style.color);
    ops.push(Operation::new(
        "Tf",
        vec![font.resource().into(), style.size.into()],
    ));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(glyphs, StringFormat::Hexadecimal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}
