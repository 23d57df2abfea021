//! TrueType fonts embedded as Type0 / CIDFontType2 with Identity-H encoding.
//!
//! Text is written as two-byte glyph ids. Every glyph a document uses is
//! listed in the width array and in a ToUnicode CMap, so viewers and text
//! extraction get the original characters back.

use std::{borrow::Cow, collections::BTreeMap, fmt, path::Path};

use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use ttf_parser::{Face, GlyphId};

use crate::error::RenderingUnavailableError;

const ELLIPSIS: char = '…';

/// Glyph space of PDF font metrics.
const GLYPH_SPACE: f32 = 1000.0;

/// CMap sections may not hold more than 100 entries.
const CMAP_SECTION_LEN: usize = 100;

/// A TrueType font file read once and embedded in every rendered document.
pub struct FontProgram {
    name: String,
    data: Vec<u8>,
}

impl fmt::Debug for FontProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontProgram")
            .field("name", &self.name)
            .field("len", &self.data.len())
            .finish()
    }
}

impl FontProgram {
    pub fn load(path: &Path) -> Result<Self, RenderingUnavailableError> {
        let data = std::fs::read(path).map_err(|err| {
            RenderingUnavailableError::new(format!(
                "cannot read font {}: {err}",
                path.display()
            ))
        })?;

        Self::from_bytes(base_font_name(path), data)
    }

    pub fn from_bytes(
        name: impl Into<String>,
        data: Vec<u8>,
    ) -> Result<Self, RenderingUnavailableError> {
        let name = name.into();
        let face = Face::parse(&data, 0).map_err(|err| {
            RenderingUnavailableError::new(format!("font {name} cannot be parsed: {err}"))
        })?;

        if face.tables().glyf.is_none() {
            return Err(RenderingUnavailableError::new(format!(
                "font {name} has no TrueType outlines"
            )));
        }

        Ok(Self { name, data })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start tracking glyph usage for one document.
    pub(crate) fn shape(
        &self,
        resource: &'static str,
    ) -> Result<ShapedFont<'_>, RenderingUnavailableError> {
        let face = Face::parse(&self.data, 0).map_err(|err| {
            RenderingUnavailableError::new(format!("font {} cannot be parsed: {err}", self.name))
        })?;
        let scale = GLYPH_SPACE / f32::from(face.units_per_em());

        Ok(ShapedFont {
            resource,
            program: self,
            face,
            scale,
            used: BTreeMap::new(),
        })
    }
}

/// A font bound to one document: measures and encodes text, then embeds itself.
pub(crate) struct ShapedFont<'a> {
    resource: &'static str,
    program: &'a FontProgram,
    face: Face<'a>,
    scale: f32,
    used: BTreeMap<u16, char>,
}

impl<'a> ShapedFont<'a> {
    /// Name of the font in the page resources.
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    fn glyph(&self, c: char) -> u16 {
        self.face.glyph_index(c).map_or(0, |glyph| glyph.0)
    }

    /// Advance of a glyph in glyph space units.
    fn advance(&self, glyph: u16) -> f32 {
        self.face
            .glyph_hor_advance(GlyphId(glyph))
            .map_or(0.0, f32::from)
            * self.scale
    }

    /// Width of `text` in points.
    pub fn width(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|c| self.advance(self.glyph(c)))
            .sum::<f32>()
            * size
            / GLYPH_SPACE
    }

    /// `text` cut down and ended with an ellipsis so it fits in `max_width`.
    pub fn fit<'t>(&self, text: &'t str, size: f32, max_width: f32) -> Cow<'t, str> {
        if self.width(text, size) <= max_width {
            return Cow::Borrowed(text);
        }

        let budget = max_width - self.width(ELLIPSIS.encode_utf8(&mut [0; 4]), size);
        let mut width = 0.0;
        let mut end = 0;
        for (index, c) in text.char_indices() {
            width += self.advance(self.glyph(c)) * size / GLYPH_SPACE;
            if width > budget {
                break;
            }
            end = index + c.len_utf8();
        }

        Cow::Owned(format!("{}{ELLIPSIS}", text[..end].trim_end()))
    }

    /// Glyph ids of `text` as big-endian pairs, recording each glyph used.
    pub fn encode(&mut self, text: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        for c in text.chars() {
            let glyph = self.glyph(c);
            if glyph != 0 {
                self.used.entry(glyph).or_insert(c);
            }
            bytes.extend_from_slice(&glyph.to_be_bytes());
        }

        bytes
    }

    /// Add the font program, descriptor and dictionaries to `doc`.
    ///
    /// Returns the id of the Type0 font to reference from page resources.
    pub fn embed(self, doc: &mut Document) -> ObjectId {
        let scale = |value: i16| (f32::from(value) * self.scale).round() as i64;
        let base_font = self.program.name.to_owned();
        let bbox = self.face.global_bounding_box();
        let ascent = self.face.ascender();
        let cap_height = self.face.capital_height().unwrap_or(ascent);

        let data = self.program.data.to_owned();
        let length = data.len() as i64;
        let font_file_id = doc.add_object(Stream::new(dictionary! { "Length1" => length }, data));

        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => base_font.to_owned(),
            // nonsymbolic
            "Flags" => 32i64,
            "FontBBox" => vec![
                scale(bbox.x_min).into(),
                scale(bbox.y_min).into(),
                scale(bbox.x_max).into(),
                scale(bbox.y_max).into(),
            ],
            "ItalicAngle" => 0i64,
            "Ascent" => scale(ascent),
            "Descent" => scale(self.face.descender()),
            "CapHeight" => scale(cap_height),
            "StemV" => 80i64,
            "FontFile2" => font_file_id,
        });

        let widths: Vec<Object> = self
            .used
            .keys()
            .flat_map(|&glyph| {
                [
                    Object::Integer(i64::from(glyph)),
                    Object::Array(vec![Object::Integer(self.advance(glyph).round() as i64)]),
                ]
            })
            .collect();

        let cid_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "CIDFontType2",
            "BaseFont" => base_font.to_owned(),
            "CIDSystemInfo" => dictionary! {
                "Registry" => Object::string_literal("Adobe"),
                "Ordering" => Object::string_literal("Identity"),
                "Supplement" => 0i64,
            },
            "FontDescriptor" => descriptor_id,
            "DW" => self.advance(0).round() as i64,
            "W" => widths,
            "CIDToGIDMap" => "Identity",
        });

        let to_unicode_id = doc.add_object(Stream::new(
            dictionary! {},
            to_unicode_cmap(&self.used).into_bytes(),
        ));

        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => base_font,
            "Encoding" => "Identity-H",
            "DescendantFonts" => vec![cid_font_id.into()],
            "ToUnicode" => to_unicode_id,
        })
    }
}

/// PostScript-safe font name derived from the file name.
fn base_font_name(path: &Path) -> String {
    let name: String = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();

    if name.is_empty() {
        "EmbeddedFont".to_owned()
    } else {
        name
    }
}

fn to_unicode_cmap(used: &BTreeMap<u16, char>) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo\n\
         << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(&u16, &char)> = used.iter().collect();
    for section in entries.chunks(CMAP_SECTION_LEN) {
        cmap.push_str(&format!("{} beginbfchar\n", section.len()));
        for (glyph, c) in section {
            let target: String = c
                .encode_utf16(&mut [0; 2])
                .iter()
                .map(|unit| format!("{unit:04X}"))
                .collect();
            cmap.push_str(&format!("<{glyph:04X}> <{target}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
    );

    cmap
}
