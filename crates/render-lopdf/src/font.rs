//! PDF font objects for the resolved label typeface.
//!
//! With a resolved font file the face is embedded as a TrueType font
//! (FontFile2) with a WinAnsi widths array taken from `ttf-parser`, so
//! viewers position text exactly the way the layout engine measured it.
//! Without one, the base-14 Helvetica path is used: non-embedded Type1
//! with the same AFM widths that back `HelveticaMetrics`.

use crate::writer::PdfWriter;
use etiqueta_render_core::{FontResource, RenderError};
use lopdf::{Dictionary, Object, Stream, dictionary};
use std::io::{Seek, Write};
use ttf_parser::Face;

/// Internal resource name of the single label font.
pub(crate) const FONT_NAME: &str = "F1";

const FIRST_CHAR: u8 = 32;
const LAST_CHAR: u8 = 255;

/// Buffers the font objects into the writer and returns the resources
/// font dictionary mapping `F1` to them.
pub(crate) fn build_font_dict<W: Write + Seek>(
    writer: &mut PdfWriter<W>,
    font: &FontResource,
) -> Result<Dictionary, RenderError> {
    let font_object = match font.data() {
        Some(data) => match Face::parse(&data, 0) {
            Ok(face) => {
                let name = font
                    .postscript_name()
                    .unwrap_or_else(|| "LabelFont".to_string());
                embedded_truetype(writer, &face, data.as_ref(), &name)
            }
            Err(err) => {
                log::warn!("resolved font no longer parses ({err}), using Helvetica");
                builtin_helvetica()
            }
        },
        None => builtin_helvetica(),
    };

    let mut font_dict = Dictionary::new();
    font_dict.set(FONT_NAME.as_bytes(), font_object);
    Ok(font_dict)
}

fn builtin_helvetica() -> Object {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    }
    .into()
}

fn embedded_truetype<W: Write + Seek>(
    writer: &mut PdfWriter<W>,
    face: &Face<'_>,
    data: &[u8],
    name: &str,
) -> Object {
    let upem = face.units_per_em() as f32;
    let to_glyph_space = 1000.0 / upem;

    let font_file_id = writer.buffer_object(Object::Stream(Stream::new(
        dictionary! { "Length1" => data.len() as i64 },
        data.to_vec(),
    )));

    let bbox = face.global_bounding_box();
    let ascent = (face.ascender() as f32 * to_glyph_space).round() as i64;
    let descent = (face.descender() as f32 * to_glyph_space).round() as i64;
    let cap_height = face
        .capital_height()
        .map(|h| (h as f32 * to_glyph_space).round() as i64)
        .unwrap_or(ascent);

    let descriptor_id = writer.buffer_object(
        dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => Object::Name(name.as_bytes().to_vec()),
            "Flags" => 32,
            "FontBBox" => vec![
                ((bbox.x_min as f32 * to_glyph_space) as i64).into(),
                ((bbox.y_min as f32 * to_glyph_space) as i64).into(),
                ((bbox.x_max as f32 * to_glyph_space) as i64).into(),
                ((bbox.y_max as f32 * to_glyph_space) as i64).into(),
            ],
            "ItalicAngle" => 0,
            "Ascent" => ascent,
            "Descent" => descent,
            "CapHeight" => cap_height,
            "StemV" => 80,
            "FontFile2" => font_file_id,
        }
        .into(),
    );

    let widths: Vec<Object> = (FIRST_CHAR..=LAST_CHAR)
        .map(|code| {
            let c = code as char; // Latin-1 approximation of WinAnsi
            // Same fallback as the measurement side: half an em.
            let units = face
                .glyph_index(c)
                .and_then(|g| face.glyph_hor_advance(g))
                .map(|w| w as f32)
                .unwrap_or(upem / 2.0);
            Object::Integer((units * to_glyph_space).round() as i64)
        })
        .collect();

    dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "BaseFont" => Object::Name(name.as_bytes().to_vec()),
        "FirstChar" => FIRST_CHAR as i64,
        "LastChar" => LAST_CHAR as i64,
        "Widths" => widths,
        "FontDescriptor" => descriptor_id,
        "Encoding" => "WinAnsiEncoding",
    }
    .into()
}
