//! A minimal buffered PDF writer.
//!
//! Objects are buffered until `finish`, which lays them out with a
//! single contiguous cross-reference section. The label documents this
//! renderer produces are small (a handful of objects per page), so
//! buffering keeps the writer simple without a streaming xref.

use etiqueta_render_core::RenderError;
use lopdf::content::Content;
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::BTreeMap;
use std::io::{Seek, Write};

pub struct PdfWriter<W: Write + Seek> {
    writer: W,
    max_id: u32,
    catalog_id: ObjectId,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    objects: BTreeMap<ObjectId, Object>,
    font_dict: Dictionary,
    xobjects: Vec<(String, ObjectId)>,
}

impl<W: Write + Seek> PdfWriter<W> {
    pub fn new(mut writer: W) -> Result<Self, RenderError> {
        writer.write_all(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n")?;
        Ok(Self {
            writer,
            // ids 1..=3 are reserved for resources, pages and catalog
            max_id: 3,
            resources_id: (1, 0),
            pages_id: (2, 0),
            catalog_id: (3, 0),
            page_ids: Vec::new(),
            objects: BTreeMap::new(),
            font_dict: Dictionary::new(),
            xobjects: Vec::new(),
        })
    }

    pub fn set_font_dict(&mut self, font_dict: Dictionary) {
        self.font_dict = font_dict;
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.max_id += 1;
        (self.max_id, 0)
    }

    pub fn buffer_object(&mut self, object: Object) -> ObjectId {
        let id = self.new_object_id();
        self.objects.insert(id, object);
        id
    }

    pub fn add_content_stream(&mut self, content: Content) -> Result<ObjectId, RenderError> {
        let encoded = content.encode()?;
        let stream = Stream::new(dictionary! {}, encoded);
        Ok(self.buffer_object(Object::Stream(stream)))
    }

    /// Registers an image XObject in the shared resources, returning
    /// the name to reference it with in a `Do` operation.
    pub fn add_image_xobject(&mut self, stream: Stream) -> String {
        let id = self.buffer_object(Object::Stream(stream));
        let name = format!("Im{}", self.xobjects.len() + 1);
        self.xobjects.push((name.clone(), id));
        name
    }

    /// Appends a page of the given physical size (in points) whose
    /// content is the already-buffered stream.
    pub fn add_page(&mut self, content_id: ObjectId, width_pt: f32, height_pt: f32) -> ObjectId {
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), width_pt.into(), height_pt.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let page_id = self.buffer_object(page_dict.into());
        self.page_ids.push(page_id);
        page_id
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Writes every buffered object, the xref table and the trailer.
    pub fn finish(mut self) -> Result<W, RenderError> {
        let mut resources = dictionary! { "Font" => self.font_dict.clone() };
        if !self.xobjects.is_empty() {
            let mut xobject_dict = Dictionary::new();
            for (name, id) in &self.xobjects {
                xobject_dict.set(name.as_bytes(), Object::Reference(*id));
            }
            resources.set("XObject", Object::Dictionary(xobject_dict));
        }
        self.objects.insert(self.resources_id, resources.into());

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.objects.insert(self.pages_id, pages_dict.into());
        self.objects.insert(
            self.catalog_id,
            dictionary! { "Type" => "Catalog", "Pages" => self.pages_id }.into(),
        );

        // Every allocated id has a buffered object, so the xref is one
        // contiguous section starting at the conventional free entry.
        let mut offsets = Vec::with_capacity(self.objects.len());
        for (id, object) in &self.objects {
            offsets.push(self.writer.stream_position()?);
            write!(self.writer, "{} {} obj\n", id.0, id.1)?;
            serialize::write_object(&mut self.writer, object)?;
            writeln!(self.writer, "\nendobj")?;
        }

        let xref_start = self.writer.stream_position()?;
        writeln!(self.writer, "xref")?;
        writeln!(self.writer, "0 {}", offsets.len() + 1)?;
        writeln!(self.writer, "0000000000 65535 f ")?;
        for offset in offsets {
            writeln!(self.writer, "{:010} 00000 n ", offset)?;
        }

        let trailer = dictionary! {
            "Size" => (self.max_id + 1) as i64,
            "Root" => self.catalog_id,
        };
        writeln!(self.writer, "trailer")?;
        serialize::write_dictionary(&mut self.writer, &trailer)?;
        writeln!(self.writer, "\nstartxref")?;
        writeln!(self.writer, "{}", xref_start)?;
        write!(self.writer, "%%EOF")?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

mod serialize {
    use super::*;
    use std::io;

    pub fn write_object(writer: &mut dyn Write, object: &Object) -> io::Result<()> {
        match object {
            Object::Null => writer.write_all(b"null"),
            Object::Boolean(b) => writer.write_all(if *b { b"true" } else { b"false" }),
            Object::Integer(i) => write!(writer, "{}", i),
            Object::Real(r) => write!(writer, "{:.3}", r),
            Object::Name(n) => {
                writer.write_all(b"/")?;
                writer.write_all(n)
            }
            Object::String(s, format) => match format {
                StringFormat::Literal => {
                    writer.write_all(b"(")?;
                    for &byte in s {
                        if byte == b'(' || byte == b')' || byte == b'\\' {
                            writer.write_all(b"\\")?;
                        }
                        writer.write_all(&[byte])?;
                    }
                    writer.write_all(b")")
                }
                StringFormat::Hexadecimal => {
                    writer.write_all(b"<")?;
                    for byte in s {
                        write!(writer, "{:02X}", byte)?;
                    }
                    writer.write_all(b">")
                }
            },
            Object::Array(arr) => {
                writer.write_all(b"[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        writer.write_all(b" ")?;
                    }
                    write_object(writer, obj)?;
                }
                writer.write_all(b"]")
            }
            Object::Dictionary(dict) => write_dictionary(writer, dict),
            Object::Stream(stream) => {
                let mut dict = stream.dict.clone();
                dict.set("Length", stream.content.len() as i64);
                write_dictionary(writer, &dict)?;
                writer.write_all(b"\nstream\n")?;
                writer.write_all(&stream.content)?;
                writer.write_all(b"\nendstream")
            }
            Object::Reference(id) => write!(writer, "{} {} R", id.0, id.1),
        }
    }

    pub fn write_dictionary(writer: &mut dyn Write, dict: &Dictionary) -> io::Result<()> {
        writer.write_all(b"<<")?;
        for (key, value) in dict.iter() {
            writer.write_all(b"/")?;
            writer.write_all(key)?;
            writer.write_all(b" ")?;
            write_object(writer, value)?;
            writer.write_all(b" ")?;
        }
        writer.write_all(b">>")
    }
}
