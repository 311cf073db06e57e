//! Embedded raster image access backed by `lopdf`.
//!
//! Images are enumerated per page from the page's `/Resources /XObject`
//! dictionary (inherited from ancestor page-tree nodes when the page has none),
//! in dictionary order. Form XObjects are descended into through their own
//! `/Resources`, so an image drawn by a form is listed where the form is.
//! Only `/Subtype /Image` streams are reported.
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{ColorSpace, EmbeddedEncoding, SampleLayout};

/// Nesting depth after which page-tree and form traversal give up.
const MAX_TREE_DEPTH: usize = 32;

/// One embedded image stream, with the bytes needed to persist it.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    /// Zero-based page index
    pub page_index: usize,
    pub object_id: ObjectId,
    /// Dimensions declared in the image dictionary
    pub width: u32,
    pub height: u32,
    pub encoding: EmbeddedEncoding,
    /// Color space of raw samples; `None` for unknown or non-raw encodings
    pub color_space: Option<ColorSpace>,
    pub bits_per_component: u8,
    /// Encoded file bytes (JPEG, JPX, ...) or decoded samples for `Raw`
    pub data: Vec<u8>,
}

pub struct PdfSource {
    doc: Document,
    path: PathBuf,
}

impl PdfSource {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::missing(path));
        }
        let doc = Document::load(path)?;
        Ok(Self {
            doc,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Page object ids in page-number order.
    pub fn pages(&self) -> Vec<ObjectId> {
        self.doc.get_pages().into_values().collect()
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Image XObjects referenced by a page, in listing order, each listed once.
    pub fn page_image_ids(&self, page_id: ObjectId) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = Vec::new();
        if let Some(resources) = self.page_resources(page_id) {
            let mut forms = BTreeSet::new();
            self.collect_images(resources, 0, &mut forms, &mut ids);
        }
        ids
    }

    fn collect_images(
        &self,
        resources: &Dictionary,
        depth: usize,
        forms: &mut BTreeSet<ObjectId>,
        ids: &mut Vec<ObjectId>,
    ) {
        let Some(xobjects) = resources
            .get(b"XObject")
            .ok()
            .and_then(|obj| self.resolve_dict(obj))
        else {
            return;
        };

        for (name, obj) in xobjects.iter() {
            let Ok(id) = obj.as_reference() else {
                debug!("Inline XObject {} skipped", String::from_utf8_lossy(name));
                continue;
            };
            let Some((subtype, stream)) = self.xobject(id) else {
                continue;
            };
            match subtype {
                b"Image" => {
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
                b"Form" if depth >= MAX_TREE_DEPTH => {
                    debug!("Form {} nested too deep, skipped", id.0);
                }
                b"Form" if forms.insert(id) => {
                    if let Some(inner) = stream
                        .dict
                        .get(b"Resources")
                        .ok()
                        .and_then(|obj| self.resolve_dict(obj))
                    {
                        self.collect_images(inner, depth + 1, forms, ids);
                    }
                }
                _ => {}
            }
        }
    }

    /// Reads an image stream into an [`EmbeddedImage`].
    pub fn extract(&self, page_index: usize, id: ObjectId) -> Result<EmbeddedImage> {
        let stream = self.image_stream(id).ok_or_else(|| {
            Error::UnsupportedImage(format!("object {} {} is not an image stream", id.0, id.1))
        })?;
        let dict = &stream.dict;

        let width = positive_int(dict, b"Width")
            .ok_or_else(|| Error::UnsupportedImage(format!("object {} has no valid /Width", id.0)))?;
        let height = positive_int(dict, b"Height").ok_or_else(|| {
            Error::UnsupportedImage(format!("object {} has no valid /Height", id.0))
        })?;
        let bits_per_component = match dict.get(b"BitsPerComponent").and_then(|o| o.as_i64()) {
            Ok(bpc) => u8::try_from(bpc).map_err(|_| {
                Error::UnsupportedImage(format!("object {} has {} bits per component", id.0, bpc))
            })?,
            Err(_) => 8,
        };

        let filters = filter_names(dict);
        let encoding = match filters.last() {
            None => EmbeddedEncoding::Raw,
            Some(name) => EmbeddedEncoding::from_filter(name).ok_or_else(|| {
                Error::UnsupportedImage(format!("object {} uses filter {}", id.0, name))
            })?,
        };

        let data = match encoding {
            EmbeddedEncoding::Raw if filters.is_empty() => stream.content.clone(),
            EmbeddedEncoding::Raw => stream.decompressed_content().map_err(|e| {
                Error::UnsupportedImage(format!("object {} could not be decoded: {}", id.0, e))
            })?,
            _ if filters.len() == 1 => stream.content.clone(),
            _ => {
                return Err(Error::UnsupportedImage(format!(
                    "object {} uses a filter chain {:?}",
                    id.0, filters
                )));
            }
        };

        let color_space = match encoding {
            EmbeddedEncoding::Raw => dict
                .get(b"ColorSpace")
                .ok()
                .and_then(|obj| self.color_space(obj)),
            _ => None,
        };

        Ok(EmbeddedImage {
            page_index,
            object_id: id,
            width,
            height,
            encoding,
            color_space,
            bits_per_component,
            data,
        })
    }

    fn image_stream(&self, id: ObjectId) -> Option<&Stream> {
        self.xobject(id)
            .and_then(|(subtype, stream)| (subtype == b"Image").then_some(stream))
    }

    /// The stream behind an XObject reference, with its `/Subtype`.
    fn xobject(&self, id: ObjectId) -> Option<(&[u8], &Stream)> {
        match self.doc.get_object(id).ok()? {
            Object::Stream(stream) => {
                let subtype = stream.dict.get(b"Subtype").and_then(|o| o.as_name()).ok()?;
                Some((subtype, stream))
            }
            _ => None,
        }
    }

    fn page_resources(&self, page_id: ObjectId) -> Option<&Dictionary> {
        let mut node = self.doc.get_dictionary(page_id).ok()?;
        for _ in 0..MAX_TREE_DEPTH {
            if let Ok(res) = node.get(b"Resources") {
                return self.resolve_dict(res);
            }
            let parent = node.get(b"Parent").and_then(|o| o.as_reference()).ok()?;
            node = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).ok(),
            other => Some(other),
        }
    }

    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match self.resolve(obj)? {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Resolves `/ColorSpace`, including `[/Indexed base hival lookup]`.
    fn color_space(&self, obj: &Object) -> Option<ColorSpace> {
        if let Object::Array(items) = self.resolve(obj)? {
            let family = items.first()?.as_name().ok()?;
            if family == b"Indexed" || family == b"I" {
                let base = self.device_layout(items.get(1)?)?;
                let hival = self.resolve(items.get(2)?)?.as_i64().ok()?;
                let mut lookup = self.lookup_table(items.get(3)?)?;
                // hival + 1 entries, at most 256
                let entries = usize::try_from(hival).ok()?.min(255) + 1;
                lookup.truncate(entries * base.channels());
                if lookup.len() < base.channels() {
                    return None;
                }
                return Some(ColorSpace::Indexed { base, lookup });
            }
        }
        self.device_layout(obj).map(ColorSpace::Device)
    }

    fn device_layout(&self, obj: &Object) -> Option<SampleLayout> {
        match self.resolve(obj)? {
            Object::Name(name) => {
                SampleLayout::from_color_space(&String::from_utf8_lossy(name), None)
            }
            Object::Array(items) => {
                let family = items.first()?.as_name().ok()?;
                let components = items.get(1).and_then(|o| match self.resolve(o)? {
                    Object::Stream(icc) => icc.dict.get(b"N").and_then(|n| n.as_i64()).ok(),
                    _ => None,
                });
                SampleLayout::from_color_space(&String::from_utf8_lossy(family), components)
            }
            _ => None,
        }
    }

    /// Palette bytes of an indexed space, given inline as a string or as a stream.
    fn lookup_table(&self, obj: &Object) -> Option<Vec<u8>> {
        match self.resolve(obj)? {
            Object::String(bytes, _) => Some(bytes.clone()),
            Object::Stream(stream) if stream.dict.has(b"Filter") => {
                stream.decompressed_content().ok()
            }
            Object::Stream(stream) => Some(stream.content.clone()),
            _ => None,
        }
    }
}

fn positive_int(dict: &Dictionary, key: &[u8]) -> Option<u32> {
    let value = dict.get(key).and_then(|o| o.as_i64()).ok()?;
    u32::try_from(value).ok().filter(|v| *v > 0)
}

fn filter_names(dict: &Dictionary) -> Vec<String> {
    match dict.get(b"Filter") {
        Ok(Object::Name(name)) => vec![String::from_utf8_lossy(name).into_owned()],
        Ok(Object::Array(items)) => items
            .iter()
            .filter_map(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).into_owned())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{StringFormat, dictionary};

    fn source(doc: Document) -> PdfSource {
        PdfSource {
            doc,
            path: PathBuf::from("memory.pdf"),
        }
    }

    fn image(doc: &mut Document, width: i64, bpc: i64) -> ObjectId {
        doc.add_object(Stream::new(
            dictionary! {
                "Subtype" => "Image",
                "Width" => width,
                "Height" => 4_i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => bpc,
            },
            vec![0; 16],
        ))
    }

    fn page(doc: &mut Document, xobjects: Dictionary) -> ObjectId {
        doc.add_object(dictionary! {
            "Type" => "Page",
            "Resources" => dictionary! { "XObject" => xobjects },
        })
    }

    #[test]
    fn images_drawn_by_forms_are_listed_in_place() {
        let mut doc = Document::with_version("1.5");
        let nested = image(&mut doc, 4, 8);
        let direct = image(&mut doc, 4, 8);
        let form = doc.new_object_id();
        doc.objects.insert(
            form,
            Object::Stream(Stream::new(
                dictionary! {
                    "Subtype" => "Form",
                    "Resources" => dictionary! {
                        "XObject" => dictionary! {
                            "Im0" => nested,
                            // Self reference must not loop
                            "Fm0" => form,
                            "Im1" => direct,
                        },
                    },
                },
                Vec::new(),
            )),
        );
        let page_id = page(
            &mut doc,
            dictionary! {
                "Fm0" => form,
                "Im1" => direct,
                "Fm1" => form,
            },
        );

        let ids = source(doc).page_image_ids(page_id);
        assert_eq!(ids, vec![nested, direct]);
    }

    #[test]
    fn form_nesting_is_bounded() {
        let mut doc = Document::with_version("1.5");
        let deepest = image(&mut doc, 4, 8);
        let mut inner = deepest;
        for _ in 0..MAX_TREE_DEPTH + 4 {
            inner = doc.add_object(Stream::new(
                dictionary! {
                    "Subtype" => "Form",
                    "Resources" => dictionary! { "XObject" => dictionary! { "X" => inner } },
                },
                Vec::new(),
            ));
        }
        let page_id = page(&mut doc, dictionary! { "Fm" => inner });

        assert!(source(doc).page_image_ids(page_id).is_empty());
    }

    #[test]
    fn out_of_range_dictionary_values_are_rejected() {
        let mut doc = Document::with_version("1.5");
        // 2^32 + 300 would wrap to 300 with a plain cast
        let wide = image(&mut doc, 4_294_967_596, 8);
        let deep = image(&mut doc, 4, 264);
        let source = source(doc);

        assert!(matches!(source.extract(0, wide), Err(Error::UnsupportedImage(_))));
        assert!(matches!(source.extract(0, deep), Err(Error::UnsupportedImage(_))));
    }

    #[test]
    fn indexed_color_space_carries_its_palette() {
        let mut doc = Document::with_version("1.5");
        let palette = doc.add_object(Stream::new(dictionary! {}, vec![0, 0, 0, 0, 0, 255, 255, 0]));
        let id = doc.add_object(Stream::new(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 2_i64,
                "Height" => 1_i64,
                "BitsPerComponent" => 8_i64,
                "ColorSpace" => vec![
                    Object::Name(b"Indexed".to_vec()),
                    Object::Name(b"DeviceCMYK".to_vec()),
                    1_i64.into(),
                    palette.into(),
                ],
            },
            vec![0, 1],
        ));
        let inline = doc.add_object(Stream::new(
            dictionary! {
                "Subtype" => "Image",
                "Width" => 2_i64,
                "Height" => 1_i64,
                "BitsPerComponent" => 8_i64,
                "ColorSpace" => vec![
                    Object::Name(b"Indexed".to_vec()),
                    Object::Name(b"DeviceRGB".to_vec()),
                    0_i64.into(),
                    // One entry more than hival allows
                    Object::String(vec![10, 20, 30, 40, 50, 60], StringFormat::Hexadecimal),
                ],
            },
            vec![0, 0],
        ));
        let source = source(doc);

        let image = source.extract(0, id).unwrap();
        assert_eq!(
            image.color_space,
            Some(ColorSpace::Indexed {
                base: SampleLayout::Cmyk,
                lookup: vec![0, 0, 0, 0, 0, 255, 255, 0],
            })
        );
        let image = source.extract(0, inline).unwrap();
        assert_eq!(
            image.color_space,
            Some(ColorSpace::Indexed {
                base: SampleLayout::Rgb,
                lookup: vec![10, 20, 30],
            })
        );
    }
}
