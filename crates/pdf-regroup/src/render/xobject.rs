//! Image XObject creation
//!
//! Page rasters are embedded as Flate-compressed DeviceRGB images which are
//! then placed on output pages with a transformation matrix.

use crate::types::Result;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::RgbImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;

/// Add an image XObject holding `image` to `output`.
pub fn create_image_xobject(output: &mut Document, image: &RgbImage) -> Result<ObjectId> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(image.as_raw())?;
    let data = encoder.finish()?;

    let dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Image".to_vec())),
        ("Width", Object::Integer(image.width() as i64)),
        ("Height", Object::Integer(image.height() as i64)),
        ("ColorSpace", Object::Name(b"DeviceRGB".to_vec())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", Object::Name(b"FlateDecode".to_vec())),
    ]);

    let mut stream = Stream::new(dict, data);
    // Already compressed
    stream.allows_compression = false;

    Ok(output.add_object(stream))
}

/// Content stream command placing an image XObject in `(x, y, width, height)`
pub fn image_placement_command(name: &str, x: f32, y: f32, width: f32, height: f32) -> String {
    format!("q {} 0 0 {} {} {} cm /{} Do Q\n", width, height, x, y, name)
}
