//! Image file boundary: decoding with safety checks, encoding, saving.
//!
//! Only PNG and JPEG are supported. Decoding applies EXIF orientation so
//! camera photos enter the pipeline the way viewers display them, and
//! refuses files whose decoded size would exceed a safe pixel ceiling.

mod decode;
mod encode;

pub use decode::{
    decode_bytes, decode_file, is_supported_path, DecodeError, MAX_DECODE_PIXELS,
    SUPPORTED_EXTENSIONS,
};
pub use encode::{encode_jpeg, encode_png, save_image, EncodeError, DEFAULT_JPEG_QUALITY};
