//! Response payload decoding
//!
//! Reverses payload-level compression and yields text. Transport-level
//! content-encoding is normally stripped by reqwest, but sitemaps are also
//! shipped as `.gz` files (gzip content-type, no content-encoding), and
//! some servers mislabel either layer, so all three codings are handled
//! here as well. Decode failures never abort an otherwise-successful
//! fetch: the bytes are treated as already-decoded text instead.

use flate2::read::{DeflateDecoder, MultiGzDecoder, ZlibDecoder};
use std::io::Read;

/// Decodes a fetched payload into text
///
/// Compression is detected from the content-encoding header, a gzip
/// content-type, or a `.gz` suffix on the source URL (query string
/// tolerated). Anything undetected, or any decompression failure, falls
/// back to lossy UTF-8 of the raw bytes.
pub fn decode_body(bytes: &[u8], content_encoding: &str, content_type: &str, url: &str) -> String {
    let encoding = content_encoding.to_ascii_lowercase();

    if encoding.contains("gzip") || content_type.to_ascii_lowercase().contains("gzip") || has_gz_suffix(url) {
        if let Some(decoded) = gunzip(bytes) {
            return decoded;
        }
    } else if encoding.contains("deflate") {
        if let Some(decoded) = inflate(bytes) {
            return decoded;
        }
    } else if encoding.contains("br") {
        if let Some(decoded) = unbrotli(bytes) {
            return decoded;
        }
    } else if bytes.starts_with(&[0x1F, 0x8B]) {
        // Gzip magic without any header hint; common for mislabeled
        // sitemap.xml.gz uploads.
        if let Some(decoded) = gunzip(bytes) {
            return decoded;
        }
    }

    String::from_utf8_lossy(bytes).into_owned()
}

/// Whether the URL path ends in `.gz`, ignoring any query string
fn has_gz_suffix(url: &str) -> bool {
    let path = url.split('?').next().unwrap_or(url);
    path.to_ascii_lowercase().ends_with(".gz")
}

fn gunzip(bytes: &[u8]) -> Option<String> {
    let mut out = Vec::new();
    let mut decoder = MultiGzDecoder::new(bytes);
    match decoder.read_to_end(&mut out) {
        Ok(_) => Some(String::from_utf8_lossy(&out).into_owned()),
        Err(e) => {
            tracing::debug!("gunzip failed, keeping raw bytes: {}", e);
            None
        }
    }
}

fn inflate(bytes: &[u8]) -> Option<String> {
    // Servers disagree on whether "deflate" means zlib-wrapped or raw.
    let mut out = Vec::new();
    if ZlibDecoder::new(bytes).read_to_end(&mut out).is_ok() {
        return Some(String::from_utf8_lossy(&out).into_owned());
    }

    out.clear();
    match DeflateDecoder::new(bytes).read_to_end(&mut out) {
        Ok(_) => Some(String::from_utf8_lossy(&out).into_owned()),
        Err(e) => {
            tracing::debug!("inflate failed, keeping raw bytes: {}", e);
            None
        }
    }
}

fn unbrotli(bytes: &[u8]) -> Option<String> {
    let mut out = Vec::new();
    let mut decoder = brotli::Decompressor::new(bytes, 4096);
    match decoder.read_to_end(&mut out) {
        Ok(_) => Some(String::from_utf8_lossy(&out).into_owned()),
        Err(e) => {
            tracing::debug!("brotli decode failed, keeping raw bytes: {}", e);
            None
        }
    }
}
