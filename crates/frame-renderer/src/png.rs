//! PNG encoding for composed frame canvases.
//!
//! Frames built from fixed color scales usually stay under 256 unique
//! colors, so the encoder first tries indexed output (color type 3, with a
//! tRNS chunk when the palette carries transparency) and falls back to
//! RGBA (color type 6) when the palette overflows.

use std::collections::HashMap;
use std::io::Write;

use frames_common::{FrameError, FrameResult};

use crate::canvas::Canvas;

const MAX_PALETTE_SIZE: usize = 256;

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Encode a canvas, choosing indexed or RGBA output automatically.
pub fn encode_canvas(canvas: &Canvas) -> FrameResult<Vec<u8>> {
    match extract_palette(&canvas.pixels) {
        Some((palette, indices)) => {
            encode_indexed(canvas.width, canvas.height, &palette, &indices)
        }
        None => encode_rgba(&canvas.pixels, canvas.width, canvas.height),
    }
}

#[inline]
fn pack_color(px: &[u8]) -> u32 {
    (px[0] as u32) | ((px[1] as u32) << 8) | ((px[2] as u32) << 16) | ((px[3] as u32) << 24)
}

/// Build a palette and per-pixel index buffer, or `None` when the image
/// has more than 256 unique colors.
fn extract_palette(pixels: &[u8]) -> Option<(Vec<[u8; 4]>, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<[u8; 4]> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for px in pixels.chunks_exact(4) {
        let packed = pack_color(px);
        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push([px[0], px[1], px[2], px[3]]);
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }
    Some((palette, indices))
}

fn encode_indexed(
    width: usize,
    height: usize,
    palette: &[[u8; 4]],
    indices: &[u8],
) -> FrameResult<Vec<u8>> {
    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let mut plte = Vec::with_capacity(palette.len() * 3);
    for &[r, g, b, _] in palette {
        plte.extend_from_slice(&[r, g, b]);
    }
    write_chunk(&mut png, b"PLTE", &plte);

    if palette.iter().any(|&[_, _, _, a]| a < 255) {
        let trns: Vec<u8> = palette.iter().map(|&[_, _, _, a]| a).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width, height, 1)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> FrameResult<Vec<u8>> {
    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);

    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));
    let idat = deflate_scanlines(pixels, width, height, 4)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn ihdr(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&(width as u32).to_be_bytes());
    data.extend_from_slice(&(height as u32).to_be_bytes());
    data.push(8); // bit depth
    data.push(color_type);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

/// Prefix every scanline with a filter byte (0 = none) and zlib-compress.
fn deflate_scanlines(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> FrameResult<Vec<u8>> {
    let stride = width * bytes_per_pixel;
    let mut raw = Vec::with_capacity(height * (1 + stride));
    for y in 0..height {
        raw.push(0);
        raw.extend_from_slice(&data[y * stride..(y + 1) * stride]);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&raw)
        .map_err(|e| FrameError::encode(format!("IDAT compression failed: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| FrameError::encode(format!("IDAT compression failed: {}", e)))
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Color;

    #[test]
    fn test_signature_and_ihdr() {
        let canvas = Canvas::new(4, 2, Color::rgb(0, 0, 0));
        let png = encode_canvas(&canvas).unwrap();
        assert_eq!(&png[0..8], &SIGNATURE);
        // IHDR length 13 and type tag follow the signature.
        assert_eq!(&png[8..12], &13u32.to_be_bytes());
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(&png[16..20], &4u32.to_be_bytes());
        assert_eq!(&png[20..24], &2u32.to_be_bytes());
    }

    #[test]
    fn test_few_colors_encodes_indexed() {
        let mut canvas = Canvas::new(8, 8, Color::rgb(10, 10, 10));
        canvas.fill_rect(0, 0, 4, 4, Color::rgb(200, 0, 0));
        let png = encode_canvas(&canvas).unwrap();
        // color type byte lives at offset 25 in the IHDR chunk
        assert_eq!(png[25], 3);
        assert!(find_chunk(&png, b"PLTE"));
    }

    #[test]
    fn test_transparent_palette_gets_trns() {
        let mut canvas = Canvas::new(4, 4, Color::rgb(0, 0, 0));
        canvas.pixels[3] = 0;
        let png = encode_canvas(&canvas).unwrap();
        assert!(find_chunk(&png, b"tRNS"));
    }

    #[test]
    fn test_many_colors_falls_back_to_rgba() {
        let mut canvas = Canvas::new(32, 32, Color::rgb(0, 0, 0));
        for (i, px) in canvas.pixels.chunks_exact_mut(4).enumerate() {
            px[0] = (i % 256) as u8;
            px[1] = (i / 256) as u8;
            px[2] = (i % 251) as u8;
        }
        let png = encode_canvas(&canvas).unwrap();
        assert_eq!(png[25], 6);
        assert!(!find_chunk(&png, b"PLTE"));
    }

    /// Walk the chunk structure instead of scanning raw bytes, so
    /// compressed IDAT content cannot produce false matches.
    fn find_chunk(png: &[u8], tag: &[u8; 4]) -> bool {
        let mut pos = 8;
        while pos + 8 <= png.len() {
            let len = u32::from_be_bytes([png[pos], png[pos + 1], png[pos + 2], png[pos + 3]])
                as usize;
            if &png[pos + 4..pos + 8] == tag {
                return true;
            }
            pos += 12 + len;
        }
        false
    }
}
