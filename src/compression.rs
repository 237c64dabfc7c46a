//! Compression codecs (spec.md §4.5): a uniform `compress`/`decompress` façade over
//! six codecs, selected at column-chunk open time from the column's `Compression`.

pub use crate::parquet_bridge::Compression;
use crate::error::{Error, Result};

/// A compression codec. Implementors own no buffers across calls other than what the
/// underlying library requires; callers supply both input and output buffers.
pub trait Codec: std::fmt::Debug {
    /// Compresses `input_buf`, appending the compressed bytes to `output_buf`.
    fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()>;

    /// Decompresses `input_buf` into `output_buf`, which is exactly the uncompressed
    /// size (known ahead of time from the page header).
    fn decompress(&mut self, input_buf: &[u8], output_buf: &mut [u8]) -> Result<()>;
}

/// Returns a codec for `codec`, or `None` for [`Compression::Uncompressed`].
pub fn create_codec(codec: &Compression) -> Result<Option<Box<dyn Codec>>> {
    match *codec {
        #[cfg(feature = "brotli")]
        Compression::Brotli => Ok(Some(Box::new(BrotliCodec::new()))),
        #[cfg(feature = "gzip")]
        Compression::Gzip => Ok(Some(Box::new(GzipCodec::new()))),
        #[cfg(feature = "snappy")]
        Compression::Snappy => Ok(Some(Box::new(SnappyCodec::new()))),
        #[cfg(feature = "lz4")]
        Compression::Lz4Raw => Ok(Some(Box::new(Lz4RawCodec::new()))),
        #[cfg(feature = "zstd")]
        Compression::Zstd => Ok(Some(Box::new(ZstdCodec::new()))),
        Compression::Uncompressed => Ok(None),
        other => Err(Error::FeatureNotSupported(format!(
            "compression codec {:?} is not enabled",
            other
        ))),
    }
}

#[cfg(feature = "snappy")]
mod snappy_codec {
    use snap::raw::{decompress_len, max_compress_len, Decoder, Encoder};

    use super::Codec;
    use crate::error::Result;

    #[derive(Debug)]
    pub struct SnappyCodec {
        decoder: Decoder,
        encoder: Encoder,
    }

    impl SnappyCodec {
        pub(crate) fn new() -> Self {
            Self {
                decoder: Decoder::new(),
                encoder: Encoder::new(),
            }
        }
    }

    impl Codec for SnappyCodec {
        fn decompress(&mut self, input_buf: &[u8], output_buf: &mut [u8]) -> Result<()> {
            let len = decompress_len(input_buf)?;
            if len != output_buf.len() {
                return Err(crate::error::Error::oos(
                    "snappy-decompressed length does not match the page's declared size",
                ));
            }
            self.decoder
                .decompress(input_buf, output_buf)
                .map_err(Into::into)
                .map(|_| ())
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let output_buf_len = output_buf.len();
            let required_len = max_compress_len(input_buf.len());
            output_buf.resize(output_buf_len + required_len, 0);
            let n = self
                .encoder
                .compress(input_buf, &mut output_buf[output_buf_len..])?;
            output_buf.truncate(output_buf_len + n);
            Ok(())
        }
    }
}
#[cfg(feature = "snappy")]
pub use snappy_codec::SnappyCodec;

#[cfg(feature = "gzip")]
mod gzip_codec {
    use std::io::{Read, Write};

    use flate2::{read, write, Compression as Level};

    use super::Codec;
    use crate::error::Result;

    #[derive(Debug)]
    pub struct GzipCodec {}

    impl GzipCodec {
        pub(crate) fn new() -> Self {
            Self {}
        }
    }

    impl Codec for GzipCodec {
        fn decompress(&mut self, input_buf: &[u8], output_buf: &mut [u8]) -> Result<()> {
            let mut decoder = read::GzDecoder::new(input_buf);
            decoder.read_exact(output_buf).map_err(Into::into)
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let mut encoder = write::GzEncoder::new(output_buf, Level::default());
            encoder.write_all(input_buf)?;
            encoder.try_finish().map_err(Into::into)
        }
    }
}
#[cfg(feature = "gzip")]
pub use gzip_codec::GzipCodec;

#[cfg(feature = "brotli")]
mod brotli_codec {
    use std::io::{Read, Write};

    use super::Codec;
    use crate::error::Result;

    const BROTLI_BUFFER_SIZE: usize = 4096;
    const BROTLI_COMPRESSION_QUALITY: u32 = 1;
    const BROTLI_LG_WINDOW_SIZE: u32 = 22;

    #[derive(Debug)]
    pub struct BrotliCodec {}

    impl BrotliCodec {
        pub(crate) fn new() -> Self {
            Self {}
        }
    }

    impl Codec for BrotliCodec {
        fn decompress(&mut self, input_buf: &[u8], output_buf: &mut [u8]) -> Result<()> {
            brotli::Decompressor::new(input_buf, BROTLI_BUFFER_SIZE)
                .read_exact(output_buf)
                .map_err(Into::into)
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let mut encoder = brotli::CompressorWriter::new(
                output_buf,
                BROTLI_BUFFER_SIZE,
                BROTLI_COMPRESSION_QUALITY,
                BROTLI_LG_WINDOW_SIZE,
            );
            encoder.write_all(input_buf)?;
            encoder.flush().map_err(Into::into)
        }
    }
}
#[cfg(feature = "brotli")]
pub use brotli_codec::BrotliCodec;

#[cfg(feature = "lz4")]
mod lz4_codec {
    use super::Codec;
    use crate::error::{Error, Result};

    /// `LZ4_RAW`: the unframed LZ4 block format (spec.md §4.5). Unlike the deprecated
    /// `LZ4` codec (a non-standard Hadoop framing no reader agrees on), this needs no
    /// external framing — only the page header's declared uncompressed size.
    #[derive(Debug)]
    pub struct Lz4RawCodec {}

    impl Lz4RawCodec {
        pub(crate) fn new() -> Self {
            Self {}
        }
    }

    impl Codec for Lz4RawCodec {
        fn decompress(&mut self, input_buf: &[u8], output_buf: &mut [u8]) -> Result<()> {
            let n = lz4_flex::block::decompress_into(input_buf, output_buf)
                .map_err(|e| Error::oos(format!("lz4: {}", e)))?;
            if n != output_buf.len() {
                return Err(Error::oos(
                    "lz4-decompressed length does not match the page's declared size",
                ));
            }
            Ok(())
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let output_buf_len = output_buf.len();
            let bound = lz4_flex::block::get_maximum_output_size(input_buf.len());
            output_buf.resize(output_buf_len + bound, 0);
            let n = lz4_flex::block::compress_into(input_buf, &mut output_buf[output_buf_len..])
                .map_err(|e| Error::oos(format!("lz4: {}", e)))?;
            output_buf.truncate(output_buf_len + n);
            Ok(())
        }
    }
}
#[cfg(feature = "lz4")]
pub use lz4_codec::Lz4RawCodec;

#[cfg(feature = "zstd")]
mod zstd_codec {
    use std::io::{Read, Write};

    use super::Codec;
    use crate::error::Result;

    const ZSTD_COMPRESSION_LEVEL: i32 = 1;

    #[derive(Debug)]
    pub struct ZstdCodec {}

    impl ZstdCodec {
        pub(crate) fn new() -> Self {
            Self {}
        }
    }

    impl Codec for ZstdCodec {
        fn decompress(&mut self, input_buf: &[u8], output_buf: &mut [u8]) -> Result<()> {
            let mut decoder = zstd::Decoder::new(input_buf)?;
            decoder.read_exact(output_buf).map_err(Into::into)
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let mut encoder = zstd::Encoder::new(output_buf, ZSTD_COMPRESSION_LEVEL)?;
            encoder.write_all(input_buf)?;
            encoder.finish().map(|_| ()).map_err(Into::into)
        }
    }
}
#[cfg(feature = "zstd")]
pub use zstd_codec::ZstdCodec;

#[cfg(test)]
mod tests {
    use super::*;

    fn test_roundtrip(c: Compression, data: &[u8]) {
        let mut c1 = create_codec(&c).unwrap().unwrap();
        let mut c2 = create_codec(&c).unwrap().unwrap();

        let mut compressed = Vec::new();
        c1.compress(data, &mut compressed).unwrap();

        let mut decompressed = vec![0; data.len()];
        c2.decompress(compressed.as_slice(), &mut decompressed)
            .unwrap();
        assert_eq!(data, decompressed.as_slice());

        compressed.clear();
        c2.compress(data, &mut compressed).unwrap();
        c1.decompress(compressed.as_slice(), &mut decompressed)
            .unwrap();
        assert_eq!(data, decompressed.as_slice());
    }

    fn test_codec(c: Compression) {
        for size in [100, 10_000, 100_000] {
            let data = (0..size).map(|x| (x % 255) as u8).collect::<Vec<_>>();
            test_roundtrip(c, &data);
        }
    }

    #[test]
    #[cfg(feature = "snappy")]
    fn test_codec_snappy() {
        test_codec(Compression::Snappy);
    }

    #[test]
    #[cfg(feature = "gzip")]
    fn test_codec_gzip() {
        test_codec(Compression::Gzip);
    }

    #[test]
    #[cfg(feature = "brotli")]
    fn test_codec_brotli() {
        test_codec(Compression::Brotli);
    }

    #[test]
    #[cfg(feature = "lz4")]
    fn test_codec_lz4_raw() {
        test_codec(Compression::Lz4Raw);
    }

    #[test]
    #[cfg(feature = "zstd")]
    fn test_codec_zstd() {
        test_codec(Compression::Zstd);
    }

    #[test]
    fn uncompressed_has_no_codec() {
        assert!(create_codec(&Compression::Uncompressed).unwrap().is_none());
    }
}
