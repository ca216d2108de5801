use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};

use crate::error::ExportError;
use crate::raster::Raster;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// Encoded raster ready to be handed off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.format.mime(), self.to_base64())
    }
}

/// Deterministic PNG: fixed filter and compression, so equal rasters give
/// equal bytes.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, raster.width(), raster.height());
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        enc.set_filter(FilterType::NoFilter);
        enc.set_compression(Compression::Default);
        let mut writer = enc.write_header()?;
        writer.write_image_data(raster.rgba())?;
    }
    Ok(buf)
}

pub fn encode_jpeg(raster: &Raster, quality: u8) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    let mut enc = JpegEncoder::new_with_quality(&mut buf, quality);
    enc.encode(
        &raster.rgb(),
        raster.width(),
        raster.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

pub fn encode(
    raster: &Raster,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<EncodedImage, ExportError> {
    let bytes = match format {
        ImageFormat::Png => encode_png(raster)?,
        ImageFormat::Jpeg => encode_jpeg(raster, jpeg_quality)?,
    };
    Ok(EncodedImage { format, bytes })
}
