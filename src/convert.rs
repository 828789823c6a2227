//! File-level conversion: decode an image, pack it, write the framebuffer.
//!
//! Decoding goes through the [`Decode`] trait so callers can plug in any
//! source; [`ImageFileDecoder`] reads every format the `image` crate was
//! built with.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use fbpack::convert::{ConvertOptions, Conversion, ImageFileDecoder};
//!
//! let options = ConvertOptions::new(Some(800), Some(480), "bgra")?;
//! let job = Conversion::prepare(&ImageFileDecoder, Path::new("splash.png"), &options)?;
//! job.write_to(Path::new("splash.fb"))?;
//! # Ok::<(), fbpack::convert::ConvertError>(())
//! ```

use std::boxed::Box;
use std::format;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::string::String;
use std::vec::Vec;

use imgref::ImgVec;
use rgb::Rgba;
use thiserror::Error;

use crate::{BufferGeometry, ChannelSpec, PackError, PackPlan, SourceImage};

/// Errors from a file-to-framebuffer conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input is missing or not a decodable image.
    #[error("cannot decode image {}", .path.display())]
    SourceDecode {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Bad channel spec or geometry, or an impossible output size.
    #[error(transparent)]
    Pack(#[from] PackError),

    /// The framebuffer file could not be written.
    #[error("cannot write framebuffer {}", .path.display())]
    IoWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A decoded image plus a short description of its original pixel format.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub image: SourceImage,
    /// Source pixel format before conversion to RGBA, e.g. `Rgb8`.
    pub mode: String,
}

/// Turns a path into RGBA pixels.
pub trait Decode {
    fn decode(&self, path: &Path) -> Result<Decoded, ConvertError>;
}

/// Decoder backed by the `image` crate. The format is sniffed from content.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFileDecoder;

impl Decode for ImageFileDecoder {
    fn decode(&self, path: &Path) -> Result<Decoded, ConvertError> {
        let fail = |source: image::ImageError| ConvertError::SourceDecode {
            path: path.to_path_buf(),
            source: Box::new(source),
        };
        let decoded = image::ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| fail(image::ImageError::IoError(e)))?
            .decode()
            .map_err(fail)?;

        into_decoded(path, decoded)
    }
}

/// Convert to RGBA, rejecting images with no pixels as undecodable.
fn into_decoded(path: &Path, decoded: image::DynamicImage) -> Result<Decoded, ConvertError> {
    let (w, h) = (decoded.width() as usize, decoded.height() as usize);
    if w == 0 || h == 0 {
        return Err(ConvertError::SourceDecode {
            path: path.to_path_buf(),
            source: Box::new(PackError::EmptySource {
                width: w,
                height: h,
            }),
        });
    }
    let mode = format!("{:?}", decoded.color());
    let raw = decoded.into_rgba8().into_raw();
    let pixels: Vec<Rgba<u8>> = match bytemuck::allocation::try_cast_vec(raw) {
        Ok(pixels) => pixels,
        Err((_, raw)) => bytemuck::cast_slice(&raw).to_vec(),
    };
    Ok(Decoded {
        image: ImgVec::new(pixels, w, h),
        mode,
    })
}

/// User-facing conversion settings, validated before any decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Buffer width; the source width when `None`.
    pub width: Option<i64>,
    /// Buffer height; the source height when `None`.
    pub height: Option<i64>,
    pub spec: ChannelSpec,
}

impl ConvertOptions {
    pub fn new(
        width: Option<i64>,
        height: Option<i64>,
        format: &str,
    ) -> Result<ConvertOptions, PackError> {
        let spec = ChannelSpec::parse(format)?;
        BufferGeometry::validate_requested(width, height)?;
        Ok(ConvertOptions {
            width,
            height,
            spec,
        })
    }
}

/// A decoded source with its resolved target geometry, ready to pack.
#[derive(Debug, Clone)]
pub struct Conversion {
    source: Decoded,
    spec: ChannelSpec,
    plan: PackPlan,
}

impl Conversion {
    pub fn prepare<D: Decode + ?Sized>(
        decoder: &D,
        input: &Path,
        options: &ConvertOptions,
    ) -> Result<Conversion, ConvertError> {
        let source = decoder.decode(input)?;
        let (w, h) = (source.image.width(), source.image.height());
        let geometry = BufferGeometry::resolve(options.width, options.height, w, h)?;
        Ok(Conversion {
            plan: PackPlan::new(w, h, geometry),
            source,
            spec: options.spec,
        })
    }

    pub fn source(&self) -> &Decoded {
        &self.source
    }

    pub fn geometry(&self) -> BufferGeometry {
        self.plan.geometry()
    }

    pub fn spec(&self) -> ChannelSpec {
        self.spec
    }

    pub fn plan(&self) -> &PackPlan {
        &self.plan
    }

    /// Pack the whole framebuffer in memory.
    pub fn pack(&self) -> Result<Vec<u8>, PackError> {
        crate::pack(self.source.image.as_ref(), self.geometry(), &self.spec)
    }

    /// Pack and write to `output`. Returns the number of bytes written.
    ///
    /// Either the complete framebuffer lands at `output` or nothing does.
    pub fn write_to(&self, output: &Path) -> Result<usize, ConvertError> {
        let bytes = self.pack()?;
        write_atomic(output, &bytes).map_err(|source| ConvertError::IoWrite {
            path: output.to_path_buf(),
            source,
        })?;
        Ok(bytes.len())
    }
}

/// Write `bytes` to a temp file next to `path`, sync it, then rename it over
/// `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;
    use std::vec;

    struct Fixture(SourceImage);

    impl Decode for Fixture {
        fn decode(&self, _path: &Path) -> Result<Decoded, ConvertError> {
            Ok(Decoded {
                image: self.0.clone(),
                mode: "fixture".into(),
            })
        }
    }

    fn fixture(w: usize, h: usize, px: Rgba<u8>) -> Fixture {
        Fixture(ImgVec::new(vec![px; w * h], w, h))
    }

    #[test]
    fn options_validate_format_and_explicit_dimensions() {
        let opts = ConvertOptions::new(None, None, "bgr").unwrap();
        assert_eq!(opts.spec, ChannelSpec::BGR);

        assert!(matches!(
            ConvertOptions::new(None, None, "XYZ"),
            Err(PackError::InvalidChannel { symbol: 'X', .. })
        ));
        assert!(matches!(
            ConvertOptions::new(Some(0), None, "RGB"),
            Err(PackError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn prepare_defaults_geometry_to_source() {
        let decoder = fixture(5, 3, Rgba::new(1, 2, 3, 4));
        let opts = ConvertOptions::new(None, None, "RGB").unwrap();
        let job = Conversion::prepare(&decoder, Path::new("unused"), &opts).unwrap();
        assert_eq!(job.geometry(), BufferGeometry::new(5, 3).unwrap());
        assert!(!job.plan().crops_width() && !job.plan().crops_height());
        assert!(!job.plan().pads_width() && !job.plan().pads_height());
        assert_eq!(job.source().mode, "fixture");
    }

    #[test]
    fn write_to_produces_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.fb");
        let decoder = fixture(1, 1, Rgba::new(1, 2, 3, 4));
        let opts = ConvertOptions::new(Some(2), Some(1), "RGB").unwrap();
        let job = Conversion::prepare(&decoder, Path::new("unused"), &opts).unwrap();
        assert_eq!(job.write_to(&out).unwrap(), 6);
        assert_eq!(std::fs::read(&out).unwrap(), [1, 2, 3, 0, 0, 0]);
    }

    #[test]
    fn write_to_missing_directory_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("out.fb");
        let decoder = fixture(2, 2, Rgba::new(9, 9, 9, 9));
        let opts = ConvertOptions::new(None, None, "RGB").unwrap();
        let job = Conversion::prepare(&decoder, Path::new("unused"), &opts).unwrap();
        let err = job.write_to(&out).unwrap_err();
        assert!(matches!(err, ConvertError::IoWrite { .. }));
        assert!(!out.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("fb0");
        std::fs::write(&out, b"old contents that are longer").unwrap();
        write_atomic(&out, &[7, 7, 7]).unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), [7, 7, 7]);
    }

    #[test]
    fn image_decoder_reads_png_as_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two.png");
        let img = image::RgbaImage::from_raw(2, 1, vec![10, 20, 30, 40, 50, 60, 70, 80]).unwrap();
        img.save(&path).unwrap();

        let decoded = ImageFileDecoder.decode(&path).unwrap();
        assert_eq!(decoded.image.width(), 2);
        assert_eq!(decoded.image.height(), 1);
        assert_eq!(decoded.mode, "Rgba8");
        assert_eq!(
            decoded.image.buf().as_slice(),
            &[Rgba::new(10, 20, 30, 40), Rgba::new(50, 60, 70, 80)]
        );
    }

    #[test]
    fn image_decoder_reports_missing_and_garbage_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.bmp");
        assert!(matches!(
            ImageFileDecoder.decode(&missing),
            Err(ConvertError::SourceDecode { .. })
        ));

        let garbage = dir.path().join("garbage.bmp");
        std::fs::write(&garbage, b"definitely not an image").unwrap();
        let err = ImageFileDecoder.decode(&garbage).unwrap_err();
        assert!(matches!(err, ConvertError::SourceDecode { ref path, .. } if *path == garbage));
    }

    #[test]
    fn empty_image_is_a_decode_error() {
        let path = Path::new("empty.png");
        let err = into_decoded(path, image::DynamicImage::new_rgba8(0, 3)).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::SourceDecode { ref path, .. } if path == Path::new("empty.png")
        ));
        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert!(cause.contains("source image is empty"), "{cause}");
    }
}
