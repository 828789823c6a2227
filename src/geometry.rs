use core::fmt;

use crate::{ChannelSpec, PackError};

/// Target framebuffer size in pixels. Both dimensions are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferGeometry {
    width: usize,
    height: usize,
}

impl BufferGeometry {
    pub fn new(width: usize, height: usize) -> Result<BufferGeometry, PackError> {
        if width == 0 || height == 0 {
            return Err(PackError::InvalidGeometry {
                width: width as i64,
                height: height as i64,
            });
        }
        Ok(BufferGeometry { width, height })
    }

    /// Validate signed dimensions, as typed on a command line.
    pub fn from_signed(width: i64, height: i64) -> Result<BufferGeometry, PackError> {
        let invalid = PackError::InvalidGeometry { width, height };
        let w = usize::try_from(width).map_err(|_| invalid)?;
        let h = usize::try_from(height).map_err(|_| invalid)?;
        if w == 0 || h == 0 {
            return Err(invalid);
        }
        Ok(BufferGeometry {
            width: w,
            height: h,
        })
    }

    /// Fill in missing dimensions from the source image.
    ///
    /// Explicit values are validated even when the other one is missing.
    pub fn resolve(
        width: Option<i64>,
        height: Option<i64>,
        source_width: usize,
        source_height: usize,
    ) -> Result<BufferGeometry, PackError> {
        let width = width.unwrap_or(source_width as i64);
        let height = height.unwrap_or(source_height as i64);
        BufferGeometry::from_signed(width, height)
    }

    /// Check explicitly requested dimensions before a source is available.
    pub fn validate_requested(width: Option<i64>, height: Option<i64>) -> Result<(), PackError> {
        match (width, height) {
            (Some(w), _) if w <= 0 => Err(PackError::InvalidGeometry {
                width: w,
                height: height.unwrap_or(1),
            }),
            (_, Some(h)) if h <= 0 => Err(PackError::InvalidGeometry {
                width: width.unwrap_or(1),
                height: h,
            }),
            _ => Ok(()),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes in one packed row.
    pub fn row_len(&self, spec: &ChannelSpec) -> Result<usize, PackError> {
        self.width
            .checked_mul(spec.len())
            .ok_or_else(|| self.too_large(spec))
    }

    /// Exact length of the packed buffer: `width * height * spec.len()`.
    pub fn output_len(&self, spec: &ChannelSpec) -> Result<usize, PackError> {
        self.row_len(spec)?
            .checked_mul(self.height)
            .ok_or_else(|| self.too_large(spec))
    }

    fn too_large(&self, spec: &ChannelSpec) -> PackError {
        PackError::OutputTooLarge {
            width: self.width,
            height: self.height,
            channels: spec.len(),
        }
    }
}

impl fmt::Display for BufferGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} X {}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_and_negative() {
        assert!(BufferGeometry::new(0, 4).is_err());
        assert!(BufferGeometry::new(4, 0).is_err());
        assert_eq!(
            BufferGeometry::from_signed(-1, 10),
            Err(PackError::InvalidGeometry {
                width: -1,
                height: 10
            })
        );
        assert_eq!(
            BufferGeometry::from_signed(10, 0),
            Err(PackError::InvalidGeometry {
                width: 10,
                height: 0
            })
        );
    }

    #[test]
    fn resolve_defaults_to_source() {
        let g = BufferGeometry::resolve(None, None, 640, 480).unwrap();
        assert_eq!((g.width(), g.height()), (640, 480));

        let g = BufferGeometry::resolve(Some(800), None, 640, 480).unwrap();
        assert_eq!((g.width(), g.height()), (800, 480));

        let g = BufferGeometry::resolve(None, Some(2), 640, 480).unwrap();
        assert_eq!((g.width(), g.height()), (640, 2));
    }

    #[test]
    fn validate_requested_checks_only_given_values() {
        assert!(BufferGeometry::validate_requested(None, None).is_ok());
        assert!(BufferGeometry::validate_requested(Some(1), None).is_ok());
        assert_eq!(
            BufferGeometry::validate_requested(None, Some(-3)),
            Err(PackError::InvalidGeometry {
                width: 1,
                height: -3
            })
        );
        assert_eq!(
            BufferGeometry::validate_requested(Some(0), Some(5)),
            Err(PackError::InvalidGeometry {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn output_len_counts_every_slot() {
        let g = BufferGeometry::new(800, 600).unwrap();
        assert_eq!(g.output_len(&ChannelSpec::RGB), Ok(800 * 600 * 3));
        assert_eq!(g.output_len(&ChannelSpec::ARGB), Ok(800 * 600 * 4));
        assert_eq!(g.row_len(&ChannelSpec::BGR), Ok(2400));
    }

    #[test]
    fn output_len_overflow_is_an_error() {
        let g = BufferGeometry::new(usize::MAX / 2, 3).unwrap();
        assert!(matches!(
            g.output_len(&ChannelSpec::RGBA),
            Err(PackError::OutputTooLarge { .. })
        ));
    }
}
