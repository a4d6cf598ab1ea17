use crate::constants::{DEFAULT_CONCURRENCY, DEFAULT_RATIO};
use crate::error::{Result, ZipperError};

/// Settings shared by every pipeline run of a batch.
///
/// Built once from the command line and passed by reference; nothing mutates
/// it afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZipperOptions {
    pub ratio: f64,
    pub concurrency: usize,
    pub fail_fast: bool,
}

impl ZipperOptions {
    pub fn new(ratio: Option<f64>, concurrency: Option<usize>, fail_fast: bool) -> Result<Self> {
        let ratio = ratio.unwrap_or(DEFAULT_RATIO);
        if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
            return Err(ZipperError::InvalidRatio(ratio));
        }

        let concurrency = concurrency.unwrap_or(DEFAULT_CONCURRENCY);
        if concurrency == 0 {
            return Err(ZipperError::InvalidConcurrency(concurrency));
        }

        Ok(Self {
            ratio,
            concurrency,
            fail_fast,
        })
    }
}

impl Default for ZipperOptions {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_RATIO,
            concurrency: DEFAULT_CONCURRENCY,
            fail_fast: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_creation() {
        let options = ZipperOptions::new(Some(0.25), Some(4), true).unwrap();
        assert_eq!(options.ratio, 0.25);
        assert_eq!(options.concurrency, 4);
        assert!(options.fail_fast);
    }

    #[test]
    fn test_options_default() {
        let options = ZipperOptions::new(None, None, false).unwrap();
        assert_eq!(options, ZipperOptions::default());
        assert_eq!(options.ratio, 0.5);
        assert_eq!(options.concurrency, 1);
    }

    #[test]
    fn test_options_ratio_of_one_is_valid() {
        assert!(ZipperOptions::new(Some(1.0), None, false).is_ok());
    }

    #[test]
    fn test_options_invalid_ratio() {
        for ratio in [0.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            let result = ZipperOptions::new(Some(ratio), None, false);
            assert!(matches!(result, Err(ZipperError::InvalidRatio(_))));
        }
    }

    #[test]
    fn test_options_invalid_concurrency() {
        let result = ZipperOptions::new(None, Some(0), false);
        assert!(matches!(result, Err(ZipperError::InvalidConcurrency(0))));
    }
}
