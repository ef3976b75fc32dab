use super::segment::MAX_SEGMENT_LEN;
use super::{Result, Segment, Word, POOL_SIZE};
use crate::error;

/// Segment capacities, in words, for one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub text: usize,
    pub data: usize,
    pub stack: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config::with_pool_size(POOL_SIZE)
    }
}

impl Config {
    /// Every segment gets the same capacity.
    pub fn with_pool_size(words: usize) -> Config {
        Config {
            text: words,
            data: words,
            stack: words,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (segment, len) in &[
            (Segment::Text, self.text),
            (Segment::Data, self.data),
            (Segment::Stack, self.stack),
        ] {
            if *len > MAX_SEGMENT_LEN {
                return Err(error!(OutOfMemory, *len as Word, *segment; "segment too large"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool() {
        let config = Config::default();
        assert_eq!(config.text, 256 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_oversized_segment() {
        let mut config = Config::with_pool_size(8);
        config.stack = MAX_SEGMENT_LEN + 1;
        let e = config.validate().unwrap_err();
        assert_eq!(e.segment(), Some(Segment::Stack));
    }
}
