//! Parser configuration.
//!
//! The parser recurses once per array/object level, so stack use grows
//! with input nesting. By default no limit is enforced; callers parsing
//! untrusted input can opt into a depth cap.

/// Depth used by [`Limits::hardened`].
pub const HARDENED_NESTING_DEPTH: usize = 512;

/// Resource limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limits {
    /// Maximum array/object nesting depth, `None` for unlimited.
    pub max_nesting_depth: Option<usize>,
}

impl Limits {
    /// No limits: every well-formed document is accepted.
    pub const fn unbounded() -> Self {
        Self {
            max_nesting_depth: None,
        }
    }

    /// Limits suitable for untrusted input.
    pub const fn hardened() -> Self {
        Self {
            max_nesting_depth: Some(HARDENED_NESTING_DEPTH),
        }
    }

    /// Returns a copy with the nesting depth capped at `depth`.
    pub const fn with_max_nesting_depth(self, depth: usize) -> Self {
        Self {
            max_nesting_depth: Some(depth),
        }
    }

    /// Whether `depth` levels of nesting are allowed.
    pub fn allows_depth(&self, depth: usize) -> bool {
        self.max_nesting_depth.map_or(true, |max| depth <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        assert_eq!(Limits::default(), Limits::unbounded());
        assert!(Limits::default().allows_depth(usize::MAX));
    }

    #[test]
    fn test_hardened_limits() {
        let limits = Limits::hardened();
        assert!(limits.allows_depth(HARDENED_NESTING_DEPTH));
        assert!(!limits.allows_depth(HARDENED_NESTING_DEPTH + 1));
    }

    #[test]
    fn test_with_max_nesting_depth() {
        let limits = Limits::unbounded().with_max_nesting_depth(2);
        assert!(limits.allows_depth(2));
        assert!(!limits.allows_depth(3));
    }
}
