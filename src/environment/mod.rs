//! Host suitability checks.
//!
//! Advisory only: a failed check produces a warning, never an abort.
//!
//! - [`memory`] - available memory probing
//!
//! # Example
//!
//! ```
//! use thamil::environment::EnvironmentCheck;
//!
//! // 256 MiB available against a 512 MiB floor.
//! let check = EnvironmentCheck::with_probe(Some(512), Box::new(|| Some(256 * 1024 * 1024)));
//! let warnings = check.warnings();
//! assert_eq!(warnings.len(), 1);
//! assert!(warnings[0].contains("256 MiB"));
//! ```

pub mod memory;

pub use memory::available_memory_bytes;

/// Source of the available-memory figure, in bytes.
pub type MemoryProbe = Box<dyn Fn() -> Option<u64>>;

const MIB: u64 = 1024 * 1024;

/// Resource thresholds checked before a run.
pub struct EnvironmentCheck {
    min_available_memory_mb: Option<u64>,
    probe: MemoryProbe,
}

impl EnvironmentCheck {
    /// Check the running host against `min_available_memory_mb`.
    pub fn new(min_available_memory_mb: Option<u64>) -> Self {
        Self::with_probe(min_available_memory_mb, Box::new(available_memory_bytes))
    }

    /// Check with a custom memory probe.
    pub fn with_probe(min_available_memory_mb: Option<u64>, probe: MemoryProbe) -> Self {
        Self {
            min_available_memory_mb,
            probe,
        }
    }

    /// A check that never warns.
    pub fn disabled() -> Self {
        Self::with_probe(None, Box::new(|| None))
    }

    /// Warnings for every threshold the host falls below.
    ///
    /// A host that cannot report its memory produces no warning.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(min_mb) = self.min_available_memory_mb {
            if let Some(available) = (self.probe)() {
                let available_mb = available / MIB;
                if available_mb < min_mb {
                    warnings.push(format!(
                        "Low memory: {} MiB available, {} MiB recommended. Continuing anyway.",
                        available_mb, min_mb
                    ));
                }
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enough_memory_produces_no_warning() {
        let check = EnvironmentCheck::with_probe(Some(512), Box::new(|| Some(4096 * MIB)));
        assert!(check.warnings().is_empty());
    }

    #[test]
    fn low_memory_warns() {
        let check = EnvironmentCheck::with_probe(Some(512), Box::new(|| Some(100 * MIB)));
        let warnings = check.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("100 MiB available"));
        assert!(warnings[0].contains("512 MiB recommended"));
    }

    #[test]
    fn unknown_memory_is_silent() {
        let check = EnvironmentCheck::with_probe(Some(512), Box::new(|| None));
        assert!(check.warnings().is_empty());
    }

    #[test]
    fn no_threshold_never_probes() {
        let check =
            EnvironmentCheck::with_probe(None, Box::new(|| -> Option<u64> { panic!("probed") }));
        assert!(check.warnings().is_empty());
    }

    #[test]
    fn disabled_never_warns() {
        assert!(EnvironmentCheck::disabled().warnings().is_empty());
    }
}
