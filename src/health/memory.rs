//! Memory usage probe interface.
//!
//! The core only consumes point-in-time snapshots; sampling and
//! allocation tracking belong to external instrumentation.

/// Point-in-time memory usage of this process.
#[derive(Debug, Clone, Copy)]
pub struct MemorySnapshot {
    pub current_bytes: u64,
    pub peak_bytes: u64,
}

impl MemorySnapshot {
    pub fn current_mb(&self) -> f64 {
        round_mb(self.current_bytes)
    }

    pub fn peak_mb(&self) -> f64 {
        round_mb(self.peak_bytes)
    }
}

fn round_mb(bytes: u64) -> f64 {
    let mb = bytes as f64 / (1024.0 * 1024.0);
    (mb * 100.0).round() / 100.0
}

/// Read-only view into the process's memory usage.
pub trait MemoryProbe: Send + Sync {
    /// `None` when the platform offers no reading.
    fn snapshot(&self) -> Option<MemorySnapshot>;
}

/// Probe backed by `/proc/self/status` (VmRSS / VmHWM). Yields `None`
/// on platforms without procfs.
#[derive(Default)]
pub struct ProcStatusProbe;

impl MemoryProbe for ProcStatusProbe {
    fn snapshot(&self) -> Option<MemorySnapshot> {
        let status = std::fs::read_to_string("/proc/self/status").ok()?;
        let mut current = None;
        let mut peak = None;
        for line in status.lines() {
            if let Some(rest) = line.strip_prefix("VmRSS:") {
                current = parse_kb(rest);
            } else if let Some(rest) = line.strip_prefix("VmHWM:") {
                peak = parse_kb(rest);
            }
        }
        let current = current?;
        Some(MemorySnapshot {
            current_bytes: current,
            peak_bytes: peak.unwrap_or(current),
        })
    }
}

fn parse_kb(field: &str) -> Option<u64> {
    field
        .trim()
        .strip_suffix("kB")?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|kb| kb * 1024)
}

/// Probe returning a fixed snapshot; used by tests.
pub struct FixedProbe(pub Option<MemorySnapshot>);

impl MemoryProbe for FixedProbe {
    fn snapshot(&self) -> Option<MemorySnapshot> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kb_field() {
        assert_eq!(parse_kb("  1024 kB"), Some(1024 * 1024));
        assert_eq!(parse_kb("bogus"), None);
    }

    #[test]
    fn test_snapshot_rounds_to_two_decimals() {
        let snapshot = MemorySnapshot {
            current_bytes: 3 * 1024 * 1024 + 512 * 1024,
            peak_bytes: 4 * 1024 * 1024,
        };
        assert_eq!(snapshot.current_mb(), 3.5);
        assert_eq!(snapshot.peak_mb(), 4.0);
    }
}
