//! Available memory probing.

/// Memory the kernel considers available for new work, in bytes.
///
/// Returns `None` where the figure cannot be determined.
pub fn available_memory_bytes() -> Option<u64> {
    #[cfg(target_os = "linux")]
    {
        let meminfo = std::fs::read_to_string("/proc/meminfo").ok()?;
        parse_meminfo_available(&meminfo)
    }

    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

/// Extract `MemAvailable` (reported in kB) from `/proc/meminfo` text.
pub fn parse_meminfo_available(meminfo: &str) -> Option<u64> {
    meminfo
        .lines()
        .find_map(|line| line.strip_prefix("MemAvailable:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|kb| kb.parse::<u64>().ok())
        .and_then(|kb| kb.checked_mul(1024))
}
