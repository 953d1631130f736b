use sysinfo::System;

/// Host details written into export headers, so a CSV can be traced back to
/// the machine that recorded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    pub os_name: String,
    pub os_version: String,
    pub kernel_version: String,
    pub host_name: String,
    pub arch: String,
    pub toolkit_version: String,
}

impl PlatformInfo {
    pub fn detect() -> Self {
        let unknown = || "unknown".to_string();
        Self {
            os_name: System::name().unwrap_or_else(unknown),
            os_version: System::os_version().unwrap_or_else(unknown),
            kernel_version: System::kernel_version().unwrap_or_else(unknown),
            host_name: System::host_name().unwrap_or_else(unknown),
            arch: std::env::consts::ARCH.to_string(),
            toolkit_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// `# key: value` lines, without trailing newlines.
    pub fn comment_lines(&self) -> Vec<String> {
        vec![
            format!("# Platform: {} {} ({})", self.os_name, self.os_version, self.arch),
            format!("# Kernel: {}", self.kernel_version),
            format!("# Host: {}", self.host_name),
            format!("# Recorder Version: {}", self.toolkit_version),
        ]
    }
}
