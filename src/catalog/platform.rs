//! Static catalog of supported download platforms
//!
//! A platform is an `{os}-{arch}` pair identifying a distinct downloadable
//! artifact variant. The catalog is defined once, shared read-only, and
//! iterated in a fixed priority order. That order is load-bearing: alias
//! matching resolves ambiguous tokens (e.g. "amd64") to the earliest
//! platform in [`PLATFORMS`], so the order is part of the public contract.

/// A supported (operating system, CPU architecture) pair.
#[derive(Debug, PartialEq, Eq)]
pub struct Platform {
    /// Canonical key of the form `{os}-{arch}`, e.g. `linux-x64`.
    pub key: &'static str,
    pub os: &'static str,
    pub arch: &'static str,
    /// Secondary match tokens, tried only when OS/arch identifier matching
    /// finds nothing. May overlap between platforms; first catalog entry wins.
    pub aliases: &'static [&'static str],
    /// Acceptable final file-extension segments for this platform's artifacts.
    pub file_types: &'static [&'static str],
}

/// OS detection tokens, scanned in order. The first table entry whose token
/// substring-matches a link decides the OS. The macos row must stay ahead of
/// windows: "darwin" contains "win", so scanning windows first would claim
/// every Darwin link.
pub const OS_IDENTIFIERS: &[(&str, &[&str])] = &[
    ("macos", &["macos", "darwin", "osx"]),
    ("linux", &["linux"]),
    ("windows", &["windows", "win"]),
];

/// Architecture detection tokens, scanned in order. Links with no
/// architecture token default to `x64`.
pub const ARCH_IDENTIFIERS: &[(&str, &[&str])] = &[
    ("x64", &["x64", "amd64", "x86_64"]),
    ("aarch64", &["aarch64", "arm64"]),
];

/// All supported platforms, in priority order.
pub const PLATFORMS: &[Platform] = &[
    Platform {
        key: "windows-x64",
        os: "windows",
        arch: "x64",
        aliases: &["win64", "x86_64-pc-windows", "amd64", "x64"],
        file_types: &["zip", "msi", "exe", "7z"],
    },
    Platform {
        key: "linux-x64",
        os: "linux",
        arch: "x64",
        aliases: &["linux64", "x86_64-linux", "amd64"],
        file_types: &["tgz", "xz", "gz"],
    },
    Platform {
        key: "linux-aarch64",
        os: "linux",
        arch: "aarch64",
        aliases: &["linux-arm64", "aarch64-linux"],
        file_types: &["tgz", "xz", "gz"],
    },
    Platform {
        key: "macos-x64",
        os: "macos",
        arch: "x64",
        aliases: &["darwin64", "x86_64-darwin", "amd64"],
        file_types: &["gz", "pkg", "dmg"],
    },
    Platform {
        key: "macos-aarch64",
        os: "macos",
        arch: "aarch64",
        aliases: &["darwin-arm64", "aarch64-darwin", "arm64"],
        file_types: &["gz", "pkg", "dmg"],
    },
];

/// Looks up a platform by its canonical key.
pub fn find(key: &str) -> Option<&'static Platform> {
    PLATFORMS.iter().find(|p| p.key == key)
}
