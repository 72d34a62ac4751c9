//! Sysfs access: attribute reads and disk enumeration
//!
//! Synology DSM kernels expose per-disk vendor attributes as small text
//! files under `/sys/block/<disk>/device/syno_*`. Reads here never
//! hard-fail: a missing, unreadable, or unparsable attribute comes back
//! as [`AttrRead::Unavailable`] with a debug-level diagnostic, and the
//! caller decides what a degraded read means. A transient attribute must
//! not abort an entire collection pass.

use log::debug;
use std::fs;
use std::path::PathBuf;

/// Name prefix of Synology's SATA disk handles (sda, sdb, ...).
const DISK_PREFIX: &str = "sd";

/// Outcome of a single attribute read.
///
/// Coercion to a default (zero, empty string) is left to the caller so
/// the degrade policy stays visible at the use site instead of being
/// buried in the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrRead<T> {
    /// The attribute file was present, readable, and parsable.
    Value(T),
    /// The attribute could not be read or parsed.
    Unavailable,
}

impl<T> AttrRead<T> {
    /// Returns the read value, or `fallback` if the attribute was unavailable.
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            AttrRead::Value(v) => v,
            AttrRead::Unavailable => fallback,
        }
    }

    /// True if the read degraded.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, AttrRead::Unavailable)
    }
}

/// Handle to a sysfs mount point.
///
/// Defaults to `/sys`; overridable for tests and for containers that
/// bind-mount the host sysfs somewhere else.
#[derive(Debug, Clone)]
pub struct SysfsRoot {
    root: PathBuf,
}

impl Default for SysfsRoot {
    fn default() -> Self {
        Self::new("/sys")
    }
}

impl SysfsRoot {
    /// Create a handle rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn attr_path(&self, dev: &str, attr: &str) -> PathBuf {
        self.root.join("block").join(dev).join("device").join(attr)
    }

    /// Read a device-scoped attribute as trimmed text.
    pub fn attr_text(&self, dev: &str, attr: &str) -> AttrRead<String> {
        let path = self.attr_path(dev, attr);
        match fs::read_to_string(&path) {
            Ok(content) => AttrRead::Value(content.trim().to_string()),
            Err(e) => {
                debug!("error reading {}: {}", path.display(), e);
                AttrRead::Unavailable
            }
        }
    }

    /// Read a device-scoped attribute and parse it as a base-10 integer.
    pub fn attr_int(&self, dev: &str, attr: &str) -> AttrRead<i64> {
        match self.attr_text(dev, attr) {
            AttrRead::Value(text) => match text.parse::<i64>() {
                Ok(value) => AttrRead::Value(value),
                Err(e) => {
                    debug!(
                        "error converting value for {} / {} from {:?}: {}",
                        dev, attr, text, e
                    );
                    AttrRead::Unavailable
                }
            },
            AttrRead::Unavailable => AttrRead::Unavailable,
        }
    }

    /// List the disks currently visible under `<root>/block`.
    ///
    /// Only `sd*` handles pass the filter: block/ also lists loop
    /// devices, ram disks, dm-* mappings, and other entries that carry
    /// no vendor attributes. Names come back in directory order, not
    /// sorted. An unreadable directory degrades to no disks.
    pub fn list_disks(&self) -> Vec<String> {
        let block = self.root.join("block");
        let entries = match fs::read_dir(&block) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("error listing {}: {}", block.display(), e);
                return Vec::new();
            }
        };
        entries
            .filter_map(|entry| {
                let name = entry.ok()?.file_name().to_string_lossy().to_string();
                name.starts_with(DISK_PREFIX).then_some(name)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_sysfs() -> (TempDir, SysfsRoot) {
        let dir = TempDir::new().unwrap();
        let root = SysfsRoot::new(dir.path());
        (dir, root)
    }

    fn write_attr(dir: &TempDir, dev: &str, attr: &str, content: &str) {
        let device_dir = dir.path().join("block").join(dev).join("device");
        fs::create_dir_all(&device_dir).unwrap();
        fs::write(device_dir.join(attr), content).unwrap();
    }

    #[test]
    fn attr_text_trims_whitespace() {
        let (dir, root) = fake_sysfs();
        write_attr(&dir, "sda", "syno_disk_serial", "  WD-ABC123\n");
        assert_eq!(
            root.attr_text("sda", "syno_disk_serial"),
            AttrRead::Value("WD-ABC123".to_string())
        );
    }

    #[test]
    fn attr_text_missing_file_is_unavailable() {
        let (_dir, root) = fake_sysfs();
        assert!(root.attr_text("sda", "syno_disk_serial").is_unavailable());
    }

    #[test]
    fn attr_int_round_trips() {
        let (dir, root) = fake_sysfs();
        for value in [0i64, 1, 12345, -7] {
            write_attr(&dir, "sda", "syno_idle_time", &format!("{}\n", value));
            assert_eq!(
                root.attr_int("sda", "syno_idle_time"),
                AttrRead::Value(value)
            );
        }
    }

    #[test]
    fn attr_int_rejects_garbage() {
        let (dir, root) = fake_sysfs();
        write_attr(&dir, "sda", "syno_idle_time", "not a number\n");
        assert!(root.attr_int("sda", "syno_idle_time").is_unavailable());

        write_attr(&dir, "sda", "syno_idle_time", "   \n");
        assert!(root.attr_int("sda", "syno_idle_time").is_unavailable());
    }

    #[test]
    fn list_disks_filters_non_disk_entries() {
        let (dir, root) = fake_sysfs();
        for name in ["sda", "sdb", "loop0", "dm-0"] {
            fs::create_dir_all(dir.path().join("block").join(name)).unwrap();
        }
        let mut disks = root.list_disks();
        disks.sort();
        assert_eq!(disks, vec!["sda", "sdb"]);
    }

    #[test]
    fn list_disks_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let root = SysfsRoot::new(dir.path().join("no-such-root"));
        assert!(root.list_disks().is_empty());
    }

    #[test]
    fn unwrap_or_coerces_unavailable() {
        assert_eq!(AttrRead::<i64>::Unavailable.unwrap_or(0), 0);
        assert_eq!(AttrRead::Value(42i64).unwrap_or(0), 42);
    }
}
