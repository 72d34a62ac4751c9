//! Spin-down safety predicates
//!
//! Scheduling code elsewhere wants to avoid waking a disk that has spun
//! down. These predicates re-derive the disk list and idle times on
//! every call and share no state with a concurrently running sampling
//! pass, so their answer may lag a scrape that is in flight.

use crate::sampler::IDLE_TIME_FILE;
use crate::sysfs::SysfsRoot;

/// True iff any visible disk has been idle strictly longer than
/// `threshold_secs`.
///
/// The running maximum starts at 0, so a negative threshold holds even
/// with no disks visible, and a failed idle-time read counts as 0.
pub fn any_disk_idle_above(root: &SysfsRoot, threshold_secs: i64) -> bool {
    let mut max = 0;
    for dev in root.list_disks() {
        let idle = root.attr_int(&dev, IDLE_TIME_FILE).unwrap_or(0);
        if idle > max {
            max = idle;
        }
    }
    max > threshold_secs
}

/// True iff any visible disk has been idle strictly less than
/// `threshold_secs`. False for an empty disk list.
///
/// Stops at the first qualifying disk.
pub fn any_disk_idle_below(root: &SysfsRoot, threshold_secs: i64) -> bool {
    root.list_disks()
        .iter()
        .any(|dev| root.attr_int(dev, IDLE_TIME_FILE).unwrap_or(0) < threshold_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Disks with an optional idle-time reading; `None` leaves the
    /// attribute file absent.
    fn root_with_idle(disks: &[(&str, Option<i64>)]) -> (TempDir, SysfsRoot) {
        let dir = TempDir::new().unwrap();
        for (dev, idle) in disks {
            let device_dir = dir.path().join("block").join(dev).join("device");
            fs::create_dir_all(&device_dir).unwrap();
            if let Some(idle) = idle {
                fs::write(device_dir.join(IDLE_TIME_FILE), format!("{}\n", idle)).unwrap();
            }
        }
        let root = SysfsRoot::new(dir.path());
        (dir, root)
    }

    #[test]
    fn below_is_false_for_empty_disk_list() {
        let dir = TempDir::new().unwrap();
        let root = SysfsRoot::new(dir.path());
        for threshold in [-1, 0, 1, 100, i64::MAX] {
            assert!(!any_disk_idle_below(&root, threshold));
        }
    }

    #[test]
    fn above_zero_with_unreadable_idle_is_false() {
        // A failed read degrades to 0, and 0 is not strictly above 0.
        let (_dir, root) = root_with_idle(&[("sda", None)]);
        assert!(!any_disk_idle_above(&root, 0));
    }

    #[test]
    fn above_tracks_the_maximum() {
        let (_dir, root) = root_with_idle(&[("sda", Some(10)), ("sdb", Some(5000))]);
        assert!(any_disk_idle_above(&root, 1000));
        assert!(any_disk_idle_above(&root, 4999));
        assert!(!any_disk_idle_above(&root, 5000));
        assert!(!any_disk_idle_above(&root, 5001));
    }

    #[test]
    fn below_matches_the_minimum_strictly() {
        let (_dir, root) = root_with_idle(&[("sda", Some(10)), ("sdb", Some(5000))]);
        assert!(any_disk_idle_below(&root, 50));
        assert!(any_disk_idle_below(&root, 11));
        assert!(!any_disk_idle_below(&root, 10));
        assert!(!any_disk_idle_below(&root, 5));
    }

    #[test]
    fn negative_above_threshold_always_holds() {
        // Running maximum starts at 0 even with no disks.
        let dir = TempDir::new().unwrap();
        let root = SysfsRoot::new(dir.path());
        assert!(any_disk_idle_above(&root, -1));
    }

    #[test]
    fn unreadable_idle_counts_as_zero_for_below() {
        let (_dir, root) = root_with_idle(&[("sda", None)]);
        assert!(any_disk_idle_below(&root, 1));
        assert!(!any_disk_idle_below(&root, 0));
    }
}
