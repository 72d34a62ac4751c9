//! Per-disk attribute sampling pass
//!
//! One pass visits every enumerated disk and emits one [`Sample`] per
//! known attribute, in a fixed order. A disk whose attributes are all
//! unreadable still contributes a full set of samples: integer
//! attributes degrade to 0 and the serial degrades to an empty label,
//! so the sample count is always six per visible disk.

use crate::sysfs::SysfsRoot;
use serde::Serialize;

/// How an attribute's file content maps onto a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    /// Integer file content becomes the gauge value; unreadable reads as 0.
    Gauge,
    /// File content becomes a `serial` label; the gauge value is always 1.
    SerialLabel,
}

/// One entry of the fixed attribute table.
#[derive(Debug, Clone, Copy)]
pub struct SynoAttribute {
    /// Metric name suffix; the full name is `<namespace>_syno_<name>`.
    pub name: &'static str,
    /// Attribute file under `block/<disk>/device/`.
    pub file: &'static str,
    /// Help text for the exposition format.
    pub help: &'static str,
    /// Value mapping.
    pub kind: AttrKind,
}

/// The six vendor attributes DSM exposes per SATA disk, in emission order.
pub const SYNO_ATTRIBUTES: [SynoAttribute; 6] = [
    SynoAttribute {
        name: "deep_sleep_support",
        file: "syno_deep_sleep_support",
        help: "Whether the disk supports Synology deep sleep (1) or not (0).",
        kind: AttrKind::Gauge,
    },
    SynoAttribute {
        name: "disk_serial",
        file: "syno_disk_serial",
        help: "Disk serial number as a label; the value is always 1.",
        kind: AttrKind::SerialLabel,
    },
    SynoAttribute {
        name: "idle_time",
        file: "syno_idle_time",
        help: "Seconds the disk has spent without I/O activity.",
        kind: AttrKind::Gauge,
    },
    SynoAttribute {
        name: "pwr_reset_count",
        file: "syno_pwr_reset_count",
        help: "Number of power resets the disk has seen.",
        kind: AttrKind::Gauge,
    },
    SynoAttribute {
        name: "spindown",
        file: "syno_spindown",
        help: "Whether the disk has spun down its platters (1) or not (0).",
        kind: AttrKind::Gauge,
    },
    SynoAttribute {
        name: "standby_syncing",
        file: "syno_standby_syncing",
        help: "Whether the disk is syncing before entering standby (1) or not (0).",
        kind: AttrKind::Gauge,
    },
];

/// Attribute file holding the idle-time reading, shared with the
/// spin-down predicates.
pub(crate) const IDLE_TIME_FILE: &str = "syno_idle_time";

/// One observation from a collection pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// Metric name suffix from the attribute table.
    pub metric: &'static str,
    /// Disk handle the reading came from.
    pub device: String,
    /// Serial label, present only on the disk-serial sample.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    /// Gauge value.
    pub value: f64,
}

/// Stateless sampler over one sysfs mount.
///
/// Holds no caches and no counters between passes; concurrent passes
/// are independent and safe.
#[derive(Debug, Clone, Default)]
pub struct Sampler {
    root: SysfsRoot,
}

impl Sampler {
    /// Create a sampler over the given sysfs mount.
    pub fn new(root: SysfsRoot) -> Self {
        Self { root }
    }

    /// The sysfs mount this sampler reads from.
    pub fn sysfs(&self) -> &SysfsRoot {
        &self.root
    }

    /// One collection pass: for every visible disk, six samples in
    /// [`SYNO_ATTRIBUTES`] order. Never fails and never skips a sample;
    /// degraded reads coerce to zero values or an empty serial label.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.root.list_disks().into_iter().flat_map(move |dev| {
            SYNO_ATTRIBUTES
                .iter()
                .map(move |attr| self.sample_one(&dev, attr))
        })
    }

    fn sample_one(&self, dev: &str, attr: &SynoAttribute) -> Sample {
        match attr.kind {
            AttrKind::Gauge => Sample {
                metric: attr.name,
                device: dev.to_string(),
                serial: None,
                value: self.root.attr_int(dev, attr.file).unwrap_or(0) as f64,
            },
            // Presence/identity marker, not a measurement.
            AttrKind::SerialLabel => Sample {
                metric: attr.name,
                device: dev.to_string(),
                serial: Some(self.root.attr_text(dev, attr.file).unwrap_or(String::new())),
                value: 1.0,
            },
        }
    }
}
