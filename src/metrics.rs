//! Prometheus wiring for the sampling pass
//!
//! [`SynoCollector`] bridges the sampler to a pull-based registry. The
//! gauge vectors and their descriptors are built once at construction;
//! each scrape resets them, runs one sampling pass, and reports the
//! resulting families. A disk that disappeared since the previous
//! scrape therefore drops out instead of going stale.

use crate::error::Result;
use crate::sampler::{AttrKind, Sampler, SYNO_ATTRIBUTES};
use crate::sysfs::SysfsRoot;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{GaugeVec, Opts};

/// Default metric namespace, matching the node exporter this collector
/// originated in.
pub const DEFAULT_NAMESPACE: &str = "node";

/// Collector exposing the six per-disk vendor attributes as gauges
/// named `<namespace>_syno_<attribute>` with a `device` label (plus a
/// `serial` label on the disk-serial gauge).
pub struct SynoCollector {
    sampler: Sampler,
    // Parallel to SYNO_ATTRIBUTES.
    gauges: Vec<GaugeVec>,
}

impl SynoCollector {
    /// Build a collector over `root` with the given metric namespace.
    pub fn new(root: SysfsRoot, namespace: &str) -> Result<Self> {
        let mut gauges = Vec::with_capacity(SYNO_ATTRIBUTES.len());
        for attr in &SYNO_ATTRIBUTES {
            let opts = Opts::new(format!("syno_{}", attr.name), attr.help).namespace(namespace);
            let labels: &[&str] = match attr.kind {
                AttrKind::Gauge => &["device"],
                AttrKind::SerialLabel => &["device", "serial"],
            };
            gauges.push(GaugeVec::new(opts, labels)?);
        }
        Ok(Self {
            sampler: Sampler::new(root),
            gauges,
        })
    }

    /// Same as [`SynoCollector::new`] with the default namespace.
    pub fn with_default_namespace(root: SysfsRoot) -> Result<Self> {
        Self::new(root, DEFAULT_NAMESPACE)
    }
}

impl Collector for SynoCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.gauges.iter().flat_map(|g| g.desc()).collect()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        for gauge in &self.gauges {
            gauge.reset();
        }
        for sample in self.sampler.samples() {
            let Some(idx) = SYNO_ATTRIBUTES.iter().position(|a| a.name == sample.metric)
            else {
                continue;
            };
            let gauge = &self.gauges[idx];
            match &sample.serial {
                Some(serial) => gauge
                    .with_label_values(&[sample.device.as_str(), serial.as_str()])
                    .set(sample.value),
                None => gauge
                    .with_label_values(&[sample.device.as_str()])
                    .set(sample.value),
            }
        }
        self.gauges.iter().flat_map(|g| g.collect()).collect()
    }
}
