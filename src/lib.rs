//! # synostat
//!
//! Samples the per-disk vendor health attributes a Synology DSM kernel
//! exposes under `/sys/block/<disk>/device/syno_*` and republishes them
//! as labeled Prometheus gauges. Also ships two spin-down predicates so
//! scheduling code can avoid waking a disk that has powered down its
//! platters.
//!
//! ## Quick start
//!
//! ```no_run
//! use prometheus::Registry;
//! use synostat::{SynoCollector, SysfsRoot};
//!
//! # fn main() -> synostat::Result<()> {
//! let registry = Registry::new();
//! let collector = SynoCollector::new(SysfsRoot::default(), "node")?;
//! registry.register(Box::new(collector))?;
//! // registry.gather() now runs one sampling pass per scrape.
//! # Ok(())
//! # }
//! ```
//!
//! ## Spin-down predicates
//!
//! ```no_run
//! use synostat::{any_disk_idle_above, SysfsRoot};
//!
//! let root = SysfsRoot::default();
//! if any_disk_idle_above(&root, 1800) {
//!     // Some disk has been idle for over half an hour; defer the scan.
//! }
//! ```
//!
//! Every read degrades rather than fails: a missing disk or attribute
//! shows up as a zero-valued sample, never as an error from a scrape.

pub mod error;
pub mod idle; // Spin-down safety predicates
pub mod metrics; // Prometheus collector wiring
pub mod sampler; // Per-disk attribute sampling pass
pub mod sysfs; // Sysfs attribute reads and disk enumeration

// Re-export main types
pub use error::{Error, Result};
pub use idle::{any_disk_idle_above, any_disk_idle_below};
pub use metrics::{SynoCollector, DEFAULT_NAMESPACE};
pub use sampler::{AttrKind, Sample, Sampler, SynoAttribute, SYNO_ATTRIBUTES};
pub use sysfs::{AttrRead, SysfsRoot};
