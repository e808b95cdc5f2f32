use crate::arch::CpuFields;
use crate::error::{Error, Result};
use crate::sysfs::SysfsRoot;
use serde::Serialize;

/// CPU descriptor file, relative to the sysfs root.
pub const PROC_CPUINFO: &str = "proc/cpuinfo";

/// Processor identity extracted from the CPU descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpuDetails {
    pub vendor: String,
    pub model: String,
}

/// Extract the vendor and model values from `proc/cpuinfo`.
///
/// The descriptor is line-oriented `<key> : <value>` text; which keys name
/// the vendor and model depends on the architecture. Both fields are
/// mandatory: a descriptor missing either one, or carrying an empty value
/// for it, fails as a whole even if the other field was found. Values are
/// returned trimmed but otherwise unmodified.
pub fn cpu_details(sysfs: &SysfsRoot, fields: &CpuFields) -> Result<CpuDetails> {
    let contents = sysfs.read(PROC_CPUINFO)?;

    let mut vendor: Option<String> = None;
    let mut model: Option<String> = None;

    for line in contents.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        // First occurrence wins; the descriptor repeats the block per
        // logical CPU with identical values.
        if key == fields.vendor && vendor.is_none() {
            vendor = Some(value.to_string());
        } else if key == fields.model && model.is_none() {
            model = Some(value.to_string());
        }
    }

    let missing = |field: &'static str| Error::MissingCpuField {
        path: sysfs.path(PROC_CPUINFO),
        field,
    };

    match (
        vendor.filter(|v| !v.is_empty()),
        model.filter(|m| !m.is_empty()),
    ) {
        (Some(vendor), Some(model)) => Ok(CpuDetails { vendor, model }),
        (None, _) => Err(missing(fields.vendor)),
        (_, None) => Err(missing(fields.model)),
    }
}
