//! Per-architecture knowledge: which CPU descriptor fields identify the
//! processor, and which kernel modules a KVM-capable host must carry.

use crate::check::modules::ModuleSpec;
use crate::error::{Error, Result};

/// CPU descriptor field names for one architecture.
#[derive(Debug, Clone, Copy)]
pub struct CpuFields {
    pub vendor: &'static str,
    pub model: &'static str,
}

/// Everything the capability check needs to know about one architecture.
#[derive(Debug, Clone)]
pub struct ArchSpec {
    pub arch: &'static str,
    pub cpu_fields: CpuFields,
    pub modules: Vec<ModuleSpec>,
}

/// Select the table entry for the architecture this binary was built for.
pub fn host_spec() -> Result<ArchSpec> {
    spec_for(std::env::consts::ARCH)
}

/// Look up one architecture by name (`std::env::consts::ARCH` values).
/// An unknown architecture is an error, not a guess.
pub fn spec_for(arch: &str) -> Result<ArchSpec> {
    match arch {
        "x86_64" => Ok(ArchSpec {
            arch: "x86_64",
            cpu_fields: CpuFields {
                vendor: "vendor_id",
                model: "model name",
            },
            modules: vec![
                ModuleSpec::required("kvm"),
                ModuleSpec::required("vhost"),
                ModuleSpec::required("vhost_net"),
                ModuleSpec::optional("vhost_vsock"),
                // Exactly one of these is loaded depending on the CPU vendor,
                // so neither can be required statically.
                ModuleSpec::optional("kvm_intel"),
                ModuleSpec::optional("kvm_amd"),
            ],
        }),
        "aarch64" => Ok(ArchSpec {
            arch: "aarch64",
            cpu_fields: CpuFields {
                vendor: "CPU implementer",
                model: "CPU architecture",
            },
            modules: vec![
                ModuleSpec::required("kvm"),
                ModuleSpec::required("vhost"),
                ModuleSpec::required("vhost_net"),
                ModuleSpec::optional("vhost_vsock"),
            ],
        }),
        "riscv64" => Ok(ArchSpec {
            arch: "riscv64",
            cpu_fields: CpuFields {
                vendor: "mvendorid",
                model: "uarch",
            },
            modules: vec![
                ModuleSpec::required("kvm"),
                ModuleSpec::required("vhost"),
                ModuleSpec::required("vhost_net"),
            ],
        }),
        other => Err(Error::UnsupportedArch(other.to_string())),
    }
}
