pub mod cpu;
pub mod modules;

use crate::arch::ArchSpec;
use crate::error::Error;
use crate::sysfs::SysfsRoot;

pub use cpu::CpuDetails;
pub use modules::{ModuleSpec, ModuleStatus};

/// Environment variable marking the execution environment as unable to offer
/// hardware virtualization (e.g. restricted CI runners). An affirmative value
/// turns `check` into a non-failing no-op.
pub const CI_NO_VIRT_ENV: &str = "VMCAP_CI_NO_VIRT";

/// Aggregate result of one capability evaluation.
#[derive(Debug)]
pub struct CapabilityReport {
    pub cpu: Result<CpuDetails, Error>,
    pub modules: Vec<ModuleStatus>,
}

impl CapabilityReport {
    /// Required modules that are not loaded.
    pub fn missing_modules(&self) -> Vec<&ModuleStatus> {
        modules::missing_required(&self.modules)
    }

    /// Overall verdict: CPU identified and no required module missing.
    /// Strict boolean, there is no "partially capable".
    pub fn capable(&self) -> bool {
        self.cpu.is_ok() && self.missing_modules().is_empty()
    }
}

/// Run the CPU and module checks against one filesystem root.
///
/// The two checks are independent and both always run, so a single
/// invocation surfaces every problem at once. Each check runs exactly once;
/// a transient read failure is reported as-is.
pub fn evaluate(sysfs: &SysfsRoot, arch: &ArchSpec) -> CapabilityReport {
    CapabilityReport {
        cpu: cpu::cpu_details(sysfs, &arch.cpu_fields),
        modules: modules::check_modules(sysfs, &arch.modules),
    }
}

/// True when `CI_NO_VIRT_ENV` is set to an affirmative value.
pub fn ci_skip_requested() -> bool {
    std::env::var(CI_NO_VIRT_ENV).is_ok_and(|v| is_affirmative(&v))
}

fn is_affirmative(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cpu_failure_does_not_short_circuit_module_check() {
        let tmp = TempDir::new().unwrap();
        // Modules present, but no proc/cpuinfo at all.
        fs::create_dir_all(tmp.path().join("sys/module/kvm")).unwrap();
        fs::create_dir_all(tmp.path().join("sys/module/vhost")).unwrap();
        fs::create_dir_all(tmp.path().join("sys/module/vhost_net")).unwrap();

        let sysfs = SysfsRoot::new(tmp.path());
        let spec = arch::spec_for("riscv64").unwrap();
        let report = evaluate(&sysfs, &spec);

        assert!(report.cpu.as_ref().unwrap_err().is_not_found());
        assert_eq!(report.modules.len(), spec.modules.len());
        assert!(report.modules.iter().all(|s| s.loaded));
        assert!(!report.capable());
    }

    #[test]
    fn test_verdict_needs_both_checks_to_pass() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("proc")).unwrap();
        fs::write(
            tmp.path().join("proc/cpuinfo"),
            "mvendorid : 0x489\nuarch : sifive,u74-mc\n",
        )
        .unwrap();
        fs::create_dir_all(tmp.path().join("sys/module/kvm")).unwrap();
        fs::create_dir_all(tmp.path().join("sys/module/vhost")).unwrap();

        let sysfs = SysfsRoot::new(tmp.path());
        let spec = arch::spec_for("riscv64").unwrap();
        let report = evaluate(&sysfs, &spec);

        // CPU check passes but vhost_net is missing.
        assert!(report.cpu.is_ok());
        let missing: Vec<&str> = report
            .missing_modules()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(missing, ["vhost_net"]);
        assert!(!report.capable());

        fs::create_dir_all(tmp.path().join("sys/module/vhost_net")).unwrap();
        let report = evaluate(&sysfs, &spec);
        assert!(report.capable());
    }

    #[test]
    fn test_is_affirmative() {
        for value in ["1", "true", "TRUE", "yes", " Yes "] {
            assert!(is_affirmative(value), "{:?} should be affirmative", value);
        }
        for value in ["", "0", "false", "no", "2", "on"] {
            assert!(!is_affirmative(value), "{:?} should not be affirmative", value);
        }
    }
}
