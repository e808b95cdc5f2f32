use crate::sysfs::SysfsRoot;
use serde::Serialize;

/// Directory loaded kernel modules surface under, relative to the sysfs root.
pub const SYS_MODULE_DIR: &str = "sys/module";

/// One hypervisor-support kernel module the host is expected to carry.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleSpec {
    pub name: String,
    pub path: String,
    pub required: bool,
}

impl ModuleSpec {
    pub fn required(name: &str) -> Self {
        Self::new(name, true)
    }

    pub fn optional(name: &str) -> Self {
        Self::new(name, false)
    }

    fn new(name: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            path: format!("{}/{}", SYS_MODULE_DIR, name),
            required,
        }
    }
}

/// Presence of one module on the host.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleStatus {
    pub name: String,
    pub path: String,
    pub required: bool,
    pub loaded: bool,
}

/// Check every spec in input order. No short-circuit: one pass reports
/// every missing module at once.
pub fn check_modules(sysfs: &SysfsRoot, specs: &[ModuleSpec]) -> Vec<ModuleStatus> {
    specs
        .iter()
        .map(|spec| ModuleStatus {
            name: spec.name.clone(),
            path: spec.path.clone(),
            required: spec.required,
            loaded: sysfs.exists(&spec.path),
        })
        .collect()
}

/// Required modules that are not loaded.
pub fn missing_required(statuses: &[ModuleStatus]) -> Vec<&ModuleStatus> {
    statuses
        .iter()
        .filter(|s| s.required && !s.loaded)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn load_module(tmp: &TempDir, name: &str) {
        fs::create_dir_all(tmp.path().join(SYS_MODULE_DIR).join(name)).unwrap();
    }

    #[test]
    fn test_all_required_present() {
        let tmp = TempDir::new().unwrap();
        load_module(&tmp, "kvm");
        load_module(&tmp, "vhost");

        let sysfs = SysfsRoot::new(tmp.path());
        let specs = [ModuleSpec::required("kvm"), ModuleSpec::required("vhost")];
        let statuses = check_modules(&sysfs, &specs);

        assert!(statuses.iter().all(|s| s.loaded));
        assert!(missing_required(&statuses).is_empty());
    }

    #[test]
    fn test_missing_required_module_is_reported() {
        let tmp = TempDir::new().unwrap();
        load_module(&tmp, "kvm");

        let sysfs = SysfsRoot::new(tmp.path());
        let specs = [ModuleSpec::required("kvm"), ModuleSpec::required("vhost")];
        let statuses = check_modules(&sysfs, &specs);

        let missing = missing_required(&statuses);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].name, "vhost");
    }

    #[test]
    fn test_missing_optional_module_does_not_fail() {
        let tmp = TempDir::new().unwrap();
        load_module(&tmp, "kvm");

        let sysfs = SysfsRoot::new(tmp.path());
        let specs = [
            ModuleSpec::required("kvm"),
            ModuleSpec::optional("vhost_vsock"),
        ];
        let statuses = check_modules(&sysfs, &specs);

        assert!(!statuses[1].loaded);
        assert!(missing_required(&statuses).is_empty());
    }

    #[test]
    fn test_statuses_preserve_input_order_and_cover_all_specs() {
        let tmp = TempDir::new().unwrap();

        let sysfs = SysfsRoot::new(tmp.path());
        let specs = [
            ModuleSpec::required("vhost_net"),
            ModuleSpec::optional("vhost_vsock"),
            ModuleSpec::required("kvm"),
        ];
        let statuses = check_modules(&sysfs, &specs);

        let names: Vec<&str> = statuses.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["vhost_net", "vhost_vsock", "kvm"]);

        // Nothing is loaded, so every required spec shows up as missing.
        let missing: Vec<&str> = missing_required(&statuses)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(missing, ["vhost_net", "kvm"]);
    }

    #[test]
    fn test_module_path_is_rooted_under_sys_module() {
        let spec = ModuleSpec::required("kvm");
        assert_eq!(spec.path, "sys/module/kvm");
    }
}
