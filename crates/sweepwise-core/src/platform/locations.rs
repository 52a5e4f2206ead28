/// Default cleanup categories for the host OS.
///
/// Temp directories plus the common browser caches. Callers are free to
/// ignore these and supply their own categories.
use crate::scanner::CategorySpec;
use std::path::PathBuf;

/// Default categories for the host OS. Entries sharing a name (e.g. two
/// "System Temp" directories) are merged by the aggregator.
pub fn default_categories() -> Vec<CategorySpec> {
    let home = dirs::home_dir().unwrap_or_default();
    let mut out = system_temp_dirs(&home);
    out.extend(browser_cache_dirs(&home));
    out
}

#[cfg(target_os = "windows")]
fn system_temp_dirs(_home: &std::path::Path) -> Vec<CategorySpec> {
    let local = dirs::data_local_dir().unwrap_or_default();
    vec![
        CategorySpec::new("System Temp", [std::env::temp_dir()]),
        CategorySpec::new("Windows Temp", [PathBuf::from("C:\\Windows\\Temp")]),
        CategorySpec::new("User Temp", [local.join("Temp")]),
    ]
}

#[cfg(target_os = "windows")]
fn browser_cache_dirs(_home: &std::path::Path) -> Vec<CategorySpec> {
    let local = dirs::data_local_dir().unwrap_or_default();
    vec![
        CategorySpec::new(
            "Chrome Cache",
            [local.join("Google").join("Chrome").join("User Data").join("Default").join("Cache")],
        ),
        CategorySpec::new(
            "Firefox Cache",
            [local.join("Mozilla").join("Firefox").join("Profiles")],
        ),
        CategorySpec::new(
            "Edge Cache",
            [local.join("Microsoft").join("Edge").join("User Data").join("Default").join("Cache")],
        ),
    ]
}

#[cfg(target_os = "macos")]
fn system_temp_dirs(home: &std::path::Path) -> Vec<CategorySpec> {
    vec![
        CategorySpec::new("System Temp", [PathBuf::from("/tmp"), PathBuf::from("/private/tmp")]),
        CategorySpec::new("User Cache", [home.join("Library").join("Caches")]),
    ]
}

#[cfg(target_os = "macos")]
fn browser_cache_dirs(home: &std::path::Path) -> Vec<CategorySpec> {
    let caches = home.join("Library").join("Caches");
    vec![
        CategorySpec::new("Chrome Cache", [caches.join("Google").join("Chrome")]),
        CategorySpec::new("Firefox Cache", [caches.join("Firefox")]),
        CategorySpec::new("Edge Cache", [caches.join("Microsoft Edge")]),
    ]
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn system_temp_dirs(home: &std::path::Path) -> Vec<CategorySpec> {
    vec![
        CategorySpec::new("System Temp", [PathBuf::from("/tmp"), PathBuf::from("/var/tmp")]),
        CategorySpec::new("User Cache", [home.join(".cache")]),
    ]
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn browser_cache_dirs(home: &std::path::Path) -> Vec<CategorySpec> {
    vec![
        CategorySpec::new("Chrome Cache", [home.join(".cache").join("google-chrome")]),
        CategorySpec::new("Firefox Cache", [home.join(".mozilla").join("firefox")]),
        CategorySpec::new(
            "Edge Cache",
            [home.join(".config").join("microsoft-edge").join("Default").join("Cache")],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_include_temp_and_browser_caches() {
        let cats = default_categories();
        let names: Vec<&str> = cats.iter().map(|c| c.name.as_str()).collect();
        assert!(names.contains(&"System Temp"));
        assert!(names.contains(&"Chrome Cache"));
        assert!(names.contains(&"Firefox Cache"));
        assert!(names.contains(&"Edge Cache"));
    }

    #[test]
    fn every_default_category_has_a_location() {
        for cat in default_categories() {
            assert!(!cat.locations.is_empty(), "{} has no locations", cat.name);
        }
    }
}
