fn main() {
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();

        if std::path::Path::new("../assets/stopwatch.ico").exists() {
            res.set_icon("../assets/stopwatch.ico");
        }

        let version = env!("CARGO_PKG_VERSION");
        let major: Vec<&str> = version.split('.').collect();
        let version_string = format!(
            "{}.{}.{}.0",
            major.first().unwrap_or(&"1"),
            major.get(1).unwrap_or(&"0"),
            major.get(2).unwrap_or(&"0")
        );

        res.set("ProductName", "Session Stopwatcher")
            .set("FileDescription", "Behavioral session recorder and manifest generator")
            .set("CompanyName", "chaorenex1")
            .set(
                "LegalCopyright",
                "Copyright © 2026 chaorenex1. Licensed under Apache-2.0",
            )
            .set("FileVersion", &version_string)
            .set("ProductVersion", version);

        if let Err(e) = res.compile() {
            eprintln!("Warning: Failed to compile Windows resources: {}", e);
        }
    }

    println!("cargo:rerun-if-changed=../assets/stopwatch.ico");
}
