use aq_domain::config::{Config, ConfigSeverity};

/// Validate the parsed config, printing every issue found.
///
/// Returns `false` when any issue is an error; warnings alone leave the
/// config usable.  The caller decides the exit code.
pub fn validate(config: &Config, config_path: &str) -> bool {
    let issues = config.validate();

    if issues.is_empty() {
        println!("Config OK ({config_path})");
        println!(
            "  forwarding to {} (timeout {} ms)",
            config.proxy.base_url, config.proxy.timeout_ms
        );
        return true;
    }

    for issue in &issues {
        println!("{issue}");
    }

    let error_count = issues
        .iter()
        .filter(|i| i.severity == ConfigSeverity::Error)
        .count();
    println!(
        "\n{error_count} error(s), {} warning(s) in {config_path}",
        issues.len() - error_count,
    );

    error_count == 0
}

/// Dump the resolved config (with all defaults filled in) as TOML.
///
/// The originating path is echoed as a leading TOML comment.
pub fn show(config: &Config, config_path: &str) {
    match toml::to_string_pretty(config) {
        Ok(output) => {
            println!("# resolved from {config_path}");
            print!("{output}");
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {e}");
            std::process::exit(1);
        }
    }
}
