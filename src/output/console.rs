//! Console output utilities.

use console::style;

use crate::config::Config;

/// Remediation steps printed after any operation failure.
pub const FAILURE_GUIDANCE: &[&str] = &[
    "Check that the file path is correct and relative to the site's server root.",
    "Check that the app registration has been granted access to the site or folder.",
    "Check that the client id and secret are valid and not expired.",
];

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print one line per missing configuration variable.
pub fn print_missing_vars(vars: &[String]) {
    for var in vars {
        print_error(&format!("{} environment variable is not set.", var));
    }
}

/// Print the remediation checklist for operation failures.
pub fn print_failure_guidance() {
    for step in FAILURE_GUIDANCE {
        eprintln!("  - {}", step);
    }
}

/// Print configuration summary. The client secret is masked.
pub fn print_config_summary(config: &Config) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Site:      {}", config.site_url);
    if let Some(tenant) = &config.tenant_id {
        println!("  Tenant:    {}", tenant);
    }
    println!("  Client ID: {}", config.client_id);
    println!("  Secret:    {}", config.client_secret);
    println!("  File:      {}", config.file_server_relative_url);
    println!("  Directory: {}", config.download_path.display());
    println!();
}
