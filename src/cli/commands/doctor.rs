//! Doctor command - verify credential configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Qrium Doctor");
    println!();
    println!("Checking source configuration...\n");

    println!("{}", style("Credentials").bold());
    let checks = vec![
        check_credential(
            "LLM API key",
            settings.llm.api_key.as_deref(),
            "Set with: export CEREBRAS_API_KEY='...'",
        ),
        check_credential(
            "Video search API key",
            settings.video.api_key.as_deref(),
            "Set with: export YOUTUBE_API_KEY='...'",
        ),
        check_credential(
            "Web search API key",
            settings.websearch.api_key.as_deref(),
            "Set with: export GOOGLE_API_KEY='...'",
        ),
        check_credential(
            "Web search engine id",
            settings.websearch.engine_id.as_deref(),
            "Set with: export GOOGLE_CX='...'",
        ),
    ];
    for check in &checks {
        check.print();
    }

    println!();
    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();

    println!();

    let errors = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Error)
        .count();

    if errors == checks.len() {
        Output::error("No source is configured. Every panel will fail.");
        std::process::exit(1);
    } else if errors > 0 {
        Output::warning(&format!(
            "{} credential(s) missing. The affected panels will report a configuration error.",
            errors
        ));
    } else {
        Output::success("All sources configured. Qrium is ready to use.");
    }

    Ok(())
}

/// Check one credential, masking its value when present.
fn check_credential(name: &str, value: Option<&str>, hint: &str) -> CheckResult {
    match value {
        Some(value) if !value.is_empty() => {
            CheckResult::ok(name, &format!("configured ({})", mask(value)))
        }
        Some(_) => CheckResult::error(name, "empty", hint),
        None => CheckResult::error(name, "not set", hint),
    }
}

/// Mask a credential for display, keeping only short affixes.
fn mask(value: &str) -> String {
    if value.len() <= 8 {
        return "*".repeat(value.len());
    }
    format!("{}...{}", &value[..4], &value[value.len() - 4..])
}

/// Check if the config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult {
            name: "Config file".to_string(),
            status: CheckStatus::Warning,
            message: "using defaults".to_string(),
            hint: Some("Create at the path shown by: qrium doctor".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn missing_credential_is_an_error_with_hint() {
        let result = check_credential("key", None, "set it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("set it".to_string()));
    }

    #[test]
    fn masked_credential_never_shows_the_middle() {
        let masked = mask("sk-abcdefghijklmnop");
        assert!(masked.starts_with("sk-a"));
        assert!(masked.ends_with("mnop"));
        assert!(!masked.contains("bcdefghijkl"));
    }

    #[test]
    fn short_credentials_are_fully_masked() {
        assert_eq!(mask("abc"), "***");
    }
}
