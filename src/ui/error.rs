use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use civetman::CivetmanError;

/// Human-readable error with a fix hint for the errors users can act on.
pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error(format!("Error: {}", err))
            .bold()
            .render(supports_color)
    );

    if let Some(hint) = err.downcast_ref::<CivetmanError>().and_then(fix_hint) {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            hint
        ));
    }
    out
}

fn fix_hint(err: &CivetmanError) -> Option<String> {
    match err {
        CivetmanError::RootNotFound { .. } => {
            Some("Run inside your project or pass --root <DIR>.".to_string())
        }
        CivetmanError::InvalidConfig { file, .. } => {
            Some(format!("Fix the TOML syntax in {}.", file.display()))
        }
        CivetmanError::Exclude(_) => {
            Some("Check the [discovery] exclude list in civetman.toml.".to_string())
        }
        _ => None,
    }
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let output = serde_json::json!({
            "event": "error",
            "message": err.to_string(),
        });
        println!("{}", output);
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    eprint!("{}", format_error(err, caps.supports_color, caps.supports_unicode));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn root_not_found_suggests_root_flag() {
        let err = anyhow::Error::new(CivetmanError::RootNotFound {
            path: PathBuf::from("/nope"),
        });
        let rendered = format_error(&err, false, false);
        assert_eq!(
            rendered,
            "[FAIL] Error: project root not found: /nope\n  [>] Run inside your project or pass --root <DIR>.\n"
        );
    }

    #[test]
    fn other_errors_have_no_hint() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(format_error(&err, false, false), "[FAIL] Error: boom\n");
    }
}
