use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use civetman::application::BuildEvent;
use civetman::BuildMode;

pub fn render_build_header(
    root: &str,
    mode: BuildMode,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Build, "Civetman Build");
    header.add("Root", root);
    header.add("Output", mode_label(mode));
    header.render(supports_color, supports_unicode)
}

/// Describe the output extension and which side files are maintained
pub fn mode_label(mode: BuildMode) -> String {
    let mut synced = Vec::new();
    if mode.syncs_git() {
        synced.push(".gitignore");
    }
    if mode.syncs_vscode() {
        synced.push(".vscode/settings.json");
    }
    if synced.is_empty() {
        format!("{} (side files off)", mode.ext())
    } else {
        format!("{} (syncing {})", mode.ext(), synced.join(", "))
    }
}

/// One line per event; `None` for events hidden at this verbosity.
pub fn render_build_event(
    event: &BuildEvent,
    verbose: u8,
    supports_color: bool,
    supports_unicode: bool,
) -> Option<String> {
    let line = match event {
        BuildEvent::BuildStarted { sources, .. } => {
            if verbose == 0 {
                return None;
            }
            format!(
                "{} Found {} source file(s)\n",
                Icon::Arrow.colored(supports_color, supports_unicode),
                sources
            )
        }
        BuildEvent::FileBuilt { source, output } => format!(
            "{} {} {} {}\n",
            Icon::Success.colored(supports_color, supports_unicode),
            source,
            ColoredText::dim("->").render(supports_color),
            output
        ),
        BuildEvent::FileFailed { source, message, .. } => format!(
            "{} {}\n  {}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error(source.as_str()).render(supports_color),
            message
        ),
        BuildEvent::SideFileSynced { file, entries } => {
            if verbose == 0 {
                return None;
            }
            format!(
                "{} {} ({} entries)\n",
                Icon::Sync.colored(supports_color, supports_unicode),
                file,
                entries
            )
        }
        BuildEvent::Warning { message } => format!(
            "{} {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            message
        ),
        BuildEvent::BuildComplete { built, failed } => {
            if *failed > 0 {
                format!(
                    "\n{} {}\n",
                    Icon::Warning.colored(supports_color, supports_unicode),
                    ColoredText::warning(format!("Built {} file(s), {} failed", built, failed))
                        .bold()
                        .render(supports_color)
                )
            } else {
                format!(
                    "\n{} {}\n",
                    Icon::Success.colored(supports_color, supports_unicode),
                    ColoredText::success(format!("Built {} file(s)", built))
                        .bold()
                        .render(supports_color)
                )
            }
        }
    };
    Some(line)
}
