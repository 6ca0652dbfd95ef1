use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::build::mode_label;
use civetman::application::{BuildTrigger, WatchEvent};
use civetman::BuildMode;

pub fn render_watch_header(
    root: &str,
    mode: BuildMode,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "Civetman Dev");
    header.add("Root", root);
    header.add("Output", mode_label(mode));
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

/// One timestamped line per event; `None` for events hidden at this verbosity.
pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    verbose: u8,
    supports_color: bool,
    supports_unicode: bool,
) -> Option<String> {
    let prefix = ColoredText::dim(format!("[{}]", timestamp)).render(supports_color);
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);

    let line = match event {
        WatchEvent::WatchStarted { root, sources } => format!(
            "{} {} Watching {} ({} source file(s))\n",
            prefix,
            icon(Icon::Watch),
            root,
            sources
        ),
        WatchEvent::FileBuilt {
            source,
            output,
            trigger,
        } => {
            if *trigger == BuildTrigger::Initial && verbose == 0 {
                return None;
            }
            let verb = match trigger {
                BuildTrigger::Initial => "Built",
                BuildTrigger::Add => "Added",
                BuildTrigger::Change => "Rebuilt",
            };
            format!(
                "{} {} {}: {} {} {}\n",
                prefix,
                icon(Icon::Success),
                verb,
                source,
                ColoredText::dim("->").render(supports_color),
                output
            )
        }
        WatchEvent::FileFailed { source, message, .. } => format!(
            "{} {} {}\n  {}\n",
            prefix,
            icon(Icon::Error),
            ColoredText::error(source.as_str()).render(supports_color),
            message
        ),
        WatchEvent::FileRemoved { source, output } => format!(
            "{} {} Removed: {} ({} deleted)\n",
            prefix,
            icon(Icon::Trash),
            source,
            output
        ),
        WatchEvent::InitialBuildComplete { built, failed } => {
            let (status, summary) = if *failed > 0 {
                (
                    Icon::Warning,
                    format!("Initial build: {} built, {} failed", built, failed),
                )
            } else {
                (Icon::Success, format!("Initial build: {} built", built))
            };
            format!("{} {} {}\n", prefix, icon(status), summary)
        }
        WatchEvent::SideFileSynced { file, entries } => {
            if verbose == 0 {
                return None;
            }
            format!(
                "{} {} Synced {} ({} entries)\n",
                prefix,
                icon(Icon::Sync),
                file,
                entries
            )
        }
        WatchEvent::Warning { message } => {
            format!("{} {} {}\n", prefix, icon(Icon::Warning), message)
        }
        WatchEvent::Error { message } => {
            format!("{} {} Error: {}\n", prefix, icon(Icon::Error), message)
        }
        WatchEvent::Shutdown => format!("\n{} {} Watch stopped.\n", prefix, icon(Icon::Watch)),
    };
    Some(line)
}
