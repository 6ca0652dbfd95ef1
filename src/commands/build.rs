use std::path::Path;

use anyhow::Result;
use civetman::application::BuildEvent;
use civetman::config::ModeOverrides;
use civetman::presentation::create_build_use_case;

use crate::ui::context::UiContext;
use crate::ui::views::build::{render_build_event, render_build_header};

pub fn cmd_build(root: &Path, overrides: ModeOverrides, ui: &UiContext) -> Result<()> {
    let (config, warnings) = super::load_config(root)?;
    let mode = config.build_mode(overrides);

    let emit = |event: BuildEvent| {
        if ui.json {
            println!("{}", event.to_json());
        } else if let Some(line) = render_build_event(&event, ui.verbose, ui.color, ui.unicode) {
            match event {
                BuildEvent::FileFailed { .. } | BuildEvent::Warning { .. } => eprint!("{line}"),
                _ => print!("{line}"),
            }
        }
    };

    if !ui.json {
        print!(
            "{}",
            render_build_header(&root.display().to_string(), mode, ui.color, ui.unicode)
        );
    }
    for warning in warnings {
        emit(BuildEvent::Warning {
            message: warning.to_string(),
        });
    }

    let use_case = create_build_use_case(root, mode, &config);
    use_case.execute(emit)?;

    // Per-file failures are reported above; they do not fail the command.
    Ok(())
}
