use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use civetman::application::WatchEvent;
use civetman::config::ModeOverrides;
use civetman::presentation::{create_transpiler, create_watch_use_case};

use crate::ui::context::UiContext;
use crate::ui::views::watch::{render_watch_event, render_watch_header};

pub fn cmd_dev(root: &Path, overrides: ModeOverrides, ui: &UiContext) -> Result<()> {
    let (config, warnings) = super::load_config(root)?;
    let mode = config.build_mode(overrides);

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let emit = |event: WatchEvent| {
        if ui.json {
            println!("{}", event.to_json());
            return;
        }

        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        if let Some(line) = render_watch_event(&timestamp, &event, ui.verbose, ui.color, ui.unicode)
        {
            match event {
                WatchEvent::Error { .. }
                | WatchEvent::Warning { .. }
                | WatchEvent::FileFailed { .. } => eprint!("{line}"),
                _ => print!("{line}"),
            }
        }
    };

    if !ui.json {
        print!(
            "{}",
            render_watch_header(&root.display().to_string(), mode, ui.color, ui.unicode)
        );
    }
    for warning in warnings {
        emit(WatchEvent::Warning {
            message: warning.to_string(),
        });
    }

    let use_case = create_watch_use_case(root, mode, &config);
    use_case.start(create_transpiler(&config, root), running, emit)?;

    Ok(())
}
