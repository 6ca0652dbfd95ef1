//! Translate raw `notify` events into source events
//!
//! Backends disagree on how they report renames and saves. Everything is
//! reduced to add / change / unlink on root-relative paths here, before the
//! session sees it. A directory that appears is expanded into one add per
//! source inside it, since a moved-in tree reports no events for its files.

use std::path::{Path, PathBuf};

use notify::event::{EventKind, ModifyKind, RenameMode};
use notify::Event;

use crate::application::discovery::discover_sources_under;
use crate::domain::value_objects::{relative_to, ExcludePatterns};

use super::event::{SourceEvent, SourceEventKind};

/// Normalize one watcher event.
///
/// Paths outside `root`, the root itself and excluded paths are dropped.
/// Renames become an unlink of the old name and an add of the new one. An
/// unlink may name a directory; the session resolves it against what it
/// tracks.
pub fn normalize_event(event: &Event, root: &Path, excludes: &ExcludePatterns) -> Vec<SourceEvent> {
    let paths = &event.paths;
    let raw: Vec<(SourceEventKind, &PathBuf)> = match &event.kind {
        EventKind::Create(_) => tag(paths, SourceEventKind::Add),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
            tag(paths, SourceEventKind::Unlink)
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => tag(paths, SourceEventKind::Add),
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            let mut out = Vec::with_capacity(paths.len());
            if let Some((from, to)) = paths.split_first() {
                out.push((SourceEventKind::Unlink, from));
                out.extend(to.iter().map(|p| (SourceEventKind::Add, p)));
            }
            out
        }
        EventKind::Modify(ModifyKind::Name(_)) | EventKind::Any => by_existence(paths),
        EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        EventKind::Modify(_) => tag(paths, SourceEventKind::Change),
        EventKind::Remove(_) => tag(paths, SourceEventKind::Unlink),
        EventKind::Access(_) | EventKind::Other => Vec::new(),
    };

    let mut out = Vec::with_capacity(raw.len());
    for (kind, path) in raw {
        let Some(rel) = relative_to(root, path) else {
            continue;
        };
        let is_dir = kind == SourceEventKind::Add && path.is_dir();
        if rel.as_os_str().is_empty() || excludes.is_excluded(&rel, is_dir) {
            continue;
        }
        if is_dir {
            // Unreadable trees yield nothing; their files are retried on change.
            let found = discover_sources_under(root, path, excludes).unwrap_or_default();
            out.extend(found.into_iter().map(SourceEvent::add));
        } else {
            out.push(SourceEvent { kind, path: rel });
        }
    }
    out
}

fn tag(paths: &[PathBuf], kind: SourceEventKind) -> Vec<(SourceEventKind, &PathBuf)> {
    paths.iter().map(|p| (kind, p)).collect()
}

/// Ambiguous rename: the file is either the new name or the old one.
fn by_existence(paths: &[PathBuf]) -> Vec<(SourceEventKind, &PathBuf)> {
    paths
        .iter()
        .map(|p| {
            let kind = if p.exists() {
                SourceEventKind::Add
            } else {
                SourceEventKind::Unlink
            };
            (kind, p)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind, RemoveKind};
    use std::fs;
    use tempfile::tempdir;

    fn root() -> PathBuf {
        PathBuf::from("/project")
    }

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        paths
            .iter()
            .fold(Event::new(kind), |e, p| e.add_path(root().join(p)))
    }

    fn normalize(event: &Event) -> Vec<SourceEvent> {
        normalize_event(event, &root(), &ExcludePatterns::defaults(&root()))
    }

    #[test]
    fn create_modify_remove_map_to_add_change_unlink() {
        assert_eq!(
            normalize(&event(EventKind::Create(CreateKind::File), &["a.civet"])),
            vec![SourceEvent::add("a.civet")]
        );
        assert_eq!(
            normalize(&event(
                EventKind::Modify(ModifyKind::Data(DataChange::Content)),
                &["src/a.civet"]
            )),
            vec![SourceEvent::change("src/a.civet")]
        );
        assert_eq!(
            normalize(&event(EventKind::Remove(RemoveKind::File), &["a.civet"])),
            vec![SourceEvent::unlink("a.civet")]
        );
    }

    #[test]
    fn rename_both_splits_into_unlink_and_add() {
        let events = normalize(&event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            &["old.civet", "new.civet"],
        ));
        assert_eq!(
            events,
            vec![SourceEvent::unlink("old.civet"), SourceEvent::add("new.civet")]
        );
    }

    #[test]
    fn rename_halves_map_by_direction() {
        assert_eq!(
            normalize(&event(
                EventKind::Modify(ModifyKind::Name(RenameMode::From)),
                &["a.civet"]
            )),
            vec![SourceEvent::unlink("a.civet")]
        );
        assert_eq!(
            normalize(&event(
                EventKind::Modify(ModifyKind::Name(RenameMode::To)),
                &["a.civet"]
            )),
            vec![SourceEvent::add("a.civet")]
        );
    }

    #[test]
    fn ambiguous_rename_checks_the_disk() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("here.civet"), "").unwrap();
        let event = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Any)))
            .add_path(dir.path().join("here.civet"))
            .add_path(dir.path().join("gone.civet"));

        let events = normalize_event(&event, dir.path(), &ExcludePatterns::empty());

        assert_eq!(
            events,
            vec![SourceEvent::add("here.civet"), SourceEvent::unlink("gone.civet")]
        );
    }

    #[test]
    fn directory_moved_in_expands_to_its_sources() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pkg/lib")).unwrap();
        fs::write(dir.path().join("pkg/a.civet"), "").unwrap();
        fs::write(dir.path().join("pkg/lib/b.civet"), "").unwrap();
        fs::write(dir.path().join("pkg/readme.md"), "").unwrap();
        let excludes = ExcludePatterns::defaults(dir.path());

        for kind in [
            EventKind::Create(CreateKind::Folder),
            EventKind::Modify(ModifyKind::Name(RenameMode::To)),
        ] {
            let event = Event::new(kind).add_path(dir.path().join("pkg"));
            assert_eq!(
                normalize_event(&event, dir.path(), &excludes),
                vec![SourceEvent::add("pkg/a.civet"), SourceEvent::add("pkg/lib/b.civet")]
            );
        }
    }

    #[test]
    fn directory_rename_unlinks_old_prefix_and_adds_new_sources() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("renamed")).unwrap();
        fs::write(dir.path().join("renamed/a.civet"), "").unwrap();
        let event = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path(dir.path().join("pkg"))
            .add_path(dir.path().join("renamed"));

        let events = normalize_event(&event, dir.path(), &ExcludePatterns::empty());

        assert_eq!(
            events,
            vec![SourceEvent::unlink("pkg"), SourceEvent::add("renamed/a.civet")]
        );
    }

    #[test]
    fn excluded_directory_is_not_walked() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("node_modules/pkg")).unwrap();
        fs::write(dir.path().join("node_modules/pkg/a.civet"), "").unwrap();
        let event = Event::new(EventKind::Create(CreateKind::Folder))
            .add_path(dir.path().join("node_modules"));

        let events = normalize_event(&event, dir.path(), &ExcludePatterns::defaults(dir.path()));

        assert!(events.is_empty());
    }

    #[test]
    fn metadata_and_access_are_dropped() {
        assert!(normalize(&event(
            EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)),
            &["a.civet"]
        ))
        .is_empty());
        assert!(normalize(&event(EventKind::Access(AccessKind::Read), &["a.civet"])).is_empty());
    }

    #[test]
    fn excluded_and_foreign_paths_are_dropped() {
        assert!(normalize(&event(
            EventKind::Create(CreateKind::File),
            &["node_modules/pkg/a.civet"]
        ))
        .is_empty());

        let outside = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/elsewhere/a.civet"));
        assert!(normalize(&outside).is_empty());
    }
}
