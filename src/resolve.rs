//! Recursive resolution and assembly of include directives.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::Settings;
use crate::files;
use crate::parse::{self, Segment};
use crate::paths;
use crate::util::Fallible;

/// Dedup and cycle tracking for one top-level assembly run.
#[derive(Default)]
struct RunState {
    /// Files whose content is already part of the output.
    included: HashSet<PathBuf>,
    /// Files on the active recursion stack.
    pending: HashSet<PathBuf>,
}

/// Assembles the file at `path`, recursively splicing include directives.
///
/// Dedup and cycle state lives only for the duration of this call: a file
/// is spliced in at most once per run, self-inclusion and longer cycles
/// resolve to empty content, and repeated calls with the same settings are
/// fully independent of each other.
pub fn assemble<P: AsRef<Path>>(path: P, settings: &Settings) -> Fallible<String> {
    let mut state = RunState::default();
    assemble_file(&paths::cleaned(path.as_ref()), settings, &mut state)
}

/// Like [`assemble`], also reporting every file that went into the output.
pub fn assemble_tracked<P: AsRef<Path>>(
    path: P,
    settings: &Settings,
) -> Fallible<(String, HashSet<PathBuf>)> {
    let mut state = RunState::default();
    let text = assemble_file(&paths::cleaned(path.as_ref()), settings, &mut state)?;

    Ok((text, state.included))
}

fn assemble_file(path: &Path, settings: &Settings, state: &mut RunState) -> Fallible<String> {
    // mark pending before the read, so cycles are caught however the file
    // arrives at itself
    state.pending.insert(path.to_owned());
    let result = expand(path, settings, state);
    state.pending.remove(path);
    state.included.insert(path.to_owned());

    result
}

fn expand(path: &Path, settings: &Settings, state: &mut RunState) -> Fallible<String> {
    let source = files::read_file_string(path)?;
    let mut output = String::new();

    for segment in parse::split(&source) {
        match segment {
            Segment::Literal(text) => output.push_str(&text),
            Segment::Include(directive) => {
                let from_glob = paths::is_pattern(&directive.target);
                let targets = paths::resolve(path, &directive.target)?;

                let mut units = vec![];
                for target in targets {
                    if state.included.contains(&target) || state.pending.contains(&target) {
                        debug!("Skipping {} (already included)", target.display());
                        continue;
                    }

                    let content = assemble_file(&target, settings, state)?;
                    let content = interpolate(&content, settings);
                    let unit = if from_glob && !settings.wrap_globs {
                        content
                    } else {
                        settings.wrap.apply(&content, &target)
                    };
                    units.push(unit);
                }

                output.push_str(&units.join(&settings.separator));
            }
        }
    }

    Ok(output)
}

fn interpolate(content: &str, settings: &Settings) -> String {
    let mut result = content.to_owned();
    for (name, value) in &settings.interpolate {
        result = result.replace(&format!("{{{{{}}}}}", name), value);
    }

    result
}
