//! Config objects, to be read from Stitcher.toml

use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::from_str;

use crate::util::Fallible;

/// Top-level config
#[derive(Deserialize, Debug, Default)]
pub struct Config {
    /// Config for paths
    #[serde(default)]
    pub paths: Paths,
    /// Config for the assembly step
    #[serde(default)]
    pub stitch: Stitch,
}

impl Config {
    /// Reads the config from a TOML file.
    pub fn read<P: AsRef<Path>>(path: P) -> Fallible<Self> {
        let buf = read_to_string(path)?;
        let val = from_str::<Self>(&buf)?;

        val.check()?;

        Ok(val)
    }

    /// Check the validity of the configuration
    fn check(&self) -> Fallible {
        for name in self.stitch.interpolate.keys() {
            if name.trim().is_empty() {
                return Err("Interpolation names must not be empty".into());
            }
        }

        Ok(())
    }
}

/// Config for paths
#[derive(Deserialize, Debug, Default, Clone)]
pub struct Paths {
    /// The input source file(s) as glob pattern(s).
    pub files: Option<Vec<String>>,
    /// Output directory for assembled files.
    pub out: Option<PathBuf>,
}

/// Config for the assembly step
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Stitch {
    /// Wrapping applied to included units. Default: `scope`.
    pub wrap: WrapMode,
    /// Also wrap units assembled from glob matches. Default: false.
    pub wrap_globs: bool,
    /// Separator between multiple units resolved from one glob directive.
    /// Default: a single newline.
    pub separator: String,
    /// Token replacements applied to included content: each `{{name}}`
    /// becomes the mapped value.
    pub interpolate: BTreeMap<String, String>,
}

impl Default for Stitch {
    fn default() -> Self {
        Stitch {
            wrap: WrapMode::Scope,
            wrap_globs: false,
            separator: "\n".to_owned(),
            interpolate: BTreeMap::new(),
        }
    }
}

impl Stitch {
    /// Converts the file-level options into per-run [`Settings`].
    pub fn settings(&self) -> Settings {
        Settings {
            wrap: match self.wrap {
                WrapMode::Scope => Wrapper::Scope,
                WrapMode::Raw => Wrapper::Raw,
            },
            wrap_globs: self.wrap_globs,
            separator: self.separator.clone(),
            interpolate: self.interpolate.clone(),
        }
    }
}

/// Named wrap modes available in the config file.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Isolate each included unit in its own scope.
    Scope,
    /// Splice included units in verbatim.
    Raw,
}

/// Settings for one assembly run, immutable for its duration.
pub struct Settings {
    /// Wrapping applied to each included unit.
    pub wrap: Wrapper,
    /// Also wrap units assembled from glob matches.
    pub wrap_globs: bool,
    /// Separator between multiple units resolved from one glob directive.
    pub separator: String,
    /// Token replacements applied to included content.
    pub interpolate: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Stitch::default().settings()
    }
}

/// Strategy for wrapping an included unit's content.
pub enum Wrapper {
    /// Isolate the unit in its own scope (default).
    Scope,
    /// Splice the unit in verbatim.
    Raw,
    /// User-supplied transform of content and source path.
    Custom(Box<dyn Fn(&str, &Path) -> String>),
}

impl Wrapper {
    /// Applies the wrapping to one unit's fully resolved content.
    pub fn apply(&self, content: &str, path: &Path) -> String {
        match self {
            Wrapper::Scope => format!("(function () {{\n{}\n}}).call(this);\n", content),
            Wrapper::Raw => content.to_owned(),
            Wrapper::Custom(wrap) => wrap(content, path),
        }
    }
}
