use std::collections::HashSet;
use std::path::PathBuf;

use clap::{crate_version, App, Arg, ArgMatches};
use env_logger::Env;
use log::{error, info};

use stitcher::config::{Config, Wrapper};
use stitcher::util::{Fallible, JoinExt};
use stitcher::{files, resolve, watch};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    std::process::exit(match run() {
        Ok(_) => 0,
        Err(err) => {
            error!("{}", err);
            1
        }
    });
}

fn run() -> Fallible {
    let app = App::new("Stitcher")
        .version(crate_version!())
        .about(
            "Include resolver for plain-text sources\n  \
               https://github.com/mlange-42/stitcher\n\
             \n\
             Scans sources for include(\"path\") directives and assembles\n\
             each input into a single output file.",
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("config_file")
                .help("Sets the config file name")
                .takes_value(true)
                .default_value("Stitcher.toml"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("out_dir")
                .help("Output assembled files to this directory. If none is specified, uses 'paths' -> 'out' from the config file, or stdout.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("separator")
                .short("s")
                .long("separator")
                .value_name("separator")
                .help("Separator between multiple files matched by one glob include. Default: newline.")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("raw")
                .long("raw")
                .help("Splices included files in verbatim, without scope wrapping.")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("watch")
                .short("w")
                .long("watch")
                .help("Watches all involved files and re-assembles on changes.")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("input")
                .help("The input source file(s) as glob pattern(s). If none are specified, uses 'paths' -> 'files' from the config file.")
                .value_name("input")
                .multiple(true)
                .index(1),
        );

    let matches = app.get_matches();

    if matches.is_present("watch") {
        watch::watch(|| run_once(&matches))
    } else {
        run_once(&matches).map(|_| ())
    }
}

fn run_once(matches: &ArgMatches) -> Fallible<HashSet<PathBuf>> {
    let config_path = matches.value_of("config").unwrap();
    let config = if matches.occurrences_of("config") == 0 && !PathBuf::from(config_path).exists() {
        Config::default()
    } else {
        Config::read(config_path)
            .map_err(|err| format!("Could not read config file \"{}\": {}", config_path, err))?
    };

    let mut settings = config.stitch.settings();
    if let Some(separator) = matches.value_of("separator") {
        settings.separator = separator.to_owned();
    }
    if matches.is_present("raw") {
        settings.wrap = Wrapper::Raw;
    }

    let out_dir = matches
        .value_of("output")
        .map(PathBuf::from)
        .or_else(|| config.paths.out.clone());

    let input_patterns: Vec<String> = matches
        .values_of("input")
        .map(|patterns| patterns.map(|pattern| pattern.to_owned()).collect())
        .or_else(|| config.paths.files.clone())
        .ok_or(
            "No inputs provided via arguments or toml file. For help, use:\n\
               > stitcher -h",
        )?;

    let mut any_input = false;
    let mut sources = HashSet::new();

    for pattern in &input_patterns {
        let paths = glob::glob(pattern)
            .map_err(|err| format!("Unable to process glob pattern \"{}\": {}", pattern, err))?;

        for path in paths {
            let input = path.map_err(|err| {
                format!("Unable to process glob pattern \"{}\": {}", pattern, err)
            })?;

            if input.is_file() {
                any_input = true;
                info!("Assembling file {}", input.display());

                let (text, read) =
                    resolve::assemble_tracked(&input, &settings).map_err(|err| {
                        format!(
                            "Failed to assemble source file \"{}\": {}",
                            input.display(),
                            err
                        )
                    })?;
                sources.extend(read);

                match &out_dir {
                    Some(dir) => {
                        let mut file_path = dir.clone();
                        file_path.push(&input);
                        files::write_assembled(&file_path, &text)?;
                    }
                    None => print!("{}", text),
                }
            }
        }
    }

    if !any_input {
        return Err(format!(
            "No input files found in patterns: {}\n\
                For help, use:\n\
                 > stitcher -h",
            input_patterns.iter().join(", ", '"')
        )
        .into());
    }

    let config_file = PathBuf::from(config_path);
    if config_file.exists() {
        sources.insert(config_file);
    }

    Ok(sources)
}
