use clap::{App, Arg, ArgMatches, SubCommand};
use colored::Colorize;
use std::path::PathBuf;

use scaffold::{
    cmd::{self, new::NewOptions},
    config::LoadedConfig,
    error::Error,
    registry::Registry,
    resolve::Source,
    userpath,
    verbosity::Verbosity,
    VERSION,
};

const EXAMPLES: &str = "EXAMPLES:
    scaffold project.yaml                  Use a custom YAML template
    scaffold --template react-app          Use a built-in template
    scaffold --template go-api my-api      Use a built-in template with a custom name
    scaffold --list-templates              List all available templates
    scaffold --dry-run project.yaml        Preview what would be created";

/// Gets the default directory for scaffold's configuration files,
/// namely `(default config directory)/scaffold`, where the default
/// configuration directory is given by the `dirs` crate.
fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scaffold"))
}

fn build_cli() -> App<'static, 'static> {
    App::new("scaffold")
        .version(VERSION)
        .about("Create folder structures from YAML templates.")
        .after_help(EXAMPLES)
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity")
                .global(true),
        )
        .arg(
            Arg::with_name(cmd::CONFIG_ARG)
                .long("config-dir")
                .hidden(true)
                .takes_value(true)
                .env("SCAFFOLD_CONFIG"),
        )
        .arg(
            Arg::with_name(cmd::SOURCE_ARG)
                .index(1)
                .help("The template file to use")
                .long_help(
                    "The YAML template file to use. When a built-in template \
                    is selected with --template, this is the name of the new \
                    project instead.",
                ),
        )
        .arg(
            Arg::with_name(cmd::TEMPLATE_ARG)
                .short("t")
                .long("template")
                .takes_value(true)
                .value_name("KEY")
                .help("Use a built-in template (see --list-templates)"),
        )
        .arg(
            Arg::with_name(cmd::NAME_ARG)
                .short("n")
                .long("name")
                .takes_value(true)
                .help("The name for the new project")
                .long_help(
                    "The name for the new project, replacing the name given \
                    by the template. This will be the name of the created folder.",
                ),
        )
        .arg(
            Arg::with_name(cmd::LOCATION_ARG)
                .short("o")
                .long("location")
                .takes_value(true)
                .value_name("DIR")
                .help("Where to create the new project")
                .long_help(
                    "Where to create the new project. Defaults to the current \
                    directory. This argument specifies the *parent* directory \
                    to the project, as a new folder will be created for the project.",
                ),
        )
        .arg(
            Arg::with_name(cmd::DRY_RUN_ARG)
                .short("d")
                .long("dry-run")
                .help("Show what would be created without actually creating files"),
        )
        .arg(
            Arg::with_name(cmd::LIST_TEMPLATES_ARG)
                .short("l")
                .long("list-templates")
                .help("List all available templates"),
        )
        .arg(
            Arg::with_name(cmd::INIT_GIT_ARG)
                .short("g")
                .long("init-git")
                .help("Initialize a git repository in the new project"),
        )
        .arg(
            Arg::with_name(cmd::SKIP_VALIDATION_ARG)
                .short("s")
                .long("skip-validation")
                .help("Do not check the template for errors before creating it"),
        )
        .subcommand(
            SubCommand::with_name(cmd::version::CMD_STR)
                .about("Print the version number of scaffold"),
        )
}

fn load_config(matches: &ArgMatches) -> Result<LoadedConfig, Error> {
    let dir = match matches.value_of(cmd::CONFIG_ARG) {
        Some(dir) => Some(userpath::expand(dir).map_err(Error::UserPath)?),
        None => default_config_dir(),
    };
    match dir {
        Some(dir) => Ok(LoadedConfig::load_config(dir)?),
        None => {
            tracing::warn!("no configuration directory for this OS; using defaults");
            Ok(LoadedConfig::default())
        }
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    if matches.subcommand_matches(cmd::version::CMD_STR).is_some() {
        cmd::version::version();
        return Ok(());
    }

    let config = load_config(matches)?;
    let mut registry = Registry::builtin();
    config.scan_templates(&mut registry)?;

    if matches.is_present(cmd::LIST_TEMPLATES_ARG) {
        cmd::list::list(&registry);
        return Ok(());
    }

    let source_arg = matches.value_of(cmd::SOURCE_ARG);
    let name_arg = matches.value_of(cmd::NAME_ARG);
    let (source, name) = match (matches.value_of(cmd::TEMPLATE_ARG), source_arg) {
        (Some(key), project_name) => (
            Source::Registered(key.to_string()),
            name_arg.or(project_name),
        ),
        (None, Some(path)) => (
            Source::File(userpath::expand(path).map_err(Error::UserPath)?),
            name_arg,
        ),
        (None, None) => {
            build_cli().print_help().ok();
            println!();
            return Ok(());
        }
    };

    let location = match matches.value_of(cmd::LOCATION_ARG) {
        Some(dir) => userpath::to_user_dir(dir).map_err(Error::Location)?.path_buf,
        None => std::env::current_dir().map_err(Error::CurrentDir)?,
    };

    cmd::new::new(
        &config,
        &registry,
        &NewOptions {
            source,
            name: name.map(str::to_string),
            location,
            dry_run: matches.is_present(cmd::DRY_RUN_ARG),
            init_git: matches.is_present(cmd::INIT_GIT_ARG),
            skip_validation: matches.is_present(cmd::SKIP_VALIDATION_ARG),
        },
    )
}

fn main() {
    let matches = build_cli().get_matches();
    Verbosity::from(matches.occurrences_of("v")).init_logging();

    if let Err(err) = run(&matches) {
        eprintln!("{} {}", "error:".red().bold(), err);
        std::process::exit(err.exit_code());
    }
}
