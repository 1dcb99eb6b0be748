//! Command-line interface for raise.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{self, CheckArguments};
use crate::detect::Runner;
use crate::remote::{self, GitCloner, GitHubHost, RemoteRepo, RepoCloner, TemplateHost};
use crate::report;
use crate::template::{self, Template};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Checks compliance with the RAISE code template.
///
/// Without a subcommand, raise checks the repository at PATH: code style,
/// required files and directories, and required README sections.
#[derive(Parser, Debug)]
#[command(name = "raise")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub check: CheckArgs,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a repository against the template (default)
    Check(CheckArgs),
    /// Initializes a new repo from a template
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Root directory
    pub path: Option<PathBuf>,

    /// Maximum line length for the code style checks [default: 120]
    #[arg(long = "max_line_length", visible_alias = "max-line-length")]
    pub max_line_length: Option<usize>,

    /// Exit non-zero when any check finds issues
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the init command.
#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Selects the template to use [default: dl4se]
    #[arg(short, long)]
    pub template: Option<String>,

    /// Skip forking and clone the upstream template directly (no token needed)
    #[arg(long)]
    pub no_fork: bool,

    /// GitHub access token used to fork the template
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory to clone into
    #[arg(long, default_value = ".")]
    pub dest: PathBuf,
}

/// What the user asked for, with the flags they passed explicitly.
#[derive(Debug, Clone)]
pub enum Invocation {
    Check(CheckArgs),
    Init(InitArgs),
}

impl Cli {
    pub fn invocation(self) -> Invocation {
        match self.command {
            Some(Commands::Check(args)) => Invocation::Check(args),
            Some(Commands::Init(args)) => Invocation::Init(args),
            None => Invocation::Check(self.check),
        }
    }
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<i32> {
    let invocation = cli.invocation();
    let cwd = std::env::current_dir().context("resolving current directory")?;
    let args = resolve_arguments(&invocation, &cwd)?;
    tracing::debug!(
        template = %args.template,
        no_fork = args.no_fork,
        max_line_length = args.max_line_length,
        "resolved arguments"
    );

    match invocation {
        Invocation::Check(check) => run_check(&args, check.strict),
        Invocation::Init(init) => run_init(&args, &init.dest),
    }
}

/// Build the final settings: defaults, then the command line, then the
/// override file in `config_dir`. File values replace command-line values.
pub fn resolve_arguments(
    invocation: &Invocation,
    config_dir: &Path,
) -> anyhow::Result<CheckArguments> {
    let args = apply_flags(CheckArguments::default(), invocation);

    let Some(overrides) = config::load_overrides(config_dir)? else {
        return Ok(args);
    };

    let merged = config::merge(&args, &overrides);
    for error in &merged.errors {
        tracing::warn!(%error, "ignoring override");
        report::write_config_error(error);
    }
    Ok(merged.args)
}

/// Overlay the flags passed on the command line.
pub fn apply_flags(mut args: CheckArguments, invocation: &Invocation) -> CheckArguments {
    match invocation {
        Invocation::Check(check) => {
            args.path = check.path.clone();
            if let Some(length) = check.max_line_length {
                args.max_line_length = length;
            }
        }
        Invocation::Init(init) => {
            args.init_mode = true;
            if let Some(template) = &init.template {
                args.template = template.clone();
            }
            if init.no_fork {
                args.no_fork = true;
            }
            if let Some(token) = &init.token {
                args.token = Some(token.clone());
            }
        }
    }
    args
}

/// Run the check flow.
pub fn run_check(args: &CheckArguments, strict: bool) -> anyhow::Result<i32> {
    let Some(path) = &args.path else {
        eprintln!("Error: a root directory is required");
        eprintln!("Usage: raise <PATH>");
        return Ok(EXIT_ERROR);
    };

    if !path.is_dir() {
        eprintln!("Error: cannot access directory {:?}", path);
        return Ok(EXIT_ERROR);
    }

    let runner = Runner::new(path).max_line_length(args.max_line_length);
    let summary = runner.run(&Template::standard(), report::write_phase)?;
    report::write_summary(&summary);

    if strict && !summary.passed() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the init flow: fork the template (unless suppressed) and clone it.
pub fn run_init(args: &CheckArguments, dest: &Path) -> anyhow::Result<i32> {
    let cloner = GitCloner::default();

    if args.no_fork {
        init_from_template(args, dest, None, &cloner)?;
        return Ok(EXIT_SUCCESS);
    }

    let token = match args.token.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => remote::prompt_token()?,
    };
    if token.is_empty() {
        eprintln!("Error: an access token is required to fork the template");
        return Ok(EXIT_ERROR);
    }

    let host = GitHubHost::new(token)?;
    init_from_template(args, dest, Some(&host), &cloner)?;
    Ok(EXIT_SUCCESS)
}

/// Fork (when a host is given) and clone the template repository.
pub fn init_from_template(
    args: &CheckArguments,
    dest: &Path,
    host: Option<&dyn TemplateHost>,
    cloner: &dyn RepoCloner,
) -> anyhow::Result<RemoteRepo> {
    let upstream = template::upstream_repo(&args.template);

    let repo = match host {
        Some(host) => {
            report::write_info(&format!("Forking {}", upstream));
            let fork = host
                .fork(&upstream)
                .with_context(|| format!("forking {}", upstream))?;
            report::write_success(&format!("Forked to {}", fork.html_url));
            fork
        }
        None => RemoteRepo::github(&upstream),
    };

    report::write_info(&format!("Cloning {} into {}", repo.full_name, dest.display()));
    cloner
        .clone_repo(&repo.clone_url, dest)
        .with_context(|| format!("cloning {}", repo.clone_url))?;
    report::write_success(&format!("Cloned {}", repo.full_name));

    Ok(repo)
}
