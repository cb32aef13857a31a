// SPDX-License-Identifier: MIT OR Apache-2.0
//! `javelin` — assemble and launch a JVM command line.
#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use javelin_flags::{AssertionStatus, SizeArg, VerboseComponent, VmArch, VmMode};
use javelin_process::{LaunchError, LaunchedProcess};
use javelin_spec::{Invocation, LaunchSpec};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "javelin", version, about = "Assemble and launch a JVM command line")]
struct Cli {
    /// Launch from a packaged jar.
    #[arg(long, conflicts_with_all = ["main_class", "class_path", "inherit_class_path"])]
    jar: Option<PathBuf>,

    /// Launch this main class from a classpath.
    #[arg(long)]
    main_class: Option<String>,

    /// Classpath entry. Can be repeated; order is preserved.
    #[arg(long = "class-path")]
    class_path: Vec<String>,

    /// Seed the classpath from the host instead of starting clean.
    #[arg(long, conflicts_with = "class_path")]
    inherit_class_path: bool,

    /// Root of the runtime installation to launch with.
    #[arg(long)]
    runtime_home: Option<PathBuf>,

    /// VM mode to select.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Required data-model architecture.
    #[arg(long = "require-arch", value_enum)]
    require_arch: Option<ArchArg>,

    /// Required runtime version.
    #[arg(long = "version-req")]
    version_req: Option<String>,

    /// Enable program assertions.
    #[arg(long, conflicts_with = "disable_assertions")]
    enable_assertions: bool,

    /// Disable program assertions.
    #[arg(long)]
    disable_assertions: bool,

    /// Assertion scope (class or package name). Can be repeated.
    #[arg(long = "assert-scope")]
    assert_scope: Vec<String>,

    /// Enable system assertions.
    #[arg(long, conflicts_with = "disable_system_assertions")]
    enable_system_assertions: bool,

    /// Disable system assertions.
    #[arg(long)]
    disable_system_assertions: bool,

    /// Unqualified verbose output.
    #[arg(long, conflicts_with = "verbose_component")]
    verbose: bool,

    /// Verbose component. Can be repeated; order is preserved.
    #[arg(long = "verbose-component", value_enum)]
    verbose_component: Vec<ComponentArg>,

    /// Extra jvm argument, passed verbatim. Can be repeated.
    #[arg(long = "jvm-arg")]
    jvm_arg: Vec<String>,

    /// Seed jvm arguments from the host instead of starting clean.
    #[arg(long, conflicts_with = "jvm_arg")]
    inherit_jvm_args: bool,

    /// System property as key=value. Can be repeated.
    #[arg(long = "property")]
    property: Vec<String>,

    /// Environment variable as key=value. Can be repeated. When given,
    /// the child environment is exactly these variables.
    #[arg(long = "env")]
    env: Vec<String>,

    /// Maximum heap, e.g. 256m.
    #[arg(long = "max-heap")]
    max_heap: Option<String>,

    /// Initial heap, e.g. 64m.
    #[arg(long = "initial-heap")]
    initial_heap: Option<String>,

    /// Thread stack size, e.g. 512k.
    #[arg(long = "stack-size")]
    stack_size: Option<String>,

    /// Working directory for the child.
    #[arg(long)]
    workdir: Option<PathBuf>,

    /// Print the assembled command line instead of launching.
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,

    /// Program arguments, after `--`.
    #[arg(last = true)]
    program_args: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Client,
    Server,
}

impl From<ModeArg> for VmMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Client => VmMode::Client,
            ModeArg::Server => VmMode::Server,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ArchArg {
    #[value(name = "32")]
    Bits32,
    #[value(name = "64")]
    Bits64,
}

impl From<ArchArg> for VmArch {
    fn from(arg: ArchArg) -> Self {
        match arg {
            ArchArg::Bits32 => VmArch::Bits32,
            ArchArg::Bits64 => VmArch::Bits64,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ComponentArg {
    Class,
    Gc,
    Jni,
}

impl From<ComponentArg> for VerboseComponent {
    fn from(arg: ComponentArg) -> Self {
        match arg {
            ComponentArg::Class => VerboseComponent::Class,
            ComponentArg::Gc => VerboseComponent::Gc,
            ComponentArg::Jni => VerboseComponent::Jni,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let invocation = assemble(&cli)?;

    if cli.dry_run {
        for token in invocation.command_line() {
            println!("{token}");
        }
        return Ok(());
    }

    let mut process = LaunchedProcess::spawn(&invocation).context("spawning the runtime")?;
    let stdout = process.take_stdout();
    let pump = tokio::spawn(async move {
        match stdout {
            Some(mut stdout) => tokio::io::copy(&mut stdout, &mut tokio::io::stdout())
                .await
                .map(|_| ())
                .map_err(LaunchError::Stdout),
            None => Ok(()),
        }
    });
    let status = process.wait().await.context("waiting for the runtime")?;
    pump.await
        .context("joining the stdout pump")?
        .context("forwarding runtime stdout")?;
    std::process::exit(status.code().unwrap_or(1));
}

fn assemble(cli: &Cli) -> Result<Invocation> {
    let mut spec = LaunchSpec::new();

    if let Some(home) = &cli.runtime_home {
        spec = spec.runtime_home(home)?;
    }
    if let Some(mode) = cli.mode {
        spec = spec.mode(mode.into())?;
    }
    if let Some(arch) = cli.require_arch {
        spec = spec.require_architecture(arch.into())?;
    }
    if let Some(version) = &cli.version_req {
        spec = spec.require_version(version)?;
    }

    if cli.enable_assertions || cli.disable_assertions {
        let status = if cli.enable_assertions {
            AssertionStatus::Enabled
        } else {
            AssertionStatus::Disabled
        };
        spec = spec.set_assertions(status, cli.assert_scope.iter().cloned())?;
    } else if !cli.assert_scope.is_empty() {
        bail!("--assert-scope requires --enable-assertions or --disable-assertions");
    }

    if cli.enable_system_assertions {
        spec = spec.enable_system_assertions()?;
    } else if cli.disable_system_assertions {
        spec = spec.disable_system_assertions()?;
    }

    if cli.verbose {
        spec = spec.verbose(&[])?;
    } else if !cli.verbose_component.is_empty() {
        let components: Vec<VerboseComponent> =
            cli.verbose_component.iter().map(|c| (*c).into()).collect();
        spec = spec.verbose(&components)?;
    }

    if cli.inherit_jvm_args {
        spec = spec.inherit_jvm_arguments().finish();
    } else if !cli.jvm_arg.is_empty() {
        spec = spec.set_jvm_arguments(cli.jvm_arg.iter().cloned())?;
    }

    if !cli.property.is_empty() {
        spec = spec.set_properties(parse_pairs(&cli.property, "--property")?)?;
    }
    if !cli.env.is_empty() {
        spec = spec.set_environment(parse_pairs(&cli.env, "--env")?)?;
    }

    if let Some(size) = &cli.max_heap {
        let size: SizeArg = size.parse().context("parsing --max-heap")?;
        spec = spec.max_heap(size.magnitude(), size.unit())?;
    }
    if let Some(size) = &cli.initial_heap {
        let size: SizeArg = size.parse().context("parsing --initial-heap")?;
        spec = spec.initial_heap(size.magnitude(), size.unit())?;
    }
    if let Some(size) = &cli.stack_size {
        let size: SizeArg = size.parse().context("parsing --stack-size")?;
        spec = spec.stack_size(size.magnitude(), size.unit())?;
    }

    if let Some(dir) = &cli.workdir {
        spec = spec.working_directory(dir)?;
    }

    if !cli.program_args.is_empty() {
        spec = spec.set_program_arguments(cli.program_args.iter().cloned())?;
    }

    if let Some(jar) = &cli.jar {
        spec = spec.jar(jar)?;
    } else if let Some(main_class) = &cli.main_class {
        if cli.inherit_class_path {
            spec = spec.inherit_class_path()?.finish();
        } else if !cli.class_path.is_empty() {
            spec = spec.set_class_path(cli.class_path.iter().cloned())?;
        }
        spec = spec.main_class(main_class)?;
    } else {
        bail!("one of --jar or --main-class is required");
    }

    let descriptor = spec.build().context("finalizing the launch spec")?;
    Ok(descriptor.invocation(&[]))
}

fn parse_pairs(pairs: &[String], flag: &str) -> Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("{flag} expects key=value, got {pair:?}");
        };
        if key.is_empty() {
            bail!("{flag} expects a non-empty key in {pair:?}");
        }
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}
