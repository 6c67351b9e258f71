use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing_subscriber::EnvFilter;
use vader::{
    check,
    codegen::Generator,
    config::VaderConfig,
    detect,
    diagnostics,
    language::program::Program,
    runtime::{
        host::{Host, ScriptedHost, StdHost},
        Interpreter, RunOptions,
    },
    target::{self, Platform},
};

const LOG_ENV: &str = "VADER_LOG";

#[derive(Parser, Debug)]
#[command(name = "vader", version, about = "Run or transpile Vader (.vdr) programs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interpret a program line by line
    Run {
        file: PathBuf,
        /// Log every skipped or unrecognized line
        #[arg(long)]
        debug: bool,
    },
    /// Generate code for a target platform
    Build {
        file: PathBuf,
        /// Target platform id (see `vader platforms`)
        #[arg(long, short)]
        platform: Option<String>,
        /// Directory for the generated file
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Print the artifact instead of writing it
        #[arg(long)]
        stdout: bool,
    },
    /// Print the detected context and language
    Detect {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Report unterminated blocks without running anything
    Check {
        file: PathBuf,
        #[arg(long)]
        watch: bool,
    },
    /// List the platform ids `build` accepts
    Platforms,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run { file, debug } => {
            let config = load_config(&file)?;
            init_tracing(debug || config.run.debug);
            run(&file, config.run.options())
        }
        Commands::Build {
            file,
            platform,
            out,
            stdout,
        } => {
            let config = load_config(&file)?;
            init_tracing(false);
            build(&file, &config, platform, out, stdout)
        }
        Commands::Detect { file, json } => {
            init_tracing(false);
            let program = Program::load(&file).map_err(diagnostics::load_report)?;
            let result = detect::detect(program.source());
            if json {
                let rendered = serde_json::to_string(&result).into_diagnostic()?;
                println!("{rendered}");
            } else {
                println!("context: {}", result.context);
                println!("language: {}", result.language);
            }
            Ok(())
        }
        Commands::Check { file, watch } => {
            init_tracing(false);
            check::run_check(&file, watch).map_err(|err| miette::miette!("{err}"))
        }
        Commands::Platforms => {
            for platform in Platform::ALL {
                println!("{:<14}.{}", platform.id(), platform.extension());
            }
            Ok(())
        }
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = if debug {
        EnvFilter::new(default)
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(file: &Path) -> miette::Result<VaderConfig> {
    VaderConfig::discover(file).map_err(diagnostics::config_report)
}

fn run(file: &Path, options: RunOptions) -> miette::Result<()> {
    let program = Program::load(file).map_err(diagnostics::load_report)?;
    match ScriptedHost::from_env() {
        Some(host) => run_with(host.echoing(), &program, options),
        None => run_with(StdHost, &program, options),
    }
}

fn run_with<H: Host>(host: H, program: &Program, options: RunOptions) -> miette::Result<()> {
    let mut interpreter = Interpreter::new(host).with_options(options);
    match interpreter.run(program) {
        Ok(transcript) => {
            tracing::debug!(lines = transcript.len(), "run finished");
            Ok(())
        }
        Err(err) => Err(diagnostics::runtime_report(program, err)),
    }
}

fn build(
    file: &Path,
    config: &VaderConfig,
    platform_flag: Option<String>,
    out: Option<PathBuf>,
    to_stdout: bool,
) -> miette::Result<()> {
    let program = Program::load(file).map_err(diagnostics::load_report)?;
    let detected = detect::detect(program.source());
    tracing::info!(context = %detected.context, language = %detected.language, "detected");

    let platform = target::requested_platform(platform_flag, config.build.platform.as_deref())
        .unwrap_or_else(|| Platform::for_context(detected.context).id().to_string());

    let generator = Generator::with_builtin_emitters();
    let artifact = generator.generate(
        program.source(),
        &platform,
        detected.context,
        detected.language,
    );

    if to_stdout {
        print!("{}", artifact.text);
        return Ok(());
    }

    let out_dir = out
        .or_else(|| config.build.out_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&out_dir).into_diagnostic()?;
    let stem = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("app");
    let target = out_dir.join(artifact.file_name(stem));
    fs::write(&target, &artifact.text).into_diagnostic()?;
    tracing::info!(platform = %artifact.platform, path = %target.display(), "artifact written");
    println!("{}", target.display());
    Ok(())
}
