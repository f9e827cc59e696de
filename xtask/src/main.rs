use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

/// System ROM sizes accepted by the emulator
const ROM_SIZES: [u64; 2] = [12 * 1024, 16 * 1024];

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for a2rx")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Quick checks before commit (fmt, clippy)
    Check {
        #[arg(long)]
        verbose: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Build the workspace
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test(TestArgs),
    /// Run criterion benchmarks
    Bench {
        /// Only benchmarks whose name contains this filter
        filter: Option<String>,
    },
    /// Headless boot smoke run of the emulator binary
    Boot {
        /// System ROM image
        #[arg(default_value = "apple2e.rom")]
        rom: String,
        /// Disk image for drive 1
        #[arg(long)]
        disk: Option<String>,
        /// Frames to run
        #[arg(short = 'n', long, default_value = "300")]
        frames: u64,
        #[arg(long)]
        release: bool,
    },
    /// Pre-commit hook (fmt, clippy, test)
    PreCommit,
    /// Install git hooks
    InstallHooks,
}

#[derive(Args, Clone, Default)]
struct TestArgs {
    /// Doc tests only
    #[arg(long)]
    doc: bool,
    /// Run ignored tests (real ROM boots)
    #[arg(long)]
    ignored: bool,
    /// CPU module unit tests
    #[arg(long)]
    cpu: bool,
    /// Memory module unit tests
    #[arg(long)]
    memory: bool,
    /// Disk II module unit tests
    #[arg(long)]
    disk: bool,
    /// Machine module unit tests
    #[arg(long)]
    machine: bool,
}

impl TestArgs {
    /// Selected (module path, display name) pairs; empty means everything
    fn selected_modules(&self) -> Vec<(&'static str, &'static str)> {
        [
            (self.cpu, "core::cpu", "CPU"),
            (self.memory, "core::memory", "Memory"),
            (self.disk, "core::disk", "Disk II"),
            (self.machine, "core::machine", "Machine"),
        ]
        .into_iter()
        .filter(|(enabled, _, _)| *enabled)
        .map(|(_, path, name)| (path, name))
        .collect()
    }
}

/// A named pipeline stage
type Step = (&'static str, fn() -> Result<()>);

const CHECK_STEPS: [Step; 2] = [("Format Check", fmt_check), ("Clippy", clippy_strict)];

const CI_STEPS: [Step; 4] = [
    ("Format Check", fmt_check),
    ("Clippy", clippy_strict),
    ("Build", debug_build),
    ("Test", test_all),
];

const PRE_COMMIT_STEPS: [Step; 3] = [
    ("Format Check", fmt_check),
    ("Clippy", clippy_strict),
    ("Test", test_all),
];

fn main() -> Result<()> {
    match Cli::parse().command {
        Commands::Ci { verbose } => run_pipeline("CI", &CI_STEPS, verbose),
        Commands::Check { verbose } => run_pipeline("Quick Checks", &CHECK_STEPS, verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test(args) => run_test(&args),
        Commands::Bench { filter } => run_bench(filter.as_deref()),
        Commands::Boot {
            rom,
            disk,
            frames,
            release,
        } => run_boot(&rom, disk.as_deref(), frames, release),
        Commands::PreCommit => run_pipeline("Pre-commit Checks", &PRE_COMMIT_STEPS, false),
        Commands::InstallHooks => install_hooks(),
    }
}

fn fmt_check() -> Result<()> {
    run_fmt(true)
}

fn clippy_strict() -> Result<()> {
    run_clippy(false)
}

fn debug_build() -> Result<()> {
    run_build(false)
}

fn test_all() -> Result<()> {
    run_test(&TestArgs::default())
}

/// Run steps in order, stopping at the first failure
fn run_pipeline(title: &str, steps: &[Step], verbose: bool) -> Result<()> {
    println!("{}", format!("=== {} ===", title).bold().blue());
    let start = Instant::now();

    for (name, step) in steps {
        print!("{} {} ... ", "→".blue(), name);
        let step_start = Instant::now();
        match step() {
            Ok(()) if verbose => println!(
                "{} ({:.2}s)",
                "✓".green().bold(),
                step_start.elapsed().as_secs_f64()
            ),
            Ok(()) => println!("{}", "✓".green().bold()),
            Err(e) => {
                println!("{}", "✗".red().bold());
                return Err(e.context(format!("{} failed", name)));
            }
        }
    }

    println!(
        "\n{} {}",
        format!("✓ {} passed in", title).green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

/// `cargo` invocation with `args`
fn cargo<I, S>(args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let mut cmd = Command::new("cargo");
    cmd.args(args);
    cmd
}

fn run_fmt(check: bool) -> Result<()> {
    let mut cmd = cargo(["fmt", "--all"]);
    if check {
        cmd.args(["--", "--check"]);
    }
    execute(&mut cmd)
}

fn run_clippy(fix: bool) -> Result<()> {
    let mut cmd = cargo(["clippy", "--workspace", "--all-targets"]);
    if fix {
        cmd.args(["--fix", "--allow-dirty"]);
    } else {
        cmd.args(["--", "-D", "warnings"]);
    }
    execute(&mut cmd)
}

fn run_build(release: bool) -> Result<()> {
    let mut cmd = cargo(["build", "--workspace"]);
    if release {
        cmd.arg("--release");
    }
    execute(&mut cmd)
}

fn run_test(args: &TestArgs) -> Result<()> {
    let ignored: &[&str] = if args.ignored {
        &["--", "--ignored"]
    } else {
        &[]
    };

    if args.doc {
        return execute(cargo(["test", "--doc"]).args(ignored));
    }

    let modules = args.selected_modules();
    if modules.is_empty() {
        return execute(cargo(["test"]).args(ignored));
    }

    let mut failed = Vec::new();
    for (path, name) in modules {
        println!("{} Running {} tests...", "→".blue(), name.bold());
        match execute(cargo(["test", "--lib", path]).args(ignored)) {
            Ok(()) => println!("{} {} tests passed\n", "✓".green(), name),
            Err(_) => {
                println!("{} {} tests failed\n", "✗".red(), name);
                failed.push(name);
            }
        }
    }

    if !failed.is_empty() {
        bail!("Module tests failed: {}", failed.join(", "));
    }
    Ok(())
}

fn run_bench(filter: Option<&str>) -> Result<()> {
    let mut cmd = cargo(["bench", "--bench", "cpu_bench"]);
    if let Some(filter) = filter {
        cmd.args(["--", filter]);
    }
    execute(&mut cmd)
}

fn run_boot(rom: &str, disk: Option<&str>, frames: u64, release: bool) -> Result<()> {
    println!("{}", "=== Boot Smoke Run ===".bold().blue());

    let size = std::fs::metadata(rom)
        .map(|metadata| metadata.len())
        .with_context(|| format!("ROM file not found: {}", rom))?;
    if !ROM_SIZES.contains(&size) {
        println!(
            "{} Invalid ROM size: {} bytes (expected 12288 or 16384)",
            "✗".red().bold(),
            size
        );
        bail!("Invalid ROM file size");
    }
    println!("{} ROM: {}", "✓".green(), rom.cyan());

    if let Some(disk) = disk {
        if !Path::new(disk).exists() {
            bail!("Disk image not found: {}", disk);
        }
        println!("{} Disk 1: {}", "✓".green(), disk.cyan());
    }
    println!(
        "{} {} frames, {} build\n",
        "→".blue(),
        frames.to_string().bold(),
        if release { "release".green() } else { "debug".yellow() }
    );

    let start = Instant::now();
    let mut cmd = cargo(["run", "--bin", "a2rx"]);
    if release {
        cmd.arg("--release");
    }
    cmd.args(["--", rom, "--unthrottled", "--frames", frames.to_string().as_str()]);
    if let Some(disk) = disk {
        cmd.args(["--disk1", disk]);
    }
    execute(&mut cmd).context("Boot smoke run failed")?;

    println!(
        "\n{} Boot smoke run completed in {}",
        "✓".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn install_hooks() -> Result<()> {
    const HOOK_PATH: &str = ".git/hooks/pre-commit";
    const HOOK: &str = "#!/bin/sh\n# Installed by cargo x install-hooks\nset -e\n\ncargo x pre-commit\n";

    if !Path::new(".git").is_dir() {
        bail!("Not at the root of a git checkout");
    }
    std::fs::write(HOOK_PATH, HOOK)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(HOOK_PATH, std::fs::Permissions::from_mode(0o755))?;
    }

    println!("{} Pre-commit hook installed (fmt, clippy, test)", "✓".green());
    Ok(())
}

fn execute(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .context("Failed to spawn cargo")?;

    if !status.success() {
        bail!("Command failed with exit code: {}", status);
    }
    Ok(())
}
