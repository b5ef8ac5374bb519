//! CLI entrypoint driving guardalloc fatal-path scenarios.
//!
//! Runs one scenario in this process and is expected to die doing it. A
//! clean exit means the fatal path did not fire; the binary reports that
//! with a `survived` record and a distinctive exit code.

use clap::Parser;

use guardalloc_harness::record::FixtureRecord;
use guardalloc_harness::scenario::Scenario;

/// Exit code for a scenario that failed to abort.
const EXIT_SURVIVED: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "guardalloc-fixture")]
#[command(about = "Runs one guardalloc fatal-path scenario in this process")]
struct Cli {
    /// Scenario to execute.
    #[arg(value_enum)]
    scenario: Scenario,
}

fn main() {
    let cli = Cli::parse();
    FixtureRecord::enter(cli.scenario).emit();
    cli.scenario.run();
    // Only reachable if the scenario failed to abort.
    FixtureRecord::survived(cli.scenario).emit();
    std::process::exit(EXIT_SURVIVED);
}
