//! Common test utilities for logsplice integration tests

pub use logsplice::{Config, Engine, ErrorPolicy, Evaluator, ResolutionContext};
use std::fs;
use std::path::Path;

/// A plain model-checker run
pub const DICE_LOG: &str = "\
Building model...
Computing reachable states...
States:      13 (1 initial)
Transitions: 20

Value iteration (max) took 28 iters and 0.002 seconds.

Time for model checking: 12.3 seconds.
";

/// A multi-objective run
pub const MULTI_LOG: &str = "\
States:      5121 (1 initial)
Number of objectives: 2
Number of LP variables = 10342
LP problem solved in 0.48 seconds (setup 0.12, lpsolve 0.36)
The value iteration(s) took 1.725 seconds altogether.
Number of weight vectors used: 6
Time for model checking: 2.9 seconds.
";

/// Write `name` with `content` into `dir`
pub fn write_log(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// Expand `document` with the given candidate directories
#[allow(dead_code)]
pub fn expand(document: &str, dirs: &[&Path], policy: ErrorPolicy) -> Result<String, String> {
    let mut ctx = ResolutionContext::new(dirs.iter().map(|d| d.to_path_buf()).collect());
    let config = Config {
        policy,
        ..Config::default()
    };
    Engine::new(Evaluator::default(), config)
        .expand(document, &mut ctx)
        .map(|expansion| expansion.output)
        .map_err(|e| e.to_string())
}
