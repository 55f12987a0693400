//! Boundary to the code-execution sandbox

use crate::domain::Challenge;

/// Which code of a challenge to hand to the sandbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeVariant {
    Starter,
    Solution,
}

/// Opaque code runner. Results and failures stay inside the runner.
pub trait CodeRunner {
    fn run(&mut self, code: &str, test_code: Option<&str>);
}

/// Send the chosen code of `challenge`, with its test code, to `runner`
pub fn run_challenge(runner: &mut dyn CodeRunner, challenge: &Challenge, variant: CodeVariant) {
    let code = match variant {
        CodeVariant::Starter => &challenge.starter_code,
        CodeVariant::Solution => &challenge.solution_code,
    };
    tracing::debug!("Running {:?} code of challenge {}", variant, challenge.id);
    runner.run(code, challenge.test_code.as_deref());
}
