use std::sync::{Arc, Mutex};

use relkit::errors::Result;
use relkit::exec::{CommandOutput, CommandRunner, CommandSpec};

#[derive(Debug, Clone)]
struct Scripted {
    args_prefix: Vec<String>,
    output: CommandOutput,
}

/// A fake command runner that:
/// - records every invocation
/// - answers with the first scripted response whose arguments are a prefix
///   of the invocation's arguments
/// - answers anything unscripted with a successful, empty output.
#[derive(Debug, Clone, Default)]
pub struct FakeCommandRunner {
    scripted: Arc<Mutex<Vec<Scripted>>>,
    invocations: Arc<Mutex<Vec<CommandSpec>>>,
}

impl FakeCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, args_prefix: &[&str], output: CommandOutput) -> &Self {
        self.scripted.lock().unwrap().push(Scripted {
            args_prefix: args_prefix.iter().map(|s| s.to_string()).collect(),
            output,
        });
        self
    }

    /// Scripted successful exit with the given stdout.
    pub fn succeed(&self, args_prefix: &[&str], stdout: &str) -> &Self {
        self.respond(
            args_prefix,
            CommandOutput {
                code: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        )
    }

    /// Scripted failing exit with the given exit code and stderr.
    pub fn fail(&self, args_prefix: &[&str], code: i32, stderr: &str) -> &Self {
        self.respond(
            args_prefix,
            CommandOutput {
                code: Some(code),
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        )
    }

    pub fn invocations(&self) -> Vec<CommandSpec> {
        self.invocations.lock().unwrap().clone()
    }

    /// Invocations rendered as `program arg arg ...`.
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations().iter().map(|s| s.to_string()).collect()
    }
}

impl CommandRunner for FakeCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.invocations.lock().unwrap().push(spec.clone());

        let scripted = self.scripted.lock().unwrap();
        let output = scripted
            .iter()
            .find(|s| spec.args.starts_with(&s.args_prefix))
            .map(|s| s.output.clone())
            .unwrap_or(CommandOutput {
                code: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            });
        Ok(output)
    }
}
