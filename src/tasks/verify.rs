// src/tasks/verify.rs

use std::fmt::Debug;

use tracing::info;

use crate::context::BuildContext;
use crate::errors::{Result, VerificationFailure};
use crate::registry::TaskAction;

/// A stateless pass/fail probe run before a release.
pub trait Verification: Send + Sync + Debug {
    fn name(&self) -> &'static str;
    fn check(&self, ctx: &BuildContext) -> std::result::Result<(), VerificationFailure>;
}

fn run_verification(check: &dyn Verification, ctx: &BuildContext) -> Result<()> {
    check.check(ctx)?;
    info!(check = check.name(), "verification passed");
    Ok(())
}

/// Fails when the working tree has uncommitted changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyVersionControl;

impl Verification for VerifyVersionControl {
    fn name(&self) -> &'static str {
        "verifyVersionControl"
    }

    fn check(&self, ctx: &BuildContext) -> std::result::Result<(), VerificationFailure> {
        let status = ctx.git().status_porcelain().map_err(|e| {
            VerificationFailure::new(self.name(), format!("could not query version control: {e}"))
        })?;

        let changed: Vec<&str> = status.lines().filter(|l| !l.trim().is_empty()).collect();
        if changed.is_empty() {
            return Ok(());
        }

        Err(VerificationFailure::new(
            self.name(),
            format!(
                "working tree has {} uncommitted change(s): {}",
                changed.len(),
                changed.join(", ")
            ),
        ))
    }
}

impl TaskAction for VerifyVersionControl {
    fn execute(&self, ctx: &BuildContext) -> Result<()> {
        run_verification(self, ctx)
    }
}

/// Fails unless the build-server marker variable is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyBuildServer;

impl Verification for VerifyBuildServer {
    fn name(&self) -> &'static str {
        "verifyBuildServer"
    }

    fn check(&self, ctx: &BuildContext) -> std::result::Result<(), VerificationFailure> {
        let marker = &ctx.config().config.build_server_env;
        match ctx.env_var(marker) {
            Some(value) if !value.trim().is_empty() => Ok(()),
            _ => Err(VerificationFailure::new(
                self.name(),
                format!("not running on a build server (${marker} is not set)"),
            )),
        }
    }
}

impl TaskAction for VerifyBuildServer {
    fn execute(&self, ctx: &BuildContext) -> Result<()> {
        run_verification(self, ctx)
    }
}

/// Fails when a build-config constant points at a staging endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyNoStageUrl;

impl Verification for VerifyNoStageUrl {
    fn name(&self) -> &'static str {
        "verifyNoStageUrl"
    }

    fn check(&self, ctx: &BuildContext) -> std::result::Result<(), VerificationFailure> {
        let marker = &ctx.config().config.stage_url_marker;
        let offending: Vec<&str> = ctx
            .config()
            .build_config
            .iter()
            .filter(|(_, value)| value.contains(marker.as_str()))
            .map(|(name, _)| name.as_str())
            .collect();

        if offending.is_empty() {
            Ok(())
        } else {
            Err(VerificationFailure::new(
                self.name(),
                format!(
                    "build config constant(s) {} contain '{marker}'",
                    offending.join(", ")
                ),
            ))
        }
    }
}

impl TaskAction for VerifyNoStageUrl {
    fn execute(&self, ctx: &BuildContext) -> Result<()> {
        run_verification(self, ctx)
    }
}
