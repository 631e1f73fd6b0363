//! Command implementations. Each returns the text to print and whether the
//! command succeeded, leaving I/O and exit codes to `main`.

use anyhow::{Context, Result, anyhow};
use rihla_core::auth::{
    AccessRequirement, ControlMode, PageDecision, Reconciliation, control_guard, page_guard,
};
use rihla_core::domain::User;

use crate::context::ClientContext;

pub struct Outcome {
    pub output: String,
    pub success: bool,
}

impl Outcome {
    fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: true,
        }
    }

    fn denied(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: false,
        }
    }
}

pub async fn login(ctx: &ClientContext, token: &str) -> Result<Outcome> {
    match ctx.store.login(token).await {
        Ok(()) => {
            let name = ctx
                .store
                .snapshot()
                .user
                .map(|u| u.display_name())
                .unwrap_or_default();
            Ok(Outcome::ok(format!("Signed in as {name}")))
        }
        Err(e) if e.is_rejected() => Err(anyhow!(
            "The identity service refused this token ({e}); sign in again with a new one"
        )),
        Err(e) => Err(anyhow::Error::new(e)
            .context("Token stored, but the session could not be loaded; retry with `rihla whoami`")),
    }
}

pub async fn logout(ctx: &ClientContext) -> Result<Outcome> {
    ctx.store.logout().await;
    Ok(Outcome::ok("Signed out"))
}

pub async fn whoami(ctx: &ClientContext, json: bool) -> Result<Outcome> {
    ctx.store.initialize().await;
    let state = ctx.store.snapshot();

    let user = match (&state.user, &state.token) {
        (Some(user), Some(_)) => user,
        (None, Some(_)) => {
            return Ok(Outcome::denied(
                "A token is stored but the session could not be loaded",
            ));
        }
        _ => return Ok(Outcome::denied("Not signed in")),
    };

    if json {
        let body = serde_json::to_string_pretty(user).context("Failed to encode user")?;
        return Ok(Outcome::ok(body));
    }

    Ok(Outcome::ok(describe(user)))
}

fn describe(user: &User) -> String {
    let roles: Vec<&str> = user
        .roles
        .iter()
        .filter(|r| r.is_held())
        .map(|r| r.name())
        .collect();

    let mut lines = vec![
        format!("{} <{}>", user.display_name(), user.email),
        format!("id:          {}", user.id),
        format!("roles:       {}", list_or_none(&roles)),
    ];
    if user.is_super_admin() {
        lines.push("permissions: all (super_admin)".to_string());
    } else {
        let permissions: Vec<&str> = user.permissions.iter().map(String::as_str).collect();
        lines.push(format!("permissions: {}", list_or_none(&permissions)));
    }
    lines.join("\n")
}

fn list_or_none(items: &[&str]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

pub struct CheckArgs {
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    pub all: bool,
    pub path: Option<String>,
    pub mode: ControlMode,
}

/// Evaluates a page guard when a path is given, a control guard otherwise,
/// and prints the decision as JSON.
pub async fn check(ctx: &ClientContext, args: CheckArgs) -> Result<Outcome> {
    ctx.store.initialize().await;
    let state = ctx.store.snapshot();

    let requirement = AccessRequirement {
        required_roles: args.roles,
        required_permissions: args.permissions,
        require_all: args.all,
        redirect_to: None,
    };

    let (output, allowed) = match args.path {
        Some(path) => {
            let decision = page_guard(&state, &requirement, &path, &ctx.routes);
            let allowed = decision == PageDecision::Allow;
            (serde_json::to_string(&decision)?, allowed)
        }
        None => {
            let control = control_guard(&state, &requirement, args.mode, None);
            (serde_json::to_string(&control)?, control.is_enabled())
        }
    };

    Ok(Outcome {
        output,
        success: allowed,
    })
}

pub async fn reconcile(ctx: &ClientContext) -> Result<Outcome> {
    let outcome = ctx
        .store
        .tokens()
        .reconcile(&*ctx.refresher)
        .await
        .context("Failed to repair the auth cookie")?;

    Ok(match outcome {
        Reconciliation::NoToken => Outcome::ok("No stored token, nothing to reconcile"),
        Reconciliation::InSync => Outcome::ok("Cookie already in sync"),
        Reconciliation::Repaired { refreshed: true } => {
            Outcome::ok("Cookie restored from storage and portal refreshed")
        }
        Reconciliation::Repaired { refreshed: false } => {
            Outcome::denied("Cookie restored from storage, but the portal refresh failed")
        }
    })
}
