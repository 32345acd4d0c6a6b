use serde_json::json;

use crate::config;
use crate::error::{ErrorCode, TudooError};
use crate::gateway::AuthGateway;
use crate::output;
use crate::store::Notification;

pub fn run_signup(email: &str, password: &str, json_output: bool) -> i32 {
    let mut notes = Vec::new();
    let result = signup(email, password, json_output, &mut notes);
    super::finish(result, &notes, json_output)
}

fn signup(
    email: &str,
    password: &str,
    json_output: bool,
    notes: &mut Vec<Notification>,
) -> Result<i32, TudooError> {
    let gateway = super::open_gateway()?;
    let user = gateway.sign_up(email, password).map_err(|e| {
        notes.push(Notification::error(e.message.clone()));
        e
    })?;
    notes.push(Notification::success("Account created! You can now sign in."));
    super::emit_success(
        json_output,
        json!({ "user": output::json::user_json(&user) }),
        notes,
        || println!("Signed up as {} ({})", user.email, user.id),
    );
    Ok(0)
}

pub fn run_login(email: &str, password: &str, json_output: bool) -> i32 {
    let mut notes = Vec::new();
    let result = login(email, password, json_output, &mut notes);
    super::finish(result, &notes, json_output)
}

fn login(
    email: &str,
    password: &str,
    json_output: bool,
    notes: &mut Vec<Notification>,
) -> Result<i32, TudooError> {
    let gateway = super::open_gateway()?;
    let user = gateway.sign_in_with_password(email, password).map_err(|e| {
        tracing::warn!(error = %e, "sign-in rejected");
        notes.push(Notification::error(e.message.clone()));
        e
    })?;
    let mut cfg = config::load();
    cfg.set_user(Some(&user));
    config::save(&cfg)?;
    notes.push(Notification::success("Logged in successfully!"));
    super::emit_success(
        json_output,
        json!({ "user": output::json::user_json(&user) }),
        notes,
        || println!("Signed in as {}", user.email),
    );
    Ok(0)
}

pub fn run_logout(json_output: bool) -> i32 {
    let mut notes = Vec::new();
    let result = logout(json_output, &mut notes);
    super::finish(result, &notes, json_output)
}

fn logout(json_output: bool, notes: &mut Vec<Notification>) -> Result<i32, TudooError> {
    let mut cfg = config::load();
    let session = cfg.session();
    // The stored session is cleared even when storage cannot be opened.
    let signed_out = match super::open_gateway() {
        Ok(gateway) => gateway.sign_out(&session),
        Err(e) if e.code == ErrorCode::NotInitialized => {
            tracing::warn!(error = %e, "no database; clearing stored session only");
            Ok(())
        }
        Err(e) => Err(e),
    };
    let outcome = signed_out.and_then(|()| {
        cfg.set_user(None);
        config::save(&cfg)
    });
    if let Err(e) = outcome {
        tracing::warn!(error = %e, "Failed to logout");
        notes.push(Notification::error("Failed to logout"));
        return Err(e);
    }
    notes.push(Notification::success("Logged out successfully"));
    super::emit_success(json_output, json!({ "signed_out": true }), notes, || {});
    Ok(0)
}
