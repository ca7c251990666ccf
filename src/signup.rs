use crate::animator::FrameClock;
use crate::backend::Backend;
use crate::loader::load_activities;
use crate::page::{ACTIVITY_SELECT, MESSAGE, Page, SIGNUP_EMAIL, SIGNUP_FORM, show_message};
use std::time::Duration;
use tracing::{error, info};

pub const SIGNUP_MESSAGE_TTL: Duration = Duration::from_secs(5);
pub const UNREGISTER_MESSAGE_TTL: Duration = Duration::from_secs(3);

const GENERIC_ERROR: &str = "An error occurred";
const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
const UNREGISTER_REJECTED: &str = "Failed to unregister";
const UNREGISTER_FAILED: &str = "Failed to unregister. Please try again.";

/// Registers the email typed into the signup form for the selected activity.
pub async fn submit_signup<B, P, C>(backend: &B, page: &mut P, clock: &mut C)
where
    B: Backend,
    P: Page,
    C: FrameClock,
{
    let email = page.value(SIGNUP_EMAIL);
    let activity = page.value(ACTIVITY_SELECT);

    let reply = match backend.signup(&activity, &email).await {
        Ok(reply) => reply,
        Err(err) => {
            show_message(page, MESSAGE, SIGNUP_FAILED, "error");
            error!("error signing up: {err}");
            return;
        }
    };

    if reply.is_success() {
        load_activities(backend, page, clock).await;
        show_message(page, MESSAGE, reply.message(), "success");
        page.reset_form(SIGNUP_FORM);
        info!(%activity, %email, "signed up");
    } else {
        show_message(page, MESSAGE, reply.detail().unwrap_or(GENERIC_ERROR), "error");
    }
    page.hide_after(MESSAGE, SIGNUP_MESSAGE_TTL);
}

pub fn unregister_prompt(activity: &str, email: &str) -> String {
    format!("Are you sure you want to unregister {email} from {activity}?")
}

/// Delete control on a participant row. Returns whether the user went ahead.
pub async fn unregister<B, P, C>(
    backend: &B,
    page: &mut P,
    clock: &mut C,
    activity: &str,
    email: &str,
) -> bool
where
    B: Backend,
    P: Page,
    C: FrameClock,
{
    if !page.confirm(&unregister_prompt(activity, email)) {
        return false;
    }

    match backend.unregister(activity, email).await {
        Ok(reply) if reply.is_success() => {
            load_activities(backend, page, clock).await;
            show_message(page, MESSAGE, reply.message(), "success");
            page.hide_after(MESSAGE, UNREGISTER_MESSAGE_TTL);
            info!(%activity, %email, "unregistered");
        }
        Ok(reply) => {
            show_message(page, MESSAGE, reply.detail().unwrap_or(UNREGISTER_REJECTED), "error");
        }
        Err(err) => {
            show_message(page, MESSAGE, UNREGISTER_FAILED, "error");
            error!("error unregistering: {err}");
        }
    }
    true
}
