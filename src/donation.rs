use crate::backend::Backend;
use crate::loader::fetch_donation_stats;
use crate::models::Donation;
use crate::page::{
    ACTIVE, AMOUNT_ATTR, DONATION_AMOUNT, DONATION_FORM, DONATION_MESSAGE, DONOR_EMAIL, DONOR_NAME,
    DONOR_NOTE, Page, show_message,
};
use std::time::Duration;
use tracing::{error, info};

pub const DONATION_MESSAGE_TTL: Duration = Duration::from_secs(5);
pub const CUSTOM_AMOUNT: &str = "custom";

const GENERIC_ERROR: &str = "An error occurred";
const DONATION_FAILED: &str = "Failed to process donation. Please try again.";

/// Amount button click: highlights `chosen` alone and fills the amount field.
/// Returns `false` when no button carries that amount.
pub fn select_amount<P: Page>(page: &mut P, chosen: &str) -> bool {
    let buttons = page.data_elements(AMOUNT_ATTR);
    if !buttons.iter().any(|button| button.value == chosen) {
        return false;
    }

    for button in &buttons {
        page.remove_class(&button.id, ACTIVE);
    }
    for button in buttons.iter().filter(|button| button.value == chosen) {
        page.add_class(&button.id, ACTIVE);
    }

    if chosen == CUSTOM_AMOUNT {
        page.set_value(DONATION_AMOUNT, "");
        page.focus(DONATION_AMOUNT);
    } else {
        page.set_value(DONATION_AMOUNT, chosen);
    }
    true
}

fn clear_amount_buttons<P: Page>(page: &mut P) {
    for button in page.data_elements(AMOUNT_ATTR) {
        page.remove_class(&button.id, ACTIVE);
    }
}

pub fn read_donation<P: Page>(page: &P) -> Option<Donation> {
    let amount = page.value(DONATION_AMOUNT).trim().parse::<f64>().ok()?;
    if !amount.is_finite() {
        return None;
    }
    Some(Donation {
        amount,
        name: page.value(DONOR_NAME),
        email: page.value(DONOR_EMAIL),
        message: page.value(DONOR_NOTE),
    })
}

pub async fn submit_donation<B: Backend, P: Page>(backend: &B, page: &mut P) {
    let Some(donation) = read_donation(page) else {
        show_message(page, DONATION_MESSAGE, GENERIC_ERROR, "error");
        page.hide_after(DONATION_MESSAGE, DONATION_MESSAGE_TTL);
        return;
    };

    let reply = match backend.donate(&donation).await {
        Ok(reply) => reply,
        Err(err) => {
            show_message(page, DONATION_MESSAGE, DONATION_FAILED, "error");
            error!("error processing donation: {err}");
            return;
        }
    };

    if reply.is_success() {
        show_message(page, DONATION_MESSAGE, reply.message(), "success");
        page.reset_form(DONATION_FORM);
        clear_amount_buttons(page);
        if let Some(id) = reply.body.donation_id {
            info!(donation_id = id, amount = donation.amount, "donation recorded");
        }
        fetch_donation_stats(backend, page).await;
    } else {
        show_message(page, DONATION_MESSAGE, reply.detail().unwrap_or(GENERIC_ERROR), "error");
    }
    page.hide_after(DONATION_MESSAGE, DONATION_MESSAGE_TTL);
}
