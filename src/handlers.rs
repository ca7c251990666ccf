use crate::animator::SettledClock;
use crate::donation::{select_amount, submit_donation};
use crate::errors::AppError;
use crate::loader::page_load;
use crate::models::{DonationForm, PageQuery, SignupForm, UnregisterForm};
use crate::page::{
    ACTIVITY_SELECT, DONATION_AMOUNT, DONOR_EMAIL, DONOR_NAME, DONOR_NOTE, Document, Page,
    SIGNUP_EMAIL,
};
use crate::signup::{self, submit_signup, unregister_prompt};
use crate::state::AppState;
use crate::ui::{ConfirmDialog, render_index};
use axum::{
    Form,
    extract::{Query, State},
    response::Html,
};

/// Every request starts from a freshly loaded page, like a browser tab being opened.
async fn opened_page(state: &AppState) -> Document {
    let mut page = Document::new();
    page_load(&state.backend, &mut page, &mut SettledClock).await;
    page
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let mut page = opened_page(&state).await;
    if let Some(amount) = query.amount.as_deref() {
        if !select_amount(&mut page, amount) {
            return Err(AppError::bad_request(format!("unknown donation amount {amount:?}")));
        }
    }
    Ok(Html(render_index(&page, None)))
}

pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Html<String> {
    let mut page = opened_page(&state).await;
    page.set_value(ACTIVITY_SELECT, &form.activity);
    page.set_value(SIGNUP_EMAIL, &form.email);

    submit_signup(&state.backend, &mut page, &mut SettledClock).await;
    Html(render_index(&page, None))
}

pub async fn unregister(
    State(state): State<AppState>,
    Form(form): Form<UnregisterForm>,
) -> Html<String> {
    let mut page = opened_page(&state).await;
    page.answer_confirm(form.confirmed.as_deref() == Some("yes"));

    let went_ahead = signup::unregister(
        &state.backend,
        &mut page,
        &mut SettledClock,
        &form.activity,
        &form.email,
    )
    .await;

    let prompt = unregister_prompt(&form.activity, &form.email);
    let dialog = (!went_ahead).then_some(ConfirmDialog {
        prompt: &prompt,
        activity: &form.activity,
        email: &form.email,
    });
    Html(render_index(&page, dialog))
}

pub async fn donate(State(state): State<AppState>, Form(form): Form<DonationForm>) -> Html<String> {
    let mut page = opened_page(&state).await;
    page.set_value(DONATION_AMOUNT, &form.amount);
    page.set_value(DONOR_NAME, &form.name);
    page.set_value(DONOR_EMAIL, &form.email);
    page.set_value(DONOR_NOTE, &form.message);

    submit_donation(&state.backend, &mut page).await;
    Html(render_index(&page, None))
}

pub async fn healthz() -> &'static str {
    "ok"
}
