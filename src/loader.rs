use crate::animator::{FrameClock, animate_counters};
use crate::backend::Backend;
use crate::calendar::week_columns;
use crate::models::ActivityCatalog;
use crate::page::{
    ACTIVITIES_LIST, ACTIVITY_SELECT, AVAILABLE_SPOTS, CALENDAR, DONOR_COUNT, Page, TOTAL_DONATIONS,
    TOTAL_STUDENTS,
};
use crate::ui;
use tracing::error;

pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";

/// Fetches every activity and rebuilds the cards, the signup options, the
/// calendar and the enrollment counters.
pub async fn load_activities<B, P, C>(backend: &B, page: &mut P, clock: &mut C)
where
    B: Backend,
    P: Page,
    C: FrameClock,
{
    let catalog = match backend.activities().await {
        Ok(catalog) => catalog,
        Err(err) => {
            page.set_html(ACTIVITIES_LIST, format!("<p>{LOAD_FAILED}</p>"));
            error!("error fetching activities: {err}");
            return;
        }
    };

    page.set_html(ACTIVITIES_LIST, ui::activity_cards(&catalog));

    page.clear_options(ACTIVITY_SELECT);
    for name in catalog.names() {
        page.append_option(ACTIVITY_SELECT, name);
    }

    render_calendar(page, &catalog);
    update_statistics(page, clock, &catalog).await;
}

pub fn render_calendar<P: Page>(page: &mut P, catalog: &ActivityCatalog) {
    page.set_html(CALENDAR, ui::calendar_grid(&week_columns(catalog)));
}

pub async fn update_statistics<P, C>(page: &mut P, clock: &mut C, catalog: &ActivityCatalog)
where
    P: Page,
    C: FrameClock,
{
    let totals = catalog.totals();
    animate_counters(
        page,
        clock,
        &[
            (TOTAL_STUDENTS, totals.enrolled),
            (AVAILABLE_SPOTS, totals.available()),
        ],
    )
    .await;
}

/// Shows the latest donation totals; failures are only logged.
pub async fn fetch_donation_stats<B: Backend, P: Page>(backend: &B, page: &mut P) {
    match backend.donation_stats().await {
        Ok(stats) => {
            page.set_text(TOTAL_DONATIONS, stats.total_label());
            page.set_text(DONOR_COUNT, stats.donor_count.to_string());
        }
        Err(err) => error!("error fetching donation stats: {err}"),
    }
}

/// What happens when the page is first opened.
pub async fn page_load<B, P, C>(backend: &B, page: &mut P, clock: &mut C)
where
    B: Backend,
    P: Page,
    C: FrameClock,
{
    load_activities(backend, page, clock).await;
    fetch_donation_stats(backend, page).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::SettledClock;
    use crate::page::Document;
    use crate::test_support::MemoryBackend;

    #[tokio::test]
    async fn chess_club_example() {
        let backend =
            MemoryBackend::default().activity("Chess Club", "Mondays 3-4pm", 10, &["a@x.com"]);
        let mut doc = Document::new();
        load_activities(&backend, &mut doc, &mut SettledClock).await;

        let cards = doc.html(ACTIVITIES_LIST);
        assert!(cards.contains("9 spots left"));
        assert!(cards.contains("a@x.com"));

        let calendar = doc.html(CALENDAR);
        let tuesday = calendar.find("Tuesday").unwrap();
        assert!(calendar.find("Chess Club").unwrap() < tuesday);
        assert_eq!(calendar[tuesday..].matches("No activities scheduled").count(), 4);

        assert_eq!(doc.get(ACTIVITY_SELECT).unwrap().options, vec!["Chess Club"]);
        assert_eq!(doc.text(TOTAL_STUDENTS), "1");
        assert_eq!(doc.text(AVAILABLE_SPOTS), "9");
    }

    #[tokio::test]
    async fn counters_add_up_over_the_catalog() {
        let backend = MemoryBackend::default()
            .activity(
                "Basketball Team",
                "Tuesdays and Thursdays",
                15,
                &["james@x.edu", "lucas@x.edu"],
            )
            .activity("Swimming Club", "Wednesdays and Fridays", 20, &["ava@x.edu"])
            .activity("Art Studio", "Mondays", 15, &[]);
        let mut doc = Document::new();
        load_activities(&backend, &mut doc, &mut SettledClock).await;

        let rendered_spots: i64 = doc
            .html(ACTIVITIES_LIST)
            .split("<strong>Availability:</strong> ")
            .skip(1)
            .map(|rest| rest.split(' ').next().unwrap().parse::<i64>().unwrap())
            .sum();
        assert_eq!(rendered_spots, 50 - 3);
        assert_eq!(doc.text(AVAILABLE_SPOTS), "47");
        assert_eq!(doc.text(TOTAL_STUDENTS), "3");
    }

    #[tokio::test]
    async fn reload_replaces_options_instead_of_appending() {
        let backend = MemoryBackend::default()
            .activity("Chess Club", "Fridays", 12, &[])
            .activity("Drama Club", "Thursdays", 25, &[]);
        let mut doc = Document::new();
        load_activities(&backend, &mut doc, &mut SettledClock).await;
        load_activities(&backend, &mut doc, &mut SettledClock).await;
        assert_eq!(
            doc.get(ACTIVITY_SELECT).unwrap().options,
            vec!["Chess Club", "Drama Club"]
        );
    }

    #[tokio::test]
    async fn failure_shows_static_message() {
        let backend = MemoryBackend::offline();
        let mut doc = Document::new();
        load_activities(&backend, &mut doc, &mut SettledClock).await;

        assert_eq!(doc.html(ACTIVITIES_LIST), format!("<p>{LOAD_FAILED}</p>"));
        assert_eq!(doc.html(CALENDAR), "");
        assert_eq!(doc.text(TOTAL_STUDENTS), "0");
        assert_eq!(backend.calls(), vec!["GET /activities"]);
    }

    #[tokio::test]
    async fn page_load_fetches_activities_then_stats() {
        let backend = MemoryBackend::default().activity("Chess Club", "Fridays", 12, &[]);
        {
            let mut stats = backend.stats.lock().unwrap();
            stats.total_amount = 125.5;
            stats.donor_count = 3;
        }
        let mut doc = Document::new();
        page_load(&backend, &mut doc, &mut SettledClock).await;

        assert_eq!(backend.calls(), vec!["GET /activities", "GET /donations/stats"]);
        assert_eq!(doc.text(TOTAL_DONATIONS), "$125.50");
        assert_eq!(doc.text(DONOR_COUNT), "3");
    }

    #[tokio::test]
    async fn stats_failure_leaves_counters_alone() {
        let backend = MemoryBackend::offline();
        let mut doc = Document::new();
        fetch_donation_stats(&backend, &mut doc).await;
        assert_eq!(doc.text(TOTAL_DONATIONS), "$0.00");
        assert_eq!(doc.text(DONOR_COUNT), "0");
    }
}
