use crate::page::Page;
use std::future::Future;
use std::time::Duration;

pub const ANIMATION_DURATION: Duration = Duration::from_millis(1000);

/// Source of animation frames.
pub trait FrameClock {
    /// Current timestamp, measured from an arbitrary origin.
    fn now(&self) -> Duration;

    /// Waits for the next frame and returns its timestamp.
    fn next_frame(&mut self) -> impl Future<Output = Duration> + Send;
}

/// Clock whose first frame already lies past the end of any animation, so
/// counters land on their target immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettledClock;

impl FrameClock for SettledClock {
    fn now(&self) -> Duration {
        Duration::ZERO
    }

    async fn next_frame(&mut self) -> Duration {
        ANIMATION_DURATION
    }
}

/// Value shown `elapsed` into an animation from 0 to `target`.
pub fn interpolate(target: i64, elapsed: Duration, duration: Duration) -> i64 {
    let progress = if duration.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
    };
    if progress >= 1.0 {
        return target;
    }
    (target as f64 * progress).floor() as i64
}

/// Animates each `(element id, target)` counter from 0, all driven by the same frames.
pub async fn animate_counters<P, C>(page: &mut P, clock: &mut C, counters: &[(&str, i64)])
where
    P: Page,
    C: FrameClock,
{
    if counters.is_empty() {
        return;
    }
    let start = clock.now();
    loop {
        let elapsed = clock.next_frame().await.saturating_sub(start);
        for &(id, target) in counters {
            page.set_text(id, interpolate(target, elapsed, ANIMATION_DURATION).to_string());
        }
        if elapsed >= ANIMATION_DURATION {
            break;
        }
    }
}

pub async fn animate_number<P, C>(page: &mut P, clock: &mut C, id: &str, target: i64)
where
    P: Page,
    C: FrameClock,
{
    animate_counters(page, clock, &[(id, target)]).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Document, TOTAL_STUDENTS};

    /// Replays fixed frame timestamps, then jumps far past the end.
    struct ScriptedClock {
        start: Duration,
        frames: Vec<Duration>,
    }

    impl ScriptedClock {
        fn every(step_ms: u64, until_ms: u64) -> Self {
            Self {
                start: Duration::from_millis(5),
                frames: (1..)
                    .map(|i| Duration::from_millis(5 + i * step_ms))
                    .take_while(|t| *t <= Duration::from_millis(5 + until_ms))
                    .collect(),
            }
        }
    }

    impl FrameClock for ScriptedClock {
        fn now(&self) -> Duration {
            self.start
        }

        async fn next_frame(&mut self) -> Duration {
            if self.frames.is_empty() {
                return self.start + ANIMATION_DURATION * 10;
            }
            self.frames.remove(0)
        }
    }

    struct Recorder {
        doc: Document,
        seen: Vec<String>,
    }

    impl Page for Recorder {
        fn set_html(&mut self, id: &str, html: String) {
            self.doc.set_html(id, html)
        }
        fn set_text(&mut self, id: &str, text: String) {
            self.seen.push(text.clone());
            self.doc.set_text(id, text)
        }
        fn clear_options(&mut self, id: &str) {
            self.doc.clear_options(id)
        }
        fn append_option(&mut self, id: &str, value: &str) {
            self.doc.append_option(id, value)
        }
        fn set_class(&mut self, id: &str, class: &str) {
            self.doc.set_class(id, class)
        }
        fn add_class(&mut self, id: &str, class: &str) {
            self.doc.add_class(id, class)
        }
        fn remove_class(&mut self, id: &str, class: &str) {
            self.doc.remove_class(id, class)
        }
        fn value(&self, id: &str) -> String {
            self.doc.value(id)
        }
        fn set_value(&mut self, id: &str, value: &str) {
            self.doc.set_value(id, value)
        }
        fn focus(&mut self, id: &str) {
            self.doc.focus(id)
        }
        fn reset_form(&mut self, id: &str) {
            self.doc.reset_form(id)
        }
        fn data_elements(&self, attribute: &str) -> Vec<crate::page::DataElement> {
            self.doc.data_elements(attribute)
        }
        fn confirm(&mut self, prompt: &str) -> bool {
            self.doc.confirm(prompt)
        }
        fn hide_after(&mut self, id: &str, delay: Duration) {
            self.doc.hide_after(id, delay)
        }
    }

    #[test]
    fn interpolation_is_floored_and_clamped() {
        let d = ANIMATION_DURATION;
        assert_eq!(interpolate(37, Duration::ZERO, d), 0);
        assert_eq!(interpolate(37, Duration::from_millis(500), d), 18);
        assert_eq!(interpolate(37, Duration::from_millis(999), d), 36);
        assert_eq!(interpolate(37, Duration::from_millis(1000), d), 37);
        assert_eq!(interpolate(37, Duration::from_millis(4000), d), 37);
        assert_eq!(interpolate(5, Duration::from_millis(10), Duration::ZERO), 5);
    }

    #[tokio::test]
    async fn values_rise_monotonically_to_the_target() {
        let mut page = Recorder {
            doc: Document::new(),
            seen: Vec::new(),
        };
        let mut clock = ScriptedClock::every(16, 1100);
        animate_number(&mut page, &mut clock, TOTAL_STUDENTS, 123).await;

        let values: Vec<i64> = page.seen.iter().map(|v| v.parse().unwrap()).collect();
        assert_eq!(values[0], 1);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*values.last().unwrap(), 123);
        assert_eq!(page.doc.text(TOTAL_STUDENTS), "123");
        // stops on the first frame at or past one second
        assert!(!clock.frames.is_empty());
        assert!(clock.frames[0] > Duration::from_millis(1005));
    }

    #[tokio::test]
    async fn first_frame_at_start_shows_zero() {
        let mut page = Recorder {
            doc: Document::new(),
            seen: Vec::new(),
        };
        let mut clock = ScriptedClock {
            start: Duration::from_millis(100),
            frames: vec![Duration::from_millis(100), Duration::from_millis(1100)],
        };
        animate_number(&mut page, &mut clock, TOTAL_STUDENTS, 40).await;
        assert_eq!(page.seen, vec!["0", "40"]);
    }

    #[tokio::test]
    async fn settled_clock_lands_on_target() {
        let mut doc = Document::new();
        animate_counters(
            &mut doc,
            &mut SettledClock,
            &[("total-students", 12), ("available-spots", 30)],
        )
        .await;
        assert_eq!(doc.text("total-students"), "12");
        assert_eq!(doc.text("available-spots"), "30");
    }
}
