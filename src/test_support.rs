use crate::backend::Backend;
use crate::errors::FetchError;
use crate::models::{Activity, ActivityCatalog, ApiReply, Donation, DonationStats, ReplyBody};
use std::sync::Mutex;

/// Backend kept in memory, answering the way the school API does.
#[derive(Default)]
pub struct MemoryBackend {
    pub catalog: Mutex<ActivityCatalog>,
    pub stats: Mutex<DonationStats>,
    pub calls: Mutex<Vec<String>>,
    pub offline: bool,
}

impl MemoryBackend {
    pub fn activity(self, name: &str, schedule: &str, max: i64, people: &[&str]) -> Self {
        self.catalog.lock().unwrap().insert(
            name,
            Activity {
                description: format!("About {name}"),
                schedule: schedule.to_string(),
                max_participants: max,
                participants: people.iter().map(|p| p.to_string()).collect(),
                image: None,
            },
        );
        self
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn participants(&self, activity: &str) -> Vec<String> {
        self.catalog
            .lock()
            .unwrap()
            .get(activity)
            .map(|a| a.participants.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: String) -> Result<(), FetchError> {
        self.calls.lock().unwrap().push(call.clone());
        if self.offline {
            return Err(FetchError::Transport {
                url: call,
                msg: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

fn ok(message: String) -> ApiReply {
    ApiReply {
        status: 200,
        body: ReplyBody {
            message: Some(message),
            ..ReplyBody::default()
        },
    }
}

fn fail(status: u16, detail: &str) -> ApiReply {
    ApiReply {
        status,
        body: ReplyBody {
            detail: Some(serde_json::Value::String(detail.to_string())),
            ..ReplyBody::default()
        },
    }
}

impl Backend for MemoryBackend {
    async fn activities(&self) -> Result<ActivityCatalog, FetchError> {
        self.record("GET /activities".to_string())?;
        Ok(self.catalog.lock().unwrap().clone())
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<ApiReply, FetchError> {
        self.record(format!("POST /activities/{activity}/signup?email={email}"))?;
        let mut catalog = self.catalog.lock().unwrap();
        let Some(entry) = catalog.get_mut(activity) else {
            return Ok(fail(404, "Activity not found"));
        };
        if entry.participants.iter().any(|p| p == email) {
            return Ok(fail(400, "Student already signed up for this activity"));
        }
        entry.participants.push(email.to_string());
        Ok(ok(format!("Signed up {email} for {activity}")))
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<ApiReply, FetchError> {
        self.record(format!("DELETE /activities/{activity}/unregister?email={email}"))?;
        let mut catalog = self.catalog.lock().unwrap();
        let Some(entry) = catalog.get_mut(activity) else {
            return Ok(fail(404, "Activity not found"));
        };
        let before = entry.participants.len();
        entry.participants.retain(|p| p != email);
        if entry.participants.len() == before {
            return Ok(fail(400, "Student not signed up for this activity"));
        }
        Ok(ok(format!("Unregistered {email} from {activity}")))
    }

    async fn donate(&self, donation: &Donation) -> Result<ApiReply, FetchError> {
        self.record(format!("POST /donations?amount={}", donation.amount))?;
        if donation.amount <= 0.0 {
            return Ok(fail(400, "Donation amount must be positive"));
        }
        let mut stats = self.stats.lock().unwrap();
        stats.total_amount += donation.amount;
        stats.donor_count += 1;
        let mut reply = ok(format!(
            "Thank you {} for your generous donation of ${:.2}!",
            donation.name, donation.amount
        ));
        reply.body.donation_id = Some(stats.donor_count);
        Ok(reply)
    }

    async fn donation_stats(&self) -> Result<DonationStats, FetchError> {
        self.record("GET /donations/stats".to_string())?;
        Ok(self.stats.lock().unwrap().clone())
    }
}
