use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Activity {
    pub fn enrolled(&self) -> i64 {
        self.participants.len() as i64
    }

    pub fn spots_left(&self) -> i64 {
        self.max_participants - self.enrolled()
    }
}

/// Activities keyed by name, in the order the backend listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityCatalog {
    entries: Vec<(String, Activity)>,
}

impl ActivityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an activity, keeping the position of an existing name.
    pub fn insert(&mut self, name: impl Into<String>, activity: Activity) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = activity,
            None => self.entries.push((name, activity)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, activity)| activity)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Activity> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .map(|(_, activity)| activity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Activity)> {
        self.entries
            .iter()
            .map(|(name, activity)| (name.as_str(), activity))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn totals(&self) -> EnrollmentTotals {
        let mut totals = EnrollmentTotals::default();
        for (_, activity) in self.iter() {
            totals.enrolled += activity.enrolled();
            totals.capacity += activity.max_participants;
        }
        totals
    }
}

impl<'de> Deserialize<'de> for ActivityCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = ActivityCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of activity names to activities")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut catalog = ActivityCatalog::new();
                while let Some((name, activity)) = map.next_entry::<String, Activity>()? {
                    catalog.insert(name, activity);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

impl Serialize for ActivityCatalog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.entries.iter().map(|(name, activity)| (name, activity)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrollmentTotals {
    pub enrolled: i64,
    pub capacity: i64,
}

impl EnrollmentTotals {
    pub fn available(&self) -> i64 {
        self.capacity - self.enrolled
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Donation {
    pub amount: f64,
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DonationStats {
    pub total_amount: f64,
    pub donor_count: u64,
}

impl DonationStats {
    pub fn total_label(&self) -> String {
        format!("${:.2}", self.total_amount)
    }
}

/// Body shared by the signup, unregister and donation endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReplyBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: ReplyBody,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn message(&self) -> &str {
        self.body.message.as_deref().unwrap_or_default()
    }

    /// The detail text, when the backend sent a plain string.
    pub fn detail(&self) -> Option<&str> {
        match &self.body.detail {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => Some(detail.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnregisterForm {
    pub activity: String,
    pub email: String,
    #[serde(default)]
    pub confirmed: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonationForm {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub amount: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_keeps_backend_order() {
        let raw = r#"{
            "Zumba": {"description": "d", "schedule": "Fridays", "max_participants": 5, "participants": []},
            "Art Studio": {"description": "d", "schedule": "Mondays", "max_participants": 15, "participants": ["a@x.com"], "image": "https://img/a.png"}
        }"#;
        let catalog: ActivityCatalog = serde_json::from_str(raw).unwrap();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["Zumba", "Art Studio"]);
        let art = catalog.get("Art Studio").unwrap();
        assert_eq!(art.spots_left(), 14);
        assert_eq!(art.image.as_deref(), Some("https://img/a.png"));
        assert!(catalog.get("Zumba").unwrap().image.is_none());
    }

    #[test]
    fn totals_sum_capacity_and_enrollment() {
        let mut catalog = ActivityCatalog::new();
        for (name, max, people) in [("A", 10, 1), ("B", 4, 4), ("C", 2, 3)] {
            catalog.insert(
                name,
                Activity {
                    description: String::new(),
                    schedule: String::new(),
                    max_participants: max,
                    participants: (0..people).map(|i| format!("{i}@x.com")).collect(),
                    image: None,
                },
            );
        }
        let totals = catalog.totals();
        assert_eq!(totals.enrolled, 8);
        assert_eq!(totals.capacity, 16);
        assert_eq!(totals.available(), 8);
    }

    #[test]
    fn reply_detail_only_accepts_strings() {
        let reply = ApiReply {
            status: 422,
            body: serde_json::from_str(r#"{"detail": [{"loc": ["query", "amount"]}]}"#).unwrap(),
        };
        assert!(!reply.is_success());
        assert_eq!(reply.detail(), None);

        let reply = ApiReply {
            status: 400,
            body: serde_json::from_str(r#"{"detail": "Activity not found"}"#).unwrap(),
        };
        assert_eq!(reply.detail(), Some("Activity not found"));
    }

    #[test]
    fn stats_label_has_two_decimals() {
        let stats = DonationStats {
            total_amount: 35.5,
            donor_count: 2,
        };
        assert_eq!(stats.total_label(), "$35.50");
    }
}
