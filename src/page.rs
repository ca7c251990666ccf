use std::collections::BTreeMap;
use std::time::Duration;

pub const ACTIVITIES_LIST: &str = "activities-list";
pub const ACTIVITY_SELECT: &str = "activity";
pub const SIGNUP_EMAIL: &str = "email";
pub const SIGNUP_FORM: &str = "signup-form";
pub const MESSAGE: &str = "message";
pub const DONATION_FORM: &str = "donation-form";
pub const DONATION_MESSAGE: &str = "donation-message";
pub const DONATION_AMOUNT: &str = "donation-amount";
pub const DONOR_NAME: &str = "donor-name";
pub const DONOR_EMAIL: &str = "donor-email";
pub const DONOR_NOTE: &str = "donor-note";
pub const CALENDAR: &str = "calendar";
pub const TOTAL_STUDENTS: &str = "total-students";
pub const AVAILABLE_SPOTS: &str = "available-spots";
pub const TOTAL_DONATIONS: &str = "total-donations";
pub const DONOR_COUNT: &str = "donor-count";

pub const HIDDEN: &str = "hidden";
pub const ACTIVE: &str = "active";

pub const AMOUNT_ATTR: &str = "amount";
pub const AMOUNT_PRESETS: [&str; 5] = ["10", "25", "50", "100", "custom"];

/// Element carrying a `data-*` attribute, as returned by [`Page::data_elements`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataElement {
    pub id: String,
    pub value: String,
}

/// The document the handlers render into, addressed by element id.
pub trait Page {
    fn set_html(&mut self, id: &str, html: String);
    fn set_text(&mut self, id: &str, text: String);

    fn clear_options(&mut self, id: &str);
    fn append_option(&mut self, id: &str, value: &str);

    /// Replaces every class on the element.
    fn set_class(&mut self, id: &str, class: &str);
    fn add_class(&mut self, id: &str, class: &str);
    fn remove_class(&mut self, id: &str, class: &str);

    fn value(&self, id: &str) -> String;
    fn set_value(&mut self, id: &str, value: &str);
    fn focus(&mut self, id: &str);
    fn reset_form(&mut self, id: &str);

    /// Elements carrying `data-{attribute}`, in document order.
    fn data_elements(&self, attribute: &str) -> Vec<DataElement>;

    /// Asks the user to confirm; `false` means cancelled.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Adds the `hidden` class to the element once `delay` has passed.
    fn hide_after(&mut self, id: &str, delay: Duration);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub text: String,
    pub html: Option<String>,
    pub classes: Vec<String>,
    pub value: String,
    pub options: Vec<String>,
    pub data: BTreeMap<String, String>,
    pub hide_after: Option<Duration>,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }
}

/// In-memory model of the activity page.
#[derive(Debug, Clone)]
pub struct Document {
    elements: BTreeMap<String, Element>,
    order: Vec<String>,
    forms: BTreeMap<String, Vec<String>>,
    focused: Option<String>,
    confirm_answer: bool,
    prompts: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            elements: BTreeMap::new(),
            order: Vec::new(),
            forms: BTreeMap::new(),
            focused: None,
            confirm_answer: false,
            prompts: Vec::new(),
        };

        doc.element_mut(ACTIVITIES_LIST).text = "Loading activities...".to_string();
        for id in [
            CALENDAR,
            ACTIVITY_SELECT,
            SIGNUP_EMAIL,
            DONATION_AMOUNT,
            DONOR_NAME,
            DONOR_EMAIL,
            DONOR_NOTE,
        ] {
            doc.element_mut(id);
        }
        for id in [TOTAL_STUDENTS, AVAILABLE_SPOTS, DONOR_COUNT] {
            doc.element_mut(id).text = "0".to_string();
        }
        doc.element_mut(TOTAL_DONATIONS).text = "$0.00".to_string();
        for id in [MESSAGE, DONATION_MESSAGE] {
            doc.element_mut(id).classes = vec![HIDDEN.to_string()];
        }
        for preset in AMOUNT_PRESETS {
            doc.element_mut(&amount_button_id(preset))
                .data
                .insert(AMOUNT_ATTR.to_string(), preset.to_string());
        }

        doc.forms.insert(
            SIGNUP_FORM.to_string(),
            vec![SIGNUP_EMAIL.to_string(), ACTIVITY_SELECT.to_string()],
        );
        doc.forms.insert(
            DONATION_FORM.to_string(),
            [DONATION_AMOUNT, DONOR_NAME, DONOR_EMAIL, DONOR_NOTE]
                .iter()
                .map(|id| id.to_string())
                .collect(),
        );
        doc
    }

    /// Sets the answer the next [`Page::confirm`] calls will get.
    pub fn answer_confirm(&mut self, answer: bool) {
        self.confirm_answer = answer;
    }

    /// Prompts shown so far, oldest first.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn text(&self, id: &str) -> &str {
        self.elements.get(id).map(|e| e.text.as_str()).unwrap_or_default()
    }

    pub fn html(&self, id: &str) -> &str {
        self.elements
            .get(id)
            .and_then(|e| e.html.as_deref())
            .unwrap_or_default()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Applies every pending auto-hide, as if the timers had all fired.
    pub fn fire_timers(&mut self) {
        for element in self.elements.values_mut() {
            if element.hide_after.take().is_some() && !element.has_class(HIDDEN) {
                element.classes.push(HIDDEN.to_string());
            }
        }
    }

    fn element_mut(&mut self, id: &str) -> &mut Element {
        if !self.elements.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.elements.entry(id.to_string()).or_default()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Puts `text` in a message box styled with `class` and makes it visible.
pub fn show_message<P: Page>(page: &mut P, id: &str, text: &str, class: &str) {
    page.set_text(id, text.to_string());
    page.set_class(id, class);
    page.remove_class(id, HIDDEN);
}

pub fn amount_button_id(preset: &str) -> String {
    format!("amount-{preset}")
}

impl Page for Document {
    fn set_html(&mut self, id: &str, html: String) {
        let element = self.element_mut(id);
        element.text.clear();
        element.html = Some(html);
    }

    fn set_text(&mut self, id: &str, text: String) {
        let element = self.element_mut(id);
        element.html = None;
        element.text = text;
    }

    fn clear_options(&mut self, id: &str) {
        self.element_mut(id).options.clear();
    }

    fn append_option(&mut self, id: &str, value: &str) {
        self.element_mut(id).options.push(value.to_string());
    }

    fn set_class(&mut self, id: &str, class: &str) {
        self.element_mut(id).classes = class.split_whitespace().map(str::to_string).collect();
    }

    fn add_class(&mut self, id: &str, class: &str) {
        let element = self.element_mut(id);
        if !element.has_class(class) {
            element.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        self.element_mut(id).classes.retain(|c| c != class);
    }

    fn value(&self, id: &str) -> String {
        self.elements
            .get(id)
            .map(|e| e.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, id: &str, value: &str) {
        self.element_mut(id).value = value.to_string();
    }

    fn focus(&mut self, id: &str) {
        self.focused = Some(id.to_string());
    }

    fn reset_form(&mut self, id: &str) {
        let fields = self.forms.get(id).cloned().unwrap_or_default();
        for field in fields {
            self.element_mut(&field).value.clear();
        }
    }

    fn data_elements(&self, attribute: &str) -> Vec<DataElement> {
        self.order
            .iter()
            .filter_map(|id| {
                let value = self.elements.get(id)?.data.get(attribute)?;
                Some(DataElement {
                    id: id.clone(),
                    value: value.clone(),
                })
            })
            .collect()
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.confirm_answer
    }

    fn hide_after(&mut self, id: &str, delay: Duration) {
        self.element_mut(id).hide_after = Some(delay);
    }
}
