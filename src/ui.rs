use crate::calendar::DayColumn;
use crate::models::{Activity, ActivityCatalog};
use crate::page::{
    self, ACTIVITIES_LIST, ACTIVITY_SELECT, AMOUNT_ATTR, AVAILABLE_SPOTS, CALENDAR, DONATION_AMOUNT,
    DONATION_MESSAGE, DONOR_COUNT, DONOR_EMAIL, DONOR_NAME, DONOR_NOTE, Document, MESSAGE, Page,
    SIGNUP_EMAIL, TOTAL_DONATIONS, TOTAL_STUDENTS,
};
use chrono::{Datelike, Local};

/// Pending unregister waiting for the user's answer.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmDialog<'a> {
    pub prompt: &'a str,
    pub activity: &'a str,
    pub email: &'a str,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn activity_cards(catalog: &ActivityCatalog) -> String {
    catalog
        .iter()
        .map(|(name, activity)| activity_card(name, activity))
        .collect()
}

pub fn activity_card(name: &str, activity: &Activity) -> String {
    let name = escape_html(name);
    let image = activity
        .image
        .as_deref()
        .map(|src| {
            format!(
                r#"<img src="{}" alt="{name}" class="activity-image">"#,
                escape_html(src)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="activity-card">
  {image}
  <div class="activity-content">
    <h4>{name}</h4>
    <p>{description}</p>
    <p><strong>Schedule:</strong> {schedule}</p>
    <p><strong>Availability:</strong> {spots} spots left</p>
    {participants}
  </div>
</div>
"#,
        description = escape_html(&activity.description),
        schedule = escape_html(&activity.schedule),
        spots = activity.spots_left(),
        participants = participants_block(&name, &activity.participants),
    )
}

fn participants_block(escaped_name: &str, participants: &[String]) -> String {
    let mut html = String::from(r#"<div class="participants"><h5>Participants</h5>"#);
    if participants.is_empty() {
        html.push_str(
            r#"<p class="no-participants">No participants yet. Be the first to sign up!</p>"#,
        );
    } else {
        html.push_str("<ul>");
        for email in participants {
            let email = escape_html(email);
            html.push_str(&format!(
                r#"<li>{email}<form class="delete-form" method="post" action="/unregister"><input type="hidden" name="activity" value="{escaped_name}"><input type="hidden" name="email" value="{email}"><button type="submit" class="delete-btn" data-activity="{escaped_name}" data-email="{email}" title="Remove participant">🗑️</button></form></li>"#
            ));
        }
        html.push_str("</ul>");
    }
    html.push_str("</div>");
    html
}

pub fn calendar_grid(columns: &[DayColumn<'_>]) -> String {
    let mut html = String::from(r#"<div class="calendar-grid">"#);
    for column in columns {
        html.push_str(&format!(
            r#"<div class="calendar-day"><h4 class="day-header">{}</h4><div class="day-activities">"#,
            column.title()
        ));
        if column.entries.is_empty() {
            html.push_str(r#"<p class="no-activities">No activities scheduled</p>"#);
        }
        for entry in &column.entries {
            let name = escape_html(entry.name);
            let image = entry
                .activity
                .image
                .as_deref()
                .map(|src| {
                    format!(
                        r#"<img src="{}" alt="{name}" class="calendar-activity-image">"#,
                        escape_html(src)
                    )
                })
                .unwrap_or_default();
            html.push_str(&format!(
                r#"<div class="calendar-activity">{image}<div class="calendar-activity-info"><strong>{name}</strong><small>{}/{} enrolled</small></div></div>"#,
                entry.activity.enrolled(),
                entry.activity.max_participants,
            ));
        }
        html.push_str("</div></div>");
    }
    html.push_str("</div>");
    html
}

pub fn render_index(doc: &Document, confirm: Option<ConfirmDialog<'_>>) -> String {
    fill_template(INDEX_HTML, |name| {
        let value = match name {
            "ACTIVITIES" => region(doc, ACTIVITIES_LIST),
            "CALENDAR" => region(doc, CALENDAR),
            "ACTIVITY_OPTIONS" => activity_options(doc),
            "SIGNUP_EMAIL" => escape_html(&doc.value(SIGNUP_EMAIL)),
            "MESSAGE" => message_box(doc, MESSAGE),
            "DONATION_MESSAGE" => message_box(doc, DONATION_MESSAGE),
            "AMOUNT_BUTTONS" => amount_buttons(doc),
            "DONATION_AMOUNT" => amount_input(doc),
            "DONOR_NAME" => escape_html(&doc.value(DONOR_NAME)),
            "DONOR_EMAIL" => escape_html(&doc.value(DONOR_EMAIL)),
            "DONOR_NOTE" => escape_html(&doc.value(DONOR_NOTE)),
            "TOTAL_STUDENTS" => escape_html(doc.text(TOTAL_STUDENTS)),
            "AVAILABLE_SPOTS" => escape_html(doc.text(AVAILABLE_SPOTS)),
            "TOTAL_DONATIONS" => escape_html(doc.text(TOTAL_DONATIONS)),
            "DONOR_COUNT" => escape_html(doc.text(DONOR_COUNT)),
            "CONFIRM" => confirm.map(confirm_dialog).unwrap_or_default(),
            "YEAR" => Local::now().year().to_string(),
            _ => return None,
        };
        Some(value)
    })
}

/// Replaces each `{{NAME}}` token in `template` with `value(NAME)`. Values are
/// emitted as-is and never scanned again; unknown tokens are kept verbatim.
fn fill_template(template: &str, mut value: impl FnMut(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        let token = &rest[open..];
        let Some(close) = token.find("}}") else {
            break;
        };
        out.push_str(&rest[..open]);
        match value(&token[2..close]) {
            Some(filled) => out.push_str(&filled),
            None => out.push_str(&token[..close + 2]),
        }
        rest = &token[close + 2..];
    }
    out.push_str(rest);
    out
}

fn region(doc: &Document, id: &str) -> String {
    match doc.get(id).and_then(|e| e.html.as_deref()) {
        Some(html) => html.to_string(),
        None if doc.text(id).is_empty() => String::new(),
        None => format!("<p>{}</p>", escape_html(doc.text(id))),
    }
}

fn activity_options(doc: &Document) -> String {
    let selected = doc.value(ACTIVITY_SELECT);
    let Some(select) = doc.get(ACTIVITY_SELECT) else {
        return String::new();
    };
    select
        .options
        .iter()
        .map(|name| {
            let marker = if *name == selected { " selected" } else { "" };
            let name = escape_html(name);
            format!(r#"<option value="{name}"{marker}>{name}</option>"#)
        })
        .collect()
}

fn message_box(doc: &Document, id: &str) -> String {
    let Some(element) = doc.get(id) else {
        return String::new();
    };
    let mut classes = element.class_attr();
    let mut style = String::new();
    if let Some(delay) = element.hide_after {
        classes.push_str(" auto-hide");
        style = format!(r#" style="--hide-after: {}ms""#, delay.as_millis());
    }
    format!(
        r#"<div id="{id}" class="{}"{style}>{}</div>"#,
        classes.trim(),
        escape_html(&element.text)
    )
}

fn amount_buttons(doc: &Document) -> String {
    doc.data_elements(AMOUNT_ATTR)
        .iter()
        .map(|button| {
            let active = doc
                .get(&button.id)
                .map(|e| e.has_class(page::ACTIVE))
                .unwrap_or(false);
            let label = if button.value == "custom" {
                "Custom".to_string()
            } else {
                format!("${}", button.value)
            };
            let value = escape_html(&button.value);
            format!(
                r#"<button type="submit" form="amount-picker" name="amount" value="{value}" id="{}" class="amount-btn{}" data-amount="{value}">{label}</button>"#,
                button.id,
                if active { " active" } else { "" },
            )
        })
        .collect()
}

fn amount_input(doc: &Document) -> String {
    let autofocus = if doc.focused() == Some(DONATION_AMOUNT) {
        " autofocus"
    } else {
        ""
    };
    format!(
        r#"<input type="number" id="{DONATION_AMOUNT}" name="amount" min="1" step="0.01" placeholder="Enter amount" value="{}" required{autofocus}>"#,
        escape_html(&doc.value(DONATION_AMOUNT))
    )
}

fn confirm_dialog(dialog: ConfirmDialog<'_>) -> String {
    format!(
        r#"<dialog open class="confirm-dialog">
      <p>{prompt}</p>
      <form method="post" action="/unregister">
        <input type="hidden" name="activity" value="{activity}">
        <input type="hidden" name="email" value="{email}">
        <input type="hidden" name="confirmed" value="yes">
        <button type="submit" class="btn-danger">OK</button>
        <a href="/" class="btn-cancel">Cancel</a>
      </form>
    </dialog>"#,
        prompt = escape_html(dialog.prompt),
        activity = escape_html(dialog.activity),
        email = escape_html(dialog.email),
    )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mergington High School Activities</title>
  <style>
    :root {
      --bg: #f5f7fb;
      --ink: #1f2a37;
      --primary: #1a237e;
      --primary-soft: #e8eaf6;
      --success: #2e7d32;
      --success-soft: #e8f5e9;
      --error: #c62828;
      --error-soft: #ffebee;
      --card: #ffffff;
      --shadow: 0 10px 30px rgba(26, 35, 126, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
    }

    header {
      background: var(--primary);
      color: white;
      text-align: center;
      padding: 28px 16px;
    }

    header h1 {
      margin: 0;
    }

    main {
      width: min(1100px, 100%);
      margin: 0 auto;
      padding: 24px 16px 48px;
      display: grid;
      gap: 24px;
    }

    section {
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat-card {
      background: var(--primary-soft);
      border-radius: 12px;
      padding: 16px;
      text-align: center;
    }

    .stat-card .value {
      display: block;
      font-size: 2rem;
      font-weight: 700;
      color: var(--primary);
    }

    #activities-list {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
      gap: 16px;
    }

    .activity-card {
      border: 1px solid #dde1f0;
      border-radius: 12px;
      overflow: hidden;
    }

    .activity-image {
      width: 100%;
      height: 160px;
      object-fit: cover;
      display: block;
    }

    .activity-content {
      padding: 16px;
    }

    .participants ul {
      list-style: none;
      padding: 0;
      margin: 0;
    }

    .participants li {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 4px 0;
    }

    .delete-form {
      display: inline;
    }

    .delete-btn {
      background: none;
      border: none;
      cursor: pointer;
    }

    .no-participants,
    .no-activities {
      color: #6b7280;
      font-style: italic;
    }

    .calendar-grid {
      display: grid;
      grid-template-columns: repeat(5, 1fr);
      gap: 12px;
    }

    .day-header {
      margin: 0 0 8px;
      color: var(--primary);
    }

    .calendar-activity {
      display: flex;
      gap: 8px;
      align-items: center;
      background: var(--primary-soft);
      border-radius: 8px;
      padding: 8px;
      margin-bottom: 8px;
    }

    .calendar-activity-image {
      width: 40px;
      height: 40px;
      border-radius: 6px;
      object-fit: cover;
    }

    .calendar-activity-info {
      display: grid;
    }

    form .form-group {
      display: grid;
      gap: 6px;
      margin-bottom: 14px;
    }

    input,
    select,
    textarea {
      font: inherit;
      padding: 10px;
      border: 1px solid #c5cae9;
      border-radius: 8px;
    }

    button {
      font: inherit;
      cursor: pointer;
    }

    .btn-primary,
    .btn-danger {
      border: none;
      border-radius: 8px;
      padding: 10px 18px;
      color: white;
      background: var(--primary);
    }

    .btn-danger {
      background: var(--error);
    }

    .amount-buttons {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      margin-bottom: 14px;
    }

    .amount-btn {
      border: 2px solid var(--primary);
      background: white;
      color: var(--primary);
      border-radius: 999px;
      padding: 8px 16px;
    }

    .amount-btn.active {
      background: var(--primary);
      color: white;
    }

    .success,
    .error {
      margin-top: 14px;
      padding: 12px;
      border-radius: 8px;
    }

    .success {
      background: var(--success-soft);
      color: var(--success);
    }

    .error {
      background: var(--error-soft);
      color: var(--error);
    }

    .hidden {
      display: none;
    }

    .auto-hide {
      animation: auto-hide 0s linear var(--hide-after) forwards;
    }

    .confirm-dialog {
      border: none;
      border-radius: 12px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    footer {
      text-align: center;
      color: #6b7280;
      padding-bottom: 24px;
    }

    @keyframes auto-hide {
      to {
        visibility: hidden;
        height: 0;
        padding: 0;
        margin: 0;
      }
    }

    @media (max-width: 760px) {
      .calendar-grid {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body>
  <header>
    <h1>Mergington High School</h1>
    <h2>Extracurricular Activities</h2>
  </header>

  <main>
    {{CONFIRM}}

    <section class="stats">
      <div class="stat-card">
        <span id="total-students" class="value" data-target="{{TOTAL_STUDENTS}}">{{TOTAL_STUDENTS}}</span>
        <span class="label">Students enrolled</span>
      </div>
      <div class="stat-card">
        <span id="available-spots" class="value" data-target="{{AVAILABLE_SPOTS}}">{{AVAILABLE_SPOTS}}</span>
        <span class="label">Spots available</span>
      </div>
      <div class="stat-card">
        <span id="total-donations" class="value">{{TOTAL_DONATIONS}}</span>
        <span class="label">Raised so far</span>
      </div>
      <div class="stat-card">
        <span id="donor-count" class="value">{{DONOR_COUNT}}</span>
        <span class="label">Donors</span>
      </div>
    </section>

    <section id="activities-container">
      <h3>Available Activities</h3>
      <div id="activities-list">{{ACTIVITIES}}</div>
    </section>

    <section id="calendar-container">
      <h3>Weekly Schedule</h3>
      <div id="calendar">{{CALENDAR}}</div>
    </section>

    <section id="signup-container">
      <h3>Sign Up for an Activity</h3>
      <form id="signup-form" method="post" action="/signup">
        <div class="form-group">
          <label for="email">Student Email:</label>
          <input type="email" id="email" name="email" value="{{SIGNUP_EMAIL}}" required placeholder="your-email@mergington.edu" />
        </div>
        <div class="form-group">
          <label for="activity">Select Activity:</label>
          <select id="activity" name="activity" required>
            <option value="">-- Select an activity --</option>
            {{ACTIVITY_OPTIONS}}
          </select>
        </div>
        <button type="submit" class="btn-primary">Sign Up</button>
      </form>
      {{MESSAGE}}
    </section>

    <section id="donation-container">
      <h3>Support Our Programs</h3>
      <form id="amount-picker" method="get" action="/"></form>
      <form id="donation-form" method="post" action="/donate">
        <div class="amount-buttons">{{AMOUNT_BUTTONS}}</div>
        <div class="form-group">
          <label for="donation-amount">Amount ($):</label>
          {{DONATION_AMOUNT}}
        </div>
        <div class="form-group">
          <label for="donor-name">Your Name:</label>
          <input type="text" id="donor-name" name="name" value="{{DONOR_NAME}}" required />
        </div>
        <div class="form-group">
          <label for="donor-email">Your Email:</label>
          <input type="email" id="donor-email" name="email" value="{{DONOR_EMAIL}}" required />
        </div>
        <div class="form-group">
          <label for="donor-note">Message (optional):</label>
          <textarea id="donor-note" name="message" rows="3">{{DONOR_NOTE}}</textarea>
        </div>
        <button type="submit" class="btn-primary">Donate</button>
      </form>
      {{DONATION_MESSAGE}}
    </section>
  </main>

  <footer>
    <p>&copy; {{YEAR}} Mergington High School</p>
  </footer>

  <script>
    const ANIMATION_MS = 1000;

    const animateNumber = (el) => {
      const target = Number.parseInt(el.dataset.target, 10);
      if (Number.isNaN(target)) {
        return;
      }
      let start = null;
      const step = (now) => {
        if (start === null) {
          start = now;
        }
        const progress = Math.min((now - start) / ANIMATION_MS, 1);
        el.textContent = progress >= 1 ? target : Math.floor(target * progress);
        if (progress < 1) {
          requestAnimationFrame(step);
        }
      };
      el.textContent = '0';
      requestAnimationFrame(step);
    };

    document.querySelectorAll('[data-target]').forEach(animateNumber);
  </script>
</body>
</html>
"#;
