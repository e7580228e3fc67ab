//! Minimal HTML pages. All user-supplied text goes through [`escape`].

use std::fmt::Write as _;

use chrono::FixedOffset;
use muster_core::record::CheckInRecord;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      c => out.push(c),
    }
  }
  out
}

fn layout(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
     <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
     <title>{}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
    escape(title)
  )
}

/// A heading plus one paragraph; used for every rejection and error.
pub fn message(title: &str, message: &str) -> String {
  layout(title, &format!("<h1>{}</h1>\n<p>{}</p>", escape(title), escape(message)))
}

const FORM: &str = r#"<h1>Attendance Check-in</h1>
<form id="check-in" method="post" action="/submit">
  <label>First name <input name="first_name" required></label>
  <label>Middle name <input name="middle_name"></label>
  <label>Last name <input name="last_name" required></label>
  <label>ID / Passport <input name="id_passport" required></label>
  <label>Email <input name="email" type="email" required></label>
  <label>Phone <input name="phone" type="tel" required></label>
  <label>Ethnicity <input name="ethnicity"></label>
  <label>Gender <input name="gender"></label>
  <label>Course <input name="course" required></label>
  <input type="hidden" name="latitude" id="latitude">
  <input type="hidden" name="longitude" id="longitude">
  <button type="submit">Check in</button>
</form>
<p id="status"></p>
<script>
document.getElementById("check-in").addEventListener("submit", function (ev) {
  var form = ev.target;
  if (form.latitude.value && form.longitude.value) { return; }
  ev.preventDefault();
  var status = document.getElementById("status");
  if (!navigator.geolocation) { form.submit(); return; }
  status.textContent = "Locating you...";
  navigator.geolocation.getCurrentPosition(function (pos) {
    form.latitude.value = pos.coords.latitude;
    form.longitude.value = pos.coords.longitude;
    form.submit();
  }, function () { form.submit(); }, { enableHighAccuracy: true, timeout: 15000 });
});
</script>"#;

/// `GET /` — the check-in form; geolocation fills the hidden fields.
pub fn index() -> String { layout("Attendance Check-in", FORM) }

pub fn success(record: &CheckInRecord) -> String {
  layout(
    "Checked In",
    &format!(
      "<h1>Thank you, {}!</h1>\n<p>Your attendance for {} (week {}) has been recorded.</p>",
      escape(&record.first_name),
      escape(&record.course),
      record.week_number
    ),
  )
}

pub fn no_data(course: &str, week: u32) -> String {
  message("No Data", &format!("No check-ins for {course} in Week {week}."))
}

/// `GET /admin` — every check-in, newest first.
pub fn admin(records: &[CheckInRecord], offset: FixedOffset) -> String {
  let mut body = String::from(
    "<h1>Check-ins</h1>\n<table>\n<thead><tr>\
     <th>ID</th><th>Name</th><th>ID/Passport</th><th>Email</th><th>Phone</th>\
     <th>Course</th><th>Week</th><th>Time</th><th>Export</th></tr></thead>\n<tbody>\n",
  );

  for r in records {
    let name = match &r.middle_name {
      Some(middle) => format!("{} {} {}", r.first_name, middle, r.last_name),
      None => format!("{} {}", r.first_name, r.last_name),
    };
    let _ = writeln!(
      body,
      "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
       <td>{}</td><td><a href=\"/download/{}/{}\">xlsx</a></td></tr>",
      r.id,
      escape(&name),
      escape(&r.id_passport),
      escape(&r.email),
      escape(&r.phone),
      escape(&r.course),
      r.week_number,
      r.checked_in_at.with_timezone(&offset).format("%Y-%m-%d %H:%M"),
      escape(&encode_path_segment(&r.course)),
      r.week_number,
    );
  }

  body.push_str("</tbody>\n</table>");
  layout("Check-ins", &body)
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_path_segment(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for b in s.bytes() {
    if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
      out.push(b as char);
    } else {
      let _ = write!(out, "%{b:02X}");
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escape_handles_markup() {
    assert_eq!(
      escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
      "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
    );
  }

  #[test]
  fn path_segments_are_percent_encoded() {
    assert_eq!(encode_path_segment("Data101"), "Data101");
    assert_eq!(encode_path_segment("Data 101/B"), "Data%20101%2FB");
  }

  #[test]
  fn no_data_names_course_and_week() {
    let page = no_data("Data101", 3);
    assert!(page.contains("No check-ins for Data101 in Week 3."));
  }
}
