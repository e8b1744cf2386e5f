use chrono::{DateTime, SecondsFormat, Utc};

pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

fn to_date_time(timestamp: i64) -> Result<DateTime<Utc>, String> {
    DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| format!("Invalid publish time {}", timestamp))
}

/// Publish time as shown in the detail view, e.g. `2024-01-01T00:00:00Z`
pub fn format_publish_time(timestamp: i64) -> Result<String, String> {
    let date_time = to_date_time(timestamp)?;
    Ok(date_time.to_rfc3339_opts(SecondsFormat::Secs, true))
}

pub fn format_date_time(timestamp: i64) -> Result<(String, String), String> {
    let date_time = to_date_time(timestamp)?;
    let date = date_time.format("%Y-%m-%d").to_string();
    let time = date_time.format("%H:%M:%S").to_string();
    Ok((date, time))
}

pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// Title of a post from its first line: whatever follows the first `# `,
/// or the whole line when there is no marker.
pub fn parse_title(line: &str) -> &str {
    match line.find("# ") {
        Some(pos) => &line[pos + 2..],
        None => line,
    }
}

/// Topics the way the manager lists them: every topic followed by `", "`
pub fn join_topics(topics: &[String]) -> String {
    let mut buf = String::new();
    for topic in topics {
        buf.push_str(topic);
        buf.push_str(", ");
    }
    buf
}
