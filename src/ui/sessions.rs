use chrono::{DateTime, Local, TimeZone};

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d %H:%M";

pub fn format_session_date(timestamp: i64) -> String {
    let Some(datetime) = Local.timestamp_opt(timestamp, 0).single() else {
        return "-".to_string();
    };
    format_relative(datetime, Local::now())
}

fn format_relative(datetime: DateTime<Local>, now: DateTime<Local>) -> String {
    let session_date = datetime.date_naive();
    let today = now.date_naive();

    if session_date == today {
        datetime.format(DATE_FORMAT_TODAY).to_string()
    } else if Some(session_date) == today.pred_opt() {
        datetime.format(DATE_FORMAT_YESTERDAY).to_string()
    } else {
        datetime.format(DATE_FORMAT_OTHER).to_string()
    }
}
