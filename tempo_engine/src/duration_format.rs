/// Render a span of seconds as days/hours/minutes/seconds with
/// singular/plural unit names, e.g. `61 → "1 minute 1 second"`. Zero-valued
/// units are omitted; zero seconds renders as the empty string.
pub fn format_duration(seconds: i64) -> String {
    let days = seconds / 86400;
    let seconds = seconds % 86400;
    let hours = seconds / 3600;
    let seconds = seconds % 3600;
    let minutes = seconds / 60;
    let seconds = seconds % 60;

    let mut out = String::new();
    push_unit(&mut out, days, "day");
    push_unit(&mut out, hours, "hour");
    push_unit(&mut out, minutes, "minute");
    push_unit(&mut out, seconds, "second");
    out.truncate(out.trim_end().len());
    out
}

fn push_unit(out: &mut String, number: i64, unit: &str) {
    match number {
        0 => {}
        1 => out.push_str(&format!("{} {} ", number, unit)),
        _ => out.push_str(&format!("{} {}s ", number, unit)),
    }
}
