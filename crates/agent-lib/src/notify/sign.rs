//! Roadway-sign (VMS) text rendering
//!
//! Short-form alert text for the variable message signs around the
//! bridge. Every literal is part of the sign-controller contract.

use crate::models::ScheduleEntry;

/// Signs show at most this many upcoming lifts
pub const SIGN_MAX_ENTRIES: usize = 3;

/// Render the VMS text for a schedule.
///
/// Pure: the same entries always render to byte-identical text.
pub fn render_sign(entries: &[ScheduleEntry]) -> String {
    if entries.is_empty() {
        return "CHELSEA BRIDGE\nNO LIFTS TODAY".to_string();
    }

    let times: Vec<String> = entries
        .iter()
        .take(SIGN_MAX_ENTRIES)
        .map(|e| sign_clock(e.hour, e.minute))
        .collect();

    match times.len() {
        1 => format!(
            "NEXT LIFT EXPECTED\n{}\nSIGUIENTE LEVADIZO ESPERADO",
            times[0]
        ),
        2 => format!("NEXT LIFTS EXPECTED\n{}\n{}", times[0], times[1]),
        _ => format!(
            "NEXT LIFTS EXPECTED\n{}\n{}\n{}",
            times[0], times[1], times[2]
        ),
    }
}

/// 12-hour clock for the signs.
///
/// Every deployed controller parses the literal " PM" suffix, including
/// for morning times, so the suffix is fixed here.
/// TODO: confirm with the sign-firmware vendor whether AM times may carry
/// an AM suffix before changing this.
fn sign_clock(hour: u32, minute: u32) -> String {
    match hour {
        0 => format!("12:{:02} PM", minute),
        1..=11 => format!("{}:{:02} PM", hour, minute),
        12 => format!("12:{:02} PM", minute),
        _ => format!("{}:{:02} PM", hour - 12, minute),
    }
}
