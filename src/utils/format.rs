//! Display helpers

/// Format whole seconds as `MM:SS`
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(900), "15:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(1), "00:01");
        assert_eq!(format_clock(0), "00:00");
    }
}
