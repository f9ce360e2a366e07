use std::fmt::Write as _;

use hardsub_rip_types::SubtitleEvent;

/// Renders events as a sequential subtitle track: the sequence number, a
/// `start --> end` timing line, the text lines, then a blank separator.
pub fn render(events: &[SubtitleEvent]) -> String {
    let mut output = String::new();
    for event in events {
        let _ = writeln!(&mut output, "{}", event.sequence);
        let _ = writeln!(
            &mut output,
            "{} --> {}",
            format_timestamp(event.start_ms),
            format_timestamp(event.end_ms)
        );
        for line in event.text.lines() {
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                continue;
            }
            let _ = writeln!(&mut output, "{trimmed}");
        }
        output.push('\n');
    }
    output
}

/// `HH:MM:SS.mmm`, hours padded to two digits.
pub fn format_timestamp(millis: u64) -> String {
    let hours = millis / 3_600_000;
    let minutes = (millis % 3_600_000) / 60_000;
    let seconds = (millis % 60_000) / 1000;
    let remain_ms = millis % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{remain_ms:03}")
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, render};
    use crate::event::{frames_to_ms, materialize};
    use hardsub_rip_types::{Interval, SubtitleEvent, TextSample};

    #[test]
    fn timestamp_formatting() {
        assert_eq!(format_timestamp(0), "00:00:00.000");
        assert_eq!(format_timestamp(3_723_456), "01:02:03.456");
        assert_eq!(format_timestamp(59_999), "00:00:59.999");
    }

    #[test]
    fn track_layout_matches_the_event_block_format() {
        let events = vec![SubtitleEvent {
            sequence: 1,
            start: 60,
            end: 89,
            start_ms: 2000,
            end_ms: 3000,
            text: TextSample::new(vec!["First line".into(), "Second line".into()]),
        }];
        assert_eq!(
            render(&events),
            "1\n00:00:02.000 --> 00:00:03.000\nFirst line\nSecond line\n\n"
        );
    }

    #[test]
    fn empty_text_still_produces_a_timed_block() {
        let events = vec![SubtitleEvent {
            sequence: 1,
            start: 0,
            end: 10,
            start_ms: 0,
            end_ms: 366,
            text: TextSample::empty(),
        }];
        assert_eq!(render(&events), "1\n00:00:00.000 --> 00:00:00.366\n\n");
    }

    fn parse_timestamp(value: &str) -> u64 {
        let (clock, millis) = value.split_once('.').unwrap();
        let mut parts = clock.split(':');
        let hours: u64 = parts.next().unwrap().parse().unwrap();
        let minutes: u64 = parts.next().unwrap().parse().unwrap();
        let seconds: u64 = parts.next().unwrap().parse().unwrap();
        ((hours * 60 + minutes) * 60 + seconds) * 1000 + millis.parse::<u64>().unwrap()
    }

    #[test]
    fn rendered_timestamps_round_trip_within_one_frame() {
        let fps = 23.976;
        let intervals = vec![Interval::new(100, 172), Interval::new(500, 731)];
        let events = materialize(&intervals, fps, |_| TextSample::from("line"));
        let rendered = render(&events);

        let frame_ms = 1000.0 / fps;
        let timings: Vec<&str> = rendered
            .lines()
            .filter(|line| line.contains(" --> "))
            .collect();
        assert_eq!(timings.len(), intervals.len());

        for (line, interval) in timings.iter().zip(&intervals) {
            let (start, end) = line.split_once(" --> ").unwrap();
            let start_ms = parse_timestamp(start) as f64;
            let end_ms = parse_timestamp(end) as f64;
            let expected_start = interval.start as f64 * frame_ms;
            let expected_end = (interval.end + 1) as f64 * frame_ms;
            assert!((start_ms - expected_start).abs() < frame_ms);
            assert!((end_ms - expected_end).abs() < frame_ms);
        }
    }
}
