//! Types strings as a sequence of keyboard reports

use embedded_hal_async::delay::DelayNs;
use macropad_hal::HidReportSink;

use super::keycode::KeyReport;

/// HID report could not be delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidError<E> {
    /// The report sink failed while sending a report
    Report(E),
}

/// Sends a press and a release report for every character
pub struct Typist<K, D> {
    sink: K,
    delay: D,
    report_delay_ms: u32,
}

impl<K: HidReportSink, D: DelayNs> Typist<K, D> {
    pub fn new(sink: K, delay: D, report_delay_ms: u32) -> Self {
        Self {
            sink,
            delay,
            report_delay_ms,
        }
    }

    /// Type `text`, returning the number of characters sent
    ///
    /// Stops at the first failed report.
    pub async fn type_text(&mut self, text: &str) -> Result<usize, HidError<K::Error>> {
        let mut typed = 0;
        for ch in text.chars() {
            self.type_char(ch).await?;
            typed += 1;
        }
        Ok(typed)
    }

    /// Press and release one character
    pub async fn type_char(&mut self, ch: char) -> Result<(), HidError<K::Error>> {
        self.send(KeyReport::press(ch)).await?;
        self.send(KeyReport::RELEASE).await
    }

    async fn send(&mut self, report: KeyReport) -> Result<(), HidError<K::Error>> {
        self.sink
            .send_report(&report.to_bytes())
            .await
            .map_err(HidError::Report)?;
        self.delay.delay_ms(self.report_delay_ms).await;
        Ok(())
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use heapless::Vec;
    use macropad_hal::REPORT_LEN;

    #[derive(Default)]
    struct MockSink {
        reports: Vec<[u8; REPORT_LEN], 32>,
        fail_after: Option<usize>,
    }

    impl HidReportSink for MockSink {
        type Error = u8;

        async fn send_report(&mut self, report: &[u8; REPORT_LEN]) -> Result<(), u8> {
            if self.fail_after == Some(self.reports.len()) {
                return Err(7);
            }
            self.reports.push(*report).map_err(|_| 0)?;
            Ok(())
        }
    }

    /// Records requested delays instead of waiting
    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    #[test]
    fn test_press_release_sequence() {
        let mut typist = Typist::new(MockSink::default(), MockDelay::default(), 15);
        let typed = block_on(typist.type_text("Hi")).unwrap();

        assert_eq!(typed, 2);
        assert_eq!(
            &typist.sink().reports[..],
            &[
                [2, 0, 11, 0, 0, 0, 0, 0],
                [0; REPORT_LEN],
                [0, 0, 12, 0, 0, 0, 0, 0],
                [0; REPORT_LEN],
            ]
        );
        // 15 ms after each of the four reports
        assert_eq!(typist.delay.total_ns, 4 * 15_000_000);
    }

    #[test]
    fn test_failure_stops_typing() {
        let sink = MockSink {
            fail_after: Some(3),
            ..Default::default()
        };
        let mut typist = Typist::new(sink, MockDelay::default(), 15);

        assert_eq!(block_on(typist.type_text("abc")), Err(HidError::Report(7)));
        assert_eq!(typist.sink().reports.len(), 3);
    }

    #[test]
    fn test_empty_text_sends_nothing() {
        let mut typist = Typist::new(MockSink::default(), MockDelay::default(), 15);
        assert_eq!(block_on(typist.type_text("")), Ok(0));
        assert!(typist.sink().reports.is_empty());
    }
}
