//! USB HID keyboard report abstraction

/// Length of a boot-protocol keyboard report
pub const REPORT_LEN: usize = 8;

/// Sink for keyboard input reports
///
/// Layout is the boot keyboard report: modifier, reserved, then six keycodes.
#[allow(async_fn_in_trait)]
pub trait HidReportSink {
    /// Error type for report submission
    type Error;

    /// Send one report to the host
    ///
    /// Completes once the report has been accepted by the USB stack.
    async fn send_report(&mut self, report: &[u8; REPORT_LEN]) -> Result<(), Self::Error>;
}
