//! Serial port discovery for the COM port setting.
//!
//! Enumeration is delegated to the host OS via the `serialport` crate.
//! Run this once when building the settings table, not during an active
//! acquisition; scanning ports blocks.

/// Enumerate host serial ports, sorted by name.
///
/// Enumeration failures are logged and yield an empty list; the host then
/// surfaces an empty choice set rather than an error.
#[cfg(feature = "instrument_serial")]
pub fn available_ports() -> Vec<String> {
    match serialport::available_ports() {
        Ok(ports) => {
            let mut names: Vec<String> = ports.into_iter().map(|info| info.port_name).collect();
            names.sort();
            names
        }
        Err(err) => {
            tracing::warn!(error = %err, "serial port enumeration failed");
            Vec::new()
        }
    }
}

/// Stub used when serial support is compiled out.
#[cfg(not(feature = "instrument_serial"))]
pub fn available_ports() -> Vec<String> {
    tracing::warn!("serial support not enabled; rebuild with --features instrument_serial");
    Vec::new()
}
