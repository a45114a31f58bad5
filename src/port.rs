use anyhow::{Context, Result};
use serialport::{DataBits, FlowControl, Parity, SerialPort, SerialPortType, StopBits};
use std::time::Duration;

/// One attached serial device, as reported by the OS.
#[derive(Debug, Clone)]
pub struct PortCandidate {
    pub device: String,
    pub description: String,
}

/// Enumerate attached devices, sorted by device path so score ties resolve
/// the same way on every run.
pub fn detect_candidates() -> Vec<PortCandidate> {
    let mut ports: Vec<PortCandidate> = serialport::available_ports()
        .unwrap_or_default()
        .into_iter()
        .map(|info| PortCandidate {
            device: info.port_name,
            description: match info.port_type {
                SerialPortType::UsbPort(usb) => usb.product.or(usb.manufacturer).unwrap_or_default(),
                _ => String::new(),
            },
        })
        .collect();
    ports.sort_by(|a, b| a.device.cmp(&b.device));
    ports
}

/// Likelihood that a candidate is an MCU-style device.
pub fn score(c: &PortCandidate) -> u32 {
    let device = c.device.to_lowercase();
    let desc = c.description.to_lowercase();
    let mut score = 0;
    if desc.contains("arduino") {
        score += 5;
    }
    if device.contains("usbmodem") {
        score += 4;
    }
    if device.contains("usbserial") {
        score += 3;
    }
    if cfg!(windows) && device.starts_with("com") {
        score += 2;
    }
    score
}

/// Pick the device to open. An explicit port wins verbatim, unvalidated
/// (open fails fast if it is wrong). Otherwise the first strictly
/// highest-scoring candidate; `None` when nothing is attached.
pub fn select_port(explicit: Option<&str>, available: &[PortCandidate]) -> Option<String> {
    if let Some(port) = explicit
        && !port.is_empty()
    {
        return Some(port.to_string());
    }
    let mut best: Option<(&PortCandidate, u32)> = None;
    for c in available {
        let s = score(c);
        match best {
            Some((_, top)) if s <= top => {}
            _ => best = Some((c, s)),
        }
    }
    best.map(|(c, _)| c.device.clone())
}

pub fn open_port(device: &str, baud: u32) -> Result<Box<dyn SerialPort>> {
    serialport::new(device, baud)
        .timeout(Duration::from_secs(1))
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .open()
        .with_context(|| format!("open {device}"))
}
